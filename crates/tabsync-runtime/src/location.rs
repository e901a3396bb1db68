#![forbid(unsafe_code)]

//! Observable page location.
//!
//! Only the query string is modelled. [`Location::replace_param`] mirrors
//! `history.replaceState`: it rewrites the current entry without creating a
//! new one. [`Location::navigate`] models a navigation that swaps the whole
//! query (link click, back/forward).

use tabsync_core::query::QueryString;

use crate::reactive::{Observable, Subscription};

/// Shared handle to the current page query. Clones observe the same location.
#[derive(Debug, Clone, Default)]
pub struct Location {
    query: Observable<QueryString>,
}

impl Location {
    #[must_use]
    pub fn new(query: QueryString) -> Self {
        Self {
            query: Observable::new(query),
        }
    }

    /// Location for a `location.search` string such as `?engine=Revit`.
    #[must_use]
    pub fn from_search(search: &str) -> Self {
        Self::new(QueryString::parse(search))
    }

    /// Snapshot of the current query.
    #[must_use]
    pub fn query(&self) -> QueryString {
        self.query.get()
    }

    /// Current value of one query parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<String> {
        self.query.with(|q| q.get(key).map(str::to_owned))
    }

    /// Rendered `?k=v` form of the current query.
    #[must_use]
    pub fn search(&self) -> String {
        self.query.with(ToString::to_string)
    }

    /// Set one parameter in place. Returns `true` when the query changed.
    pub fn replace_param(&self, key: &str, value: &str) -> bool {
        let changed = self.query.update(|q| {
            q.set(key, value);
        });
        if changed {
            tracing::debug!(message = "location.replace", key, value);
        }
        changed
    }

    /// Swap in a whole new query. Returns `true` when the query changed.
    pub fn navigate(&self, query: QueryString) -> bool {
        let changed = self.query.set(query);
        if changed {
            tracing::debug!(message = "location.navigate", search = %self.search());
        }
        changed
    }

    /// Observe every future change of the query.
    pub fn subscribe(&self, callback: impl Fn(&QueryString) + 'static) -> Subscription {
        self.query.subscribe(callback)
    }

    /// Number of changes applied so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.query.version()
    }
}
