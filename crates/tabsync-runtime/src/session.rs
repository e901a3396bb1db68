#![forbid(unsafe_code)]

//! Page session: the owner of per-page shared state.
//!
//! A [`PageSession`] lives as long as one loaded page. It owns the selection
//! registry that synchronizes tab groups and the page [`Location`]. Widgets
//! receive handles to both when they are built, never a global.

use std::rc::Rc;

use tabsync_core::query::QueryString;

use crate::location::Location;
use crate::selection::{SelectionStore, SharedSelections};

/// Owner of the selection registry and page location for one page load.
#[derive(Debug, Clone, Default)]
pub struct PageSession {
    selections: Rc<SharedSelections>,
    location: Location,
}

impl PageSession {
    /// Session with an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session opened at a `location.search` string.
    #[must_use]
    pub fn with_search(search: &str) -> Self {
        Self {
            selections: Rc::default(),
            location: Location::from_search(search),
        }
    }

    /// Registry handle for injection into widgets.
    #[must_use]
    pub fn selections(&self) -> Rc<dyn SelectionStore> {
        Rc::clone(&self.selections) as Rc<dyn SelectionStore>
    }

    /// Concrete registry, for inspection.
    #[must_use]
    pub fn shared_selections(&self) -> &SharedSelections {
        &self.selections
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Navigate to a new `location.search` string.
    pub fn navigate(&self, search: &str) -> bool {
        self.location.navigate(QueryString::parse(search))
    }

    /// Full page reload: the registry is emptied, the location survives.
    pub fn reload(&self) {
        self.selections.clear();
        tracing::debug!(message = "session.reload", search = %self.location.search());
    }
}
