#![forbid(unsafe_code)]

//! Page query-string model.
//!
//! [`QueryString`] is an ordered list of decoded `key=value` pairs. Parsing
//! follows `application/x-www-form-urlencoded` rules closely enough for
//! browser `location.search` strings:
//!
//! - a leading `?` is optional,
//! - pairs are separated by `&`, empty segments are skipped,
//! - `+` decodes to a space, `%XX` escapes are percent-decoded,
//! - malformed UTF-8 is decoded lossily instead of rejected.
//!
//! Rendering with [`Display`](std::fmt::Display) produces `?k=v&...`, or the
//! empty string when there are no pairs.

use std::borrow::Cow;
use std::fmt;

/// Ordered, decoded query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

fn decode_component(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

impl QueryString {
    /// Empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `location.search` style string.
    #[must_use]
    pub fn parse(search: &str) -> Self {
        let body = search.strip_prefix('?').unwrap_or(search);
        let pairs = body
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((key, value)) => (decode_component(key), decode_component(value)),
                None => (decode_component(segment), String::new()),
            })
            .collect();
        Self { pairs }
    }

    /// First value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first `key` entry in place, or append a new one.
    ///
    /// Later duplicates of `key` are dropped so the query carries exactly one
    /// value for it afterwards. Returns `true` when the query changed.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let before = self.pairs.len();
        let mut seen = false;
        let mut changed = false;
        self.pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            if v != value {
                *v = value.to_owned();
                changed = true;
            }
            true
        });
        if !seen {
            self.pairs.push((key.to_owned(), value.to_owned()));
            return true;
        }
        changed || self.pairs.len() != before
    }

    /// Remove every entry under `key`. Returns `true` when something was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.len() != before
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterate decoded pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (key, value)) in self.pairs.iter().enumerate() {
            f.write_str(if idx == 0 { "?" } else { "&" })?;
            write!(
                f,
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

impl From<&str> for QueryString {
    fn from(search: &str) -> Self {
        Self::parse(search)
    }
}
