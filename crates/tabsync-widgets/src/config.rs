#![forbid(unsafe_code)]

//! Tab group configuration.
//!
//! [`TabGroupConfig`] has no `Default`: the mount strategy must always be
//! chosen explicitly because it decides whether inactive panes keep their
//! internal state.
//!
//! ```rust
//! use tabsync_widgets::{MountStrategy, QueryKey, TabGroupConfig};
//!
//! let config = TabGroupConfig::new(MountStrategy::KeepMounted)
//!     .group_id("engine")
//!     .default_value("AutoCAD")
//!     .query_string(QueryKey::GroupId);
//! assert_eq!(config.resolved_query_key().unwrap().as_deref(), Some("engine"));
//! ```

use crate::error::{Result, TabError};

/// Which panes stay mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MountStrategy {
    /// Mount every pane once; inactive panes are hidden and inert.
    KeepMounted,
    /// Mount only the active pane; switching remounts.
    ActiveOnly,
}

impl MountStrategy {
    #[must_use]
    pub const fn keeps_inactive(self) -> bool {
        matches!(self, Self::KeepMounted)
    }
}

/// Query-string parameter a group mirrors its selection into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum QueryKey {
    /// Use the group id as the parameter name.
    GroupId,
    /// Use an explicit parameter name.
    Named(String),
}

/// Construction options for a [`TabGroup`](crate::TabGroup).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TabGroupConfig {
    pub mount: MountStrategy,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_value: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub group_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub query_string: Option<QueryKey>,
}

impl TabGroupConfig {
    #[must_use]
    pub fn new(mount: MountStrategy) -> Self {
        Self {
            mount,
            default_value: None,
            group_id: None,
            query_string: None,
        }
    }

    /// Value selected when neither the query nor the registry decides.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Synchronize with every other group sharing this id.
    #[must_use]
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Read and reflect the selection through the page query string.
    #[must_use]
    pub fn query_string(mut self, key: QueryKey) -> Self {
        self.query_string = Some(key);
        self
    }

    /// Parameter name used for query reflection, if enabled.
    pub fn resolved_query_key(&self) -> Result<Option<String>> {
        match &self.query_string {
            None => Ok(None),
            Some(QueryKey::Named(name)) => Ok(Some(name.clone())),
            Some(QueryKey::GroupId) => self
                .group_id
                .clone()
                .map(Some)
                .ok_or(TabError::QueryKeyWithoutGroup),
        }
    }
}
