#![forbid(unsafe_code)]

//! tabsync public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.
//!
//! ```rust
//! use tabsync::prelude::*;
//!
//! let session = PageSession::with_search("?env=dotnet");
//! let config = TabGroupConfig::new(MountStrategy::KeepMounted)
//!     .group_id("env")
//!     .query_string(QueryKey::GroupId);
//! let tabs = || vec![Tab::new("nodejs", "npm install"), Tab::new("dotnet", "dotnet restore")];
//!
//! let mut first = TabGroup::in_session(tabs(), config.clone(), &session)?;
//! let second = TabGroup::in_session(tabs(), config, &session)?;
//! assert_eq!(first.selected_value(), "dotnet");
//!
//! first.select("nodejs")?;
//! assert_eq!(second.selected_value(), "nodejs");
//! assert_eq!(session.location().search(), "?env=nodejs");
//! # Ok::<(), tabsync::prelude::TabError>(())
//! ```

pub use tabsync_core as core;
pub use tabsync_runtime as runtime;
pub use tabsync_widgets as widgets;

pub mod prelude {
    pub use tabsync_core::event::{KeyCode, KeyEvent, Modifiers};
    pub use tabsync_core::query::QueryString;
    pub use tabsync_runtime::{Location, PageSession, SelectionStore, SharedSelections};
    pub use tabsync_widgets::{
        Bindings, MountStrategy, PaneVisibility, QueryKey, Tab, TabError, TabGroup,
        TabGroupConfig,
    };
}
