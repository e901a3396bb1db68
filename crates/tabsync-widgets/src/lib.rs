#![forbid(unsafe_code)]

//! Widgets: synchronized tab groups.
//!
//! A [`TabGroup`] shows one labelled pane at a time. Groups built with the
//! same group id inside one [`PageSession`](tabsync_runtime::PageSession)
//! follow each other's selection, and a group may mirror its selection into
//! the page query string.

pub mod config;
pub mod error;
pub mod focus;
pub mod tab_group;

pub use config::{MountStrategy, QueryKey, TabGroupConfig};
pub use error::{Result, TabError};
pub use focus::RovingFocus;
pub use tab_group::{
    Bindings, MountId, PaneView, PaneVisibility, RenderedGroup, Tab, TabGroup, TabLabel, TabSpec,
};
