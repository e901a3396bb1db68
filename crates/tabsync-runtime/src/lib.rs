#![forbid(unsafe_code)]

//! Runtime: reactive bindings, the shared selection registry, the page
//! location, and the session that owns both.
//!
//! Everything here is single-threaded. State is shared through `Rc` and
//! mutations notify subscribers synchronously, so a write is visible to every
//! observer before the writing call returns.

pub mod location;
pub mod reactive;
pub mod selection;
pub mod session;

pub use location::Location;
pub use reactive::{Observable, Subscription};
pub use selection::{SelectionStore, SharedSelections};
pub use session::PageSession;
