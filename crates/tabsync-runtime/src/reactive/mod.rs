#![forbid(unsafe_code)]

//! Change-notifying values for one page session.
//!
//! An [`Observable`] holds a value and a list of callbacks. Writing a
//! different value bumps its version and calls each callback with the new
//! value. [`subscribe`](Observable::subscribe) hands back a [`Subscription`];
//! the callback stays registered for exactly as long as that guard lives.
//!
//! Everything here is `Rc` based and stays on one thread. The observable
//! keeps only `Weak` handles to its callbacks and prunes dead ones whenever it
//! notifies.
//!
//! # Invariants
//!
//! 1. The version moves by one for each write that changes the value, and
//!    never otherwise.
//! 2. Callbacks run in the order they were subscribed.
//! 3. Writing an equal value changes nothing and calls nobody.
//! 4. A dropped [`Subscription`] is never called again.
//! 5. Callbacks run after the value is stored and its borrow released. A
//!    callback can therefore read or write its own observable.

pub mod observable;

pub use observable::{Observable, Subscription};
