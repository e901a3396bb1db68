#![forbid(unsafe_code)]

//! Core: canonical key events and the page query-string model.

pub mod event;
pub mod query;
