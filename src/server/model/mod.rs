//! Server application models and type definitions.
//!
//! Shared application state handed to every handler and the typed wrappers for data kept in
//! the visitor's session.

pub mod app;
pub mod session;
