//! goLOTUS staff and client management.
//!
//! The crate is split into a shared [`model`] module, compiled for both the browser client and
//! the server, and a [`server`] module (behind the `server` feature) that proxies the external
//! collection API and translates field names at its boundary.

pub mod model;

#[cfg(feature = "server")]
pub mod server;
