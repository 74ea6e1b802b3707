//! Server application core modules.
//!
//! Everything that runs behind the HTTP boundary: configuration, the backend collection API
//! client, identity token verification, the collection proxy and user synchronization
//! handlers, and OpenAPI routing.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
