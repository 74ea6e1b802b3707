//! Service layer for request handling logic.
//!
//! Services sit between the controllers and the repositories: they verify caller identity,
//! validate and translate records at the frontend/backend boundary, and synchronize identity
//! provider users into the backend `Users` collection.

pub mod auth;
pub mod collection;
pub mod retry;
pub mod user;
