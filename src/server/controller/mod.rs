//! HTTP controller endpoints for the Lotus web API.
//!
//! Axum handlers for the collection proxy and user synchronization. Every handler identifies
//! the caller before doing anything else, then delegates to the service layer and relies on
//! [`Error`](crate::server::error::Error) for status mapping. Handlers are documented with
//! utoipa for the OpenAPI spec.

pub mod collection;
pub mod user;
pub mod util;
