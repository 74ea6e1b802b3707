//! Data access layer for the backend collection API.
//!
//! [`backend::BackendClient`] owns the HTTP connection pool and the retry policy, while
//! [`collection::CollectionRepository`] exposes typed CRUD operations for one collection. Both
//! speak backend field naming; translation happens in the service layer.

pub mod backend;
pub mod collection;
