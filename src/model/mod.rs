//! Shared data models.
//!
//! Everything in here compiles for both the browser client and the server: the dynamic
//! [`entity::Entity`] record, the field-name [`translator`], per-collection [`schema`]s, list
//! [`query`] parsing and the change-tracking [`reconciler`].

pub mod api;
pub mod entity;
pub mod query;
pub mod reconciler;
pub mod schema;
pub mod translator;
pub mod user;
