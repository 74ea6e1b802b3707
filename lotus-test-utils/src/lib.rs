//! Shared test scaffolding for the Lotus crate.
//!
//! Tests describe their environment with a [`TestBuilder`] (mock backend endpoints and their
//! expected call counts), then run against the resulting [`TestContext`], which owns the mock
//! backend server and an in-memory session.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{fixtures::factory, TestBuilder, TestContext, TestError};
}
