//! Test fixtures.
//!
//! - `factory` - Backend-shaped records and signed identity tokens
//! - `mockito` - Mock backend endpoint creation used by [`TestBuilder`](crate::TestBuilder)

pub mod factory;
pub mod mockito;
