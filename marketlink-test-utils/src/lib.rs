//! Shared test infrastructure for marketlink.
//!
//! Tests declare the tables and fixtures they need through [`TestBuilder`], then act on the
//! returned [`TestContext`], which owns an in-memory SQLite database and a mock HTTP server
//! standing in for external sales channels.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{fixtures::catalog::factory, TestBuilder, TestContext, TestError};
}
