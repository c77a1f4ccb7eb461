//! Configuration module for scalecmp
//!
//! Provides types, discovery and loading for `scalecmp.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
