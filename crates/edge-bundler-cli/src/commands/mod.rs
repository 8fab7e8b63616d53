//! Command implementations.
//!
//! - [`build`] - Bundle the handler directory
//! - [`check`] - Verify a written bundle against its manifest
//! - [`schema`] - Print the edge.config.json schema

pub mod build;
pub mod check;
pub mod schema;

pub use build::execute as build_execute;
pub use check::execute as check_execute;
pub use schema::execute as schema_execute;
