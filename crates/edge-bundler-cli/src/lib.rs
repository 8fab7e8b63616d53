//! Command-line interface for edge-bundler.
//!
//! Wraps the post-build hook from the `edge-bundler` crate with layered
//! configuration, readable errors, and terminal output.
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `build`, `check` and `schema`
//! - [`config`] - `edge.config.json` loading and validation
//! - [`error`] - error types with actionable hints
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages and formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use edge_bundler_cli::{config::EdgeConfig, error::Result};
//!
//! fn main() -> Result<()> {
//!     let config = EdgeConfig::load(&Default::default(), None)?;
//!     config.validate()?;
//!     println!("bundling {}", config.source_dir.display());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result};
