//! Error handling for the edge-bundler CLI.
//!
//! - `CliError` is what every command returns
//! - `ConfigError` and `BuildError` carry a "Hint:" line telling the user what to change
//!
//! # Example
//!
//! ```rust
//! use edge_bundler_cli::error::{BuildError, CliError};
//! use std::path::PathBuf;
//!
//! let err: CliError = BuildError::SourceDirNotFound(PathBuf::from("edge-handlers")).into();
//! assert!(err.to_string().contains("Hint:"));
//! ```

mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;

pub use diagnostic::{build_error_to_miette, cli_error_to_miette};

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors detected by the CLI before or after bundling
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Errors from the bundling pipeline itself
    #[error(transparent)]
    Bundler(#[from] edge_bundler::Error),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file passed with --config doesn't exist
    #[error("Config file not found: {}\n\nHint: Create an edge.config.json file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Config sources could not be merged into a valid configuration
    #[error("Invalid configuration: {0}\n\nHint: Check edge.config.json and EDGE_* variables; run 'edge-bundler schema' to see every field")]
    Extract(String),

    /// Mutually exclusive options were specified
    #[error("Conflicting options: {0}\n\nHint: These options cannot be used together")]
    ConflictingOptions(String),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Build process errors raised by the CLI around the pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Handler directory doesn't exist
    #[error("Handler directory not found: {}\n\nHint: Create it or point --source-dir at the directory holding your .js/.ts handlers", .0.display())]
    SourceDirNotFound(PathBuf),

    /// Handler path exists but is a file
    #[error("Handler path is not a directory: {}\n\nHint: --source-dir must name a directory, not a single handler file", .0.display())]
    SourceNotDirectory(PathBuf),

    /// Project root doesn't exist
    #[error("Project root not found: {}\n\nHint: Check the --cwd argument or the 'cwd' field in edge.config.json", .0.display())]
    RootNotFound(PathBuf),

    /// Nothing to check in the output directory
    #[error("No manifest.json in {}\n\nHint: Run 'edge-bundler build' first, or pass the directory it wrote to with --out-dir", .0.display())]
    ManifestMissing(PathBuf),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
