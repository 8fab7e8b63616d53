#![cfg_attr(docsrs, feature(doc_cfg))]

//! # edge-bundler
//!
//! Packages a directory of edge handlers into a single content-addressed bundle.
//!
//! The pipeline has three sequential steps:
//!
//! 1. [`assembler`] scans the handler directory and synthesizes an entrypoint that
//!    imports every handler and registers it in `edgeRegistry`.
//! 2. [`builders`] runs Rolldown over that entrypoint and produces one IIFE script.
//! 3. [`output`] hashes the script with SHA-1 and writes it next to `manifest.json`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use edge_bundler::hook::{HookInputs, on_post_build};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! on_post_build(HookInputs::new("./edge-handlers")).await?;
//! # Ok(()) }
//! ```
//!
//! ### Inspecting the result
//!
//! ```no_run
//! use edge_bundler::hook::{HookInputs, run};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = run(HookInputs::new("./edge-handlers").persist(false)).await?;
//! println!("{} -> {}", report.manifest.handlers.join(", "), report.manifest.sha_sum);
//! # Ok(()) }
//! ```

pub mod assembler;
pub mod builders;
pub mod diagnostics;
pub mod hook;
pub mod output;
pub mod plugins;

// Re-export core Rolldown types for library users
pub use rolldown::{BundleOutput, InputItem, OutputFormat, Platform, ResolveOptions};
pub use rolldown_common::Output;

pub use assembler::{AssembledEntry, HandlerFile, HandlerRegistry, assemble};
pub use builders::{BundleOptions, BundledScript, bundle};
pub use hook::{BuildReport, HookInputs, on_post_build, run};
pub use output::{BundleManifest, content_hash, verify_output, write_bundle};

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

/// Error types for edge-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from Rolldown bundler.
    #[error("Rolldown bundler error: {}", format_bundler_error(.0))]
    Bundler(Vec<diagnostics::ExtractedDiagnostic>),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error with context message.
    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid output path.
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// Bundle output is missing or disagrees with its manifest.
    #[error("Output mismatch: {0}")]
    OutputMismatch(String),

    /// Manifest (de)serialization failed.
    #[error("Manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for edge-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a Rolldown error.
    ///
    /// Extracts structured diagnostics from Rolldown's error types.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(diagnostics::extract_from_rolldown_error(error))
    }

    /// Wrap an I/O error with a message naming the path involved.
    pub(crate) fn io_at(action: &str, path: &std::path::Path, source: std::io::Error) -> Self {
        Error::IoError {
            message: format!("Failed to {} '{}': {}", action, path.display(), source),
            source,
        }
    }
}

/// Format bundler error diagnostics for display.
fn format_bundler_error(diagnostics: &[diagnostics::ExtractedDiagnostic]) -> String {
    match diagnostics {
        [] => "Unknown bundler error".to_string(),
        [diag] => diag.to_string(),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Io(_) | Error::IoError { .. } => "IO_ERROR",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
            Error::OutputMismatch(_) => "OUTPUT_MISMATCH",
            Error::Json(_) => "MANIFEST_JSON",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::InvalidConfig(msg) => Some(Box::new(format!(
                "Check your edge.config.json for invalid values.\nError: {}",
                msg
            ))),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Use a directory path without null bytes.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write file. Check disk space and permissions.\nError: {}",
                msg
            ))),
            Error::OutputMismatch(_) => Some(Box::new(
                "Rebuild the handlers; the bundle file and manifest.json must come from the same build.",
            )),
            Error::Bundler(diagnostics) => match diagnostics.as_slice() {
                [single] => single
                    .help
                    .as_ref()
                    .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>),
                [] => None,
                _ => Some(Box::new(
                    "Multiple bundler errors occurred. See details below.".to_string(),
                )),
            },
            _ => None,
        }
    }
}
