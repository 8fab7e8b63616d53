//! Entrypoint assembly.
//!
//! Turns a directory of handler files into a single synthesized module that the
//! bundler can use as its only input. See [`assemble`].

mod entrypoint;
mod handler;
mod registry;

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tokio::fs;
use tracing::{debug, warn};

use crate::{Error, Result};

pub use entrypoint::{AliasGenerator, REGISTRY_GLOBAL, render_entrypoint};
pub use handler::{HANDLER_EXTENSIONS, HandlerFile, discover_handlers};
pub use registry::{HandlerRegistry, Registration};

/// File name of the synthesized entrypoint inside the work directory.
pub const MAIN_FILE: &str = "__edgeMain.ts";

/// File name of the ambient type declarations next to the entrypoint.
pub const TYPES_FILE: &str = "__edgeTypes.d.ts";

/// Prefix of the per-invocation work directory.
pub const TEMP_DIR_PREFIX: &str = "handlers-";

/// Ambient declarations for `edgeRegistry` and the handler module shape.
pub const TYPES_DECLARATION: &str = include_str!("../../assets/edge-types.d.ts");

/// Result of [`assemble`].
#[derive(Debug, Clone)]
pub struct AssembledEntry {
    /// Handler file names in directory-listing order.
    pub handlers: Vec<String>,
    /// Path of the synthesized entrypoint module.
    pub entry_path: PathBuf,
    /// Work directory holding the entrypoint and type declarations.
    ///
    /// Not removed by this crate.
    pub work_dir: PathBuf,
    /// Absolute handler directory the imports point into.
    pub source_dir: PathBuf,
    /// Registrations performed by the entrypoint.
    pub registry: HandlerRegistry,
}

/// Assemble the handlers in `source_dir` into an entrypoint module.
///
/// Creates a fresh `handlers-*` directory under the system temp dir, writes
/// the type declarations and `__edgeMain.ts` into it, and returns both the
/// handler list and the entrypoint path.
///
/// # Errors
///
/// Fails with an I/O error if `source_dir` is missing or unlistable, or if the
/// work directory or either generated file cannot be written.
pub async fn assemble(source_dir: impl AsRef<Path>) -> Result<AssembledEntry> {
    let source_dir = absolute_dir(source_dir.as_ref())?;

    let work_dir = tempfile::Builder::new()
        .prefix(TEMP_DIR_PREFIX)
        .tempdir()
        .map_err(|e| Error::io_at("create work directory in", &std::env::temp_dir(), e))?
        .keep();

    let types_path = work_dir.join(TYPES_FILE);
    fs::write(&types_path, TYPES_DECLARATION)
        .await
        .map_err(|e| Error::io_at("write", &types_path, e))?;

    let handlers = discover_handlers(&source_dir).await?;
    if handlers.is_empty() {
        warn!(dir = %source_dir.display(), "no edge handlers found");
    }

    let (contents, registry) = render_entrypoint(&handlers, &source_dir);
    for shadowed in registry.shadowed() {
        warn!(
            key = %shadowed.key,
            file = %shadowed.file_name,
            "handler is overwritten by a later handler with the same name"
        );
    }

    let entry_path = work_dir.join(MAIN_FILE);
    fs::write(&entry_path, contents)
        .await
        .map_err(|e| Error::io_at("write", &entry_path, e))?;

    debug!(
        entry = %entry_path.display(),
        handlers = handlers.len(),
        "assembled edge entrypoint"
    );

    Ok(AssembledEntry {
        handlers: handlers.into_iter().map(|h| h.file_name).collect(),
        entry_path,
        work_dir,
        source_dir,
        registry,
    })
}

/// Resolve `dir` against the current directory and clean it.
pub(crate) fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.clean());
    }

    let cwd = std::env::current_dir()
        .map_err(|e| Error::InvalidConfig(format!("Failed to get current directory: {}", e)))?;
    Ok(cwd.join(dir).clean())
}
