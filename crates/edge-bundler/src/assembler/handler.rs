//! Handler discovery.

use std::path::Path;

use tokio::fs;
use tracing::{debug, trace, warn};

use crate::{Error, Result};

/// File extensions recognised as edge handlers. Matching is case-sensitive.
pub const HANDLER_EXTENSIONS: [&str; 2] = [".js", ".ts"];

/// A handler source file found in the handler directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFile {
    /// File name including its extension, e.g. `example.js`.
    pub file_name: String,
    /// File name with the matched extension removed; the registry key.
    pub base_name: String,
}

impl HandlerFile {
    /// Build a handler from a directory entry name, or `None` if the name does
    /// not carry a handler extension.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        HANDLER_EXTENSIONS.iter().find_map(|ext| {
            file_name.strip_suffix(ext).map(|base| Self {
                file_name: file_name.to_string(),
                base_name: base.to_string(),
            })
        })
    }
}

/// List the handlers directly inside `source_dir`.
///
/// Only regular files are considered; directories and symlinks are skipped
/// along with files of any other extension. Results keep the directory
/// listing order, which is platform dependent.
pub async fn discover_handlers(source_dir: &Path) -> Result<Vec<HandlerFile>> {
    let mut entries = fs::read_dir(source_dir)
        .await
        .map_err(|e| Error::io_at("read handler directory", source_dir, e))?;

    let mut handlers = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io_at("read handler directory", source_dir, e))?
    {
        // DirEntry::file_type does not follow symlinks
        let file_type = entry.file_type().await?;
        if !file_type.is_file() {
            trace!(path = %entry.path().display(), "skipping non-file entry");
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            warn!(path = %entry.path().display(), "skipping file with a non UTF-8 name");
            continue;
        };

        match HandlerFile::from_file_name(name) {
            Some(handler) => handlers.push(handler),
            None => trace!(file = name, "skipping non-handler file"),
        }
    }

    debug!(
        dir = %source_dir.display(),
        count = handlers.len(),
        "discovered edge handlers"
    );
    Ok(handlers)
}
