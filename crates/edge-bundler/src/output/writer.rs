//! Writing and checking bundle output.
//!
//! A build writes exactly two files into the output directory: the bundle,
//! named after its SHA-1, and `manifest.json`, in that order. Earlier
//! hash-named bundles are left in place.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tokio::fs;
use tracing::{debug, info};

use super::manifest::{BundleManifest, CONTENT_TYPE, MANIFEST_FILE, content_hash};
use crate::{Error, Result};

/// Compute the manifest for `code` and, when `persist` is set, write the
/// bundle and `manifest.json` into `out_dir`.
///
/// With `persist` unset nothing touches the filesystem; the manifest is
/// still returned.
///
/// # Errors
///
/// Returns [`Error::InvalidOutputPath`] for an unusable directory and
/// [`Error::WriteFailure`] when creating the directory or a file fails.
///
/// # Examples
///
/// ```no_run
/// use edge_bundler::output::write_bundle;
/// use std::path::Path;
///
/// # async fn example() -> edge_bundler::Result<()> {
/// let handlers = vec!["example.js".to_string()];
/// let manifest = write_bundle("(()=>{})();", &handlers, Path::new(".edge/handlers"), true).await?;
/// println!("wrote {}", manifest.sha_sum);
/// # Ok(())
/// # }
/// ```
pub async fn write_bundle(
    code: &str,
    handlers: &[String],
    out_dir: &Path,
    persist: bool,
) -> Result<BundleManifest> {
    let manifest = BundleManifest::for_bundle(code, handlers.to_vec());

    if !persist {
        debug!(sha = %manifest.sha_sum, "persist disabled, skipping bundle write");
        return Ok(manifest);
    }

    let dir = validate_and_normalize_dir(out_dir)?;
    fs::create_dir_all(&dir).await.map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let bundle_path = validate_output_path(&dir, &manifest.sha_sum)?;
    write_file(&bundle_path, code.as_bytes()).await?;

    let manifest_path = dir.join(MANIFEST_FILE);
    write_file(&manifest_path, manifest.to_json()?.as_bytes()).await?;

    info!(
        sha = %manifest.sha_sum,
        bytes = manifest.content_length,
        dir = %dir.display(),
        "wrote edge handler bundle"
    );

    Ok(manifest)
}

/// Read `manifest.json` from `out_dir` and check the bundle it names.
///
/// The bundle file must exist, hash to the recorded `shaSum`, and have the
/// recorded byte length.
///
/// # Errors
///
/// Returns [`Error::OutputMismatch`] when the manifest and bundle disagree,
/// [`Error::IoError`] when either file cannot be read and [`Error::Json`]
/// for a malformed manifest.
pub async fn verify_output(out_dir: &Path) -> Result<BundleManifest> {
    let dir = validate_and_normalize_dir(out_dir)?;
    let manifest_path = dir.join(MANIFEST_FILE);

    let raw = fs::read_to_string(&manifest_path)
        .await
        .map_err(|e| Error::io_at("read manifest", &manifest_path, e))?;
    let manifest: BundleManifest = serde_json::from_str(&raw)?;

    if manifest.content_type != CONTENT_TYPE {
        return Err(Error::OutputMismatch(format!(
            "manifest content_type is '{}', expected '{}'",
            manifest.content_type, CONTENT_TYPE
        )));
    }

    let bundle_path = validate_output_path(&dir, &manifest.sha_sum)?;
    let bytes = fs::read(&bundle_path)
        .await
        .map_err(|e| Error::io_at("read bundle", &bundle_path, e))?;

    let actual = content_hash(&bytes);
    if actual != manifest.sha_sum {
        return Err(Error::OutputMismatch(format!(
            "bundle '{}' hashes to {}",
            bundle_path.display(),
            actual
        )));
    }

    if bytes.len() as u64 != manifest.content_length {
        return Err(Error::OutputMismatch(format!(
            "bundle is {} bytes, manifest records {}",
            bytes.len(),
            manifest.content_length
        )));
    }

    debug!(sha = %manifest.sha_sum, "bundle matches manifest");
    Ok(manifest)
}

/// Clean `dir` and make it absolute against the process cwd.
fn validate_and_normalize_dir(dir: &Path) -> Result<PathBuf> {
    if dir.as_os_str().is_empty() {
        return Err(Error::InvalidOutputPath("<empty>".to_string()));
    }
    if dir.to_string_lossy().contains('\0') {
        return Err(Error::InvalidOutputPath(dir.display().to_string()));
    }

    let cleaned = dir.clean();
    if cleaned.is_absolute() {
        return Ok(cleaned);
    }

    let cwd = std::env::current_dir()
        .map_err(|e| Error::InvalidOutputPath(format!("Failed to get current directory: {}", e)))?;
    Ok(cwd.join(&cleaned).clean())
}

/// Join `filename` onto `base_dir`, refusing anything that leaves it.
fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let full_path = base_dir.join(Path::new(filename).clean()).clean();
    if full_path == base_dir || !full_path.starts_with(base_dir) {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}'",
            filename,
            base_dir.display()
        )));
    }

    Ok(full_path)
}

async fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).await.map_err(|e| {
        Error::WriteFailure(format!("Failed to write '{}': {}", path.display(), e))
    })
}
