//! `edge-bundler check`.

use crate::cli::CheckArgs;
use crate::config::{CliOverrides, EdgeConfig, resolve_path};
use crate::error::{BuildError, Result};
use crate::ui;
use edge_bundler::output::MANIFEST_FILE;

/// Execute the check command.
///
/// Succeeds when `manifest.json` in the output directory parses, the bundle
/// it names exists, and the bundle's SHA-1, byte length, and content type
/// match the manifest.
pub async fn execute(args: CheckArgs) -> Result<()> {
    let config = EdgeConfig::load(&CliOverrides::from(&args), args.config.as_deref())?;
    let root = config.project_root()?;
    let out_dir = resolve_path(&config.out_dir, &root);

    if !out_dir.join(MANIFEST_FILE).is_file() {
        return Err(BuildError::ManifestMissing(out_dir).into());
    }

    let manifest = edge_bundler::verify_output(&out_dir).await?;

    ui::success(&format!(
        "{} matches manifest.json ({} handler(s), {})",
        manifest.sha_sum,
        manifest.handlers.len(),
        ui::format_size(manifest.content_length)
    ));
    Ok(())
}
