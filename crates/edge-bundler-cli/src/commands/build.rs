//! `edge-bundler build`.

use crate::cli::BuildArgs;
use crate::config::{CliOverrides, EdgeConfig, resolve_path};
use crate::error::{BuildError, Result};
use crate::ui;
use edge_bundler::hook::{self, BuildReport, HookInputs};
use std::path::Path;
use std::time::Instant;

/// Execute the build command.
///
/// 1. Load and validate configuration (CLI > Env > File > Defaults)
/// 2. Check the handler directory exists
/// 3. Run the post-build pipeline
/// 4. Print the bundle summary
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    let config = EdgeConfig::load(&CliOverrides::from(&args), args.config.as_deref())?;
    config.validate()?;

    let root = config.project_root()?;
    let source_dir = resolve_path(&config.source_dir, &root);
    let out_dir = resolve_path(&config.out_dir, &root);
    validate_source_dir(&source_dir)?;

    let inputs = HookInputs::new(&source_dir)
        .out_dir(&out_dir)
        .persist(config.persist)
        .bundle_options(config.bundle_options(&root));

    let report = run_with_spinner(inputs).await?;

    // Shadowed handlers and bundler warnings are already logged by the pipeline.
    let written = config.persist.then_some(out_dir.as_path());
    ui::print_bundle_summary(&report.manifest, written, start_time.elapsed());
    ui::success(&format!(
        "Bundled {} handler(s) in {}",
        report.manifest.handlers.len(),
        ui::format_duration(start_time.elapsed())
    ));

    Ok(())
}

async fn run_with_spinner(inputs: HookInputs) -> Result<BuildReport> {
    let spinner = ui::Spinner::new("Bundling edge handlers...");
    match hook::run(inputs).await {
        Ok(report) => {
            spinner.finish(&format!("Bundle {}", report.manifest.sha_sum));
            Ok(report)
        }
        Err(e) => {
            spinner.fail("Bundling failed");
            Err(e.into())
        }
    }
}

fn validate_source_dir(source_dir: &Path) -> Result<()> {
    if !source_dir.exists() {
        return Err(BuildError::SourceDirNotFound(source_dir.to_path_buf()).into());
    }
    if !source_dir.is_dir() {
        return Err(BuildError::SourceNotDirectory(source_dir.to_path_buf()).into());
    }
    Ok(())
}
