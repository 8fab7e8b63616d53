//! Post-build entry point.
//!
//! [`on_post_build`] is what a build system calls once the site is built: it
//! assembles the handler directory, bundles it, and writes the bundle and its
//! manifest. [`run`] does the same and hands back everything it produced.

use std::path::PathBuf;

use tracing::info;

use crate::Result;
use crate::assembler::{HandlerRegistry, assemble};
use crate::builders::{BundleOptions, bundle};
use crate::diagnostics::ExtractedDiagnostic;
use crate::output::{BundleManifest, write_bundle};
use crate::plugins::ModuleTrace;

/// Default output directory, relative to the process cwd.
pub const DEFAULT_OUT_DIR: &str = ".edge/handlers";

/// Inputs to one post-build invocation.
#[derive(Debug, Clone)]
pub struct HookInputs {
    /// Directory holding handler `.js` / `.ts` files.
    pub source_dir: PathBuf,
    /// Directory receiving the bundle and `manifest.json`.
    pub out_dir: PathBuf,
    /// Write output files. When false the pipeline runs but nothing is written.
    pub persist: bool,
    /// Bundler settings.
    pub bundle: BundleOptions,
}

impl HookInputs {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            persist: true,
            bundle: BundleOptions::default(),
        }
    }

    pub fn out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.bundle.target = target.into();
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.bundle.cwd = Some(cwd.into());
        self
    }

    pub fn bundle_options(mut self, options: BundleOptions) -> Self {
        self.bundle = options;
        self
    }
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub manifest: BundleManifest,
    /// Registrations the entrypoint performs at runtime.
    pub registry: HandlerRegistry,
    /// Synthesized entrypoint module.
    pub entry_path: PathBuf,
    /// Temporary directory holding the entrypoint. Left on disk.
    pub work_dir: PathBuf,
    /// Modules that went into the bundle.
    pub modules: ModuleTrace,
    pub warnings: Vec<ExtractedDiagnostic>,
}

/// Run the full pipeline and report what it produced.
///
/// Steps run strictly in order; the first failure is returned unchanged and
/// later steps do not run.
pub async fn run(inputs: HookInputs) -> Result<BuildReport> {
    let HookInputs {
        source_dir,
        out_dir,
        persist,
        bundle: options,
    } = inputs;

    let entry = assemble(&source_dir).await?;
    info!(
        handlers = entry.handlers.len(),
        dir = %entry.source_dir.display(),
        "discovered edge handlers"
    );

    let script = bundle(&entry.entry_path, &options).await?;
    info!(bytes = script.code.len(), "bundled edge handlers");

    let manifest = write_bundle(&script.code, &entry.handlers, &out_dir, persist).await?;

    Ok(BuildReport {
        manifest,
        registry: entry.registry,
        entry_path: entry.entry_path,
        work_dir: entry.work_dir,
        modules: script.modules,
        warnings: script.warnings,
    })
}

/// Post-build hook: bundle `source_dir` and write the result to `out_dir`.
///
/// # Example
///
/// ```no_run
/// use edge_bundler::hook::{HookInputs, on_post_build};
///
/// # async fn example() -> edge_bundler::Result<()> {
/// on_post_build(
///     HookInputs::new("edge-handlers")
///         .out_dir(".edge/handlers")
///         .persist(true),
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn on_post_build(inputs: HookInputs) -> Result<()> {
    run(inputs).await.map(|_| ())
}
