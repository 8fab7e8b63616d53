//! Rolldown invocation.
//!
//! [`bundle`] turns the synthesized entrypoint into one self-executing script.
//! Everything the handlers import is inlined; nothing is left external. The
//! entrypoint is fed to Rolldown as a virtual module, so identical handler
//! directories produce byte-identical bundles.

mod resolution;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use itertools::Either;
use rolldown::{BundlerBuilder as RolldownBundlerBuilder, BundlerOptions, InputItem, IsExternal};
use rolldown::{OutputFormat, Platform};
use rolldown_common::{BundlerTransformOptions, Output};
use tracing::{debug, warn};

use crate::assembler::absolute_dir;
use crate::diagnostics::{self, DiagnosticKind, DiagnosticSeverity, ExtractedDiagnostic};
use crate::plugins::{
    ENTRY_MODULE_ID, EntryModulePlugin, JsonDataPlugin, ModuleTrace, ModuleTracePlugin,
    PluginPhase, PluginRegistry,
};
use crate::{Error, Result};

pub use resolution::{EXPORT_CONDITIONS, RESOLVE_EXTENSIONS, configure_resolution};

/// Language level handler code is lowered to.
pub const DEFAULT_TARGET: &str = "es2018";

/// Name of the single bundle input.
const INPUT_NAME: &str = "edge-handlers";

/// Options for [`bundle`].
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Syntax lowering target, e.g. `es2018`.
    pub target: String,
    /// Project root used for `node_modules` lookup. Defaults to the process cwd.
    pub cwd: Option<PathBuf>,
    /// Minify the emitted script.
    pub minify: bool,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            cwd: None,
            minify: false,
        }
    }
}

impl BundleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }
}

/// Output of [`bundle`].
#[derive(Debug, Clone)]
pub struct BundledScript {
    /// The IIFE script.
    pub code: String,
    /// Modules that went into the script.
    pub modules: ModuleTrace,
    /// Non-fatal diagnostics reported by Rolldown.
    pub warnings: Vec<ExtractedDiagnostic>,
}

/// Bundle `entry` and everything it imports into one IIFE script.
///
/// # Errors
///
/// Returns [`Error::Bundler`] when a handler or one of its imports has a
/// syntax error, an unresolvable import, or a cycle Rolldown cannot order.
/// Each diagnostic carries the offending file when Rolldown reports one.
/// Fails with an I/O error if `entry` cannot be read.
pub async fn bundle(entry: &Path, options: &BundleOptions) -> Result<BundledScript> {
    let cwd = match &options.cwd {
        Some(cwd) => absolute_dir(cwd)?,
        None => absolute_dir(Path::new("."))?,
    };

    let source = tokio::fs::read_to_string(entry)
        .await
        .map_err(|e| Error::io_at("read entrypoint", entry, e))?;

    let rolldown_options = configure_rolldown_options(&cwd, options);

    let trace_plugin = Arc::new(ModuleTracePlugin::new());
    let mut registry = PluginRegistry::new();
    registry.add(EntryModulePlugin::new(source));
    registry.add(JsonDataPlugin::new());
    registry.add_with_phase(trace_plugin.clone(), PluginPhase::PostProcess);

    let mut bundler = RolldownBundlerBuilder::default()
        .with_options(rolldown_options)
        .with_plugins(registry.into_rolldown_plugins())
        .build()
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let output = bundler
        .generate()
        .await
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let warnings: Vec<_> = output
        .warnings
        .iter()
        .flat_map(|w| diagnostics::extract_from_rolldown_error(w))
        .map(|mut diag| {
            diag.severity = DiagnosticSeverity::Warning;
            diag
        })
        .collect();
    for warning in &warnings {
        warn!(%warning, "bundler warning");
    }

    let code = output
        .assets
        .into_iter()
        .find_map(|asset| match asset {
            Output::Chunk(chunk) => Some(chunk.code.clone()),
            Output::Asset(_) => None,
        })
        .ok_or_else(|| {
            Error::Bundler(vec![ExtractedDiagnostic {
                kind: DiagnosticKind::Other("MissingChunk".to_string()),
                severity: DiagnosticSeverity::Error,
                message: "Rolldown produced no JavaScript chunk".to_string(),
                file: Some(entry.to_string_lossy().into_owned()),
                line: None,
                column: None,
                help: None,
            }])
        })?;

    let modules = trace_plugin.take_trace();
    debug!(
        bytes = code.len(),
        first_party = modules.first_party.len(),
        third_party = modules.third_party.len(),
        "bundled edge handlers"
    );

    Ok(BundledScript {
        code,
        modules,
        warnings,
    })
}

/// Rolldown options for an edge handler bundle.
fn configure_rolldown_options(cwd: &Path, options: &BundleOptions) -> BundlerOptions {
    let mut rolldown_options = BundlerOptions {
        input: Some(vec![InputItem {
            name: Some(INPUT_NAME.to_string()),
            import: ENTRY_MODULE_ID.to_string(),
        }]),
        cwd: Some(cwd.to_path_buf()),
        format: Some(OutputFormat::Iife),
        platform: Some(Platform::Browser),
        external: Some(IsExternal::from(vec![])),
        transform: Some(BundlerTransformOptions {
            target: Some(Either::Left(options.target.clone())),
            ..Default::default()
        }),
        resolve: Some(configure_resolution(cwd)),
        ..Default::default()
    };

    if options.minify {
        rolldown_options.minify = Some(rolldown::RawMinifyOptions::from(true));
    }

    rolldown_options
}
