//! Configuration with multi-source loading.
//!
//! Priority: CLI > `EDGE_*` environment > edge.config.json > defaults

mod defaults;
mod loading;
mod validation;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use crate::cli::EsTarget;
pub use defaults::*;
pub use loading::{CONFIG_FILE, CliOverrides, ENV_PREFIX};

use crate::error::{BuildError, CliError, Result};

/// edge-bundler configuration - loaded from edge.config.json, env, and CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EdgeConfig {
    /// Directory containing the handler files
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Directory receiving the bundle and manifest.json
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Write the bundle and manifest; false runs the pipeline without output
    #[serde(default = "default_persist")]
    pub persist: bool,

    /// JavaScript target version
    #[serde(default)]
    pub target: EsTarget,

    /// Minify the emitted script
    #[serde(default)]
    pub minify: bool,

    /// Project root; relative paths and node_modules lookup start here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            out_dir: default_out_dir(),
            persist: default_persist(),
            target: EsTarget::default(),
            minify: false,
            cwd: None,
        }
    }
}

impl EdgeConfig {
    /// Generate JSON Schema for edge.config.json.
    pub fn json_schema() -> Result<serde_json::Value> {
        let schema = schemars::schema_for!(EdgeConfig);
        Ok(serde_json::to_value(schema)?)
    }

    /// Generate example edge.config.json content.
    pub fn example_config() -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self {
            source_dir: PathBuf::from("src/edge-handlers"),
            out_dir: PathBuf::from(".edge/handlers"),
            persist: true,
            target: EsTarget::Es2018,
            minify: false,
            cwd: None,
        })?)
    }

    /// Absolute project root: `cwd` if set, else the process cwd.
    pub fn project_root(&self) -> Result<PathBuf> {
        let current = std::env::current_dir()?;
        let root = match &self.cwd {
            Some(cwd) => resolve_path(cwd, &current),
            None => current,
        };
        if !root.is_dir() {
            return Err(CliError::Build(BuildError::RootNotFound(root)));
        }
        Ok(root)
    }

    /// Bundler options for this configuration, rooted at `root`.
    pub fn bundle_options(&self, root: &Path) -> edge_bundler::BundleOptions {
        edge_bundler::BundleOptions::new()
            .target(self.target.as_str())
            .cwd(root)
            .minify(self.minify)
    }
}

/// Resolve `path` against `root` unless it is already absolute.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
