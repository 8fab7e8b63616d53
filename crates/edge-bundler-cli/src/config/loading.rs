use crate::cli::{BuildArgs, CheckArgs, EsTarget};
use crate::config::EdgeConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the project root when `--config` is not given.
pub const CONFIG_FILE: &str = "edge.config.json";

/// Prefix of environment variable overrides, e.g. `EDGE_OUT_DIR`.
pub const ENV_PREFIX: &str = "EDGE_";

/// Values given on the command line. Unset fields do not override anything.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<EsTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl From<&BuildArgs> for CliOverrides {
    fn from(args: &BuildArgs) -> Self {
        Self {
            source_dir: args.source_dir.clone(),
            out_dir: args.out_dir.clone(),
            persist: args.no_persist.then_some(false),
            target: args.target,
            minify: args.minify.then_some(true),
            cwd: args.cwd.clone(),
        }
    }
}

impl From<&CheckArgs> for CliOverrides {
    fn from(args: &CheckArgs) -> Self {
        Self {
            out_dir: args.out_dir.clone(),
            cwd: args.cwd.clone(),
            ..Default::default()
        }
    }
}

impl EdgeConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// Without an explicit `config_path`, `edge.config.json` is read from the
    /// `--cwd` directory (or the process cwd) when it exists.
    pub fn load(overrides: &CliOverrides, config_path: Option<&Path>) -> Result<Self> {
        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let root = overrides.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
                let default_path = root.join(CONFIG_FILE);
                default_path.exists().then_some(default_path)
            }
        };

        Self::figment(overrides, config_file.as_deref())
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()).into())
    }

    fn figment(overrides: &CliOverrides, config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            figment = figment.merge(Json::file(path));
        }

        // EDGE_SOURCE_DIR, EDGE_OUT_DIR, EDGE_PERSIST, EDGE_TARGET, EDGE_MINIFY, EDGE_CWD
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX).filter_map(|key| env_field(key.as_str()).map(Into::into)),
        );

        figment.merge(Serialized::defaults(overrides))
    }
}

/// Map an environment key (prefix stripped) to its config field.
fn env_field(key: &str) -> Option<&'static str> {
    match key.to_ascii_lowercase().as_str() {
        "source_dir" => Some("sourceDir"),
        "out_dir" => Some("outDir"),
        "persist" => Some("persist"),
        "target" => Some("target"),
        "minify" => Some("minify"),
        "cwd" => Some("cwd"),
        _ => None,
    }
}
