use path_clean::PathClean;
use std::path::PathBuf;

use crate::config::{EdgeConfig, resolve_path};
use crate::error::{ConfigError, Result};

impl EdgeConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "sourceDir".to_string(),
                hint: "Point sourceDir at the directory holding your handlers".to_string(),
            }
            .into());
        }

        if self.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "outDir".to_string(),
                hint: "Set outDir, e.g. \".edge/handlers\"".to_string(),
            }
            .into());
        }

        if self.resolved(&self.source_dir) == self.resolved(&self.out_dir) {
            return Err(ConfigError::ConflictingOptions(format!(
                "sourceDir and outDir are both '{}'",
                self.out_dir.display()
            ))
            .into());
        }

        if self.out_dir.to_string_lossy().contains('\0') {
            return Err(ConfigError::InvalidValue {
                field: "outDir".to_string(),
                value: self.out_dir.display().to_string(),
                hint: "Paths cannot contain null bytes".to_string(),
            }
            .into());
        }

        if let Some(cwd) = &self.cwd {
            if cwd.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "cwd".to_string(),
                    value: String::new(),
                    hint: "Remove cwd or set it to the project root".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// `path` as it will be used: joined onto the project root and cleaned.
    fn resolved(&self, path: &std::path::Path) -> PathBuf {
        let current = std::env::current_dir().unwrap_or_default();
        let root = match &self.cwd {
            Some(cwd) => resolve_path(cwd, &current),
            None => current,
        };
        resolve_path(path, &root).clean()
    }
}
