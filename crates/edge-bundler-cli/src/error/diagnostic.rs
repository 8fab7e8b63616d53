//! Conversion from CLI errors to miette reports.

use crate::error::{BuildError, CliError};
use miette::Report;

/// Convert CliError to miette Report
///
/// Pipeline errors keep their own diagnostic code and help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundler(e) => Report::new(e),
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => miette::miette!("{}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::SourceDirNotFound(_) => {
            miette::miette!(code = "SOURCE_DIR_NOT_FOUND", "{}", err)
        }
        BuildError::ManifestMissing(_) => miette::miette!(code = "MANIFEST_MISSING", "{}", err),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;
    use std::path::PathBuf;

    #[test]
    fn test_bundler_error_keeps_code() {
        let err = CliError::Bundler(edge_bundler::Error::OutputMismatch("hash".to_string()));
        let report = cli_error_to_miette(err);
        assert_eq!(report.code().unwrap().to_string(), "OUTPUT_MISMATCH");
        assert!(report.to_string().contains("Output mismatch"));
    }

    #[test]
    fn test_build_error_code() {
        let report = build_error_to_miette(BuildError::SourceDirNotFound(PathBuf::from("x")));
        assert_eq!(report.code().unwrap().to_string(), "SOURCE_DIR_NOT_FOUND");
    }
}
