//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown's batched diagnostics are not stable across releases, so we read
//! them through their `Debug` rendering and keep only what a build log needs:
//! the kind of failure, the offending file, and its position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Extracted diagnostic information from Rolldown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDiagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub help: Option<String>,
}

/// Diagnostic kind (mirrors the Rolldown event kinds a handler build can hit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ParseError,
    CircularDependency,
    UnresolvedEntry,
    UnresolvedImport,
    MissingExport,
    Plugin,
    Transform,
    Other(String),
}

/// Diagnostic severity level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::ParseError => write!(f, "ParseError"),
            DiagnosticKind::CircularDependency => write!(f, "CircularDependency"),
            DiagnosticKind::UnresolvedEntry => write!(f, "UnresolvedEntry"),
            DiagnosticKind::UnresolvedImport => write!(f, "UnresolvedImport"),
            DiagnosticKind::MissingExport => write!(f, "MissingExport"),
            DiagnosticKind::Plugin => write!(f, "Plugin"),
            DiagnosticKind::Transform => write!(f, "Transform"),
            DiagnosticKind::Other(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for ExtractedDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(file) = &self.file {
            write!(f, " in {}", file)?;
            if let (Some(line), Some(column)) = (self.line, self.column) {
                write!(f, ":{}:{}", line, column)?;
            }
        }
        write!(f, ": {}", self.message)
    }
}

/// Extract diagnostics from Rolldown error types.
pub fn extract_from_rolldown_error(error: &dyn fmt::Debug) -> Vec<ExtractedDiagnostic> {
    let error_str = format!("{error:?}");

    let parts: Vec<&str> = error_str
        .split("BuildDiagnostic {")
        .skip(1)
        .filter(|s| !s.trim().is_empty())
        .collect();

    if parts.len() > 1 {
        parts.iter().map(|part| extract_single(part)).collect()
    } else {
        vec![extract_single(&error_str)]
    }
}

fn extract_single(error_str: &str) -> ExtractedDiagnostic {
    let kind = classify(error_str);

    let severity = if error_str.contains("Severity::Warning") || error_str.contains("Warning") {
        DiagnosticSeverity::Warning
    } else {
        DiagnosticSeverity::Error
    };

    let file = extract_file_path(error_str);
    let (line, column) = extract_position(error_str);
    let help = extract_help_text(error_str).or_else(|| default_help(&kind));

    ExtractedDiagnostic {
        kind,
        severity,
        message: error_str.trim().to_string(),
        file,
        line,
        column,
        help,
    }
}

fn classify(error_str: &str) -> DiagnosticKind {
    if error_str.contains("UnresolvedImport")
        || error_str.contains("Could not resolve")
        || error_str.contains("Cannot resolve")
    {
        DiagnosticKind::UnresolvedImport
    } else if error_str.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if error_str.contains("MissingExport") {
        DiagnosticKind::MissingExport
    } else if error_str.contains("Circular") || error_str.contains("cycle") {
        DiagnosticKind::CircularDependency
    } else if error_str.contains("Parse")
        || error_str.contains("Syntax")
        || error_str.contains("Expected")
        || error_str.contains("Unexpected")
    {
        DiagnosticKind::ParseError
    } else if error_str.contains("Plugin") {
        DiagnosticKind::Plugin
    } else if error_str.contains("Transform") || error_str.contains("transform") {
        DiagnosticKind::Transform
    } else {
        DiagnosticKind::Other("BundlerError".to_string())
    }
}

/// Extract the first source file path mentioned in the message.
fn extract_file_path(text: &str) -> Option<String> {
    const EXTENSIONS: [&str; 7] = [".tsx", ".ts", ".jsx", ".mjs", ".cjs", ".js", ".json"];

    text.split(['"', '\'', ' ', '\n', '(', ')', ','])
        .map(|token| token.trim_end_matches([':', '\\']))
        .find(|token| {
            // The synthesized entry is never the culprit worth reporting.
            !token.ends_with(crate::assembler::MAIN_FILE)
                && EXTENSIONS.iter().any(|ext| token.ends_with(ext))
                && (token.contains('/') || token.contains('\\'))
        })
        .map(str::to_string)
}

/// Extract a `line:column` or `line N, column M` position.
fn extract_position(text: &str) -> (Option<u32>, Option<u32>) {
    if let (Some(line), Some(column)) = (
        number_after(text, "line: "),
        number_after(text, "column: "),
    ) {
        return (Some(line), Some(column));
    }

    for window in text.split(|c: char| c.is_whitespace() || c == '"') {
        let mut parts = window.rsplitn(3, ':');
        let column = parts.next().and_then(|c| c.parse::<u32>().ok());
        let line = parts.next().and_then(|l| l.parse::<u32>().ok());
        if let (Some(line), Some(column)) = (line, column) {
            return (Some(line), Some(column));
        }
    }

    (None, None)
}

fn number_after(text: &str, pattern: &str) -> Option<u32> {
    let pos = text.find(pattern)?;
    let digits: String = text[pos + pattern.len()..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn extract_help_text(text: &str) -> Option<String> {
    ["help: ", "Help: ", "hint: ", "Hint: "]
        .iter()
        .find_map(|indicator| {
            let pos = text.find(indicator)?;
            let after = &text[pos + indicator.len()..];
            let end = after.find(['\n', '"']).unwrap_or(after.len());
            let help = after[..end].trim();
            (!help.is_empty()).then(|| help.to_string())
        })
}

fn default_help(kind: &DiagnosticKind) -> Option<String> {
    match kind {
        DiagnosticKind::UnresolvedImport => Some(
            "Install the missing package into node_modules or fix the import path.".to_string(),
        ),
        DiagnosticKind::ParseError => {
            Some("Fix the syntax error in the handler or one of its imports.".to_string())
        }
        DiagnosticKind::CircularDependency => {
            Some("Break the import cycle between the listed modules.".to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Debug-prints its text verbatim, like Rolldown's diagnostics do.
    struct Raw(&'static str);

    impl fmt::Debug for Raw {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    #[test]
    fn test_parse_error_with_file_and_position() {
        let raw = r#"BatchedBuildDiagnostic([BuildDiagnostic { kind: ParseError, message: "Unexpected token", id: "/tmp/handlers/broken.js", line: 2, column: 14 }])"#;
        let diags = extract_from_rolldown_error(&Raw(raw));
        assert_eq!(diags.len(), 1);
        let diag = &diags[0];
        assert_eq!(diag.kind, DiagnosticKind::ParseError);
        assert_eq!(diag.file.as_deref(), Some("/tmp/handlers/broken.js"));
        assert_eq!(diag.line, Some(2));
        assert_eq!(diag.column, Some(14));
        assert!(diag.help.is_some());
    }

    #[test]
    fn test_unresolved_import_skips_entry_file() {
        let raw = r#"Could not resolve "left-pad" in "/tmp/handlers-x/__edgeMain.ts" imported by "/src/hello.ts""#;
        let diags = extract_from_rolldown_error(&Raw(raw));
        assert_eq!(diags[0].kind, DiagnosticKind::UnresolvedImport);
        assert_eq!(diags[0].file.as_deref(), Some("/src/hello.ts"));
    }

    #[test]
    fn test_multiple_diagnostics_are_split() {
        let raw = "[BuildDiagnostic { Parse error in \"/a/one.js\" }, BuildDiagnostic { Circular import \"/a/two.js\" }]";
        let diags = extract_from_rolldown_error(&Raw(raw));
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].kind, DiagnosticKind::ParseError);
        assert_eq!(diags[1].kind, DiagnosticKind::CircularDependency);
    }

    #[test]
    fn test_display_includes_location() {
        let diag = ExtractedDiagnostic {
            kind: DiagnosticKind::ParseError,
            severity: DiagnosticSeverity::Error,
            message: "boom".to_string(),
            file: Some("/src/a.ts".to_string()),
            line: Some(1),
            column: Some(2),
            help: None,
        };
        assert_eq!(diag.to_string(), "ParseError in /src/a.ts:1:2: boom");
    }
}
