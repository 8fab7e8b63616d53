//! Shared test utilities for edge-bundler integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// A throwaway site with an `edge-handlers/` directory.
pub struct TestProject {
    pub temp: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let project = Self {
            temp: TempDir::new().unwrap(),
        };
        fs::create_dir_all(project.handlers_dir()).unwrap();
        project
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn handlers_dir(&self) -> PathBuf {
        self.root().join("edge-handlers")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root().join(".edge").join("handlers")
    }

    /// Write `contents` to `relative` under the project root.
    pub fn file(self, relative: &str, contents: &str) -> Self {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    /// Write a handler into `edge-handlers/`.
    pub fn handler(self, name: &str, contents: &str) -> Self {
        self.file(&format!("edge-handlers/{}", name), contents)
    }

    /// Install a CommonJS package under `node_modules/`.
    pub fn cjs_package(self, name: &str, index: &str) -> Self {
        self.file(
            &format!("node_modules/{}/package.json", name),
            &format!(r#"{{"name":"{}","version":"1.0.0","main":"index.js"}}"#, name),
        )
        .file(&format!("node_modules/{}/index.js", name), index)
    }
}

/// Assert that the bundle contains a substring
pub fn assert_code_contains(script: &str, substring: &str) {
    assert!(
        script.contains(substring),
        "Expected bundle to contain '{}', but it didn't.\nBundle preview (first 500 chars): {}",
        substring,
        &script[..script.len().min(500)]
    );
}

/// Assert that the bundle does NOT contain a substring
pub fn assert_code_not_contains(script: &str, substring: &str) {
    assert!(
        !script.contains(substring),
        "Expected bundle NOT to contain '{}', but it did.\nBundle preview (first 500 chars): {}",
        substring,
        &script[..script.len().min(500)]
    );
}
