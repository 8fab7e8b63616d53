//! Bundle output: content hashing, `manifest.json`, and the on-disk layout.

pub mod manifest;
pub mod writer;

pub use manifest::{BundleManifest, CONTENT_TYPE, MANIFEST_FILE, content_hash};
pub use writer::{verify_output, write_bundle};
