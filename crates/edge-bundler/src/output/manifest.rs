//! Bundle manifest.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Fixed name of the manifest file in the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Content type recorded for every bundle.
pub const CONTENT_TYPE: &str = "application/javascript";

/// Metadata describing one written bundle.
///
/// Serialized field names and order are consumed by deployment tooling and
/// must stay exactly `shaSum`, `handlers`, `content_length`, `content_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Lowercase hex SHA-1 of the bundle bytes; also the bundle file name.
    #[serde(rename = "shaSum")]
    pub sha_sum: String,
    /// Handler file names, as discovered.
    pub handlers: Vec<String>,
    /// Byte length of the UTF-8 encoded bundle.
    pub content_length: u64,
    pub content_type: String,
}

impl BundleManifest {
    /// Describe `code` as the bundle of `handlers`.
    pub fn for_bundle(code: &str, handlers: Vec<String>) -> Self {
        let bytes = code.as_bytes();
        Self {
            sha_sum: content_hash(bytes),
            handlers,
            content_length: bytes.len() as u64,
            content_type: CONTENT_TYPE.to_string(),
        }
    }

    /// Compact JSON as written to `manifest.json`.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Lowercase hex SHA-1 of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
