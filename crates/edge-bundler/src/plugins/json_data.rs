//! JSON imports as compact data modules.
//!
//! `import data from "./data.json"` yields the parsed value. Top-level object
//! keys that are valid identifiers are also available as named exports. The
//! data is re-serialized without whitespace before it enters the bundle.

use anyhow::Context;
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, HookUsage, Plugin, PluginContext};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Write as _;

use super::registry::{EdgePlugin, PluginPhase};

/// Names that cannot be bound by `export const` in module (strict) code.
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
    // Restricted bindings in strict mode
    "eval", "arguments",
];

/// Loads `.json` modules as compact JavaScript data.
#[derive(Debug, Default, Clone)]
pub struct JsonDataPlugin;

impl JsonDataPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for JsonDataPlugin {
    fn name(&self) -> Cow<'static, str> {
        "edge-json-data".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::Load
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();

        async move {
            if !is_json_module(&id) {
                return Ok(None);
            }

            let source = tokio::fs::read_to_string(&id)
                .await
                .with_context(|| format!("Failed to read JSON module: {}", id))?;
            let value: Value = serde_json::from_str(&source)
                .with_context(|| format!("Failed to parse JSON module: {}", id))?;

            let code = json_to_module(&value);
            tracing::trace!(id = %id, from = source.len(), to = code.len(), "compacted JSON module");

            Ok(Some(HookLoadOutput {
                code: code.into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}

impl EdgePlugin for JsonDataPlugin {
    fn phase(&self) -> PluginPhase {
        PluginPhase::Transform
    }
}

fn is_json_module(id: &str) -> bool {
    // Virtual ids and ids with queries belong to other plugins.
    !id.starts_with('\0') && !id.contains('?') && id.ends_with(".json")
}

/// Render a parsed JSON value as an ES module.
pub(crate) fn json_to_module(value: &Value) -> String {
    // Display for Value is the compact serialization.
    let mut code = format!("const data = {};\nexport default data;\n", value);

    if let Value::Object(map) = value {
        for key in map.keys().filter(|k| is_export_name(k)) {
            let _ = writeln!(code, "export const {key} = data.{key};");
        }
    }

    code
}

fn is_export_name(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && key != "data"
        && !RESERVED_WORDS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_module_is_compact() {
        let value: Value = serde_json::from_str("{\n  \"name\": \"edge\",\n  \"list\": [1, 2]\n}").unwrap();
        let code = json_to_module(&value);
        assert!(code.starts_with(r#"const data = {"name":"edge","list":[1,2]};"#));
        assert!(code.contains("export default data;"));
    }

    #[test]
    fn test_named_exports_for_identifier_keys() {
        let code = json_to_module(&json!({
            "version": "1.0.0",
            "with-dash": true,
            "default": 1,
            "data": 2,
            "$ok": 3
        }));
        assert!(code.contains("export const version = data.version;"));
        assert!(code.contains("export const $ok = data.$ok;"));
        assert!(!code.contains("with-dash ="));
        assert!(!code.contains("export const default"));
        assert!(!code.contains("export const data"));
    }

    #[test]
    fn test_strict_mode_restricted_keys_stay_default_only() {
        let code = json_to_module(&json!({ "eval": 1, "arguments": 2, "name": "x" }));
        assert!(!code.contains("export const eval"));
        assert!(!code.contains("export const arguments"));
        assert!(code.contains("export const name = data.name;"));
        assert!(code.starts_with(r#"const data = {"eval":1,"arguments":2,"name":"x"};"#));
    }

    #[test]
    fn test_non_object_has_default_only() {
        let code = json_to_module(&json!([1, "two", null]));
        assert_eq!(code, "const data = [1,\"two\",null];\nexport default data;\n");
    }

    #[test]
    fn test_is_json_module() {
        assert!(is_json_module("/project/data.json"));
        assert!(!is_json_module("/project/data.json?raw"));
        assert!(!is_json_module("\0virtual.json"));
        assert!(!is_json_module("/project/index.js"));
    }

    #[test]
    fn test_plugin_name() {
        assert_eq!(JsonDataPlugin::new().name(), "edge-json-data");
    }
}
