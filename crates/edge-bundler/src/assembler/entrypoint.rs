//! Entrypoint synthesis.
//!
//! The generated module looks like:
//!
//! ```text
//! /// <reference path="./__edgeTypes.d.ts" />
//! import * as func00000000000000000000000000000000 from "/abs/handlers/example.js";
//! edgeRegistry.set("example", func00000000000000000000000000000000);
//! ```

use std::fmt::Write as _;
use std::path::Path;

use path_clean::PathClean;

use super::registry::HandlerRegistry;
use super::{HandlerFile, TYPES_FILE};

/// Name of the runtime registry global the entrypoint populates.
pub const REGISTRY_GLOBAL: &str = "edgeRegistry";

/// Produces import aliases that are unique within one entrypoint.
///
/// Aliases are `func` followed by a 32 digit hex counter, so two renders of the
/// same handler list always produce the same text.
#[derive(Debug, Default)]
pub struct AliasGenerator {
    next: u128,
}

impl AliasGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_alias(&mut self) -> String {
        let alias = format!("func{:032x}", self.next);
        self.next += 1;
        alias
    }
}

/// Render the entrypoint module for `handlers` living in `source_dir`.
///
/// `source_dir` should be absolute; import specifiers are emitted as
/// `source_dir/<file name>` with `.` and `..` segments cleaned.
pub fn render_entrypoint(handlers: &[HandlerFile], source_dir: &Path) -> (String, HandlerRegistry) {
    let mut aliases = AliasGenerator::new();
    let mut registry = HandlerRegistry::new();
    let mut imports = String::new();
    let mut registrations = String::new();

    for handler in handlers {
        let alias = aliases.next_alias();
        let import_path = source_dir.join(&handler.file_name).clean();

        // Writing into a String cannot fail.
        let _ = writeln!(
            imports,
            "import * as {} from {};",
            alias,
            js_string(&import_path.to_string_lossy())
        );
        let _ = writeln!(
            registrations,
            "{}.set({}, {});",
            REGISTRY_GLOBAL,
            js_string(&handler.base_name),
            alias
        );

        registry.register(&handler.base_name, alias, &handler.file_name);
    }

    let mut contents = format!("/// <reference path=\"./{}\" />\n", TYPES_FILE);
    contents.push_str(&imports);
    contents.push_str(&registrations);

    (contents, registry)
}

/// Quote `value` as a JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handlers(names: &[&str]) -> Vec<HandlerFile> {
        names
            .iter()
            .filter_map(|n| HandlerFile::from_file_name(n))
            .collect()
    }

    #[test]
    fn test_alias_generator_is_sequential() {
        let mut aliases = AliasGenerator::new();
        assert_eq!(aliases.next_alias(), "func00000000000000000000000000000000");
        assert_eq!(aliases.next_alias(), "func00000000000000000000000000000001");
        assert_eq!(aliases.next_alias().len(), 4 + 32);
    }

    #[test]
    fn test_one_import_and_one_registration_per_handler() {
        let list = handlers(&["example.js", "auth.ts", "geo.js"]);
        let (code, registry) = render_entrypoint(&list, Path::new("/project/edge-handlers"));

        let imports = code.lines().filter(|l| l.starts_with("import * as ")).count();
        let sets = code
            .lines()
            .filter(|l| l.starts_with("edgeRegistry.set("))
            .count();
        assert_eq!(imports, 3);
        assert_eq!(sets, 3);

        assert!(code.contains(r#"edgeRegistry.set("example", func00000000000000000000000000000000);"#));
        assert!(code.contains(r#"edgeRegistry.set("auth", func00000000000000000000000000000001);"#));
        assert!(code.contains(r#"from "/project/edge-handlers/geo.js";"#));

        let keys: Vec<_> = registry.keys().collect();
        assert_eq!(keys, vec!["example", "auth", "geo"]);
    }

    #[test]
    fn test_reference_directive_comes_first() {
        let (code, _) = render_entrypoint(&handlers(&["a.js"]), Path::new("/src"));
        assert_eq!(
            code.lines().next(),
            Some(r#"/// <reference path="./__edgeTypes.d.ts" />"#)
        );
    }

    #[test]
    fn test_imports_precede_registrations() {
        let (code, _) = render_entrypoint(&handlers(&["a.js", "b.js"]), Path::new("/src"));
        let lines: Vec<_> = code.lines().collect();
        assert!(lines[1].starts_with("import"));
        assert!(lines[2].starts_with("import"));
        assert!(lines[3].starts_with("edgeRegistry.set"));
        assert!(lines[4].starts_with("edgeRegistry.set"));
    }

    #[test]
    fn test_keys_are_escaped() {
        let list = vec![HandlerFile {
            file_name: "we\"ird.js".to_string(),
            base_name: "we\"ird".to_string(),
        }];
        let (code, _) = render_entrypoint(&list, Path::new("/src"));
        assert!(code.contains(r#"edgeRegistry.set("we\"ird", "#));
        assert!(code.contains(r#"from "/src/we\"ird.js";"#));
    }

    #[test]
    fn test_same_base_name_collides_in_registry() {
        let (code, registry) =
            render_entrypoint(&handlers(&["hello.js", "hello.ts"]), Path::new("/src"));

        assert_eq!(code.matches("edgeRegistry.set(\"hello\"").count(), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("hello").unwrap().file_name, "hello.ts");
    }

    #[test]
    fn test_render_is_deterministic() {
        let list = handlers(&["x.js", "y.ts"]);
        let first = render_entrypoint(&list, Path::new("/src")).0;
        let second = render_entrypoint(&list, Path::new("/src")).0;
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_handler_list() {
        let (code, registry) = render_entrypoint(&[], Path::new("/src"));
        assert_eq!(code, "/// <reference path=\"./__edgeTypes.d.ts\" />\n");
        assert!(registry.is_empty());
    }
}
