//! Module resolution settings for handler bundles.

use rolldown::ResolveOptions;
use std::path::Path;

/// Export conditions for package `exports` maps, most specific first.
pub const EXPORT_CONDITIONS: [&str; 4] = ["browser", "import", "module", "default"];

/// Extensions tried, in order, for extension-less imports.
pub const RESOLVE_EXTENSIONS: [&str; 5] = [".ts", ".js", ".mjs", ".cjs", ".json"];

/// Build Rolldown resolve options for a project rooted at `root`.
///
/// Bare specifiers are looked up in `node_modules` of `root` and every
/// ancestor, after the importer-relative lookup Rolldown performs anyway.
pub fn configure_resolution(root: &Path) -> ResolveOptions {
    let mut modules = vec!["node_modules".to_string()];
    modules.extend(
        root.ancestors()
            .map(|dir| dir.join("node_modules").to_string_lossy().into_owned()),
    );

    ResolveOptions {
        main_fields: Some(vec![
            "browser".to_string(),
            "module".to_string(),
            "main".to_string(),
        ]),
        condition_names: Some(EXPORT_CONDITIONS.iter().map(|s| s.to_string()).collect()),
        extensions: Some(RESOLVE_EXTENSIONS.iter().map(|s| s.to_string()).collect()),
        modules: Some(modules),
        symlinks: Some(true),
        ..Default::default()
    }
}
