//! End-to-end tests: handler directory in, bundle and manifest out.
//!
//! Every test runs a real Rolldown build against a temporary project.

mod helpers;

use std::fs;

use edge_bundler::hook::{HookInputs, on_post_build, run};
use edge_bundler::output::{MANIFEST_FILE, content_hash};
use edge_bundler::{BundleManifest, BundleOptions, Error, assemble, bundle, verify_output};
use helpers::{TestProject, assert_code_contains, assert_code_not_contains, fixtures_dir};

const HELLO_HANDLER: &str = r#"
export function onRequest(event) {
  event.replaceResponse(() => new Response("hello edge"));
}
"#;

fn inputs(project: &TestProject) -> HookInputs {
    HookInputs::new(project.handlers_dir())
        .out_dir(project.out_dir())
        .cwd(project.root())
}

#[tokio::test]
async fn test_single_handler_end_to_end() {
    let project = TestProject::new().handler("example.js", HELLO_HANDLER);

    let report = run(inputs(&project)).await.unwrap();

    assert_eq!(report.manifest.handlers, vec!["example.js"]);
    assert_eq!(report.manifest.content_type, "application/javascript");

    let bundle = fs::read_to_string(project.out_dir().join(&report.manifest.sha_sum)).unwrap();
    assert_code_contains(&bundle, "edgeRegistry.set(\"example\"");
    assert_code_contains(&bundle, "hello edge");
    assert_eq!(content_hash(bundle.as_bytes()), report.manifest.sha_sum);
    assert_eq!(bundle.len() as u64, report.manifest.content_length);

    let raw = fs::read_to_string(project.out_dir().join(MANIFEST_FILE)).unwrap();
    let manifest: BundleManifest = serde_json::from_str(&raw).unwrap();
    assert_eq!(manifest, report.manifest);
}

#[tokio::test]
async fn test_bundle_is_self_executing() {
    let project = TestProject::new().handler("example.js", HELLO_HANDLER);

    let entry = assemble(project.handlers_dir()).await.unwrap();
    let entry_source = fs::read_to_string(&entry.entry_path).unwrap();
    assert_code_contains(&entry_source, "import * as func");

    let script = bundle(&entry.entry_path, &BundleOptions::new().cwd(project.root()))
        .await
        .unwrap();

    assert_code_not_contains(&script.code, "import ");
    assert_code_not_contains(&script.code, "export ");
    assert_code_contains(&script.code, "(function");
    assert_code_contains(&script.code, "})();");
}

#[tokio::test]
async fn test_fixture_directory_skips_non_handlers() {
    let source = fixtures_dir().join("edge-handlers");

    let report = run(HookInputs::new(&source)
        .persist(false)
        .cwd(env!("CARGO_MANIFEST_DIR")))
    .await
    .unwrap();

    assert_eq!(report.manifest.handlers, vec!["example.js"]);
    assert_eq!(report.registry.keys().collect::<Vec<_>>(), vec!["example"]);
}

#[tokio::test]
async fn test_typescript_handler_is_stripped() {
    let project = TestProject::new().handler(
        "greet.ts",
        r#"
interface Greeting {
  text: string;
}

export function onRequest(event: EdgeRequestEvent): void {
  const greeting: Greeting = { text: "hi from ts" };
  event.replaceResponse(() => new Response(greeting.text));
}
"#,
    );

    let report = run(inputs(&project)).await.unwrap();
    let bundle = fs::read_to_string(project.out_dir().join(&report.manifest.sha_sum)).unwrap();

    assert_eq!(report.manifest.handlers, vec!["greet.ts"]);
    assert_code_contains(&bundle, "edgeRegistry.set(\"greet\"");
    assert_code_contains(&bundle, "hi from ts");
    assert_code_not_contains(&bundle, "interface Greeting");
}

#[tokio::test]
async fn test_syntax_is_lowered_to_target() {
    let project = TestProject::new().handler(
        "lower.js",
        r#"
export function onRequest(event) {
  const host = event.request?.headers?.host ?? "unknown";
  event.replaceResponse(() => new Response(host));
}
"#,
    );

    let report = run(inputs(&project)).await.unwrap();
    let bundle = fs::read_to_string(project.out_dir().join(&report.manifest.sha_sum)).unwrap();

    assert_code_not_contains(&bundle, "?.");
    assert_code_not_contains(&bundle, "??");
}

#[tokio::test]
async fn test_json_import_is_inlined() {
    let project = TestProject::new()
        .file(
            "edge-handlers/config/routes.json",
            "{\n  \"greeting\": \"json says hi\",\n  \"limit\": 3\n}\n",
        )
        .handler(
            "routes.js",
            r#"
import routes from "./config/routes.json";

export function onRequest(event) {
  event.replaceResponse(() => new Response(routes.greeting));
}
"#,
        );

    let report = run(inputs(&project)).await.unwrap();
    let bundle = fs::read_to_string(project.out_dir().join(&report.manifest.sha_sum)).unwrap();

    assert_eq!(report.manifest.handlers, vec!["routes.js"]);
    assert_code_contains(&bundle, "json says hi");
    assert!(
        report
            .modules
            .first_party
            .iter()
            .any(|id| id.ends_with("routes.json"))
    );
}

#[tokio::test]
async fn test_json_with_strict_mode_restricted_keys() {
    let project = TestProject::new()
        .file(
            "edge-handlers/cfg.json",
            r#"{ "eval": 1, "arguments": 2, "name": "restricted keys ok" }"#,
        )
        .handler(
            "cfg.js",
            r#"
import cfg, { name } from "./cfg.json";

export function onRequest(event) {
  event.replaceResponse(() => new Response(name + cfg.eval + cfg.arguments));
}
"#,
        );

    let report = run(inputs(&project)).await.unwrap();
    let bundle = fs::read_to_string(project.out_dir().join(&report.manifest.sha_sum)).unwrap();

    assert_eq!(report.manifest.handlers, vec!["cfg.js"]);
    assert_code_contains(&bundle, "restricted keys ok");
}

#[tokio::test]
async fn test_commonjs_dependency_is_bundled() {
    let project = TestProject::new()
        .cjs_package(
            "shout",
            "module.exports = function shout(text) { return text.toUpperCase() + '!'; };\n",
        )
        .handler(
            "loud.js",
            r#"
import shout from "shout";

export function onRequest(event) {
  event.replaceResponse(() => new Response(shout("cjs interop")));
}
"#,
        );

    let report = run(inputs(&project)).await.unwrap();
    let bundle = fs::read_to_string(project.out_dir().join(&report.manifest.sha_sum)).unwrap();

    assert_code_contains(&bundle, "toUpperCase");
    assert_code_not_contains(&bundle, "require(\"shout\")");
    assert!(
        report
            .modules
            .third_party
            .iter()
            .any(|id| id.contains("node_modules") && id.ends_with("index.js"))
    );
}

#[tokio::test]
async fn test_syntax_error_names_file() {
    let project = TestProject::new()
        .handler("fine.js", HELLO_HANDLER)
        .handler("broken.js", "export function onRequest( {\n");

    let err = on_post_build(inputs(&project)).await.unwrap_err();

    assert!(matches!(err, Error::Bundler(_)), "unexpected error: {err:?}");
    assert!(err.to_string().contains("broken.js"), "{err}");
    assert!(!project.out_dir().exists());
}

#[tokio::test]
async fn test_unresolved_import_fails() {
    let project = TestProject::new().handler(
        "missing.js",
        "import nope from \"does-not-exist\";\nexport const onRequest = () => nope;\n",
    );

    let err = on_post_build(inputs(&project)).await.unwrap_err();
    assert!(matches!(err, Error::Bundler(_)), "unexpected error: {err:?}");
    assert!(err.to_string().contains("does-not-exist"), "{err}");
}

#[tokio::test]
async fn test_persist_false_writes_nothing() {
    let project = TestProject::new().handler("example.js", HELLO_HANDLER);

    let report = run(inputs(&project).persist(false)).await.unwrap();

    assert_eq!(report.manifest.handlers, vec!["example.js"]);
    assert_eq!(report.manifest.sha_sum.len(), 40);
    assert!(!project.out_dir().exists());
}

#[tokio::test]
async fn test_same_base_name_registers_twice() {
    let project = TestProject::new()
        .handler("auth.js", "export const onRequest = () => 'js';\n")
        .handler("auth.ts", "export const onRequest = (): string => 'ts';\n");

    let report = run(inputs(&project).persist(false)).await.unwrap();

    assert_eq!(report.manifest.handlers.len(), 2);
    assert_eq!(report.registry.registrations().len(), 2);
    assert_eq!(report.registry.len(), 1);
    assert_eq!(report.registry.shadowed().count(), 1);
}

#[tokio::test]
async fn test_empty_directory_still_bundles() {
    let project = TestProject::new();

    let report = run(inputs(&project)).await.unwrap();

    assert!(report.manifest.handlers.is_empty());
    assert!(report.registry.is_empty());
    verify_output(&project.out_dir()).await.unwrap();
}

#[tokio::test]
async fn test_rebuild_overwrites_manifest_and_keeps_old_bundle() {
    let project = TestProject::new().handler("example.js", HELLO_HANDLER);
    let first = run(inputs(&project)).await.unwrap();

    let project = project.handler("second.js", HELLO_HANDLER);
    let second = run(inputs(&project)).await.unwrap();

    assert_ne!(first.manifest.sha_sum, second.manifest.sha_sum);
    assert!(project.out_dir().join(&first.manifest.sha_sum).exists());
    assert!(project.out_dir().join(&second.manifest.sha_sum).exists());

    let current = verify_output(&project.out_dir()).await.unwrap();
    assert_eq!(current.sha_sum, second.manifest.sha_sum);
}

#[tokio::test]
async fn test_identical_builds_share_a_hash() {
    let project = TestProject::new()
        .handler("example.js", HELLO_HANDLER)
        .handler("geo.ts", "export const onRequest = (): void => {};\n");

    let first = run(inputs(&project)).await.unwrap();
    let second = run(inputs(&project)).await.unwrap();

    assert_ne!(first.work_dir, second.work_dir);
    assert_eq!(first.manifest, second.manifest);

    let bundle = fs::read_to_string(project.out_dir().join(&first.manifest.sha_sum)).unwrap();
    assert_code_not_contains(&bundle, "handlers-");
    assert_code_not_contains(&bundle, "__edgeMain");
}

#[tokio::test]
async fn test_assemble_creates_fresh_work_dirs() {
    let project = TestProject::new().handler("example.js", HELLO_HANDLER);

    let a = assemble(project.handlers_dir()).await.unwrap();
    let b = assemble(project.handlers_dir()).await.unwrap();

    assert_ne!(a.work_dir, b.work_dir);
    assert!(a.entry_path.exists());
    assert!(b.entry_path.exists());
}
