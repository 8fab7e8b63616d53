//! Serves the synthesized entrypoint under a fixed virtual id.
//!
//! The entrypoint lives in a per-run temp directory. Bundling it from disk
//! would let that random directory name leak into the output, so the bundle
//! hash would change between identical builds. Serving the same source as
//! [`ENTRY_MODULE_ID`] keeps the output a function of the handlers alone.

use rolldown_common::{ModuleType, ResolvedExternal};
use rolldown_plugin::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs, HookResolveIdOutput,
    HookResolveIdReturn, HookUsage, Plugin, PluginContext,
};
use std::borrow::Cow;
use std::sync::Arc;

use super::registry::{EdgePlugin, PluginPhase};

/// Module id the entrypoint is bundled as.
pub const ENTRY_MODULE_ID: &str = "virtual:edge-handlers.ts";

/// Resolves and loads [`ENTRY_MODULE_ID`] from an in-memory source.
#[derive(Debug, Clone)]
pub struct EntryModulePlugin {
    source: Arc<str>,
}

impl EntryModulePlugin {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl Plugin for EntryModulePlugin {
    fn name(&self) -> Cow<'static, str> {
        "edge-entry-module".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::ResolveId | HookUsage::Load
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let claimed = args.specifier == ENTRY_MODULE_ID;

        async move {
            if !claimed {
                return Ok(None);
            }

            Ok(Some(HookResolveIdOutput {
                id: ENTRY_MODULE_ID.into(),
                external: Some(ResolvedExternal::Bool(false)),
                ..Default::default()
            }))
        }
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let source = (args.id == ENTRY_MODULE_ID).then(|| Arc::clone(&self.source));

        async move {
            let Some(source) = source else {
                return Ok(None);
            };

            Ok(Some(HookLoadOutput {
                code: source.to_string().into(),
                module_type: Some(ModuleType::Ts),
                ..Default::default()
            }))
        }
    }
}

impl EdgePlugin for EntryModulePlugin {
    fn phase(&self) -> PluginPhase {
        PluginPhase::Virtual
    }
}
