//! Records which modules end up in the bundle.
//!
//! Handler code and anything else outside `node_modules` is first-party;
//! installed dependencies are third-party. The plugin only classifies module
//! ids. It never returns transformed code.

use parking_lot::Mutex;
use rolldown_plugin::{
    HookTransformArgs, HookTransformReturn, HookUsage, Plugin, TransformPluginContext,
};
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;

use super::registry::{EdgePlugin, PluginPhase};

/// Modules seen during one build, split by origin. Both lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTrace {
    pub first_party: Vec<String>,
    pub third_party: Vec<String>,
}

impl ModuleTrace {
    pub fn len(&self) -> usize {
        self.first_party.len() + self.third_party.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether `id` points into an installed dependency.
pub fn is_third_party(id: &str) -> bool {
    id.contains("/node_modules/") || id.contains("\\node_modules\\")
}

/// Observer plugin collecting module ids from the transform hook.
///
/// Virtual modules (`\0`-prefixed or `virtual:` ids) are not recorded.
#[derive(Debug, Default)]
pub struct ModuleTracePlugin {
    state: Arc<Mutex<ModuleTrace>>,
}

impl ModuleTracePlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the collected trace, leaving an empty one behind.
    pub fn take_trace(&self) -> ModuleTrace {
        let mut trace = std::mem::take(&mut *self.state.lock());
        trace.first_party.sort();
        trace.third_party.sort();
        trace
    }
}

impl Plugin for ModuleTracePlugin {
    fn name(&self) -> Cow<'static, str> {
        "edge-module-trace".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::Transform
    }

    fn transform(
        &self,
        _ctx: Arc<TransformPluginContext>,
        args: &HookTransformArgs,
    ) -> impl std::future::Future<Output = HookTransformReturn> + Send {
        let state = Arc::clone(&self.state);
        let id = args.id.to_string();

        async move {
            if !is_virtual(&id) {
                let mut trace = state.lock();
                if is_third_party(&id) {
                    trace.third_party.push(id);
                } else {
                    trace.first_party.push(id);
                }
            }

            Ok(None)
        }
    }
}

fn is_virtual(id: &str) -> bool {
    id.starts_with('\0') || id.starts_with("virtual:")
}

impl EdgePlugin for ModuleTracePlugin {
    fn phase(&self) -> PluginPhase {
        PluginPhase::PostProcess
    }
}
