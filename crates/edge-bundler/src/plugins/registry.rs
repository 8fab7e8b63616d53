//! Plugin registry with execution phases.
//!
//! Rolldown runs plugin hooks in registration order. The registry lets each
//! plugin declare a phase and sorts once when handing the list to Rolldown.

use rolldown_plugin::Plugin;
use rolldown_plugin::__inner::SharedPluginable;
use std::sync::Arc;

/// Plugin execution phases, lower numbers first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PluginPhase {
    /// Virtual modules that must resolve before anything else sees them.
    Virtual = 10,

    /// Loading and transforming module contents (JSON data, etc.).
    Transform = 20,

    /// Observers that look at modules after every transform has run.
    PostProcess = 100,
}

/// A Rolldown plugin that knows which phase it belongs to.
///
/// `Plugin` already requires `Send + Sync`.
pub trait EdgePlugin: Plugin {
    fn phase(&self) -> PluginPhase {
        PluginPhase::Transform
    }
}

/// Plugins kept in phase order.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<(PluginPhase, SharedPluginable)>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin at its declared phase.
    pub fn add<P: EdgePlugin + 'static>(&mut self, plugin: P) {
        let phase = plugin.phase();
        self.plugins.push((phase, Arc::new(plugin)));
    }

    /// Add an already shared plugin at an explicit phase.
    ///
    /// Used when the caller keeps its own handle to read state back after the
    /// build.
    pub fn add_with_phase(&mut self, plugin: SharedPluginable, phase: PluginPhase) {
        self.plugins.push((phase, plugin));
    }

    /// Convert to Rolldown plugins sorted by phase.
    ///
    /// The sort is stable, so plugins within one phase keep insertion order.
    pub fn into_rolldown_plugins(mut self) -> Vec<SharedPluginable> {
        self.plugins.sort_by_key(|(phase, _)| *phase);
        self.plugins.into_iter().map(|(_, plugin)| plugin).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
