//! Plugin system for edge-bundler.
//!
//! - Plugin registry with execution phases
//! - Built-in plugins: the virtual entry module, compact JSON data modules,
//!   and the module trace

pub mod entry_module;
pub mod json_data;
pub mod module_trace;
pub mod registry;

pub use entry_module::{ENTRY_MODULE_ID, EntryModulePlugin};
pub use json_data::JsonDataPlugin;
pub use module_trace::{ModuleTrace, ModuleTracePlugin, is_third_party};
pub use registry::{EdgePlugin, PluginPhase, PluginRegistry};
