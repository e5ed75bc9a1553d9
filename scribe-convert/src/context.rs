//! Shared conversion context.
//!
//! The context bundles the schema and the plugin registry. It is built once
//! when an editing session starts, mutated only while plugins register, and
//! then consulted read-only by every conversion. Hosts that convert from
//! multiple threads can wrap it in an `Arc`.

use crate::plugin::{Plugin, PluginRegistry};
use crate::schema::Schema;

/// Read-mostly state shared by the parser, serializer, and importer.
pub struct Context {
    schema: Schema,
    plugins: PluginRegistry,
}

impl Context {
    /// A context with the base schema and no plugins.
    pub fn new() -> Self {
        Context {
            schema: Schema::base(),
            plugins: PluginRegistry::new(),
        }
    }

    /// Register a plugin: its tags join the schema's root rule and its
    /// conversion callbacks become reachable by tag.
    pub fn register_plugin(&mut self, plugin: Box<dyn Plugin>) {
        for tag in plugin.tags() {
            self.schema.register(tag);
        }
        self.plugins.register(plugin);
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
