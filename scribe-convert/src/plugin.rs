//! Plugin contract and registry.
//!
//! Plugins contribute new node kinds to the editor: each one declares the
//! tags it owns and supplies conversion callbacks for them. The visual
//! rendering side of a plugin lives in the editor shell and is not part of
//! this crate; here a plugin is purely a conversion extension point.
//!
//! Registration happens once, at initialization: [`crate::Context`] unions a
//! plugin's tags into the schema's root rule and stores the plugin for
//! lookup. During conversion the parser, serializer, and importer resolve
//! plugins by tag and delegate nodes they do not recognize themselves.

use crate::dom::nodes::{Block, Node};
use crate::formats::markdown::serializer::Serializer;
use std::collections::HashMap;

/// A DOM-independent view of an HTML element, handed to
/// [`Plugin::from_html`] so plugins never touch the underlying HTML parser.
#[derive(Debug, Clone)]
pub struct ImportedElement {
    /// Lowercase tag name.
    pub tag: String,
    /// Element attributes.
    pub attrs: HashMap<String, String>,
    /// Children already imported into Document Tree form.
    pub children: Vec<Node>,
}

impl ImportedElement {
    /// The flattened text of the element's imported children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

/// A conversion extension point for one or more node kinds.
///
/// Every callback is optional: a plugin that only ever produces nodes from
/// pasted HTML can implement `from_html` alone, and the defaults keep the
/// core's lossy-but-safe fallbacks in charge of everything else.
pub trait Plugin: Send + Sync {
    /// Identifying name of the plugin.
    fn name(&self) -> &str;

    /// The node kinds this plugin owns.
    fn tags(&self) -> &[&str];

    /// HTML tag names this plugin claims when they appear as raw HTML blocks
    /// in markdown source. Defaults to the plugin's node tags.
    fn markdown_tags(&self) -> &[&str] {
        self.tags()
    }

    /// Serialize one of this plugin's blocks to markdown text. The
    /// serializer is passed in so the plugin can render its children
    /// recursively. Returning `None` falls back to undecorated flattened
    /// text.
    fn to_markdown(&self, _serializer: &Serializer<'_>, _block: &Block) -> Option<String> {
        None
    }

    /// Build a node from a raw HTML block encountered in markdown source
    /// whose leading tag matched one of [`Plugin::markdown_tags`].
    fn from_markdown(&self, _literal: &str) -> Option<Node> {
        None
    }

    /// Build a node from a pasted HTML element whose tag matched one of
    /// [`Plugin::tags`]. Returning `None` unwraps the element instead.
    fn from_html(&self, _element: &ImportedElement) -> Option<Node> {
        None
    }
}

/// Registry of plugins, resolved by name or by the tags they declared.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        PluginRegistry {
            plugins: Vec::new(),
        }
    }

    /// Register a plugin. Later registrations win tag lookups over earlier
    /// ones only when earlier plugins do not claim the tag; first match wins.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Get a plugin by its identifying name
    pub fn by_name(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// Get the first plugin that declared `tag` among its node tags
    pub fn by_tag(&self, tag: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.tags().contains(&tag))
            .map(|p| p.as_ref())
    }

    /// Get the first plugin that claims `tag` in markdown HTML blocks
    pub fn by_markdown_tag(&self, tag: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.markdown_tags().contains(&tag))
            .map(|p| p.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
