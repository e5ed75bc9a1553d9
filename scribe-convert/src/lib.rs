//! # scribe-convert
//!
//! Conversion core for a markdown-backed rich-text editor. The editor
//! shell (selection, rendering, undo) lives elsewhere; this crate owns the
//! document model and every conversion in and out of it:
//!
//! - **Markdown parsing**: CommonMark source to the Document Tree, via
//!   Comrak, tolerant of anything.
//! - **Markdown serialization**: the Document Tree back to markdown, a
//!   hand-written walk emitting one canonical spelling per construct.
//! - **HTML import**: pasted fragments to the Document Tree, via
//!   html5ever, lossy by policy.
//! - **Shortcut recognition**: markdown prefixes typed into a block
//!   (`- `, `# `, `> `, `--- `) become structural edits.
//!
//! Formats implement the [`Format`] trait and live in a
//! [`FormatRegistry`]; plugins extend the node vocabulary through
//! [`Context`]. Conversions never fail on malformed input: unknown
//! constructs degrade to their flattened text, and the only reportable
//! defect is a schema violation.
//!
//! ## Quick start
//!
//! ```ignore
//! let ctx = std::sync::Arc::new(scribe_convert::Context::new());
//! let registry = scribe_convert::FormatRegistry::with_defaults(ctx);
//!
//! let doc = registry.parse("# Hello\n\nSome **bold** text.", "markdown")?;
//! let out = registry.serialize(&doc, "markdown")?;
//! ```

pub mod context;
pub mod dom;
pub mod error;
pub mod format;
pub mod formats;
pub mod plugin;
pub mod registry;
pub mod schema;
pub mod shortcuts;

pub use context::Context;
pub use dom::{tags, Block, BlockAddress, Data, Document, Mark, Node, TextRun};
pub use error::ConvertError;
pub use format::Format;
pub use formats::markdown::rules::MarkdownRules;
pub use plugin::{ImportedElement, Plugin, PluginRegistry};
pub use registry::FormatRegistry;
pub use schema::Schema;

/// Parse markdown into a Document Tree with the given context.
pub fn from_markdown(ctx: &Context, source: &str) -> Document {
    formats::markdown::parser::parse_from_markdown(ctx, source)
}

/// Serialize a whole document to markdown with the given context.
pub fn to_markdown(ctx: &Context, doc: &Document) -> String {
    formats::markdown::serializer::Serializer::new(ctx).convert(doc)
}

/// Serialize a slice of nodes to inline markdown, as a plugin would from
/// its `to_markdown` callback.
pub fn to_markdown_fragment(ctx: &Context, nodes: &[Node]) -> String {
    formats::markdown::serializer::Serializer::new(ctx).recursive(nodes)
}

/// Import an HTML fragment into a Document Tree with the given context.
pub fn from_html(ctx: &Context, source: &str) -> Document {
    formats::html::importer::parse_from_html(ctx, source)
}

/// Validate a document against the context's schema. The one failure mode
/// conversions report instead of repairing.
pub fn validate(ctx: &Context, doc: &Document) -> Result<(), ConvertError> {
    ctx.schema().validate(doc)
}
