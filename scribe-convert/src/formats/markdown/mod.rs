//! Markdown format support
//!
//! Bidirectional conversion between CommonMark markdown and the Document
//! Tree. Markdown is the editor's storage representation, so this is the
//! only format that both parses and serializes.
//!
//! The two directions are deliberately asymmetric: parsing delegates the
//! grammar to Comrak and tolerates anything, while serialization is a
//! hand-written walk that emits exactly one spelling per construct.
//! Round-tripping markdown through the tree is stable after the first
//! pass: `serialize(parse(s))` normalizes, and re-parsing that output
//! yields an equal tree.

pub mod parser;
pub mod rules;
pub mod serializer;

use crate::context::Context;
use crate::dom::nodes::Document;
use crate::error::ConvertError;
use crate::format::Format;
use rules::MarkdownRules;
use serializer::Serializer;
use std::sync::Arc;

/// Markdown format implementation
pub struct MarkdownFormat {
    ctx: Arc<Context>,
    rules: MarkdownRules,
}

impl MarkdownFormat {
    pub fn new(ctx: Arc<Context>) -> Self {
        Self::with_rules(ctx, MarkdownRules::default())
    }

    pub fn with_rules(ctx: Arc<Context>, rules: MarkdownRules) -> Self {
        MarkdownFormat { ctx, rules }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark markdown, the editor's storage representation"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        Ok(parser::parse_from_markdown(&self.ctx, source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        Ok(Serializer::with_rules(&self.ctx, self.rules.clone()).convert(doc))
    }
}
