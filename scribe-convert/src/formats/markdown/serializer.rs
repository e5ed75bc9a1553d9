//! Markdown serialization (Document Tree → Markdown export)
//!
//! Hand-written walk over the Document Tree producing CommonMark text.
//! No escaping is applied on the way out: text is emitted verbatim, so a
//! run containing `*stars*` re-parses as emphasis. The editor accepts that
//! asymmetry in exchange for output a human would have typed.
//!
//! Node kinds map to markdown as follows:
//!
//! | Node kind        | Markdown                      |
//! |------------------|-------------------------------|
//! | paragraph        | bare text                     |
//! | heading_one..six | `#`..`######` prefix          |
//! | block_quote      | `> ` line prefix              |
//! | code_block       | fenced, with language info    |
//! | html_block       | literal passthrough           |
//! | horizontal_rule  | `---`                         |
//! | ul_list, ol_list | `- ` / `1. ` markers          |
//! | link             | `[text](href)`                |
//! | plugin kinds     | delegated, else flattened     |

use crate::context::Context;
use crate::dom::nodes::{tags, Block, Document, Node, TextRun};
use crate::formats::markdown::rules::MarkdownRules;

/// Document Tree to markdown serializer.
///
/// Plugins receive a reference to the running serializer in their
/// `to_markdown` callback so they can render child nodes through
/// [`Serializer::recursive`].
pub struct Serializer<'a> {
    ctx: &'a Context,
    rules: MarkdownRules,
}

impl<'a> Serializer<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self::with_rules(ctx, MarkdownRules::default())
    }

    pub fn with_rules(ctx: &'a Context, rules: MarkdownRules) -> Self {
        Serializer { ctx, rules }
    }

    /// Serialize a whole document. Top-level blocks are separated by blank
    /// lines and the result carries no trailing newline. Blocks that render
    /// to nothing, like an empty paragraph left behind by an edit, are
    /// omitted rather than emitted as stray blank lines.
    pub fn convert(&self, doc: &Document) -> String {
        let mut parts = Vec::new();
        for node in &doc.nodes {
            if let Some(part) = self.node(node) {
                if part.trim().is_empty() {
                    continue;
                }
                parts.push(part);
            }
        }
        parts.join("\n\n")
    }

    /// Serialize a slice of child nodes to inline markdown.
    ///
    /// This is the re-entry point handed to plugins: text runs come back
    /// with their mark delimiters, links as `[text](href)`, and any other
    /// nested block as its flattened inline content.
    pub fn recursive(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Text(run) => out.push_str(&self.run(run)),
                Node::Block(block) if block.kind == tags::LINK => {
                    out.push_str(&self.link(block));
                }
                Node::Block(block) => out.push_str(&self.recursive(&block.nodes)),
            }
        }
        out
    }

    fn node(&self, node: &Node) -> Option<String> {
        match node {
            // A stray top-level run still renders as its text.
            Node::Text(run) => Some(self.run(run)),
            Node::Block(block) => self.block(block),
        }
    }

    fn block(&self, block: &Block) -> Option<String> {
        if let Some(level) = tags::heading_level(&block.kind) {
            let body = self.recursive(&block.nodes);
            return Some(format!("{} {}", "#".repeat(level as usize), body));
        }

        match block.kind.as_str() {
            tags::PARAGRAPH => Some(self.recursive(&block.nodes)),

            tags::BLOCK_QUOTE => Some(self.quote(block)),

            tags::CODE_BLOCK => {
                let language = block.data_str("language").unwrap_or_default();
                Some(format!("```{}\n{}\n```", language, block.text()))
            }

            tags::HTML_BLOCK => Some(block.text()),

            tags::HORIZONTAL_RULE => Some("---".to_string()),

            tags::UL_LIST | tags::OL_LIST => Some(self.list(block, 0)),

            tags::LINK => Some(self.link(block)),

            _ => self.other(block),
        }
    }

    /// Unknown node kind: the owning plugin serializes it, otherwise the
    /// flattened text survives as a plain block.
    fn other(&self, block: &Block) -> Option<String> {
        if let Some(plugin) = self.ctx.plugins().by_tag(&block.kind) {
            if let Some(md) = plugin.to_markdown(self, block) {
                return Some(md);
            }
        }
        let text = block.text();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn quote(&self, block: &Block) -> String {
        let mut parts = Vec::new();
        for node in &block.nodes {
            if let Some(part) = self.node(node) {
                if part.trim().is_empty() {
                    continue;
                }
                parts.push(part);
            }
        }
        let inner = parts.join("\n\n");
        let mut lines = Vec::new();
        for line in inner.lines() {
            if line.is_empty() {
                lines.push(">".to_string());
            } else {
                lines.push(format!("> {line}"));
            }
        }
        lines.join("\n")
    }

    fn list(&self, block: &Block, depth: usize) -> String {
        let ordered = block.kind == tags::OL_LIST;
        let start = block
            .data
            .get("start")
            .and_then(|v| v.as_u64())
            .unwrap_or(1);
        let indent = self.rules.indent.repeat(depth);

        let mut lines = Vec::new();
        let mut number = start;
        for node in &block.nodes {
            let Node::Block(item) = node else { continue };
            let marker = if ordered {
                let m = format!("{number}. ");
                number += 1;
                m
            } else {
                format!("{} ", self.rules.bullet)
            };
            self.list_item(item, depth, &indent, &marker, &mut lines);
        }
        lines.join("\n")
    }

    /// One list item: inline content on the marker line, nested blocks on
    /// continuation lines indented one level deeper.
    fn list_item(
        &self,
        item: &Block,
        depth: usize,
        indent: &str,
        marker: &str,
        lines: &mut Vec<String>,
    ) {
        let mut inline = String::new();
        let mut rest = Vec::new();
        for child in &item.nodes {
            match child {
                Node::Text(run) => inline.push_str(&self.run(run)),
                Node::Block(b) if b.kind == tags::LINK => inline.push_str(&self.link(b)),
                Node::Block(b) => rest.push(b),
            }
        }
        lines.push(format!("{indent}{marker}{inline}"));

        let continuation = self.rules.indent.repeat(depth + 1);
        for b in rest {
            if b.kind == tags::UL_LIST || b.kind == tags::OL_LIST {
                lines.push(self.list(b, depth + 1));
            } else if let Some(part) = self.block(b) {
                for line in part.lines() {
                    lines.push(format!("{continuation}{line}"));
                }
            }
        }
    }

    fn link(&self, block: &Block) -> String {
        let body = self.recursive(&block.nodes);
        match block.data_str("href") {
            Some(href) => format!("[{body}]({href})"),
            None => body,
        }
    }

    /// Wrap a run's text in its mark delimiters, innermost first so bold
    /// and italic compose as `***text***`. A run carrying the `html` mark
    /// is already markup and passes through untouched.
    fn run(&self, run: &TextRun) -> String {
        if run.has_mark("html") {
            return run.text.clone();
        }
        let mut out = run.text.clone();
        if run.has_mark("code") {
            out = format!("`{out}`");
        }
        if run.has_mark("italic") {
            out = format!("*{out}*");
        }
        if run.has_mark("bold") {
            out = format!("**{out}**");
        }
        out
    }
}
