//! Shared helpers for the conversion tests.

use scribe_convert::{tags, Block, Context, Document, Mark, Node, TextRun};
use std::collections::BTreeSet;

/// Parse markdown with a default context.
pub fn parse_md(md: &str) -> Document {
    scribe_convert::from_markdown(&Context::new(), md)
}

/// Serialize a document with a default context.
pub fn to_md(doc: &Document) -> String {
    scribe_convert::to_markdown(&Context::new(), doc)
}

/// Import HTML with a default context.
pub fn import_html(html: &str) -> Document {
    scribe_convert::from_html(&Context::new(), html)
}

/// A paragraph holding one plain run.
pub fn para(text: &str) -> Node {
    Node::Block(Block::with_nodes(tags::PARAGRAPH, vec![Node::text(text)]))
}

/// A run carrying the named marks.
pub fn run(text: &str, marks: &[&str]) -> Node {
    let marks: BTreeSet<Mark> = marks.iter().map(|m| Mark::new(m)).collect();
    Node::Text(TextRun::marked(text, marks))
}

/// An unordered list of plain single-run items.
pub fn ul(items: &[&str]) -> Node {
    let items = items
        .iter()
        .map(|t| Node::Block(Block::with_nodes(tags::LIST_ITEM, vec![Node::text(t)])))
        .collect();
    Node::Block(Block::with_nodes(tags::UL_LIST, items))
}
