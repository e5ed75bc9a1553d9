//! Core data structures for the Document Tree.
//!
//! The tree is the shared currency of the whole crate: the Markdown parser
//! and the HTML importer both produce it, the serializer consumes it, and the
//! shortcut recognizer edits it. Block kinds are open strings so plugins can
//! contribute their own vocabulary at schema-registration time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Built-in block and inline kinds.
///
/// These are the tags the base schema admits at the document root; plugins
/// extend the set through [`crate::schema::Schema::register`].
pub mod tags {
    pub const PARAGRAPH: &str = "paragraph";
    pub const HEADING_ONE: &str = "heading_one";
    pub const HEADING_TWO: &str = "heading_two";
    pub const HEADING_THREE: &str = "heading_three";
    pub const HEADING_FOUR: &str = "heading_four";
    pub const HEADING_FIVE: &str = "heading_five";
    pub const HEADING_SIX: &str = "heading_six";
    pub const BLOCK_QUOTE: &str = "block_quote";
    pub const CODE_BLOCK: &str = "code_block";
    pub const HTML_BLOCK: &str = "html_block";
    pub const HORIZONTAL_RULE: &str = "horizontal_rule";
    pub const UL_LIST: &str = "ul_list";
    pub const OL_LIST: &str = "ol_list";
    pub const LIST_ITEM: &str = "list_item";
    /// Inline container carrying an `href` in its data.
    pub const LINK: &str = "link";

    /// Map a heading level (1-6, clamped) to its block kind.
    pub fn heading(level: u8) -> &'static str {
        match level {
            0 | 1 => HEADING_ONE,
            2 => HEADING_TWO,
            3 => HEADING_THREE,
            4 => HEADING_FOUR,
            5 => HEADING_FIVE,
            _ => HEADING_SIX,
        }
    }

    /// The heading level of a block kind, if it is a heading.
    pub fn heading_level(kind: &str) -> Option<u8> {
        match kind {
            HEADING_ONE => Some(1),
            HEADING_TWO => Some(2),
            HEADING_THREE => Some(3),
            HEADING_FOUR => Some(4),
            HEADING_FIVE => Some(5),
            HEADING_SIX => Some(6),
            _ => None,
        }
    }
}

/// Attribute map attached to a block (`href`, `language`, ...).
pub type Data = serde_json::Map<String, serde_json::Value>;

/// The root of a Document Tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Node>,
}

/// A tree element: either a typed container or a run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum Node {
    Block(Block),
    Text(TextRun),
}

/// A block or inline container with an open-string kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Data::is_empty")]
    pub data: Data,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// A span of literal text sharing one mark set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub marks: BTreeSet<Mark>,
}

/// A formatting attribute applied to a text run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Mark {
    pub kind: String,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Document { nodes }
    }

    /// The flattened text content of the whole tree.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.collect_text(&mut out);
        }
        out
    }

    /// The block at a root index, if it is a block.
    pub fn block(&self, index: usize) -> Option<&Block> {
        match self.nodes.get(index) {
            Some(Node::Block(block)) => Some(block),
            _ => None,
        }
    }

    pub fn block_mut(&mut self, index: usize) -> Option<&mut Block> {
        match self.nodes.get_mut(index) {
            Some(Node::Block(block)) => Some(block),
            _ => None,
        }
    }
}

impl Node {
    pub fn block(kind: &str) -> Node {
        Node::Block(Block::new(kind))
    }

    pub fn text(text: &str) -> Node {
        Node::Text(TextRun::plain(text))
    }

    /// The flattened text of this node and its descendants.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    pub(crate) fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(run) => out.push_str(&run.text),
            Node::Block(block) => {
                for child in &block.nodes {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Whether this node is inline content (a text run or an inline
    /// container such as a link).
    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text(_) => true,
            Node::Block(block) => block.kind == tags::LINK,
        }
    }
}

impl Block {
    pub fn new(kind: &str) -> Self {
        Block {
            kind: kind.to_string(),
            data: Data::new(),
            nodes: Vec::new(),
        }
    }

    pub fn with_nodes(kind: &str, nodes: Vec<Node>) -> Self {
        Block {
            kind: kind.to_string(),
            data: Data::new(),
            nodes,
        }
    }

    /// Attach a string attribute, builder style.
    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data
            .insert(key.to_string(), serde_json::Value::String(value.to_string()));
        self
    }

    /// Read a string attribute.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// The flattened text of this block's descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.nodes {
            child.collect_text(&mut out);
        }
        out
    }
}

impl TextRun {
    pub fn plain(text: &str) -> Self {
        TextRun {
            text: text.to_string(),
            marks: BTreeSet::new(),
        }
    }

    pub fn marked(text: &str, marks: BTreeSet<Mark>) -> Self {
        TextRun {
            text: text.to_string(),
            marks,
        }
    }

    pub fn has_mark(&self, kind: &str) -> bool {
        self.marks.iter().any(|m| m.kind == kind)
    }
}

impl Mark {
    pub fn new(kind: &str) -> Self {
        Mark {
            kind: kind.to_string(),
        }
    }

    pub fn bold() -> Self {
        Mark::new("bold")
    }

    pub fn italic() -> Self {
        Mark::new("italic")
    }

    pub fn code() -> Self {
        Mark::new("code")
    }

    /// Inline HTML that passed through the parser verbatim.
    pub fn html() -> Self {
        Mark::new("html")
    }
}
