//! Schema registry: which node kinds may appear where.
//!
//! The schema is read-mostly shared state consulted by the parser, the
//! serializer, and the HTML importer. It is mutated only at initialization
//! time, when plugins register their tags at the document root; registration
//! is a set union, so registering the same tag twice never duplicates a rule
//! entry.
//!
//! Child rules are advisory for the converters (they never block tree
//! construction, per the leniency policy) but [`Schema::validate`] applies
//! them strictly, surfacing the one condition this crate treats as a
//! reportable defect: a node kind with no reachable rule.

use crate::dom::nodes::{tags, Block, Document, Node};
use crate::error::ConvertError;
use std::collections::HashMap;

/// The set of rules constraining which node kinds may appear and nest.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Kinds allowed at the document root, in registration order.
    document_tags: Vec<String>,
    /// Per-parent allowed-children rules. Parents without an entry accept
    /// any child.
    child_rules: HashMap<String, Vec<String>>,
}

impl Schema {
    /// The base schema: the built-in block vocabulary at the root, list
    /// containers restricted to list items.
    pub fn base() -> Self {
        let document_tags = [
            tags::PARAGRAPH,
            tags::HEADING_ONE,
            tags::HEADING_TWO,
            tags::HEADING_THREE,
            tags::HEADING_FOUR,
            tags::HEADING_FIVE,
            tags::HEADING_SIX,
            tags::BLOCK_QUOTE,
            tags::CODE_BLOCK,
            tags::HTML_BLOCK,
            tags::HORIZONTAL_RULE,
            tags::UL_LIST,
            tags::OL_LIST,
        ]
        .iter()
        .map(|t| t.to_string())
        .collect();

        let mut child_rules = HashMap::new();
        child_rules.insert(
            tags::UL_LIST.to_string(),
            vec![tags::LIST_ITEM.to_string()],
        );
        child_rules.insert(
            tags::OL_LIST.to_string(),
            vec![tags::LIST_ITEM.to_string()],
        );

        Schema {
            document_tags,
            child_rules,
        }
    }

    /// Add `tag` as an allowed kind at the document root. Returns whether the
    /// tag was new; registering an existing tag is a no-op.
    pub fn register(&mut self, tag: &str) -> bool {
        if self.document_tags.iter().any(|t| t == tag) {
            return false;
        }
        self.document_tags.push(tag.to_string());
        true
    }

    /// Whether `kind` may appear directly under the document root.
    pub fn allowed_at_root(&self, kind: &str) -> bool {
        self.document_tags.iter().any(|t| t == kind)
    }

    /// Whether `child` may appear under a `parent` block. Advisory: parents
    /// without a registered rule accept anything.
    pub fn valid_child(&self, parent: &str, child: &str) -> bool {
        match self.child_rules.get(parent) {
            Some(allowed) => allowed.iter().any(|t| t == child),
            None => true,
        }
    }

    /// Kinds currently allowed at the document root, in registration order.
    pub fn document_tags(&self) -> &[String] {
        &self.document_tags
    }

    /// Strict validation: every block must be reachable from the root rules.
    /// This is the one inconsistency the crate reports instead of repairing,
    /// since silently admitting an unknown kind risks a renderer/serializer
    /// mismatch downstream.
    pub fn validate(&self, doc: &Document) -> Result<(), ConvertError> {
        for node in &doc.nodes {
            if let Node::Block(block) = node {
                if !self.allowed_at_root(&block.kind) {
                    return Err(ConvertError::SchemaViolation(format!(
                        "kind '{}' is not allowed at the document root",
                        block.kind
                    )));
                }
                self.validate_children(block)?;
            }
        }
        Ok(())
    }

    fn validate_children(&self, parent: &Block) -> Result<(), ConvertError> {
        for node in &parent.nodes {
            if let Node::Block(child) = node {
                if !self.valid_child(&parent.kind, &child.kind) {
                    return Err(ConvertError::SchemaViolation(format!(
                        "kind '{}' is not allowed inside '{}'",
                        child.kind, parent.kind
                    )));
                }
                self.validate_children(child)?;
            }
        }
        Ok(())
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::base()
    }
}
