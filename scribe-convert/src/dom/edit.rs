//! Structural editing operations on the Document Tree.
//!
//! These are the primitive mutations issued by the editor shell and by the
//! shortcut recognizer: change a block's kind, strip typed prefix text, wrap
//! and unwrap list containers, split a block at a cursor offset, and insert
//! sibling blocks. All offsets are character offsets, matching the cursor
//! model of the host.

use crate::dom::nodes::{Block, Document, Node};

/// Addresses a block inside a document: a root index, optionally narrowed to
/// an item of a list container at that index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockAddress {
    pub index: usize,
    pub item: Option<usize>,
}

impl BlockAddress {
    pub fn root(index: usize) -> Self {
        BlockAddress { index, item: None }
    }

    pub fn item(index: usize, item: usize) -> Self {
        BlockAddress {
            index,
            item: Some(item),
        }
    }
}

impl Document {
    /// Resolve an address to the block it names.
    pub fn resolve_mut(&mut self, at: BlockAddress) -> Option<&mut Block> {
        let block = self.block_mut(at.index)?;
        match at.item {
            None => Some(block),
            Some(item) => match block.nodes.get_mut(item) {
                Some(Node::Block(inner)) => Some(inner),
                _ => None,
            },
        }
    }

    /// Change the kind of the addressed block. Data that no longer applies is
    /// left in place; the serializer ignores attributes a kind does not use.
    pub fn set_block_kind(&mut self, at: BlockAddress, kind: &str) {
        if let Some(block) = self.resolve_mut(at) {
            block.kind = kind.to_string();
        }
    }

    /// Wrap the root block at `index` in a new container of `wrapper` kind.
    pub fn wrap_block(&mut self, index: usize, wrapper: &str) {
        if index >= self.nodes.len() {
            return;
        }
        let inner = self.nodes.remove(index);
        let container = Block::with_nodes(wrapper, vec![inner]);
        self.nodes.insert(index, Node::Block(container));
    }

    /// Insert a block before the root block at `index`.
    pub fn insert_block_before(&mut self, index: usize, node: Node) {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node);
    }

    /// Insert a block after the root block at `index`.
    pub fn insert_block_after(&mut self, index: usize, node: Node) {
        let index = (index + 1).min(self.nodes.len());
        self.nodes.insert(index, node);
    }

    /// Take the addressed item out of its list container, leaving it at the
    /// root as a sibling of the list. A list emptied by the removal is
    /// deleted; removal from the middle splits the list in two.
    pub fn unwrap_list_item(&mut self, at: BlockAddress) {
        let item_index = match at.item {
            Some(item) => item,
            None => return,
        };
        let Some(Node::Block(list)) = self.nodes.get_mut(at.index) else {
            return;
        };
        if item_index >= list.nodes.len() {
            return;
        }
        let list_kind = list.kind.clone();
        let freed = list.nodes.remove(item_index);
        let remaining = list.nodes.len();

        if remaining == 0 {
            self.nodes[at.index] = freed;
        } else if item_index == 0 {
            self.nodes.insert(at.index, freed);
        } else if item_index == remaining {
            self.nodes.insert(at.index + 1, freed);
        } else {
            // Middle removal: everything after the freed item moves into a
            // second list that follows it.
            let tail: Vec<Node> = list.nodes.split_off(item_index);
            self.nodes
                .insert(at.index + 1, Node::Block(Block::with_nodes(&list_kind, tail)));
            self.nodes.insert(at.index + 1, freed);
        }
    }

    /// Split the root block at `index` at character `offset`; content after
    /// the offset moves to a new following block of `new_kind`.
    pub fn split_block(&mut self, index: usize, offset: usize, new_kind: &str) {
        let Some(block) = self.block_mut(index) else {
            return;
        };
        let tail = split_inline_nodes(&mut block.nodes, offset);
        let next = Block::with_nodes(new_kind, tail);
        self.insert_block_after(index, Node::Block(next));
    }
}

impl Block {
    /// Remove up to `count` characters from the start of this block's text
    /// runs. Used to delete a recognized shortcut prefix. Stops early at the
    /// first non-text child.
    pub fn delete_leading(&mut self, mut count: usize) {
        while count > 0 {
            let Some(Node::Text(run)) = self.nodes.first_mut() else {
                return;
            };
            let available = run.text.chars().count();
            if available <= count {
                count -= available;
                self.nodes.remove(0);
            } else {
                let byte = run
                    .text
                    .char_indices()
                    .nth(count)
                    .map(|(i, _)| i)
                    .unwrap_or(run.text.len());
                run.text.drain(..byte);
                return;
            }
        }
    }
}

/// Split a sequence of inline nodes at a character offset, returning the
/// tail. A text run straddling the offset is cut in two; an inline container
/// straddling it stays whole on the left side.
fn split_inline_nodes(nodes: &mut Vec<Node>, offset: usize) -> Vec<Node> {
    let mut seen = 0usize;
    for i in 0..nodes.len() {
        let len = nodes[i].to_text().chars().count();
        if seen + len < offset {
            seen += len;
            continue;
        }
        if seen + len == offset {
            return nodes.split_off(i + 1);
        }
        // Offset falls inside node i.
        if let Node::Text(run) = &mut nodes[i] {
            let cut = offset - seen;
            let byte = run
                .text
                .char_indices()
                .nth(cut)
                .map(|(b, _)| b)
                .unwrap_or(run.text.len());
            let tail_text = run.text.split_off(byte);
            let marks = run.marks.clone();
            let mut tail = nodes.split_off(i + 1);
            tail.insert(
                0,
                Node::Text(crate::dom::nodes::TextRun {
                    text: tail_text,
                    marks,
                }),
            );
            return tail;
        }
        return nodes.split_off(i + 1);
    }
    Vec::new()
}
