//! Markdown-style keyboard shortcuts
//!
//! Recognizes the markdown prefixes users type at the start of a block and
//! turns them into structural edits: `- `, `* `, `+ ` start a list, `> ` a
//! quote, `#` through `######` headings, and `--- ` a horizontal rule.
//! Backspace at the start of a converted block undoes the conversion, and
//! Enter at the end of a heading continues in a fresh paragraph.
//!
//! Recognition is a pure function over a [`EditState`] snapshot of the
//! block under the cursor; it returns an [`Edit`] describing the mutation
//! without touching any document. [`apply`] then executes an `Edit`
//! against a [`Document`]. Keeping the two apart lets hosts route edits
//! through their own undo machinery, and keeps every rule testable without
//! an editor attached.

use crate::dom::edit::BlockAddress;
use crate::dom::nodes::{tags, Block, Document, Node};

/// The three keys that can trigger a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Space,
    Backspace,
    Enter,
}

/// Snapshot of the block under the cursor at the moment a key is pressed.
/// The key itself has not been applied yet: on Space, `text` does not
/// contain the space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    /// Kind of the block holding the cursor.
    pub block_kind: String,
    /// Flattened text of that block.
    pub text: String,
    /// Cursor position as a character offset into `text`.
    pub offset: usize,
    /// Whether the selection spans more than a caret.
    pub expanded: bool,
}

impl EditState {
    /// A collapsed-selection snapshot.
    pub fn collapsed(block_kind: &str, text: &str, offset: usize) -> Self {
        EditState {
            block_kind: block_kind.to_string(),
            text: text.to_string(),
            offset,
            expanded: false,
        }
    }
}

/// A structural edit recognized from a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Strip the typed prefix and change the block's kind, optionally
    /// wrapping it in a fresh bulleted list container.
    ConvertBlock {
        kind: &'static str,
        strip: usize,
        wrap_list: bool,
    },
    /// Strip the typed `---` and insert a horizontal rule before the
    /// block, which stays behind as an empty paragraph holding the cursor.
    InsertRule { strip: usize },
    /// Turn the block back into a paragraph, pulling it out of its list
    /// container if it was an item.
    RevertToParagraph { unwrap_list: bool },
    /// Insert an empty paragraph after the heading for the cursor to
    /// continue in.
    SplitHeading,
}

/// Recognize a shortcut. Returns `None` when the key should fall through
/// to ordinary text editing.
pub fn recognize(state: &EditState, key: KeyEvent) -> Option<Edit> {
    match key {
        KeyEvent::Space => on_space(state),
        KeyEvent::Backspace => on_backspace(state),
        KeyEvent::Enter => on_enter(state),
    }
}

/// The block kind a marker string converts to, and whether the converted
/// block needs a list container around it.
pub fn block_kind_for(marker: &str) -> Option<(&'static str, bool)> {
    match marker {
        "*" | "-" | "+" => Some((tags::LIST_ITEM, true)),
        ">" => Some((tags::BLOCK_QUOTE, false)),
        "#" => Some((tags::HEADING_ONE, false)),
        "##" => Some((tags::HEADING_TWO, false)),
        "###" => Some((tags::HEADING_THREE, false)),
        "####" => Some((tags::HEADING_FOUR, false)),
        "#####" => Some((tags::HEADING_FIVE, false)),
        "######" => Some((tags::HEADING_SIX, false)),
        _ => None,
    }
}

fn on_space(state: &EditState) -> Option<Edit> {
    if state.expanded {
        return None;
    }
    // The marker is the prefix before the cursor with all whitespace
    // removed, so "# #" still reads as "##".
    let marker: String = state
        .text
        .chars()
        .take(state.offset)
        .filter(|c| !c.is_whitespace())
        .collect();
    let marker = marker.as_str();

    if marker == "---" {
        if state.block_kind == tags::HORIZONTAL_RULE {
            return None;
        }
        return Some(Edit::InsertRule {
            strip: state.offset,
        });
    }

    let (kind, wrap_list) = block_kind_for(marker)?;
    if state.block_kind == kind {
        return None;
    }
    Some(Edit::ConvertBlock {
        kind,
        strip: state.offset,
        wrap_list,
    })
}

fn on_backspace(state: &EditState) -> Option<Edit> {
    if state.expanded || state.offset != 0 {
        return None;
    }
    if state.block_kind == tags::PARAGRAPH {
        return None;
    }
    Some(Edit::RevertToParagraph {
        unwrap_list: state.block_kind == tags::LIST_ITEM,
    })
}

fn on_enter(state: &EditState) -> Option<Edit> {
    if state.expanded {
        return None;
    }
    // Enter on an empty converted block behaves like backspace.
    if state.offset == 0 && state.text.is_empty() {
        return on_backspace(state);
    }
    if state.offset != state.text.chars().count() {
        return None;
    }
    if tags::heading_level(&state.block_kind).is_some() {
        Some(Edit::SplitHeading)
    } else {
        None
    }
}

/// Execute a recognized edit against a document.
pub fn apply(doc: &mut Document, at: BlockAddress, edit: &Edit) {
    match edit {
        Edit::ConvertBlock {
            kind,
            strip,
            wrap_list,
        } => {
            if let Some(block) = doc.resolve_mut(at) {
                block.delete_leading(*strip);
            }
            doc.set_block_kind(at, kind);
            if *wrap_list && at.item.is_none() {
                doc.wrap_block(at.index, tags::UL_LIST);
            }
        }

        Edit::InsertRule { strip } => {
            if let Some(block) = doc.resolve_mut(at) {
                block.delete_leading(*strip);
            }
            doc.set_block_kind(at, tags::PARAGRAPH);
            // A paragraph cannot stay inside a list container; pull it out
            // before placing the rule. Unwrapping leaves the freed block at
            // the list's index when it was the first item, one past it
            // otherwise.
            let index = match at.item {
                None => at.index,
                Some(item) => {
                    doc.unwrap_list_item(at);
                    if item == 0 {
                        at.index
                    } else {
                        at.index + 1
                    }
                }
            };
            doc.insert_block_before(index, Node::block(tags::HORIZONTAL_RULE));
        }

        Edit::RevertToParagraph { unwrap_list } => {
            doc.set_block_kind(at, tags::PARAGRAPH);
            if *unwrap_list {
                doc.unwrap_list_item(at);
            }
        }

        Edit::SplitHeading => {
            doc.insert_block_after(at.index, Node::Block(Block::new(tags::PARAGRAPH)));
        }
    }
}
