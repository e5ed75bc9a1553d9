//! The Document Tree and its editing operations.
//!
//! An ordered, rooted tree of typed blocks and marked text runs. The tree is
//! produced by the Markdown parser and the HTML importer, consumed by the
//! Markdown serializer, and mutated in place by the editing operations that
//! back the shortcut recognizer.

pub mod edit;
pub mod nodes;
pub mod outline;

pub use edit::BlockAddress;
pub use nodes::{tags, Block, Data, Document, Mark, Node, TextRun};
