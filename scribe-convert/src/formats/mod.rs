//! Format implementations
//!
//! Each format lives in its own submodule and implements the
//! [`crate::format::Format`] trait. Markdown is bidirectional; HTML is
//! import-only because markdown is the editor's storage representation.

pub mod html;
pub mod markdown;
