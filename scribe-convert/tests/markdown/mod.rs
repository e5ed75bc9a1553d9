//! Markdown format tests
//!
//! Tests for bidirectional Markdown ↔ Document Tree conversion.

mod export;
mod import;
mod roundtrip;
