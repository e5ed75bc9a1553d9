//! HTML import tests
//!
//! Tests for the paste pipeline: HTML fragment → Document Tree → markdown.

mod import;
