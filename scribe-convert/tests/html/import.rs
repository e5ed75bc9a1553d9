//! Import tests for the HTML format (pasted HTML → Document Tree)
//!
//! Unit coverage of individual tags lives next to the importer; these
//! tests exercise whole paste payloads and the paste-to-markdown pipeline.

use crate::common::{import_html, to_md};
use insta::assert_snapshot;
use scribe_convert::{tags, Node};
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

#[test]
fn test_paste_fixture_structure() {
    let doc = import_html(&fixture("paste.html"));

    assert_eq!(doc.nodes.len(), 5);
    assert_eq!(doc.block(0).unwrap().kind, tags::HEADING_TWO);
    assert_eq!(doc.block(1).unwrap().kind, tags::PARAGRAPH);
    assert_eq!(doc.block(2).unwrap().kind, tags::BLOCK_QUOTE);
    assert_eq!(doc.block(3).unwrap().kind, tags::UL_LIST);
    assert_eq!(doc.block(4).unwrap().kind, tags::CODE_BLOCK);
}

#[test]
fn test_paste_fixture_to_markdown() {
    let doc = import_html(&fixture("paste.html"));

    assert_snapshot!(to_md(&doc), @r###"
    ## Minutes

    Attendees: **Ana** and *Ben*.

    > Decisions are recorded below.

    - approve the budget
    - review the [draft](https://example.com/draft)

    ```sh
    make release
    ```
    "###);
}

#[test]
fn test_styled_word_pair_keeps_separator() {
    let doc = import_html("<p><strong>x</strong> <em>y</em></p>");
    assert_eq!(to_md(&doc), "**x** *y*");
}

#[test]
fn test_imported_html_round_trips_through_markdown() {
    let doc = import_html("<h1>Title</h1><p>Body with <strong>bold</strong>.</p>");
    let md = to_md(&doc);
    assert_eq!(md, "# Title\n\nBody with **bold**.");

    let reparsed = crate::common::parse_md(&md);
    assert_eq!(reparsed, doc);
}

#[test]
fn test_deeply_wrapped_content_unwraps() {
    let html = "<div><section><article><p>buried</p></article></section></div>";
    let doc = import_html(html);
    assert_eq!(doc.nodes.len(), 1);
    assert_eq!(doc.block(0).unwrap().kind, tags::PARAGRAPH);
    assert_eq!(doc.text(), "buried");
}

#[test]
fn test_empty_and_garbage_input() {
    assert!(import_html("").nodes.is_empty());
    assert!(import_html("<!-- only a comment -->").nodes.is_empty());

    let doc = import_html("<<<>>> not html at all");
    assert!(!doc.text().is_empty());
}

#[test]
fn test_nested_list_import_to_markdown() {
    let html = "<ul><li>outer<ul><li>inner</li></ul></li></ul>";
    let doc = import_html(html);
    assert_eq!(to_md(&doc), "- outer\n  - inner");
}

#[test]
fn test_heading_with_link() {
    let doc = import_html("<h3><a href=\"https://example.com/x\">linked</a></h3>");
    let heading = doc.block(0).unwrap();
    assert_eq!(heading.kind, tags::HEADING_THREE);
    match &heading.nodes[0] {
        Node::Block(link) => {
            assert_eq!(link.kind, tags::LINK);
            assert_eq!(link.data_str("href"), Some("https://example.com/x"));
        }
        other => panic!("Expected link, got {other:?}"),
    }
}
