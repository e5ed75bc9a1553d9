//! Import tests for the Markdown format (Markdown → Document Tree)
//!
//! These tests verify that markdown source is correctly converted by
//! checking the resulting tree structure, including the leniency policy:
//! nothing a user can type makes the parser fail.

use crate::common::parse_md;
use scribe_convert::{tags, Node};

#[test]
fn test_document_order_preserved() {
    let md = "# Title\n\nFirst.\n\nSecond.\n\n- a\n- b\n";
    let doc = parse_md(md);

    assert_eq!(doc.nodes.len(), 4);
    assert_eq!(doc.block(0).unwrap().kind, tags::HEADING_ONE);
    assert_eq!(doc.block(1).unwrap().text(), "First.");
    assert_eq!(doc.block(2).unwrap().text(), "Second.");
    assert_eq!(doc.block(3).unwrap().kind, tags::UL_LIST);
}

#[test]
fn test_all_heading_levels() {
    let md = "# a\n\n## b\n\n### c\n\n#### d\n\n##### e\n\n###### f\n";
    let doc = parse_md(md);
    let kinds: Vec<&str> = (0..6)
        .map(|i| doc.block(i).unwrap().kind.as_str())
        .collect();
    assert_eq!(
        kinds,
        vec![
            tags::HEADING_ONE,
            tags::HEADING_TWO,
            tags::HEADING_THREE,
            tags::HEADING_FOUR,
            tags::HEADING_FIVE,
            tags::HEADING_SIX,
        ]
    );
}

#[test]
fn test_seven_hashes_is_a_paragraph() {
    let doc = parse_md("####### too deep\n");
    assert_eq!(doc.block(0).unwrap().kind, tags::PARAGRAPH);
    assert_eq!(doc.text(), "####### too deep");
}

#[test]
fn test_soft_break_becomes_space() {
    let doc = parse_md("one\ntwo\n");
    assert_eq!(doc.nodes.len(), 1);
    assert_eq!(doc.text(), "one two");
}

#[test]
fn test_quote_with_nested_list() {
    let md = "> quoted\n>\n> - a\n> - b\n";
    let doc = parse_md(md);
    let quote = doc.block(0).unwrap();
    assert_eq!(quote.kind, tags::BLOCK_QUOTE);
    assert_eq!(quote.nodes.len(), 2);
    match &quote.nodes[1] {
        Node::Block(list) => assert_eq!(list.kind, tags::UL_LIST),
        other => panic!("Expected list inside quote, got {other:?}"),
    }
}

#[test]
fn test_code_block_keeps_blank_lines() {
    let md = "```\nfirst\n\nlast\n```\n";
    let doc = parse_md(md);
    let code = doc.block(0).unwrap();
    assert_eq!(code.kind, tags::CODE_BLOCK);
    assert_eq!(code.text(), "first\n\nlast");
    assert_eq!(code.data_str("language"), None);
}

#[test]
fn test_indented_code_block() {
    let doc = parse_md("    indented code\n");
    assert_eq!(doc.block(0).unwrap().kind, tags::CODE_BLOCK);
    assert_eq!(doc.text(), "indented code");
}

#[test]
fn test_link_inside_emphasis_keeps_marks() {
    let doc = parse_md("*see [here](https://example.com)*\n");
    let para = doc.block(0).unwrap();
    let link = para
        .nodes
        .iter()
        .find_map(|n| match n {
            Node::Block(b) if b.kind == tags::LINK => Some(b),
            _ => None,
        })
        .expect("link node");
    match &link.nodes[0] {
        Node::Text(run) => assert!(run.has_mark("italic")),
        other => panic!("Expected run, got {other:?}"),
    }
}

#[test]
fn test_table_syntax_degrades_to_text() {
    // Extensions are off; pipes are ordinary text and nothing is lost.
    let md = "| a | b |\n| - | - |\n| 1 | 2 |\n";
    let doc = parse_md(md);
    assert_eq!(doc.block(0).unwrap().kind, tags::PARAGRAPH);
    assert!(doc.text().contains("| a | b |"));
}

#[test]
fn test_raw_html_block_survives_verbatim() {
    let md = "before\n\n<table><tr><td>x</td></tr></table>\n\nafter\n";
    let doc = parse_md(md);
    let html = doc.block(1).unwrap();
    assert_eq!(html.kind, tags::HTML_BLOCK);
    assert_eq!(html.text(), "<table><tr><td>x</td></tr></table>");
}

#[test]
fn test_inline_html_gets_html_mark() {
    let doc = parse_md("a <sup>b</sup> c\n");
    let para = doc.block(0).unwrap();
    let marked: Vec<&scribe_convert::TextRun> = para
        .nodes
        .iter()
        .filter_map(|n| match n {
            Node::Text(run) if run.has_mark("html") => Some(run),
            _ => None,
        })
        .collect();
    assert_eq!(marked.len(), 2);
    assert_eq!(marked[0].text, "<sup>");
    assert_eq!(marked[1].text, "</sup>");
}

#[test]
fn test_whitespace_only_input() {
    let doc = parse_md("   \n\n  \n");
    assert!(doc.nodes.is_empty());
}

#[test]
fn test_loose_list_items_flatten_first_paragraph() {
    let md = "- first\n\n- second\n";
    let doc = parse_md(md);
    let list = doc.block(0).unwrap();
    for item in &list.nodes {
        let Node::Block(item) = item else {
            panic!("expected item");
        };
        assert!(
            matches!(item.nodes[0], Node::Text(_)),
            "item text should be inline, not a nested paragraph"
        );
    }
}

#[test]
fn test_list_item_with_trailing_paragraph() {
    let md = "- lead\n\n  continuation\n";
    let doc = parse_md(md);
    let list = doc.block(0).unwrap();
    let Node::Block(item) = &list.nodes[0] else {
        panic!("expected item");
    };
    assert!(matches!(item.nodes[0], Node::Text(_)));
    let nested = item
        .nodes
        .iter()
        .find_map(|n| match n {
            Node::Block(b) if b.kind == tags::PARAGRAPH => Some(b),
            _ => None,
        })
        .expect("nested paragraph");
    assert_eq!(nested.text(), "continuation");
}
