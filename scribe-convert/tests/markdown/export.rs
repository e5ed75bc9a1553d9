//! Export tests for the Markdown format (Document Tree → Markdown)
//!
//! The serializer emits one canonical spelling per construct; these tests
//! pin that spelling down.

use crate::common::{para, run, to_md, ul};
use insta::assert_snapshot;
use scribe_convert::{tags, Block, Document, Node};

#[test]
fn test_full_document_layout() {
    let doc = Document::new(vec![
        Node::Block(Block::with_nodes(
            tags::HEADING_ONE,
            vec![Node::text("Title")],
        )),
        Node::Block(Block::with_nodes(
            tags::PARAGRAPH,
            vec![
                Node::text("Some "),
                run("bold", &["bold"]),
                Node::text(" text."),
            ],
        )),
        Node::Block(Block::with_nodes(tags::BLOCK_QUOTE, vec![para("Quoted.")])),
        ul(&["one", "two"]),
        Node::block(tags::HORIZONTAL_RULE),
        para("The end."),
    ]);

    assert_snapshot!(to_md(&doc), @r###"
    # Title

    Some **bold** text.

    > Quoted.

    - one
    - two

    ---

    The end.
    "###);
}

#[test]
fn test_mark_spellings() {
    let doc = Document::new(vec![Node::Block(Block::with_nodes(
        tags::PARAGRAPH,
        vec![
            run("b", &["bold"]),
            Node::text(" "),
            run("i", &["italic"]),
            Node::text(" "),
            run("c", &["code"]),
            Node::text(" "),
            run("bi", &["bold", "italic"]),
        ],
    ))]);
    assert_eq!(to_md(&doc), "**b** *i* `c` ***bi***");
}

#[test]
fn test_html_mark_passes_through() {
    let doc = Document::new(vec![Node::Block(Block::with_nodes(
        tags::PARAGRAPH,
        vec![
            Node::text("x"),
            run("<sup>", &["html"]),
            Node::text("2"),
            run("</sup>", &["html"]),
        ],
    ))]);
    assert_eq!(to_md(&doc), "x<sup>2</sup>");
}

#[test]
fn test_code_block_without_language() {
    let doc = Document::new(vec![Node::Block(Block::with_nodes(
        tags::CODE_BLOCK,
        vec![Node::text("plain text")],
    ))]);
    assert_snapshot!(to_md(&doc), @r###"
    ```
    plain text
    ```
    "###);
}

#[test]
fn test_html_block_verbatim() {
    let doc = Document::new(vec![Node::Block(Block::with_nodes(
        tags::HTML_BLOCK,
        vec![Node::text("<video src=\"movie.mp4\"></video>")],
    ))]);
    assert_eq!(to_md(&doc), "<video src=\"movie.mp4\"></video>");
}

#[test]
fn test_ordered_list_respects_start() {
    let mut list = Block::with_nodes(
        tags::OL_LIST,
        vec![
            Node::Block(Block::with_nodes(tags::LIST_ITEM, vec![Node::text("c")])),
            Node::Block(Block::with_nodes(tags::LIST_ITEM, vec![Node::text("d")])),
        ],
    );
    list.data.insert(
        "start".to_string(),
        serde_json::Value::Number(3u64.into()),
    );
    let doc = Document::new(vec![Node::Block(list)]);
    assert_eq!(to_md(&doc), "3. c\n4. d");
}

#[test]
fn test_list_item_with_quote_continuation() {
    let item = Block::with_nodes(
        tags::LIST_ITEM,
        vec![
            Node::text("lead"),
            Node::Block(Block::with_nodes(tags::BLOCK_QUOTE, vec![para("aside")])),
        ],
    );
    let doc = Document::new(vec![Node::Block(Block::with_nodes(
        tags::UL_LIST,
        vec![Node::Block(item)],
    ))]);
    assert_eq!(to_md(&doc), "- lead\n  > aside");
}

#[test]
fn test_empty_document() {
    assert_eq!(to_md(&Document::new(vec![])), "");
}

#[test]
fn test_link_without_href_degrades_to_text() {
    let doc = Document::new(vec![Node::Block(Block::with_nodes(
        tags::PARAGRAPH,
        vec![Node::Block(Block::with_nodes(
            tags::LINK,
            vec![Node::text("bare")],
        ))],
    ))]);
    assert_eq!(to_md(&doc), "bare");
}

#[test]
fn test_fragment_serialization() {
    let ctx = scribe_convert::Context::new();
    let nodes = vec![
        Node::text("see "),
        Node::Block(
            Block::with_nodes(tags::LINK, vec![Node::text("docs")])
                .with_data("href", "https://example.com"),
        ),
    ];
    assert_eq!(
        scribe_convert::to_markdown_fragment(&ctx, &nodes),
        "see [docs](https://example.com)"
    );
}
