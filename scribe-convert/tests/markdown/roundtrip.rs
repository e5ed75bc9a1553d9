//! Round-trip tests for the Markdown format
//!
//! The editor parses on load and serializes on save, so the pair has to be
//! stable: a tree survives `parse(serialize(tree))` unchanged, and
//! serialized output is a fixed point of another parse/serialize pass.

use crate::common::{parse_md, to_md};
use proptest::prelude::*;
use scribe_convert::{tags, Block, Document, Mark, Node, TextRun};
use std::collections::BTreeSet;

fn canonical_fixture() -> String {
    [
        "# Title",
        "",
        "Some **bold** and *italic* and `code` text.",
        "",
        "> A quote.",
        "",
        "- one",
        "- two",
        "  - nested",
        "",
        "1. first",
        "2. second",
        "",
        "```rust",
        "fn main() {}",
        "```",
        "",
        "---",
        "",
        "A [link](https://example.com/docs) at the end.",
    ]
    .join("\n")
}

#[test]
fn test_canonical_markdown_is_a_fixed_point() {
    let md = canonical_fixture();
    assert_eq!(to_md(&parse_md(&md)), md);
}

#[test]
fn test_messy_markdown_normalizes_once() {
    let messy = "#   Spaced Title\n\n\n\nText   with a\nsoft break.\n\n* star bullet\n";
    let once = to_md(&parse_md(messy));
    let twice = to_md(&parse_md(&once));
    assert_eq!(once, twice);
    assert_eq!(
        once,
        "# Spaced Title\n\nText   with a soft break.\n\n- star bullet"
    );
}

fn marked(text: &str, kinds: &[&str]) -> Node {
    let marks: BTreeSet<Mark> = kinds.iter().map(|k| Mark::new(k)).collect();
    Node::Text(TextRun::marked(text, marks))
}

fn words() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,3}"
}

fn plain_paragraph() -> impl Strategy<Value = Node> {
    words().prop_map(|t| {
        Node::Block(Block::with_nodes(tags::PARAGRAPH, vec![Node::text(&t)]))
    })
}

/// A paragraph with a fixed run shape and random content:
/// `w0 **w1** w2 *w3* w4`. The shape guarantees no two adjacent runs share
/// a mark set, which is the form the parser itself produces.
fn styled_paragraph() -> impl Strategy<Value = Node> {
    ("[a-z]{1,8}", words(), "[a-z]{1,8}", words(), "[a-z]{1,8}").prop_map(
        |(w0, w1, w2, w3, w4)| {
            Node::Block(Block::with_nodes(
                tags::PARAGRAPH,
                vec![
                    Node::text(&format!("{w0} ")),
                    marked(&w1, &["bold"]),
                    Node::text(&format!(" {w2} ")),
                    marked(&w3, &["bold", "italic"]),
                    Node::text(&format!(" {w4}")),
                ],
            ))
        },
    )
}

fn heading() -> impl Strategy<Value = Node> {
    (1u8..=6, words()).prop_map(|(level, t)| {
        Node::Block(Block::with_nodes(
            tags::heading(level),
            vec![Node::text(&t)],
        ))
    })
}

fn quote() -> impl Strategy<Value = Node> {
    proptest::collection::vec(words(), 1..3).prop_map(|paras| {
        let inner = paras
            .iter()
            .map(|t| Node::Block(Block::with_nodes(tags::PARAGRAPH, vec![Node::text(t)])))
            .collect();
        Node::Block(Block::with_nodes(tags::BLOCK_QUOTE, inner))
    })
}

fn list() -> impl Strategy<Value = Node> {
    (any::<bool>(), proptest::collection::vec(words(), 1..4)).prop_map(|(ordered, items)| {
        let kind = if ordered { tags::OL_LIST } else { tags::UL_LIST };
        let items = items
            .iter()
            .map(|t| Node::Block(Block::with_nodes(tags::LIST_ITEM, vec![Node::text(t)])))
            .collect();
        Node::Block(Block::with_nodes(kind, items))
    })
}

fn code_block() -> impl Strategy<Value = Node> {
    ("[a-z]{0,4}", proptest::collection::vec("[a-z ]{1,20}", 1..3)).prop_map(
        |(language, lines)| {
            let mut block =
                Block::with_nodes(tags::CODE_BLOCK, vec![Node::text(&lines.join("\n"))]);
            if !language.is_empty() {
                block = block.with_data("language", &language);
            }
            Node::Block(block)
        },
    )
}

fn block() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => plain_paragraph(),
        2 => styled_paragraph(),
        2 => heading(),
        1 => quote(),
        2 => list(),
        1 => code_block(),
        1 => Just(Node::block(tags::HORIZONTAL_RULE)),
    ]
}

fn document() -> impl Strategy<Value = Document> {
    // Adjacent same-kind lists would merge into one on re-parse; drop the
    // second so every generated tree is in the parser's canonical form.
    proptest::collection::vec(block(), 1..6).prop_map(|blocks| {
        let mut nodes: Vec<Node> = Vec::new();
        for node in blocks {
            let merges = matches!(
                (&node, nodes.last()),
                (Node::Block(b), Some(Node::Block(prev)))
                    if b.kind == prev.kind
                        && (b.kind == tags::UL_LIST || b.kind == tags::OL_LIST)
            );
            if !merges {
                nodes.push(node);
            }
        }
        Document::new(nodes)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn generated_tree_survives_round_trip(doc in document()) {
        let md = to_md(&doc);
        let back = parse_md(&md);
        prop_assert_eq!(back, doc);
    }

    #[test]
    fn serialization_is_idempotent_on_arbitrary_input(
        source in "[a-z#>* \n-]{0,60}"
    ) {
        let once = to_md(&parse_md(&source));
        let twice = to_md(&parse_md(&once));
        prop_assert_eq!(once, twice);
    }
}
