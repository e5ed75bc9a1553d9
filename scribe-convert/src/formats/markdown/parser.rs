//! Markdown parsing (Markdown → Document Tree import)
//!
//! Converts CommonMark Markdown to the editor's Document Tree.
//! Pipeline: Markdown string → Comrak AST → Document Tree
//!
//! Comrak owns the block and inline grammar (including setext headings and
//! balanced-delimiter scanning); this module maps its AST onto the editor's
//! node vocabulary. The mapping never fails: constructs outside the
//! supported subset degrade to their flattened text, and raw HTML survives
//! as `html_block` nodes or `html`-marked runs so nothing is dropped.

use crate::context::Context;
use crate::dom::nodes::{tags, Block, Document, Mark, Node, TextRun};
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use std::collections::BTreeSet;

/// Parse a Markdown string into a Document Tree. Infallible: unrecognized
/// syntax becomes plain text per the leniency policy.
pub fn parse_from_markdown(ctx: &Context, source: &str) -> Document {
    let arena = Arena::new();
    // Extensions stay off: the supported subset is plain CommonMark.
    let options = ComrakOptions::default();
    let root = parse_document(&arena, source, &options);

    let mut nodes = Vec::new();
    for child in root.children() {
        if let Some(node) = convert_block(ctx, child) {
            nodes.push(node);
        }
    }
    Document::new(nodes)
}

/// Convert one block-level Comrak node.
fn convert_block<'a>(ctx: &Context, node: &'a AstNode<'a>) -> Option<Node> {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Heading(heading) => {
            let mut block = Block::new(tags::heading(heading.level));
            collect_inlines(node, &BTreeSet::new(), &mut block.nodes);
            Some(Node::Block(block))
        }

        NodeValue::Paragraph => {
            let mut block = Block::new(tags::PARAGRAPH);
            collect_inlines(node, &BTreeSet::new(), &mut block.nodes);
            Some(Node::Block(block))
        }

        NodeValue::BlockQuote => {
            let mut block = Block::new(tags::BLOCK_QUOTE);
            for child in node.children() {
                if let Some(inner) = convert_block(ctx, child) {
                    block.nodes.push(inner);
                }
            }
            Some(Node::Block(block))
        }

        NodeValue::ThematicBreak => Some(Node::block(tags::HORIZONTAL_RULE)),

        NodeValue::CodeBlock(code) => {
            let mut block = Block::new(tags::CODE_BLOCK);
            if !code.info.is_empty() {
                block = block.with_data("language", &code.info);
            }
            let literal = code.literal.strip_suffix('\n').unwrap_or(&code.literal);
            block.nodes.push(Node::text(literal));
            Some(Node::Block(block))
        }

        NodeValue::HtmlBlock(html) => {
            let literal = html.literal.trim_end();
            // A plugin that claims the leading tag gets the first shot.
            if let Some(tag) = leading_tag_name(literal) {
                if let Some(plugin) = ctx.plugins().by_markdown_tag(&tag) {
                    if let Some(node) = plugin.from_markdown(literal) {
                        return Some(node);
                    }
                }
            }
            let mut block = Block::new(tags::HTML_BLOCK);
            block.nodes.push(Node::text(literal));
            Some(Node::Block(block))
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, comrak::nodes::ListType::Ordered);
            let kind = if ordered { tags::OL_LIST } else { tags::UL_LIST };
            let mut block = Block::new(kind);
            if ordered && list.start != 1 {
                block.data.insert(
                    "start".to_string(),
                    serde_json::Value::Number((list.start as u64).into()),
                );
            }
            for child in node.children() {
                if matches!(child.data.borrow().value, NodeValue::Item(_)) {
                    block.nodes.push(convert_item(ctx, child));
                }
            }
            Some(Node::Block(block))
        }

        // Anything else degrades to a plain paragraph holding the flattened
        // text content; empty leftovers are dropped.
        _ => {
            let mut text = String::new();
            collect_text_content(node, &mut text);
            if text.trim().is_empty() {
                None
            } else {
                let mut block = Block::new(tags::PARAGRAPH);
                block.nodes.push(Node::text(&text));
                Some(Node::Block(block))
            }
        }
    }
}

/// Convert a list item: a single leading paragraph is flattened into the
/// item (list items hold their text directly), later blocks stay nested.
fn convert_item<'a>(ctx: &Context, item: &'a AstNode<'a>) -> Node {
    let mut block = Block::new(tags::LIST_ITEM);
    let mut first = true;
    for child in item.children() {
        let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
        if first && is_paragraph {
            collect_inlines(child, &BTreeSet::new(), &mut block.nodes);
        } else if let Some(inner) = convert_block(ctx, child) {
            block.nodes.push(inner);
        }
        first = false;
    }
    Node::Block(block)
}

/// Collect the inline children of `node`, carrying the accumulated mark set
/// down through nested emphasis. `***x***` arrives here as Emph(Strong(x))
/// and leaves as one run with both marks.
fn collect_inlines<'a>(node: &'a AstNode<'a>, marks: &BTreeSet<Mark>, out: &mut Vec<Node>) {
    for child in node.children() {
        convert_inline(child, marks, out);
    }
}

fn convert_inline<'a>(node: &'a AstNode<'a>, marks: &BTreeSet<Mark>, out: &mut Vec<Node>) {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Text(text) => push_run(out, text, marks.clone()),

        NodeValue::SoftBreak | NodeValue::LineBreak => push_run(out, " ", marks.clone()),

        NodeValue::Strong => {
            let mut inner = marks.clone();
            inner.insert(Mark::bold());
            collect_inlines(node, &inner, out);
        }

        NodeValue::Emph => {
            let mut inner = marks.clone();
            inner.insert(Mark::italic());
            collect_inlines(node, &inner, out);
        }

        NodeValue::Code(code) => {
            let mut inner = marks.clone();
            inner.insert(Mark::code());
            push_run(out, &code.literal, inner);
        }

        NodeValue::HtmlInline(html) => {
            let mut inner = marks.clone();
            inner.insert(Mark::html());
            push_run(out, html, inner);
        }

        NodeValue::Link(link) => {
            let mut block = Block::new(tags::LINK).with_data("href", &link.url);
            collect_inlines(node, marks, &mut block.nodes);
            out.push(Node::Block(block));
        }

        // Images and other inlines outside the subset: keep the visible text
        // (alt text for images), drop the decoration.
        _ => {
            let mut text = String::new();
            collect_text_content(node, &mut text);
            if !text.is_empty() {
                push_run(out, &text, marks.clone());
            }
        }
    }
}

/// Append a run, merging into the previous one when the mark sets agree.
/// Comrak splits literal text around escapes; the tree should not.
fn push_run(out: &mut Vec<Node>, text: &str, marks: BTreeSet<Mark>) {
    if let Some(Node::Text(last)) = out.last_mut() {
        if last.marks == marks {
            last.text.push_str(text);
            return;
        }
    }
    out.push(Node::Text(TextRun::marked(text, marks)));
}

/// Collect text content from a node and its descendants.
fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}

/// The lowercase tag name opening an HTML block, if the literal starts with
/// a tag (`<video src=...>` → `video`).
fn leading_tag_name(literal: &str) -> Option<String> {
    let rest = literal.trim_start().strip_prefix('<')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}
