//! HTML import (pasted HTML → Document Tree)
//!
//! Converts an HTML fragment, typically from a paste event, into the
//! Document Tree. html5ever owns tag soup recovery: the fragment is run
//! through a full document parse and the resulting body is walked.
//!
//! Import is lossy by policy. Recognized tags map onto node kinds,
//! unknown elements are unwrapped so their children survive, scripts and
//! styles are dropped outright, and nothing ever fails.
//!
//! | HTML                  | Node kind                    |
//! |-----------------------|------------------------------|
//! | p                     | paragraph                    |
//! | h1..h6                | heading_one..heading_six     |
//! | blockquote            | block_quote                  |
//! | pre (+ code)          | code_block                   |
//! | ul, ol, li            | ul_list, ol_list, list_item  |
//! | hr                    | horizontal_rule              |
//! | a                     | link                         |
//! | strong, b / em, i     | bold / italic marks          |
//! | code                  | code mark                    |
//! | br                    | single space                 |
//! | script, style, head   | dropped                      |
//! | anything else         | plugin, else unwrapped       |

use crate::context::Context;
use crate::dom::nodes::{tags, Block, Document, Mark, Node, TextRun};
use crate::plugin::ImportedElement;
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::collections::{BTreeSet, HashMap};

/// Import an HTML fragment into a Document Tree. Infallible: html5ever
/// recovers from malformed markup the way a browser would.
pub fn parse_from_html(ctx: &Context, html: &str) -> Document {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    let importer = Importer { ctx };
    let mut nodes = Vec::new();
    if let Some(body) = find_body(&dom.document) {
        importer.block_children(&body, &mut nodes);
    }
    Document::new(nodes)
}

/// Locate `html > body` in the parsed document. html5ever synthesizes both
/// even for bare fragments.
fn find_body(document: &Handle) -> Option<Handle> {
    let html = find_element(document, "html")?;
    find_element(&html, "body")
}

fn find_element(parent: &Handle, tag: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| element_name(child).as_deref() == Some(tag))
        .cloned()
}

fn element_name(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

struct Importer<'a> {
    ctx: &'a Context,
}

impl Importer<'_> {
    /// Import children in block context. Stray inline content between
    /// blocks is grouped into synthetic paragraphs.
    fn block_children(&self, parent: &Handle, out: &mut Vec<Node>) {
        let mut pending = Vec::new();
        for child in parent.children.borrow().iter() {
            self.block_node(child, out, &mut pending);
        }
        flush_pending(&mut pending, out);
    }

    fn block_node(&self, handle: &Handle, out: &mut Vec<Node>, pending: &mut Vec<Node>) {
        match &handle.data {
            NodeData::Text { contents } => {
                // Kept collapsed but untrimmed; flushing trims the edges.
                let text = collapse_whitespace(&contents.borrow());
                if !text.trim().is_empty() {
                    push_run(pending, &text, BTreeSet::new());
                }
            }

            NodeData::Element { name, .. } => {
                let tag = name.local.to_string();
                match tag.as_str() {
                    "p" | "div" => {
                        flush_pending(pending, out);
                        // div behaves as an anonymous paragraph unless it
                        // holds further blocks.
                        if tag == "div" && self.has_block_children(handle) {
                            self.block_children(handle, out);
                        } else {
                            let mut block = Block::new(tags::PARAGRAPH);
                            self.inline_container(handle, &mut block.nodes);
                            if !block.nodes.is_empty() {
                                out.push(Node::Block(block));
                            }
                        }
                    }

                    "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                        flush_pending(pending, out);
                        let level = tag.as_bytes()[1] - b'0';
                        let mut block = Block::new(tags::heading(level));
                        self.inline_container(handle, &mut block.nodes);
                        out.push(Node::Block(block));
                    }

                    "blockquote" => {
                        flush_pending(pending, out);
                        let mut block = Block::new(tags::BLOCK_QUOTE);
                        self.block_children(handle, &mut block.nodes);
                        out.push(Node::Block(block));
                    }

                    "pre" => {
                        flush_pending(pending, out);
                        out.push(self.code_block(handle));
                    }

                    "ul" | "ol" => {
                        flush_pending(pending, out);
                        out.push(self.list(handle, &tag));
                    }

                    "hr" => {
                        flush_pending(pending, out);
                        out.push(Node::block(tags::HORIZONTAL_RULE));
                    }

                    // A list item outside a list keeps its content.
                    "li" => {
                        flush_pending(pending, out);
                        let mut block = Block::new(tags::PARAGRAPH);
                        self.inline_container(handle, &mut block.nodes);
                        if !block.nodes.is_empty() {
                            out.push(Node::Block(block));
                        }
                    }

                    "script" | "style" | "head" | "title" | "meta" | "link" | "base" => {}

                    "a" | "strong" | "b" | "em" | "i" | "code" | "span" | "br" | "u" => {
                        self.inline_node(handle, &BTreeSet::new(), pending);
                    }

                    _ => {
                        if let Some(node) = self.try_plugin(handle, &tag) {
                            flush_pending(pending, out);
                            out.push(node);
                        } else {
                            // Unknown element: unwrap, children survive.
                            for child in handle.children.borrow().iter() {
                                self.block_node(child, out, pending);
                            }
                        }
                    }
                }
            }

            NodeData::Document => self.block_children(handle, out),

            // Comments, doctypes, processing instructions.
            _ => {}
        }
    }

    fn has_block_children(&self, handle: &Handle) -> bool {
        handle.children.borrow().iter().any(|child| {
            matches!(
                element_name(child).as_deref(),
                Some("p" | "div" | "blockquote" | "pre" | "ul" | "ol" | "hr")
                    | Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6")
            )
        })
    }

    /// Offer an unknown element to the plugin that owns its tag.
    fn try_plugin(&self, handle: &Handle, tag: &str) -> Option<Node> {
        let plugin = self.ctx.plugins().by_tag(tag)?;

        let NodeData::Element { attrs, .. } = &handle.data else {
            return None;
        };
        let attrs: HashMap<String, String> = attrs
            .borrow()
            .iter()
            .map(|a| (a.name.local.to_string(), a.value.to_string()))
            .collect();

        let mut children = Vec::new();
        self.block_children(handle, &mut children);

        plugin.from_html(&ImportedElement {
            tag: tag.to_string(),
            attrs,
            children,
        })
    }

    /// Import inline content for a block, then strip the whitespace runs
    /// indentation in the source leaves at the edges.
    fn inline_container(&self, handle: &Handle, out: &mut Vec<Node>) {
        for child in handle.children.borrow().iter() {
            self.inline_node(child, &BTreeSet::new(), out);
        }
        trim_inline(out);
    }

    fn inline_node(&self, handle: &Handle, marks: &BTreeSet<Mark>, out: &mut Vec<Node>) {
        match &handle.data {
            NodeData::Text { contents } => {
                let text = collapse_whitespace(&contents.borrow());
                if text.is_empty() {
                    return;
                }
                // A whitespace-only node still separates siblings, as in
                // `<strong>x</strong> <em>y</em>`.
                if text.trim().is_empty() && out.is_empty() {
                    return;
                }
                push_run(out, &text, marks.clone());
            }

            NodeData::Element { name, attrs, .. } => {
                let tag = name.local.to_string();
                match tag.as_str() {
                    "strong" | "b" => self.marked_children(handle, marks, Mark::bold(), out),
                    "em" | "i" => self.marked_children(handle, marks, Mark::italic(), out),
                    "code" => self.marked_children(handle, marks, Mark::code(), out),

                    "a" => {
                        let mut block = Block::new(tags::LINK);
                        if let Some(href) = attr_value(&attrs.borrow(), "href") {
                            block = block.with_data("href", &normalize_href(&href));
                        }
                        for child in handle.children.borrow().iter() {
                            self.inline_node(child, marks, &mut block.nodes);
                        }
                        trim_inline(&mut block.nodes);
                        out.push(Node::Block(block));
                    }

                    "br" => push_run(out, " ", marks.clone()),

                    "script" | "style" => {}

                    // span, u, and anything else unwrap in inline context.
                    _ => {
                        for child in handle.children.borrow().iter() {
                            self.inline_node(child, marks, out);
                        }
                    }
                }
            }

            _ => {}
        }
    }

    fn marked_children(
        &self,
        handle: &Handle,
        marks: &BTreeSet<Mark>,
        mark: Mark,
        out: &mut Vec<Node>,
    ) {
        let mut inner = marks.clone();
        inner.insert(mark);
        for child in handle.children.borrow().iter() {
            self.inline_node(child, &inner, out);
        }
    }

    /// `<pre><code class="language-rust">` carries the language; the code
    /// text keeps its newlines verbatim.
    fn code_block(&self, handle: &Handle) -> Node {
        let mut block = Block::new(tags::CODE_BLOCK);

        let inner = find_element(handle, "code");
        if let Some(NodeData::Element { attrs, .. }) = inner.as_ref().map(|h| &h.data) {
            if let Some(class) = attr_value(&attrs.borrow(), "class") {
                if let Some(language) = class
                    .split_whitespace()
                    .find_map(|c| c.strip_prefix("language-"))
                {
                    block = block.with_data("language", language);
                }
            }
        }

        let source = inner.as_ref().unwrap_or(handle);
        let mut text = String::new();
        raw_text(source, &mut text);
        let trimmed = text.strip_suffix('\n').unwrap_or(&text);
        block.nodes.push(Node::text(trimmed));
        Node::Block(block)
    }

    fn list(&self, handle: &Handle, tag: &str) -> Node {
        let kind = if tag == "ol" {
            tags::OL_LIST
        } else {
            tags::UL_LIST
        };
        let mut block = Block::new(kind);
        for child in handle.children.borrow().iter() {
            if element_name(child).as_deref() == Some("li") {
                block.nodes.push(self.list_item(child));
            }
        }
        Node::Block(block)
    }

    /// A list item holds its text directly; a wrapping `<p>` is spliced
    /// away and nested lists stay nested.
    fn list_item(&self, handle: &Handle) -> Node {
        let mut block = Block::new(tags::LIST_ITEM);
        for child in handle.children.borrow().iter() {
            match element_name(child).as_deref() {
                Some("ul") | Some("ol") => {
                    trim_inline(&mut block.nodes);
                    let tag = element_name(child).unwrap_or_default();
                    block.nodes.push(self.list(child, &tag));
                }
                Some("p") => {
                    for inner in child.children.borrow().iter() {
                        self.inline_node(inner, &BTreeSet::new(), &mut block.nodes);
                    }
                }
                _ => self.inline_node(child, &BTreeSet::new(), &mut block.nodes),
            }
        }
        trim_inline(&mut block.nodes);
        Node::Block(block)
    }
}

fn flush_pending(pending: &mut Vec<Node>, out: &mut Vec<Node>) {
    if pending.is_empty() {
        return;
    }
    let mut nodes = std::mem::take(pending);
    trim_inline(&mut nodes);
    if !nodes.is_empty() {
        out.push(Node::Block(Block::with_nodes(tags::PARAGRAPH, nodes)));
    }
}

/// Append a run, merging into the previous one when the mark sets agree.
fn push_run(out: &mut Vec<Node>, text: &str, marks: BTreeSet<Mark>) {
    if let Some(Node::Text(last)) = out.last_mut() {
        if last.marks == marks {
            last.text.push_str(text);
            return;
        }
    }
    out.push(Node::Text(TextRun::marked(text, marks)));
}

/// Collapse runs of HTML whitespace to single spaces.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Drop whitespace-only edge runs and trim the remaining edges.
fn trim_inline(nodes: &mut Vec<Node>) {
    while matches!(nodes.first(), Some(Node::Text(run)) if run.text.trim().is_empty()) {
        nodes.remove(0);
    }
    while matches!(nodes.last(), Some(Node::Text(run)) if run.text.trim().is_empty()) {
        nodes.pop();
    }
    if let Some(Node::Text(run)) = nodes.first_mut() {
        let trimmed = run.text.trim_start().to_string();
        run.text = trimmed;
    }
    if let Some(Node::Text(run)) = nodes.last_mut() {
        let trimmed = run.text.trim_end().to_string();
        run.text = trimmed;
    }
}

fn attr_value(attrs: &[html5ever::Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|a| a.name.local.as_ref() == name)
        .map(|a| a.value.to_string())
}

/// Absolute URLs are normalized through the `url` parser; anything it
/// rejects (relative paths, anchors) is kept verbatim.
fn normalize_href(href: &str) -> String {
    match url::Url::parse(href) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Text content with whitespace preserved, for code blocks.
fn raw_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        _ => {
            for child in handle.children.borrow().iter() {
                raw_text(child, out);
            }
        }
    }
}
