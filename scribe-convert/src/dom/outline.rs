//! Tree outline rendering for inspection.
//!
//! A line-per-node view of the Document Tree, with nesting encoded as
//! indentation. Meant for humans debugging a conversion, not for machines;
//! the CLI `inspect` command prints it.

use crate::dom::nodes::{Document, Node};

const LABEL_WIDTH: usize = 40;

/// Render a document as an indented outline.
pub fn outline(doc: &Document) -> String {
    let mut out = String::new();
    for (i, node) in doc.nodes.iter().enumerate() {
        format_node(node, "", i, doc.nodes.len(), &mut out);
    }
    out
}

fn format_node(node: &Node, prefix: &str, index: usize, count: usize, out: &mut String) {
    let is_last = index == count - 1;
    let connector = if is_last { "└─" } else { "├─" };

    match node {
        Node::Text(run) => {
            let marks: Vec<&str> = run.marks.iter().map(|m| m.kind.as_str()).collect();
            let label = if marks.is_empty() {
                format!("text {:?}", truncate(&run.text))
            } else {
                format!("text {:?} [{}]", truncate(&run.text), marks.join(", "))
            };
            out.push_str(&format!("{prefix}{connector} {label}\n"));
        }
        Node::Block(block) => {
            let mut label = block.kind.clone();
            if let Some(href) = block.data_str("href") {
                label.push_str(&format!(" → {href}"));
            }
            if let Some(lang) = block.data_str("language") {
                label.push_str(&format!(" ({lang})"));
            }
            out.push_str(&format!("{prefix}{connector} {label}\n"));

            let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
            for (i, child) in block.nodes.iter().enumerate() {
                format_node(child, &child_prefix, i, block.nodes.len(), out);
            }
        }
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= LABEL_WIDTH {
        return text.to_string();
    }
    let cut: String = text.chars().take(LABEL_WIDTH - 1).collect();
    format!("{cut}…")
}
