//! Snapshot helpers.
//!
//! Renders a [`Document`] as an indented outline suitable for snapshot
//! assertions: one node per line, two spaces per depth level.
//!
//! ```text
//! body
//!   section [data-carousel]
//!     div.opacity-100 [data-slide]
//!   div [data-rail="picks"] scroll=324/1500
//! ```

use std::fmt::Write;

use crate::dom::{Document, NodeData, NodeId};

/// Render the whole document from its root. Empty string for an empty document.
pub fn document_to_string(doc: &Document) -> String {
    match doc.root() {
        Some(root) => subtree_to_string(doc, root),
        None => String::new(),
    }
}

/// Render the subtree under `start`. Lines are joined with `'\n'` and the
/// output has no trailing newline.
pub fn subtree_to_string(doc: &Document, start: NodeId) -> String {
    let mut lines = Vec::new();
    let mut stack = vec![(start, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let Some(data) = doc.get(id) else {
            continue;
        };
        lines.push(format!("{}{}", "  ".repeat(depth), node_line(data)));
        for &child in doc.children(id).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    lines.join("\n")
}

/// One-line description of a node: `tag#id.class [attr="v"] "text" scroll=x/max`.
pub fn node_line(data: &NodeData) -> String {
    let mut line = data.tag.clone();
    if let Some(id) = &data.id {
        let _ = write!(line, "#{id}");
    }
    for class in &data.classes {
        let _ = write!(line, ".{class}");
    }
    for (name, value) in &data.attributes {
        if value.is_empty() {
            let _ = write!(line, " [{name}]");
        } else {
            let _ = write!(line, " [{name}={value:?}]");
        }
    }
    if let Some(text) = &data.text {
        let _ = write!(line, " {text:?}");
    }
    if data.scroll.is_scrollable() {
        let _ = write!(line, " scroll={}/{}", data.scroll.offset, data.scroll.max_scroll());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document() {
        assert_eq!(document_to_string(&Document::new()), "");
    }

    #[test]
    fn node_line_parts() {
        let data = NodeData::new("button")
            .with_id("go")
            .with_class("ring-2")
            .with_marker("data-choice")
            .with_attr("data-choice-label", "Heat")
            .with_text("Pick");
        assert_eq!(
            node_line(&data),
            r#"button#go.ring-2 [data-choice] [data-choice-label="Heat"] "Pick""#
        );
    }

    #[test]
    fn scroll_shown_only_when_scrollable() {
        let rail = NodeData::new("div").with_width(400.0).with_content_width(1000.0);
        assert_eq!(node_line(&rail), "div scroll=0/600");
        let plain = NodeData::new("div").with_width(400.0);
        assert_eq!(node_line(&plain), "div");
    }

    #[test]
    fn outline_indents_by_depth() {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let nav = doc.insert_child(body, NodeData::new("nav").with_class("hidden"));
        doc.insert_child(nav, NodeData::new("a").with_text("Home"));
        doc.insert_child(body, NodeData::new("main"));
        assert_eq!(
            document_to_string(&doc),
            "body\n  nav.hidden\n    a \"Home\"\n  main"
        );
        assert_eq!(subtree_to_string(&doc, nav), "nav.hidden\n  a \"Home\"");
    }
}
