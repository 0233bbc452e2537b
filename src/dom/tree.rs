//! Tree operations: insert, remove, walk, and the scroll command log.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};
use super::scroll::{ScrollBehavior, ScrollCommand, ScrollKind};

const EMPTY_CHILDREN: &[NodeId] = &[];

/// The page document, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so removal is O(subtree size) and lookup is O(1). Tree
/// queries walk from the root in document order; nodes inserted with
/// [`Document::insert`] after the root exist but are detached from it.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
    scroll_log: Vec<ScrollCommand>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
            scroll_log: Vec::new(),
        }
    }

    /// Insert a parentless node. The first one becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not exist in the document.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have children vec")
            .push(id);
        id
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut removed = None;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(kids) = self.children.remove(current) {
                stack.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }
        removed
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Children of a node; empty if it has none or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors of `id`, nearest first. Does not include `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// The document root, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the document contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start` (document order).
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Scroll a node horizontally by `delta`, clamped to its scroll range.
    ///
    /// The range is computed against the node's current measured width. The
    /// request is logged as given, before clamping. Unknown nodes are ignored.
    pub fn scroll_by(&mut self, id: NodeId, delta: f64, behavior: ScrollBehavior) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.scroll.set_viewport_width(node.width);
        node.scroll.scroll_by(delta);
        tracing::trace!(?id, delta, offset = node.scroll.offset, "scroll");
        self.scroll_log.push(ScrollCommand {
            node: id,
            kind: ScrollKind::By(delta),
            behavior,
        });
    }

    /// Ask the host to bring a node into view. Unknown nodes are ignored.
    pub fn scroll_into_view(&mut self, id: NodeId, behavior: ScrollBehavior) {
        if !self.nodes.contains_key(id) {
            return;
        }
        tracing::trace!(?id, "scroll into view");
        self.scroll_log.push(ScrollCommand {
            node: id,
            kind: ScrollKind::IntoView,
            behavior,
        });
    }

    /// Scroll requests issued so far, oldest first.
    pub fn scroll_commands(&self) -> &[ScrollCommand] {
        &self.scroll_log
    }

    /// Drain the scroll command log.
    pub fn take_scroll_commands(&mut self) -> Vec<ScrollCommand> {
        std::mem::take(&mut self.scroll_log)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    ///       body
    ///      /    \
    ///   rail     nav
    ///   /  \
    ///  c1   c2
    /// ```
    fn build_tree() -> (Document, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let rail = doc.insert_child(
            body,
            NodeData::new("div").with_width(400.0).with_content_width(1000.0),
        );
        let nav = doc.insert_child(body, NodeData::new("nav"));
        let c1 = doc.insert_child(rail, NodeData::new("article").with_width(300.0));
        let c2 = doc.insert_child(rail, NodeData::new("article").with_width(300.0));
        (doc, body, rail, nav, c1, c2)
    }

    #[test]
    fn insert_sets_root_once() {
        let mut doc = Document::new();
        let first = doc.insert(NodeData::new("body"));
        let _detached = doc.insert(NodeData::new("template"));
        assert_eq!(doc.root(), Some(first));
    }

    #[test]
    fn parent_and_children() {
        let (doc, body, rail, nav, c1, c2) = build_tree();
        assert_eq!(doc.parent(rail), Some(body));
        assert_eq!(doc.parent(body), None);
        assert_eq!(doc.children(body), &[rail, nav]);
        assert_eq!(doc.children(rail), &[c1, c2]);
        assert!(doc.children(c1).is_empty());
    }

    #[test]
    fn ancestors_nearest_first() {
        let (doc, body, rail, _nav, c1, _c2) = build_tree();
        assert_eq!(doc.ancestors(c1), vec![rail, body]);
        assert!(doc.ancestors(body).is_empty());
    }

    #[test]
    fn remove_subtree() {
        let (mut doc, body, rail, nav, c1, c2) = build_tree();
        let removed = doc.remove(rail);
        assert_eq!(removed.map(|d| d.tag), Some("div".to_string()));
        assert!(!doc.contains(c1));
        assert!(!doc.contains(c2));
        assert_eq!(doc.children(body), &[nav]);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn remove_root_clears_root() {
        let (mut doc, body, ..) = build_tree();
        doc.remove(body);
        assert!(doc.is_empty());
        assert_eq!(doc.root(), None);
    }

    #[test]
    fn remove_stale_id() {
        let mut doc = Document::new();
        let id = doc.insert(NodeData::new("x"));
        doc.remove(id);
        assert!(doc.remove(id).is_none());
    }

    #[test]
    fn walk_is_document_order() {
        let (doc, body, rail, nav, c1, c2) = build_tree();
        assert_eq!(doc.walk_depth_first(body), vec![body, rail, c1, c2, nav]);
        assert_eq!(doc.walk_depth_first(rail), vec![rail, c1, c2]);
    }

    #[test]
    fn scroll_by_clamps_and_logs_request() {
        let (mut doc, _body, rail, ..) = build_tree();
        doc.scroll_by(rail, -324.0, ScrollBehavior::Smooth);
        assert_eq!(doc.get(rail).unwrap().scroll.offset, 0.0);
        doc.scroll_by(rail, 900.0, ScrollBehavior::Smooth);
        assert_eq!(doc.get(rail).unwrap().scroll.offset, 600.0);

        let log = doc.take_scroll_commands();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].delta(), Some(-324.0));
        assert_eq!(log[1].delta(), Some(900.0));
        assert!(doc.scroll_commands().is_empty());
    }

    #[test]
    fn scroll_by_clamps_against_resized_width() {
        let (mut doc, _body, rail, ..) = build_tree();
        doc.get_mut(rail).unwrap().width = 900.0;
        doc.scroll_by(rail, 500.0, ScrollBehavior::Smooth);
        let data = doc.get(rail).unwrap();
        assert_eq!(data.scroll.viewport_width, 900.0);
        assert_eq!(data.scroll.offset, 100.0);
    }

    #[test]
    fn scroll_into_view_is_logged() {
        let (mut doc, _body, _rail, nav, ..) = build_tree();
        doc.scroll_into_view(nav, ScrollBehavior::Smooth);
        assert_eq!(
            doc.scroll_commands(),
            &[ScrollCommand {
                node: nav,
                kind: ScrollKind::IntoView,
                behavior: ScrollBehavior::Smooth,
            }]
        );
        assert_eq!(doc.scroll_commands()[0].delta(), None);
        assert_eq!(doc.get(nav).unwrap().scroll.offset, 0.0);
    }

    #[test]
    fn scroll_by_unknown_node_is_ignored() {
        let mut doc = Document::new();
        let stale = doc.insert(NodeData::new("div"));
        doc.remove(stale);
        doc.scroll_by(stale, 10.0, ScrollBehavior::Instant);
        assert!(doc.scroll_commands().is_empty());
    }
}
