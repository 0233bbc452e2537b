//! Document queries: markers, selectors, ancestor matching.
//!
//! All queries walk the tree from the root in document order, so the first
//! match is the one a browser's `querySelector` would return.

use super::node::{NodeData, NodeId};
use super::selector::Selector;
use super::tree::Document;

impl Document {
    /// Find the first node in document order whose `id` matches.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_first(|data| data.id.as_deref() == Some(id))
    }

    /// Find all nodes carrying the given class, in document order.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// Find all nodes carrying the given attribute (any value), in document order.
    pub fn query_by_attr(&self, name: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_attr(name))
    }

    /// Find the first node whose attribute `name` equals `value`.
    pub fn query_by_attr_value(&self, name: &str, value: &str) -> Option<NodeId> {
        self.query_first(|data| data.attr(name) == Some(value))
    }

    /// Find all nodes under the root matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| self.nodes.get(id).is_some_and(&predicate))
            .collect()
    }

    /// Find the first node under the root matching a predicate.
    pub fn query_first(&self, predicate: impl Fn(&NodeData) -> bool) -> Option<NodeId> {
        let root = self.root()?;
        self.walk_depth_first(root)
            .into_iter()
            .find(|&id| self.nodes.get(id).is_some_and(&predicate))
    }

    /// All strict descendants of `scope` matching `selector`, in document order.
    pub fn select_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.walk_depth_first(scope)
            .into_iter()
            .skip(1)
            .filter(|&id| self.nodes.get(id).is_some_and(|d| selector.matches(d)))
            .collect()
    }

    /// First strict descendant of `scope` matching `selector`.
    pub fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.walk_depth_first(scope)
            .into_iter()
            .skip(1)
            .find(|&id| self.nodes.get(id).is_some_and(|d| selector.matches(d)))
    }

    /// `node` itself or its nearest ancestor matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        if !self.contains(node) {
            return None;
        }
        std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|&id| self.nodes.get(id).is_some_and(|d| selector.matches(d)))
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::NodeData;
    use crate::dom::selector::Selector;
    use crate::dom::tree::Document;

    /// ```text
    /// body
    /// ├── section [data-rail=trending]
    /// │   ├── div.rail-card
    /// │   └── article#first
    /// ├── section [data-rail=classics]
    /// │   └── article.actor-card
    /// │       └── img.card-img-top
    /// └── button [data-rail-nav]
    /// ```
    fn build_query_doc() -> Document {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let trending = doc.insert_child(body, NodeData::new("section").with_attr("data-rail", "trending"));
        doc.insert_child(trending, NodeData::new("div").with_class("rail-card"));
        doc.insert_child(trending, NodeData::new("article").with_id("first"));
        let classics = doc.insert_child(body, NodeData::new("section").with_attr("data-rail", "classics"));
        let card = doc.insert_child(classics, NodeData::new("article").with_class("actor-card"));
        doc.insert_child(card, NodeData::new("img").with_class("card-img-top"));
        doc.insert_child(body, NodeData::new("button").with_marker("data-rail-nav"));
        doc
    }

    #[test]
    fn query_by_attr_in_document_order() {
        let doc = build_query_doc();
        let rails = doc.query_by_attr("data-rail");
        let keys: Vec<_> = rails
            .iter()
            .map(|&id| doc.get(id).unwrap().attr("data-rail").unwrap())
            .collect();
        assert_eq!(keys, vec!["trending", "classics"]);
    }

    #[test]
    fn query_by_attr_value() {
        let doc = build_query_doc();
        let rail = doc.query_by_attr_value("data-rail", "classics").unwrap();
        assert_eq!(doc.get(rail).unwrap().tag, "section");
        assert!(doc.query_by_attr_value("data-rail", "missing").is_none());
    }

    #[test]
    fn query_by_id_and_class() {
        let doc = build_query_doc();
        assert!(doc.query_by_id("first").is_some());
        assert!(doc.query_by_id("nope").is_none());
        assert_eq!(doc.query_by_class("card-img-top").len(), 1);
    }

    #[test]
    fn select_first_prefers_document_order() {
        let doc = build_query_doc();
        let trending = doc.query_by_attr_value("data-rail", "trending").unwrap();
        let article = doc.select_first(trending, &Selector::tag("article")).unwrap();
        assert_eq!(doc.get(article).unwrap().id.as_deref(), Some("first"));
        let card = doc.select_first(trending, &Selector::class("rail-card")).unwrap();
        assert_eq!(doc.get(card).unwrap().tag, "div");
    }

    #[test]
    fn select_excludes_scope() {
        let doc = build_query_doc();
        let trending = doc.query_by_attr_value("data-rail", "trending").unwrap();
        assert!(doc.select_first(trending, &Selector::tag("section")).is_none());
        assert!(doc.select_all(trending, &Selector::tag("section")).is_empty());
    }

    #[test]
    fn closest_includes_self_and_ancestors() {
        let doc = build_query_doc();
        let img = doc.query_by_class("card-img-top")[0];
        let card = doc.closest(img, &Selector::class("actor-card")).unwrap();
        assert_eq!(doc.get(card).unwrap().tag, "article");
        assert_eq!(doc.closest(img, &Selector::tag("img")), Some(img));
        assert!(doc.closest(img, &Selector::class("movie-card")).is_none());
    }

    #[test]
    fn detached_nodes_are_not_queried() {
        let mut doc = build_query_doc();
        doc.insert(NodeData::new("div").with_marker("data-carousel"));
        assert!(doc.query_by_attr("data-carousel").is_empty());
    }

    #[test]
    fn queries_on_empty_document() {
        let doc = Document::new();
        assert!(doc.query_by_id("x").is_none());
        assert!(doc.query_by_attr("data-rail").is_empty());
        assert!(doc.query_all(|_| true).is_empty());
    }
}
