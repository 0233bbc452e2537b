//! The mutation seam between controllers and the page.
//!
//! Controllers never hold a document. They receive a [`Surface`] for the
//! duration of one handler and issue class, attribute, text and scroll
//! requests through it. [`Document`] is the in-memory implementation; a host
//! binding to a real page implements the same trait.

use crate::dom::{Document, NodeId, ScrollBehavior, Selector};

/// Read-measure-mutate operations the controllers need from a page.
///
/// Every method tolerates unknown nodes: reads return `None`/`false` and
/// writes do nothing.
pub trait Surface {
    /// Add (`present = true`) or remove a class.
    fn set_class(&mut self, node: NodeId, class: &str, present: bool);

    /// Flip a class.
    fn toggle_class(&mut self, node: NodeId, class: &str);

    /// Whether the node carries a class.
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Set an attribute value.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Replace the node's text content.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Measured layout width in pixels.
    fn measure_width(&self, node: NodeId) -> Option<f64>;

    /// Whether the node itself matches `selector`.
    fn matches(&self, node: NodeId, selector: &Selector) -> bool;

    /// First strict descendant of `scope` matching `selector`.
    fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId>;

    /// `node` or its nearest ancestor matching `selector`.
    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId>;

    /// First node in document order with the given id.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Scroll horizontally by a signed pixel delta. Must clamp, never fail.
    fn scroll_by(&mut self, node: NodeId, delta: f64, behavior: ScrollBehavior);

    /// Scroll the page until the node is visible.
    fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior);
}

impl Surface for Document {
    fn set_class(&mut self, node: NodeId, class: &str, present: bool) {
        if let Some(data) = self.get_mut(node) {
            if present {
                data.add_class(class);
            } else {
                data.remove_class(class);
            }
        }
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.get_mut(node) {
            data.toggle_class(class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|d| d.has_class(class))
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.get_mut(node) {
            data.set_attr(name, value);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(data) = self.get_mut(node) {
            data.text = Some(text.to_owned());
        }
    }

    fn measure_width(&self, node: NodeId) -> Option<f64> {
        self.get(node).map(|d| d.width)
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.get(node).is_some_and(|d| selector.matches(d))
    }

    fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        Document::select_first(self, scope, selector)
    }

    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        Document::closest(self, node, selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_by_id(id)
    }

    fn scroll_by(&mut self, node: NodeId, delta: f64, behavior: ScrollBehavior) {
        Document::scroll_by(self, node, delta, behavior);
    }

    fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior) {
        Document::scroll_into_view(self, node, behavior);
    }
}
