//! Event dispatch: input queue and propagation path computation.
//!
//! [`EventDispatcher`] maintains a FIFO of [`PageEvent`]s. The
//! [`EventDispatcher::propagation_path`] function computes the nodes whose
//! listeners see an event: the target alone for non-bubbling kinds, the target
//! and every ancestor up to the root for bubbling ones.

use std::collections::VecDeque;

use super::input::PageEvent;
use crate::dom::{Document, NodeId};

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Queue-based event dispatcher.
///
/// The dispatcher does not route events itself; the page drains the queue and
/// walks each event along its propagation path, one event to completion at a
/// time.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    queue: VecDeque<PageEvent>,
}

impl EventDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event for later processing.
    pub fn push(&mut self, event: PageEvent) {
        self.queue.push_back(event);
    }

    /// Take the oldest pending event.
    pub fn pop(&mut self) -> Option<PageEvent> {
        self.queue.pop_front()
    }

    /// Number of pending events.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Nodes that see `event`, target first.
    ///
    /// Returns an empty vec if the target does not exist in the document.
    pub fn propagation_path(doc: &Document, event: &PageEvent) -> Vec<NodeId> {
        if !doc.contains(event.target) {
            return Vec::new();
        }
        let mut path = vec![event.target];
        if event.kind.bubbles() {
            path.extend(doc.ancestors(event.target));
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;

    /// ```text
    ///   body
    ///    └── button
    ///         └── svg
    /// ```
    fn build_tree() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let button = doc.insert_child(body, NodeData::new("button"));
        let icon = doc.insert_child(button, NodeData::new("svg"));
        (doc, body, button, icon)
    }

    #[test]
    fn queue_is_fifo() {
        let (_, body, button, _) = build_tree();
        let mut disp = EventDispatcher::new();
        disp.push(PageEvent::click(body));
        disp.push(PageEvent::click(button));
        assert_eq!(disp.pending_count(), 2);
        assert_eq!(disp.pop(), Some(PageEvent::click(body)));
        assert_eq!(disp.pop(), Some(PageEvent::click(button)));
        assert_eq!(disp.pop(), None);
        assert!(disp.is_empty());
    }

    #[test]
    fn click_bubbles_to_root() {
        let (doc, body, button, icon) = build_tree();
        let path = EventDispatcher::propagation_path(&doc, &PageEvent::click(icon));
        assert_eq!(path, vec![icon, button, body]);
    }

    #[test]
    fn pointer_events_stay_on_target() {
        let (doc, _, button, _) = build_tree();
        let path = EventDispatcher::propagation_path(&doc, &PageEvent::pointer_enter(button));
        assert_eq!(path, vec![button]);
    }

    #[test]
    fn stale_target_has_empty_path() {
        let (mut doc, ..) = build_tree();
        let stale = doc.insert(NodeData::new("ghost"));
        doc.remove(stale);
        assert!(EventDispatcher::propagation_path(&doc, &PageEvent::click(stale)).is_empty());
    }
}
