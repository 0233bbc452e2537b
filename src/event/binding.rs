//! Listener registry.
//!
//! [`ListenerRegistry`] maps a node and an [`EventKind`] to the
//! [`Listener`]s bound there during page load. Bindings are permanent for the
//! page's lifetime; there is no unbind.

use std::collections::HashMap;

use super::input::EventKind;
use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// Listener
// ---------------------------------------------------------------------------

/// What a bound node does when its event fires.
///
/// Positional payloads index into the owning controller's anchor lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    CarouselPrevious,
    CarouselNext,
    /// Jump via the control at this position.
    CarouselJump(usize),
    CarouselPause,
    CarouselResume,
    /// Activate the rail button at this position.
    RailStep(usize),
    MobileNavToggle,
    /// Select the choice at this position.
    ChoiceSelect(usize),
    ImageFallback,
    /// Follow the in-page anchor link at this position.
    AnchorScroll(usize),
}

// ---------------------------------------------------------------------------
// ListenerRegistry
// ---------------------------------------------------------------------------

/// Registry of listeners, keyed by (node, event kind).
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    listeners: HashMap<(NodeId, EventKind), Vec<Listener>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a listener. Multiple listeners on the same key run in bind order.
    pub fn listen(&mut self, node: NodeId, kind: EventKind, listener: Listener) {
        self.listeners.entry((node, kind)).or_default().push(listener);
    }

    /// Listeners bound to `node` for `kind`.
    pub fn listeners(&self, node: NodeId, kind: EventKind) -> &[Listener] {
        self.listeners
            .get(&(node, kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of bound listeners.
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
