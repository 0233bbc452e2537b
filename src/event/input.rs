//! Page input events.
//!
//! Defines [`PageEvent`] and its [`EventKind`]. Hosts translate their native
//! pointer and load events into these before handing them to a page.

use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// The kind of a page event, used as the listener lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    PointerEnter,
    PointerLeave,
    ImageError,
}

impl EventKind {
    /// Whether events of this kind propagate from the target to its ancestors.
    ///
    /// Pointer enter/leave fire on the element itself only.
    pub fn bubbles(self) -> bool {
        matches!(self, Self::Click)
    }
}

// ---------------------------------------------------------------------------
// PageEvent
// ---------------------------------------------------------------------------

/// An input event aimed at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageEvent {
    pub kind: EventKind,
    pub target: NodeId,
}

impl PageEvent {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self { kind, target }
    }

    /// A click on `target`.
    pub fn click(target: NodeId) -> Self {
        Self::new(EventKind::Click, target)
    }

    /// The pointer moved into `target`'s bounds.
    pub fn pointer_enter(target: NodeId) -> Self {
        Self::new(EventKind::PointerEnter, target)
    }

    /// The pointer left `target`'s bounds.
    pub fn pointer_leave(target: NodeId) -> Self {
        Self::new(EventKind::PointerLeave, target)
    }

    /// An image failed to load.
    pub fn image_error(target: NodeId) -> Self {
        Self::new(EventKind::ImageError, target)
    }
}
