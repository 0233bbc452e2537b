//! Horizontal scroll state and the scroll command log.
//!
//! `ScrollState` tracks a node's horizontal scroll offset and clamps every
//! request to `[0, content_width - viewport_width]`. Requests are also kept as
//! [`ScrollCommand`]s so a host can replay them onto a real page.

use super::node::NodeId;

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// Tracks the horizontal scroll position of a scrollable node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Current scroll offset in pixels (always within `[0, max_scroll]`).
    pub offset: f64,
    /// Total width of the scrollable content.
    pub content_width: f64,
    /// Width of the visible viewport.
    pub viewport_width: f64,
}

impl ScrollState {
    /// Create a new scroll state with zero offset.
    pub fn new(content_width: f64, viewport_width: f64) -> Self {
        Self {
            offset: 0.0,
            content_width,
            viewport_width,
        }
    }

    /// The maximum scroll offset: `max(0, content_width - viewport_width)`.
    pub fn max_scroll(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Scroll to an absolute position, clamping to the valid range.
    pub fn scroll_to(&mut self, x: f64) {
        self.offset = x.clamp(0.0, self.max_scroll());
    }

    /// Scroll by a relative delta, clamping to the valid range.
    pub fn scroll_by(&mut self, dx: f64) {
        self.scroll_to(self.offset + dx);
    }

    /// Whether the content is wider than the viewport.
    pub fn is_scrollable(&self) -> bool {
        self.content_width > self.viewport_width
    }

    /// Scroll progress as a fraction in `[0.0, 1.0]`; 0.0 if not scrollable.
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_scroll();
        if max <= 0.0 {
            0.0
        } else {
            self.offset / max
        }
    }

    /// Update the content width and re-clamp the offset.
    pub fn set_content_width(&mut self, width: f64) {
        self.content_width = width;
        self.scroll_to(self.offset);
    }

    /// Update the viewport width and re-clamp the offset.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
        self.scroll_to(self.offset);
    }
}

// ---------------------------------------------------------------------------
// ScrollCommand
// ---------------------------------------------------------------------------

/// How the host should animate a scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Jump immediately.
    Instant,
    /// Let the host animate the transition.
    Smooth,
}

/// What a scroll request asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollKind {
    /// Scroll the node horizontally by a signed delta, as asked for before clamping.
    By(f64),
    /// Scroll the page so the node is visible.
    IntoView,
}

/// A recorded scroll request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub node: NodeId,
    pub kind: ScrollKind,
    pub behavior: ScrollBehavior,
}

impl ScrollCommand {
    /// The requested delta, for horizontal scrolls.
    pub fn delta(&self) -> Option<f64> {
        match self.kind {
            ScrollKind::By(delta) => Some(delta),
            ScrollKind::IntoView => None,
        }
    }
}
