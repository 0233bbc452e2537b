//! Pilot: programmatic interaction with a headless [`Page`].
//!
//! The `Pilot` loads a page from a document and offers marker-based helpers to
//! simulate clicks, hover, image errors and elapsed time, plus shortcuts to
//! inspect the result.

use std::time::Duration;

use crate::config::{ConfigError, PageConfig};
use crate::dom::{Document, NodeData, NodeId, ScrollCommand, ScrollKind};
use crate::event::PageEvent;
use crate::page::Page;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless page driver for testing.
///
/// # Examples
///
/// ```ignore
/// use slide_rail::testing::Pilot;
///
/// let mut pilot = Pilot::new(document);
/// pilot.click_marker("data-carousel-next");
/// pilot.advance_ms(6_000);
/// assert_eq!(pilot.active_slide(), Some(2));
/// ```
#[derive(Debug)]
pub struct Pilot {
    page: Page,
}

impl Pilot {
    /// Load `document` with the default configuration.
    pub fn new(document: Document) -> Self {
        Self {
            page: Page::new(document),
        }
    }

    /// Load `document` with a custom configuration.
    pub fn with_config(document: Document, config: &PageConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            page: Page::load(document, config)?,
        })
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// First node carrying `marker`, in document order.
    pub fn find_marker(&self, marker: &str) -> Option<NodeId> {
        self.page.document().query_first(|d| d.has_attr(marker))
    }

    /// First node whose attribute `name` equals `value`.
    pub fn find_attr(&self, name: &str, value: &str) -> Option<NodeId> {
        self.page.document().query_by_attr_value(name, value)
    }

    /// Data of a node.
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.page.document().get(id)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Click a node.
    pub fn click(&mut self, node: NodeId) {
        self.page.dispatch(PageEvent::click(node));
    }

    /// Click the first node carrying `marker`. Returns whether one was found.
    pub fn click_marker(&mut self, marker: &str) -> bool {
        match self.find_marker(marker) {
            Some(node) => {
                self.click(node);
                true
            }
            None => false,
        }
    }

    /// Click the first node whose attribute `name` equals `value`.
    pub fn click_attr(&mut self, name: &str, value: &str) -> bool {
        match self.find_attr(name, value) {
            Some(node) => {
                self.click(node);
                true
            }
            None => false,
        }
    }

    /// Move the pointer into a node.
    pub fn hover(&mut self, node: NodeId) {
        self.page.dispatch(PageEvent::pointer_enter(node));
    }

    /// Move the pointer out of a node.
    pub fn unhover(&mut self, node: NodeId) {
        self.page.dispatch(PageEvent::pointer_leave(node));
    }

    /// Report a failed image load.
    pub fn fail_image(&mut self, node: NodeId) {
        self.page.dispatch(PageEvent::image_error(node));
    }

    /// Let `ms` milliseconds of simulated time pass.
    pub fn advance_ms(&mut self, ms: u64) {
        self.page.advance(Duration::from_millis(ms));
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Index of the visible carousel slide, if the page has a carousel.
    pub fn active_slide(&self) -> Option<usize> {
        self.page.carousel().map(|c| c.active_index())
    }

    /// Current horizontal scroll offset of the rail keyed `key`.
    pub fn rail_offset(&self, key: &str) -> Option<f64> {
        let rail = self.page.rails().registry().resolve(key)?;
        self.node(rail).map(|d| d.scroll.offset)
    }

    /// Deltas of every horizontal scroll requested so far, oldest first.
    pub fn scroll_deltas(&self) -> Vec<f64> {
        self.page
            .document()
            .scroll_commands()
            .iter()
            .filter_map(ScrollCommand::delta)
            .collect()
    }

    /// Nodes brought into view so far, oldest first.
    pub fn revealed(&self) -> Vec<NodeId> {
        self.page
            .document()
            .scroll_commands()
            .iter()
            .filter(|c| c.kind == ScrollKind::IntoView)
            .map(|c| c.node)
            .collect()
    }

    /// Borrow the underlying page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Borrow the underlying page mutably.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Dump the document as text.
    pub fn snapshot(&self) -> String {
        super::snapshot::document_to_string(self.page.document())
    }
}
