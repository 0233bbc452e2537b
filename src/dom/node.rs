//! Node types: NodeId, NodeData.

use std::collections::BTreeMap;

use slotmap::new_key_type;

use super::scroll::ScrollState;

new_key_type! {
    /// Unique identifier for a document node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single document node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Lowercase tag name (e.g. "section", "button", "img").
    pub tag: String,
    /// Optional unique id (`#id` selector).
    pub id: Option<String>,
    /// Class list, in insertion order.
    pub classes: Vec<String>,
    /// Attributes, including the `data-*` markers read by discovery.
    pub attributes: BTreeMap<String, String>,
    /// Text content, if the node carries any.
    pub text: Option<String>,
    /// Measured layout width in pixels.
    pub width: f64,
    /// Horizontal scroll state. Its viewport is re-synced from `width` on
    /// every scroll and by [`NodeData::set_width`].
    pub scroll: ScrollState,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag and zero geometry.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: None,
            width: 0.0,
            scroll: ScrollState::default(),
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.add_class(&class);
        self
    }

    /// Add multiple classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            let class = class.into();
            self.add_class(&class);
        }
        self
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set a valueless marker attribute such as `data-carousel` (builder).
    pub fn with_marker(self, name: impl Into<String>) -> Self {
        self.with_attr(name, "")
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the measured width (builder). The scroll viewport follows it.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self.scroll.set_viewport_width(width);
        self
    }

    /// Record a new measured width, keeping the scroll viewport in step.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.scroll.set_viewport_width(width);
    }

    /// Set the scrollable content width (builder).
    pub fn with_content_width(mut self, content_width: f64) -> Self {
        self.scroll.set_content_width(content_width);
        self
    }

    /// Check whether this node has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a class: add if absent, remove if present.
    pub fn toggle_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the attribute is present, with any value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_owned(), value.to_owned());
    }
}
