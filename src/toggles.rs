//! One-shot click handlers: mobile nav, choice selection, image fallback,
//! in-page anchor links.
//!
//! None of these keep state beyond the nodes they were bound to. Each handler
//! mutates visual state through a [`Surface`] and returns.

use crate::dom::{NodeId, ScrollBehavior, Selector};
use crate::surface::Surface;

/// Class hiding a node until toggled.
pub const HIDDEN_CLASS: &str = "hidden";

/// Class revealing a collapsed navbar.
pub const SHOW_CLASS: &str = "show";

// ---------------------------------------------------------------------------
// MobileNav
// ---------------------------------------------------------------------------

/// A menu shown and hidden by a toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileNav {
    pub toggle: NodeId,
    pub menu: NodeId,
    /// Class flipped on the menu.
    pub class: &'static str,
}

impl MobileNav {
    /// A menu that starts hidden and loses `hidden` when opened.
    pub fn hidden_menu(toggle: NodeId, menu: NodeId) -> Self {
        Self {
            toggle,
            menu,
            class: HIDDEN_CLASS,
        }
    }

    /// A collapsed navbar that gains `show` when opened.
    pub fn collapse(toggle: NodeId, menu: NodeId) -> Self {
        Self {
            toggle,
            menu,
            class: SHOW_CLASS,
        }
    }

    /// Flip the menu's class.
    pub fn toggle(&self, surface: &mut impl Surface) {
        surface.toggle_class(self.menu, self.class);
    }
}

// ---------------------------------------------------------------------------
// ChoiceGroup
// ---------------------------------------------------------------------------

/// One selectable choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub node: NodeId,
    pub label: String,
}

/// A set of mutually exclusive choice buttons with an optional feedback line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceGroup {
    pub form: NodeId,
    pub choices: Vec<Choice>,
    pub feedback: Option<NodeId>,
    /// Classes marking the selected choice.
    pub highlight: Vec<String>,
}

impl ChoiceGroup {
    /// Highlight the choice at `position` and describe it in the feedback line.
    pub fn select(&self, position: usize, surface: &mut impl Surface) {
        let Some(chosen) = self.choices.get(position) else {
            return;
        };
        for choice in &self.choices {
            for class in &self.highlight {
                surface.set_class(choice.node, class, false);
            }
        }
        for class in &self.highlight {
            surface.set_class(chosen.node, class, true);
        }

        if let Some(feedback) = self.feedback {
            surface.set_text(feedback, &feedback_text(&chosen.label));
            surface.set_class(feedback, HIDDEN_CLASS, false);
        }
    }
}

/// Feedback line shown after picking a choice.
pub fn feedback_text(label: &str) -> String {
    format!("You picked {label}. Submit to confirm!")
}

// ---------------------------------------------------------------------------
// ImageFallback
// ---------------------------------------------------------------------------

/// Replaces broken card images with a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFallback {
    /// Only images matching this are replaced.
    pub image: Selector,
    /// Cards whose images get the photo placeholder.
    pub photo_card: Selector,
    pub photo_placeholder: String,
    pub poster_placeholder: String,
}

impl Default for ImageFallback {
    fn default() -> Self {
        Self {
            image: Selector {
                tag: Some("img".into()),
                classes: vec!["card-img-top".into()],
                ..Selector::default()
            },
            photo_card: Selector::class("actor-card"),
            photo_placeholder: "https://via.placeholder.com/300x400/555/fff?text=No+Photo".into(),
            poster_placeholder: "https://via.placeholder.com/300x450/333/fff?text=No+Poster".into(),
        }
    }
}

impl ImageFallback {
    /// Handle a load error on `image`. Returns the placeholder applied, if any.
    pub fn on_error(&self, image: NodeId, surface: &mut impl Surface) -> Option<&str> {
        if !surface.matches(image, &self.image) {
            return None;
        }
        let placeholder = if surface.closest(image, &self.photo_card).is_some() {
            self.photo_placeholder.as_str()
        } else {
            self.poster_placeholder.as_str()
        };
        surface.set_attribute(image, "src", placeholder);
        Some(placeholder)
    }
}

// ---------------------------------------------------------------------------
// AnchorLink
// ---------------------------------------------------------------------------

/// A link whose `href` points at an element on the same page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorLink {
    pub node: NodeId,
    /// Target element id, without the leading `#`.
    pub target: String,
}

impl AnchorLink {
    /// Bind a link from its `href`. Only `#id` fragments qualify; a bare `#`
    /// names nothing.
    pub fn from_href(node: NodeId, href: &str) -> Option<Self> {
        let target = href.strip_prefix('#')?;
        if target.is_empty() {
            return None;
        }
        Some(Self {
            node,
            target: target.to_owned(),
        })
    }

    /// Smooth-scroll the target into view. Returns the target, if it exists.
    pub fn follow(&self, surface: &mut impl Surface) -> Option<NodeId> {
        let Some(target) = surface.element_by_id(&self.target) else {
            tracing::debug!(target_id = %self.target, "anchor target not found");
            return None;
        };
        surface.scroll_into_view(target, ScrollBehavior::Smooth);
        Some(target)
    }
}
