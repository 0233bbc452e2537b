//! Discovery pass: turns declarative markers into anchor sets.
//!
//! Each function looks for one controller's anchors and returns `None` (or an
//! empty collection) when they are absent. Absence is never an error; the page
//! simply does not bind that controller.

use crate::carousel::{CarouselAnchors, SlideControl};
use crate::config::Markers;
use crate::dom::{Document, NodeId, Selector};
use crate::rail::{RailButton, RailRegistry};
use crate::toggles::{AnchorLink, Choice, ChoiceGroup, MobileNav};

/// Class of the button opening a collapsed navbar.
pub const NAVBAR_TOGGLER_CLASS: &str = "navbar-toggler";
/// Class of the collapsed navbar itself.
pub const NAVBAR_COLLAPSE_CLASS: &str = "navbar-collapse";

/// Anchors for the first carousel root in document order.
///
/// Slides, controls and the previous/next buttons are searched inside the root
/// only. A control whose index attribute is missing or not an integer targets
/// its own position.
pub fn find_carousel(doc: &Document, markers: &Markers) -> Option<CarouselAnchors> {
    let Some(container) = doc.query_by_attr(&markers.carousel).into_iter().next() else {
        tracing::debug!(marker = %markers.carousel, "no carousel root");
        return None;
    };

    let slides = doc.select_all(container, &Selector::attr(&markers.slide));
    let controls = doc
        .select_all(container, &Selector::attr(&markers.slide_nav))
        .into_iter()
        .enumerate()
        .map(|(position, node)| SlideControl {
            node,
            index: doc
                .get(node)
                .and_then(|d| d.attr(&markers.slide_nav))
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(position as i64),
        })
        .collect();
    let previous = doc.select_first(container, &Selector::attr(&markers.carousel_prev));
    let next = doc.select_first(container, &Selector::attr(&markers.carousel_next));

    tracing::debug!(slides = slides.len(), "carousel discovered");
    Some(CarouselAnchors {
        container,
        slides,
        controls,
        previous,
        next,
    })
}

/// Every rail in the document, keyed by its marker value.
pub fn find_rails(doc: &Document, markers: &Markers) -> RailRegistry {
    let mut registry = RailRegistry::new();
    for node in doc.query_by_attr(&markers.rail) {
        if let Some(key) = doc.get(node).and_then(|d| d.attr(&markers.rail)) {
            registry.register(key, node);
        }
    }
    registry
}

/// Every rail navigation button, bound to its target key and direction.
///
/// A button without a target key is still bound; it resolves to no rail.
pub fn find_rail_buttons(doc: &Document, markers: &Markers) -> Vec<RailButton> {
    doc.query_by_attr(&markers.rail_nav)
        .into_iter()
        .filter_map(|node| {
            let data = doc.get(node)?;
            let target = data.attr(&markers.rail_target).unwrap_or_default();
            Some(RailButton::bind(node, target, data.attr(&markers.direction)))
        })
        .collect()
}

/// The mobile nav toggle and menu, if both exist.
///
/// Marked nav pairs take precedence. Without them, a `.navbar-toggler` and the
/// first `.navbar-collapse` form a collapse nav.
pub fn find_mobile_nav(doc: &Document, markers: &Markers) -> Option<MobileNav> {
    let marked = doc
        .query_first(|d| d.has_attr(&markers.mobile_toggle))
        .zip(doc.query_first(|d| d.has_attr(&markers.mobile_menu)));
    if let Some((toggle, menu)) = marked {
        return Some(MobileNav::hidden_menu(toggle, menu));
    }

    let toggle = doc.query_first(|d| d.has_class(NAVBAR_TOGGLER_CLASS))?;
    let menu = doc.query_first(|d| d.has_class(NAVBAR_COLLAPSE_CLASS))?;
    Some(MobileNav::collapse(toggle, menu))
}

/// The choice form with its choices and feedback line.
pub fn find_choices(doc: &Document, markers: &Markers, highlight: &[String]) -> Option<ChoiceGroup> {
    let form = doc.query_first(|d| d.has_attr(&markers.choice_form))?;
    let choices = doc
        .select_all(form, &Selector::attr(&markers.choice))
        .into_iter()
        .map(|node| Choice {
            node,
            label: doc
                .get(node)
                .and_then(|d| d.attr(&markers.choice_label))
                .unwrap_or_default()
                .to_owned(),
        })
        .collect();
    let feedback = doc.select_first(form, &Selector::attr(&markers.feedback));
    Some(ChoiceGroup {
        form,
        choices,
        feedback,
        highlight: highlight.to_vec(),
    })
}

/// Every `a` whose `href` is an in-page `#id` fragment, in document order.
pub fn find_anchor_links(doc: &Document) -> Vec<AnchorLink> {
    doc.query_all(|d| d.tag == "a")
        .into_iter()
        .filter_map(|node| AnchorLink::from_href(node, doc.get(node)?.attr("href")?))
        .collect()
}

/// Every `img` in the document.
pub fn find_images(doc: &Document) -> Vec<NodeId> {
    doc.query_all(|d| d.tag == "img")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;
    use crate::rail::Direction;
    use pretty_assertions::assert_eq;

    fn markers() -> Markers {
        Markers::default()
    }

    #[test]
    fn carousel_absent() {
        let mut doc = Document::new();
        doc.insert(NodeData::new("body"));
        assert_eq!(find_carousel(&doc, &markers()), None);
    }

    #[test]
    fn carousel_anchors_in_document_order() {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let root = doc.insert_child(body, NodeData::new("section").with_marker("data-carousel"));
        let s0 = doc.insert_child(root, NodeData::new("div").with_marker("data-slide"));
        let s1 = doc.insert_child(root, NodeData::new("div").with_marker("data-slide"));
        let dots = doc.insert_child(root, NodeData::new("div"));
        let c0 = doc.insert_child(dots, NodeData::new("button").with_attr("data-slide-nav", "1"));
        let c1 = doc.insert_child(dots, NodeData::new("button").with_attr("data-slide-nav", "zero"));
        let prev = doc.insert_child(root, NodeData::new("button").with_marker("data-carousel-prev"));
        // Outside the root: ignored.
        doc.insert_child(body, NodeData::new("div").with_marker("data-slide"));

        let anchors = find_carousel(&doc, &markers()).unwrap();
        assert_eq!(anchors.container, root);
        assert_eq!(anchors.slides, vec![s0, s1]);
        assert_eq!(
            anchors.controls,
            vec![
                SlideControl { node: c0, index: 1 },
                SlideControl { node: c1, index: 1 },
            ]
        );
        assert_eq!(anchors.previous, Some(prev));
        assert_eq!(anchors.next, None);
    }

    #[test]
    fn rails_and_buttons() {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let trending = doc.insert_child(body, NodeData::new("div").with_attr("data-rail", "trending"));
        let next = doc.insert_child(
            body,
            NodeData::new("button")
                .with_marker("data-rail-nav")
                .with_attr("data-rail-target", "trending")
                .with_attr("data-direction", "next"),
        );
        let prev = doc.insert_child(
            body,
            NodeData::new("button")
                .with_marker("data-rail-nav")
                .with_attr("data-rail-target", "trending"),
        );

        let rails = find_rails(&doc, &markers());
        assert_eq!(rails.resolve("trending"), Some(trending));

        let buttons = find_rail_buttons(&doc, &markers());
        assert_eq!(
            buttons,
            vec![
                RailButton {
                    node: next,
                    target: "trending".into(),
                    direction: Direction::Next
                },
                RailButton {
                    node: prev,
                    target: "trending".into(),
                    direction: Direction::Previous
                },
            ]
        );
    }

    #[test]
    fn mobile_nav_needs_both_parts() {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        doc.insert_child(body, NodeData::new("button").with_marker("data-mobile-toggle"));
        assert_eq!(find_mobile_nav(&doc, &markers()), None);

        let menu = doc.insert_child(body, NodeData::new("nav").with_marker("data-mobile-menu"));
        assert_eq!(find_mobile_nav(&doc, &markers()).map(|n| n.menu), Some(menu));
    }

    #[test]
    fn collapse_nav_is_the_fallback() {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let toggle = doc.insert_child(body, NodeData::new("button").with_class("navbar-toggler"));
        let collapse = doc.insert_child(body, NodeData::new("div").with_class("navbar-collapse"));
        assert_eq!(
            find_mobile_nav(&doc, &markers()),
            Some(MobileNav::collapse(toggle, collapse))
        );

        let marked_toggle =
            doc.insert_child(body, NodeData::new("button").with_marker("data-mobile-toggle"));
        let marked_menu = doc.insert_child(body, NodeData::new("nav").with_marker("data-mobile-menu"));
        assert_eq!(
            find_mobile_nav(&doc, &markers()),
            Some(MobileNav::hidden_menu(marked_toggle, marked_menu))
        );
    }

    #[test]
    fn anchor_links_need_a_fragment() {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let top = doc.insert_child(body, NodeData::new("a").with_attr("href", "#top"));
        doc.insert_child(body, NodeData::new("a").with_attr("href", "#"));
        doc.insert_child(body, NodeData::new("a").with_attr("href", "/movies"));
        doc.insert_child(body, NodeData::new("a"));
        doc.insert_child(body, NodeData::new("button").with_attr("href", "#cast"));

        let links = find_anchor_links(&doc);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].node, top);
        assert_eq!(links[0].target, "top");
    }

    #[test]
    fn choices_with_labels() {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let form = doc.insert_child(body, NodeData::new("form").with_marker("data-game-form"));
        doc.insert_child(
            form,
            NodeData::new("button")
                .with_marker("data-choice")
                .with_attr("data-choice-label", "Heat"),
        );
        doc.insert_child(form, NodeData::new("button").with_marker("data-choice"));
        let feedback = doc.insert_child(form, NodeData::new("p").with_marker("data-feedback"));

        let group = find_choices(&doc, &markers(), &["ring-2".to_string()]).unwrap();
        let labels: Vec<_> = group.choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Heat", ""]);
        assert_eq!(group.feedback, Some(feedback));
        assert_eq!(group.highlight, vec!["ring-2"]);
    }

    #[test]
    fn images_found_anywhere() {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let card = doc.insert_child(body, NodeData::new("div"));
        let img = doc.insert_child(card, NodeData::new("img"));
        assert_eq!(find_images(&doc), vec![img]);
    }
}
