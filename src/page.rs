//! Page: discovery, listener wiring, event routing and the clock.
//!
//! [`Page`] ties together the document, the controllers found in it, the
//! listener registry, the event queue and the virtual clock. It is the only
//! owner of mutable state; controllers borrow the document for one handler at
//! a time.

use std::time::Duration;

use crate::carousel::Carousel;
use crate::clock::VirtualClock;
use crate::config::{ConfigError, PageConfig, ResolvedConfig};
use crate::discovery;
use crate::dom::Document;
use crate::event::{EventDispatcher, EventKind, Listener, ListenerRegistry, PageEvent};
use crate::rail::RailController;
use crate::toggles::{AnchorLink, ChoiceGroup, ImageFallback, MobileNav};

/// A loaded page with every controller whose anchors were found.
#[derive(Debug)]
pub struct Page {
    document: Document,
    clock: VirtualClock,
    listeners: ListenerRegistry,
    dispatcher: EventDispatcher,
    carousel: Option<Carousel>,
    rails: RailController,
    mobile_nav: Option<MobileNav>,
    choices: Option<ChoiceGroup>,
    image_fallback: ImageFallback,
    anchor_links: Vec<AnchorLink>,
}

impl Page {
    /// Load a page with the default configuration.
    pub fn new(document: Document) -> Self {
        let config = PageConfig::default()
            .validate()
            .expect("default page config is valid");
        Self::from_resolved(document, config)
    }

    /// Validate `config`, discover anchors and bind every controller found.
    pub fn load(document: Document, config: &PageConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_resolved(document, config.validate()?))
    }

    fn from_resolved(mut document: Document, config: ResolvedConfig) -> Self {
        let mut clock = VirtualClock::new();
        let mut listeners = ListenerRegistry::new();
        let markers = &config.markers;

        let carousel = discovery::find_carousel(&document, markers).map(|anchors| {
            listeners.listen(anchors.container, EventKind::PointerEnter, Listener::CarouselPause);
            listeners.listen(anchors.container, EventKind::PointerLeave, Listener::CarouselResume);
            for (position, control) in anchors.controls.iter().enumerate() {
                listeners.listen(control.node, EventKind::Click, Listener::CarouselJump(position));
            }
            if let Some(previous) = anchors.previous {
                listeners.listen(previous, EventKind::Click, Listener::CarouselPrevious);
            }
            if let Some(next) = anchors.next {
                listeners.listen(next, EventKind::Click, Listener::CarouselNext);
            }
            Carousel::init(
                anchors,
                config.slide_classes.clone(),
                config.autoplay_interval,
                &mut document,
                &mut clock,
            )
        });

        let registry = discovery::find_rails(&document, markers);
        let buttons = discovery::find_rail_buttons(&document, markers);
        for (position, button) in buttons.iter().enumerate() {
            listeners.listen(button.node, EventKind::Click, Listener::RailStep(position));
        }
        let rails = RailController::new(registry, buttons, config.step.clone());

        let mobile_nav = discovery::find_mobile_nav(&document, markers);
        if let Some(nav) = &mobile_nav {
            listeners.listen(nav.toggle, EventKind::Click, Listener::MobileNavToggle);
        }

        let choices = discovery::find_choices(&document, markers, &config.choice_highlight);
        if let Some(group) = &choices {
            for (position, choice) in group.choices.iter().enumerate() {
                listeners.listen(choice.node, EventKind::Click, Listener::ChoiceSelect(position));
            }
        }

        let anchor_links = discovery::find_anchor_links(&document);
        for (position, link) in anchor_links.iter().enumerate() {
            listeners.listen(link.node, EventKind::Click, Listener::AnchorScroll(position));
        }

        for image in discovery::find_images(&document) {
            listeners.listen(image, EventKind::ImageError, Listener::ImageFallback);
        }

        tracing::debug!(
            carousel = carousel.is_some(),
            rails = rails.registry().len(),
            rail_buttons = rails.buttons().len(),
            mobile_nav = mobile_nav.is_some(),
            choices = choices.is_some(),
            anchor_links = anchor_links.len(),
            listeners = listeners.len(),
            "page loaded"
        );

        Self {
            document,
            clock,
            listeners,
            dispatcher: EventDispatcher::new(),
            carousel,
            rails,
            mobile_nav,
            choices,
            image_fallback: config.image_fallback,
            anchor_links,
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Queue an event without processing it.
    pub fn handle_event(&mut self, event: PageEvent) {
        self.dispatcher.push(event);
    }

    /// Process every queued event, one to completion at a time.
    pub fn process(&mut self) {
        while let Some(event) = self.dispatcher.pop() {
            for node in EventDispatcher::propagation_path(&self.document, &event) {
                // Copied out: a listener may not observe bindings changing mid-walk.
                let bound = self.listeners.listeners(node, event.kind).to_vec();
                for listener in bound {
                    self.run(listener, &event);
                }
            }
        }
    }

    /// Queue and process a single event.
    pub fn dispatch(&mut self, event: PageEvent) {
        self.handle_event(event);
        self.process();
    }

    fn run(&mut self, listener: Listener, event: &PageEvent) {
        let doc = &mut self.document;
        match listener {
            Listener::CarouselPrevious => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.previous(doc);
                }
            }
            Listener::CarouselNext => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.next(doc);
                }
            }
            Listener::CarouselJump(position) => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.jump(position, doc);
                }
            }
            Listener::CarouselPause => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.pause(&mut self.clock);
                }
            }
            Listener::CarouselResume => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.resume(&mut self.clock);
                }
            }
            Listener::RailStep(position) => {
                self.rails.activate(position, doc);
            }
            Listener::MobileNavToggle => {
                if let Some(nav) = &self.mobile_nav {
                    nav.toggle(doc);
                }
            }
            Listener::ChoiceSelect(position) => {
                if let Some(group) = &self.choices {
                    group.select(position, doc);
                }
            }
            Listener::ImageFallback => {
                self.image_fallback.on_error(event.target, doc);
            }
            Listener::AnchorScroll(position) => {
                if let Some(link) = self.anchor_links.get(position) {
                    link.follow(doc);
                }
            }
        }
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Advance the clock by `by`, running every timer firing in order.
    pub fn advance(&mut self, by: Duration) {
        self.advance_to(self.clock.now() + by);
    }

    /// Advance the clock to `at` (time since load). Earlier instants are a no-op.
    pub fn advance_to(&mut self, at: Duration) {
        while let Some(id) = self.clock.pop_due(at) {
            let claimed = self
                .carousel
                .as_mut()
                .is_some_and(|c| c.on_timer(id, &mut self.document));
            if !claimed {
                tracing::debug!(?id, "timer fired with no owner");
            }
        }
        self.clock.set_now(at);
    }

    /// The next instant at which a timer fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.clock.next_due()
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn rails(&self) -> &RailController {
        &self.rails
    }

    pub fn mobile_nav(&self) -> Option<&MobileNav> {
        self.mobile_nav.as_ref()
    }

    pub fn anchor_links(&self) -> &[AnchorLink] {
        &self.anchor_links
    }

    pub fn choices(&self) -> Option<&ChoiceGroup> {
        self.choices.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Scheduler;
    use crate::dom::{NodeData, NodeId};
    use pretty_assertions::assert_eq;

    /// Body with a four-slide carousel (prev/next + dot controls) and nothing else.
    fn carousel_page() -> (Page, NodeId, NodeId, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let body = doc.insert(NodeData::new("body"));
        let root = doc.insert_child(body, NodeData::new("section").with_marker("data-carousel"));
        for _ in 0..4 {
            doc.insert_child(root, NodeData::new("div").with_marker("data-slide"));
        }
        let controls = (0..4)
            .map(|i| {
                doc.insert_child(
                    root,
                    NodeData::new("button").with_attr("data-slide-nav", i.to_string()),
                )
            })
            .collect();
        let prev = doc.insert_child(root, NodeData::new("button").with_marker("data-carousel-prev"));
        let next = doc.insert_child(root, NodeData::new("button").with_marker("data-carousel-next"));
        (Page::new(doc), root, prev, next, controls)
    }

    fn active(page: &Page) -> usize {
        page.carousel().unwrap().active_index()
    }

    #[test]
    fn empty_document_loads_with_nothing_bound() {
        let page = Page::new(Document::new());
        assert!(page.carousel().is_none());
        assert!(page.listeners().is_empty());
        assert_eq!(page.next_deadline(), None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PageConfig::new().with_autoplay_interval(Duration::ZERO);
        assert_eq!(
            Page::load(Document::new(), &config).unwrap_err(),
            ConfigError::ZeroInterval
        );
    }

    #[test]
    fn carousel_buttons_route_through_listeners() {
        let (mut page, _root, prev, next, controls) = carousel_page();
        page.dispatch(PageEvent::click(prev));
        assert_eq!(active(&page), 3);
        page.dispatch(PageEvent::click(next));
        assert_eq!(active(&page), 0);
        page.dispatch(PageEvent::click(controls[2]));
        assert_eq!(active(&page), 2);
    }

    #[test]
    fn click_on_child_of_button_bubbles() {
        let (mut page, _root, _prev, next, _) = carousel_page();
        let icon = page.document_mut().insert_child(next, NodeData::new("svg"));
        page.dispatch(PageEvent::click(icon));
        assert_eq!(active(&page), 1);
    }

    #[test]
    fn queued_events_wait_for_process() {
        let (mut page, _root, _prev, next, _) = carousel_page();
        page.handle_event(PageEvent::click(next));
        page.handle_event(PageEvent::click(next));
        assert_eq!(active(&page), 0);
        page.process();
        assert_eq!(active(&page), 2);
    }

    #[test]
    fn autoplay_and_hover() {
        let (mut page, root, ..) = carousel_page();
        page.advance(Duration::from_millis(6_000));
        assert_eq!(active(&page), 1);

        page.dispatch(PageEvent::pointer_enter(root));
        page.advance(Duration::from_millis(12_000));
        assert_eq!(active(&page), 1);

        page.dispatch(PageEvent::pointer_leave(root));
        page.advance(Duration::from_millis(6_000));
        assert_eq!(active(&page), 2);
        assert_eq!(page.clock().active_count(), 1);
    }

    #[test]
    fn hover_on_slide_does_not_pause() {
        let (mut page, root, ..) = carousel_page();
        let slide = page.carousel().unwrap().anchors().slides[0];
        page.dispatch(PageEvent::pointer_enter(slide));
        page.advance(Duration::from_millis(6_000));
        assert_eq!(active(&page), 1);
        assert!(page.document().contains(root));
    }

    #[test]
    fn advance_to_is_monotonic() {
        let (mut page, ..) = carousel_page();
        page.advance_to(Duration::from_millis(6_000));
        page.advance_to(Duration::from_millis(1_000));
        assert_eq!(active(&page), 1);
        assert_eq!(page.clock().now(), Duration::from_millis(6_000));
        assert_eq!(page.next_deadline(), Some(Duration::from_millis(12_000)));
    }
}
