//! Carousel controller: rotation index, manual and automatic advance, and
//! pause-on-hover.
//!
//! [`Carousel::show_slide`] is the only place the active index changes. Every
//! other operation (previous, next, direct jump, auto-play tick) routes through
//! it. Auto-play is a single recurring task on a [`Scheduler`]; pointer enter
//! cancels it and pointer leave recreates it.

use std::time::Duration;

use crate::clock::{Scheduler, TimerId};
use crate::dom::NodeId;
use crate::surface::Surface;

/// Attribute set on every control: `"true"` on exactly one, `"false"` elsewhere.
pub const CURRENT_ATTR: &str = "aria-current";

// ---------------------------------------------------------------------------
// Anchors
// ---------------------------------------------------------------------------

/// A control that jumps directly to a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideControl {
    pub node: NodeId,
    /// Target slide, zero-based. Wrapped like any other index.
    pub index: i64,
}

/// Everything the carousel needs from the page, resolved by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselAnchors {
    pub container: NodeId,
    pub slides: Vec<NodeId>,
    pub controls: Vec<SlideControl>,
    pub previous: Option<NodeId>,
    pub next: Option<NodeId>,
}

/// Classes applied to the active slide and to every other slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideClasses {
    pub active: Vec<String>,
    pub inactive: Vec<String>,
}

impl Default for SlideClasses {
    fn default() -> Self {
        Self {
            active: vec![
                "opacity-100".into(),
                "pointer-events-auto".into(),
                "translate-x-0".into(),
            ],
            inactive: vec!["opacity-0".into(), "-translate-x-4".into()],
        }
    }
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// A running carousel.
#[derive(Debug, Clone)]
pub struct Carousel {
    anchors: CarouselAnchors,
    classes: SlideClasses,
    interval: Duration,
    active: usize,
    timer: Option<TimerId>,
}

impl Carousel {
    /// Show slide 0 and start auto-play.
    ///
    /// A carousel without slides is inert: nothing is rendered and no timer is
    /// started.
    pub fn init(
        anchors: CarouselAnchors,
        classes: SlideClasses,
        interval: Duration,
        surface: &mut impl Surface,
        clock: &mut impl Scheduler,
    ) -> Self {
        let mut carousel = Self {
            anchors,
            classes,
            interval,
            active: 0,
            timer: None,
        };
        if carousel.is_empty() {
            tracing::debug!("carousel has no slides; leaving it inert");
            return carousel;
        }
        carousel.show_slide(0, surface);
        carousel.resume(clock);
        carousel
    }

    /// Activate slide `index`, wrapping in both directions.
    ///
    /// Exactly one slide ends up with the active classes and exactly one
    /// control with `aria-current="true"`, both at the same index.
    pub fn show_slide(&mut self, index: i64, surface: &mut impl Surface) {
        let Some(active) = wrap_index(index, self.anchors.slides.len()) else {
            return;
        };
        self.active = active;
        tracing::trace!(requested = index, active, "show slide");

        for (i, &slide) in self.anchors.slides.iter().enumerate() {
            let is_active = i == active;
            for class in &self.classes.active {
                surface.set_class(slide, class, is_active);
            }
            for class in &self.classes.inactive {
                surface.set_class(slide, class, !is_active);
            }
        }
        for (i, control) in self.anchors.controls.iter().enumerate() {
            let current = if i == active { "true" } else { "false" };
            surface.set_attribute(control.node, CURRENT_ATTR, current);
        }
    }

    /// Step to the following slide.
    pub fn next(&mut self, surface: &mut impl Surface) {
        self.show_slide(self.active as i64 + 1, surface);
    }

    /// Step to the preceding slide.
    pub fn previous(&mut self, surface: &mut impl Surface) {
        self.show_slide(self.active as i64 - 1, surface);
    }

    /// Jump to the slide targeted by the control at `position`.
    pub fn jump(&mut self, position: usize, surface: &mut impl Surface) {
        if let Some(control) = self.anchors.controls.get(position) {
            self.show_slide(control.index, surface);
        }
    }

    /// Pointer entered the carousel: stop auto-play.
    pub fn pause(&mut self, clock: &mut impl Scheduler) {
        if let Some(timer) = self.timer.take() {
            clock.cancel(timer);
            tracing::debug!("carousel auto-play paused");
        }
    }

    /// Pointer left the carousel: restart auto-play with a fresh period.
    ///
    /// Any running task is cancelled first, so at most one is ever alive.
    pub fn resume(&mut self, clock: &mut impl Scheduler) {
        self.pause(clock);
        if self.is_empty() {
            return;
        }
        self.timer = Some(clock.start_interval(self.interval));
    }

    /// Handle a clock firing. Returns whether the timer belonged to this carousel.
    pub fn on_timer(&mut self, id: TimerId, surface: &mut impl Surface) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.next(surface);
        true
    }

    /// Index of the visible slide.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.anchors.slides.len()
    }

    /// Whether the carousel has no slides.
    pub fn is_empty(&self) -> bool {
        self.anchors.slides.is_empty()
    }

    /// Whether auto-play is running.
    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// The auto-play task, while running.
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// The anchors this carousel was built from.
    pub fn anchors(&self) -> &CarouselAnchors {
        &self.anchors
    }
}

/// `((index mod len) + len) mod len`, or `None` for an empty carousel.
pub fn wrap_index(index: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = i64::try_from(len).ok()?;
    usize::try_from(index.rem_euclid(len)).ok()
}
