//! Rail scroll controller.
//!
//! Each rail navigation button is bound once to a target key and a direction.
//! On activation the rail is resolved through a [`RailRegistry`], a
//! representative card is measured, and one smooth horizontal scroll of
//! `direction * (card_width + gap)` is issued. Nothing is stored between
//! clicks; every activation measures fresh geometry.

use std::collections::HashMap;

use crate::dom::{NodeId, ScrollBehavior, Selector};
use crate::surface::Surface;

/// Direction token that scrolls forward. Anything else scrolls back.
pub const NEXT_TOKEN: &str = "next";

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Scroll direction of a rail button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// `"next"` is forward; any other token, including none, is backward.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(NEXT_TOKEN) => Self::Next,
            _ => Self::Previous,
        }
    }

    /// The unit sign: +1 or -1.
    pub fn sign(self) -> f64 {
        match self {
            Self::Next => 1.0,
            Self::Previous => -1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// RailRegistry
// ---------------------------------------------------------------------------

/// Lookup table from rail key to rail node, filled by discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RailRegistry {
    rails: HashMap<String, NodeId>,
}

impl RailRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rail. The first registration of a key wins, matching
    /// document-order lookup.
    pub fn register(&mut self, key: impl Into<String>, node: NodeId) {
        self.rails.entry(key.into()).or_insert(node);
    }

    /// Resolve a key to its rail.
    pub fn resolve(&self, key: &str) -> Option<NodeId> {
        self.rails.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.rails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rails.is_empty()
    }
}

// ---------------------------------------------------------------------------
// RailButton
// ---------------------------------------------------------------------------

/// A navigation button permanently bound to one rail and one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RailButton {
    pub node: NodeId,
    pub target: String,
    pub direction: Direction,
}

impl RailButton {
    /// Bind a button from its static attributes.
    pub fn bind(node: NodeId, target: impl Into<String>, direction_token: Option<&str>) -> Self {
        Self {
            node,
            target: target.into(),
            direction: Direction::from_token(direction_token),
        }
    }
}

// ---------------------------------------------------------------------------
// StepPolicy
// ---------------------------------------------------------------------------

/// How far one rail step goes.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPolicy {
    /// Fixed spacing between cards, added to the measured card width.
    pub gap: f64,
    /// Selector for the representative card.
    pub primary_card: Selector,
    /// Tried when the primary selector finds nothing.
    pub secondary_card: Option<Selector>,
    /// Fraction of the rail's visible width used when no card exists.
    pub fallback_fraction: f64,
}

impl Default for StepPolicy {
    fn default() -> Self {
        Self {
            gap: 24.0,
            primary_card: Selector::tag("article"),
            secondary_card: Some(Selector::class("rail-card")),
            fallback_fraction: 0.8,
        }
    }
}

impl StepPolicy {
    /// Width of one step for the given geometry.
    ///
    /// With a card: `card_width + gap`. Without: `fallback_fraction * rail_width`.
    pub fn step(&self, card_width: Option<f64>, rail_width: f64) -> f64 {
        match card_width {
            Some(width) => width + self.gap,
            None => rail_width * self.fallback_fraction,
        }
    }

    /// Signed scroll offset for one click.
    pub fn offset(&self, direction: Direction, card_width: Option<f64>, rail_width: f64) -> f64 {
        direction.sign() * self.step(card_width, rail_width)
    }

    /// Representative card inside `rail`, primary selector first.
    pub fn find_card(&self, surface: &impl Surface, rail: NodeId) -> Option<NodeId> {
        surface.select_first(rail, &self.primary_card).or_else(|| {
            self.secondary_card
                .as_ref()
                .and_then(|secondary| surface.select_first(rail, secondary))
        })
    }
}

// ---------------------------------------------------------------------------
// RailController
// ---------------------------------------------------------------------------

/// All rail buttons on a page plus the registry they resolve against.
#[derive(Debug, Clone, Default)]
pub struct RailController {
    registry: RailRegistry,
    buttons: Vec<RailButton>,
    policy: StepPolicy,
}

impl RailController {
    pub fn new(registry: RailRegistry, buttons: Vec<RailButton>, policy: StepPolicy) -> Self {
        Self {
            registry,
            buttons,
            policy,
        }
    }

    /// Activate the button at `position`.
    ///
    /// Returns the requested offset, or `None` when the button or its rail is
    /// missing (in which case nothing is scrolled).
    pub fn activate(&self, position: usize, surface: &mut impl Surface) -> Option<f64> {
        let button = self.buttons.get(position)?;
        let Some(rail) = self.registry.resolve(&button.target) else {
            tracing::debug!(rail = %button.target, "rail button target not found");
            return None;
        };

        let card_width = self
            .policy
            .find_card(&*surface, rail)
            .and_then(|card| surface.measure_width(card));
        let rail_width = surface.measure_width(rail).unwrap_or(0.0);
        let offset = self.policy.offset(button.direction, card_width, rail_width);

        tracing::trace!(rail = %button.target, offset, card = card_width.is_some(), "rail step");
        surface.scroll_by(rail, offset, ScrollBehavior::Smooth);
        Some(offset)
    }

    pub fn registry(&self) -> &RailRegistry {
        &self.registry
    }

    pub fn buttons(&self) -> &[RailButton] {
        &self.buttons
    }

    pub fn policy(&self) -> &StepPolicy {
        &self.policy
    }
}
