//! Page configuration: timing, rail geometry, selectors, class sets, markers.
//!
//! [`PageConfig`] is plain data with `with_*` builders. Selectors are kept as
//! text and parsed once by [`PageConfig::validate`], which is where every
//! configuration error surfaces.

use std::time::Duration;

use crate::carousel::SlideClasses;
use crate::dom::{Selector, SelectorError};
use crate::rail::StepPolicy;
use crate::toggles::ImageFallback;

/// Errors from configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("auto-play interval must be non-zero")]
    ZeroInterval,
    #[error("rail gap must be a finite, non-negative pixel count, got {0}")]
    InvalidGap(f64),
    #[error("rail fallback fraction must be in (0, 1], got {0}")]
    InvalidFraction(f64),
    #[error("invalid selector {selector:?}: {source}")]
    Selector {
        selector: String,
        #[source]
        source: SelectorError,
    },
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Attribute names read by discovery. Never written by the controllers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub carousel: String,
    pub slide: String,
    /// Carries the zero-based target slide index.
    pub slide_nav: String,
    pub carousel_prev: String,
    pub carousel_next: String,
    /// Carries the rail key.
    pub rail: String,
    pub rail_nav: String,
    pub rail_target: String,
    pub direction: String,
    pub mobile_toggle: String,
    pub mobile_menu: String,
    pub choice_form: String,
    pub choice: String,
    pub choice_label: String,
    pub feedback: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            carousel: "data-carousel".into(),
            slide: "data-slide".into(),
            slide_nav: "data-slide-nav".into(),
            carousel_prev: "data-carousel-prev".into(),
            carousel_next: "data-carousel-next".into(),
            rail: "data-rail".into(),
            rail_nav: "data-rail-nav".into(),
            rail_target: "data-rail-target".into(),
            direction: "data-direction".into(),
            mobile_toggle: "data-mobile-toggle".into(),
            mobile_menu: "data-mobile-menu".into(),
            choice_form: "data-game-form".into(),
            choice: "data-choice".into(),
            choice_label: "data-choice-label".into(),
            feedback: "data-feedback".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PageConfig
// ---------------------------------------------------------------------------

/// Configuration for a page's controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// Period of carousel auto-play.
    pub autoplay_interval: Duration,
    pub slide_classes: SlideClasses,
    /// Fixed spacing between rail cards, in pixels.
    pub rail_gap: f64,
    /// Fraction of the rail width stepped when it has no cards.
    pub rail_fallback_fraction: f64,
    pub primary_card_selector: String,
    pub secondary_card_selector: Option<String>,
    /// Classes marking the selected choice.
    pub choice_highlight: Vec<String>,
    pub image_selector: String,
    pub photo_card_selector: String,
    pub photo_placeholder: String,
    pub poster_placeholder: String,
    pub markers: Markers,
}

impl Default for PageConfig {
    fn default() -> Self {
        let fallback = ImageFallback::default();
        Self {
            autoplay_interval: Duration::from_millis(6_000),
            slide_classes: SlideClasses::default(),
            rail_gap: 24.0,
            rail_fallback_fraction: 0.8,
            primary_card_selector: "article".into(),
            secondary_card_selector: Some(".rail-card".into()),
            choice_highlight: vec![
                "ring-2".into(),
                "ring-brand-400".into(),
                "bg-brand-600/20".into(),
            ],
            image_selector: "img.card-img-top".into(),
            photo_card_selector: ".actor-card".into(),
            photo_placeholder: fallback.photo_placeholder,
            poster_placeholder: fallback.poster_placeholder,
            markers: Markers::default(),
        }
    }
}

/// A validated configuration with every selector parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub autoplay_interval: Duration,
    pub slide_classes: SlideClasses,
    pub step: StepPolicy,
    pub choice_highlight: Vec<String>,
    pub image_fallback: ImageFallback,
    pub markers: Markers,
}

impl PageConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the auto-play period (builder).
    pub fn with_autoplay_interval(mut self, interval: Duration) -> Self {
        self.autoplay_interval = interval;
        self
    }

    /// Set the rail gap (builder).
    pub fn with_rail_gap(mut self, gap: f64) -> Self {
        self.rail_gap = gap;
        self
    }

    /// Set the empty-rail step fraction (builder).
    pub fn with_rail_fallback_fraction(mut self, fraction: f64) -> Self {
        self.rail_fallback_fraction = fraction;
        self
    }

    /// Set the card selectors (builder).
    pub fn with_card_selectors(
        mut self,
        primary: impl Into<String>,
        secondary: Option<impl Into<String>>,
    ) -> Self {
        self.primary_card_selector = primary.into();
        self.secondary_card_selector = secondary.map(Into::into);
        self
    }

    /// Set the slide class sets (builder).
    pub fn with_slide_classes(mut self, classes: SlideClasses) -> Self {
        self.slide_classes = classes;
        self
    }

    /// Set the marker attribute names (builder).
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Check every value and parse every selector.
    pub fn validate(&self) -> Result<ResolvedConfig, ConfigError> {
        if self.autoplay_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if !self.rail_gap.is_finite() || self.rail_gap < 0.0 {
            return Err(ConfigError::InvalidGap(self.rail_gap));
        }
        let fraction = self.rail_fallback_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::InvalidFraction(fraction));
        }

        let step = StepPolicy {
            gap: self.rail_gap,
            primary_card: parse(&self.primary_card_selector)?,
            secondary_card: self
                .secondary_card_selector
                .as_deref()
                .map(parse)
                .transpose()?,
            fallback_fraction: fraction,
        };
        let image_fallback = ImageFallback {
            image: parse(&self.image_selector)?,
            photo_card: parse(&self.photo_card_selector)?,
            photo_placeholder: self.photo_placeholder.clone(),
            poster_placeholder: self.poster_placeholder.clone(),
        };

        Ok(ResolvedConfig {
            autoplay_interval: self.autoplay_interval,
            slide_classes: self.slide_classes.clone(),
            step,
            choice_highlight: self.choice_highlight.clone(),
            image_fallback,
            markers: self.markers.clone(),
        })
    }
}

fn parse(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|source| ConfigError::Selector {
        selector: selector.to_owned(),
        source,
    })
}
