//! # slide-rail
//!
//! A headless interaction controller for server-rendered pages: a rotating
//! carousel with auto-play and pause-on-hover, horizontally scrolling card
//! rails, and a few one-shot click toggles.
//!
//! The page is modelled as an in-memory [`dom::Document`]. A discovery pass
//! reads declarative `data-*` markers, controllers are bound to the anchors it
//! finds, and every visual change goes through the [`surface::Surface`] trait.
//! Time comes from a [`clock::VirtualClock`], so auto-play can be driven by
//! tests or by the tokio-based [`driver::LiveDriver`].
//!
//! ## Core Systems
//!
//! - **[`dom`]** — Slotmap-backed document with selectors and scroll state
//! - **[`carousel`]** — Rotation index, prev/next/jump, auto-play, hover pause
//! - **[`rail`]** — Rail registry, button binding, card-step scrolling
//! - **[`toggles`]** — Mobile nav, choice selection, image fallback, anchor links
//! - **[`discovery`]** — Markers to anchor sets
//! - **[`event`]** — Page events, listener bindings, dispatch
//! - **[`clock`]** — Scheduler trait and the simulated clock
//! - **[`page`]** — Composition root
//! - **[`driver`]** — Real-time driver on tokio
//! - **[`testing`]** — Headless pilot and snapshot helpers

// Foundation
pub mod clock;
pub mod config;
pub mod dom;
pub mod surface;

// Controllers
pub mod carousel;
pub mod rail;
pub mod toggles;

// Wiring
pub mod discovery;
pub mod event;
pub mod page;

// Runtime
pub mod driver;

// Testing
pub mod testing;

pub use config::{ConfigError, PageConfig};
pub use page::Page;
