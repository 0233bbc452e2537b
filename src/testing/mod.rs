//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Page`](crate::page::Page) without a browser.
//! Use [`document_to_string`] to capture the document as an outline for
//! snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::document_to_string;
