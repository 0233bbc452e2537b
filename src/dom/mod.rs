//! Page document: slotmap-backed node tree with marker and selector queries.

pub mod node;
pub mod query;
pub mod scroll;
pub mod selector;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use scroll::{ScrollBehavior, ScrollCommand, ScrollKind, ScrollState};
pub use selector::{Selector, SelectorError};
pub use tree::Document;
