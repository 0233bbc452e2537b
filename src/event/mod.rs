//! Event system: page events, listener bindings, dispatch.

pub mod binding;
pub mod handler;
pub mod input;

pub use binding::{Listener, ListenerRegistry};
pub use handler::EventDispatcher;
pub use input::{EventKind, PageEvent};
