//! Widget system for Vitrine.
//!
//! Widgets are headless: each one owns typed state, reacts to input events
//! routed by the host document, and writes its state to a view trait
//! implemented by the host (DOM bindings, an HTML renderer, a test double).
//!
//! - [`events`]: keyboard, pointer and click events
//! - [`accessibility`]: attributes mirrored to the document
//! - [`geometry`]: CSS length parsing
//! - [`widgets`]: the widget implementations

pub mod accessibility;
pub mod events;
pub mod geometry;
mod view;
pub mod widgets;

pub use accessibility::Attribute;
pub use events::{ClickTarget, EventBase, Key, KeyPressEvent, PointerEvent};
