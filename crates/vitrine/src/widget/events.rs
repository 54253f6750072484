//! Widget input event types.
//!
//! Events arrive from the host document (DOM listeners, a test harness, a
//! server-side replay) already resolved to the part of the widget they hit.
//! Handlers accept an event when they consume it, which the host maps to
//! suppressing the default browser action.

/// Base data shared by all input events.
#[derive(Debug, Clone, Default)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, suppressing its default action.
    pub fn accept(&mut self) {
        self.accepted = true;
    }
}

/// Keys the widgets react to.
///
/// Values follow the web `KeyboardEvent.key` names; everything the widgets
/// do not handle maps to [`Key::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Escape,
    ArrowUp,
    ArrowDown,
    /// Any other key, by its `KeyboardEvent.key` name.
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.key` value to a [`Key`].
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Key press event.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key) -> Self {
        Self {
            base: EventBase::new(),
            key,
        }
    }

    /// Create a key press event from a `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        Self::new(Key::from_key_name(name))
    }
}

/// Pointer press/release/move event in page coordinates.
#[derive(Debug, Clone)]
pub struct PointerEvent {
    /// Base event data.
    pub base: EventBase,
    /// Horizontal page coordinate.
    pub page_x: f64,
}

impl PointerEvent {
    /// Create a pointer event at the given page x coordinate.
    pub fn new(page_x: f64) -> Self {
        Self {
            base: EventBase::new(),
            page_x,
        }
    }
}

/// Where a document-level click landed relative to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the widget's subtree.
    Inside,
    /// Anywhere else in the document.
    Outside,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("Enter"), Key::Enter);
        assert_eq!(Key::from_key_name(" "), Key::Space);
        assert_eq!(Key::from_key_name("Esc"), Key::Escape);
        assert_eq!(Key::from_key_name("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_key_name("Tab"), Key::Other("Tab".to_string()));
    }

    #[test]
    fn test_accept() {
        let mut event = KeyPressEvent::from_key_name("Enter");
        assert!(!event.base.is_accepted());
        event.base.accept();
        assert!(event.base.is_accepted());
    }
}
