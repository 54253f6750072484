//! In-memory rendering target.
//!
//! [`MemoryView`] records what a [`SelectableControl`] writes, so hosts can
//! render it to HTML later and tests can inspect it.
//!
//! [`SelectableControl`]: crate::widget::widgets::SelectableControl

use std::collections::HashMap;

use crate::widget::accessibility::Attribute;
use crate::widget::widgets::{ControlPart, ControlView, FocusTarget, Token};

/// A [`ControlView`] that keeps the last written value of everything.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    attributes: HashMap<(ControlPart, &'static str), String>,
    value_text: String,
    tokens: Vec<Token>,
    focused: Option<FocusTarget>,
    focus_requests: usize,
}

impl MemoryView {
    /// Current value of an attribute, `None` if absent.
    pub fn attribute(&self, part: ControlPart, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|((p, n), _)| *p == part && *n == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn value_text(&self) -> &str {
        &self.value_text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token_labels(&self) -> Vec<&str> {
        self.tokens.iter().map(|token| token.label.as_str()).collect()
    }

    /// The element that received the most recent focus request.
    pub fn focused(&self) -> Option<FocusTarget> {
        self.focused
    }

    /// Number of focus requests received.
    pub fn focus_requests(&self) -> usize {
        self.focus_requests
    }
}

impl ControlView for MemoryView {
    fn set_attribute(&mut self, part: ControlPart, attribute: Attribute) {
        let name = attribute.name();
        match attribute.value() {
            Some(value) => {
                self.attributes.insert((part, name), value);
            }
            None => {
                self.attributes.remove(&(part, name));
            }
        }
    }

    fn set_value_text(&mut self, text: &str) {
        text.clone_into(&mut self.value_text);
    }

    fn set_tokens(&mut self, tokens: &[Token]) {
        self.tokens = tokens.to_vec();
    }

    fn focus(&mut self, target: FocusTarget) {
        self.focused = Some(target);
        self.focus_requests += 1;
    }
}
