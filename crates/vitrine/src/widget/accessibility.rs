//! Presentation attributes written by widgets.
//!
//! Widgets keep typed state and only serialize it to attribute strings here,
//! at the boundary with the rendering target.

/// An attribute a widget keeps synchronized on one of its elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// `aria-expanded` on a trigger.
    Expanded(bool),
    /// `aria-hidden` on a popup. Visible popups drop the attribute.
    AriaHidden(bool),
    /// `aria-selected` on an option.
    Selected(bool),
    /// The `hidden` property on a filtered-out option.
    Hidden(bool),
    /// `aria-label` on a control.
    Label(String),
    /// `tabindex`.
    TabIndex(i32),
    /// `data-open` on a widget root.
    DataOpen(bool),
}

impl Attribute {
    /// The attribute name as written to the document.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Expanded(_) => "aria-expanded",
            Attribute::AriaHidden(_) => "aria-hidden",
            Attribute::Selected(_) => "aria-selected",
            Attribute::Hidden(_) => "hidden",
            Attribute::Label(_) => "aria-label",
            Attribute::TabIndex(_) => "tabindex",
            Attribute::DataOpen(_) => "data-open",
        }
    }

    /// The serialized value, or `None` when the attribute should be removed.
    pub fn value(&self) -> Option<String> {
        match self {
            Attribute::Expanded(v) | Attribute::Selected(v) | Attribute::DataOpen(v) => {
                Some(v.to_string())
            }
            Attribute::AriaHidden(true) => Some("true".to_string()),
            Attribute::Hidden(true) => Some(String::new()),
            Attribute::AriaHidden(false) | Attribute::Hidden(false) => None,
            Attribute::Label(label) => Some(label.clone()),
            Attribute::TabIndex(index) => Some(index.to_string()),
        }
    }
}
