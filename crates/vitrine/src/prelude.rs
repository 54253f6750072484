//! Prelude module for Vitrine.
//!
//! ```ignore
//! use vitrine::prelude::*;
//! ```

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use vitrine_core::{ConnectionId, Debouncer, Signal};

// ============================================================================
// Configuration and Markup
// ============================================================================

pub use crate::config::{
    DropdownConfig, MenuConfig, SiteConfig, SliderConfig, SliderKind, StepLinesConfig,
};
pub use crate::markup::{ControlMarkup, scan_controls};

// ============================================================================
// Events and Accessibility
// ============================================================================

pub use crate::widget::{Attribute, ClickTarget, Key, KeyPressEvent, PointerEvent};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::widgets::{
    ControlEvent, ControlPart, ControlView, Direction, FocusTarget, MemoryView, MenuEvent,
    MenuView, MobileMenu, OpenState, ScrollSlider, SelectableControl, SelectableOption,
    SelectableState, SelectionMode, SliderEvent, SliderView, StepLines, StepLinesView, Token,
};
