//! Standard widgets for Vitrine.
//!
//! - [`SelectableControl`]: dropdown / multiselect
//! - [`MobileMenu`]: burger navigation menu
//! - [`ScrollSlider`]: horizontal strip with prev/next buttons
//! - [`StepLines`]: connector-line sizing for numbered steps

mod menu;
mod selectable;
mod slider;
mod step_lines;

pub use crate::widget::view::MemoryView;
pub use menu::{MenuEvent, MenuFocus, MenuPart, MenuView, MobileMenu, NO_SCROLL_CLASS, OPEN_CLASS};
pub use selectable::{
    ControlEvent, ControlPart, ControlView, DEFAULT_PLACEHOLDER, Direction, FocusTarget,
    OpenState, SelectableControl, SelectableOption, SelectableState, SelectionMode, Token,
    Transition,
};
pub use slider::{
    ButtonStates, Cursor, ItemBox, ScrollBehavior, ScrollMetrics, ScrollSlider, SliderButton,
    SliderEvent, SliderView,
};
pub use step_lines::{
    LayoutTrigger, StepItem, StepLines, StepLinesView, line_max_height, max_height_css,
};
