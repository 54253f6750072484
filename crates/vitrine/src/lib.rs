//! Vitrine - headless widgets for a static marketing site.
//!
//! This is the main crate. It re-exports the core systems and the fragment
//! loader, and provides the widgets:
//!
//! - [`widget::widgets::SelectableControl`]: dropdown / multiselect
//! - [`widget::widgets::MobileMenu`]: burger navigation menu
//! - [`widget::widgets::ScrollSlider`]: client and testimonial strips
//! - [`widget::widgets::StepLines`]: step connector lines
//!
//! Widgets hold typed state, take input events from the host document and
//! write their state to a view trait the host implements.
//!
//! # Example
//!
//! ```
//! use vitrine::prelude::*;
//!
//! let html = r#"
//!   <div data-dropdown>
//!     <button data-dropdown-trigger><span data-dropdown-value>Pick one</span></button>
//!     <ul class="dropdown__menu">
//!       <li data-dropdown-option data-value="a">Alpha</li>
//!       <li data-dropdown-option data-value="b">Beta</li>
//!     </ul>
//!   </div>
//! "#;
//!
//! let markup = scan_controls(html).unwrap();
//! let mut control = markup[0].build(MemoryView::default());
//!
//! control.handle_event(&mut ControlEvent::TriggerClick);
//! control.handle_event(&mut ControlEvent::OptionClick(1));
//! assert_eq!(control.view().value_text(), "Beta");
//! ```

pub use vitrine_core::*;

/// Header/footer fragment loading.
pub mod net {
    pub use vitrine_net::*;
}

pub mod config;
pub mod markup;
pub mod prelude;
pub mod widget;

pub use config::{ConfigError, SiteConfig};
pub use markup::{ControlMarkup, MarkupError, scan_controls};
