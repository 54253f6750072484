//! Mobile navigation menu (burger menu).
//!
//! Opening adds `is-open` to the menu, marks the toggle expanded, swaps its
//! accessible label and locks page scroll with `no-scroll` on the body.
//! The menu closes on Escape, on clicks outside both menu and toggle, and
//! when a debounced resize reports a desktop-width viewport.

use std::time::Instant;

use vitrine_core::logging::targets;
use vitrine_core::{Debouncer, Signal};

use crate::config::MenuConfig;
use crate::widget::accessibility::Attribute;
use crate::widget::events::{ClickTarget, Key, KeyPressEvent};
use crate::widget::widgets::OpenState;

/// Class toggled on the menu element while open.
pub const OPEN_CLASS: &str = "is-open";
/// Class toggled on the body while the menu is open.
pub const NO_SCROLL_CLASS: &str = "no-scroll";

/// Element of the menu widget that receives attributes or classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuPart {
    Toggle,
    Menu,
    Body,
}

/// Element that should receive keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFocus {
    Toggle,
    /// First link, button or tabbable element inside the menu, if any.
    FirstFocusable,
}

/// Rendering target for a [`MobileMenu`].
pub trait MenuView {
    fn set_attribute(&mut self, part: MenuPart, attribute: Attribute);
    fn set_class(&mut self, part: MenuPart, class: &str, enabled: bool);
    fn focus(&mut self, target: MenuFocus);
}

/// Input routed to a [`MobileMenu`].
#[derive(Debug, Clone)]
pub enum MenuEvent {
    ToggleClick,
    CloseClick,
    DocumentKey(KeyPressEvent),
    /// `Outside` means outside both the menu and the toggle.
    DocumentClick(ClickTarget),
    /// Viewport resized to `width` at `now`.
    Resize { width: u32, now: Instant },
    /// Timer tick; fires a pending debounced resize.
    Tick(Instant),
}

/// Burger menu state bound to a view.
pub struct MobileMenu<V: MenuView> {
    view: V,
    state: OpenState,
    resize: Debouncer<u32>,
    breakpoint: u32,
    open_label: String,
    close_label: String,

    /// Signal emitted when the menu opens or closes.
    pub open_changed: Signal<bool>,
}

impl<V: MenuView> MobileMenu<V> {
    pub fn new(view: V, config: &MenuConfig) -> Self {
        Self {
            view,
            state: OpenState::Closed,
            resize: Debouncer::from_millis(config.resize_debounce_ms),
            breakpoint: config.desktop_breakpoint_px,
            open_label: config.open_label.clone(),
            close_label: config.close_label.clone(),
            open_changed: Signal::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Deadline of the pending resize check, for host timer scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    pub fn open(&mut self) {
        self.render(true);
        self.view.focus(MenuFocus::FirstFocusable);
        self.set_state(OpenState::Open);
    }

    pub fn close(&mut self) {
        self.render(false);
        self.view.focus(MenuFocus::Toggle);
        self.set_state(OpenState::Closed);
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Route an input event. Returns `true` if the event changed anything.
    pub fn handle_event(&mut self, event: &mut MenuEvent) -> bool {
        match event {
            MenuEvent::ToggleClick => {
                self.toggle();
                true
            }
            MenuEvent::CloseClick => {
                self.close();
                true
            }
            MenuEvent::DocumentKey(key_event) if key_event.key == Key::Escape && self.is_open() => {
                self.close();
                true
            }
            MenuEvent::DocumentClick(ClickTarget::Outside) if self.is_open() => {
                self.close();
                true
            }
            MenuEvent::Resize { width, now } => {
                self.resize.schedule(*now, *width);
                false
            }
            MenuEvent::Tick(now) => self.poll(*now),
            MenuEvent::DocumentKey(_) | MenuEvent::DocumentClick(_) => false,
        }
    }

    /// Fire a due resize check. Returns `true` if the menu closed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(width) = self.resize.poll(now) else {
            return false;
        };
        if width > self.breakpoint && self.is_open() {
            tracing::debug!(target: targets::MENU, width, breakpoint = self.breakpoint, "closing menu on desktop resize");
            self.close();
            return true;
        }
        false
    }

    fn render(&mut self, open: bool) {
        self.view.set_class(MenuPart::Menu, OPEN_CLASS, open);
        self.view
            .set_attribute(MenuPart::Toggle, Attribute::Expanded(open));
        let label = if open { &self.close_label } else { &self.open_label };
        self.view
            .set_attribute(MenuPart::Toggle, Attribute::Label(label.clone()));
        self.view.set_class(MenuPart::Body, NO_SCROLL_CLASS, open);
    }

    fn set_state(&mut self, state: OpenState) {
        if self.state != state {
            self.state = state;
            tracing::trace!(target: targets::MENU, open = state.is_open(), "menu state changed");
            self.open_changed.emit(state.is_open());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::time::Duration;

    use super::*;

    #[derive(Default)]
    struct RecordingView {
        attributes: HashMap<(MenuPart, &'static str), String>,
        classes: HashSet<(MenuPart, String)>,
        focused: Option<MenuFocus>,
    }

    impl MenuView for RecordingView {
        fn set_attribute(&mut self, part: MenuPart, attribute: Attribute) {
            if let Some(value) = attribute.value() {
                self.attributes.insert((part, attribute.name()), value);
            }
        }

        fn set_class(&mut self, part: MenuPart, class: &str, enabled: bool) {
            if enabled {
                self.classes.insert((part, class.to_string()));
            } else {
                self.classes.remove(&(part, class.to_string()));
            }
        }

        fn focus(&mut self, target: MenuFocus) {
            self.focused = Some(target);
        }
    }

    impl RecordingView {
        fn has_class(&self, part: MenuPart, class: &str) -> bool {
            self.classes.contains(&(part, class.to_string()))
        }
    }

    fn menu() -> MobileMenu<RecordingView> {
        MobileMenu::new(RecordingView::default(), &MenuConfig::default())
    }

    #[test]
    fn test_open_and_close() {
        let mut menu = menu();
        menu.open();
        assert!(menu.is_open());
        assert!(menu.view().has_class(MenuPart::Menu, OPEN_CLASS));
        assert!(menu.view().has_class(MenuPart::Body, NO_SCROLL_CLASS));
        assert_eq!(
            menu.view().attributes.get(&(MenuPart::Toggle, "aria-expanded")).map(String::as_str),
            Some("true")
        );
        assert_eq!(
            menu.view().attributes.get(&(MenuPart::Toggle, "aria-label")),
            Some(&MenuConfig::default().close_label)
        );
        assert_eq!(menu.view().focused, Some(MenuFocus::FirstFocusable));

        menu.close();
        assert!(!menu.is_open());
        assert!(!menu.view().has_class(MenuPart::Menu, OPEN_CLASS));
        assert!(!menu.view().has_class(MenuPart::Body, NO_SCROLL_CLASS));
        assert_eq!(menu.view().focused, Some(MenuFocus::Toggle));
    }

    #[test]
    fn test_dismissal() {
        let mut menu = menu();
        menu.handle_event(&mut MenuEvent::ToggleClick);
        assert!(menu.is_open());

        assert!(!menu.handle_event(&mut MenuEvent::DocumentClick(ClickTarget::Inside)));
        assert!(menu.handle_event(&mut MenuEvent::DocumentClick(ClickTarget::Outside)));
        assert!(!menu.is_open());

        menu.open();
        let mut escape = MenuEvent::DocumentKey(KeyPressEvent::new(Key::Escape));
        assert!(menu.handle_event(&mut escape));
        assert!(!menu.is_open());
        assert!(!menu.handle_event(&mut escape));

        menu.open();
        menu.handle_event(&mut MenuEvent::CloseClick);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_resize_closes_on_desktop_after_debounce() {
        let mut menu = menu();
        let start = Instant::now();
        menu.open();

        menu.handle_event(&mut MenuEvent::Resize { width: 1400, now: start });
        menu.handle_event(&mut MenuEvent::Resize {
            width: 800,
            now: start + Duration::from_millis(100),
        });
        // The burst settles on a mobile width.
        assert!(!menu.poll(start + Duration::from_millis(360)));
        assert!(menu.is_open());

        menu.handle_event(&mut MenuEvent::Resize {
            width: 1025,
            now: start + Duration::from_millis(400),
        });
        assert!(!menu.handle_event(&mut MenuEvent::Tick(start + Duration::from_millis(500))));
        assert!(menu.handle_event(&mut MenuEvent::Tick(start + Duration::from_millis(650))));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_resize_at_breakpoint_keeps_menu_open() {
        let mut menu = menu();
        let start = Instant::now();
        menu.open();
        menu.handle_event(&mut MenuEvent::Resize { width: 1024, now: start });
        assert!(!menu.poll(start + Duration::from_millis(250)));
        assert!(menu.is_open());
    }

    #[test]
    fn test_open_changed_signal() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let mut menu = menu();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        menu.open_changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        menu.open();
        menu.close();
        menu.close();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
