//! Horizontal scroll slider with prev/next buttons and drag scrolling.
//!
//! Used for the client logo strip (three items per step) and the
//! testimonial cards (one item per step).

use std::time::Instant;

use vitrine_core::Debouncer;
use vitrine_core::logging::targets;

use crate::config::SliderConfig;
use crate::widget::events::PointerEvent;
use crate::widget::geometry::parse_css_px;

/// Drag distance multiplier.
const DRAG_SPEED: f64 = 2.0;

/// Scroll position and extents of the scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub client_width: f64,
}

impl ScrollMetrics {
    /// Largest reachable `scroll_left`.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    fn clamp(&self, left: f64) -> f64 {
        left.clamp(0.0, self.max_scroll())
    }
}

/// Layout of the first slider item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemBox {
    /// Rendered width of the item.
    pub width: f64,
    /// The container's computed CSS `gap`.
    pub gap: String,
}

impl ItemBox {
    /// Width plus gap; an unparsable gap counts as zero.
    pub fn extent(&self) -> f64 {
        self.width + parse_css_px(&self.gap).unwrap_or(0) as f64
    }
}

/// Prev or next button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderButton {
    Prev,
    Next,
}

/// Enabled state of both buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonStates {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl ButtonStates {
    pub fn from_metrics(metrics: &ScrollMetrics) -> Self {
        Self {
            prev_disabled: metrics.scroll_left <= 0.0,
            next_disabled: metrics.scroll_left
                >= metrics.scroll_width - metrics.client_width - 1.0,
        }
    }
}

/// Pointer cursor over the scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

/// How a scroll request is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// The scroll container and its buttons.
pub trait SliderView {
    fn metrics(&self) -> ScrollMetrics;

    /// Layout of the first item, `None` when the container is empty.
    fn first_item(&self) -> Option<ItemBox>;

    fn scroll_to(&mut self, left: f64, behavior: ScrollBehavior);

    fn set_button_disabled(&mut self, button: SliderButton, disabled: bool);

    fn set_cursor(&mut self, cursor: Cursor);
}

/// Input routed to a [`ScrollSlider`].
#[derive(Debug, Clone)]
pub enum SliderEvent {
    PrevClick,
    NextClick,
    /// The container scrolled.
    Scroll,
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp,
    PointerLeave,
    Resize(Instant),
    Tick(Instant),
}

#[derive(Debug, Clone, Copy)]
struct DragStart {
    x: f64,
    scroll_left: f64,
}

/// A scroll slider bound to a view.
pub struct ScrollSlider<V: SliderView> {
    view: V,
    step: u32,
    drag: Option<DragStart>,
    resize: Debouncer<()>,
    buttons: ButtonStates,
}

impl<V: SliderView> ScrollSlider<V> {
    /// Create a slider that moves `step` items per button press.
    pub fn new(view: V, step: u32, config: &SliderConfig) -> Self {
        let mut slider = Self {
            view,
            step,
            drag: None,
            resize: Debouncer::from_millis(config.resize_debounce_ms),
            buttons: ButtonStates::default(),
        };
        slider.view.set_cursor(Cursor::Grab);
        slider.update_buttons();
        slider
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn buttons(&self) -> ButtonStates {
        self.buttons
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Distance covered by one button press.
    pub fn scroll_amount(&self) -> f64 {
        self.view
            .first_item()
            .map_or(0.0, |item| item.extent() * f64::from(self.step))
    }

    pub fn scroll_next(&mut self) {
        self.scroll_by(self.scroll_amount());
    }

    pub fn scroll_prev(&mut self) {
        self.scroll_by(-self.scroll_amount());
    }

    /// Recompute both button states from the current metrics.
    pub fn update_buttons(&mut self) {
        let states = ButtonStates::from_metrics(&self.view.metrics());
        self.view
            .set_button_disabled(SliderButton::Prev, states.prev_disabled);
        self.view
            .set_button_disabled(SliderButton::Next, states.next_disabled);
        self.buttons = states;
    }

    /// Route an input event. Returns `true` if the event was handled.
    pub fn handle_event(&mut self, event: &mut SliderEvent) -> bool {
        match event {
            SliderEvent::PrevClick => self.scroll_prev(),
            SliderEvent::NextClick => self.scroll_next(),
            SliderEvent::Scroll => self.update_buttons(),
            SliderEvent::PointerDown(pointer) => {
                self.drag = Some(DragStart {
                    x: pointer.page_x,
                    scroll_left: self.view.metrics().scroll_left,
                });
                self.view.set_cursor(Cursor::Grabbing);
            }
            SliderEvent::PointerMove(pointer) => {
                let Some(start) = self.drag else {
                    return false;
                };
                pointer.base.accept();
                let walk = (pointer.page_x - start.x) * DRAG_SPEED;
                let metrics = self.view.metrics();
                self.view
                    .scroll_to(metrics.clamp(start.scroll_left - walk), ScrollBehavior::Instant);
            }
            SliderEvent::PointerUp => {
                self.end_drag();
                self.update_buttons();
            }
            SliderEvent::PointerLeave => self.end_drag(),
            SliderEvent::Resize(now) => self.resize.schedule(*now, ()),
            SliderEvent::Tick(now) => {
                if self.resize.poll(*now).is_none() {
                    return false;
                }
                self.update_buttons();
            }
        }
        true
    }

    fn scroll_by(&mut self, delta: f64) {
        let metrics = self.view.metrics();
        let target = metrics.clamp(metrics.scroll_left + delta);
        tracing::trace!(target: targets::SLIDER, from = metrics.scroll_left, to = target, "slider scroll");
        self.view.scroll_to(target, ScrollBehavior::Smooth);
    }

    fn end_drag(&mut self) {
        self.drag = None;
        self.view.set_cursor(Cursor::Grab);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    struct FakeStrip {
        metrics: ScrollMetrics,
        item: Option<ItemBox>,
        cursor: Option<Cursor>,
        prev_disabled: Option<bool>,
        next_disabled: Option<bool>,
        last_behavior: Option<ScrollBehavior>,
    }

    impl FakeStrip {
        fn new(scroll_width: f64, client_width: f64) -> Self {
            Self {
                metrics: ScrollMetrics {
                    scroll_left: 0.0,
                    scroll_width,
                    client_width,
                },
                item: Some(ItemBox {
                    width: 100.0,
                    gap: "20px".to_string(),
                }),
                cursor: None,
                prev_disabled: None,
                next_disabled: None,
                last_behavior: None,
            }
        }
    }

    impl SliderView for FakeStrip {
        fn metrics(&self) -> ScrollMetrics {
            self.metrics
        }

        fn first_item(&self) -> Option<ItemBox> {
            self.item.clone()
        }

        fn scroll_to(&mut self, left: f64, behavior: ScrollBehavior) {
            self.metrics.scroll_left = left;
            self.last_behavior = Some(behavior);
        }

        fn set_button_disabled(&mut self, button: SliderButton, disabled: bool) {
            match button {
                SliderButton::Prev => self.prev_disabled = Some(disabled),
                SliderButton::Next => self.next_disabled = Some(disabled),
            }
        }

        fn set_cursor(&mut self, cursor: Cursor) {
            self.cursor = Some(cursor);
        }
    }

    #[test]
    fn test_initial_state() {
        let slider = ScrollSlider::new(FakeStrip::new(1000.0, 400.0), 3, &SliderConfig::default());
        assert_eq!(slider.view().cursor, Some(Cursor::Grab));
        assert_eq!(slider.view().prev_disabled, Some(true));
        assert_eq!(slider.view().next_disabled, Some(false));
    }

    #[test]
    fn test_button_states_at_edges() {
        let metrics = ScrollMetrics {
            scroll_left: 599.0,
            scroll_width: 1000.0,
            client_width: 400.0,
        };
        assert_eq!(
            ButtonStates::from_metrics(&metrics),
            ButtonStates {
                prev_disabled: false,
                next_disabled: true,
            }
        );

        let fits = ScrollMetrics {
            scroll_left: 0.0,
            scroll_width: 400.0,
            client_width: 400.0,
        };
        let states = ButtonStates::from_metrics(&fits);
        assert!(states.prev_disabled && states.next_disabled);
    }

    #[test]
    fn test_step_scroll_is_clamped() {
        let mut slider = ScrollSlider::new(FakeStrip::new(1000.0, 400.0), 3, &SliderConfig::default());
        assert_eq!(slider.scroll_amount(), 360.0);

        slider.handle_event(&mut SliderEvent::NextClick);
        assert_eq!(slider.view().metrics.scroll_left, 360.0);
        assert_eq!(slider.view().last_behavior, Some(ScrollBehavior::Smooth));

        slider.handle_event(&mut SliderEvent::NextClick);
        assert_eq!(slider.view().metrics.scroll_left, 600.0);
        slider.handle_event(&mut SliderEvent::Scroll);
        assert!(slider.buttons().next_disabled);

        slider.handle_event(&mut SliderEvent::PrevClick);
        slider.handle_event(&mut SliderEvent::PrevClick);
        assert_eq!(slider.view().metrics.scroll_left, 0.0);
    }

    #[test]
    fn test_empty_or_gapless_strip() {
        let mut strip = FakeStrip::new(1000.0, 400.0);
        strip.item = None;
        let slider = ScrollSlider::new(strip, 1, &SliderConfig::default());
        assert_eq!(slider.scroll_amount(), 0.0);

        let mut strip = FakeStrip::new(1000.0, 400.0);
        strip.item = Some(ItemBox {
            width: 320.0,
            gap: "normal".to_string(),
        });
        let slider = ScrollSlider::new(strip, 1, &SliderConfig::default());
        assert_eq!(slider.scroll_amount(), 320.0);
    }

    #[test]
    fn test_drag_scrolls_at_double_speed() {
        let mut slider = ScrollSlider::new(FakeStrip::new(1000.0, 400.0), 1, &SliderConfig::default());
        slider.view.metrics.scroll_left = 200.0;

        // Moves without a press are ignored.
        assert!(!slider.handle_event(&mut SliderEvent::PointerMove(PointerEvent::new(50.0))));

        slider.handle_event(&mut SliderEvent::PointerDown(PointerEvent::new(100.0)));
        assert!(slider.is_dragging());
        assert_eq!(slider.view().cursor, Some(Cursor::Grabbing));

        let mut drag_left = SliderEvent::PointerMove(PointerEvent::new(60.0));
        slider.handle_event(&mut drag_left);
        assert_eq!(slider.view().metrics.scroll_left, 280.0);
        if let SliderEvent::PointerMove(pointer) = &drag_left {
            assert!(pointer.base.is_accepted());
        }

        slider.handle_event(&mut SliderEvent::PointerMove(PointerEvent::new(300.0)));
        assert_eq!(slider.view().metrics.scroll_left, 0.0);

        slider.handle_event(&mut SliderEvent::PointerUp);
        assert!(!slider.is_dragging());
        assert_eq!(slider.view().cursor, Some(Cursor::Grab));
        assert!(slider.buttons().prev_disabled);
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut slider = ScrollSlider::new(FakeStrip::new(1000.0, 400.0), 1, &SliderConfig::default());
        slider.handle_event(&mut SliderEvent::PointerDown(PointerEvent::new(10.0)));
        slider.handle_event(&mut SliderEvent::PointerLeave);
        assert!(!slider.is_dragging());
        assert_eq!(slider.view().cursor, Some(Cursor::Grab));
    }

    #[test]
    fn test_resize_refresh_is_debounced() {
        let mut slider = ScrollSlider::new(FakeStrip::new(1000.0, 400.0), 1, &SliderConfig::default());
        let start = Instant::now();

        slider.view.metrics.scroll_left = 600.0;
        slider.handle_event(&mut SliderEvent::Resize(start));
        assert!(!slider.handle_event(&mut SliderEvent::Tick(start + Duration::from_millis(50))));
        assert!(!slider.buttons().next_disabled);

        assert!(slider.handle_event(&mut SliderEvent::Tick(start + Duration::from_millis(100))));
        assert!(slider.buttons().next_disabled);
    }
}
