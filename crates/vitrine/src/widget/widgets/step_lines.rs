//! Connector lines between numbered steps.
//!
//! Each step item may carry a vertical line below its number. The line is
//! capped so it never runs past the item: item height minus the number
//! badge and the two layout gaps.

use std::time::Instant;

use vitrine_core::Debouncer;
use vitrine_core::logging::targets;

use crate::config::StepLinesConfig;
use crate::widget::geometry::gap_or;

/// Measurements of one step item.
#[derive(Debug, Clone, PartialEq)]
pub struct StepItem {
    /// Rendered height of the item.
    pub height: f64,
    /// Computed CSS `gap` of the item.
    pub gap: String,
    /// Computed CSS `gap` of the item's top row.
    pub top_gap: String,
    /// Whether the item has a connector line.
    pub has_line: bool,
}

/// Maximum line height for an item, in pixels.
pub fn line_max_height(item: &StepItem, config: &StepLinesConfig) -> f64 {
    let gap = gap_or(&item.gap, config.fallback_gap_px);
    let top_gap = gap_or(&item.top_gap, config.fallback_gap_px);
    (item.height - config.number_height_px - gap - top_gap).max(0.0)
}

/// Format a height as an inline `max-height` value.
pub fn max_height_css(px: f64) -> String {
    format!("{px}px")
}

/// The step list in the document.
pub trait StepLinesView {
    fn items(&self) -> Vec<StepItem>;

    /// Set the inline `max-height` of the line in item `index`.
    fn set_line_max_height(&mut self, index: usize, value: &str);
}

/// What asks for a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTrigger {
    /// Document finished loading.
    Load,
    /// Step content or attributes changed.
    Mutation,
    /// Viewport resized; recomputed after the debounce delay.
    Resize(Instant),
    /// Timer tick; fires a pending resize recomputation.
    Tick(Instant),
}

/// Keeps step line heights in sync with the layout.
pub struct StepLines<V: StepLinesView> {
    view: V,
    config: StepLinesConfig,
    resize: Debouncer<()>,
}

impl<V: StepLinesView> StepLines<V> {
    pub fn new(view: V, config: StepLinesConfig) -> Self {
        let resize = Debouncer::from_millis(config.resize_debounce_ms);
        Self {
            view,
            config,
            resize,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Returns `true` if the lines were recomputed.
    pub fn handle(&mut self, trigger: LayoutTrigger) -> bool {
        match trigger {
            LayoutTrigger::Load | LayoutTrigger::Mutation => {
                self.adjust();
                true
            }
            LayoutTrigger::Resize(now) => {
                self.resize.schedule(now, ());
                false
            }
            LayoutTrigger::Tick(now) => {
                if self.resize.poll(now).is_some() {
                    self.adjust();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Recompute every line now.
    pub fn adjust(&mut self) {
        let items = self.view.items();
        for (index, item) in items.iter().enumerate().filter(|(_, item)| item.has_line) {
            let px = line_max_height(item, &self.config);
            self.view.set_line_max_height(index, &max_height_css(px));
        }
        tracing::trace!(target: targets::STEP_LINES, items = items.len(), "step lines adjusted");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;

    fn item(height: f64, gap: &str, top_gap: &str) -> StepItem {
        StepItem {
            height,
            gap: gap.to_string(),
            top_gap: top_gap.to_string(),
            has_line: true,
        }
    }

    #[derive(Default)]
    struct FakeSteps {
        items: Vec<StepItem>,
        heights: HashMap<usize, String>,
    }

    impl StepLinesView for FakeSteps {
        fn items(&self) -> Vec<StepItem> {
            self.items.clone()
        }

        fn set_line_max_height(&mut self, index: usize, value: &str) {
            self.heights.insert(index, value.to_string());
        }
    }

    #[test]
    fn test_line_max_height() {
        let config = StepLinesConfig::default();
        assert_eq!(line_max_height(&item(200.0, "16px", "12px"), &config), 124.0);
        // Zero and unparsable gaps fall back to 8px.
        assert_eq!(line_max_height(&item(200.0, "0px", "normal"), &config), 136.0);
        assert_eq!(line_max_height(&item(40.0, "16px", "16px"), &config), 0.0);
    }

    #[test]
    fn test_max_height_css() {
        assert_eq!(max_height_css(124.0), "124px");
        assert_eq!(max_height_css(0.0), "0px");
    }

    #[test]
    fn test_adjust_skips_items_without_line() {
        let mut steps = FakeSteps::default();
        steps.items.push(item(100.0, "8px", "8px"));
        steps.items.push(StepItem {
            has_line: false,
            ..item(100.0, "8px", "8px")
        });

        let mut lines = StepLines::new(steps, StepLinesConfig::default());
        assert!(lines.handle(LayoutTrigger::Load));
        assert_eq!(lines.view().heights.get(&0).map(String::as_str), Some("36px"));
        assert!(!lines.view().heights.contains_key(&1));
    }

    #[test]
    fn test_mutation_and_debounced_resize() {
        let mut steps = FakeSteps::default();
        steps.items.push(item(100.0, "8px", "8px"));
        let mut lines = StepLines::new(steps, StepLinesConfig::default());
        let start = Instant::now();

        lines.view_mut().items[0].height = 120.0;
        assert!(lines.handle(LayoutTrigger::Mutation));
        assert_eq!(lines.view().heights.get(&0).map(String::as_str), Some("56px"));

        lines.view_mut().items[0].height = 160.0;
        assert!(!lines.handle(LayoutTrigger::Resize(start)));
        assert!(!lines.handle(LayoutTrigger::Tick(start + Duration::from_millis(99))));
        assert_eq!(lines.view().heights.get(&0).map(String::as_str), Some("56px"));
        assert!(lines.handle(LayoutTrigger::Tick(start + Duration::from_millis(100))));
        assert_eq!(lines.view().heights.get(&0).map(String::as_str), Some("96px"));
    }
}
