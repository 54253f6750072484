//! Scanning selectable controls out of page markup.
//!
//! Every `[data-dropdown]` element is one control. Its parts are found by
//! attribute:
//!
//! | attribute | part |
//! |---|---|
//! | `data-multiselect` (on the root) | multi-select mode |
//! | `data-dropdown-trigger` | trigger; `aria-disabled="true"` disables it |
//! | `data-dropdown-value` | value display; its text is the placeholder |
//! | `data-dropdown-option` | option; `data-value`, `data-label`, `aria-disabled` |
//! | `data-dropdown-search` | filter input |
//! | `data-dropdown-tokens` | token host |
//! | `data-open` (on the root) | initial open state |

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use vitrine_core::logging::targets;

use crate::config::DropdownConfig;
use crate::widget::widgets::{
    ControlView, OpenState, SelectableControl, SelectableOption, SelectableState, SelectionMode,
};

/// Errors from markup scanning.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
}

/// Everything a selectable control needs from its markup.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlMarkup {
    pub mode: SelectionMode,
    pub trigger_disabled: bool,
    /// Trimmed text of the value display, if non-empty.
    pub placeholder: Option<String>,
    pub options: Vec<SelectableOption>,
    pub has_search: bool,
    pub has_tokens: bool,
    pub open: bool,
}

impl ControlMarkup {
    /// Initial state described by the markup, with default settings.
    pub fn to_state(&self) -> SelectableState {
        self.to_state_with(&DropdownConfig::default())
    }

    /// Initial state described by the markup. The configured placeholder
    /// applies when the value display has no text.
    pub fn to_state_with(&self, config: &DropdownConfig) -> SelectableState {
        let placeholder = self.placeholder.as_deref().unwrap_or(&config.placeholder);
        SelectableState::new(self.options.clone(), self.mode)
            .with_placeholder(placeholder)
            .with_trigger_disabled(self.trigger_disabled)
            .with_open_state(OpenState::from(self.open))
            .with_search(self.has_search)
            .with_token_host(self.has_tokens)
    }

    /// Build a control rendering into `view`, with default settings.
    pub fn build<V: ControlView>(&self, view: V) -> SelectableControl<V> {
        self.build_with(view, &DropdownConfig::default())
    }

    /// Build a control rendering into `view`.
    pub fn build_with<V: ControlView>(
        &self,
        view: V,
        config: &DropdownConfig,
    ) -> SelectableControl<V> {
        SelectableControl::new(self.to_state_with(config), view)
    }
}

struct Selectors {
    root: Selector,
    trigger: Selector,
    value: Selector,
    option: Selector,
    search: Selector,
    tokens: Selector,
}

impl Selectors {
    fn new() -> Result<Self, MarkupError> {
        Ok(Self {
            root: parse_selector("[data-dropdown]")?,
            trigger: parse_selector("[data-dropdown-trigger]")?,
            value: parse_selector("[data-dropdown-value]")?,
            option: parse_selector("[data-dropdown-option]")?,
            search: parse_selector("[data-dropdown-search]")?,
            tokens: parse_selector("[data-dropdown-tokens]")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, MarkupError> {
    Selector::parse(selector).map_err(|e| MarkupError::Selector {
        selector: selector.to_string(),
        message: format!("{e:?}"),
    })
}

/// Find every selectable control in an HTML document, in document order.
pub fn scan_controls(html: &str) -> Result<Vec<ControlMarkup>, MarkupError> {
    let selectors = Selectors::new()?;
    let document = Html::parse_document(html);

    let controls: Vec<ControlMarkup> = document
        .select(&selectors.root)
        .map(|root| scan_control(root, &selectors))
        .collect();

    tracing::debug!(target: targets::MARKUP, count = controls.len(), "scanned selectable controls");
    Ok(controls)
}

fn scan_control(root: ElementRef<'_>, selectors: &Selectors) -> ControlMarkup {
    let mode = if root.value().attr("data-multiselect").is_some() {
        SelectionMode::Multi
    } else {
        SelectionMode::Single
    };

    let trigger_disabled = root
        .select(&selectors.trigger)
        .next()
        .is_some_and(is_aria_disabled);

    let placeholder = root
        .select(&selectors.value)
        .next()
        .map(trimmed_text)
        .filter(|text| !text.is_empty());

    let options = root
        .select(&selectors.option)
        .map(|option| {
            let value = option.value().attr("data-value").unwrap_or_default();
            let mut parsed = SelectableOption::new(value, option_label(option));
            parsed.disabled = is_aria_disabled(option);
            parsed
        })
        .collect();

    ControlMarkup {
        mode,
        trigger_disabled,
        placeholder,
        options,
        has_search: root.select(&selectors.search).next().is_some(),
        has_tokens: root.select(&selectors.tokens).next().is_some(),
        open: root.value().attr("data-open") == Some("true"),
    }
}

/// `data-label`, else trimmed text, else empty.
fn option_label(option: ElementRef<'_>) -> String {
    match option.value().attr("data-label") {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => trimmed_text(option),
    }
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn is_aria_disabled(element: ElementRef<'_>) -> bool {
    element.value().attr("aria-disabled") == Some("true")
}
