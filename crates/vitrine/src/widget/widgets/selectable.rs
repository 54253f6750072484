//! Selectable control (dropdown / multiselect).
//!
//! The control is split in two layers:
//!
//! - [`SelectableState`]: a pure state machine. Operations and input events
//!   mutate it and return a [`Transition`] describing the side effects the
//!   caller must perform (focus moves, notifications).
//! - [`SelectableControl`]: the adapter that owns a state, applies every
//!   transition to a [`ControlView`] synchronously, and emits signals.
//!
//! # Example
//!
//! ```
//! use vitrine::widget::widgets::{
//!     MemoryView, SelectableControl, SelectableOption, SelectableState, SelectionMode,
//! };
//!
//! let state = SelectableState::new(
//!     vec![
//!         SelectableOption::new("a", "Alpha"),
//!         SelectableOption::new("b", "Beta"),
//!     ],
//!     SelectionMode::Multi,
//! );
//! let mut control = SelectableControl::new(state, MemoryView::default());
//!
//! control.select_option(0);
//! control.select_option(1);
//! assert_eq!(control.view().value_text(), "2 selected");
//! assert_eq!(control.view().token_labels(), vec!["Alpha", "Beta"]);
//! ```

use indexmap::IndexSet;
use vitrine_core::Signal;
use vitrine_core::logging::targets;

use crate::widget::accessibility::Attribute;
use crate::widget::events::{ClickTarget, Key, KeyPressEvent};

/// Placeholder shown when the value element carries no text of its own.
pub const DEFAULT_PLACEHOLDER: &str = "Select option";

// ============================================================================
// Data Model
// ============================================================================

/// One selectable entry in the control's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableOption {
    /// The identifier stored in the selection.
    pub value: String,
    /// The display label.
    pub label: String,
    /// Whether the option refuses selection.
    pub disabled: bool,
}

impl SelectableOption {
    /// Create an enabled option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark this option as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    fn matches(&self, term: &str) -> bool {
        term.is_empty() || self.label.to_lowercase().contains(term)
    }
}

/// Single- or multi-selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// At most one selected value; selecting closes the menu.
    #[default]
    Single,
    /// Any number of selected values shown as tokens; the menu stays open.
    Multi,
}

/// Whether the menu is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenState {
    #[default]
    Closed,
    Open,
}

impl OpenState {
    /// Returns `true` for [`OpenState::Open`].
    pub fn is_open(self) -> bool {
        matches!(self, OpenState::Open)
    }
}

impl From<bool> for OpenState {
    fn from(open: bool) -> Self {
        if open { OpenState::Open } else { OpenState::Closed }
    }
}

/// Direction of keyboard movement among visible options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A removable chip for one selected value (multi-select).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub label: String,
}

impl Token {
    /// Accessible label of the token's remove button.
    pub fn remove_label(&self) -> String {
        format!("Remove {}", self.label)
    }
}

/// Element of the control that receives attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPart {
    Root,
    Trigger,
    Menu,
    /// Option by its index in the full option list.
    Option(usize),
}

/// Element that should receive keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Trigger,
    /// Option by its index in the full option list.
    Option(usize),
}

/// Side effects of a state change, to be applied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// Focus move requested by the operation.
    pub focus: Option<FocusTarget>,
    /// The open state flipped.
    pub open_changed: bool,
    /// The selected values changed.
    pub selection_changed: bool,
    /// Option (full-list index) the user picked, even if the selection did not change.
    pub activated: Option<usize>,
}

impl Transition {
    fn merge(mut self, later: Transition) -> Self {
        self.focus = later.focus.or(self.focus);
        self.open_changed |= later.open_changed;
        self.selection_changed |= later.selection_changed;
        self.activated = later.activated.or(self.activated);
        self
    }
}

/// Input routed to a control by the host document.
#[derive(Debug, Clone)]
pub enum ControlEvent {
    /// Click on the trigger.
    TriggerClick,
    /// Key press while the trigger has focus.
    TriggerKey(KeyPressEvent),
    /// Click on an option (full-list index).
    OptionClick(usize),
    /// Key press while an option (full-list index) has focus.
    OptionKey(usize, KeyPressEvent),
    /// New content of the search input.
    SearchInput(String),
    /// Click on a token's remove button.
    RemoveToken(String),
    /// Click anywhere in the document.
    DocumentClick(ClickTarget),
    /// Key press anywhere in the document.
    DocumentKey(KeyPressEvent),
}

// ============================================================================
// Pure State Machine
// ============================================================================

/// State of one selectable control.
#[derive(Debug, Clone)]
pub struct SelectableState {
    options: Vec<SelectableOption>,
    mode: SelectionMode,
    open: OpenState,
    selected: IndexSet<String>,
    /// Full-list index of the focused option; always a visible one.
    active: Option<usize>,
    /// Normalized (trimmed, lowercased) filter term.
    search_term: String,
    trigger_disabled: bool,
    placeholder: String,
    /// Whether the host has a search input feeding `SearchInput`.
    has_search: bool,
    /// Whether the host has somewhere to render tokens.
    has_token_host: bool,
}

impl SelectableState {
    /// Create a closed control with nothing selected.
    pub fn new(options: Vec<SelectableOption>, mode: SelectionMode) -> Self {
        Self {
            options,
            mode,
            open: OpenState::Closed,
            selected: IndexSet::new(),
            active: None,
            search_term: String::new(),
            trigger_disabled: false,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            has_search: true,
            has_token_host: true,
        }
    }

    /// Set the placeholder using builder pattern. Blank text keeps the default.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        let trimmed = placeholder.trim();
        if !trimmed.is_empty() {
            self.placeholder = trimmed.to_string();
        }
        self
    }

    /// Set the initial open state using builder pattern, without moving focus.
    pub fn with_open_state(mut self, open: OpenState) -> Self {
        self.open = open;
        self
    }

    /// Set the trigger's disabled flag using builder pattern.
    pub fn with_trigger_disabled(mut self, disabled: bool) -> Self {
        self.trigger_disabled = disabled;
        self
    }

    /// Declare whether the control has a search input. Without one,
    /// `SearchInput` events are not handled.
    pub fn with_search(mut self, has_search: bool) -> Self {
        self.has_search = has_search;
        self
    }

    /// Declare whether the control has a token host. Without one, tokens are
    /// not rendered.
    pub fn with_token_host(mut self, has_token_host: bool) -> Self {
        self.has_token_host = has_token_host;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn options(&self) -> &[SelectableOption] {
        &self.options
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn open_state(&self) -> OpenState {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_open()
    }

    pub fn is_trigger_disabled(&self) -> bool {
        self.trigger_disabled
    }

    pub fn set_trigger_disabled(&mut self, disabled: bool) {
        self.trigger_disabled = disabled;
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn has_search(&self) -> bool {
        self.has_search
    }

    pub fn has_token_host(&self) -> bool {
        self.has_token_host
    }

    /// Selected values in selection order.
    pub fn selected_values(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    /// Position of the focused option within the visible-options view.
    pub fn active_option_index(&self) -> Option<usize> {
        let active = self.active?;
        self.visible_indices().iter().position(|&i| i == active)
    }

    /// Full-list index of the focused option.
    pub fn active_option(&self) -> Option<&SelectableOption> {
        self.active.and_then(|i| self.options.get(i))
    }

    /// Whether the option at a full-list index passes the current filter.
    pub fn is_visible(&self, index: usize) -> bool {
        self.options
            .get(index)
            .is_some_and(|option| option.matches(&self.search_term))
    }

    /// Full-list indices of the options that pass the current filter.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.matches(&self.search_term))
            .map(|(i, _)| i)
            .collect()
    }

    /// Full-list index of the option carrying `value`.
    pub fn find_value(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|option| option.value == value)
    }

    fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }

    /// Text shown in the value display.
    pub fn display_text(&self) -> String {
        match self.mode {
            SelectionMode::Single => self
                .selected
                .first()
                .and_then(|value| self.label_for(value))
                .unwrap_or(&self.placeholder)
                .to_string(),
            SelectionMode::Multi => match self.selected.len() {
                0 => self.placeholder.clone(),
                n => format!("{n} selected"),
            },
        }
    }

    /// Tokens for the selected values, in selection order.
    pub fn tokens(&self) -> Vec<Token> {
        self.selected
            .iter()
            .map(|value| Token {
                value: value.clone(),
                label: self.label_for(value).unwrap_or(value).to_string(),
            })
            .collect()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Expand the menu and focus the first visible option.
    pub fn open(&mut self) -> Transition {
        if self.trigger_disabled {
            tracing::debug!(target: targets::SELECTABLE, "open ignored: trigger disabled");
            return Transition::default();
        }
        let was_open = self.open.is_open();
        self.open = OpenState::Open;
        let opened = Transition {
            open_changed: !was_open,
            ..Transition::default()
        };
        opened.merge(self.focus_option(0, Direction::Forward))
    }

    /// Collapse the menu and return focus to the trigger.
    pub fn close(&mut self) -> Transition {
        let was_open = self.open.is_open();
        self.open = OpenState::Closed;
        self.active = None;
        Transition {
            focus: Some(FocusTarget::Trigger),
            open_changed: was_open,
            ..Transition::default()
        }
    }

    pub fn toggle(&mut self) -> Transition {
        if self.open.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Select (single) or toggle (multi) the option at a full-list index.
    pub fn select_option(&mut self, index: usize) -> Transition {
        let Some(option) = self.options.get(index) else {
            return Transition::default();
        };
        if option.disabled {
            tracing::debug!(target: targets::SELECTABLE, value = %option.value, "select ignored: option disabled");
            return Transition::default();
        }
        let value = option.value.clone();

        match self.mode {
            SelectionMode::Multi => {
                if !self.selected.shift_remove(&value) {
                    self.selected.insert(value);
                }
                Transition {
                    selection_changed: true,
                    activated: Some(index),
                    ..Transition::default()
                }
            }
            SelectionMode::Single => {
                let changed = self.selected.len() != 1 || !self.selected.contains(&value);
                self.selected.clear();
                self.selected.insert(value);
                let selected = Transition {
                    selection_changed: changed,
                    activated: Some(index),
                    ..Transition::default()
                };
                selected.merge(self.close())
            }
        }
    }

    /// Focus a visible option by its position in the visible-options view,
    /// wrapping out-of-range positions according to `direction`.
    pub fn focus_option(&mut self, visible_index: isize, direction: Direction) -> Transition {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return Transition::default();
        }

        let position = usize::try_from(visible_index)
            .ok()
            .filter(|&i| i < visible.len())
            .unwrap_or(match direction {
                Direction::Forward => 0,
                Direction::Backward => visible.len() - 1,
            });
        let index = visible[position];
        self.active = Some(index);
        tracing::trace!(target: targets::SELECTABLE, index, position, "option focused");

        Transition {
            focus: Some(FocusTarget::Option(index)),
            ..Transition::default()
        }
    }

    /// Hide options whose label does not contain `term` (case-insensitive).
    pub fn filter(&mut self, term: &str) -> Transition {
        self.search_term = term.trim().to_lowercase();
        if let Some(active) = self.active
            && !self.is_visible(active)
        {
            self.active = None;
        }
        Transition::default()
    }

    /// Remove a selected value from a multi-select control.
    pub fn remove_token(&mut self, value: &str) -> Transition {
        if self.mode != SelectionMode::Multi {
            return Transition::default();
        }
        Transition {
            selection_changed: self.selected.shift_remove(value),
            ..Transition::default()
        }
    }

    /// Replace the option list, pruning selected values that no longer have
    /// an option.
    pub fn set_options(&mut self, options: Vec<SelectableOption>) -> Transition {
        self.options = options;
        let before = self.selected.len();
        let options = &self.options;
        self.selected
            .retain(|value| options.iter().any(|option| &option.value == value));
        self.active = None;
        let pruned = before - self.selected.len();
        if pruned > 0 {
            tracing::debug!(target: targets::SELECTABLE, pruned, "dropped selections without options");
        }
        Transition {
            selection_changed: pruned > 0,
            ..Transition::default()
        }
    }

    // =========================================================================
    // Input Handling
    // =========================================================================

    /// Route an input event. Returns `None` when the event was not handled.
    pub fn handle_event(&mut self, event: &mut ControlEvent) -> Option<Transition> {
        match event {
            ControlEvent::TriggerClick => Some(self.toggle()),
            ControlEvent::TriggerKey(key_event) => self.handle_trigger_key(key_event),
            ControlEvent::OptionClick(index) => Some(self.select_option(*index)),
            ControlEvent::OptionKey(index, key_event) => self.handle_option_key(*index, key_event),
            ControlEvent::SearchInput(term) if self.has_search => Some(self.filter(term)),
            ControlEvent::SearchInput(_) => None,
            ControlEvent::RemoveToken(value) => Some(self.remove_token(value)),
            ControlEvent::DocumentClick(ClickTarget::Outside) if self.is_open() => {
                Some(self.close())
            }
            ControlEvent::DocumentKey(key_event)
                if key_event.key == Key::Escape && self.is_open() =>
            {
                Some(self.close())
            }
            ControlEvent::DocumentClick(_) | ControlEvent::DocumentKey(_) => None,
        }
    }

    fn handle_trigger_key(&mut self, event: &mut KeyPressEvent) -> Option<Transition> {
        match event.key {
            Key::Enter | Key::Space => {
                event.base.accept();
                Some(self.toggle())
            }
            Key::ArrowDown => {
                event.base.accept();
                if self.is_open() {
                    Some(self.focus_option(0, Direction::Forward))
                } else {
                    Some(self.open())
                }
            }
            Key::Escape => Some(self.close()),
            _ => None,
        }
    }

    fn handle_option_key(&mut self, index: usize, event: &mut KeyPressEvent) -> Option<Transition> {
        let position = self
            .visible_indices()
            .iter()
            .position(|&i| i == index)
            .map_or(-1, |p| p as isize);

        match event.key {
            Key::Enter | Key::Space => {
                event.base.accept();
                Some(self.select_option(index))
            }
            Key::ArrowDown => {
                event.base.accept();
                Some(self.focus_option(position + 1, Direction::Forward))
            }
            Key::ArrowUp => {
                event.base.accept();
                Some(self.focus_option(position - 1, Direction::Backward))
            }
            Key::Escape => Some(self.close()),
            _ => None,
        }
    }
}

// ============================================================================
// View Adapter
// ============================================================================

/// Rendering target a [`SelectableControl`] mirrors its state into.
///
/// Implementations write to the host document (DOM bindings, an HTML
/// snapshot, a test recorder). The control never reads back from the view.
pub trait ControlView {
    /// Set or remove an attribute on a part of the control.
    fn set_attribute(&mut self, part: ControlPart, attribute: Attribute);

    /// Replace the text of the value display.
    fn set_value_text(&mut self, text: &str);

    /// Replace the token list (multi-select only).
    fn set_tokens(&mut self, tokens: &[Token]);

    /// Move keyboard focus.
    fn focus(&mut self, target: FocusTarget);
}

/// A selectable control bound to a view.
///
/// # Signals
///
/// - `selection_changed(Vec<String>)`: selected values, in selection order
/// - `open_changed(bool)`: the menu opened or closed
/// - `activated(String)`: the user picked an option (value)
pub struct SelectableControl<V: ControlView> {
    state: SelectableState,
    view: V,

    /// Signal emitted when the selected values change.
    pub selection_changed: Signal<Vec<String>>,
    /// Signal emitted when the menu opens or closes.
    pub open_changed: Signal<bool>,
    /// Signal emitted when the user picks an option.
    pub activated: Signal<String>,
}

impl<V: ControlView> SelectableControl<V> {
    /// Bind a state to a view and render it once.
    pub fn new(state: SelectableState, view: V) -> Self {
        let mut control = Self {
            state,
            view,
            selection_changed: Signal::new(),
            open_changed: Signal::new(),
            activated: Signal::new(),
        };
        for index in 0..control.state.options.len() {
            control
                .view
                .set_attribute(ControlPart::Option(index), Attribute::TabIndex(-1));
        }
        control.sync();
        control
    }

    pub fn state(&self) -> &SelectableState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Unbind the view.
    pub fn into_view(self) -> V {
        self.view
    }

    pub fn open(&mut self) {
        let transition = self.state.open();
        self.apply(transition);
    }

    pub fn close(&mut self) {
        let transition = self.state.close();
        self.apply(transition);
    }

    pub fn toggle(&mut self) {
        let transition = self.state.toggle();
        self.apply(transition);
    }

    /// Select (single) or toggle (multi) the option at a full-list index.
    pub fn select_option(&mut self, index: usize) {
        let transition = self.state.select_option(index);
        self.apply(transition);
    }

    /// Select (single) or toggle (multi) the option carrying `value`.
    pub fn select_value(&mut self, value: &str) {
        if let Some(index) = self.state.find_value(value) {
            self.select_option(index);
        }
    }

    pub fn focus_option(&mut self, visible_index: isize, direction: Direction) {
        let transition = self.state.focus_option(visible_index, direction);
        self.apply(transition);
    }

    pub fn filter(&mut self, term: &str) {
        let transition = self.state.filter(term);
        self.apply(transition);
    }

    pub fn remove_token(&mut self, value: &str) {
        let transition = self.state.remove_token(value);
        self.apply(transition);
    }

    pub fn set_options(&mut self, options: Vec<SelectableOption>) {
        let transition = self.state.set_options(options);
        for index in 0..self.state.options.len() {
            self.view
                .set_attribute(ControlPart::Option(index), Attribute::TabIndex(-1));
        }
        self.apply(transition);
    }

    /// Route an input event. Returns `true` if the event was handled.
    pub fn handle_event(&mut self, event: &mut ControlEvent) -> bool {
        match self.state.handle_event(event) {
            Some(transition) => {
                self.apply(transition);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, transition: Transition) {
        self.sync();
        if let Some(target) = transition.focus {
            self.view.focus(target);
        }
        if transition.open_changed {
            tracing::debug!(target: targets::SELECTABLE, open = self.state.is_open(), "open state changed");
            self.open_changed.emit(self.state.is_open());
        }
        if let Some(index) = transition.activated
            && let Some(option) = self.state.options.get(index)
        {
            self.activated.emit(option.value.clone());
        }
        if transition.selection_changed {
            self.selection_changed.emit(self.state.selected_values());
        }
    }

    /// Mirror the whole state into the view.
    fn sync(&mut self) {
        let open = self.state.is_open();
        self.view
            .set_attribute(ControlPart::Root, Attribute::DataOpen(open));
        self.view
            .set_attribute(ControlPart::Trigger, Attribute::Expanded(open));
        self.view
            .set_attribute(ControlPart::Menu, Attribute::AriaHidden(!open));

        for (index, option) in self.state.options.iter().enumerate() {
            let part = ControlPart::Option(index);
            self.view.set_attribute(
                part,
                Attribute::Selected(self.state.selected.contains(&option.value)),
            );
            self.view.set_attribute(
                part,
                Attribute::Hidden(!option.matches(&self.state.search_term)),
            );
        }

        self.view.set_value_text(&self.state.display_text());
        if self.state.mode == SelectionMode::Multi && self.state.has_token_host {
            self.view.set_tokens(&self.state.tokens());
        }
    }
}

impl<V: ControlView + std::fmt::Debug> std::fmt::Debug for SelectableControl<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectableControl")
            .field("state", &self.state)
            .field("view", &self.view)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
