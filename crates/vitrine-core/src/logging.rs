//! Logging facilities for Vitrine.
//!
//! Vitrine uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; the host application does:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("vitrine::widget=debug,vitrine_net=info")
//!     .init();
//! ```
//!
//! Widget state transitions are logged at `trace`/`debug`, fragment fetch
//! failures at `error`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "vitrine_core::signal";
    /// Selectable control (dropdown / multiselect) target.
    pub const SELECTABLE: &str = "vitrine::widget::selectable";
    /// Mobile navigation menu target.
    pub const MENU: &str = "vitrine::widget::menu";
    /// Scroll slider target.
    pub const SLIDER: &str = "vitrine::widget::slider";
    /// Step connector-line layout target.
    pub const STEP_LINES: &str = "vitrine::widget::step_lines";
    /// Markup scanning target.
    pub const MARKUP: &str = "vitrine::markup";
    /// Configuration loading target.
    pub const CONFIG: &str = "vitrine::config";
    /// Header/footer fragment loader target.
    pub const FRAGMENT: &str = "vitrine_net::fragment";
}
