//! Site configuration.
//!
//! All widget constants are read from a TOML file. Every table and field is
//! optional; missing values fall back to the defaults the site ships with.
//!
//! ```toml
//! [dropdown]
//! placeholder = "Select option"
//!
//! [menu]
//! desktop_breakpoint_px = 1024
//! resize_debounce_ms = 250
//! open_label = "Open menu"
//! close_label = "Close menu"
//!
//! [slider]
//! resize_debounce_ms = 100
//! clients_step = 3
//! testimonials_step = 1
//!
//! [step_lines]
//! number_height_px = 48.0
//! fallback_gap_px = 8.0
//! resize_debounce_ms = 100
//!
//! [fragments]
//! site_origin = "https://example.com/"
//! timeout_ms = 10000
//! dom_content_loaded_delay_ms = 200
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vitrine_core::logging::targets;
use vitrine_net::FragmentConfig;

use crate::widget::widgets::DEFAULT_PLACEHOLDER;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid TOML for [`SiteConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level site configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub dropdown: DropdownConfig,
    pub menu: MenuConfig,
    pub slider: SliderConfig,
    pub step_lines: StepLinesConfig,
    pub fragments: FragmentConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "site config loaded");
        Ok(config)
    }
}

/// Selectable control settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DropdownConfig {
    /// Placeholder used when the markup has none.
    pub placeholder: String,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Mobile menu settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Viewport widths above this close an open menu.
    pub desktop_breakpoint_px: u32,
    pub resize_debounce_ms: u64,
    /// Toggle label while closed.
    pub open_label: String,
    /// Toggle label while open.
    pub close_label: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            desktop_breakpoint_px: 1024,
            resize_debounce_ms: 250,
            open_label: "Open menu".to_string(),
            close_label: "Close menu".to_string(),
        }
    }
}

/// Which slider on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderKind {
    Clients,
    Testimonials,
}

/// Scroll slider settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub resize_debounce_ms: u64,
    /// Logos moved per button press.
    pub clients_step: u32,
    /// Cards moved per button press.
    pub testimonials_step: u32,
}

impl SliderConfig {
    pub fn step_for(&self, kind: SliderKind) -> u32 {
        match kind {
            SliderKind::Clients => self.clients_step,
            SliderKind::Testimonials => self.testimonials_step,
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 100,
            clients_step: 3,
            testimonials_step: 1,
        }
    }
}

/// Step connector-line settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StepLinesConfig {
    /// Height of the number badge.
    pub number_height_px: f64,
    /// Gap used when the computed gap is zero or unparsable.
    pub fallback_gap_px: f64,
    pub resize_debounce_ms: u64,
}

impl Default for StepLinesConfig {
    fn default() -> Self {
        Self {
            number_height_px: 48.0,
            fallback_gap_px: 8.0,
            resize_debounce_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.dropdown.placeholder, "Select option");
        assert_eq!(config.menu.desktop_breakpoint_px, 1024);
        assert_eq!(config.slider.step_for(SliderKind::Clients), 3);
        assert_eq!(config.slider.step_for(SliderKind::Testimonials), 1);
    }

    #[test]
    fn test_partial_override() {
        let config = SiteConfig::from_toml_str(
            r#"
            [menu]
            close_label = "Fermer le menu"

            [step_lines]
            number_height_px = 56.0
            "#,
        )
        .unwrap();
        assert_eq!(config.menu.close_label, "Fermer le menu");
        assert_eq!(config.menu.open_label, "Open menu");
        assert_eq!(config.step_lines.number_height_px, 56.0);
        assert_eq!(config.step_lines.fallback_gap_px, 8.0);
    }

    #[test]
    fn test_invalid_toml() {
        let err = SiteConfig::from_toml_str("[menu]\ndesktop_breakpoint_px = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[slider]\nclients_step = 4").unwrap();

        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.slider.clients_step, 4);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
