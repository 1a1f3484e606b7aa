//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dashboard
//! shell. All types derive Serde traits for deserialization from config files,
//! and every section is defaulted so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the dashboard shell.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Development server settings (bind address, hot reload, watching).
    pub server: ServerConfig,

    /// Where view modules are loaded from and whether they are memoized.
    pub views: ViewsConfig,

    /// Colour tokens and dark mode strategy.
    pub theme: ThemeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Development server configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5173").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Reload theme and views when the config file changes.
    pub hot_reload: bool,

    /// Use a polling watcher instead of native file events.
    /// Needed on network mounts and in some containers.
    pub use_polling: bool,

    /// Polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Clear the terminal on startup.
    pub clear_screen: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5173".to_string(),
            request_timeout_secs: 30,
            hot_reload: true,
            use_polling: true,
            poll_interval_ms: 1000,
            clear_screen: false,
        }
    }
}

/// View module source configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Directory holding `<View>.html` templates. Builtin views when unset.
    pub dir: Option<PathBuf>,

    /// Memoize loaded view modules.
    pub cache: bool,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            cache: true,
        }
    }
}

/// How dark mode is switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// Toggled by a `dark` class on the document root.
    #[default]
    Class,
    /// Follows the `prefers-color-scheme` media query.
    Media,
}

/// A colour with its light and dark shades.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColorScale {
    pub light: String,
    pub default: String,
    pub dark: String,
}

impl ColorScale {
    fn new(light: &str, default: &str, dark: &str) -> Self {
        Self {
            light: light.to_string(),
            default: default.to_string(),
            dark: dark.to_string(),
        }
    }
}

/// Named colour scales available to views.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Palette {
    pub primary: ColorScale,
    pub secondary: ColorScale,
    pub dark: ColorScale,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: ColorScale::new("#4B6BFB", "#3659E3", "#2A4DE0"),
            secondary: ColorScale::new("#FF7D51", "#FF6B3D", "#FF5A29"),
            dark: ColorScale::new("#2C3E50", "#1E293B", "#0F172A"),
        }
    }
}

impl Palette {
    /// Iterate the scales with their token names.
    pub fn scales(&self) -> [(&'static str, &ColorScale); 3] {
        [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("dark", &self.dark),
        ]
    }
}

/// Theme configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Dark mode strategy.
    pub dark_mode: DarkMode,

    /// Start in dark mode (only meaningful for `DarkMode::Class`).
    pub start_dark: bool,

    /// Colour tokens.
    pub colors: Palette,
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human readable format.
    pub json: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.theme.colors.primary.default, "#3659E3");
        assert_eq!(config.theme.dark_mode, DarkMode::Class);
        assert!(config.server.use_polling);
        assert!(!config.server.clear_screen);
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r##"
            [server]
            bind_address = "0.0.0.0:8080"

            [theme]
            dark_mode = "media"

            [theme.colors.secondary]
            light = "#000001"
            default = "#000002"
            dark = "#000003"
            "##,
        )
        .unwrap();

        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.theme.dark_mode, DarkMode::Media);
        assert_eq!(config.theme.colors.secondary.default, "#000002");
        // Untouched scales keep their defaults
        assert_eq!(config.theme.colors.dark.dark, "#0F172A");
    }
}
