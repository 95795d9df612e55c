//! Gallery configuration.
//!
//! Handles loading, validating, and merging `gallery.toml`. Stock defaults
//! are overridden by an optional `gallery.toml` in the scanned directory.
//! The file is never listed by the gallery itself (it is not an image).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Instant Image Gallery"
//!
//! [display]
//! theme = "light"           # Theme when the visitor has no preference
//! show_info = false         # Show filename/size/dimension overlays
//!
//! [server]
//! bind = "127.0.0.1"
//! port = 8080
//!
//! [colors.light]
//! background = "#f3f4f6"
//! surface = "#ffffff"       # Header, cards, modal
//! text = "#1f2937"
//! text_muted = "#6b7280"    # Counts, captions, empty state
//! border = "#e5e7eb"
//! accent = "#3b82f6"        # Badges, scroll-to-top button
//!
//! [colors.dark]
//! background = "#0f172a"
//! surface = "#1e293b"
//! text = "#e5e7eb"
//! text_muted = "#9ca3af"
//! border = "#334155"
//! accent = "#3b82f6"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown
//! keys are rejected to catch typos early.

use crate::types::{RenderOptions, Theme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the gallery directory.
pub const CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Page title and header heading.
    pub title: String,
    /// Default presentation toggles.
    pub display: DisplayConfig,
    /// Listen address for `serve`.
    pub server: ServerConfig,
    /// Color schemes for light and dark themes.
    pub colors: ColorConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "Instant Image Gallery".to_string(),
            display: DisplayConfig::default(),
            server: ServerConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        self.server.socket_addr()?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".into(),
            ));
        }
        for (name, scheme) in [("light", &self.colors.light), ("dark", &self.colors.dark)] {
            if let Some(field) = scheme.first_empty_field() {
                return Err(ConfigError::Validation(format!(
                    "colors.{name}.{field} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Presentation defaults, used when a request does not specify them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Theme for visitors without a saved preference.
    pub theme: Theme,
    /// Whether info overlays are shown without `?show_info=true`.
    pub show_info: bool,
}

impl DisplayConfig {
    /// Presentation for one render: explicit choices win, each unset
    /// toggle falls back to its configured default.
    pub fn render_options(&self, theme: Option<Theme>, show_info: Option<bool>) -> RenderOptions {
        RenderOptions {
            theme: theme.unwrap_or(self.theme),
            show_info: show_info.unwrap_or(self.show_info),
        }
    }
}

/// HTTP listen settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// IP address to bind, e.g. `"127.0.0.1"` or `"0.0.0.0"`.
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Parse `bind` + `port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "server.bind '{}' is not an IP address",
                self.bind
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Color configuration for light and dark themes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Header, cards, and modal background.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (image count, captions, empty state).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Badges and the scroll-to-top button.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f3f4f6".to_string(),
            surface: "#ffffff".to_string(),
            text: "#1f2937".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#e5e7eb".to_string(),
            accent: "#3b82f6".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0f172a".to_string(),
            surface: "#1e293b".to_string(),
            text: "#e5e7eb".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#334155".to_string(),
            accent: "#3b82f6".to_string(),
        }
    }

    fn first_empty_field(&self) -> Option<&'static str> {
        [
            ("background", &self.background),
            ("surface", &self.surface),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
            ("border", &self.border),
            ("accent", &self.accent),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `gallery.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `gallery.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config for the gallery in `dir`: stock defaults plus `gallery.toml`.
pub fn load_config(dir: &Path) -> Result<GalleryConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Instant Gallery Configuration
# =============================
# Place this file in the gallery directory as gallery.toml.
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Page title and header heading.
title = "Instant Image Gallery"

# ---------------------------------------------------------------------------
# Display defaults
# ---------------------------------------------------------------------------
[display]
# Theme for visitors without a saved preference: "light" or "dark".
# Visitors switch with the header toggle (remembered in a cookie for 30 days).
theme = "light"

# Show filename, size and dimensions on hover and in the lightbox.
# Visitors switch with the header toggle (?show_info=true|false).
show_info = false

# ---------------------------------------------------------------------------
# HTTP server (serve command)
# ---------------------------------------------------------------------------
[server]
bind = "127.0.0.1"
port = 8080

# ---------------------------------------------------------------------------
# Colors - Light theme
# ---------------------------------------------------------------------------
[colors.light]
background = "#f3f4f6"
surface = "#ffffff"       # Header, cards, modal
text = "#1f2937"
text_muted = "#6b7280"    # Counts, captions, empty state
border = "#e5e7eb"
accent = "#3b82f6"        # Badges, scroll-to-top button

# ---------------------------------------------------------------------------
# Colors - Dark theme
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0f172a"
surface = "#1e293b"
text = "#e5e7eb"
text_muted = "#9ca3af"
border = "#334155"
accent = "#3b82f6"
"##
}

/// Generate CSS custom properties from color config.
///
/// Light colors apply to `:root`; the dark scheme applies when the `<html>`
/// element carries the `dark` class.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{}}}\n\nhtml.dark {{\n{}}}",
        scheme_properties(&colors.light),
        scheme_properties(&colors.dark),
    )
}

fn scheme_properties(scheme: &ColorScheme) -> String {
    format!(
        "    --color-bg: {};\n    --color-surface: {};\n    --color-text: {};\n    --color-text-muted: {};\n    --color-border: {};\n    --color-accent: {};\n",
        scheme.background,
        scheme.surface,
        scheme.text,
        scheme.text_muted,
        scheme.border,
        scheme.accent,
    )
}
