//! Shared types passed from the scanner to the rendering layer.
//!
//! [`ImageRecord`] is also the wire format: it is serialized into the page
//! for the lightbox script, printed by `scan --json`, and returned by
//! `GET /api/images`. The JSON field names (`filename`, `filepath`, `size`,
//! `width`, `height`) and their units (bytes, pixels) are the compatibility
//! contract; nothing else about the struct is.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// One image discovered by a directory scan.
///
/// Records are built fresh on every scan and never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    /// Base name of the file. Doubles as display label and alt text.
    pub filename: String,
    /// Location to re-open or fetch the file. Same as `filename` since
    /// scanning never descends into subdirectories.
    #[serde(rename = "filepath")]
    pub path: String,
    /// Raw file size in bytes, from the filesystem stat.
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// Intrinsic width in pixels, `0` when unknown.
    pub width: u32,
    /// Intrinsic height in pixels, `0` when unknown.
    pub height: u32,
    /// Modification time at scan; only used for ordering.
    #[serde(skip)]
    pub modified: SystemTime,
}

impl ImageRecord {
    /// Both dimensions were recovered from the file.
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Color theme of the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a request value: `"dark"` selects dark, anything else light.
    pub fn from_param(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    /// Strict parse for CLI flags, unlike the lenient [`Theme::from_param`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

/// Per-request presentation toggles consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub show_info: bool,
}
