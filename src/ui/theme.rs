//! Theme management and ANSI escape sequence generation.
//!
//! Two themes ship with the plugin, `light` and `dark`, embedded from the
//! `themes/` directory at build time. A custom theme can be loaded from a TOML
//! file with the same shape.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#fbbf24"
//! selection_fg = "#111827"
//! selection_bg = "#f59e0b"
//! text_normal = "#e5e7eb"
//! text_dim = "#9ca3af"
//! border = "#374151"
//! search_bar_border = "#fbbf24"
//! match_highlight_fg = "#111827"
//! match_highlight_bg = "#fcd34d"
//! empty_state_fg = "#fbbf24"
//! favorite_fg = "#f87171"
//! error_fg = "#f87171"
//! accent_fg = "#60a5fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use mealdeck::storage::ThemeName;
//! use mealdeck::ui::theme::Theme;
//!
//! let theme = Theme::builtin(ThemeName::Light);
//! print!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert_eq!(theme.name, "light");
//! ```

use crate::domain::error::{MealdeckError, Result};
use crate::storage::ThemeName;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Hex color strings for every UI element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, status line and secondary columns.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Loading and empty-result messages.
    pub empty_state_fg: String,

    /// Favorite marker.
    pub favorite_fg: String,

    /// Inline fetch failures.
    pub error_fg: String,

    /// "Load more" row and links.
    pub accent_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name (`light` or `dark`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match ThemeName::parse(name)? {
            ThemeName::Light => include_str!("../../themes/light.toml"),
            ThemeName::Dark => include_str!("../../themes/dark.toml"),
        };

        toml::from_str(toml_str).ok()
    }

    /// Returns a built-in theme.
    ///
    /// # Panics
    ///
    /// Panics if an embedded theme fails to parse, which the test suite rules out.
    #[must_use]
    pub fn builtin(name: ThemeName) -> Self {
        Self::from_name(name.as_str()).expect("built-in themes always parse")
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MealdeckError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| MealdeckError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| MealdeckError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin(ThemeName::default())
    }
}
