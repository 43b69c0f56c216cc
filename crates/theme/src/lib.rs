pub mod colors;

pub use colors::Color;

use obsidian_config::BarConfig;

/// Compiled theme derived from [`BarConfig`].
///
/// All colors are pre-parsed from hex strings. Calling
/// [`Theme::from_config`] is infallible: invalid color strings fall back to
/// safe defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    /// Color of the per-module decoration line.
    pub decoration: Color,
}

impl Theme {
    /// Build a [`Theme`] from the `[theme]` and `[decoration]` sections.
    pub fn from_config(cfg: &BarConfig) -> Self {
        Self {
            background: parse_or("theme.background", &cfg.theme.background, Color::DARK),
            foreground: parse_or("theme.foreground", &cfg.theme.foreground, Color::LIGHT),
            decoration: parse_or("decoration.color", &cfg.decoration.color, Color::YELLOW),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&BarConfig::default())
    }
}

fn parse_or(key: &str, hex: &str, fallback: Color) -> Color {
    Color::from_hex(hex).unwrap_or_else(|| {
        tracing::warn!("Invalid color '{hex}' for {key}; using default");
        fallback
    })
}
