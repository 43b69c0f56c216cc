use obsidian_core::{BarError, Result, Zone};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Global settings.
    pub global: GlobalConfig,
    /// Colors, font and spacing.
    pub theme: ThemeConfig,
    /// Optional under/overline drawn beneath each module.
    pub decoration: DecorationConfig,
    /// Modules on the left side of the bar.
    pub left: Vec<ModuleConfig>,
    /// Modules in the centre of the bar.
    pub center: Vec<ModuleConfig>,
    /// Modules on the right side of the bar (first entry is rightmost).
    pub right: Vec<ModuleConfig>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            theme: ThemeConfig::default(),
            decoration: DecorationConfig::default(),
            left: vec![ModuleConfig::new("date")],
            center: vec![ModuleConfig::new("clock")],
            right: vec![
                ModuleConfig::new("battery"),
                ModuleConfig::new("volume"),
                ModuleConfig::new("memory"),
            ],
        }
    }
}

impl BarConfig {
    /// All module entries tagged with their zone: left, then center, then
    /// right, each in file order.
    pub fn modules(&self) -> impl Iterator<Item = (Zone, &ModuleConfig)> {
        self.left
            .iter()
            .map(|m| (Zone::Left, m))
            .chain(self.center.iter().map(|m| (Zone::Center, m)))
            .chain(self.right.iter().map(|m| (Zone::Right, m)))
    }

    /// Reject values the bar cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.global.height == 0 {
            return Err(BarError::Config("global.height must be > 0".into()));
        }
        if self.global.interval_secs == 0 {
            return Err(BarError::Config("global.interval_secs must be >= 1".into()));
        }
        if self.decoration.enabled
            && (self.decoration.thickness == 0 || self.decoration.thickness > self.global.height)
        {
            return Err(BarError::Config(format!(
                "decoration.thickness must be between 1 and {} (bar height)",
                self.global.height
            )));
        }
        Ok(())
    }
}

/// Global bar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Bar height in pixels.
    pub height: u16,
    /// Whether the bar sits at the top or the bottom.
    pub position: Position,
    /// Seconds between module refreshes.
    pub interval_secs: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            height: 24,
            position: Position::Bottom,
            interval_secs: 1,
        }
    }
}

/// Bar position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    #[default]
    Bottom,
}

/// Config block for a single module instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Module type identifier: `"clock"`, `"date"`, `"battery"`, `"volume"`
    /// or `"memory"`.
    pub kind: String,
}

impl ModuleConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Bar background color (hex, e.g. `"#1d2021"`).
    pub background: String,
    /// Text color.
    pub foreground: String,
    /// X11 core font name (XLFD pattern or alias such as `"fixed"`).
    ///
    /// Core fonts are 8-bit: module text outside Latin-1 is drawn as `?`.
    /// Fontconfig names such as `"Mono-12"` are not understood and make
    /// start-up fail.
    pub font: String,
    /// Gap between the screen edge and the outermost module (pixels).
    pub padding: u16,
    /// Gap between adjacent modules (pixels).
    pub spacing: u16,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#1d2021".to_string(), // gruvbox dark bg0_h
            foreground: "#ebdbb2".to_string(), // gruvbox dark fg1
            font:       "fixed".to_string(),
            padding:    10,
            spacing:    16,
        }
    }
}

/// Thin line drawn on the inward-facing edge under each module's text span.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    pub enabled: bool,
    /// Line thickness in pixels.
    pub thickness: u16,
    /// Line color (hex).
    pub color: String,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            enabled:   false,
            thickness: 2,
            color:     "#d79921".to_string(), // gruvbox yellow
        }
    }
}
