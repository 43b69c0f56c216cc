pub mod schema;

pub use schema::{BarConfig, DecorationConfig, GlobalConfig, ModuleConfig, Position, ThemeConfig};

use obsidian_core::{BarError, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "OBSIDIANBAR_CONFIG";

/// Load configuration from a TOML file.  Returns `BarConfig::default()` if
/// the file doesn't exist so the bar always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<BarConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(BarConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| BarError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: BarConfig =
        toml::from_str(&raw).map_err(|e| BarError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;

    tracing::info!("Loaded config from '{}'", path.display());
    Ok(config)
}

/// Return the config path: `$OBSIDIANBAR_CONFIG` if set, otherwise
/// `$XDG_CONFIG_HOME/obsidianbar/config.toml`.
pub fn default_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("obsidianbar").join("config.toml")
}
