//! obsidianbar: a small X11 status bar with clock, date, battery, volume
//! and memory modules.
//!
//! Run with:  `RUST_LOG=info obsidianbar`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging. RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("obsidianbar v{} starting", env!("CARGO_PKG_VERSION"));

    obsidian_x11::run().map_err(Into::into)
}
