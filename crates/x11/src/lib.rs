//! X11 surface for `obsidianbar`.
//!
//! Owns process start-up and shutdown:
//! - config load and module registry construction
//! - display acquisition (fatal on failure)
//! - SIGINT / SIGTERM listener feeding the shutdown flag
//! - the refresh/draw main loop on a single-threaded tokio runtime

pub mod backend;

pub use backend::XBackend;

use obsidian_config::{default_path, load as load_config, BarConfig};
use obsidian_core::{Result, ShutdownFlag};
use obsidian_renderer::{BarSetup, Driver};
use obsidian_widgets::build_registry;
use tokio::signal::unix::{signal, Signal, SignalKind};
use tracing::{info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Start the bar.  Returns once a termination signal has been handled, or
/// with an error if the display could not be acquired or was lost.
pub fn run() -> Result<()> {
    let config = load_config(default_path()).unwrap_or_else(|e| {
        warn!("{e}; using default config");
        BarConfig::default()
    });

    let registry = build_registry(&config);
    let setup = BarSetup::from_config(&config, registry);
    let theme = setup.theme.clone();
    let shutdown = ShutdownFlag::new();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        // Handlers are installed before the display is touched so an early
        // signal still goes through the orderly shutdown path.
        let signals = TerminationSignals::install();
        tokio::spawn(signals.forward_to(shutdown.clone()));

        let driver = Driver::start(|| XBackend::connect(&config, &theme), setup, shutdown)?;
        driver.run().await
    })?;

    info!("obsidianbar stopped");
    Ok(())
}

// ── Signals ───────────────────────────────────────────────────────────────────

/// SIGINT and SIGTERM streams. A stream that could not be registered is
/// left out; the signal then keeps its default disposition.
struct TerminationSignals {
    interrupt: Option<Signal>,
    terminate: Option<Signal>,
}

impl TerminationSignals {
    fn install() -> Self {
        let register = |kind: SignalKind, name: &str| match signal(kind) {
            Ok(stream) => Some(stream),
            Err(e) => {
                warn!("Cannot listen for {name}: {e}");
                None
            }
        };
        Self {
            interrupt: register(SignalKind::interrupt(), "SIGINT"),
            terminate: register(SignalKind::terminate(), "SIGTERM"),
        }
    }

    /// Wait for the first signal, then ask the main loop to stop.
    async fn forward_to(mut self, shutdown: ShutdownFlag) {
        if self.interrupt.is_none() && self.terminate.is_none() {
            return;
        }
        tokio::select! {
            Some(()) = recv(&mut self.interrupt) => info!("SIGINT received"),
            Some(()) = recv(&mut self.terminate) => info!("SIGTERM received"),
            else => return,
        }
        shutdown.request();
    }
}

/// Next delivery on `stream`; pends forever when the stream is absent.
async fn recv(stream: &mut Option<Signal>) -> Option<()> {
    match stream {
        Some(stream) => stream.recv().await,
        None => std::future::pending().await,
    }
}
