//! The bar's main loop.
//!
//! `Starting → Running → ShuttingDown → Stopped`. A [`Driver`] only exists
//! while `Running`; [`Driver::run`] consumes it on the way to `Stopped`.
//!
//! Each running iteration refreshes every module, draws a frame and redraws
//! once per pending display event. Until the next tick is due the display is
//! polled every [`EVENT_POLL`], and each event found is redrawn from the
//! current buffers. The shutdown flag is read at the top of an iteration and
//! while waiting, so a started refresh/draw always completes.

use crate::canvas::Backend;
use crate::frame::draw_frame;
use crate::layout::BarLayout;
use obsidian_config::BarConfig;
use obsidian_core::{refresh_all, Registry, Result, ShutdownFlag};
use obsidian_theme::Theme;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// How often the display is polled for events between ticks.
pub const EVENT_POLL: Duration = Duration::from_millis(10);

/// Lifecycle of the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Running,
    ShuttingDown,
    Stopped,
}

/// Everything the loop needs besides the display backend.
#[derive(Debug)]
pub struct BarSetup {
    pub registry: Registry,
    pub layout: BarLayout,
    pub theme: Theme,
    pub interval: Duration,
}

impl BarSetup {
    pub fn from_config(config: &BarConfig, registry: Registry) -> Self {
        Self {
            registry,
            layout: BarLayout::from_config(config),
            theme: Theme::from_config(config),
            interval: Duration::from_secs(config.global.interval_secs),
        }
    }
}

/// Owns the backend and the module registry for the life of the process.
pub struct Driver<B: Backend> {
    backend: B,
    setup: BarSetup,
    shutdown: ShutdownFlag,
}

impl<B: Backend> Driver<B> {
    /// Acquire the backend and enter `Running`.
    ///
    /// Acquisition failure is returned as-is; nothing has been drawn yet.
    pub fn start<F>(acquire: F, setup: BarSetup, shutdown: ShutdownFlag) -> Result<Self>
    where
        F: FnOnce() -> Result<B>,
    {
        debug!(phase = ?Phase::Starting, "acquiring display resources");
        let backend = acquire()?;
        info!(
            phase = ?Phase::Running,
            modules = setup.registry.len(),
            interval_ms = setup.interval.as_millis() as u64,
            "Bar running"
        );

        Ok(Self {
            backend,
            setup,
            shutdown,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.setup.registry
    }

    /// One loop iteration without the sleep: refresh, draw, handle events.
    pub fn tick(&mut self) -> Result<()> {
        refresh_all(&mut self.setup.registry);
        self.redraw()?;
        self.serve_events()
    }

    /// Redraw once per pending display event. Buffers are not refreshed.
    pub fn serve_events(&mut self) -> Result<()> {
        for event in self.backend.drain_events()? {
            debug!(?event, "redrawing for display event");
            self.redraw()?;
        }
        Ok(())
    }

    /// Draw the last-refreshed buffers without refreshing them.
    pub fn redraw(&mut self) -> Result<()> {
        draw_frame(
            &mut self.backend,
            &self.setup.registry,
            &self.setup.layout,
            &self.setup.theme,
        )
    }

    /// Run until shutdown is requested or the backend fails, then release
    /// the backend exactly once.
    pub async fn run(mut self) -> Result<()> {
        let outcome = self.run_until_shutdown().await;

        if let Err(e) = &outcome {
            error!("Main loop stopped on error: {e}");
        }
        info!(phase = ?Phase::ShuttingDown, "Shutting down");

        let released = self.backend.release();
        info!(phase = ?Phase::Stopped, "Display resources released");

        match (outcome, released) {
            (Err(e), Err(release_err)) => {
                error!("Releasing display resources also failed: {release_err}");
                Err(e)
            }
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Ok(()), Ok(())) => Ok(()),
        }
    }

    async fn run_until_shutdown(&mut self) -> Result<()> {
        while !self.shutdown.is_requested() {
            self.tick()?;
            self.wait_for_next_tick().await?;
        }
        info!("Shutdown requested");
        Ok(())
    }

    /// Sleep out the tick interval in [`EVENT_POLL`] slices, serving display
    /// events after each one. Returns early once shutdown is requested.
    async fn wait_for_next_tick(&mut self) -> Result<()> {
        let deadline = Instant::now() + self.setup.interval;
        loop {
            let now = Instant::now();
            if now >= deadline || self.shutdown.is_requested() {
                return Ok(());
            }
            tokio::time::sleep(EVENT_POLL.min(deadline - now)).await;
            self.serve_events()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, FontMetrics, Rect};
    use crate::testing::{Op, RecordingCanvas};
    use obsidian_core::{BarError, BarEvent, Producer, Zone};
    use obsidian_theme::Color;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Shared view into a [`FakeBackend`] that outlives the driver.
    #[derive(Debug, Default)]
    struct Log {
        canvas: RecordingCanvas,
        drains: u32,
        releases: u32,
        pending: Vec<Vec<BarEvent>>,
        stop_after: Option<u32>,
        fail_drain: bool,
    }

    struct FakeBackend {
        log: Rc<RefCell<Log>>,
        shutdown: ShutdownFlag,
    }

    impl Canvas for FakeBackend {
        fn bar_width(&self) -> i32 {
            self.log.borrow().canvas.bar_width()
        }

        fn font_metrics(&self) -> FontMetrics {
            self.log.borrow().canvas.font_metrics()
        }

        fn measure_text(&mut self, text: &str) -> Result<i32> {
            self.log.borrow_mut().canvas.measure_text(text)
        }

        fn fill_rectangle(&mut self, rect: Rect, color: Color) -> Result<()> {
            self.log.borrow_mut().canvas.fill_rectangle(rect, color)
        }

        fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) -> Result<()> {
            self.log.borrow_mut().canvas.draw_text(x, y, text, color)
        }

        fn present(&mut self) -> Result<()> {
            self.log.borrow_mut().canvas.present()
        }
    }

    impl Backend for FakeBackend {
        fn drain_events(&mut self) -> Result<Vec<BarEvent>> {
            let mut log = self.log.borrow_mut();
            log.drains += 1;
            if log.fail_drain {
                return Err(BarError::Display("connection lost".into()));
            }
            if log.stop_after == Some(log.drains) {
                self.shutdown.request();
            }
            Ok(if log.pending.is_empty() {
                Vec::new()
            } else {
                log.pending.remove(0)
            })
        }

        fn release(self) -> Result<()> {
            self.log.borrow_mut().releases += 1;
            Ok(())
        }
    }

    #[derive(Debug, Clone)]
    struct Counting(Arc<AtomicU32>);

    impl Producer for Counting {
        fn produce(&mut self) -> String {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            format!("n={n}")
        }
    }

    type Harness = (Driver<FakeBackend>, Rc<RefCell<Log>>, ShutdownFlag, Arc<AtomicU32>);

    fn harness(log: Log) -> Harness {
        harness_with_interval(log, Duration::ZERO)
    }

    fn harness_with_interval(log: Log, interval: Duration) -> Harness {
        let log = Rc::new(RefCell::new(log));
        let calls = Arc::new(AtomicU32::new(0));
        let shutdown = ShutdownFlag::new();

        let registry = Registry::builder()
            .with("counter", Zone::Left, Box::new(Counting(calls.clone())))
            .build();
        let mut setup = BarSetup::from_config(&BarConfig::default(), registry);
        setup.interval = interval;

        let backend = FakeBackend {
            log: log.clone(),
            shutdown: shutdown.clone(),
        };
        let driver = Driver::start(|| Ok(backend), setup, shutdown.clone()).unwrap();
        (driver, log, shutdown, calls)
    }

    fn texts(log: &Log) -> Vec<String> {
        log.canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, _, text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_neither_refreshes_nor_draws() {
        let (driver, log, _, calls) = harness(Log::default());
        assert!(driver.registry().iter().all(|m| m.text().is_empty()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(log.borrow().canvas.ops.is_empty());
    }

    #[test]
    fn acquisition_failure_is_returned() {
        let setup = BarSetup::from_config(&BarConfig::default(), Registry::default());
        let result: Result<Driver<FakeBackend>> = Driver::start(
            || Err(BarError::Display("cannot open display".into())),
            setup,
            ShutdownFlag::new(),
        );
        assert!(matches!(result, Err(BarError::Display(_))));
    }

    #[test]
    fn expose_redraws_without_refreshing() {
        let (mut driver, log, _, calls) = harness(Log {
            pending: vec![vec![BarEvent::Expose]],
            ..Log::default()
        });

        driver.tick().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let log = log.borrow();
        assert_eq!(texts(&log), ["n=1", "n=1"]);
        let presents = log.canvas.ops.iter().filter(|op| **op == Op::Present).count();
        assert_eq!(presents, 2);
    }

    #[test]
    fn every_event_gets_its_own_frame() {
        let (mut driver, log, _, calls) = harness(Log {
            pending: vec![vec![
                BarEvent::Expose,
                BarEvent::Resize {
                    width: 80,
                    height: 24,
                },
            ]],
            ..Log::default()
        });

        driver.tick().unwrap();
        driver.tick().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(texts(&log.borrow()), ["n=1", "n=1", "n=1", "n=2"]);
    }

    #[tokio::test]
    async fn shutdown_finishes_the_iteration_then_releases_once() {
        let (driver, log, shutdown, calls) = harness(Log {
            stop_after: Some(2),
            ..Log::default()
        });

        driver.run().await.unwrap();

        assert!(shutdown.is_requested());
        let log = log.borrow();
        // The request arrives during iteration 2, which still completes.
        assert_eq!(log.drains, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(log.releases, 1);
    }

    #[tokio::test]
    async fn events_between_ticks_are_drawn_before_the_next_refresh() {
        // Long interval: the Expose must not wait for tick 2.
        let (driver, log, _, calls) = harness_with_interval(
            Log {
                pending: vec![vec![], vec![BarEvent::Expose]],
                stop_after: Some(3),
                ..Log::default()
            },
            Duration::from_secs(10),
        );

        let started = Instant::now();
        driver.run().await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let log = log.borrow();
        assert_eq!(texts(&log), ["n=1", "n=1"]);
        assert_eq!(log.drains, 3);
        assert_eq!(log.releases, 1);
    }

    #[tokio::test]
    async fn shutdown_during_the_wait_skips_the_rest_of_the_interval() {
        let (driver, log, _, calls) = harness_with_interval(
            Log {
                stop_after: Some(2),
                ..Log::default()
            },
            Duration::from_secs(10),
        );

        let started = Instant::now();
        driver.run().await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(log.borrow().releases, 1);
    }

    #[tokio::test]
    async fn shutdown_before_first_tick_draws_nothing() {
        let (driver, log, shutdown, calls) = harness(Log::default());
        shutdown.request();

        driver.run().await.unwrap();

        let log = log.borrow();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(log.canvas.ops.is_empty());
        assert_eq!(log.releases, 1);
    }

    #[tokio::test]
    async fn backend_errors_still_release() {
        let (driver, log, ..) = harness(Log {
            fail_drain: true,
            ..Log::default()
        });

        let result = driver.run().await;

        assert!(matches!(result, Err(BarError::Display(_))));
        assert_eq!(log.borrow().releases, 1);
    }
}
