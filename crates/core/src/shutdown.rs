use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative termination flag shared between the signal listener and the
/// main loop.
///
/// Setting it never interrupts work in progress; the loop reads it once at
/// the top of each iteration.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag {
    requested: Arc<AtomicBool>,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}
