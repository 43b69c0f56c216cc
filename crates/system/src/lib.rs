//! System probes backing the battery, volume and memory modules.
//!
//! Each probe answers one question about the machine and reports failure as a
//! [`ProbeError`]. Probes never format text; that is the module's job.

pub mod battery;
pub mod memory;
pub mod volume;

pub use battery::{BatteryReading, SysfsBattery};
pub use memory::{MemoryReading, SysinfoMemory};
pub use volume::{VolumeReading, WpctlVolume};

use thiserror::Error;

/// Why a probe could not produce a reading.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The data source does not exist here (no battery, no PipeWire, ...).
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The data source answered with something we could not parse.
    #[error("malformed reading: {0}")]
    Malformed(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// A narrow query against the running system.
pub trait Probe: Send + std::fmt::Debug {
    type Reading;

    /// Take a fresh reading. May block (file read, process spawn).
    fn read(&mut self) -> Result<Self::Reading, ProbeError>;
}
