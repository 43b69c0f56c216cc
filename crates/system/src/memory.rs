use crate::{Probe, ProbeError};
use std::fmt;
use sysinfo::System;

const MIB: u64 = 1 << 20;

/// RAM usage in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryReading {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl MemoryReading {
    /// Used memory in whole mebibytes (rounded down).
    pub fn used_mib(&self) -> u64 {
        self.used_bytes / MIB
    }

    /// Total memory in whole mebibytes (rounded down).
    pub fn total_mib(&self) -> u64 {
        self.total_bytes / MIB
    }
}

/// Reads memory figures through `sysinfo`.
pub struct SysinfoMemory {
    sys: System,
}

impl SysinfoMemory {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for SysinfoMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SysinfoMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SysinfoMemory").finish_non_exhaustive()
    }
}

impl Probe for SysinfoMemory {
    type Reading = MemoryReading;

    fn read(&mut self) -> Result<MemoryReading, ProbeError> {
        self.sys.refresh_memory();

        let total_bytes = self.sys.total_memory();
        if total_bytes == 0 {
            return Err(ProbeError::Unavailable("total memory reported as 0".into()));
        }

        Ok(MemoryReading {
            used_bytes: self.sys.used_memory(),
            total_bytes,
        })
    }
}
