use obsidian_core::Producer;
use obsidian_system::{memory::MemoryReading, Probe, SysinfoMemory};
use tracing::debug;

/// Displays RAM usage as `Mem: UM/TM` (mebibytes).
#[derive(Debug, Default)]
pub struct MemorySource<P = SysinfoMemory> {
    probe: P,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::with_probe(SysinfoMemory::new())
    }
}

impl<P> MemorySource<P>
where
    P: Probe<Reading = MemoryReading>,
{
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }
}

impl<P> Producer for MemorySource<P>
where
    P: Probe<Reading = MemoryReading>,
{
    fn produce(&mut self) -> String {
        let reading = self.probe.read().unwrap_or_else(|e| {
            debug!("memory probe failed: {e}");
            MemoryReading::default()
        });
        format_memory(reading)
    }

    fn fallback(&self) -> &str {
        "Mem: 0M/0M"
    }
}

pub fn format_memory(reading: MemoryReading) -> String {
    format!("Mem: {}M/{}M", reading.used_mib(), reading.total_mib())
}
