use obsidian_core::Producer;
use obsidian_system::{volume::VolumeReading, Probe, WpctlVolume};
use tracing::debug;

const UNAVAILABLE: &str = "Vol: N/A";

/// Displays the default sink volume as `Vol: V%`.
///
/// Shows `Vol: N/A` when wpctl is missing or its output cannot be parsed.
#[derive(Debug, Default)]
pub struct VolumeSource<P = WpctlVolume> {
    probe: P,
}

impl VolumeSource {
    pub fn new() -> Self {
        Self::with_probe(WpctlVolume::new())
    }
}

impl<P> VolumeSource<P>
where
    P: Probe<Reading = VolumeReading>,
{
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }
}

impl<P> Producer for VolumeSource<P>
where
    P: Probe<Reading = VolumeReading>,
{
    fn produce(&mut self) -> String {
        match self.probe.read() {
            Ok(reading) => format_volume(reading),
            Err(e) => {
                debug!("volume probe failed: {e}");
                UNAVAILABLE.to_string()
            }
        }
    }

    fn fallback(&self) -> &str {
        UNAVAILABLE
    }
}

pub fn format_volume(reading: VolumeReading) -> String {
    let pct = (reading.level * 100.0).round() as u32;
    format!("Vol: {pct}%")
}
