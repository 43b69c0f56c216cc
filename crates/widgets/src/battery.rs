use obsidian_core::Producer;
use obsidian_system::{battery::BatteryReading, Probe, SysfsBattery};
use tracing::debug;

/// Displays battery charge and time remaining as `Bat: P% HhMm`.
///
/// Without a battery (desktop, VM) every field reads 0: `Bat: 0% 0h0m`.
#[derive(Debug, Default)]
pub struct BatterySource<P = SysfsBattery> {
    probe: P,
}

impl BatterySource {
    pub fn new() -> Self {
        Self::with_probe(SysfsBattery::new())
    }
}

impl<P> BatterySource<P>
where
    P: Probe<Reading = BatteryReading>,
{
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }
}

impl<P> Producer for BatterySource<P>
where
    P: Probe<Reading = BatteryReading>,
{
    fn produce(&mut self) -> String {
        let reading = self.probe.read().unwrap_or_else(|e| {
            debug!("battery probe failed: {e}");
            BatteryReading::default()
        });
        format_battery(reading)
    }

    fn fallback(&self) -> &str {
        "Bat: 0% 0h0m"
    }
}

pub fn format_battery(reading: BatteryReading) -> String {
    let mins = reading.minutes_remaining;
    format!("Bat: {}% {}h{}m", reading.percent, mins / 60, mins % 60)
}
