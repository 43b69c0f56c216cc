use crate::{Probe, ProbeError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Battery charge and estimated time left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatteryReading {
    /// Charge level, 0–100.
    pub percent: u8,
    /// Minutes until empty (discharging) or full (charging); 0 when unknown.
    pub minutes_remaining: u32,
}

/// Reads battery state from the Linux sysfs power-supply interface.
///
/// Uses the first of `BAT0`..`BAT2` that exists.
#[derive(Debug, Clone)]
pub struct SysfsBattery {
    root: PathBuf,
}

impl SysfsBattery {
    pub const DEFAULT_ROOT: &'static str = "/sys/class/power_supply";

    pub fn new() -> Self {
        Self::with_root(Self::DEFAULT_ROOT)
    }

    /// Probe a different power-supply directory (used by tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn battery_dir(&self) -> Option<PathBuf> {
        ["BAT0", "BAT1", "BAT2"]
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.exists())
    }
}

impl Default for SysfsBattery {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for SysfsBattery {
    type Reading = BatteryReading;

    fn read(&mut self) -> Result<BatteryReading, ProbeError> {
        let base = self.battery_dir().ok_or_else(|| {
            ProbeError::Unavailable(format!("no battery under '{}'", self.root.display()))
        })?;

        let percent = read_number(&base, "capacity")?.min(100) as u8;
        let status = read_attr(&base, "status").unwrap_or_default();

        Ok(BatteryReading {
            percent,
            minutes_remaining: minutes_remaining(&base, &status),
        })
    }
}

/// Estimate minutes left from `energy_*`/`power_now` (µWh, µW) or, on
/// batteries that only expose charge, `charge_*`/`current_now` (µAh, µA).
fn minutes_remaining(base: &Path, status: &str) -> u32 {
    let triple = |now: &str, full: &str, rate: &str| -> Option<(u64, u64, u64)> {
        Some((
            read_number(base, now).ok()?,
            read_number(base, full).ok()?,
            read_number(base, rate).ok()?,
        ))
    };

    let Some((now, full, rate)) = triple("energy_now", "energy_full", "power_now")
        .or_else(|| triple("charge_now", "charge_full", "current_now"))
    else {
        debug!(battery = %base.display(), "no energy or charge rate files; time unknown");
        return 0;
    };
    if rate == 0 {
        return 0;
    }

    let remaining = match status {
        "Discharging" => now,
        "Charging" => full.saturating_sub(now),
        _ => return 0,
    };
    u32::try_from(remaining * 60 / rate).unwrap_or(u32::MAX)
}

fn read_attr(base: &Path, name: &str) -> Result<String, ProbeError> {
    Ok(std::fs::read_to_string(base.join(name))?.trim().to_string())
}

fn read_number(base: &Path, name: &str) -> Result<u64, ProbeError> {
    let raw = read_attr(base, name)?;
    raw.parse::<u64>()
        .map_err(|e| ProbeError::Malformed(format!("{name} = '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn battery(files: &[(&str, &str)]) -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let bat = root.path().join("BAT0");
        fs::create_dir(&bat).unwrap();
        for (name, value) in files {
            fs::write(bat.join(name), format!("{value}\n")).unwrap();
        }
        root
    }

    #[test]
    fn discharging_energy_battery() {
        let root = battery(&[
            ("capacity", "75"),
            ("status", "Discharging"),
            ("energy_now", "30000000"),
            ("energy_full", "40000000"),
            ("power_now", "12000000"),
        ]);
        let reading = SysfsBattery::with_root(root.path()).read().unwrap();
        assert_eq!(reading, BatteryReading { percent: 75, minutes_remaining: 150 });
    }

    #[test]
    fn charging_charge_battery_counts_time_to_full() {
        let root = battery(&[
            ("capacity", "50"),
            ("status", "Charging"),
            ("charge_now", "2000000"),
            ("charge_full", "4000000"),
            ("current_now", "1000000"),
        ]);
        let reading = SysfsBattery::with_root(root.path()).read().unwrap();
        assert_eq!(reading.minutes_remaining, 120);
    }

    #[test]
    fn full_or_idle_battery_has_no_estimate() {
        let root = battery(&[
            ("capacity", "100"),
            ("status", "Full"),
            ("energy_now", "40000000"),
            ("energy_full", "40000000"),
            ("power_now", "0"),
        ]);
        let reading = SysfsBattery::with_root(root.path()).read().unwrap();
        assert_eq!(reading, BatteryReading { percent: 100, minutes_remaining: 0 });
    }

    #[test]
    fn missing_rate_files_still_report_percent() {
        let root = battery(&[("capacity", "42")]);
        let reading = SysfsBattery::with_root(root.path()).read().unwrap();
        assert_eq!(reading, BatteryReading { percent: 42, minutes_remaining: 0 });
    }

    #[test]
    fn no_battery_is_unavailable() {
        let root = tempfile::tempdir().unwrap();
        let err = SysfsBattery::with_root(root.path()).read().unwrap_err();
        assert!(matches!(err, ProbeError::Unavailable(_)));
    }

    #[test]
    fn garbage_capacity_is_malformed() {
        let root = battery(&[("capacity", "lots")]);
        let err = SysfsBattery::with_root(root.path()).read().unwrap_err();
        assert!(matches!(err, ProbeError::Malformed(_)));
    }
}
