use crate::{Probe, ProbeError};
use std::process::Command;
use tracing::debug;

/// Default sink volume as reported by PipeWire.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VolumeReading {
    /// Linear level; `1.0` is 100 %. May exceed 1.0 when over-amplified.
    pub level: f32,
    pub muted: bool,
}

/// Queries `wpctl get-volume <target>`.
#[derive(Debug, Clone)]
pub struct WpctlVolume {
    target: String,
}

impl WpctlVolume {
    pub const DEFAULT_TARGET: &'static str = "@DEFAULT_AUDIO_SINK@";

    pub fn new() -> Self {
        Self {
            target: Self::DEFAULT_TARGET.to_string(),
        }
    }
}

impl Default for WpctlVolume {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for WpctlVolume {
    type Reading = VolumeReading;

    fn read(&mut self) -> Result<VolumeReading, ProbeError> {
        let output = Command::new("wpctl")
            .args(["get-volume", &self.target])
            .output()
            .map_err(|e| ProbeError::Unavailable(format!("cannot run wpctl: {e}")))?;

        if !output.status.success() {
            debug!(
                target = %self.target,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "wpctl get-volume failed"
            );
            return Err(ProbeError::Unavailable(format!(
                "wpctl exited with {}",
                output.status
            )));
        }

        parse_wpctl(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `wpctl get-volume` output, e.g. `Volume: 0.45` or
/// `Volume: 0.45 [MUTED]`.
pub fn parse_wpctl(output: &str) -> Result<VolumeReading, ProbeError> {
    let malformed =
        || ProbeError::Malformed(format!("unexpected wpctl output '{}'", output.trim()));

    let rest = output.trim().strip_prefix("Volume:").ok_or_else(malformed)?;
    let mut fields = rest.split_whitespace();
    let level = fields
        .next()
        .and_then(|v| v.parse::<f32>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(malformed)?;
    let muted = fields.any(|f| f == "[MUTED]");

    Ok(VolumeReading { level, muted })
}
