use chrono::{DateTime, Local, TimeZone};
use obsidian_core::Producer;
use std::fmt::Display;

/// Displays the current local time as `HH:MM:SS` (24-hour).
#[derive(Debug, Clone, Copy)]
pub struct ClockSource {
    now: fn() -> DateTime<Local>,
}

impl ClockSource {
    pub fn new() -> Self {
        Self::with_time_source(Local::now)
    }

    /// Read time from `now` instead of the system clock.
    pub fn with_time_source(now: fn() -> DateTime<Local>) -> Self {
        Self { now }
    }
}

impl Default for ClockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Producer for ClockSource {
    fn produce(&mut self) -> String {
        format_clock(&(self.now)())
    }
}

pub fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format("%H:%M:%S").to_string()
}
