use chrono::{DateTime, Local, TimeZone};
use obsidian_core::Producer;
use std::fmt::Display;

/// Displays the local date as `Ddd DD Mon`, e.g. `Tue 05 Mar`.
///
/// chrono's `%a`/`%b` are always English, so the output does not depend on
/// the process locale.
#[derive(Debug, Clone, Copy)]
pub struct DateSource {
    now: fn() -> DateTime<Local>,
}

impl DateSource {
    pub fn new() -> Self {
        Self::with_time_source(Local::now)
    }

    pub fn with_time_source(now: fn() -> DateTime<Local>) -> Self {
        Self { now }
    }
}

impl Default for DateSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Producer for DateSource {
    fn produce(&mut self) -> String {
        format_date(&(self.now)())
    }
}

pub fn format_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format("%a %d %b").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn formats_weekday_day_month() {
        let t = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(format_date(&t), "Tue 05 Mar");
    }

    #[test]
    fn producer_reads_injected_time() {
        fn new_year() -> DateTime<Local> {
            Local.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap()
        }
        let mut date = DateSource::with_time_source(new_year);
        assert_eq!(date.produce(), "Sun 01 Jan");
    }
}
