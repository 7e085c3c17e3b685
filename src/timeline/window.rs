use anyhow::{ensure, Result};
use chrono::{DateTime, Days, Duration, NaiveDate, Utc};

/// The reporting boundary a timeline is normalized against.
///
/// All dashboard views anchor their window to 08:00 UTC of a calendar date;
/// they differ only in where the window ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

const DAY_START_HOUR: u32 = 8;

fn at_hour(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    // Hour constants in this module are all < 24, so this cannot fail.
    date.and_hms_opt(hour, 0, 0)
        .expect("valid wall-clock hour")
        .and_utc()
}

impl ReportWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        ensure!(start < end, "invalid window: start {start} >= end {end}");
        Ok(Self { start, end })
    }

    /// Working hours of a single day: 08:00–18:00 UTC. Used by the
    /// per-machine step chart.
    pub fn working_hours(date: NaiveDate) -> Self {
        Self {
            start: at_hour(date, DAY_START_HOUR),
            end: at_hour(date, 18),
        }
    }

    /// A full shift day: 08:00 UTC to 08:00 UTC the next morning. Used by the
    /// workshop production timeline.
    pub fn shift_day(date: NaiveDate) -> Self {
        Self {
            start: at_hour(date, DAY_START_HOUR),
            end: at_hour(date + Days::new(1), DAY_START_HOUR),
        }
    }

    /// The daily report's span: 08:00–20:00 UTC.
    pub fn report_span(date: NaiveDate) -> Self {
        Self {
            start: at_hour(date, DAY_START_HOUR),
            end: at_hour(date, 20),
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}
