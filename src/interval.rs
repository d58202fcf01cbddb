use chrono::{Duration, NaiveDate};
use std::fmt;

/// Half-open date range `[start, end)` that every effort and capacity query is evaluated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportInterval {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("report interval end {end} must be after start {start}")]
pub struct EmptyIntervalError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EmptyIntervalError> {
        if end <= start {
            return Err(EmptyIntervalError { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Last date still inside the interval.
    pub fn last_day(&self) -> NaiveDate {
        self.end - Duration::days(1)
    }

    /// Inclusive overlap of `first..=last` with this interval, if any.
    pub fn clamp(&self, first: NaiveDate, last: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let from = first.max(self.start);
        let to = last.min(self.last_day());
        (from <= to).then_some((from, to))
    }
}

impl fmt::Display for ReportInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_must_follow_start() {
        assert!(ReportInterval::new(d(2025, 2, 1), d(2025, 2, 1)).is_err());
        assert!(ReportInterval::new(d(2025, 2, 2), d(2025, 2, 1)).is_err());
        let interval = ReportInterval::new(d(2025, 2, 1), d(2025, 3, 1)).unwrap();
        assert_eq!(interval.last_day(), d(2025, 2, 28));
    }

    #[test]
    fn clamp_trims_to_interval() {
        let interval = ReportInterval::new(d(2025, 2, 1), d(2025, 3, 1)).unwrap();
        assert_eq!(
            interval.clamp(d(2025, 1, 20), d(2025, 2, 10)),
            Some((d(2025, 2, 1), d(2025, 2, 10)))
        );
        assert_eq!(
            interval.clamp(d(2025, 2, 20), d(2025, 3, 10)),
            Some((d(2025, 2, 20), d(2025, 2, 28)))
        );
        assert_eq!(interval.clamp(d(2025, 3, 1), d(2025, 3, 10)), None);
        assert_eq!(interval.clamp(d(2025, 1, 1), d(2025, 1, 31)), None);
    }
}
