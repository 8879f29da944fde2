//! Selection filters over processed records.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::model::RunRecord;

/// Keep records whose algorithm equals `algorithm`, ignoring case.
/// `"all"` or an empty string keeps everything.
pub fn filter_by_algorithm<R: RunRecord + Clone>(records: &[R], algorithm: &str) -> Vec<R> {
    let wanted = algorithm.trim();
    if wanted.is_empty() || wanted.eq_ignore_ascii_case("all") {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| r.algorithm().eq_ignore_ascii_case(wanted))
        .cloned()
        .collect()
}

/// Recency window for [`filter_by_time_range`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    #[default]
    All,
}

impl TimeRange {
    /// Parse a range name. Anything unrecognized means no filtering.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => TimeRange::Day,
            "week" => TimeRange::Week,
            "month" => TimeRange::Month,
            _ => TimeRange::All,
        }
    }

    /// Window length, `None` for [`TimeRange::All`].
    pub fn window(&self) -> Option<Duration> {
        match self {
            TimeRange::Day => Some(Duration::hours(24)),
            TimeRange::Week => Some(Duration::days(7)),
            TimeRange::Month => Some(Duration::days(30)),
            TimeRange::All => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::All => "all",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keep records at or after `now - window`, relative to the current time.
pub fn filter_by_time_range<R: RunRecord + Clone>(records: &[R], range: TimeRange) -> Vec<R> {
    filter_by_time_range_at(records, range, Utc::now())
}

/// Same as [`filter_by_time_range`] with an explicit `now`.
///
/// With a bounded range, records whose timestamp cannot be parsed are dropped.
pub fn filter_by_time_range_at<R: RunRecord + Clone>(
    records: &[R],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<R> {
    let Some(window) = range.window() else {
        return records.to_vec();
    };
    let cutoff = now - window;
    records
        .iter()
        .filter(|r| parse_timestamp(r.timestamp()).is_some_and(|t| t >= cutoff))
        .cloned()
        .collect()
}

/// Parse an ISO-8601 timestamp. RFC 3339 with offset is preferred; naive
/// date-times and bare dates are taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}
