//! `Retry-After` header interpretation
//!
//! The header carries either delta-seconds (`120`) or an HTTP-date
//! (`Wed, 14 Feb 2024 18:00:00 GMT`). The weekday of an HTTP-date is not
//! checked against the date. One minute of margin is added to the remaining
//! delay.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Leading `Wed, ` of an HTTP-date
static WEEKDAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{3},\s*").unwrap());

const HTTP_DATE_FORMAT: &str = "%d %b %Y %H:%M:%S GMT";

/// Absolute retry time and remaining delay computed from a `Retry-After` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryAfter {
    /// When the request may be retried
    pub at: DateTime<Utc>,
    /// Remaining wait from the reference time, margin included, never negative
    pub wait: TimeDelta,
}

impl RetryAfter {
    /// Remaining delay as `H:MM:SS`, prefixed with days when longer than one
    pub fn delay_label(&self) -> String {
        format_delay(self.wait)
    }

    /// Absolute retry time as `YYYY-MM-DD HH:MM:SS`
    pub fn at_label(&self) -> String {
        self.at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Parses a `Retry-After` value relative to `now`
///
/// Returns `None` for values that are neither delta-seconds nor an HTTP-date.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<RetryAfter> {
    let value = value.trim();

    let at = match value.parse::<i64>() {
        Ok(seconds) => now.checked_add_signed(TimeDelta::try_seconds(seconds)?)?,
        Err(_) => {
            let without_weekday = WEEKDAY_RE.replace(value, "");
            NaiveDateTime::parse_from_str(&without_weekday, HTTP_DATE_FORMAT)
                .ok()?
                .and_utc()
        }
    };

    let wait = at
        .checked_add_signed(TimeDelta::minutes(1))?
        .signed_duration_since(now)
        .max(TimeDelta::zero());
    Some(RetryAfter { at, wait })
}

/// Formats a delay like `1 day, 2:03:04` or `0:03:00`, without sub-seconds
pub fn format_delay(delay: TimeDelta) -> String {
    let total = delay.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let clock = format!("{}:{:02}:{:02}", hours, minutes, seconds);
    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 22, 16, 0, 0).unwrap()
    }

    #[test]
    fn test_delta_seconds() {
        let retry = parse_retry_after("120", now()).unwrap();
        assert_eq!(retry.at, now() + TimeDelta::seconds(120));
        assert_eq!(retry.delay_label(), "0:03:00");
    }

    #[test]
    fn test_http_date() {
        let retry = parse_retry_after("Mon, 22 Feb 2024 17:00:00 GMT", now()).unwrap();
        assert_eq!(retry.at, Utc.with_ymd_and_hms(2024, 2, 22, 17, 0, 0).unwrap());
        assert!(retry.wait > TimeDelta::zero());
        assert_eq!(retry.delay_label(), "1:01:00");
        assert_eq!(retry.at_label(), "2024-02-22 17:00:00");
    }

    #[test]
    fn test_http_date_in_the_past_clamps_to_zero() {
        let retry = parse_retry_after("Wed, 14 Feb 2024 18:00:00 GMT", now()).unwrap();
        assert_eq!(retry.wait, TimeDelta::zero());
        assert_eq!(retry.delay_label(), "0:00:00");
    }

    #[test]
    fn test_invalid_values() {
        assert!(parse_retry_after("soon", now()).is_none());
        assert!(parse_retry_after("", now()).is_none());
        assert!(parse_retry_after("Mon, 99 Feb 2024 17:00:00 GMT", now()).is_none());
    }

    #[test]
    fn test_delta_seconds_near_max_date() {
        let seconds = (DateTime::<Utc>::MAX_UTC - now()).num_seconds() - 10;
        assert!(parse_retry_after(&seconds.to_string(), now()).is_none());
        assert!(parse_retry_after(&i64::MAX.to_string(), now()).is_none());
    }

    #[test]
    fn test_format_delay_with_days() {
        assert_eq!(format_delay(TimeDelta::seconds(86_400 + 3_723)), "1 day, 1:02:03");
        assert_eq!(format_delay(TimeDelta::seconds(2 * 86_400)), "2 days, 0:00:00");
        assert_eq!(format_delay(TimeDelta::seconds(-5)), "0:00:00");
    }
}
