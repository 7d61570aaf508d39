//! Resolution of start/end/duration flags into a concrete query window.
//!
//! CloudWatch's FilterLogEvents API wants absolute epoch-millisecond bounds,
//! while callers think in terms of "the last hour" or "from this timestamp
//! for one day". [`TimeSpec::resolve`] combines up to three optional inputs
//! into a [`TimeWindow`]; the current time is injected by the caller so the
//! arithmetic stays deterministic under test.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, FixedOffset, Utc};

/// Resolved query bounds in epoch milliseconds.
///
/// `start_ms <= end_ms` is expected but not enforced here; the service
/// rejects inverted windows on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

/// The three optional time inputs, as parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct TimeSpec {
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub duration: Option<Duration>,
}

impl TimeSpec {
    /// Compute the concrete window:
    ///
    /// - end defaults to `now` when no absolute end is given;
    /// - with a start and a duration, end = start + duration (the duration
    ///   augments the explicit start, it never replaces it);
    /// - with a start and no duration, end keeps its resolved value;
    /// - without a start, start = resolved end minus the duration, which
    ///   collapses to the end bound itself when the duration is also absent.
    ///
    /// End-plus-duration without a start is rejected up front by flag
    /// validation, so that combination never reaches this method.
    pub fn resolve(&self, now: DateTime<Utc>) -> TimeWindow {
        let mut end = self.end.map(|e| e.with_timezone(&Utc)).unwrap_or(now);
        let start = match self.start {
            Some(start) => {
                let start = start.with_timezone(&Utc);
                if let Some(duration) = self.duration {
                    end = start + duration;
                }
                start
            }
            None => end - self.duration.unwrap_or_else(Duration::zero),
        };
        TimeWindow {
            start_ms: start.timestamp_millis(),
            end_ms: end.timestamp_millis(),
        }
    }
}

/// Parse an absolute timestamp in RFC3339 form, e.g. `2006-01-02T15:04:05Z`
/// or `2006-01-02T15:04:05+07:00`.
pub fn parse_rfc3339(input: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(input)
        .with_context(|| format!("invalid timestamp {input:?}, expected RFC3339 format like 2006-01-02T15:04:05Z"))
}

/// Parse compact duration shorthand: `1w`, `1d`, `12h`, `30m`, `45s`,
/// `500ms`, or compounds like `1d12h`.
///
/// No crate in our stack covers this unit-suffixed shorthand, so it is
/// parsed here into a [`chrono::Duration`].
pub fn parse_duration(input: &str) -> Result<Duration> {
    let mut rest = input.trim();
    if rest.is_empty() {
        bail!("empty duration");
    }
    let mut total = Duration::zero();
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            bail!("invalid duration {input:?}: expected a number before {rest:?}");
        }
        let value: i64 = rest[..digits]
            .parse()
            .with_context(|| format!("invalid duration {input:?}"))?;
        rest = &rest[digits..];
        let unit_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let (unit, remainder) = rest.split_at(unit_len);
        rest = remainder;
        let part = match unit {
            "w" => Duration::try_weeks(value),
            "d" => Duration::try_days(value),
            "h" => Duration::try_hours(value),
            "m" => Duration::try_minutes(value),
            "s" => Duration::try_seconds(value),
            "ms" => Duration::try_milliseconds(value),
            "" => bail!("invalid duration {input:?}: missing unit after {value}"),
            other => bail!("invalid duration {input:?}: unknown unit {other:?}"),
        };
        // try_* and checked_add return None when the value leaves chrono's
        // representable range; surface that as a parse error, not a panic.
        total = part
            .and_then(|part| total.checked_add(&part))
            .with_context(|| format!("invalid duration {input:?}: out of range"))?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("1w").unwrap(), Duration::days(7));
        assert_eq!(parse_duration("2d").unwrap(), Duration::days(2));
        assert_eq!(parse_duration("12h").unwrap(), Duration::hours(12));
        assert_eq!(parse_duration("30m").unwrap(), Duration::minutes(30));
        assert_eq!(parse_duration("45s").unwrap(), Duration::seconds(45));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::milliseconds(500));
    }

    #[test]
    fn parses_compound_durations() {
        assert_eq!(parse_duration("1d12h").unwrap(), Duration::hours(36));
        assert_eq!(
            parse_duration("1h30m15s").unwrap(),
            Duration::seconds(5415)
        );
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("1x").is_err());
        assert!(parse_duration("1").is_err());
        assert!(parse_duration("h1").is_err());
    }

    #[test]
    fn rejects_out_of_range_durations_without_panicking() {
        assert!(parse_duration("99999999999999w").is_err());
        assert!(parse_duration(&format!("{}s", i64::MAX)).is_err());
        // A sum that overflows even though each part is representable.
        assert!(parse_duration("10000000000w10000000000w").is_err());
    }
}
