//! Timestamp predicates over `chrono::DateTime` values in any time zone.
//!
//! Tolerances are compared against the absolute difference, so argument
//! order never matters for `time_within`.

use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, TimeZone};

use crate::outcome::Verdict;

/// `t1` is strictly after `t2`.
pub fn time_after<Tz1, Tz2>(t1: &DateTime<Tz1>, t2: &DateTime<Tz2>) -> Verdict
where
    Tz1: TimeZone,
    Tz2: TimeZone,
    Tz1::Offset: Display,
    Tz2::Offset: Display,
{
    Verdict::check(t1 > t2, || format!("{t1} is not after {t2}"))
}

/// `t1` is strictly before `t2`.
pub fn time_before<Tz1, Tz2>(t1: &DateTime<Tz1>, t2: &DateTime<Tz2>) -> Verdict
where
    Tz1: TimeZone,
    Tz2: TimeZone,
    Tz1::Offset: Display,
    Tz2::Offset: Display,
{
    Verdict::check(t1 < t2, || format!("{t1} is not before {t2}"))
}

fn distance<Tz1: TimeZone, Tz2: TimeZone>(t1: &DateTime<Tz1>, t2: &DateTime<Tz2>) -> Duration {
    t1.clone()
        .signed_duration_since(t2.clone())
        .abs()
        .to_std()
        .unwrap_or(Duration::MAX)
}

/// `t1` and `t2` are at most `within` apart, in either direction.
pub fn time_within<Tz1, Tz2>(t1: &DateTime<Tz1>, t2: &DateTime<Tz2>, within: Duration) -> Verdict
where
    Tz1: TimeZone,
    Tz2: TimeZone,
    Tz1::Offset: Display,
    Tz2::Offset: Display,
{
    Verdict::check(distance(t1, t2) <= within, || {
        format!(
            "{t1} is not within {} of {t2}",
            humantime::format_duration(within)
        )
    })
}

pub fn not_time_within<Tz1, Tz2>(
    t1: &DateTime<Tz1>,
    t2: &DateTime<Tz2>,
    within: Duration,
) -> Verdict
where
    Tz1: TimeZone,
    Tz2: TimeZone,
    Tz1::Offset: Display,
    Tz2::Offset: Display,
{
    Verdict::check(distance(t1, t2) > within, || {
        format!(
            "{t1} is within {} of {t2}",
            humantime::format_duration(within)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).expect("valid timestamp")
    }

    #[test]
    fn test_time_after_and_before() {
        assert!(time_after(&at(10), &at(5)).is_met());
        assert_eq!(
            time_after(&at(5), &at(5)).reason(),
            "1970-01-01 00:00:05 UTC is not after 1970-01-01 00:00:05 UTC"
        );
        assert!(time_before(&at(5), &at(10)).is_met());
        assert!(!time_before(&at(10), &at(5)).is_met());
    }

    #[test]
    fn test_time_within_is_symmetric() {
        let window = Duration::from_secs(3);
        assert!(time_within(&at(10), &at(13), window).is_met());
        assert!(time_within(&at(13), &at(10), window).is_met());
        assert_eq!(
            time_within(&at(10), &at(14), window).reason(),
            "1970-01-01 00:00:10 UTC is not within 3s of 1970-01-01 00:00:14 UTC"
        );
    }

    #[test]
    fn test_not_time_within() {
        let window = Duration::from_secs(1);
        assert!(not_time_within(&at(0), &at(2), window).is_met());
        assert!(
            not_time_within(&at(0), &at(1), window)
                .reason()
                .contains("is within 1s of")
        );
    }

    #[test]
    fn test_mixed_time_zones_compare_instants() {
        let east = FixedOffset::east_opt(3600).unwrap();
        let local = at(100).with_timezone(&east);
        assert!(time_within(&local, &at(100), Duration::ZERO).is_met());
        assert!(!time_after(&local, &at(100)).is_met());
    }
}
