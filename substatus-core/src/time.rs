//! Time-remaining calculation.
//!
//! Providers encode expiry three different ways: absolute epoch seconds, a
//! remaining-seconds duration, and a calendar date string. All three modes
//! normalize to [`TimeRemaining`], and all are pure over an explicit `now`
//! so expiry math is deterministic under test.
//!
//! Rounding rule: any positive remaining duration rounds **up** to whole
//! days. One second left reports 1, exactly 24h reports 1, 24h + 1s reports
//! 2. A still-active subscription never reports zero days left.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Milliseconds per day.
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

// ============================================================================
// Time Remaining
// ============================================================================

/// Days remaining and the expiry instant, as far as they could be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    /// Whole days remaining, rounded up. Zero when elapsed or unresolved.
    pub days: u32,
    /// The expiry instant, when one could be derived.
    pub expires_at: Option<DateTime<Utc>>,
}

impl TimeRemaining {
    /// The elapsed/unresolved value.
    pub const fn none() -> Self {
        Self {
            days: 0,
            expires_at: None,
        }
    }
}

/// Rounds a positive millisecond delta up to whole days.
fn ceil_days(ms: i64) -> u32 {
    if ms <= 0 {
        0
    } else {
        u32::try_from((ms + DAY_MS - 1) / DAY_MS).unwrap_or(u32::MAX)
    }
}

// ============================================================================
// Entry Modes
// ============================================================================

/// Computes time remaining from an absolute epoch-seconds expiry.
///
/// Non-finite, non-positive, or already-elapsed inputs yield
/// [`TimeRemaining::none`].
pub fn from_epoch_seconds(secs: f64, now: DateTime<Utc>) -> TimeRemaining {
    if !secs.is_finite() || secs <= 0.0 {
        return TimeRemaining::none();
    }
    #[allow(clippy::cast_possible_truncation)]
    let Some(expiry) = DateTime::<Utc>::from_timestamp_millis((secs * 1000.0) as i64) else {
        return TimeRemaining::none();
    };
    let delta_ms = expiry.signed_duration_since(now).num_milliseconds();
    if delta_ms <= 0 {
        return TimeRemaining::none();
    }
    TimeRemaining {
        days: ceil_days(delta_ms),
        expires_at: Some(expiry),
    }
}

/// Computes time remaining from a remaining-seconds duration.
///
/// Non-finite or non-positive inputs yield [`TimeRemaining::none`]; any
/// positive duration reports at least one day.
pub fn from_duration_seconds(secs: f64, now: DateTime<Utc>) -> TimeRemaining {
    if !secs.is_finite() || secs <= 0.0 {
        return TimeRemaining::none();
    }
    #[allow(clippy::cast_possible_truncation)]
    let ms = (secs * 1000.0).ceil() as i64;
    TimeRemaining {
        days: ceil_days(ms),
        expires_at: Some(now + Duration::milliseconds(ms)),
    }
}

/// Computes time remaining from an epoch-milliseconds expiry.
///
/// Returns `None` for non-finite or unrepresentable input. A resolvable
/// instant is kept as the expiry even when it has already elapsed (days
/// clamp to zero), matching the date-string mode.
pub fn from_epoch_millis(ms: f64, now: DateTime<Utc>) -> Option<TimeRemaining> {
    if !ms.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let expiry = DateTime::<Utc>::from_timestamp_millis(ms as i64)?;
    let delta_ms = expiry.signed_duration_since(now).num_milliseconds();
    Some(TimeRemaining {
        days: ceil_days(delta_ms),
        expires_at: Some(expiry),
    })
}

/// Computes time remaining from a calendar timestamp string.
///
/// Returns `None` when the string is unparsable; the caller treats that as
/// "cannot resolve". A parsed instant is kept as the expiry even when it has
/// already elapsed (days clamp to zero).
pub fn from_date_string(s: &str, now: DateTime<Utc>) -> Option<TimeRemaining> {
    let expiry = parse_instant(s)?;
    let delta_ms = expiry.signed_duration_since(now).num_milliseconds();
    Some(TimeRemaining {
        days: ceil_days(delta_ms),
        expires_at: Some(expiry),
    })
}

/// Parses the timestamp formats the live services emit.
fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_duration_rounds_up_to_one_day() {
        let t = now();
        assert_eq!(from_duration_seconds(1.0, t).days, 1);
        assert_eq!(from_duration_seconds(3600.0, t).days, 1);
        assert_eq!(from_duration_seconds(86_400.0, t).days, 1);
    }

    #[test]
    fn test_duration_second_day_boundary() {
        let t = now();
        assert_eq!(from_duration_seconds(86_401.0, t).days, 2);
        assert_eq!(from_duration_seconds(172_800.0, t).days, 2);
        assert_eq!(from_duration_seconds(172_801.0, t).days, 3);
    }

    #[test]
    fn test_duration_sets_expiry() {
        let t = now();
        let result = from_duration_seconds(3600.0, t);
        assert_eq!(result.expires_at, Some(t + Duration::seconds(3600)));
    }

    #[test]
    fn test_duration_invalid_inputs() {
        let t = now();
        assert_eq!(from_duration_seconds(0.0, t), TimeRemaining::none());
        assert_eq!(from_duration_seconds(-5.0, t), TimeRemaining::none());
        assert_eq!(from_duration_seconds(f64::NAN, t), TimeRemaining::none());
        assert_eq!(from_duration_seconds(f64::INFINITY, t), TimeRemaining::none());
    }

    #[test]
    fn test_epoch_and_duration_agree() {
        let t = now();
        for d in [1.0, 3600.0, 86_400.0, 86_401.0, 200_000.0, 2_000_000.0] {
            #[allow(clippy::cast_precision_loss)]
            let expiry = t.timestamp() as f64 + d;
            assert_eq!(
                from_epoch_seconds(expiry, t).days,
                from_duration_seconds(d, t).days,
                "modes disagree for d={d}"
            );
        }
    }

    #[test]
    fn test_epoch_elapsed() {
        let t = now();
        #[allow(clippy::cast_precision_loss)]
        let past = t.timestamp() as f64 - 100.0;
        assert_eq!(from_epoch_seconds(past, t), TimeRemaining::none());
    }

    #[test]
    fn test_epoch_invalid_inputs() {
        let t = now();
        assert_eq!(from_epoch_seconds(0.0, t), TimeRemaining::none());
        assert_eq!(from_epoch_seconds(-1.0, t), TimeRemaining::none());
        assert_eq!(from_epoch_seconds(f64::NAN, t), TimeRemaining::none());
    }

    #[test]
    fn test_epoch_millis_future() {
        let t = now();
        let expiry = t + Duration::days(2);
        #[allow(clippy::cast_precision_loss)]
        let result = from_epoch_millis(expiry.timestamp_millis() as f64, t).unwrap();
        assert_eq!(result.days, 2);
        assert_eq!(result.expires_at, Some(expiry));
    }

    #[test]
    fn test_epoch_millis_elapsed_keeps_expiry() {
        let t = now();
        let result = from_epoch_millis(86_400_000.0, t).unwrap();
        assert_eq!(result.days, 0);
        assert_eq!(
            result.expires_at,
            Some(DateTime::from_timestamp(86_400, 0).unwrap())
        );
    }

    #[test]
    fn test_epoch_millis_invalid_inputs() {
        assert!(from_epoch_millis(f64::NAN, now()).is_none());
        assert!(from_epoch_millis(f64::INFINITY, now()).is_none());
    }

    #[test]
    fn test_date_string_rfc3339() {
        let t = now();
        let expiry = t + Duration::days(2);
        let result = from_date_string(&expiry.to_rfc3339(), t).unwrap();
        assert_eq!(result.days, 2);
        assert_eq!(result.expires_at, Some(expiry));
    }

    #[test]
    fn test_date_string_elapsed_keeps_expiry() {
        let t = now();
        let expiry = t - Duration::days(1);
        let result = from_date_string(&expiry.to_rfc3339(), t).unwrap();
        assert_eq!(result.days, 0);
        assert_eq!(result.expires_at, Some(expiry));
    }

    #[test]
    fn test_date_string_plain_formats() {
        let t = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(from_date_string("2024-01-15 12:00:00", t).is_some());
        assert!(from_date_string("2024-01-15", t).is_some());
    }

    #[test]
    fn test_date_string_unparsable() {
        assert!(from_date_string("not a date", now()).is_none());
        assert!(from_date_string("", now()).is_none());
    }
}
