//! events::time — normalization of event timestamps to seconds.
//!
//! Purpose
//! -------
//! Let the rest of the engine work with any totally ordered timestamp type
//! while decay and recency computations always see elapsed time in
//! **seconds**.
//!
//! Key behaviors
//! -------------
//! - [`EventTime`] is the single seam: `seconds_since(earlier)` returns the
//!   signed elapsed time in seconds.
//! - Plain numbers (`f64`, `f32`, integers) are read as seconds directly.
//! - `std::time::Duration` is read as an offset since a common epoch.
//! - `chrono` calendar types are converted at nanosecond resolution
//!   (`NaiveDate` at day resolution).
//!
//! Invariants & assumptions
//! ------------------------
//! - A timestamp type without an `EventTime` implementation cannot be used
//!   with the engine at all; unsupported time-difference types are rejected
//!   by the compiler.
//! - Non-finite deltas (NaN float timestamps, overflowing conversions) are
//!   reported as [`EventError::NonFiniteTimeDelta`].
use crate::events::errors::{EventError, EventResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt::Debug;
use std::time::Duration;

/// Seconds per calendar day, used for `NaiveDate` timestamps.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Timestamp types accepted by the event log and network state.
pub trait EventTime: Copy + PartialOrd + Debug {
    /// Signed elapsed time from `earlier` to `self`, in seconds.
    ///
    /// # Errors
    /// [`EventError::NonFiniteTimeDelta`] if the difference is not a finite
    /// number of seconds.
    fn seconds_since(&self, earlier: &Self) -> EventResult<f64>;
}

#[inline]
fn finite_seconds(seconds: f64) -> EventResult<f64> {
    if seconds.is_finite() {
        Ok(seconds)
    } else {
        Err(EventError::NonFiniteTimeDelta { seconds })
    }
}

impl EventTime for f64 {
    fn seconds_since(&self, earlier: &Self) -> EventResult<f64> {
        finite_seconds(self - earlier)
    }
}

impl EventTime for f32 {
    fn seconds_since(&self, earlier: &Self) -> EventResult<f64> {
        finite_seconds(f64::from(*self) - f64::from(*earlier))
    }
}

macro_rules! impl_event_time_for_int {
    ($($t:ty),*) => {
        $(
            impl EventTime for $t {
                fn seconds_since(&self, earlier: &Self) -> EventResult<f64> {
                    finite_seconds(*self as f64 - *earlier as f64)
                }
            }
        )*
    };
}

impl_event_time_for_int!(i32, i64, u32, u64, usize);

impl EventTime for Duration {
    fn seconds_since(&self, earlier: &Self) -> EventResult<f64> {
        finite_seconds(self.as_secs_f64() - earlier.as_secs_f64())
    }
}

impl<Tz: TimeZone> EventTime for DateTime<Tz>
where
    DateTime<Tz>: Copy,
{
    fn seconds_since(&self, earlier: &Self) -> EventResult<f64> {
        chrono_delta_seconds((*self).signed_duration_since(*earlier))
    }
}

impl EventTime for NaiveDateTime {
    fn seconds_since(&self, earlier: &Self) -> EventResult<f64> {
        chrono_delta_seconds(self.signed_duration_since(*earlier))
    }
}

impl EventTime for NaiveDate {
    fn seconds_since(&self, earlier: &Self) -> EventResult<f64> {
        let days = self.signed_duration_since(*earlier).num_days();
        finite_seconds(days as f64 * SECONDS_PER_DAY)
    }
}

// Nanosecond precision overflows after ~292 years; fall back to milliseconds.
fn chrono_delta_seconds(delta: chrono::Duration) -> EventResult<f64> {
    match delta.num_nanoseconds() {
        Some(ns) => finite_seconds(ns as f64 / 1e9),
        None => finite_seconds(delta.num_milliseconds() as f64 / 1e3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Numeric timestamps read as seconds.
    // - Calendar timestamps converted to seconds.
    // - Rejection of non-finite deltas.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Numeric timestamps are interpreted as seconds.
    //
    // Given
    // -----
    // - Float times 2.5 and 10.0, integer times 3 and 7.
    //
    // Expect
    // ------
    // - Deltas 7.5 and 4.0 respectively.
    fn numeric_times_are_seconds() {
        assert_eq!(10.0_f64.seconds_since(&2.5).unwrap(), 7.5);
        assert_eq!(7_i64.seconds_since(&3).unwrap(), 4.0);
        assert_eq!(3_u64.seconds_since(&7).unwrap(), -4.0);
    }

    #[test]
    // Purpose
    // -------
    // Calendar timestamps normalize to seconds regardless of representation.
    //
    // Given
    // -----
    // - Two UTC datetimes 90 seconds apart and two dates 2 days apart.
    //
    // Expect
    // ------
    // - 90.0 seconds and 172 800 seconds.
    fn calendar_times_convert_to_seconds() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 1, 1, 12, 1, 30).unwrap();
        assert_eq!(b.seconds_since(&a).unwrap(), 90.0);

        let d0 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert_eq!(d1.seconds_since(&d0).unwrap(), 2.0 * SECONDS_PER_DAY);
    }

    #[test]
    // Purpose
    // -------
    // A NaN float timestamp yields an error instead of a silent NaN.
    //
    // Given
    // -----
    // - `f64::NAN` compared with 1.0.
    //
    // Expect
    // ------
    // - `EventError::NonFiniteTimeDelta`.
    fn nan_delta_is_rejected() {
        let err = f64::NAN.seconds_since(&1.0).unwrap_err();
        assert!(matches!(err, EventError::NonFiniteTimeDelta { .. }));
    }

    #[test]
    // Purpose
    // -------
    // `Duration` offsets behave like seconds since an epoch.
    //
    // Given
    // -----
    // - Offsets of 1500 ms and 500 ms.
    //
    // Expect
    // ------
    // - A delta of 1.0 second.
    fn duration_offsets_convert() {
        let a = Duration::from_millis(500);
        let b = Duration::from_millis(1500);
        assert!((b.seconds_since(&a).unwrap() - 1.0).abs() < 1e-12);
    }
}
