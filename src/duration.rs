//! Lengths of time on the timeline.

use std::ops::{Add, Sub, Mul, Neg};

use crate::util::split_cycles;


/// Number of milliseconds in a second.
const MILLIS_IN_SECOND: i64 = 1000;

/// Number of milliseconds in a day. Leap seconds are ignored.
pub(crate) const MILLIS_IN_DAY: i64 = 86_400 * MILLIS_IN_SECOND;


/// A **duration** is a length of time on the timeline, irrespective of
/// time zone or calendar format, with millisecond precision.
///
/// Durations are signed: subtracting a later instant from an earlier one
/// gives a negative duration.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Copy)]
pub struct Duration {
    milliseconds: i64,
}

impl Duration {

    /// Create a new zero-length duration.
    pub fn zero() -> Self {
        Self { milliseconds: 0 }
    }

    /// Create a new duration that’s the given number of seconds long.
    pub fn of(seconds: i64) -> Self {
        Self { milliseconds: seconds * MILLIS_IN_SECOND }
    }

    /// Create a new duration that’s the given number of seconds and
    /// milliseconds long.
    pub fn of_ms(seconds: i64, milliseconds: i16) -> Self {
        Self { milliseconds: seconds * MILLIS_IN_SECOND + i64::from(milliseconds) }
    }

    /// Create a new duration that’s the given number of milliseconds long.
    pub fn of_millis(milliseconds: i64) -> Self {
        Self { milliseconds }
    }

    /// Create a new duration spanning the given number of 24-hour days.
    pub fn of_days(days: i64) -> Self {
        Self { milliseconds: days * MILLIS_IN_DAY }
    }

    /// Return the whole-second and millisecond portions of the duration as
    /// a 2-element tuple. The millisecond part is always positive, so
    /// -1.5 seconds comes out as (-2, 500).
    pub fn lengths(&self) -> (i64, i16) {
        let (seconds, millis) = split_cycles(self.milliseconds, MILLIS_IN_SECOND);
        (seconds, millis as i16)
    }

    /// The total length of this duration, in milliseconds.
    pub fn total_millis(&self) -> i64 {
        self.milliseconds
    }

    /// The length of this duration in 24-hour days, as a fraction.
    pub fn as_days(&self) -> f64 {
        self.milliseconds as f64 / MILLIS_IN_DAY as f64
    }

    pub fn is_negative(&self) -> bool {
        self.milliseconds < 0
    }
}

impl Add<Duration> for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { milliseconds: self.milliseconds + rhs.milliseconds }
    }
}

impl Sub<Duration> for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { milliseconds: self.milliseconds - rhs.milliseconds }
    }
}

impl Mul<i64> for Duration {
    type Output = Self;

    fn mul(self, amount: i64) -> Self {
        Self { milliseconds: self.milliseconds * amount }
    }
}

impl Neg for Duration {
    type Output = Self;

    fn neg(self) -> Self {
        Self { milliseconds: -self.milliseconds }
    }
}


#[cfg(test)]
mod test {
    use super::Duration;

    #[test]
    fn negative_lengths() {
        assert_eq!(Duration::of_millis(-1500).lengths(), (-2, 500));
    }

    #[test]
    fn days_as_fraction() {
        assert_eq!(Duration::of_days(3).as_days(), 3.0);
        assert_eq!((Duration::of_days(1) - Duration::of_millis(1)).as_days() < 1.0, true);
    }
}
