//! Exact points on a timeline.

use std::fmt;
use std::ops::{Add, Sub};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::duration::Duration;
use crate::system::sys_time;


/// An **instant** is an exact point on the timeline, irrespective of time
/// zone or calendar format, with millisecond precision.
///
/// Internally, this is a single 64-bit count of milliseconds since the Unix
/// epoch, which is all the precision the date adapter ever compares at.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Instant {
    milliseconds: i64,
}

impl Instant {

    /// Creates a new Instant set to the number of seconds since the Unix
    /// epoch, and zero milliseconds.
    pub fn at(seconds: i64) -> Self {
        Self::at_ms(seconds, 0)
    }

    /// Creates a new Instant set to the number of seconds since the
    /// Unix epoch, along with the number of milliseconds so far this
    /// second.
    pub fn at_ms(seconds: i64, milliseconds: i16) -> Self {
        Self { milliseconds: seconds * 1000 + i64::from(milliseconds) }
    }

    /// Creates a new Instant from a raw count of milliseconds since the
    /// Unix epoch.
    pub fn from_millis(milliseconds: i64) -> Self {
        Self { milliseconds }
    }

    /// Creates a new Instant set to the computer’s current time.
    pub fn now() -> Self {
        let (seconds, milliseconds) = sys_time();
        Self::at_ms(seconds, milliseconds)
    }

    /// Creates a new Instant set to the Unix epoch.
    pub fn at_epoch() -> Self {
        Self::at(0)
    }

    /// Returns the number of whole seconds at this instant.
    pub fn seconds(&self) -> i64 {
        self.milliseconds.div_euclid(1000)
    }

    /// Returns the millisecond of the second at this instant.
    pub fn milliseconds(&self) -> i16 {
        self.milliseconds.rem_euclid(1000) as i16
    }

    /// Returns the total number of milliseconds since the Unix epoch.
    pub fn millis_since_epoch(&self) -> i64 {
        self.milliseconds
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Instant({}s/{}ms)", self.seconds(), self.milliseconds())
    }
}

impl From<SystemTime> for Instant {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after)   => Self::from_millis(after.as_millis() as i64),
            Err(before) => Self::from_millis(-(before.duration().as_millis() as i64)),
        }
    }
}

impl Add<Duration> for Instant {
    type Output = Self;

    fn add(self, duration: Duration) -> Self {
        Self { milliseconds: self.milliseconds + duration.total_millis() }
    }
}

impl Sub<Duration> for Instant {
    type Output = Self;

    fn sub(self, duration: Duration) -> Self {
        Self { milliseconds: self.milliseconds - duration.total_millis() }
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    fn sub(self, earlier: Self) -> Duration {
        Duration::of_millis(self.milliseconds - earlier.milliseconds)
    }
}


#[cfg(test)]
mod test {
    use super::Instant;
    use std::time::{Duration as StdDuration, UNIX_EPOCH};

    #[test]
    fn before_the_epoch() {
        let instant = Instant::from_millis(-1);
        assert_eq!(instant.seconds(), -1);
        assert_eq!(instant.milliseconds(), 999);
    }

    #[test]
    fn from_system_time() {
        let time = UNIX_EPOCH + StdDuration::from_millis(1_500);
        assert_eq!(Instant::from(time), Instant::at_ms(1, 500));
    }

    #[test]
    fn from_system_time_before_epoch() {
        let time = UNIX_EPOCH - StdDuration::from_millis(2_000);
        assert_eq!(Instant::from(time), Instant::at(-2));
    }

    #[test]
    fn now_is_after_epoch() {
        assert!(Instant::now() > Instant::at_epoch());
    }
}
