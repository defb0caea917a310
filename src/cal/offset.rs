//! Fixed offsets from UTC, and moving readings between them.
//!
//! Every wall-clock reading the date adapter hands out is expressed in one
//! fixed offset. Converting to and from instants happens here.

use std::fmt;

use crate::cal::LocalDateTime;
use crate::cal::fmt::ISO;
use crate::duration::Duration;
use crate::instant::Instant;
use crate::system::sys_utc_offset;
use crate::util::RangeExt;


#[derive(PartialEq, Eq, Copy, Clone, Hash)]
pub struct Offset {
    offset_seconds: Option<i32>,
}

impl Offset {

    pub fn utc() -> Self {
        Self { offset_seconds: None }
    }

    /// An offset of the given number of seconds east of UTC. Zero is the
    /// same as `Offset::utc()`.
    pub fn of_seconds(seconds: i32) -> Result<Self, Error> {
        if !seconds.is_within(-86_399 .. 86_400) {
            Err(Error::OutOfRange { seconds })
        }
        else if seconds == 0 {
            Ok(Self::utc())
        }
        else {
            Ok(Self { offset_seconds: Some(seconds) })
        }
    }

    pub fn of_hours_and_minutes(hours: i8, minutes: i8) -> Result<Self, Error> {
        if (hours.is_positive() && minutes.is_negative())
        || (hours.is_negative() && minutes.is_positive()) {
            Err(Error::SignMismatch)
        }
        else if !hours.is_within(-23..24) || !minutes.is_within(-59..60) {
            Err(Error::OutOfRange { seconds: i32::from(hours) * 3600 + i32::from(minutes) * 60 })
        }
        else {
            Self::of_seconds(i32::from(hours) * 3600 + i32::from(minutes) * 60)
        }
    }

    /// The offset the operating system’s local time zone has right now.
    /// Falls back to UTC on platforms that can’t tell.
    pub fn system() -> Self {
        Self::system_at(Instant::now())
    }

    /// The offset the operating system’s local time zone had, or will have,
    /// at the given instant.
    pub fn system_at(instant: Instant) -> Self {
        sys_utc_offset(instant.seconds())
            .and_then(|seconds| Self::of_seconds(seconds).ok())
            .unwrap_or_else(Self::utc)
    }

    /// Reads the wall clock at this offset for the given instant.
    pub fn local_at(self, instant: Instant) -> LocalDateTime {
        LocalDateTime::from_instant(instant) + self.as_duration()
    }

    /// Returns the instant a wall-clock reading at this offset stands for.
    pub fn instant_of(self, local: LocalDateTime) -> Instant {
        (local - self.as_duration()).to_instant()
    }

    /// Moves a wall-clock reading taken at `from` onto this offset, keeping
    /// the instant it stands for.
    pub fn convert(self, local: LocalDateTime, from: Self) -> LocalDateTime {
        self.local_at(from.instant_of(local))
    }

    fn as_duration(self) -> Duration {
        Duration::of(i64::from(self.total_seconds()))
    }

    pub fn is_utc(self) -> bool {
        self.offset_seconds.is_none()
    }

    pub fn is_negative(self) -> bool {
        self.total_seconds().is_negative()
    }

    pub fn total_seconds(self) -> i32 {
        self.offset_seconds.unwrap_or(0)
    }

    pub fn hours(self) -> i8 {
        (self.total_seconds() / 60 / 60) as i8
    }

    pub fn minutes(self) -> i8 {
        (self.total_seconds() / 60 % 60) as i8
    }

    pub fn seconds(self) -> i8 {
        (self.total_seconds() % 60) as i8
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Debug for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Offset({})", self.iso())
    }
}


#[derive(PartialEq, Eq, Debug, Copy, Clone, thiserror::Error)]
pub enum Error {
    #[error("offset of {seconds} seconds out of range")]
    OutOfRange { seconds: i32 },

    #[error("sign mismatch between hours and minutes")]
    SignMismatch,
}
