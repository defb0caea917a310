//! Gregorian calendar calculations, which use years, months, days,
//! hours, minutes, seconds, and milliseconds.

pub(crate) mod datetime;
pub mod fmt;
pub mod iter;
pub mod loose;
pub mod offset;
pub mod parse;
pub mod unit;

pub use self::datetime::{LocalDate, LocalTime, LocalDateTime, Weekday, Month, Year, YearMonth, Error};
pub use self::datetime::{MIN_YEAR, MAX_YEAR, MAX_INSTANT_MILLIS};


/// The **date piece** trait is used for date and time values that have
/// date components of years, months, and days.
pub trait DatePiece {

    /// The year, in absolute terms.
    /// This is in human-readable format, so the year 2014 actually has a
    /// year value of 2014, rather than 14 or 114 or anything like that.
    fn year(&self) -> i64;

    /// The month of the year.
    fn month(&self) -> Month;

    /// The day of the month, from 1 to 31.
    fn day(&self) -> i8;

    /// The day of the year, from 1 to 366.
    fn yearday(&self) -> i16;

    /// The day of the week.
    fn weekday(&self) -> Weekday;

    /// The number of years into the century.
    /// This is the same as the last two digits of the year, and is never
    /// negative, so 1 BCE (year 0) gives 0 and 2 BCE (year -1) gives 99.
    fn year_of_century(&self) -> i64 { self.year().rem_euclid(100) }
}


/// The **time piece** trait is used for date and time values that have
/// time components of hours, minutes, and seconds.
pub trait TimePiece {

    /// The hour of the day, from 0 to 23.
    fn hour(&self) -> i8;

    /// The minute of the hour.
    fn minute(&self) -> i8;

    /// The second of the minute.
    fn second(&self) -> i8;

    /// The millisecond of the second.
    fn millisecond(&self) -> i16;

    /// The hour on a twelve-hour clock face, from 1 to 12.
    fn hour_of_half_day(&self) -> i8 {
        match self.hour() % 12 {
            0 => 12,
            h => h,
        }
    }

    /// Whether this time falls after midday.
    fn is_pm(&self) -> bool { self.hour() >= 12 }
}
