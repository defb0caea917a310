//! Dates, times, datetimes, months, and weekdays.

use std::fmt;
use std::ops::{Add, Sub, Deref};

use crate::cal::{DatePiece, TimePiece};
use crate::cal::fmt::ISO;
use crate::duration::{Duration, MILLIS_IN_DAY};
use crate::instant::Instant;
use crate::util::{split_cycles, RangeExt};

use self::Month::*;
use self::Weekday::*;


/// A single year.
///
/// This is just a wrapper around `i64` that performs year-related tests.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Year(pub i64);

impl Year {

    /// Returns whether this year is a leap year.
    ///
    /// ### Examples
    ///
    /// ```
    /// use datetime_utils::cal::Year;
    ///
    /// assert_eq!(Year(2000).is_leap_year(), true);
    /// assert_eq!(Year(1900).is_leap_year(), false);
    /// ```
    pub fn is_leap_year(self) -> bool {
        self.0 % 4 == 0 && (self.0 % 100 != 0 || self.0 % 400 == 0)
    }

    /// Returns the number of days in this year.
    pub fn day_count(self) -> i16 {
        if self.is_leap_year() { 366 } else { 365 }
    }

    /// Returns a year-month, pairing this year with the given month.
    ///
    /// ### Examples
    ///
    /// ```
    /// use datetime_utils::cal::{Year, Month};
    ///
    /// let expiry_date = Year(2017).month(Month::February);
    /// assert_eq!(*expiry_date.year, 2017);
    /// assert_eq!(expiry_date.month, Month::February);
    /// ```
    pub fn month(self, month: Month) -> YearMonth {
        YearMonth { year: self, month }
    }
}

impl Deref for Year {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}


/// A month-year pair.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct YearMonth {
    pub year: Year,
    pub month: Month,
}

impl YearMonth {

    /// Returns the number of days in this month. This can be definitely
    /// known, as the paired year determines whether it’s a leap year, so
    /// there’s no chance of being caught out by February.
    ///
    /// ### Examples
    ///
    /// ```
    /// use datetime_utils::cal::{Year, Month};
    ///
    /// assert_eq!(Year(2000).month(Month::February).day_count(), 29);
    /// assert_eq!(Year(1900).month(Month::February).day_count(), 28);
    /// ```
    pub fn day_count(&self) -> i8 {
        self.month.days_in_month(self.year.is_leap_year())
    }

    /// Returns the date of this month, with the day clamped to the last
    /// day the month actually has. Asking for the 31st of April gives the
    /// 30th.
    pub fn clamped_day(&self, day: i8) -> Result<LocalDate, Error> {
        let _ = check_year(self.year.0)?;
        Ok(self.clamped_day_unchecked(day))
    }

    fn clamped_day_unchecked(&self, day: i8) -> LocalDate {
        let day = day.max(1).min(self.day_count());
        LocalDate::from_ymd_unchecked(YMD { year: self.year.0, month: self.month, day })
    }
}


/// The earliest year a date can be in.
pub const MIN_YEAR: i64 = -271_821;

/// The latest year a date can be in.
pub const MAX_YEAR: i64 = 275_760;

/// The most milliseconds an instant can be from the epoch, either way,
/// while still being read as a date: a hundred million days.
pub const MAX_INSTANT_MILLIS: i64 = 100_000_000 * MILLIS_IN_DAY;

/// More days than any supported date is from the epoch.
const DAY_LIMIT: i64 = 1_000 * DAYS_IN_ERA;

fn check_year(year: i64) -> Result<i64, Error> {
    if year.is_within(MIN_YEAR .. MAX_YEAR + 1) {
        Ok(year)
    }
    else {
        Err(Error::OutOfRange { field: "year", value: year })
    }
}


/// Number of days between 0000-03-01 and 1970-01-01, in the proleptic
/// Gregorian calendar.
///
/// Days are counted in eras of 400 years starting on the 1st of March, so
/// that the leap day falls at the very end of each year of the cycle. That
/// turns the month lengths into a fixed pattern (153 days per five months)
/// and leaves the leap-year rules to simple division.
const DAYS_FROM_ERA_START_TO_UNIX_EPOCH: i64 = 719_468;

/// Number of days in 400 Gregorian years.
const DAYS_IN_ERA: i64 = 146_097;


/// A **local date** is a day-long span on the timeline, *without a time
/// zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct LocalDate {
    days: i64,
    ymd:  YMD,
}

/// A **local time** is a time on the timeline that recurs once a day,
/// *without a time zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct LocalTime {
    hour:        i8,
    minute:      i8,
    second:      i8,
    millisecond: i16,
}

/// A **local date-time** is an exact instant on the timeline, *without a
/// time zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct LocalDateTime {
    date: LocalDate,
    time: LocalTime,
}


impl LocalDate {

    /// Creates a new local date instance from the given year, month, and day
    /// fields.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an error.
    ///
    /// ### Examples
    ///
    /// ```rust
    /// use datetime_utils::cal::{LocalDate, Month, DatePiece};
    ///
    /// let date = LocalDate::ymd(1969, Month::July, 20).unwrap();
    /// assert_eq!(date.year(), 1969);
    /// assert_eq!(date.month(), Month::July);
    /// assert_eq!(date.day(), 20);
    ///
    /// assert!(LocalDate::ymd(2100, Month::February, 29).is_err());
    /// assert!(LocalDate::ymd(300_000, Month::January, 1).is_err());
    /// ```
    pub fn ymd(year: i64, month: Month, day: i8) -> Result<Self, Error> {
        let year = check_year(year)?;
        let ymd = YMD { year, month, day };
        if ymd.is_valid() {
            Ok(Self::from_ymd_unchecked(ymd))
        }
        else {
            Err(Error::OutOfRange { field: "day", value: i64::from(day) })
        }
    }

    /// Creates a new local date instance from the given year and day-of-year
    /// values, where the 1st of January is day 1.
    ///
    /// ### Examples
    ///
    /// ```rust
    /// use datetime_utils::cal::{LocalDate, Month, DatePiece};
    ///
    /// let date = LocalDate::yd(2015, 0x100).unwrap();
    /// assert_eq!(date.year(), 2015);
    /// assert_eq!(date.month(), Month::September);
    /// assert_eq!(date.day(), 13);
    /// ```
    pub fn yd(year: i64, yearday: i64) -> Result<Self, Error> {
        let year = check_year(year)?;
        if yearday.is_within(1 .. i64::from(Year(year).day_count()) + 1) {
            let jan_1 = YMD { year, month: January, day: 1 }.days_since_epoch();
            Ok(Self::from_days_since_epoch(jan_1 + yearday - 1))
        }
        else {
            Err(Error::OutOfRange { field: "day of year", value: yearday })
        }
    }

    /// Creates a new local date instance from the given ISO-8601 year,
    /// week-of-year, and weekday values.
    ///
    /// Week 1 is the week containing the first Thursday of the year, so
    /// the year of the result can differ from the one passed in:
    ///
    /// ```rust
    /// use datetime_utils::cal::{LocalDate, Weekday, Month, DatePiece};
    ///
    /// let date = LocalDate::ywd(2009, 1, Weekday::Monday).unwrap();
    /// assert_eq!(date.year(), 2008);
    /// assert_eq!(date.month(), Month::December);
    /// assert_eq!(date.day(), 29);
    /// ```
    pub fn ywd(year: i64, week: i64, weekday: Weekday) -> Result<Self, Error> {
        if !week.is_within(1..54) {
            return Err(Error::OutOfRange { field: "week", value: week });
        }

        let jan_4 = Self::from_ymd_unchecked(YMD { year: check_year(year)?, month: January, day: 4 });
        let week_1_monday = jan_4.days - i64::from(jan_4.weekday().days_from_monday());
        let days = week_1_monday + (week - 1) * 7 + i64::from(weekday.days_from_monday());
        Self::from_days_checked(days)
    }

    /// Computes a LocalDate given the number of days that have passed since
    /// the 1st of January, 1970. Negative numbers go backwards from there.
    pub fn from_days_since_epoch(days: i64) -> Self {
        let shifted = days + DAYS_FROM_ERA_START_TO_UNIX_EPOCH;
        let (era, day_of_era) = split_cycles(shifted, DAYS_IN_ERA);

        // Every fourth year has a leap day, except the hundredth, except the
        // four-hundredth. Correcting for all three at once gives the year of
        // the era, counting from March.
        let year_of_era = (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146_096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);

        // Months starting in March run 31, 30, 31, 30, 31 days, then repeat,
        // so five months are always 153 days long.
        let shifted_month = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
        let month = if shifted_month < 10 { shifted_month + 3 } else { shifted_month - 9 };
        let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };

        Self {
            days,
            ymd: YMD {
                year,
                month: MONTHS[(month - 1) as usize],
                day: day as i8,
            },
        }
    }

    /// Like `from_days_since_epoch`, but fails for dates outside the
    /// supported years instead of computing them.
    fn from_days_checked(days: i64) -> Result<Self, Error> {
        if !days.is_within(-DAY_LIMIT .. DAY_LIMIT) {
            return Err(Error::OutOfRange { field: "day", value: days });
        }

        let date = Self::from_days_since_epoch(days);
        let _ = check_year(date.ymd.year)?;
        Ok(date)
    }

    fn from_ymd_unchecked(ymd: YMD) -> Self {
        Self { days: ymd.days_since_epoch(), ymd }
    }

    /// Returns the number of days between the 1st of January, 1970 and
    /// this date.
    pub fn days_since_epoch(&self) -> i64 {
        self.days
    }

    /// Returns the date the given number of days after this one. Negative
    /// numbers count backwards. Fails if that leaves the supported years.
    ///
    /// ### Examples
    ///
    /// ```rust
    /// use datetime_utils::cal::{LocalDate, Month};
    ///
    /// let date = LocalDate::ymd(2024, Month::February, 28).unwrap();
    /// assert_eq!(date.add_days(2), LocalDate::ymd(2024, Month::March, 1));
    /// assert!(date.add_days(i64::MAX).is_err());
    /// ```
    pub fn add_days(&self, days: i64) -> Result<Self, Error> {
        let total = self.days.checked_add(days)
                        .ok_or(Error::OutOfRange { field: "day", value: days })?;
        Self::from_days_checked(total)
    }

    /// Returns the date the given number of calendar months after this one,
    /// keeping the day of the month where possible. When the target month
    /// is too short, the last day of that month is used instead, so the
    /// 31st of January plus one month is the 28th (or 29th) of February.
    pub fn add_months(&self, months: i64) -> Result<Self, Error> {
        let index = (self.ymd.year * 12 + self.ymd.month.months_from_january() as i64)
                        .checked_add(months)
                        .ok_or(Error::OutOfRange { field: "month", value: months })?;
        let (year, month) = split_cycles(index, 12);
        Year(year).month(MONTHS[month as usize]).clamped_day(self.ymd.day)
    }

    /// Returns the date the given number of years after this one, moving
    /// the 29th of February back a day when the target year has none.
    pub fn add_years(&self, years: i64) -> Result<Self, Error> {
        let months = years.checked_mul(12)
                          .ok_or(Error::OutOfRange { field: "year", value: years })?;
        self.add_months(months)
    }

    /// Returns this date moved into another month of the same year,
    /// clamping the day of the month.
    pub fn with_month(&self, month: Month) -> Self {
        Year(self.ymd.year).month(month).clamped_day_unchecked(self.ymd.day)
    }

    /// Returns this date moved into another year, clamping the day of the
    /// month.
    pub fn with_year(&self, year: i64) -> Result<Self, Error> {
        Year(year).month(self.ymd.month).clamped_day(self.ymd.day)
    }

    /// Returns the first day of the month this date is in.
    pub fn first_of_month(&self) -> Self {
        self.year_month().clamped_day_unchecked(1)
    }

    /// Returns the last day of the month this date is in.
    pub fn last_of_month(&self) -> Self {
        let year_month = self.year_month();
        year_month.clamped_day_unchecked(year_month.day_count())
    }

    /// Returns this date with another day of the month, checking that
    /// the month actually has that day.
    pub fn with_day(&self, day: i8) -> Result<Self, Error> {
        Self::ymd(self.ymd.year, self.ymd.month, day)
    }

    /// Returns the year-month pair this date falls in.
    pub fn year_month(&self) -> YearMonth {
        Year(self.ymd.year).month(self.ymd.month)
    }
}

impl DatePiece for LocalDate {
    fn year(&self) -> i64 { self.ymd.year }
    fn month(&self) -> Month { self.ymd.month }
    fn day(&self) -> i8 { self.ymd.day }

    fn yearday(&self) -> i16 {
        let jan_1 = YMD { year: self.ymd.year, month: January, day: 1 }.days_since_epoch();
        (self.days - jan_1 + 1) as i16
    }

    fn weekday(&self) -> Weekday {
        // The 1st of January, 1970 was a Thursday.
        WEEKDAYS[(self.days + 4).rem_euclid(7) as usize]
    }
}

impl fmt::Debug for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalDate({})", self.iso())
    }
}


impl LocalTime {

    /// Computes the hours, minutes, seconds and milliseconds, based on the
    /// number of milliseconds that have elapsed since midnight.
    ///
    /// Values outside of a day wrap around.
    pub fn from_millis_since_midnight(millis: i64) -> Self {
        let millis = millis.rem_euclid(MILLIS_IN_DAY);
        Self {
            hour:        (millis / 3_600_000) as i8,
            minute:      (millis / 60_000 % 60) as i8,
            second:      (millis / 1000 % 60) as i8,
            millisecond: (millis % 1000) as i16,
        }
    }

    /// Returns the time at midnight, with all fields initialised to 0.
    pub fn midnight() -> Self {
        Self { hour: 0, minute: 0, second: 0, millisecond: 0 }
    }

    /// Returns the last millisecond of the day, 23:59:59.999.
    pub fn last_millisecond() -> Self {
        Self { hour: 23, minute: 59, second: 59, millisecond: 999 }
    }

    /// Creates a new timestamp instance with the given hour and minute
    /// fields. The second and millisecond fields are set to 0.
    pub fn hm(hour: i8, minute: i8) -> Result<Self, Error> {
        Self::hms_ms(hour, minute, 0, 0)
    }

    /// Creates a new timestamp instance with the given hour, minute, and
    /// second fields. The millisecond field is set to 0.
    pub fn hms(hour: i8, minute: i8, second: i8) -> Result<Self, Error> {
        Self::hms_ms(hour, minute, second, 0)
    }

    /// Creates a new timestamp instance with the given hour, minute,
    /// second, and millisecond fields.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an `Err`.
    pub fn hms_ms(hour: i8, minute: i8, second: i8, millisecond: i16) -> Result<Self, Error> {
        check("hour", i64::from(hour), 24)?;
        check("minute", i64::from(minute), 60)?;
        check("second", i64::from(second), 60)?;
        check("millisecond", i64::from(millisecond), 1000)?;
        Ok(Self { hour, minute, second, millisecond })
    }

    /// Calculate the number of milliseconds since midnight this time is at.
    pub fn to_millis(self) -> i64 {
        i64::from(self.hour) * 3_600_000
            + i64::from(self.minute) * 60_000
            + i64::from(self.second) * 1000
            + i64::from(self.millisecond)
    }

    pub fn with_hour(self, hour: i8) -> Result<Self, Error> {
        Self::hms_ms(hour, self.minute, self.second, self.millisecond)
    }

    pub fn with_minute(self, minute: i8) -> Result<Self, Error> {
        Self::hms_ms(self.hour, minute, self.second, self.millisecond)
    }

    pub fn with_second(self, second: i8) -> Result<Self, Error> {
        Self::hms_ms(self.hour, self.minute, second, self.millisecond)
    }
}

impl TimePiece for LocalTime {
    fn hour(&self) -> i8 { self.hour }
    fn minute(&self) -> i8 { self.minute }
    fn second(&self) -> i8 { self.second }
    fn millisecond(&self) -> i16 { self.millisecond }
}

impl fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalTime({})", self.iso())
    }
}

fn check(field: &'static str, value: i64, limit: i64) -> Result<(), Error> {
    if value.is_within(0..limit) {
        Ok(())
    }
    else {
        Err(Error::OutOfRange { field, value })
    }
}


impl LocalDateTime {

    /// Computes a complete date-time based on the values in the given
    /// Instant parameter, reading the wall clock at UTC.
    pub fn from_instant(instant: Instant) -> Self {
        Self::from_millis(instant.millis_since_epoch())
    }

    /// Computes a complete date-time based on the number of seconds that
    /// have elapsed since **midnight, 1st January, 1970**, setting the
    /// number of milliseconds to 0.
    pub fn at(seconds_since_1970_epoch: i64) -> Self {
        Self::at_ms(seconds_since_1970_epoch, 0)
    }

    /// Computes a complete date-time based on the number of seconds that
    /// have elapsed since **midnight, 1st January, 1970**, and the
    /// millisecond of the second.
    pub fn at_ms(seconds_since_1970_epoch: i64, millisecond_of_second: i16) -> Self {
        Self::from_millis(seconds_since_1970_epoch * 1000 + i64::from(millisecond_of_second))
    }

    fn from_millis(millis_since_1970_epoch: i64) -> Self {
        // Just split the input value into days and milliseconds, and let
        // LocalDate and LocalTime do all the hard work.
        let (days, millis) = split_cycles(millis_since_1970_epoch, MILLIS_IN_DAY);

        Self {
            date: LocalDate::from_days_since_epoch(days),
            time: LocalTime::from_millis_since_midnight(millis),
        }
    }

    /// Creates a new local date time from a local date and a local time.
    pub fn new(date: LocalDate, time: LocalTime) -> Self {
        Self { date, time }
    }

    /// Returns the date portion of this date-time stamp.
    pub fn date(&self) -> LocalDate {
        self.date
    }

    /// Returns the time portion of this date-time stamp.
    pub fn time(&self) -> LocalTime {
        self.time
    }

    /// Creates a new date-time stamp set to the current time, on the UTC
    /// wall clock.
    pub fn now() -> Self {
        Self::from_instant(Instant::now())
    }

    /// Returns the instant this wall-clock reading stands for, if it were
    /// read in UTC.
    pub fn to_instant(&self) -> Instant {
        Instant::from_millis(self.date.days * MILLIS_IN_DAY + self.time.to_millis())
    }

    pub fn add_millis(&self, millis: i64) -> Self {
        Self::from_millis(self.to_instant().millis_since_epoch() + millis)
    }

    /// Moves the date by a number of days, keeping the time of day.
    pub fn add_days(&self, days: i64) -> Result<Self, Error> {
        self.date.add_days(days).map(|date| self.with_date(date))
    }

    /// Moves the date by a number of calendar months, keeping the time of
    /// day and clamping the day of the month.
    pub fn add_months(&self, months: i64) -> Result<Self, Error> {
        self.date.add_months(months).map(|date| self.with_date(date))
    }

    pub fn add_years(&self, years: i64) -> Result<Self, Error> {
        self.date.add_years(years).map(|date| self.with_date(date))
    }

    pub fn with_date(&self, date: LocalDate) -> Self {
        Self { date, time: self.time }
    }

    pub fn with_time(&self, time: LocalTime) -> Self {
        Self { date: self.date, time }
    }
}

impl DatePiece for LocalDateTime {
    fn year(&self) -> i64 { self.date.ymd.year }
    fn month(&self) -> Month { self.date.ymd.month }
    fn day(&self) -> i8 { self.date.ymd.day }
    fn yearday(&self) -> i16 { self.date.yearday() }
    fn weekday(&self) -> Weekday { self.date.weekday() }
}

impl TimePiece for LocalDateTime {
    fn hour(&self) -> i8 { self.time.hour }
    fn minute(&self) -> i8 { self.time.minute }
    fn second(&self) -> i8 { self.time.second }
    fn millisecond(&self) -> i16 { self.time.millisecond }
}

impl fmt::Debug for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalDateTime({})", self.iso())
    }
}

impl Add<Duration> for LocalDateTime {
    type Output = Self;

    fn add(self, duration: Duration) -> Self {
        self.add_millis(duration.total_millis())
    }
}

impl Sub<Duration> for LocalDateTime {
    type Output = Self;

    fn sub(self, duration: Duration) -> Self {
        self.add_millis(-duration.total_millis())
    }
}

impl Sub<LocalDateTime> for LocalDateTime {
    type Output = Duration;

    fn sub(self, earlier: Self) -> Duration {
        self.to_instant() - earlier.to_instant()
    }
}


/// A **YMD** is an implementation detail of `LocalDate`. While all
/// `LocalDate` values get checked for validity before they are used,
/// there is no such check for `YMD`, so it’s free to hold the 74th of
/// March. For this reason, it is not exposed to users of this library.
#[derive(PartialEq, PartialOrd, Eq, Ord, Clone, Debug, Copy, Hash)]
struct YMD {
    year:  i64,
    month: Month,
    day:   i8,
}

impl YMD {

    /// Calculates the number of days that have elapsed since the 1st
    /// January, 1970, without checking the day is in range.
    fn days_since_epoch(&self) -> i64 {
        let month = self.month as i64;

        // Count years from March, so January and February belong to the
        // year before.
        let year = if month <= 2 { self.year - 1 } else { self.year };
        let (era, year_of_era) = split_cycles(year, 400);

        let shifted_month = if month > 2 { month - 3 } else { month + 9 };
        let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(self.day) - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        era * DAYS_IN_ERA + day_of_era - DAYS_FROM_ERA_START_TO_UNIX_EPOCH
    }

    /// Returns whether this datestamp is valid, which basically means
    /// whether the day is in the range allowed by the month.
    fn is_valid(&self) -> bool {
        self.day >= 1 && self.day <= self.month.days_in_month(Year(self.year).is_leap_year())
    }
}


/// Errors from building calendar values out of fields.
#[derive(PartialEq, Eq, Debug, Copy, Clone, thiserror::Error)]
pub enum Error {

    /// A field was given a value it can’t hold, such as hour 25 or the
    /// 30th of February.
    #[error("{field} {value} out of range")]
    OutOfRange { field: &'static str, value: i64 },
}


/// A month of the year, starting with January, and ending with December.
///
/// This is stored as an enum instead of just a number to prevent
/// off-by-one errors: is month 2 February (1-indexed) or March (0-indexed)?
/// In this case, it’s 1-indexed, to have January become 1 when you use
/// `as i32` in code.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub enum Month {
    January =  1, February =  2, March     =  3,
    April   =  4, May      =  5, June      =  6,
    July    =  7, August   =  8, September =  9,
    October = 10, November = 11, December  = 12,
}

static MONTHS: [Month; 12] = [
    January,  February,  March,
    April,    May,       June,
    July,     August,    September,
    October,  November,  December,
];

impl Month {

    /// Returns the number of days in this month, depending on whether it’s
    /// a leap year or not.
    pub fn days_in_month(self, leap_year: bool) -> i8 {
        match self {
            February                                  => if leap_year { 29 } else { 28 },
            April | June | September | November       => 30,
            _                                         => 31,
        }
    }

    pub fn months_from_january(self) -> usize {
        self as usize - 1
    }

    /// Returns the month based on a number, with January as **Month 1**,
    /// February as **Month 2**, and so on.
    ///
    /// ```rust
    /// use datetime_utils::cal::Month;
    /// assert_eq!(Month::from_one(5), Ok(Month::May));
    /// assert!(Month::from_one(0).is_err());
    /// ```
    pub fn from_one(month: i8) -> Result<Self, Error> {
        if month.is_within(1..13) {
            Ok(MONTHS[(month - 1) as usize])
        }
        else {
            Err(Error::OutOfRange { field: "month", value: i64::from(month) })
        }
    }

    /// Returns the month based on a number, with January as **Month 0**,
    /// February as **Month 1**, and so on.
    ///
    /// ```rust
    /// use datetime_utils::cal::Month;
    /// assert_eq!(Month::from_zero(5), Ok(Month::June));
    /// assert!(Month::from_zero(12).is_err());
    /// ```
    pub fn from_zero(month: i8) -> Result<Self, Error> {
        if month.is_within(0..12) {
            Ok(MONTHS[month as usize])
        }
        else {
            Err(Error::OutOfRange { field: "month", value: i64::from(month) })
        }
    }
}


/// A named day of the week.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Weekday {
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
}

static WEEKDAYS: [Weekday; 7] = [
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
];

// Weekdays get no Ord instance, as there’s no agreement on whether Sunday
// or Monday comes first. Anything that cares takes the first day of the
// week as a parameter instead.

impl Weekday {

    /// Sunday is 0, Saturday is 6.
    pub fn days_from_sunday(self) -> i8 {
        self as i8
    }

    /// Monday is 0, Sunday is 6.
    pub fn days_from_monday(self) -> i8 {
        (self as i8 + 6) % 7
    }

    /// How many days after `start` this weekday comes, from 0 to 6.
    pub fn days_since(self, start: Self) -> i8 {
        (self as i8 - start as i8).rem_euclid(7)
    }

    /// The weekday `days` after this one.
    pub fn shifted(self, days: i64) -> Self {
        WEEKDAYS[(self as i64 + days).rem_euclid(7) as usize]
    }

    /// Return the weekday based on a number, with Sunday as Day 0, Monday as
    /// Day 1, and so on.
    ///
    /// ```rust
    /// use datetime_utils::cal::Weekday;
    /// assert_eq!(Weekday::from_zero(4), Ok(Weekday::Thursday));
    /// assert!(Weekday::from_zero(7).is_err());
    /// ```
    pub fn from_zero(weekday: i8) -> Result<Self, Error> {
        if weekday.is_within(0..7) {
            Ok(WEEKDAYS[weekday as usize])
        }
        else {
            Err(Error::OutOfRange { field: "weekday", value: i64::from(weekday) })
        }
    }

    /// Return the weekday based on its ISO-8601 number, with Monday as
    /// Day 1 and Sunday as Day 7.
    pub fn from_one(weekday: i8) -> Result<Self, Error> {
        if weekday.is_within(1..8) {
            Ok(WEEKDAYS[(weekday % 7) as usize])
        }
        else {
            Err(Error::OutOfRange { field: "weekday", value: i64::from(weekday) })
        }
    }
}


/// Misc tests that don’t seem to fit anywhere.
#[cfg(test)]
mod test {
    pub(crate) use super::{LocalDateTime, LocalDate, LocalTime, Month, Weekday, Error};
    use crate::cal::DatePiece;

    #[test]
    fn some_leap_years() {
        for year in [2004, 2008, 2012, 2016].iter() {
            assert!(LocalDate::ymd(*year, Month::February, 29).is_ok());
            assert!(LocalDate::ymd(*year + 1, Month::February, 29).is_err());
        }
        assert!(LocalDate::ymd(1600, Month::February, 29).is_ok());
        assert!(LocalDate::ymd(1601, Month::February, 29).is_err());
        assert!(LocalDate::ymd(1602, Month::February, 29).is_err());
    }

    #[test]
    fn new() {
        for year in 1..3000 {
            for month in 1..13 {
                let month = Month::from_one(month).unwrap();
                let too_far = month.days_in_month(super::Year(year).is_leap_year()) + 1;
                assert!(LocalDate::ymd(year, month, too_far).is_err());
            }
        }
    }

    #[test]
    fn to_from_days_since_epoch() {
        for date in vec![
            LocalDate::ymd(1970, Month::January,   1).unwrap(),
            LocalDate::ymd(   1, Month::January,   1).unwrap(),
            LocalDate::ymd(1971, Month::January,   1).unwrap(),
            LocalDate::ymd(1989, Month::November, 10).unwrap(),
            LocalDate::ymd(2000, Month::February, 29).unwrap(),
            LocalDate::ymd(2014, Month::July,     13).unwrap(),
            LocalDate::ymd(-753, Month::December,  1).unwrap(),
        ] {
            assert_eq!(date, LocalDate::from_days_since_epoch(date.days_since_epoch()));
        }
    }

    #[test]
    fn epoch_is_day_zero() {
        let date = LocalDate::ymd(1970, Month::January, 1).unwrap();
        assert_eq!(date.days_since_epoch(), 0);
        assert_eq!(date.weekday(), Weekday::Thursday);
    }

    #[test]
    fn day_before_epoch() {
        let date = LocalDate::from_days_since_epoch(-1);
        assert_eq!(date, LocalDate::ymd(1969, Month::December, 31).unwrap());
        assert_eq!(date.weekday(), Weekday::Wednesday);
    }

    #[test]
    fn month_overflow_clamps() {
        let date = LocalDate::ymd(2024, Month::January, 31).unwrap();
        assert_eq!(date.add_months(1), LocalDate::ymd(2024, Month::February, 29));
        assert_eq!(date.add_months(-2), LocalDate::ymd(2023, Month::November, 30));
    }

    #[test]
    fn leap_day_plus_a_year() {
        let date = LocalDate::ymd(2024, Month::February, 29).unwrap();
        assert_eq!(date.add_years(1), LocalDate::ymd(2025, Month::February, 28));
    }

    mod limits {
        use super::*;
        use super::super::{MIN_YEAR, MAX_YEAR};

        #[test]
        fn last_supported_day() {
            let date = LocalDate::ymd(MAX_YEAR, Month::December, 31).unwrap();
            assert_eq!(date.add_days(1), Err(Error::OutOfRange { field: "year", value: MAX_YEAR + 1 }));
            assert!(date.add_days(-1).is_ok());
        }

        #[test]
        fn first_supported_day() {
            let date = LocalDate::ymd(MIN_YEAR, Month::January, 1).unwrap();
            assert!(date.add_days(-1).is_err());
            assert!(date.add_months(-1).is_err());
        }

        #[test]
        fn years_out_of_range() {
            assert_eq!(LocalDate::ymd(MAX_YEAR + 1, Month::January, 1), Err(Error::OutOfRange { field: "year", value: MAX_YEAR + 1 }));
            assert!(LocalDate::yd(i64::MAX, 1).is_err());
            assert!(LocalDate::ywd(i64::MIN, 1, Weekday::Monday).is_err());
        }

        #[test]
        fn huge_steps() {
            let date = LocalDate::ymd(2024, Month::February, 1).unwrap();
            assert!(date.add_days(i64::MAX).is_err());
            assert!(date.add_days(i64::MIN).is_err());
            assert!(date.add_months(i64::MAX).is_err());
            assert!(date.add_years(i64::MAX / 2).is_err());
            assert!(date.with_year(i64::MAX / 2).is_err());
        }
    }

    #[test]
    fn time_out_of_range() {
        assert_eq!(LocalTime::hms(24, 0, 0), Err(Error::OutOfRange { field: "hour", value: 24 }));
        assert_eq!(LocalTime::hm(12, 60).unwrap_err().to_string(), "minute 60 out of range");
    }

    #[test]
    fn weekday_arithmetic() {
        assert_eq!(Weekday::Sunday.days_since(Weekday::Monday), 6);
        assert_eq!(Weekday::Monday.days_since(Weekday::Sunday), 1);
        assert_eq!(Weekday::Saturday.shifted(2), Weekday::Monday);
        assert_eq!(Weekday::from_one(7), Ok(Weekday::Sunday));
    }

    mod debug {
        use super::*;

        #[test]
        fn recently() {
            let date = LocalDate::ymd(1600, Month::February, 28).unwrap();
            let debugged = format!("{:?}", date);

            assert_eq!(debugged, "LocalDate(1600-02-28)");
        }

        #[test]
        fn just_then() {
            let date = LocalDate::ymd(-753, Month::December, 1).unwrap();
            let debugged = format!("{:?}", date);

            assert_eq!(debugged, "LocalDate(-0753-12-01)");
        }

        #[test]
        fn far_far_future() {
            let date = LocalDate::ymd(10601, Month::January, 31).unwrap();
            let debugged = format!("{:?}", date);

            assert_eq!(debugged, "LocalDate(+10601-01-31)");
        }

        #[test]
        fn midday() {
            let time = LocalTime::hms(12, 0, 0).unwrap();
            let debugged = format!("{:?}", time);

            assert_eq!(debugged, "LocalTime(12:00:00.000)");
        }

        #[test]
        fn ascending() {
            let then = LocalDateTime::new(
                        LocalDate::ymd(2009, Month::February, 13).unwrap(),
                        LocalTime::hms(23, 31, 30).unwrap());
            let debugged = format!("{:?}", then);

            assert_eq!(debugged, "LocalDateTime(2009-02-13T23:31:30.000)");
        }
    }
}
