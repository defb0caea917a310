//! Calendar units, and rounding date-times to their boundaries.

use crate::cal::{DatePiece, LocalTime, LocalDateTime, Weekday, Month, Error};


/// A span of the calendar that a date-time can be rounded to.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Unit {
    Day,
    Week,
    Month,
    Year,
}

impl Unit {

    /// The first millisecond of the unit `when` falls in. Weeks begin on
    /// `week_start`, and a week that would start before the earliest
    /// supported year is an error.
    ///
    /// ### Examples
    ///
    /// ```
    /// use datetime_utils::cal::{LocalDate, LocalTime, LocalDateTime, Month, Weekday};
    /// use datetime_utils::cal::unit::Unit;
    ///
    /// let when = LocalDateTime::new(LocalDate::ymd(2024, Month::February, 1).unwrap(), LocalTime::hm(9, 30).unwrap());
    /// let start = Unit::Week.start_of(when, Weekday::Sunday).unwrap();
    /// assert_eq!(start.date(), LocalDate::ymd(2024, Month::January, 28).unwrap());
    /// ```
    pub fn start_of(self, when: LocalDateTime, week_start: Weekday) -> Result<LocalDateTime, Error> {
        let date = when.date();
        let first_day = match self {
            Unit::Day   => date,
            Unit::Week  => date.add_days(-i64::from(date.weekday().days_since(week_start)))?,
            Unit::Month => date.first_of_month(),
            Unit::Year  => date.with_month(Month::January).first_of_month(),
        };

        Ok(LocalDateTime::new(first_day, LocalTime::midnight()))
    }

    /// The last millisecond of the unit `when` falls in.
    pub fn end_of(self, when: LocalDateTime, week_start: Weekday) -> Result<LocalDateTime, Error> {
        let date = self.start_of(when, week_start)?.date();
        let last_day = match self {
            Unit::Day   => date,
            Unit::Week  => date.add_days(6)?,
            Unit::Month => date.last_of_month(),
            Unit::Year  => date.with_month(Month::December).last_of_month(),
        };

        Ok(LocalDateTime::new(last_day, LocalTime::last_millisecond()))
    }
}
