//! ISO-8601 rendering of calendar values.

use std::fmt;

use crate::cal::{LocalDate, LocalTime, LocalDateTime, DatePiece, TimePiece};
use crate::cal::offset::Offset;
use crate::util::RangeExt;


/// Values that have a canonical ISO-8601 form.
pub trait ISO: Sized + Copy {

    /// Returns a displayable wrapper that renders this value in ISO-8601.
    fn iso(&self) -> ISOString<Self> {
        ISOString(*self)
    }
}

/// A value waiting to be rendered in ISO-8601.
#[derive(Debug, Clone, Copy)]
pub struct ISOString<T>(T);

impl ISO for LocalDate {}
impl ISO for LocalTime {}
impl ISO for LocalDateTime {}
impl ISO for Offset {}

impl fmt::Display for ISOString<LocalDate> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let year = self.0.year();
        if year.is_within(0 .. 10000) {
            write!(f, "{:04}-{:02}-{:02}", year, self.0.month() as usize, self.0.day())
        }
        else {
            write!(f, "{:+05}-{:02}-{:02}", year, self.0.month() as usize, self.0.day())
        }
    }
}

impl fmt::Display for ISOString<LocalTime> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}.{:03}", self.0.hour(), self.0.minute(), self.0.second(), self.0.millisecond())
    }
}

impl fmt::Display for ISOString<LocalDateTime> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}T{}", self.0.date().iso(), self.0.time().iso())
    }
}

impl fmt::Display for ISOString<Offset> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let offset = self.0;
        if offset.is_utc() {
            return write!(f, "Z");
        }

        let sign = if offset.is_negative() { '-' } else { '+' };
        write!(f, "{}{:02}:{:02}", sign, offset.hours().abs(), offset.minutes().abs())?;
        if offset.seconds() != 0 {
            write!(f, ":{:02}", offset.seconds().abs())?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod test {
    use super::ISO;
    use crate::cal::{LocalDate, Month};

    #[test]
    fn year_ten_thousand() {
        let date = LocalDate::ymd(10000, Month::January, 1).unwrap();
        assert_eq!(date.iso().to_string(), "+10000-01-01");
    }

    #[test]
    fn year_nine_thousand_nine_hundred_and_ninety_nine() {
        let date = LocalDate::ymd(9999, Month::December, 31).unwrap();
        assert_eq!(date.iso().to_string(), "9999-12-31");
    }
}
