//! ISO-8601 parsing, on top of the `iso8601` crate.

use std::str::FromStr;

use crate::cal::datetime::{LocalDate, LocalTime, LocalDateTime, Month, Weekday, Error as DateTimeError};
use crate::cal::offset::{Offset, Error as OffsetError};


impl FromStr for LocalDate {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match iso8601::date(input) {
            Ok(fields)  => Ok(fields_to_date(fields)?),
            Err(e)      => Err(Error::Parse(e)),
        }
    }
}

impl FromStr for LocalTime {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match iso8601::time(input) {
            Ok(fields)  => Ok(fields_to_time(fields)?),
            Err(e)      => Err(Error::Parse(e)),
        }
    }
}

impl FromStr for LocalDateTime {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = match iso8601::datetime(input) {
            Ok(fields)  => fields,
            Err(e)      => return Err(Error::Parse(e)),
        };

        let date = fields_to_date(fields.date)?;
        let time = fields_to_time(fields.time)?;
        Ok(Self::new(date, time))
    }
}


/// Parses an ISO-8601 date, or date and time, returning the wall-clock
/// reading along with the offset it was written in, if it named one.
///
/// This is more forgiving than the `FromStr` implementations: a date on
/// its own means midnight, a space may stand in for the `T` between the
/// date and the time, and surrounding whitespace is ignored.
///
/// ### Examples
///
/// ```
/// use datetime_utils::cal::parse::parse_iso;
/// use datetime_utils::cal::offset::Offset;
///
/// let (_, offset) = parse_iso("2024-02-01 10:30:00+05:30").unwrap();
/// assert_eq!(offset, Some(Offset::of_hours_and_minutes(5, 30).unwrap()));
///
/// let (_, offset) = parse_iso("2024-02-01").unwrap();
/// assert_eq!(offset, None);
/// ```
pub fn parse_iso(input: &str) -> Result<(LocalDateTime, Option<Offset>), Error> {
    let input = input.trim();

    let split = input.find(|c| c == 'T' || c == 't' || c == ' ');
    let (date_part, time_part) = match split {
        Some(pos) => (&input[..pos], Some(input[pos + 1..].trim_start())),
        None      => (input, None),
    };

    let date = fields_to_date(iso8601::date(date_part).map_err(Error::Parse)?)?;

    let time_part = match time_part {
        Some(time_part) => time_part.to_ascii_uppercase(),
        None            => return Ok((LocalDateTime::new(date, LocalTime::midnight()), None)),
    };

    let fields = iso8601::time(&time_part).map_err(Error::Parse)?;
    let offset = if has_zone_designator(&time_part) {
        let hours = fields.tz_offset_hours as i8;
        let minutes = fields.tz_offset_minutes as i8;
        Some(Offset::of_hours_and_minutes(hours, minutes)?)
    }
    else {
        None
    };

    let time = fields_to_time(fields)?;

    Ok((LocalDateTime::new(date, time), offset))
}

/// Whether an ISO-8601 time ends with `Z` or a numeric offset. The parser
/// reports no offset and a zero offset the same way, so this has to be
/// checked on the text.
fn has_zone_designator(time: &str) -> bool {
    time.ends_with('Z') || time.contains('+') || time.contains('-')
}


fn fields_to_date(fields: iso8601::Date) -> Result<LocalDate, DateTimeError> {
    if let iso8601::Date::YMD { year, month, day } = fields {
        let month_variant = Month::from_one(month as i8)?;
        LocalDate::ymd(i64::from(year), month_variant, day as i8)
    }
    else if let iso8601::Date::Week { year, ww, d } = fields {
        let weekday_variant = Weekday::from_one(d as i8)?;
        LocalDate::ywd(i64::from(year), i64::from(ww), weekday_variant)
    }
    else if let iso8601::Date::Ordinal { year, ddd } = fields {
        LocalDate::yd(i64::from(year), i64::from(ddd))
    }
    else {
        Err(DateTimeError::OutOfRange { field: "date", value: 0 })
    }
}

fn fields_to_time(fields: iso8601::Time) -> Result<LocalTime, DateTimeError> {
    let h  = fields.hour as i8;
    let m  = fields.minute as i8;
    let s  = fields.second as i8;
    let ms = fields.millisecond as i16;

    LocalTime::hms_ms(h, m, s, ms)
}


#[derive(PartialEq, Eq, Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("parsing resulted in an invalid date: {0}")]
    Date(#[from] DateTimeError),

    #[error("parsing resulted in an invalid offset: {0}")]
    Offset(#[from] OffsetError),

    #[error("parse error: {0}")]
    Parse(String),
}


#[cfg(test)]
mod test {
    use super::{parse_iso, Error};
    use crate::cal::{LocalDate, LocalTime, LocalDateTime, Month};
    use crate::cal::offset::Offset;

    fn at(year: i64, month: Month, day: i8, hour: i8, minute: i8) -> LocalDateTime {
        LocalDateTime::new(LocalDate::ymd(year, month, day).unwrap(), LocalTime::hm(hour, minute).unwrap())
    }

    #[test]
    fn date_only() {
        assert_eq!(parse_iso("2024-02-01"), Ok((at(2024, Month::February, 1, 0, 0), None)));
    }

    #[test]
    fn date_and_time() {
        assert_eq!(parse_iso("2024-02-01T10:30"), Ok((at(2024, Month::February, 1, 10, 30), None)));
    }

    #[test]
    fn space_separated() {
        assert_eq!(parse_iso("2024-02-01 10:30"), Ok((at(2024, Month::February, 1, 10, 30), None)));
    }

    #[test]
    fn zulu() {
        assert_eq!(parse_iso("2024-02-01T10:30:00Z"), Ok((at(2024, Month::February, 1, 10, 30), Some(Offset::utc()))));
    }

    #[test]
    fn negative_offset() {
        let offset = Offset::of_hours_and_minutes(-4, 0).unwrap();
        assert_eq!(parse_iso("2024-02-01T10:30:00-04:00"), Ok((at(2024, Month::February, 1, 10, 30), Some(offset))));
    }

    #[test]
    fn ordinal_date() {
        assert_eq!(parse_iso("2024-060"), Ok((at(2024, Month::February, 29, 0, 0), None)));
    }

    #[test]
    fn week_date() {
        assert_eq!(parse_iso("2024-W05-4"), Ok((at(2024, Month::February, 1, 0, 0), None)));
    }

    #[test]
    fn impossible_date() {
        assert!(parse_iso("2023-02-29").is_err());
        assert!(parse_iso("2023-04-31T10:00").is_err());
    }

    #[test]
    fn not_a_date() {
        assert!(matches!(parse_iso("yesterday"), Err(Error::Parse(_))));
    }

    #[test]
    fn from_str() {
        let date: LocalDate = "2024-02-01".parse().unwrap();
        assert_eq!(date, LocalDate::ymd(2024, Month::February, 1).unwrap());

        let time: LocalTime = "13:45:10".parse().unwrap();
        assert_eq!(time, LocalTime::hms(13, 45, 10).unwrap());
    }
}
