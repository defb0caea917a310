//! Reading dates back in using the same token patterns they’re written
//! out with.
//!
//! Every field of the pattern has to be present in the input, and nothing
//! may follow the last one. Units the pattern doesn’t mention are filled
//! in: anything larger than the largest unit it does mention comes from
//! the reference time passed in, and anything smaller starts at its
//! minimum. So `HH:mm` reads a time on today’s date, and `MMMM yyyy` reads
//! midnight on the first of the month.

use crate::cal::{DatePiece, TimePiece, LocalDate, LocalTime, LocalDateTime, Month, Weekday};
use crate::cal::fmt::custom::{DateFormat, Field, NumArguments, Pos};
use crate::locale::Locale;


#[derive(PartialEq, Eq, Debug, Clone, Copy, thiserror::Error)]
pub enum Error {
    #[error("expected {expected} at position {pos}")]
    Mismatch { expected: &'static str, pos: Pos },

    #[error("unexpected input at position {pos}")]
    TrailingInput { pos: Pos },

    #[error("weekday does not match the date")]
    WeekdayMismatch,

    #[error(transparent)]
    Field(#[from] crate::cal::Error),
}


/// Reads `input` according to `format`, with names and localized fields
/// taken from `locale` and missing large units taken from `now`.
///
/// ### Examples
///
/// ```
/// use datetime_utils::cal::{LocalDate, LocalDateTime, LocalTime, Month};
/// use datetime_utils::cal::fmt::{strict, DateFormat};
/// use datetime_utils::locale::Locale;
///
/// let now = LocalDateTime::new(LocalDate::ymd(2024, Month::June, 15).unwrap(), LocalTime::hm(8, 0).unwrap());
/// let format = DateFormat::parse("MMMM d").unwrap();
/// let read = strict::parse("march 3", &format, &Locale::english(), now).unwrap();
///
/// assert_eq!(read, LocalDateTime::new(LocalDate::ymd(2024, Month::March, 3).unwrap(), LocalTime::midnight()));
/// ```
pub fn parse(input: &str, format: &DateFormat, locale: &Locale, now: LocalDateTime) -> Result<LocalDateTime, Error> {
    let mut reader = Reader { input, pos: 0, locale, parts: Parts::default() };

    for field in format.expanded(locale) {
        reader.read_field(&field)?;
    }

    if reader.pos < input.len() {
        return Err(Error::TrailingInput { pos: reader.pos });
    }

    reader.parts.assemble(now)
}


/// The pieces found in the input so far.
#[derive(Default, Debug)]
struct Parts {
    year:        Option<i64>,
    month:       Option<i64>,
    day:         Option<i64>,
    yearday:     Option<i64>,
    weekday:     Option<Weekday>,
    hour:        Option<i64>,
    half_hour:   Option<i64>,
    pm:          Option<bool>,
    minute:      Option<i64>,
    second:      Option<i64>,
    millisecond: Option<i64>,
}

/// Units from largest to smallest, for deciding which missing units come
/// from the reference time.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
enum Unit {
    Year, Month, Day, Hour, Minute, Second, Millisecond,
}

impl Parts {
    fn largest_unit(&self) -> Option<Unit> {
        let present = [
            (self.year.is_some(),                           Unit::Year),
            (self.month.is_some(),                          Unit::Month),
            (self.day.is_some() || self.yearday.is_some(),  Unit::Day),
            (self.hour.is_some() || self.half_hour.is_some(), Unit::Hour),
            (self.minute.is_some(),                         Unit::Minute),
            (self.second.is_some(),                         Unit::Second),
            (self.millisecond.is_some(),                    Unit::Millisecond),
        ];

        present.iter().find(|(is_present, _)| *is_present).map(|(_, unit)| *unit)
    }

    fn assemble(self, now: LocalDateTime) -> Result<LocalDateTime, Error> {
        let largest = self.largest_unit().unwrap_or(Unit::Millisecond);
        let fill = |value: Option<i64>, unit: Unit, current: i64, minimum: i64| {
            value.unwrap_or(if unit < largest { current } else { minimum })
        };

        let year = fill(self.year, Unit::Year, now.year(), 1970);

        let date = match self.yearday {
            Some(yearday) if self.month.is_none() && self.day.is_none() => LocalDate::yd(year, yearday)?,
            _ => {
                let month = fill(self.month, Unit::Month, now.month() as i64, 1);
                let day = fill(self.day, Unit::Day, i64::from(now.day()), 1);
                let month = Month::from_one(narrow(month, "month")?)?;
                LocalDate::ymd(year, month, narrow(day, "day")?)?
            },
        };

        if let Some(weekday) = self.weekday {
            if date.weekday() != weekday {
                return Err(Error::WeekdayMismatch);
            }
        }

        let hour = match (self.hour, self.half_hour, self.pm) {
            (Some(hour), _, _)              => hour,
            (None, Some(h), Some(pm))       => h % 12 + if pm { 12 } else { 0 },
            (None, Some(h), None)           => h,
            (None, None, _)                 => fill(None, Unit::Hour, i64::from(now.hour()), 0),
        };
        let minute = fill(self.minute, Unit::Minute, i64::from(now.minute()), 0);
        let second = fill(self.second, Unit::Second, i64::from(now.second()), 0);
        let millisecond = fill(self.millisecond, Unit::Millisecond, i64::from(now.millisecond()), 0);

        let time = LocalTime::hms_ms(narrow(hour, "hour")?, narrow(minute, "minute")?,
                                     narrow(second, "second")?, narrow(millisecond, "millisecond")?)?;

        Ok(LocalDateTime::new(date, time))
    }
}

fn narrow<T: TryFrom<i64>>(value: i64, field: &'static str) -> Result<T, crate::cal::Error> {
    T::try_from(value).map_err(|_| crate::cal::Error::OutOfRange { field, value })
}


struct Reader<'a> {
    input:  &'a str,
    pos:    Pos,
    locale: &'a Locale,
    parts:  Parts,
}

impl<'a> Reader<'a> {

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn read_field(&mut self, field: &Field) -> Result<(), Error> {
        match field {
            Field::Literal(text) => {
                if self.rest().starts_with(text.as_str()) {
                    self.pos += text.len();
                    Ok(())
                }
                else {
                    Err(Error::Mismatch { expected: "literal text", pos: self.pos })
                }
            },
            Field::Year(a)          => { self.parts.year = Some(self.read_number(*a, 6, "year")?); Ok(()) },
            Field::YearOfCentury(a) => {
                let year = self.read_number(*a, 2, "two-digit year")?;
                self.parts.year = Some(if year < 60 { 2000 + year } else { 1900 + year });
                Ok(())
            },
            Field::Month(a)         => { self.parts.month = Some(self.read_number(*a, 2, "month")?); Ok(()) },
            Field::MonthName(style) | Field::StandaloneMonthName(style) => {
                let locale = *self.locale;
                let names = (1..=12)
                    .filter_map(|n| Month::from_one(n).ok())
                    .flat_map(|m| vec![
                        (locale.month_name(m, *style), m as i64),
                        (locale.standalone_month_name(m, *style), m as i64),
                    ]);
                self.parts.month = Some(self.read_name(names, "month name")?);
                Ok(())
            },
            Field::Day(a)           => { self.parts.day = Some(self.read_number(*a, 2, "day")?); Ok(()) },
            Field::DayOfYear(a)     => { self.parts.yearday = Some(self.read_number(*a, 3, "day of year")?); Ok(()) },
            Field::Weekday          => {
                let number = self.read_number(NumArguments::empty(), 1, "weekday")?;
                self.parts.weekday = Some(Weekday::from_one(number as i8)?);
                Ok(())
            },
            Field::WeekdayName(style) => {
                let locale = *self.locale;
                let names = (0..7)
                    .filter_map(|n| Weekday::from_zero(n).ok())
                    .map(|d| (locale.weekday_name(d, *style), i64::from(d.days_from_sunday())));
                let index = self.read_name(names, "weekday name")?;
                self.parts.weekday = Some(Weekday::from_zero(index as i8)?);
                Ok(())
            },
            Field::Hour(a)          => { self.parts.hour = Some(self.read_number(*a, 2, "hour")?); Ok(()) },
            Field::HourOfHalfDay(a) => {
                let hour = self.read_number(*a, 2, "hour")?;
                if !(1..=12).contains(&hour) {
                    return Err(crate::cal::Error::OutOfRange { field: "hour", value: hour }.into());
                }
                self.parts.half_hour = Some(hour);
                Ok(())
            },
            Field::Minute(a)        => { self.parts.minute = Some(self.read_number(*a, 2, "minute")?); Ok(()) },
            Field::Second(a)        => { self.parts.second = Some(self.read_number(*a, 2, "second")?); Ok(()) },
            Field::Millisecond(a)   => { self.parts.millisecond = Some(self.read_number(*a, 3, "millisecond")?); Ok(()) },
            Field::Meridiem         => {
                let [am, pm] = self.locale.meridiem_labels();
                let names = vec![ (am, 0), (pm, 1), ("AM", 0), ("PM", 1) ];
                self.parts.pm = Some(self.read_name(names.into_iter(), "meridiem")? == 1);
                Ok(())
            },
            Field::Localized(l)     => {
                for field in l.expand(self.locale) {
                    self.read_field(&field)?;
                }
                Ok(())
            },
        }
    }

    /// Reads an unsigned number. Padded fields need exactly their width in
    /// digits, and unpadded ones take as many as there are, up to `max`.
    fn read_number(&mut self, args: NumArguments, max: usize, expected: &'static str) -> Result<i64, Error> {
        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        let wanted = match args.width() {
            Some(width) if width > 1 => width,
            _                        => digits.min(max),
        };

        if digits == 0 || digits < wanted {
            return Err(Error::Mismatch { expected, pos: self.pos });
        }

        let text = &self.rest()[..wanted];
        let number = text.parse().map_err(|_| Error::Mismatch { expected, pos: self.pos })?;
        self.pos += wanted;
        Ok(number)
    }

    /// Reads whichever of the given names matches the input for longest,
    /// ignoring case.
    fn read_name<N, I>(&mut self, names: I, expected: &'static str) -> Result<i64, Error>
    where N: AsRef<str>,
          I: Iterator<Item=(N, i64)>,
    {
        let rest = self.rest();
        let best = names
            .filter_map(|(name, value)| match_prefix(rest, name.as_ref()).map(|len| (len, value)))
            .fold(None, |best: Option<(usize, i64)>, (len, value)| match best {
                Some((best_len, _)) if best_len >= len => best,
                _ => Some((len, value)),
            });

        match best {
            Some((len, value)) => { self.pos += len; Ok(value) },
            None               => Err(Error::Mismatch { expected, pos: self.pos }),
        }
    }
}

/// If `input` starts with `candidate`, ignoring case, returns how many
/// bytes of `input` it covers.
fn match_prefix(input: &str, candidate: &str) -> Option<usize> {
    if candidate.is_empty() {
        return None;
    }

    let mut consumed = 0;
    let mut input_chars = input.chars();
    for expected in candidate.chars() {
        let actual = input_chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed += actual.len_utf8();
    }
    Some(consumed)
}

#[cfg(test)]
mod test {
    use super::{parse, Error};
    use crate::cal::{LocalDate, LocalTime, LocalDateTime, Month};
    use crate::cal::fmt::DateFormat;
    use crate::locale::Locale;

    fn now() -> LocalDateTime {
        LocalDateTime::new(
            LocalDate::ymd(2024, Month::June, 15).unwrap(),
            LocalTime::hms_ms(8, 30, 45, 500).unwrap())
    }

    fn read(input: &str, pattern: &str) -> Result<LocalDateTime, Error> {
        parse(input, &DateFormat::parse(pattern).unwrap(), &Locale::english(), now())
    }

    fn at(year: i64, month: Month, day: i8, hour: i8, minute: i8, second: i8) -> LocalDateTime {
        LocalDateTime::new(LocalDate::ymd(year, month, day).unwrap(), LocalTime::hms(hour, minute, second).unwrap())
    }

    #[test]
    fn full_date() {
        assert_eq!(read("2024-02-01", "yyyy-MM-dd"), Ok(at(2024, Month::February, 1, 0, 0, 0)));
    }

    #[test]
    fn unpadded_fields() {
        assert_eq!(read("2/1/2024", "M/d/yyyy"), Ok(at(2024, Month::February, 1, 0, 0, 0)));
        assert_eq!(read("12/31/2024", "M/d/yyyy"), Ok(at(2024, Month::December, 31, 0, 0, 0)));
    }

    #[test]
    fn time_only_uses_today() {
        assert_eq!(read("14:05", "HH:mm"), Ok(at(2024, Month::June, 15, 14, 5, 0)));
    }

    #[test]
    fn month_name_only() {
        assert_eq!(read("February", "MMMM"), Ok(at(2024, Month::February, 1, 0, 0, 0)));
    }

    #[test]
    fn month_name_any_case() {
        assert_eq!(read("feb 3", "MMM d"), Ok(at(2024, Month::February, 3, 0, 0, 0)));
    }

    #[test]
    fn either_form_of_a_month() {
        let ru = Locale::resolve("ru");
        let read = |input: &str, pattern: &str| parse(input, &DateFormat::parse(pattern).unwrap(), &ru, now());

        assert_eq!(read("1 февраля 2024", "d MMMM yyyy"), Ok(at(2024, Month::February, 1, 0, 0, 0)));
        assert_eq!(read("Февраль 2024", "LLLL yyyy"), Ok(at(2024, Month::February, 1, 0, 0, 0)));
        assert_eq!(read("февраль 2024", "MMMM yyyy"), Ok(at(2024, Month::February, 1, 0, 0, 0)));
    }

    #[test]
    fn twelve_hour_clock() {
        assert_eq!(read("2024-02-01 10:30 PM", "yyyy-MM-dd hh:mm a"), Ok(at(2024, Month::February, 1, 22, 30, 0)));
        assert_eq!(read("2024-02-01 12:15 am", "yyyy-MM-dd hh:mm a"), Ok(at(2024, Month::February, 1, 0, 15, 0)));
    }

    #[test]
    fn two_digit_year() {
        assert_eq!(read("01/02/24", "dd/MM/yy"), Ok(at(2024, Month::February, 1, 0, 0, 0)));
        assert_eq!(read("01/02/75", "dd/MM/yy"), Ok(at(1975, Month::February, 1, 0, 0, 0)));
    }

    #[test]
    fn day_of_year() {
        assert_eq!(read("2024 060", "yyyy ooo"), Ok(at(2024, Month::February, 29, 0, 0, 0)));
    }

    #[test]
    fn matching_weekday() {
        assert_eq!(read("Thursday, 2024-02-01", "EEEE, yyyy-MM-dd"), Ok(at(2024, Month::February, 1, 0, 0, 0)));
    }

    #[test]
    fn mismatched_weekday() {
        assert_eq!(read("Friday, 2024-02-01", "EEEE, yyyy-MM-dd"), Err(Error::WeekdayMismatch));
    }

    #[test]
    fn localized_pattern() {
        assert_eq!(read("Feb 1, 2024, 9:05 AM", "ff"), Ok(at(2024, Month::February, 1, 9, 5, 0)));
    }

    #[test]
    fn impossible_day() {
        assert!(matches!(read("2023-02-29", "yyyy-MM-dd"), Err(Error::Field(_))));
    }

    #[test]
    fn missing_digits() {
        assert_eq!(read("2024-2-01", "yyyy-MM-dd"), Err(Error::Mismatch { expected: "month", pos: 5 }));
    }

    #[test]
    fn wrong_literal() {
        assert_eq!(read("2024/02/01", "yyyy-MM-dd"), Err(Error::Mismatch { expected: "literal text", pos: 4 }));
    }

    #[test]
    fn trailing_text() {
        assert_eq!(read("2024-02-01 extra", "yyyy-MM-dd"), Err(Error::TrailingInput { pos: 10 }));
    }
}
