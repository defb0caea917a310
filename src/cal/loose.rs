//! Forgiving date parsing, for text whose shape isn’t known in advance.
//!
//! ISO-8601 is tried first. Failing that, the text is split into words,
//! numbers and punctuation, and read the way a person would: month names
//! in English, numeric dates as year-month-day when they start with four
//! digits and month/day/year otherwise, times as `h:mm[:ss[.SSS]]` with an
//! optional `am` or `pm`, and zones as `Z`, `UTC`, `GMT` or a signed
//! offset. Weekday names are allowed and ignored, as is anything in
//! parentheses.

use std::str::CharIndices;

use crate::cal::{LocalDate, LocalTime, LocalDateTime, Month};
use crate::cal::offset::{Offset, Error as OffsetError};
use crate::cal::parse::parse_iso;


#[derive(PartialEq, Eq, Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("unexpected `{0}`")]
    Unexpected(String),

    #[error("no complete date found")]
    MissingDate,

    #[error(transparent)]
    Field(#[from] crate::cal::Error),

    #[error(transparent)]
    Offset(#[from] OffsetError),
}


/// Parses a date, and possibly a time and zone, out of free-form text.
/// Returns the wall-clock reading and the offset it was written in, if
/// the text named one.
///
/// ### Examples
///
/// ```
/// use datetime_utils::cal::{LocalDate, Month};
/// use datetime_utils::cal::loose::parse_loose;
///
/// let (when, offset) = parse_loose("Thu, Feb 1 2024 10:30 PM").unwrap();
/// assert_eq!(when.date(), LocalDate::ymd(2024, Month::February, 1).unwrap());
/// assert_eq!(offset, None);
/// ```
pub fn parse_loose(input: &str) -> Result<(LocalDateTime, Option<Offset>), Error> {
    if let Ok(parsed) = parse_iso(input) {
        return Ok(parsed);
    }

    let tokens = Scanner::new(input).tokens();
    let mut reader = Reader { tokens: &tokens, index: 0, found: Found::default() };
    reader.read_all()?;
    reader.found.assemble()
}


#[derive(PartialEq, Eq, Debug, Clone, Copy)]
enum Token<'a> {
    Number(&'a str),
    Word(&'a str),
    Punct(char),
}


struct Scanner<'a> {
    iter:   CharIndices<'a>,
    input:  &'a str,
    peekee: Option<Option<(usize, char)>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Scanner<'a> {
        Scanner {
            iter:   input.char_indices(),
            input,
            peekee: None,
        }
    }

    fn next(&mut self) -> Option<(usize, char)> {
        match self.peekee {
            Some(p) => {
                self.peekee = None;
                p
            },
            None => { self.iter.next() },
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        match self.peekee {
            Some(thing) => thing,
            None => {
                self.peekee = Some(self.iter.next());
                self.peek()
            }
        }
    }

    /// Consumes characters for as long as they pass the test, returning
    /// the byte position just after the last one.
    fn take_while(&mut self, start: usize, test: impl Fn(char) -> bool) -> usize {
        let mut end = start;
        while let Some((pos, c)) = self.peek() {
            if !test(c) {
                break;
            }
            end = pos + c.len_utf8();
            let _ = self.next();
        }
        end
    }

    fn tokens(mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();

        while let Some((pos, c)) = self.next() {
            if c.is_whitespace() || c == ',' {
                continue;
            }
            else if c == '(' {
                // Comments, such as a trailing zone name.
                let _ = self.take_while(pos, |c| c != ')');
                let _ = self.next();
            }
            else if c.is_ascii_digit() {
                let end = self.take_while(pos + 1, |c| c.is_ascii_digit());
                tokens.push(Token::Number(&self.input[pos..end]));
            }
            else if c.is_alphabetic() {
                let end = self.take_while(pos + c.len_utf8(), char::is_alphabetic);
                tokens.push(Token::Word(&self.input[pos..end]));

                // Abbreviations such as `Feb.` or `a.m.`
                if let Some((_, '.')) = self.peek() {
                    let _ = self.next();
                }
            }
            else {
                tokens.push(Token::Punct(c));
            }
        }

        tokens
    }
}


/// Everything read out of the text so far.
#[derive(Default, Debug)]
struct Found {
    year:    Option<i64>,
    month:   Option<Month>,
    day:     Option<i64>,
    loose:   Vec<i64>,
    time:    Option<(i64, i64, i64, i64)>,
    pm:      Option<bool>,
    offset:  Option<Offset>,
}

impl Found {
    fn assemble(mut self) -> Result<(LocalDateTime, Option<Offset>), Error> {
        // Numbers not part of a numeric date or a time: with a month name,
        // the big one is the year and the small one is the day.
        for number in std::mem::take(&mut self.loose) {
            if self.year.is_none() && number > 31 {
                self.year = Some(number);
            }
            else if self.day.is_none() {
                self.day = Some(number);
            }
            else if self.year.is_none() {
                self.year = Some(number);
            }
            else {
                return Err(Error::Unexpected(number.to_string()));
            }
        }

        let (year, month, day) = match (self.year, self.month, self.day) {
            (Some(year), Some(month), Some(day)) => (year, month, day),
            _ => return Err(Error::MissingDate),
        };

        let date = LocalDate::ymd(year, month, narrow(day, "day")?)?;

        let (hour, minute, second, millisecond) = self.time.unwrap_or((0, 0, 0, 0));
        let hour = match self.pm {
            Some(pm) if (1..=12).contains(&hour) => hour % 12 + if pm { 12 } else { 0 },
            Some(_)                              => return Err(crate::cal::Error::OutOfRange { field: "hour", value: hour }.into()),
            None                                 => hour,
        };

        let time = LocalTime::hms_ms(narrow(hour, "hour")?, narrow(minute, "minute")?,
                                     narrow(second, "second")?, narrow(millisecond, "millisecond")?)?;

        Ok((LocalDateTime::new(date, time), self.offset))
    }
}

fn narrow<T: TryFrom<i64>>(value: i64, field: &'static str) -> Result<T, crate::cal::Error> {
    T::try_from(value).map_err(|_| crate::cal::Error::OutOfRange { field, value })
}


struct Reader<'t, 'a> {
    tokens: &'t [Token<'a>],
    index:  usize,
    found:  Found,
}

impl<'t, 'a> Reader<'t, 'a> {

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.index).copied();
        self.index += 1;
        token
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.index).copied()
    }

    fn peek_second(&self) -> Option<Token<'a>> {
        self.tokens.get(self.index + 1).copied()
    }

    fn expect_number(&mut self) -> Result<&'a str, Error> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(other)            => Err(unexpected(other)),
            None                   => Err(Error::MissingDate),
        }
    }

    fn read_all(&mut self) -> Result<(), Error> {
        while let Some(token) = self.next() {
            match token {
                Token::Word(word)   => self.read_word(word)?,
                Token::Number(n)    => self.read_number(n)?,
                Token::Punct(sign @ '+') | Token::Punct(sign @ '-') if self.found.time.is_some() => {
                    self.read_offset(sign)?;
                },
                other               => return Err(unexpected(other)),
            }
        }
        Ok(())
    }

    fn read_word(&mut self, word: &'a str) -> Result<(), Error> {
        let lower = word.to_lowercase();

        if let Some(month) = english_month(&lower) {
            if self.found.month.is_some() {
                return Err(Error::Unexpected(word.to_owned()));
            }
            self.found.month = Some(month);
            return Ok(());
        }

        if is_english_weekday(&lower) {
            return Ok(());
        }

        match lower.as_str() {
            "am" | "a"            => self.found.pm = Some(false),
            "pm" | "p"            => self.found.pm = Some(true),
            "at" | "t" | "of"     => {},
            "z" | "utc" | "ut" | "gmt" => {
                self.found.offset = Some(Offset::utc());
                if let Some(Token::Punct(sign @ '+')) | Some(Token::Punct(sign @ '-')) = self.peek() {
                    let _ = self.next();
                    self.read_offset(sign)?;
                }
            },
            _ => return Err(Error::Unexpected(word.to_owned())),
        }
        Ok(())
    }

    fn read_number(&mut self, first: &'a str) -> Result<(), Error> {
        match (self.peek(), self.peek_second()) {
            (Some(Token::Punct(':')), Some(Token::Number(_))) => self.read_time(first),
            (Some(Token::Punct(sep)), Some(Token::Number(_))) if sep == '/' || sep == '-' || sep == '.' => self.read_numeric_date(first, sep),
            _ => {
                self.found.loose.push(parse_number(first)?);
                Ok(())
            },
        }
    }

    fn read_time(&mut self, hour: &'a str) -> Result<(), Error> {
        if self.found.time.is_some() {
            return Err(Error::Unexpected(hour.to_owned()));
        }

        let _ = self.next();
        let minute = self.expect_number()?;
        let mut second = "0";
        let mut millisecond = 0;

        if let (Some(Token::Punct(':')), Some(Token::Number(_))) = (self.peek(), self.peek_second()) {
            let _ = self.next();
            second = self.expect_number()?;

            if let (Some(Token::Punct('.')), Some(Token::Number(_))) = (self.peek(), self.peek_second()) {
                let _ = self.next();
                let fraction = self.expect_number()?;
                millisecond = fraction_to_millis(fraction)?;
            }
        }

        self.found.time = Some((parse_number(hour)?, parse_number(minute)?, parse_number(second)?, millisecond));
        Ok(())
    }

    fn read_numeric_date(&mut self, first: &'a str, sep: char) -> Result<(), Error> {
        if self.found.month.is_some() || self.found.year.is_some() {
            return Err(Error::Unexpected(first.to_owned()));
        }

        let _ = self.next();
        let second = self.expect_number()?;
        let third = match (self.peek(), self.peek_second()) {
            (Some(Token::Punct(s)), Some(Token::Number(_))) if s == sep => {
                let _ = self.next();
                self.expect_number()?
            },
            _ => return Err(Error::MissingDate),
        };

        let (year, month, day) = if first.len() >= 4 {
            (parse_number(first)?, parse_number(second)?, parse_number(third)?)
        }
        else {
            (full_year(third)?, parse_number(first)?, parse_number(second)?)
        };

        self.found.year = Some(year);
        self.found.month = Some(Month::from_one(narrow(month, "month")?)?);
        self.found.day = Some(day);
        Ok(())
    }

    /// Reads the `hh`, `hhmm` or `hh:mm` after the sign of an offset.
    fn read_offset(&mut self, sign: char) -> Result<(), Error> {
        let digits = self.expect_number()?;
        let (hours, minutes) = if digits.len() > 2 {
            let split = digits.len() - 2;
            (parse_number(&digits[..split])?, parse_number(&digits[split..])?)
        }
        else if let (Some(Token::Punct(':')), Some(Token::Number(_))) = (self.peek(), self.peek_second()) {
            let _ = self.next();
            (parse_number(digits)?, parse_number(self.expect_number()?)?)
        }
        else {
            (parse_number(digits)?, 0)
        };

        let sign = if sign == '-' { -1 } else { 1 };
        let offset = Offset::of_hours_and_minutes(narrow(sign * hours, "offset hours")?, narrow(sign * minutes, "offset minutes")?)?;
        self.found.offset = Some(offset);
        Ok(())
    }
}

fn unexpected(token: Token) -> Error {
    match token {
        Token::Number(n) => Error::Unexpected(n.to_owned()),
        Token::Word(w)   => Error::Unexpected(w.to_owned()),
        Token::Punct(c)  => Error::Unexpected(c.to_string()),
    }
}

fn parse_number(digits: &str) -> Result<i64, Error> {
    digits.parse().map_err(|_| Error::Unexpected(digits.to_owned()))
}

/// Two-digit years mean 1950 to 2049.
fn full_year(digits: &str) -> Result<i64, Error> {
    let year = parse_number(digits)?;
    Ok(match (digits.len(), year) {
        (1..=2, 0..=49) => 2000 + year,
        (1..=2, _)      => 1900 + year,
        _               => year,
    })
}

fn fraction_to_millis(digits: &str) -> Result<i64, Error> {
    let mut millis = 0;
    for (i, c) in digits.chars().chain("000".chars()).take(3).enumerate() {
        let digit = c.to_digit(10).ok_or_else(|| Error::Unexpected(digits.to_owned()))?;
        millis += i64::from(digit) * [100, 10, 1][i];
    }
    Ok(millis)
}

static ENGLISH_MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

static ENGLISH_WEEKDAYS: [&str; 7] = [
    "sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
];

/// Matches full month names and abbreviations of at least three letters.
fn english_month(word: &str) -> Option<Month> {
    if word.len() < 3 {
        return None;
    }

    let index = ENGLISH_MONTHS.iter().position(|name| name.starts_with(word))?;
    Month::from_zero(index as i8).ok()
}

fn is_english_weekday(word: &str) -> bool {
    word.len() >= 3 && ENGLISH_WEEKDAYS.iter().any(|name| name.starts_with(word))
}


#[cfg(test)]
mod test {
    use super::{parse_loose, Error};
    use crate::cal::{LocalDate, LocalTime, LocalDateTime, Month};
    use crate::cal::offset::Offset;

    fn at(year: i64, month: Month, day: i8, hour: i8, minute: i8, second: i8) -> LocalDateTime {
        LocalDateTime::new(LocalDate::ymd(year, month, day).unwrap(), LocalTime::hms(hour, minute, second).unwrap())
    }

    macro_rules! test {
        ($name: ident: $input: expr => $result: expr) => {
            #[test]
            fn $name() {
                assert_eq!(parse_loose($input), $result)
            }
        };
    }

    test!(iso_date:           "2024-02-01"                   => Ok((at(2024, Month::February, 1, 0, 0, 0), None)));
    test!(iso_zulu:           "2024-02-01T10:30:00Z"         => Ok((at(2024, Month::February, 1, 10, 30, 0), Some(Offset::utc()))));
    test!(iso_with_space:     "2024-02-01 10:30"             => Ok((at(2024, Month::February, 1, 10, 30, 0), None)));
    test!(slashes_ymd:        "2024/02/01"                   => Ok((at(2024, Month::February, 1, 0, 0, 0), None)));
    test!(slashes_mdy:        "2/1/2024"                     => Ok((at(2024, Month::February, 1, 0, 0, 0), None)));
    test!(two_digit_year:     "2/1/24"                       => Ok((at(2024, Month::February, 1, 0, 0, 0), None)));
    test!(month_name_first:   "Feb 1 2024"                   => Ok((at(2024, Month::February, 1, 0, 0, 0), None)));
    test!(day_first:          "1 February 2024"              => Ok((at(2024, Month::February, 1, 0, 0, 0), None)));
    test!(with_comma:         "February 1, 2024 10:30 PM"    => Ok((at(2024, Month::February, 1, 22, 30, 0), None)));
    test!(with_weekday:       "Thu, 01 Feb 2024 09:15:30 GMT" => Ok((at(2024, Month::February, 1, 9, 15, 30), Some(Offset::utc()))));
    test!(abbreviation_dot:   "Sept. 3, 2023"                => Ok((at(2023, Month::September, 3, 0, 0, 0), None)));
    test!(noon_am:            "Feb 1 2024 12:00 am"          => Ok((at(2024, Month::February, 1, 0, 0, 0), None)));
    test!(to_string_form:     "Thu Feb 01 2024 10:30:00 GMT+0530 (India Standard Time)"
                                                             => Ok((at(2024, Month::February, 1, 10, 30, 0), Some(Offset::of_hours_and_minutes(5, 30).unwrap()))));
    test!(bare_offset:        "Feb 1 2024 10:30 -04:00"      => Ok((at(2024, Month::February, 1, 10, 30, 0), Some(Offset::of_hours_and_minutes(-4, 0).unwrap()))));

    test!(nonsense:           "not a date"                   => Err(Error::Unexpected("not".into())));
    test!(no_year:            "Feb 1"                        => Err(Error::MissingDate));
    test!(empty:              ""                             => Err(Error::MissingDate));

    #[test]
    fn year_beyond_the_calendar() {
        let year = 100_000_000_000_000_000;
        assert_eq!(parse_loose("100000000000000000/1/1"),
                   Err(Error::Field(crate::cal::Error::OutOfRange { field: "year", value: year })));
    }

    #[test]
    fn impossible_day() {
        assert!(matches!(parse_loose("Feb 30 2024"), Err(Error::Field(_))));
    }

    #[test]
    fn milliseconds() {
        let (when, _) = parse_loose("Feb 1 2024 10:30:15.25").unwrap();
        assert_eq!(when.time(), LocalTime::hms_ms(10, 30, 15, 250).unwrap());
    }
}
