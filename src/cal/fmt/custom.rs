//! Datetime-to-string routines, driven by token patterns such as
//! `MMMM d, yyyy`.
//!
//! Runs of the same ASCII letter form a token, and everything else is
//! copied through as it is. Text in single quotes is always literal, and
//! two single quotes in a row stand for one.

use std::fmt::Display;
use std::str::CharIndices;

use num_traits::Signed;
use pad::{PadStr, Alignment};

use crate::cal::{DatePiece, TimePiece};
use crate::locale::{Locale, Style, DateOrder};


#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Field {
    Literal(String),

    Year(NumArguments),
    YearOfCentury(NumArguments),

    Month(NumArguments),
    MonthName(Style),
    StandaloneMonthName(Style),

    Day(NumArguments),
    DayOfYear(NumArguments),
    Weekday,
    WeekdayName(Style),

    Hour(NumArguments),
    HourOfHalfDay(NumArguments),
    Minute(NumArguments),
    Second(NumArguments),
    Millisecond(NumArguments),
    Meridiem,

    Localized(Localized),
}

impl Field {
    fn format<T>(&self, when: &T, w: &mut String, locale: &Locale) where T: DatePiece+TimePiece {
        match self {
            Field::Literal(s)           => w.push_str(s),
            Field::Year(a)              => a.format(w, when.year()),
            Field::YearOfCentury(a)     => a.format(w, when.year_of_century()),
            Field::Month(a)             => a.format(w, when.month() as i8),
            Field::MonthName(style)     => w.push_str(&locale.month_name(when.month(), *style)),
            Field::StandaloneMonthName(style) => w.push_str(&locale.standalone_month_name(when.month(), *style)),
            Field::Day(a)               => a.format(w, when.day()),
            Field::DayOfYear(a)         => a.format(w, when.yearday()),
            Field::Weekday              => NumArguments::empty().format(w, when.weekday().days_from_monday() + 1),
            Field::WeekdayName(style)   => w.push_str(&locale.weekday_name(when.weekday(), *style)),
            Field::Hour(a)              => a.format(w, when.hour()),
            Field::HourOfHalfDay(a)     => a.format(w, when.hour_of_half_day()),
            Field::Minute(a)            => a.format(w, when.minute()),
            Field::Second(a)            => a.format(w, when.second()),
            Field::Millisecond(a)       => a.format(w, when.millisecond()),
            Field::Meridiem             => w.push_str(locale.meridiem(when.is_pm())),
            Field::Localized(l)         => {
                for field in l.expand(locale) {
                    field.format(when, w, locale);
                }
            },
        }
    }
}


/// How much detail a localized date carries.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DateLength {

    /// All numbers, such as `2/1/2024`.
    Numeric,

    /// An abbreviated month name, such as `Feb 1, 2024`.
    Short,

    /// The full month name, such as `February 1, 2024`.
    Long,

    /// The full month name and the weekday.
    Full,
}

/// A date or time written the way the locale usually writes it.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Localized {
    Date(DateLength),
    Time { with_seconds: bool, locale_clock: bool },
    DateTime(DateLength),
}

impl Localized {

    /// Turns this into plain fields, in the order and style the given
    /// locale prefers.
    pub fn expand(self, locale: &Locale) -> Vec<Field> {
        match self {
            Localized::Date(length) => date_fields(length, locale),
            Localized::Time { with_seconds, locale_clock } => {
                let twelve_hour = locale_clock && locale.uses_twelve_hour_clock();
                time_fields(with_seconds, twelve_hour)
            },
            Localized::DateTime(length) => {
                let mut fields = date_fields(length, locale);
                fields.push(Field::Literal(", ".into()));
                fields.extend(Localized::Time { with_seconds: false, locale_clock: true }.expand(locale));
                fields
            },
        }
    }
}

fn date_fields(length: DateLength, locale: &Locale) -> Vec<Field> {
    use self::Field::*;

    let order = locale.date_order();
    if length == DateLength::Numeric {
        let sep = Literal(locale.date_separator().to_string());
        let (month, day) = if order == DateOrder::MonthDayYear {
            (Month(NumArguments::empty()), Day(NumArguments::empty()))
        }
        else {
            (Month(NumArguments::zero_padded(2)), Day(NumArguments::zero_padded(2)))
        };
        let year = Year(NumArguments::zero_padded(4));

        return match order {
            DateOrder::MonthDayYear => vec![ month, sep.clone(), day, sep, year ],
            DateOrder::DayMonthYear => vec![ day, sep.clone(), month, sep, year ],
            DateOrder::YearMonthDay => vec![ year, sep.clone(), month, sep, day ],
        };
    }

    let month = MonthName(if length == DateLength::Short { Style::Short } else { Style::Long });
    let day = Day(NumArguments::empty());
    let year = Year(NumArguments::zero_padded(4));

    let mut fields = Vec::new();
    if length == DateLength::Full {
        fields.push(WeekdayName(Style::Long));
        fields.push(Literal(", ".into()));
    }

    match order {
        DateOrder::MonthDayYear => fields.extend(vec![ month, Literal(" ".into()), day, Literal(", ".into()), year ]),
        DateOrder::DayMonthYear => fields.extend(vec![ day, Literal(" ".into()), month, Literal(" ".into()), year ]),
        DateOrder::YearMonthDay => fields.extend(vec![ year, Literal(" ".into()), month, Literal(" ".into()), day ]),
    }
    fields
}

fn time_fields(with_seconds: bool, twelve_hour: bool) -> Vec<Field> {
    use self::Field::*;

    let mut fields = if twelve_hour {
        vec![ HourOfHalfDay(NumArguments::empty()) ]
    }
    else {
        vec![ Hour(NumArguments::zero_padded(2)) ]
    };

    fields.push(Literal(":".into()));
    fields.push(Minute(NumArguments::zero_padded(2)));

    if with_seconds {
        fields.push(Literal(":".into()));
        fields.push(Second(NumArguments::zero_padded(2)));
    }

    if twelve_hour {
        fields.push(Literal(" ".into()));
        fields.push(Meridiem);
    }
    fields
}


#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct DateFormat {
    pub fields: Vec<Field>,
}


#[derive(PartialEq, Eq, Clone, Debug, thiserror::Error)]
pub enum FormatError {
    #[error("unknown token `{token}` at position {pos}")]
    UnknownToken { token: String, pos: Pos },

    #[error("unterminated quote opened at position {open_pos}")]
    UnterminatedQuote { open_pos: Pos },
}

pub type Width = usize;
pub type Pos = usize;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Arguments {
    pub alignment: Option<Alignment>,
    pub width:     Option<Width>,
    pub pad_char:  Option<char>,
}

impl Arguments {
    pub fn empty() -> Self {
        Self {
            alignment: None,
            width:     None,
            pad_char:  None,
        }
    }

    pub fn set_width(&mut self, width: Width) -> Self {
        self.width = Some(width);
        *self
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        *self
    }

    pub fn set_pad_char(&mut self, pad_char: char) -> Self {
        self.pad_char = Some(pad_char);
        *self
    }

    fn format(self, w: &mut String, string: &str) {
        let width     = self.width.unwrap_or(0);
        let pad_char  = self.pad_char.unwrap_or(' ');
        let alignment = self.alignment.unwrap_or(Alignment::Left);

        w.push_str(&string.pad(width, pad_char, alignment, false));
    }

    pub fn is_empty(&self) -> bool {
        self.alignment.is_none() && self.width.is_none() && self.pad_char.is_none()
    }
}


#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct NumArguments(Arguments);

impl NumArguments {
    pub fn empty() -> Self {
        Self(Arguments::empty())
    }

    /// Right-aligned and padded with zeroes to at least `width` digits.
    pub fn zero_padded(width: Width) -> Self {
        Self(Arguments::empty().set_width(width).set_alignment(Alignment::Right).set_pad_char('0'))
    }

    /// The minimum number of digits, if any.
    pub fn width(&self) -> Option<Width> {
        self.0.width
    }

    // The sign goes in front of the padding, so year -44 at width 4 is
    // written `-0044`.
    fn format<N: Display + Signed>(self, w: &mut String, number: N) {
        if number.is_negative() {
            w.push('-');
        }
        self.0.format(w, &number.abs().to_string())
    }
}

impl DateFormat {

    /// Writes out the given date and time using this format.
    ///
    /// ### Examples
    ///
    /// ```
    /// use datetime_utils::cal::{LocalDate, LocalTime, LocalDateTime, Month};
    /// use datetime_utils::cal::fmt::DateFormat;
    /// use datetime_utils::locale::Locale;
    ///
    /// let when = LocalDateTime::new(
    ///     LocalDate::ymd(2024, Month::February, 1).unwrap(),
    ///     LocalTime::hm(14, 5).unwrap());
    ///
    /// let format = DateFormat::parse("ccc, MMM d 'at' h:mm a").unwrap();
    /// assert_eq!(format.format(&when, &Locale::english()), "Thu, Feb 1 at 2:05 PM");
    /// ```
    pub fn format<T>(&self, when: &T, locale: &Locale) -> String where T: DatePiece+TimePiece {
        let mut buf = String::new();

        for field in &self.fields {
            field.format(when, &mut buf, locale);
        }

        buf
    }

    /// Returns the fields of this format with every localized macro
    /// replaced by the plain fields it stands for in the given locale.
    pub fn expanded(&self, locale: &Locale) -> Vec<Field> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            match field {
                Field::Localized(l) => fields.extend(l.expand(locale)),
                other               => fields.push(other.clone()),
            }
        }
        fields
    }

    pub fn parse(input: &str) -> Result<Self, FormatError> {
        let mut parser = FormatParser::new(input);
        parser.parse_format_string()?;

        Ok(Self { fields: parser.fields })
    }
}


struct FormatParser<'a> {
    iter:    CharIndices<'a>,
    fields:  Vec<Field>,
    literal: String,
    peekee:  Option<Option<(Pos, char)>>,
}

impl<'a> FormatParser<'a> {
    fn new(input: &'a str) -> FormatParser<'a> {
        FormatParser {
            iter:    input.char_indices(),
            fields:  Vec::new(),
            literal: String::new(),
            peekee:  None,
        }
    }

    fn next(&mut self) -> Option<(Pos, char)> {
        match self.peekee {
            Some(p) => {
                self.peekee = None;
                p
            },
            None => { self.iter.next() },
        }
    }

    fn peek(&mut self) -> Option<(Pos, char)> {
        match self.peekee {
            Some(thing) => thing,
            None => {
                self.peekee = Some(self.iter.next());
                self.peek()
            }
        }
    }

    /// Turns any literal text collected so far into a field. Neighbouring
    /// quoted and unquoted text end up in the same field.
    fn collect_literal(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.fields.push(Field::Literal(text));
        }
    }

    fn parse_format_string(&mut self) -> Result<(), FormatError> {
        loop {
            match self.next() {
                Some((pos, '\'')) => self.parse_quoted(pos)?,
                Some((pos, c)) if c.is_ascii_alphabetic() => {
                    self.collect_literal();

                    let field = self.parse_token(pos, c)?;
                    self.fields.push(field);
                },
                Some((_, c)) => self.literal.push(c),
                None => break,
            }
        }

        // Finally, collect any literal characters after the last date field
        // that haven't been turned into a Literal field yet.
        self.collect_literal();
        Ok(())
    }

    fn parse_quoted(&mut self, open_pos: Pos) -> Result<(), FormatError> {
        if let Some((_, '\'')) = self.peek() {
            let _ = self.next();
            self.literal.push('\'');
            return Ok(());
        }

        loop {
            match self.next() {
                Some((_, '\'')) => {
                    if let Some((_, '\'')) = self.peek() {
                        let _ = self.next();
                        self.literal.push('\'');
                    }
                    else {
                        return Ok(());
                    }
                },
                Some((_, c)) => self.literal.push(c),
                None => return Err(FormatError::UnterminatedQuote { open_pos }),
            }
        }
    }

    fn parse_token(&mut self, pos: Pos, letter: char) -> Result<Field, FormatError> {
        let mut count = 1;
        while let Some((_, c)) = self.peek() {
            if c == letter {
                count += 1;
                let _ = self.next();
            }
            else {
                break;
            }
        }

        use self::Field::*;
        let field = match (letter, count) {
            ('d', 1)             => Day(NumArguments::empty()),
            ('d', 2)             => Day(NumArguments::zero_padded(2)),
            ('o', 1)             => DayOfYear(NumArguments::empty()),
            ('o', 3)             => DayOfYear(NumArguments::zero_padded(3)),
            ('c', 1) | ('E', 1)  => Weekday,
            ('c', 3) | ('E', 3)  => WeekdayName(Style::Short),
            ('c', 4) | ('E', 4)  => WeekdayName(Style::Long),
            ('c', 5) | ('E', 5)  => WeekdayName(Style::Narrow),
            ('L', 1) | ('M', 1)  => Month(NumArguments::empty()),
            ('L', 2) | ('M', 2)  => Month(NumArguments::zero_padded(2)),
            ('M', 3)             => MonthName(Style::Short),
            ('M', 4)             => MonthName(Style::Long),
            ('M', 5)             => MonthName(Style::Narrow),
            ('L', 3)             => StandaloneMonthName(Style::Short),
            ('L', 4)             => StandaloneMonthName(Style::Long),
            ('L', 5)             => StandaloneMonthName(Style::Narrow),
            ('y', 1)             => Year(NumArguments::empty()),
            ('y', 2)             => YearOfCentury(NumArguments::zero_padded(2)),
            ('y', 4)             => Year(NumArguments::zero_padded(4)),
            ('H', 1)             => Hour(NumArguments::empty()),
            ('H', 2)             => Hour(NumArguments::zero_padded(2)),
            ('h', 1)             => HourOfHalfDay(NumArguments::empty()),
            ('h', 2)             => HourOfHalfDay(NumArguments::zero_padded(2)),
            ('m', 1)             => Minute(NumArguments::empty()),
            ('m', 2)             => Minute(NumArguments::zero_padded(2)),
            ('s', 1)             => Second(NumArguments::empty()),
            ('s', 2)             => Second(NumArguments::zero_padded(2)),
            ('S', 1)             => Millisecond(NumArguments::empty()),
            ('S', 3)             => Millisecond(NumArguments::zero_padded(3)),
            ('a', 1)             => Meridiem,
            ('D', 1)             => Localized(self::Localized::Date(DateLength::Numeric)),
            ('D', 2)             => Localized(self::Localized::Date(DateLength::Short)),
            ('D', 3)             => Localized(self::Localized::Date(DateLength::Long)),
            ('D', 4)             => Localized(self::Localized::Date(DateLength::Full)),
            ('t', 1)             => Localized(self::Localized::Time { with_seconds: false, locale_clock: true }),
            ('t', 2)             => Localized(self::Localized::Time { with_seconds: true,  locale_clock: true }),
            ('T', 1)             => Localized(self::Localized::Time { with_seconds: false, locale_clock: false }),
            ('T', 2)             => Localized(self::Localized::Time { with_seconds: true,  locale_clock: false }),
            ('f', 1)             => Localized(self::Localized::DateTime(DateLength::Numeric)),
            ('f', 2)             => Localized(self::Localized::DateTime(DateLength::Short)),
            ('f', 3)             => Localized(self::Localized::DateTime(DateLength::Long)),
            _ => {
                let token = std::iter::repeat(letter).take(count).collect();
                return Err(FormatError::UnknownToken { token, pos });
            },
        };

        Ok(field)
    }
}
