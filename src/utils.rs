//! The date adapter: the set of date operations calendar and date-picker
//! components are written against, and an implementation of it over
//! `Moment` values.

use std::cmp::Ordering;
use std::time::SystemTime;

use log::{debug, trace};

use crate::cal::{DatePiece, TimePiece, LocalTime, LocalDateTime, Month, Weekday, Error as CalError};
use crate::cal::fmt::{strict, DateFormat, FormatError};
use crate::cal::iter::weeks;
use crate::cal::loose::parse_loose;
use crate::cal::offset::Offset;
use crate::cal::unit::Unit;
use crate::instant::Instant;
use crate::locale::{Locale, Style};
use crate::moment::{Moment, Invalid};


/// Something that can be turned into a date value.
#[derive(PartialEq, Debug, Clone)]
pub enum Input<'a, D> {

    /// No value at all. Coerces to `None`.
    Null,

    /// No particular value. Coerces to the current moment.
    Now,

    /// An exact point in time.
    Instant(Instant),

    /// Text, read with the loose parser.
    Text(&'a str),

    /// A value that’s already been wrapped, passed through unchanged.
    Date(D),
}

impl<'a, D> From<&'a str> for Input<'a, D> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a, D> From<Instant> for Input<'a, D> {
    fn from(instant: Instant) -> Self {
        Input::Instant(instant)
    }
}

impl<'a, D> From<SystemTime> for Input<'a, D> {
    fn from(time: SystemTime) -> Self {
        Input::Instant(Instant::from(time))
    }
}

impl<'a> From<Moment> for Input<'a, Moment> {
    fn from(moment: Moment) -> Self {
        Input::Date(moment)
    }
}

impl<'a> From<Option<Moment>> for Input<'a, Moment> {
    fn from(moment: Option<Moment>) -> Self {
        match moment {
            Some(moment) => Input::Date(moment),
            None         => Input::Null,
        }
    }
}


/// The value another one gets measured against in `get_diff`.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum DiffOperand<'a, D> {
    Date(&'a D),
    Text(&'a str),
}

impl<'a, D> From<&'a str> for DiffOperand<'a, D> {
    fn from(text: &'a str) -> Self {
        DiffOperand::Text(text)
    }
}

impl<'a> From<&'a Moment> for DiffOperand<'a, Moment> {
    fn from(moment: &'a Moment) -> Self {
        DiffOperand::Date(moment)
    }
}


/// One half of a twelve-hour day.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {

    /// The lowercase designator, `am` or `pm`.
    pub fn designator(self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }

    fn is_pm(self) -> bool {
        self == Meridiem::Pm
    }
}


/// The default patterns components format their values with.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Formats {
    pub year:          String,
    pub year_month:    String,
    pub date_time_12h: String,
    pub date_time_24h: String,
    pub time_12h:      String,
    pub time_24h:      String,
    pub date:          String,
}

impl Formats {
    fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("year",          &self.year),
            ("year_month",    &self.year_month),
            ("date_time_12h", &self.date_time_12h),
            ("date_time_24h", &self.date_time_24h),
            ("time_12h",      &self.time_12h),
            ("time_24h",      &self.time_24h),
            ("date",          &self.date),
        ]
    }

    /// Checks that every pattern can be read.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &(field, pattern) in self.fields().iter() {
            let _ = DateFormat::parse(pattern)
                .map_err(|source| ConfigError::Format { field, source })?;
        }

        Ok(())
    }
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            year:          "yyyy".into(),
            year_month:    "MMMM yyyy".into(),
            date_time_12h: "ff".into(),
            date_time_24h: "LLLL dd T".into(),
            time_12h:      "hh:mm a".into(),
            time_24h:      "T".into(),
            date:          "LLLL dd".into(),
        }
    }
}


/// Everything a `LocalUtils` adapter is built from.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Config {

    /// The locale tag, such as `en-US` or `fr`. Defaults to English.
    pub locale: Option<String>,

    /// The offset from UTC that values are read at.
    pub offset: Offset,

    pub formats: Formats,
}


#[derive(PartialEq, Eq, Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {field} format: {source}")]
    Format { field: &'static str, source: FormatError },
}


/// The operations a calendar or date-picker component needs from a date
/// library, over whichever value type that library uses.
///
/// Months are numbered from zero, as components count them. Every method
/// that derives a value returns a new one, and every calculation on an
/// invalid value gives back an invalid value.
pub trait DateUtils {

    /// The date value this adapter works with.
    type Date: Clone;

    /// Coerces something into a date value. Null coerces to `None`, and
    /// text that can’t be read gives an invalid value rather than an error.
    fn date(&self, value: Input<'_, Self::Date>) -> Option<Self::Date>;

    /// Reads `value` according to `format`. Empty input gives `None`, and
    /// input that doesn’t match gives an invalid value.
    fn parse(&self, value: &str, format: &str) -> Option<Self::Date>;

    fn add_days(&self, date: &Self::Date, count: i64) -> Self::Date;

    /// Whether the input coerces to a valid value.
    fn is_valid(&self, value: Input<'_, Self::Date>) -> bool;

    /// Whether two inputs coerce to the same instant. Two nulls are equal.
    fn is_equal(&self, value: Input<'_, Self::Date>, comparing: Input<'_, Self::Date>) -> bool;

    /// Whether two values fall on the same calendar day, as read at the
    /// first one’s offset.
    fn is_same_day(&self, value: &Self::Date, comparing: &Self::Date) -> bool;

    fn is_after(&self, value: &Self::Date, comparing: &Self::Date) -> bool;
    fn is_before(&self, value: &Self::Date, comparing: &Self::Date) -> bool;

    /// Whether `value` falls after the day `comparing` is in.
    fn is_after_day(&self, value: &Self::Date, comparing: &Self::Date) -> bool;

    /// Whether `value` falls before the day `comparing` is in.
    fn is_before_day(&self, value: &Self::Date, comparing: &Self::Date) -> bool;

    fn is_after_year(&self, value: &Self::Date, comparing: &Self::Date) -> bool;
    fn is_before_year(&self, value: &Self::Date, comparing: &Self::Date) -> bool;

    /// The number of milliseconds from `comparing` to `value`, or `None` if
    /// either is invalid.
    fn get_diff(&self, value: &Self::Date, comparing: DiffOperand<'_, Self::Date>) -> Option<i64>;

    fn start_of_day(&self, date: &Self::Date) -> Self::Date;
    fn end_of_day(&self, date: &Self::Date) -> Self::Date;
    fn start_of_month(&self, date: &Self::Date) -> Self::Date;
    fn end_of_month(&self, date: &Self::Date) -> Self::Date;

    /// Writes a value out using a token pattern.
    fn format(&self, date: &Self::Date, format: &str) -> Result<String, FormatError>;

    /// Writes a number out for display. Numbers are shown as given.
    fn format_number(&self, number: &str) -> String;

    fn get_hours(&self, date: &Self::Date) -> Option<u32>;
    fn set_hours(&self, date: &Self::Date, hours: u32) -> Self::Date;
    fn get_minutes(&self, date: &Self::Date) -> Option<u32>;
    fn set_minutes(&self, date: &Self::Date, minutes: u32) -> Self::Date;
    fn get_seconds(&self, date: &Self::Date) -> Option<u32>;
    fn set_seconds(&self, date: &Self::Date, seconds: u32) -> Self::Date;

    /// The month, counting January as zero.
    fn get_month(&self, date: &Self::Date) -> Option<u32>;

    /// Moves to another month, counting January as zero, keeping the day
    /// of the month where it exists.
    fn set_month(&self, date: &Self::Date, month: u32) -> Self::Date;

    fn get_year(&self, date: &Self::Date) -> Option<i64>;
    fn set_year(&self, date: &Self::Date, year: i64) -> Self::Date;

    /// Takes the date from `date` and the hour and minute from `time`.
    fn merge_date_and_time(&self, date: &Self::Date, time: &Self::Date) -> Self::Date;

    fn get_next_month(&self, date: &Self::Date) -> Self::Date;
    fn get_previous_month(&self, date: &Self::Date) -> Self::Date;

    /// The first moment of each month in the year `date` is in.
    fn get_month_array(&self, date: &Self::Date) -> Vec<Self::Date>;

    /// Single-letter weekday names, in the order the locale’s weeks run.
    fn get_weekdays(&self) -> Vec<String>;

    /// Every day of the weeks that overlap the month `date` is in, in rows
    /// of seven.
    fn get_week_array(&self, date: &Self::Date) -> Vec<Vec<Self::Date>>;

    /// The first moment of every year from the one `start` is in to the
    /// one `end` is in.
    fn get_year_range(&self, start: Input<'_, Self::Date>, end: Input<'_, Self::Date>) -> Vec<Self::Date>;

    fn get_meridiem_text(&self, ampm: Meridiem) -> String;

    fn get_calendar_header_text(&self, date: &Self::Date) -> String;
    fn get_date_picker_header_text(&self, date: &Self::Date) -> String;
    fn get_date_time_picker_header_text(&self, date: &Self::Date) -> String;
    fn get_month_text(&self, date: &Self::Date) -> String;
    fn get_day_text(&self, date: &Self::Date) -> String;
    fn get_hour_text(&self, date: &Self::Date, ampm: bool) -> String;
    fn get_minute_text(&self, date: &Self::Date) -> String;
    fn get_second_text(&self, date: &Self::Date) -> String;
    fn get_year_text(&self, date: &Self::Date) -> String;

    fn is_null(&self, date: Option<&Self::Date>) -> bool;

    /// The default patterns for this adapter.
    fn formats(&self) -> &Formats;

    /// The locale tag this adapter was built with.
    fn locale(&self) -> &str;
}


/// A date adapter over `Moment` values, read at a fixed offset from UTC
/// and written out in one locale.
#[derive(Debug, Clone)]
pub struct LocalUtils {
    locale_tag: String,
    locale:     Locale,
    offset:     Offset,
    formats:    Formats,
}

impl LocalUtils {

    /// Creates an adapter for the given locale tag, at UTC, with the
    /// default formats. An omitted or empty tag means English.
    pub fn new(locale: Option<&str>) -> Self {
        Self::from_parts(locale, Offset::utc(), Formats::default())
    }

    /// Creates an adapter from a full configuration, checking its
    /// patterns first.
    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.formats.validate()?;
        Ok(Self::from_parts(config.locale.as_deref(), config.offset, config.formats))
    }

    fn from_parts(locale: Option<&str>, offset: Offset, formats: Formats) -> Self {
        let tag = match locale {
            Some(tag) if !tag.trim().is_empty() => tag,
            _                                   => "en",
        };

        Self { locale_tag: tag.to_owned(), locale: Locale::resolve(tag), offset, formats }
    }

    /// The locale tables this adapter’s tag resolved to.
    pub fn resolved_locale(&self) -> Locale {
        self.locale
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    fn wrap(&self, reading: LocalDateTime) -> Moment {
        Moment::new(reading, self.offset, self.locale)
    }

    fn invalid(&self, reason: Invalid) -> Moment {
        Moment::invalid(reason, self.offset, self.locale)
    }

    /// Reads text with the loose parser. A reading with its own zone gets
    /// moved to this adapter’s offset.
    fn loose(&self, text: &str) -> Moment {
        match parse_loose(text) {
            Ok((reading, None))       => self.wrap(reading),
            Ok((reading, Some(zone))) => self.wrap(self.offset.convert(reading, zone)),
            Err(e) => {
                debug!("Could not read {:?} as a date: {}", text, e);
                self.invalid(Invalid::Unparsable(e.to_string()))
            }
        }
    }

    fn start_of(&self, date: &Moment, unit: Unit) -> Moment {
        let week_start = date.locale().first_weekday();
        date.and_then(|reading| unit.start_of(reading, week_start))
    }

    fn end_of(&self, date: &Moment, unit: Unit) -> Moment {
        let week_start = date.locale().first_weekday();
        date.and_then(|reading| unit.end_of(reading, week_start))
    }

    /// Formats with a pattern known to parse.
    fn text(&self, date: &Moment, pattern: &str) -> String {
        self.format(date, pattern).unwrap_or_default()
    }
}

/// Replaces one field of the time of day, making the value invalid if the
/// field can’t hold the new value.
fn set_time_field(date: &Moment, field: &'static str, value: u32, set: fn(LocalTime, i8) -> Result<LocalTime, CalError>) -> Moment {
    date.and_then(|reading| {
        let value = i8::try_from(value).map_err(|_| CalError::OutOfRange { field, value: i64::from(value) })?;
        set(reading.time(), value).map(|time| reading.with_time(time))
    })
}

/// The first and last moments of the weeks that overlap the month `reading`
/// is in.
fn month_grid_bounds(reading: LocalDateTime, week_start: Weekday) -> Result<(LocalDateTime, LocalDateTime), CalError> {
    let start = Unit::Week.start_of(Unit::Month.start_of(reading, week_start)?, week_start)?;
    let end   = Unit::Week.end_of(Unit::Month.end_of(reading, week_start)?, week_start)?;
    Ok((start, end))
}

fn is_ordered(value: &Moment, comparing: &Moment, ordering: Ordering) -> bool {
    value.compare(comparing) == Some(ordering)
}

impl DateUtils for LocalUtils {
    type Date = Moment;

    fn date(&self, value: Input<'_, Moment>) -> Option<Moment> {
        match value {
            Input::Null             => None,
            Input::Now              => Some(Moment::now(self.offset, self.locale)),
            Input::Instant(instant) => Some(Moment::from_instant(instant, self.offset, self.locale)),
            Input::Text(text)       => Some(self.loose(text)),
            Input::Date(date)       => Some(date),
        }
    }

    fn parse(&self, value: &str, format: &str) -> Option<Moment> {
        if value.is_empty() {
            return None;
        }

        let format = match DateFormat::parse(format) {
            Ok(format) => format,
            Err(e) => {
                debug!("Pattern {:?} is malformed: {}", format, e);
                return Some(self.invalid(Invalid::Pattern(e)));
            }
        };

        let now = self.offset.local_at(Instant::now());
        match strict::parse(value, &format, &self.locale, now) {
            Ok(reading) => Some(self.wrap(reading)),
            Err(e) => {
                debug!("Could not read {:?} with the pattern: {}", value, e);
                Some(self.invalid(Invalid::Unparsable(e.to_string())))
            }
        }
    }

    fn add_days(&self, date: &Moment, count: i64) -> Moment {
        date.and_then(|reading| reading.add_days(count))
    }

    fn is_valid(&self, value: Input<'_, Moment>) -> bool {
        self.date(value).map_or(false, |date| date.is_valid())
    }

    fn is_equal(&self, value: Input<'_, Moment>, comparing: Input<'_, Moment>) -> bool {
        match (self.date(value), self.date(comparing)) {
            (None, None)       => true,
            (Some(a), Some(b)) => is_ordered(&a, &b, Ordering::Equal),
            _                  => false,
        }
    }

    fn is_same_day(&self, value: &Moment, comparing: &Moment) -> bool {
        let comparing = comparing.at_offset(value.offset());
        match (value.reading(), comparing.reading()) {
            (Some(a), Some(b)) => a.date() == b.date(),
            _                  => false,
        }
    }

    fn is_after(&self, value: &Moment, comparing: &Moment) -> bool {
        is_ordered(value, comparing, Ordering::Greater)
    }

    fn is_before(&self, value: &Moment, comparing: &Moment) -> bool {
        is_ordered(value, comparing, Ordering::Less)
    }

    fn is_after_day(&self, value: &Moment, comparing: &Moment) -> bool {
        is_ordered(value, &self.end_of(comparing, Unit::Day), Ordering::Greater)
    }

    fn is_before_day(&self, value: &Moment, comparing: &Moment) -> bool {
        is_ordered(value, &self.start_of(comparing, Unit::Day), Ordering::Less)
    }

    fn is_after_year(&self, value: &Moment, comparing: &Moment) -> bool {
        is_ordered(value, &self.end_of(comparing, Unit::Year), Ordering::Greater)
    }

    fn is_before_year(&self, value: &Moment, comparing: &Moment) -> bool {
        is_ordered(value, &self.start_of(comparing, Unit::Year), Ordering::Less)
    }

    fn get_diff(&self, value: &Moment, comparing: DiffOperand<'_, Moment>) -> Option<i64> {
        let comparing = match comparing {
            DiffOperand::Date(date) => date.millis_since_epoch()?,
            DiffOperand::Text(text) => self.loose(text).millis_since_epoch()?,
        };

        Some(value.millis_since_epoch()? - comparing)
    }

    fn start_of_day(&self, date: &Moment) -> Moment {
        self.start_of(date, Unit::Day)
    }

    fn end_of_day(&self, date: &Moment) -> Moment {
        self.end_of(date, Unit::Day)
    }

    fn start_of_month(&self, date: &Moment) -> Moment {
        self.start_of(date, Unit::Month)
    }

    fn end_of_month(&self, date: &Moment) -> Moment {
        self.end_of(date, Unit::Month)
    }

    fn format(&self, date: &Moment, format: &str) -> Result<String, FormatError> {
        let format = DateFormat::parse(format)?;
        Ok(match date.reading() {
            Some(reading) => format.format(&reading, &self.locale),
            None          => "Invalid DateTime".to_owned(),
        })
    }

    fn format_number(&self, number: &str) -> String {
        number.to_owned()
    }

    fn get_hours(&self, date: &Moment) -> Option<u32> {
        date.reading().map(|r| r.hour() as u32)
    }

    fn set_hours(&self, date: &Moment, hours: u32) -> Moment {
        set_time_field(date, "hour", hours, LocalTime::with_hour)
    }

    fn get_minutes(&self, date: &Moment) -> Option<u32> {
        date.reading().map(|r| r.minute() as u32)
    }

    fn set_minutes(&self, date: &Moment, minutes: u32) -> Moment {
        set_time_field(date, "minute", minutes, LocalTime::with_minute)
    }

    fn get_seconds(&self, date: &Moment) -> Option<u32> {
        date.reading().map(|r| r.second() as u32)
    }

    fn set_seconds(&self, date: &Moment, seconds: u32) -> Moment {
        set_time_field(date, "second", seconds, LocalTime::with_second)
    }

    fn get_month(&self, date: &Moment) -> Option<u32> {
        date.reading().map(|r| r.month().months_from_january() as u32)
    }

    fn set_month(&self, date: &Moment, month: u32) -> Moment {
        date.and_then(|reading| {
            let month = i8::try_from(month)
                .map_err(|_| CalError::OutOfRange { field: "month", value: i64::from(month) })
                .and_then(Month::from_zero)?;

            Ok::<_, CalError>(reading.with_date(reading.date().with_month(month)))
        })
    }

    fn get_year(&self, date: &Moment) -> Option<i64> {
        date.reading().map(|r| r.year())
    }

    fn set_year(&self, date: &Moment, year: i64) -> Moment {
        date.and_then(|reading| reading.date().with_year(year).map(|day| reading.with_date(day)))
    }

    fn merge_date_and_time(&self, date: &Moment, time: &Moment) -> Moment {
        date.and_then(|reading| {
            let source = time.as_result()?;
            let merged = reading.time().with_hour(source.hour())?.with_minute(source.minute())?;
            Ok::<_, Invalid>(reading.with_time(merged))
        })
    }

    fn get_next_month(&self, date: &Moment) -> Moment {
        date.and_then(|reading| reading.add_months(1))
    }

    fn get_previous_month(&self, date: &Moment) -> Moment {
        date.and_then(|reading| reading.add_months(-1))
    }

    fn get_month_array(&self, date: &Moment) -> Vec<Moment> {
        let mut month = self.start_of(date, Unit::Year);
        let mut months = Vec::with_capacity(12);
        while months.len() < 12 {
            let next = self.get_next_month(&month);
            months.push(std::mem::replace(&mut month, next));
        }

        months
    }

    fn get_weekdays(&self) -> Vec<String> {
        let first = self.locale.first_weekday();
        (0 .. 7).map(|days| self.locale.weekday_name(first.shifted(days), Style::Narrow).into_owned())
                .collect()
    }

    fn get_week_array(&self, date: &Moment) -> Vec<Vec<Moment>> {
        let reading = match date.reading() {
            Some(reading) => reading,
            None          => return Vec::new(),
        };

        let (start, end) = match month_grid_bounds(reading, date.locale().first_weekday()) {
            Ok(bounds) => bounds,
            Err(e) => {
                debug!("No week grid around {:?}: {}", reading, e);
                return Vec::new();
            }
        };

        let count = (end - start).as_days().round() as usize;

        let rows: Vec<Vec<Moment>> = weeks(start.date().days(count))
            .map(|row| row.into_iter().map(|day| date.map(|r| r.with_date(day).with_time(LocalTime::midnight()))).collect())
            .collect();

        trace!("Week grid for {:?}: {} days in {} rows", reading.date().year_month(), count, rows.len());
        rows
    }

    fn get_year_range(&self, start: Input<'_, Moment>, end: Input<'_, Moment>) -> Vec<Moment> {
        let (start, end) = match (self.date(start), self.date(end)) {
            (Some(start), Some(end)) => (start, end),
            _                        => return Vec::new(),
        };

        let end = end.at_offset(start.offset());
        let (first, last) = match (self.start_of(&start, Unit::Year).reading(), end.reading()) {
            (Some(first), Some(last)) => (first, last),
            _                         => return Vec::new(),
        };

        let count = last.year() - first.year() + 1;
        trace!("Year range from {} to {}: {} years", first.year(), last.year(), count.max(0));
        (0 .. count).map(|years| start.and_then(|_| first.add_years(years))).collect()
    }

    fn get_meridiem_text(&self, ampm: Meridiem) -> String {
        let labels = self.locale.meridiem_labels();
        let designator = ampm.designator();

        match labels.iter().find(|label| label.to_lowercase() == designator) {
            Some(label) => (*label).to_owned(),
            None        => self.locale.meridiem(ampm.is_pm()).to_owned(),
        }
    }

    fn get_calendar_header_text(&self, date: &Moment) -> String {
        self.text(date, &self.formats.year_month)
    }

    fn get_date_picker_header_text(&self, date: &Moment) -> String {
        self.text(date, "ccc, MMM d")
    }

    fn get_date_time_picker_header_text(&self, date: &Moment) -> String {
        self.text(date, "MMM d")
    }

    fn get_month_text(&self, date: &Moment) -> String {
        self.text(date, "LLLL")
    }

    fn get_day_text(&self, date: &Moment) -> String {
        self.text(date, "d")
    }

    fn get_hour_text(&self, date: &Moment, ampm: bool) -> String {
        self.text(date, if ampm { "hh" } else { "HH" })
    }

    fn get_minute_text(&self, date: &Moment) -> String {
        self.text(date, "mm")
    }

    fn get_second_text(&self, date: &Moment) -> String {
        self.text(date, "ss")
    }

    fn get_year_text(&self, date: &Moment) -> String {
        self.text(date, "yyyy")
    }

    fn is_null(&self, date: Option<&Moment>) -> bool {
        date.is_none()
    }

    fn formats(&self) -> &Formats {
        &self.formats
    }

    fn locale(&self) -> &str {
        &self.locale_tag
    }
}
