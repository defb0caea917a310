//! The value the date adapter hands out: a wall-clock reading at a fixed
//! offset, or the reason there isn’t one.

use std::cmp::Ordering;
use std::fmt;

use crate::cal::{LocalDateTime, Error as CalError, MAX_INSTANT_MILLIS};
use crate::cal::fmt::{FormatError, ISO};
use crate::cal::offset::Offset;
use crate::instant::Instant;
use crate::locale::Locale;


/// Why a moment holds no reading.
#[derive(PartialEq, Eq, Debug, Clone, thiserror::Error)]
pub enum Invalid {

    /// Text that couldn’t be read as a date.
    #[error("unparsable input: {0}")]
    Unparsable(String),

    /// A pattern that isn’t a valid format string.
    #[error("invalid format pattern: {0}")]
    Pattern(#[from] FormatError),

    /// A field set to a value it can’t hold.
    #[error(transparent)]
    OutOfRange(#[from] CalError),
}


/// An immutable point in time as read off a wall clock at a fixed offset,
/// along with the locale it should be written out in.
///
/// A moment can also be **invalid**, in which case it carries the reason
/// instead of a reading. Invalid moments are never equal to, before, or
/// after anything, and every calculation on one gives another invalid
/// moment.
#[derive(PartialEq, Eq, Clone)]
pub struct Moment {
    reading: Result<LocalDateTime, Invalid>,
    offset:  Offset,
    locale:  Locale,
}

impl Moment {

    pub fn new(reading: LocalDateTime, offset: Offset, locale: Locale) -> Self {
        Self { reading: Ok(reading), offset, locale }
    }

    pub fn invalid(reason: Invalid, offset: Offset, locale: Locale) -> Self {
        Self { reading: Err(reason), offset, locale }
    }

    /// The moment at the given instant, read at the given offset. Instants
    /// too far from the epoch to read give an invalid moment.
    pub fn from_instant(instant: Instant, offset: Offset, locale: Locale) -> Self {
        let millis = instant.millis_since_epoch();
        if millis.unsigned_abs() > MAX_INSTANT_MILLIS.unsigned_abs() {
            let reason = CalError::OutOfRange { field: "instant", value: millis };
            return Self::invalid(reason.into(), offset, locale);
        }

        Self::new(offset.local_at(instant), offset, locale)
    }

    /// The current moment, read at the given offset.
    pub fn now(offset: Offset, locale: Locale) -> Self {
        Self::from_instant(Instant::now(), offset, locale)
    }

    pub fn is_valid(&self) -> bool {
        self.reading.is_ok()
    }

    /// The reason this moment is invalid, or `None` if it isn’t.
    pub fn invalid_reason(&self) -> Option<&Invalid> {
        self.reading.as_ref().err()
    }

    /// The wall-clock reading, or the reason there isn’t one.
    pub fn as_result(&self) -> Result<LocalDateTime, Invalid> {
        self.reading.clone()
    }

    /// The wall-clock reading, if this moment is valid.
    pub fn reading(&self) -> Option<LocalDateTime> {
        self.reading.as_ref().ok().copied()
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The instant this moment stands for, if it’s valid.
    pub fn to_instant(&self) -> Option<Instant> {
        self.reading().map(|reading| self.offset.instant_of(reading))
    }

    pub fn millis_since_epoch(&self) -> Option<i64> {
        self.to_instant().map(|instant| instant.millis_since_epoch())
    }

    /// Returns a copy of this moment to be written out in another locale.
    pub fn with_locale(&self, locale: Locale) -> Self {
        Self { reading: self.reading.clone(), offset: self.offset, locale }
    }

    /// Returns the same instant, read at another offset.
    pub fn at_offset(&self, offset: Offset) -> Self {
        let reading = self.reading.clone().map(|reading| offset.convert(reading, self.offset));
        Self { reading, offset, locale: self.locale }
    }

    /// Derives a new moment from this one’s reading. Invalid moments stay
    /// invalid.
    pub fn map<F>(&self, f: F) -> Self
    where F: FnOnce(LocalDateTime) -> LocalDateTime {
        Self { reading: self.reading.clone().map(f), offset: self.offset, locale: self.locale }
    }

    /// Derives a new moment from this one’s reading with a calculation
    /// that can fail, which makes the result invalid.
    pub fn and_then<F, E>(&self, f: F) -> Self
    where F: FnOnce(LocalDateTime) -> Result<LocalDateTime, E>,
          E: Into<Invalid>,
    {
        let reading = self.reading.clone().and_then(|reading| f(reading).map_err(Into::into));
        Self { reading, offset: self.offset, locale: self.locale }
    }

    /// Orders two moments by the instants they stand for. Invalid moments
    /// can’t be ordered.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self.to_instant(), other.to_instant()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _                  => None,
        }
    }
}

impl fmt::Debug for Moment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.reading {
            Ok(reading) => write!(f, "Moment({}{}, {:?})", reading.iso(), self.offset.iso(), self.locale),
            Err(reason) => write!(f, "Moment(invalid: {})", reason),
        }
    }
}

/// Valid moments display in ISO-8601 with their offset, and invalid ones
/// as `Invalid DateTime`.
impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.reading {
            Ok(reading) => write!(f, "{}{}", reading.iso(), self.offset.iso()),
            Err(_)      => write!(f, "Invalid DateTime"),
        }
    }
}


#[cfg(test)]
mod test {
    use super::{Moment, Invalid};
    use crate::cal::{LocalDate, LocalTime, LocalDateTime, Month, TimePiece};
    use crate::cal::offset::Offset;
    use crate::instant::Instant;
    use crate::locale::Locale;
    use std::cmp::Ordering;

    fn reading() -> LocalDateTime {
        LocalDateTime::new(LocalDate::ymd(2024, Month::February, 1).unwrap(), LocalTime::hm(10, 30).unwrap())
    }

    fn moment() -> Moment {
        Moment::new(reading(), Offset::utc(), Locale::english())
    }

    fn invalid() -> Moment {
        Moment::invalid(Invalid::Unparsable("nope".into()), Offset::utc(), Locale::english())
    }

    #[test]
    fn display() {
        assert_eq!(moment().to_string(), "2024-02-01T10:30:00.000Z");
        assert_eq!(invalid().to_string(), "Invalid DateTime");
    }

    #[test]
    fn display_with_offset() {
        let offset = Offset::of_hours_and_minutes(5, 30).unwrap();
        let moment = Moment::new(reading(), offset, Locale::english());
        assert_eq!(moment.to_string(), "2024-02-01T10:30:00.000+05:30");
    }

    #[test]
    fn instant_at_offset() {
        let offset = Offset::of_hours_and_minutes(1, 0).unwrap();
        let moment = Moment::new(reading(), offset, Locale::english());
        assert_eq!(moment.to_instant(), moment.at_offset(Offset::utc()).to_instant());
        assert_eq!(moment.at_offset(Offset::utc()).reading().map(|r| r.hour()), Some(9));
    }

    #[test]
    fn from_instant() {
        let moment = Moment::from_instant(Instant::at(0), Offset::utc(), Locale::english());
        assert_eq!(moment.millis_since_epoch(), Some(0));
    }

    #[test]
    fn instant_too_far_out() {
        assert!(!Moment::from_instant(Instant::from_millis(i64::MAX), Offset::utc(), Locale::english()).is_valid());
        assert!(!Moment::from_instant(Instant::from_millis(i64::MIN), Offset::utc(), Locale::english()).is_valid());
    }

    #[test]
    fn invalid_stays_invalid() {
        let derived = invalid().and_then(|r| r.add_days(1));
        assert!(!derived.is_valid());
        assert_eq!(derived.invalid_reason(), Some(&Invalid::Unparsable("nope".into())));
    }

    #[test]
    fn failing_calculation() {
        let derived = moment().and_then(|r| r.time().with_hour(25).map(|t| r.with_time(t)));
        assert!(!derived.is_valid());
    }

    #[test]
    fn comparison() {
        let later = moment().and_then(|r| r.add_days(1));
        assert_eq!(moment().compare(&later), Some(Ordering::Less));
        assert_eq!(moment().compare(&invalid()), None);
    }
}
