//! Locale selection and the calendar words that come with it.
//!
//! The tables themselves are glibc’s `LC_TIME` data, as shipped by
//! `pure-rust-locales`. This module turns loose locale tags such as `en`,
//! `en-GB` or `fr_FR.UTF-8` into one of those tables, and adds the few
//! facts glibc doesn’t record per locale in a usable form, such as which
//! day a week starts on.

use std::borrow::Cow;
use std::fmt;

use pure_rust_locales::{locale_match, Locale as Table};

use crate::cal::{Month, Weekday};


/// How much of a month or weekday name to use.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Style {

    /// An abbreviation, such as `Feb` or `Thu`.
    Short,

    /// The full name, such as `February` or `Thursday`.
    Long,

    /// A single letter, such as `F` or `T`.
    Narrow,
}


/// The order day, month, and year appear in when a locale writes a date
/// out in numbers.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum DateOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}


/// A resolved locale.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Locale {
    table: Table,
    first_weekday: Weekday,
}

/// A tag that doesn’t name any locale we have tables for.
#[derive(PartialEq, Eq, Debug, Clone, thiserror::Error)]
#[error("unknown locale `{0}`")]
pub struct UnknownLocale(pub String);


impl Locale {

    /// US English, used whenever nothing better can be found.
    pub fn english() -> Self {
        Self { table: Table::en_US, first_weekday: Weekday::Sunday }
    }

    /// Resolves a locale tag, falling back to US English (with a warning)
    /// when the tag doesn’t match anything.
    ///
    /// ### Examples
    ///
    /// ```
    /// use datetime_utils::locale::Locale;
    /// use datetime_utils::cal::Weekday;
    ///
    /// assert_eq!(Locale::resolve("en-GB").first_weekday(), Weekday::Monday);
    /// assert_eq!(Locale::resolve("klingon"), Locale::english());
    /// ```
    pub fn resolve(tag: &str) -> Self {
        match Self::try_resolve(tag) {
            Ok(locale) => locale,
            Err(e) => {
                log::warn!("{}, falling back to en_US", e);
                Self::english()
            }
        }
    }

    /// Resolves a locale tag. Hyphens and underscores are both accepted as
    /// separators, case doesn’t matter, and anything after a `.` or `@` is
    /// ignored. A bare language gets its most common territory, so `fr`
    /// becomes `fr_FR` and `ja` becomes `ja_JP`. The empty tag is English.
    pub fn try_resolve(tag: &str) -> Result<Self, UnknownLocale> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Ok(Self::english());
        }

        let base = trimmed.split(|c| c == '.' || c == '@').next().unwrap_or("");
        let mut segments = base.split(|c| c == '-' || c == '_');
        let language = segments.next().unwrap_or("").to_ascii_lowercase();
        let territory = segments
            .find(|s| s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
            .map(|s| s.to_ascii_uppercase());

        if language == "c" || language == "posix" {
            return Ok(Self { table: Table::POSIX, first_weekday: Weekday::Monday });
        }

        let mut candidates = Vec::new();
        if let Some(territory) = &territory {
            candidates.push((language.clone(), territory.clone()));
        }
        if let Some(territory) = default_territory(&language) {
            candidates.push((language.clone(), territory.to_owned()));
        }
        candidates.push((language.clone(), language.to_ascii_uppercase()));

        for (language, territory) in candidates {
            let name = format!("{}_{}", language, territory);
            if let Ok(table) = Table::try_from(name.as_str()) {
                return Ok(Self { table, first_weekday: first_weekday_in(&territory) });
            }
        }

        Err(UnknownLocale(tag.to_owned()))
    }

    /// The day weeks start on in this locale’s territory.
    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// The name of a month as it’s written inside a date. In languages
    /// such as Russian or Polish this is the genitive, `1 февраля`.
    pub fn month_name(&self, month: Month, style: Style) -> Cow<'static, str> {
        name_in(self.short_months(), self.long_months(), month, style)
    }

    /// The name of a month standing on its own, as in a calendar header:
    /// `Февраль` rather than `февраля`. Locales with only one form use it
    /// for both.
    pub fn standalone_month_name(&self, month: Month, style: Style) -> Cow<'static, str> {
        let short: Option<&'static [&'static str]> = locale_match!(self.table => LC_TIME::AB_ALT_MON);
        let long: Option<&'static [&'static str]> = locale_match!(self.table => LC_TIME::ALT_MON);
        name_in(short.unwrap_or(self.short_months()), long.unwrap_or(self.long_months()), month, style)
    }

    /// The name of a weekday.
    ///
    /// Narrow names are the first letter of the full name, skipping any
    /// prefix every weekday shares, so Chinese `星期一` narrows to `一`.
    pub fn weekday_name(&self, weekday: Weekday, style: Style) -> Cow<'static, str> {
        let index = weekday.days_from_sunday() as usize;
        match style {
            Style::Short  => Cow::Borrowed(pick(self.short_days(), index)),
            Style::Long   => Cow::Borrowed(pick(self.long_days(), index)),
            Style::Narrow => {
                let days = self.long_days();
                let prefix = common_prefix_len(days);
                let name = pick(days, index);
                Cow::Owned(initial(name.get(prefix..).filter(|rest| !rest.is_empty()).unwrap_or(name)))
            }
        }
    }

    /// The locale’s own ante- and post-meridiem labels. Either may be
    /// empty for locales that don’t use a twelve-hour clock.
    pub fn meridiem_labels(&self) -> [&'static str; 2] {
        let labels: &'static [&'static str] = locale_match!(self.table => LC_TIME::AM_PM);
        [pick(labels, 0), pick(labels, 1)]
    }

    /// The label for the morning or the afternoon, using the English one
    /// when the locale has none.
    pub fn meridiem(&self, pm: bool) -> &'static str {
        let label = self.meridiem_labels()[pm as usize];
        if !label.is_empty()  { label }
        else if pm            { "PM" }
        else                  { "AM" }
    }

    /// Whether times are usually written with a twelve-hour clock.
    pub fn uses_twelve_hour_clock(&self) -> bool {
        let time_format: &'static str = locale_match!(self.table => LC_TIME::T_FMT);
        let has_labels = self.meridiem_labels().iter().all(|l| !l.is_empty());
        has_labels && (time_format.contains("%I") || time_format.contains("%l") || time_format.contains("%r"))
    }

    /// The order of the fields in this locale’s numeric dates.
    pub fn date_order(&self) -> DateOrder {
        let date_format = self.date_format();
        let day   = conversion_position(date_format, &['d', 'e']);
        let month = conversion_position(date_format, &['m', 'b', 'B', 'h']);
        let year  = conversion_position(date_format, &['Y', 'y']);

        match (year, month, day) {
            (Some(y), Some(m), Some(d)) if y < m && y < d => DateOrder::YearMonthDay,
            (_, Some(m), Some(d)) if m < d                => DateOrder::MonthDayYear,
            (_, Some(_), Some(_))                         => DateOrder::DayMonthYear,
            _                                             => DateOrder::MonthDayYear,
        }
    }

    /// The character between the fields of a numeric date, such as `/`
    /// in the US or `.` in Germany.
    pub fn date_separator(&self) -> char {
        let mut chars = self.date_format().chars();
        while let Some(c) = chars.next() {
            if c == '%' {
                let _ = chars.next();
            }
            else if !c.is_alphanumeric() {
                return c;
            }
        }
        '/'
    }

    fn date_format(&self) -> &'static str {
        locale_match!(self.table => LC_TIME::D_FMT)
    }

    fn short_months(&self) -> &'static [&'static str] {
        locale_match!(self.table => LC_TIME::ABMON)
    }

    fn long_months(&self) -> &'static [&'static str] {
        locale_match!(self.table => LC_TIME::MON)
    }

    fn short_days(&self) -> &'static [&'static str] {
        locale_match!(self.table => LC_TIME::ABDAY)
    }

    fn long_days(&self) -> &'static [&'static str] {
        locale_match!(self.table => LC_TIME::DAY)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Locale({:?})", self.table)
    }
}


fn name_in(short: &'static [&'static str], long: &'static [&'static str], month: Month, style: Style) -> Cow<'static, str> {
    let index = month.months_from_january();
    match style {
        Style::Short  => Cow::Borrowed(pick(short, index)),
        Style::Long   => Cow::Borrowed(pick(long, index)),
        Style::Narrow => Cow::Owned(initial(pick(long, index))),
    }
}

fn pick(table: &'static [&'static str], index: usize) -> &'static str {
    table.get(index).copied().unwrap_or("")
}

/// The first character of a name, in upper case.
fn initial(name: &str) -> String {
    name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
}

/// The length in bytes of the prefix shared by every name, cut at a
/// character boundary.
fn common_prefix_len(names: &[&str]) -> usize {
    let first = match names.first() {
        Some(first) => *first,
        None => return 0,
    };

    let mut len = 0;
    for (pos, c) in first.char_indices() {
        let end = pos + c.len_utf8();
        if names.iter().all(|n| n.get(..end) == Some(&first[..end])) {
            len = end;
        }
        else {
            break;
        }
    }
    len
}

fn conversion_position(format: &str, conversions: &[char]) -> Option<usize> {
    let mut chars = format.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        if c != '%' {
            continue;
        }

        // Skip flags such as `%-d` and modifiers such as `%Ey`.
        while let Some(&(_, next)) = chars.peek() {
            if next == '-' || next == '_' || next == '0' || next == 'E' || next == 'O' {
                let _ = chars.next();
            }
            else {
                break;
            }
        }

        if let Some((_, conversion)) = chars.next() {
            if conversions.contains(&conversion) {
                return Some(pos);
            }
        }
    }
    None
}

/// The territory a bare language tag most likely means, where it isn’t
/// just the language code in capitals.
fn default_territory(language: &str) -> Option<&'static str> {
    Some(match language {
        "en" => "US",
        "ar" => "SA",
        "cs" => "CZ",
        "da" => "DK",
        "el" => "GR",
        "et" => "EE",
        "fa" => "IR",
        "he" => "IL",
        "hi" => "IN",
        "ja" => "JP",
        "ka" => "GE",
        "kk" => "KZ",
        "ko" => "KR",
        "ms" => "MY",
        "nb" => "NO",
        "nn" => "NO",
        "pt" => "PT",
        "sl" => "SI",
        "sq" => "AL",
        "sr" => "RS",
        "sv" => "SE",
        "uk" => "UA",
        "ur" => "PK",
        "vi" => "VN",
        "zh" => "CN",
        _    => return None,
    })
}

/// The day weeks start on in a territory, following CLDR’s week data.
fn first_weekday_in(territory: &str) -> Weekday {
    match territory {
        "AG" | "AS" | "AU" | "BD" | "BR" | "BS" | "BT" | "BW" | "BZ" | "CA" | "CN" |
        "CO" | "DM" | "DO" | "ET" | "GT" | "GU" | "HK" | "HN" | "ID" | "IL" | "IN" |
        "JM" | "JP" | "KE" | "KH" | "KR" | "LA" | "MH" | "MM" | "MO" | "MT" | "MX" |
        "MZ" | "NI" | "NP" | "PA" | "PE" | "PH" | "PK" | "PR" | "PT" | "PY" | "SA" |
        "SG" | "SV" | "TH" | "TT" | "TW" | "UM" | "US" | "VE" | "VI" | "WS" | "YE" |
        "ZA" | "ZW" => Weekday::Sunday,

        "AE" | "AF" | "BH" | "DJ" | "DZ" | "EG" | "IQ" | "IR" | "JO" | "KW" | "LY" |
        "OM" | "QA" | "SD" | "SY" => Weekday::Saturday,

        _ => Weekday::Monday,
    }
}
