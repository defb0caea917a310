extern crate datetime_utils;
use datetime_utils::{DateUtils, LocalUtils, Input, Invalid, Moment};


fn utils() -> LocalUtils {
    LocalUtils::new(None)
}

fn parse(value: &str, format: &str) -> Option<String> {
    utils().parse(value, format).map(|date| date.to_string())
}

fn today() -> Moment {
    utils().date(Input::Now).unwrap()
}


mod matches {
    use super::*;

    macro_rules! test {
        ($name: ident: $value: expr, $format: expr => $result: expr) => {
            #[test]
            fn $name() {
                assert_eq!(parse($value, $format), Some($result.to_owned()));
            }
        };
    }

    test!(iso_like:        "2024-02-01",             "yyyy-MM-dd"          => "2024-02-01T00:00:00.000Z");
    test!(with_time:       "2024-02-01 14:05:09",    "yyyy-MM-dd HH:mm:ss" => "2024-02-01T14:05:09.000Z");
    test!(us_style:        "2/1/2024",               "M/d/yyyy"            => "2024-02-01T00:00:00.000Z");
    test!(twelve_hour_pm:  "02/01/2024 02:05 PM",    "MM/dd/yyyy hh:mm a"  => "2024-02-01T14:05:00.000Z");
    test!(twelve_at_night: "02/01/2024 12:30 am",    "MM/dd/yyyy hh:mm a"  => "2024-02-01T00:30:00.000Z");
    test!(month_and_year:  "February 2024",          "MMMM yyyy"           => "2024-02-01T00:00:00.000Z");
    test!(short_month:     "feb 29 2024",            "MMM d yyyy"          => "2024-02-29T00:00:00.000Z");
    test!(weekday_agrees:  "Thu, Feb 1 2024",        "ccc, MMM d yyyy"     => "2024-02-01T00:00:00.000Z");
    test!(two_digit_year:  "01.02.24",               "dd.MM.yy"            => "2024-02-01T00:00:00.000Z");
    test!(last_century:    "01.02.85",               "dd.MM.yy"            => "1985-02-01T00:00:00.000Z");
    test!(localized_date:  "2/1/2024",               "D"                   => "2024-02-01T00:00:00.000Z");
    test!(milliseconds:    "2024-02-01 10:00:00.250", "yyyy-MM-dd HH:mm:ss.SSS" => "2024-02-01T10:00:00.250Z");
    test!(quoted_literal:  "2024 at 10",             "yyyy 'at' H"         => "2024-01-01T10:00:00.000Z");
}


mod missing_units {
    use super::*;

    #[test]
    fn larger_units_come_from_today() {
        let utils = utils();
        let parsed = utils.parse("14:05", "HH:mm").unwrap();
        let today = today();

        assert_eq!(utils.get_year(&parsed),  utils.get_year(&today));
        assert_eq!(utils.get_month(&parsed), utils.get_month(&today));
        assert!(utils.is_same_day(&parsed, &today));
        assert_eq!(utils.get_hours(&parsed), Some(14));
        assert_eq!(utils.get_seconds(&parsed), Some(0));
    }

    #[test]
    fn smaller_units_start_at_their_minimum() {
        let utils = utils();
        let parsed = utils.parse("March", "MMMM").unwrap();

        assert_eq!(utils.get_year(&parsed), utils.get_year(&today()));
        assert_eq!(utils.get_day_text(&parsed), "1");
        assert_eq!(utils.get_hours(&parsed), Some(0));
    }
}


mod failures {
    use super::*;

    fn reason(value: &str, format: &str) -> Option<Invalid> {
        utils().parse(value, format).and_then(|date| date.invalid_reason().cloned())
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(utils().parse("", "yyyy"), None);
    }

    #[test]
    fn wrong_separator() {
        assert!(matches!(reason("2024/02/01", "yyyy-MM-dd"), Some(Invalid::Unparsable(_))));
    }

    #[test]
    fn trailing_input() {
        assert!(matches!(reason("2024-02-01 and more", "yyyy-MM-dd"), Some(Invalid::Unparsable(_))));
    }

    #[test]
    fn too_few_digits() {
        assert!(matches!(reason("24-02-01", "yyyy-MM-dd"), Some(Invalid::Unparsable(_))));
    }

    #[test]
    fn impossible_day() {
        assert!(matches!(reason("2023-02-29", "yyyy-MM-dd"), Some(Invalid::Unparsable(_))));
    }

    #[test]
    fn weekday_disagrees() {
        assert!(matches!(reason("Fri, Feb 1 2024", "ccc, MMM d yyyy"), Some(Invalid::Unparsable(_))));
    }

    #[test]
    fn malformed_pattern() {
        assert!(matches!(reason("2024", "yyyy 'oops"), Some(Invalid::Pattern(_))));
    }

    #[test]
    fn invalid_results_format_as_such() {
        let parsed = utils().parse("yesterday", "yyyy").unwrap();
        assert_eq!(utils().format(&parsed, "yyyy"), Ok("Invalid DateTime".to_owned()));
    }
}


mod locales {
    use super::*;

    #[test]
    fn german_month_names() {
        let utils = LocalUtils::new(Some("de-DE"));
        let parsed = utils.parse("1. März 2024", "d. MMMM yyyy").unwrap();
        assert_eq!(parsed.to_string(), "2024-03-01T00:00:00.000Z");
    }

    #[test]
    fn german_localized_date() {
        let utils = LocalUtils::new(Some("de-DE"));
        let parsed = utils.parse("01.02.2024", "D").unwrap();
        assert_eq!(parsed.to_string(), "2024-02-01T00:00:00.000Z");
    }
}
