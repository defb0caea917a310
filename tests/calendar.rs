extern crate datetime_utils;
use datetime_utils::{LocalDate, LocalTime, LocalDateTime, Month, Weekday, Duration, Instant};
use datetime_utils::{DatePiece, TimePiece};
use datetime_utils::cal::Year;


mod construction {
    use super::*;

    #[test]
    fn the_distant_past() {
        let date = LocalDate::ymd(7, Month::April, 1).unwrap();

        assert_eq!(date.year(),  7);
        assert_eq!(date.month(), Month::April);
        assert_eq!(date.day(),   1);
    }

    #[test]
    fn the_distant_future() {
        let date = LocalDate::ymd(1048576, Month::October, 13).unwrap();

        assert_eq!(date.year(),  1048576);
        assert_eq!(date.month(), Month::October);
        assert_eq!(date.day(),   13);
    }

    #[test]
    fn no_thirtieth_of_february() {
        assert!(LocalDate::ymd(2024, Month::February, 30).is_err());
    }

    #[test]
    fn no_twenty_fifth_hour() {
        assert!(LocalTime::hms(24, 0, 0).is_err());
    }

    #[test]
    fn from_yearday() {
        for date in vec![
            LocalDate::ymd(1971, Month::January,   1).unwrap(),
            LocalDate::ymd(1989, Month::November, 10).unwrap(),
            LocalDate::ymd(2014, Month::July,     13).unwrap(),
            LocalDate::ymd(2024, Month::December, 31).unwrap(),
        ] {
            let again = LocalDate::yd(date.year(), date.yearday() as i64).unwrap();
            assert_eq!(again, date);
        }
    }

    #[test]
    fn end_of_leap_year_day() {
        let date = LocalDate::ymd(2016, Month::December, 31).unwrap();
        assert_eq!(date.yearday(), 366);
    }

    #[test]
    fn weekday() {
        let date = LocalDate::ymd(2024, Month::February, 1).unwrap();
        assert_eq!(date.weekday(), Weekday::Thursday);
    }
}


mod leap_years {
    use super::*;

    #[test]
    fn year_1600() {
        assert!(Year(1600).is_leap_year());
    }

    #[test]
    fn year_1900() {
        assert!(!Year(1900).is_leap_year());
    }

    #[test]
    fn year_2024() {
        assert!(Year(2024).is_leap_year());
    }
}


mod instants {
    use super::*;

    #[test]
    fn unix_epoch() {
        let date = LocalDateTime::at(0);

        assert_eq!(date.year(),   1970);
        assert_eq!(date.month(),  Month::January);
        assert_eq!(date.day(),    1);
        assert_eq!(date.hour(),   0);
    }

    #[test]
    fn billennium() {
        let date = LocalDateTime::at(1_000_000_000);

        assert_eq!(date.year(),   2001);
        assert_eq!(date.month(),  Month::September);
        assert_eq!(date.day(),    9);
        assert_eq!(date.hour(),   1);
        assert_eq!(date.minute(), 46);
        assert_eq!(date.second(), 40);
    }

    #[test]
    fn a_long_time_ago() {
        let date = LocalDateTime::at(-1_000_000_000);

        assert_eq!(date.year(),   1938);
        assert_eq!(date.month(),  Month::April);
        assert_eq!(date.day(),    24);
        assert_eq!(date.hour(),   22);
        assert_eq!(date.minute(), 13);
        assert_eq!(date.second(), 20);
    }

    #[test]
    fn leap_year_29th_feb() {
        let date = LocalDateTime::at(1456704000);

        assert_eq!(date.year(),  2016);
        assert_eq!(date.month(), Month::February);
        assert_eq!(date.day(),   29);
    }

    #[test]
    fn milliseconds_survive() {
        let instant = Instant::at_ms(1_234_567_890, 250);
        assert_eq!(LocalDateTime::from_instant(instant).millisecond(), 250);
        assert_eq!(LocalDateTime::from_instant(instant).to_instant(), instant);
    }

    #[test]
    fn the_distant_past() {
        let date = LocalDateTime::at(-54321234567);
        assert_eq!(date.to_instant().seconds(), -54321234567);
    }
}


mod arithmetic {
    use super::*;

    #[test]
    fn durations() {
        let date = LocalDateTime::at(10000);
        assert_eq!(LocalDateTime::at(10001), date + Duration::of(1));
        assert_eq!(LocalDateTime::at(9999),  date - Duration::of(1));
    }

    #[test]
    fn difference() {
        assert_eq!(LocalDateTime::at(86400) - LocalDateTime::at(0), Duration::of_days(1));
    }

    #[test]
    fn days_across_a_month() {
        let date = LocalDate::ymd(2024, Month::January, 31).unwrap();
        assert_eq!(date.add_days(1),  LocalDate::ymd(2024, Month::February, 1));
        assert_eq!(date.add_days(-1), LocalDate::ymd(2024, Month::January, 30));
    }

    #[test]
    fn months_clamp_the_day() {
        let date = LocalDate::ymd(2024, Month::January, 31).unwrap();
        assert_eq!(date.add_months(1),  LocalDate::ymd(2024, Month::February, 29));
        assert_eq!(date.add_months(-2), LocalDate::ymd(2023, Month::November, 30));
    }

    #[test]
    fn years_clamp_the_day() {
        let date = LocalDate::ymd(2024, Month::February, 29).unwrap();
        assert_eq!(date.add_years(1), LocalDate::ymd(2025, Month::February, 28));
    }

    #[test]
    fn duration_wrapping() {
        assert_eq!(Duration::of_ms(1, 500), Duration::of_ms(0, 750) + Duration::of_ms(0, 750));
        assert_eq!(Duration::of(1), Duration::of_ms(0, 500) * 2);
    }
}
