//! Iterators through runs of days, and grouping days into weeks.

use std::ops::Range;

use crate::cal::datetime::LocalDate;


impl LocalDate {

    /// Returns an iterator over `count` consecutive days, starting with
    /// this one. The run stops early at the last supported date.
    ///
    /// ### Examples
    ///
    /// ```
    /// use datetime_utils::cal::{LocalDate, Month};
    ///
    /// let last = LocalDate::ymd(2024, Month::February, 28).unwrap().days(3).last();
    /// assert_eq!(last, Some(LocalDate::ymd(2024, Month::March, 1).unwrap()));
    /// ```
    pub fn days(self, count: usize) -> Days {
        Days { start: self, range: 0 .. count as i64 }
    }
}


/// An iterator over a run of consecutive days.
///
/// Use the `days` method on `LocalDate` to create instances of this
/// iterator.
#[derive(PartialEq, Debug, Clone)]
pub struct Days {
    start: LocalDate,
    range: Range<i64>,
}

impl Iterator for Days {
    type Item = LocalDate;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.range.next()?;
        self.start.add_days(offset).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.range.size_hint().1)
    }
}


/// Groups the items of another iterator into rows of seven. The last row
/// holds whatever is left over, so it can be shorter.
pub fn weeks<I: IntoIterator>(items: I) -> Weeks<I::IntoIter> {
    Weeks { iter: items.into_iter() }
}

/// An iterator over rows of seven items.
///
/// Use the `weeks` function to create instances of this iterator.
#[derive(Debug, Clone)]
pub struct Weeks<I> {
    iter: I,
}

impl<I: Iterator> Iterator for Weeks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let row: Vec<_> = self.iter.by_ref().take(7).collect();
        if row.is_empty() { None } else { Some(row) }
    }
}


#[cfg(test)]
mod test {
    pub(crate) use super::*;

    mod days {
        use super::*;
        use crate::cal::datetime::Month::*;
        use crate::cal::MAX_YEAR;

        #[test]
        fn across_a_month() {
            let start = LocalDate::ymd(2013, February, 27).unwrap();
            let days: Vec<_> = start.days(3).collect();
            assert_eq!(days, vec![
                LocalDate::ymd(2013, February, 27).unwrap(),
                LocalDate::ymd(2013, February, 28).unwrap(),
                LocalDate::ymd(2013, March, 1).unwrap(),
            ]);
        }

        #[test]
        fn none() {
            let start = LocalDate::ymd(2013, February, 27).unwrap();
            assert_eq!(start.days(0).count(), 0);
        }

        #[test]
        fn entire_leap_year() {
            let start = LocalDate::ymd(2000, January, 1).unwrap();
            let end = start.days(366).last().unwrap();
            assert_eq!(end, LocalDate::ymd(2000, December, 31).unwrap());
        }

        #[test]
        fn stops_at_the_last_year() {
            let start = LocalDate::ymd(MAX_YEAR, December, 30).unwrap();
            assert_eq!(start.days(5).count(), 2);
        }
    }

    mod weeks {
        use super::*;

        #[test]
        fn full_rows() {
            let rows: Vec<_> = weeks(0..14).collect();
            assert_eq!(rows, vec![ (0..7).collect::<Vec<_>>(), (7..14).collect() ]);
        }

        #[test]
        fn ragged_last_row() {
            let rows: Vec<_> = weeks(0..9).collect();
            assert_eq!(rows, vec![ (0..7).collect::<Vec<_>>(), vec![7, 8] ]);
        }

        #[test]
        fn nothing() {
            assert_eq!(weeks(0..0).count(), 0);
        }

        #[test]
        fn rows_of_days() {
            let start = LocalDate::ymd(2024, crate::cal::Month::January, 28).unwrap();
            let rows: Vec<_> = weeks(start.days(35)).collect();
            assert_eq!(rows.len(), 5);
            assert_eq!(rows[4][6], LocalDate::ymd(2024, crate::cal::Month::March, 2).unwrap());
        }
    }
}
