//! Misc stuff.

use std::ops::Range;


pub(crate) trait RangeExt {

    /// Returns whether this value exists within the given range of values.
    fn is_within(&self, range: Range<Self>) -> bool where Self: Sized;
}

impl<T> RangeExt for T where T: PartialOrd<T> {
    fn is_within(&self, range: Range<Self>) -> bool {
        *self >= range.start && *self < range.end
    }
}


/// Split a number of periods into a number of whole cycles and the
/// periods left over, where the leftover is always positive. Negative
/// inputs get ‘wrapped around’, so -1 day is cycle -1, remainder 86399
/// seconds, rather than cycle 0, remainder -1.
pub(crate) fn split_cycles(number_of_periods: i64, cycle_length: i64) -> (i64, i64) {
    (number_of_periods.div_euclid(cycle_length), number_of_periods.rem_euclid(cycle_length))
}


#[cfg(test)]
mod test {
    use super::{split_cycles, RangeExt};

    #[test]
    fn within() {
        assert!(5.is_within(0..10));
        assert!(!10.is_within(0..10));
    }

    #[test]
    fn positive_cycles() {
        assert_eq!(split_cycles(86_401, 86_400), (1, 1));
    }

    #[test]
    fn negative_cycles() {
        assert_eq!(split_cycles(-1, 86_400), (-1, 86_399));
    }
}
