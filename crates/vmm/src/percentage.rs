//! Human-readable percentage formatting for hit and fault rates.

use core::fmt;

/// Wraps a `part / whole` ratio and formats it as a percentage.
///
/// Values are displayed with one or two decimal places: trailing zeros are dropped, but a
/// whole number keeps a single `.0`. An empty `whole` formats as `0.0%` rather than dividing
/// by zero.
///
/// # Examples
///
/// ```
/// use vmm::Percentage;
///
/// assert_eq!(format!("{}", Percentage::new(0, 1000)), "0.0%");
/// assert_eq!(format!("{}", Percentage::new(244, 1000)), "24.4%");
/// assert_eq!(format!("{}", Percentage::new(54, 1000)), "5.4%");
/// assert_eq!(format!("{}", Percentage::new(1, 3)), "33.33%");
/// assert_eq!(format!("{}", Percentage::new(5, 5)), "100.0%");
/// assert_eq!(format!("{}", Percentage::new(3, 0)), "0.0%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Percentage {
    part: usize,
    whole: usize,
}

impl Percentage {
    /// Creates a percentage of `part` out of `whole`.
    #[inline]
    pub const fn new(part: usize, whole: usize) -> Self {
        Self { part, whole }
    }

    /// Returns the numerator.
    #[inline]
    pub const fn part(self) -> usize {
        self.part
    }

    /// Returns the denominator.
    #[inline]
    pub const fn whole(self) -> usize {
        self.whole
    }

    /// Returns the percentage rounded to hundredths, e.g. `2440` for 24.4%.
    ///
    /// Rounds half away from zero using integer arithmetic, so it behaves the same with or
    /// without `std`.
    pub const fn hundredths(self) -> u64 {
        if self.whole == 0 {
            return 0;
        }
        let scaled = self.part as u128 * 10_000;
        let whole = self.whole as u128;
        ((scaled + whole / 2) / whole) as u64
    }

    /// Returns the percentage as a floating point value, rounded to two decimal places.
    pub fn value(self) -> f64 {
        self.hundredths() as f64 / 100.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hundredths = self.hundredths();
        let whole = hundredths / 100;
        let fraction = hundredths % 100;

        if fraction % 10 == 0 {
            write!(f, "{}.{}%", whole, fraction / 10)
        } else {
            write!(f, "{}.{:02}%", whole, fraction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format!("{}", Percentage::new(0, 10)), "0.0%");
    }

    #[test]
    fn empty_whole_is_zero() {
        assert_eq!(Percentage::new(7, 0).hundredths(), 0);
        assert_eq!(format!("{}", Percentage::new(7, 0)), "0.0%");
    }

    #[test]
    fn formats_whole_numbers() {
        assert_eq!(format!("{}", Percentage::new(1, 4)), "25.0%");
        assert_eq!(format!("{}", Percentage::new(256, 256)), "100.0%");
    }

    #[test]
    fn removes_trailing_zeros() {
        assert_eq!(format!("{}", Percentage::new(244, 1000)), "24.4%");
        assert_eq!(format!("{}", Percentage::new(1, 1000)), "0.1%");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(format!("{}", Percentage::new(2, 3)), "66.67%");
        assert_eq!(format!("{}", Percentage::new(1, 10_000)), "0.01%");
        assert_eq!(format!("{}", Percentage::new(1, 1_000_000)), "0.0%");
        assert_eq!(format!("{}", Percentage::new(1, 12)), "8.33%");
        assert_eq!(format!("{}", Percentage::new(1, 16)), "6.25%");
    }

    #[test]
    fn value_matches_display() {
        assert_eq!(Percentage::new(244, 1000).value(), 24.4);
        assert_eq!(Percentage::new(2, 3).value(), 66.67);
    }
}
