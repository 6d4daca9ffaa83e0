//! Closed numeric intervals.

use std::fmt;

/// A closed range `[lower, upper]`, e.g. a retention-time or m/z window.
///
/// Construction does not reorder or validate bounds; a column returns
/// exactly what was written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosedInterval<T> {
    /// Inclusive lower bound.
    pub lower: T,
    /// Inclusive upper bound.
    pub upper: T,
}

impl<T> ClosedInterval<T> {
    /// Create an interval from its bounds.
    pub fn new(lower: T, upper: T) -> Self {
        Self { lower, upper }
    }
}

impl<T: PartialOrd + Copy> ClosedInterval<T> {
    /// Whether `value` lies within both bounds.
    pub fn contains(&self, value: T) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Whether `lower <= upper`.
    pub fn is_ordered(&self) -> bool {
        self.lower <= self.upper
    }

    /// Smallest interval enclosing both `self` and `other`.
    pub fn span(&self, other: &Self) -> Self {
        let lower = if other.lower < self.lower { other.lower } else { self.lower };
        let upper = if other.upper > self.upper { other.upper } else { self.upper };
        Self { lower, upper }
    }
}

impl<T: fmt::Display> fmt::Display for ClosedInterval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let rt = ClosedInterval::new(1.0f32, 2.0);
        assert!(rt.contains(1.0));
        assert!(rt.contains(2.0));
        assert!(!rt.contains(2.5));
    }

    #[test]
    fn span_encloses_both() {
        let a = ClosedInterval::new(100.0f64, 101.0);
        let b = ClosedInterval::new(99.5, 100.5);
        assert_eq!(a.span(&b), ClosedInterval::new(99.5, 101.0));
    }

    #[test]
    fn reversed_bounds_are_kept() {
        let r = ClosedInterval::new(5.0f32, 1.0);
        assert!(!r.is_ordered());
        assert_eq!(r.lower, 5.0);
    }

    #[test]
    fn display_format() {
        assert_eq!(ClosedInterval::new(1, 3).to_string(), "[1..3]");
    }
}
