//! Closed interval type used as the key of [`IntervalTree`](crate::IntervalTree).

use std::fmt;
use std::ops::RangeInclusive;

/// A closed interval `[start, end]` over an ordered scalar domain.
///
/// Both ends are inclusive. `start <= end` is not enforced; a reversed
/// interval is accepted and simply overlaps less than a caller might expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval<S = u64> {
    pub start: S,
    pub end: S,
}

impl<S: Ord + Copy> Interval<S> {
    /// Create a new interval.
    #[inline]
    pub fn new(start: S, end: S) -> Self {
        Self { start, end }
    }

    /// A single-point interval `[point, point]`.
    #[inline]
    pub fn point(point: S) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Check if this interval overlaps with another (closed intersection).
    #[inline]
    pub fn overlaps(&self, other: &Interval<S>) -> bool {
        self.end >= other.start && self.start <= other.end
    }

    /// Check if `point` lies within the interval.
    #[inline]
    pub fn contains(&self, point: S) -> bool {
        self.start <= point && point <= self.end
    }

    /// Check if this interval fully encloses another.
    #[inline]
    pub fn encloses(&self, other: &Interval<S>) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns true if `start > end`.
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }
}

impl<S> From<(S, S)> for Interval<S> {
    fn from((start, end): (S, S)) -> Self {
        Self { start, end }
    }
}

impl<S: Copy> From<RangeInclusive<S>> for Interval<S> {
    fn from(range: RangeInclusive<S>) -> Self {
        Self {
            start: *range.start(),
            end: *range.end(),
        }
    }
}

impl<S: fmt::Display> fmt::Display for Interval<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_overlap() {
        let a = Interval::new(100u64, 200);
        let b = Interval::new(150u64, 250);
        let c = Interval::new(200u64, 300);
        let d = Interval::new(201u64, 300);

        assert!(a.overlaps(&b));
        assert!(a.overlaps(&c)); // Touching endpoints overlap, both ends are inclusive
        assert!(!a.overlaps(&d));
        assert!(d.overlaps(&c));
    }

    #[test]
    fn test_interval_overlap_is_symmetric() {
        let a = Interval::new(0i32, 5);
        let b = Interval::new(4i32, 5);
        let c = Interval::new(6i32, 8);

        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert_eq!(a.overlaps(&c), c.overlaps(&a));
        assert!(!b.overlaps(&c));
    }

    #[test]
    fn test_point_interval() {
        let p = Interval::point(7u64);
        assert!(p.contains(7));
        assert!(!p.contains(8));
        assert!(p.overlaps(&Interval::new(0, 7)));
        assert!(!p.overlaps(&Interval::new(8, 9)));
    }

    #[test]
    fn test_encloses() {
        let outer = Interval::new(0u64, 100);
        let inner = Interval::new(10u64, 20);

        assert!(outer.encloses(&inner));
        assert!(!inner.encloses(&outer));
        assert!(outer.encloses(&outer));
    }

    #[test]
    fn test_reversed_interval_accepted() {
        let r = Interval::new(10u64, 5);
        assert!(r.is_reversed());
        // end >= other.start && start <= other.end
        assert!(r.overlaps(&Interval::new(5, 10)));
        assert!(!r.overlaps(&Interval::new(6, 9)));
    }

    #[test]
    fn test_conversions_and_display() {
        let a: Interval<u64> = (3, 9).into();
        let b: Interval<u64> = (3..=9).into();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "[3, 9]");
    }

    #[test]
    fn test_interval_ordering() {
        let mut intervals = [
            Interval::new(5u64, 6),
            Interval::new(1u64, 9),
            Interval::new(1u64, 2),
        ];
        intervals.sort();

        assert_eq!(intervals[0], Interval::new(1, 2));
        assert_eq!(intervals[1], Interval::new(1, 9));
        assert_eq!(intervals[2], Interval::new(5, 6));
    }
}
