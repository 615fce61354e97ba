//! Half-open character ranges over candidate names.

use std::fmt::{Display, Error, Formatter};

/// A half-open `[start, end)` interval in character offsets.
///
/// Offsets count `char`s, not bytes. Construction fails fast on a reversed
/// range instead of tolerating it, since a malformed range would silently
/// corrupt scoring and highlighting downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// Creates the range `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> TextRange {
        assert!(start <= end, "reversed range: [{start}, {end})");
        TextRange { start, end }
    }

    /// Creates the range of `length` characters starting at `start`.
    pub fn from_len(start: usize, length: usize) -> TextRange {
        TextRange::new(start, start + length)
    }

    /// First offset inside the range.
    pub fn start(&self) -> usize {
        self.start
    }

    /// First offset past the range.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The same range moved right by `delta` characters.
    pub fn shifted(self, delta: usize) -> TextRange {
        TextRange::new(self.start + delta, self.end + delta)
    }

    /// True when `offset` falls inside the range.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// True when `other` lies entirely inside this range.
    pub fn contains_range(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The overlap of two ranges, or `None` when they are disjoint.
    ///
    /// Touching ranges overlap in an empty range at the shared boundary.
    pub fn intersection(&self, other: TextRange) -> Option<TextRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end { Some(TextRange::new(start, end)) } else { None }
    }
}

impl Display for TextRange {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn bounds_and_len() {
        let r = TextRange::new(2, 5);
        assert_eq!(r.start(), 2);
        assert_eq!(r.end(), 5);
        assert_eq!(r.len(), 3);
        assert!(!r.is_empty());
        assert!(TextRange::new(4, 4).is_empty());
    }

    #[test]
    #[should_panic(expected = "reversed range")]
    fn reversed_range_panics() {
        let _ = TextRange::new(5, 2);
    }

    #[test]
    fn shift_moves_both_ends() {
        assert_eq!(TextRange::new(1, 4).shifted(3), TextRange::new(4, 7));
    }

    #[test]
    fn containment() {
        let r = TextRange::new(2, 6);
        assert!(r.contains(2));
        assert!(r.contains(5));
        assert!(!r.contains(6));
        assert!(r.contains_range(TextRange::new(3, 6)));
        assert!(!r.contains_range(TextRange::new(3, 7)));
    }

    #[test]
    fn intersection_of_overlapping_ranges() {
        let a = TextRange::new(1, 5);
        let b = TextRange::new(3, 8);
        assert_eq!(a.intersection(b), Some(TextRange::new(3, 5)));
        assert_eq!(b.intersection(a), Some(TextRange::new(3, 5)));
    }

    #[test]
    fn intersection_of_disjoint_ranges() {
        assert_eq!(TextRange::new(0, 2).intersection(TextRange::new(4, 6)), None);
        // touching ranges share an empty boundary range
        assert_eq!(
            TextRange::new(0, 2).intersection(TextRange::new(2, 6)),
            Some(TextRange::new(2, 2))
        );
    }

    #[test]
    fn display_format() {
        assert_eq!(TextRange::new(3, 9).to_string(), "[3, 9)");
    }
}
