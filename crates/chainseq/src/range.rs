//! Integer ranges.
//!
//! [`IntRange`] is an immutable arithmetic progression described by `start`,
//! `stop` (exclusive) and a non-zero `step`, like `range(start, stop, step)`.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Result, SeqError};

/// An immutable arithmetic progression of integers.
///
/// # Example
///
/// ```
/// use chainseq::IntRange;
///
/// let evens = IntRange::new(0, 10, 2).unwrap();
/// assert_eq!(evens.len(), 5);
/// assert_eq!(evens.get(4), Some(8));
/// assert_eq!(evens.to_string(), "range(0, 10, 2)");
/// ```
///
/// Equality compares the produced integers, so every empty range is equal to
/// every other empty range.
#[derive(Debug, Clone, Copy)]
pub struct IntRange {
    start: i64,
    stop: i64,
    step: i64,
}

impl IntRange {
    /// Creates a range. Fails if `step` is zero.
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self> {
        if step == 0 {
            return Err(SeqError::invalid_argument("range", "step must not be zero"));
        }
        Ok(IntRange { start, stop, step })
    }

    /// Creates a range with a step of one.
    pub fn span(start: i64, stop: i64) -> Self {
        IntRange {
            start,
            stop,
            step: 1,
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn stop(&self) -> i64 {
        self.stop
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Returns the number of integers in the range.
    pub fn len(&self) -> usize {
        let (lo, hi, step) = if self.step > 0 {
            (self.start as i128, self.stop as i128, self.step as i128)
        } else {
            (self.stop as i128, self.start as i128, -(self.step as i128))
        };
        if lo >= hi {
            0
        } else {
            ((hi - lo - 1) / step + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the integer at position `index`.
    pub fn get(&self, index: usize) -> Option<i64> {
        if index >= self.len() {
            return None;
        }
        Some(self.at(index))
    }

    /// Returns `true` if `n` is one of the range's integers.
    pub fn contains(&self, n: i64) -> bool {
        self.position(n).is_some()
    }

    /// Returns the position of `n` in the range.
    pub fn position(&self, n: i64) -> Option<usize> {
        let offset = n as i128 - self.start as i128;
        let step = self.step as i128;
        if offset % step != 0 {
            return None;
        }
        let index = offset / step;
        if index < 0 || index >= self.len() as i128 {
            return None;
        }
        Some(index as usize)
    }

    /// Iterates over the integers of the range.
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            range: *self,
            front: 0,
            back: self.len(),
        }
    }

    /// Returns the sub-range covering positions `lo..hi`.
    pub(crate) fn slice(&self, lo: usize, hi: usize) -> IntRange {
        let hi = hi.max(lo);
        IntRange {
            start: self.offset(lo),
            stop: self.offset(hi),
            step: self.step,
        }
    }

    /// Returns an empty range anchored at this range's start.
    pub(crate) fn cleared(&self) -> IntRange {
        IntRange {
            start: self.start,
            stop: self.start,
            step: self.step,
        }
    }

    fn at(&self, index: usize) -> i64 {
        (self.start as i128 + index as i128 * self.step as i128) as i64
    }

    // Positions at or past the end may fall outside i64; saturate them.
    fn offset(&self, index: usize) -> i64 {
        let value = self.start as i128 + index as i128 * self.step as i128;
        i64::try_from(value).unwrap_or(if self.step > 0 { i64::MAX } else { i64::MIN })
    }
}

impl PartialEq for IntRange {
    fn eq(&self, other: &Self) -> bool {
        let len = self.len();
        len == other.len()
            && (len == 0
                || (self.start == other.start && (len == 1 || self.step == other.step)))
    }
}

impl Eq for IntRange {}

impl Hash for IntRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let len = self.len();
        len.hash(state);
        if len > 0 {
            self.start.hash(state);
        }
        if len > 1 {
            self.step.hash(state);
        }
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step == 1 {
            write!(f, "range({}, {})", self.start, self.stop)
        } else {
            write!(f, "range({}, {}, {})", self.start, self.stop, self.step)
        }
    }
}

impl From<std::ops::Range<i64>> for IntRange {
    fn from(range: std::ops::Range<i64>) -> Self {
        IntRange::span(range.start, range.end)
    }
}

impl From<std::ops::Range<i32>> for IntRange {
    fn from(range: std::ops::Range<i32>) -> Self {
        IntRange::span(range.start as i64, range.end as i64)
    }
}

impl IntoIterator for IntRange {
    type Item = i64;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Double-ended iterator over an [`IntRange`].
#[derive(Debug, Clone)]
pub struct RangeIter {
    range: IntRange,
    front: usize,
    back: usize,
}

impl Iterator for RangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.front >= self.back {
            return None;
        }
        let value = self.range.at(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for RangeIter {
    fn next_back(&mut self) -> Option<i64> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.range.at(self.back))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_step_is_rejected() {
        assert!(matches!(
            IntRange::new(0, 5, 0),
            Err(SeqError::InvalidArgument { op: "range", .. })
        ));
    }

    #[test]
    fn length_for_positive_and_negative_steps() {
        assert_eq!(IntRange::span(0, 5).len(), 5);
        assert_eq!(IntRange::span(5, 0).len(), 0);
        assert_eq!(IntRange::new(0, 10, 3).unwrap().len(), 4);
        assert_eq!(IntRange::new(10, 0, -3).unwrap().len(), 4);
        assert_eq!(IntRange::new(0, 10, -1).unwrap().len(), 0);
    }

    #[test]
    fn position_respects_step() {
        let range = IntRange::new(1, 10, 2).unwrap();
        assert_eq!(range.position(5), Some(2));
        assert_eq!(range.position(4), None);
        assert_eq!(range.position(11), None);
        assert_eq!(range.position(-1), None);
        assert!(range.contains(9));
    }

    #[test]
    fn iterates_both_ways() {
        let range = IntRange::new(10, 0, -4).unwrap();
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![10, 6, 2]);
        assert_eq!(range.iter().rev().collect::<Vec<_>>(), vec![2, 6, 10]);
        assert_eq!(range.iter().len(), 3);
    }

    #[test]
    fn slice_keeps_step() {
        let range = IntRange::new(0, 20, 2).unwrap();
        let sub = range.slice(2, 5);
        assert_eq!(sub.iter().collect::<Vec<_>>(), vec![4, 6, 8]);
        assert!(range.slice(3, 3).is_empty());
    }

    #[test]
    fn equality_compares_elements() {
        assert_eq!(IntRange::span(0, 0), IntRange::span(5, 5));
        assert_eq!(IntRange::new(0, 3, 2).unwrap(), IntRange::new(0, 4, 2).unwrap());
        assert_eq!(IntRange::new(7, 8, 1).unwrap(), IntRange::new(7, 9, 5).unwrap());
        assert_ne!(IntRange::span(0, 3), IntRange::new(0, 3, 2).unwrap());
    }

    #[test]
    fn display() {
        assert_eq!(IntRange::span(0, 5).to_string(), "range(0, 5)");
        assert_eq!(IntRange::new(5, 0, -1).unwrap().to_string(), "range(5, 0, -1)");
    }
}
