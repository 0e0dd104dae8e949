//! Search windows and sub-slice matching.
//!
//! Bounds follow the usual sequence-slicing rules: negative bounds count from
//! the end, and out-of-range bounds are clamped to the sequence.

use std::ops::Range;

/// Resolves optional search bounds against a sequence of `len` elements.
///
/// Returns `None` when the window starts past the end of the sequence or ends
/// before it starts; such windows match nothing, not even an empty needle.
pub(crate) fn window(len: usize, start: Option<i64>, end: Option<i64>) -> Option<Range<usize>> {
    let len = len as i64;
    let adjust = |bound: i64| if bound < 0 { (bound + len).max(0) } else { bound };

    let start = start.map_or(0, adjust);
    let end = end.map_or(len, adjust).min(len);
    if start > len || end < start {
        return None;
    }
    Some(start as usize..end as usize)
}

/// Resolves slice bounds; never fails, an inverted slice is empty.
pub(crate) fn slice_bounds(len: usize, start: Option<i64>, stop: Option<i64>) -> Range<usize> {
    let len = len as i64;
    let adjust = |bound: i64| {
        if bound < 0 {
            (bound + len).max(0)
        } else {
            bound.min(len)
        }
    };

    let start = start.map_or(0, adjust);
    let stop = stop.map_or(len, adjust).max(start);
    start as usize..stop as usize
}

/// Resolves a possibly negative index.
pub(crate) fn resolve_index(len: usize, index: i64) -> Option<usize> {
    let resolved = if index < 0 { index + len as i64 } else { index };
    if resolved < 0 || resolved >= len as i64 {
        None
    } else {
        Some(resolved as usize)
    }
}

/// Counts non-overlapping occurrences of `needle` in `haystack`.
///
/// An empty needle matches between every element and at both ends.
pub(crate) fn count_subslice<T: PartialEq>(haystack: &[T], needle: &[T]) -> usize {
    if needle.is_empty() {
        return haystack.len() + 1;
    }

    let mut count = 0;
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..].starts_with(needle) {
            count += 1;
            i += needle.len();
        } else {
            i += 1;
        }
    }
    count
}

/// Finds the first occurrence of `needle` in `haystack`.
pub(crate) fn find_subslice<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|candidate| candidate == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_to_whole_sequence() {
        assert_eq!(window(5, None, None), Some(0..5));
        assert_eq!(window(5, Some(2), None), Some(2..5));
    }

    #[test]
    fn window_handles_negative_and_oversized_bounds() {
        assert_eq!(window(5, Some(-2), None), Some(3..5));
        assert_eq!(window(5, Some(-10), Some(100)), Some(0..5));
        assert_eq!(window(5, Some(1), Some(-1)), Some(1..4));
    }

    #[test]
    fn window_rejects_start_past_end() {
        assert_eq!(window(5, Some(6), None), None);
        assert_eq!(window(5, Some(3), Some(1)), None);
        assert_eq!(window(5, Some(5), None), Some(5..5));
    }

    #[test]
    fn slice_bounds_never_invert() {
        assert_eq!(slice_bounds(5, Some(1), None), 1..5);
        assert_eq!(slice_bounds(5, Some(4), Some(2)), 4..4);
        assert_eq!(slice_bounds(5, Some(-2), Some(10)), 3..5);
        assert_eq!(slice_bounds(5, Some(9), None), 5..5);
    }

    #[test]
    fn resolve_negative_index() {
        assert_eq!(resolve_index(3, -1), Some(2));
        assert_eq!(resolve_index(3, 3), None);
        assert_eq!(resolve_index(3, -4), None);
        assert_eq!(resolve_index(0, 0), None);
    }

    #[test]
    fn counts_without_overlap() {
        assert_eq!(count_subslice(b"aaaa", b"aa"), 2);
        assert_eq!(count_subslice(b"12345", b"5"), 1);
        assert_eq!(count_subslice(b"abc", b""), 4);
        assert_eq!(count_subslice(b"ab", b"abc"), 0);
    }

    #[test]
    fn finds_first_occurrence() {
        assert_eq!(find_subslice(b"abcabc", b"ca"), Some(2));
        assert_eq!(find_subslice(b"abc", b"d"), None);
        assert_eq!(find_subslice(b"abc", b""), Some(0));
    }
}
