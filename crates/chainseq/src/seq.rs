//! The chainable sequence wrapper.
//!
//! [`Seq`] wraps an [`Items`] container and exposes a fluent set of
//! operations over it. Operations that produce a sequence return a new
//! [`Seq`] and leave the receiver untouched, so calls chain freely:
//!
//! ```
//! use chainseq::{seq, Value};
//!
//! let total = seq(vec![1, 2, 2, 3, 3, 3])
//!     .deduplicate()
//!     .map(|v| v.as_int().unwrap_or(0) * 10)
//!     .reduce(None, |acc, v| Value::Int(acc.as_int().unwrap_or(0) + v.as_int().unwrap_or(0)))
//!     .unwrap();
//! assert_eq!(total, Value::Int(60));
//! ```
//!
//! Results keep the kind of the source container where they can. A range
//! cannot hold arbitrary elements, so range results go through the
//! sequence's [`Coercion`] instead, and anything that still does not fit
//! falls back to a list.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, SeqError};
use crate::items::{Items, Iter};
use crate::json;
use crate::kind::{to_byte, Coercion, Kind};
use crate::search::{count_subslice, find_subslice, resolve_index, slice_bounds, window};
use crate::value::Value;

/// Wraps `items` in a [`Seq`] with the default range coercion.
///
/// # Example
///
/// ```
/// use chainseq::{seq, Value};
///
/// assert_eq!(seq(b"123455555").count_range(b"5", 5, None).unwrap(), 4);
/// assert_eq!(seq("Hi!").first(), Some(Value::from("H")));
/// ```
pub fn seq(items: impl Into<Items>) -> Seq {
    Seq::new(items)
}

/// A chainable wrapper around an ordered container.
///
/// Two sequences are equal when their containers are equal; the range
/// coercion is configuration and does not take part in comparisons.
#[derive(Debug, Clone)]
pub struct Seq {
    items: Items,
    range_coercion: Coercion,
}

/// Builder for a [`Seq`] with non-default configuration.
///
/// # Example
///
/// ```
/// use chainseq::{Coercion, Items, Seq};
///
/// let odds = Seq::builder(0..6)
///     .coerce_range_into(Coercion::List)
///     .build()
///     .filter(|v| v.as_int().is_some_and(|n| n % 2 == 1));
/// assert_eq!(odds.value(), &Items::from(vec![1, 3, 5]));
/// ```
#[derive(Debug, Clone)]
pub struct SeqBuilder {
    items: Items,
    range_coercion: Coercion,
}

impl SeqBuilder {
    /// Sets the kind range results are converted into. Defaults to tuple.
    pub fn coerce_range_into(mut self, coercion: Coercion) -> Self {
        self.range_coercion = coercion;
        self
    }

    pub fn build(self) -> Seq {
        Seq {
            items: self.items,
            range_coercion: self.range_coercion,
        }
    }
}

impl Seq {
    /// Wraps `items` with the default range coercion.
    pub fn new(items: impl Into<Items>) -> Self {
        Seq {
            items: items.into(),
            range_coercion: Coercion::default(),
        }
    }

    /// Starts a builder for a sequence over `items`.
    pub fn builder(items: impl Into<Items>) -> SeqBuilder {
        SeqBuilder {
            items: items.into(),
            range_coercion: Coercion::default(),
        }
    }

    /// Returns the wrapped container.
    pub fn value(&self) -> &Items {
        &self.items
    }

    /// Consumes the sequence, returning the wrapped container.
    pub fn into_value(self) -> Items {
        self.items
    }

    pub fn kind(&self) -> Kind {
        self.items.kind()
    }

    /// Returns the kind range results are converted into.
    pub fn range_coercion(&self) -> Coercion {
        self.range_coercion
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> Iter<'_> {
        self.items.iter()
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    /// Returns `true` if `predicate` holds for every element.
    ///
    /// Vacuously `true` for an empty sequence.
    pub fn all<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value) -> bool,
    {
        self.items.iter().all(|value| predicate(&value))
    }

    /// Like [`Seq::all`], also passing each element's index and the container.
    pub fn all_indexed<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, usize, &Items) -> bool,
    {
        self.items
            .iter()
            .enumerate()
            .all(|(index, value)| predicate(&value, index, &self.items))
    }

    /// Returns `true` if `predicate` holds for at least one element.
    pub fn any<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value) -> bool,
    {
        self.items.iter().any(|value| predicate(&value))
    }

    /// Like [`Seq::any`], also passing each element's index and the container.
    pub fn any_indexed<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, usize, &Items) -> bool,
    {
        self.items
            .iter()
            .enumerate()
            .any(|(index, value)| predicate(&value, index, &self.items))
    }

    /// Returns `true` if `item` occurs in the sequence.
    ///
    /// Text and byte sequences match sub-sequences.
    pub fn contains(&self, item: impl Into<Value>) -> bool {
        self.items.contains(&item.into())
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    /// Keeps the elements `predicate` accepts.
    pub fn filter<F>(&self, mut predicate: F) -> Seq
    where
        F: FnMut(&Value) -> bool,
    {
        let kept = self.items.iter().filter(|value| predicate(value)).collect();
        self.rebuild("filter", kept)
    }

    /// Like [`Seq::filter`], also passing each element's index and the container.
    pub fn filter_indexed<F>(&self, mut predicate: F) -> Seq
    where
        F: FnMut(&Value, usize, &Items) -> bool,
    {
        let kept = self
            .items
            .iter()
            .enumerate()
            .filter(|(index, value)| predicate(value, *index, &self.items))
            .map(|(_, value)| value)
            .collect();
        self.rebuild("filter", kept)
    }

    /// Applies `f` to every element.
    ///
    /// The result keeps the source kind when the mapped elements fit it, so
    /// mapping text to one-character strings stays text while mapping it to
    /// anything else yields a list.
    pub fn map<F, U>(&self, mut f: F) -> Seq
    where
        F: FnMut(&Value) -> U,
        U: Into<Value>,
    {
        let mapped = self.items.iter().map(|value| f(&value).into()).collect();
        self.rebuild("map", mapped)
    }

    /// Like [`Seq::map`], also passing each element's index and the container.
    pub fn map_indexed<F, U>(&self, mut f: F) -> Seq
    where
        F: FnMut(&Value, usize, &Items) -> U,
        U: Into<Value>,
    {
        let mapped = self
            .items
            .iter()
            .enumerate()
            .map(|(index, value)| f(&value, index, &self.items).into())
            .collect();
        self.rebuild("map", mapped)
    }

    /// Collapses each run of consecutive equal elements into one.
    ///
    /// A range never holds equal neighbours and is returned as is.
    pub fn deduplicate(&self) -> Seq {
        if let Items::Range(_) = self.items {
            return self.clone();
        }
        let mut values = self.items.to_values();
        values.dedup();
        self.rebuild("deduplicate", values)
    }

    /// Returns one copy of each element occurring more than once, in order of
    /// second occurrence. Always a list.
    pub fn duplicates(&self) -> Seq {
        let mut counts: HashMap<Value, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for value in self.items.iter() {
            let count = counts.entry(value.clone()).or_insert(0);
            *count += 1;
            if *count == 2 {
                duplicates.push(value);
            }
        }
        self.derive(Items::List(duplicates))
    }

    /// Keeps the elements occurring exactly once, in their original order.
    pub fn unique(&self) -> Seq {
        let values = self.items.to_values();
        let mut counts: HashMap<&Value, usize> = HashMap::new();
        for value in &values {
            *counts.entry(value).or_insert(0) += 1;
        }
        let unique = values
            .iter()
            .filter(|value| counts.get(value) == Some(&1))
            .cloned()
            .collect();
        self.rebuild("unique", unique)
    }

    /// Returns the elements between `start` and `stop`, keeping the kind.
    ///
    /// Bounds follow slicing rules: negative bounds count from the end and
    /// out-of-range bounds are clamped.
    pub fn slice(&self, start: Option<i64>, stop: Option<i64>) -> Seq {
        let bounds = slice_bounds(self.len(), start, stop);
        self.derive(self.items.slice(bounds))
    }

    /// Returns a sequence without the element at `index`.
    ///
    /// Negative indices count from the end. Deleting from a range converts it
    /// through the range coercion first.
    pub fn delete(&self, index: i64) -> Result<Seq> {
        let len = self.len();
        let position = resolve_index(len, index).ok_or_else(|| {
            tracing::debug!(index, len, "delete index out of range");
            SeqError::IndexOutOfRange { index, len }
        })?;

        let mut values = self.items.to_values();
        values.remove(position);
        if let Items::Range(_) = self.items {
            return Ok(self.derive(self.range_coercion.coerce(values)?));
        }
        Ok(self.rebuild("delete", values))
    }

    /// Appends the elements of `other`.
    ///
    /// Containers of the same kind concatenate directly. Otherwise `other` is
    /// converted into this sequence's kind, or into the range coercion when
    /// this sequence is a range; elements that cannot be converted are a
    /// [`SeqError::Conversion`].
    pub fn concat(&self, other: impl Into<Items>) -> Result<Seq> {
        let other: Items = other.into();
        let items = match (&self.items, other) {
            (Items::List(left), Items::List(right)) => {
                Items::List(left.iter().cloned().chain(right).collect())
            }
            (Items::Tuple(left), Items::Tuple(right)) => {
                Items::Tuple(left.iter().cloned().chain(right.into_vec()).collect())
            }
            (Items::Bytes(left), Items::Bytes(right)) => {
                Items::Bytes([&left[..], &right[..]].concat().into_boxed_slice())
            }
            (Items::ByteArray(left), Items::ByteArray(right)) => {
                Items::ByteArray([left.as_slice(), right.as_slice()].concat())
            }
            (Items::Text(left), Items::Text(right)) => Items::Text(format!("{}{}", left, right)),
            (left, right) => {
                let coercion = Coercion::for_kind(left.kind()).unwrap_or(self.range_coercion);
                let mut values = left.to_values();
                values.extend(right.into_values());
                coercion.coerce(values)?
            }
        };
        Ok(self.derive(items))
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Returns the element at `index`; negative indices count from the end.
    pub fn get(&self, index: i64) -> Option<Value> {
        resolve_index(self.len(), index).and_then(|position| self.items.get(position))
    }

    pub fn first(&self) -> Option<Value> {
        self.items.iter().next()
    }

    pub fn last(&self) -> Option<Value> {
        self.items.iter().next_back()
    }

    /// Returns the first element `predicate` accepts.
    pub fn find<F>(&self, mut predicate: F) -> Option<Value>
    where
        F: FnMut(&Value) -> bool,
    {
        self.items.iter().find(|value| predicate(value))
    }

    /// Like [`Seq::find`], also passing each element's index and the container.
    pub fn find_indexed<F>(&self, mut predicate: F) -> Option<Value>
    where
        F: FnMut(&Value, usize, &Items) -> bool,
    {
        self.items
            .iter()
            .enumerate()
            .find(|(index, value)| predicate(value, *index, &self.items))
            .map(|(_, value)| value)
    }

    /// Counts occurrences of `item`.
    ///
    /// Text and byte sequences count non-overlapping sub-sequences, so
    /// `item` must be a string for text and bytes or a byte-sized integer
    /// for byte sequences.
    ///
    /// Elements match by [`Value`] equality, which never crosses variants:
    /// `count(1)` skips `1.0` and `true`, and a range never counts a bool.
    pub fn count(&self, item: impl Into<Value>) -> Result<usize> {
        self.count_within(&item.into(), None, None)
    }

    /// Counts occurrences of `item` between `start` and `end`.
    ///
    /// Only text and byte sequences accept bounds.
    pub fn count_range(&self, item: impl Into<Value>, start: i64, end: Option<i64>) -> Result<usize> {
        let kind = self.kind();
        if !kind.supports_count_bounds() {
            return Err(SeqError::invalid_argument(
                "count",
                format!("start/end bounds are not supported for {} sequences", kind),
            ));
        }
        self.count_within(&item.into(), Some(start), end)
    }

    fn count_within(&self, item: &Value, start: Option<i64>, end: Option<i64>) -> Result<usize> {
        let count = match &self.items {
            Items::List(values) => values.iter().filter(|value| *value == item).count(),
            Items::Tuple(values) => values.iter().filter(|value| *value == item).count(),
            Items::Bytes(bytes) => count_bytes(bytes, item, start, end)?,
            Items::ByteArray(bytes) => count_bytes(bytes, item, start, end)?,
            Items::Text(text) => {
                let needle = text_needle("count", item)?;
                let chars: Vec<char> = text.chars().collect();
                window(chars.len(), start, end)
                    .map_or(0, |bounds| count_subslice(&chars[bounds], &needle))
            }
            Items::Range(range) => match item {
                Value::Int(n) if range.contains(*n) => 1,
                _ => 0,
            },
        };
        Ok(count)
    }

    /// Returns the position of the first occurrence of `item`.
    ///
    /// Text and byte sequences search for sub-sequences.
    ///
    /// Elements match by [`Value`] equality, so `index(1)` does not find
    /// `1.0` or `true`.
    pub fn index(&self, item: impl Into<Value>) -> Result<usize> {
        self.index_within(&item.into(), None, None)
    }

    /// Returns the position of the first occurrence of `item` between
    /// `start` and `stop`. Ranges do not accept bounds.
    pub fn index_range(&self, item: impl Into<Value>, start: i64, stop: Option<i64>) -> Result<usize> {
        let kind = self.kind();
        if !kind.supports_index_bounds() {
            return Err(SeqError::invalid_argument(
                "index",
                format!("start/stop bounds are not supported for {} sequences", kind),
            ));
        }
        self.index_within(&item.into(), Some(start), stop)
    }

    fn index_within(&self, item: &Value, start: Option<i64>, stop: Option<i64>) -> Result<usize> {
        let found = match &self.items {
            Items::List(values) => position_within(values, item, start, stop),
            Items::Tuple(values) => position_within(values, item, start, stop),
            Items::Bytes(bytes) => find_bytes(bytes, item, start, stop)?,
            Items::ByteArray(bytes) => find_bytes(bytes, item, start, stop)?,
            Items::Text(text) => {
                let needle = text_needle("index", item)?;
                let chars: Vec<char> = text.chars().collect();
                find_within(&chars, &needle, start, stop)
            }
            Items::Range(range) => item.as_int().and_then(|n| range.position(n)),
        };
        found.ok_or_else(|| {
            let item = item.repr();
            tracing::debug!(%item, "index lookup missed");
            SeqError::NotFound { item }
        })
    }

    // ========================================================================
    // Folding
    // ========================================================================

    /// Folds the sequence into a single value.
    ///
    /// Without `initial`, the first element seeds the accumulator and folding
    /// starts at the second. An empty sequence without `initial` is a
    /// [`SeqError::EmptySequence`].
    pub fn reduce<F>(&self, initial: Option<Value>, mut f: F) -> Result<Value>
    where
        F: FnMut(Value, &Value) -> Value,
    {
        self.reduce_indexed(initial, |accumulator, value, _, _| f(accumulator, value))
    }

    /// Like [`Seq::reduce`], also passing each element's index and the container.
    pub fn reduce_indexed<F>(&self, initial: Option<Value>, mut f: F) -> Result<Value>
    where
        F: FnMut(Value, &Value, usize, &Items) -> Value,
    {
        let mut elements = self.items.iter().enumerate();
        let mut accumulator = match initial {
            Some(initial) => initial,
            None => match elements.next() {
                Some((_, first)) => first,
                None => {
                    tracing::debug!("reduce of an empty sequence without an initial value");
                    return Err(SeqError::EmptySequence { op: "reduce" });
                }
            },
        };
        for (index, value) in elements {
            accumulator = f(accumulator, &value, index, &self.items);
        }
        Ok(accumulator)
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Joins the string renderings of the elements with `separator`.
    pub fn join_into_str(&self, separator: Option<&str>) -> String {
        self.items
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(separator.unwrap_or(""))
    }

    /// Returns the elements as a list.
    pub fn to_list(&self) -> Vec<Value> {
        self.items.to_values()
    }

    /// Returns the elements as a tuple.
    pub fn to_tuple(&self) -> Box<[Value]> {
        self.items.to_values().into_boxed_slice()
    }

    /// Renders the sequence as text.
    ///
    /// Text is returned as is; other kinds join the rendering of each
    /// element, which must be a scalar.
    pub fn to_str(&self) -> Result<String> {
        if let Items::Text(text) = &self.items {
            return Ok(text.clone());
        }
        let mut out = String::new();
        for value in self.items.iter() {
            if !value.is_scalar() {
                return Err(SeqError::conversion(value.repr(), "str"));
            }
            out.push_str(&value.to_string());
        }
        Ok(out)
    }

    /// Returns the UTF-8 encoding of [`Seq::to_str`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_str().map(String::into_bytes)
    }

    /// Serializes the wrapped container as JSON.
    ///
    /// Separators are spaced and non-ASCII characters escaped, so a list of
    /// integers renders as `[1, 0, 0, 1]`. Bytes render as their quoted
    /// `b'...'` form.
    pub fn to_json(&self) -> Result<String> {
        json::to_string(&self.items)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Removes every element in place, keeping the kind.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn derive(&self, items: Items) -> Seq {
        Seq {
            items,
            range_coercion: self.range_coercion,
        }
    }

    // Packs operation results back into a container, preferring the source
    // kind, then the range coercion for ranges, then a list.
    fn rebuild(&self, op: &'static str, values: Vec<Value>) -> Seq {
        let source = self.kind();
        let rebuilt = match source {
            Kind::Range if self.range_coercion.accepts(&values) => {
                Ok(self.range_coercion.coerce_unchecked(values))
            }
            Kind::Range => Err(values),
            kind => Items::rebuild(kind, values),
        };
        let items = rebuilt.unwrap_or_else(|values| {
            tracing::debug!(op, kind = %source, "result does not fit the source kind, using a list");
            Items::List(values)
        });
        self.derive(items)
    }
}

fn text_needle(op: &'static str, item: &Value) -> Result<Vec<char>> {
    match item {
        Value::Str(s) => Ok(s.chars().collect()),
        other => Err(SeqError::invalid_argument(
            op,
            format!("expected a str to search text, got {}", other.type_name()),
        )),
    }
}

fn byte_needle(op: &'static str, item: &Value) -> Result<Vec<u8>> {
    match item {
        Value::Bytes(bytes) => Ok(bytes.clone()),
        Value::Int(n) => to_byte(item).map(|b| vec![b]).ok_or_else(|| {
            SeqError::invalid_argument(op, format!("byte must be in range(0, 256), got {}", n))
        }),
        other => Err(SeqError::invalid_argument(
            op,
            format!("expected bytes or int to search bytes, got {}", other.type_name()),
        )),
    }
}

fn count_bytes(bytes: &[u8], item: &Value, start: Option<i64>, end: Option<i64>) -> Result<usize> {
    let needle = byte_needle("count", item)?;
    Ok(window(bytes.len(), start, end).map_or(0, |bounds| count_subslice(&bytes[bounds], &needle)))
}

fn find_bytes(bytes: &[u8], item: &Value, start: Option<i64>, stop: Option<i64>) -> Result<Option<usize>> {
    let needle = byte_needle("index", item)?;
    Ok(find_within(bytes, &needle, start, stop))
}

fn find_within<T: PartialEq>(haystack: &[T], needle: &[T], start: Option<i64>, stop: Option<i64>) -> Option<usize> {
    let bounds = window(haystack.len(), start, stop)?;
    let offset = bounds.start;
    find_subslice(&haystack[bounds], needle).map(|position| position + offset)
}

fn position_within(values: &[Value], item: &Value, start: Option<i64>, stop: Option<i64>) -> Option<usize> {
    let bounds = window(values.len(), start, stop)?;
    let offset = bounds.start;
    values[bounds]
        .iter()
        .position(|value| value == item)
        .map(|position| position + offset)
}

impl From<Items> for Seq {
    fn from(items: Items) -> Self {
        Seq::new(items)
    }
}

impl PartialEq for Seq {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Seq {}

impl PartialEq<Items> for Seq {
    fn eq(&self, other: &Items) -> bool {
        &self.items == other
    }
}

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items)
    }
}

impl<'a> IntoIterator for &'a Seq {
    type Item = Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: &Value) -> i64 {
        value.as_int().unwrap()
    }

    #[test]
    fn operations_do_not_mutate_the_receiver() {
        let source = seq(vec![3, 1, 3]);
        let _ = source.filter(|v| int(v) > 1);
        let _ = source.map(|v| int(v) * 2);
        let _ = source.deduplicate();
        assert_eq!(source, Items::from(vec![3, 1, 3]));
    }

    #[test]
    fn filter_keeps_text_kind() {
        let vowels = seq("education").filter(|v| "aeiou".contains(v.as_str().unwrap()));
        assert_eq!(vowels, Items::from("euaio"));
    }

    #[test]
    fn map_over_text_falls_back_to_list() {
        let codes = seq("ab").map(|v| v.as_str().unwrap().len() as i64);
        assert_eq!(codes, Items::from(vec![1, 1]));

        let upper = seq("ab").map(|v| v.as_str().unwrap().to_uppercase());
        assert_eq!(upper, Items::from("AB"));
    }

    #[test]
    fn map_over_bytes_keeps_kind_when_in_range() {
        let shifted = seq(b"abc").map(|v| int(v) - 32);
        assert_eq!(shifted, Items::from(b"ABC"));

        let widened = seq(b"ab").map(|v| int(v) * 10);
        assert_eq!(widened.kind(), Kind::List);
    }

    #[test]
    fn range_results_use_coercion() {
        let evens = seq(0..6).filter(|v| int(v) % 2 == 0);
        assert_eq!(evens, Items::tuple([0, 2, 4]));

        let text = Seq::builder(0..3)
            .coerce_range_into(Coercion::Text)
            .build()
            .map(|v| int(v) + 1);
        assert_eq!(text, Items::from("123"));
    }

    #[test]
    fn range_coercion_falls_back_to_list() {
        let negative = Seq::builder(0..3)
            .coerce_range_into(Coercion::Bytes)
            .build()
            .map(|v| -int(v));
        assert_eq!(negative, Items::from(vec![0, -1, -2]));
    }

    #[test]
    fn derived_sequences_keep_configuration() {
        let source = Seq::builder(0..4).coerce_range_into(Coercion::List).build();
        let derived = source.slice(Some(1), None);
        assert_eq!(derived.range_coercion(), Coercion::List);
        assert_eq!(derived, Items::from(1..4));
    }

    #[test]
    fn deduplicate_collapses_runs_only() {
        assert_eq!(
            seq(vec![1, 1, 2, 1, 1]).deduplicate(),
            Items::from(vec![1, 2, 1])
        );
        assert_eq!(seq("aabbbc").deduplicate(), Items::from("abc"));
        assert_eq!(seq(0..5).deduplicate(), Items::from(0..5));
    }

    #[test]
    fn duplicates_are_listed_once() {
        let dups = seq(vec![1, 2, 1, 3, 1, 2]).duplicates();
        assert_eq!(dups, Items::from(vec![1, 2]));
        assert_eq!(seq("hello").duplicates(), Items::from(vec!["l"]));
    }

    #[test]
    fn unique_keeps_single_occurrences() {
        assert_eq!(seq(vec![1, 2, 1, 3]).unique(), Items::from(vec![2, 3]));
        assert_eq!(seq("hello").unique(), Items::from("heo"));
    }

    #[test]
    fn count_with_bounds() {
        assert_eq!(seq(b"123455555").count_range(b"5", 5, None).unwrap(), 4);
        assert_eq!(seq("banana").count("an").unwrap(), 2);
        assert_eq!(seq("banana").count_range("a", 2, Some(-1)).unwrap(), 1);
        assert_eq!(seq(vec![1, 2, 1]).count(1).unwrap(), 2);
    }

    #[test]
    fn count_and_index_never_match_across_variants() {
        let mixed = seq(vec![Value::Int(1), Value::Float(1.0), Value::Bool(true)]);
        assert_eq!(mixed.count(1).unwrap(), 1);
        assert_eq!(mixed.count(1.0).unwrap(), 1);
        assert_eq!(mixed.index(true).unwrap(), 2);
        assert_eq!(seq(0..5).count(true).unwrap(), 0);
        assert!(seq(0..5).index(1.0).is_err());
    }

    #[test]
    fn count_rejects_bounds_on_lists() {
        let err = seq(vec![1, 2]).count_range(1, 0, None).unwrap_err();
        assert!(matches!(err, SeqError::InvalidArgument { op: "count", .. }));
    }

    #[test]
    fn count_rejects_mismatched_needles() {
        assert!(seq("abc").count(1).is_err());
        assert!(seq(b"abc").count("a").is_err());
        assert!(seq(b"abc").count(300).is_err());
        assert_eq!(seq(b"abc").count(97).unwrap(), 1);
    }

    #[test]
    fn index_searches_windows() {
        assert_eq!(seq(vec![1, 2, 3, 2]).index(2).unwrap(), 1);
        assert_eq!(seq(vec![1, 2, 3, 2]).index_range(2, 2, None).unwrap(), 3);
        assert_eq!(seq("hello").index("ll").unwrap(), 2);
        assert_eq!(seq(b"hello").index_range(b"l", -2, None).unwrap(), 3);
        assert_eq!(seq(Items::range(0, 20, 2).unwrap()).index(6).unwrap(), 3);
    }

    #[test]
    fn index_reports_missing_items() {
        let err = seq(vec![1, 2]).index(5).unwrap_err();
        assert!(matches!(err, SeqError::NotFound { ref item } if item == "5"));
        assert_eq!(err.to_string(), "5 is not in the sequence");

        let err = seq("abc").index("z").unwrap_err();
        assert_eq!(err.to_string(), "'z' is not in the sequence");
    }

    #[test]
    fn index_rejects_bounds_on_ranges() {
        let err = seq(0..5).index_range(1, 0, None).unwrap_err();
        assert!(matches!(err, SeqError::InvalidArgument { op: "index", .. }));
    }

    #[test]
    fn reduce_seeds_from_first_element() {
        let sum = seq(vec![1, 1, 1, 1, 1])
            .reduce(None, |acc, v| Value::Int(int(&acc) + int(v)))
            .unwrap();
        assert_eq!(sum, Value::Int(5));

        let with_initial = seq(vec![1, 1, 1, 1, 1])
            .reduce(Some(Value::Int(10)), |acc, v| Value::Int(int(&acc) + int(v)))
            .unwrap();
        assert_eq!(with_initial, Value::Int(15));
    }

    #[test]
    fn reduce_indexed_starts_at_second_index() {
        let mut seen = Vec::new();
        seq(vec![5, 6, 7])
            .reduce_indexed(None, |acc, _, index, _| {
                seen.push(index);
                acc
            })
            .unwrap();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn reduce_of_empty_sequence() {
        let err = seq(Vec::<i64>::new())
            .reduce(None, |acc, _| acc)
            .unwrap_err();
        assert!(matches!(err, SeqError::EmptySequence { op: "reduce" }));
        assert_eq!(
            seq(Vec::<i64>::new()).reduce(Some(Value::Int(7)), |acc, _| acc).unwrap(),
            Value::Int(7)
        );
    }

    #[test]
    fn indexed_callbacks_see_container() {
        let source = seq(vec![10, 20, 30]);
        let all = source.all_indexed(|v, i, items| items.get(i) == Some(v.clone()));
        assert!(all);
        let later = source.filter_indexed(|_, i, items| i + 1 < items.len());
        assert_eq!(later, Items::from(vec![10, 20]));
        let found = source.find_indexed(|_, i, _| i == 2);
        assert_eq!(found, Some(Value::Int(30)));
    }

    #[test]
    fn conversions_to_text() {
        assert_eq!(seq(vec![1, 2, 3]).to_str().unwrap(), "123");
        assert_eq!(seq(b"Hi").to_bytes().unwrap(), b"72105".to_vec());
        assert_eq!(seq("Hi").to_bytes().unwrap(), b"Hi".to_vec());
        assert!(seq(vec![Value::from(vec![1])]).to_str().is_err());
        assert_eq!(seq(vec!["a", "b"]).join_into_str(Some(", ")), "a, b");
    }

    #[test]
    fn delete_returns_new_sequence() {
        let source = seq(vec![1, 2, 3]);
        assert_eq!(source.delete(-1).unwrap(), Items::from(vec![1, 2]));
        assert_eq!(source.len(), 3);
        assert!(matches!(
            source.delete(3),
            Err(SeqError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(seq(0..4).delete(0).unwrap(), Items::tuple([1, 2, 3]));
    }

    #[test]
    fn concat_converts_into_receiver_kind() {
        assert_eq!(
            seq(vec![1]).concat(vec![2, 3]).unwrap(),
            Items::from(vec![1, 2, 3])
        );
        assert_eq!(seq("ab").concat(vec![1, 2]).unwrap(), Items::from("ab12"));
        assert_eq!(seq(0..2).concat(2..4).unwrap(), Items::tuple([0, 1, 2, 3]));
        assert!(matches!(
            seq(b"ab").concat("cd"),
            Err(SeqError::Conversion { target: "bytes", .. })
        ));
    }

    #[test]
    fn clear_keeps_kind() {
        let mut text = seq("abc");
        text.clear();
        assert_eq!(text.kind(), Kind::Text);
        assert!(text.is_empty());
    }
}
