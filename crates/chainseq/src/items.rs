//! The container held by a sequence.
//!
//! [`Items`] is a closed tagged variant over the supported container kinds.
//! Whatever the variant, elements are viewed as [`Value`]s: bytes and ranges
//! yield integers, text yields one-character strings.

use std::fmt;
use std::ops::Range;

use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::kind::{to_byte, Kind};
use crate::range::{IntRange, RangeIter};
use crate::search::find_subslice;
use crate::value::{bytes_repr, write_elements, Value};

/// An ordered container of one of the supported kinds.
///
/// # Example
///
/// ```
/// use chainseq::{Items, Kind, Value};
///
/// let text = Items::from("Hi!");
/// assert_eq!(text.kind(), Kind::Text);
/// assert_eq!(text.len(), 3);
/// assert_eq!(text.get(1), Some(Value::from("i")));
///
/// let bytes = Items::from(b"Hi!");
/// assert_eq!(bytes.get(0), Some(Value::Int(72)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Items {
    /// Mutable ordered sequence.
    List(Vec<Value>),
    /// Immutable ordered sequence.
    Tuple(Box<[Value]>),
    /// Immutable bytes.
    Bytes(Box<[u8]>),
    /// Mutable bytes.
    ByteArray(Vec<u8>),
    /// Text.
    Text(String),
    /// Integer range.
    Range(IntRange),
}

impl Items {
    /// Builds a tuple container.
    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Items::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds an immutable bytes container.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Items::Bytes(bytes.into().into_boxed_slice())
    }

    /// Builds a mutable byte array container.
    pub fn bytearray(bytes: impl Into<Vec<u8>>) -> Self {
        Items::ByteArray(bytes.into())
    }

    /// Builds a stepped range container. Fails if `step` is zero.
    pub fn range(start: i64, stop: i64, step: i64) -> Result<Self> {
        IntRange::new(start, stop, step).map(Items::Range)
    }

    /// Returns the kind of this container.
    pub fn kind(&self) -> Kind {
        match self {
            Items::List(_) => Kind::List,
            Items::Tuple(_) => Kind::Tuple,
            Items::Bytes(_) => Kind::Bytes,
            Items::ByteArray(_) => Kind::ByteArray,
            Items::Text(_) => Kind::Text,
            Items::Range(_) => Kind::Range,
        }
    }

    /// Returns the number of elements (characters, for text).
    pub fn len(&self) -> usize {
        match self {
            Items::List(values) => values.len(),
            Items::Tuple(values) => values.len(),
            Items::Bytes(bytes) => bytes.len(),
            Items::ByteArray(bytes) => bytes.len(),
            Items::Text(text) => text.chars().count(),
            Items::Range(range) => range.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Items::Text(text) => text.is_empty(),
            other => other.len() == 0,
        }
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Items::List(values) => values.get(index).cloned(),
            Items::Tuple(values) => values.get(index).cloned(),
            Items::Bytes(bytes) => bytes.get(index).map(|b| Value::Int(*b as i64)),
            Items::ByteArray(bytes) => bytes.get(index).map(|b| Value::Int(*b as i64)),
            Items::Text(text) => text.chars().nth(index).map(Value::from),
            Items::Range(range) => range.get(index).map(Value::Int),
        }
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> Iter<'_> {
        let inner = match self {
            Items::List(values) => IterInner::Values(values.iter()),
            Items::Tuple(values) => IterInner::Values(values.iter()),
            Items::Bytes(bytes) => IterInner::Bytes(bytes.iter()),
            Items::ByteArray(bytes) => IterInner::Bytes(bytes.iter()),
            Items::Text(text) => IterInner::Text(text.chars()),
            Items::Range(range) => IterInner::Range(range.iter()),
        };
        Iter { inner }
    }

    /// Copies the elements into a vector.
    pub fn to_values(&self) -> Vec<Value> {
        self.iter().collect()
    }

    /// Consumes the container, returning its elements.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Items::List(values) => values,
            Items::Tuple(values) => values.into_vec(),
            other => other.to_values(),
        }
    }

    /// Returns `true` if `item` occurs in the container.
    ///
    /// Text and byte containers match sub-sequences: `"foo"` is in
    /// `"foo bar"`, and so is `b"oo"` in `b"foo"`.
    pub fn contains(&self, item: &Value) -> bool {
        match (self, item) {
            (Items::List(values), _) => values.contains(item),
            (Items::Tuple(values), _) => values.contains(item),
            (Items::Text(text), Value::Str(needle)) => text.contains(needle.as_str()),
            (Items::Bytes(bytes), _) => bytes_contain(bytes, item),
            (Items::ByteArray(bytes), _) => bytes_contain(bytes, item),
            (Items::Range(range), Value::Int(n)) => range.contains(*n),
            _ => false,
        }
    }

    /// Rebuilds a container of `kind` from `values`.
    ///
    /// Hands `values` back when they cannot be held by that kind: text needs
    /// one-character strings, byte kinds need integers in `0..=255`, and a
    /// range can never be rebuilt from arbitrary values.
    pub fn rebuild(kind: Kind, values: Vec<Value>) -> std::result::Result<Items, Vec<Value>> {
        let is_byte = |value: &Value| to_byte(value).is_some();
        let items = match kind {
            Kind::List => Items::List(values),
            Kind::Tuple => Items::Tuple(values.into_boxed_slice()),
            Kind::Bytes if values.iter().all(is_byte) => {
                Items::Bytes(values.iter().filter_map(to_byte).collect())
            }
            Kind::ByteArray if values.iter().all(is_byte) => {
                Items::ByteArray(values.iter().filter_map(to_byte).collect())
            }
            Kind::Text if values.iter().all(is_single_char) => {
                Items::Text(values.iter().filter_map(Value::as_str).collect())
            }
            _ => return Err(values),
        };
        Ok(items)
    }

    /// Returns the elements at positions `bounds`, keeping the kind.
    pub(crate) fn slice(&self, bounds: Range<usize>) -> Items {
        let Range { start, end } = bounds;
        match self {
            Items::List(values) => Items::List(values[start..end].to_vec()),
            Items::Tuple(values) => Items::Tuple(values[start..end].into()),
            Items::Bytes(bytes) => Items::Bytes(bytes[start..end].into()),
            Items::ByteArray(bytes) => Items::ByteArray(bytes[start..end].to_vec()),
            Items::Text(text) => Items::Text(text.chars().skip(start).take(end - start).collect()),
            Items::Range(range) => Items::Range(range.slice(start, end)),
        }
    }

    /// Removes every element, keeping the kind.
    pub(crate) fn clear(&mut self) {
        match self {
            Items::List(values) => values.clear(),
            Items::Tuple(values) => *values = Box::default(),
            Items::Bytes(bytes) => *bytes = Box::default(),
            Items::ByteArray(bytes) => bytes.clear(),
            Items::Text(text) => text.clear(),
            Items::Range(range) => *range = range.cleared(),
        }
    }
}

fn bytes_contain(bytes: &[u8], item: &Value) -> bool {
    match item {
        Value::Bytes(needle) => find_subslice(bytes, needle).is_some(),
        Value::Int(_) => to_byte(item).is_some_and(|b| bytes.contains(&b)),
        _ => false,
    }
}

fn is_single_char(value: &Value) -> bool {
    value.as_str().is_some_and(|s| {
        let mut chars = s.chars();
        chars.next().is_some() && chars.next().is_none()
    })
}

impl fmt::Display for Items {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Items::List(values) => write_elements(f, "[", "]", values.iter()),
            Items::Tuple(values) if values.len() == 1 => write!(f, "({},)", values[0].repr()),
            Items::Tuple(values) => write_elements(f, "(", ")", values.iter()),
            Items::Bytes(bytes) => f.write_str(&bytes_repr(bytes)),
            Items::ByteArray(bytes) => write!(f, "bytearray({})", bytes_repr(bytes)),
            Items::Text(text) => f.write_str(text),
            Items::Range(range) => write!(f, "{}", range),
        }
    }
}

/// JSON shape of each kind: values as arrays, text as a string, bytes as
/// their quoted `b'...'` rendering, byte arrays and ranges as integer arrays.
impl Serialize for Items {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Items::List(values) => serializer.collect_seq(values.iter()),
            Items::Tuple(values) => serializer.collect_seq(values.iter()),
            Items::Bytes(bytes) => serializer.serialize_str(&bytes_repr(bytes)),
            Items::ByteArray(bytes) => serializer.collect_seq(bytes.iter()),
            Items::Text(text) => serializer.serialize_str(text),
            Items::Range(range) => serializer.collect_seq(range.iter()),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Items {
    fn from(values: Vec<T>) -> Self {
        Items::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Box<[Value]>> for Items {
    fn from(values: Box<[Value]>) -> Self {
        Items::Tuple(values)
    }
}

impl From<&str> for Items {
    fn from(text: &str) -> Self {
        Items::Text(text.to_string())
    }
}

impl From<String> for Items {
    fn from(text: String) -> Self {
        Items::Text(text)
    }
}

impl From<&[u8]> for Items {
    fn from(bytes: &[u8]) -> Self {
        Items::Bytes(bytes.into())
    }
}

impl<const N: usize> From<&[u8; N]> for Items {
    fn from(bytes: &[u8; N]) -> Self {
        Items::Bytes(bytes.as_slice().into())
    }
}

impl From<IntRange> for Items {
    fn from(range: IntRange) -> Self {
        Items::Range(range)
    }
}

impl From<std::ops::Range<i64>> for Items {
    fn from(range: std::ops::Range<i64>) -> Self {
        Items::Range(range.into())
    }
}

impl From<std::ops::Range<i32>> for Items {
    fn from(range: std::ops::Range<i32>) -> Self {
        Items::Range(range.into())
    }
}

impl<'a> IntoIterator for &'a Items {
    type Item = Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Double-ended iterator over the elements of an [`Items`] container.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: IterInner<'a>,
}

#[derive(Debug, Clone)]
enum IterInner<'a> {
    Values(std::slice::Iter<'a, Value>),
    Bytes(std::slice::Iter<'a, u8>),
    Text(std::str::Chars<'a>),
    Range(RangeIter),
}

impl Iterator for Iter<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match &mut self.inner {
            IterInner::Values(it) => it.next().cloned(),
            IterInner::Bytes(it) => it.next().map(|b| Value::Int(*b as i64)),
            IterInner::Text(it) => it.next().map(Value::from),
            IterInner::Range(it) => it.next().map(Value::Int),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IterInner::Values(it) => it.size_hint(),
            IterInner::Bytes(it) => it.size_hint(),
            IterInner::Text(it) => it.size_hint(),
            IterInner::Range(it) => it.size_hint(),
        }
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Value> {
        match &mut self.inner {
            IterInner::Values(it) => it.next_back().cloned(),
            IterInner::Bytes(it) => it.next_back().map(|b| Value::Int(*b as i64)),
            IterInner::Text(it) => it.next_back().map(Value::from),
            IterInner::Range(it) => it.next_back().map(Value::Int),
        }
    }
}
