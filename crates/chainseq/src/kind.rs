//! Container kinds and their capabilities.
//!
//! [`Kind`] names the closed set of containers a [`Seq`](crate::Seq) can wrap.
//! Not every operation argument is valid for every kind; the capability
//! methods below are checked at operation entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqError};
use crate::items::Items;
use crate::value::Value;

/// The kind of container held by a sequence.
///
/// Capabilities by kind:
/// - **Search bounds on `count`**: `Bytes`, `ByteArray`, `Text`
/// - **Search bounds on `index`**: every kind except `Range`
/// - **Mutable**: `List`, `ByteArray`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Mutable ordered sequence of values.
    List,
    /// Immutable ordered sequence of values.
    Tuple,
    /// Immutable byte sequence.
    Bytes,
    /// Mutable byte sequence.
    ByteArray,
    /// Text, viewed as a sequence of one-character strings.
    Text,
    /// Integer arithmetic progression.
    Range,
}

impl Kind {
    /// Returns `true` if `count` accepts start/end bounds for this kind.
    pub fn supports_count_bounds(self) -> bool {
        matches!(self, Kind::Bytes | Kind::ByteArray | Kind::Text)
    }

    /// Returns `true` if `index` accepts start/stop bounds for this kind.
    pub fn supports_index_bounds(self) -> bool {
        !matches!(self, Kind::Range)
    }

    /// Returns `true` for `Bytes` and `ByteArray`.
    pub fn is_byte_like(self) -> bool {
        matches!(self, Kind::Bytes | Kind::ByteArray)
    }

    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::List => "list",
            Kind::Tuple => "tuple",
            Kind::Bytes => "bytes",
            Kind::ByteArray => "bytearray",
            Kind::Text => "str",
            Kind::Range => "range",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind a range is converted into when a result can no longer be a range.
///
/// Ranges cannot hold arbitrary elements, so filtering, mapping or
/// concatenating one produces a container of this kind instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coercion {
    /// Coerce into a byte array.
    ByteArray,
    /// Coerce into bytes.
    Bytes,
    /// Coerce into a list.
    List,
    /// Coerce into text by joining element renderings.
    #[serde(rename = "str")]
    Text,
    /// Coerce into a tuple.
    #[default]
    Tuple,
}

impl Coercion {
    /// Returns the container kind produced by this coercion.
    pub fn kind(self) -> Kind {
        match self {
            Coercion::ByteArray => Kind::ByteArray,
            Coercion::Bytes => Kind::Bytes,
            Coercion::List => Kind::List,
            Coercion::Text => Kind::Text,
            Coercion::Tuple => Kind::Tuple,
        }
    }

    /// Returns the coercion producing `kind`, if `kind` is coercible.
    pub fn for_kind(kind: Kind) -> Option<Self> {
        match kind {
            Kind::ByteArray => Some(Coercion::ByteArray),
            Kind::Bytes => Some(Coercion::Bytes),
            Kind::List => Some(Coercion::List),
            Kind::Text => Some(Coercion::Text),
            Kind::Tuple => Some(Coercion::Tuple),
            Kind::Range => None,
        }
    }

    /// Returns `true` if every value can be coerced into the target kind.
    pub fn accepts(self, values: &[Value]) -> bool {
        self.first_rejected(values).is_none()
    }

    /// Converts `values` into a container of the target kind.
    ///
    /// Text joins the rendering of each scalar element. Byte targets require
    /// integers in `0..=255`.
    pub fn coerce(self, values: Vec<Value>) -> Result<Items> {
        if let Some(rejected) = self.first_rejected(&values) {
            return Err(SeqError::conversion(rejected.repr(), self.kind().as_str()));
        }
        Ok(self.coerce_unchecked(values))
    }

    fn first_rejected(self, values: &[Value]) -> Option<&Value> {
        match self.kind() {
            kind if kind.is_byte_like() => values.iter().find(|value| to_byte(value).is_none()),
            Kind::Text => values.iter().find(|value| !value.is_scalar()),
            _ => None,
        }
    }

    // Callers must have checked `accepts` first.
    pub(crate) fn coerce_unchecked(self, values: Vec<Value>) -> Items {
        match self {
            Coercion::List => Items::List(values),
            Coercion::Tuple => Items::Tuple(values.into_boxed_slice()),
            Coercion::Bytes => Items::Bytes(values.iter().filter_map(to_byte).collect()),
            Coercion::ByteArray => Items::ByteArray(values.iter().filter_map(to_byte).collect()),
            Coercion::Text => Items::Text(values.iter().map(Value::to_string).collect()),
        }
    }
}

pub(crate) fn to_byte(value: &Value) -> Option<u8> {
    value.as_int().and_then(|n| u8::try_from(n).ok())
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind().as_str())
    }
}

impl FromStr for Coercion {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bytearray" => Ok(Coercion::ByteArray),
            "bytes" => Ok(Coercion::Bytes),
            "list" => Ok(Coercion::List),
            "str" => Ok(Coercion::Text),
            "tuple" => Ok(Coercion::Tuple),
            other => Err(SeqError::invalid_argument(
                "coerce_range_into",
                format!(
                    "expected one of \"bytearray\", \"bytes\", \"list\", \"str\" or \"tuple\", got {:?}",
                    other
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_bounds_capability() {
        assert!(Kind::Text.supports_count_bounds());
        assert!(Kind::Bytes.supports_count_bounds());
        assert!(Kind::ByteArray.supports_count_bounds());
        assert!(!Kind::List.supports_count_bounds());
        assert!(!Kind::Tuple.supports_count_bounds());
        assert!(!Kind::Range.supports_count_bounds());
    }

    #[test]
    fn index_bounds_capability() {
        assert!(Kind::List.supports_index_bounds());
        assert!(Kind::Text.supports_index_bounds());
        assert!(!Kind::Range.supports_index_bounds());
    }

    #[test]
    fn byte_like_coercions_need_byte_integers() {
        let values = [Value::Int(1), Value::from("x")];
        for coercion in [Coercion::Bytes, Coercion::ByteArray] {
            assert!(coercion.kind().is_byte_like());
            assert!(!coercion.accepts(&values));
            assert!(coercion.accepts(&[Value::Int(0), Value::Int(255)]));
        }
        assert!(!Kind::Text.is_byte_like());
        assert!(Coercion::Text.accepts(&values));
        assert!(Coercion::List.accepts(&values));
    }

    #[test]
    fn coercion_parses_names() {
        assert_eq!("tuple".parse::<Coercion>().unwrap(), Coercion::Tuple);
        assert_eq!("str".parse::<Coercion>().unwrap(), Coercion::Text);
        assert_eq!("bytearray".parse::<Coercion>().unwrap(), Coercion::ByteArray);
        assert!(matches!(
            "range".parse::<Coercion>(),
            Err(SeqError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn coercion_round_trips_through_serde() {
        let json = serde_json::to_string(&Coercion::Text).unwrap();
        assert_eq!(json, "\"str\"");
        let parsed: Coercion = serde_json::from_str("\"bytearray\"").unwrap();
        assert_eq!(parsed, Coercion::ByteArray);
    }

    #[test]
    fn coerce_into_text_joins_renderings() {
        let items = Coercion::Text
            .coerce(vec![Value::Int(1), Value::from("a"), Value::Float(2.5)])
            .unwrap();
        assert_eq!(items, Items::Text("1a2.5".to_string()));
    }

    #[test]
    fn coerce_into_bytes_rejects_out_of_range() {
        let err = Coercion::Bytes.coerce(vec![Value::Int(256)]).unwrap_err();
        assert!(matches!(err, SeqError::Conversion { target: "bytes", .. }));

        let ok = Coercion::ByteArray.coerce(vec![Value::Int(0), Value::Int(255)]).unwrap();
        assert_eq!(ok, Items::ByteArray(vec![0, 255]));
    }
}
