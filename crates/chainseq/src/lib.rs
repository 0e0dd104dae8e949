//! Chainseq - Chainable operations over ordered collections.
//!
//! Chainseq wraps a list, tuple, byte string, byte array, text or integer
//! range in a [`Seq`] and exposes a fluent API over it. It supports:
//!
//! - Predicates: `all`, `any`, `contains`, `find`
//! - Transformations: `filter`, `map`, `deduplicate`, `unique`, `duplicates`
//! - Searching with bounds: `count`, `count_range`, `index`, `index_range`
//! - Folding with `reduce`
//! - Conversions to lists, tuples, text, bytes and JSON
//!
//! # Quick Start
//!
//! ```rust
//! use chainseq::{seq, Items, Value};
//!
//! let words = seq(vec!["foo", "bar", "foo", "baz"]);
//!
//! assert_eq!(words.duplicates().value(), &Items::from(vec!["foo"]));
//! assert_eq!(words.unique().to_json().unwrap(), r#"["bar", "baz"]"#);
//! assert_eq!(words.index("baz").unwrap(), 3);
//! assert!(words.all(|w| w.as_str().is_some_and(|s| s.len() == 3)));
//!
//! let total = seq(vec![1, 2, 3])
//!     .reduce(Some(Value::Int(10)), |acc, v| {
//!         Value::Int(acc.as_int().unwrap_or(0) + v.as_int().unwrap_or(0))
//!     })
//!     .unwrap();
//! assert_eq!(total, Value::Int(16));
//! ```
//!
//! # Result Kinds
//!
//! Operations returning a sequence keep the source container's kind when the
//! resulting elements fit it:
//!
//! | Source | Elements | Rebuilt when |
//! |--------|----------|--------------|
//! | list, tuple | any [`Value`] | always |
//! | bytes, bytearray | integers | every element is in `0..=255` |
//! | text | one-character strings | every element is one character |
//! | range | integers | never; converted through the [`Coercion`] |
//!
//! Results that fit neither the source kind nor the range coercion become a
//! list. `duplicates` always returns a list.
//!
//! # Logging
//!
//! Rejected arguments, failed lookups and list fallbacks emit `tracing`
//! debug events. The crate never installs a subscriber.

mod error;
mod items;
mod json;
mod kind;
mod range;
mod search;
mod seq;
mod value;

// Re-export public API
pub use error::{Result, SeqError};
pub use items::{Items, Iter};
pub use json::{to_string as to_json_string, SpacedFormatter};
pub use kind::{Coercion, Kind};
pub use range::{IntRange, RangeIter};
pub use seq::{seq, Seq, SeqBuilder};
pub use value::Value;
