// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dynamically typed canonical value.
//!
//! [`Value`] is the closed set of semantic categories the dispatcher
//! recognizes. Use it when the shape of the data is only known at runtime;
//! statically typed data can implement [`ContentHash`] directly.

use crate::content::ContentHash;
use crate::digest::Digest;
use crate::hasher::ContentHasher;
use crate::number::{Decimal, Number};

/// One canonical value.
///
/// Variants are listed in dispatch precedence order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit absence; hashes to `zeroed()`.
    Null,
    /// UTF-8 text.
    Text(String),
    /// Raw byte buffer.
    Bytes(Vec<u8>),
    /// Pre-computed digest; passes through when its length matches.
    Digest(Digest),
    /// Fixed-arity heterogeneous tuple.
    Tuple(Vec<Value>),
    /// Key/value entry, hashed as the tuple `(key, value)`.
    Entry(Box<(Value, Value)>),
    /// Number of any width.
    Number(Number),
    /// Single character, hashed as its code point.
    Char(char),
    /// Boolean, hashed as the text `"true"` / `"false"`.
    Bool(bool),
    /// Key/value mapping; entry order is irrelevant.
    Map(Vec<(Value, Value)>),
    /// Order-insensitive collection; element order is irrelevant.
    Set(Vec<Value>),
    /// Ordered sequence.
    Seq(Vec<Value>),
    /// Structured record as named fields.
    Record(Vec<(String, Value)>),
}

impl Value {
    /// Key/value entry.
    pub fn entry(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self::Entry(Box::new((key.into(), value.into())))
    }

    /// Raw byte buffer.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Tuple from its components.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Ordered sequence.
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Order-insensitive collection.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Mapping.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Structured record.
    pub fn record<I, N, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<Value>,
    {
        Self::Record(
            fields
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }

    /// `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl ContentHash for Value {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        match self {
            Self::Null => hasher.hash_null(),
            Self::Text(text) => hasher.hash_text(text),
            Self::Bytes(bytes) => hasher.hash_bytes(bytes),
            Self::Digest(digest) => hasher.hash_digest(digest),
            Self::Tuple(items) | Self::Seq(items) => hasher.hash_ordered(items),
            Self::Entry(entry) => hasher.hash_entry(&entry.0, &entry.1),
            Self::Number(number) => hasher.hash_number(number),
            Self::Char(c) => hasher.hash_char(*c),
            Self::Bool(b) => hasher.hash_bool(*b),
            Self::Map(entries) => hasher.hash_map(entries.iter().map(|(k, v)| (k, v))),
            Self::Set(items) => hasher.hash_unordered(items),
            Self::Record(fields) => {
                hasher.hash_fields(fields.iter().map(|(name, value)| (name.as_str(), value)))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<Digest> for Value {
    fn from(d: Digest) -> Self {
        Self::Digest(d)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Number(Number::Decimal(d))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::seq(items)
    }
}

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Number(Number::from(v))
                }
            }
        )*
    };
}

value_from_number!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);
