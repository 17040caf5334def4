// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! serde bridge.
//!
//! `serde_json::Value` maps onto the canonical categories directly (objects
//! are mappings, arrays are sequences). Any `Serialize` type can be hashed by
//! going through `serde_json::to_value`; a struct then hashes exactly like a
//! [`Record`](crate::Record) with the same field names and values.
//!
//! Caveat: serde serializes `Vec<u8>` as an array of numbers, so byte
//! buffers hashed this way are sequences, not raw bytes.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::content::ContentHash;
use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::hasher::ContentHasher;
use crate::number::Number;

impl ContentHash for serde_json::Number {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        if let Some(v) = self.as_u64() {
            hasher.hash_number(&Number::from(v))
        } else if let Some(v) = self.as_i64() {
            hasher.hash_number(&Number::from(v))
        } else if let Some(v) = self.as_f64() {
            hasher.hash_number(&Number::from(v))
        } else {
            hasher.hash_text(&self.to_string())
        }
    }
}

impl ContentHash for JsonValue {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        match self {
            JsonValue::Null => hasher.hash_null(),
            JsonValue::String(s) => hasher.hash_text(s),
            JsonValue::Number(n) => n.content_digest(hasher),
            JsonValue::Bool(b) => hasher.hash_bool(*b),
            JsonValue::Object(map) => hasher.hash_map(map),
            JsonValue::Array(items) => hasher.hash_ordered(items),
        }
    }
}

impl ContentHasher {
    /// Hash any `Serialize` value through its `serde_json` data model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] when the value cannot be represented as
    /// JSON (for example a map with non-string keys).
    pub fn hash_serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Digest> {
        let json = serde_json::to_value(value).map_err(Error::Serialize)?;
        Ok(json.content_digest(self))
    }
}
