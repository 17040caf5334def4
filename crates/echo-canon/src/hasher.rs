// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canonicalizing dispatcher.
//!
//! [`ContentHasher`] is the visitor every [`ContentHash`] impl calls into. It
//! has one entry point per semantic category:
//!
//! | category | method | canonical form |
//! |---|---|---|
//! | absence | [`hash_null`](ContentHasher::hash_null) | `zeroed()` |
//! | text | [`hash_text`](ContentHasher::hash_text) | `H(utf8)` |
//! | bytes | [`hash_bytes`](ContentHasher::hash_bytes) | `H(bytes)` |
//! | digest | [`hash_digest`](ContentHasher::hash_digest) | passthrough |
//! | tuple / top level | [`hash`](ContentHasher::hash) | ordered fold |
//! | entry | [`hash_entry`](ContentHasher::hash_entry) | `(key, value)` tuple |
//! | number / char | [`hash_number`](ContentHasher::hash_number) | decimal text |
//! | mapping | [`hash_map`](ContentHasher::hash_map) | key-digest ordered fold |
//! | set | [`hash_unordered`](ContentHasher::hash_unordered) | sorted-digest fold |
//! | sequence | [`hash_ordered`](ContentHasher::hash_ordered) | ordered fold |
//! | record | [`hash_record`](ContentHasher::hash_record) | same as mapping |
//!
//! The result depends only on the logical value: never on addresses, never on
//! iteration order of sets and maps.

use std::collections::BTreeMap;

use tracing::warn;

use crate::content::{ContentHash, Record};
use crate::digest::Digest;
use crate::merkle::MerkleCombiner;
use crate::number::Number;
use crate::primitive::PrimitiveBinding;

/// Field name skipped by record hashing (type metadata, not data).
pub const TYPE_METADATA_FIELD: &str = "class";

/// Type-directed canonical hasher over one [`PrimitiveBinding`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHasher {
    binding: PrimitiveBinding,
}

impl ContentHasher {
    /// Hasher over `binding`.
    pub fn new(binding: PrimitiveBinding) -> Self {
        Self { binding }
    }

    /// The underlying binding.
    pub fn binding(&self) -> &PrimitiveBinding {
        &self.binding
    }

    /// Digest length `L` in bytes.
    pub fn digest_len(&self) -> usize {
        self.binding.digest_len()
    }

    /// Canonical digest of an empty collection.
    pub fn empty(&self) -> Digest {
        self.binding.empty()
    }

    /// Canonical digest of an absent value.
    pub fn zeroed(&self) -> Digest {
        self.binding.zeroed()
    }

    /// Merkle combiner sharing this hasher's binding.
    pub fn merkle(&self) -> MerkleCombiner<'_> {
        MerkleCombiner::new(&self.binding)
    }

    /// Hash any [`ContentHash`] value.
    pub fn hash_value<T: ContentHash + ?Sized>(&self, value: &T) -> Digest {
        value.content_digest(self)
    }

    /// Top-level entry point: hash a fixed list of values as an ordered
    /// sequence. Tuples hash through here.
    pub fn hash(&self, values: &[&dyn ContentHash]) -> Digest {
        self.hash_ordered(values)
    }

    /// Absence.
    pub fn hash_null(&self) -> Digest {
        self.zeroed()
    }

    /// Raw bytes, primitive applied once.
    pub fn hash_bytes(&self, bytes: &[u8]) -> Digest {
        self.binding.digest_bytes(bytes)
    }

    /// UTF-8 text, primitive applied once.
    pub fn hash_text(&self, text: &str) -> Digest {
        self.hash_bytes(text.as_bytes())
    }

    /// Booleans hash as the text `"true"` / `"false"`.
    pub fn hash_bool(&self, value: bool) -> Digest {
        self.hash_text(if value { "true" } else { "false" })
    }

    /// Numbers hash as their canonical decimal text.
    pub fn hash_number(&self, number: &Number) -> Digest {
        self.hash_text(&number.canonical_text())
    }

    /// Characters hash as their code point.
    pub fn hash_char(&self, c: char) -> Digest {
        self.hash_number(&Number::from(c))
    }

    /// A digest of this hasher's family passes through unchanged; a digest
    /// from another primitive, or of another length, is hashed as a raw byte
    /// buffer. Untagged digests (parsed from hex or bytes) belong to the
    /// family when their length matches.
    pub fn hash_digest(&self, digest: &Digest) -> Digest {
        let same_family = digest.len() == self.digest_len()
            && digest
                .primitive()
                .is_none_or(|p| p == self.binding.primitive());
        if same_family {
            *digest
        } else {
            self.hash_bytes(digest.as_bytes())
        }
    }

    /// Big-endian `u32`, primitive applied once. Not canonicalized.
    pub fn hash_u32_raw(&self, value: u32) -> Digest {
        self.hash_bytes(&value.to_be_bytes())
    }

    /// Big-endian `u64`, primitive applied once. Not canonicalized.
    pub fn hash_u64_raw(&self, value: u64) -> Digest {
        self.hash_bytes(&value.to_be_bytes())
    }

    /// Big-endian two's-complement `i32`, primitive applied once.
    pub fn hash_i32_raw(&self, value: i32) -> Digest {
        self.hash_bytes(&value.to_be_bytes())
    }

    /// Big-endian two's-complement `i64`, primitive applied once.
    pub fn hash_i64_raw(&self, value: i64) -> Digest {
        self.hash_bytes(&value.to_be_bytes())
    }

    /// Key/value entry: the two-element tuple `(key, value)`.
    pub fn hash_entry<K, V>(&self, key: &K, value: &V) -> Digest
    where
        K: ContentHash + ?Sized,
        V: ContentHash + ?Sized,
    {
        self.merkle()
            .root(vec![key.content_digest(self), value.content_digest(self)])
    }

    /// Ordered sequence: element digests folded in iteration order.
    pub fn hash_ordered<I>(&self, items: I) -> Digest
    where
        I: IntoIterator,
        I::Item: ContentHash,
    {
        let leaves = items
            .into_iter()
            .map(|item| item.content_digest(self))
            .collect();
        self.merkle().root(leaves)
    }

    /// Unordered collection: element digests sorted, then folded.
    ///
    /// Only the digests are sorted, so elements need not be comparable.
    pub fn hash_unordered<I>(&self, items: I) -> Digest
    where
        I: IntoIterator,
        I::Item: ContentHash,
    {
        let mut leaves: Vec<Digest> = items
            .into_iter()
            .map(|item| item.content_digest(self))
            .collect();
        leaves.sort_unstable();
        self.merkle().root(leaves)
    }

    /// Mapping: entries ordered by key digest, each entry folded as
    /// `combine(key_digest, value_digest)`.
    pub fn hash_map<I, K, V>(&self, entries: I) -> Digest
    where
        I: IntoIterator<Item = (K, V)>,
        K: ContentHash,
        V: ContentHash,
    {
        self.fold_entries(
            entries
                .into_iter()
                .map(|(k, v)| (k.content_digest(self), v.content_digest(self))),
        )
    }

    /// Named fields hashed exactly like a mapping from name (as text) to
    /// value. Fields named [`TYPE_METADATA_FIELD`] are skipped.
    pub fn hash_fields<I, N, V>(&self, fields: I) -> Digest
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: ContentHash,
    {
        self.fold_entries(
            fields
                .into_iter()
                .filter(|(name, _)| name.as_ref() != TYPE_METADATA_FIELD)
                .map(|(name, value)| (self.hash_text(name.as_ref()), value.content_digest(self))),
        )
    }

    /// Structured record, via its [`Record::fields`] enumeration.
    pub fn hash_record(&self, record: &dyn Record) -> Digest {
        self.hash_fields(record.fields())
    }

    fn fold_entries(&self, entries: impl Iterator<Item = (Digest, Digest)>) -> Digest {
        let mut by_key: BTreeMap<Digest, Digest> = BTreeMap::new();
        for (key, value) in entries {
            if by_key.insert(key, value).is_some() {
                warn!(key = %key, "duplicate key digest in mapping; keeping last entry");
            }
        }
        let merkle = self.merkle();
        let leaves = by_key
            .iter()
            .map(|(key, value)| merkle.combine(key, value))
            .collect();
        merkle.root(leaves)
    }
}

impl From<PrimitiveBinding> for ContentHasher {
    fn from(binding: PrimitiveBinding) -> Self {
        Self::new(binding)
    }
}
