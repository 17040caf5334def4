// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-length digest value.
//!
//! A [`Digest`] is an immutable byte string of exactly `L` bytes, where `L` is
//! fixed by the primitive that produced it (32 for SHA-256/BLAKE3, 64 for
//! SHA-512). Ordering is lexicographic over the raw bytes; the lowercase hex
//! rendering (`2 × L` characters) is the only durable external form.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::primitive::Primitive;

/// Largest digest length any supported primitive produces.
pub const MAX_DIGEST_LEN: usize = 64;

/// Digest lengths produced by the supported primitives.
pub const SUPPORTED_DIGEST_LENS: [usize; 2] = [32, 64];

/// Immutable fixed-length digest.
///
/// Stored inline (no heap allocation) so digests are `Copy` and cheap to sort
/// during unordered/map canonicalization.
///
/// A digest produced by a binding remembers its [`Primitive`]. Equality,
/// ordering and hashing still look only at the bytes; the tag decides whether
/// another hasher may pass the digest through unchanged.
#[derive(Clone, Copy)]
pub struct Digest {
    len: u8,
    bytes: [u8; MAX_DIGEST_LEN],
    primitive: Option<Primitive>,
}

impl Digest {
    /// Build a digest from exactly `expected_len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DigestLength`] when `bytes.len() != expected_len` or
    /// when `expected_len` is not a supported digest length.
    pub fn from_slice(bytes: &[u8], expected_len: usize) -> Result<Self> {
        if bytes.len() != expected_len || !SUPPORTED_DIGEST_LENS.contains(&expected_len) {
            return Err(Error::DigestLength {
                expected: expected_len,
                actual: bytes.len(),
            });
        }
        Ok(Self::copy_exact(bytes))
    }

    /// Parse a lowercase or uppercase hex rendering.
    ///
    /// The digest length is taken from the string and must be one of
    /// [`SUPPORTED_DIGEST_LENS`].
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let raw = hex::decode(hex_str)?;
        if !SUPPORTED_DIGEST_LENS.contains(&raw.len()) {
            return Err(Error::DigestLength {
                expected: nearest_supported_len(raw.len()),
                actual: raw.len(),
            });
        }
        Ok(Self::copy_exact(&raw))
    }

    /// `len` bytes of `0x00`: the canonical digest of an absent value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DigestLength`] unless `len` is one of
    /// [`SUPPORTED_DIGEST_LENS`].
    pub fn zeroed(len: usize) -> Result<Self> {
        if !SUPPORTED_DIGEST_LENS.contains(&len) {
            return Err(Error::DigestLength {
                expected: nearest_supported_len(len),
                actual: len,
            });
        }
        Ok(Self::zeroed_exact(len))
    }

    /// Infallible [`zeroed`](Self::zeroed) for lengths a [`Primitive`] reports.
    pub(crate) fn zeroed_exact(len: usize) -> Self {
        Self::copy_exact(&[0u8; MAX_DIGEST_LEN][..len.min(MAX_DIGEST_LEN)])
    }

    /// Callers guarantee `bytes.len() <= MAX_DIGEST_LEN`.
    pub(crate) fn copy_exact(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= MAX_DIGEST_LEN);
        let len = bytes.len().min(MAX_DIGEST_LEN);
        let mut out = [0u8; MAX_DIGEST_LEN];
        out[..len].copy_from_slice(&bytes[..len]);
        // Clamped to MAX_DIGEST_LEN (64) above.
        #[allow(clippy::cast_possible_truncation)]
        let len = len as u8;
        Self {
            len,
            bytes: out,
            primitive: None,
        }
    }

    /// Tag with the primitive that produced these bytes.
    pub(crate) fn produced_by(mut self, primitive: Primitive) -> Self {
        self.primitive = Some(primitive);
        self
    }

    /// Primitive that produced this digest, when known.
    ///
    /// `None` for digests built from raw bytes or hex and for `zeroed()`.
    pub fn primitive(&self) -> Option<Primitive> {
        self.primitive
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    /// Digest length in bytes.
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Always `false` for digests produced by a binding; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` when every byte is zero.
    pub fn is_zeroed(&self) -> bool {
        self.as_bytes().iter().all(|b| *b == 0)
    }

    /// Lowercase hex rendering, `2 × len` characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

fn nearest_supported_len(len: usize) -> usize {
    if len < MAX_DIGEST_LEN {
        SUPPORTED_DIGEST_LENS[0]
    } else {
        MAX_DIGEST_LEN
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Digest {}

impl PartialOrd for Digest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Digest {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for Digest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl std::str::FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = Error;

    /// Accepts any supported digest length.
    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes, bytes.len())
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self::copy_exact(&bytes)
    }
}

impl From<[u8; 64]> for Digest {
    fn from(bytes: [u8; 64]) -> Self {
        Self::copy_exact(&bytes)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
