// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic canonical content hashing for Echo.
//!
//! `echo-canon` maps an in-memory value to a fixed-length [`Digest`] such that
//! semantically equal values always hash identically. Digests are used for
//! content addressing, deduplication and integrity checks.
//!
//! # Canonical Forms
//!
//! | value | digest |
//! |---|---|
//! | absent (`None`, [`Value::Null`]) | `zeroed()`: `L` zero bytes |
//! | text | `H(utf8)` |
//! | raw bytes | `H(bytes)` |
//! | number, `char` | `H(canonical decimal text)`, width independent |
//! | sequence, tuple | Merkle fold of element digests, in order |
//! | set | Merkle fold of *sorted* element digests |
//! | map, record | Merkle fold of `combine(key, value)`, sorted by key digest |
//! | empty collection | `empty()`: `H("")` (or `H(H(""))` for double variants) |
//!
//! A record and a map over its field names hash identically.
//!
//! # Merkle Fold
//!
//! Digests are combined pairwise left to right; an unpaired trailing digest is
//! carried to the next level unchanged. See [`MerkleCombiner`].
//!
//! # Determinism Invariant
//!
//! The digest depends only on the logical value: never on addresses, memory
//! layout, or the iteration order of sets and maps. Inputs must be acyclic.
//!
//! ```
//! use std::collections::HashSet;
//! use echo_canon::{Algorithm, ContentHash};
//!
//! let h = Algorithm::Sha256.hasher();
//! assert_eq!(17u8.content_digest(h), 17.0f64.content_digest(h));
//! let a: HashSet<&str> = ["x", "y", "z"].into();
//! let b: HashSet<&str> = ["z", "x", "y"].into();
//! assert_eq!(a.content_digest(h), b.content_digest(h));
//! assert_eq!(
//!     Vec::<u8>::new().content_digest(h).to_hex(),
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
//! );
//! ```
#![forbid(unsafe_code)]

mod algorithm;
mod builder;
pub mod config;
mod content;
mod digest;
mod error;
mod hasher;
mod json;
mod merkle;
pub mod number;
mod primitive;
mod value;

pub use algorithm::{sha256, sha512, Algorithm};
pub use builder::DigestBuilder;
pub use config::HasherConfig;
pub use content::{ContentHash, RawBytes, Record};
pub use digest::{Digest, MAX_DIGEST_LEN, SUPPORTED_DIGEST_LENS};
pub use error::{Error, Result};
pub use hasher::{ContentHasher, TYPE_METADATA_FIELD};
pub use merkle::MerkleCombiner;
pub use number::{Decimal, Number};
pub use primitive::{Application, Primitive, PrimitiveBinding};
pub use value::Value;
