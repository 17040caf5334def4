// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error type for fallible `echo-canon` operations.
//!
//! Hashing itself is total over well-formed input and never fails. Errors are
//! reserved for construction: unknown primitives, wrong-length digests,
//! malformed hex/decimal literals and malformed configuration.

use thiserror::Error;

/// Errors surfaced by digest construction and hasher configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// The primitive identifier is not one this crate binds to.
    #[error("[CANON_UNKNOWN_PRIMITIVE] unsupported hash primitive: {0:?}")]
    UnknownPrimitive(String),
    /// A digest was constructed from the wrong number of bytes.
    #[error("[CANON_DIGEST_LENGTH] expected {expected} digest bytes, got {actual}")]
    DigestLength {
        /// Length required by the binding.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
    /// A hex string was not valid lowercase/uppercase hex.
    #[error("[CANON_INVALID_HEX] {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// A decimal literal could not be parsed.
    #[error("[CANON_INVALID_DECIMAL] {0:?} is not a decimal literal")]
    InvalidDecimal(String),
    /// A configuration document could not be parsed.
    #[error("[CANON_CONFIG] {0}")]
    Config(#[source] serde_json::Error),
    /// A value could not be serialized for hashing.
    #[error("[CANON_SERIALIZE] {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
