// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Primitive bindings: which hash function, how `empty()` is finished, and
//! the optional Merkle interior-node domain marker.
//!
//! A [`PrimitiveBinding`] is immutable once built. The domain marker is a
//! constructor argument, so every digest a binding ever produces is computed
//! under the same marker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use sha2::{Sha256, Sha512};
use tracing::{debug, instrument};

use crate::builder::DigestBuilder;
use crate::digest::Digest;
use crate::error::{Error, Result};

/// Hash primitives this crate binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    /// SHA-256 (FIPS 180-4), 32-byte output.
    Sha256,
    /// SHA-512 (FIPS 180-4), 64-byte output.
    Sha512,
    /// BLAKE3, 32-byte output.
    Blake3,
}

impl Primitive {
    /// Output length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 | Self::Blake3 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Canonical lowercase identifier (`sha256`, `sha512`, `blake3`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
        }
    }

    pub(crate) fn context(self) -> PrimitiveContext {
        match self {
            Self::Sha256 => PrimitiveContext::Sha256(Sha256::new()),
            Self::Sha512 => PrimitiveContext::Sha512(Sha512::new()),
            Self::Blake3 => PrimitiveContext::Blake3(Box::new(blake3::Hasher::new())),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = Error;

    /// Case-insensitive; accepts `sha256`/`sha-256`, `sha512`/`sha-512`, `blake3`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            "blake3" => Ok(Self::Blake3),
            _ => Err(Error::UnknownPrimitive(s.to_owned())),
        }
    }
}

/// One in-flight invocation of a primitive.
pub(crate) enum PrimitiveContext {
    Sha256(Sha256),
    Sha512(Sha512),
    Blake3(Box<blake3::Hasher>),
}

impl PrimitiveContext {
    pub(crate) fn update(&mut self, bytes: &[u8]) {
        match self {
            Self::Sha256(h) => h.update(bytes),
            Self::Sha512(h) => h.update(bytes),
            Self::Blake3(h) => {
                h.update(bytes);
            }
        }
    }

    pub(crate) fn finalize(self) -> Digest {
        match self {
            Self::Sha256(h) => Digest::copy_exact(&h.finalize()).produced_by(Primitive::Sha256),
            Self::Sha512(h) => Digest::copy_exact(&h.finalize()).produced_by(Primitive::Sha512),
            Self::Blake3(h) => {
                Digest::copy_exact(h.finalize().as_bytes()).produced_by(Primitive::Blake3)
            }
        }
    }
}

/// How the finisher derives `empty()` from a fresh context.
///
/// Only `empty()` is affected. Leaf and interior-node hashing apply the
/// primitive exactly once under both variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Application {
    /// `empty() = H("")`.
    #[default]
    Single,
    /// `empty() = H(H(""))`.
    Double,
}

impl Application {
    fn finish(self, primitive: Primitive, ctx: PrimitiveContext) -> Digest {
        let first = ctx.finalize();
        match self {
            Self::Single => first,
            Self::Double => {
                let mut second = primitive.context();
                second.update(first.as_bytes());
                second.finalize()
            }
        }
    }
}

/// Immutable coupling of a primitive, its digest length, the `empty()`
/// finisher and an optional Merkle domain marker.
///
/// Bindings carry no per-call state and are `Send + Sync`; each hashing call
/// opens its own primitive context.
#[derive(Clone, PartialEq, Eq)]
pub struct PrimitiveBinding {
    primitive: Primitive,
    application: Application,
    domain_marker: Option<Digest>,
    empty: Digest,
}

impl PrimitiveBinding {
    /// Binding without a domain marker.
    pub fn new(primitive: Primitive, application: Application) -> Self {
        let empty = application.finish(primitive, primitive.context());
        debug!(
            primitive = %primitive,
            len = primitive.output_len(),
            ?application,
            "primitive binding created"
        );
        Self {
            primitive,
            application,
            domain_marker: None,
            empty,
        }
    }

    /// Binding whose interior Merkle nodes mix in `marker`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DigestLength`] when `marker` is not exactly one digest
    /// of this primitive long.
    #[instrument(level = "debug", skip(marker))]
    pub fn with_domain_marker(
        primitive: Primitive,
        application: Application,
        marker: Digest,
    ) -> Result<Self> {
        if marker.len() != primitive.output_len() {
            return Err(Error::DigestLength {
                expected: primitive.output_len(),
                actual: marker.len(),
            });
        }
        let mut binding = Self::new(primitive, application);
        binding.domain_marker = Some(marker);
        debug!(marker = %marker, "domain marker installed");
        Ok(binding)
    }

    /// Resolve a primitive by identifier and bind it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPrimitive`] for identifiers this crate does not
    /// bind to. The failure happens here, never on first use.
    pub fn named(name: &str, application: Application) -> Result<Self> {
        Ok(Self::new(name.parse()?, application))
    }

    /// The bound primitive.
    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    /// The `empty()` finisher variant.
    pub fn application(&self) -> Application {
        self.application
    }

    /// Digest length `L` in bytes.
    pub fn digest_len(&self) -> usize {
        self.primitive.output_len()
    }

    /// Interior-node domain marker, if configured.
    pub fn domain_marker(&self) -> Option<&Digest> {
        self.domain_marker.as_ref()
    }

    /// Digest of zero-length input, derived through the finisher. Cached.
    pub fn empty(&self) -> Digest {
        self.empty
    }

    /// `L` zero bytes.
    pub fn zeroed(&self) -> Digest {
        Digest::zeroed_exact(self.digest_len())
    }

    /// Construct a digest of this binding's length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DigestLength`] when `bytes` is not exactly `L` long.
    pub fn digest_from_slice(&self, bytes: &[u8]) -> Result<Digest> {
        Digest::from_slice(bytes, self.digest_len())
    }

    /// Fresh single-use accumulator.
    pub fn builder(&self) -> DigestBuilder {
        DigestBuilder::new(self.primitive.context())
    }

    /// Apply the primitive once to `bytes`.
    pub fn digest_bytes(&self, bytes: &[u8]) -> Digest {
        let mut builder = self.builder();
        builder.update(bytes);
        builder.build()
    }
}

impl fmt::Debug for PrimitiveBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveBinding")
            .field("primitive", &self.primitive)
            .field("application", &self.application)
            .field("domain_marker", &self.domain_marker)
            .finish_non_exhaustive()
    }
}
