// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named algorithm instantiations and process-wide shared hashers.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::content::ContentHash;
use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::hasher::ContentHasher;
use crate::primitive::{Application, Primitive, PrimitiveBinding};

/// Concrete algorithm families and variants.
///
/// The `d` (double application) variants differ from their single
/// counterparts only in `empty()`, which is `H(H(""))`. Every other digest is
/// identical between `Sha256` and `Sha256d` (likewise for SHA-512).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    /// SHA-256, single application.
    Sha256,
    /// SHA-256, double application for `empty()`.
    Sha256d,
    /// SHA-512, single application.
    Sha512,
    /// SHA-512, double application for `empty()`.
    Sha512d,
    /// BLAKE3, single application.
    Blake3,
}

static SHARED: [OnceLock<ContentHasher>; 5] = [const { OnceLock::new() }; 5];

impl Algorithm {
    /// Every instantiation, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Sha256,
        Self::Sha256d,
        Self::Sha512,
        Self::Sha512d,
        Self::Blake3,
    ];

    /// Underlying primitive.
    pub const fn primitive(self) -> Primitive {
        match self {
            Self::Sha256 | Self::Sha256d => Primitive::Sha256,
            Self::Sha512 | Self::Sha512d => Primitive::Sha512,
            Self::Blake3 => Primitive::Blake3,
        }
    }

    /// `empty()` finisher variant.
    pub const fn application(self) -> Application {
        match self {
            Self::Sha256d | Self::Sha512d => Application::Double,
            Self::Sha256 | Self::Sha512 | Self::Blake3 => Application::Single,
        }
    }

    /// Digest length in bytes.
    pub const fn digest_len(self) -> usize {
        self.primitive().output_len()
    }

    /// Stable identifier (`sha256`, `sha256d`, `sha512`, `sha512d`, `blake3`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha256d => "sha256d",
            Self::Sha512 => "sha512",
            Self::Sha512d => "sha512d",
            Self::Blake3 => "blake3",
        }
    }

    /// Fresh binding (no domain marker).
    pub fn binding(self) -> PrimitiveBinding {
        PrimitiveBinding::new(self.primitive(), self.application())
    }

    /// Process-wide shared hasher, built on first use.
    pub fn hasher(self) -> &'static ContentHasher {
        SHARED[self as usize].get_or_init(|| ContentHasher::new(self.binding()))
    }

    /// Hash `value` with the shared hasher.
    pub fn digest<T: ContentHash + ?Sized>(self, value: &T) -> Digest {
        self.hasher().hash_value(value)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "");
        Self::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| Error::UnknownPrimitive(s.to_owned()))
    }
}

impl From<Algorithm> for ContentHasher {
    fn from(algorithm: Algorithm) -> Self {
        Self::new(algorithm.binding())
    }
}

/// Canonical SHA-256 digest of `value`.
pub fn sha256<T: ContentHash + ?Sized>(value: &T) -> Digest {
    Algorithm::Sha256.digest(value)
}

/// Canonical SHA-512 digest of `value`.
pub fn sha512<T: ContentHash + ?Sized>(value: &T) -> Digest {
    Algorithm::Sha512.digest(value)
}
