// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serializable hasher configuration.
//!
//! ```json
//! { "primitive": "sha256", "application": "double", "domain_marker": "<64 hex chars>" }
//! ```
//!
//! `application` defaults to `single`; `domain_marker` is optional. Unknown
//! primitives and wrong-length markers are rejected by [`HasherConfig::build`],
//! so a bad config fails when the hasher is built, not on first use.

use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::algorithm::Algorithm;
use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::hasher::ContentHasher;
use crate::primitive::{Application, Primitive, PrimitiveBinding};

/// Declarative description of a [`ContentHasher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HasherConfig {
    /// Primitive identifier (`sha256`, `sha512`, `blake3`).
    pub primitive: String,
    /// `empty()` finisher variant.
    #[serde(default)]
    pub application: Application,
    /// Interior-node domain marker, lowercase hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_marker: Option<Digest>,
}

impl HasherConfig {
    /// Parse a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed JSON, unknown fields or bad hex.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(Error::Config)
    }

    /// Parse a JSON config document from a reader (e.g. an opened file).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on I/O failure or malformed JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(Error::Config)
    }

    /// Pretty JSON rendering.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_json_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(Error::Config)
    }

    /// Build the described hasher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPrimitive`] or [`Error::DigestLength`].
    #[instrument(level = "debug", skip(self), fields(primitive = %self.primitive))]
    pub fn build(&self) -> Result<ContentHasher> {
        let primitive: Primitive = self.primitive.parse()?;
        let binding = match self.domain_marker {
            Some(marker) => {
                PrimitiveBinding::with_domain_marker(primitive, self.application, marker)?
            }
            None => PrimitiveBinding::new(primitive, self.application),
        };
        info!(
            primitive = %primitive,
            application = ?self.application,
            marked = self.domain_marker.is_some(),
            "content hasher configured"
        );
        Ok(ContentHasher::new(binding))
    }
}

impl From<Algorithm> for HasherConfig {
    fn from(algorithm: Algorithm) -> Self {
        Self {
            primitive: algorithm.primitive().name().to_owned(),
            application: algorithm.application(),
            domain_marker: None,
        }
    }
}
