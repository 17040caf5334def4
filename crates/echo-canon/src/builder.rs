// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-use accumulator over one primitive invocation.

use crate::digest::Digest;
use crate::primitive::PrimitiveContext;

/// Sequential byte-feeding context bound to one primitive invocation.
///
/// [`build`](DigestBuilder::build) takes `self` by value: once a builder has
/// produced its digest it cannot be fed or finalized again.
#[must_use = "a DigestBuilder does nothing until `build` is called"]
pub struct DigestBuilder {
    ctx: PrimitiveContext,
}

impl DigestBuilder {
    pub(crate) fn new(ctx: PrimitiveContext) -> Self {
        Self { ctx }
    }

    /// Append raw bytes.
    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        self.ctx.update(bytes);
        self
    }

    /// Append the raw bytes of a digest.
    pub fn update_digest(&mut self, digest: &Digest) -> &mut Self {
        self.ctx.update(digest.as_bytes());
        self
    }

    /// Finalize. Applies the primitive exactly once.
    pub fn build(self) -> Digest {
        self.ctx.finalize()
    }
}
