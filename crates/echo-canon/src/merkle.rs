// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Merkle fold over an ordered list of digests.
//!
//! Fold rules:
//! - no digests: `empty()`;
//! - one digest: that digest, unchanged;
//! - otherwise pair left to right, `combine(l, r) = H(l ‖ r [‖ marker])`, and
//!   carry an unpaired trailing digest into the next level unchanged. The odd
//!   leaf is never duplicated or padded.
//!
//! So `[d0, d1, d2]` folds to `combine(combine(d0, d1), d2)`, and
//! `[d0, d1, d2, d3, d4]` to `combine(combine(c01, c23), d4)`.

use tracing::trace;

use crate::digest::Digest;
use crate::primitive::PrimitiveBinding;

/// Pairwise digest combiner backed by one [`PrimitiveBinding`].
#[derive(Debug, Clone, Copy)]
pub struct MerkleCombiner<'b> {
    binding: &'b PrimitiveBinding,
}

impl<'b> MerkleCombiner<'b> {
    /// Combiner over `binding`.
    pub fn new(binding: &'b PrimitiveBinding) -> Self {
        Self { binding }
    }

    /// Interior node: `H(left ‖ right [‖ marker])`.
    pub fn combine(&self, left: &Digest, right: &Digest) -> Digest {
        let mut builder = self.binding.builder();
        builder.update_digest(left).update_digest(right);
        if let Some(marker) = self.binding.domain_marker() {
            builder.update_digest(marker);
        }
        builder.build()
    }

    /// Fold `leaves` to a single root.
    pub fn root(&self, leaves: Vec<Digest>) -> Digest {
        let mut level = leaves;
        if level.is_empty() {
            return self.binding.empty();
        }
        while level.len() > 1 {
            trace!(width = level.len(), "merkle level");
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut pairs = level.chunks_exact(2);
            for pair in &mut pairs {
                next.push(self.combine(&pair[0], &pair[1]));
            }
            if let [odd] = pairs.remainder() {
                next.push(*odd);
            }
            level = next;
        }
        level[0]
    }
}
