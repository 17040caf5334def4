// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The [`ContentHash`] visitor seam and its impls for std types.
//!
//! Each impl routes a Rust type to exactly one semantic category on
//! [`ContentHasher`]:
//!
//! - `Option::None`, dead `Weak` → absence;
//! - `str`, `String` → text;
//! - [`RawBytes`], `bytes::Bytes` → raw bytes (a `Vec<u8>` is a *sequence of
//!   numbers*, not a byte buffer);
//! - [`Digest`] → passthrough;
//! - tuples of arity 2 to 4 → ordered tuple;
//! - integers, floats, [`Decimal`], [`Number`], `char` → numeric text;
//! - `BTreeMap`, `HashMap` → mapping;
//! - `BTreeSet`, `HashSet` → unordered;
//! - `Vec`, slices, arrays, `VecDeque` → ordered;
//! - `&T`, `Box`, `Rc`, `Arc`, `Cow`, `Weak`, `LocalKey` → the referent;
//! - [`Record`] implementors → field bag.
//!
//! Inputs must be acyclic. An `Rc` cycle recurses without bound.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::digest::Digest;
use crate::hasher::ContentHasher;
use crate::number::{Decimal, Number};

/// A value with a canonical content digest.
///
/// Object safe, so records can expose their fields as `&dyn ContentHash`.
pub trait ContentHash {
    /// Canonical digest of `self` under `hasher`.
    fn content_digest(&self, hasher: &ContentHasher) -> Digest;
}

/// A structured record exposing named fields.
///
/// Field order is the enumeration order, but it does not affect the digest:
/// records hash like a mapping from field name to value. A field literally
/// named `"class"` is skipped. Use [`content_record!`](crate::content_record)
/// to derive both this trait and [`ContentHash`].
pub trait Record {
    /// Named fields of this record.
    fn fields(&self) -> Vec<(&str, &dyn ContentHash)>;
}

/// Borrowed raw byte buffer.
///
/// Wraps `&[u8]` so it hashes as bytes rather than as a sequence of `u8`
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBytes<'a>(pub &'a [u8]);

impl ContentHash for RawBytes<'_> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_bytes(self.0)
    }
}

impl ContentHash for bytes::Bytes {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_bytes(self)
    }
}

impl ContentHash for bytes::BytesMut {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_bytes(self)
    }
}

impl ContentHash for dyn Record + '_ {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_record(self)
    }
}

// ── leaves ──────────────────────────────────────────────────────────────

impl ContentHash for str {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_text(self)
    }
}

impl ContentHash for String {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_text(self)
    }
}

impl ContentHash for bool {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_bool(*self)
    }
}

impl ContentHash for char {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_char(*self)
    }
}

impl ContentHash for Digest {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_digest(self)
    }
}

impl ContentHash for Number {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_number(self)
    }
}

impl ContentHash for Decimal {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_text(self.as_str())
    }
}

macro_rules! numeric_content {
    ($($t:ty),*) => {
        $(
            impl ContentHash for $t {
                fn content_digest(&self, hasher: &ContentHasher) -> Digest {
                    hasher.hash_number(&Number::from(*self))
                }
            }
        )*
    };
}

numeric_content!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

// ── tuples ──────────────────────────────────────────────────────────────

macro_rules! tuple_content {
    ($($t:ident $v:ident),+) => {
        impl<$($t: ContentHash),+> ContentHash for ($($t,)+) {
            fn content_digest(&self, hasher: &ContentHasher) -> Digest {
                let ($($v,)+) = self;
                hasher.hash(&[$($v as &dyn ContentHash),+])
            }
        }
    };
}

tuple_content!(A a, B b);
tuple_content!(A a, B b, C c);
tuple_content!(A a, B b, C c, D d);

// ── collections ─────────────────────────────────────────────────────────

impl<K: ContentHash, V: ContentHash> ContentHash for BTreeMap<K, V> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_map(self)
    }
}

impl<K: ContentHash, V: ContentHash, S> ContentHash for HashMap<K, V, S> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_map(self)
    }
}

impl<T: ContentHash> ContentHash for BTreeSet<T> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_unordered(self)
    }
}

impl<T: ContentHash, S> ContentHash for HashSet<T, S> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_unordered(self)
    }
}

impl<T: ContentHash> ContentHash for [T] {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_ordered(self)
    }
}

impl<T: ContentHash, const N: usize> ContentHash for [T; N] {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_ordered(self)
    }
}

impl<T: ContentHash> ContentHash for Vec<T> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_ordered(self)
    }
}

impl<T: ContentHash> ContentHash for VecDeque<T> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        hasher.hash_ordered(self)
    }
}

// ── absence and indirection ─────────────────────────────────────────────

impl<T: ContentHash> ContentHash for Option<T> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        match self {
            Some(value) => value.content_digest(hasher),
            None => hasher.hash_null(),
        }
    }
}

impl<T: ContentHash + ?Sized> ContentHash for &T {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        (**self).content_digest(hasher)
    }
}

impl<T: ContentHash + ?Sized> ContentHash for &mut T {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        (**self).content_digest(hasher)
    }
}

impl<T: ContentHash + ?Sized> ContentHash for Box<T> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        (**self).content_digest(hasher)
    }
}

impl<T: ContentHash + ?Sized> ContentHash for Rc<T> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        (**self).content_digest(hasher)
    }
}

impl<T: ContentHash + ?Sized> ContentHash for Arc<T> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        (**self).content_digest(hasher)
    }
}

impl<B: ContentHash + ToOwned + ?Sized> ContentHash for Cow<'_, B> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        (**self).content_digest(hasher)
    }
}

impl<T: ContentHash> ContentHash for std::rc::Weak<T> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        self.upgrade()
            .map_or_else(|| hasher.hash_null(), |rc| rc.content_digest(hasher))
    }
}

impl<T: ContentHash> ContentHash for std::sync::Weak<T> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        self.upgrade()
            .map_or_else(|| hasher.hash_null(), |arc| arc.content_digest(hasher))
    }
}

/// `LocalKey::with` needs a `'static` key, so the impl is on the reference a
/// `thread_local!` static hands out: `(&KEY).content_digest(h)`.
impl<T: ContentHash + 'static> ContentHash for &'static std::thread::LocalKey<T> {
    fn content_digest(&self, hasher: &ContentHasher) -> Digest {
        (*self).with(|value| value.content_digest(hasher))
    }
}

/// Implement [`Record`] and [`ContentHash`] for a struct from its field list.
///
/// ```
/// use echo_canon::{content_record, Algorithm, ContentHash};
///
/// struct Person {
///     name: String,
///     age: u32,
/// }
/// content_record!(Person { name, age });
///
/// let hasher = Algorithm::Sha256.hasher();
/// let p = Person { name: "Ada".into(), age: 36 };
/// let map = std::collections::BTreeMap::from([
///     ("name", echo_canon::Value::from("Ada")),
///     ("age", echo_canon::Value::from(36)),
/// ]);
/// assert_eq!(p.content_digest(hasher), map.content_digest(hasher));
/// ```
#[macro_export]
macro_rules! content_record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields(&self) -> ::std::vec::Vec<(&str, &dyn $crate::ContentHash)> {
                ::std::vec![
                    $((::core::stringify!($field), &self.$field as &dyn $crate::ContentHash)),*
                ]
            }
        }

        impl $crate::ContentHash for $ty {
            fn content_digest(&self, hasher: &$crate::ContentHasher) -> $crate::Digest {
                hasher.hash_record(self)
            }
        }
    };
}
