// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests for the determinism and equivalence invariants.
#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, HashMap, HashSet};

use echo_canon::{Algorithm, ContentHash, Decimal, Number, Value};
use proptest::prelude::*;

fn entries() -> impl Strategy<Value = (Vec<(String, i32)>, Vec<(String, i32)>)> {
    prop::collection::btree_map("[a-z]{0,8}", any::<i32>(), 0..24).prop_flat_map(|map| {
        let ordered: Vec<(String, i32)> = map.into_iter().collect();
        (Just(ordered.clone()), Just(ordered).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn unordered_digest_ignores_permutation(
        (items, shuffled) in prop::collection::vec(any::<i64>(), 0..32)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let h = Algorithm::Sha256.hasher();
        prop_assert_eq!(h.hash_unordered(&items), h.hash_unordered(&shuffled));
        prop_assert_eq!(
            Value::set(items.iter().copied()).content_digest(h),
            Value::set(shuffled.iter().copied()).content_digest(h)
        );
    }

    #[test]
    fn set_types_agree(items in prop::collection::hash_set(".{0,12}", 0..16)) {
        let h = Algorithm::Blake3.hasher();
        let reversed: Vec<&String> = {
            let mut v: Vec<&String> = items.iter().collect();
            v.sort();
            v.reverse();
            v
        };
        let rebuilt: HashSet<&String> = reversed.iter().copied().collect();
        prop_assert_eq!(items.content_digest(h), rebuilt.content_digest(h));
        prop_assert_eq!(items.content_digest(h), h.hash_unordered(reversed));
    }

    #[test]
    fn map_digest_ignores_insertion_order((ordered, shuffled) in entries()) {
        let h = Algorithm::Sha512.hasher();
        let a: HashMap<String, i32> = ordered.iter().cloned().collect();
        let b: BTreeMap<String, i32> = shuffled.iter().cloned().collect();
        prop_assert_eq!(a.content_digest(h), b.content_digest(h));
        prop_assert_eq!(
            Value::map(ordered.clone()).content_digest(h),
            Value::map(shuffled).content_digest(h)
        );
        prop_assert_eq!(Value::map(ordered).content_digest(h), a.content_digest(h));
    }

    #[test]
    fn integer_width_does_not_matter(v in any::<i32>()) {
        let h = Algorithm::Sha256.hasher();
        let d = v.content_digest(h);
        prop_assert_eq!(d, i64::from(v).content_digest(h));
        prop_assert_eq!(d, i128::from(v).content_digest(h));
        prop_assert_eq!(d, f64::from(v).content_digest(h));
        prop_assert_eq!(d, Decimal::from(i128::from(v)).content_digest(h));
        prop_assert_eq!(d, h.hash_text(&v.to_string()));
    }

    #[test]
    fn unsigned_and_signed_agree(v in any::<u32>()) {
        let h = Algorithm::Sha256.hasher();
        prop_assert_eq!(v.content_digest(h), i64::from(v).content_digest(h));
        prop_assert_eq!(u64::from(v).content_digest(h), Number::Int(i128::from(v)).content_digest(h));
    }

    #[test]
    fn finite_floats_match_their_exact_decimal(
        v in any::<f64>().prop_filter("finite", |v| v.is_finite())
    ) {
        let h = Algorithm::Sha256.hasher();
        // Integral floats carry their exact digits; others their shortest text.
        let literal = if v.fract() == 0.0 { format!("{v:.0}") } else { format!("{v:e}") };
        let decimal = Decimal::parse(&literal).unwrap();
        prop_assert_eq!(v.content_digest(h), decimal.content_digest(h));
    }

    #[test]
    #[allow(clippy::cast_possible_truncation)]
    fn integral_floats_match_integers_at_any_magnitude(v in -1e36f64..1e36f64) {
        let h = Algorithm::Sha256.hasher();
        let whole = v.trunc();
        prop_assert_eq!(whole.content_digest(h), Number::Int(whole as i128).content_digest(h));
    }

    #[test]
    fn decimal_canonical_form_is_stable(
        int_part in "[0-9]{1,12}",
        frac_part in "[0-9]{0,12}",
        negative in any::<bool>(),
    ) {
        let literal = format!("{}{int_part}.{frac_part}", if negative { "-" } else { "" });
        let once = Decimal::parse(&literal).unwrap();
        let twice = Decimal::parse(once.as_str()).unwrap();
        prop_assert_eq!(&once, &twice);
        let padded = Decimal::parse(&format!("{}00{int_part}.{frac_part}000", if negative { "-" } else { "" })).unwrap();
        prop_assert_eq!(once, padded);
    }

    #[test]
    fn hashing_is_deterministic_across_hashers(
        text in ".{0,64}",
        bytes in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        for algorithm in Algorithm::ALL {
            let shared = algorithm.hasher();
            let fresh = echo_canon::ContentHasher::from(algorithm);
            let value = Value::seq([Value::from(text.as_str()), Value::bytes(bytes.clone())]);
            prop_assert_eq!(value.content_digest(shared), value.content_digest(&fresh));
            prop_assert_eq!(value.content_digest(shared).len(), algorithm.digest_len());
        }
    }

    #[test]
    fn ordered_digest_detects_adjacent_swaps(
        items in prop::collection::vec(".{1,8}", 2..16),
        at in any::<prop::sample::Index>(),
    ) {
        let h = Algorithm::Sha256.hasher();
        let i = at.index(items.len() - 1);
        prop_assume!(items[i] != items[i + 1]);
        let mut swapped = items.clone();
        swapped.swap(i, i + 1);
        prop_assert_ne!(items.content_digest(h), swapped.content_digest(h));
    }
}
