// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cross-type equivalence scenarios: numbers, special floats, records vs
//! maps, ordered vs unordered collections, and the odd-leaf Merkle fold.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use echo_canon::{
    content_record, Algorithm, ContentHash, ContentHasher, Decimal, Digest, Number, Value,
};

fn digests_of(h: &ContentHasher, values: &[&dyn ContentHash]) -> Vec<Digest> {
    values.iter().map(|v| v.content_digest(h)).collect()
}

#[test]
fn seventeen_is_seventeen_at_every_width() {
    for algorithm in Algorithm::ALL {
        let h = algorithm.hasher();
        let all = digests_of(
            h,
            &[
                &17u8,
                &17i8,
                &17i16,
                &17u16,
                &17i32,
                &17u32,
                &17i64,
                &17u64,
                &17i128,
                &17u128,
                &17usize,
                &17.0f32,
                &17.0f64,
                &Decimal::from(17i128),
                &"17.000".parse::<Decimal>().unwrap_or_else(|_| Decimal::from(0u128)),
                &Number::Decimal("1.7e1".parse().unwrap_or_else(|_| Decimal::from(0u128))),
            ],
        );
        assert!(all.windows(2).all(|w| w[0] == w[1]), "{algorithm}: {all:?}");
    }
}

#[test]
fn integral_floats_beyond_f64_precision_match_integers() {
    for algorithm in Algorithm::ALL {
        let h = algorithm.hasher();
        let two_pow_64 = 18_446_744_073_709_551_616u128;
        assert_eq!(
            18_446_744_073_709_551_616.0f64.content_digest(h),
            two_pow_64.content_digest(h),
            "{algorithm}"
        );
        assert_eq!(
            2f32.powi(100).content_digest(h),
            Decimal::parse("1267650600228229401496703205376")
                .unwrap_or_else(|_| Decimal::from(0u128))
                .content_digest(h)
        );
        assert_eq!(
            f32::MAX.content_digest(h),
            f64::from(f32::MAX).content_digest(h)
        );
    }
}

#[test]
fn special_floats_hash_as_sentinels() {
    let h = Algorithm::Sha256.hasher();
    assert_eq!(f64::INFINITY.content_digest(h), "+Inf".content_digest(h));
    assert_eq!(f32::INFINITY.content_digest(h), "+Inf".content_digest(h));
    assert_eq!(f64::NEG_INFINITY.content_digest(h), "-Inf".content_digest(h));
    assert_eq!(f32::NEG_INFINITY.content_digest(h), "-Inf".content_digest(h));
    assert_eq!(f64::NAN.content_digest(h), "NaN".content_digest(h));
    assert_eq!(f32::NAN.content_digest(h), "NaN".content_digest(h));
    assert_eq!(0.0f64.content_digest(h), (-0.0f32).content_digest(h));
}

#[test]
fn characters_hash_as_code_points() {
    let h = Algorithm::Sha512.hasher();
    assert_eq!('A'.content_digest(h), 65u32.content_digest(h));
    assert_eq!(Value::Char('z').content_digest(h), 122i64.content_digest(h));
}

struct Customer {
    name: String,
}
content_record!(Customer { name });

struct Tagged {
    class: &'static str,
    name: String,
}
content_record!(Tagged { class, name });

#[test]
fn record_hashes_like_map_over_field_names() {
    for algorithm in Algorithm::ALL {
        let h = algorithm.hasher();
        let record = Customer {
            name: "John Doe".into(),
        };
        let map = HashMap::from([("name", "John Doe")]);
        assert_eq!(record.content_digest(h), map.content_digest(h), "{algorithm}");
        assert_eq!(
            record.content_digest(h),
            Value::map([("name", "John Doe")]).content_digest(h)
        );
    }
}

#[test]
fn class_field_is_type_metadata() {
    let h = Algorithm::Sha256.hasher();
    let tagged = Tagged {
        class: "Customer",
        name: "John Doe".into(),
    };
    let plain = Customer {
        name: "John Doe".into(),
    };
    assert_eq!(tagged.content_digest(h), plain.content_digest(h));
}

#[test]
fn nested_records_and_maps_agree() {
    struct Order {
        customer: Customer,
        lines: Vec<(String, u32)>,
    }
    content_record!(Order { customer, lines });

    let h = Algorithm::Sha256.hasher();
    let order = Order {
        customer: Customer {
            name: "Ada".into(),
        },
        lines: vec![("widget".into(), 2), ("gadget".into(), 1)],
    };
    let as_value = Value::map([
        (Value::from("customer"), Value::map([("name", "Ada")])),
        (
            Value::from("lines"),
            Value::seq([
                Value::tuple([Value::from("widget"), Value::from(2u32)]),
                Value::tuple([Value::from("gadget"), Value::from(1u32)]),
            ]),
        ),
    ]);
    assert_eq!(order.content_digest(h), as_value.content_digest(h));
}

#[test]
fn ordered_sequences_are_order_sensitive() {
    let h = Algorithm::Sha256.hasher();
    assert_ne!(vec![1, 2, 3].content_digest(h), vec![3, 2, 1].content_digest(h));
    assert_eq!(
        vec![1, 2, 3].content_digest(h),
        VecDeque::from([1, 2, 3]).content_digest(h)
    );
    assert_eq!(vec![1, 2, 3].content_digest(h), [1, 2, 3].content_digest(h));
}

#[test]
fn sets_are_order_insensitive() {
    let h = Algorithm::Sha256.hasher();
    let hs: HashSet<&str> = ["pear", "apple", "fig"].into();
    let bs: BTreeSet<&str> = ["fig", "pear", "apple"].into();
    assert_eq!(hs.content_digest(h), bs.content_digest(h));
    assert_eq!(
        hs.content_digest(h),
        Value::set(["apple", "fig", "pear"]).content_digest(h)
    );
}

#[test]
fn maps_ignore_iteration_order() {
    let h = Algorithm::Sha512.hasher();
    let hm: HashMap<String, Vec<u8>> = (0..50u8).map(|i| (format!("k{i}"), vec![i; 3])).collect();
    let bm: BTreeMap<String, Vec<u8>> = hm.clone().into_iter().collect();
    assert_eq!(hm.content_digest(h), bm.content_digest(h));
}

#[test]
fn odd_leaf_is_carried_forward() {
    let h = Algorithm::Sha256.hasher();
    let d: Vec<Digest> = ["d0", "d1", "d2"].iter().map(|s| h.hash_text(s)).collect();
    let m = h.merkle();
    let expected = m.combine(&m.combine(&d[0], &d[1]), &d[2]);
    assert_eq!(["d0", "d1", "d2"].content_digest(h), expected);
    assert_ne!(
        ["d0", "d1", "d2"].content_digest(h),
        m.combine(&d[0], &m.combine(&d[1], &d[2]))
    );
}

#[test]
fn top_level_hash_is_ordered_fold() {
    let h = Algorithm::Sha256.hasher();
    let top = h.hash(&[&"a", &1, &None::<u8>]);
    let m = h.merkle();
    let expected = m.combine(&m.combine(&h.hash_text("a"), &h.hash_text("1")), &h.zeroed());
    assert_eq!(top, expected);
    assert_eq!(h.hash(&[&"a", &1, &None::<u8>]), ("a", 1, None::<u8>).content_digest(h));
    assert_eq!(h.hash(&[]), h.empty());
}

#[test]
fn precomputed_digests_pass_through_collections() {
    let h = Algorithm::Sha256.hasher();
    let inner = vec!["x", "y"].content_digest(h);
    assert_eq!(
        vec![inner, h.hash_text("z")].content_digest(h),
        vec![Value::seq(["x", "y"]), Value::from("z")].content_digest(h)
    );
}
