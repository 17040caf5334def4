// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Golden vectors for the reserved digests and leaf hashing.

use echo_canon::{Algorithm, ContentHash, Digest, MerkleCombiner, Value};

const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const SHA256D_EMPTY: &str = "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456";
const SHA512_EMPTY: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
                            47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";
const BLAKE3_EMPTY: &str = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";
const SHA256_ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

#[test]
fn empty_digests_match_known_vectors() {
    assert_eq!(Algorithm::Sha256.hasher().empty().to_hex(), SHA256_EMPTY);
    assert_eq!(Algorithm::Sha256d.hasher().empty().to_hex(), SHA256D_EMPTY);
    assert_eq!(Algorithm::Sha512.hasher().empty().to_hex(), SHA512_EMPTY);
    assert_eq!(Algorithm::Blake3.hasher().empty().to_hex(), BLAKE3_EMPTY);
}

#[test]
fn empty_collections_hash_to_empty() {
    for algorithm in Algorithm::ALL {
        let h = algorithm.hasher();
        assert_eq!(Vec::<String>::new().content_digest(h), h.empty(), "{algorithm}");
        assert_eq!(Value::Set(Vec::new()).content_digest(h), h.empty(), "{algorithm}");
        assert_eq!(Value::Map(Vec::new()).content_digest(h), h.empty(), "{algorithm}");
        assert_eq!(Value::Record(Vec::new()).content_digest(h), h.empty(), "{algorithm}");
    }
}

#[test]
fn null_is_zeroed_for_every_algorithm() {
    for algorithm in Algorithm::ALL {
        let h = algorithm.hasher();
        let z = Value::Null.content_digest(h);
        assert_eq!(z, h.zeroed());
        assert_eq!(z.to_hex(), "0".repeat(2 * algorithm.digest_len()));
        assert_ne!(z, h.empty());
    }
}

#[test]
fn text_and_bytes_hash_directly() {
    let h = Algorithm::Sha256.hasher();
    assert_eq!("abc".content_digest(h).to_hex(), SHA256_ABC);
    assert_eq!(Value::bytes(b"abc".to_vec()).content_digest(h).to_hex(), SHA256_ABC);
    // The double variant hashes leaves once.
    assert_eq!("abc".content_digest(Algorithm::Sha256d.hasher()).to_hex(), SHA256_ABC);
}

#[test]
fn numbers_hash_as_their_decimal_text() {
    let h = Algorithm::Sha256.hasher();
    assert_eq!(17i32.content_digest(h), "17".content_digest(h));
    assert_eq!((-0.5f64).content_digest(h), "-0.5".content_digest(h));
    assert_eq!('A'.content_digest(h), "65".content_digest(h));
    assert_eq!(true.content_digest(h), "true".content_digest(h));
}

#[test]
fn interior_node_is_concatenation_hash() {
    let h = Algorithm::Sha256.hasher();
    let (a, b) = (h.hash_text("a"), h.hash_text("b"));
    let mut concat = a.as_bytes().to_vec();
    concat.extend_from_slice(b.as_bytes());
    assert_eq!(MerkleCombiner::new(h.binding()).combine(&a, &b), h.hash_bytes(&concat));
    assert_eq!(["a", "b"].content_digest(h), h.hash_bytes(&concat));
}

#[test]
fn zeroed_is_not_produced_by_sampled_leaves() {
    let h = Algorithm::Sha256.hasher();
    let zero = h.zeroed();
    for i in 0..2_000u32 {
        assert_ne!(i.content_digest(h), zero);
        assert_ne!(format!("s{i}").content_digest(h), zero);
        assert_ne!(h.hash_u32_raw(i), zero);
    }
}

#[test]
fn digest_hex_round_trip() {
    let d = Algorithm::Sha512.hasher().hash_text("round trip");
    assert_eq!(d.to_hex().parse::<Digest>().ok(), Some(d));
    assert_eq!(Digest::zeroed(64).ok(), Some(Algorithm::Sha512.hasher().zeroed()));
    assert!(Digest::zeroed(48).is_err());
}
