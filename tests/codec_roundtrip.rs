//! `decode(encode(v))` round-trips for a spread of magnitudes, exponent
//! signs, and limb shapes.

use decpact::codec::{decode, encode};
use decpact::{Context, Decimal};

fn ctx() -> Context {
    Context::default()
}

fn round_trips(literal: &str) {
    let value = Decimal::from_str(literal).expect("valid literal");
    let bytes = encode(&value);
    let back = decode(&bytes, &ctx()).expect("non-empty bytes decode");
    assert!(
        back.host_eq(&value),
        "{literal} round trip failed: got {back:?}, want {value:?}"
    );
    assert_eq!(encode(&back), bytes, "{literal} re-encode is not byte-stable");
}

#[test]
fn integers_small_and_large() {
    for literal in ["0", "-0", "1", "-1", "50", "51", "-51", "12345", "9999999999999999"] {
        round_trips(literal);
    }
}

#[test]
fn fractions_and_scientific_notation() {
    for literal in ["0.1", "0.2", "123.456", "-0.0001", "1e20", "-1e-20", "3.14159265358979"] {
        round_trips(literal);
    }
}

#[test]
fn specials_round_trip_through_reserved_bytes() {
    for value in [Decimal::nan(), Decimal::infinity(), Decimal::neg_infinity()] {
        let bytes = encode(&value);
        assert_eq!(bytes.len(), 1);
        let back = decode(&bytes, &ctx()).unwrap();
        assert!(back.host_eq(&value));
    }
}

#[test]
fn small_integer_fast_path_is_exactly_one_byte() {
    for v in -50i64..=50 {
        let bytes = encode(&Decimal::from_i64(v));
        assert_eq!(bytes.len(), 1, "value {v} should take the one-byte path");
    }
    assert!(encode(&Decimal::from_i64(51)).len() > 1);
    assert!(encode(&Decimal::from_i64(-51)).len() > 1);
}
