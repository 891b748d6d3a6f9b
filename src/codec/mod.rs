//! A compact, self-describing binary codec for [`Decimal`] values.
//!
//! The wire format is this crate's own invention — there is no
//! pre-existing decimal wire format it aims to be compatible with —
//! built around three ideas: a single reserved byte for each special
//! value, a single-byte fast path for small integers, and a general path
//! whose mantissa is a base conversion from base-10,000,007-ish
//! ([`RADIX`]) to base 256 with run-length compression for long
//! stretches of all-zero or all-nine limbs.
//!
//! `encode`/`decode` are pure and reentrant — no shared state crosses
//! calls.

use crate::decimal::{Context, Decimal, BASE};

/// `BASE + 2`: the source base for the mantissa's base conversion. The
/// two values above `BASE` are the run-length sentinels below.
pub const RADIX: u32 = BASE + 2;
/// Marks a following repeat count for a run of all-zero limbs.
pub const ZEROS_SIGNIFIER: u32 = BASE;
/// Marks a following repeat count for a run of all-nine (`BASE - 1`) limbs.
pub const NINES_SIGNIFIER: u32 = BASE + 1;

const FIRST_BYTE_NAN: u8 = 0b0100_0000;
const FIRST_BYTE_POS_INF: u8 = 0b0111_1111;
const FIRST_BYTE_NEG_INF: u8 = 0b1111_1111;

/// Encodes `value` into its minimal byte representation.
#[must_use]
pub fn encode(value: &Decimal) -> Vec<u8> {
    match value {
        Decimal::Nan => vec![FIRST_BYTE_NAN],
        Decimal::Infinity { negative: false } => vec![FIRST_BYTE_POS_INF],
        Decimal::Infinity { negative: true } => vec![FIRST_BYTE_NEG_INF],
        Decimal::Finite {
            negative,
            exponent,
            limbs,
        } => {
            if let Some(byte) = encode_small_int(*negative, *exponent, limbs) {
                vec![byte]
            } else {
                encode_general(*negative, *exponent, limbs)
            }
        }
    }
}

/// Decodes a byte string produced by [`encode`], or reconstructed from
/// some other source, back into a [`Decimal`].
///
/// Returns `None` for the empty byte string, treating it as a sentinel
/// for "no value" rather than an error. `ctx` supplies the `minE`/`maxE`
/// bounds the exponent range check validates against; a decoded value
/// whose exponent falls outside those bounds collapses to NaN.
#[must_use]
pub fn decode(bytes: &[u8], ctx: &Context) -> Option<Decimal> {
    if bytes.is_empty() {
        return None;
    }
    if bytes.len() == 1 {
        let b = bytes[0];
        return Some(match b {
            FIRST_BYTE_NAN => Decimal::Nan,
            FIRST_BYTE_POS_INF => Decimal::Infinity { negative: false },
            FIRST_BYTE_NEG_INF => Decimal::Infinity { negative: true },
            _ => decode_small_int(b),
        });
    }
    Some(range_checked(decode_general(bytes), ctx))
}

fn range_checked(value: Decimal, ctx: &Context) -> Decimal {
    if let Decimal::Finite { exponent, .. } = &value {
        if *exponent > ctx.get_max_e() || *exponent < ctx.get_min_e() {
            tracing::debug!(
                exponent,
                max_e = ctx.get_max_e(),
                min_e = ctx.get_min_e(),
                "decoded exponent out of range, collapsing to NaN"
            );
            return Decimal::Nan;
        }
    }
    value
}

/// The single-byte small-integer fast path:
/// any finite integer `0..=50`, represented by the decimal's own
/// one-limb normalized form, packs into a single byte.
fn encode_small_int(negative: bool, exponent: i64, limbs: &[u32]) -> Option<u8> {
    if limbs.len() != 1 {
        return None;
    }
    let limb = limbs[0];
    if limb > 50 {
        return None;
    }
    let expected_exponent = if limb < 10 { 0 } else { 1 };
    if exponent != expected_exponent {
        return None;
    }
    let (v, high_half) = if limb <= 25 {
        (limb as u8 + 38, false)
    } else {
        (limb as u8 + 12, true)
    };
    let mut byte = v;
    if high_half {
        byte |= 0x40;
    }
    if negative {
        byte |= 0x80;
    }
    Some(byte)
}

fn decode_small_int(byte: u8) -> Decimal {
    let negative = byte & 0x80 != 0;
    let high_half = byte & 0x40 != 0;
    let v = (byte & 0x3F) as i32;
    let value = (if high_half { v - 12 } else { v - 38 }).max(0) as u32;
    let exponent = if value < 10 { 0 } else { 1 };
    Decimal::Finite {
        negative,
        exponent,
        limbs: vec![value],
    }
}

fn encode_general(negative: bool, exponent: i64, limbs: &[u32]) -> Vec<u8> {
    let mut first = if negative { 0x80 } else { 0 };
    let exp_negative = exponent < 0;
    if exp_negative {
        first |= 0x40;
    }
    let magnitude = exponent.unsigned_abs();

    let mut exp_bytes: Vec<u8> = Vec::new();
    if magnitude == 0 {
        // v = 0, already the default.
    } else if magnitude <= 30 {
        first |= (magnitude as u8 + 7) & 0x3F;
    } else {
        let mut m = magnitude;
        while m > 0 {
            exp_bytes.push((m & 0xFF) as u8);
            m >>= 8;
        }
        first |= exp_bytes.len() as u8;
    }

    let mut out = Vec::with_capacity(1 + exp_bytes.len() + limbs.len());
    out.push(first);
    out.extend_from_slice(&exp_bytes);
    out.extend_from_slice(&mantissa_to_bytes(&tokens_from_limbs(limbs)));
    out
}

fn decode_general(bytes: &[u8]) -> Decimal {
    let first = bytes[0];
    let negative = first & 0x80 != 0;
    let exp_negative = first & 0x40 != 0;
    let v = first & 0x3F;

    let mut idx = 1usize;
    let magnitude: i64 = if v == 0 {
        0
    } else if v <= 7 {
        let n = v as usize;
        let mut m: u64 = 0;
        for i in 0..n {
            let b = *bytes.get(idx + i).unwrap_or(&0) as u64;
            m |= b << (8 * i);
        }
        idx += n;
        m as i64
    } else {
        v as i64 - 7
    };
    let exponent = if exp_negative { -magnitude } else { magnitude };

    let mantissa_bytes = bytes.get(idx..).unwrap_or(&[]);
    let tokens = bytes_to_tokens(mantissa_bytes);
    let limbs = limbs_from_tokens(&tokens);

    Decimal::Finite {
        negative,
        exponent,
        limbs,
    }
}

/// Substitutes runs of 3-or-more identical all-zero or all-nine limbs
/// with a `(signifier, count)` token pair; everything else passes
/// through literally.
fn tokens_from_limbs(limbs: &[u32]) -> Vec<u32> {
    let mut tokens = Vec::with_capacity(limbs.len());
    let mut i = 0;
    while i < limbs.len() {
        let v = limbs[i];
        let mut run_len = 1usize;
        while i + run_len < limbs.len() && limbs[i + run_len] == v {
            run_len += 1;
        }
        if (v == 0 || v == BASE - 1) && run_len > 2 {
            let signifier = if v == 0 { ZEROS_SIGNIFIER } else { NINES_SIGNIFIER };
            tokens.push(signifier);
            tokens.push(run_len as u32);
        } else {
            tokens.extend(std::iter::repeat(v).take(run_len));
        }
        i += run_len;
    }
    tokens
}

/// Expands `(signifier, count)` token pairs back into literal limb runs.
fn limbs_from_tokens(tokens: &[u32]) -> Vec<u32> {
    let mut limbs = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let t = tokens[i];
        if t == ZEROS_SIGNIFIER || t == NINES_SIGNIFIER {
            let count = tokens.get(i + 1).copied().unwrap_or(0) as usize;
            let value = if t == ZEROS_SIGNIFIER { 0 } else { BASE - 1 };
            limbs.extend(std::iter::repeat(value).take(count));
            i += 2;
        } else {
            limbs.push(t);
            i += 1;
        }
    }
    if limbs.is_empty() {
        limbs.push(0);
    }
    limbs
}

/// Base conversion from base [`RADIX`] to base 256: Horner's method over
/// the token sequence, most-significant token first, maintained as a
/// growable big-endian base-256 byte buffer.
fn mantissa_to_bytes(tokens: &[u32]) -> Vec<u8> {
    let mut acc: Vec<u8> = Vec::new();
    for &token in tokens {
        acc = mul_add_u8_bigint(&acc, RADIX, token);
    }
    acc
}

/// `acc * radix + add`, where `acc` is big-endian base-256 digits.
fn mul_add_u8_bigint(acc: &[u8], radix: u32, add: u32) -> Vec<u8> {
    let mut digits: Vec<u32> = acc.iter().rev().map(|&b| b as u32).collect();
    let mut carry: u64 = add as u64;
    for d in digits.iter_mut() {
        let v = (*d as u64) * radix as u64 + carry;
        *d = (v % 256) as u32;
        carry = v / 256;
    }
    while carry > 0 {
        digits.push((carry % 256) as u32);
        carry /= 256;
    }
    digits.into_iter().rev().map(|v| v as u8).collect()
}

/// The inverse of [`mantissa_to_bytes`]: repeatedly divides the base-256
/// accumulator by [`RADIX`], collecting remainders (each a base-`RADIX`
/// token) until the accumulator reaches zero, then restores the
/// original most-significant-first token order.
fn bytes_to_tokens(bytes: &[u8]) -> Vec<u32> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let mut acc: Vec<u8> = bytes.to_vec();
    let mut tokens_reversed = Vec::new();
    loop {
        let (quotient, remainder) = divmod_u32_bigint(&acc, RADIX);
        tokens_reversed.push(remainder);
        let quotient = strip_leading_zero_bytes(quotient);
        if quotient == [0] {
            break;
        }
        acc = quotient;
    }
    tokens_reversed.reverse();
    tokens_reversed
}

/// Divides a big-endian base-256 integer by a `u32` divisor, returning
/// `(quotient, remainder)`.
fn divmod_u32_bigint(a: &[u8], divisor: u32) -> (Vec<u8>, u32) {
    let mut quotient = Vec::with_capacity(a.len());
    let mut rem: u64 = 0;
    for &byte in a {
        let cur = rem * 256 + byte as u64;
        let q = cur / divisor as u64;
        rem = cur % divisor as u64;
        quotient.push(q as u8);
    }
    (quotient, rem as u32)
}

fn strip_leading_zero_bytes(mut v: Vec<u8>) -> Vec<u8> {
    let mut start = 0;
    while start + 1 < v.len() && v[start] == 0 {
        start += 1;
    }
    if start > 0 {
        v.drain(0..start);
    }
    if v.is_empty() {
        v.push(0);
    }
    v
}
