//! The decimal value model shared by the codec and the evaluator.
//!
//! The arithmetic library a production build would reach for is treated
//! as an external collaborator elsewhere; this module is a concrete,
//! minimal arbitrary-precision decimal standing in for it: sign, decimal
//! exponent of the first significant digit, and a sequence of
//! base-10,000,000 limbs, so the codec and evaluator in this crate
//! exercise real values rather than a mock.
//!
//! The limb convention follows a bit-packed-number-format style (a
//! leading limb that carries between 1 and 7 significant digits, followed
//! by always-full 7-digit limbs) using decimal limbs instead of binary
//! bytes, since that is what the codec's run-length compression operates
//! over.

mod arith;
mod bigint;
mod cmp;
mod context;
mod error;
mod parse;
mod sign;

pub use context::{Context, RoundingMode};
pub use error::ParseDecimalError;
pub use sign::Sign;

use alloc_prelude::*;

/// The base of one limb: each limb is a decimal digit group in `[0, BASE)`.
pub const BASE: u32 = 10_000_000;

/// An arbitrary-precision decimal value.
///
/// See the module documentation for the representation invariants. `Nan`
/// and `Infinity` are the two "special" shapes, carrying only a sign;
/// `Finite` covers everything else, including zero (`limbs == [0]` is the
/// sole case where a leading limb of zero is permitted).
#[derive(Clone, Debug)]
pub enum Decimal {
    Nan,
    Infinity {
        negative: bool,
    },
    Finite {
        negative: bool,
        /// The base-10 exponent of the most significant digit, i.e. the
        /// decimal point sits `exponent + 1` digits into the concatenated
        /// digit string formed from the limbs.
        exponent: i64,
        /// Big-endian base-[`BASE`] digit groups. `limbs[0]` is in
        /// `[1, BASE)` unless the value is zero, in which case
        /// `limbs == [0]`. No trailing all-zero limb is kept.
        limbs: Vec<u32>,
    },
}

impl Decimal {
    /// The `+0` value.
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Decimal::Finite {
            negative: false,
            exponent: 0,
            limbs: vec![0],
        }
    }

    /// The `-0` value.
    #[inline]
    #[must_use]
    pub fn neg_zero() -> Self {
        Decimal::Finite {
            negative: true,
            exponent: 0,
            limbs: vec![0],
        }
    }

    #[inline]
    #[must_use]
    pub fn nan() -> Self {
        Decimal::Nan
    }

    #[inline]
    #[must_use]
    pub fn infinity() -> Self {
        Decimal::Infinity { negative: false }
    }

    #[inline]
    #[must_use]
    pub fn neg_infinity() -> Self {
        Decimal::Infinity { negative: true }
    }

    #[inline]
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Decimal::Nan)
    }

    #[inline]
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Decimal::Infinity { .. })
    }

    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self, Decimal::Finite { .. })
    }

    /// `true` for either zero limb-representation (`+0` or `-0`).
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, Decimal::Finite { limbs, .. } if limbs.as_slice() == [0])
    }

    /// The sign of this value; `Sign::Nan` only for [`Decimal::Nan`].
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        match self {
            Decimal::Nan => Sign::Nan,
            Decimal::Infinity { negative } | Decimal::Finite { negative, .. } => {
                Sign::from_bit(*negative)
            }
        }
    }

    /// The exponent of the most significant digit, or `None` for the
    /// special values, which carry a NaN exponent instead.
    #[inline]
    #[must_use]
    pub fn exponent(&self) -> Option<i64> {
        match self {
            Decimal::Finite { exponent, .. } => Some(*exponent),
            _ => None,
        }
    }

    /// The limb sequence, or `None` for the special values.
    #[inline]
    #[must_use]
    pub fn limbs(&self) -> Option<&[u32]> {
        match self {
            Decimal::Finite { limbs, .. } => Some(limbs),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn negate(&self) -> Self {
        match self {
            Decimal::Nan => Decimal::Nan,
            Decimal::Infinity { negative } => Decimal::Infinity {
                negative: !negative,
            },
            Decimal::Finite {
                negative,
                exponent,
                limbs,
            } => Decimal::Finite {
                negative: !negative,
                exponent: *exponent,
                limbs: limbs.clone(),
            },
        }
    }

    /// The full big-endian decimal digit string: `limbs[0]` unpadded,
    /// every following limb zero-padded to 7 digits. Empty only for the
    /// special values.
    pub(crate) fn digit_string(limbs: &[u32]) -> String {
        let mut out = String::with_capacity(limbs.len() * 7);
        for (i, limb) in limbs.iter().enumerate() {
            if i == 0 {
                out.push_str(&limb.to_string());
            } else {
                out.push_str(&format!("{limb:07}"));
            }
        }
        out
    }

    /// Packs a big-endian decimal digit string (no leading zero, unless
    /// it is exactly `"0"`) back into limbs: the first group holds
    /// whatever 1-7 digits are left over, every following group is
    /// exactly 7 digits.
    pub(crate) fn pack_limbs(digits: &[u8]) -> Vec<u32> {
        if digits.is_empty() {
            return vec![0];
        }
        let first_len = ((digits.len() - 1) % 7) + 1;
        let mut limbs = Vec::with_capacity((digits.len() - first_len) / 7 + 1);
        let mut push_group = |group: &[u8]| {
            let mut value = 0u32;
            for &d in group {
                value = value * 10 + d as u32;
            }
            limbs.push(value);
        };
        push_group(&digits[..first_len]);
        let mut i = first_len;
        while i < digits.len() {
            push_group(&digits[i..i + 7]);
            i += 7;
        }
        limbs
    }

    /// The limb sequence expanded into one decimal digit per byte
    /// (`0..=9`), big-endian — the shape [`bigint`]'s magnitude
    /// arithmetic operates on.
    pub(crate) fn limb_digits(limbs: &[u32]) -> Vec<u8> {
        Self::digit_string(limbs).bytes().map(|b| b - b'0').collect()
    }
}

impl core::fmt::Display for Decimal {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Decimal::Nan => fmt.write_str("NaN"),
            Decimal::Infinity { negative } => {
                fmt.write_str(if *negative { "-Infinity" } else { "Infinity" })
            }
            Decimal::Finite {
                negative,
                exponent,
                limbs,
            } => {
                if *negative {
                    fmt.write_str("-")?;
                }
                if limbs.as_slice() == [0] {
                    return fmt.write_str("0");
                }
                let digits = Self::digit_string(limbs);
                let digits = digits.as_bytes();
                // Render in plain notation when the exponent keeps the
                // point within or just past the digit string; scientific
                // notation otherwise.
                let point = exponent + 1;
                if point > 0 && (point as usize) <= digits.len() {
                    let (int_part, frac_part) = digits.split_at(point as usize);
                    fmt.write_str(core::str::from_utf8(int_part).unwrap())?;
                    if !frac_part.is_empty() {
                        write!(fmt, ".{}", core::str::from_utf8(frac_part).unwrap())?;
                    }
                    Ok(())
                } else if point <= 0 && point > -6 {
                    fmt.write_str("0.")?;
                    for _ in 0..(-point) {
                        fmt.write_str("0")?;
                    }
                    fmt.write_str(core::str::from_utf8(digits).unwrap())
                } else {
                    let first = digits[0] as char;
                    fmt.write_str(&first.to_string())?;
                    if digits.len() > 1 {
                        write!(fmt, ".{}", core::str::from_utf8(&digits[1..]).unwrap())?;
                    }
                    write!(fmt, "e{}{}", if *exponent >= 0 { "+" } else { "" }, exponent)
                }
            }
        }
    }
}

/// A tiny `alloc`-style prelude kept for a `no_std`-flavoured feel, even
/// though this crate itself targets `std` (the evaluator's scope and
/// regex-backed lexer need it).
mod alloc_prelude {
    pub(crate) use std::string::String;
    pub(crate) use std::vec;
    pub(crate) use std::vec::Vec;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_neg_zero_are_distinct_but_both_zero() {
        assert!(Decimal::zero().is_zero());
        assert!(Decimal::neg_zero().is_zero());
        assert_eq!(Decimal::zero().sign(), Sign::Positive);
        assert_eq!(Decimal::neg_zero().sign(), Sign::Negative);
    }

    #[test]
    fn nan_sign_is_nan() {
        assert_eq!(Decimal::nan().sign(), Sign::Nan);
        assert!(Decimal::nan().is_nan());
        assert!(Decimal::nan().exponent().is_none());
    }

    #[test]
    fn pack_and_digit_string_round_trip() {
        let digits: Vec<u8> = "123456789".bytes().map(|b| b - b'0').collect();
        let limbs = Decimal::pack_limbs(&digits);
        assert_eq!(limbs, vec![12, 3456789]);
        let rebuilt = Decimal::digit_string(&limbs);
        assert_eq!(rebuilt, "123456789");
    }

    #[test]
    fn display_plain_and_scientific() {
        let d = Decimal::Finite {
            negative: false,
            exponent: 0,
            limbs: vec![3],
        };
        assert_eq!(d.to_string(), "3");

        let frac = Decimal::Finite {
            negative: false,
            exponent: -1,
            limbs: vec![3],
        };
        assert_eq!(frac.to_string(), "0.3");
    }
}
