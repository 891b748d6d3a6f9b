//! Arithmetic over [`Decimal`]: `plus`, `minus`, `times`, `div`, `mod`,
//! `pow`, `sqrt`, rounded to the precision and rounding mode carried by a
//! [`Context`].
//!
//! A full arbitrary-precision decimal arithmetic library is its own
//! project; this is a minimal, genuinely-working stand-in, not a
//! production bignum library. `pow` takes an exact repeated-squaring path
//! for integer exponents and a binary-floating-point round trip for
//! fractional ones; `sqrt` seeds from the same round trip and refines
//! with one Newton-Raphson step. Both are documented simplifications.

use std::cmp::Ordering;

use super::bigint;
use super::{Context, Decimal, RoundingMode};

impl Decimal {
    #[must_use]
    pub fn plus(&self, other: &Self, ctx: &Context) -> Self {
        self.add_sub(other, ctx, false)
    }

    #[must_use]
    pub fn minus(&self, other: &Self, ctx: &Context) -> Self {
        self.add_sub(other, ctx, true)
    }

    fn add_sub(&self, other: &Self, ctx: &Context, subtract: bool) -> Self {
        if self.is_nan() || other.is_nan() {
            return Decimal::Nan;
        }
        let other = if subtract { other.negate() } else { other.clone() };
        match (self, &other) {
            (Decimal::Infinity { negative: n1 }, Decimal::Infinity { negative: n2 }) => {
                if n1 == n2 {
                    Decimal::Infinity { negative: *n1 }
                } else {
                    Decimal::Nan
                }
            }
            (Decimal::Infinity { negative }, _) => Decimal::Infinity { negative: *negative },
            (_, Decimal::Infinity { negative }) => Decimal::Infinity { negative: *negative },
            (
                Decimal::Finite {
                    negative: n1,
                    exponent: e1,
                    limbs: d1,
                },
                Decimal::Finite {
                    negative: n2,
                    exponent: e2,
                    limbs: d2,
                },
            ) => {
                let g1 = Decimal::limb_digits(d1);
                let g2 = Decimal::limb_digits(d2);
                let (digits, exponent, negative) = if n1 == n2 {
                    let (digits, exponent) = bigint::add_magnitudes(&g1, *e1, &g2, *e2);
                    (digits, exponent, *n1)
                } else {
                    match bigint::cmp_magnitude(&g1, *e1, &g2, *e2) {
                        Ordering::Equal => (vec![0], 0, false),
                        Ordering::Greater => {
                            let (d, e) = bigint::sub_magnitudes(&g1, *e1, &g2, *e2);
                            (d, e, *n1)
                        }
                        Ordering::Less => {
                            let (d, e) = bigint::sub_magnitudes(&g2, *e2, &g1, *e1);
                            (d, e, *n2)
                        }
                    }
                };
                Decimal::Finite {
                    negative,
                    exponent,
                    limbs: Decimal::pack_limbs(&digits),
                }
                .round(ctx)
            }
            _ => unreachable!("Nan handled above"),
        }
    }

    #[must_use]
    pub fn times(&self, other: &Self, ctx: &Context) -> Self {
        if self.is_nan() || other.is_nan() {
            return Decimal::Nan;
        }
        let negative = self.sign().bit() ^ other.sign().bit();
        match (self, other) {
            (Decimal::Infinity { .. }, _) | (_, Decimal::Infinity { .. }) => {
                if self.is_zero() || other.is_zero() {
                    return Decimal::Nan;
                }
                Decimal::Infinity { negative }
            }
            (
                Decimal::Finite {
                    exponent: e1,
                    limbs: d1,
                    ..
                },
                Decimal::Finite {
                    exponent: e2,
                    limbs: d2,
                    ..
                },
            ) => {
                if d1.as_slice() == [0] || d2.as_slice() == [0] {
                    return if negative {
                        Decimal::neg_zero()
                    } else {
                        Decimal::zero()
                    };
                }
                let g1 = Decimal::limb_digits(d1);
                let g2 = Decimal::limb_digits(d2);
                let (digits, exponent) = bigint::mul_magnitudes(&g1, *e1, &g2, *e2);
                Decimal::Finite {
                    negative,
                    exponent,
                    limbs: Decimal::pack_limbs(&digits),
                }
                .round(ctx)
            }
            _ => unreachable!("Nan handled above"),
        }
    }

    #[must_use]
    pub fn div(&self, other: &Self, ctx: &Context) -> Self {
        if self.is_nan() || other.is_nan() {
            return Decimal::Nan;
        }
        let negative = self.sign().bit() ^ other.sign().bit();
        if other.is_zero() && other.is_finite() {
            return if self.is_zero() {
                Decimal::Nan
            } else {
                Decimal::Infinity { negative }
            };
        }
        match (self, other) {
            (Decimal::Infinity { .. }, Decimal::Infinity { .. }) => Decimal::Nan,
            (Decimal::Infinity { .. }, _) => Decimal::Infinity { negative },
            (_, Decimal::Infinity { .. }) => {
                if negative {
                    Decimal::neg_zero()
                } else {
                    Decimal::zero()
                }
            }
            (
                Decimal::Finite {
                    exponent: e1,
                    limbs: d1,
                    ..
                },
                Decimal::Finite {
                    exponent: e2,
                    limbs: d2,
                    ..
                },
            ) => {
                if d1.as_slice() == [0] {
                    return if negative {
                        Decimal::neg_zero()
                    } else {
                        Decimal::zero()
                    };
                }
                let g1 = Decimal::limb_digits(d1);
                let g2 = Decimal::limb_digits(d2);
                let wanted = ctx.get_precision() as usize + 2;
                let (qdigits, _exact, k0, n1) = bigint::long_divide(&g1, &g2, wanted);
                let lo1 = *e1 - g1.len() as i64 + 1;
                let lo2 = *e2 - g2.len() as i64 + 1;
                let exponent = (n1 as i64 - k0 as i64) + lo1 - lo2;
                Decimal::Finite {
                    negative,
                    exponent,
                    limbs: Decimal::pack_limbs(&qdigits),
                }
                .round(ctx)
            }
            _ => unreachable!("Nan handled above"),
        }
    }

    /// Truncated remainder: `self - trunc(self / other) * other`.
    #[must_use]
    pub fn rem(&self, other: &Self, ctx: &Context) -> Self {
        if self.is_nan() || other.is_nan() || other.is_zero() || self.is_infinite() {
            return Decimal::Nan;
        }
        if other.is_infinite() {
            return self.clone();
        }
        let guard = ctx.clone().precision(ctx.get_precision() + 20);
        let quotient = self.div(other, &guard).trunc();
        let product = quotient.times(other, &guard);
        self.minus(&product, ctx)
    }

    #[must_use]
    pub fn pow(&self, exponent: &Self, ctx: &Context) -> Self {
        if self.is_nan() || exponent.is_nan() {
            return Decimal::Nan;
        }
        if let Some(n) = exponent.to_i64_if_integer() {
            return self.pow_i64(n, ctx);
        }
        Decimal::from_f64(self.to_f64().powf(exponent.to_f64())).unwrap_or(Decimal::Nan)
    }

    fn pow_i64(&self, n: i64, ctx: &Context) -> Self {
        if n == 0 {
            return Decimal::from_i64(1);
        }
        let negative_exp = n < 0;
        let mut e = n.unsigned_abs();
        let mut result = Decimal::from_i64(1);
        let mut base = self.clone();
        while e > 0 {
            if e & 1 == 1 {
                result = result.times(&base, ctx);
            }
            base = base.times(&base, ctx);
            e >>= 1;
        }
        if negative_exp {
            Decimal::from_i64(1).div(&result, ctx)
        } else {
            result
        }
    }

    #[must_use]
    pub fn sqrt(&self, ctx: &Context) -> Self {
        if self.is_nan() {
            return Decimal::Nan;
        }
        if self.sign().bit() && !self.is_zero() {
            return Decimal::Nan;
        }
        if self.is_zero() {
            return self.clone();
        }
        if self.is_infinite() {
            return Decimal::Infinity { negative: false };
        }
        let seed = match Decimal::from_f64(self.to_f64().sqrt()) {
            Ok(d) if !d.is_nan() => d,
            _ => return Decimal::Nan,
        };
        let two = Decimal::from_i64(2);
        seed.plus(&self.div(&seed, ctx), ctx).div(&two, ctx).round(ctx)
    }

    /// Truncates toward zero to an integer, preserving sign.
    #[must_use]
    pub(crate) fn trunc(&self) -> Self {
        match self {
            Decimal::Finite {
                negative,
                exponent,
                limbs,
            } => {
                if *exponent < 0 {
                    return if *negative {
                        Decimal::neg_zero()
                    } else {
                        Decimal::zero()
                    };
                }
                let digits = Decimal::limb_digits(limbs);
                let keep = (*exponent + 1) as usize;
                if digits.len() <= keep {
                    return self.clone();
                }
                let (d, e) = bigint::normalize(digits[..keep].to_vec(), *exponent);
                Decimal::Finite {
                    negative: *negative,
                    exponent: e,
                    limbs: Decimal::pack_limbs(&d),
                }
            }
            other => other.clone(),
        }
    }

    pub(crate) fn to_i64_if_integer(&self) -> Option<i64> {
        match self {
            Decimal::Finite {
                negative,
                exponent,
                limbs,
            } => {
                if limbs.as_slice() == [0] {
                    return Some(0);
                }
                if *exponent < 0 {
                    return None;
                }
                let digits = Decimal::limb_digits(limbs);
                if digits.len() as i64 != exponent + 1 {
                    return None;
                }
                let s = Decimal::digit_string(limbs);
                let v: i64 = s.parse().ok()?;
                Some(if *negative { -v } else { v })
            }
            _ => None,
        }
    }

    pub(crate) fn to_f64(&self) -> f64 {
        match self {
            Decimal::Nan => f64::NAN,
            Decimal::Infinity { negative } => {
                if *negative {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }
            Decimal::Finite { .. } => self.to_string().parse().unwrap_or(f64::NAN),
        }
    }

    /// Rounds a finite value down to `ctx.precision()` significant
    /// digits, per `ctx.rounding()`.
    pub(crate) fn round(self, ctx: &Context) -> Self {
        match self {
            Decimal::Finite {
                negative,
                exponent,
                limbs,
            } => {
                let digits = Decimal::limb_digits(&limbs);
                let precision = ctx.get_precision() as usize;
                if digits.len() <= precision || digits == [0] {
                    return Decimal::Finite {
                        negative,
                        exponent,
                        limbs,
                    };
                }
                let (rounded, exponent) = round_digits(&digits, exponent, precision, ctx.get_rounding());
                Decimal::Finite {
                    negative,
                    exponent,
                    limbs: Decimal::pack_limbs(&rounded),
                }
            }
            other => other,
        }
    }
}

fn round_digits(digits: &[u8], exponent: i64, precision: usize, mode: RoundingMode) -> (Vec<u8>, i64) {
    if digits.len() <= precision {
        return (digits.to_vec(), exponent);
    }
    let mut kept: Vec<u8> = digits[..precision].to_vec();
    let next = digits[precision];
    let rest_nonzero = digits[precision + 1..].iter().any(|&d| d != 0);
    let round_up = match mode {
        RoundingMode::Down => false,
        RoundingMode::Up => next > 0 || rest_nonzero,
        RoundingMode::HalfUp => next >= 5,
        RoundingMode::HalfEven => {
            if next > 5 || (next == 5 && rest_nonzero) {
                true
            } else if next == 5 {
                kept.last().is_some_and(|&d| d % 2 == 1)
            } else {
                false
            }
        }
    };
    let mut exponent = exponent;
    if round_up {
        let mut i = kept.len();
        let mut carry = true;
        while carry && i > 0 {
            i -= 1;
            if kept[i] == 9 {
                kept[i] = 0;
            } else {
                kept[i] += 1;
                carry = false;
            }
        }
        if carry {
            kept.insert(0, 1);
            kept.pop();
            exponent += 1;
        }
    }
    (kept, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::default()
    }

    #[test]
    fn plus_exact() {
        let a = Decimal::from_str("0.1").unwrap();
        let b = Decimal::from_str("0.2").unwrap();
        assert_eq!(a.plus(&b, &ctx()).to_string(), "0.3");
    }

    #[test]
    fn minus_crosses_zero() {
        let a = Decimal::from_str("2").unwrap();
        let b = Decimal::from_str("5").unwrap();
        assert_eq!(a.minus(&b, &ctx()).to_string(), "-3");
    }

    #[test]
    fn times_basic() {
        let a = Decimal::from_str("1.5").unwrap();
        let b = Decimal::from_str("2").unwrap();
        assert_eq!(a.times(&b, &ctx()).to_string(), "3");
    }

    #[test]
    fn div_basic() {
        let a = Decimal::from_str("1").unwrap();
        let b = Decimal::from_str("4").unwrap();
        assert_eq!(a.div(&b, &ctx()).to_string(), "0.25");
    }

    #[test]
    fn div_by_zero_is_infinity() {
        let a = Decimal::from_str("1").unwrap();
        assert!(a.div(&Decimal::zero(), &ctx()).is_infinite());
        assert!(Decimal::zero().div(&Decimal::zero(), &ctx()).is_nan());
    }

    #[test]
    fn integer_pow_exact() {
        let base = Decimal::from_i64(2);
        let exp = Decimal::from_i64(10);
        assert_eq!(base.pow(&exp, &ctx()).to_string(), "1024");
    }

    #[test]
    fn negative_integer_pow() {
        let base = Decimal::from_i64(2);
        let exp = Decimal::from_i64(-3);
        assert_eq!(base.pow(&exp, &ctx()).to_string(), "0.125");
    }

    #[test]
    fn sqrt_perfect_square() {
        let n = Decimal::from_i64(4);
        assert_eq!(n.sqrt(&ctx()).to_string(), "2");
    }

    #[test]
    fn rounding_carries_into_new_digit() {
        let digits = [9u8, 9, 9];
        let (rounded, exp) = round_digits(&digits, 2, 3, RoundingMode::HalfUp);
        assert_eq!(rounded, vec![1, 0, 0]);
        assert_eq!(exp, 3);
    }
}
