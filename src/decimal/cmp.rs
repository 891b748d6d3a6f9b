//! Comparisons over [`Decimal`]: `eq`, `gt`, `gte`, `lt`, `lte`, `is_zero`,
//! `is_nan`.
//!
//! Two different equality notions are deliberately kept apart here:
//! `eq`/`gt`/... follow IEEE-754-style ordering, where NaN compares
//! false against everything including itself — this is what the
//! evaluator's `==`/`!=`/`<`/... operators need.
//! [`Decimal::host_eq`] instead treats `NaN ≡ NaN`, matching the
//! round-trip invariant the codec needs for its own tests.

use std::cmp::Ordering;

use super::bigint;
use super::Decimal;

impl Decimal {
    fn ordering(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        match (self, other) {
            (
                Decimal::Infinity { negative: n1 },
                Decimal::Infinity { negative: n2 },
            ) => Some(if n1 == n2 {
                Ordering::Equal
            } else if *n1 {
                Ordering::Less
            } else {
                Ordering::Greater
            }),
            (Decimal::Infinity { negative }, _) => {
                Some(if *negative { Ordering::Less } else { Ordering::Greater })
            }
            (_, Decimal::Infinity { negative }) => {
                Some(if *negative { Ordering::Greater } else { Ordering::Less })
            }
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
                let z1 = d1.as_slice() == [0];
                let z2 = d2.as_slice() == [0];
                if z1 && z2 {
                    return Some(Ordering::Equal);
                }
                if z1 {
                    return Some(if *n2 { Ordering::Greater } else { Ordering::Less });
                }
                if z2 {
                    return Some(if *n1 { Ordering::Less } else { Ordering::Greater });
                }
                if n1 != n2 {
                    return Some(if *n1 { Ordering::Less } else { Ordering::Greater });
                }
                let g1 = Decimal::limb_digits(d1);
                let g2 = Decimal::limb_digits(d2);
                let magnitude = bigint::cmp_magnitude(&g1, *e1, &g2, *e2);
                Some(if *n1 { magnitude.reverse() } else { magnitude })
            }
            _ => unreachable!("Nan handled above"),
        }
    }

    /// IEEE-754-style equality: `NaN` never equals anything, including
    /// itself.
    #[must_use]
    pub fn eq(&self, other: &Self) -> bool {
        self.ordering(other) == Some(Ordering::Equal)
    }

    #[must_use]
    pub fn gt(&self, other: &Self) -> bool {
        self.ordering(other) == Some(Ordering::Greater)
    }

    #[must_use]
    pub fn gte(&self, other: &Self) -> bool {
        matches!(self.ordering(other), Some(Ordering::Greater | Ordering::Equal))
    }

    #[must_use]
    pub fn lt(&self, other: &Self) -> bool {
        self.ordering(other) == Some(Ordering::Less)
    }

    #[must_use]
    pub fn lte(&self, other: &Self) -> bool {
        matches!(self.ordering(other), Some(Ordering::Less | Ordering::Equal))
    }

    /// Equality that treats `NaN ≡ NaN` and distinguishes `+0`/`-0` —
    /// the notion a codec round-trip (`decode(encode(v)) == v`) needs,
    /// as opposed to ordinary IEEE-754-style comparison.
    #[must_use]
    pub fn host_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Decimal::Nan, Decimal::Nan) => true,
            (
                Decimal::Infinity { negative: n1 },
                Decimal::Infinity { negative: n2 },
            ) => n1 == n2,
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
            ) => n1 == n2 && e1 == e2 && d1 == d2,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_never_equals_under_ieee_eq() {
        assert!(!Decimal::nan().eq(&Decimal::nan()));
        assert!(!Decimal::nan().gt(&Decimal::zero()));
        assert!(!Decimal::nan().lt(&Decimal::zero()));
    }

    #[test]
    fn nan_equals_itself_under_host_eq() {
        assert!(Decimal::nan().host_eq(&Decimal::nan()));
    }

    #[test]
    fn signed_zero_compares_equal_but_not_host_eq() {
        assert!(Decimal::zero().eq(&Decimal::neg_zero()));
        assert!(!Decimal::zero().host_eq(&Decimal::neg_zero()));
    }

    #[test]
    fn magnitude_ordering() {
        let a = Decimal::from_str("1.5").unwrap();
        let b = Decimal::from_str("2").unwrap();
        assert!(a.lt(&b));
        assert!(b.gt(&a));
        assert!(b.negate().lt(&a.negate()));
    }
}
