//! Parsing a [`Decimal`] from a decimal-literal string, an `i64`, or an
//! `f64`.

use super::bigint;
use super::error::ParseDecimalError;
use super::Decimal;

impl Decimal {
    /// Parses `NaN`, `Infinity`/`-Infinity`, or a decimal literal of the
    /// shape `[sign] digits [. digits] [(e|E) [sign] digits]`.
    pub fn from_str(s: &str) -> Result<Self, ParseDecimalError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseDecimalError::Empty);
        }
        if trimmed.eq_ignore_ascii_case("nan") {
            return Ok(Decimal::Nan);
        }
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if rest.eq_ignore_ascii_case("infinity") || rest.eq_ignore_ascii_case("inf") {
            return Ok(Decimal::Infinity { negative });
        }

        let bytes = rest.as_bytes();
        let mut i = 0;
        let mut int_digits = Vec::new();
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            int_digits.push(bytes[i] - b'0');
            i += 1;
        }
        let mut frac_digits = Vec::new();
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                frac_digits.push(bytes[i] - b'0');
                i += 1;
            }
        }
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(ParseDecimalError::InvalidLiteral(s.to_string()));
        }

        let mut exp_adjust: i64 = 0;
        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            i += 1;
            let exp_negative = if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
                let neg = bytes[i] == b'-';
                i += 1;
                neg
            } else {
                false
            };
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if start == i {
                return Err(ParseDecimalError::InvalidLiteral(s.to_string()));
            }
            let mag: i64 = rest[start..i]
                .parse()
                .map_err(|_| ParseDecimalError::InvalidLiteral(s.to_string()))?;
            exp_adjust = if exp_negative { -mag } else { mag };
        }
        if i != bytes.len() {
            return Err(ParseDecimalError::InvalidLiteral(s.to_string()));
        }

        let digits: Vec<u8> = int_digits
            .iter()
            .copied()
            .chain(frac_digits.iter().copied())
            .collect();
        let first_weight: i64 = if !int_digits.is_empty() {
            int_digits.len() as i64 - 1
        } else {
            -1
        };
        let exponent = first_weight
            .checked_add(exp_adjust)
            .ok_or(ParseDecimalError::ExponentOverflow(exp_adjust))?;
        let (digits, exponent) = bigint::normalize(digits, exponent);
        let limbs = Decimal::pack_limbs(&digits);
        let exponent = if limbs.as_slice() == [0] { 0 } else { exponent };
        Ok(Decimal::Finite {
            negative,
            exponent,
            limbs,
        })
    }

    /// Builds an exact finite `Decimal` from a machine integer.
    #[must_use]
    pub fn from_i64(v: i64) -> Self {
        if v == 0 {
            return Decimal::zero();
        }
        let negative = v < 0;
        let s = v.unsigned_abs().to_string();
        let digits: Vec<u8> = s.bytes().map(|b| b - b'0').collect();
        let exponent = digits.len() as i64 - 1;
        Decimal::Finite {
            negative,
            exponent,
            limbs: Decimal::pack_limbs(&digits),
        }
    }

    /// Builds a `Decimal` from an `f64` via its shortest round-tripping
    /// decimal text (what `{}`-formatting an `f64` produces in Rust),
    /// then parses that text. This is the pragmatic bridge the host
    /// decimal type uses to absorb floating-point input; it does not
    /// claim bit-for-bit fidelity to the binary float's exact value.
    pub fn from_f64(v: f64) -> Result<Self, ParseDecimalError> {
        if v.is_nan() {
            return Ok(Decimal::Nan);
        }
        if v.is_infinite() {
            return Ok(Decimal::Infinity {
                negative: v.is_sign_negative(),
            });
        }
        if v == 0.0 {
            return Ok(if v.is_sign_negative() {
                Decimal::neg_zero()
            } else {
                Decimal::zero()
            });
        }
        Decimal::from_str(&format!("{v}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer() {
        let d = Decimal::from_str("123").unwrap();
        assert_eq!(d.to_string(), "123");
    }

    #[test]
    fn parses_leading_zero_fraction() {
        let d = Decimal::from_str("007.500").unwrap();
        assert_eq!(d.to_string(), "7.5");
    }

    #[test]
    fn parses_scientific_notation() {
        let d = Decimal::from_str("1.5e3").unwrap();
        assert_eq!(d.to_string(), "1500");
        let d = Decimal::from_str("1.5e-3").unwrap();
        assert_eq!(d.to_string(), "0.0015");
    }

    #[test]
    fn parses_sign_and_specials() {
        assert!(Decimal::from_str("-0").unwrap().is_zero());
        assert_eq!(Decimal::from_str("-0").unwrap().sign(), super::super::Sign::Negative);
        assert!(Decimal::from_str("NaN").unwrap().is_nan());
        assert!(Decimal::from_str("-Infinity").unwrap().is_infinite());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Decimal::from_str("").is_err());
        assert!(Decimal::from_str("12a").is_err());
        assert!(Decimal::from_str(".").is_err());
    }

    #[test]
    fn from_i64_round_trips() {
        assert_eq!(Decimal::from_i64(-42).to_string(), "-42");
        assert_eq!(Decimal::from_i64(0).to_string(), "0");
    }
}
