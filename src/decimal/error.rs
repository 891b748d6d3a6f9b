use thiserror::Error;

/// Failure to parse a [`Decimal`][super::Decimal] from a string or a
/// non-finite binary float.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseDecimalError {
    #[error("empty string is not a valid decimal literal")]
    Empty,
    #[error("invalid decimal literal: {0:?}")]
    InvalidLiteral(String),
    #[error("exponent {0} overflows the supported range")]
    ExponentOverflow(i64),
}
