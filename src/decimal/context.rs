//! Precision, rounding, and exponent-range configuration shared by the
//! decimal arithmetic kernel, the codec's range check, and the evaluator.

/// Rounding mode applied when an arithmetic result carries more significant
/// digits than [`Context::precision`] allows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to nearest, ties to even — the IEEE 754 default.
    HalfEven,
    /// Round to nearest, ties away from zero.
    HalfUp,
    /// Always round toward zero (truncate).
    Down,
    /// Always round away from zero.
    Up,
}

/// Precision, rounding mode, and exponent bounds for [`Decimal`][super::Decimal]
/// arithmetic and for the codec's decode-time range check.
///
/// A `Context` is plain data — cloning it is cheap and there is no implicit
/// process-wide default read by `decimal` itself. [`Evaluator`][crate::evaluator::Evaluator]
/// owns one as part of its instance-local state and threads it through
/// every arithmetic call it makes on behalf of the expression being
/// evaluated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Context {
    precision: u32,
    rounding: RoundingMode,
    max_e: i64,
    min_e: i64,
}

impl Context {
    /// Starts building a context from [`Context::default`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    #[inline]
    #[must_use]
    pub fn rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    #[inline]
    #[must_use]
    pub fn max_e(mut self, max_e: i64) -> Self {
        self.max_e = max_e;
        self
    }

    #[inline]
    #[must_use]
    pub fn min_e(mut self, min_e: i64) -> Self {
        self.min_e = min_e;
        self
    }

    #[inline]
    #[must_use]
    pub fn get_precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    #[must_use]
    pub fn get_rounding(&self) -> RoundingMode {
        self.rounding
    }

    #[inline]
    #[must_use]
    pub fn get_max_e(&self) -> i64 {
        self.max_e
    }

    #[inline]
    #[must_use]
    pub fn get_min_e(&self) -> i64 {
        self.min_e
    }
}

impl Default for Context {
    /// Decimal128-class defaults: 34 significant digits, exponents bounded
    /// to a range comfortably inside what 7 little-endian exponent bytes
    /// (the codec's widest framing) can address.
    #[inline]
    fn default() -> Self {
        Self {
            precision: 34,
            rounding: RoundingMode::HalfEven,
            max_e: 9_000_000_000_000_000,
            min_e: -9_000_000_000_000_000,
        }
    }
}
