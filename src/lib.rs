//! A compact self-describing binary codec and a Pratt-parsed arithmetic
//! evaluator for arbitrary-precision decimals.
//!
//! [`decimal`] supplies the host `Decimal` type the other two modules
//! build on; [`codec`] turns one into a short byte string and back;
//! [`evaluator`] parses and runs arithmetic/boolean expressions over
//! `Decimal` values, with an instance-local scope of variable and
//! function bindings.

pub mod codec;
pub mod decimal;
pub mod evaluator;

pub use decimal::{Context, Decimal, RoundingMode};
