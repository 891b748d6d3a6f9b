//! The evaluator's failure kinds, each carrying the offending symbol or
//! identifier text.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Wrong shape of argument to the top-level entry point. Largely
    /// subsumed by Rust's type system here (see [`crate::evaluator::Evaluator`]'s
    /// docs) — this variant remains for the one case the type system
    /// can't rule out: rebinding a slot with a value of the wrong kind
    /// (function vs. value).
    #[error("wrong binding kind for an existing identifier")]
    Type,
    #[error("{0:?} is not a valid identifier")]
    InvalidIdentifier(String),
    #[error("unexpected symbol {0:?}")]
    UnknownSymbol(String),
    #[error("syntax error near {0:?}")]
    Syntax(String),
    #[error("{0:?} is not in scope")]
    IdentifierNotInScope(String),
    #[error("no expression has been evaluated yet")]
    NoExpressionToReevaluate,
}
