//! Arithmetic/boolean expression evaluation over [`Decimal`]: a
//! tokenizer with implicit multiplication, a Pratt parser, and an
//! instance-local scope of variable and function bindings.
//!
//! A dynamically-typed host might expose one entry point overloaded
//! across four call shapes: `(expression, scope)`, `(expression, no
//! scope)`, `(rebinding map, no expression)`, and "anything else is a
//! type error". In a statically typed host that overload collapses into
//! two methods — [`Evaluator::eval`] and [`Evaluator::rebind`] — since
//! Rust's type system already rules the fourth shape out by construction;
//! see each method's docs for which call shape it covers.

mod error;
mod lexer;
mod parser;
mod scope;
mod token;

pub use error::Error;
pub use scope::Binding;
pub use token::{IdentifierKind, Operator, Token};

use std::collections::HashMap;

use crate::decimal::{Context, Decimal};

use lexer::tokenize;
use parser::Parser;
use scope::Scope;

/// Owns the state one line of an interactive evaluator session would
/// keep between calls: the installed scope, the tokens from the last
/// successful parse, the expression text they came from, and the
/// arithmetic [`Context`] every operator call is rounded under.
pub struct Evaluator {
    scope: Scope,
    tokens: Vec<Token>,
    expression: String,
    ctx: Context,
}

impl Evaluator {
    #[must_use]
    pub fn new(ctx: Context) -> Self {
        Self {
            scope: Scope::empty(),
            tokens: Vec::new(),
            expression: String::new(),
            ctx,
        }
    }

    /// The last successfully tokenized source text, after the `**` → `^`
    /// rewrite and implicit-`*` insertion.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Tokenizes and evaluates `source`. Covers the first two call
    /// shapes: passing `Some(bindings)` replaces the scope wholesale
    /// before tokenizing (so the tokenizer's identifier table reflects
    /// the new names); passing `None` reuses whatever scope is already
    /// installed.
    ///
    /// Nothing is committed to the evaluator's stored state unless the
    /// whole call succeeds — a failure during tokenizing or parsing
    /// leaves the scope, tokens, and expression exactly as they were
    /// before the call.
    pub fn eval(
        &mut self,
        source: &str,
        scope: Option<HashMap<String, Binding>>,
    ) -> Result<Decimal, Error> {
        let scope = match scope {
            Some(bindings) => Scope::install(bindings)?,
            None => self.scope.clone(),
        };
        let lexed = tokenize(source, &scope)?;
        let result = Parser::new(&lexed.tokens, &scope, &self.ctx).parse()?;
        self.scope = scope;
        self.tokens = lexed.tokens;
        self.expression = lexed.expression;
        Ok(result)
    }

    /// Updates existing scope bindings in place and re-evaluates the
    /// previously tokenized expression without re-tokenizing it — the
    /// rebinding call shape. Fails with [`Error::NoExpressionToReevaluate`]
    /// if nothing has been evaluated yet, and otherwise commits the
    /// rebound scope only if re-evaluation also succeeds.
    pub fn rebind(&mut self, updates: HashMap<String, Binding>) -> Result<Decimal, Error> {
        if self.tokens.is_empty() {
            return Err(Error::NoExpressionToReevaluate);
        }
        let mut scope = self.scope.clone();
        scope.rebind(updates)?;
        let result = Parser::new(&self.tokens, &scope, &self.ctx).parse()?;
        self.scope = scope;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_with_fresh_scope_then_rebind() {
        let mut ev = Evaluator::new(Context::default());
        let scope = HashMap::from([
            ("x".to_string(), Binding::Value(Decimal::from_i64(2))),
            ("y".to_string(), Binding::Value(Decimal::from_i64(3))),
        ]);
        let result = ev.eval("x^y", Some(scope)).unwrap();
        assert_eq!(result.to_string(), "8");

        let result = ev
            .rebind(HashMap::from([("y".to_string(), Binding::Value(Decimal::from_i64(-3)))]))
            .unwrap();
        assert_eq!(result.to_string(), "0.125");

        let result = ev
            .rebind(HashMap::from([("x".to_string(), Binding::Value(Decimal::from_i64(4)))]))
            .unwrap();
        assert_eq!(result.to_string(), "0.015625");

        let err = ev
            .rebind(HashMap::from([("z".to_string(), Binding::Value(Decimal::from_i64(5)))]))
            .unwrap_err();
        assert!(matches!(err, Error::IdentifierNotInScope(name) if name == "z"));
    }

    #[test]
    fn rebind_before_any_eval_fails() {
        let mut ev = Evaluator::new(Context::default());
        assert!(matches!(
            ev.rebind(HashMap::new()),
            Err(Error::NoExpressionToReevaluate)
        ));
    }

    #[test]
    fn failed_install_leaves_previous_scope_untouched() {
        let mut ev = Evaluator::new(Context::default());
        ev.eval("x", Some(HashMap::from([("x".to_string(), Binding::Value(Decimal::from_i64(1)))])))
            .unwrap();

        let bad_scope = HashMap::from([("2bad".to_string(), Binding::Value(Decimal::from_i64(9)))]);
        assert!(ev.eval("x", Some(bad_scope)).is_err());

        assert_eq!(ev.eval("x", None).unwrap().to_string(), "1");
    }

    #[test]
    fn reusing_scope_across_calls() {
        let mut ev = Evaluator::new(Context::default());
        ev.eval("x", Some(HashMap::from([("x".to_string(), Binding::Value(Decimal::from_i64(7)))])))
            .unwrap();
        assert_eq!(ev.eval("x + 1", None).unwrap().to_string(), "8");
    }
}
