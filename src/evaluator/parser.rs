//! The Pratt (top-down operator precedence) parser: walks the token
//! stream produced by [`super::lexer`], driven by each operator's left
//! binding power from [`super::token::Operator::lbp`].

use crate::decimal::{Context, Decimal};

use super::error::Error;
use super::scope::{Binding, Scope};
use super::token::{IdentifierKind, Operator, Token};

pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    scope: &'a Scope,
    ctx: &'a Context,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], scope: &'a Scope, ctx: &'a Context) -> Self {
        Self {
            tokens,
            pos: 0,
            scope,
            ctx,
        }
    }

    /// Parses and evaluates the whole token stream, rejecting any
    /// trailing tokens left after a complete expression.
    pub fn parse(&mut self) -> Result<Decimal, Error> {
        let result = self.evaluate(0)?;
        match self.current() {
            Token::End => Ok(result),
            other => Err(Error::Syntax(describe(other))),
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn lbp_of_current(&self) -> u8 {
        match self.current() {
            Token::Operator(op) => op.lbp(),
            _ => 0,
        }
    }

    /// The core Pratt loop: consumes one prefix position, then keeps
    /// folding in infix operators whose binding power exceeds `rbp`.
    fn evaluate(&mut self, rbp: u8) -> Result<Decimal, Error> {
        let token = self.advance();
        let mut left = self.prefix(&token)?;
        while rbp < self.lbp_of_current() {
            let op_token = self.advance();
            left = self.infix(&op_token, left)?;
        }
        Ok(left)
    }

    fn prefix(&mut self, token: &Token) -> Result<Decimal, Error> {
        match token {
            Token::Number(d) => Ok(d.clone()),
            Token::Identifier {
                name,
                kind: IdentifierKind::Variable,
            } => match self.scope.lookup(name) {
                Some(Binding::Value(d)) => Ok(d.clone()),
                _ => Err(Error::IdentifierNotInScope(name.clone())),
            },
            Token::Identifier {
                name,
                kind: IdentifierKind::Function,
            } => self.call_function(name),
            Token::Operator(Operator::Plus) => self.evaluate(70),
            Token::Operator(Operator::Minus) => Ok(self.evaluate(70)?.negate()),
            Token::Operator(Operator::Bang) => {
                let operand = self.evaluate(70)?;
                Ok(bool_decimal(operand.is_zero()))
            }
            Token::Operator(Operator::Sqrt) => Ok(self.evaluate(79)?.sqrt(self.ctx)),
            Token::Operator(Operator::LParen) => {
                let inner = self.evaluate(0)?;
                self.expect(Operator::RParen)?;
                Ok(inner)
            }
            other => Err(Error::Syntax(describe(other))),
        }
    }

    fn infix(&mut self, token: &Token, left: Decimal) -> Result<Decimal, Error> {
        let Token::Operator(op) = token else {
            return Err(Error::Syntax(describe(token)));
        };
        match op {
            Operator::Caret => Ok(left.pow(&self.evaluate(79)?, self.ctx)),
            Operator::Star => Ok(left.times(&self.evaluate(60)?, self.ctx)),
            Operator::Slash => Ok(left.div(&self.evaluate(60)?, self.ctx)),
            Operator::Percent => Ok(left.rem(&self.evaluate(60)?, self.ctx)),
            Operator::Plus => Ok(left.plus(&self.evaluate(50)?, self.ctx)),
            Operator::Minus => Ok(left.minus(&self.evaluate(50)?, self.ctx)),
            Operator::Gt => Ok(bool_decimal(left.gt(&self.evaluate(40)?))),
            Operator::Gte => Ok(bool_decimal(left.gte(&self.evaluate(40)?))),
            Operator::Lt => Ok(bool_decimal(left.lt(&self.evaluate(40)?))),
            Operator::Lte => Ok(bool_decimal(left.lte(&self.evaluate(40)?))),
            Operator::EqEq => Ok(bool_decimal(left.eq(&self.evaluate(30)?))),
            Operator::NotEq => Ok(bool_decimal(!left.eq(&self.evaluate(30)?))),
            // Non-short-circuiting: both sides are always evaluated, only
            // the choice of which one to return is gated on truthiness.
            Operator::AndAnd => {
                let right = self.evaluate(20)?;
                Ok(if left.is_zero() { left } else { right })
            }
            Operator::OrOr => {
                let right = self.evaluate(10)?;
                Ok(if left.is_zero() { right } else { left })
            }
            _ => Err(Error::Syntax(describe(token))),
        }
    }

    fn call_function(&mut self, name: &str) -> Result<Decimal, Error> {
        let func = match self.scope.lookup(name) {
            Some(Binding::Function(f)) => f.clone(),
            _ => return Err(Error::IdentifierNotInScope(name.to_string())),
        };
        self.expect(Operator::LParen)?;
        let mut args = Vec::new();
        if !matches!(self.current(), Token::Operator(Operator::RParen)) {
            loop {
                args.push(self.evaluate(0)?);
                if matches!(self.current(), Token::Operator(Operator::Comma)) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(Operator::RParen)?;
        Ok(func(&args))
    }

    fn expect(&mut self, op: Operator) -> Result<(), Error> {
        match self.current() {
            Token::Operator(current) if *current == op => {
                self.advance();
                Ok(())
            }
            other => Err(Error::Syntax(describe(other))),
        }
    }
}

fn bool_decimal(b: bool) -> Decimal {
    if b {
        Decimal::from_i64(1)
    } else {
        Decimal::from_i64(0)
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(d) => d.to_string(),
        Token::Identifier { name, .. } => name.clone(),
        Token::Operator(op) => format!("{op:?}"),
        Token::End => "end of expression".to_string(),
    }
}
