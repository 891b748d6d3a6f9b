//! Tokenizer: number/identifier/operator lexing, the `**` → `^` rewrite,
//! implicit-multiplication insertion, and scope-anchored identifier
//! resolution.

use crate::decimal::Decimal;

use super::error::Error;
use super::scope::{Binding, Scope};
use super::token::{IdentifierKind, Operator, Token};

pub(crate) struct Lexed {
    pub tokens: Vec<Token>,
    /// The source text after the `**` → `^` rewrite and implicit-`*`
    /// insertion, kept so callers can read back what was actually
    /// evaluated.
    pub expression: String,
}

/// Tokenizes `source` against `scope`'s identifier table. Implicit
/// multiplication is inserted before a number, identifier, `(`, unary
/// `!`, or `√` that immediately follows a number, a variable, or a `)`.
pub(crate) fn tokenize(source: &str, scope: &Scope) -> Result<Lexed, Error> {
    let rewritten = source.replace("**", "^");
    let chars: Vec<char> = rewritten.chars().collect();

    let mut identifiers: Vec<&str> = scope.identifiers();
    identifiers.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut tokens = Vec::new();
    let mut expression = String::new();
    let mut i = 0usize;
    let mut last_was_value = false;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            expression.push(c);
            i += 1;
            continue;
        }

        if last_was_value && starts_implicit_factor(&chars, i) {
            tokens.push(Token::Operator(Operator::Star));
            expression.push('*');
        }

        if is_number_start(&chars, i) {
            let (text, next) = scan_number(&chars, i);
            i = next;
            expression.push_str(&text);
            let decimal = Decimal::from_str(&text).map_err(|_| Error::Syntax(text.clone()))?;
            tokens.push(Token::Number(decimal));
            last_was_value = true;
            continue;
        }

        if is_identifier_start(c) {
            match identifiers.iter().find(|name| matches_identifier_at(&chars, i, name)) {
                Some(name) => {
                    let len = name.chars().count();
                    expression.push_str(name);
                    let kind = match scope.lookup(name) {
                        Some(Binding::Function(_)) => IdentifierKind::Function,
                        _ => IdentifierKind::Variable,
                    };
                    tokens.push(Token::Identifier {
                        name: (*name).to_string(),
                        kind,
                    });
                    i += len;
                    last_was_value = kind == IdentifierKind::Variable;
                    continue;
                }
                None => {
                    let start = i;
                    while i < chars.len() && is_identifier_continue(chars[i]) {
                        i += 1;
                    }
                    let text: String = chars[start..i].iter().collect();
                    return Err(Error::UnknownSymbol(text));
                }
            }
        }

        if let Some((op, len, text)) = match_operator(&chars, i) {
            tokens.push(Token::Operator(op));
            expression.push_str(&text);
            i += len;
            last_was_value = op == Operator::RParen;
            continue;
        }

        return Err(Error::UnknownSymbol(c.to_string()));
    }

    tokens.push(Token::End);
    Ok(Lexed { tokens, expression })
}

fn starts_implicit_factor(chars: &[char], pos: usize) -> bool {
    let c = chars[pos];
    if is_identifier_start(c) || c == '(' || c == '\u{221A}' {
        return true;
    }
    c == '!' && chars.get(pos + 1) != Some(&'=')
}

fn is_number_start(chars: &[char], pos: usize) -> bool {
    let c = chars[pos];
    c.is_ascii_digit() || (c == '.' && chars.get(pos + 1).is_some_and(char::is_ascii_digit))
}

/// Scans `int[.frac][(e|E)[+-]digits]` starting at `pos`, returning the
/// matched text and the index just past it.
fn scan_number(chars: &[char], pos: usize) -> (String, usize) {
    let mut i = pos;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit) {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    (chars[pos..i].iter().collect(), i)
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$' || ('\u{0370}'..='\u{03FF}').contains(&c)
}

fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

/// `true` if `name` occurs at `pos` and is not itself a prefix of a
/// longer identifier-shaped run — callers already try longest names
/// first, but this guards against e.g. a scope entry `"x"` firing
/// inside the unrelated identifier `"xy"`.
fn matches_identifier_at(chars: &[char], pos: usize, name: &str) -> bool {
    let name_chars: Vec<char> = name.chars().collect();
    let end = pos + name_chars.len();
    if end > chars.len() || chars[pos..end] != name_chars[..] {
        return false;
    }
    !matches!(chars.get(end), Some(&c) if is_identifier_continue(c))
}

fn match_operator(chars: &[char], pos: usize) -> Option<(Operator, usize, String)> {
    if let Some(&next) = chars.get(pos + 1) {
        let pair = [chars[pos], next];
        let op = match pair {
            ['!', '='] => Some(Operator::NotEq),
            ['=', '='] => Some(Operator::EqEq),
            ['<', '='] => Some(Operator::Lte),
            ['>', '='] => Some(Operator::Gte),
            ['&', '&'] => Some(Operator::AndAnd),
            ['|', '|'] => Some(Operator::OrOr),
            _ => None,
        };
        if let Some(op) = op {
            return Some((op, 2, pair.iter().collect()));
        }
    }
    let op = match chars[pos] {
        '+' => Operator::Plus,
        '-' => Operator::Minus,
        '*' => Operator::Star,
        '/' => Operator::Slash,
        '%' => Operator::Percent,
        '^' => Operator::Caret,
        '(' => Operator::LParen,
        ')' => Operator::RParen,
        '!' => Operator::Bang,
        '<' => Operator::Lt,
        '>' => Operator::Gt,
        '\u{221A}' => Operator::Sqrt,
        ',' => Operator::Comma,
        _ => return None,
    };
    Some((op, 1, chars[pos].to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn rewrites_double_star_to_caret() {
        let lexed = tokenize("2**3", &Scope::empty()).unwrap();
        assert_eq!(lexed.expression, "2^3");
    }

    #[test]
    fn inserts_implicit_multiplication_before_paren_and_identifier() {
        let scope = Scope::install(HashMap::from([("x".to_string(), Binding::Value(Decimal::from_i64(5))) ])).unwrap();
        let lexed = tokenize("2x(3)", &scope).unwrap();
        assert_eq!(lexed.expression, "2*x*(3)");
    }

    #[test]
    fn longest_identifier_wins() {
        let scope = Scope::install(HashMap::from([
            ("x".to_string(), Binding::Value(Decimal::from_i64(1))),
            ("xy".to_string(), Binding::Value(Decimal::from_i64(2))),
        ]))
        .unwrap();
        let lexed = tokenize("xy", &scope).unwrap();
        assert!(matches!(
            lexed.tokens.as_slice(),
            [Token::Identifier { name, .. }, Token::End] if name == "xy"
        ));
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        assert!(tokenize("2 @ 3", &Scope::empty()).is_err());
    }
}
