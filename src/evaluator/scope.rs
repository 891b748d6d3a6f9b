//! Instance-local variable/function bindings.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::decimal::Decimal;

use super::error::Error;

/// `[A-Za-z_$]` plus the Greek block, then word characters — the
/// identifier grammar, expressed as a regex rather than hand-rolled
/// character matching since that is what this codebase reaches for to
/// validate a user-facing textual pattern elsewhere.
static IDENTIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$\u{0370}-\u{03FF}][A-Za-z0-9_$\u{0370}-\u{03FF}]*$")
        .expect("identifier pattern is a valid regex")
});

#[must_use]
pub(crate) fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(name)
}

/// A single scope entry: either a value the tokenizer treats as a
/// number-producing identifier, or a host function the parser calls at
/// a `(`-prefixed position.
#[derive(Clone)]
pub enum Binding {
    Value(Decimal),
    Function(Rc<dyn Fn(&[Decimal]) -> Decimal>),
}

impl Binding {
    fn same_kind_as(&self, other: &Binding) -> bool {
        matches!(
            (self, other),
            (Binding::Value(_), Binding::Value(_)) | (Binding::Function(_), Binding::Function(_))
        )
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Value(d) => f.debug_tuple("Value").field(d).finish(),
            Binding::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// The set of identifiers visible to one evaluation, installed wholesale
/// by [`Scope::install`] and later updated in place by [`Scope::rebind`].
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Binding>,
}

impl Scope {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates every name against the identifier grammar before
    /// admitting any of them: a single invalid identifier fails the
    /// whole install, rather than admitting the valid names and
    /// rejecting only the bad one.
    pub fn install(bindings: HashMap<String, Binding>) -> Result<Self, Error> {
        for name in bindings.keys() {
            if !is_valid_identifier(name) {
                return Err(Error::InvalidIdentifier(name.clone()));
            }
        }
        tracing::trace!(count = bindings.len(), "scope installed");
        Ok(Self { bindings })
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub(crate) fn identifiers(&self) -> Vec<&str> {
        self.bindings.keys().map(String::as_str).collect()
    }

    /// Updates existing bindings in place. Every name in `updates` must
    /// already be bound to a value of the same kind: rebinding never
    /// introduces a new name and never changes a binding's kind.
    pub fn rebind(&mut self, updates: HashMap<String, Binding>) -> Result<(), Error> {
        for (name, new_binding) in &updates {
            match self.bindings.get(name) {
                None => {
                    tracing::warn!(identifier = %name, "rebind of unknown identifier rejected");
                    return Err(Error::IdentifierNotInScope(name.clone()));
                }
                Some(existing) if !existing.same_kind_as(new_binding) => {
                    tracing::warn!(identifier = %name, "rebind kind mismatch rejected");
                    return Err(Error::Type);
                }
                Some(_) => {}
            }
        }
        for (name, new_binding) in updates {
            tracing::trace!(identifier = %name, "rebound");
            self.bindings.insert(name, new_binding);
        }
        Ok(())
    }
}
