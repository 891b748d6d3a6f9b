//! Scope lifecycle scenarios: install validation, rebind-in-place
//! semantics, and the evaluator's entry-point call shapes.

use std::collections::HashMap;
use std::rc::Rc;

use decpact::evaluator::{Binding, Error, Evaluator};
use decpact::{Context, Decimal};

fn value(n: i64) -> Binding {
    Binding::Value(Decimal::from_i64(n))
}

#[test]
fn rebind_scenario_tracks_spec_worked_example() {
    let mut ev = Evaluator::new(Context::default());
    let scope = HashMap::from([("x".to_string(), value(2)), ("y".to_string(), value(3))]);
    assert_eq!(ev.eval("x^y", Some(scope)).unwrap().to_string(), "8");

    let result = ev.rebind(HashMap::from([("y".to_string(), value(-3))])).unwrap();
    assert_eq!(result.to_string(), "0.125");

    let result = ev.rebind(HashMap::from([("x".to_string(), value(4))])).unwrap();
    assert_eq!(result.to_string(), "0.015625");

    let err = ev.rebind(HashMap::from([("z".to_string(), value(5))])).unwrap_err();
    assert!(matches!(err, Error::IdentifierNotInScope(name) if name == "z"));
}

#[test]
fn invalid_identifier_rejected_at_install() {
    let mut ev = Evaluator::new(Context::default());
    let scope = HashMap::from([("9x".to_string(), value(1))]);
    let err = ev.eval("9x", Some(scope)).unwrap_err();
    assert!(matches!(err, Error::InvalidIdentifier(name) if name == "9x"));
}

#[test]
fn rebind_with_mismatched_kind_is_rejected() {
    let mut ev = Evaluator::new(Context::default());
    ev.eval("x", Some(HashMap::from([("x".to_string(), value(1))])))
        .unwrap();
    let updates = HashMap::from([(
        "x".to_string(),
        Binding::Function(Rc::new(|_: &[Decimal]| Decimal::zero())),
    )]);
    assert!(matches!(ev.rebind(updates), Err(Error::Type)));
}

#[test]
fn rebind_without_a_prior_evaluation_fails() {
    let mut ev = Evaluator::new(Context::default());
    assert!(matches!(
        ev.rebind(HashMap::new()),
        Err(Error::NoExpressionToReevaluate)
    ));
}

#[test]
fn scope_persists_across_calls_that_omit_a_fresh_scope() {
    let mut ev = Evaluator::new(Context::default());
    ev.eval("x", Some(HashMap::from([("x".to_string(), value(10))])))
        .unwrap();
    assert_eq!(ev.eval("x * 2", None).unwrap().to_string(), "20");
    assert_eq!(ev.eval("x - 1", None).unwrap().to_string(), "9");
}

#[test]
fn unknown_identifier_used_in_expression_is_rejected() {
    let mut ev = Evaluator::new(Context::default());
    let err = ev.eval("undefined_name + 1", None).unwrap_err();
    assert!(matches!(err, Error::UnknownSymbol(name) if name == "undefined_name"));
}
