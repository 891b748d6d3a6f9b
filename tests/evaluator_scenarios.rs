//! Worked expression-evaluation scenarios: arithmetic parity,
//! comparison/boolean results, and implicit-multiplication parity with
//! an explicit `*`.

use std::collections::HashMap;

use decpact::evaluator::{Binding, Evaluator};
use decpact::{Context, Decimal};

fn eval(source: &str) -> Decimal {
    Evaluator::new(Context::default()).eval(source, None).unwrap()
}

#[test]
fn basic_arithmetic_matches_host_decimal_arithmetic() {
    assert_eq!(eval("0.1 + 0.2").to_string(), "0.3");
    assert_eq!(eval("2 * (3 + 4)").to_string(), "14");
    assert_eq!(eval("10 / 4").to_string(), "2.5");
    assert_eq!(eval("10 % 3").to_string(), "1");
    assert_eq!(eval("2 ^ 10").to_string(), "1024");
}

#[test]
fn comparisons_yield_boolean_flavored_decimals() {
    assert_eq!(eval("2 > 3").to_string(), "0");
    assert_eq!(eval("3 > 2").to_string(), "1");
    assert_eq!(eval("3 >= 3").to_string(), "1");
    assert_eq!(eval("3 == 3").to_string(), "1");
    assert_eq!(eval("3 != 3").to_string(), "0");
}

#[test]
fn logic_operators_are_non_short_circuiting_and_value_returning() {
    assert_eq!(eval("2 && 3").to_string(), "3");
    assert_eq!(eval("0 || 4").to_string(), "4");
    assert_eq!(eval("0 && 3").to_string(), "0");
    assert_eq!(eval("0 || 0").to_string(), "0");
}

#[test]
fn double_star_is_rewritten_to_caret() {
    let mut ev = Evaluator::new(Context::default());
    let result = ev.eval("2**10", None).unwrap();
    assert_eq!(result.to_string(), "1024");
    assert_eq!(ev.expression(), "2^10");
}

#[test]
fn implicit_multiplication_matches_explicit_star() {
    let mut bindings: HashMap<String, Binding> = HashMap::new();
    bindings.insert("x".to_string(), Binding::Value(Decimal::from_i64(5)));
    let mut with_star = Evaluator::new(Context::default());
    let mut implicit = Evaluator::new(Context::default());

    let explicit = with_star.eval("2*x*(3+1)", Some(bindings.clone())).unwrap();
    let via_implicit = implicit.eval("2x(3+1)", Some(bindings)).unwrap();
    assert!(explicit.host_eq(&via_implicit));
    assert_eq!(implicit.expression(), "2*x*(3+1)");
}

#[test]
fn unary_operators() {
    assert_eq!(eval("-5 + 3").to_string(), "-2");
    assert_eq!(eval("!0").to_string(), "1");
    assert_eq!(eval("!5").to_string(), "0");
    assert_eq!(eval("\u{221A}9").to_string(), "3");
}

#[test]
fn function_call_scenario() {
    let mut bindings: HashMap<String, Binding> = HashMap::new();
    bindings.insert(
        "avg".to_string(),
        Binding::Function(std::rc::Rc::new(|args: &[Decimal]| {
            let ctx = Context::default();
            let sum = args
                .iter()
                .cloned()
                .fold(Decimal::zero(), |acc, v| acc.plus(&v, &ctx));
            sum.div(&Decimal::from_i64(args.len() as i64), &ctx)
        })),
    );
    let mut ev = Evaluator::new(Context::default());
    let result = ev.eval("avg(2, 4, 6)", Some(bindings)).unwrap();
    assert_eq!(result.to_string(), "4");
}
