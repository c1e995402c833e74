//! Arithmetic operators and elementary functions.

use super::call;
use crate::{
  error::Result,
  regress::{
    broadcast::upzip,
    call::{Call, Style},
    case::{make_test, TestCase},
    harness::{Op, Suite, Test},
    math,
  },
};

fn unary(p: &[f64], op: fn(f64) -> f64) -> TestCase {
  TestCase::new(p.iter().map(|&x| op(x)).collect::<Vec<_>>(), vec![p.into()])
}

fn binary(p: &[f64], q: &[f64], op: fn(f64, f64) -> f64) -> TestCase {
  let result = upzip(p, q).into_iter().map(|(a, b)| op(a, b)).collect::<Vec<_>>();
  TestCase::new(result, vec![p.into(), q.into()])
}

fn operands(test: &mut Test, op: fn(f64, f64) -> f64) {
  test.add_test(binary(&[0.0, 1.0, 2.0], &[3.0, 4.0, 5.0], op));
  test.add_test(binary(&[1.0], &[3.0, 4.0, 5.0], op));
  test.add_test(binary(&[1.0, 2.0, 3.0], &[7.0], op));
  test.add_test(binary(&[8.0], &[7.0], op));
  test.add_test(binary(&[4.0, 5.0, 6.0], &[-4.0, -5.0, -6.0], op));
  test.add_test(binary(&[0.5, -1.5, 2.25, 10.0], &[0.25, 0.5, -0.75, 4.0], op));
}

/// Divisors stay away from zero.
fn quotients(test: &mut Test) {
  let div = |a: f64, b: f64| a / b;

  test.add_test(binary(&[0.0, 1.0, 2.0], &[3.0, 4.0, 5.0], div));
  test.add_test(binary(&[1.0], &[3.0, 4.0, 5.0], div));
  test.add_test(binary(&[1.0, 2.0, 3.0], &[7.0], div));
  test.add_test(binary(&[4.0, 5.0, 6.0], &[-4.0, -5.0, -6.0], div));
  test.add_test(binary(&[0.5, -1.5, 2.25, 10.0], &[0.25, 0.5, -0.75, 4.0], div));
}

fn negations(test: &mut Test) {
  for p in [&[1.0, -2.0, 3.0][..], &[0.0], &[-0.5, 0.25], &[4.0, 3.0, -2.0, 1.0]] {
    test.add_test(unary(p, |x| -x));
  }
}

fn roots(test: &mut Test, op: fn(f64) -> f64) {
  test.add_test(unary(&[0.0, 1.0, 4.0], op));
  test.add_test(unary(&[9.0, 16.0, 25.0, 0.25], op));
  test.add_test(unary(&[2.0], op));
  test.add_test(unary(&[0.001, 100.0, 1e4], op));
}

/// Cube roots of negative inputs follow the principal complex root.
fn cube_roots(test: &mut Test) {
  roots(test, math::principal_cbrt);
  test.add_test(unary(&[-8.0, -1.0, 27.0], math::principal_cbrt));
}

fn powers(test: &mut Test) {
  let pow = |a: f64, b: f64| a.powf(b);

  test.add_test(binary(&[1.0, 1.0, 1.0], &[1.0], pow));
  test.add_test(binary(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0], pow));
  test.add_test(binary(&[2.0, 3.0, 4.0], &[2.0], pow));
  test.add_test(binary(&[2.0, 0.5, 9.0], &[3.0, -1.0, 0.5], pow));
  test.add_test(make_test(
    [8.0, 0.125],
    vec![[2.0, 0.5].into(), [3.0].into()],
    &[],
    0.05,
  ));
}

fn exponentials(test: &mut Test) {
  for p in [&[0.0, 1.0, 2.0][..], &[3.0, 4.0, 5.0], &[-1.0, -3.0, -4.0], &[0.5, 1.5, 2.5]] {
    test.add_test(unary(p, f64::exp));
  }
}

fn logarithms(test: &mut Test) {
  for p in [&[0.1, 0.3, 0.7][..], &[1.0, 2.0, 3.0], &[4.0, 5.0, 12.0], &[1.4, 2.7, 3.9]] {
    test.add_test(unary(p, f64::ln));
  }
}

pub fn suite() -> Result<Suite> {
  Suite::paired(
    "arith",
    vec![
      Op::new("add", Call::new(Style::Infix, "+", 2)?, |t| operands(t, |a, b| a + b)).or(call("add", 2)?),
      Op::new("sub", Call::new(Style::Infix, "-", 2)?, |t| operands(t, |a, b| a - b)),
      Op::new("mul", Call::new(Style::Infix, "*", 2)?, |t| operands(t, |a, b| a * b)),
      Op::new("div", Call::new(Style::Infix, "/", 2)?, quotients),
      Op::new("neg", Call::new(Style::Prefix, "-", 1)?, negations),
      Op::new("sqrt", call("sqrt", 1)?, |t| roots(t, f64::sqrt)),
      Op::new("cbrt", call("cbrt", 1)?, cube_roots),
      Op::new("pow", call("pow", 2)?, powers),
      Op::new("exp", call("exp", 1)?, exponentials),
      Op::new("log", call("log", 1)?, logarithms),
    ],
  )
}
