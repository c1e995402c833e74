//! Trigonometric functions.

use super::call;
use crate::{
  error::Result,
  regress::{
    broadcast::upzip,
    case::TestCase,
    harness::{Op, Suite, Test},
  },
};
use std::f64::consts::PI;

fn func(l: &[f64], op: fn(f64) -> f64) -> TestCase {
  TestCase::new(l.iter().map(|&x| op(x)).collect::<Vec<_>>(), vec![l.into()])
}

fn atan2_test(p: &[f64], q: &[f64]) -> TestCase {
  let result = upzip(p, q).into_iter().map(|(a, b)| a.atan2(b)).collect::<Vec<_>>();
  TestCase::new(result, vec![p.into(), q.into()])
}

/// Inputs over several periods; used for `cos`, `sin` and `atan`.
fn periodic(test: &mut Test, op: fn(f64) -> f64) {
  test.add_test(func(&[0.0, 1.0, 2.0, 3.0], op));
  test.add_test(func(&[0.3, 0.5, 0.8, 0.9], op));
  test.add_test(func(&[PI, -PI, 0.0], op));
  test.add_test(func(&[PI * 2.0, PI / 2.0, 0.0], op));
  test.add_test(func(&[-PI * 2.0, -PI / 2.0, 0.0], op));
  test.add_test(func(&[3.0], op));
  test.add_test(func(&[-0.5, -1.0, -3.0, -4.0], op));
  test.add_test(func(&[0.5, 1.5, 2.5], op));
}

/// Inputs within [-1, 1]; used for `acos` and `asin`.
fn unit(test: &mut Test, op: fn(f64) -> f64) {
  test.add_test(func(&[0.0], op));
  test.add_test(func(&[0.3, 0.5, 0.8, 0.9], op));
  test.add_test(func(&[1.0 - 0.1, -1.0 + 0.1, 0.0], op));
  test.add_test(func(&[-0.5, -0.9, -0.1], op));
  test.add_test(func(&[0.5, 0.6, 0.9], op));
}

/// Inputs away from the poles of `tan`.
fn tangent(test: &mut Test, op: fn(f64) -> f64) {
  test.add_test(func(&[0.0, 1.0, 2.0, 3.0], op));
  test.add_test(func(&[0.3, 0.5, 0.8, 0.9], op));
  test.add_test(func(&[PI / 2.0 - 0.1, -PI / 2.0 + 0.1, 0.0], op));
  test.add_test(func(&[-0.5, -1.0, -1.1], op));
  test.add_test(func(&[0.5, 1.5, 2.5], op));
}

fn atan2(test: &mut Test) {
  test.add_test(atan2_test(&[1.0, 1.0, 1.0, 1.0], &[0.0, 1.0, 2.0, 3.0]));
  test.add_test(atan2_test(&[0.5, 1.5, 3.0, 50.0], &[0.0, 1.0, 2.0, 3.0]));
  test.add_test(atan2_test(&[1.0, 1.0, 1.0, 1.0], &[0.3, 0.5, 0.8, 0.9]));
  test.add_test(atan2_test(&[1.0, 1.0, 1.0], &[PI, -PI, 0.0]));
  test.add_test(atan2_test(&[PI, -PI, 0.0], &[1.0, 1.0, 1.0]));
  test.add_test(atan2_test(&[PI * 2.0, PI / 2.0, 0.0], &[-PI * 2.0, -PI / 2.0, 0.0]));
  test.add_test(atan2_test(&[PI * 2.0, PI / 2.0, 1.0], &[1.0, 1.0, 1.0]));
  test.add_test(atan2_test(&[1.0, 1.0, 1.0], &[-PI * 2.0, -PI / 2.0, 0.0]));
  test.add_test(atan2_test(&[3.0], &[9.0]));
  test.add_test(atan2_test(&[-0.5, -1.0, -3.0, -4.0], &[1.0, 1.0, 1.0, 1.0]));
  test.add_test(atan2_test(&[-0.5, -1.0, -3.0, -4.0], &[-1.0, -1.0, -1.0, -1.0]));
  test.add_test(atan2_test(&[0.5, 1.5, 2.5], &[1.0, 1.0, 1.0]));
  test.add_test(atan2_test(&[1.0, 1.0, 1.0], &[0.5, 1.5, 2.5]));
}

pub fn suite() -> Result<Suite> {
  Suite::paired(
    "trig",
    vec![
      Op::new("cos", call("cos", 1)?, |t| periodic(t, f64::cos)),
      Op::new("acos", call("acos", 1)?, |t| unit(t, f64::acos)),
      Op::new("sin", call("sin", 1)?, |t| periodic(t, f64::sin)),
      Op::new("asin", call("asin", 1)?, |t| unit(t, f64::asin)),
      Op::new("tan", call("tan", 1)?, |t| tangent(t, f64::tan)),
      Op::new("atan", call("atan", 1)?, |t| periodic(t, f64::atan)),
      Op::new("atan2", call("atan2", 2)?, atan2),
    ],
  )
}
