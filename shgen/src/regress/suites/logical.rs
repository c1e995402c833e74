//! Conditional selection and boolean operators.
//!
//! Booleans are floats: anything strictly positive is true.

use super::call;
use crate::{
  error::Result,
  regress::{
    broadcast::{upzip, upzip3},
    call::{Call, Style},
    case::TestCase,
    harness::{Op, Suite, Test},
  },
};

/// `cond(p, q, r)` with a condition per component.
fn cond(p: &[f64], q: &[f64], r: &[f64]) -> TestCase {
  let result = upzip3(p, q, r)
    .into_iter()
    .map(|(a, b, c)| if a > 0. { b } else { c })
    .collect::<Vec<_>>();
  TestCase::new(result, vec![p.into(), q.into(), r.into()])
}

/// `cond(p, q, r)` with a scalar condition selecting whole operands.
fn cond_scalar(p: f64, q: &[f64], r: &[f64]) -> TestCase {
  let result = upzip(q, r)
    .into_iter()
    .map(|(b, c)| if p > 0. { b } else { c })
    .collect::<Vec<_>>();
  TestCase::new(result, vec![p.into(), q.into(), r.into()])
}

/// Largest component.
fn any(p: &[f64]) -> TestCase {
  let result = p.iter().copied().fold(p[0], f64::max);
  TestCase::new(result, vec![p.into()])
}

/// Smallest component.
fn all(p: &[f64]) -> TestCase {
  let result = p.iter().copied().fold(p[0], f64::min);
  TestCase::new(result, vec![p.into()])
}

fn not(p: &[f64]) -> TestCase {
  let result = p.iter().map(|&a| if a > 0. { 0. } else { 1. }).collect::<Vec<_>>();
  TestCase::new(result, vec![p.into()])
}

fn and(p: &[f64], q: &[f64]) -> TestCase {
  let result = upzip(p, q).into_iter().map(|(a, b)| a.min(b)).collect::<Vec<_>>();
  TestCase::new(result, vec![p.into(), q.into()])
}

fn or(p: &[f64], q: &[f64]) -> TestCase {
  let result = upzip(p, q).into_iter().map(|(a, b)| a.max(b)).collect::<Vec<_>>();
  TestCase::new(result, vec![p.into(), q.into()])
}

fn conditionals(test: &mut Test) {
  // cond(1, 1, 1)
  test.add_test(cond(&[10.], &[1.0], &[0.0]));
  test.add_test(cond(&[1.0], &[1.0], &[0.0]));
  test.add_test(cond(&[0.5], &[1.0], &[0.0]));
  test.add_test(cond(&[0.], &[1.0], &[0.0]));
  test.add_test(cond(&[-0.3], &[1.0], &[0.0]));
  test.add_test(cond(&[-3000.], &[1.0], &[0.0]));

  // cond(N, N, N)
  test.add_test(cond(&[1.4, 0.0, -45.0, 1024.], &[1.0, 2.0, 3.0, 4.0], &[0.0, -1.0, -2.0, -45.8]));
  test.add_test(cond(&[0.0, 20.0, -1.0], &[28.1, 0.3, 0.045], &[0.0, -1.0, -45.8]));
  test.add_test(cond(&[1.4, 0.0], &[-0.4, 2.2], &[0.0, -1.1]));

  // cond(1, N, N)
  test.add_test(cond_scalar(1.4, &[1.0, 2.0, 3.0, 4.0], &[0.0, -1.0, -2.0, -45.8]));
  test.add_test(cond_scalar(0.0, &[1.0, 2.0, 3.0, 4.0], &[0.0, -1.0, -2.0, -45.8]));
}

fn reductions(test: &mut Test, func: fn(&[f64]) -> TestCase) {
  test.add_test(func(&[0., 0., 0., 0.]));
  test.add_test(func(&[0., 0., 0., 1.]));
  test.add_test(func(&[1., 0., 0., 0.]));
  test.add_test(func(&[0.1, 15., 0.5, 12.]));
  test.add_test(func(&[0., 1., 0.]));
  test.add_test(func(&[10.]));
  test.add_test(func(&[0.]));
  test.add_test(func(&[-1., -0.5, -5000., -2.]));
  test.add_test(func(&[-1., 0., 0.]));
  test.add_test(func(&[-1000., 0., 1000.]));
}

fn binary(test: &mut Test, func: fn(&[f64], &[f64]) -> TestCase) {
  test.add_test(func(&[0., 0., 0.], &[0., 0., 0.]));
  test.add_test(func(&[0., 0., 0.], &[1., 0., -1.]));
  test.add_test(func(&[1., 0., 0.4, -1.], &[1., 0., 0.4, -1.]));
  test.add_test(func(&[0.1, 0.2, 0.3], &[-0.1, -0.2, -0.3]));
  test.add_test(func(&[0.1], &[-0.1]));
  test.add_test(func(&[0.1], &[0.]));
  test.add_test(func(&[0.], &[-1000.]));
}

pub fn suite() -> Result<Suite> {
  Suite::paired(
    "logical",
    vec![
      Op::new("cond", call("cond", 3)?, conditionals),
      Op::new("all", call("all", 1)?, |t| reductions(t, all)),
      Op::new("any", call("any", 1)?, |t| reductions(t, any)),
      Op::new("not", Call::new(Style::Prefix, "!", 1)?, |t| reductions(t, not)),
      Op::new("and", Call::new(Style::Infix, "&&", 2)?, |t| binary(t, and)),
      Op::new("or", Call::new(Style::Infix, "||", 2)?, |t| binary(t, or)),
    ],
  )
}
