//! Dot and cross products.

use super::call;
use crate::{
  error::Result,
  regress::{
    call::{Call, Style},
    case::TestCase,
    harness::{Op, Suite, Test},
    math,
  },
};

fn dot(p: &[f64], q: &[f64]) -> TestCase {
  TestCase::new([math::dot(p, q)], vec![p.into(), q.into()])
}

fn cross(p: [f64; 3], q: [f64; 3]) -> TestCase {
  TestCase::new(math::cross(&p, &q), vec![p.into(), q.into()])
}

fn dot_cases(test: &mut Test) {
  test.add_test(dot(&[1.0, 1.0, 1.0], &[0.0, 0.0, 0.0]));
  test.add_test(dot(&[1.0, 1.0, 1.0], &[1.0, 0.0, -1.0]));
  test.add_test(dot(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]));
  test.add_test(dot(&[-1.0, -1.0, -1.0], &[1.0, 1.0, 1.0]));
  test.add_test(dot(&[1.0, 0.0, 1.0], &[0.0, 1.0, 0.0]));
  test.add_test(dot(&[0.0, 0.4, 0.8], &[0.8, 1.0, 1.2]));
  test.add_test(dot(&[2.0, -1.0], &[0.5, 3.0]));
  test.add_test(dot(&[1.0, 2.0, 3.0, 4.0], &[4.0, 3.0, 2.0, 1.0]));
}

fn cross_cases(test: &mut Test) {
  test.add_test(cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]));
  test.add_test(cross([0.0, 1.0, 0.0], [1.0, 0.0, 0.0]));
  test.add_test(cross([1.0, 2.0, 3.0], [1.0, 2.0, 3.0]));
  test.add_test(cross([1.0, 2.0, 3.0], [-4.0, 5.0, 0.5]));
  test.add_test(cross([0.0, 0.0, 0.0], [3.0, 2.0, 1.0]));
}

pub fn suite() -> Result<Suite> {
  Suite::paired(
    "geometry",
    vec![
      Op::new("dot", call("dot", 2)?, dot_cases).or(Call::new(Style::Infix, "|", 2)?),
      Op::new("cross", call("cross", 2)?, cross_cases).or(Call::new(Style::Infix, "^", 2)?),
    ],
  )
}
