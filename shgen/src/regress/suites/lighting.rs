//! Lighting functions.

use super::call;
use crate::{
  error::Result,
  regress::{
    case::TestCase,
    harness::{Op, Suite, Test},
    math,
  },
};

fn normalize(p: &[f64]) -> TestCase {
  TestCase::new(math::normalize(p), vec![p.into()])
}

/// Lighting coefficients `[1, diffuse, specular, 1]` of `lit(n·l, n·h, shininess)`.
fn lit(a: f64, b: f64, c: f64) -> TestCase {
  let x = a.max(0.);
  let y = b.max(0.);
  let w = math::clamp(c, -128., 128.);
  let specular = if x > 0. { y.powf(w) } else { 0. };

  TestCase::new([1., x, specular, 1.], vec![[a].into(), [b].into(), [c].into()])
}

/// `q` when `p` and `q` face the same way, `-q` otherwise.
fn faceforward(p: &[f64], q: &[f64]) -> TestCase {
  let result = if math::dot(p, q) > 0. {
    q.to_vec()
  } else {
    q.iter().map(|x| -x).collect()
  };

  TestCase::new(result, vec![p.into(), q.into()])
}

fn normalize_cases(test: &mut Test) {
  test.add_test(normalize(&[1.0, 0.0, 0.0]));
  test.add_test(normalize(&[1.0, 2.0, 3.0]));
  test.add_test(normalize(&[1.0, 1.0, 1.0]));
  test.add_test(normalize(&[1.0, 0.0, 1.0]));
  test.add_test(normalize(&[0.5, -1.0, 1.0]));
  test.add_test(normalize(&[0.005, -1.0, 1.0, 5.]));
  test.add_test(normalize(&[-0.023]));
}

fn lit_cases(test: &mut Test) {
  let cases: [(f64, f64, f64); 24] = [
    (0.75, 0.5, 10.0),
    (0.5, 0.5, 50.0),
    (0.5, 0.75, 100.0),
    (0.5, 0.75, 100.0),
    (0.01, 0.01, 30.0),
    (0.99, 0.99, 5.0),
    (1.0, -3.0, 0.5),
    (1.0, -3.0, 2.5),
    (0.5, -1.5, 5.5),
    (1.0, 1.0, 1.0),
    (-1.0, -1.0, 1.0),
    (2.0, 1.0, 0.0),
    (2.0, 0.5, 0.0),
    (0.0, 0.0, 1.0),
    (0.0, 0.0, 2.0),
    (0.0, 1.0, 1.0),
    (0.0, 1.0, 2.0),
    (1.0, 1.0, 1.0),
    (2.0, 1.0, 1.0),
    (1.0, 0.0, 1.0),
    (2.0, 0.0, 1.0),
    (2.0, 0.5, 1.0),
    (0.0, 0.0, 1.0),
    (0.0, 1.0, 1.0),
  ];

  for (a, b, c) in cases {
    test.add_test(lit(a, b, c));
  }

  // shininess is clamped to [-128, 128]
  for b in [1.0, 0.5, 0.01] {
    for c in [-128., -130., -5000., 128., 130., 5000.] {
      test.add_test(lit(0.0, b, c));
    }
  }
}

fn faceforward_cases(test: &mut Test) {
  test.add_test(faceforward(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]));
  test.add_test(faceforward(&[1.0, 2.0, 3.0], &[0., 0., 0.]));
  test.add_test(faceforward(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]));
  test.add_test(faceforward(&[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0]));
  test.add_test(faceforward(&[1.0, 1.0, 1.0], &[0.5, 2.0, 4.0]));
  test.add_test(faceforward(&[1.0, 0.0, 1.0], &[0.0, 1.0, 0.0]));
  test.add_test(faceforward(&[0.5, -1.0, 1.0], &[0.5, -1.5, -6.0]));
  test.add_test(faceforward(&[-0.5, -1.0, 1.0], &[0.5, 1.5, -6.0]));
}

pub fn suite() -> Result<Suite> {
  Suite::paired(
    "lighting",
    vec![
      Op::new("lit", call("lit", 3)?, lit_cases),
      Op::new("normalize", call("normalize", 1)?, normalize_cases),
      Op::new("faceforward", call("faceforward", 2)?, faceforward_cases),
    ],
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::regress::value::Value;

  #[test]
  fn lit_coefficients() {
    assert_eq!(lit(0.5, 0.5, 2.0).expected, Value::from([1., 0.5, 0.25, 1.]));
    assert_eq!(lit(0.0, 0.5, 2.0).expected, Value::from([1., 0., 0., 1.]));
    assert_eq!(lit(1.0, 1.0, 5000.).expected, Value::from([1., 1., 1., 1.]));
  }

  #[test]
  fn faceforward_flips() {
    assert_eq!(faceforward(&[0., 0., 0.], &[1., 2., 3.]).expected, Value::from([-1., -2., -3.]));
  }
}
