//! Matrix operations.

use super::call;
use crate::{
  error::Result,
  regress::{
    case::{make_test, TestCase},
    harness::{Op, Suite, Test},
    matrix::{adjoint, det, inverse, transpose},
  },
};

type Matrix = Vec<Vec<f64>>;

fn mat<const N: usize, const M: usize>(rows: [[f64; M]; N]) -> Matrix {
  rows.iter().map(|row| row.to_vec()).collect()
}

/// Square matrices of every supported size, singular ones included.
fn square() -> Vec<Matrix> {
  vec![
    mat([[2.0]]),
    mat([[1.0, 0.0], [0.0, 1.0]]),
    mat([[1.0, 2.0], [3.0, 4.0]]),
    mat([[1.0, 2.0], [2.0, 4.0]]),
    mat([[1.0, 2.0, 3.0], [3.0, 4.0, 5.0], [5.0, 6.0, 7.0]]),
    mat([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 1.0]]),
    mat([[4.0, 7.0, 2.0], [3.0, 6.0, 1.0], [2.0, 5.0, 3.0]]),
    mat([[2.0, 0.0, 0.0, 0.0], [0.0, 3.0, 0.0, 0.0], [0.0, 0.0, 4.0, 0.0], [1.0, 2.0, 3.0, 5.0]]),
    mat([[1.0, 0.0, 2.0, -1.0], [3.0, 0.0, 0.0, 5.0], [2.0, 1.0, 4.0, -3.0], [1.0, 0.0, 5.0, 0.0]]),
  ]
}

fn dets(test: &mut Test) {
  for m in square() {
    test.add_test(TestCase::new(det(&m), vec![m.into()]));
  }
}

fn transposes(test: &mut Test) {
  let wide = mat([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
  test.add_test(TestCase::new(transpose(&wide), vec![wide.into()]));

  for m in square() {
    test.add_test(TestCase::new(transpose(&m), vec![m.into()]));
  }
}

fn adjoints(test: &mut Test) {
  for m in square() {
    test.add_test(TestCase::new(adjoint(&m), vec![m.into()]));
  }
}

/// Singular matrices invert to zero.
fn inverses(test: &mut Test) {
  for m in square() {
    test.add_test(make_test(inverse(&m), vec![m.into()], &[], 0.05));
  }
}

pub fn suite() -> Result<Suite> {
  Suite::paired(
    "matrix",
    vec![
      Op::new("det", call("det", 1)?, dets),
      Op::new("transpose", call("transpose", 1)?, transposes),
      Op::new("adjoint", call("adjoint", 1)?, adjoints),
      Op::new("inverse", call("inverse", 1)?, inverses),
    ],
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::regress::{harness::Mode, value::Value};

  #[test]
  fn one_check_per_matrix() {
    let mut test = Test::new("det", 1, Mode::Immediate);
    test.add_call(call("det", 1).unwrap()).unwrap();
    dets(&mut test);

    assert_eq!(test.checks(), square().len());
  }

  #[test]
  fn singular_inverse_is_zero() {
    let mut test = Test::new("inverse", 1, Mode::Stream);
    test.add_call(call("inverse", 1).unwrap()).unwrap();
    inverses(&mut test);
    assert_eq!(test.checks(), square().len());

    let singular = mat([[1.0, 2.0], [2.0, 4.0]]);
    assert_eq!(det(&singular), 0.);
    assert_eq!(
      make_test(inverse(&singular), vec![singular.clone().into()], &[], 0.05).expected,
      Value::from([[0.0, 0.0], [0.0, 0.0]])
    );
  }
}
