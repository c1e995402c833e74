//! Vector norms and distances.

use super::call;
use crate::{
  error::Result,
  regress::{
    case::TestCase,
    harness::{Op, Suite, Test},
    math,
  },
};

type Norm = fn(&[f64]) -> f64;

fn length_test(a: &[f64], norm: Norm) -> TestCase {
  TestCase::new([norm(a)], vec![a.into()])
}

fn distance_test(a: &[f64], b: &[f64], norm: Norm) -> TestCase {
  TestCase::new([norm(&math::sub(a, b))], vec![a.into(), b.into()])
}

fn lengths(test: &mut Test, norm: Norm) {
  for v in [
    [1.0, 2.0, 3.0],
    [1.0, 2.0, -3.0],
    [1.0, -2.0, -3.0],
    [-1.0, -2.0, -3.0],
    [-1.0, -2.0, 3.0],
    [-1.0, 2.0, 3.0],
    [0.2, 2.7, 3.23],
    [0.2, 2.7, -3.23],
    [0.2, -2.7, -3.23],
    [-0.2, -2.7, -3.23],
    [-0.2, -2.7, 3.23],
    [-0.2, 2.7, 3.23],
  ] {
    test.add_test(length_test(&v, norm));
  }

  test.add_test(length_test(&[0.0], norm));
  test.add_test(length_test(&[0.0, 0.0, 0.0], norm));
  test.add_test(length_test(&[0.0, 0.0, 0.0, 0.0], norm));
  test.add_test(length_test(&[0.0, 0.0, 0.0, 0.0], norm));

  for x in [1.0, -1.0, 100.0, -100.0, 0.5, -0.5] {
    test.add_test(length_test(&[x], norm));
  }
}

fn distances(test: &mut Test, norm: Norm) {
  let triples: [([f64; 3], [f64; 3]); 12] = [
    ([1.0, 2.0, 3.0], [4., 5., 6.]),
    ([1.0, 2.0, -3.0], [-4., 5., 6.]),
    ([1.0, -2.0, -3.0], [4., 5., 6.]),
    ([-1.0, -2.0, -3.0], [-4., -5., -6.]),
    ([-1.0, -2.0, 3.0], [4., 5., 6.]),
    ([-1.0, 2.0, 3.0], [4., 5., 6.]),
    ([0.2, 2.7, 3.23], [0.1, -34.2, 90.111]),
    ([0.2, 2.7, -3.23], [0.1, 34.2, 90.111]),
    ([0.2, -2.7, -3.23], [0.1, 34.2, -90.111]),
    ([-0.2, -2.7, -3.23], [-0.1, -34.2, 90.111]),
    ([-0.2, -2.7, 3.23], [0.1, -34.2, -90.111]),
    ([-0.2, 2.7, 3.23], [-0.1, -34.2, -90.111]),
  ];

  for (a, b) in triples {
    test.add_test(distance_test(&a, &b, norm));
  }

  test.add_test(distance_test(&[0.0], &[0.], norm));
  test.add_test(distance_test(&[0.0, 0.0, 0.0], &[0., 0., 0.], norm));
  test.add_test(distance_test(&[0.0, 0.0, 0.0, 0.0], &[0., 0., 0., 0.], norm));

  for (a, b) in [(1.0, 1.0), (-1.0, 1.0), (100.0, 2.0), (-100.0, 2.4), (0.5, 0.1), (-0.5, 0.7333)] {
    test.add_test(distance_test(&[a], &[b], norm));
  }
}

pub fn suite() -> Result<Suite> {
  Suite::paired(
    "length_distance",
    vec![
      Op::new("length", call("length", 1)?, |t| lengths(t, math::length)),
      Op::new("length_1", call("length_1", 1)?, |t| lengths(t, math::length_1)),
      Op::new("length_inf", call("length_inf", 1)?, |t| lengths(t, math::length_inf)),
      Op::new("distance", call("distance", 2)?, |t| distances(t, math::length)),
      Op::new("distance_1", call("distance_1", 2)?, |t| distances(t, math::length_1)),
      Op::new("distance_inf", call("distance_inf", 2)?, |t| distances(t, math::length_inf)),
    ],
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::regress::value::Value;

  #[test]
  fn distances_are_lengths_of_differences() {
    assert_eq!(distance_test(&[1., 2., 3.], &[4., 6., 3.], math::length).expected, Value::from([5.]));
    assert_eq!(distance_test(&[1., 2., 3.], &[4., 6., 3.], math::length_1).expected, Value::from([7.]));
    assert_eq!(distance_test(&[1., 2., 3.], &[4., 6., 3.], math::length_inf).expected, Value::from([4.]));
  }
}
