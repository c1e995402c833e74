//! Interpolation and clamping.

use super::call;
use crate::{
  error::Result,
  regress::{
    broadcast::upzip3,
    case::TestCase,
    harness::{Op, Suite, Test},
    math,
  },
};

/// Componentwise ternary operation, operands broadcast.
fn ternary(p: &[f64], q: &[f64], r: &[f64], op: fn(f64, f64, f64) -> f64) -> TestCase {
  let result = upzip3(p, q, r).into_iter().map(|(a, b, c)| op(a, b, c)).collect::<Vec<_>>();
  TestCase::new(result, vec![p.into(), q.into(), r.into()])
}

/// `lerp(f, a, b)`.
fn lerps(test: &mut Test) {
  test.add_test(ternary(&[0.0], &[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], math::lerp));
  test.add_test(ternary(&[1.0], &[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], math::lerp));
  test.add_test(ternary(&[0.25], &[4.0, 8.0], &[8.0, 4.0], math::lerp));
  test.add_test(ternary(&[0.0, 0.5, 1.0], &[1.0, 1.0, 1.0], &[-1.0, -1.0, -1.0], math::lerp));
  test.add_test(ternary(&[0.3, 0.7, 0.1, 0.9], &[2.0], &[-2.0], math::lerp));
}

/// `clamp(x, lo, hi)`.
fn clamps(test: &mut Test) {
  test.add_test(ternary(&[-2.0, 0.5, 2.0], &[0.0], &[1.0], math::clamp));
  test.add_test(ternary(&[0.3], &[0.5], &[1.0], math::clamp));
  test.add_test(ternary(&[5.0, -5.0, 0.0, 1.5], &[-1.0, -1.0, -1.0, -1.0], &[1.0, 1.0, 1.0, 1.0], math::clamp));
  test.add_test(ternary(&[0.25, 0.75], &[0.0, 0.5], &[0.5, 1.0], math::clamp));
}

/// `smoothstep(a, b, x)`.
fn smoothsteps(test: &mut Test) {
  test.add_test(ternary(&[0.0], &[1.0], &[-1.0, 0.0, 0.25, 0.5], math::smoothstep));
  test.add_test(ternary(&[0.0], &[1.0], &[0.75, 1.0, 2.0], math::smoothstep));
  test.add_test(ternary(&[-1.0, 0.0], &[1.0, 4.0], &[0.0, 1.0], math::smoothstep));
  test.add_test(ternary(&[2.0], &[4.0], &[3.0], math::smoothstep));
}

pub fn suite() -> Result<Suite> {
  Suite::paired(
    "interp",
    vec![
      Op::new("lerp", call("lerp", 3)?, lerps),
      Op::new("clamp", call("clamp", 3)?, clamps),
      Op::new("smoothstep", call("smoothstep", 3)?, smoothsteps),
    ],
  )
}
