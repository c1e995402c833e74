//! Regression suites, one generated C++ file each.

use crate::{
  error::{Error, Result},
  regress::{
    call::{Call, Style},
    harness::Suite,
  },
};

mod arith;
mod geometry;
mod interp;
mod length_distance;
mod lighting;
mod logical;
mod matrix;
mod trig;

/// Names of every suite, in generation order.
pub const SUITES: [&str; 8] = [
  "trig",
  "logical",
  "lighting",
  "length_distance",
  "arith",
  "geometry",
  "interp",
  "matrix",
];

/// Build the suite called `name`.
pub fn suite(name: &str) -> Result<Suite> {
  match name {
    "trig" => trig::suite(),
    "logical" => logical::suite(),
    "lighting" => lighting::suite(),
    "length_distance" => length_distance::suite(),
    "arith" => arith::suite(),
    "geometry" => geometry::suite(),
    "interp" => interp::suite(),
    "matrix" => matrix::suite(),
    _ => Err(Error::UnknownSuite(name.to_owned())),
  }
}

/// A plain function call.
fn call(name: &str, arity: usize) -> Result<Call> {
  Call::new(Style::Call, name, arity)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_suite_builds() {
    for name in SUITES {
      let suite = suite(name).unwrap();

      assert_eq!(suite.name, name);
      assert!(!suite.tests.is_empty());
      assert!(suite.tests.iter().all(|t| t.checks() > 0), "{}", name);
    }
  }

  #[test]
  fn unknown_suite() {
    assert!(matches!(suite("fog"), Err(Error::UnknownSuite(name)) if name == "fog"));
  }
}
