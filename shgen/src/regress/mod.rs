//! Regression-test program generators.
//!
//! Expected results are computed on the host with plain `f64` arithmetic, then written as C++ programs checking the
//! runtime against them. Operands of different lengths are broadcast as the runtime does (see [`broadcast`]).

pub mod broadcast;
pub mod call;
pub mod case;
pub mod harness;
pub mod math;
pub mod matrix;
pub mod opcode;
pub mod suites;
pub mod texture;
pub mod value;

pub use self::{
  call::{Call, Style},
  case::{make_test, TestCase},
  harness::{Mode, Op, Suite, Test, EPSILON},
  suites::{suite, SUITES},
  value::Value,
};
