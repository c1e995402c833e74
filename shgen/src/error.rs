//! Errors of the generators.

use crate::config::ConfigError;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  /// The output sink refused text.
  #[error("Failed to write generated code: {0}")]
  Fmt(#[from] fmt::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("Unknown family: {0}")]
  UnknownFamily(String),

  #[error("Unknown test suite: {0}")]
  UnknownSuite(String),

  /// Prefix, postfix and lookup calls take one operand, infix calls two.
  #[error("Invalid arity {arity} for {style} call")]
  InvalidCallArity { style: String, arity: usize },

  #[error("Call of arity {got} added to test {test} of arity {expected}")]
  CallArityMismatch { test: String, expected: usize, got: usize },
}
