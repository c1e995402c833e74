//! Literal values of test cases.

/// A test input or expected output.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Scalar(f64),
  Vector(Vec<f64>),

  /// Rows of a matrix.
  Matrix(Vec<Vec<f64>>),
}

impl Value {
  /// Number of elements of array values (components of a vector, rows of a matrix).
  pub fn array_len(&self) -> Option<usize> {
    match self {
      Value::Scalar(_) => None,
      Value::Vector(v) => Some(v.len()),
      Value::Matrix(m) => Some(m.len()),
    }
  }
}

impl From<f64> for Value {
  fn from(x: f64) -> Self {
    Value::Scalar(x)
  }
}

impl From<Vec<f64>> for Value {
  fn from(v: Vec<f64>) -> Self {
    Value::Vector(v)
  }
}

impl From<&[f64]> for Value {
  fn from(v: &[f64]) -> Self {
    Value::Vector(v.to_vec())
  }
}

impl<const N: usize> From<[f64; N]> for Value {
  fn from(v: [f64; N]) -> Self {
    Value::Vector(v.to_vec())
  }
}

impl From<Vec<Vec<f64>>> for Value {
  fn from(m: Vec<Vec<f64>>) -> Self {
    Value::Matrix(m)
  }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Value {
  fn from(m: [[f64; C]; R]) -> Self {
    Value::Matrix(m.iter().map(|row| row.to_vec()).collect())
  }
}

/// C++ spelling of a number.
///
/// Non-finite values go through `std::numeric_limits`.
pub fn literal(x: f64) -> String {
  if x.is_nan() {
    "std::numeric_limits<float>::quiet_NaN()".to_owned()
  } else if x.is_infinite() {
    let sign = if x < 0. { "-" } else { "" };
    format!("{}std::numeric_limits<float>::infinity()", sign)
  } else {
    format!("{:?}", x)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn literals() {
    assert_eq!(literal(1.), "1.0");
    assert_eq!(literal(-0.25), "-0.25");
    assert_eq!(literal(0.01), "0.01");
  }

  #[test]
  fn non_finite_literals() {
    assert_eq!(literal(f64::NAN), "std::numeric_limits<float>::quiet_NaN()");
    assert_eq!(literal(f64::INFINITY), "std::numeric_limits<float>::infinity()");
    assert_eq!(literal(f64::NEG_INFINITY), "-std::numeric_limits<float>::infinity()");
  }

  #[test]
  fn array_lengths() {
    assert_eq!(Value::from(2.).array_len(), None);
    assert_eq!(Value::from([1., 2., 3.]).array_len(), Some(3));
    assert_eq!(Value::from([[1., 2.], [3., 4.], [5., 6.]]).array_len(), Some(3));
  }
}
