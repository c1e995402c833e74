//! Host reference matrix algebra.
//!
//! Matrices are stored as rows. Every function expects rectangular input, and all but [`transpose`] square input;
//! they panic on jagged rows or on a matrix with fewer columns than rows.

/// Matrix without row `row` and column `col`.
pub fn minor(m: &[Vec<f64>], row: usize, col: usize) -> Vec<Vec<f64>> {
  m.iter()
    .enumerate()
    .filter(|&(i, _)| i != row)
    .map(|(_, r)| {
      r.iter()
        .enumerate()
        .filter(|&(j, _)| j != col)
        .map(|(_, &x)| x)
        .collect()
    })
    .collect()
}

/// Determinant, by cofactor expansion along the first row.
///
/// # Panics
///
/// Panics if a row is shorter than the number of rows.
pub fn det(m: &[Vec<f64>]) -> f64 {
  match m.len() {
    0 => 1.,
    1 => m[0][0],
    2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
    3 => {
      m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }
    n => (0..n).map(|j| m[0][j] * cofactor(m, 0, j)).sum(),
  }
}

/// Signed minor determinant.
pub fn cofactor(m: &[Vec<f64>], row: usize, col: usize) -> f64 {
  let sign = if (row + col) % 2 == 0 { 1. } else { -1. };
  sign * det(&minor(m, row, col))
}

/// Transpose of a rectangular matrix.
///
/// # Panics
///
/// Panics if a row is shorter than the first one.
pub fn transpose(m: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let cols = m.first().map_or(0, Vec::len);
  (0..cols).map(|j| m.iter().map(|row| row[j]).collect()).collect()
}

/// Transpose of the cofactor matrix.
pub fn adjoint(m: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let n = m.len();

  if n == 1 {
    return vec![vec![1.]];
  }

  (0..n).map(|i| (0..n).map(|j| cofactor(m, j, i)).collect()).collect()
}

/// Inverse; a singular matrix yields the zero matrix of the same dimensions.
pub fn inverse(m: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let d = det(m);

  if d == 0. {
    return m.iter().map(|row| vec![0.; row.len()]).collect();
  }

  adjoint(m).into_iter().map(|row| row.into_iter().map(|x| x / d).collect()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn mat<const N: usize>(rows: [[f64; N]; N]) -> Vec<Vec<f64>> {
    rows.iter().map(|r| r.to_vec()).collect()
  }

  #[test]
  fn determinant_base_cases() {
    assert_eq!(det(&mat([[2.]])), 2.);
    assert_eq!(det(&mat([[1., 0.], [0., 1.]])), 1.);
    assert_eq!(det(&mat([[1., 2., 3.], [3., 4., 5.], [5., 6., 7.]])), 0.);
  }

  #[test]
  fn determinant_by_expansion() {
    let m = mat([[2., 0., 0., 0.], [0., 3., 0., 0.], [0., 0., 4., 0.], [1., 2., 3., 5.]]);
    assert_eq!(det(&m), 120.);
  }

  #[test]
  fn transpose_swaps() {
    assert_eq!(
      transpose(&[vec![1., 2., 3.], vec![4., 5., 6.]]),
      [vec![1., 4.], vec![2., 5.], vec![3., 6.]]
    );
  }

  #[test]
  #[should_panic]
  fn jagged_determinant_panics() {
    det(&[vec![1., 2.], vec![3.]]);
  }

  #[test]
  #[should_panic]
  fn jagged_transpose_panics() {
    transpose(&[vec![1., 2.], vec![3.]]);
  }

  #[test]
  fn inverse_of_singular_is_zero() {
    assert_eq!(inverse(&mat([[1., 2.], [2., 4.]])), mat([[0., 0.], [0., 0.]]));
  }

  #[test]
  fn inverse_of_regular() {
    assert_eq!(inverse(&mat([[2., 0.], [0., 4.]])), mat([[0.5, 0.], [0., 0.25]]));
    assert_eq!(adjoint(&mat([[1., 2.], [3., 4.]])), mat([[4., -2.], [-3., 1.]]));
  }
}
