//! Host reference arithmetic.

/// Euclidean length.
pub fn length(v: &[f64]) -> f64 {
  v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Manhattan length.
pub fn length_1(v: &[f64]) -> f64 {
  v.iter().map(|x| x.abs()).sum()
}

/// Largest absolute component.
///
/// The running maximum starts at the first component, not at its absolute value.
pub fn length_inf(v: &[f64]) -> f64 {
  let first = v.first().copied().unwrap_or(0.);
  v.iter().map(|x| x.abs()).fold(first, f64::max)
}

/// Componentwise difference, truncated to the shorter operand.
pub fn sub(a: &[f64], b: &[f64]) -> Vec<f64> {
  a.iter().zip(b).map(|(x, y)| x - y).collect()
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
  a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Cross product of two 3D vectors.
pub fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
  [
    a[1] * b[2] - a[2] * b[1],
    a[2] * b[0] - a[0] * b[2],
    a[0] * b[1] - a[1] * b[0],
  ]
}

/// Unit vector of `v`; the zero vector normalizes to zeros.
pub fn normalize(v: &[f64]) -> Vec<f64> {
  let len = length(v);

  if len == 0. {
    vec![0.; v.len()]
  } else {
    v.iter().map(|x| x / len).collect()
  }
}

/// `f * a + (1 - f) * b`.
pub fn lerp(f: f64, a: f64, b: f64) -> f64 {
  f * a + (1. - f) * b
}

pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
  x.max(lo).min(hi)
}

/// Hermite interpolation of `x` between the edges `a` and `b`.
pub fn smoothstep(a: f64, b: f64, x: f64) -> f64 {
  let t = clamp((x - a) / (b - a), 0., 1.);
  t * t * (3. - 2. * t)
}

/// Real part of the principal complex cube root.
///
/// Negative inputs do not get their real cube root: `cbrt(-8)` is `1`, the real part of `2 * e^(iπ/3)`. Expected
/// values of cube-root tests have always been computed that way and are kept so.
pub fn principal_cbrt(x: f64) -> f64 {
  if x >= 0. {
    x.powf(1. / 3.)
  } else {
    (-x).powf(1. / 3.) * (std::f64::consts::PI / 3.).cos()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
  }

  #[test]
  fn dot_products() {
    assert_eq!(dot(&[1., 1., 1.], &[1., 1., 1.]), 3.);
    assert_eq!(dot(&[1., 0., 1.], &[0., 1., 0.]), 0.);
  }

  #[test]
  fn lengths() {
    assert_eq!(length(&[3., 4.]), 5.);
    assert_eq!(length_1(&[1., -2., 3.]), 6.);
    assert_eq!(length_inf(&[1., -5., 3.]), 5.);
    assert_eq!(length_inf(&[-1., -0.5]), 1.);
  }

  #[test]
  fn cross_product() {
    assert_eq!(cross(&[1., 0., 0.], &[0., 1., 0.]), [0., 0., 1.]);
  }

  #[test]
  fn zero_normalizes_to_zero() {
    assert_eq!(normalize(&[0., 0., 0.]), [0., 0., 0.]);
    assert_eq!(normalize(&[2., 0.]), [1., 0.]);
  }

  #[test]
  fn interpolation() {
    assert_eq!(lerp(0.25, 4., 8.), 7.);
    assert_eq!(smoothstep(0., 1., 0.5), 0.5);
    assert_eq!(smoothstep(0., 1., 2.), 1.);
    assert_eq!(clamp(-3., -1., 1.), -1.);
  }

  #[test]
  fn cube_roots() {
    assert!(close(principal_cbrt(8.), 2.));
    assert!(close(principal_cbrt(-8.), 1.));
  }
}
