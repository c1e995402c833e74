//! Broadcasting of operands of different lengths.
//!
//! The runtime broadcasts a short operand by repeating its last component. Expected values are computed on operands
//! padded the same way.

/// Repeat the last element of `v` until it has `len` elements.
fn pad<T: Clone>(v: &[T], len: usize) -> Vec<T> {
  let mut padded = v.to_vec();

  if let Some(last) = v.last() {
    padded.resize(len.max(v.len()), last.clone());
  }

  padded
}

/// Zip two sequences, the shorter one right-padded with its last element.
///
/// An empty sequence cannot be padded and yields no pairs.
pub fn upzip<A, B>(a: &[A], b: &[B]) -> Vec<(A, B)>
where
  A: Clone,
  B: Clone,
{
  if a.is_empty() || b.is_empty() {
    return Vec::new();
  }

  let len = a.len().max(b.len());
  pad(a, len).into_iter().zip(pad(b, len)).collect()
}

/// Three-way [`upzip`].
pub fn upzip3<A, B, C>(a: &[A], b: &[B], c: &[C]) -> Vec<(A, B, C)>
where
  A: Clone,
  B: Clone,
  C: Clone,
{
  if a.is_empty() || b.is_empty() || c.is_empty() {
    return Vec::new();
  }

  let len = a.len().max(b.len()).max(c.len());

  pad(a, len)
    .into_iter()
    .zip(pad(b, len))
    .zip(pad(c, len))
    .map(|((a, b), c)| (a, b, c))
    .collect()
}
