use std::fmt;

use crate::*;

/// Owned dense square matrix, row major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SquareMatrix {
  data: Vec<f64>,
  dim: usize,
}

impl SquareMatrix {
  /// return None if the data length is not `dim * dim`
  pub fn from_row_major(dim: usize, data: Vec<f64>) -> Option<Self> {
    (dim.checked_mul(dim) == Some(data.len())).then_some(Self { data, dim })
  }

  pub fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
    let data = (0..dim * dim).map(|i| f(i / dim, i % dim)).collect();
    Self { data, dim }
  }

  pub fn zeros(dim: usize) -> Self {
    Self {
      data: vec![0.; dim * dim],
      dim,
    }
  }

  pub fn identity(dim: usize) -> Self {
    Self::from_fn(dim, |r, c| if r == c { 1. } else { 0. })
  }

  pub fn dim(&self) -> usize {
    self.dim
  }

  pub fn get(&self, row: usize, column: usize) -> f64 {
    self.data[row * self.dim + column]
  }

  pub fn row(&self, row: usize) -> &[f64] {
    let start = row * self.dim;
    &self.data[start..start + self.dim]
  }

  pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
    // chunks_exact panics on zero chunk size
    self.data.chunks(self.dim.max(1))
  }

  pub fn swap_rows(&mut self, a: usize, b: usize) {
    assert!(a < self.dim && b < self.dim, "row index out of range");
    swap_rows(&mut self.data, self.dim, a, b);
  }

  /// Compute the determinant in place, the matrix content is consumed as scratch space.
  pub fn determinant(&mut self) -> f64 {
    compute_determinant(&mut self.data, self.dim)
  }

  pub fn determinant_with(&mut self, pivot: PivotSearch) -> f64 {
    compute_determinant_with(&mut self.data, self.dim, pivot)
  }

  /// Compute the determinant on a private copy, self is untouched.
  pub fn determinant_of_copy(&self) -> f64 {
    self.clone().determinant()
  }
}

impl<const N: usize> From<[[f64; N]; N]> for SquareMatrix {
  fn from(rows: [[f64; N]; N]) -> Self {
    Self {
      data: rows.iter().flatten().copied().collect(),
      dim: N,
    }
  }
}

/// each entry printed with 6 decimals and a trailing space, one row per line
impl fmt::Display for SquareMatrix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in self.rows() {
      for v in row {
        write!(f, "{v:.6} ")?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

/// Map a matrix source to its determinants, in the same order.
///
/// Every matrix is owned by the iteration, so the in place elimination never
/// touches the caller's data.
pub fn determinants(source: impl IntoIterator<Item = SquareMatrix>) -> Vec<f64> {
  determinants_with(source, PivotSearch::default())
}

pub fn determinants_with(
  source: impl IntoIterator<Item = SquareMatrix>,
  pivot: PivotSearch,
) -> Vec<f64> {
  source
    .into_iter()
    .map(|mut m| m.determinant_with(pivot))
    .collect()
}

#[test]
fn matrix_determinant() {
  let m = SquareMatrix::from([[6., 1., 1.], [4., -2., 5.], [2., 8., 7.]]);
  let det = m.determinant_of_copy();
  assert!((det + 306.).abs() < 1e-9);
  assert_eq!(m.row(1), &[4., -2., 5.]);

  let mut swapped = m.clone();
  swapped.swap_rows(0, 2);
  assert!((swapped.determinant() - 306.).abs() < 1e-9);
}

#[test]
fn construct() {
  assert!(SquareMatrix::from_row_major(2, vec![1., 2., 3.]).is_none());
  // dim * dim overflows to 0, an empty buffer must still be rejected
  assert!(SquareMatrix::from_row_major(1 << (usize::BITS / 2), Vec::new()).is_none());
  let m = SquareMatrix::from_row_major(2, vec![1., 2., 3., 4.]).unwrap();
  assert_eq!(m.get(1, 0), 3.);
  assert_eq!(SquareMatrix::identity(3).determinant_of_copy(), 1.);
  assert_eq!(SquareMatrix::zeros(3).determinant_of_copy(), 0.);
  assert_eq!(SquareMatrix::zeros(0).determinant_of_copy(), 1.);
  assert_eq!(SquareMatrix::zeros(0).rows().count(), 0);
}

#[test]
fn display() {
  let m = SquareMatrix::from([[1., -2.5], [0., 3.]]);
  assert_eq!(
    m.to_string(),
    "1.000000 -2.500000 \n0.000000 3.000000 \n"
  );
}

#[test]
fn batch_order_is_kept() {
  let source = vec![
    SquareMatrix::from([[2., 1.], [1., 3.]]),
    SquareMatrix::from([[1., 2.], [2., 4.]]),
    SquareMatrix::from([[7.]]),
  ];
  assert_eq!(determinants(source), vec![5., 0., 7.]);
}
