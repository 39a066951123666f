/// Decide which entry in the current pivot column is accepted as the pivot.
///
/// The search always takes the first accepted row at or below the diagonal,
/// it never looks for the largest magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PivotSearch {
  /// any entry that is not exactly zero is a valid pivot
  #[default]
  ExactNonZero,
  /// an entry is a valid pivot only if its absolute value is greater than the tolerance.
  ///
  /// columns with only tiny entries are treated as singular, so a nearly singular matrix
  /// may report 0 instead of a small noisy value.
  AbsoluteTolerance(f64),
}

impl PivotSearch {
  #[inline(always)]
  pub fn accepts(&self, value: f64) -> bool {
    match *self {
      PivotSearch::ExactNonZero => value != 0.,
      // nan is never accepted here, the comparison is false
      PivotSearch::AbsoluteTolerance(tolerance) => value.abs() > tolerance,
    }
  }
}

/// Compute the determinant of the row major `n`x`n` matrix stored in `matrix`.
///
/// The buffer is used as scratch space: when this returns it holds the upper
/// triangular factor of the elimination (or a partially reduced matrix if a
/// singular column was found). Clone the input first if it is still needed.
///
/// An empty matrix (`n == 0`) has determinant 1.
///
/// # Panics
///
/// if `matrix.len() != n * n`
pub fn compute_determinant(matrix: &mut [f64], n: usize) -> f64 {
  compute_determinant_with(matrix, n, PivotSearch::ExactNonZero)
}

/// Same as [compute_determinant], with a custom pivot acceptance rule.
pub fn compute_determinant_with(matrix: &mut [f64], n: usize, pivot: PivotSearch) -> f64 {
  assert!(
    n.checked_mul(n) == Some(matrix.len()),
    "matrix buffer length does not match the declared dimension {n}"
  );

  let mut det = 1.;
  let mut swap_sign = 1.;

  for i in 0..n {
    let Some(k) = (i..n).find(|&k| pivot.accepts(matrix[k * n + i])) else {
      // no usable pivot in this column, the matrix is singular
      return 0.;
    };

    if k != i {
      swap_rows(matrix, n, i, k);
      swap_sign = -swap_sign;
    }

    let diagonal = matrix[i * n + i];
    det *= diagonal;

    let (head, tail) = matrix.split_at_mut((i + 1) * n);
    let pivot_row = &head[i * n..];
    for row in tail.chunks_exact_mut(n) {
      let factor = -row[i] / diagonal;
      row[i] = 0.;
      for c in i + 1..n {
        row[c] += factor * pivot_row[c];
      }
    }
  }

  det * swap_sign
}

/// swap the full row `a` and row `b` of a row major `n`x`n` buffer
pub(crate) fn swap_rows(matrix: &mut [f64], n: usize, a: usize, b: usize) {
  if a == b {
    return;
  }
  let (low, high) = if a < b { (a, b) } else { (b, a) };
  let (head, tail) = matrix.split_at_mut(high * n);
  head[low * n..(low + 1) * n].swap_with_slice(&mut tail[..n]);
}
