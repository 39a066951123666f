//! Determinant of dense square matrices by in place gaussian elimination with
//! partial pivoting.
//!
//! ```rust
//! use detkit_determinant::*;
//!
//! let mut m = [2., 1., 1., 3.];
//! assert_eq!(compute_determinant(&mut m, 2), 5.);
//! ```

mod elimination;
mod matrix;

pub use elimination::*;
pub use matrix::*;
