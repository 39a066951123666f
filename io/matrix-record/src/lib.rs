//! Plain text matrix records.
//!
//! A record is `n` lines of `n` whitespace separated numbers, records are separated
//! by blank lines. The determinant output is one line per record, 6 decimals.

mod reader;
mod writer;

pub use reader::*;
pub use writer::*;

#[cfg(test)]
mod test;
