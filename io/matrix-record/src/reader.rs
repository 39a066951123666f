use std::{
  fs::File,
  io::{BufRead, BufReader, Lines},
  path::Path,
};

use detkit_determinant::SquareMatrix;

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
  #[error("Matrix record read failed: {0}")]
  Io(#[from] std::io::Error),
  #[error("line {line}: `{token}` is not a valid number")]
  InvalidNumber { line: usize, token: String },
  #[error("line {line}: expect {expected} entries in the row, found {found}")]
  RowLengthMismatch {
    line: usize,
    expected: usize,
    found: usize,
  },
  #[error("line {line}: the matrix starting here expects {expected} rows, found {found}")]
  TruncatedMatrix {
    line: usize,
    expected: usize,
    found: usize,
  },
  #[error("line {line}: the matrix already has {expected} rows, a blank line is required between matrices")]
  ExcessRows { line: usize, expected: usize },
}

/// Streaming reader that yields one square matrix per record.
///
/// The dimension of each matrix is decided by the entry count of its first row.
/// The reader stops after the first error.
pub struct MatrixRecordReader<R> {
  lines: Lines<R>,
  /// 1 based number of the last consumed line
  line_number: usize,
  finished: bool,
}

impl<R: BufRead> MatrixRecordReader<R> {
  pub fn new(reader: R) -> Self {
    Self {
      lines: reader.lines(),
      line_number: 0,
      finished: false,
    }
  }

  fn next_line(&mut self) -> Result<Option<String>, RecordError> {
    match self.lines.next() {
      Some(line) => {
        self.line_number += 1;
        Ok(Some(line?))
      }
      None => Ok(None),
    }
  }

  fn read_record(&mut self) -> Result<Option<SquareMatrix>, RecordError> {
    let first = loop {
      match self.next_line()? {
        Some(line) if is_blank(&line) => continue,
        Some(line) => break line,
        None => return Ok(None),
      }
    };

    let start_line = self.line_number;
    let mut data = Vec::new();
    parse_row(&first, start_line, &mut data)?;
    // grows row by row, a truncated record must never allocate n * n up front
    let n = data.len();

    for found in 1..n {
      let line = match self.next_line()? {
        Some(line) if !is_blank(&line) => line,
        _ => {
          return Err(RecordError::TruncatedMatrix {
            line: start_line,
            expected: n,
            found,
          })
        }
      };
      let count = parse_row(&line, self.line_number, &mut data)?;
      if count != n {
        return Err(RecordError::RowLengthMismatch {
          line: self.line_number,
          expected: n,
          found: count,
        });
      }
    }

    if let Some(line) = self.next_line()? {
      if !is_blank(&line) {
        return Err(RecordError::ExcessRows {
          line: self.line_number,
          expected: n,
        });
      }
    }

    log::debug!("read {n}x{n} matrix at line {start_line}");
    // the length always matches, every row has been checked above
    Ok(SquareMatrix::from_row_major(n, data))
  }
}

impl<R: BufRead> Iterator for MatrixRecordReader<R> {
  type Item = Result<SquareMatrix, RecordError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }
    match self.read_record() {
      Ok(Some(matrix)) => Some(Ok(matrix)),
      Ok(None) => {
        self.finished = true;
        None
      }
      Err(err) => {
        self.finished = true;
        Some(Err(err))
      }
    }
  }
}

fn is_blank(line: &str) -> bool {
  line.trim().is_empty()
}

/// append the parsed row into the buffer, return the entry count of this row
fn parse_row(line: &str, line_number: usize, data: &mut Vec<f64>) -> Result<usize, RecordError> {
  let mut count = 0;
  for token in line.split_whitespace() {
    let value = token
      .parse::<f64>()
      .map_err(|_| RecordError::InvalidNumber {
        line: line_number,
        token: token.to_string(),
      })?;
    data.push(value);
    count += 1;
  }
  Ok(count)
}

pub fn parse_matrix_records(text: &str) -> Result<Vec<SquareMatrix>, RecordError> {
  MatrixRecordReader::new(text.as_bytes()).collect()
}

pub fn read_matrix_records(path: impl AsRef<Path>) -> Result<Vec<SquareMatrix>, RecordError> {
  let file = File::open(path)?;
  MatrixRecordReader::new(BufReader::new(file)).collect()
}
