use detkit_determinant::{determinants, SquareMatrix};

use crate::*;

#[test]
fn parse_multiple_records() {
  let text = "2 1 \n1 3 \n\n1 2 \n2 4 \n\n6 1 1 \n4 -2 5 \n2 8 7 \n";
  let matrices = parse_matrix_records(text).unwrap();
  assert_eq!(matrices.len(), 3);
  assert_eq!(matrices[0], SquareMatrix::from([[2., 1.], [1., 3.]]));
  assert_eq!(matrices[2].dim(), 3);
  assert_eq!(matrices[2].row(1), &[4., -2., 5.]);

  let results = determinants(matrices);
  assert_eq!(results[0], 5.);
  assert_eq!(results[1], 0.);
  assert!((results[2] + 306.).abs() < 1e-9);
}

#[test]
fn tolerate_loose_blank_lines_and_crlf() {
  let text = "\n\r\n1.5\r\n\r\n\r\n  \t \n0 1\n1 0\n\n\n";
  let matrices = parse_matrix_records(text).unwrap();
  assert_eq!(matrices.len(), 2);
  assert_eq!(matrices[0], SquareMatrix::from([[1.5]]));
  assert_eq!(matrices[1], SquareMatrix::from([[0., 1.], [1., 0.]]));
}

#[test]
fn empty_input_has_no_record() {
  assert!(parse_matrix_records("").unwrap().is_empty());
  assert!(parse_matrix_records("\n \n").unwrap().is_empty());
}

#[test]
fn malformed_records() {
  assert!(matches!(
    parse_matrix_records("1 2\n3 x\n"),
    Err(RecordError::InvalidNumber { line: 2, ref token }) if token == "x"
  ));

  assert!(matches!(
    parse_matrix_records("1 2\n3\n"),
    Err(RecordError::RowLengthMismatch {
      line: 2,
      expected: 2,
      found: 1
    })
  ));

  assert!(matches!(
    parse_matrix_records("1\n\n1 2 3\n4 5 6\n"),
    Err(RecordError::TruncatedMatrix {
      line: 3,
      expected: 3,
      found: 2
    })
  ));

  assert!(matches!(
    parse_matrix_records("1 2\n3 4\n\n1 2 3\n\n4 5 6\n"),
    Err(RecordError::TruncatedMatrix {
      line: 4,
      expected: 3,
      found: 1
    })
  ));

  assert!(matches!(
    parse_matrix_records("1 2\n3 4\n5 6\n"),
    Err(RecordError::ExcessRows {
      line: 3,
      expected: 2
    })
  ));
}

#[test]
fn reader_stops_after_error() {
  let mut reader = MatrixRecordReader::new("1\n\nx\n\n2\n".as_bytes());
  assert_eq!(reader.next().unwrap().unwrap(), SquareMatrix::from([[1.]]));
  assert!(reader.next().unwrap().is_err());
  assert!(reader.next().is_none());
}

#[test]
fn write_six_decimals() {
  let mut writer = DeterminantWriter::new(Vec::new());
  for det in [5., 0., -306., 1. / 3.] {
    writer.write(det).unwrap();
  }
  assert_eq!(writer.written_count(), 4);
  let out = String::from_utf8(writer.finish().unwrap()).unwrap();
  assert_eq!(out, "5.000000\n0.000000\n-306.000000\n0.333333\n");
  assert_eq!(format_determinant(2.5), "2.500000");
}

#[test]
fn wide_first_row_then_eof_is_truncated() {
  let text = "1 ".repeat(40000) + "\n";
  assert!(matches!(
    parse_matrix_records(&text),
    Err(RecordError::TruncatedMatrix {
      line: 1,
      expected: 40000,
      found: 1
    })
  ));
}

#[test]
fn write_file_leaves_no_partial_output() {
  let dir = std::env::temp_dir().join(format!("detkit-record-{}", std::process::id()));
  let _ = std::fs::remove_dir_all(&dir);
  std::fs::create_dir_all(&dir).unwrap();

  let path = dir.join("result.txt");
  write_determinants(&path, &[5., -306.]).unwrap();
  assert_eq!(
    std::fs::read_to_string(&path).unwrap(),
    "5.000000\n-306.000000\n"
  );
  assert!(!partial_output_path(&path).exists());

  // a directory in the way makes the final rename fail
  let blocked = dir.join("blocked.txt");
  std::fs::create_dir_all(&blocked).unwrap();
  assert!(write_determinants(&blocked, &[1.]).is_err());
  assert!(blocked.is_dir());
  assert!(!partial_output_path(&blocked).exists());

  std::fs::remove_dir_all(&dir).unwrap();
}
