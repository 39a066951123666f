use std::{
  ffi::OsString,
  fs::{self, File},
  io::{self, BufWriter, Write},
  path::{Path, PathBuf},
};

pub fn format_determinant(det: f64) -> String {
  format!("{det:.6}")
}

/// Write one determinant per line.
pub struct DeterminantWriter<W: Write> {
  inner: W,
  written: usize,
}

impl<W: Write> DeterminantWriter<W> {
  pub fn new(inner: W) -> Self {
    Self { inner, written: 0 }
  }

  pub fn write(&mut self, det: f64) -> io::Result<()> {
    writeln!(self.inner, "{}", format_determinant(det))?;
    self.written += 1;
    Ok(())
  }

  pub fn written_count(&self) -> usize {
    self.written
  }

  /// flush and give back the underlying writer
  pub fn finish(mut self) -> io::Result<W> {
    self.inner.flush()?;
    Ok(self.inner)
  }
}

/// the sibling file the content is written to before it is moved to `path`
pub fn partial_output_path(path: &Path) -> PathBuf {
  let mut name: OsString = path.file_name().unwrap_or_default().to_os_string();
  name.push(".partial");
  path.with_file_name(name)
}

/// Write all determinants into the file at `path`, replacing any existing file.
///
/// The content goes to a sibling `.partial` file first and is renamed into place
/// only when everything has been flushed, so a failed write never leaves a
/// truncated file at `path`.
pub fn write_determinants(path: impl AsRef<Path>, determinants: &[f64]) -> io::Result<()> {
  let path = path.as_ref();
  let partial = partial_output_path(path);

  let result = write_determinants_to(&partial, determinants).and_then(|_| fs::rename(&partial, path));
  if result.is_err() {
    // the partial file may not exist if the create itself failed
    let _ = fs::remove_file(&partial);
  }
  result
}

fn write_determinants_to(path: &Path, determinants: &[f64]) -> io::Result<()> {
  let mut writer = DeterminantWriter::new(BufWriter::new(File::create(path)?));
  for det in determinants {
    writer.write(*det)?;
  }
  writer.finish()?.into_inner().map_err(|e| e.into_error())?.sync_all()
}
