use std::{
  io,
  time::{Duration, Instant},
};

use walkdir::WalkDir;

use crate::*;

#[derive(thiserror::Error, Debug)]
pub enum BatchError {
  #[error("Failed to read input directory {path:?}: {source}")]
  ReadInputDir {
    path: PathBuf,
    source: walkdir::Error,
  },
  #[error("Failed to create output directory {path:?}: {source}")]
  CreateOutputDir { path: PathBuf, source: io::Error },
  #[error("Failed to build worker thread pool: {0}")]
  ThreadPool(#[from] rayon::ThreadPoolBuildError),
  #[error("Failed to load matrices from {path:?}: {source}")]
  Record { path: PathBuf, source: RecordError },
  #[error("Failed to write determinants to {path:?}: {source}")]
  WriteOutput { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
  pub input: PathBuf,
  pub output: PathBuf,
  pub determinants: Vec<f64>,
}

#[derive(Debug)]
pub struct FileFailure {
  pub input: PathBuf,
  pub error: BatchError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
  /// sorted by input file name, so as `failed`
  pub processed: Vec<FileOutcome>,
  pub failed: Vec<FileFailure>,
  pub elapsed: Duration,
}

impl BatchReport {
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }

  pub fn matrix_count(&self) -> usize {
    self.processed.iter().map(|f| f.determinants.len()).sum()
  }
}

/// List the regular files directly inside `dir`, sorted by name.
pub fn list_input_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, BatchError> {
  let dir = dir.as_ref();
  let mut files = Vec::new();
  for entry in WalkDir::new(dir)
    .min_depth(1)
    .max_depth(1)
    .sort_by_file_name()
  {
    let entry = entry.map_err(|source| BatchError::ReadInputDir {
      path: dir.to_path_buf(),
      source,
    })?;

    if !entry.path().is_file() {
      log::debug!("skip non file entry {:?}", entry.path());
      continue;
    }
    files.push(entry.into_path());
  }
  Ok(files)
}

/// Read every matrix of one input file and write its determinants to the same
/// file name under `output_dir`.
///
/// No output file is left behind if the input can not be fully parsed or the
/// write fails.
pub fn process_file(
  input: &Path,
  output_dir: &Path,
  pivot: PivotSearch,
) -> Result<FileOutcome, BatchError> {
  let matrices = read_matrix_records(input).map_err(|source| BatchError::Record {
    path: input.to_path_buf(),
    source,
  })?;

  if log::log_enabled!(log::Level::Trace) {
    for matrix in &matrices {
      log::trace!("{input:?}:\n{matrix}");
    }
  }

  // each matrix is owned by this call, the elimination scratches its own copy
  let determinants = determinants_with(matrices, pivot);

  let output = output_dir.join(input.file_name().unwrap_or_default());
  write_determinants(&output, &determinants).map_err(|source| BatchError::WriteOutput {
    path: output.clone(),
    source,
  })?;

  log::info!(
    "{input:?}: {} determinants written to {output:?}",
    determinants.len()
  );

  Ok(FileOutcome {
    input: input.to_path_buf(),
    output,
    determinants,
  })
}

/// Process every input file of the config on a worker pool, one file per job.
///
/// Errors of a single file are collected into the report and do not stop the
/// other files. Only failing to list the input or prepare the output aborts the run.
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport, BatchError> {
  let start = Instant::now();

  let inputs = list_input_files(&config.input_dir)?;
  std::fs::create_dir_all(&config.output_dir).map_err(|source| {
    BatchError::CreateOutputDir {
      path: config.output_dir.clone(),
      source,
    }
  })?;

  let pool = WorkerPool::new("detkit-batch", config.thread_count)?;
  log::info!(
    "processing {} input files from {:?} with {} threads",
    inputs.len(),
    config.input_dir,
    pool.thread_count()
  );

  let pivot = config.pivot_search();
  let output_dir = config.output_dir.as_path();
  let results = pool.map_each(&inputs, |input| process_file(input, output_dir, pivot));

  let mut report = BatchReport::default();
  for (input, result) in inputs.into_iter().zip(results) {
    match result {
      Ok(outcome) => report.processed.push(outcome),
      Err(error) => {
        log::error!("{error}");
        report.failed.push(FileFailure { input, error });
      }
    }
  }
  report.elapsed = start.elapsed();

  Ok(report)
}
