use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueHint};
use detkit_batch::*;

#[derive(Parser)]
#[command(
  author,
  version,
  about = "Compute the determinant of every matrix record in a directory of files"
)]
struct Cli {
  /// Directory that contains the input record files
  #[arg(long, value_hint = ValueHint::DirPath)]
  input_dir: Option<PathBuf>,

  /// Directory the results are written to, one file per input file
  #[arg(long, value_hint = ValueHint::DirPath)]
  output_dir: Option<PathBuf>,

  /// Worker thread count, 1 disables parallel processing
  #[arg(long)]
  threads: Option<usize>,

  /// Reject pivots whose absolute value is not greater than this value
  #[arg(long)]
  pivot_tolerance: Option<f64>,

  /// Json config file, defaults to detkit_batch_config.json in the current directory
  #[arg(long, value_hint = ValueHint::FilePath)]
  config: Option<PathBuf>,

  /// Write the effective config to this path and exit
  #[arg(long, value_hint = ValueHint::FilePath)]
  export_config: Option<PathBuf>,
}

impl Cli {
  fn resolve_config(&self) -> anyhow::Result<BatchConfig> {
    let mut config = match &self.config {
      Some(path) => BatchConfig::from_json(path)
        .with_context(|| format!("failed to load config from {path:?}"))?,
      None => BatchConfig::from_default_json_or_default(),
    };

    config.apply_override(BatchConfigOverride {
      input_dir: self.input_dir.clone(),
      output_dir: self.output_dir.clone(),
      thread_count: self.threads,
      pivot_tolerance: self.pivot_tolerance,
    });
    Ok(config)
  }
}

fn main() -> anyhow::Result<()> {
  env_logger::builder().init();

  let cli = Cli::parse();
  let config = cli.resolve_config()?;
  log::debug!("batch config: {config:#?}");

  if let Some(path) = &cli.export_config {
    config
      .export_to(path)
      .with_context(|| format!("failed to export config to {path:?}"))?;
    log::info!("config exported to {path:?}");
    return Ok(());
  }

  let report = run_batch(&config)?;

  println!("{:.6}s", report.elapsed.as_secs_f64());

  if !report.is_success() {
    anyhow::bail!(
      "{} of {} input files failed",
      report.failed.len(),
      report.failed.len() + report.processed.len()
    );
  }
  Ok(())
}
