use crate::*;

/// The helper struct to config the batch run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)] // any missing field will be set to the struct's default
pub struct BatchConfig {
  /// every regular file directly inside this directory is an input
  pub input_dir: PathBuf,
  /// results are written to the same file name in this directory, created if missing
  pub output_dir: PathBuf,
  /// None means use available parallelism, 1 means no parallelism
  pub thread_count: Option<usize>,
  /// None means only an exact zero is rejected as pivot
  pub pivot_tolerance: Option<f64>,
}

impl Default for BatchConfig {
  fn default() -> Self {
    Self {
      input_dir: PathBuf::from("data_in"),
      output_dir: PathBuf::from("data_out"),
      thread_count: None,
      pivot_tolerance: None,
    }
  }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
  #[error("Failed to access config file: {0}")]
  Io(#[from] std::io::Error),
  #[error("Failed to parse or serialize config json: {0}")]
  Json(#[from] serde_json::Error),
}

pub const CONFIG_FILE_NAME: &str = "detkit_batch_config.json";

/// Values given on the command line, a None field keeps the loaded config value.
#[derive(Clone, Debug, Default)]
pub struct BatchConfigOverride {
  pub input_dir: Option<PathBuf>,
  pub output_dir: Option<PathBuf>,
  pub thread_count: Option<usize>,
  pub pivot_tolerance: Option<f64>,
}

impl BatchConfig {
  pub fn apply_override(&mut self, overrides: BatchConfigOverride) {
    if let Some(input_dir) = overrides.input_dir {
      self.input_dir = input_dir;
    }
    if let Some(output_dir) = overrides.output_dir {
      self.output_dir = output_dir;
    }
    if overrides.thread_count.is_some() {
      self.thread_count = overrides.thread_count;
    }
    if overrides.pivot_tolerance.is_some() {
      self.pivot_tolerance = overrides.pivot_tolerance;
    }
  }

  pub fn pivot_search(&self) -> PivotSearch {
    match self.pivot_tolerance {
      Some(tolerance) => PivotSearch::AbsoluteTolerance(tolerance),
      None => PivotSearch::ExactNonZero,
    }
  }

  /// read the config file in the current dir if exist, fallback to default
  pub fn from_default_json_or_default() -> Self {
    std::env::current_dir()
      .ok()
      .and_then(|dir| Self::from_json_or_default(dir.join(CONFIG_FILE_NAME)))
      .unwrap_or_default()
  }

  pub fn from_json_or_default(path: impl AsRef<Path>) -> Option<Self> {
    let path = path.as_ref();
    if !path.exists() {
      return None;
    }
    match Self::from_json(path) {
      Ok(config) => Some(config),
      Err(err) => {
        log::warn!("ignore invalid config file {path:?}: {err}");
        None
      }
    }
  }

  pub fn from_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let json_file = std::io::BufReader::new(std::fs::File::open(path)?);
    Ok(serde_json::from_reader(json_file)?)
  }

  pub fn export_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let json_file = std::io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(json_file, self)?;
    Ok(())
  }
}

#[test]
fn missing_fields_use_default() {
  let config: BatchConfig = serde_json::from_str(r#"{ "thread_count": 1 }"#).unwrap();
  assert_eq!(config.thread_count, Some(1));
  assert_eq!(config.input_dir, PathBuf::from("data_in"));
  assert_eq!(config.pivot_search(), PivotSearch::ExactNonZero);

  let config: BatchConfig = serde_json::from_str(r#"{ "pivot_tolerance": 1e-12 }"#).unwrap();
  assert_eq!(
    config.pivot_search(),
    PivotSearch::AbsoluteTolerance(1e-12)
  );
}

#[test]
fn export_and_load() {
  let dir = std::env::temp_dir().join(format!("detkit-config-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join(CONFIG_FILE_NAME);

  let config = BatchConfig {
    input_dir: "in".into(),
    output_dir: "out".into(),
    thread_count: Some(3),
    pivot_tolerance: None,
  };
  config.export_to(&path).unwrap();
  assert_eq!(BatchConfig::from_json(&path).unwrap(), config);

  std::fs::write(&path, "not json").unwrap();
  assert!(BatchConfig::from_json(&path).is_err());
  assert!(BatchConfig::from_json_or_default(&path).is_none());
  assert!(BatchConfig::from_json_or_default(dir.join("missing.json")).is_none());

  std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn command_line_overrides_loaded_config() {
  let mut config: BatchConfig = serde_json::from_str(
    r#"{ "input_dir": "json_in", "output_dir": "json_out", "thread_count": 3, "pivot_tolerance": 1e-9 }"#,
  )
  .unwrap();

  config.apply_override(BatchConfigOverride {
    output_dir: Some("cli_out".into()),
    thread_count: Some(8),
    ..Default::default()
  });

  assert_eq!(config.input_dir, PathBuf::from("json_in"));
  assert_eq!(config.output_dir, PathBuf::from("cli_out"));
  assert_eq!(config.thread_count, Some(8));
  assert_eq!(config.pivot_tolerance, Some(1e-9));

  let unchanged = config.clone();
  config.apply_override(BatchConfigOverride::default());
  assert_eq!(config, unchanged);
}
