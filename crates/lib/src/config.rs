//! Pipeline configuration.
//!
//! There is no configuration file: the defaults are the fixed project layout,
//! and a few environment variables can override them.

use std::path::PathBuf;

use crate::consts::{
  BUILD_PROFILE, DEFAULT_STAGING_DIR, DEFAULT_TARGET_DIR, SHELL_ENV, STAGING_DIR_ENV, TARGET_DIR_ENV,
  TARGETS_ENV, WEB_TARGET_TRIPLE,
};
use crate::error::ConfigError;
use crate::target::BuildTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
  /// Targets compiled and staged, in order.
  pub targets: Vec<BuildTarget>,
  /// Directory the artifacts are copied into.
  pub staging_dir: PathBuf,
  /// Cargo's target directory.
  pub target_dir: PathBuf,
  /// Shell override for running command lines.
  pub shell: Option<String>,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self {
      targets: vec![BuildTarget::default()],
      staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
      target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
      shell: None,
    }
  }
}

impl PipelineConfig {
  /// Defaults, overridden by `EMSTAGE_TARGETS`, `EMSTAGE_STAGING_DIR`,
  /// `EMSTAGE_TARGET_DIR` and `EMSTAGE_SHELL` when set.
  pub fn from_env() -> Result<Self, ConfigError> {
    let mut config = Self::default();

    if let Ok(targets) = std::env::var(TARGETS_ENV) {
      config.targets = parse_targets(&targets)?;
    }
    if let Some(dir) = non_empty_var(STAGING_DIR_ENV) {
      config.staging_dir = PathBuf::from(dir);
    }
    if let Some(dir) = non_empty_var(TARGET_DIR_ENV) {
      config.target_dir = PathBuf::from(dir);
    }
    config.shell = non_empty_var(SHELL_ENV);

    Ok(config)
  }

  /// Directory the compiler writes web-target release artifacts to.
  pub fn output_dir(&self) -> PathBuf {
    self.target_dir.join(WEB_TARGET_TRIPLE).join(BUILD_PROFILE)
  }
}

fn non_empty_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Parse a comma-separated list of target names, skipping empty entries.
pub fn parse_targets(list: &str) -> Result<Vec<BuildTarget>, ConfigError> {
  let targets = list
    .split(',')
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .map(BuildTarget::new)
    .collect::<Result<Vec<_>, _>>()?;

  if targets.is_empty() {
    return Err(ConfigError::NoTargets);
  }
  Ok(targets)
}
