//! Error types for pipeline configuration and step execution.

use std::path::PathBuf;

use thiserror::Error;

/// Why a single pipeline step failed.
#[derive(Debug, Error)]
pub enum StepError {
  /// The external tool ran and reported a non-zero status.
  ///
  /// `code` is `None` when the process was terminated by a signal.
  #[error("command exited with status {}", display_code(.code))]
  Exited { code: Option<i32> },

  /// The shell that runs the command line could not be started.
  #[error("failed to spawn command: {0}")]
  Spawn(#[source] std::io::Error),

  /// Copying a build artifact into the staging directory failed.
  #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

fn display_code(code: &Option<i32>) -> String {
  match code {
    Some(code) => code.to_string(),
    None => "unknown (terminated by signal)".to_string(),
  }
}

/// Invalid pipeline configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("build target name must not be empty")]
  EmptyTargetName,

  #[error("invalid build target name {0:?}: only letters, digits, `-` and `_` are allowed")]
  InvalidTargetName(String),

  #[error("no build targets configured")]
  NoTargets,
}
