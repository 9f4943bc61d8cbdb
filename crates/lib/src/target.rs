//! Build targets and the names of the files they produce.

use std::fmt;

use crate::consts::DEFAULT_TARGET;
use crate::error::ConfigError;

/// A binary crate compiled to the web target.
///
/// The crate lives in a directory of the same name, and the compiler names its
/// outputs two different ways: the loader script keeps the target name as-is,
/// while the module binary uses the artifact stem (hyphens become underscores).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildTarget {
  name: String,
}

impl BuildTarget {
  pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
    let name = name.into();
    if name.is_empty() {
      return Err(ConfigError::EmptyTargetName);
    }
    // The name lands unquoted in a shell command line.
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
      return Err(ConfigError::InvalidTargetName(name));
    }
    Ok(Self { name })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Base filename the compiler uses for the module binary.
  pub fn artifact_stem(&self) -> String {
    self.name.replace('-', "_")
  }

  pub fn wasm_file_name(&self) -> String {
    format!("{}.wasm", self.artifact_stem())
  }

  pub fn loader_file_name(&self) -> String {
    format!("{}.js", self.name)
  }

  /// Manifest path handed to cargo, relative to the working directory.
  ///
  /// Always uses `/`, which cargo accepts on every platform.
  pub fn manifest_path(&self) -> String {
    format!("{}/Cargo.toml", self.name)
  }

  /// Both artifact filenames, module binary first.
  pub fn artifact_file_names(&self) -> [String; 2] {
    [self.wasm_file_name(), self.loader_file_name()]
  }
}

impl Default for BuildTarget {
  fn default() -> Self {
    Self {
      name: DEFAULT_TARGET.to_string(),
    }
  }
}

impl fmt::Display for BuildTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}
