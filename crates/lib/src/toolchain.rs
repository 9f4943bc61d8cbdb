//! Command lines for the emsdk toolchain and the web-target compiler.
//!
//! Every line is run through a shell (see [`crate::host`]), so activation and
//! the action that depends on it are chained with `&&` inside one invocation:
//! the dependent action only runs when activation succeeded, and it sees the
//! environment activation set up.

use std::path::{Path, PathBuf};

use crate::consts::{BUILD_PROFILE, SDK_VERSION, WEB_TARGET_TRIPLE};
use crate::target::BuildTarget;

/// Location of the emsdk checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  root: PathBuf,
}

impl Toolchain {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn emsdk(&self) -> String {
    quote(&self.root.join("emsdk"))
  }

  /// `emsdk install latest`
  pub fn install_command(&self) -> String {
    format!("{} install {}", self.emsdk(), SDK_VERSION)
  }

  /// Activates the SDK for the rest of the command line.
  ///
  /// On Unix `emsdk activate` only writes its configuration, so the generated
  /// environment script is sourced as well. On Windows `emsdk.bat activate`
  /// updates the calling `cmd` session directly.
  #[cfg(not(windows))]
  pub fn activate_command(&self) -> String {
    format!(
      "{} activate {} && . {}",
      self.emsdk(),
      SDK_VERSION,
      quote(&self.root.join("emsdk_env.sh"))
    )
  }

  #[cfg(windows)]
  pub fn activate_command(&self) -> String {
    format!("{} activate {}", self.emsdk(), SDK_VERSION)
  }

  /// Activate, then build `library` with embuilder.
  pub fn build_dependency_command(&self, library: &str) -> String {
    format!("{} && {} build {}", self.activate_command(), EMBUILDER, library)
  }

  /// Activate, then cross-compile the single binary of `target` into `target_dir`.
  pub fn compile_command(&self, target: &BuildTarget, target_dir: &Path) -> String {
    format!(
      "{} && cargo build --bin {} --target {} --manifest-path {} --target-dir {} --{}",
      self.activate_command(),
      target.name(),
      WEB_TARGET_TRIPLE,
      target.manifest_path(),
      quote(target_dir),
      BUILD_PROFILE
    )
  }
}

#[cfg(windows)]
const EMBUILDER: &str = "embuilder.bat";

#[cfg(not(windows))]
const EMBUILDER: &str = "embuilder";

/// Characters a path may contain and still be passed to the shell unquoted.
fn is_plain(c: char) -> bool {
  c.is_ascii_alphanumeric()
    || matches!(c, '/' | '.' | '_' | '-' | ':' | '+' | ',' | '@' | '=')
    || (cfg!(windows) && c == '\\')
}

/// Quote a path for `/bin/sh` unless it is made of plain characters only.
///
/// Single quotes stop every expansion; an embedded `'` is closed, escaped and reopened.
#[cfg(not(windows))]
fn quote(path: &Path) -> String {
  let text = path.to_string_lossy();
  if !text.is_empty() && text.chars().all(is_plain) {
    return text.into_owned();
  }
  format!("'{}'", text.replace('\'', r"'\''"))
}

/// Quote a path for `cmd.exe`, which only understands double quotes.
#[cfg(windows)]
fn quote(path: &Path) -> String {
  let text = path.to_string_lossy();
  if !text.is_empty() && text.chars().all(is_plain) {
    return text.into_owned();
  }
  format!("\"{}\"", text.replace('"', ""))
}
