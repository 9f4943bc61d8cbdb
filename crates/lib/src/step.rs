//! The steps of the build pipeline.

use std::fmt;

use crate::consts::{DEPENDENCY_LIBRARY, SDK_VERSION};
use crate::target::BuildTarget;

/// One unit of the pipeline, evaluated as pass/fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
  /// Install the latest SDK under the toolchain root.
  InstallToolchain,
  /// Activate the SDK, then build the native dependency library.
  BuildDependency,
  /// Add the compiler flags to the environment of later invocations.
  ConfigureEnvironment,
  /// Activate the SDK, then cross-compile one target.
  Compile(BuildTarget),
  /// Copy one target's artifact pair into the staging directory.
  StageArtifacts(BuildTarget),
}

impl Step {
  /// Short identifier used in logs.
  pub fn name(&self) -> &'static str {
    match self {
      Step::InstallToolchain => "install-toolchain",
      Step::BuildDependency => "build-dependency",
      Step::ConfigureEnvironment => "configure-environment",
      Step::Compile(_) => "compile",
      Step::StageArtifacts(_) => "stage-artifacts",
    }
  }

  /// Message reported when this step fails.
  pub fn describe(&self) -> String {
    match self {
      Step::InstallToolchain => format!("Failed to install {} version of emsdk", SDK_VERSION),
      Step::BuildDependency => format!("Failed to build {}", DEPENDENCY_LIBRARY),
      Step::ConfigureEnvironment => "Failed to configure the build environment".to_string(),
      Step::Compile(target) => format!("Failed to build {} for WASM", target),
      Step::StageArtifacts(target) => format!("Failed to stage {} artifacts", target),
    }
  }

  /// The target this step works on, if any.
  pub fn target(&self) -> Option<&BuildTarget> {
    match self {
      Step::Compile(target) | Step::StageArtifacts(target) => Some(target),
      _ => None,
    }
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.target() {
      Some(target) => write!(f, "{} ({})", self.name(), target),
      None => f.write_str(self.name()),
    }
  }
}

/// Exit status of one external invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStatus {
  /// `None` when the process was terminated by a signal.
  pub code: Option<i32>,
}

impl StepStatus {
  pub const SUCCESS: StepStatus = StepStatus { code: Some(0) };

  pub fn from_code(code: i32) -> Self {
    Self { code: Some(code) }
  }

  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

impl From<std::process::ExitStatus> for StepStatus {
  fn from(status: std::process::ExitStatus) -> Self {
    Self { code: status.code() }
  }
}
