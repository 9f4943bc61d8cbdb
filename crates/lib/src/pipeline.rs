//! The build pipeline runner.
//!
//! A run is a fixed sequence of [`Step`]s executed one after another:
//!
//! ```text
//! InstallToolchain -> BuildDependency -> ConfigureEnvironment
//!   -> Compile(t1) -> StageArtifacts(t1) -> Compile(t2) -> ...
//! ```
//!
//! The first failing step ends the run; nothing after it is attempted, and
//! nothing staged by earlier targets is removed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::consts::{DEPENDENCY_LIBRARY, EMCC_CFLAGS_VALUE, EMCC_CFLAGS_VAR};
use crate::error::StepError;
use crate::host::{Host, Invocation};
use crate::step::Step;
use crate::target::BuildTarget;
use crate::toolchain::Toolchain;

/// Result of a pipeline run.
#[derive(Debug)]
pub enum Outcome {
  /// Every step succeeded. `staged` lists the files written to the staging directory.
  Success { staged: Vec<PathBuf> },
  /// `step` failed with `cause`; later steps did not run.
  StepFailed { step: Step, cause: StepError },
}

impl Outcome {
  pub fn is_success(&self) -> bool {
    matches!(self, Outcome::Success { .. })
  }
}

pub struct Pipeline {
  toolchain: Toolchain,
  config: PipelineConfig,
}

impl Pipeline {
  pub fn new(toolchain: Toolchain, config: PipelineConfig) -> Self {
    Self { toolchain, config }
  }

  /// The steps of a run, in execution order.
  pub fn steps(&self) -> Vec<Step> {
    let mut steps = vec![Step::InstallToolchain, Step::BuildDependency, Step::ConfigureEnvironment];
    for target in &self.config.targets {
      steps.push(Step::Compile(target.clone()));
      steps.push(Step::StageArtifacts(target.clone()));
    }
    steps
  }

  /// Execute every step in order, stopping at the first failure.
  pub async fn run<H: Host>(&self, host: &H) -> Outcome {
    info!(
      toolchain = %self.toolchain.root().display(),
      targets = self.config.targets.len(),
      "starting pipeline"
    );

    // Variables handed to every invocation after ConfigureEnvironment.
    let mut env = BTreeMap::new();
    let mut staged = Vec::new();

    for step in self.steps() {
      info!(step = %step, "running step");

      let result = match &step {
        Step::InstallToolchain => self.invoke(host, self.toolchain.install_command(), &env).await,
        Step::BuildDependency => {
          let line = self.toolchain.build_dependency_command(DEPENDENCY_LIBRARY);
          self.invoke(host, line, &env).await
        }
        Step::ConfigureEnvironment => {
          env.insert(EMCC_CFLAGS_VAR.to_string(), EMCC_CFLAGS_VALUE.to_string());
          Ok(())
        }
        Step::Compile(target) => {
          let line = self.toolchain.compile_command(target, &self.config.target_dir);
          self.invoke(host, line, &env).await
        }
        Step::StageArtifacts(target) => self.stage(host, target, &mut staged).await,
      };

      if let Err(cause) = result {
        // Reporting the failure to the user is the caller's job.
        warn!(step = %step, error = %cause, "step failed");
        return Outcome::StepFailed { step, cause };
      }
    }

    info!(staged = staged.len(), "pipeline complete");
    Outcome::Success { staged }
  }

  async fn invoke<H: Host>(&self, host: &H, line: String, env: &BTreeMap<String, String>) -> Result<(), StepError> {
    let invocation = Invocation::new(line, env);
    let status = host.execute(&invocation).await.map_err(StepError::Spawn)?;
    if status.success() {
      Ok(())
    } else {
      Err(StepError::Exited { code: status.code })
    }
  }

  /// Copy the module binary, then the loader script.
  ///
  /// A failure on the loader leaves the already copied module in place.
  async fn stage<H: Host>(&self, host: &H, target: &BuildTarget, staged: &mut Vec<PathBuf>) -> Result<(), StepError> {
    let output_dir = self.config.output_dir();

    for file_name in target.artifact_file_names() {
      let from = output_dir.join(&file_name);
      let to = self.config.staging_dir.join(&file_name);

      host.copy(&from, &to).await.map_err(|source| StepError::Copy {
        from: from.clone(),
        to: to.clone(),
        source,
      })?;

      debug!(file = %to.display(), "staged artifact");
      staged.push(to);
    }
    Ok(())
  }
}

/// Run the pipeline for `targets` with the default project layout.
pub async fn run<H: Host>(toolchain_root: &Path, targets: &[BuildTarget], host: &H) -> Outcome {
  let config = PipelineConfig {
    targets: targets.to_vec(),
    ..PipelineConfig::default()
  };
  Pipeline::new(Toolchain::new(toolchain_root), config).run(host).await
}
