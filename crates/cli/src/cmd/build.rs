//! Implementation of the pipeline run behind `emstage <path_to_emsdk>`.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use emstage_lib::{Outcome, Pipeline, PipelineConfig, SystemHost, Toolchain};

use crate::output::{format_duration, print_error};

/// Execute the build pipeline.
///
/// Installs and activates emsdk under `toolchain_root`, builds sdl2, compiles
/// every configured target and stages its artifacts. Success is silent unless
/// logging is enabled; a failed step prints one line and exits with status 1.
pub fn cmd_build(toolchain_root: &Path) -> Result<()> {
  let config = PipelineConfig::from_env().context("Invalid configuration")?;

  let root = dunce::canonicalize(toolchain_root).unwrap_or_else(|_| toolchain_root.to_path_buf());
  let host = SystemHost::new(config.shell.clone());
  let pipeline = Pipeline::new(Toolchain::new(root), config);

  // Steps run strictly one after another, so a single thread is enough.
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;

  let started = Instant::now();
  match rt.block_on(pipeline.run(&host)) {
    Outcome::Success { staged } => {
      for file in &staged {
        info!(file = %file.display(), "staged");
      }
      info!(elapsed = %format_duration(started.elapsed()), "build complete");
      Ok(())
    }
    Outcome::StepFailed { step, cause } => {
      print_error(&format!("{}: {}", step.describe(), cause));
      std::process::exit(1);
    }
  }
}
