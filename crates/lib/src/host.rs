//! Side effects of the pipeline: running command lines and copying files.
//!
//! The pipeline only talks to the outside world through [`Host`], so tests can
//! swap in a recording implementation instead of spawning real tools.

use std::collections::BTreeMap;
use std::future::Future;
use std::io;
use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::step::StepStatus;

/// A command line plus the variables added to the child's environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub line: String,
  pub env: BTreeMap<String, String>,
}

impl Invocation {
  pub fn new(line: impl Into<String>, env: &BTreeMap<String, String>) -> Self {
    Self {
      line: line.into(),
      env: env.clone(),
    }
  }
}

pub trait Host {
  /// Run `invocation` to completion and report its exit status.
  ///
  /// An `Err` means the command could not be started at all.
  fn execute(&self, invocation: &Invocation) -> impl Future<Output = io::Result<StepStatus>>;

  /// Copy `from` to `to`, replacing any existing file.
  fn copy(&self, from: &Path, to: &Path) -> impl Future<Output = io::Result<()>>;
}

/// Runs command lines through the platform shell and copies on the real filesystem.
///
/// The child inherits this process's stdio and environment; the invocation's
/// variables are layered on top and win over inherited values.
#[derive(Debug, Clone, Default)]
pub struct SystemHost {
  shell: Option<String>,
}

impl SystemHost {
  pub fn new(shell: Option<String>) -> Self {
    Self { shell }
  }
}

impl Host for SystemHost {
  async fn execute(&self, invocation: &Invocation) -> io::Result<StepStatus> {
    let (shell_cmd, shell_args) = get_shell(self.shell.as_deref());

    let mut command = Command::new(&shell_cmd);
    command.args(&shell_args);

    // cmd.exe does its own parsing of the line, so it must arrive unescaped.
    #[cfg(windows)]
    command.raw_arg(&invocation.line);
    #[cfg(not(windows))]
    command.arg(&invocation.line);

    command.envs(&invocation.env);

    debug!(shell = %shell_cmd, line = %invocation.line, env = ?invocation.env, "spawning process");

    let status = command.status().await?;
    debug!(code = ?status.code(), "process exited");

    Ok(StepStatus::from(status))
  }

  async fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = tokio::fs::copy(from, to).await?;
    debug!(from = %from.display(), to = %to.display(), bytes, "copied file");
    Ok(())
  }
}

/// Get the shell command and arguments for the current platform.
///
/// Command lines chain activation and the action that depends on it with
/// `&&`, so the default is a shell where that works: `/bin/sh -c` on Unix and
/// `cmd.exe /C` on Windows. An override is run with `/C` when it is `cmd`
/// and `-c` otherwise; PowerShell is not supported.
fn get_shell(override_shell: Option<&str>) -> (String, Vec<String>) {
  if let Some(shell) = override_shell {
    let arg = if shell.contains("cmd") { "/C" } else { "-c" };
    return (shell.to_string(), vec![arg.to_string()]);
  }

  #[cfg(unix)]
  {
    ("/bin/sh".to_string(), vec!["-c".to_string()])
  }

  #[cfg(windows)]
  {
    ("cmd.exe".to_string(), vec!["/C".to_string()])
  }
}
