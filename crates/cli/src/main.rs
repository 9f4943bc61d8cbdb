mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmd::cmd_build;

const USAGE: &str = "Usage: emstage <path_to_emsdk>";

/// emstage - build crates for the web with emsdk and stage the artifacts
#[derive(Parser)]
#[command(name = "emstage", disable_help_flag = true)]
struct Cli {
  /// Path to the emsdk checkout
  #[arg(allow_hyphen_values = true)]
  toolchain_root: PathBuf,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  // Exactly one argument; anything else is a usage error before any tool runs.
  let Ok(cli) = Cli::try_parse() else {
    println!("{}", USAGE);
    std::process::exit(1);
  };

  cmd_build(&cli.toolchain_root)
}
