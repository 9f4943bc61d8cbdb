//! emstage-lib: the web build pipeline
//!
//! Prepares an emsdk toolchain, cross-compiles binary crates to
//! `wasm32-unknown-emscripten` and stages each `.wasm`/`.js` pair into a
//! web-servable directory:
//! - `Toolchain`: the emsdk checkout and the command lines run against it
//! - `BuildTarget`: a crate to compile and the names of its artifacts
//! - `Step`: one pass/fail unit of the pipeline
//! - `Pipeline`: runs the steps in order, stopping at the first failure
//! - `Host`: the seam for spawning processes and copying files

pub mod config;
pub mod consts;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod step;
pub mod target;
pub mod toolchain;
pub mod util;

pub use config::PipelineConfig;
pub use error::{ConfigError, StepError};
pub use host::{Host, Invocation, SystemHost};
pub use pipeline::{Outcome, Pipeline, run};
pub use step::{Step, StepStatus};
pub use target::BuildTarget;
pub use toolchain::Toolchain;
