//! Full pipeline runs through the emstage binary.

use predicates::prelude::*;

use super::common::{FAIL_VAR, TestEnv};

fn compile_call(name: &str) -> String {
  format!(
    "cargo build --bin {name} --target wasm32-unknown-emscripten --manifest-path {name}/Cargo.toml --target-dir target --release"
  )
}

#[test]
fn successful_build_is_silent_and_stages_pair() {
  let env = TestEnv::new();

  env
    .emstage_cmd()
    .assert()
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::is_empty());

  assert_eq!(env.staged_files(), ["basic-sample.js", "basic_sample.wasm"]);
  assert_eq!(
    std::fs::read_to_string(env.pages_dir().join("basic_sample.wasm")).unwrap(),
    "wasm for basic-sample\n"
  );
}

#[test]
fn tools_run_in_pipeline_order() {
  let env = TestEnv::new();

  env.emstage_cmd().assert().success();

  assert_eq!(
    env.calls(),
    [
      "emsdk install latest".to_string(),
      "emsdk activate latest".to_string(),
      "embuilder build sdl2".to_string(),
      "emsdk activate latest".to_string(),
      compile_call("basic-sample"),
      "EMCC_CFLAGS=-s USE_SDL=2".to_string(),
    ]
  );
}

#[test]
fn compile_gets_cflags_regardless_of_caller_value() {
  let env = TestEnv::new();

  env.emstage_cmd().env("EMCC_CFLAGS", "-O0 -g").assert().success();

  assert!(env.calls().contains(&"EMCC_CFLAGS=-s USE_SDL=2".to_string()));
}

#[test]
fn install_failure_stops_pipeline() {
  let env = TestEnv::new();

  env
    .emstage_cmd()
    .env(FAIL_VAR, "install")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Failed to install latest version of emsdk"));

  assert_eq!(env.calls(), ["emsdk install latest"]);
  assert!(!env.pages_dir().exists());
}

#[test]
fn step_failure_prints_single_line() {
  let env = TestEnv::new();

  let assert = env.emstage_cmd().env(FAIL_VAR, "install").assert().code(1);
  let output = assert.get_output();

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert_eq!(stderr.lines().count(), 1, "stderr was: {stderr}");
  assert!(stderr.contains("Failed to install latest version of emsdk"));
}

#[test]
fn activation_failure_skips_dependency_build() {
  let env = TestEnv::new();

  env
    .emstage_cmd()
    .env(FAIL_VAR, "activate")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Failed to build sdl2"));

  assert_eq!(env.calls(), ["emsdk install latest", "emsdk activate latest"]);
}

#[test]
fn dependency_failure_skips_compile() {
  let env = TestEnv::new();

  env
    .emstage_cmd()
    .env(FAIL_VAR, "embuilder")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Failed to build sdl2"));

  let calls = env.calls();
  assert_eq!(calls.last().map(String::as_str), Some("embuilder build sdl2"));
  assert!(!calls.iter().any(|call| call.starts_with("cargo")));
  assert!(!env.pages_dir().exists());
}

#[test]
fn compile_failure_skips_staging() {
  let env = TestEnv::new();

  env
    .emstage_cmd()
    .env(FAIL_VAR, "cargo")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Failed to build basic-sample for WASM"));

  assert!(!env.pages_dir().exists());
}

#[test]
fn missing_artifact_fails_staging_without_rollback() {
  let env = TestEnv::new();

  env
    .emstage_cmd()
    .env(FAIL_VAR, "missing-loader")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Failed to stage basic-sample artifacts"));

  assert_eq!(env.staged_files(), ["basic_sample.wasm"]);
}

#[test]
fn repeated_builds_leave_only_current_pair() {
  let env = TestEnv::new();

  env.emstage_cmd().assert().success();
  env.emstage_cmd().assert().success();

  assert_eq!(env.staged_files(), ["basic-sample.js", "basic_sample.wasm"]);
}

#[test]
fn configured_targets_are_built_in_order() {
  let env = TestEnv::new();

  env
    .emstage_cmd()
    .env("EMSTAGE_TARGETS", "basic-sample,maze")
    .env("EMSTAGE_STAGING_DIR", "public")
    .assert()
    .success();

  let compiles: Vec<String> = env
    .calls()
    .into_iter()
    .filter(|call| call.starts_with("cargo"))
    .collect();
  assert_eq!(compiles, [compile_call("basic-sample"), compile_call("maze")]);

  let public = env.project_dir().join("public");
  assert!(public.join("basic_sample.wasm").exists());
  assert!(public.join("basic-sample.js").exists());
  assert!(public.join("maze.wasm").exists());
  assert!(public.join("maze.js").exists());
  assert!(!env.pages_dir().exists());
}

#[test]
fn info_logging_reports_staged_files() {
  let env = TestEnv::new();

  env
    .emstage_cmd()
    .env("RUST_LOG", "info")
    .assert()
    .success()
    .stderr(predicate::str::contains("build complete"))
    .stderr(predicate::str::contains("basic_sample.wasm"));
}

#[test]
fn configured_target_dir_is_used_by_compile_and_staging() {
  let env = TestEnv::new();

  env
    .emstage_cmd()
    .env("EMSTAGE_TARGET_DIR", "custom")
    .assert()
    .success();

  let compile = env.calls().into_iter().find(|call| call.starts_with("cargo")).unwrap();
  assert!(compile.contains("--target-dir custom "), "compile was: {compile}");
  assert!(
    env
      .project_dir()
      .join("custom/wasm32-unknown-emscripten/release/basic_sample.wasm")
      .exists()
  );
  assert!(!env.project_dir().join("target").exists());
  assert_eq!(env.staged_files(), ["basic-sample.js", "basic_sample.wasm"]);
}
