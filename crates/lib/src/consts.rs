//! Fixed names and values shared by the pipeline.

pub const APP_NAME: &str = "emstage";

/// Version selector passed to `emsdk install` and `emsdk activate`.
pub const SDK_VERSION: &str = "latest";

/// Native library built through `embuilder` before compiling.
pub const DEPENDENCY_LIBRARY: &str = "sdl2";

pub const WEB_TARGET_TRIPLE: &str = "wasm32-unknown-emscripten";
pub const BUILD_PROFILE: &str = "release";

/// Compiler flags handed to every invocation after the environment is configured.
pub const EMCC_CFLAGS_VAR: &str = "EMCC_CFLAGS";
pub const EMCC_CFLAGS_VALUE: &str = "-s USE_SDL=2";

pub const DEFAULT_TARGET: &str = "basic-sample";
pub const DEFAULT_STAGING_DIR: &str = "pages";
pub const DEFAULT_TARGET_DIR: &str = "target";

pub const TARGETS_ENV: &str = "EMSTAGE_TARGETS";
pub const STAGING_DIR_ENV: &str = "EMSTAGE_STAGING_DIR";
pub const TARGET_DIR_ENV: &str = "EMSTAGE_TARGET_DIR";
pub const SHELL_ENV: &str = "EMSTAGE_SHELL";
