//! # gameplay build tooling
//!
//! Regenerates the engine's project files with premake and drives the
//! platform's native build tool over them.
//!
//! ## Usage
//!
//! ```bash
//! gameplay-build                 # premake + Debug and Release builds
//! gameplay-build --generate      # project files only
//! gameplay-build --build --configuration debug
//! gameplay-build --clean         # clean target + empty _build/
//! gameplay-build --toolchain xcode4 --dry-run
//! gameplay-package               # premake, then (Windows) build + stage _package/
//! gameplay-package -g            # project files only
//! ```
//!
//! ## Toolchains
//!
//! - `vs2019` (Windows default): MSBuild inside a `vcvars64.bat` environment
//! - `gmake` (Linux default): GNU make
//! - `xcode4` (macOS default): xcodebuild

pub mod app;
pub mod backend;
pub mod cli;
pub mod configuration;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod logging;
pub mod msvc;
pub mod premake;
pub mod step;
pub mod tasks;
pub mod toolchain;
pub mod tooling;
pub mod util;
