//! Visual Studio developer environment bootstrap (Windows hosts).
//!
//! `vswhere` locates the newest install with the x64 C++ toolset, then
//! `vcvars64.bat` is run under `cmd` and the `set` dump that follows it is
//! parsed into a [`ToolEnv`]. The process environment is never modified.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::XtaskError;
use crate::exec::{CommandSpec, Executor};
use crate::util::tools_env::ToolEnv;

const PROGRAM_FILES_X86: &str = "ProgramFiles(x86)";
const VC_TOOLS_COMPONENT: &str = "Microsoft.VisualStudio.Component.VC.Tools.x86.x64";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub installation_path: PathBuf,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// `%ProgramFiles(x86)%\Microsoft Visual Studio\Installer\vswhere.exe`, if present.
pub fn locator_path(program_files_x86: Option<OsString>) -> Result<PathBuf, XtaskError> {
    let Some(base) = program_files_x86 else {
        return Err(XtaskError::LocatorNotFound {
            path: PathBuf::from(format!(
                "%{PROGRAM_FILES_X86}%\\Microsoft Visual Studio\\Installer\\vswhere.exe"
            )),
        });
    };
    let path = PathBuf::from(base)
        .join("Microsoft Visual Studio")
        .join("Installer")
        .join("vswhere.exe");
    if !path.is_file() {
        return Err(XtaskError::LocatorNotFound { path });
    }
    Ok(path)
}

pub fn vcvars_script(installation: &Path) -> PathBuf {
    installation
        .join("VC")
        .join("Auxiliary")
        .join("Build")
        .join("vcvars64.bat")
}

pub fn parse_instances(json: &str) -> Result<Vec<Instance>> {
    serde_json::from_str(json).context("Parsing vswhere output")
}

/// Parses `NAME=VALUE` lines, splitting on the first `=`.
///
/// Lines without `=` are skipped, as are empty names (they cannot be passed
/// to a child process). A later duplicate overwrites an earlier one.
pub fn parse_env_output(text: &str) -> ToolEnv {
    ToolEnv::from_pairs(text.lines().filter_map(|line| {
        let line = line.trim_end_matches('\r');
        let (name, value) = line.split_once('=')?;
        (!name.is_empty()).then_some((name, value))
    }))
}

pub fn bootstrap_env(exec: &mut dyn Executor) -> Result<ToolEnv> {
    let locator = locator_path(std::env::var_os(PROGRAM_FILES_X86))?;
    bootstrap_with(&locator, exec)
}

pub fn bootstrap_with(locator: &Path, exec: &mut dyn Executor) -> Result<ToolEnv> {
    let query = CommandSpec::new(locator).args([
        "-latest",
        "-products",
        "*",
        "-requires",
        VC_TOOLS_COMPONENT,
        "-format",
        "json",
    ]);
    debug!("{query}");
    let out = exec.capture(&query)?;
    if !out.exit.success() {
        return Err(XtaskError::StepFailed {
            label: "vswhere".into(),
            exit: out.exit,
        }
        .into());
    }

    let instance = parse_instances(&out.stdout)?
        .into_iter()
        .next()
        .ok_or(XtaskError::NoVisualStudio)?;
    info!(
        "Using {} at {}",
        instance.display_name.as_deref().unwrap_or("Visual Studio"),
        instance.installation_path.display()
    );

    let script = vcvars_script(&instance.installation_path);
    let setup = CommandSpec::new("cmd").args([
        "/c".to_string(),
        "call".to_string(),
        script.to_string_lossy().into_owned(),
        ">nul".to_string(),
        "&&".to_string(),
        "set".to_string(),
    ]);
    debug!("{setup}");
    let out = exec.capture(&setup)?;
    if !out.exit.success() {
        return Err(XtaskError::StepFailed {
            label: "vcvars64.bat".into(),
            exit: out.exit,
        }
        .into());
    }

    let env = parse_env_output(&out.stdout);
    debug!("captured {} environment variables", env.len());
    Ok(env)
}
