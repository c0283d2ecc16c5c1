use anyhow::Result;
use log::warn;
use std::path::PathBuf;

use crate::exec::Executor;
use crate::util::repo::Layout;
use crate::util::tools_env::ToolEnv;
use crate::{msvc, premake};

/// Where the external generator and the MSVC environment come from.
pub trait Tooling {
    fn premake(&self, layout: &Layout) -> Result<PathBuf>;
    fn msvc_env(&self, exec: &mut dyn Executor) -> Result<ToolEnv>;
}

/// Tools installed on this machine.
pub struct InstalledTooling {
    pub dry_run: bool,
}

impl Tooling for InstalledTooling {
    fn premake(&self, layout: &Layout) -> Result<PathBuf> {
        match premake::locate(layout) {
            Ok(path) => Ok(path),
            Err(err) if self.dry_run => {
                warn!("{err}");
                Ok(layout.premake_bin())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn msvc_env(&self, exec: &mut dyn Executor) -> Result<ToolEnv> {
        if self.dry_run {
            println!("[dry-run] bootstrap Visual Studio environment");
            return Ok(ToolEnv::default());
        }
        msvc::bootstrap_env(exec)
    }
}
