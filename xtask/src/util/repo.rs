use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::configuration::Configuration;
use crate::toolchain::Toolchain;

pub const TOOLS_DIR: &str = "tools";
pub const COMPILER_DIR: &str = "_compiler";
pub const BUILD_DIR: &str = "_build";
pub const DEPS_DIR: &str = "_deps";
pub const PACKAGE_DIR: &str = "_package";
pub const PROJECT_DESCRIPTOR: &str = "premake5.lua";

/// Fixed folder layout of a gameplay checkout, anchored at its root.
///
/// Nothing here checks that the folders exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `root` when given, otherwise the current working directory.
    pub fn resolve(root: Option<&Path>) -> Result<Self> {
        match root {
            Some(root) => Ok(Self::new(root)),
            None => std::env::current_dir()
                .map(Self::new)
                .context("Reading the current working directory"),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.root.join(TOOLS_DIR)
    }

    pub fn compiler_dir(&self) -> PathBuf {
        self.root.join(COMPILER_DIR)
    }

    /// Where premake writes the project files for `toolchain`.
    pub fn toolchain_dir(&self, toolchain: &Toolchain) -> PathBuf {
        self.compiler_dir().join(toolchain.id())
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    pub fn build_output(&self, configuration: Configuration) -> PathBuf {
        self.build_dir().join(configuration.name())
    }

    pub fn deps_dir(&self) -> PathBuf {
        self.root.join(DEPS_DIR)
    }

    pub fn package_dir(&self) -> PathBuf {
        self.root.join(PACKAGE_DIR)
    }

    pub fn package_output(&self, configuration: Configuration) -> PathBuf {
        self.package_dir().join(configuration.name())
    }

    pub fn descriptor(&self) -> PathBuf {
        self.root.join(PROJECT_DESCRIPTOR)
    }

    /// The premake binary shipped under `tools/premake/`.
    pub fn premake_bin(&self) -> PathBuf {
        self.tools_dir()
            .join("premake")
            .join(format!("premake5{}", std::env::consts::EXE_SUFFIX))
    }
}
