use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

use crate::configuration::BuildConfiguration;
use crate::logging::LogArgs;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigSelector {
    #[default]
    All,
    Debug,
    Release,
}

impl From<ConfigSelector> for BuildConfiguration {
    fn from(selector: ConfigSelector) -> Self {
        match selector {
            ConfigSelector::All => BuildConfiguration::ALL,
            ConfigSelector::Debug => BuildConfiguration {
                debug: true,
                release: false,
            },
            ConfigSelector::Release => BuildConfiguration {
                debug: false,
                release: true,
            },
        }
    }
}

/// Options shared by `build` and `package`.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Project root holding premake5.lua (defaults to the current directory).
    #[arg(long, value_name = "DIR", env = "GAMEPLAY_ROOT")]
    pub root: Option<PathBuf>,

    /// Print the commands that would run without running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Keep running the remaining steps after a tool fails; the run still
    /// fails at the end.
    #[arg(long)]
    pub keep_going: bool,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Parser, Debug)]
#[command(name = "gameplay-build")]
#[command(about = "Generate gameplay project files and drive the native build tool")]
pub struct BuildCli {
    /// Run the toolchain's clean target and recreate the build output directory.
    #[arg(short, long)]
    pub clean: bool,

    /// Only regenerate project files; do not build.
    #[arg(short, long)]
    pub generate: bool,

    /// Only build; do not regenerate project files.
    #[arg(short, long)]
    pub build: bool,

    /// Configurations to build.
    #[arg(long, value_enum, default_value_t = ConfigSelector::All)]
    pub configuration: ConfigSelector,

    /// Toolchain id passed to premake and the dispatcher (vs2019, gmake, xcode4).
    /// Defaults to the host's native toolchain.
    #[arg(long, value_name = "ID")]
    pub toolchain: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(name = "gameplay-package")]
#[command(about = "Regenerate gameplay project files and build the Windows package")]
pub struct PackageCli {
    /// Only regenerate project files.
    #[arg(short = 'g', long = "generate")]
    pub generate_only: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}
