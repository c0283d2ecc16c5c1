//! The build driver: optional project generation followed by an optional
//! clean or Debug/Release build with the toolchain's native tool.

use anyhow::Result;
use log::{error, warn};

use crate::cli::BuildCli;
use crate::configuration::BuildConfiguration;
use crate::dispatch::{dispatch, BuildRequest, Dispatch};
use crate::exec::{DryRunExecutor, Executor, SystemExecutor};
use crate::premake;
use crate::step::{run_steps, summarize, FailurePolicy, StepOutcome};
use crate::toolchain::{resolve_toolchain, HostOs, Toolchain};
use crate::tooling::{InstalledTooling, Tooling};
use crate::util::repo::Layout;

/// The `--clean`, `--generate` and `--build` flags. They are independent, so
/// some combinations select nothing at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modes {
    pub clean: bool,
    pub generate_only: bool,
    pub build_only: bool,
}

impl Modes {
    pub fn generates(self) -> bool {
        !self.build_only && !self.clean
    }

    pub fn dispatches(self) -> bool {
        !self.generate_only
    }
}

pub struct BuildDriver<'a> {
    pub layout: &'a Layout,
    pub toolchain: Toolchain,
    pub modes: Modes,
    pub configuration: BuildConfiguration,
    pub policy: FailurePolicy,
}

impl<'a> BuildDriver<'a> {
    /// Maps the parsed flags onto a driver for `host`.
    pub fn from_cli(cli: &BuildCli, layout: &'a Layout, host: HostOs) -> Result<Self> {
        Ok(Self {
            layout,
            toolchain: resolve_toolchain(host, cli.toolchain.as_deref())?,
            modes: Modes {
                clean: cli.clean,
                generate_only: cli.generate,
                build_only: cli.build,
            },
            configuration: cli.configuration.into(),
            policy: FailurePolicy::from_keep_going(cli.common.keep_going),
        })
    }

    pub fn execute(
        &self,
        exec: &mut dyn Executor,
        tooling: &dyn Tooling,
    ) -> Result<Vec<StepOutcome>> {
        let mut outcomes = Vec::new();

        // Reported before anything is spawned; not an error.
        if !self.toolchain.is_supported() {
            error!("toolchain not supported: {}", self.toolchain);
            return Ok(outcomes);
        }

        if !self.modes.generates() && !self.modes.dispatches() {
            warn!("nothing to do for this combination of --clean/--generate/--build");
            return Ok(outcomes);
        }

        if self.modes.generates() {
            println!("=== Generating {} projects ===", self.toolchain);
            let premake = tooling.premake(self.layout)?;
            let step = premake::generate_step(&premake, self.layout, &self.toolchain);
            outcomes.extend(run_steps(&[step], exec, self.policy)?);
        }

        if self.modes.dispatches() {
            let verb = if self.modes.clean { "Cleaning" } else { "Building" };
            println!("=== {verb} gameplay ({}) ===", self.toolchain);
            let request = BuildRequest {
                clean: self.modes.clean,
                configuration: self.configuration,
            };
            let ran = dispatch(
                &self.toolchain,
                &request,
                self.layout,
                exec,
                tooling,
                self.policy,
            )?;
            if let Dispatch::Ran(ran) = ran {
                outcomes.extend(ran);
            }
        }

        Ok(outcomes)
    }
}

pub fn run(cli: BuildCli) -> Result<()> {
    let layout = Layout::resolve(cli.common.root.as_deref())?;
    let driver = BuildDriver::from_cli(&cli, &layout, HostOs::current())?;
    let tooling = InstalledTooling {
        dry_run: cli.common.dry_run,
    };

    let outcomes = if cli.common.dry_run {
        driver.execute(&mut DryRunExecutor, &tooling)?
    } else {
        driver.execute(&mut SystemExecutor, &tooling)?
    };

    summarize(&outcomes)?;
    println!("=== Done ===");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::{Event, RecordingExecutor};
    use clap::Parser;
    use crate::tooling::testing::FakeTooling;
    use tempfile::TempDir;

    fn driver(layout: &Layout, toolchain: Toolchain, modes: Modes) -> BuildDriver<'_> {
        BuildDriver {
            layout,
            toolchain,
            modes,
            configuration: BuildConfiguration::ALL,
            policy: FailurePolicy::FailFast,
        }
    }

    #[test]
    fn default_run_generates_then_builds_both_configurations() {
        let layout = Layout::new("/g");
        let mut exec = RecordingExecutor::default();

        let outcomes = driver(&layout, Toolchain::Gmake, Modes::default())
            .execute(&mut exec, &FakeTooling::default())
            .unwrap();

        let commands = exec.commands();
        assert_eq!(commands.len(), 3);
        assert!(commands[0].ends_with("--file=/g/premake5.lua gmake"));
        assert_eq!(commands[1], "make config=debug_x86_64");
        assert_eq!(commands[2], "make config=release_x86_64");
        assert_eq!(outcomes.len(), 3);
    }

    #[test]
    fn generate_only_skips_dispatch() {
        let layout = Layout::new("/g");
        let mut exec = RecordingExecutor::default();
        let modes = Modes {
            generate_only: true,
            ..Modes::default()
        };

        driver(&layout, Toolchain::Xcode4, modes)
            .execute(&mut exec, &FakeTooling::default())
            .unwrap();

        let runs = exec.runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].program, layout.premake_bin());
        assert_eq!(runs[0].args.last().map(String::as_str), Some("xcode4"));
    }

    #[test]
    fn build_only_skips_generation() {
        let layout = Layout::new("/g");
        let mut exec = RecordingExecutor::default();
        let modes = Modes {
            build_only: true,
            ..Modes::default()
        };

        driver(&layout, Toolchain::Gmake, modes)
            .execute(&mut exec, &FakeTooling::default())
            .unwrap();

        assert_eq!(
            exec.commands(),
            vec!["make config=debug_x86_64", "make config=release_x86_64"]
        );
    }

    #[test]
    fn clean_runs_only_the_clean_command() {
        let tmp = TempDir::new().unwrap();
        let layout = Layout::new(tmp.path());
        let mut exec = RecordingExecutor::default();
        let modes = Modes {
            clean: true,
            ..Modes::default()
        };

        driver(&layout, Toolchain::Gmake, modes)
            .execute(&mut exec, &FakeTooling::default())
            .unwrap();

        assert_eq!(exec.commands(), vec!["make clean"]);
        assert_eq!(exec.events.len(), 2);
        assert_eq!(exec.events[1], Event::ClearDir(layout.build_dir()));
        assert!(layout.build_dir().is_dir());
    }

    #[test]
    fn clean_with_generate_selects_nothing() {
        let layout = Layout::new("/g");
        let mut exec = RecordingExecutor::default();
        let modes = Modes {
            clean: true,
            generate_only: true,
            build_only: false,
        };

        let outcomes = driver(&layout, Toolchain::Gmake, modes)
            .execute(&mut exec, &FakeTooling::default())
            .unwrap();

        assert!(outcomes.is_empty());
        assert!(exec.events.is_empty());
    }

    #[test]
    fn unknown_toolchain_spawns_no_subprocess() {
        let layout = Layout::new("/g");
        let mut exec = RecordingExecutor::default();

        let outcomes = driver(
            &layout,
            Toolchain::Unsupported("unknown_id".into()),
            Modes::default(),
        )
        .execute(&mut exec, &FakeTooling::default())
        .unwrap();

        assert!(outcomes.is_empty());
        assert!(exec.events.is_empty());
    }

    #[test]
    fn failed_generation_stops_fail_fast_run() {
        let layout = Layout::new("/g");
        let mut exec = RecordingExecutor::default().failing_on("premake5");

        let result = driver(&layout, Toolchain::Gmake, Modes::default())
            .execute(&mut exec, &FakeTooling::default());

        assert!(result.is_err());
        assert_eq!(exec.commands().len(), 1);
    }

    #[test]
    fn keep_going_builds_release_after_debug_failure() {
        let layout = Layout::new("/g");
        let mut exec = RecordingExecutor::default().failing_on("debug_x86_64");
        let mut driver = driver(
            &layout,
            Toolchain::Gmake,
            Modes {
                build_only: true,
                ..Modes::default()
            },
        );
        driver.policy = FailurePolicy::KeepGoing;

        let outcomes = driver.execute(&mut exec, &FakeTooling::default()).unwrap();

        assert_eq!(exec.commands().len(), 2);
        assert!(summarize(&outcomes).is_err());
    }

    #[test]
    fn cli_flags_map_onto_the_driver() {
        let layout = Layout::new("/g");
        let cli = BuildCli::try_parse_from([
            "gameplay-build",
            "-b",
            "--configuration",
            "release",
            "--keep-going",
        ])
        .unwrap();

        let driver = BuildDriver::from_cli(&cli, &layout, HostOs::Linux).unwrap();

        assert_eq!(driver.toolchain, Toolchain::Gmake);
        assert_eq!(
            driver.modes,
            Modes {
                clean: false,
                generate_only: false,
                build_only: true,
            }
        );
        assert!(!driver.configuration.debug && driver.configuration.release);
        assert_eq!(driver.policy, FailurePolicy::KeepGoing);
    }

    #[test]
    fn generate_flag_and_toolchain_override_from_cli() {
        let layout = Layout::new("/g");
        let cli =
            BuildCli::try_parse_from(["gameplay-build", "-g", "--toolchain", "xcode4"]).unwrap();

        let driver = BuildDriver::from_cli(&cli, &layout, HostOs::Windows).unwrap();

        assert_eq!(driver.toolchain, Toolchain::Xcode4);
        assert!(driver.modes.generate_only && !driver.modes.build_only && !driver.modes.clean);
        assert_eq!(driver.configuration, BuildConfiguration::ALL);
        assert_eq!(driver.policy, FailurePolicy::FailFast);
    }

    #[test]
    fn release_only_builds_release() {
        let layout = Layout::new("/g");
        let cli =
            BuildCli::try_parse_from(["gameplay-build", "-b", "--configuration", "release"])
                .unwrap();
        let mut exec = RecordingExecutor::default();

        BuildDriver::from_cli(&cli, &layout, HostOs::Linux)
            .unwrap()
            .execute(&mut exec, &FakeTooling::default())
            .unwrap();

        assert_eq!(exec.commands(), vec!["make config=release_x86_64"]);
    }
}
