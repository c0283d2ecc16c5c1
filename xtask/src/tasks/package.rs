//! The packager: regenerate project files for the host and, on Windows,
//! build both configurations with MSBuild and stage the libraries.

use anyhow::Result;
use log::info;

use crate::backend::Backend;
use crate::cli::PackageCli;
use crate::configuration::BuildConfiguration;
use crate::exec::{DryRunExecutor, Executor, SystemExecutor};
use crate::premake;
use crate::step::{run_steps, summarize, FailurePolicy, Step, StepOutcome};
use crate::toolchain::{HostOs, Toolchain};
use crate::tooling::{InstalledTooling, Tooling};
use crate::util::repo::Layout;
use crate::util::tools_env::ToolEnv;

const LIB_PATTERN: &str = "*.lib";
/// IntelliSense database Visual Studio drops next to the solution.
const BROWSE_DB_PATTERN: &str = "*.VC.db";

pub struct Packager<'a> {
    pub layout: &'a Layout,
    pub host: HostOs,
    pub generate_only: bool,
    pub policy: FailurePolicy,
}

impl Packager<'_> {
    pub fn execute(
        &self,
        exec: &mut dyn Executor,
        tooling: &dyn Tooling,
    ) -> Result<Vec<StepOutcome>> {
        let toolchain = self.host.default_toolchain()?;
        println!("=== Packaging gameplay ({toolchain}) ===");

        let premake = tooling.premake(self.layout)?;
        let generate = premake::generate_step(&premake, self.layout, &toolchain);
        let mut outcomes = run_steps(&[generate], exec, self.policy)?;

        if self.generate_only {
            return Ok(outcomes);
        }
        if self.host != HostOs::Windows {
            info!(
                "native package builds are only driven on Windows; projects are in {}",
                self.layout.toolchain_dir(&toolchain).display()
            );
            return Ok(outcomes);
        }

        let env = tooling.msvc_env(exec)?;
        let steps = self.windows_steps(&toolchain, &env);
        outcomes.extend(run_steps(&steps, exec, self.policy)?);
        Ok(outcomes)
    }

    fn windows_steps(&self, toolchain: &Toolchain, env: &ToolEnv) -> Vec<Step> {
        let layout = self.layout;
        let project_dir = layout.toolchain_dir(toolchain);
        let configurations = BuildConfiguration::ALL.selected();

        let mut steps = vec![Step::RemoveFiles {
            dir: project_dir.clone(),
            pattern: BROWSE_DB_PATTERN.into(),
        }];
        for &configuration in &configurations {
            steps.push(Step::run(
                format!("{} build ({toolchain})", configuration.name()),
                Backend::MsBuild.build_command(&project_dir, configuration, env),
            ));
        }
        for &configuration in &configurations {
            steps.push(Step::CopyFiles {
                src: layout.build_output(configuration),
                dst: layout.package_output(configuration),
                pattern: LIB_PATTERN.into(),
            });
        }
        steps.push(Step::CopyFiles {
            src: layout.deps_dir().join("lib"),
            dst: layout.package_dir().join("deps"),
            pattern: LIB_PATTERN.into(),
        });
        steps
    }
}

pub fn run(cli: PackageCli) -> Result<()> {
    let layout = Layout::resolve(cli.common.root.as_deref())?;
    let packager = Packager {
        layout: &layout,
        host: HostOs::current(),
        generate_only: cli.generate_only,
        policy: FailurePolicy::from_keep_going(cli.common.keep_going),
    };
    let tooling = InstalledTooling {
        dry_run: cli.common.dry_run,
    };

    let outcomes = if cli.common.dry_run {
        packager.execute(&mut DryRunExecutor, &tooling)?
    } else {
        packager.execute(&mut SystemExecutor, &tooling)?
    };

    summarize(&outcomes)?;
    println!("=== Package complete: {} ===", layout.package_dir().display());
    Ok(())
}
