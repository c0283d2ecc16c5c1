//! Toolchain dispatch: picks the backend for a toolchain and runs its clean
//! or build commands inside the toolchain's compiler directory.

use anyhow::Result;
use log::error;

use crate::backend::Backend;
use crate::configuration::BuildConfiguration;
use crate::exec::Executor;
use crate::step::{run_steps, FailurePolicy, Step, StepOutcome};
use crate::toolchain::Toolchain;
use crate::tooling::Tooling;
use crate::util::repo::Layout;
use crate::util::tools_env::ToolEnv;

/// What the dispatcher is asked to do once project files exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildRequest {
    pub clean: bool,
    pub configuration: BuildConfiguration,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
    Ran(Vec<StepOutcome>),
    /// Reported and skipped; nothing was spawned or touched.
    Unsupported,
}

/// Clean runs the clean target and recreates `_build`; otherwise Debug and/or
/// Release are built in that order.
pub fn plan(
    backend: Backend,
    layout: &Layout,
    toolchain: &Toolchain,
    request: &BuildRequest,
    env: &ToolEnv,
) -> Vec<Step> {
    let project_dir = layout.toolchain_dir(toolchain);

    if request.clean {
        return vec![
            Step::run(
                format!("clean ({toolchain})"),
                backend.clean_command(&project_dir, env),
            ),
            Step::ClearDir(layout.build_dir()),
        ];
    }

    request
        .configuration
        .selected()
        .into_iter()
        .map(|configuration| {
            Step::run(
                format!("{} build ({toolchain})", configuration.name()),
                backend.build_command(&project_dir, configuration, env),
            )
        })
        .collect()
}

pub fn dispatch(
    toolchain: &Toolchain,
    request: &BuildRequest,
    layout: &Layout,
    exec: &mut dyn Executor,
    tooling: &dyn Tooling,
    policy: FailurePolicy,
) -> Result<Dispatch> {
    let Some(backend) = Backend::for_toolchain(toolchain) else {
        error!("toolchain not supported: {toolchain}");
        return Ok(Dispatch::Unsupported);
    };

    let env = if backend.needs_msvc_env() {
        tooling.msvc_env(exec)?
    } else {
        ToolEnv::default()
    };

    let steps = plan(backend, layout, toolchain, request, &env);
    Ok(Dispatch::Ran(run_steps(&steps, exec, policy)?))
}
