//! Ordered run steps and the failure policy applied while executing them.

use anyhow::Result;
use log::{debug, warn};
use std::path::PathBuf;

use crate::error::XtaskError;
use crate::exec::{CommandSpec, Executor, Exit};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Run { label: String, command: CommandSpec },
    ClearDir(PathBuf),
    CopyFiles { src: PathBuf, dst: PathBuf, pattern: String },
    RemoveFiles { dir: PathBuf, pattern: String },
}

impl Step {
    pub fn run(label: impl Into<String>, command: CommandSpec) -> Self {
        Step::Run {
            label: label.into(),
            command,
        }
    }
}

/// What to do when an external command exits unsuccessfully.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing command.
    #[default]
    FailFast,
    /// Run every step regardless and report failures at the end.
    KeepGoing,
}

impl FailurePolicy {
    pub fn from_keep_going(keep_going: bool) -> Self {
        if keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        }
    }
}

/// How one external command ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Exited(Exit),
    /// The process could not be spawned at all.
    NotStarted(String),
}

/// Result of one external command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub label: String,
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn success(&self) -> bool {
        matches!(self.status, StepStatus::Exited(exit) if exit.success())
    }
}

pub fn run_steps(
    steps: &[Step],
    exec: &mut dyn Executor,
    policy: FailurePolicy,
) -> Result<Vec<StepOutcome>> {
    let mut outcomes = Vec::new();
    for step in steps {
        match step {
            Step::Run { label, command } => {
                println!("  -> {label}");
                debug!("{command}");
                let status = match exec.run(command) {
                    Ok(exit) => StepStatus::Exited(exit),
                    Err(e) if policy == FailurePolicy::KeepGoing => {
                        warn!("{label} could not be started: {e:#}, continuing");
                        StepStatus::NotStarted(format!("{e:#}"))
                    }
                    Err(e) => return Err(e),
                };
                if let StepStatus::Exited(exit) = status {
                    if !exit.success() {
                        if policy == FailurePolicy::FailFast {
                            return Err(XtaskError::StepFailed {
                                label: label.clone(),
                                exit,
                            }
                            .into());
                        }
                        warn!("{label} failed ({exit}), continuing");
                    }
                }
                outcomes.push(StepOutcome {
                    label: label.clone(),
                    status,
                });
            }
            Step::ClearDir(dir) => {
                debug!("clearing {}", dir.display());
                exec.clear_dir(dir)?;
            }
            Step::CopyFiles { src, dst, pattern } => {
                let n = exec.copy_files(src, dst, pattern)?;
                debug!(
                    "staged {n} file(s) matching '{pattern}' from {} into {}",
                    src.display(),
                    dst.display()
                );
            }
            Step::RemoveFiles { dir, pattern } => {
                let n = exec.remove_files(dir, pattern)?;
                debug!("removed {n} file(s) matching '{pattern}' in {}", dir.display());
            }
        }
    }
    Ok(outcomes)
}

/// Turns the collected outcomes of a keep-going run into a final verdict.
pub fn summarize(outcomes: &[StepOutcome]) -> Result<()> {
    let failed: Vec<String> = outcomes
        .iter()
        .filter(|o| !o.success())
        .map(|o| o.label.clone())
        .collect();
    if failed.is_empty() {
        return Ok(());
    }
    for label in &failed {
        eprintln!("[FAIL] {label}");
    }
    Err(XtaskError::StepsFailed { failed }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::RecordingExecutor;

    fn two_builds() -> Vec<Step> {
        vec![
            Step::run("debug", CommandSpec::new("make").arg("config=debug_x86_64")),
            Step::run("release", CommandSpec::new("make").arg("config=release_x86_64")),
        ]
    }

    #[test]
    fn fail_fast_stops_at_first_failure() {
        let mut exec = RecordingExecutor::default().failing_on("debug_x86_64");

        let err = run_steps(&two_builds(), &mut exec, FailurePolicy::FailFast).unwrap_err();

        assert_eq!(exec.commands(), vec!["make config=debug_x86_64"]);
        assert!(matches!(
            err.downcast_ref::<XtaskError>(),
            Some(XtaskError::StepFailed { label, .. }) if label == "debug"
        ));
    }

    #[test]
    fn keep_going_still_runs_release_after_debug_fails() {
        let mut exec = RecordingExecutor::default().failing_on("debug_x86_64");

        let outcomes = run_steps(&two_builds(), &mut exec, FailurePolicy::KeepGoing).unwrap();

        assert_eq!(exec.commands().len(), 2);
        assert!(!outcomes[0].success());
        assert!(outcomes[1].success());

        let err = summarize(&outcomes).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<XtaskError>(),
            Some(XtaskError::StepsFailed { failed }) if failed == &vec!["debug".to_string()]
        ));
    }

    #[test]
    fn summarize_passes_clean_runs() {
        let outcomes = vec![StepOutcome {
            label: "generate".into(),
            status: StepStatus::Exited(Exit::SUCCESS),
        }];
        assert!(summarize(&outcomes).is_ok());
    }

    #[test]
    fn keep_going_survives_a_tool_that_cannot_start() {
        let mut exec = RecordingExecutor::default().unstartable("debug_x86_64");

        let outcomes = run_steps(&two_builds(), &mut exec, FailurePolicy::KeepGoing).unwrap();

        assert_eq!(exec.commands().len(), 2);
        assert!(matches!(outcomes[0].status, StepStatus::NotStarted(_)));
        assert!(outcomes[1].success());
        let err = summarize(&outcomes).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<XtaskError>(),
            Some(XtaskError::StepsFailed { failed }) if failed == &vec!["debug".to_string()]
        ));
    }

    #[test]
    fn fail_fast_propagates_spawn_errors() {
        let mut exec = RecordingExecutor::default().unstartable("debug_x86_64");

        assert!(run_steps(&two_builds(), &mut exec, FailurePolicy::FailFast).is_err());
        assert_eq!(exec.commands().len(), 1);
    }

    #[test]
    fn dry_run_staging_touches_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dst = tmp.path().join("_package");
        let steps = [Step::CopyFiles {
            src: tmp.path().join("_build"),
            dst: dst.clone(),
            pattern: "*.lib".into(),
        }];

        let outcomes =
            run_steps(&steps, &mut crate::exec::DryRunExecutor, FailurePolicy::FailFast).unwrap();

        assert!(outcomes.is_empty());
        assert!(!dst.exists());
    }
}
