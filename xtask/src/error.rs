use std::path::PathBuf;
use thiserror::Error;

use crate::exec::Exit;

/// Failures the tooling reports with a specific meaning; everything else is
/// an `anyhow` chain with context.
#[derive(Debug, Error)]
pub enum XtaskError {
    #[error("Visual Studio locator not found at {}", .path.display())]
    LocatorNotFound { path: PathBuf },

    #[error("no Visual Studio installation with the x64 C++ toolset was found")]
    NoVisualStudio,

    #[error("premake5 not found at {} or on PATH", .bundled.display())]
    GeneratorNotFound { bundled: PathBuf },

    #[error("no default toolchain for host OS '{0}'; pass --toolchain")]
    UnsupportedHost(String),

    #[error("{label} failed ({exit})")]
    StepFailed { label: String, exit: Exit },

    #[error("{} step(s) failed: {}", .failed.len(), .failed.join(", "))]
    StepsFailed { failed: Vec<String> },
}
