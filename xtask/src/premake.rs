//! premake project generation.

use std::path::{Path, PathBuf};

use crate::error::XtaskError;
use crate::exec::CommandSpec;
use crate::step::Step;
use crate::toolchain::Toolchain;
use crate::util::repo::Layout;

pub const PREMAKE: &str = "premake5";

/// Prefers the premake shipped in `tools/premake`, then whatever is on `PATH`.
pub fn locate(layout: &Layout) -> Result<PathBuf, XtaskError> {
    let bundled = layout.premake_bin();
    if bundled.is_file() {
        return Ok(bundled);
    }
    which::which(PREMAKE).map_err(|_| XtaskError::GeneratorNotFound { bundled })
}

/// `premake5 --file=<root>/premake5.lua <toolchain>`, run from the root.
pub fn command(premake: &Path, layout: &Layout, toolchain: &Toolchain) -> CommandSpec {
    CommandSpec::new(premake)
        .arg(format!("--file={}", layout.descriptor().display()))
        .arg(toolchain.id())
        .current_dir(layout.root())
}

pub fn generate_step(premake: &Path, layout: &Layout, toolchain: &Toolchain) -> Step {
    Step::run(
        format!("generate {toolchain} projects"),
        command(premake, layout, toolchain),
    )
}
