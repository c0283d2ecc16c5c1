//! Subprocess execution.
//!
//! Every external tool is described by a [`CommandSpec`] and handed to an
//! [`Executor`]. Filesystem actions that belong to a run (clearing output,
//! staging files) go through the executor too, so a dry run touches nothing.

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::util::fs;
use crate::util::tools_env::ToolEnv;

/// One external command: program, arguments, working directory and the
/// environment layered over the inherited one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: ToolEnv,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: ToolEnv::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, env: &ToolEnv) -> Self {
        self.env = env.clone();
        self
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        self.env.apply_to_command(&mut cmd);
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(s: &str) -> String {
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}

/// How a child process ended. `code` is `None` when it was killed by a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exit {
    pub code: Option<i32>,
}

impl Exit {
    pub const SUCCESS: Exit = Exit { code: Some(0) };

    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for Exit {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Output of a command run for its stdout.
#[derive(Clone, Debug)]
pub struct Captured {
    pub exit: Exit,
    pub stdout: String,
}

pub trait Executor {
    /// Runs `cmd` to completion with inherited stdio.
    fn run(&mut self, cmd: &CommandSpec) -> Result<Exit>;

    /// Runs `cmd` to completion and collects its stdout.
    fn capture(&mut self, cmd: &CommandSpec) -> Result<Captured>;

    fn clear_dir(&mut self, path: &Path) -> Result<()> {
        fs::clear_dir(path)
    }

    fn copy_files(&mut self, src: &Path, dst: &Path, pattern: &str) -> Result<usize> {
        fs::copy_files(src, dst, pattern)
    }

    fn remove_files(&mut self, dir: &Path, pattern: &str) -> Result<usize> {
        fs::remove_files(dir, pattern)
    }
}

/// Spawns real processes and blocks on each one. No timeout.
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&mut self, cmd: &CommandSpec) -> Result<Exit> {
        let status = cmd
            .to_command()
            .status()
            .with_context(|| format!("Spawning {}", cmd.program.display()))?;
        Ok(status.into())
    }

    fn capture(&mut self, cmd: &CommandSpec) -> Result<Captured> {
        let out = cmd
            .to_command()
            .output()
            .with_context(|| format!("Running {}", cmd.program.display()))?;
        Ok(Captured {
            exit: out.status.into(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
        })
    }
}

/// Prints what would run and reports success without touching anything.
pub struct DryRunExecutor;

impl Executor for DryRunExecutor {
    fn run(&mut self, cmd: &CommandSpec) -> Result<Exit> {
        match &cmd.cwd {
            Some(dir) => println!("[dry-run] (in {}) {cmd}", dir.display()),
            None => println!("[dry-run] {cmd}"),
        }
        Ok(Exit::SUCCESS)
    }

    fn capture(&mut self, cmd: &CommandSpec) -> Result<Captured> {
        println!("[dry-run] {cmd}");
        Ok(Captured {
            exit: Exit::SUCCESS,
            stdout: String::new(),
        })
    }

    fn clear_dir(&mut self, path: &Path) -> Result<()> {
        println!("[dry-run] clear {}", path.display());
        Ok(())
    }

    fn copy_files(&mut self, src: &Path, dst: &Path, pattern: &str) -> Result<usize> {
        println!(
            "[dry-run] copy {} -> {}",
            src.join(pattern).display(),
            dst.display()
        );
        Ok(0)
    }

    fn remove_files(&mut self, dir: &Path, pattern: &str) -> Result<usize> {
        println!("[dry-run] remove {}", dir.join(pattern).display());
        Ok(0)
    }
}
