use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// An assembled subprocess invocation: executable path, ordered arguments,
/// and optional working directory.
///
/// Built once per invocation via the fluent constructors and never mutated
/// afterwards; runners only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandLine {
    /// Create a new command line for the given program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

/// Capability seam for spawning subprocesses.
///
/// Resolution and orchestration logic take a `&dyn ProcessRunner` so tests
/// can substitute a double that never spawns a real process.
pub trait ProcessRunner {
    /// Spawn the command, block until it exits, and return its exit code.
    fn run(&self, cmd: &CommandLine) -> io::Result<i32>;
}

/// Runs commands on the real system.
///
/// Child stdio is inherited from the calling process: output interpretation
/// is the caller's concern, not ours.
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, cmd: &CommandLine) -> io::Result<i32> {
        tracing::debug!("Spawning {} {:?}", cmd.program().display(), cmd.arguments());
        let mut child = Command::new(cmd.program());
        child.args(cmd.arguments());
        if let Some(dir) = cmd.working_dir() {
            child.current_dir(dir);
        }
        let status = child.status()?;
        // Signal-terminated children carry no exit code; report -1.
        Ok(status.code().unwrap_or(-1))
    }
}
