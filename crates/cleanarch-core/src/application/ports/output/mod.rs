//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cleanarch-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::application::report::StepOutcome;
use crate::domain::{Step, TemplateKind};
use crate::error::{CleanArchError, CleanArchResult};

/// One external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
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
        self.working_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// What a finished process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            exit_code: Some(0),
            ..Self::default()
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Port for running external processes.
///
/// A process that starts and exits non-zero is still `Ok`; callers decide
/// what a status means. `Err` is reserved for processes that could not be
/// started (`ApplicationError::SpawnFailed`).
///
/// Implemented by:
/// - `cleanarch_adapters::process::SystemCommandRunner` (production)
/// - `cleanarch_adapters::process::RecordingCommandRunner` (testing)
pub trait CommandRunner: Send + Sync {
    /// Run to completion, blocking until the process exits.
    fn run(&self, command: &CommandSpec) -> CleanArchResult<CommandOutput>;
}

/// Port for the project-generation toolchain.
///
/// Every operation runs with `root` (the solution root) as working
/// directory; the path arguments are relative to it.
///
/// Implemented by:
/// - `cleanarch_adapters::toolchain::DotnetToolchain`
#[cfg_attr(test, mockall::automock)]
pub trait Toolchain: Send + Sync {
    /// Create `<name>.sln` in `root`.
    fn create_solution(&self, root: &Path, name: &str) -> CleanArchResult<()>;

    /// Generate a project from a template into `directory`.
    fn create_project(
        &self,
        root: &Path,
        template: TemplateKind,
        name: &str,
        directory: &Path,
    ) -> CleanArchResult<()>;

    /// Register a project file with the solution file.
    fn add_to_solution(&self, root: &Path, solution: &Path, project: &Path) -> CleanArchResult<()>;

    /// Make `project` reference `reference`.
    fn add_reference(&self, root: &Path, project: &Path, reference: &Path) -> CleanArchResult<()>;
}

/// Port for filesystem operations. Paths are absolute (already joined onto
/// the solution root).
///
/// Implemented by:
/// - `cleanarch_adapters::filesystem::LocalFilesystem` (production)
/// - `cleanarch_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CleanArchResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> CleanArchResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> CleanArchResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Progress notifications from the executor. `ordinal` is 1-based.
///
/// All methods default to no-ops so observers only implement what they
/// display.
pub trait ScaffoldObserver: Send + Sync {
    fn step_started(&self, _ordinal: usize, _total: usize, _step: &Step) {}

    fn step_finished(&self, _ordinal: usize, _total: usize, _step: &Step, _outcome: &StepOutcome) {}

    fn step_failed(&self, _ordinal: usize, _total: usize, _step: &Step, _error: &CleanArchError) {}

    /// A non-fatal problem; the run carries on.
    fn warning(&self, _message: &str) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl ScaffoldObserver for SilentObserver {}
