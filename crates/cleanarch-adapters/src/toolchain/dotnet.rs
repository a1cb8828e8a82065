//! The .NET SDK as a [`Toolchain`].

use std::path::Path;

use tracing::{debug, info, instrument};

use cleanarch_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec, Toolchain},
    },
    domain::{Step, TemplateKind},
    error::CleanArchResult,
};

/// Program name used when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "dotnet";

/// Drives `dotnet new`, `dotnet sln` and `dotnet add` through a
/// [`CommandRunner`].
pub struct DotnetToolchain {
    runner: Box<dyn CommandRunner>,
    program: String,
}

impl DotnetToolchain {
    pub fn new(runner: impl CommandRunner + 'static) -> Self {
        Self {
            runner: Box::new(runner),
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    /// Use a different executable, e.g. a pinned SDK path.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn solution_command(&self, root: &Path, name: &str) -> CommandSpec {
        self.command(root).args(["new", "sln", "-n", name])
    }

    pub fn project_command(
        &self,
        root: &Path,
        template: TemplateKind,
        name: &str,
        directory: &Path,
    ) -> CommandSpec {
        self.command(root)
            .args(["new", template.as_str(), "-n", name, "-o"])
            .arg(path_arg(directory))
    }

    pub fn add_to_solution_command(&self, root: &Path, solution: &Path, project: &Path) -> CommandSpec {
        self.command(root)
            .arg("sln")
            .arg(path_arg(solution))
            .arg("add")
            .arg(path_arg(project))
    }

    pub fn reference_command(&self, root: &Path, project: &Path, reference: &Path) -> CommandSpec {
        self.command(root)
            .arg("add")
            .arg(path_arg(project))
            .arg("reference")
            .arg(path_arg(reference))
    }

    /// The command a step would run, or `None` for steps that only touch
    /// files. Used to print plans without executing them.
    pub fn command_for(&self, root: &Path, step: &Step) -> Option<CommandSpec> {
        match step {
            Step::CreateSolution { name, .. } => Some(self.solution_command(root, name)),
            Step::CreateProject {
                template,
                name,
                directory,
                ..
            } => Some(self.project_command(root, *template, name, directory)),
            Step::AddToSolution {
                solution, project, ..
            } => Some(self.add_to_solution_command(root, solution, project)),
            Step::AddReference {
                project, reference, ..
            } => Some(self.reference_command(root, project, reference)),
            Step::WritePlaceholder { .. } | Step::PatchEntrypoint { .. } => None,
        }
    }

    fn command(&self, root: &Path) -> CommandSpec {
        CommandSpec::new(&self.program).current_dir(root)
    }

    #[instrument(skip_all, fields(program = %self.program))]
    fn run(&self, command: CommandSpec) -> CleanArchResult<()> {
        info!(command = %command, "Running toolchain");
        let output = self.runner.run(&command)?;

        if output.is_success() {
            return Ok(());
        }

        // dotnet reports most template errors on stdout
        let diagnostics = if output.stderr.trim().is_empty() {
            output.stdout
        } else {
            output.stderr
        };
        debug!(
            exit_code = ?output.exit_code,
            output = %diagnostics.trim_end(),
            "Toolchain command failed"
        );
        Err(ApplicationError::CommandFailed {
            command: command.to_string(),
            exit_code: output.exit_code,
            output: diagnostics,
        }
        .into())
    }
}

impl Toolchain for DotnetToolchain {
    fn create_solution(&self, root: &Path, name: &str) -> CleanArchResult<()> {
        self.run(self.solution_command(root, name))
    }

    fn create_project(
        &self,
        root: &Path,
        template: TemplateKind,
        name: &str,
        directory: &Path,
    ) -> CleanArchResult<()> {
        self.run(self.project_command(root, template, name, directory))
    }

    fn add_to_solution(&self, root: &Path, solution: &Path, project: &Path) -> CleanArchResult<()> {
        self.run(self.add_to_solution_command(root, solution, project))
    }

    fn add_reference(&self, root: &Path, project: &Path, reference: &Path) -> CleanArchResult<()> {
        self.run(self.reference_command(root, project, reference))
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
