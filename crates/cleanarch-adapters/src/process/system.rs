//! Process runner backed by `std::process`.

use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use cleanarch_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec},
    },
    error::CleanArchResult,
};

/// Production runner: spawns the program and waits for it to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip_all, fields(program = %command.program))]
    fn run(&self, command: &CommandSpec) -> CleanArchResult<CommandOutput> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        debug!(command = %command, "spawning");
        let output = cmd.output().map_err(|e| ApplicationError::SpawnFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        let result = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            exit_code = ?result.exit_code,
            stdout = %result.stdout.trim_end(),
            "process exited"
        );
        Ok(result)
    }
}
