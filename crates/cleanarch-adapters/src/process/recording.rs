//! In-memory process runner for testing and dry runs.

use std::sync::{Arc, Mutex};

use cleanarch_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec},
    },
    error::CleanArchResult,
};

/// Records every command instead of running it.
///
/// Clones share the same log, so a test can hand one clone to the
/// toolchain and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingCommandRunner {
    inner: Arc<Mutex<RecordingInner>>,
}

#[derive(Debug, Default)]
struct RecordingInner {
    calls: Vec<CommandSpec>,
    /// 1-based call number and the output it returns.
    fail_at: Option<(usize, CommandOutput)>,
}

impl RecordingCommandRunner {
    /// Create a runner that reports success for every command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `output` for the `call`-th command (1-based), success otherwise.
    pub fn failing_at(call: usize, output: CommandOutput) -> Self {
        let runner = Self::new();
        if let Ok(mut inner) = runner.inner.lock() {
            inner.fail_at = Some((call, output));
        }
        runner
    }

    /// Commands seen so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.inner
            .lock()
            .map(|inner| inner.calls.clone())
            .unwrap_or_default()
    }

    /// Commands seen so far, rendered as shell lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn run(&self, command: &CommandSpec) -> CleanArchResult<CommandOutput> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        inner.calls.push(command.clone());
        let call = inner.calls.len();

        match &inner.fail_at {
            Some((at, output)) if *at == call => Ok(output.clone()),
            _ => Ok(CommandOutput::success()),
        }
    }
}
