//! Application layer errors.
//!
//! These errors represent failures while driving the toolchain and the
//! filesystem, not modelling mistakes. Those are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{StepKind, entrypoint::APP_BUILD_MARKER};
use crate::error::{CleanArchError, ErrorCategory};

/// Errors that occur while executing a scaffold plan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A step of the plan failed; everything before it stays in place.
    /// Build it with [`ApplicationError::step_failed`].
    #[error("Step {step} ({kind}) failed: {message}")]
    StepFailed {
        /// 1-based position of the failing step in the plan.
        step: usize,
        kind: StepKind,
        message: String,
        #[source]
        source: Box<CleanArchError>,
    },

    /// The toolchain ran but exited unsuccessfully. `output` is what the
    /// tool printed on stderr, or on stdout when stderr was empty.
    #[error("Command `{command}` exited with {}", exit_status(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// The toolchain could not be started at all.
    #[error("Could not run `{command}`: {reason}")]
    SpawnFailed { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The generated entry point is not where the presentation template
    /// normally puts it. Non-fatal.
    #[error("Entry point not found at {path}; Swagger was not enabled")]
    EntrypointNotFound { path: PathBuf },

    /// The entry point exists but does not contain the app-build line.
    /// Non-fatal.
    #[error("Entry point {path} has no `{marker}` line; Swagger was not enabled")]
    EntrypointMarkerMissing { path: PathBuf, marker: &'static str },

    /// Adapter state lock poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".into(),
    }
}

impl ApplicationError {
    /// Wrap the error that stopped step `step`. The message carries the
    /// first line the tool printed, so one line is enough to see why.
    pub fn step_failed(step: usize, kind: StepKind, cause: CleanArchError) -> Self {
        let message = match cause.tool_output().and_then(|out| out.lines().next()) {
            Some(line) => format!("{cause}: {}", line.trim()),
            None => cause.to_string(),
        };
        Self::StepFailed {
            step,
            kind,
            message,
            source: Box::new(cause),
        }
    }

    /// Trimmed tool diagnostics, if this is a command failure that printed any.
    pub fn tool_output(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { output, .. } => Some(output.trim()).filter(|o| !o.is_empty()),
            Self::StepFailed { source, .. } => source.tool_output(),
            _ => None,
        }
    }

    pub fn marker_missing(path: impl Into<PathBuf>) -> Self {
        Self::EntrypointMarkerMissing {
            path: path.into(),
            marker: APP_BUILD_MARKER,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StepFailed {
                step, kind, source, ..
            } => {
                let mut hints = source.suggestions();
                hints.push(format!(
                    "Steps before step {step} ({kind}) were completed and left in place"
                ));
                hints.push("Remove the partially generated files before running again".into());
                hints.push("Re-run with -v to see each toolchain command".into());
                hints
            }
            Self::CommandFailed { .. } => match self.tool_output() {
                Some(output) => vec![format!("Toolchain output:\n{output}")],
                None => vec!["The command printed nothing; re-run with -vv to trace it".into()],
            },
            Self::SpawnFailed { .. } => vec![
                "Ensure the .NET SDK is installed and `dotnet` is in your PATH".into(),
                "Or point CLEANARCH_TOOLCHAIN__PROGRAM at the dotnet executable".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::EntrypointNotFound { .. } | Self::EntrypointMarkerMissing { .. } => vec![
                "Register Swagger manually: builder.Services.AddSwaggerGen() and app.UseSwagger()"
                    .into(),
            ],
            Self::LockPoisoned => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StepFailed { .. } | Self::CommandFailed { .. } | Self::SpawnFailed { .. } => {
                ErrorCategory::External
            }
            Self::EntrypointNotFound { .. } | Self::EntrypointMarkerMissing { .. } => {
                ErrorCategory::NotFound
            }
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }

    /// Whether the run can carry on after this error.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::EntrypointNotFound { .. } | Self::EntrypointMarkerMissing { .. }
        )
    }
}
