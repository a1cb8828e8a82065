//! CLI-level errors.
//!
//! [`CliError`] wraps everything a command can fail with, renders it for the
//! terminal (message, cause chain, suggestions) and maps it to an exit code.
//! Every failure exits with 1.

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use cleanarch_core::error::{CleanArchError, ErrorCategory as CoreCategory};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Input clap could not reject on its own.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// A configuration file could not be read, parsed or written, or holds
    /// an unusable value.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// Invalid options or a failed step, from `cleanarch-core`.
    #[error(transparent)]
    Core(#[from] CleanArchError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError {
            message: source.to_string(),
            source,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Run 'cleanarch --help' for usage".into()],
            Self::ConfigError { .. } => vec![
                "Show the active file with 'cleanarch config path'".into(),
                "Recreate it with 'cleanarch init --force'".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec![
                "Check that the target directory is writable".into(),
                "Check available disk space".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::External => ErrorCategory::External,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    /// Scripts only distinguish success from failure, so every category
    /// maps to 1.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// 1-based ordinal of the step that stopped a scaffold run.
    pub fn failed_step(&self) -> Option<usize> {
        match self {
            Self::Core(core) => core.failed_step(),
            _ => None,
        }
    }

    /// Render for stderr. `color` adds ANSI styling; `verbose` adds the
    /// cause chain and drops the `--verbose` hint.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let mut lines = Vec::new();

        lines.push(String::new());
        if color {
            lines.push(format!("{} {}", "\u{2717} Error:".red().bold(), self.to_string().red()));
        } else {
            lines.push(format!("Error: {self}"));
        }

        if verbose {
            for cause in self.causes() {
                if color {
                    lines.push(format!("  {}", format!("caused by: {cause}").dimmed()));
                } else {
                    lines.push(format!("  caused by: {cause}"));
                }
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            lines.push(String::new());
            if color {
                lines.push("Suggestions:".yellow().bold().to_string());
            } else {
                lines.push("Suggestions:".into());
            }
            // multi-line hints carry tool output; keep it under its heading
            lines.extend(
                suggestions
                    .iter()
                    .map(|s| format!("  {}", s.replace('\n', "\n    "))),
            );
        }

        if !verbose {
            lines.push(String::new());
            let hint = "Run again with -v for more details.";
            if color {
                lines.push(hint.dimmed().to_string());
            } else {
                lines.push(hint.into());
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn causes(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        std::iter::successors(self.source(), |&err| err.source())
    }

    /// Record the failure for `-v` runs. The user-facing copy is
    /// [`CliError::render`], so nothing here reaches the default filter.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::debug!(?category, "{self}")
            }
            ErrorCategory::External => {
                tracing::info!(?category, step = ?self.failed_step(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::info!(?category, "{self}")
            }
        }

        for cause in self.causes() {
            tracing::debug!("caused by: {cause}");
        }
    }
}

/// Coarse classification used for log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments or an invalid solution name.
    UserError,
    NotFound,
    Configuration,
    /// The dotnet toolchain failed or could not be started.
    External,
    Internal,
}

/// Attach a context message to an `io::Error` at the call-site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::IoError {
            message: f().into(),
            source,
        })
    }
}
