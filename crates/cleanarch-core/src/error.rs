//! The error type every public core operation returns.
//!
//! Layer errors keep their own messages; this enum only joins them so a
//! caller can match on one type and ask for suggestions and a category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CleanArchError {
    /// Rejected options or an inconsistent layer table.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Toolchain, process and filesystem failures.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl CleanArchError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Coarse grouping used by the CLI to pick a colour and a log level.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorCategory::Validation,
                domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// What the failing tool printed, if this came from a command.
    pub fn tool_output(&self) -> Option<&str> {
        match self {
            Self::Application(e) => e.tool_output(),
            Self::Domain(_) => None,
        }
    }

    /// The 1-based step that stopped the run, if a step did.
    pub fn failed_step(&self) -> Option<usize> {
        match self {
            Self::Application(ApplicationError::StepFailed { step, .. }) => Some(*step),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// The external toolchain failed or could not be started.
    External,
    Internal,
}

pub type CleanArchResult<T> = Result<T, CleanArchError>;
