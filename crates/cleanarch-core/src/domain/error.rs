// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside step reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidOptions {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    // ========================================================================
    // Graph / plan integrity (bugs in the static tables if they ever fire)
    // ========================================================================
    #[error("Reference cycle between layers: {path}")]
    CyclicReference { path: String },

    #[error("Plan step {step} is out of order: {reason}")]
    PlanOrdering { step: usize, reason: String },
}

impl DomainError {
    /// Shorthand for a project-name validation failure.
    pub(crate) fn invalid_name(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            field: "project name",
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidOptions { field, .. } if *field == "project name" => vec![
                "Project names become .NET namespaces and assembly names".into(),
                "Use letters, digits and underscores; separate segments with '.'".into(),
                "Each segment must start with a letter or underscore".into(),
                "Examples: Shop, MyCompany.Billing, Inventory_Api".into(),
            ],
            Self::InvalidOptions { field, .. } if *field == "presentation" => vec![
                "Supported presentation kinds:".into(),
                "  • webapi   - ASP.NET Core Web API (Swagger enabled)".into(),
                "  • console  - Console application".into(),
                "  • none     - No presentation project".into(),
            ],
            Self::UnknownLayer(_) => vec![
                "Known layers: Domain, Application, Infrastructure, Presentation,".into(),
                "  Domain.UnitTests, Application.UnitTests, Application.IntegrationTests".into(),
            ],
            Self::CyclicReference { .. } | Self::PlanOrdering { .. } => vec![
                "The built-in layer tables are inconsistent".into(),
                "This is a bug, please report it".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidOptions { .. } | Self::UnknownLayer(_) => ErrorCategory::Validation,
            Self::CyclicReference { .. } | Self::PlanOrdering { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
