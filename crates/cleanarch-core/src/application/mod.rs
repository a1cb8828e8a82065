//! Application layer for CleanArch.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, ScaffoldExecutor)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

// Re-export main services
pub use services::{ScaffoldExecutor, ScaffoldService};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CommandOutput, CommandRunner, CommandSpec, Filesystem, ScaffoldObserver, SilentObserver,
    Toolchain,
};

pub use error::ApplicationError;
pub use report::{ExecutionReport, StepOutcome};
