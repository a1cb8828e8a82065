//! Planning and execution core of the `cleanarch` scaffolder.
//!
//! The crate is split along ports and adapters:
//!
//! ```text
//! cleanarch-cli ──calls──▶ application (ScaffoldService, ScaffoldExecutor)
//!                               │ depends on
//!                               ▼
//!                          ports: Toolchain, CommandRunner, Filesystem,
//!                                 ScaffoldObserver
//!                               ▲ implemented by
//!                               │
//!                          cleanarch-adapters (DotnetToolchain, LocalFilesystem, ...)
//!
//! domain (ScaffoldOptions, LayerGraph, ScaffoldPlan): pure, no I/O
//! ```
//!
//! A run is two phases. [`domain::ScaffoldPlanner`] turns options into an
//! ordered [`domain::ScaffoldPlan`]; the application service then executes
//! it step by step through the ports, stopping at the first failure.
//!
//! ```rust,ignore
//! use cleanarch_core::prelude::*;
//!
//! let options = ScaffoldOptions::new("Shop")
//!     .with_presentation(PresentationKind::WebApi)
//!     .with_tests(true);
//!
//! let service = ScaffoldService::new(toolchain, filesystem);
//! let report = service.scaffold(&options, "./Shop".as_ref(), &SilentObserver)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Re-exports for adapter and CLI crates.
pub mod prelude {
    pub use crate::application::{
        ApplicationError, ExecutionReport, ScaffoldService, StepOutcome,
        ports::{
            CommandOutput, CommandRunner, CommandSpec, Filesystem, ScaffoldObserver,
            SilentObserver, Toolchain,
        },
    };
    pub use crate::domain::{
        DomainError, LayerGraph, LayerId, PresentationKind, ScaffoldOptions, ScaffoldPlan,
        ScaffoldPlanner, Step, StepKind, TemplateKind,
    };
    pub use crate::error::{CleanArchError, CleanArchResult, ErrorCategory};
}

