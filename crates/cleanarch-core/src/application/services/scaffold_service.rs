//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Validate the options
//! 2. Build the layer graph and lower it into a plan
//! 3. Execute the plan through the toolchain and filesystem ports
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::Path;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::{Filesystem, ScaffoldObserver, SilentObserver, Toolchain},
        report::ExecutionReport,
        services::executor::ScaffoldExecutor,
    },
    domain::{PresentationKind, ScaffoldOptions, ScaffoldPlan, ScaffoldPlanner},
    error::CleanArchResult,
};

/// Main scaffolding service.
pub struct ScaffoldService {
    toolchain: Box<dyn Toolchain>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use cleanarch_adapters::{DotnetToolchain, LocalFilesystem, SystemCommandRunner};
    /// use cleanarch_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(DotnetToolchain::new(SystemCommandRunner::new())),
    ///     Box::new(LocalFilesystem::new()),
    /// );
    /// ```
    pub fn new(toolchain: Box<dyn Toolchain>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            toolchain,
            filesystem,
        }
    }

    /// Validate options and build the plan without touching anything.
    #[instrument(skip_all, fields(project = %options.project_name()))]
    pub fn plan(&self, options: &ScaffoldOptions) -> CleanArchResult<ScaffoldPlan> {
        let plan = ScaffoldPlanner::plan(options)?;

        info!(
            presentation = %options.presentation(),
            with_tests = options.include_tests(),
            "Generating solution '{}'",
            options.project_name()
        );
        if options.presentation() == PresentationKind::None {
            debug!("Skipping presentation project");
        }
        info!(
            layers = plan.graph().layers().len(),
            steps = plan.len(),
            "Plan built"
        );
        Ok(plan)
    }

    /// Execute a plan under `root` without progress reporting.
    pub fn execute(&self, plan: &ScaffoldPlan, root: &Path) -> CleanArchResult<ExecutionReport> {
        self.execute_with(plan, root, &SilentObserver)
    }

    /// Execute a plan under `root`, reporting progress to `observer`.
    pub fn execute_with(
        &self,
        plan: &ScaffoldPlan,
        root: &Path,
        observer: &dyn ScaffoldObserver,
    ) -> CleanArchResult<ExecutionReport> {
        ScaffoldExecutor::new(self.toolchain.as_ref(), self.filesystem.as_ref(), observer)
            .execute(plan, root)
    }

    /// Plan and execute in one go.
    ///
    /// This is the main use case. Invalid options fail before any step runs.
    #[instrument(
        skip_all,
        fields(project = %options.project_name(), root = %root.display())
    )]
    pub fn scaffold(
        &self,
        options: &ScaffoldOptions,
        root: &Path,
        observer: &dyn ScaffoldObserver,
    ) -> CleanArchResult<ExecutionReport> {
        let plan = self.plan(options)?;
        let report = self.execute_with(&plan, root, observer)?;

        info!(run_id = %report.run_id, "Scaffold completed successfully");
        Ok(report)
    }
}
