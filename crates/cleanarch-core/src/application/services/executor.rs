//! Plan execution.
//!
//! Steps run strictly in plan order, one blocking call at a time. The first
//! failing step ends the run: its 1-based ordinal is reported and nothing
//! after it is attempted. Completed steps are not rolled back.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ScaffoldObserver, Toolchain},
        report::{ExecutionReport, StepOutcome},
    },
    domain::{DomainValidator, PatchOutcome, ScaffoldPlan, Step, patch_entrypoint},
    error::{CleanArchError, CleanArchResult},
};

/// Runs a [`ScaffoldPlan`] against the ports.
pub struct ScaffoldExecutor<'a> {
    toolchain: &'a dyn Toolchain,
    filesystem: &'a dyn Filesystem,
    observer: &'a dyn ScaffoldObserver,
}

impl<'a> ScaffoldExecutor<'a> {
    pub fn new(
        toolchain: &'a dyn Toolchain,
        filesystem: &'a dyn Filesystem,
        observer: &'a dyn ScaffoldObserver,
    ) -> Self {
        Self {
            toolchain,
            filesystem,
            observer,
        }
    }

    /// Execute every step under `root`, stopping at the first failure.
    #[instrument(
        skip_all,
        fields(
            solution = %plan.options().project_name(),
            root = %root.display(),
            steps = plan.len(),
            run_id = tracing::field::Empty
        )
    )]
    pub fn execute(&self, plan: &ScaffoldPlan, root: &Path) -> CleanArchResult<ExecutionReport> {
        DomainValidator::validate_plan(plan)?;

        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        let started_at = Utc::now();
        let total = plan.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, step) in plan.steps().iter().enumerate() {
            let ordinal = index + 1;
            debug!(step = ordinal, kind = %step.kind(), "{step}");
            self.observer.step_started(ordinal, total, step);

            match self.apply(step, root) {
                Ok(outcome) => {
                    if let Some(warning) = outcome.warning() {
                        debug!(step = ordinal, kind = %step.kind(), "{warning}");
                        self.observer.warning(&warning.to_string());
                    }
                    self.observer.step_finished(ordinal, total, step, &outcome);
                    outcomes.push(outcome);
                }
                Err(cause) => {
                    info!(step = ordinal, kind = %step.kind(), error = %cause, "Step failed");
                    let err: CleanArchError =
                        ApplicationError::step_failed(ordinal, step.kind(), cause).into();
                    self.observer.step_failed(ordinal, total, step, &err);
                    return Err(err);
                }
            }
        }

        let report = ExecutionReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };
        info!(
            steps = report.steps(),
            elapsed_ms = report.elapsed().num_milliseconds(),
            "Plan executed"
        );
        Ok(report)
    }

    fn apply(&self, step: &Step, root: &Path) -> CleanArchResult<StepOutcome> {
        match step {
            Step::CreateSolution { name, directories } => {
                self.filesystem.create_dir_all(root)?;
                self.toolchain.create_solution(root, name)?;
                for dir in directories {
                    self.filesystem.create_dir_all(&root.join(dir))?;
                }
            }
            Step::CreateProject {
                template,
                name,
                directory,
                ..
            } => self
                .toolchain
                .create_project(root, *template, name, directory)?,
            Step::AddToSolution {
                solution, project, ..
            } => self.toolchain.add_to_solution(root, solution, project)?,
            Step::AddReference {
                project, reference, ..
            } => self.toolchain.add_reference(root, project, reference)?,
            Step::WritePlaceholder { path, contents, .. } => {
                let target = root.join(path);
                if let Some(parent) = target.parent() {
                    self.filesystem.create_dir_all(parent)?;
                }
                self.filesystem.write_file(&target, contents)?;
            }
            Step::PatchEntrypoint { path } => return self.patch(&root.join(path)),
        }
        Ok(StepOutcome::Completed)
    }

    fn patch(&self, path: &Path) -> CleanArchResult<StepOutcome> {
        if !self.filesystem.exists(path) {
            return Ok(StepOutcome::Skipped(ApplicationError::EntrypointNotFound {
                path: path.to_path_buf(),
            }));
        }

        let source = self.filesystem.read_to_string(path)?;
        match patch_entrypoint(&source) {
            PatchOutcome::Patched(patched) => {
                self.filesystem.write_file(path, &patched)?;
                Ok(StepOutcome::Completed)
            }
            PatchOutcome::AlreadyPatched => Ok(StepOutcome::AlreadyApplied),
            PatchOutcome::MarkerMissing => Ok(StepOutcome::Skipped(
                ApplicationError::marker_missing(path),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::*;
    use crate::application::ports::{MockFilesystem, MockToolchain, SilentObserver};
    use crate::domain::{PresentationKind, ScaffoldOptions, ScaffoldPlanner, StepKind, TemplateKind};

    fn plan(presentation: PresentationKind, tests: bool) -> ScaffoldPlan {
        ScaffoldPlanner::plan(
            &ScaffoldOptions::new("Shop")
                .with_presentation(presentation)
                .with_tests(tests),
        )
        .unwrap()
    }

    fn tool_failure() -> CleanArchError {
        ApplicationError::CommandFailed {
            command: "dotnet".into(),
            exit_code: Some(1),
            output: "boom".into(),
        }
        .into()
    }

    /// Counts toolchain calls and fails the n-th one (1-based).
    #[derive(Default)]
    struct CountingToolchain {
        calls: Mutex<Vec<String>>,
        fail_at: Option<usize>,
    }

    impl CountingToolchain {
        fn failing_at(call: usize) -> Self {
            Self {
                fail_at: Some(call),
                ..Self::default()
            }
        }

        fn record(&self, call: String) -> CleanArchResult<()> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(call);
            if Some(calls.len()) == self.fail_at {
                return Err(tool_failure());
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Toolchain for CountingToolchain {
        fn create_solution(&self, _root: &Path, name: &str) -> CleanArchResult<()> {
            self.record(format!("sln {name}"))
        }

        fn create_project(
            &self,
            _root: &Path,
            template: TemplateKind,
            name: &str,
            _directory: &Path,
        ) -> CleanArchResult<()> {
            self.record(format!("new {template} {name}"))
        }

        fn add_to_solution(&self, _root: &Path, _solution: &Path, project: &Path) -> CleanArchResult<()> {
            self.record(format!("add {}", project.display()))
        }

        fn add_reference(&self, _root: &Path, project: &Path, reference: &Path) -> CleanArchResult<()> {
            self.record(format!("ref {} {}", project.display(), reference.display()))
        }
    }

    #[derive(Default)]
    struct MapFilesystem {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl MapFilesystem {
        fn with_file(path: &str, contents: &str) -> Self {
            let fs = Self::default();
            fs.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), contents.to_string());
            fs
        }

        fn get(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }
    }

    impl Filesystem for MapFilesystem {
        fn create_dir_all(&self, _path: &Path) -> CleanArchResult<()> {
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> CleanArchResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn read_to_string(&self, path: &Path) -> CleanArchResult<String> {
            self.get(&path.to_string_lossy()).ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }

    #[test]
    fn runs_every_toolchain_step_in_order() {
        let p = plan(PresentationKind::None, false);
        let toolchain = CountingToolchain::default();
        let fs = MapFilesystem::default();

        let report = ScaffoldExecutor::new(&toolchain, &fs, &SilentObserver)
            .execute(&p, Path::new("/out"))
            .unwrap();

        assert_eq!(report.steps(), p.len());
        assert!(!report.has_warnings());
        assert_eq!(
            toolchain.calls()[..4],
            [
                "sln Shop".to_string(),
                "new classlib Shop.Domain".into(),
                "new classlib Shop.Application".into(),
                "new classlib Shop.Infrastructure".into(),
            ]
        );
        assert!(
            fs.get("/out/src/Domain/Entities/PlaceholderEntity.cs")
                .unwrap()
                .contains("namespace Shop.Domain.Entities")
        );
    }

    #[test]
    fn fails_fast_and_reports_ordinal() {
        let p = plan(PresentationKind::WebApi, true);
        // Toolchain-backed steps come first, so call k is step k.
        for k in [1, 2, 9, 17] {
            let toolchain = CountingToolchain::failing_at(k);
            let fs = MapFilesystem::default();

            let err = ScaffoldExecutor::new(&toolchain, &fs, &SilentObserver)
                .execute(&p, Path::new("/out"))
                .unwrap_err();

            assert_eq!(err.failed_step(), Some(k));
            assert_eq!(toolchain.calls().len(), k, "no step after {k} may run");
            assert!(fs.get("/out/src/Domain/Entities/PlaceholderEntity.cs").is_none());
            match err {
                CleanArchError::Application(ApplicationError::StepFailed { kind, message, .. }) => {
                    assert_eq!(kind, p.steps()[k - 1].kind());
                    assert!(message.contains("exited with status 1"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn patches_generated_entrypoint() {
        let p = plan(PresentationKind::WebApi, false);
        let toolchain = CountingToolchain::default();
        let fs = MapFilesystem::with_file(
            "/out/src/WebUI/Program.cs",
            "var builder = WebApplication.CreateBuilder(args);\nvar app = builder.Build();\napp.Run();\n",
        );

        let report = ScaffoldExecutor::new(&toolchain, &fs, &SilentObserver)
            .execute(&p, Path::new("/out"))
            .unwrap();

        assert_eq!(report.outcomes.last(), Some(&StepOutcome::Completed));
        let program = fs.get("/out/src/WebUI/Program.cs").unwrap();
        assert!(program.contains("builder.Services.AddSwaggerGen();"));
        assert!(program.contains("app.UseSwaggerUI();"));
    }

    #[test]
    fn already_patched_entrypoint_is_untouched() {
        let p = plan(PresentationKind::WebApi, false);
        let original = "var app = builder.Build();\napp.UseSwagger();\n";
        let fs = MapFilesystem::with_file("/out/src/WebUI/Program.cs", original);

        let report = ScaffoldExecutor::new(&CountingToolchain::default(), &fs, &SilentObserver)
            .execute(&p, Path::new("/out"))
            .unwrap();

        assert_eq!(report.outcomes.last(), Some(&StepOutcome::AlreadyApplied));
        assert_eq!(fs.get("/out/src/WebUI/Program.cs").unwrap(), original);
    }

    #[test]
    fn missing_entrypoint_is_a_warning() {
        let p = plan(PresentationKind::WebApi, false);
        let report = ScaffoldExecutor::new(
            &CountingToolchain::default(),
            &MapFilesystem::default(),
            &SilentObserver,
        )
        .execute(&p, Path::new("/out"))
        .unwrap();

        let warnings: Vec<_> = report.warnings().collect();
        assert_eq!(
            warnings,
            vec![&ApplicationError::EntrypointNotFound {
                path: PathBuf::from("/out/src/WebUI/Program.cs")
            }]
        );
    }

    #[test]
    fn missing_marker_leaves_file_unchanged() {
        let p = plan(PresentationKind::WebApi, false);
        let original = "Console.WriteLine(\"hi\");\n";
        let fs = MapFilesystem::with_file("/out/src/WebUI/Program.cs", original);

        let report = ScaffoldExecutor::new(&CountingToolchain::default(), &fs, &SilentObserver)
            .execute(&p, Path::new("/out"))
            .unwrap();

        assert!(matches!(
            report.warnings().next(),
            Some(ApplicationError::EntrypointMarkerMissing { .. })
        ));
        assert_eq!(fs.get("/out/src/WebUI/Program.cs").unwrap(), original);
    }

    #[test]
    fn solution_step_creates_root_and_directories() {
        let p = plan(PresentationKind::None, false);

        let mut toolchain = MockToolchain::new();
        toolchain
            .expect_create_solution()
            .times(1)
            .returning(|_, _| Ok(()));
        toolchain
            .expect_create_project()
            .times(1)
            .returning(|_, _, _, _| Err(tool_failure()));
        toolchain.expect_add_to_solution().never();
        toolchain.expect_add_reference().never();

        let mut fs = MockFilesystem::new();
        // root, src, tests
        fs.expect_create_dir_all().times(3).returning(|_| Ok(()));
        fs.expect_write_file().never();

        let err = ScaffoldExecutor::new(&toolchain, &fs, &SilentObserver)
            .execute(&p, Path::new("/out"))
            .unwrap_err();
        assert_eq!(err.failed_step(), Some(2));
    }

    #[test]
    fn filesystem_failure_stops_placeholder_step() {
        let p = plan(PresentationKind::None, false);
        let toolchain = CountingToolchain::default();

        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });

        let err = ScaffoldExecutor::new(&toolchain, &fs, &SilentObserver)
            .execute(&p, Path::new("/out"))
            .unwrap_err();

        let first_placeholder = p
            .steps()
            .iter()
            .position(|s| s.kind() == StepKind::WritePlaceholder)
            .unwrap();
        assert_eq!(err.failed_step(), Some(first_placeholder + 1));
    }

    #[derive(Default)]
    struct TraceObserver {
        events: Mutex<Vec<String>>,
    }

    impl ScaffoldObserver for TraceObserver {
        fn step_started(&self, ordinal: usize, total: usize, _step: &Step) {
            self.events.lock().unwrap().push(format!("start {ordinal}/{total}"));
        }

        fn step_failed(&self, ordinal: usize, _total: usize, _step: &Step, _error: &CleanArchError) {
            self.events.lock().unwrap().push(format!("fail {ordinal}"));
        }
    }

    #[test]
    fn observer_sees_failing_step() {
        let p = plan(PresentationKind::None, false);
        let observer = TraceObserver::default();

        let _ = ScaffoldExecutor::new(
            &CountingToolchain::failing_at(2),
            &MapFilesystem::default(),
            &observer,
        )
        .execute(&p, Path::new("/out"));

        let total = p.len();
        assert_eq!(
            *observer.events.lock().unwrap(),
            vec![
                format!("start 1/{total}"),
                format!("start 2/{total}"),
                "fail 2".to_string()
            ]
        );
    }
}
