//! Implementation of the `cleanarch create` command.
//!
//! Responsibility: turn CLI arguments and config defaults into
//! `ScaffoldOptions`, hand them to the core scaffold service, and display
//! the result. No business logic lives here.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use cleanarch_adapters::{DotnetToolchain, LocalFilesystem, SystemCommandRunner};
use cleanarch_core::{
    application::{ExecutionReport, ScaffoldService},
    domain::{PresentationKind, ScaffoldOptions, ScaffoldPlan, Step},
};

use crate::{
    cli::CreateArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `cleanarch create` command.
///
/// 1. Resolve options (flags, then config defaults) and the output root
/// 2. Plan; invalid options fail here, before anything runs
/// 3. Print the plan and stop if `--dry-run`
/// 4. Create the output root and execute the plan with the dotnet toolchain
/// 5. Print the run summary
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: CreateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Options
    let options = build_options(&args, &config)?;
    let root = resolve_root(args.output.as_deref())?;
    debug!(root = %root.display(), "Output root resolved");

    if !output.is_json() {
        output.info(&format!(
            "Generating solution '{}' (presentation={}, with_tests={})",
            options.project_name(),
            options.presentation(),
            options.include_tests(),
        ))?;
        if options.presentation() == PresentationKind::None {
            output.warning("Skipping presentation project")?;
        }
    }

    // 2. Plan
    let service = ScaffoldService::new(Box::new(dotnet(&config)), Box::new(LocalFilesystem::new()));
    let plan = service.plan(&options)?;

    // 3. Dry run
    if args.dry_run {
        return print_plan(&plan, &root, &dotnet(&config), &output);
    }

    // 4. Execute
    std::fs::create_dir_all(&root)
        .with_cli_context(|| format!("Failed to create output directory '{}'", root.display()))?;
    let report = service.execute_with(&plan, &root, &output)?;
    output.finish_progress();

    // 5. Summary
    print_summary(&plan, &report, &root, &output)
}

fn dotnet(config: &AppConfig) -> DotnetToolchain {
    DotnetToolchain::new(SystemCommandRunner::new()).with_program(&config.toolchain.program)
}

// ── Option resolution ─────────────────────────────────────────────────────────

/// Flags win; an absent `--presentation` falls back to
/// `defaults.presentation`, and `--with-tests` is additive to
/// `defaults.with_tests`.
fn build_options(args: &CreateArgs, config: &AppConfig) -> CliResult<ScaffoldOptions> {
    let presentation = match args.presentation {
        Some(p) => p.into(),
        None => config.default_presentation()?,
    };
    let with_tests = args.with_tests || config.defaults.with_tests;

    Ok(ScaffoldOptions::new(args.name.as_str())
        .with_presentation(presentation)
        .with_tests(with_tests))
}

fn resolve_root(output: Option<&Path>) -> CliResult<PathBuf> {
    match output {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().with_cli_context(|| "Failed to read current directory"),
    }
}

// ── Dry run ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PlanDocument<'a> {
    root: &'a Path,
    solution: PathBuf,
    options: &'a ScaffoldOptions,
    steps: Vec<PlannedStep<'a>>,
}

#[derive(Debug, Serialize)]
struct PlannedStep<'a> {
    ordinal: usize,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    step: &'a Step,
}

fn planned_steps<'a>(
    plan: &'a ScaffoldPlan,
    root: &Path,
    toolchain: &DotnetToolchain,
) -> Vec<PlannedStep<'a>> {
    plan.steps()
        .iter()
        .enumerate()
        .map(|(index, step)| PlannedStep {
            ordinal: index + 1,
            description: step.to_string(),
            command: toolchain.command_for(root, step).map(|c| c.to_string()),
            step,
        })
        .collect()
}

fn print_plan(
    plan: &ScaffoldPlan,
    root: &Path,
    toolchain: &DotnetToolchain,
    output: &OutputManager,
) -> CliResult<()> {
    let steps = planned_steps(plan, root, toolchain);

    if output.is_json() {
        return output.json(&PlanDocument {
            root,
            solution: plan.solution_file(),
            options: plan.options(),
            steps,
        });
    }

    output.header(&format!(
        "Dry run: {} steps in {}",
        plan.len(),
        root.display()
    ))?;
    for planned in &steps {
        let line = match &planned.command {
            Some(command) => format!("{:>3}. {command}", planned.ordinal),
            None => format!("{:>3}. {}", planned.ordinal, planned.description),
        };
        output.print(&line)?;
    }
    output.info("Nothing was executed")?;
    Ok(())
}

// ── Summary ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    root: &'a Path,
    solution: PathBuf,
    projects: Vec<&'a str>,
    steps: usize,
    warnings: Vec<String>,
}

fn print_summary(
    plan: &ScaffoldPlan,
    report: &ExecutionReport,
    root: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let solution = plan.solution_file();

    if output.is_json() {
        return output.json(&RunSummary {
            run_id: report.run_id,
            started_at: report.started_at,
            finished_at: report.finished_at,
            root,
            solution,
            projects: plan
                .graph()
                .layers()
                .iter()
                .map(|l| l.project_name.as_str())
                .collect(),
            steps: report.steps(),
            warnings: report.warnings().map(|w| w.to_string()).collect(),
        });
    }

    output.success(&format!(
        "Solution '{}' created in {} ({} steps, {} ms)",
        plan.options().project_name(),
        root.display(),
        report.steps(),
        report.elapsed().num_milliseconds(),
    ))?;

    output.print("")?;
    output.print("Projects:")?;
    for layer in plan.graph().layers() {
        output.print(&format!(
            "  {:<40} {}",
            layer.project_name,
            layer.relative_path.as_path().display()
        ))?;
    }

    let warnings = report.warnings().count();
    if warnings > 0 {
        output.print("")?;
        output.warning(&format!("Completed with {warnings} warning(s)"))?;
    }

    output.print("")?;
    output.print("Next steps:")?;
    if let Some(dir) = cd_hint(root) {
        output.print(&format!("  cd {dir}"))?;
    }
    output.print(&format!("  dotnet build {}", solution.display()))?;
    output.print("")?;
    output.print(&format!("Run id: {}", report.run_id))?;

    Ok(())
}

/// A `cd` hint, unless the solution landed in the current directory.
fn cd_hint(root: &Path) -> Option<String> {
    let cwd = std::env::current_dir().ok()?.canonicalize().ok()?;
    let target = root.canonicalize().ok()?;
    (target != cwd).then(|| root.display().to_string())
}

// ── tests ─────────────────────────────────────────────────────────────────────
