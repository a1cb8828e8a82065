//! Scaffold plans: the ordered list of steps a run performs.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    entities::{layer_graph::LayerGraph, options::ScaffoldOptions},
    entrypoint::ENTRYPOINT_FILE,
    error::DomainError,
    placeholders::PLACEHOLDERS,
    validation::DomainValidator,
    registry::SOLUTION_DIRECTORIES,
    value_objects::{LayerId, PresentationKind, TemplateKind},
};

/// Discriminant of a [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    CreateSolution,
    CreateProject,
    AddToSolution,
    AddReference,
    WritePlaceholder,
    PatchEntrypoint,
}

impl StepKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateSolution => "create-solution",
            Self::CreateProject => "create-project",
            Self::AddToSolution => "add-to-solution",
            Self::AddReference => "add-reference",
            Self::WritePlaceholder => "write-placeholder",
            Self::PatchEntrypoint => "patch-entrypoint",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of external work. All paths are relative to the solution root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Step {
    CreateSolution {
        name: String,
        directories: Vec<PathBuf>,
    },
    CreateProject {
        layer: LayerId,
        template: TemplateKind,
        name: String,
        directory: PathBuf,
    },
    AddToSolution {
        layer: LayerId,
        solution: PathBuf,
        project: PathBuf,
    },
    AddReference {
        from: LayerId,
        to: LayerId,
        project: PathBuf,
        reference: PathBuf,
    },
    WritePlaceholder {
        layer: LayerId,
        path: PathBuf,
        contents: String,
    },
    PatchEntrypoint {
        path: PathBuf,
    },
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::CreateSolution { .. } => StepKind::CreateSolution,
            Self::CreateProject { .. } => StepKind::CreateProject,
            Self::AddToSolution { .. } => StepKind::AddToSolution,
            Self::AddReference { .. } => StepKind::AddReference,
            Self::WritePlaceholder { .. } => StepKind::WritePlaceholder,
            Self::PatchEntrypoint { .. } => StepKind::PatchEntrypoint,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateSolution { name, .. } => write!(f, "create solution {name}.sln"),
            Self::CreateProject {
                template,
                name,
                directory,
                ..
            } => write!(f, "create {template} project {name} in {}", directory.display()),
            Self::AddToSolution { layer, .. } => write!(f, "add {layer} to solution"),
            Self::AddReference { from, to, .. } => write!(f, "reference {to} from {from}"),
            Self::WritePlaceholder { path, .. } => write!(f, "write {}", path.display()),
            Self::PatchEntrypoint { path } => {
                write!(f, "enable Swagger in {}", path.display())
            }
        }
    }
}

/// An ordered, immutable list of steps for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldPlan {
    options: ScaffoldOptions,
    graph: LayerGraph,
    steps: Vec<Step>,
}

impl ScaffoldPlan {
    pub fn options(&self) -> &ScaffoldOptions {
        &self.options
    }

    pub fn graph(&self) -> &LayerGraph {
        &self.graph
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind() == kind).count()
    }

    /// Solution file, relative to the root.
    pub fn solution_file(&self) -> PathBuf {
        solution_file(self.options.project_name())
    }

    /// Check the ordering invariant: the solution exists before any project,
    /// a project exists before it joins the solution, and both ends of a
    /// reference have joined the solution before the reference is added.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut solution = false;
        let mut created = HashSet::new();
        let mut joined = HashSet::new();

        let out_of_order = |index: usize, reason: String| DomainError::PlanOrdering {
            step: index + 1,
            reason,
        };

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::CreateSolution { .. } => {
                    if solution {
                        return Err(out_of_order(index, "solution created twice".into()));
                    }
                    solution = true;
                }
                Step::CreateProject { layer, .. } => {
                    if !solution {
                        return Err(out_of_order(
                            index,
                            format!("{layer} created before the solution"),
                        ));
                    }
                    created.insert(*layer);
                }
                Step::AddToSolution { layer, .. } => {
                    if !created.contains(layer) {
                        return Err(out_of_order(
                            index,
                            format!("{layer} added to the solution before it was created"),
                        ));
                    }
                    joined.insert(*layer);
                }
                Step::AddReference { from, to, .. } => {
                    if let Some(missing) = [from, to].into_iter().find(|l| !joined.contains(*l)) {
                        return Err(out_of_order(
                            index,
                            format!("reference {from} -> {to} added before {missing} joined the solution"),
                        ));
                    }
                }
                Step::WritePlaceholder { layer, .. } => {
                    if !created.contains(layer) {
                        return Err(out_of_order(
                            index,
                            format!("placeholder written before {layer} was created"),
                        ));
                    }
                }
                Step::PatchEntrypoint { .. } => {
                    if !created.contains(&LayerId::Presentation) {
                        return Err(out_of_order(
                            index,
                            "entry point patched before the presentation project exists".into(),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a ScaffoldPlan {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

pub(crate) fn solution_file(project_name: &str) -> PathBuf {
    PathBuf::from(format!("{project_name}.sln"))
}

/// Lowers options into a [`ScaffoldPlan`].
pub struct ScaffoldPlanner;

impl ScaffoldPlanner {
    /// Build the layer graph for `options` and lower it. Validation happens
    /// in [`ScaffoldPlanner::lower`].
    pub fn plan(options: &ScaffoldOptions) -> Result<ScaffoldPlan, DomainError> {
        Self::lower(LayerGraph::build(options), options)
    }

    /// Lower an existing graph. Emits, in order: create-solution,
    /// create-project per layer, add-to-solution per layer, add-reference
    /// per edge, placeholders, then the entry-point patch for Web APIs.
    pub fn lower(graph: LayerGraph, options: &ScaffoldOptions) -> Result<ScaffoldPlan, DomainError> {
        DomainValidator::validate_options(options)?;
        DomainValidator::validate_graph(&graph)?;

        let name = options.project_name();
        let solution = solution_file(name);
        let mut steps = Vec::new();

        steps.push(Step::CreateSolution {
            name: name.to_string(),
            directories: SOLUTION_DIRECTORIES.iter().map(PathBuf::from).collect(),
        });

        for layer in graph.layers() {
            steps.push(Step::CreateProject {
                layer: layer.id,
                template: layer.template_kind,
                name: layer.project_name.clone(),
                directory: layer.relative_path.as_path().to_path_buf(),
            });
        }

        for layer in graph.layers() {
            steps.push(Step::AddToSolution {
                layer: layer.id,
                solution: solution.clone(),
                project: layer.project_file(),
            });
        }

        for edge in graph.edges() {
            steps.push(Step::AddReference {
                from: edge.from,
                to: edge.to,
                project: graph.require(edge.from)?.project_file(),
                reference: graph.require(edge.to)?.project_file(),
            });
        }

        for placeholder in PLACEHOLDERS {
            let rendered = placeholder.render(&graph, name)?;
            steps.push(Step::WritePlaceholder {
                layer: rendered.layer,
                path: rendered.path,
                contents: rendered.contents,
            });
        }

        if options.presentation() == PresentationKind::WebApi {
            let web = graph.require(LayerId::Presentation)?;
            steps.push(Step::PatchEntrypoint {
                path: entrypoint_path(web.relative_path.as_path()),
            });
        }

        let plan = ScaffoldPlan {
            options: options.clone(),
            graph,
            steps,
        };
        plan.validate()?;
        Ok(plan)
    }
}

fn entrypoint_path(project_dir: &Path) -> PathBuf {
    project_dir.join(ENTRYPOINT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(presentation: PresentationKind, tests: bool) -> ScaffoldPlan {
        ScaffoldPlanner::plan(
            &ScaffoldOptions::new("Shop")
                .with_presentation(presentation)
                .with_tests(tests),
        )
        .unwrap()
    }

    fn position(plan: &ScaffoldPlan, pred: impl Fn(&Step) -> bool) -> usize {
        plan.steps().iter().position(pred).unwrap()
    }

    #[test]
    fn solution_comes_first() {
        let p = plan(PresentationKind::WebApi, true);
        assert_eq!(p.steps()[0].kind(), StepKind::CreateSolution);
        assert_eq!(p.count(StepKind::CreateSolution), 1);
        match &p.steps()[0] {
            Step::CreateSolution { name, directories } => {
                assert_eq!(name, "Shop");
                assert_eq!(directories, &vec![PathBuf::from("src"), PathBuf::from("tests")]);
            }
            other => panic!("unexpected first step: {other:?}"),
        }
    }

    #[test]
    fn steps_are_grouped_by_kind_in_phase_order() {
        let p = plan(PresentationKind::WebApi, true);
        let kinds: Vec<StepKind> = p.steps().iter().map(Step::kind).collect();
        let mut phases = kinds.clone();
        phases.dedup();
        assert_eq!(
            phases,
            vec![
                StepKind::CreateSolution,
                StepKind::CreateProject,
                StepKind::AddToSolution,
                StepKind::AddReference,
                StepKind::WritePlaceholder,
                StepKind::PatchEntrypoint,
            ]
        );
    }

    #[test]
    fn references_follow_both_solution_additions() {
        for presentation in PresentationKind::ALL {
            for tests in [true, false] {
                let p = plan(presentation, tests);
                for edge in p.graph().edges() {
                    let reference = position(&p, |s| {
                        matches!(s, Step::AddReference { from, to, .. } if *from == edge.from && *to == edge.to)
                    });
                    for end in [edge.from, edge.to] {
                        let joined = position(&p, |s| {
                            matches!(s, Step::AddToSolution { layer, .. } if *layer == end)
                        });
                        assert!(joined < reference, "{end} must join before {reference}");
                    }
                }
            }
        }
    }

    #[test]
    fn every_project_is_created_before_joining() {
        let p = plan(PresentationKind::Console, true);
        for layer in p.graph().layers() {
            let created = position(&p, |s| {
                matches!(s, Step::CreateProject { layer: l, .. } if *l == layer.id)
            });
            let joined = position(&p, |s| {
                matches!(s, Step::AddToSolution { layer: l, .. } if *l == layer.id)
            });
            assert!(created < joined);
        }
    }

    #[test]
    fn webapi_without_tests_scenario() {
        let p = plan(PresentationKind::WebApi, false);
        let created: Vec<LayerId> = p
            .steps()
            .iter()
            .filter_map(|s| match s {
                Step::CreateProject { layer, .. } => Some(*layer),
                _ => None,
            })
            .collect();
        assert_eq!(
            created,
            vec![
                LayerId::Domain,
                LayerId::Application,
                LayerId::Infrastructure,
                LayerId::Presentation
            ]
        );
        assert_eq!(p.count(StepKind::PatchEntrypoint), 1);
        assert_eq!(
            p.steps().last(),
            Some(&Step::PatchEntrypoint {
                path: PathBuf::from("src/WebUI/Program.cs")
            })
        );
    }

    #[test]
    fn no_presentation_with_tests_scenario() {
        let p = plan(PresentationKind::None, true);
        assert_eq!(p.count(StepKind::CreateProject), 6);
        assert_eq!(p.count(StepKind::PatchEntrypoint), 0);
        assert!(p.steps().iter().all(|s| !matches!(
            s,
            Step::AddReference { from: LayerId::Presentation, .. }
                | Step::AddReference { to: LayerId::Presentation, .. }
        )));
    }

    #[test]
    fn console_presentation_is_not_patched() {
        let p = plan(PresentationKind::Console, false);
        assert_eq!(p.count(StepKind::CreateProject), 4);
        assert_eq!(p.count(StepKind::PatchEntrypoint), 0);
    }

    #[test]
    fn placeholders_target_domain_and_application() {
        let p = plan(PresentationKind::None, false);
        let layers: Vec<LayerId> = p
            .steps()
            .iter()
            .filter_map(|s| match s {
                Step::WritePlaceholder { layer, .. } => Some(*layer),
                _ => None,
            })
            .collect();
        assert_eq!(layers, vec![LayerId::Domain, LayerId::Application]);
    }

    #[test]
    fn reference_steps_carry_project_files() {
        let p = plan(PresentationKind::None, false);
        let first = p
            .steps()
            .iter()
            .find(|s| s.kind() == StepKind::AddReference)
            .unwrap();
        assert_eq!(
            first,
            &Step::AddReference {
                from: LayerId::Application,
                to: LayerId::Domain,
                project: PathBuf::from("src/Application/Shop.Application.csproj"),
                reference: PathBuf::from("src/Domain/Shop.Domain.csproj"),
            }
        );
    }

    #[test]
    fn invalid_name_produces_no_plan() {
        let err = ScaffoldPlanner::plan(&ScaffoldOptions::new("")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOptions { .. }));
        assert!(ScaffoldPlanner::plan(&ScaffoldOptions::new("my shop")).is_err());
    }

    #[test]
    fn validate_rejects_reordered_plan() {
        let mut p = plan(PresentationKind::None, false);
        let first_reference = position(&p, |s| s.kind() == StepKind::AddReference);
        let first_join = position(&p, |s| s.kind() == StepKind::AddToSolution);
        p.steps.swap(first_join, first_reference);
        assert!(matches!(
            p.validate(),
            Err(DomainError::PlanOrdering { .. })
        ));
    }

    #[test]
    fn step_display_is_human_readable() {
        let p = plan(PresentationKind::WebApi, false);
        assert_eq!(p.steps()[0].to_string(), "create solution Shop.sln");
        assert_eq!(
            p.steps()[1].to_string(),
            "create classlib project Shop.Domain in src/Domain"
        );
    }
}
