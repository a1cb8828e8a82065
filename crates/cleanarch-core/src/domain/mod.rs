//! Core domain layer for CleanArch.
//!
//! This module contains pure scaffolding logic with no I/O. Running the
//! toolchain and touching the filesystem happen through ports defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or network calls
//! - **Immutable values**: options, graphs and plans are built once per run
//! - **Data-driven**: layers and references live in static tables
//!   (`registry.rs`), not in control flow
//!
// Public API - what the world sees
pub mod entities;
pub mod entrypoint;
pub mod error;
pub mod placeholders;
pub mod registry;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    layer_graph::{LayerGraph, LayerSpec, ReferenceEdge},
    options::{ScaffoldOptions, validate_project_name},
    plan::{ScaffoldPlan, ScaffoldPlanner, Step, StepKind},
};

pub use entrypoint::{PatchOutcome, patch_entrypoint};
pub use error::{DomainError, ErrorCategory};
pub use value_objects::{LayerId, PresentationKind, TemplateKind};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Options → Graph → Plan
    // ========================================================================

    #[test]
    fn validator_rejects_bad_name_before_planning() {
        let options = ScaffoldOptions::new("9lives");
        assert!(DomainValidator::validate_options(&options).is_err());
    }

    #[test]
    fn plan_embeds_the_graph_it_was_lowered_from() {
        let options = ScaffoldOptions::new("Shop").with_tests(true);
        let plan = ScaffoldPlanner::plan(&options).unwrap();

        assert_eq!(plan.graph(), &LayerGraph::build(&options));
        assert_eq!(plan.options(), &options);
        assert!(DomainValidator::validate_plan(&plan).is_ok());
        assert!(DomainValidator::validate_graph(plan.graph()).is_ok());
    }

    #[test]
    fn solution_file_uses_project_name() {
        let plan = ScaffoldPlanner::plan(&ScaffoldOptions::new("Acme.Store")).unwrap();
        assert_eq!(plan.solution_file(), std::path::PathBuf::from("Acme.Store.sln"));
    }

    #[test]
    fn full_plan_step_counts() {
        // 1 solution + 7 projects + 7 joins + 8 references + 2 placeholders + 1 patch
        let plan = ScaffoldPlanner::plan(
            &ScaffoldOptions::new("Shop")
                .with_presentation(PresentationKind::WebApi)
                .with_tests(true),
        )
        .unwrap();
        assert_eq!(plan.len(), 26);
        assert_eq!(plan.count(StepKind::AddReference), 8);
    }

    #[test]
    fn minimal_plan_step_counts() {
        // 1 solution + 3 projects + 3 joins + 3 references + 2 placeholders
        let plan = ScaffoldPlanner::plan(
            &ScaffoldOptions::new("Shop").with_presentation(PresentationKind::None),
        )
        .unwrap();
        assert_eq!(plan.len(), 12);
    }
}
