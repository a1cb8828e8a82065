use crate::domain::{
    entities::{LayerGraph, ScaffoldOptions, ScaffoldPlan},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_options(options: &ScaffoldOptions) -> Result<(), DomainError> {
        options.validate()
    }

    pub fn validate_graph(graph: &LayerGraph) -> Result<(), DomainError> {
        graph.validate()
    }

    pub fn validate_plan(plan: &ScaffoldPlan) -> Result<(), DomainError> {
        plan.validate()
    }
}
