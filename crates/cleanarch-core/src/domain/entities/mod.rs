pub mod common;
pub mod layer_graph;
pub mod options;
pub mod plan;

pub use crate::domain::DomainError;
pub use layer_graph::{LayerGraph, LayerSpec, ReferenceEdge};
pub use options::ScaffoldOptions;
pub use plan::{ScaffoldPlan, ScaffoldPlanner, Step, StepKind};
