//! Placeholder source files dropped into freshly generated projects so the
//! intended folder layout is visible from the first commit.

use std::path::PathBuf;

use crate::domain::{
    entities::LayerGraph, error::DomainError, value_objects::LayerId,
};

/// Substituted with the solution name when rendering.
pub const PROJECT_NAME_VAR: &str = "{{PROJECT_NAME}}";

#[derive(Debug, Clone, Copy)]
pub struct PlaceholderDef {
    pub layer: LayerId,
    /// Relative to the layer's directory.
    pub file: &'static str,
    pub template: &'static str,
}

pub static PLACEHOLDERS: &[PlaceholderDef] = &[
    PlaceholderDef {
        layer: LayerId::Domain,
        file: "Entities/PlaceholderEntity.cs",
        template: "namespace {{PROJECT_NAME}}.Domain.Entities { public class PlaceholderEntity { public int Id { get; set; } } }",
    },
    PlaceholderDef {
        layer: LayerId::Application,
        file: "UseCases/PlaceholderUseCase.cs",
        template: "namespace {{PROJECT_NAME}}.Application.UseCases { public class PlaceholderUseCase { } }",
    },
];

/// A placeholder ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPlaceholder {
    pub layer: LayerId,
    pub path: PathBuf,
    pub contents: String,
}

impl PlaceholderDef {
    pub fn render(
        &self,
        graph: &LayerGraph,
        project_name: &str,
    ) -> Result<RenderedPlaceholder, DomainError> {
        let layer = graph.require(self.layer)?;
        Ok(RenderedPlaceholder {
            layer: self.layer,
            path: layer.relative_path.join(self.file)?.into_path_buf(),
            contents: self.template.replace(PROJECT_NAME_VAR, project_name),
        })
    }
}
