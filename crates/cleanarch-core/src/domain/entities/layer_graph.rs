//! The layer graph: which projects a solution contains and which of them
//! reference each other.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{
    entities::{common::RelativePath, options::ScaffoldOptions},
    error::DomainError,
    registry::{LAYER_REGISTRY, LayerDef, REFERENCE_RULES},
    value_objects::{LayerId, TemplateKind},
};

/// One generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSpec {
    pub id: LayerId,
    pub template_kind: TemplateKind,
    pub relative_path: RelativePath,
    /// Assembly name, e.g. `Shop.Domain`.
    pub project_name: String,
}

impl LayerSpec {
    fn from_def(def: &LayerDef, template_kind: TemplateKind, solution: &str) -> Self {
        Self {
            id: def.id,
            template_kind,
            relative_path: RelativePath::new(def.directory),
            project_name: format!("{solution}.{}", def.project_suffix),
        }
    }

    /// Project file path relative to the solution root,
    /// e.g. `src/Domain/Shop.Domain.csproj`.
    pub fn project_file(&self) -> PathBuf {
        self.relative_path
            .as_path()
            .join(format!("{}.csproj", self.project_name))
    }
}

/// `from`'s project references `to`'s project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReferenceEdge {
    pub from: LayerId,
    pub to: LayerId,
}

/// Included layers and the reference edges between them, for one set of
/// options.
///
/// A layer is included exactly when it appears in [`LayerGraph::layers`];
/// the layers the options left out are listed by [`LayerGraph::excluded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerGraph {
    layers: Vec<LayerSpec>,
    edges: Vec<ReferenceEdge>,
    excluded: Vec<LayerId>,
}

impl LayerGraph {
    /// Build the graph for the given options. Pure and deterministic: layer
    /// and edge order follow the registry tables.
    pub fn build(options: &ScaffoldOptions) -> Self {
        let mut layers = Vec::new();
        let mut excluded = Vec::new();

        for def in LAYER_REGISTRY {
            match def
                .role
                .template_for(options.presentation(), options.include_tests())
            {
                Some(template) => {
                    layers.push(LayerSpec::from_def(def, template, options.project_name()))
                }
                None => excluded.push(def.id),
            }
        }

        let included: BTreeSet<LayerId> = layers.iter().map(|l| l.id).collect();
        let edges = REFERENCE_RULES
            .iter()
            .filter(|(from, to)| included.contains(from) && included.contains(to))
            .map(|&(from, to)| ReferenceEdge { from, to })
            .collect();

        Self {
            layers,
            edges,
            excluded,
        }
    }

    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    pub fn edges(&self) -> &[ReferenceEdge] {
        &self.edges
    }

    pub fn excluded(&self) -> &[LayerId] {
        &self.excluded
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layer(id).is_some()
    }

    /// Like [`Self::layer`] but for layers the caller requires.
    pub fn require(&self, id: LayerId) -> Result<&LayerSpec, DomainError> {
        self.layer(id)
            .ok_or_else(|| DomainError::UnknownLayer(id.to_string()))
    }

    /// Layers ordered so every layer comes after everything it references
    /// (Kahn's algorithm, ties broken by registry order).
    pub fn topological_order(&self) -> Result<Vec<LayerId>, DomainError> {
        // Outstanding references per layer.
        let mut pending: BTreeMap<LayerId, usize> =
            self.layers.iter().map(|l| (l.id, 0)).collect();
        for edge in &self.edges {
            *pending.entry(edge.from).or_default() += 1;
        }

        let mut order = Vec::with_capacity(pending.len());
        while order.len() < pending.len() {
            let next = self
                .layers
                .iter()
                .map(|l| l.id)
                .find(|id| !order.contains(id) && pending.get(id) == Some(&0));

            let Some(next) = next else {
                let stuck: Vec<String> = pending
                    .iter()
                    .filter(|(id, count)| **count > 0 && !order.contains(*id))
                    .map(|(id, _)| id.to_string())
                    .collect();
                return Err(DomainError::CyclicReference {
                    path: stuck.join(" -> "),
                });
            };

            order.push(next);
            for edge in self.edges.iter().filter(|e| e.to == next) {
                if let Some(count) = pending.get_mut(&edge.from) {
                    *count -= 1;
                }
            }
        }

        Ok(order)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(edge) = self.edges.iter().find(|e| e.from == e.to) {
            return Err(DomainError::CyclicReference {
                path: format!("{} -> {}", edge.from, edge.to),
            });
        }
        self.topological_order().map(|_| ())
    }
}
