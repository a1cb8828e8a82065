//! Layer registry.
//!
//! Every generated project is described exactly once by a [`LayerDef`], and
//! every project-to-project reference exactly once in [`REFERENCE_RULES`].
//! The layer graph, the plan, and the dry-run output all derive from these
//! two tables.
//!
//! # Adding a Layer
//!
//! 1. Add a variant to `LayerId` in `value_objects.rs`
//! 2. Add one [`LayerDef`] entry to [`LAYER_REGISTRY`]
//! 3. Add its references to [`REFERENCE_RULES`]

use crate::domain::value_objects::{LayerId, PresentationKind, TemplateKind};

/// What part a layer plays in the solution, which decides both its template
/// and whether it is generated at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    /// Class library, always generated.
    Core,
    /// Entry project whose template follows the presentation option.
    Presentation,
    /// Test project, generated only when tests are requested.
    Tests,
}

impl LayerRole {
    /// Template for this role under the given options, or `None` when the
    /// layer is excluded.
    pub fn template_for(
        self,
        presentation: PresentationKind,
        include_tests: bool,
    ) -> Option<TemplateKind> {
        match self {
            Self::Core => Some(TemplateKind::ClassLib),
            Self::Presentation => presentation.template(),
            Self::Tests => include_tests.then_some(TemplateKind::TestSuite),
        }
    }
}

/// Static description of one generated project.
#[derive(Debug, Clone, Copy)]
pub struct LayerDef {
    pub id: LayerId,
    pub role: LayerRole,
    /// Appended to the solution name to form the project (assembly) name.
    pub project_suffix: &'static str,
    /// Output directory, relative to the solution root.
    pub directory: &'static str,
}

/// Single source of truth for the generated projects.
///
/// Order is significant: projects are created and added to the solution in
/// this order (library layers, presentation, test layers).
pub static LAYER_REGISTRY: &[LayerDef] = &[
    LayerDef {
        id: LayerId::Domain,
        role: LayerRole::Core,
        project_suffix: "Domain",
        directory: "src/Domain",
    },
    LayerDef {
        id: LayerId::Application,
        role: LayerRole::Core,
        project_suffix: "Application",
        directory: "src/Application",
    },
    LayerDef {
        id: LayerId::Infrastructure,
        role: LayerRole::Core,
        project_suffix: "Infrastructure",
        directory: "src/Infrastructure",
    },
    LayerDef {
        id: LayerId::Presentation,
        role: LayerRole::Presentation,
        project_suffix: "WebUI",
        directory: "src/WebUI",
    },
    LayerDef {
        id: LayerId::DomainUnitTests,
        role: LayerRole::Tests,
        project_suffix: "Domain.UnitTests",
        directory: "tests/Domain.UnitTests",
    },
    LayerDef {
        id: LayerId::ApplicationUnitTests,
        role: LayerRole::Tests,
        project_suffix: "Application.UnitTests",
        directory: "tests/Application.UnitTests",
    },
    LayerDef {
        id: LayerId::ApplicationIntegrationTests,
        role: LayerRole::Tests,
        project_suffix: "Application.IntegrationTests",
        directory: "tests/Application.IntegrationTests",
    },
];

/// Directories created next to the solution file before any project.
pub static SOLUTION_DIRECTORIES: &[&str] = &["src", "tests"];

/// `(from, to)`: `from`'s project references `to`'s project.
///
/// A rule only becomes an edge when both endpoints are included.
pub static REFERENCE_RULES: &[(LayerId, LayerId)] = &[
    (LayerId::Application, LayerId::Domain),
    (LayerId::Infrastructure, LayerId::Domain),
    (LayerId::Infrastructure, LayerId::Application),
    (LayerId::Presentation, LayerId::Application),
    (LayerId::Presentation, LayerId::Infrastructure),
    (LayerId::DomainUnitTests, LayerId::Domain),
    (LayerId::ApplicationUnitTests, LayerId::Application),
    (LayerId::ApplicationIntegrationTests, LayerId::Application),
];

pub fn find_layer(id: LayerId) -> Option<&'static LayerDef> {
    LAYER_REGISTRY.iter().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_registry_integrity() {
        for (i, def) in LAYER_REGISTRY.iter().enumerate() {
            assert!(
                LAYER_REGISTRY[i + 1..].iter().all(|other| other.id != def.id),
                "layer {} registered twice",
                def.id
            );
            assert!(
                !def.directory.starts_with('/'),
                "layer {} has an absolute directory",
                def.id
            );
            assert!(
                SOLUTION_DIRECTORIES
                    .iter()
                    .any(|root| def.directory.starts_with(&format!("{root}/"))),
                "layer {} lives outside the solution directories",
                def.id
            );
        }

        for (from, to) in REFERENCE_RULES {
            assert_ne!(from, to, "layer {from} references itself");
            assert!(find_layer(*from).is_some(), "rule source {from} not registered");
            assert!(find_layer(*to).is_some(), "rule target {to} not registered");
        }
    }

    #[test]
    fn registry_is_internally_consistent() {
        assert_registry_integrity();
    }

    #[test]
    fn core_layers_are_always_class_libraries() {
        for presentation in PresentationKind::ALL {
            for tests in [true, false] {
                assert_eq!(
                    LayerRole::Core.template_for(presentation, tests),
                    Some(TemplateKind::ClassLib)
                );
            }
        }
    }

    #[test]
    fn presentation_role_follows_option() {
        assert_eq!(
            LayerRole::Presentation.template_for(PresentationKind::Console, false),
            Some(TemplateKind::Console)
        );
        assert_eq!(
            LayerRole::Presentation.template_for(PresentationKind::None, true),
            None
        );
    }

    #[test]
    fn test_role_requires_flag() {
        assert_eq!(
            LayerRole::Tests.template_for(PresentationKind::WebApi, false),
            None
        );
        assert_eq!(
            LayerRole::Tests.template_for(PresentationKind::WebApi, true),
            Some(TemplateKind::TestSuite)
        );
    }

    #[test]
    fn presentation_lives_in_webui() {
        let def = find_layer(LayerId::Presentation).unwrap();
        assert_eq!(def.project_suffix, "WebUI");
        assert_eq!(def.directory, "src/WebUI");
    }

    #[test]
    fn every_test_layer_has_exactly_one_reference() {
        for def in LAYER_REGISTRY.iter().filter(|d| d.role == LayerRole::Tests) {
            let count = REFERENCE_RULES.iter().filter(|(from, _)| *from == def.id).count();
            assert_eq!(count, 1, "test layer {} should target one layer", def.id);
        }
    }
}
