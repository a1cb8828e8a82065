//! Domain value objects: PresentationKind, TemplateKind, LayerId.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Which layers exist and how they reference each other lives in
//! `registry.rs`. This file's only job is to define the types, their
//! string representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PresentationKind ─────────────────────────────────────────────────────────

/// Which presentation project, if any, the solution gets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationKind {
    #[default]
    WebApi,
    Console,
    None,
}

impl PresentationKind {
    pub const ALL: [PresentationKind; 3] = [Self::WebApi, Self::Console, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WebApi => "webapi",
            Self::Console => "console",
            Self::None => "none",
        }
    }

    /// Template used to generate the presentation project, or `None` when
    /// the presentation layer is left out.
    pub const fn template(&self) -> Option<TemplateKind> {
        match self {
            Self::WebApi => Some(TemplateKind::WebApi),
            Self::Console => Some(TemplateKind::Console),
            Self::None => None,
        }
    }
}

impl fmt::Display for PresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresentationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "webapi" => Ok(Self::WebApi),
            "console" => Ok(Self::Console),
            "none" => Ok(Self::None),
            _ => Err(DomainError::InvalidOptions {
                field: "presentation",
                value: s.to_string(),
                reason: "expected one of: webapi, console, none".into(),
            }),
        }
    }
}

// ── TemplateKind ─────────────────────────────────────────────────────────────

/// Project template handed to the toolchain's `new` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    #[serde(rename = "classlib")]
    ClassLib,
    #[serde(rename = "webapi")]
    WebApi,
    #[serde(rename = "console")]
    Console,
    #[serde(rename = "xunit")]
    TestSuite,
}

impl TemplateKind {
    /// Short name understood by `dotnet new`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClassLib => "classlib",
            Self::WebApi => "webapi",
            Self::Console => "console",
            Self::TestSuite => "xunit",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── LayerId ──────────────────────────────────────────────────────────────────

/// Symbolic name of one generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayerId {
    Domain,
    Application,
    Infrastructure,
    Presentation,
    #[serde(rename = "Domain.UnitTests")]
    DomainUnitTests,
    #[serde(rename = "Application.UnitTests")]
    ApplicationUnitTests,
    #[serde(rename = "Application.IntegrationTests")]
    ApplicationIntegrationTests,
}

impl LayerId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "Domain",
            Self::Application => "Application",
            Self::Infrastructure => "Infrastructure",
            Self::Presentation => "Presentation",
            Self::DomainUnitTests => "Domain.UnitTests",
            Self::ApplicationUnitTests => "Application.UnitTests",
            Self::ApplicationIntegrationTests => "Application.IntegrationTests",
        }
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Domain,
            Self::Application,
            Self::Infrastructure,
            Self::Presentation,
            Self::DomainUnitTests,
            Self::ApplicationUnitTests,
            Self::ApplicationIntegrationTests,
        ]
        .into_iter()
        .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| DomainError::UnknownLayer(s.to_string()))
    }
}
