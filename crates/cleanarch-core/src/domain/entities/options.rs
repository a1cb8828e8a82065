//! User-supplied scaffold options.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{error::DomainError, value_objects::PresentationKind};

/// Identifiers reserved by C#; a segment equal to one of these cannot be a
/// namespace component.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Everything the user decides about one scaffold run.
///
/// Construction never fails; [`ScaffoldOptions::validate`] reports problems
/// so the caller sees exactly what was wrong instead of a silently cleaned
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaffoldOptions {
    project_name: String,
    presentation: PresentationKind,
    include_tests: bool,
}

impl ScaffoldOptions {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            presentation: PresentationKind::default(),
            include_tests: false,
        }
    }

    pub fn with_presentation(mut self, presentation: PresentationKind) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_tests(mut self, include_tests: bool) -> Self {
        self.include_tests = include_tests;
        self
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn presentation(&self) -> PresentationKind {
        self.presentation
    }

    pub fn include_tests(&self) -> bool {
        self.include_tests
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_project_name(&self.project_name)
    }
}

impl fmt::Display for ScaffoldOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (presentation={}, with_tests={})",
            self.project_name, self.presentation, self.include_tests
        )
    }
}

/// A project name must be a dotted C# identifier path, because it becomes
/// the root namespace and the prefix of every assembly name.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::invalid_name(name, "name cannot be empty"));
    }

    for segment in name.split('.') {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            return Err(DomainError::invalid_name(
                name,
                "name cannot contain empty segments (leading, trailing or doubled '.')",
            ));
        };

        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(DomainError::invalid_name(
                name,
                format!("segment '{segment}' must start with a letter or '_'"),
            ));
        }

        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(DomainError::invalid_name(
                name,
                format!("character '{bad}' is not allowed"),
            ));
        }

        if RESERVED_WORDS.contains(&segment) {
            return Err(DomainError::invalid_name(
                name,
                format!("'{segment}' is a reserved C# keyword"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let options = ScaffoldOptions::new("Shop");
        assert_eq!(options.presentation(), PresentationKind::WebApi);
        assert!(!options.include_tests());
    }

    #[test]
    fn valid_names_pass() {
        for name in ["Shop", "MyCompany.Billing", "_internal", "Api2", "Inventory_Api"] {
            assert!(validate_project_name(name).is_ok(), "failed for: {name}");
        }
    }

    #[test]
    fn empty_name_is_invalid() {
        assert!(matches!(
            validate_project_name(""),
            Err(DomainError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn illegal_characters_are_reported_not_stripped() {
        let err = validate_project_name("my-shop").unwrap_err();
        assert!(err.to_string().contains("'-'"), "got: {err}");

        assert!(validate_project_name("my shop").is_err());
        assert!(validate_project_name("shop/api").is_err());
    }

    #[test]
    fn segments_cannot_start_with_digit_or_be_empty() {
        assert!(validate_project_name("1Shop").is_err());
        assert!(validate_project_name("Shop.").is_err());
        assert!(validate_project_name(".Shop").is_err());
        assert!(validate_project_name("Shop..Api").is_err());
    }

    #[test]
    fn keywords_are_rejected() {
        assert!(validate_project_name("class").is_err());
        assert!(validate_project_name("Shop.namespace").is_err());
        // Case matters in C#.
        assert!(validate_project_name("Class").is_ok());
    }

    #[test]
    fn display_summarises_options() {
        let options = ScaffoldOptions::new("Shop")
            .with_presentation(PresentationKind::None)
            .with_tests(true);
        assert_eq!(
            options.to_string(),
            "Shop (presentation=none, with_tests=true)"
        );
    }
}
