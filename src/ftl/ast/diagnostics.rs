//! Diagnostic collection for editor and CLI reporting
//!
//! Parse errors live on the junk entries that replaced the malformed text. This module turns
//! them into a flat list of [`Diagnostic`]s, and adds warnings for things that parse fine but
//! are most likely mistakes:
//!
//! 1. **Errors**: every junk entry, with the error's code
//! 2. **Duplicate ids**: a message or term defined more than once (the first definition wins
//!    on lookup)
//! 3. **Duplicate attributes**: an attribute name repeated within one entry

use super::elements::{Attribute, Entry, Resource};
use super::range::Range;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub code: Option<String>,
    pub source: String,
}

impl Diagnostic {
    pub fn new(range: Range, severity: DiagnosticSeverity, message: String) -> Self {
        Self {
            range,
            severity,
            message,
            code: None,
            source: "ftl".to_string(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} at {}",
            self.severity, self.source, self.message, self.range.start
        )
    }
}

impl Resource {
    /// All diagnostics for this resource, errors first, each group in source order
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = collect_errors(self);
        diagnostics.extend(validate_duplicate_ids(self));
        diagnostics.extend(validate_duplicate_attributes(self));
        diagnostics
    }
}

pub fn collect_errors(resource: &Resource) -> Vec<Diagnostic> {
    resource
        .junk()
        .map(|junk| {
            Diagnostic::new(
                junk.location.clone(),
                DiagnosticSeverity::Error,
                junk.error.to_string(),
            )
            .with_code(junk.error.code())
        })
        .collect()
}

pub fn validate_duplicate_ids(resource: &Resource) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    let mut diagnostics = Vec::new();
    for entry in &resource.body {
        let Some(id) = entry.id() else { continue };
        if !seen.insert(id.clone()) {
            diagnostics.push(
                Diagnostic::new(
                    entry.location().clone(),
                    DiagnosticSeverity::Warning,
                    format!("`{}` is already defined earlier in the resource", id),
                )
                .with_code("duplicate-id"),
            );
        }
    }
    diagnostics
}

pub fn validate_duplicate_attributes(resource: &Resource) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for entry in &resource.body {
        let attributes: &[Attribute] = match entry {
            Entry::Message(message) => &message.attributes,
            Entry::Term(term) => &term.attributes,
            _ => continue,
        };
        let mut seen = HashSet::new();
        for attribute in attributes {
            if !seen.insert(attribute.id.name.as_str()) {
                diagnostics.push(
                    Diagnostic::new(
                        attribute.location.clone(),
                        DiagnosticSeverity::Warning,
                        format!("attribute `.{}` is repeated", attribute.id.name),
                    )
                    .with_code("duplicate-attribute"),
                );
            }
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftl::parsing::parse_resource;

    #[test]
    fn test_clean_resource_has_no_diagnostics() {
        let resource = parse_resource("a = A\n-b = B\n");
        assert!(resource.diagnostics().is_empty());
    }

    #[test]
    fn test_junk_becomes_error() {
        let resource = parse_resource("a = A\n!!!\nb = B\n");
        let diagnostics = resource.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Error);
        assert_eq!(diagnostics[0].code.as_deref(), Some("unfinished-line"));
        assert_eq!(diagnostics[0].range.start.line, 1);
    }

    #[test]
    fn test_duplicates_are_warnings() {
        let resource = parse_resource("a = A\na = B\n-a = C\nm = M\n    .x = 1\n    .x = 2\n");
        let diagnostics = resource.diagnostics();
        let codes: Vec<_> = diagnostics
            .iter()
            .map(|d| d.code.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(codes, vec!["duplicate-id", "duplicate-attribute"]);
        assert!(diagnostics
            .iter()
            .all(|d| d.severity == DiagnosticSeverity::Warning));
        assert_eq!(diagnostics[0].range.start.line, 1);
    }
}
