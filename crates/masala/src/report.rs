//! The render gate and the diagnostic listing shown in place of a view.
//!
//! A snapshot with at least one error diagnostic does not show its tree or
//! graph. It shows a [`DiagnosticListing`] instead, one group per distinct
//! message, each entry with its location and producer:
//!
//! ```text
//! Entity has non-unique name 'User' (2nd occurrence).
//!   /elements@2: Entity has non-unique name 'User' (2nd occurrence).
//!     Source: masala | Code: E200
//! ```
//!
//! Warnings are listed too when the gate is closed, but they never close it.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use masala_parser::{Diagnostic, Severity};

use crate::{layout::EntityGraph, structure::TreeNode};

/// What a snapshot shows for a requested view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "lowercase")]
pub enum View<'a> {
    Tree(&'a TreeNode),
    Graph(&'a EntityGraph),
    Diagnostics(DiagnosticListing),
}

impl View<'_> {
    /// Returns `true` if the view was replaced by a diagnostic listing.
    pub fn is_gated(&self) -> bool {
        matches!(self, View::Diagnostics(_))
    }
}

/// One listed occurrence of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    severity: String,
    location: Option<String>,
    source: Option<String>,
    code: Option<String>,
}

impl ListingEntry {
    fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        Self {
            severity: diagnostic.severity().to_string(),
            location: diagnostic.target().map(ToString::to_string),
            source: diagnostic.source().map(str::to_string),
            code: diagnostic.code().map(ToString::to_string),
        }
    }

    pub fn severity(&self) -> &str {
        &self.severity
    }

    /// `Line <start>-<end>` for source ranges, the node path for AST nodes.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// Diagnostics grouped by message, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticListing {
    groups: IndexMap<String, Vec<ListingEntry>>,
}

impl DiagnosticListing {
    pub fn new<'d>(diagnostics: impl IntoIterator<Item = &'d Diagnostic>) -> Self {
        let mut groups: IndexMap<String, Vec<ListingEntry>> = IndexMap::new();
        for diagnostic in diagnostics {
            groups
                .entry(diagnostic.message().to_string())
                .or_default()
                .push(ListingEntry::from_diagnostic(diagnostic));
        }
        Self { groups }
    }

    /// Iterate over `(message, entries)` groups.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[ListingEntry])> {
        self.groups
            .iter()
            .map(|(message, entries)| (message.as_str(), entries.as_slice()))
    }

    /// Number of distinct messages.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of listed diagnostics.
    pub fn entries_len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl fmt::Display for DiagnosticListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (message, entries) in &self.groups {
            writeln!(f, "{message}")?;
            for entry in entries {
                match &entry.location {
                    Some(location) => writeln!(f, "  {location}: {message}")?,
                    None => writeln!(f, "  {}: {message}", entry.severity)?,
                }
                writeln!(
                    f,
                    "    Source: {} | Code: {}",
                    entry.source.as_deref().unwrap_or("-"),
                    entry.code.as_deref().unwrap_or("-"),
                )?;
            }
        }
        Ok(())
    }
}

/// Returns `true` if any diagnostic blocks the derived views.
pub fn is_gated(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity() == Severity::Error)
}
