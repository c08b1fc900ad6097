//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] blocks the derived views; the user sees a
///   diagnostic listing instead of the tree or graph.
/// - [`Severity::Warning`] is advisory and never blocks rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A semantic or syntactic error in the document.
    Error,

    /// An advisory issue that does not prevent rendering.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// Maps an LSP `DiagnosticSeverity` number onto a severity.
    ///
    /// Only `1` is an error. Information (`3`) and hint (`4`) are advisory and
    /// collapse into [`Severity::Warning`], as does a missing value.
    pub fn from_lsp(value: Option<u8>) -> Self {
        match value {
            Some(1) => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
