//! Error adapter for converting Masala errors and diagnostics to miette reports.
//!
//! This module provides the bridge between the library's error and
//! diagnostic types and miette's rich formatting used in the CLI.
//!
//! Diagnostics carry no source text of their own (the DSL source stays with
//! the language service), so they are rendered with their location in the
//! message. A document that fails to deserialize is rendered against the
//! serialized AST, with the failing position labelled when it is known.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use masala::{Diagnostic, MasalaError, Severity};
use masala_parser::DocumentError;

/// Adapter for a single masala diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic) -> Self {
        Self { diag }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diag.target() {
            Some(target) => write!(f, "{target}: {}", self.diag.message()),
            None => write!(f, "{}", self.diag.message()),
        }
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display + 'a>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    /// The diagnostic's own help, followed by the producer that raised it.
    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match (self.diag.help(), self.diag.source()) {
            (Some(help), Some(source)) => format!("{help} (reported by {source})"),
            (Some(help), None) => help.to_string(),
            (None, Some(source)) => format!("reported by {source}"),
            (None, None) => return None,
        };
        Some(Box::new(help))
    }
}

/// Adapter for [`MasalaError`] variants.
pub struct ErrorAdapter<'a>(pub &'a MasalaError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            MasalaError::Io(_) => Some(Box::new("masala::io")),
            MasalaError::Notification(_) => Some(Box::new("masala::notification")),
            MasalaError::Document { err, .. } => Some(Box::new(err.code())),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            MasalaError::Document { err, .. } => err
                .to_diagnostic()
                .help()
                .map(|h| Box::new(h.to_string()) as Box<dyn fmt::Display + 'a>),
            MasalaError::Notification(_) => Some(Box::new(
                "expected a JSON object with a `content` string and optional `diagnostics`",
            )),
            MasalaError::Io(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            MasalaError::Document { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let MasalaError::Document {
            err: DocumentError::Malformed(json_err),
            src,
        } = &self.0
        else {
            return None;
        };

        let offset = offset_of(src, json_err.line(), json_err.column())?;
        let label = LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            SourceSpan::new(offset.into(), 0),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A diagnostic from the language service or the validator.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error that stopped processing.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn url<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.url(),
            Reportable::Error(e) => e.url(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an error into reportables.
pub fn to_reportables(err: &MasalaError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// Convert snapshot diagnostics into reportables, one per diagnostic.
pub fn diagnostics_to_reportables(diagnostics: &[Diagnostic]) -> Vec<Reportable<'_>> {
    diagnostics
        .iter()
        .map(|diag| Reportable::Diagnostic(DiagnosticAdapter::new(diag)))
        .collect()
}

/// Byte offset of a one-based line/column position, as serde_json reports it.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let line_len = src[line_start..].find('\n').unwrap_or(src.len() - line_start);
    Some(line_start + column.saturating_sub(1).min(line_len))
}

#[cfg(test)]
mod tests {
    use masala::Processor;

    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "{\n  \"a\": x\n}";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 2, 8), Some(9));
        assert_eq!(offset_of(src, 0, 0), None);
    }

    #[test]
    fn test_malformed_document_is_labelled() {
        let mut processor = Processor::default();
        let err = processor
            .apply_json(r#"{"content": "{\"$type\": \"Domainmodel\", \"elements\": [}"}"#)
            .unwrap_err();

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].code().map(|c| c.to_string()).as_deref(),
            Some("E100")
        );
        assert!(reportables[0].source_code().is_some());
        assert_eq!(reportables[0].labels().map(Iterator::count), Some(1));
    }

    #[test]
    fn test_diagnostic_severity_is_forwarded() {
        let warning = Diagnostic::warning("Person name should start with a capital.");
        let reportables = diagnostics_to_reportables(std::slice::from_ref(&warning));

        assert_eq!(reportables[0].severity(), Some(MietteSeverity::Warning));
        assert_eq!(
            reportables[0].to_string(),
            "Person name should start with a capital."
        );
        assert!(reportables[0].help().is_none());
    }

    #[test]
    fn test_producer_is_named_in_help_not_url() {
        let diag = Diagnostic::error("Entity has non-unique name 'User' (2nd occurrence).")
            .with_source("masala")
            .with_help("rename the entity");
        let reportables = diagnostics_to_reportables(std::slice::from_ref(&diag));

        assert!(reportables[0].url().is_none());
        assert_eq!(
            reportables[0].help().map(|h| h.to_string()).as_deref(),
            Some("rename the entity (reported by masala)")
        );

        let external = Diagnostic::error("Could not resolve reference.").with_source("masala-lsp");
        let reportables = diagnostics_to_reportables(std::slice::from_ref(&external));
        assert_eq!(
            reportables[0].help().map(|h| h.to_string()).as_deref(),
            Some("reported by masala-lsp")
        );
    }
}
