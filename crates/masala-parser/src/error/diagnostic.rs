//! The core diagnostic type for the Masala error system.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! code, the node or range it is attached to, and optional help text.

use std::fmt;

use crate::{
    error::{DiagnosticTarget, ErrorCode, Severity},
    notification::LspDiagnostic,
};

/// The code carried by a diagnostic.
///
/// Diagnostics produced by this crate use [`ErrorCode`]; diagnostics
/// forwarded from the language service keep whatever code it sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticCode {
    Masala(ErrorCode),
    External(String),
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCode::Masala(code) => write!(f, "{code}"),
            DiagnosticCode::External(code) => f.write_str(code),
        }
    }
}

/// A diagnostic message with the location it refers to.
///
/// # Example
///
/// ```
/// # use masala_parser::error::{Diagnostic, ErrorCode};
/// # use masala_parser::reference::NodePath;
/// let path: NodePath = "/elements@2".parse().unwrap();
/// let diag = Diagnostic::error("Entity has non-unique name 'User' (2nd occurrence).")
///     .with_code(ErrorCode::E200)
///     .with_node(path)
///     .with_help("rename the entity or remove the duplicate");
///
/// assert_eq!(
///     diag.to_string(),
///     "error[E200]: Entity has non-unique name 'User' (2nd occurrence)."
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<DiagnosticCode>,
    message: String,
    target: Option<DiagnosticTarget>,
    source: Option<String>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the code, if any.
    pub fn code(&self) -> Option<&DiagnosticCode> {
        self.code.as_ref()
    }

    /// Get the Masala error code, if this diagnostic was raised by this crate.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self.code {
            Some(DiagnosticCode::Masala(code)) => Some(code),
            _ => None,
        }
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the node or range this diagnostic is attached to.
    pub fn target(&self) -> Option<&DiagnosticTarget> {
        self.target.as_ref()
    }

    /// Get the producer of this diagnostic (e.g. `masala`), if known.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set a Masala error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(DiagnosticCode::Masala(code));
        self
    }

    /// Attach this diagnostic to an AST node.
    pub fn with_node(mut self, path: crate::reference::NodePath) -> Self {
        self.target = Some(DiagnosticTarget::Node(path));
        self
    }

    /// Attach this diagnostic to a source range.
    pub fn with_range(mut self, range: crate::notification::Range) -> Self {
        self.target = Some(DiagnosticTarget::Range(range));
        self
    }

    /// Set the producer of this diagnostic.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            target: None,
            source: None,
            help: None,
        }
    }
}

impl From<LspDiagnostic> for Diagnostic {
    fn from(lsp: LspDiagnostic) -> Self {
        let LspDiagnostic {
            severity,
            range,
            message,
            source,
            code,
        } = lsp;

        Self {
            severity: Severity::from_lsp(severity),
            code: code.map(DiagnosticCode::External),
            message,
            target: Some(DiagnosticTarget::Range(range)),
            source,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E200]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = &self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
