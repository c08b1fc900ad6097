//! The error type for rejected documents.
//!
//! A [`DocumentError`] means the upstream collaborator sent something that is
//! not a Masala document at all. Imperfect-but-valid documents (dangling
//! references, duplicate names) never produce one; they produce
//! [`Diagnostic`]s instead.

use thiserror::Error;

use crate::error::{Diagnostic, ErrorCode};

/// A type alias for `Result<T, DocumentError>`.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Error raised when the serialized AST cannot be turned into a [`Document`](crate::ast::Document).
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unexpected root node `{found}`, expected `Domainmodel`")]
    UnexpectedRoot { found: String },
}

impl DocumentError {
    /// The error code this failure is reported under.
    pub fn code(&self) -> ErrorCode {
        match self {
            DocumentError::Malformed(_) => ErrorCode::E100,
            DocumentError::UnexpectedRoot { .. } => ErrorCode::E101,
        }
    }

    /// Render this error as a diagnostic so it can be listed alongside the
    /// language service's own diagnostics.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let help = match self {
            DocumentError::Malformed(_) => {
                "the language service sent an AST that does not match the Masala grammar"
            }
            DocumentError::UnexpectedRoot { .. } => {
                "only `Domainmodel` documents can be visualized"
            }
        };

        Diagnostic::error(self.to_string())
            .with_code(self.code())
            .with_source("masala")
            .with_help(help)
    }
}
