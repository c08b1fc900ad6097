//! Error types for Masala operations.
//!
//! This module provides the main error type [`MasalaError`] which wraps
//! the conditions under which a notification cannot be processed at all.
//! Semantic problems inside a well-formed document are never errors; they
//! end up as diagnostics on the [`Snapshot`](crate::Snapshot).

use std::io;

use thiserror::Error;

use masala_parser::DocumentError;

/// The main error type for Masala operations.
///
/// # Document Variants
///
/// The `Document` variant keeps the serialized AST it failed on, so a
/// reporter can show the offending content next to the error.
#[derive(Debug, Error)]
pub enum MasalaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid notification: {0}")]
    Notification(DocumentError),

    #[error("{err}")]
    Document { err: DocumentError, src: String },
}

impl MasalaError {
    /// Create a new `Document` error with the content it was raised for.
    pub fn new_document_error(err: DocumentError, src: impl Into<String>) -> Self {
        Self::Document {
            err,
            src: src.into(),
        }
    }
}
