//! Document-change notifications pushed by the language service.
//!
//! The language service sends one notification per edit. It carries the
//! serialized AST of the current document and the diagnostics its own
//! parser and linker produced. This module only describes that payload;
//! transporting it is the caller's business.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    ast::Document,
    error::{Diagnostic, DocumentError},
};

/// A zero-based line/character position, as in LSP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A source range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Range {
    /// Lines are printed one-based, the way editors number them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}-{}", self.start.line + 1, self.end.line + 1)
    }
}

/// A diagnostic as the language service sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LspDiagnostic {
    /// LSP `DiagnosticSeverity`: 1 error, 2 warning, 3 information, 4 hint.
    #[serde(default)]
    pub severity: Option<u8>,
    pub range: Range,
    pub message: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "code_as_string")]
    pub code: Option<String>,
}

/// LSP allows numeric or string diagnostic codes; both are kept as text.
fn code_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Text(text) => text,
        Code::Number(number) => number.to_string(),
    }))
}

/// One document-change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChange {
    /// The serialized AST (a JSON document, itself encoded as a string).
    pub content: String,
    #[serde(default)]
    pub diagnostics: Vec<LspDiagnostic>,
}

impl DocumentChange {
    /// Parse a notification from its JSON encoding.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deserialize the carried AST into a [`Document`].
    pub fn document(&self) -> Result<Document, DocumentError> {
        Document::from_json(&self.content)
    }

    /// The language service's diagnostics, converted.
    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.diagnostics.iter().cloned().map(Diagnostic::from)
    }

    /// Returns `true` if the language service reported at least one error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Some(1))
    }
}
