//! Where a diagnostic points.

use std::fmt;

use crate::{notification::Range, reference::NodePath};

/// The location a diagnostic is attached to.
///
/// Diagnostics raised by the external parser/linker arrive with a source
/// [`Range`]. Diagnostics raised by this crate's validator are attached to
/// the offending AST node through its [`NodePath`], since the serialized AST
/// does not carry source offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticTarget {
    /// An AST node inside the current snapshot.
    Node(NodePath),

    /// A source range, as delivered by the language service.
    Range(Range),
}

impl DiagnosticTarget {
    /// Returns the node path, if this target is a node.
    pub fn node(&self) -> Option<&NodePath> {
        match self {
            DiagnosticTarget::Node(path) => Some(path),
            DiagnosticTarget::Range(_) => None,
        }
    }

    /// Returns the source range, if this target is a range.
    pub fn range(&self) -> Option<Range> {
        match self {
            DiagnosticTarget::Range(range) => Some(*range),
            DiagnosticTarget::Node(_) => None,
        }
    }
}

impl fmt::Display for DiagnosticTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticTarget::Node(path) => write!(f, "{path}"),
            DiagnosticTarget::Range(range) => write!(f, "{range}"),
        }
    }
}
