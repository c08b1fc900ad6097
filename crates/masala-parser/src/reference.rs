//! Node paths and cross-references.
//!
//! Inside one snapshot every AST node is identified by the containment path
//! from the root, written the way Langium writes `$ref` fragments:
//! `/elements@1/features@0` is the first feature of the second top-level
//! element.
//!
//! A cross-reference (an entity's `superType`, a feature's `type`, a
//! greeting's `person`) either carries such a path or it does not. Whether
//! the path actually lands on a node of the expected kind is decided by
//! [`Document`](crate::ast::Document) at resolution time, which returns a
//! [`Resolution`] every consumer has to match on.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// One step of a [`NodePath`]: a containment property and, for list
/// properties, the index into the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    property: String,
    index: Option<usize>,
}

impl PathSegment {
    pub fn new(property: impl Into<String>, index: Option<usize>) -> Self {
        Self {
            property: property.into(),
            index,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}@{}", self.property, index),
            None => f.write_str(&self.property),
        }
    }
}

/// Error returned when a path fragment cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node path `{0}`")]
pub struct InvalidNodePath(String);

/// The containment path of a node inside a document.
///
/// The empty path is the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` for the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new path one list element deeper.
    pub fn child(&self, property: &str, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::new(property, Some(index)));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = InvalidNodePath;

    /// Parses `/elements@3/features@0`, with or without a leading document
    /// URI (`file:///blog.masala#/elements@3`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fragment = s.rsplit_once('#').map_or(s, |(_, fragment)| fragment);
        let invalid = || InvalidNodePath(s.to_string());

        let rest = fragment.strip_prefix('/').ok_or_else(invalid)?;
        if rest.is_empty() {
            return Ok(Self::root());
        }

        rest.split('/')
            .map(|segment| match segment.split_once('@') {
                Some((property, index)) if !property.is_empty() => index
                    .parse()
                    .map(|index| PathSegment::new(property, Some(index)))
                    .map_err(|_| invalid()),
                None if !segment.is_empty() => Ok(PathSegment::new(segment, None)),
                _ => Err(invalid()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// The serialized shape of a cross-reference.
#[derive(Debug, Deserialize)]
struct RawReference {
    #[serde(rename = "$ref", default)]
    target: Option<String>,
    #[serde(rename = "$refText", default)]
    text: Option<String>,
    #[serde(rename = "$error", default)]
    error: Option<String>,
}

/// A possibly-unresolved link from one AST node to another.
///
/// Linked references arrive as `{ "$ref": "#/elements@3", "$refText": "HasAuthor" }`;
/// references the linker could not resolve arrive as
/// `{ "$refText": "HasAuthr", "$error": "..." }`. A `$ref` that is not a
/// parseable path is kept as unresolved rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawReference")]
pub struct CrossRef {
    text: Option<String>,
    target: Option<NodePath>,
    error: Option<String>,
}

impl CrossRef {
    /// A reference the linker resolved to `target`.
    pub fn linked(text: impl Into<String>, target: NodePath) -> Self {
        Self {
            text: Some(text.into()),
            target: Some(target),
            error: None,
        }
    }

    /// A reference the linker could not resolve.
    pub fn dangling(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            target: None,
            error: None,
        }
    }

    /// The reference as written in source, if the serializer kept it.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The path the linker resolved this reference to, if any.
    pub fn target(&self) -> Option<&NodePath> {
        self.target.as_ref()
    }

    /// The linker's error message for unresolved references.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A stable key for counting references to the same target without
    /// resolving them: the source text, or the target path when the text
    /// was not serialized.
    ///
    /// Returns `None` when neither survived, since such a reference cannot be
    /// told apart from any other.
    pub fn key(&self) -> Option<String> {
        match (&self.text, &self.target) {
            (Some(text), _) => Some(text.clone()),
            (None, Some(path)) => Some(path.to_string()),
            (None, None) => None,
        }
    }
}

impl From<RawReference> for CrossRef {
    fn from(raw: RawReference) -> Self {
        let target = raw.target.as_deref().and_then(|t| t.parse().ok());
        Self {
            text: raw.text,
            target,
            error: raw.error,
        }
    }
}

/// The outcome of resolving a [`CrossRef`] against a document.
///
/// `T` is a borrow into the document, such as `&Entity` or a
/// [`TypeRef`](crate::ast::TypeRef).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<T> {
    Resolved(T),
    Unresolved,
}

impl<T> Resolution<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    /// Converts into an `Option`, dropping the unresolved case.
    pub fn ok(self) -> Option<T> {
        match self {
            Resolution::Resolved(target) => Some(target),
            Resolution::Unresolved => None,
        }
    }
}
