//! The Masala document model.
//!
//! These types mirror the serialized AST produced by the language service.
//! Every element is a JSON object tagged with `$type`; unknown bookkeeping
//! fields (`$container`, `$textRegion`, ...) are ignored.
//!
//! ```text
//! Domainmodel
//! ├── DataType            datatype String
//! ├── Entity              entity Post extends HasAuthor { ... }
//! │   └── Feature         many comments: Comment
//! ├── PackageDeclaration  package complex { ... }
//! │   └── (any element, recursively)
//! ├── Person              person Alice
//! └── Greeting            Hello Alice!
//! ```

use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use masala_core::identifier::Id;

use crate::{
    error::{DocumentError, Result},
    reference::{CrossRef, NodePath, Resolution},
};

/// The discriminant shared by every node in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Domainmodel,
    DataType,
    Entity,
    Feature,
    PackageDeclaration,
    Person,
    Greeting,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A leaf type declaration: `datatype String`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataType {
    name: Id,
}

impl DataType {
    pub fn new(name: Id) -> Self {
        Self { name }
    }

    pub fn name(&self) -> Id {
        self.name
    }
}

/// An entity with ordered features and an optional supertype.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entity {
    name: Id,
    #[serde(default)]
    features: Vec<Feature>,
    #[serde(rename = "superType", default)]
    super_type: Option<CrossRef>,
}

impl Entity {
    pub fn new(name: Id, features: Vec<Feature>, super_type: Option<CrossRef>) -> Self {
        Self {
            name,
            features,
            super_type,
        }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// The `extends` clause, if one was written.
    pub fn super_type(&self) -> Option<&CrossRef> {
        self.super_type.as_ref()
    }
}

/// A typed attribute of an entity: `many comments: Comment`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    name: Id,
    #[serde(rename = "type")]
    type_ref: CrossRef,
    #[serde(default)]
    many: bool,
}

impl Feature {
    pub fn new(name: Id, type_ref: CrossRef, many: bool) -> Self {
        Self {
            name,
            type_ref,
            many,
        }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn type_ref(&self) -> &CrossRef {
        &self.type_ref
    }

    pub fn is_many(&self) -> bool {
        self.many
    }
}

/// A named container of nested elements: `package complex { ... }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageDeclaration {
    name: Id,
    #[serde(default)]
    elements: Vec<Element>,
}

impl PackageDeclaration {
    pub fn new(name: Id, elements: Vec<Element>) -> Self {
        Self { name, elements }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

/// `person Alice`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    name: Id,
}

impl Person {
    pub fn new(name: Id) -> Self {
        Self { name }
    }

    pub fn name(&self) -> Id {
        self.name
    }
}

/// `Hello Alice!`, a directed relation from the greeting to a person.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Greeting {
    person: CrossRef,
}

impl Greeting {
    pub fn new(person: CrossRef) -> Self {
        Self { person }
    }

    pub fn person(&self) -> &CrossRef {
        &self.person
    }
}

/// Any element that can appear in a document or package body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "$type")]
pub enum Element {
    DataType(DataType),
    Entity(Entity),
    PackageDeclaration(PackageDeclaration),
    Person(Person),
    Greeting(Greeting),
}

impl Element {
    pub fn kind(&self) -> NodeKind {
        match self {
            Element::DataType(_) => NodeKind::DataType,
            Element::Entity(_) => NodeKind::Entity,
            Element::PackageDeclaration(_) => NodeKind::PackageDeclaration,
            Element::Person(_) => NodeKind::Person,
            Element::Greeting(_) => NodeKind::Greeting,
        }
    }

    /// The element's declared name. Greetings are anonymous.
    pub fn name(&self) -> Option<Id> {
        match self {
            Element::DataType(d) => Some(d.name()),
            Element::Entity(e) => Some(e.name()),
            Element::PackageDeclaration(p) => Some(p.name()),
            Element::Person(p) => Some(p.name()),
            Element::Greeting(_) => None,
        }
    }
}

/// A node reached by following a [`NodePath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Element(&'a Element),
    Feature(&'a Feature),
}

/// What a feature's `type` may point at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeRef<'a> {
    DataType(&'a DataType),
    Entity(&'a Entity),
}

impl TypeRef<'_> {
    pub fn name(&self) -> Id {
        match self {
            TypeRef::DataType(d) => d.name(),
            TypeRef::Entity(e) => e.name(),
        }
    }
}

/// The document root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    #[serde(rename = "$type")]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    elements: Vec<Element>,
}

impl Document {
    /// Deserialize a serialized AST.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the content is not JSON, if a required
    /// field is missing or empty, if an element has an unknown `$type`, or if
    /// the root is not a `Domainmodel`.
    pub fn from_json(content: &str) -> Result<Self> {
        trace!(content; "Deserializing document");
        let document: Document = serde_json::from_str(content)?;

        if document.kind != "Domainmodel" {
            return Err(DocumentError::UnexpectedRoot {
                found: document.kind,
            });
        }

        debug!(elements_len = document.elements.len(); "Document deserialized");
        Ok(document)
    }

    /// Build a document directly from elements.
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            kind: "Domainmodel".to_string(),
            name: None,
            elements,
        }
    }

    /// The optional document name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Follow a containment path from the root.
    ///
    /// Returns `None` if any step leaves the document.
    pub fn lookup(&self, path: &NodePath) -> Option<NodeRef<'_>> {
        let (first, rest) = path.segments().split_first()?;
        if first.property() != "elements" {
            return None;
        }
        let mut node = NodeRef::Element(self.elements.get(first.index()?)?);

        for segment in rest {
            let index = segment.index()?;
            node = match (node, segment.property()) {
                (NodeRef::Element(Element::PackageDeclaration(p)), "elements") => {
                    NodeRef::Element(p.elements().get(index)?)
                }
                (NodeRef::Element(Element::Entity(e)), "features") => {
                    NodeRef::Feature(e.features().get(index)?)
                }
                _ => return None,
            };
        }

        Some(node)
    }

    /// Resolve a reference that must point at an [`Entity`].
    pub fn resolve_entity(&self, reference: &CrossRef) -> Resolution<&Entity> {
        match self.lookup_target(reference) {
            Some(NodeRef::Element(Element::Entity(entity))) => Resolution::Resolved(entity),
            _ => Resolution::Unresolved,
        }
    }

    /// Resolve a feature type, which may be a [`DataType`] or an [`Entity`].
    pub fn resolve_type(&self, reference: &CrossRef) -> Resolution<TypeRef<'_>> {
        match self.lookup_target(reference) {
            Some(NodeRef::Element(Element::DataType(data_type))) => {
                Resolution::Resolved(TypeRef::DataType(data_type))
            }
            Some(NodeRef::Element(Element::Entity(entity))) => {
                Resolution::Resolved(TypeRef::Entity(entity))
            }
            _ => Resolution::Unresolved,
        }
    }

    /// Resolve a reference that must point at a [`Person`].
    pub fn resolve_person(&self, reference: &CrossRef) -> Resolution<&Person> {
        match self.lookup_target(reference) {
            Some(NodeRef::Element(Element::Person(person))) => Resolution::Resolved(person),
            _ => Resolution::Unresolved,
        }
    }

    fn lookup_target(&self, reference: &CrossRef) -> Option<NodeRef<'_>> {
        reference.target().and_then(|path| self.lookup(path))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn blog() -> Document {
        let content = json!({
            "$type": "Domainmodel",
            "elements": [
                { "$type": "DataType", "name": "String" },
                { "$type": "PackageDeclaration", "name": "complex", "elements": [
                    { "$type": "DataType", "name": "Date" }
                ]},
                { "$type": "Entity", "name": "HasAuthor", "features": [
                    { "$type": "Feature", "name": "author", "many": false,
                      "type": { "$ref": "#/elements@0", "$refText": "String" } }
                ]},
                { "$type": "Entity", "name": "Post",
                  "superType": { "$ref": "#/elements@2", "$refText": "HasAuthor" },
                  "features": [
                    { "$type": "Feature", "name": "date",
                      "type": { "$ref": "#/elements@1/elements@0", "$refText": "complex.Date" } }
                ]}
            ]
        });
        Document::from_json(&content.to_string()).unwrap()
    }

    #[test]
    fn test_from_json_reads_all_kinds() {
        let document = blog();
        let kinds: Vec<_> = document.elements().iter().map(Element::kind).collect();
        assert_eq!(
            kinds,
            [
                NodeKind::DataType,
                NodeKind::PackageDeclaration,
                NodeKind::Entity,
                NodeKind::Entity
            ]
        );
    }

    #[test]
    fn test_feature_many_defaults_to_false() {
        let document = blog();
        let Element::Entity(post) = &document.elements()[3] else {
            panic!("expected entity");
        };
        assert!(!post.features()[0].is_many());
    }

    #[test]
    fn test_resolve_entity_and_nested_data_type() {
        let document = blog();
        let Element::Entity(post) = &document.elements()[3] else {
            panic!("expected entity");
        };

        let super_type = document.resolve_entity(post.super_type().unwrap());
        assert_eq!(super_type.ok().map(Entity::name), Some(Id::new("HasAuthor")));

        let date = document.resolve_type(post.features()[0].type_ref());
        assert_eq!(date.ok().map(|t| t.name()), Some(Id::new("Date")));
    }

    #[test]
    fn test_resolve_wrong_kind_is_unresolved() {
        let document = blog();
        let points_at_datatype = CrossRef::linked("String", NodePath::root().child("elements", 0));

        assert_eq!(
            document.resolve_entity(&points_at_datatype),
            Resolution::Unresolved
        );
    }

    #[test]
    fn test_resolve_type_accepts_data_types_and_entities() {
        let document = blog();
        let to_string = CrossRef::linked("String", NodePath::root().child("elements", 0));
        let to_entity = CrossRef::linked("HasAuthor", NodePath::root().child("elements", 2));
        let to_package = CrossRef::linked("complex", NodePath::root().child("elements", 1));

        assert!(matches!(
            document.resolve_type(&to_string),
            Resolution::Resolved(TypeRef::DataType(d)) if d.name() == "String"
        ));
        assert!(matches!(
            document.resolve_type(&to_entity),
            Resolution::Resolved(TypeRef::Entity(e)) if e.name() == "HasAuthor"
        ));
        assert_eq!(document.resolve_type(&to_package), Resolution::Unresolved);
    }

    #[test]
    fn test_resolve_out_of_range_is_unresolved() {
        let document = blog();
        let dangling = CrossRef::linked("Ghost", NodePath::root().child("elements", 42));

        assert!(!document.resolve_entity(&dangling).is_resolved());
    }

    #[test]
    fn test_lookup_feature() {
        let document = blog();
        let path = NodePath::root().child("elements", 2).child("features", 0);

        match document.lookup(&path) {
            Some(NodeRef::Feature(feature)) => assert_eq!(feature.name(), "author"),
            other => panic!("expected feature, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_root_is_rejected() {
        let err = Document::from_json(r#"{"$type": "Model", "elements": []}"#).unwrap_err();
        assert!(matches!(err, DocumentError::UnexpectedRoot { ref found } if found == "Model"));
    }

    #[test]
    fn test_missing_elements_is_malformed() {
        let err = Document::from_json(r#"{"$type": "Domainmodel"}"#).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }

    #[test]
    fn test_unknown_element_type_is_malformed() {
        let content = r#"{"$type": "Domainmodel", "elements": [{"$type": "Enum", "name": "Color"}]}"#;
        assert!(matches!(
            Document::from_json(content),
            Err(DocumentError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_name_is_malformed() {
        let content = r#"{"$type": "Domainmodel", "elements": [{"$type": "Entity", "name": ""}]}"#;
        assert!(matches!(
            Document::from_json(content),
            Err(DocumentError::Malformed(_))
        ));
    }
}
