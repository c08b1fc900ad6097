//! Mindmap-style containment tree.
//!
//! The tree view shows what a document declares and what each entity is made
//! of. It never fails: a reference that does not resolve is drawn as an
//! [`TreeKind::UnresolvedType`] leaf (feature types) or left out entirely
//! (supertypes).
//!
//! ```text
//! Domainmodel
//! ├── DataTypes
//! │   └── String
//! ├── Entities
//! │   └── Post
//! │       ├── title ── String
//! │       ├── comments[] ── Comment      (many)
//! │       └── HasAuthor                  (supertype)
//! │           └── author ── String
//! └── Packages
//!     └── complex
//!         └── ...
//! ```

use log::{debug, info, trace};
use serde::Serialize;

use masala_parser::{
    Document, NormalizedModel, Resolution, TypeRef,
    ast::{DataType, Element, Entity, Feature, Greeting, PackageDeclaration, Person},
};

/// The kind of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TreeKind {
    Domainmodel,
    /// One of the `DataTypes`, `Entities` or `Packages` groupings under the root.
    Category,
    DataType,
    Entity,
    Feature,
    Package,
    Person,
    Greeting,
    /// Stand-in for a feature type that did not resolve.
    UnresolvedType,
}

/// Presentation hints attached to a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// The feature holds a collection.
    Many,
    /// The node shows an entity's supertype.
    Supertype,
}

/// A node of the containment tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    name: String,
    kind: TreeKind,
    tags: Vec<Tag>,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// A node without tags or children.
    pub fn leaf(name: impl Into<String>, kind: TreeKind) -> Self {
        Self::branch(name, kind, Vec::new())
    }

    pub fn branch(name: impl Into<String>, kind: TreeKind, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            kind,
            tags: Vec::new(),
            children,
        }
    }

    /// Add a presentation tag.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Returns the first child with the given name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Number of nodes in this subtree, including this one.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::len).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Name shown for an unresolved reference whose text was not serialized.
const UNKNOWN: &str = "?";

/// Projects a document into a [`TreeNode`] hierarchy.
pub struct TreeBuilder<'a> {
    document: &'a Document,
}

impl<'a> TreeBuilder<'a> {
    /// # Arguments
    ///
    /// * `document` - The document cross-references are resolved against.
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Build the tree for the root scope of a normalized document.
    ///
    /// The root has up to three category children, in order `DataTypes`,
    /// `Entities`, `Packages`. Empty categories are omitted.
    pub fn build(&self, model: &NormalizedModel<'a>) -> TreeNode {
        let mut categories = Vec::with_capacity(3);

        if !model.data_types.is_empty() {
            let children = model.data_types.iter().map(|d| self.data_type(d)).collect();
            categories.push(TreeNode::branch("DataTypes", TreeKind::Category, children));
        }
        if !model.entities.is_empty() {
            let children = model.entities.iter().map(|e| self.entity(e)).collect();
            categories.push(TreeNode::branch("Entities", TreeKind::Category, children));
        }
        if !model.packages.is_empty() {
            let children = model.packages.iter().map(|p| self.package(p)).collect();
            categories.push(TreeNode::branch("Packages", TreeKind::Category, children));
        }

        TreeNode::branch("Domainmodel", TreeKind::Domainmodel, categories)
    }

    fn element(&self, element: &Element) -> TreeNode {
        match element {
            Element::DataType(d) => self.data_type(d),
            Element::Entity(e) => self.entity(e),
            Element::PackageDeclaration(p) => self.package(p),
            Element::Person(p) => self.person(p),
            Element::Greeting(g) => self.greeting(g),
        }
    }

    fn data_type(&self, data_type: &DataType) -> TreeNode {
        TreeNode::leaf(data_type.name().to_name(), TreeKind::DataType)
    }

    fn package(&self, package: &PackageDeclaration) -> TreeNode {
        let children = package.elements().iter().map(|e| self.element(e)).collect();
        TreeNode::branch(package.name().to_name(), TreeKind::Package, children)
    }

    fn entity(&self, entity: &Entity) -> TreeNode {
        let mut children: Vec<_> = entity.features().iter().map(|f| self.feature(f)).collect();

        // Only one level of the hierarchy is shown.
        if let Some(super_type) = entity
            .super_type()
            .and_then(|r| self.document.resolve_entity(r).ok())
        {
            let features = super_type.features().iter().map(|f| self.feature(f)).collect();
            children.push(
                TreeNode::branch(super_type.name().to_name(), TreeKind::Entity, features)
                    .with_tag(Tag::Supertype),
            );
        } else if let Some(reference) = entity.super_type() {
            trace!(
                entity:% = entity.name(),
                super_type:? = reference.text();
                "Supertype unresolved, omitted from tree",
            );
        }

        TreeNode::branch(entity.name().to_name(), TreeKind::Entity, children)
    }

    fn feature(&self, feature: &Feature) -> TreeNode {
        // Entity types are drawn as leaves; their features are shown under
        // the entity itself.
        let type_node = match self.document.resolve_type(feature.type_ref()) {
            Resolution::Resolved(TypeRef::DataType(data_type)) => self.data_type(data_type),
            Resolution::Resolved(TypeRef::Entity(entity)) => {
                TreeNode::leaf(entity.name().to_name(), TreeKind::Entity)
            }
            Resolution::Unresolved => TreeNode::leaf(
                feature.type_ref().text().unwrap_or(UNKNOWN),
                TreeKind::UnresolvedType,
            ),
        };

        if feature.is_many() {
            TreeNode::branch(
                format!("{}[]", feature.name()),
                TreeKind::Feature,
                vec![type_node],
            )
            .with_tag(Tag::Many)
        } else {
            TreeNode::branch(feature.name().to_name(), TreeKind::Feature, vec![type_node])
        }
    }

    fn person(&self, person: &Person) -> TreeNode {
        TreeNode::leaf(person.name().to_name(), TreeKind::Person)
    }

    fn greeting(&self, greeting: &Greeting) -> TreeNode {
        let target = match self.document.resolve_person(greeting.person()).ok() {
            Some(person) => person.name().to_name(),
            None => greeting
                .person()
                .key()
                .unwrap_or_else(|| UNKNOWN.to_string()),
        };
        TreeNode::leaf(format!("Hello {target}!"), TreeKind::Greeting)
    }
}

/// Build the containment tree of a normalized document.
pub fn build_tree(model: &NormalizedModel<'_>) -> TreeNode {
    info!("Building containment tree");
    let tree = TreeBuilder::new(model.document()).build(model);
    debug!(nodes_len = tree.len(); "Containment tree built");
    tree
}
