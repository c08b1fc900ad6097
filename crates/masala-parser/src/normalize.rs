//! Partitioning a flat element list into typed buckets.
//!
//! [`normalize`] is the first step for every consumer: the validator, the
//! tree builder and the graph projector all read the buckets rather than the
//! raw element list. It never fails; an empty or unusual document simply
//! yields empty buckets.

use std::ops::Deref;

use log::debug;

use crate::{
    ast::{DataType, Document, Element, Entity, Greeting, PackageDeclaration, Person},
    reference::NodePath,
};

/// A borrowed AST node together with its containment path.
#[derive(Debug, PartialEq)]
pub struct Located<'a, T> {
    path: NodePath,
    node: &'a T,
}

impl<'a, T> Located<'a, T> {
    pub fn new(path: NodePath, node: &'a T) -> Self {
        Self { path, node }
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn node(&self) -> &'a T {
        self.node
    }
}

impl<T> Clone for Located<'_, T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            node: self.node,
        }
    }
}

impl<T> Deref for Located<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.node
    }
}

/// The elements of one scope (the document root or a package body), split
/// by kind. Order inside each bucket is source order.
#[derive(Debug, Clone)]
pub struct NormalizedModel<'a> {
    document: &'a Document,
    scope: NodePath,
    pub packages: Vec<Located<'a, PackageDeclaration>>,
    pub entities: Vec<Located<'a, Entity>>,
    pub data_types: Vec<Located<'a, DataType>>,
    pub persons: Vec<Located<'a, Person>>,
    pub greetings: Vec<Located<'a, Greeting>>,
}

impl<'a> NormalizedModel<'a> {
    /// The document every reference in this model resolves against.
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// The path of the scope these buckets were taken from.
    pub fn scope(&self) -> &NodePath {
        &self.scope
    }

    /// Normalize the body of one of this model's packages.
    pub fn package_scope(&self, package: &Located<'a, PackageDeclaration>) -> NormalizedModel<'a> {
        partition(self.document, package.path().clone(), package.node().elements())
    }

    /// Total number of elements across all buckets.
    pub fn len(&self) -> usize {
        self.packages.len()
            + self.entities.len()
            + self.data_types.len()
            + self.persons.len()
            + self.greetings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize the document root.
pub fn normalize(document: &Document) -> NormalizedModel<'_> {
    let model = partition(document, NodePath::root(), document.elements());
    debug!(
        packages_len = model.packages.len(),
        entities_len = model.entities.len(),
        data_types_len = model.data_types.len(),
        persons_len = model.persons.len(),
        greetings_len = model.greetings.len();
        "Document normalized",
    );
    model
}

fn partition<'a>(
    document: &'a Document,
    scope: NodePath,
    elements: &'a [Element],
) -> NormalizedModel<'a> {
    let mut model = NormalizedModel {
        document,
        scope,
        packages: Vec::new(),
        entities: Vec::new(),
        data_types: Vec::new(),
        persons: Vec::new(),
        greetings: Vec::new(),
    };

    for (index, element) in elements.iter().enumerate() {
        let path = model.scope.child("elements", index);
        match element {
            Element::PackageDeclaration(p) => model.packages.push(Located::new(path, p)),
            Element::Entity(e) => model.entities.push(Located::new(path, e)),
            Element::DataType(d) => model.data_types.push(Located::new(path, d)),
            Element::Person(p) => model.persons.push(Located::new(path, p)),
            Element::Greeting(g) => model.greetings.push(Located::new(path, g)),
        }
    }

    model
}
