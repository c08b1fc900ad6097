//! Entity graph with inheritance edges.
//!
//! One node per entity, placed from the session's [`PositionCache`], and one
//! edge per entity whose supertype resolves to another node of the graph.
//! A supertype declared inside a package has no node here, so its edge is
//! left out. Nodes and edges are rebuilt on every call; only positions carry
//! over.

use std::collections::HashSet;

use log::{debug, info, trace};
use serde::Serialize;

use masala_core::{geometry::Point, identifier::Id};
use masala_parser::{Document, Located, ast::Entity};

use crate::layout::PositionCache;

/// A positioned entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    id: Id,
    label: String,
    position: Point,
}

impl GraphNode {
    pub fn new(id: Id, label: impl Into<String>, position: Point) -> Self {
        Self {
            id,
            label: label.into(),
            position,
        }
    }

    /// The entity name the node is keyed by.
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// An inheritance edge from an entity to its supertype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    id: String,
    source: Id,
    target: Id,
}

impl GraphEdge {
    /// Edge ids are `<source>-<target>`.
    pub fn new(source: Id, target: Id) -> Self {
        Self {
            id: format!("{source}-{target}"),
            source,
            target,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }
}

/// The graph view of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl EntityGraph {
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Returns the first node with the given id.
    pub fn node(&self, id: Id) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Move every node keyed by `id`. Returns `true` if any node matched.
    pub(crate) fn move_node(&mut self, id: Id, position: Point) -> bool {
        let mut moved = false;
        for node in self.nodes.iter_mut().filter(|node| node.id == id) {
            node.set_position(position);
            moved = true;
        }
        moved
    }
}

/// Project entities into a graph, placing each node from `cache`.
///
/// Entities sharing a name share one cache entry and therefore one position.
/// Names never seen before are placed at the default position for their
/// index in `entities` and remembered.
pub fn project<'a>(
    document: &'a Document,
    entities: &[Located<'a, Entity>],
    cache: &mut PositionCache,
) -> EntityGraph {
    info!(entities_len = entities.len(); "Projecting entity graph");

    let mut graph = EntityGraph::default();
    for (index, entity) in entities.iter().enumerate() {
        let id = entity.name();
        let position = cache.place(id, index);
        graph.nodes.push(GraphNode::new(id, id.to_name(), position));

        if let Some(super_type) = entity
            .super_type()
            .and_then(|r| document.resolve_entity(r).ok())
        {
            graph.edges.push(GraphEdge::new(id, super_type.name()));
        }
    }

    let node_ids: HashSet<Id> = graph.nodes.iter().map(GraphNode::id).collect();
    graph.edges.retain(|edge| {
        let keep = node_ids.contains(&edge.target);
        if !keep {
            trace!(edge:% = edge.id; "Supertype is not a graph node, edge omitted");
        }
        keep
    });

    debug!(
        nodes_len = graph.nodes.len(),
        edges_len = graph.edges.len(),
        cached_len = cache.len();
        "Entity graph projected",
    );
    graph
}
