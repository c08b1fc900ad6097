//! A visualization session: one graph view and the positions it remembers.
//!
//! A session is created when a view is opened and dropped when it is closed.
//! Sessions never share state, so two views over the same document can be
//! arranged independently.

use std::collections::HashMap;

use log::{debug, trace};
use serde::Deserialize;

use masala_core::{geometry::Point, identifier::Id};
use masala_parser::{Document, Located, ast::Entity};

use crate::{
    config::LayoutConfig,
    layout::{EntityGraph, PositionCache, project, record_position},
};

/// A node-position change reported by the graph surface.
///
/// While the user drags a node the surface reports a stream of events with
/// `dragging: true`, then a single event with `dragging: false` when the
/// node is dropped. The final event may come without a position.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DragEvent {
    id: Id,
    #[serde(default)]
    position: Option<Point>,
    dragging: bool,
}

impl DragEvent {
    /// An intermediate event while the node is being dragged.
    pub fn moving(id: Id, position: Point) -> Self {
        Self {
            id,
            position: Some(position),
            dragging: true,
        }
    }

    /// The drop event that ends a drag.
    pub fn dropped(id: Id, position: Option<Point>) -> Self {
        Self {
            id,
            position,
            dragging: false,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

/// Owns the position cache of one graph view.
#[derive(Debug, Clone, Default)]
pub struct VisualizationSession {
    cache: PositionCache,
    /// Last position seen per node during a drag that has not ended yet.
    in_flight: HashMap<Id, Point>,
}

impl VisualizationSession {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            cache: PositionCache::new(layout),
            in_flight: HashMap::new(),
        }
    }

    pub fn cache(&self) -> &PositionCache {
        &self.cache
    }

    /// Project `entities` with this session's positions.
    pub fn project<'a>(
        &mut self,
        document: &'a Document,
        entities: &[Located<'a, Entity>],
    ) -> EntityGraph {
        project(document, entities, &mut self.cache)
    }

    /// Handle one drag event.
    ///
    /// Intermediate events are only remembered; the cache is written once,
    /// when the drag ends, with the drop position or the last position seen
    /// during the drag. Returns `true` if a position was committed.
    pub fn apply_drag(&mut self, event: &DragEvent) -> bool {
        if event.dragging {
            if let Some(position) = event.position {
                trace!(id:% = event.id, position:?; "Drag in progress");
                self.in_flight.insert(event.id, position);
            }
            return false;
        }

        let in_flight = self.in_flight.remove(&event.id);
        let Some(position) = event.position.or(in_flight) else {
            debug!(id:% = event.id; "Drag ended without a position, nothing to commit");
            return false;
        };

        debug!(id:% = event.id, position:?; "Committing dropped node position");
        record_position(&mut self.cache, event.id, position)
    }

    /// Forget every position, including drags that have not ended.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.in_flight.clear();
    }
}
