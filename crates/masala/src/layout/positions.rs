//! Node positions that survive across snapshots.
//!
//! Positions are keyed by entity name rather than by AST node, because every
//! snapshot brings freshly deserialized nodes. An entity keeps its place as
//! long as its name stays the same, even when it moves around in the source.
//!
//! Entries are never evicted by projection. An entity that disappears and
//! comes back (an undo, a cut and paste) returns to where it was.

use std::collections::HashMap;

use log::{trace, warn};

use masala_core::{geometry::Point, identifier::Id};

use crate::config::LayoutConfig;

/// Last-known position of every entity name a session has placed.
#[derive(Debug, Clone)]
pub struct PositionCache {
    positions: HashMap<Id, Point>,
    origin_x: f32,
    row_spacing: f32,
}

impl PositionCache {
    /// Create an empty cache that places unseen entities per `layout`.
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            positions: HashMap::new(),
            origin_x: layout.origin_x(),
            row_spacing: layout.row_spacing(),
        }
    }

    /// The recorded position for `id`, if there is one.
    pub fn get(&self, id: Id) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Forget every recorded position.
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Where the `index`-th entity of a snapshot goes if it was never placed.
    pub fn default_position(&self, index: usize) -> Point {
        Point::new(self.origin_x, index as f32 * self.row_spacing)
    }

    /// Returns the cached position for `id`, inserting the default position
    /// for `index` first if the name is new.
    pub(super) fn place(&mut self, id: Id, index: usize) -> Point {
        let default = self.default_position(index);
        *self.positions.entry(id).or_insert_with(|| {
            trace!(id:%, position:? = default; "Placing new node at default position");
            default
        })
    }

    /// Overwrite the position recorded for `id`.
    ///
    /// Non-finite coordinates are rejected and leave the cache untouched.
    pub fn record(&mut self, id: Id, position: Point) -> bool {
        if !position.is_finite() {
            warn!(id:%, position:?; "Ignoring non-finite node position");
            return false;
        }
        trace!(id:%, position:?; "Recording node position");
        self.positions.insert(id, position);
        true
    }
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

/// Record a user-chosen position for an entity.
///
/// The next projection places the entity exactly there, whatever its index.
pub fn record_position(cache: &mut PositionCache, id: Id, position: Point) -> bool {
    cache.record(id, position)
}
