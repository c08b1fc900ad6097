//! Geometric primitives for graph-view positioning.
//!
//! # Coordinate System
//!
//! Masala uses screen coordinates, the same convention the graph view uses:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! New nodes are stacked downward along the Y axis.

use serde::{Deserialize, Serialize};

/// A 2D point in graph coordinate space.
///
/// Serializes as `{ "x": .., "y": .. }`, the shape graph-view consumers expect.
///
/// # Examples
///
/// ```
/// # use masala_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert!(!Point::new(f32::INFINITY, 0.0).is_finite());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns true if both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
