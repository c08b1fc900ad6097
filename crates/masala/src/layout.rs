//! Graph projection and the state that keeps it stable.
//!
//! # Submodules
//!
//! - [`graph`] - The entity graph and the projection that builds it
//! - [`positions`] - The per-session position cache
//!
//! The cache is the only state in the crate that outlives a snapshot. It is
//! owned by a [`VisualizationSession`](crate::session::VisualizationSession)
//! and is written through [`project`] and [`record_position`] only.

pub mod graph;
pub mod positions;

pub use graph::{EntityGraph, GraphEdge, GraphNode, project};
pub use positions::{PositionCache, record_position};
