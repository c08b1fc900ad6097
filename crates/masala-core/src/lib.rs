//! Masala Core Types
//!
//! Foundational types shared by the Masala crates:
//!
//! - **Identifiers**: string-interned element names ([`identifier::Id`])
//! - **Geometry**: graph-view coordinates ([`geometry::Point`])

pub mod geometry;
pub mod identifier;
