//! Structural projections of a document.
//!
//! The containment tree ([`TreeNode`]) is rebuilt from scratch for every
//! snapshot and holds no state of its own. See [`crate::layout`] for the
//! graph projection, which does.

mod tree;

pub use tree::{Tag, TreeBuilder, TreeKind, TreeNode, build_tree};
