//! Unbalanced binary-search-tree engine.
//!
//! [`BinarySearchTree`] is usable on its own and is also the substrate the
//! AVL engine delegates structural placement and removal to.

mod tree;
pub mod types;
pub mod util;

pub use tree::BinarySearchTree;
pub use types::BstNode;
pub use util::{assert_bst, detach, is_balanced, place, release, Detached, Placement};
