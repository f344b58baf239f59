//! AVL engine: rotations and the insert/remove fixup walks on top of the
//! [`crate::bst`] substrate.

mod tree;
pub mod types;
pub mod util;

pub use tree::AvlTree;
pub use types::{AvlNode, AvlNodeLike};
pub use util::{assert_avl_tree, insert_fix, remove_fix, rotate_left, rotate_right};
