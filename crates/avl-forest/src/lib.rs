//! Arena-backed ordered maps: an unbalanced binary search tree and an AVL
//! tree layered on top of it.
//!
//! Nodes are kept in a dense `Vec<N>` arena owned by the tree. Child links
//! are `Option<u32>` indices into it; the parent link is a non-owning index
//! used for upward walks (successor/predecessor, fixup walks).
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] and [`KvNode`] traits |
//! [`util`] | `first`, `next`, `prev`, `find`, `swap` … over a bare arena |
//! [`bst`] | [`BinarySearchTree`] and its `place` / `detach` / `release` steps |
//! [`avl`] | [`AvlTree`], rotations, insert/remove fixup walks |
//! [`iter`] | [`Cursor`] and in-order iterators |
//! [`view`] | [`NodeRef`] read-only structural view |
//!
//! # Example
//!
//! ```
//! use avl_forest::AvlTree;
//!
//! let mut tree: AvlTree<i32, &str> = AvlTree::new();
//! tree.insert(3, "c");
//! tree.insert(2, "b");
//! tree.insert(1, "a");
//!
//! assert_eq!(tree.root().map(|n| *n.key()), Some(2));
//! assert_eq!(tree.find(&1), Some(&"a"));
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert!(tree.at(&4).is_err());
//! ```

pub mod avl;
pub mod bst;
pub mod error;
pub mod iter;
pub mod types;
pub mod util;
pub mod view;

pub use avl::{AvlNode, AvlTree};
pub use bst::{BinarySearchTree, BstNode};
pub use error::{InvariantError, TreeError};
pub use iter::{Cursor, Iter, Keys, Values};
pub use types::{KvNode, Node};
pub use view::NodeRef;
