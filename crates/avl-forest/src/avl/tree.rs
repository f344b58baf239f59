use std::cmp::Ordering;
use std::fmt;

use crate::bst::{BinarySearchTree, Placement};
use crate::error::{InvariantError, TreeError};
use crate::iter::{Cursor, Iter, Keys, Values};
use crate::types::Node;
use crate::view::NodeRef;

use super::types::AvlNode;
use super::util::{assert_avl_tree, insert_fix, remove_fix};

type Inner<K, V, C> = BinarySearchTree<K, V, AvlNode<K, V>, C>;

/// Ordered map over an AVL tree: O(log n) insert, lookup and removal.
///
/// Structural placement and removal are delegated to [`BinarySearchTree`];
/// this type runs the rebalancing walks afterwards.
pub struct AvlTree<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    inner: Inner<K, V, C>,
}

impl<K: Ord, V> AvlTree<K, V, fn(&K, &K) -> Ordering> {
    pub fn new() -> Self {
        Self {
            inner: BinarySearchTree::new(),
        }
    }
}

impl<K: Ord, V> Default for AvlTree<K, V, fn(&K, &K) -> Ordering> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            inner: BinarySearchTree::with_comparator(comparator),
        }
    }

    /// Inserts `key`, or overwrites its value when already present.
    ///
    /// Overwriting leaves the shape and every balance factor untouched and
    /// returns the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.inner.place(key, value) {
            Placement::Root(_) => None,
            Placement::Leaf(n) => {
                if let Some(root) = self.inner.root {
                    self.inner.root = Some(insert_fix(&mut self.inner.arena, root, n));
                }
                None
            }
            Placement::Replaced(old) => Some(old),
        }
    }

    /// Removes `key` and returns its value; a missing key is a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let n = self.inner.find_index(key)?;
        let detached = self.inner.unlink(n);
        if let (Some(root), Some(parent)) = (detached.root, detached.parent) {
            self.inner.root = Some(remove_fix(
                &mut self.inner.arena,
                root,
                parent,
                detached.diff,
            ));
        }
        Some(self.inner.free(n))
    }

    pub fn find(&self, key: &K) -> Option<&V> {
        self.inner.find(key)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        self.inner.find_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Indexed access; a missing key is an error rather than `None`.
    pub fn at(&self, key: &K) -> Result<&V, TreeError> {
        self.inner.at(key)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, TreeError> {
        self.inner.at_mut(key)
    }

    /// Cursor at `key`, or the end cursor when absent.
    pub fn cursor_at(&self, key: &K) -> Cursor<'_, K, V, AvlNode<K, V>> {
        self.inner.cursor_at(key)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.inner.first()
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.inner.last()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    /// Recomputes subtree heights from scratch; diagnostic only.
    pub fn is_balanced(&self) -> bool {
        self.inner.is_balanced()
    }

    pub fn height(&self) -> usize {
        self.inner.height()
    }

    pub fn root(&self) -> Option<NodeRef<'_, K, V, AvlNode<K, V>>> {
        self.inner.root()
    }

    /// Cursor at the smallest key.
    pub fn begin(&self) -> Cursor<'_, K, V, AvlNode<K, V>> {
        self.inner.begin()
    }

    /// The past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, K, V, AvlNode<K, V>> {
        self.inner.end()
    }

    pub fn iter(&self) -> Iter<'_, K, V, AvlNode<K, V>> {
        self.inner.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V, AvlNode<K, V>> {
        self.inner.keys()
    }

    pub fn values(&self) -> Values<'_, K, V, AvlNode<K, V>> {
        self.inner.values()
    }

    /// Checks links, ordering, and every stored balance factor.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        assert_avl_tree(
            &self.inner.arena,
            self.inner.root,
            |n: &AvlNode<K, V>| &n.k,
            &self.inner.comparator,
        )
    }

    fn print_node(&self, node: Option<u32>, tab: &str) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        match node {
            None => "∅".to_string(),
            Some(i) => {
                let n = &self.inner.arena[i as usize];
                let left = self.print_node(n.l(), &format!("{tab}  "));
                let right = self.print_node(n.r(), &format!("{tab}  "));
                format!(
                    "Node[{i}] [bf={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                    n.bf, n.k, n.v
                )
            }
        }
    }

    /// Debug dump of the tree shape with balance factors.
    pub fn print(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        self.print_node(self.inner.root, "")
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTree<K, V, C>
where
    K: 'a,
    V: 'a,
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, AvlNode<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Extend<(K, V)> for AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V, fn(&K, &K) -> Ordering> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C> fmt::Debug for AvlTree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}
