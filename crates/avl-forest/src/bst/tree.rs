use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::{InvariantError, TreeError};
use crate::iter::{Cursor, Iter, Keys, Values};
use crate::types::KvNode;
use crate::util::{find, first, height, last};
use crate::view::NodeRef;

use super::types::BstNode;
use super::util::{assert_bst, detach, is_balanced, place, release, Detached, Placement};

fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Ordered map over an unbalanced binary search tree.
///
/// Nodes are stored in a dense arena; links are arena indices. `N` picks the
/// node kind, which lets the AVL engine reuse this type with balance-carrying
/// nodes.
pub struct BinarySearchTree<K, V, N = BstNode<K, V>, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub(crate) root: Option<u32>,
    pub(crate) arena: Vec<N>,
    pub(crate) comparator: C,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, N> BinarySearchTree<K, V, N, fn(&K, &K) -> Ordering>
where
    K: Ord,
    N: KvNode<K, V>,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V, N> Default for BinarySearchTree<K, V, N, fn(&K, &K) -> Ordering>
where
    K: Ord,
    N: KvNode<K, V>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, N, C> BinarySearchTree<K, V, N, C>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            arena: Vec::new(),
            comparator,
            _marker: PhantomData,
        }
    }

    /// Places `key` without any rebalancing, taking the root when empty.
    pub(crate) fn place(&mut self, key: K, value: V) -> Placement<V> {
        let placement = place(&mut self.arena, self.root, key, value, &self.comparator);
        if let Placement::Root(n) = placement {
            self.root = Some(n);
        }
        placement
    }

    /// Unlinks node `n`, leaving it in the arena until [`Self::free`].
    pub(crate) fn unlink(&mut self, n: u32) -> Detached {
        let Some(root) = self.root else {
            return Detached {
                root: None,
                parent: None,
                diff: 0,
            };
        };
        let detached = detach(&mut self.arena, root, n);
        self.root = detached.root;
        detached
    }

    /// Drops the unlinked node `n` from the arena and returns its value.
    pub(crate) fn free(&mut self, n: u32) -> V {
        let (node, root) = release(&mut self.arena, self.root, n);
        self.root = root;
        node.into_value()
    }

    pub(crate) fn find_index(&self, key: &K) -> Option<u32> {
        find(&self.arena, self.root, key, |n: &N| n.key(), &self.comparator)
    }

    /// Inserts `key`, or overwrites its value when already present.
    ///
    /// Returns the previous value on overwrite.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.place(key, value) {
            Placement::Replaced(old) => Some(old),
            Placement::Root(_) | Placement::Leaf(_) => None,
        }
    }

    /// Removes `key` and returns its value; a missing key is a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let n = self.find_index(key)?;
        self.unlink(n);
        Some(self.free(n))
    }

    pub fn find(&self, key: &K) -> Option<&V> {
        self.find_index(key).map(|i| self.arena[i as usize].value())
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.find_index(key)?;
        Some(self.arena[i as usize].value_mut())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Indexed access; a missing key is an error rather than `None`.
    pub fn at(&self, key: &K) -> Result<&V, TreeError> {
        self.find(key).ok_or(TreeError::KeyNotFound)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, TreeError> {
        self.find_mut(key).ok_or(TreeError::KeyNotFound)
    }

    /// Cursor at `key`, or the end cursor when absent.
    pub fn cursor_at(&self, key: &K) -> Cursor<'_, K, V, N> {
        Cursor::new(&self.arena, self.find_index(key))
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        Cursor::new(&self.arena, first(&self.arena, self.root)).entry()
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        Cursor::new(&self.arena, last(&self.arena, self.root)).entry()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node and resets to empty.
    pub fn clear(&mut self) {
        debug!(len = self.arena.len(), "clearing tree");
        self.arena.clear();
        self.root = None;
    }

    /// Recomputes subtree heights and checks they differ by at most one.
    pub fn is_balanced(&self) -> bool {
        is_balanced(&self.arena, self.root)
    }

    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    pub fn root(&self) -> Option<NodeRef<'_, K, V, N>> {
        self.root.map(|i| NodeRef::new(&self.arena, i))
    }

    /// Cursor at the smallest key.
    pub fn begin(&self) -> Cursor<'_, K, V, N> {
        Cursor::new(&self.arena, first(&self.arena, self.root))
    }

    /// The past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, K, V, N> {
        Cursor::new(&self.arena, None)
    }

    pub fn iter(&self) -> Iter<'_, K, V, N> {
        Iter::new(&self.arena, first(&self.arena, self.root))
    }

    pub fn keys(&self) -> Keys<'_, K, V, N> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V, N> {
        Values(self.iter())
    }

    /// Checks parent links and key ordering.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        assert_bst(&self.arena, self.root, |n: &N| n.key(), &self.comparator)
    }
}

impl<'a, K, V, N, C> IntoIterator for &'a BinarySearchTree<K, V, N, C>
where
    K: 'a,
    V: 'a,
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, N, C> Extend<(K, V)> for BinarySearchTree<K, V, N, C>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, N, C> fmt::Debug for BinarySearchTree<K, V, N, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
