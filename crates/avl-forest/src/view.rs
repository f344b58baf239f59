//! Read-only structural view of a tree, for printers and shape assertions.

use std::fmt;
use std::marker::PhantomData;

use crate::avl::AvlNodeLike;
use crate::types::KvNode;

/// Borrowed handle to one node and its neighbours.
pub struct NodeRef<'a, K, V, N> {
    arena: &'a [N],
    idx: u32,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<'a, K, V, N> NodeRef<'a, K, V, N>
where
    N: KvNode<K, V>,
{
    pub(crate) fn new(arena: &'a [N], idx: u32) -> Self {
        Self {
            arena,
            idx,
            _marker: PhantomData,
        }
    }

    fn at(&self, idx: Option<u32>) -> Option<Self> {
        idx.map(|idx| Self::new(self.arena, idx))
    }

    fn node(&self) -> &'a N {
        &self.arena[self.idx as usize]
    }

    pub fn key(&self) -> &'a K {
        self.node().key()
    }

    pub fn value(&self) -> &'a V {
        self.node().value()
    }

    pub fn left(&self) -> Option<Self> {
        self.at(self.node().l())
    }

    pub fn right(&self) -> Option<Self> {
        self.at(self.node().r())
    }

    pub fn parent(&self) -> Option<Self> {
        self.at(self.node().p())
    }
}

impl<K, V, N> NodeRef<'_, K, V, N>
where
    N: KvNode<K, V> + AvlNodeLike,
{
    /// `height(right) - height(left)` as maintained by the AVL engine.
    pub fn balance(&self) -> i8 {
        self.node().bf()
    }
}

impl<K, V, N> Clone for NodeRef<'_, K, V, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, N> Copy for NodeRef<'_, K, V, N> {}

impl<K, V, N> fmt::Debug for NodeRef<'_, K, V, N>
where
    K: fmt::Debug,
    N: KvNode<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.idx)
            .field("key", self.key())
            .finish()
    }
}
