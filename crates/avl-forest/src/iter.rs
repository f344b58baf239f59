//! In-order traversal over an arena-backed tree.
//!
//! Both [`Cursor`] and [`Iter`] borrow the tree, so it cannot be mutated
//! while a position is live.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::types::KvNode;
use crate::util::next;

/// A position in the tree: either a node or the end sentinel.
///
/// Advancing walks to the in-order successor; advancing the end cursor
/// leaves it at the end.
pub struct Cursor<'a, K, V, N> {
    arena: &'a [N],
    curr: Option<u32>,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<'a, K, V, N> Cursor<'a, K, V, N>
where
    N: KvNode<K, V>,
{
    pub(crate) fn new(arena: &'a [N], curr: Option<u32>) -> Self {
        Self {
            arena,
            curr,
            _marker: PhantomData,
        }
    }

    pub fn is_end(&self) -> bool {
        self.curr.is_none()
    }

    pub fn key(&self) -> Option<&'a K> {
        self.curr.map(|i| self.arena[i as usize].key())
    }

    pub fn value(&self) -> Option<&'a V> {
        self.curr.map(|i| self.arena[i as usize].value())
    }

    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.curr.map(|i| {
            let n = &self.arena[i as usize];
            (n.key(), n.value())
        })
    }

    /// Moves to the in-order successor.
    pub fn move_next(&mut self) {
        if let Some(i) = self.curr {
            self.curr = next(self.arena, i);
        }
    }
}

impl<K, V, N> Clone for Cursor<'_, K, V, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, N> Copy for Cursor<'_, K, V, N> {}

impl<K, V, N> PartialEq for Cursor<'_, K, V, N> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.curr == other.curr
    }
}

impl<K, V, N> Eq for Cursor<'_, K, V, N> {}

impl<K, V, N> fmt::Debug for Cursor<'_, K, V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("node", &self.curr).finish()
    }
}

/// In-order iterator over `(key, value)` pairs.
pub struct Iter<'a, K, V, N> {
    arena: &'a [N],
    curr: Option<u32>,
    remaining: usize,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<'a, K, V, N> Iter<'a, K, V, N> {
    pub(crate) fn new(arena: &'a [N], first: Option<u32>) -> Self {
        Self {
            arena,
            curr: first,
            remaining: arena.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, K: 'a, V: 'a, N> Iterator for Iter<'a, K, V, N>
where
    N: KvNode<K, V>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        self.curr = next(self.arena, i);
        self.remaining -= 1;
        let n = &self.arena[i as usize];
        Some((n.key(), n.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a, N: KvNode<K, V>> ExactSizeIterator for Iter<'a, K, V, N> {}

impl<'a, K: 'a, V: 'a, N: KvNode<K, V>> FusedIterator for Iter<'a, K, V, N> {}

impl<K, V, N> Clone for Iter<'_, K, V, N> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            curr: self.curr,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

/// In-order iterator over keys.
pub struct Keys<'a, K, V, N>(pub(crate) Iter<'a, K, V, N>);

impl<'a, K: 'a, V: 'a, N: KvNode<K, V>> Iterator for Keys<'a, K, V, N> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K: 'a, V: 'a, N: KvNode<K, V>> ExactSizeIterator for Keys<'a, K, V, N> {}

impl<'a, K: 'a, V: 'a, N: KvNode<K, V>> FusedIterator for Keys<'a, K, V, N> {}

/// In-order iterator over values.
pub struct Values<'a, K, V, N>(pub(crate) Iter<'a, K, V, N>);

impl<'a, K: 'a, V: 'a, N: KvNode<K, V>> Iterator for Values<'a, K, V, N> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K: 'a, V: 'a, N: KvNode<K, V>> ExactSizeIterator for Values<'a, K, V, N> {}

impl<'a, K: 'a, V: 'a, N: KvNode<K, V>> FusedIterator for Values<'a, K, V, N> {}
