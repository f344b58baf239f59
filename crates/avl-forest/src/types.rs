//! Node trait definitions.
//!
//! Nodes live in a `Vec`-backed arena owned by the tree. Every link is an
//! `Option<u32>` index into that arena: `l` and `r` are the owning edges of
//! the tree, `p` is a plain back-reference used only for upward navigation.

/// Position links (`p`, `l`, `r`) shared by every node kind.
pub trait Node: Sized {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);

    /// Exchanges the tree positions of `x` and `y` and returns the new root.
    ///
    /// Payloads stay with their nodes. Node kinds that attach bookkeeping to
    /// a position rather than to a payload override this to move it along.
    fn swap(arena: &mut [Self], root: u32, x: u32, y: u32) -> u32 {
        crate::util::swap(arena, root, x, y)
    }
}

/// Key/value payload carried by a node.
///
/// The key is fixed at construction; only the value can change in place.
pub trait KvNode<K, V>: Node {
    fn from_entry(key: K, value: V) -> Self;
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    fn into_value(self) -> V;

    /// Stores `value`, returning the one it replaced.
    fn set_value(&mut self, value: V) -> V {
        std::mem::replace(self.value_mut(), value)
    }
}
