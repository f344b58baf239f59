//! Structural insert/remove steps shared by every search-tree engine.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::InvariantError;
use crate::types::{KvNode, Node};
use crate::util::{first, get_l, get_p, get_r, last, next, replace_child, set_l, set_p, set_r};

/// Outcome of [`place`].
#[derive(Debug, PartialEq, Eq)]
pub enum Placement<V> {
    /// The tree was empty; the new node is the root.
    Root(u32),
    /// A new leaf was linked under an existing node.
    Leaf(u32),
    /// The key was already present; holds the value it had before.
    Replaced(V),
}

/// Where [`detach`] physically unlinked a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detached {
    /// New root of the tree, `None` once it is empty.
    pub root: Option<u32>,
    /// Parent of the vacated slot, `None` when the root itself was spliced.
    pub parent: Option<u32>,
    /// `+1` when the vacated slot was a left child, `-1` for a right child,
    /// `0` for the root.
    pub diff: i8,
}

/// Index the next pushed node will get. Links are `u32`, so an arena holds
/// at most `u32::MAX + 1` nodes; going past that is a capacity overflow.
fn slot_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena is full at {len} nodes"))
}

fn alloc<K, V, N: KvNode<K, V>>(arena: &mut Vec<N>, key: K, value: V) -> u32 {
    let idx = slot_index(arena.len());
    arena.push(N::from_entry(key, value));
    idx
}

/// Descends from `root` and either overwrites the value stored under `key`
/// or links a new leaf holding it.
///
/// Overwriting changes nothing structurally.
pub fn place<K, V, N, C>(
    arena: &mut Vec<N>,
    root: Option<u32>,
    key: K,
    value: V,
    comparator: C,
) -> Placement<V>
where
    N: KvNode<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(mut curr) = root else {
        return Placement::Root(alloc(arena, key, value));
    };

    loop {
        let cmp = comparator(&key, arena[curr as usize].key());
        let next = match cmp {
            Ordering::Equal => return Placement::Replaced(arena[curr as usize].set_value(value)),
            Ordering::Less => get_l(arena, curr),
            Ordering::Greater => get_r(arena, curr),
        };
        match next {
            Some(next) => curr = next,
            None => {
                let n = alloc(arena, key, value);
                if cmp == Ordering::Less {
                    set_l(arena, curr, Some(n));
                } else {
                    set_r(arena, curr, Some(n));
                }
                set_p(arena, n, Some(curr));
                return Placement::Leaf(n);
            }
        }
    }
}

/// Unlinks `n` from the tree rooted at `root`.
///
/// A node with two children first trades places with its in-order
/// predecessor through [`Node::swap`], which leaves it with at most one
/// child. It is then spliced out by promoting that child into its slot.
/// The node stays in the arena with cleared links; see [`release`].
pub fn detach<N: Node>(arena: &mut [N], root: u32, n: u32) -> Detached {
    let mut root = root;
    if let (Some(l), Some(_)) = (get_l(arena, n), get_r(arena, n)) {
        let pred = last(arena, Some(l)).unwrap_or(l);
        root = N::swap(arena, root, pred, n);
    }

    let p = get_p(arena, n);
    let child = get_l(arena, n).or(get_r(arena, n));
    if let Some(c) = child {
        set_p(arena, c, p);
    }
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);

    match p {
        None => Detached {
            root: child,
            parent: None,
            diff: 0,
        },
        Some(p) => {
            let diff = if get_l(arena, p) == Some(n) { 1 } else { -1 };
            replace_child(arena, p, n, child);
            Detached {
                root: Some(root),
                parent: Some(p),
                diff,
            }
        }
    }
}

/// Frees the detached node `n`, returning it together with the possibly
/// re-pointed root.
///
/// The arena stays dense: its last node moves into the freed slot and the
/// links that referenced it are rewritten.
pub fn release<N: Node>(arena: &mut Vec<N>, root: Option<u32>, n: u32) -> (N, Option<u32>) {
    let moved = (arena.len() - 1) as u32;
    let mut root = root;
    if n != moved {
        if let Some(p) = get_p(arena, moved) {
            replace_child(arena, p, moved, Some(n));
        }
        for c in [get_l(arena, moved), get_r(arena, moved)].into_iter().flatten() {
            set_p(arena, c, Some(n));
        }
        if root == Some(moved) {
            root = Some(n);
        }
        trace!(from = moved, to = n, "relocated node");
    }
    (arena.swap_remove(n as usize), root)
}

/// Whether every subtree's left and right heights differ by at most one.
///
/// Recomputes heights from the links alone and ignores any stored balance.
pub fn is_balanced<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    fn balanced_height<N: Node>(arena: &[N], node: Option<u32>) -> Option<usize> {
        let Some(i) = node else {
            return Some(0);
        };
        let lh = balanced_height(arena, get_l(arena, i))?;
        let rh = balanced_height(arena, get_r(arena, i))?;
        (lh.abs_diff(rh) <= 1).then_some(1 + lh.max(rh))
    }
    balanced_height(arena, root).is_some()
}

/// Checks parent links and strict in-order key ordering.
pub fn assert_bst<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key_of: F,
    comparator: C,
) -> Result<(), InvariantError>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };
    if get_p(arena, root).is_some() {
        return Err(InvariantError::RootHasParent);
    }

    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        for c in [get_l(arena, i), get_r(arena, i)].into_iter().flatten() {
            if get_p(arena, c) != Some(i) {
                return Err(InvariantError::BrokenParentLink { node: i });
            }
            stack.push(c);
        }
    }

    let mut curr = first(arena, Some(root));
    let mut prev: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev {
            if comparator(key_of(&arena[prev as usize]), key_of(&arena[i as usize])) != Ordering::Less {
                return Err(InvariantError::OrderViolated { node: i });
            }
        }
        prev = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bst::BstNode;

    type Arena = Vec<BstNode<i32, i32>>;

    fn cmp(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn build(keys: &[i32]) -> (Arena, Option<u32>) {
        let mut arena = Arena::new();
        let mut root = None;
        for &k in keys {
            if let Placement::Root(n) = place(&mut arena, root, k, k * 10, cmp) {
                root = Some(n);
            }
        }
        (arena, root)
    }

    fn keys(arena: &Arena, root: Option<u32>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut curr = first(arena, root);
        while let Some(i) = curr {
            out.push(arena[i as usize].k);
            curr = next(arena, i);
        }
        out
    }

    fn index_of(arena: &Arena, key: i32) -> u32 {
        arena.iter().position(|n| n.k == key).unwrap() as u32
    }

    fn check(arena: &Arena, root: Option<u32>) {
        assert_bst(arena, root, |n: &BstNode<i32, i32>| &n.k, cmp).unwrap();
    }

    #[test]
    fn place_reports_root_leaf_and_replaced() {
        let mut arena = Arena::new();
        assert_eq!(place(&mut arena, None, 5, 50, cmp), Placement::Root(0));
        assert_eq!(place(&mut arena, Some(0), 3, 30, cmp), Placement::Leaf(1));
        assert_eq!(place(&mut arena, Some(0), 3, 31, cmp), Placement::Replaced(30));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[1].v, 31);
        assert_eq!(arena[1].p, Some(0));
        assert_eq!(arena[0].l, Some(1));
    }

    #[test]
    fn slot_index_covers_the_whole_u32_range() {
        assert_eq!(slot_index(0), 0);
        assert_eq!(slot_index(u32::MAX as usize), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    #[should_panic(expected = "arena is full")]
    fn slot_index_rejects_overflowing_arena() {
        slot_index(u32::MAX as usize + 1);
    }

    #[test]
    fn detach_leaf_reports_side() {
        let (mut arena, root) = build(&[5, 3, 8]);
        let n = index_of(&arena, 3);
        let d = detach(&mut arena, root.unwrap(), n);
        assert_eq!(d.parent, Some(0));
        assert_eq!(d.diff, 1);
        assert_eq!(keys(&arena, d.root), vec![5, 8]);

        let n = index_of(&arena, 8);
        let d = detach(&mut arena, d.root.unwrap(), n);
        assert_eq!(d.diff, -1);
        assert_eq!(keys(&arena, d.root), vec![5]);
    }

    #[test]
    fn detach_root_with_single_child_promotes_it() {
        let (mut arena, root) = build(&[5, 8, 9]);
        let d = detach(&mut arena, root.unwrap(), 0);
        assert_eq!(d.parent, None);
        assert_eq!(d.root, Some(index_of(&arena, 8)));
        assert_eq!(arena[d.root.unwrap() as usize].p, None);
        check(&arena, d.root);
    }

    #[test]
    fn detach_last_node_empties_tree() {
        let (mut arena, root) = build(&[1]);
        let d = detach(&mut arena, root.unwrap(), 0);
        assert_eq!(d.root, None);
        assert_eq!(d.parent, None);
    }

    #[test]
    fn detach_two_children_swaps_with_predecessor() {
        let (mut arena, root) = build(&[50, 30, 70, 20, 40, 35]);
        let n = index_of(&arena, 50);
        let d = detach(&mut arena, root.unwrap(), n);
        // 40 is the predecessor; it takes the root position.
        assert_eq!(d.root, Some(index_of(&arena, 40)));
        // 50 was spliced from 40's old slot, the right child of 30.
        assert_eq!(d.parent, Some(index_of(&arena, 30)));
        assert_eq!(d.diff, -1);
        assert_eq!(keys(&arena, d.root), vec![20, 30, 35, 40, 70]);
        check(&arena, d.root);
    }

    #[test]
    fn detach_two_children_with_adjacent_predecessor() {
        let (mut arena, root) = build(&[50, 30, 70, 20]);
        let n = index_of(&arena, 50);
        let d = detach(&mut arena, root.unwrap(), n);
        assert_eq!(d.root, Some(index_of(&arena, 30)));
        assert_eq!(d.parent, Some(index_of(&arena, 30)));
        assert_eq!(d.diff, 1);
        assert_eq!(keys(&arena, d.root), vec![20, 30, 70]);
        check(&arena, d.root);
    }

    #[test]
    fn release_keeps_arena_dense() {
        let (mut arena, root) = build(&[5, 3, 8, 1, 4]);
        let n = index_of(&arena, 3);
        let d = detach(&mut arena, root.unwrap(), n);
        let (node, root) = release(&mut arena, d.root, n);
        assert_eq!(node.k, 3);
        assert_eq!(arena.len(), 4);
        assert_eq!(keys(&arena, root), vec![1, 4, 5, 8]);
        check(&arena, root);
    }

    #[test]
    fn release_moves_root_when_root_is_last_slot() {
        let (mut arena, root) = build(&[5, 3]);
        let d = detach(&mut arena, root.unwrap(), 0);
        assert_eq!(d.root, Some(1));
        let (node, root) = release(&mut arena, d.root, 0);
        assert_eq!(node.k, 5);
        assert_eq!(root, Some(0));
        assert_eq!(keys(&arena, root), vec![3]);
    }

    #[test]
    fn is_balanced_checks_heights() {
        let (arena, root) = build(&[2, 1, 3]);
        assert!(is_balanced(&arena, root));
        let (arena, root) = build(&[1, 2, 3]);
        assert!(!is_balanced(&arena, root));
        assert!(is_balanced(&arena, None));
    }

    #[test]
    fn assert_bst_flags_broken_links() {
        let (mut arena, root) = build(&[2, 1, 3]);
        arena[1].p = None;
        assert_eq!(
            assert_bst(&arena, root, |n: &BstNode<i32, i32>| &n.k, cmp),
            Err(InvariantError::BrokenParentLink { node: 0 })
        );
    }
}
