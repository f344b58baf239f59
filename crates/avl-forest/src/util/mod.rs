//! Position-tree (p / l / r) utility functions.
//!
//! Everything here works on a bare arena slice plus node indices and knows
//! nothing about balancing. Navigation is written once per direction pair:
//! `first`/`last` and `next`/`prev` are the same walk with [`Side`] flipped.
//! Key-based helpers take a `key_of` accessor so the same code serves every
//! node layout.

pub mod swap;

use std::cmp::Ordering;

use crate::types::Node;

pub use swap::{adjacency, swap, Adjacency};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Points whichever child slot of `parent` holds `old` at `new`.
#[inline]
pub(crate) fn replace_child<N: Node>(arena: &mut [N], parent: u32, old: u32, new: Option<u32>) {
    if get_l(arena, parent) == Some(old) {
        set_l(arena, parent, new);
    } else {
        set_r(arena, parent, new);
    }
}

/// Direction of a child link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[inline]
pub(crate) fn child<N: Node>(arena: &[N], idx: u32, side: Side) -> Option<u32> {
    match side {
        Side::Left => get_l(arena, idx),
        Side::Right => get_r(arena, idx),
    }
}

/// Follows `side` links down from `root` as far as they go.
fn outermost<N: Node>(arena: &[N], root: Option<u32>, side: Side) -> Option<u32> {
    let mut curr = root?;
    while let Some(c) = child(arena, curr, side) {
        curr = c;
    }
    Some(curr)
}

/// In-order neighbour of `curr` towards `side`.
///
/// With a subtree on that side it is the subtree's outermost node facing
/// back; otherwise it is the first ancestor not reached through its `side`
/// link.
fn neighbour<N: Node>(arena: &[N], curr: u32, side: Side) -> Option<u32> {
    if let Some(c) = child(arena, curr, side) {
        return outermost(arena, Some(c), side.flip());
    }
    let mut curr = curr;
    while let Some(p) = get_p(arena, curr) {
        if child(arena, p, side) != Some(curr) {
            return Some(p);
        }
        curr = p;
    }
    None
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    outermost(arena, root, Side::Left)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    outermost(arena, root, Side::Right)
}

/// In-order successor, `None` past the largest key.
pub fn next<N: Node>(arena: &[N], curr: u32) -> Option<u32> {
    neighbour(arena, curr, Side::Right)
}

/// In-order predecessor, `None` before the smallest key.
pub fn prev<N: Node>(arena: &[N], curr: u32) -> Option<u32> {
    neighbour(arena, curr, Side::Left)
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    let mut stack: Vec<u32> = root.into_iter().collect();
    let mut count = 0;
    while let Some(i) = stack.pop() {
        count += 1;
        stack.extend(get_l(arena, i));
        stack.extend(get_r(arena, i));
    }
    count
}

/// Number of nodes on the longest root-to-leaf path; `0` for an empty tree.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    match root {
        None => 0,
        Some(i) => 1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i))),
    }
}

/// Finds a node by key.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root?;
    loop {
        let side = match comparator(key, key_of(&arena[curr as usize])) {
            Ordering::Equal => return Some(curr),
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
        };
        curr = child(arena, curr, side)?;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Link-only node keyed by a small integer.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub(crate) struct N {
        pub key: i32,
        pub p: Option<u32>,
        pub l: Option<u32>,
        pub r: Option<u32>,
    }

    impl Node for N {
        fn p(&self) -> Option<u32> {
            self.p
        }
        fn l(&self) -> Option<u32> {
            self.l
        }
        fn r(&self) -> Option<u32> {
            self.r
        }
        fn set_p(&mut self, v: Option<u32>) {
            self.p = v;
        }
        fn set_l(&mut self, v: Option<u32>) {
            self.l = v;
        }
        fn set_r(&mut self, v: Option<u32>) {
            self.r = v;
        }
    }

    /// Builds an unbalanced BST by plain descent; returns the arena and root.
    pub(crate) fn build(keys: &[i32]) -> (Vec<N>, Option<u32>) {
        let mut arena: Vec<N> = Vec::new();
        let mut root = None;
        for &key in keys {
            let idx = arena.len() as u32;
            arena.push(N {
                key,
                ..Default::default()
            });
            let Some(mut curr) = root else {
                root = Some(idx);
                continue;
            };
            loop {
                let go_left = key < arena[curr as usize].key;
                let slot = if go_left {
                    get_l(&arena, curr)
                } else {
                    get_r(&arena, curr)
                };
                match slot {
                    Some(c) => curr = c,
                    None => {
                        if go_left {
                            set_l(&mut arena, curr, Some(idx));
                        } else {
                            set_r(&mut arena, curr, Some(idx));
                        }
                        set_p(&mut arena, idx, Some(curr));
                        break;
                    }
                }
            }
        }
        (arena, root)
    }

    pub(crate) fn in_order(arena: &[N], root: Option<u32>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut curr = first(arena, root);
        while let Some(i) = curr {
            out.push(arena[i as usize].key);
            curr = next(arena, i);
        }
        out
    }

    pub(crate) fn idx_of(arena: &[N], key: i32) -> u32 {
        arena.iter().position(|n| n.key == key).unwrap() as u32
    }

    #[test]
    fn first_last_on_empty_tree() {
        let arena: Vec<N> = Vec::new();
        assert_eq!(first(&arena, None), None);
        assert_eq!(last(&arena, None), None);
        assert_eq!(size(&arena, None), 0);
        assert_eq!(height(&arena, None), 0);
    }

    #[test]
    fn next_walks_in_order() {
        let (arena, root) = build(&[50, 30, 70, 20, 40, 60, 80, 35, 45]);
        assert_eq!(in_order(&arena, root), vec![20, 30, 35, 40, 45, 50, 60, 70, 80]);
    }

    #[test]
    fn prev_walks_in_reverse() {
        let (arena, root) = build(&[50, 30, 70, 20, 40, 60, 80, 35, 45]);
        let mut out = Vec::new();
        let mut curr = last(&arena, root);
        while let Some(i) = curr {
            out.push(arena[i as usize].key);
            curr = prev(&arena, i);
        }
        assert_eq!(out, vec![80, 70, 60, 50, 45, 40, 35, 30, 20]);
    }

    #[test]
    fn prev_and_next_are_none_at_the_extremes() {
        let (arena, root) = build(&[2, 1, 3]);
        assert_eq!(prev(&arena, first(&arena, root).unwrap()), None);
        assert_eq!(next(&arena, last(&arena, root).unwrap()), None);
    }

    #[test]
    fn neighbours_climb_through_one_sided_chains() {
        // 10 -> 5 -> 7 -> 6: successor of 7 climbs two levels, predecessor of
        // 6 is its grandparent.
        let (arena, root) = build(&[10, 5, 7, 6]);
        let i7 = idx_of(&arena, 7);
        let i6 = idx_of(&arena, 6);
        assert_eq!(next(&arena, i7), Some(idx_of(&arena, 10)));
        assert_eq!(prev(&arena, i6), Some(idx_of(&arena, 5)));
        assert_eq!(next(&arena, i6), Some(i7));
        assert_eq!(size(&arena, root), 4);
        assert_eq!(size(&arena, Some(idx_of(&arena, 5))), 3);
    }

    #[test]
    fn find_size_and_height() {
        let (arena, root) = build(&[4, 2, 6, 1, 3, 5, 7, 8]);
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        let i5 = find(&arena, root, &5, |n: &N| &n.key, cmp).unwrap();
        assert_eq!(arena[i5 as usize].key, 5);
        assert_eq!(find(&arena, root, &9, |n: &N| &n.key, cmp), None);
        assert_eq!(size(&arena, root), 8);
        assert_eq!(height(&arena, root), 4);
    }
}
