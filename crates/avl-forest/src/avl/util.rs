use std::cmp::Ordering;

use tracing::trace;

use crate::bst::assert_bst;
use crate::error::InvariantError;
use crate::util::{get_l, get_p, get_r, height, replace_child, set_l, set_p, set_r};

use super::types::AvlNodeLike;

#[inline]
fn bf<N: AvlNodeLike>(arena: &[N], i: u32) -> i8 {
    arena[i as usize].bf()
}

#[inline]
fn set_bf<N: AvlNodeLike>(arena: &mut [N], i: u32, v: i8) {
    arena[i as usize].set_bf(v);
}

/// Rotates `x` down to the left; its right child takes its place.
///
/// Returns the new root. Balance factors are left for the caller to set.
pub fn rotate_left<N: AvlNodeLike>(arena: &mut [N], root: u32, x: u32) -> u32 {
    let Some(r) = get_r(arena, x) else {
        return root;
    };
    let p = get_p(arena, x);
    let rl = get_l(arena, r);

    set_r(arena, x, rl);
    if let Some(rl) = rl {
        set_p(arena, rl, Some(x));
    }
    set_p(arena, r, p);
    if let Some(p) = p {
        replace_child(arena, p, x, Some(r));
    }
    set_l(arena, r, Some(x));
    set_p(arena, x, Some(r));

    trace!(pivot = x, child = r, "rotate left");
    if p.is_none() {
        r
    } else {
        root
    }
}

/// Mirror image of [`rotate_left`].
pub fn rotate_right<N: AvlNodeLike>(arena: &mut [N], root: u32, x: u32) -> u32 {
    let Some(l) = get_l(arena, x) else {
        return root;
    };
    let p = get_p(arena, x);
    let lr = get_r(arena, l);

    set_l(arena, x, lr);
    if let Some(lr) = lr {
        set_p(arena, lr, Some(x));
    }
    set_p(arena, l, p);
    if let Some(p) = p {
        replace_child(arena, p, x, Some(l));
    }
    set_r(arena, l, Some(x));
    set_p(arena, x, Some(l));

    trace!(pivot = x, child = l, "rotate right");
    if p.is_none() {
        l
    } else {
        root
    }
}

/// Single rotation at `top` lifting its child on the `lean_left` side.
fn rotate_single<N: AvlNodeLike>(arena: &mut [N], root: u32, top: u32, lean_left: bool) -> u32 {
    if lean_left {
        rotate_right(arena, root, top)
    } else {
        rotate_left(arena, root, top)
    }
}

/// Double rotation lifting `low`, the inner child of `top`'s child `mid`, to
/// the top of the subtree, then settling all three balance factors.
///
/// The outcome depends only on `low`'s balance before rotating: its lighter
/// side's new sibling picks up the slack.
fn rotate_double<N: AvlNodeLike>(
    arena: &mut [N],
    root: u32,
    top: u32,
    mid: u32,
    low: u32,
    lean_left: bool,
) -> u32 {
    let low_bf = bf(arena, low);
    let root = if lean_left {
        let root = rotate_left(arena, root, mid);
        rotate_right(arena, root, top)
    } else {
        let root = rotate_right(arena, root, mid);
        rotate_left(arena, root, top)
    };

    let (left, right) = if lean_left { (mid, top) } else { (top, mid) };
    set_bf(arena, left, if low_bf > 0 { -1 } else { 0 });
    set_bf(arena, right, if low_bf < 0 { 1 } else { 0 });
    set_bf(arena, low, 0);
    root
}

/// Restores balance after `n` was linked as a new leaf. Returns the new root.
pub fn insert_fix<N: AvlNodeLike>(arena: &mut [N], root: u32, n: u32) -> u32 {
    let Some(p) = get_p(arena, n) else {
        return root;
    };

    // `n` filled the only empty slot of a leaning parent.
    if bf(arena, p) != 0 {
        set_bf(arena, p, 0);
        return root;
    }
    let pbf = if get_l(arena, p) == Some(n) { -1 } else { 1 };
    set_bf(arena, p, pbf);

    let mut parent = p;
    let mut node = n;
    loop {
        let Some(g) = get_p(arena, parent) else {
            return root;
        };
        let parent_is_left = get_l(arena, g) == Some(parent);
        let gbf = bf(arena, g) + if parent_is_left { -1 } else { 1 };
        set_bf(arena, g, gbf);

        match gbf {
            0 => return root,
            -1 | 1 => {
                node = parent;
                parent = g;
            }
            _ => {
                let node_is_left = get_l(arena, parent) == Some(node);
                let root = if node_is_left == parent_is_left {
                    let root = rotate_single(arena, root, g, parent_is_left);
                    set_bf(arena, parent, 0);
                    set_bf(arena, g, 0);
                    root
                } else {
                    rotate_double(arena, root, g, parent, node, parent_is_left)
                };
                trace!(node = g, "insert fixup settled by rotation");
                return root;
            }
        }
    }
}

/// Restores balance after a subtree under `node` shrank by one level.
///
/// `diff` is `+1` when the shrunk subtree is `node`'s left one and `-1` when
/// it is the right one. Walks upward until a level absorbs the change or the
/// root is passed. Returns the new root.
pub fn remove_fix<N: AvlNodeLike>(arena: &mut [N], root: u32, node: u32, diff: i8) -> u32 {
    let mut root = root;
    let mut cursor = Some(node);
    let mut diff = diff;

    while let Some(n) = cursor {
        let parent = get_p(arena, n);
        let ndiff = match parent {
            Some(p) if get_l(arena, p) == Some(n) => 1,
            _ => -1,
        };

        let total = bf(arena, n) + diff;
        match total {
            -1 | 1 => {
                set_bf(arena, n, total);
                return root;
            }
            0 => set_bf(arena, n, 0),
            _ => {
                let lean_left = total < 0;
                let lean: i8 = if lean_left { -1 } else { 1 };
                let child = if lean_left {
                    get_l(arena, n)
                } else {
                    get_r(arena, n)
                };
                let Some(child) = child else {
                    unreachable!("node {n} is heavy on a side with no child");
                };

                let cbf = bf(arena, child);
                if cbf == lean {
                    root = rotate_single(arena, root, n, lean_left);
                    set_bf(arena, n, 0);
                    set_bf(arena, child, 0);
                } else if cbf == 0 {
                    root = rotate_single(arena, root, n, lean_left);
                    set_bf(arena, n, lean);
                    set_bf(arena, child, -lean);
                    trace!(node = n, "remove fixup absorbed by rotation");
                    return root;
                } else {
                    let grandchild = if lean_left {
                        get_r(arena, child)
                    } else {
                        get_l(arena, child)
                    };
                    let Some(grandchild) = grandchild else {
                        unreachable!("child {child} leans towards a missing subtree");
                    };
                    root = rotate_double(arena, root, n, child, grandchild, lean_left);
                }
            }
        }

        cursor = parent;
        diff = ndiff;
    }

    root
}

/// Checks links, ordering, and that every stored balance factor equals the
/// real height difference and lies in `-1..=1`.
pub fn assert_avl_tree<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key_of: F,
    comparator: C,
) -> Result<(), InvariantError>
where
    N: AvlNodeLike,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    assert_bst(arena, root, key_of, comparator)?;

    let mut stack: Vec<u32> = root.into_iter().collect();
    while let Some(i) = stack.pop() {
        let l = get_l(arena, i);
        let r = get_r(arena, i);
        let expected = height(arena, r) as i64 - height(arena, l) as i64;
        let actual = bf(arena, i);
        if i64::from(actual) != expected {
            return Err(InvariantError::BalanceMismatch {
                node: i,
                expected,
                actual,
            });
        }
        if !(-1..=1).contains(&actual) {
            return Err(InvariantError::Unbalanced { node: i });
        }
        stack.extend(l);
        stack.extend(r);
    }

    Ok(())
}
