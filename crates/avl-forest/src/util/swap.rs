use crate::types::Node;

use super::{get_l, get_p, get_r, set_l, set_p, set_r};

/// How two nodes about to trade places are linked to each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjacency {
    /// Neither node is a child of the other.
    Apart,
    /// `x` is the left child of `y`.
    XLeftOfY,
    /// `x` is the right child of `y`.
    XRightOfY,
    /// `y` is the left child of `x`.
    YLeftOfX,
    /// `y` is the right child of `x`.
    YRightOfX,
}

/// Classifies the link between `x` and `y`.
pub fn adjacency<N: Node>(arena: &[N], x: u32, y: u32) -> Adjacency {
    if get_l(arena, y) == Some(x) {
        Adjacency::XLeftOfY
    } else if get_r(arena, y) == Some(x) {
        Adjacency::XRightOfY
    } else if get_l(arena, x) == Some(y) {
        Adjacency::YLeftOfX
    } else if get_r(arena, x) == Some(y) {
        Adjacency::YRightOfX
    } else {
        Adjacency::Apart
    }
}

/// Swaps two node positions in a binary tree and returns the new root.
///
/// Only `p`/`l`/`r` links move; whatever else the nodes carry stays put.
/// Parent/child pairs are handled separately so neither node ends up
/// linked to itself.
pub fn swap<N: Node>(arena: &mut [N], root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }
    match adjacency(arena, x, y) {
        Adjacency::Apart => swap_apart(arena, root, x, y),
        Adjacency::XLeftOfY => swap_with_child(arena, root, y, x, true),
        Adjacency::XRightOfY => swap_with_child(arena, root, y, x, false),
        Adjacency::YLeftOfX => swap_with_child(arena, root, x, y, true),
        Adjacency::YRightOfX => swap_with_child(arena, root, x, y, false),
    }
}

fn swap_apart<N: Node>(arena: &mut [N], root: u32, x: u32, y: u32) -> u32 {
    let xp = get_p(arena, x);
    let xl = get_l(arena, x);
    let xr = get_r(arena, x);
    let yp = get_p(arena, y);
    let yl = get_l(arena, y);
    let yr = get_r(arena, y);

    // Sides are read up front: siblings share a parent, and re-pointing one
    // slot first would confuse the lookup for the other.
    let x_is_left = xp.map(|p| get_l(arena, p) == Some(x));
    let y_is_left = yp.map(|p| get_l(arena, p) == Some(y));

    if let (Some(p), Some(is_left)) = (xp, x_is_left) {
        if is_left {
            set_l(arena, p, Some(y));
        } else {
            set_r(arena, p, Some(y));
        }
    }
    if let (Some(p), Some(is_left)) = (yp, y_is_left) {
        if is_left {
            set_l(arena, p, Some(x));
        } else {
            set_r(arena, p, Some(x));
        }
    }

    set_p(arena, y, xp);
    set_l(arena, y, xl);
    set_r(arena, y, xr);
    set_p(arena, x, yp);
    set_l(arena, x, yl);
    set_r(arena, x, yr);

    for c in [xl, xr].into_iter().flatten() {
        set_p(arena, c, Some(y));
    }
    for c in [yl, yr].into_iter().flatten() {
        set_p(arena, c, Some(x));
    }

    if root == x {
        y
    } else if root == y {
        x
    } else {
        root
    }
}

/// `lower` is the left (`is_left`) or right child of `upper`.
fn swap_with_child<N: Node>(
    arena: &mut [N],
    root: u32,
    upper: u32,
    lower: u32,
    is_left: bool,
) -> u32 {
    let up = get_p(arena, upper);
    let ul = get_l(arena, upper);
    let ur = get_r(arena, upper);
    let ll = get_l(arena, lower);
    let lr = get_r(arena, lower);

    if let Some(p) = up {
        if get_l(arena, p) == Some(upper) {
            set_l(arena, p, Some(lower));
        } else {
            set_r(arena, p, Some(lower));
        }
    }
    set_p(arena, lower, up);

    if is_left {
        set_l(arena, lower, Some(upper));
        set_r(arena, lower, ur);
        if let Some(ur) = ur {
            set_p(arena, ur, Some(lower));
        }
    } else {
        set_r(arena, lower, Some(upper));
        set_l(arena, lower, ul);
        if let Some(ul) = ul {
            set_p(arena, ul, Some(lower));
        }
    }

    set_p(arena, upper, Some(lower));
    set_l(arena, upper, ll);
    set_r(arena, upper, lr);
    for c in [ll, lr].into_iter().flatten() {
        set_p(arena, c, Some(upper));
    }

    if root == upper {
        lower
    } else {
        root
    }
}
