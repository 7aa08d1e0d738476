use num_traits::float::FloatCore;

use crate::{
    balance::Balance,
    node::{NIL, NodePool},
    rotation::{rotate_left, rotate_right},
};

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// In the left-leaning variant a red node is glued to its parent as part of a
/// 3-node, and red links only ever lean left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node - bound to its parent, never a right child, never above another red on the left
    Red,
    /// Black node - contributes to black height
    Black,
}

impl Color {
    /// The opposite color.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// Left-leaning red-black policy.
///
/// Insertion repairs colors with the three local cases of the left-leaning
/// variant and keeps perfect black balance. Removal is a plain BST removal:
/// sizes stay exact, but colors are not repaired, so after removals the height
/// bound is no longer guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeftLeaningRedBlack;

impl LeftLeaningRedBlack {
    #[inline]
    fn is_red<T: FloatCore>(pool: &NodePool<T, Color>, idx: usize) -> bool {
        idx != NIL && pool.tag(idx) == Color::Red
    }

    /// Splits a temporary 4-node by inverting `idx` and both of its children.
    fn flip_colors<T: FloatCore>(pool: &mut NodePool<T, Color>, idx: usize) {
        let flipped = pool.tag(idx).flip();
        pool.set_tag(idx, flipped);

        for child in [pool.left(idx), pool.right(idx)] {
            if child != NIL {
                let flipped = pool.tag(child).flip();
                pool.set_tag(child, flipped);
            }
        }
    }

    /// Returns the black height of the subtree, or `None` when a color rule is
    /// broken anywhere below `idx`.
    #[cfg(test)]
    fn verify_black_height<T: FloatCore>(pool: &NodePool<T, Color>, idx: usize) -> Option<usize> {
        crate::invariants::fold_subtrees(pool, idx, 1usize, |node, left_height, right_height| {
            if Self::is_red(pool, pool.right(node)) {
                return None;
            }

            if Self::is_red(pool, node) && Self::is_red(pool, pool.left(node)) {
                return None;
            }

            if left_height != right_height {
                return None;
            }

            if Self::is_red(pool, node) {
                Some(left_height)
            } else {
                Some(left_height + 1)
            }
        })
    }
}

impl Balance for LeftLeaningRedBlack {
    type Tag = Color;

    const REBALANCES_ON_REMOVE: bool = false;

    #[inline]
    fn leaf_tag() -> Color {
        Color::Red
    }

    #[inline]
    fn on_rotate<T: FloatCore>(pool: &mut NodePool<T, Color>, old_root: usize, new_root: usize) {
        let color = pool.tag(old_root);
        pool.set_tag(new_root, color);
        pool.set_tag(old_root, Color::Red);
    }

    fn fix_after_insert<T: FloatCore>(pool: &mut NodePool<T, Color>, idx: usize) -> usize {
        let mut h = idx;

        if Self::is_red(pool, pool.right(h)) && !Self::is_red(pool, pool.left(h)) {
            h = rotate_left::<T, Self>(pool, h);
        }

        let left = pool.left(h);
        if Self::is_red(pool, left) && Self::is_red(pool, pool.left(left)) {
            h = rotate_right::<T, Self>(pool, h);
        }

        if Self::is_red(pool, pool.left(h)) && Self::is_red(pool, pool.right(h)) {
            Self::flip_colors(pool, h);
        }

        h
    }

    #[inline]
    fn fix_after_remove<T: FloatCore>(_pool: &mut NodePool<T, Color>, idx: usize) -> usize {
        idx
    }

    #[inline]
    fn settle_root<T: FloatCore>(pool: &mut NodePool<T, Color>, root: usize) {
        if root != NIL {
            pool.set_tag(root, Color::Black);
        }
    }

    #[cfg(test)]
    fn is_balanced<T: FloatCore>(pool: &NodePool<T, Color>, root: usize) -> bool {
        if root == NIL {
            return true;
        }

        !Self::is_red(pool, root) && Self::verify_black_height(pool, root).is_some()
    }
}
