use num_traits::float::FloatCore;

use crate::{
    balance::Balance,
    node::{NIL, NodePool},
    rotation::{rotate_left, rotate_right},
};

/// Height-balanced (AVL) policy.
///
/// Every node stores the height of its subtree; after an insert or a remove the
/// heights of the two children of every node on the path differ by at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Avl;

impl Avl {
    #[inline]
    fn height<T: FloatCore>(pool: &NodePool<T, u32>, idx: usize) -> u32 {
        if idx == NIL { 0 } else { pool.tag(idx) }
    }

    /// `height(left) - height(right)`, zero for an empty link.
    #[inline]
    fn balance_factor<T: FloatCore>(pool: &NodePool<T, u32>, idx: usize) -> i64 {
        if idx == NIL {
            return 0;
        }
        i64::from(Self::height(pool, pool.left(idx))) - i64::from(Self::height(pool, pool.right(idx)))
    }

    /// Applies the single or double rotation that brings `idx` back within
    /// balance. The heavy grandchild side is read from the child's balance
    /// factor, which matches insertion routing and also covers removals.
    fn rebalance<T: FloatCore>(pool: &mut NodePool<T, u32>, idx: usize) -> usize {
        let balance = Self::balance_factor(pool, idx);

        if balance > 1 {
            let left = pool.left(idx);
            if Self::balance_factor(pool, left) < 0 {
                let lifted = rotate_left::<T, Self>(pool, left);
                pool.set_left(idx, lifted);
            }
            return rotate_right::<T, Self>(pool, idx);
        }

        if balance < -1 {
            let right = pool.right(idx);
            if Self::balance_factor(pool, right) > 0 {
                let lifted = rotate_right::<T, Self>(pool, right);
                pool.set_right(idx, lifted);
            }
            return rotate_left::<T, Self>(pool, idx);
        }

        idx
    }

    #[cfg(test)]
    fn verify_height<T: FloatCore>(pool: &NodePool<T, u32>, idx: usize) -> Option<u32> {
        crate::invariants::fold_subtrees(pool, idx, 0u32, |node, left, right| {
            if left.abs_diff(right) > 1 {
                return None;
            }
            let height = 1 + left.max(right);
            (pool.tag(node) == height).then_some(height)
        })
    }
}

impl Balance for Avl {
    type Tag = u32;

    const REBALANCES_ON_REMOVE: bool = true;

    #[inline]
    fn leaf_tag() -> u32 {
        1
    }

    #[inline]
    fn refresh<T: FloatCore>(pool: &mut NodePool<T, u32>, idx: usize) {
        let (left, right) = (pool.left(idx), pool.right(idx));
        let height = 1 + Self::height(pool, left).max(Self::height(pool, right));
        pool.set_tag(idx, height);
    }

    fn fix_after_insert<T: FloatCore>(pool: &mut NodePool<T, u32>, idx: usize) -> usize {
        Self::rebalance(pool, idx)
    }

    fn fix_after_remove<T: FloatCore>(pool: &mut NodePool<T, u32>, idx: usize) -> usize {
        Self::rebalance(pool, idx)
    }

    #[cfg(test)]
    fn is_balanced<T: FloatCore>(pool: &NodePool<T, u32>, root: usize) -> bool {
        Self::verify_height(pool, root).is_some()
    }
}
