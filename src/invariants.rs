//! Structural validators for tests. Never called from library code paths.

use alloc::vec::Vec;
use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;

use crate::{
    node::{NIL, NodePool},
    traversal::Iter,
};

/// Folds the subtree at `root` bottom-up without recursion.
///
/// `combine` receives a node together with the results of its left and right
/// children, `empty` standing in for a missing child. The fold stops with
/// `None` at the first node `combine` rejects.
pub(crate) fn fold_subtrees<T: FloatCore, G: Copy, R: Copy>(
    pool: &NodePool<T, G>,
    root: usize,
    empty: R,
    mut combine: impl FnMut(usize, R, R) -> Option<R>,
) -> Option<R> {
    // Reversed post-order: every node lands after both of its subtrees.
    let mut pending = Vec::new();
    let mut reversed = Vec::new();
    if root != NIL {
        pending.push(root);
    }
    while let Some(node) = pending.pop() {
        reversed.push(node);
        for child in [pool.left(node), pool.right(node)] {
            if child != NIL {
                pending.push(child);
            }
        }
    }

    let mut results: Vec<R> = Vec::new();
    for &node in reversed.iter().rev() {
        let right = if pool.right(node) == NIL { empty } else { results.pop()? };
        let left = if pool.left(node) == NIL { empty } else { results.pop()? };
        results.push(combine(node, left, right)?);
    }

    Some(results.pop().unwrap_or(empty))
}

/// Checks `size(n) = 1 + size(left) + size(right)` for every node below `node`.
pub(crate) fn sizes_consistent<T: FloatCore, G: Copy>(pool: &NodePool<T, G>, node: usize) -> bool {
    fold_subtrees(pool, node, 0usize, |idx, left, right| {
        let total = 1 + left + right;
        (pool.size(idx) == total).then_some(total)
    })
    .is_some()
}

/// Checks that an in-order walk of `node` yields non-decreasing keys.
pub(crate) fn keys_sorted<T: FloatCore, G: Copy>(pool: &NodePool<T, G>, node: usize) -> bool {
    let mut previous: Option<T> = None;
    Iter::new(pool, node).all(|key| {
        let ordered = previous.is_none_or(|prev| OrderedFloat(prev) <= OrderedFloat(key));
        previous = Some(key);
        ordered
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_consistent_detects_stale_counter() {
        let mut pool = NodePool::<f64, ()>::new();
        let root = pool.allocate(OrderedFloat(2.0), ());
        let left = pool.allocate(OrderedFloat(1.0), ());
        pool.set_left(root, left);
        assert!(!sizes_consistent(&pool, root));

        pool.update_size(root);
        assert!(sizes_consistent(&pool, root));
        assert!(sizes_consistent(&pool, NIL));
    }

    #[test]
    fn test_fold_subtrees_handles_deep_spines() {
        let mut pool = NodePool::<f64, ()>::new();
        let mut root = NIL;
        for i in 0..200_000 {
            let node = pool.allocate(OrderedFloat(f64::from(i)), ());
            pool.set_left(node, root);
            pool.update_size(node);
            root = node;
        }

        assert!(sizes_consistent(&pool, root));
        assert!(keys_sorted(&pool, root));

        let depth = fold_subtrees(&pool, root, 0usize, |_, left, right| Some(1 + left.max(right)));
        assert_eq!(depth, Some(200_000));
    }

    #[test]
    fn test_keys_sorted_detects_misplaced_key() {
        let mut pool = NodePool::<f64, ()>::new();
        let root = pool.allocate(OrderedFloat(2.0), ());
        let right = pool.allocate(OrderedFloat(1.0), ());
        pool.set_right(root, right);
        pool.update_size(root);
        assert!(!keys_sorted(&pool, root));

        pool.node_at_mut(right).key = OrderedFloat(2.0);
        assert!(keys_sorted(&pool, root));
    }
}
