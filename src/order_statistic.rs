use num_traits::float::FloatCore;

use crate::node::{NIL, NodePool};

/// Returns the `k`-th smallest key (0-indexed) of the subtree rooted at `node`.
///
/// Walks down from `node` using the subtree sizes: with `t` elements on the
/// left, rank `k < t` lies on the left, `k == t` is the node itself and
/// `k > t` lies on the right at rank `k - t - 1`.
///
/// # Returns
///
/// * `Option<T>` - The key, or `None` if `k` is not below the subtree size
pub(crate) fn select<T: FloatCore, G: Copy>(pool: &NodePool<T, G>, node: usize, k: usize) -> Option<T> {
    if k >= pool.size(node) {
        return None;
    }

    let mut current = node;
    let mut remaining_rank = k;

    while current != NIL {
        let left_count = pool.size(pool.left(current));

        if remaining_rank < left_count {
            current = pool.left(current);
        } else if remaining_rank == left_count {
            return Some(pool.key(current).into_inner());
        } else {
            remaining_rank -= left_count + 1;
            current = pool.right(current);
        }
    }

    None
}

/// Returns the median of the subtree rooted at `root`: the middle key for an
/// odd count, the mean of the two middle keys for an even count.
///
/// # Returns
///
/// * `Option<T>` - The median, or `None` if the subtree is empty
pub(crate) fn median<T: FloatCore, G: Copy>(pool: &NodePool<T, G>, root: usize) -> Option<T> {
    let len = pool.size(root);
    if len == 0 {
        return None;
    }

    let mid = len / 2;
    if len % 2 == 0 {
        let _2 = T::one() + T::one();
        Some((select(pool, root, mid - 1)? + select(pool, root, mid)?) / _2)
    } else {
        select(pool, root, mid)
    }
}

/// Returns the key at the floor rank of `q * (n - 1)`, with `q` clamped to
/// `[0, 1]`. A NaN `q` selects the smallest key.
pub(crate) fn quantile<T: FloatCore, G: Copy>(pool: &NodePool<T, G>, root: usize, q: f64) -> Option<T> {
    let len = pool.size(root);
    if len == 0 {
        return None;
    }

    let clamped_q = q.clamp(0.0, 1.0);
    let target_index = if clamped_q >= 1.0 {
        len - 1
    } else if clamped_q > 0.0 {
        let exact_position = clamped_q * (len - 1) as f64;
        exact_position as usize
    } else {
        0
    };

    select(pool, root, target_index)
}
