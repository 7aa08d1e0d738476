use num_traits::float::FloatCore;

use crate::{
    balance::Balance,
    node::{NIL, NodePool},
};

/// Recomputes the size counter and the balancing tag of `idx`.
#[inline]
pub(crate) fn refresh_node<T: FloatCore, B: Balance>(pool: &mut NodePool<T, B::Tag>, idx: usize) {
    pool.update_size(idx);
    B::refresh(pool, idx);
}

/// Lifts the right child of `h` above it and returns the new subtree root.
///
/// `h` is refreshed before the new root because the new root's size and tag
/// are computed from it.
pub(crate) fn rotate_left<T: FloatCore, B: Balance>(pool: &mut NodePool<T, B::Tag>, h: usize) -> usize {
    let x = pool.right(h);
    debug_assert!(x != NIL, "left rotation needs a right child");

    let inner = pool.left(x);
    pool.set_right(h, inner);
    pool.set_left(x, h);
    B::on_rotate(pool, h, x);

    refresh_node::<T, B>(pool, h);
    refresh_node::<T, B>(pool, x);
    x
}

/// Lifts the left child of `h` above it and returns the new subtree root.
pub(crate) fn rotate_right<T: FloatCore, B: Balance>(pool: &mut NodePool<T, B::Tag>, h: usize) -> usize {
    let x = pool.left(h);
    debug_assert!(x != NIL, "right rotation needs a left child");

    let inner = pool.right(x);
    pool.set_left(h, inner);
    pool.set_right(x, h);
    B::on_rotate(pool, h, x);

    refresh_node::<T, B>(pool, h);
    refresh_node::<T, B>(pool, x);
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::{Avl, Color, LeftLeaningRedBlack};
    use alloc::{vec, vec::Vec};
    use ordered_float::OrderedFloat;

    fn in_order<G: Copy>(pool: &NodePool<f64, G>, idx: usize, out: &mut Vec<f64>) {
        if idx == NIL {
            return;
        }
        in_order(pool, pool.left(idx), out);
        out.push(pool.key(idx).into_inner());
        in_order(pool, pool.right(idx), out);
    }

    /// Builds the right-leaning chain 1 -> 2 -> 3 with correct sizes and heights.
    fn right_chain() -> (NodePool<f64, u32>, usize) {
        let mut pool = NodePool::new();
        let a = pool.allocate(OrderedFloat(1.0), 1);
        let b = pool.allocate(OrderedFloat(2.0), 1);
        let c = pool.allocate(OrderedFloat(3.0), 1);
        pool.set_right(b, c);
        pool.set_right(a, b);
        refresh_node::<f64, Avl>(&mut pool, b);
        refresh_node::<f64, Avl>(&mut pool, a);
        (pool, a)
    }

    #[test]
    fn test_rotate_left_relinks_and_refreshes() {
        let (mut pool, root) = right_chain();
        assert_eq!(pool.tag(root), 3);

        let new_root = rotate_left::<f64, Avl>(&mut pool, root);

        assert_eq!(pool.key(new_root), OrderedFloat(2.0));
        assert_eq!(pool.left(new_root), root);
        assert_eq!(pool.size(new_root), 3);
        assert_eq!(pool.size(root), 1);
        assert_eq!(pool.tag(new_root), 2);
        assert_eq!(pool.tag(root), 1);

        let mut keys = Vec::new();
        in_order(&pool, new_root, &mut keys);
        assert_eq!(keys, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rotate_right_undoes_rotate_left() {
        let (mut pool, root) = right_chain();
        let lifted = rotate_left::<f64, Avl>(&mut pool, root);
        let restored = rotate_right::<f64, Avl>(&mut pool, lifted);

        assert_eq!(restored, root);
        assert_eq!(pool.size(restored), 3);
        assert_eq!(pool.tag(restored), 3);
        assert_eq!(pool.left(restored), NIL);

        let mut keys = Vec::new();
        in_order(&pool, restored, &mut keys);
        assert_eq!(keys, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rotation_moves_inner_subtree() {
        // 4 with left 2, which has children 1 and 3
        let mut pool = NodePool::<f64, u32>::new();
        let four = pool.allocate(OrderedFloat(4.0), 1);
        let two = pool.allocate(OrderedFloat(2.0), 1);
        let one = pool.allocate(OrderedFloat(1.0), 1);
        let three = pool.allocate(OrderedFloat(3.0), 1);
        pool.set_left(two, one);
        pool.set_right(two, three);
        pool.set_left(four, two);
        refresh_node::<f64, Avl>(&mut pool, two);
        refresh_node::<f64, Avl>(&mut pool, four);

        let root = rotate_right::<f64, Avl>(&mut pool, four);

        assert_eq!(root, two);
        assert_eq!(pool.left(four), three);
        assert_eq!(pool.size(four), 2);
        assert_eq!(pool.size(two), 4);
        assert_eq!(pool.tag(two), 3);
    }

    #[test]
    fn test_rotation_transfers_color() {
        let mut pool = NodePool::<f64, Color>::new();
        let h = pool.allocate(OrderedFloat(1.0), Color::Black);
        let x = pool.allocate(OrderedFloat(2.0), Color::Red);
        pool.set_right(h, x);
        refresh_node::<f64, LeftLeaningRedBlack>(&mut pool, h);

        let root = rotate_left::<f64, LeftLeaningRedBlack>(&mut pool, h);

        assert_eq!(root, x);
        assert_eq!(pool.tag(x), Color::Black);
        assert_eq!(pool.tag(h), Color::Red);
        assert_eq!(pool.size(x), 2);
    }
}
