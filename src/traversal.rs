use alloc::vec::Vec;
use core::iter::FusedIterator;
use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;

use crate::node::{NIL, NodePool};

/// Appends every key in `[lo, hi]` of the subtree at `node` to `out`, ascending.
///
/// A left subtree is skipped only when it cannot hold a qualifying key, and the
/// walk stops at the first key above `hi`. Rotations can leave keys equal to a
/// node in its left subtree, so the lower bound is compared inclusively.
pub(crate) fn range_query<T: FloatCore, G: Copy>(
    pool: &NodePool<T, G>,
    node: usize,
    lo: OrderedFloat<T>,
    hi: OrderedFloat<T>,
    out: &mut Vec<T>,
) {
    let mut stack = Vec::new();
    let mut current = node;

    loop {
        while current != NIL {
            stack.push(current);
            current = if lo <= pool.key(current) {
                pool.left(current)
            } else {
                NIL
            };
        }

        let Some(top) = stack.pop() else {
            break;
        };

        let key = pool.key(top);
        if key > hi {
            break;
        }
        if lo <= key {
            out.push(key.into_inner());
        }
        current = pool.right(top);
    }
}

/// Number of nodes on the longest root-to-leaf path.
pub(crate) fn height<T: FloatCore, G: Copy>(pool: &NodePool<T, G>, node: usize) -> usize {
    let mut deepest: usize = 0;
    let mut stack = Vec::new();
    if node != NIL {
        stack.push((node, 1usize));
    }

    while let Some((current, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        for child in [pool.left(current), pool.right(current)] {
            if child != NIL {
                stack.push((child, depth + 1));
            }
        }
    }

    deepest
}

/// Iterator over the keys of a tree, ascending from the front and descending
/// from the back.
///
/// Created by [`OrderStatisticTree::iter`](crate::OrderStatisticTree::iter).
#[derive(Debug, Clone)]
pub struct Iter<'a, T, G> {
    /// Pool the walked tree lives in
    pool: &'a NodePool<T, G>,
    /// Ancestors whose key and right subtree are still pending
    front: Vec<usize>,
    /// Ancestors whose key and left subtree are still pending
    back: Vec<usize>,
    /// Keys not yet yielded from either end
    remaining: usize,
}

impl<'a, T: FloatCore, G: Copy> Iter<'a, T, G> {
    pub(crate) fn new(pool: &'a NodePool<T, G>, root: usize) -> Self {
        let mut iter = Self {
            pool,
            front: Vec::new(),
            back: Vec::new(),
            remaining: pool.size(root),
        };
        iter.push_left_spine(root);
        iter.push_right_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: usize) {
        while node != NIL {
            self.front.push(node);
            node = self.pool.left(node);
        }
    }

    fn push_right_spine(&mut self, mut node: usize) {
        while node != NIL {
            self.back.push(node);
            node = self.pool.right(node);
        }
    }
}

impl<T: FloatCore, G: Copy> Iterator for Iter<'_, T, G> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        let right = self.pool.right(node);
        self.push_left_spine(right);
        self.remaining -= 1;
        Some(self.pool.key(node).into_inner())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: FloatCore, G: Copy> DoubleEndedIterator for Iter<'_, T, G> {
    fn next_back(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        let left = self.pool.left(node);
        self.push_right_spine(left);
        self.remaining -= 1;
        Some(self.pool.key(node).into_inner())
    }
}

impl<T: FloatCore, G: Copy> ExactSizeIterator for Iter<'_, T, G> {}

impl<T: FloatCore, G: Copy> FusedIterator for Iter<'_, T, G> {}
