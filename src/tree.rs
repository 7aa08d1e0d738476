use alloc::vec::Vec;
use core::{cmp::Ordering, marker::PhantomData};
use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;

#[cfg(test)]
use crate::invariants;
use crate::{
    balance::{Avl, Balance, LeftLeaningRedBlack},
    node::{NIL, NodePool},
    order_statistic,
    rotation::refresh_node,
    traversal::{self, Iter},
};

/// Order-statistic tree balanced with the AVL policy.
pub type AvlTree<T> = OrderStatisticTree<T, Avl>;

/// Order-statistic tree balanced with the left-leaning red-black policy.
pub type RedBlackTree<T> = OrderStatisticTree<T, LeftLeaningRedBlack>;

/// A self-balancing binary search tree whose nodes count their subtrees.
///
/// The subtree sizes let the tree answer k-th smallest and median queries in
/// O(log n) next to the usual ordered operations. Values are floating point
/// numbers ordered through `OrderedFloat`; duplicates are kept and always
/// descend to the right on insertion.
///
/// The balancing policy is chosen by the `B` type parameter, see [`AvlTree`]
/// and [`RedBlackTree`].
///
/// # Type Parameters
///
/// * `T` - A floating point type that implements `FloatCore`
/// * `B` - The balancing policy
#[derive(Debug, Clone)]
pub struct OrderStatisticTree<T, B: Balance> {
    /// Arena holding every node of this tree
    pool: NodePool<T, B::Tag>,

    /// Index of the root node (`NIL` when empty)
    root: usize,

    /// Set once a removal left the policy's balance invariant unrepaired
    balance_degraded: bool,

    _balance: PhantomData<B>,
}

impl<T: FloatCore, B: Balance> Default for OrderStatisticTree<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatCore, B: Balance> OrderStatisticTree<T, B> {
    /// Creates an empty tree.
    pub const fn new() -> Self {
        Self {
            pool: NodePool::new(),
            root: NIL,
            balance_degraded: false,
            _balance: PhantomData,
        }
    }

    /// Creates an empty tree with room for `capacity` values before the node
    /// arena reallocates.
    ///
    /// # Arguments
    ///
    /// * `capacity` - The number of values to pre-allocate for
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: NodePool::with_capacity(capacity),
            root: NIL,
            balance_degraded: false,
            _balance: PhantomData,
        }
    }

    /// Returns the number of values stored, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.pool.size(self.root)
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Returns the number of values the node arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Inserts a value. Always succeeds; equal values are stored side by side.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to insert
    pub fn insert(&mut self, value: T) {
        let key = OrderedFloat(value);
        let len_before = self.len();
        let mut path = Vec::new();
        let mut current = self.root;

        while current != NIL {
            let side = if key < self.pool.key(current) {
                Ordering::Less
            } else {
                Ordering::Greater
            };
            path.push((current, side));
            current = self.child(current, side);
        }

        let leaf = self.pool.allocate(key, B::leaf_tag());
        self.root = self.unwind(&mut path, leaf, B::fix_after_insert::<T>);
        B::settle_root(&mut self.pool, self.root);

        debug_assert_eq!(self.len(), len_before + 1, "size counters out of step after insertion");
        debug_assert_eq!(self.pool.live(), self.len(), "arena out of step after insertion");
    }

    /// Removes one occurrence of a value.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to remove
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if an occurrence was removed, `false` if the value was absent
    pub fn remove(&mut self, value: T) -> bool {
        let key = OrderedFloat(value);
        let len_before = self.len();
        let mut path = Vec::new();
        let mut current = self.root;

        while current != NIL {
            match key.cmp(&self.pool.key(current)) {
                Ordering::Equal => break,
                side => {
                    path.push((current, side));
                    current = self.child(current, side);
                }
            }
        }

        if current == NIL {
            return false;
        }

        let (left, right) = (self.pool.left(current), self.pool.right(current));
        let replacement = if left == NIL || right == NIL {
            self.pool.release(current);
            if left == NIL { right } else { left }
        } else {
            // Two children: take the successor's key, then unlink the successor.
            path.push((current, Ordering::Greater));
            let mut successor = right;
            while self.pool.left(successor) != NIL {
                path.push((successor, Ordering::Less));
                successor = self.pool.left(successor);
            }

            let successor_key = self.pool.key(successor);
            self.pool.node_at_mut(current).key = successor_key;
            let orphan = self.pool.right(successor);
            self.pool.release(successor);
            orphan
        };

        self.root = self.unwind(&mut path, replacement, B::fix_after_remove::<T>);
        B::settle_root(&mut self.pool, self.root);

        if !B::REBALANCES_ON_REMOVE {
            self.balance_degraded = true;
        }

        debug_assert_eq!(self.len() + 1, len_before, "size counters out of step after removal");
        debug_assert_eq!(self.pool.live(), self.len(), "arena out of step after removal");

        true
    }

    /// Returns `true` if at least one occurrence of `value` is stored.
    pub fn contains(&self, value: T) -> bool {
        let value = OrderedFloat(value);
        let mut current = self.root;

        while current != NIL {
            match value.cmp(&self.pool.key(current)) {
                Ordering::Equal => return true,
                Ordering::Less => current = self.pool.left(current),
                Ordering::Greater => current = self.pool.right(current),
            }
        }
        false
    }

    /// Returns the `k`-th smallest value, counting from zero.
    ///
    /// # Arguments
    ///
    /// * `k` - The 0-indexed rank
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The value, or `None` if `k >= len()`
    pub fn select(&self, k: usize) -> Option<T> {
        order_statistic::select(&self.pool, self.root, k)
    }

    /// Returns the median: the middle value for an odd count, the mean of the
    /// two middle values for an even count.
    ///
    /// An empty tree reports `0`. Use [`try_median`](Self::try_median) or check
    /// [`len`](Self::len) to tell an empty tree apart from a median of zero.
    pub fn median(&self) -> T {
        self.try_median().unwrap_or_else(T::zero)
    }

    /// Returns the median, or `None` for an empty tree.
    pub fn try_median(&self) -> Option<T> {
        order_statistic::median(&self.pool, self.root)
    }

    /// Returns the value at the floor rank of `q * (len - 1)`.
    ///
    /// # Arguments
    ///
    /// * `q` - The quantile, clamped to `[0, 1]`
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The quantile, or `None` if the tree is empty
    pub fn quantile(&self, q: f64) -> Option<T> {
        order_statistic::quantile(&self.pool, self.root, q)
    }

    /// Returns the `p`-th percentile, see [`quantile`](Self::quantile).
    pub fn percentile(&self, p: f64) -> Option<T> {
        self.quantile(p / 100.0)
    }

    /// Returns the smallest value, or `None` if the tree is empty.
    pub fn min(&self) -> Option<T> {
        if self.root == NIL {
            return None;
        }
        Some(self.pool.key(self.pool.min_node(self.root)).into_inner())
    }

    /// Returns the largest value, or `None` if the tree is empty.
    pub fn max(&self) -> Option<T> {
        if self.root == NIL {
            return None;
        }
        Some(self.pool.key(self.pool.max_node(self.root)).into_inner())
    }

    /// Returns every value in `[lo, hi]` in ascending order.
    ///
    /// # Arguments
    ///
    /// * `lo` - The inclusive lower bound
    /// * `hi` - The inclusive upper bound
    ///
    /// # Returns
    ///
    /// * `Vec<T>` - The matching values, empty when none match or `lo > hi`
    pub fn range_query(&self, lo: T, hi: T) -> Vec<T> {
        let mut out = Vec::new();
        traversal::range_query(&self.pool, self.root, OrderedFloat(lo), OrderedFloat(hi), &mut out);
        out
    }

    /// Returns the `k` smallest values in ascending order, or every value if
    /// `k` exceeds the length.
    pub fn k_smallest(&self, k: usize) -> Vec<T> {
        self.iter().take(k).collect()
    }

    /// Returns the `k` largest values in descending order, or every value if
    /// `k` exceeds the length.
    pub fn k_largest(&self, k: usize) -> Vec<T> {
        self.iter().rev().take(k).collect()
    }

    /// Returns every value in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Returns an ascending iterator over the values. Reverse it for
    /// descending order.
    pub fn iter(&self) -> Iter<'_, T, B::Tag> {
        Iter::new(&self.pool, self.root)
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        traversal::height(&self.pool, self.root)
    }

    /// Returns `true` while the policy's height bound is known to hold.
    ///
    /// Always `true` for [`AvlTree`]. A [`RedBlackTree`] reports `false` from
    /// its first successful removal until [`clear`](Self::clear), because
    /// removal does not repair colors.
    pub fn is_balance_guaranteed(&self) -> bool {
        !self.balance_degraded
    }

    /// Removes every value and releases the node arena's contents.
    pub fn clear(&mut self) {
        self.pool.clear();
        self.root = NIL;
        self.balance_degraded = false;
    }

    #[inline]
    fn child(&self, node: usize, side: Ordering) -> usize {
        if side == Ordering::Less {
            self.pool.left(node)
        } else {
            self.pool.right(node)
        }
    }

    /// Hangs `subtree` below each node of `path`, deepest first, and runs the
    /// policy's fix-up on every ancestor. Returns the new root.
    ///
    /// Each path entry records the node and the side the descent left it by.
    fn unwind(
        &mut self,
        path: &mut Vec<(usize, Ordering)>,
        mut subtree: usize,
        fix: fn(&mut NodePool<T, B::Tag>, usize) -> usize,
    ) -> usize {
        while let Some((node, side)) = path.pop() {
            if side == Ordering::Less {
                self.pool.set_left(node, subtree);
            } else {
                self.pool.set_right(node, subtree);
            }
            refresh_node::<T, B>(&mut self.pool, node);
            subtree = fix(&mut self.pool, node);
        }
        subtree
    }

    /// Checks sizes, key order, arena accounting and, while it is still
    /// expected to hold, the policy's balance invariant.
    #[cfg(test)]
    pub(crate) fn verify_invariants(&self) -> bool {
        invariants::sizes_consistent(&self.pool, self.root)
            && invariants::keys_sorted(&self.pool, self.root)
            && self.pool.live() == self.len()
            && (self.balance_degraded || B::is_balanced(&self.pool, self.root))
    }
}

impl<T: FloatCore, B: Balance> FromIterator<T> for OrderStatisticTree<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: FloatCore, B: Balance> Extend<T> for OrderStatisticTree<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: FloatCore, B: Balance> IntoIterator for &'a OrderStatisticTree<T, B> {
    type Item = T;
    type IntoIter = Iter<'a, T, B::Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
