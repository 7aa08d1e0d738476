use alloc::vec::Vec;
use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;

/// Sentinel index for an empty link.
pub(crate) const NIL: usize = usize::MAX;

/// A node of the augmented search tree.
///
/// Each node stores its key, the indices of its two children, the number of
/// nodes in its subtree and one balancing tag whose meaning is owned by the
/// active strategy (a height for AVL, a color for left-leaning red-black).
#[derive(Debug, Clone)]
pub(crate) struct Node<T, G> {
    /// The stored value wrapped in OrderedFloat for a total order
    pub(crate) key: OrderedFloat<T>,

    /// Index of the left child in the pool (`NIL` if absent)
    pub(crate) left: usize,

    /// Index of the right child in the pool (`NIL` if absent)
    pub(crate) right: usize,

    /// Count of nodes in this subtree, including this node
    pub(crate) size: usize,

    /// Balancing tag maintained by the strategy
    pub(crate) tag: G,
}

/// Growable arena holding every node of one tree.
///
/// Released slots are pushed onto a free list and handed out again by the
/// next allocation, so a long insert/remove workload does not grow the arena
/// past its peak population.
#[derive(Debug, Clone)]
pub struct NodePool<T, G> {
    /// Node storage; released slots keep stale contents until reused
    nodes: Vec<Node<T, G>>,

    /// Stack of released slot indices
    free_list: Vec<usize>,
}

impl<T: FloatCore, G: Copy> NodePool<T, G> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_list: Vec::new(),
        }
    }

    /// Number of live nodes.
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
    }

    /// Stores a fresh leaf and returns its index.
    pub(crate) fn allocate(&mut self, key: OrderedFloat<T>, tag: G) -> usize {
        let node = Node {
            key,
            left: NIL,
            right: NIL,
            size: 1,
            tag,
        };

        match self.free_list.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    #[inline]
    pub(crate) fn release(&mut self, idx: usize) {
        debug_assert!(idx < self.nodes.len());
        self.free_list.push(idx);
    }

    #[inline]
    pub(crate) fn node_at(&self, idx: usize) -> &Node<T, G> {
        &self.nodes[idx]
    }

    #[inline]
    pub(crate) fn node_at_mut(&mut self, idx: usize) -> &mut Node<T, G> {
        &mut self.nodes[idx]
    }

    #[inline]
    pub(crate) fn key(&self, idx: usize) -> OrderedFloat<T> {
        self.node_at(idx).key
    }

    #[inline]
    pub(crate) fn left(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.node_at(idx).left }
    }

    #[inline]
    pub(crate) fn right(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.node_at(idx).right }
    }

    #[inline]
    pub(crate) fn set_left(&mut self, idx: usize, child: usize) {
        self.node_at_mut(idx).left = child;
    }

    #[inline]
    pub(crate) fn set_right(&mut self, idx: usize, child: usize) {
        self.node_at_mut(idx).right = child;
    }

    /// Subtree size, zero for an empty link.
    #[inline]
    pub(crate) fn size(&self, idx: usize) -> usize {
        if idx == NIL { 0 } else { self.node_at(idx).size }
    }

    /// Recomputes the size counter of `idx` from its children.
    ///
    /// Must run on every node whose child link changed, children before
    /// parents; a missed call silently skews every later rank query.
    #[inline]
    pub(crate) fn update_size(&mut self, idx: usize) {
        let node = self.node_at(idx);
        let total = 1 + self.size(node.left) + self.size(node.right);
        self.node_at_mut(idx).size = total;
    }

    #[inline]
    pub(crate) fn tag(&self, idx: usize) -> G {
        self.node_at(idx).tag
    }

    #[inline]
    pub(crate) fn set_tag(&mut self, idx: usize, tag: G) {
        self.node_at_mut(idx).tag = tag;
    }

    /// Leftmost node of the subtree rooted at `idx`.
    pub(crate) fn min_node(&self, mut idx: usize) -> usize {
        while idx != NIL {
            let left = self.node_at(idx).left;
            if left == NIL {
                break;
            }
            idx = left;
        }
        idx
    }

    /// Rightmost node of the subtree rooted at `idx`.
    pub(crate) fn max_node(&self, mut idx: usize) -> usize {
        while idx != NIL {
            let right = self.node_at(idx).right;
            if right == NIL {
                break;
            }
            idx = right;
        }
        idx
    }
}
