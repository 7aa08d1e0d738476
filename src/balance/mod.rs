use core::fmt::Debug;
use num_traits::float::FloatCore;

use crate::node::NodePool;

mod avl;
pub use avl::Avl;

mod llrb;
pub use llrb::{Color, LeftLeaningRedBlack};

mod sealed {
    /// Keeps [`Balance`](super::Balance) implementations inside this crate.
    pub trait Sealed {}

    impl Sealed for super::Avl {}
    impl Sealed for super::LeftLeaningRedBlack {}
}

/// A rebalancing policy for [`OrderStatisticTree`](crate::OrderStatisticTree).
///
/// Both policies share the node layout, the rotation primitives and every query;
/// they differ only in the tag each node carries and in the fix-up run on the way
/// back up from an insert or remove. The trait is sealed: the two
/// implementations are [`Avl`] and [`LeftLeaningRedBlack`], and its hooks into
/// the node arena are internal.
pub trait Balance: sealed::Sealed {
    /// Per-node balancing tag.
    type Tag: Copy + Debug + PartialEq;

    /// Whether a removal restores the balance invariant.
    const REBALANCES_ON_REMOVE: bool;

    /// Tag given to a freshly inserted leaf.
    #[doc(hidden)]
    fn leaf_tag() -> Self::Tag;

    /// Recomputes whatever part of the tag of `idx` derives from its children.
    #[doc(hidden)]
    fn refresh<T: FloatCore>(_pool: &mut NodePool<T, Self::Tag>, _idx: usize) {}

    /// Runs after a rotation lifted `new_root` above `old_root`, before either
    /// node is refreshed.
    #[doc(hidden)]
    fn on_rotate<T: FloatCore>(
        _pool: &mut NodePool<T, Self::Tag>,
        _old_root: usize,
        _new_root: usize,
    ) {
    }

    /// Restores the balance invariant at `idx` after an insert below it.
    /// Returns the root of the repaired subtree.
    #[doc(hidden)]
    fn fix_after_insert<T: FloatCore>(pool: &mut NodePool<T, Self::Tag>, idx: usize) -> usize;

    /// Repairs `idx` after a removal below it. Returns the root of the subtree.
    #[doc(hidden)]
    fn fix_after_remove<T: FloatCore>(pool: &mut NodePool<T, Self::Tag>, idx: usize) -> usize;

    /// Adjusts the tree root once a whole insert or remove has finished.
    #[doc(hidden)]
    fn settle_root<T: FloatCore>(_pool: &mut NodePool<T, Self::Tag>, _root: usize) {}

    /// Checks the policy's structural invariant over the subtree at `root`.
    #[doc(hidden)]
    #[cfg(test)]
    fn is_balanced<T: FloatCore>(pool: &NodePool<T, Self::Tag>, root: usize) -> bool;
}
