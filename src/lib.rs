#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::just_underscores_and_digits, clippy::len_without_is_empty)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod node;
mod rotation;

mod balance;
pub use balance::{Avl, Balance, Color, LeftLeaningRedBlack};

mod order_statistic;

mod traversal;
pub use traversal::Iter;

#[cfg(test)]
mod invariants;

mod tree;
pub use tree::{AvlTree, OrderStatisticTree, RedBlackTree};
