//! Ordered index implementation.
//!
//! A plain binary search tree whose nodes live in an arena and refer to each
//! other by slot number. Shape is determined by insertion order; there is no
//! rebalancing, so sorted input degenerates into a list and every traversal
//! is written iteratively.
//!
//! ```text
//!            [50]
//!           /    \
//!        [30]    [70]        slots: 0=50 1=30 2=70 3=20 4=40
//!       /    \               free:  []
//!    [20]    [40]
//! ```
//!
//! Every key comparison made while navigating is counted. Callers reset the
//! counter before the operation they want to measure.

mod arena;
mod ordered;

pub use ordered::{Iter, OrderedIndex};
