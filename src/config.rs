//! Shape constants for the tree.
//!
//! An [`RrbVector`](crate::RrbVector) is parameterised, at compile time, by
//! two constants:
//!
//! + [`M`], the branching exponent. Every internal node holds at most
//!   `B = 2^M` children, and every leaf holds at most `B` elements.
//! + [`E`], the relaxation tolerance used by [`crate::concat::balance`]: the
//!   maximum number of "extra" nodes a rebalanced span may carry above the
//!   ideal count before rebalancing must act.
//!
//! Neither constant changes the semantics of any operation — only the
//! resulting depth and the amount of work `concat` does to keep a tree
//! within the relaxation bound. Production code gets `M = 5` (`B = 32`), the
//! branching factor real-world RRB vector implementations converge on; test
//! builds use `M = 2` (`B = 4`) so that every worked example in the
//! specification's testable-properties section reproduces exactly, and so
//! that property tests exercise branch splits, merges and promotions with
//! far fewer elements.

/// Branching exponent: every node holds at most `2^M` slots.
#[cfg(not(test))]
pub const M: usize = 5;
#[cfg(test)]
pub const M: usize = 2;

/// Relaxation tolerance used by [`crate::concat::balance`].
///
/// This is the "search-step tolerance" from the RRB tree paper: a rebalanced
/// span may have at most this many more nodes than the ideal packed count
/// before `balance` is required to keep redistributing.
pub const E: usize = 1;

/// Maximum fan-out of an internal node, and maximum length of a leaf.
pub const B: usize = 1 << M;
