//! Errors produced by [`RrbVector`](crate::RrbVector) operations.

use std::error::Error;
use std::fmt;

/// The only failure mode this crate has: an index outside the valid range
/// for the operation that was asked to use it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RrbError {
    /// `index` was not a valid position for `operation` on a tree of length
    /// `len`.
    IndexOutOfBounds {
        operation: &'static str,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for RrbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RrbError::IndexOutOfBounds {
                operation,
                index,
                len,
            } => write!(
                f,
                "{operation}: index {index} out of bounds (length {len})"
            ),
        }
    }
}

impl Error for RrbError {}
