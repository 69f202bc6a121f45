//! # Indexed Range-Query Engine
//!
//! This library implements a family of array-backed binary trees over a
//! fixed sequence of N elements, supporting point updates, range updates,
//! and range aggregate/order-statistics queries in logarithmic (or
//! polylogarithmic) time.
//!
//! ## Components
//!
//! 1. **[`SegmentTree`]**: point update / range fold over a caller-supplied
//!    associative operation ([`Fold`]) — O(log N) per operation
//! 2. **[`LazySegmentTree`]**: range-add / range-sum with deferred
//!    propagation — O(log N) per operation
//! 3. **[`MergeSortTree`]**: static order statistics (k-th smallest,
//!    count in value window) — O(log² N) per query, immutable after build
//!
//! All three share one structural idea: an implicit complete binary tree
//! over `[0, N-1]` stored in a flat array of 4N slots, with node intervals
//! derived on every traversal rather than stored ([`Interval`]).
//!
//! ## Usage Example
//!
//! ```
//! use rangetree::{SegmentTree, SumFold};
//!
//! let mut tree = SegmentTree::build(&[1, 3, 5, 7, 9, 11], SumFold)?;
//! assert_eq!(tree.query(1, 3)?, 15);
//! tree.update(2, 10)?;
//! assert_eq!(tree.query(1, 3)?, 20);
//! # Ok::<(), rangetree::RangeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules - each implements one range-query strategy
pub mod fold; // combine/identity strategies for the generic tree
pub mod interval; // implicit node intervals and pruning predicates
pub mod lazy; // range-add / range-sum with lazy propagation
pub mod order; // static order statistics (merge-sort tree)
pub mod segment; // generic aggregate segment tree

// Re-exports for convenience
pub use fold::{FnFold, Fold, MaxFold, MinFold, SumFold};
pub use interval::Interval;
pub use lazy::LazySegmentTree;
pub use order::MergeSortTree;
pub use segment::SegmentTree;

use thiserror::Error;

/// Errors reported at the call boundary of every tree operation.
///
/// All rejections are local and synchronous: a failed call leaves the
/// structure unchanged. Out-of-range indices are never clamped or wrapped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// Attempted to build a tree over an empty value sequence
    #[error("Cannot build a range-query tree over an empty sequence")]
    EmptyInput,

    /// Point index outside `[0, len)`
    #[error("Index {index} out of bounds for sequence of length {len}")]
    InvalidIndex {
        /// The offending index
        index: usize,
        /// Number of elements in the sequence
        len: usize,
    },

    /// Query/update range with `start > end` or `end >= len`
    #[error("Invalid range [{start}, {end}] for sequence of length {len}")]
    InvalidRange {
        /// Inclusive range start
        start: usize,
        /// Inclusive range end
        end: usize,
        /// Number of elements in the sequence
        len: usize,
    },

    /// Rank outside `[1, window]` in a k-th smallest query
    #[error("Rank {k} out of bounds for a window of {window} elements")]
    InvalidRank {
        /// Requested 1-indexed rank
        k: usize,
        /// Number of elements in the queried range
        window: usize,
    },
}

pub(crate) fn check_build(len: usize) -> Result<(), RangeError> {
    if len == 0 {
        return Err(RangeError::EmptyInput);
    }
    Ok(())
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<(), RangeError> {
    if index >= len {
        return Err(RangeError::InvalidIndex { index, len });
    }
    Ok(())
}

pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<(), RangeError> {
    if start > end || end >= len {
        return Err(RangeError::InvalidRange { start, end, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_checks() {
        assert!(check_range(0, 4, 5).is_ok());
        assert!(check_range(2, 2, 5).is_ok());
        assert_eq!(
            check_range(3, 2, 5),
            Err(RangeError::InvalidRange {
                start: 3,
                end: 2,
                len: 5
            })
        );
        assert_eq!(
            check_range(0, 5, 5),
            Err(RangeError::InvalidRange {
                start: 0,
                end: 5,
                len: 5
            })
        );
    }

    #[test]
    fn test_index_checks() {
        assert!(check_index(4, 5).is_ok());
        assert_eq!(
            check_index(5, 5),
            Err(RangeError::InvalidIndex { index: 5, len: 5 })
        );
    }

    #[test]
    fn test_empty_build_rejected() {
        assert_eq!(check_build(0), Err(RangeError::EmptyInput));
        assert!(check_build(1).is_ok());
    }
}
