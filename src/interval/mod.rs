//! Implicit tree node intervals
//!
//! Node = interval [start, end] ⊆ [0, N-1]
//! Children computed via midpoint: m = start + (end - start) / 2
//!   Left child: [start, m]
//!   Right child: [m+1, end]
//!
//! Intervals are never stored in the trees - they are recomputed from the
//! recursion parameters on every traversal, keeping node storage at one
//! payload slot per node (4N slots total).

use std::fmt;

/// A tree node's coverage (implicit - just an inclusive index interval).
///
/// Every leaf covers exactly one sequence index; every internal node's
/// interval is the exact union of its two children's intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// First covered sequence index (inclusive)
    pub start: usize,

    /// Last covered sequence index (inclusive)
    pub end: usize,
}

impl Interval {
    /// Root interval spanning the whole sequence `[0, len - 1]`.
    pub fn root(len: usize) -> Self {
        debug_assert!(len > 0, "root interval needs a non-empty sequence");
        Self {
            start: 0,
            end: len - 1,
        }
    }

    /// Check if leaf (unit interval)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.start == self.end
    }

    /// Number of sequence indices covered
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false: an interval covers at least one index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Midpoint split position: `start + (end - start) / 2`
    #[inline]
    pub fn midpoint(&self) -> usize {
        self.start + (self.end - self.start) / 2
    }

    /// Split into children at the midpoint.
    ///
    /// Returns `([start, mid], [mid+1, end])`.
    pub fn split(&self) -> (Interval, Interval) {
        debug_assert!(!self.is_leaf(), "leaf has no children");

        let mid = self.midpoint();
        (
            Interval {
                start: self.start,
                end: mid,
            },
            Interval {
                start: mid + 1,
                end: self.end,
            },
        )
    }

    /// True when this node's interval shares no index with `[lo, hi]`.
    ///
    /// First arm of the disjoint/contained/partial pruning test.
    #[inline]
    pub fn disjoint_from(&self, lo: usize, hi: usize) -> bool {
        hi < self.start || self.end < lo
    }

    /// True when this node's interval lies fully inside `[lo, hi]`.
    ///
    /// Second arm of the pruning test: the node's stored payload answers
    /// for its whole interval with no further recursion.
    #[inline]
    pub fn inside(&self, lo: usize, hi: usize) -> bool {
        lo <= self.start && self.end <= hi
    }
}

/// Flat-array index of node `i`'s left child.
#[inline]
pub(crate) fn left_child(node: usize) -> usize {
    2 * node + 1
}

/// Flat-array index of node `i`'s right child.
#[inline]
pub(crate) fn right_child(node: usize) -> usize {
    2 * node + 2
}

/// Backing-store size for a sequence of `len` elements.
///
/// 4N slots are enough for any N, including non-powers of two, without
/// computing the exact tree height.
#[inline]
pub(crate) fn storage_size(len: usize) -> usize {
    4 * len
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "[{}]", self.start)
        } else {
            write!(f, "[{}, {}]", self.start, self.end)
        }
    }
}
