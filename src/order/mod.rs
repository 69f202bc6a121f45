//! Merge-sort tree (static order statistics)
//!
//! Each node stores the sorted multiset of the leaf values under it, so a
//! fully-contained node can count elements at-or-below a value with one
//! binary search. Combined with the O(log N) node pruning this answers
//! count-in-window queries in O(log² N), and k-th smallest via an outer
//! binary search over the value domain.
//!
//! The tree is built once and never mutated; any update requirement must be
//! served by rebuilding.

use tracing::debug;

use crate::interval::{left_child, right_child, storage_size, Interval};
use crate::{check_build, check_range, RangeError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Static order-statistics index over a fixed i64 sequence.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergeSortTree {
    tree: Vec<Vec<i64>>,
    len: usize,
}

impl MergeSortTree {
    /// Build the index. O(N log N): each level holds every value once, and
    /// merging a level is linear in its size.
    pub fn build(values: &[i64]) -> Result<Self, RangeError> {
        check_build(values.len())?;

        let len = values.len();
        let mut tree = vec![Vec::new(); storage_size(len)];
        Self::build_node(&mut tree, values, 0, Interval::root(len));

        debug!(elements = len, "built merge-sort tree");
        Ok(Self { tree, len })
    }

    fn build_node(tree: &mut [Vec<i64>], values: &[i64], node: usize, iv: Interval) {
        if iv.is_leaf() {
            tree[node] = vec![values[iv.start]];
        } else {
            let (left, right) = iv.split();
            Self::build_node(tree, values, left_child(node), left);
            Self::build_node(tree, values, right_child(node), right);
            tree[node] = merge_sorted(&tree[left_child(node)], &tree[right_child(node)]);
        }
    }

    /// Number of elements in the underlying sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Count elements `<= value` within the inclusive index range
    /// `[start, end]`. O(log² N).
    pub fn count_less_or_equal(
        &self,
        start: usize,
        end: usize,
        value: i64,
    ) -> Result<usize, RangeError> {
        check_range(start, end, self.len)?;
        Ok(self.count_node(0, Interval::root(self.len), start, end, value))
    }

    fn count_node(&self, node: usize, iv: Interval, lo: usize, hi: usize, value: i64) -> usize {
        if iv.disjoint_from(lo, hi) {
            return 0;
        }
        if iv.inside(lo, hi) {
            // Sorted list: one binary search counts the at-or-below prefix
            return self.tree[node].partition_point(|&x| x <= value);
        }

        let (left, right) = iv.split();
        self.count_node(left_child(node), left, lo, hi, value)
            + self.count_node(right_child(node), right, lo, hi, value)
    }

    /// The k-th smallest element (1-indexed) of `values[start..=end]`.
    ///
    /// Binary search over the value domain: converges to the smallest value
    /// whose at-or-below count within the range reaches `k`. The domain is
    /// bounded by the root list's extremes, since the answer is always one
    /// of the input values. O(log² N · log V) for value spread V.
    pub fn kth_smallest(&self, start: usize, end: usize, k: usize) -> Result<i64, RangeError> {
        check_range(start, end, self.len)?;
        let window = end - start + 1;
        if k == 0 || k > window {
            return Err(RangeError::InvalidRank { k, window });
        }

        // Root list is the sorted whole sequence; non-empty by construction
        let root = &self.tree[0];
        let mut lo = root[0];
        let mut hi = root[root.len() - 1];
        while lo < hi {
            let mid = midpoint(lo, hi);
            if self.count_node(0, Interval::root(self.len), start, end, mid) < k {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Ok(lo)
    }

    /// Count elements with value in `[value_lo, value_hi]` within the
    /// inclusive index range `[start, end]`.
    ///
    /// An empty value window (`value_lo > value_hi`) counts zero; only the
    /// index range is a caller contract.
    pub fn count_in_range(
        &self,
        start: usize,
        end: usize,
        value_lo: i64,
        value_hi: i64,
    ) -> Result<usize, RangeError> {
        check_range(start, end, self.len)?;
        if value_lo > value_hi {
            return Ok(0);
        }

        let at_or_below_hi = self.count_node(0, Interval::root(self.len), start, end, value_hi);
        // Nothing lies below i64::MIN, so the subtrahend is zero there
        let below_lo = if value_lo == i64::MIN {
            0
        } else {
            self.count_node(0, Interval::root(self.len), start, end, value_lo - 1)
        };
        Ok(at_or_below_hi - below_lo)
    }
}

/// Two-cursor merge of sorted runs, duplicates retained.
fn merge_sorted(a: &[i64], b: &[i64]) -> Vec<i64> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] <= b[j] {
            merged.push(a[i]);
            i += 1;
        } else {
            merged.push(b[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&a[i..]);
    merged.extend_from_slice(&b[j..]);
    merged
}

/// Floor midpoint without overflow near the i64 extremes.
fn midpoint(lo: i64, hi: i64) -> i64 {
    ((lo as i128 + hi as i128).div_euclid(2)) as i64
}
