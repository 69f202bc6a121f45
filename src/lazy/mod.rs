//! Lazy-propagation segment tree (range-add / range-sum)
//!
//! Every element of `[l, r]` can be incremented in O(log N) by recording a
//! pending delta on O(log N) nodes instead of touching every leaf. The
//! pending delta is discharged (pushed down) the next time a traversal
//! visits the node, before the node's interval is inspected - never read
//! through a node with an undischarged delta.
//!
//! Sums and deltas are i64 throughout, so repeated range-adds accumulate in
//! a wide domain; deltas may be negative.

use tracing::debug;

use crate::interval::{left_child, right_child, storage_size, Interval};
use crate::{check_build, check_range, RangeError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Range-add / range-sum segment tree with deferred propagation.
///
/// `lazy[node]` holds an additive delta that has not yet been applied to
/// `tree[node]` nor forwarded to the node's children; zero means no pending
/// work. Once push-down runs on a node, `tree[node]` is exact for that
/// node's own interval.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LazySegmentTree {
    tree: Vec<i64>,
    lazy: Vec<i64>,
    len: usize,
}

impl LazySegmentTree {
    /// Build the tree over `values` with all lazy slots at the neutral
    /// delta (zero). O(N).
    pub fn build(values: &[i64]) -> Result<Self, RangeError> {
        check_build(values.len())?;

        let len = values.len();
        let slots = storage_size(len);
        let mut tree = vec![0i64; slots];
        Self::build_node(&mut tree, values, 0, Interval::root(len));

        debug!(elements = len, slots, "built lazy segment tree");
        Ok(Self {
            tree,
            lazy: vec![0i64; slots],
            len,
        })
    }

    fn build_node(tree: &mut [i64], values: &[i64], node: usize, iv: Interval) {
        if iv.is_leaf() {
            tree[node] = values[iv.start];
        } else {
            let (left, right) = iv.split();
            Self::build_node(tree, values, left_child(node), left);
            Self::build_node(tree, values, right_child(node), right);
            tree[node] = tree[left_child(node)] + tree[right_child(node)];
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

    /// Discharge `lazy[node]` into the node's own sum and re-record it on
    /// the children's lazy slots. Must run before inspecting the node's
    /// interval, so the sum read afterwards is exact for the interval.
    fn push_down(&mut self, node: usize, iv: Interval) {
        if self.lazy[node] != 0 {
            self.tree[node] += iv.len() as i64 * self.lazy[node];
            if !iv.is_leaf() {
                self.lazy[left_child(node)] += self.lazy[node];
                self.lazy[right_child(node)] += self.lazy[node];
            }
            self.lazy[node] = 0;
        }
    }

    /// Add `delta` to every element of the inclusive range `[start, end]`.
    /// O(log N); `delta` may be negative.
    pub fn range_add(&mut self, start: usize, end: usize, delta: i64) -> Result<(), RangeError> {
        check_range(start, end, self.len)?;
        self.add_node(0, Interval::root(self.len), start, end, delta);
        Ok(())
    }

    fn add_node(&mut self, node: usize, iv: Interval, lo: usize, hi: usize, delta: i64) {
        // Propagate-then-descend: the recombine below reads both children,
        // so even nodes that turn out disjoint must discharge first.
        self.push_down(node, iv);

        if iv.disjoint_from(lo, hi) {
            return;
        }

        if iv.inside(lo, hi) {
            // Absorb the delta for this whole interval; children receive it
            // lazily on their next visit.
            self.tree[node] += iv.len() as i64 * delta;
            if !iv.is_leaf() {
                self.lazy[left_child(node)] += delta;
                self.lazy[right_child(node)] += delta;
            }
            return;
        }

        let (left, right) = iv.split();
        self.add_node(left_child(node), left, lo, hi, delta);
        self.add_node(right_child(node), right, lo, hi, delta);
        self.tree[node] = self.tree[left_child(node)] + self.tree[right_child(node)];
    }

    /// Sum over the inclusive range `[start, end]`. O(log N).
    pub fn query(&mut self, start: usize, end: usize) -> Result<i64, RangeError> {
        check_range(start, end, self.len)?;
        Ok(self.query_node(0, Interval::root(self.len), start, end))
    }

    fn query_node(&mut self, node: usize, iv: Interval, lo: usize, hi: usize) -> i64 {
        self.push_down(node, iv);

        if iv.disjoint_from(lo, hi) {
            return 0;
        }
        if iv.inside(lo, hi) {
            return self.tree[node];
        }

        let (left, right) = iv.split();
        self.query_node(left_child(node), left, lo, hi)
            + self.query_node(right_child(node), right, lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_sum() {
        let mut tree = LazySegmentTree::build(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(tree.query(0, 4).unwrap(), 15);
        assert_eq!(tree.query(1, 3).unwrap(), 9);
        assert_eq!(tree.query(2, 2).unwrap(), 3);
    }

    #[test]
    fn test_range_add_then_query() {
        let mut tree = LazySegmentTree::build(&[1, 2, 3, 4, 5]).unwrap();
        tree.range_add(1, 3, 10).unwrap();
        assert_eq!(tree.query(0, 4).unwrap(), 45);
        assert_eq!(tree.query(1, 1).unwrap(), 12);
        assert_eq!(tree.query(0, 0).unwrap(), 1);
        assert_eq!(tree.query(4, 4).unwrap(), 5);
    }

    #[test]
    fn test_overlapping_adds() {
        let mut tree = LazySegmentTree::build(&[0; 8]).unwrap();
        tree.range_add(0, 7, 1).unwrap();
        tree.range_add(2, 5, 2).unwrap();
        tree.range_add(4, 4, -3).unwrap();
        assert_eq!(tree.query(0, 7).unwrap(), 8 + 8 - 3);
        assert_eq!(tree.query(4, 4).unwrap(), 0);
        assert_eq!(tree.query(2, 3).unwrap(), 6);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut tree = LazySegmentTree::build(&[3, 1, 4, 1, 5]).unwrap();
        let before: Vec<i64> = (0..5).map(|i| tree.query(i, i).unwrap()).collect();
        tree.range_add(0, 4, 0).unwrap();
        tree.range_add(1, 3, 0).unwrap();
        let after: Vec<i64> = (0..5).map(|i| tree.query(i, i).unwrap()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_negative_deltas_and_wide_sums() {
        let mut tree = LazySegmentTree::build(&[1_000_000_000; 4]).unwrap();
        // Push the per-element values well past i32 range
        for _ in 0..10 {
            tree.range_add(0, 3, 1_000_000_000).unwrap();
        }
        assert_eq!(tree.query(0, 3).unwrap(), 44_000_000_000);
        tree.range_add(0, 3, -11_000_000_000).unwrap();
        assert_eq!(tree.query(0, 3).unwrap(), 0);
    }

    #[test]
    fn test_single_element() {
        let mut tree = LazySegmentTree::build(&[7]).unwrap();
        tree.range_add(0, 0, 5).unwrap();
        assert_eq!(tree.query(0, 0).unwrap(), 12);
    }

    #[test]
    fn test_bounds_rejected() {
        let mut tree = LazySegmentTree::build(&[1, 2, 3]).unwrap();
        assert!(tree.range_add(0, 3, 1).is_err());
        assert!(tree.query(2, 1).is_err());
        // Rejected calls leave the structure unchanged
        assert_eq!(tree.query(0, 2).unwrap(), 6);
    }
}
