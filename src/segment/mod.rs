//! Generic aggregate segment tree
//!
//! Point update / range fold over a caller-supplied [`Fold`] strategy.
//! Build O(N), update and query O(log N).
//!
//! The tree is a flat array of 4N aggregate slots over an implicit
//! [`Interval`] recursion; no node stores its own interval. Queries use the
//! three-way disjoint/contained/partial test, which bounds the visited-node
//! count per query to O(log N).

use std::fmt;

use tracing::debug;

use crate::interval::{left_child, right_child, storage_size, Interval};
use crate::{check_build, check_index, check_range, Fold, RangeError};

/// Aggregate segment tree over a fixed-length sequence.
///
/// Invariant maintained by every mutation: for each internal node,
/// `tree[node] == combine(tree[left], tree[right])`, and each leaf holds
/// the current value of its single sequence index.
#[derive(Clone)]
pub struct SegmentTree<F: Fold> {
    tree: Vec<F::Value>,
    len: usize,
    fold: F,
}

// Manual impl: aggregate values are not required to be Debug
impl<F: Fold> fmt::Debug for SegmentTree<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("len", &self.len)
            .field("slots", &self.tree.len())
            .finish_non_exhaustive()
    }
}

impl<F: Fold> SegmentTree<F> {
    /// Build a tree over `values` with the given fold strategy. O(N).
    ///
    /// Fails with [`RangeError::EmptyInput`] on an empty slice.
    pub fn build(values: &[F::Value], fold: F) -> Result<Self, RangeError> {
        check_build(values.len())?;

        let len = values.len();
        let mut tree = vec![fold.identity(); storage_size(len)];
        Self::build_node(&fold, &mut tree, values, 0, Interval::root(len));

        debug!(elements = len, slots = tree.len(), "built segment tree");
        Ok(Self { tree, len, fold })
    }

    fn build_node(fold: &F, tree: &mut [F::Value], values: &[F::Value], node: usize, iv: Interval) {
        if iv.is_leaf() {
            tree[node] = values[iv.start].clone();
        } else {
            let (left, right) = iv.split();
            Self::build_node(fold, tree, values, left_child(node), left);
            Self::build_node(fold, tree, values, right_child(node), right);
            tree[node] = fold.combine(&tree[left_child(node)], &tree[right_child(node)]);
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

    /// Replace the value at `index`, recomputing every ancestor's fold. O(log N).
    pub fn update(&mut self, index: usize, value: F::Value) -> Result<(), RangeError> {
        check_index(index, self.len)?;
        self.update_node(0, Interval::root(self.len), index, value);
        Ok(())
    }

    fn update_node(&mut self, node: usize, iv: Interval, index: usize, value: F::Value) {
        if iv.is_leaf() {
            self.tree[node] = value;
        } else {
            let (left, right) = iv.split();
            if index <= iv.midpoint() {
                self.update_node(left_child(node), left, index, value);
            } else {
                self.update_node(right_child(node), right, index, value);
            }
            self.tree[node] = self
                .fold
                .combine(&self.tree[left_child(node)], &self.tree[right_child(node)]);
        }
    }

    /// Fold over the inclusive index range `[start, end]`. O(log N).
    pub fn query(&self, start: usize, end: usize) -> Result<F::Value, RangeError> {
        check_range(start, end, self.len)?;
        Ok(self.query_node(0, Interval::root(self.len), start, end))
    }

    fn query_node(&self, node: usize, iv: Interval, lo: usize, hi: usize) -> F::Value {
        if iv.disjoint_from(lo, hi) {
            return self.fold.identity();
        }
        if iv.inside(lo, hi) {
            return self.tree[node].clone();
        }

        let (left, right) = iv.split();
        self.fold.combine(
            &self.query_node(left_child(node), left, lo, hi),
            &self.query_node(right_child(node), right, lo, hi),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FnFold, MinFold, SumFold};

    #[test]
    fn test_sum_tree_queries() {
        let tree = SegmentTree::build(&[1, 3, 5, 7, 9, 11], SumFold).unwrap();
        assert_eq!(tree.query(1, 3).unwrap(), 15);
        assert_eq!(tree.query(0, 5).unwrap(), 36);
        assert_eq!(tree.query(4, 4).unwrap(), 9);
    }

    #[test]
    fn test_point_update_refreshes_ancestors() {
        let mut tree = SegmentTree::build(&[1, 3, 5, 7, 9, 11], SumFold).unwrap();
        tree.update(2, 10).unwrap();
        assert_eq!(tree.query(1, 3).unwrap(), 20);
        assert_eq!(tree.query(2, 2).unwrap(), 10);
        // Ranges not containing index 2 are unchanged
        assert_eq!(tree.query(3, 5).unwrap(), 27);
        assert_eq!(tree.query(0, 1).unwrap(), 4);
    }

    #[test]
    fn test_min_tree() {
        let mut tree = SegmentTree::build(&[5, 2, 8, 1, 9], MinFold).unwrap();
        assert_eq!(tree.query(0, 4).unwrap(), 1);
        assert_eq!(tree.query(0, 2).unwrap(), 2);
        tree.update(3, 7).unwrap();
        assert_eq!(tree.query(0, 4).unwrap(), 2);
    }

    #[test]
    fn test_closure_fold() {
        let xor = FnFold::new(0u32, |a: &u32, b: &u32| a ^ b);
        let tree = SegmentTree::build(&[1, 2, 4, 8], xor).unwrap();
        assert_eq!(tree.query(0, 3).unwrap(), 15);
        assert_eq!(tree.query(1, 2).unwrap(), 6);
    }

    #[test]
    fn test_single_element_tree() {
        let tree = SegmentTree::build(&[42], SumFold).unwrap();
        assert_eq!(tree.query(0, 0).unwrap(), 42);
    }

    #[test]
    fn test_bounds_rejected() {
        let mut tree = SegmentTree::build(&[1, 2, 3], SumFold).unwrap();
        assert_eq!(
            tree.query(1, 3),
            Err(RangeError::InvalidRange {
                start: 1,
                end: 3,
                len: 3
            })
        );
        assert_eq!(
            tree.query(2, 1),
            Err(RangeError::InvalidRange {
                start: 2,
                end: 1,
                len: 3
            })
        );
        assert_eq!(
            tree.update(3, 0),
            Err(RangeError::InvalidIndex { index: 3, len: 3 })
        );
        // Rejected update left the tree untouched
        assert_eq!(tree.query(0, 2).unwrap(), 6);
    }

    #[test]
    fn test_empty_build_rejected() {
        let values: [i64; 0] = [];
        assert_eq!(
            SegmentTree::build(&values, SumFold).err(),
            Some(RangeError::EmptyInput)
        );
    }
}
