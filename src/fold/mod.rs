//! Combine/identity strategies for the aggregate segment tree
//!
//! A [`Fold`] is the algebra injected into [`SegmentTree`] at construction:
//! an associative binary `combine` plus its two-sided `identity`. The tree
//! is polymorphic over the strategy value, not over a subclass hierarchy.
//!
//! [`SegmentTree`]: crate::SegmentTree

/// An associative combining operation with a two-sided identity.
///
/// # Correctness contract
///
/// `combine` must be associative and `identity` must be neutral on both
/// sides. Neither law is runtime-checkable in general; violating them makes
/// query results unspecified (but never unsafe).
pub trait Fold {
    /// Element and aggregate type stored in the tree.
    type Value: Clone;

    /// The neutral element: `combine(identity, x) == combine(x, identity) == x`.
    fn identity(&self) -> Self::Value;

    /// Combine the summaries of two adjacent intervals into one.
    fn combine(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
}

/// Integer addition with identity 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumFold;

impl Fold for SumFold {
    type Value = i64;

    fn identity(&self) -> i64 {
        0
    }

    fn combine(&self, a: &i64, b: &i64) -> i64 {
        a + b
    }
}

/// Integer minimum with identity `i64::MAX`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinFold;

impl Fold for MinFold {
    type Value = i64;

    fn identity(&self) -> i64 {
        i64::MAX
    }

    fn combine(&self, a: &i64, b: &i64) -> i64 {
        (*a).min(*b)
    }
}

/// Integer maximum with identity `i64::MIN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFold;

impl Fold for MaxFold {
    type Value = i64;

    fn identity(&self) -> i64 {
        i64::MIN
    }

    fn combine(&self, a: &i64, b: &i64) -> i64 {
        (*a).max(*b)
    }
}

/// Adapter turning a closure plus an identity value into a [`Fold`].
///
/// ```
/// use rangetree::{FnFold, SegmentTree};
///
/// let gcd = FnFold::new(0u64, |a: &u64, b: &u64| {
///     let (mut a, mut b) = (*a, *b);
///     while b != 0 {
///         (a, b) = (b, a % b);
///     }
///     a
/// });
/// let tree = SegmentTree::build(&[12, 18, 30], gcd)?;
/// assert_eq!(tree.query(0, 2)?, 6);
/// # Ok::<(), rangetree::RangeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FnFold<T, F> {
    identity: T,
    combine: F,
}

impl<T, F> FnFold<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Wrap `combine` with its neutral `identity` value.
    pub fn new(identity: T, combine: F) -> Self {
        Self { identity, combine }
    }
}

impl<T, F> Fold for FnFold<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    type Value = T;

    fn identity(&self) -> T {
        self.identity.clone()
    }

    fn combine(&self, a: &T, b: &T) -> T {
        (self.combine)(a, b)
    }
}
