use std::ops::RangeBounds;

use crate::error::{Result, SegmentTreeError};
use crate::kind::NodeKind;
use crate::node::Node;
use crate::util::{check_index, fail_fast, resolve_range};

/// Lazy-propagation segment tree over `n` values.
///
/// Nodes live in a flat array of `4 * n` slots; the children of `pos` are
/// `2 * pos + 1` and `2 * pos + 2`, and the root covers `[0, n - 1]`.
///
/// Every node visited by a query, update or search is flushed before its
/// range is inspected, and a parent is only recomputed from flushed children.
#[derive(Debug)]
pub struct SegmentTree<K: NodeKind> {
    pub(crate) nodes: Vec<Node<K::Value>>,
    pub(crate) len: usize,
}

impl<K: NodeKind> SegmentTree<K> {
    /// Tree of `len` identity values.
    pub fn new(len: usize) -> Self {
        tracing::debug!(kind = K::NAME, len, "segment tree allocated");
        Self {
            nodes: vec![Node::empty::<K>(); 4 * len],
            len,
        }
    }

    /// Builds the tree bottom-up in O(n).
    pub fn from_values(values: &[K::Value]) -> Self {
        let mut tree = Self {
            nodes: vec![Node::empty::<K>(); 4 * values.len()],
            len: values.len(),
        };
        if !values.is_empty() {
            tree.build(0, 0, values.len() - 1, values);
        }
        tracing::debug!(kind = K::NAME, len = values.len(), "segment tree built");
        tree
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Aggregate of `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty or out of bounds.
    #[track_caller]
    pub fn query<R: RangeBounds<usize>>(&mut self, range: R) -> K::Value {
        fail_fast(self.try_query(range))
    }

    pub fn try_query<R: RangeBounds<usize>>(&mut self, range: R) -> Result<K::Value> {
        let (l, r) = resolve_range(&range, self.len)?;
        Ok(self.query_rec(0, 0, self.len - 1, l, r))
    }

    /// Value at index `i`.
    #[track_caller]
    pub fn get(&mut self, i: usize) -> K::Value {
        fail_fast(self.try_get(i))
    }

    pub fn try_get(&mut self, i: usize) -> Result<K::Value> {
        check_index(i, self.len)?;
        Ok(self.query_rec(0, 0, self.len - 1, i, i))
    }

    /// Applies `delta` to every element of `range` with the kind's update rule.
    #[track_caller]
    pub fn update<R: RangeBounds<usize>>(&mut self, range: R, delta: K::Value) {
        fail_fast(self.try_update(range, delta))
    }

    pub fn try_update<R: RangeBounds<usize>>(&mut self, range: R, delta: K::Value) -> Result<()> {
        let (l, r) = resolve_range(&range, self.len)?;
        self.update_rec(0, 0, self.len - 1, l, r, &delta);
        Ok(())
    }

    #[track_caller]
    pub fn update_at(&mut self, i: usize, delta: K::Value) {
        fail_fast(self.try_update_at(i, delta))
    }

    pub fn try_update_at(&mut self, i: usize, delta: K::Value) -> Result<()> {
        check_index(i, self.len)?;
        self.update_rec(0, 0, self.len - 1, i, i, &delta);
        Ok(())
    }

    /// Index of the leftmost (or rightmost) element of `range` matching
    /// `target`, or `len()` when there is none.
    ///
    /// # Panics
    ///
    /// Panics if the kind is not searchable or `range` is invalid.
    #[track_caller]
    pub fn find<R: RangeBounds<usize>>(&mut self, target: K::Value, range: R, leftmost: bool) -> usize {
        fail_fast(self.try_find(target, range, leftmost))
    }

    pub fn try_find<R: RangeBounds<usize>>(
        &mut self,
        target: K::Value,
        range: R,
        leftmost: bool,
    ) -> Result<usize> {
        if !K::SEARCHABLE {
            return Err(SegmentTreeError::UnsupportedOperation {
                operation: "find",
                kind: K::NAME,
            });
        }
        let (l, r) = resolve_range(&range, self.len)?;
        let total = self.query_rec(0, 0, self.len - 1, l, r);
        if !K::matches(&total, &target) {
            return Ok(self.len);
        }
        Ok(self.find_rec(0, 0, self.len - 1, l, r, &target, leftmost))
    }

    #[track_caller]
    pub fn find_first(&mut self, target: K::Value) -> usize {
        self.find(target, .., true)
    }

    #[track_caller]
    pub fn find_last(&mut self, target: K::Value) -> usize {
        self.find(target, .., false)
    }

    /// Pushes every pending update down to the leaves.
    pub fn flush(&mut self) {
        if self.len > 0 {
            self.flush_rec(0, 0, self.len - 1);
        }
    }

    pub fn is_flushed(&self) -> bool {
        self.nodes.iter().all(|node| !node.is_pending::<K>())
    }

    /// Current leaf values in index order.
    pub fn to_vec(&mut self) -> Vec<K::Value> {
        self.flush();
        let mut out = Vec::with_capacity(self.len);
        if self.len > 0 {
            self.collect_leaves(0, 0, self.len - 1, &mut out);
        }
        out
    }

    /// Node-wise merge of two flushed trees of the same length.
    ///
    /// The result holds, at every index, `merge(lhs[i], rhs[i])`.
    #[track_caller]
    pub fn merge(lhs: &Self, rhs: &Self) -> Self {
        fail_fast(Self::try_merge(lhs, rhs))
    }

    pub fn try_merge(lhs: &Self, rhs: &Self) -> Result<Self> {
        if lhs.len != rhs.len {
            return Err(SegmentTreeError::ShapeMismatch {
                lhs: lhs.len,
                rhs: rhs.len,
            });
        }
        if !lhs.is_flushed() || !rhs.is_flushed() {
            return Err(SegmentTreeError::UnflushedMerge);
        }
        let nodes = lhs
            .nodes
            .iter()
            .zip(&rhs.nodes)
            .map(|(a, b)| Node::merge::<K>(a, b))
            .collect();
        tracing::debug!(kind = K::NAME, len = lhs.len, "segment trees merged");
        Ok(Self {
            nodes,
            len: lhs.len,
        })
    }

    /// Overwrites leaf `i` regardless of the kind's assignment support.
    pub(crate) fn replace(&mut self, i: usize, value: K::Value) {
        debug_assert!(i < self.len);
        self.replace_rec(0, 0, self.len - 1, i, value);
    }

    fn build(&mut self, pos: usize, lo: usize, hi: usize, values: &[K::Value]) {
        if lo == hi {
            self.nodes[pos] = Node::leaf::<K>(values[lo]);
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.build(2 * pos + 1, lo, mid, values);
        self.build(2 * pos + 2, mid + 1, hi, values);
        self.nodes[pos] = Node::merge::<K>(&self.nodes[2 * pos + 1], &self.nodes[2 * pos + 2]);
    }

    /// Folds the pending state of `pos` into its value and hands it to the children.
    pub(crate) fn push(&mut self, pos: usize, lo: usize, hi: usize) {
        let node = self.nodes[pos];
        if !node.is_pending::<K>() {
            return;
        }

        let len = hi - lo + 1;
        let mut value = node.value;
        if let Some(assigned) = node.assign {
            value = K::assign(&assigned, len);
        }
        value = K::apply(&value, &node.lazy, len);
        self.nodes[pos] = Node::leaf::<K>(value);

        if lo != hi {
            for child in [2 * pos + 1, 2 * pos + 2] {
                let child = &mut self.nodes[child];
                if let Some(assigned) = node.assign {
                    child.push_assign::<K>(assigned);
                }
                child.push_delta::<K>(&node.lazy);
            }
        }
    }

    /// Recomputes `pos` from its children, flushing them first.
    pub(crate) fn pull(&mut self, pos: usize, lo: usize, mid: usize, hi: usize) {
        self.push(2 * pos + 1, lo, mid);
        self.push(2 * pos + 2, mid + 1, hi);
        self.nodes[pos] = Node::merge::<K>(&self.nodes[2 * pos + 1], &self.nodes[2 * pos + 2]);
    }

    fn query_rec(&mut self, pos: usize, lo: usize, hi: usize, l: usize, r: usize) -> K::Value {
        self.push(pos, lo, hi);
        if l <= lo && hi <= r {
            return self.nodes[pos].value;
        }
        let mid = lo + (hi - lo) / 2;
        if r <= mid {
            self.query_rec(2 * pos + 1, lo, mid, l, r)
        } else if l > mid {
            self.query_rec(2 * pos + 2, mid + 1, hi, l, r)
        } else {
            let left = self.query_rec(2 * pos + 1, lo, mid, l, r);
            let right = self.query_rec(2 * pos + 2, mid + 1, hi, l, r);
            K::merge(&left, &right)
        }
    }

    fn update_rec(&mut self, pos: usize, lo: usize, hi: usize, l: usize, r: usize, delta: &K::Value) {
        self.push(pos, lo, hi);
        if l <= lo && hi <= r {
            self.nodes[pos].push_delta::<K>(delta);
            self.push(pos, lo, hi);
            return;
        }
        let mid = lo + (hi - lo) / 2;
        if l <= mid {
            self.update_rec(2 * pos + 1, lo, mid, l, r, delta);
        }
        if r > mid {
            self.update_rec(2 * pos + 2, mid + 1, hi, l, r, delta);
        }
        self.pull(pos, lo, mid, hi);
    }

    #[allow(clippy::too_many_arguments)]
    fn find_rec(
        &mut self,
        pos: usize,
        lo: usize,
        hi: usize,
        l: usize,
        r: usize,
        target: &K::Value,
        leftmost: bool,
    ) -> usize {
        self.push(pos, lo, hi);
        if l <= lo && hi <= r && !K::matches(&self.nodes[pos].value, target) {
            return self.len;
        }
        if lo == hi {
            return lo;
        }

        let mid = lo + (hi - lo) / 2;
        if r <= mid {
            return self.find_rec(2 * pos + 1, lo, mid, l, r, target, leftmost);
        }
        if l > mid {
            return self.find_rec(2 * pos + 2, mid + 1, hi, l, r, target, leftmost);
        }
        let (first, second) = if leftmost {
            ((2 * pos + 1, lo, mid), (2 * pos + 2, mid + 1, hi))
        } else {
            ((2 * pos + 2, mid + 1, hi), (2 * pos + 1, lo, mid))
        };
        let found = self.find_rec(first.0, first.1, first.2, l, r, target, leftmost);
        if found != self.len {
            return found;
        }
        self.find_rec(second.0, second.1, second.2, l, r, target, leftmost)
    }

    fn flush_rec(&mut self, pos: usize, lo: usize, hi: usize) {
        self.push(pos, lo, hi);
        if lo == hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.flush_rec(2 * pos + 1, lo, mid);
        self.flush_rec(2 * pos + 2, mid + 1, hi);
    }

    fn collect_leaves(&self, pos: usize, lo: usize, hi: usize, out: &mut Vec<K::Value>) {
        if lo == hi {
            out.push(self.nodes[pos].value);
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.collect_leaves(2 * pos + 1, lo, mid, out);
        self.collect_leaves(2 * pos + 2, mid + 1, hi, out);
    }

    fn replace_rec(&mut self, pos: usize, lo: usize, hi: usize, i: usize, value: K::Value) {
        self.push(pos, lo, hi);
        if lo == hi {
            self.nodes[pos] = Node::leaf::<K>(value);
            return;
        }
        let mid = lo + (hi - lo) / 2;
        if i <= mid {
            self.replace_rec(2 * pos + 1, lo, mid, i, value);
        } else {
            self.replace_rec(2 * pos + 2, mid + 1, hi, i, value);
        }
        self.pull(pos, lo, mid, hi);
    }
}

// Manual impl: kinds are uninhabited markers and need not be `Clone`.
impl<K: NodeKind> Clone for SegmentTree<K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            len: self.len,
        }
    }
}

impl<K: NodeKind> FromIterator<K::Value> for SegmentTree<K> {
    fn from_iter<I: IntoIterator<Item = K::Value>>(iter: I) -> Self {
        let values = iter.into_iter().collect::<Vec<_>>();
        Self::from_values(&values)
    }
}
