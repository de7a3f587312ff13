//! Range assignment on top of the additive lazy protocol.
//!
//! An assignment pending on a node is folded in before its additive delta,
//! and when handed to a child it replaces the child's own pending state
//! instead of accumulating onto it.

use std::ops::RangeBounds;

use crate::error::{Result, SegmentTreeError};
use crate::kind::NodeKind;
use crate::tree::SegmentTree;
use crate::util::{check_index, fail_fast, resolve_range};

impl<K: NodeKind> SegmentTree<K> {
    /// Sets every element of `range` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if the kind does not support assignment or `range` is invalid.
    #[track_caller]
    pub fn set<R: RangeBounds<usize>>(&mut self, range: R, value: K::Value) {
        fail_fast(self.try_set(range, value))
    }

    pub fn try_set<R: RangeBounds<usize>>(&mut self, range: R, value: K::Value) -> Result<()> {
        Self::check_assignable()?;
        let (l, r) = resolve_range(&range, self.len)?;
        self.set_rec(0, 0, self.len - 1, l, r, value);
        Ok(())
    }

    #[track_caller]
    pub fn set_at(&mut self, i: usize, value: K::Value) {
        fail_fast(self.try_set_at(i, value))
    }

    pub fn try_set_at(&mut self, i: usize, value: K::Value) -> Result<()> {
        Self::check_assignable()?;
        check_index(i, self.len)?;
        self.set_rec(0, 0, self.len - 1, i, i, value);
        Ok(())
    }

    fn check_assignable() -> Result<()> {
        if K::ASSIGNABLE {
            Ok(())
        } else {
            Err(SegmentTreeError::UnsupportedOperation {
                operation: "set",
                kind: K::NAME,
            })
        }
    }

    fn set_rec(&mut self, pos: usize, lo: usize, hi: usize, l: usize, r: usize, value: K::Value) {
        self.push(pos, lo, hi);
        if l <= lo && hi <= r {
            self.nodes[pos].push_assign::<K>(value);
            self.push(pos, lo, hi);
            return;
        }
        let mid = lo + (hi - lo) / 2;
        if l <= mid {
            self.set_rec(2 * pos + 1, lo, mid, l, r, value);
        }
        if r > mid {
            self.set_rec(2 * pos + 2, mid + 1, hi, l, r, value);
        }
        self.pull(pos, lo, mid, hi);
    }
}
