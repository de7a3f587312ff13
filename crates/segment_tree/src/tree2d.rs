use std::ops::RangeBounds;

use crate::error::{Result, SegmentTreeError};
use crate::kind::NodeKind;
use crate::tree::SegmentTree;
use crate::util::{check_index, fail_fast, resolve_range};

/// Segment tree over the rows of a matrix whose nodes are column trees.
///
/// The outer node covering rows `[a, b]` owns a tree holding, at column `j`,
/// the aggregate of column `j` over those rows.
#[derive(Debug)]
pub struct SegmentTree2D<K: NodeKind> {
    rows: Vec<SegmentTree<K>>,
    height: usize,
    width: usize,
}

impl<K: NodeKind> Clone for SegmentTree2D<K> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            height: self.height,
            width: self.width,
        }
    }
}

impl<K: NodeKind> SegmentTree2D<K> {
    /// `height x width` matrix of identity values.
    pub fn new(height: usize, width: usize) -> Self {
        tracing::debug!(kind = K::NAME, height, width, "2d segment tree allocated");
        Self {
            rows: vec![SegmentTree::new(width); 4 * height],
            height,
            width,
        }
    }

    /// Builds from row-major data in O(height * width).
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same width.
    #[track_caller]
    pub fn from_matrix<R: AsRef<[K::Value]>>(matrix: &[R]) -> Self {
        fail_fast(Self::try_from_matrix(matrix))
    }

    pub fn try_from_matrix<R: AsRef<[K::Value]>>(matrix: &[R]) -> Result<Self> {
        let height = matrix.len();
        let width = matrix.first().map_or(0, |row| row.as_ref().len());
        if let Some((row, found)) = matrix
            .iter()
            .map(|row| row.as_ref().len())
            .enumerate()
            .find(|&(_, found)| found != width)
        {
            return Err(SegmentTreeError::RaggedMatrix {
                row,
                expected: width,
                found,
            });
        }

        let mut tree = Self {
            rows: vec![SegmentTree::new(0); 4 * height],
            height,
            width,
        };
        if height > 0 {
            tree.build(0, 0, height - 1, matrix)?;
        }
        tracing::debug!(kind = K::NAME, height, width, "2d segment tree built");
        Ok(tree)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Aggregate of the sub-matrix `rows x cols`.
    #[track_caller]
    pub fn query<R, C>(&mut self, rows: R, cols: C) -> K::Value
    where
        R: RangeBounds<usize>,
        C: RangeBounds<usize>,
    {
        fail_fast(self.try_query(rows, cols))
    }

    pub fn try_query<R, C>(&mut self, rows: R, cols: C) -> Result<K::Value>
    where
        R: RangeBounds<usize>,
        C: RangeBounds<usize>,
    {
        let (i1, i2) = resolve_range(&rows, self.height)?;
        let (j1, j2) = resolve_range(&cols, self.width)?;
        Ok(self.query_rec(0, 0, self.height - 1, i1, i2, j1, j2))
    }

    #[track_caller]
    pub fn get(&mut self, i: usize, j: usize) -> K::Value {
        fail_fast(self.try_get(i, j))
    }

    pub fn try_get(&mut self, i: usize, j: usize) -> Result<K::Value> {
        check_index(i, self.height)?;
        check_index(j, self.width)?;
        Ok(self.query_rec(0, 0, self.height - 1, i, i, j, j))
    }

    /// Applies `delta` to the cell `(i, j)` with the kind's update rule.
    #[track_caller]
    pub fn update(&mut self, i: usize, j: usize, delta: K::Value) {
        fail_fast(self.try_update(i, j, delta))
    }

    pub fn try_update(&mut self, i: usize, j: usize, delta: K::Value) -> Result<()> {
        check_index(i, self.height)?;
        check_index(j, self.width)?;
        self.update_rec(0, 0, self.height - 1, i, j, &delta);
        Ok(())
    }

    fn build<R: AsRef<[K::Value]>>(
        &mut self,
        pos: usize,
        lo: usize,
        hi: usize,
        matrix: &[R],
    ) -> Result<()> {
        if lo == hi {
            self.rows[pos] = SegmentTree::from_values(matrix[lo].as_ref());
            return Ok(());
        }
        let mid = lo + (hi - lo) / 2;
        self.build(2 * pos + 1, lo, mid, matrix)?;
        self.build(2 * pos + 2, mid + 1, hi, matrix)?;
        self.rows[pos] = SegmentTree::try_merge(&self.rows[2 * pos + 1], &self.rows[2 * pos + 2])?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn query_rec(
        &mut self,
        pos: usize,
        lo: usize,
        hi: usize,
        i1: usize,
        i2: usize,
        j1: usize,
        j2: usize,
    ) -> K::Value {
        if i1 <= lo && hi <= i2 {
            return self.rows[pos].query(j1..=j2);
        }
        let mid = lo + (hi - lo) / 2;
        if i2 <= mid {
            self.query_rec(2 * pos + 1, lo, mid, i1, i2, j1, j2)
        } else if i1 > mid {
            self.query_rec(2 * pos + 2, mid + 1, hi, i1, i2, j1, j2)
        } else {
            let top = self.query_rec(2 * pos + 1, lo, mid, i1, i2, j1, j2);
            let bottom = self.query_rec(2 * pos + 2, mid + 1, hi, i1, i2, j1, j2);
            K::merge(&top, &bottom)
        }
    }

    fn update_rec(&mut self, pos: usize, lo: usize, hi: usize, i: usize, j: usize, delta: &K::Value) {
        if lo == hi {
            self.rows[pos].update_at(j, *delta);
            return;
        }
        let mid = lo + (hi - lo) / 2;
        if i <= mid {
            self.update_rec(2 * pos + 1, lo, mid, i, j, delta);
        } else {
            self.update_rec(2 * pos + 2, mid + 1, hi, i, j, delta);
        }
        let top = self.rows[2 * pos + 1].get(j);
        let bottom = self.rows[2 * pos + 2].get(j);
        self.rows[pos].replace(j, K::merge(&top, &bottom));
    }
}
