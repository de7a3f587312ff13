use std::ops::{Bound, RangeBounds};

use crate::error::{Result, SegmentTreeError};

/// Resolves `range` against a sequence of length `len` into inclusive `(l, r)`.
pub(crate) fn resolve_range<R: RangeBounds<usize>>(range: &R, len: usize) -> Result<(usize, usize)> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    if start >= end || end > len {
        return Err(SegmentTreeError::IndexOutOfRange { start, end, len });
    }
    Ok((start, end - 1))
}

#[inline(always)]
pub(crate) fn check_index(i: usize, len: usize) -> Result<()> {
    if i < len {
        Ok(())
    } else {
        Err(SegmentTreeError::IndexOutOfRange {
            start: i,
            end: i.saturating_add(1),
            len,
        })
    }
}

/// Unwraps a checked result, aborting the caller on a precondition violation.
#[track_caller]
#[inline]
pub(crate) fn fail_fast<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "segment tree precondition violated");
            panic!("{err}");
        }
    }
}
