use thiserror::Error;

/// Precondition violations reported by the segment tree family.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SegmentTreeError {
    /// The requested range is empty or reaches past the end.
    ///
    /// Bounds are half-open as resolved from the caller's range.
    #[error("range {start}..{end} out of bounds for length {len}")]
    IndexOutOfRange { start: usize, end: usize, len: usize },

    #[error("cannot merge trees of length {lhs} and {rhs}")]
    ShapeMismatch { lhs: usize, rhs: usize },

    #[error("cannot merge a tree with pending lazy updates")]
    UnflushedMerge,

    #[error("{operation} is not supported by the {kind} kind")]
    UnsupportedOperation {
        operation: &'static str,
        kind: &'static str,
    },

    #[error("matrix row {row} has width {found}, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, SegmentTreeError>;
