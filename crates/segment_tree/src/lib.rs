//! Lazy-propagation segment trees.
//!
//! - [`SegmentTree`]: range query, range update, range assignment and
//!   predicate search over `n` values, generic over a [`NodeKind`].
//! - [`SegmentTree2D`]: sub-matrix query and point update over a matrix.
//!
//! Ranges are any `RangeBounds<usize>`. Every operation has a `try_*` form
//! returning [`SegmentTreeError`] on a precondition violation; the plain form
//! panics instead.

pub mod kind;

mod assign;
mod error;
mod node;
mod tree;
mod tree2d;
mod util;

pub use error::{Result, SegmentTreeError};
pub use kind::{And, Max, Min, NodeKind, Sum, Xor};
pub use tree::SegmentTree;
pub use tree2d::SegmentTree2D;
