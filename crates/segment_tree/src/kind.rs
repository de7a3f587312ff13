//! Node kinds (aggregate + lazy delta) for the segment tree family.
//!
//! Every kind is an uninhabited marker type; the tree is generic over it, so
//! the kind is fixed at construction and dispatch happens at compile time.

use std::fmt::Debug;

/// Aggregation semantics of a segment tree node.
///
/// `Value` serves both as the aggregate of a range and as the pending delta
/// stored on a node. Implementations must ensure `identity()` is neutral in
/// `merge` and `lazy_unit()` is neutral in `compose` and `apply`.
pub trait NodeKind {
    type Value: Copy + PartialEq + Debug;

    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Whether `matches` is defined, i.e. whether `find` may be called.
    const SEARCHABLE: bool = false;

    /// Whether `assign` is defined, i.e. whether range `set` may be called.
    const ASSIGNABLE: bool = false;

    fn identity() -> Self::Value;

    /// Associative combination of two adjacent aggregates.
    fn merge(left: &Self::Value, right: &Self::Value) -> Self::Value;

    fn lazy_unit() -> Self::Value;

    /// Accumulate `delta` into a pending delta `lazy` (apply `lazy` first).
    fn compose(lazy: &Self::Value, delta: &Self::Value) -> Self::Value;

    /// Fold a pending delta into the aggregate of `len` elements.
    fn apply(value: &Self::Value, lazy: &Self::Value, len: usize) -> Self::Value;

    /// Aggregate of `len` elements that were all set to `value`.
    ///
    /// Only called when `ASSIGNABLE` is `true`.
    #[inline(always)]
    fn assign(value: &Self::Value, len: usize) -> Self::Value {
        let _ = len;
        *value
    }

    /// Predicate driving `find`.
    ///
    /// Only called when `SEARCHABLE` is `true`.
    #[inline(always)]
    fn matches(value: &Self::Value, target: &Self::Value) -> bool {
        let _ = (value, target);
        false
    }
}

/// Range sum with range add.
#[derive(Clone, Copy, Debug)]
pub enum Sum {}

impl NodeKind for Sum {
    type Value = i64;

    const NAME: &'static str = "sum";
    const ASSIGNABLE: bool = true;

    #[inline(always)]
    fn identity() -> i64 {
        0
    }

    #[inline(always)]
    fn merge(left: &i64, right: &i64) -> i64 {
        left.wrapping_add(*right)
    }

    #[inline(always)]
    fn lazy_unit() -> i64 {
        0
    }

    #[inline(always)]
    fn compose(lazy: &i64, delta: &i64) -> i64 {
        lazy.wrapping_add(*delta)
    }

    #[inline(always)]
    fn apply(value: &i64, lazy: &i64, len: usize) -> i64 {
        value.wrapping_add(lazy.wrapping_mul(len as i64))
    }

    #[inline(always)]
    fn assign(value: &i64, len: usize) -> i64 {
        value.wrapping_mul(len as i64)
    }
}

/// Adds `lazy` to `value` unless `value` is the identity `empty`, which marks
/// a slot holding no element.
///
/// Uses the same wrapping addition as `compose`: applying `d1` then `d2`
/// equals applying `d1 + d2`.
#[inline(always)]
fn shift_unless_empty(value: i64, lazy: i64, empty: i64) -> i64 {
    if value == empty { value } else { value.wrapping_add(lazy) }
}

/// Range maximum with range add.
///
/// `find` locates an element `>= target`. Slots holding the identity
/// (`i64::MIN`) stay empty under deltas; give them a value with `set`.
/// Values must stay strictly inside the `i64` bounds.
#[derive(Clone, Copy, Debug)]
pub enum Max {}

impl NodeKind for Max {
    type Value = i64;

    const NAME: &'static str = "max";
    const SEARCHABLE: bool = true;
    const ASSIGNABLE: bool = true;

    #[inline(always)]
    fn identity() -> i64 {
        i64::MIN
    }

    #[inline(always)]
    fn merge(left: &i64, right: &i64) -> i64 {
        *left.max(right)
    }

    #[inline(always)]
    fn lazy_unit() -> i64 {
        0
    }

    #[inline(always)]
    fn compose(lazy: &i64, delta: &i64) -> i64 {
        lazy.wrapping_add(*delta)
    }

    #[inline(always)]
    fn apply(value: &i64, lazy: &i64, _len: usize) -> i64 {
        shift_unless_empty(*value, *lazy, i64::MIN)
    }

    #[inline(always)]
    fn matches(value: &i64, target: &i64) -> bool {
        value >= target
    }
}

/// Range minimum with range add.
///
/// `find` locates an element `<= target`. Slots holding the identity
/// (`i64::MAX`) stay empty under deltas, as in [`Max`].
#[derive(Clone, Copy, Debug)]
pub enum Min {}

impl NodeKind for Min {
    type Value = i64;

    const NAME: &'static str = "min";
    const SEARCHABLE: bool = true;
    const ASSIGNABLE: bool = true;

    #[inline(always)]
    fn identity() -> i64 {
        i64::MAX
    }

    #[inline(always)]
    fn merge(left: &i64, right: &i64) -> i64 {
        *left.min(right)
    }

    #[inline(always)]
    fn lazy_unit() -> i64 {
        0
    }

    #[inline(always)]
    fn compose(lazy: &i64, delta: &i64) -> i64 {
        lazy.wrapping_add(*delta)
    }

    #[inline(always)]
    fn apply(value: &i64, lazy: &i64, _len: usize) -> i64 {
        shift_unless_empty(*value, *lazy, i64::MAX)
    }

    #[inline(always)]
    fn matches(value: &i64, target: &i64) -> bool {
        value <= target
    }
}

/// Range xor with range xor-update.
///
/// A delta toggles the aggregate only over an odd number of elements.
#[derive(Clone, Copy, Debug)]
pub enum Xor {}

impl NodeKind for Xor {
    type Value = i64;

    const NAME: &'static str = "xor";
    const ASSIGNABLE: bool = true;

    #[inline(always)]
    fn identity() -> i64 {
        0
    }

    #[inline(always)]
    fn merge(left: &i64, right: &i64) -> i64 {
        left ^ right
    }

    #[inline(always)]
    fn lazy_unit() -> i64 {
        0
    }

    #[inline(always)]
    fn compose(lazy: &i64, delta: &i64) -> i64 {
        lazy ^ delta
    }

    #[inline(always)]
    fn apply(value: &i64, lazy: &i64, len: usize) -> i64 {
        if len & 1 == 1 { value ^ lazy } else { *value }
    }

    #[inline(always)]
    fn assign(value: &i64, len: usize) -> i64 {
        if len & 1 == 1 { *value } else { 0 }
    }
}

/// Range bitwise-and with range or-update.
///
/// The identity is `-1`, all 64 bits set.
#[derive(Clone, Copy, Debug)]
pub enum And {}

impl NodeKind for And {
    type Value = i64;

    const NAME: &'static str = "and";

    #[inline(always)]
    fn identity() -> i64 {
        -1
    }

    #[inline(always)]
    fn merge(left: &i64, right: &i64) -> i64 {
        left & right
    }

    #[inline(always)]
    fn lazy_unit() -> i64 {
        0
    }

    #[inline(always)]
    fn compose(lazy: &i64, delta: &i64) -> i64 {
        lazy | delta
    }

    #[inline(always)]
    fn apply(value: &i64, lazy: &i64, _len: usize) -> i64 {
        value | lazy
    }
}
