use crate::kind::NodeKind;

/// One slot of the implicit tree.
///
/// `lazy` and `assign` are pending for the node's whole range and have not
/// been folded into `value` yet. Flushing folds them in and hands them down
/// one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Node<V> {
    pub(crate) value: V,
    pub(crate) lazy: V,
    pub(crate) assign: Option<V>,
}

impl<V: Copy + PartialEq> Node<V> {
    #[inline(always)]
    pub(crate) fn leaf<K: NodeKind<Value = V>>(value: V) -> Self {
        Self {
            value,
            lazy: K::lazy_unit(),
            assign: None,
        }
    }

    #[inline(always)]
    pub(crate) fn empty<K: NodeKind<Value = V>>() -> Self {
        Self::leaf::<K>(K::identity())
    }

    #[inline(always)]
    pub(crate) fn is_pending<K: NodeKind<Value = V>>(&self) -> bool {
        self.assign.is_some() || self.lazy != K::lazy_unit()
    }

    /// Parent of two flushed siblings.
    #[inline(always)]
    pub(crate) fn merge<K: NodeKind<Value = V>>(left: &Self, right: &Self) -> Self {
        debug_assert!(!left.is_pending::<K>() && !right.is_pending::<K>());
        Self::leaf::<K>(K::merge(&left.value, &right.value))
    }

    /// Queues a delta on top of whatever is already pending.
    #[inline(always)]
    pub(crate) fn push_delta<K: NodeKind<Value = V>>(&mut self, delta: &V) {
        self.lazy = K::compose(&self.lazy, delta);
    }

    /// Queues an assignment; it supersedes every pending delta.
    #[inline(always)]
    pub(crate) fn push_assign<K: NodeKind<Value = V>>(&mut self, value: V) {
        self.assign = Some(value);
        self.lazy = K::lazy_unit();
    }
}
