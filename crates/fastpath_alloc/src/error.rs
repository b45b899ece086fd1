//! Allocator errors.
//!
//! Every error surfaces synchronously to the caller of the operation that
//! produced it. Exhaustion is checked before any mutation, so a failed
//! operation leaves the pool and tree fully valid and queryable.

use thiserror::Error;

use crate::{NodeId, StringId};

/// Error produced by the pool, tree, or allocator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    /// A [`StringId`] that was never issued by this pool.
    #[error("string id {id:?} is out of range: pool holds {len} strings")]
    StringOutOfRange { id: StringId, len: usize },

    /// A [`NodeId`] that was never issued by this tree.
    #[error("node id {id:?} is out of range: tree holds {len} nodes")]
    NodeOutOfRange { id: NodeId, len: usize },

    /// The 32-bit string id space is full. The pool is unchanged.
    #[error("string pool exhausted: {count} strings interned, ids are 32-bit")]
    PoolExhausted { count: usize },

    /// The 32-bit node id space is full. The tree is unchanged.
    #[error("node arena exhausted: {count} nodes allocated, ids are 32-bit")]
    ArenaExhausted { count: usize },

    /// A component the allocator cannot accept.
    #[error("invalid path component {component:?}: {reason}")]
    InvalidComponent {
        component: String,
        reason: &'static str,
    },
}
