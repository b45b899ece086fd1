//! Stable integer handles for interned strings and tree nodes.
//!
//! Both handles are 32-bit indices: `Copy`, `Eq`, `Hash`, cheap to pass, and
//! valid for the entire lifetime of the structure that issued them. Storage
//! growth never relocates a handle's logical target.

use std::fmt;

/// Identifier of an interned string in a [`StringPool`](crate::StringPool).
///
/// Assigned in first-seen order, never reused.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct StringId(u32);

impl StringId {
    /// Create from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        StringId(index)
    }

    /// Index into the pool's string table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringId({})", self.0)
    }
}

/// Identifier of a node in a [`PrefixTree`](crate::PrefixTree).
///
/// A `NodeId` is meaningless outside the allocator that produced it; any
/// equality or hashing of a path value must combine allocator identity with
/// the node id, never the id alone.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The fixed relative root, reserved at index 0 of every tree.
    pub const RELATIVE_ROOT: NodeId = NodeId(0);

    /// The fixed absolute root, reserved at index 1 of every tree.
    pub const ABSOLUTE_ROOT: NodeId = NodeId(1);

    /// Create from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Index into the tree's node arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
