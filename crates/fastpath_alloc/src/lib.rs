//! Shared path allocator: string interning plus an append-only prefix tree.
//!
//! Hierarchical path values are represented as small integer handles instead
//! of repeated strings:
//! - [`StringPool`] interns component strings to dense [`StringId`]s.
//! - [`PrefixTree`] stores `{parent, name}` nodes in an append-only arena;
//!   paths sharing a prefix share the same ancestor [`NodeId`] chain.
//! - [`PathAllocator`] composes both with a bounded LRU lookup cache and
//!   exposes the construction and query operations.
//!
//! # Design
//!
//! - **Intern everything**: components become `StringId(u32)`, paths become
//!   `NodeId(u32)`; equality is integer comparison.
//! - **Arena growth**: storage only grows, handles are never relocated,
//!   freed, or reused while the allocator is alive.
//! - **Explicit anchors**: absolute vs. relative is an [`Anchor`] supplied
//!   by the caller, never re-derived from tokenized text.
//! - **Single-writer**: no internal synchronization; use one allocator per
//!   thread or wrap it in an external lock.

mod alloc;
mod error;
mod handle;
mod pool;
mod tree;

pub use alloc::{Anchor, PathAllocator, Stats, DEFAULT_CACHE_CAPACITY};
pub use error::AllocError;
pub use handle::{NodeId, StringId};
pub use pool::StringPool;
pub use tree::{PrefixTree, RootKind, TreeNode};
