//! pathlib-style path values backed by a shared path allocator.
//!
//! [`FastPath`] is a cheap, copyable-feeling path value: an allocator handle
//! plus a 32-bit node id. All structure lives in the shared
//! [`PathAllocator`], so paths with common prefixes share storage and
//! compare by integer identity.
//!
//! ```
//! use fastpath::{FastPath, SharedAllocator};
//!
//! # fn main() -> Result<(), fastpath::PathError> {
//! let alloc = SharedAllocator::new();
//! let config = FastPath::parse(&alloc, "/etc/app/config.toml")?;
//!
//! assert_eq!(config.name()?, "config.toml");
//! assert_eq!(config.suffix()?, ".toml");
//! assert_eq!(config.parent()?.to_string(), "/etc/app");
//!
//! let backup = config.with_suffix(".bak")?;
//! assert_eq!(backup.to_string(), "/etc/app/config.bak");
//! # Ok(())
//! # }
//! ```
//!
//! There is no global default allocator: construction is explicit, and the
//! composition root decides how many allocators exist and who holds them.

mod fs;
mod path;
mod shared;

pub use fastpath_alloc::{
    AllocError, Anchor, NodeId, PathAllocator, RootKind, Stats, StringId,
};
pub use path::{FastPath, PathError};
pub use shared::SharedAllocator;
