//! Shared allocator handle for path values.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::Hasher;
use std::rc::Rc;

use fastpath_alloc::PathAllocator;

/// Shared handle to a [`PathAllocator`].
///
/// The allocator is single-writer with no internal locking, so the handle is
/// deliberately `Rc<RefCell<_>>`: one allocator per thread, with cloned
/// handles all pointing at the same pool and tree. Paths created through
/// clones of the same handle share prefixes and compare by node identity.
///
/// This newtype is the one blessed way to share an allocator; holding a raw
/// `Rc<RefCell<PathAllocator>>` elsewhere defeats the identity checks that
/// path equality and hashing rely on.
#[derive(Clone)]
pub struct SharedAllocator(Rc<RefCell<PathAllocator>>);

impl SharedAllocator {
    /// Create a handle around a fresh allocator with separator `/`.
    pub fn new() -> Self {
        Self::from_allocator(PathAllocator::new())
    }

    /// Create a handle around a fresh allocator with a custom separator.
    pub fn with_separator(separator: char) -> Self {
        Self::from_allocator(PathAllocator::with_separator(separator))
    }

    /// Wrap an explicitly constructed allocator.
    pub fn from_allocator(allocator: PathAllocator) -> Self {
        SharedAllocator(Rc::new(RefCell::new(allocator)))
    }

    /// Whether two handles refer to the same allocator instance.
    pub fn same_allocator(&self, other: &SharedAllocator) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn borrow(&self) -> Ref<'_, PathAllocator> {
        self.0.borrow()
    }

    pub(crate) fn borrow_mut(&self) -> RefMut<'_, PathAllocator> {
        self.0.borrow_mut()
    }

    /// Feed the allocator's identity into a hasher.
    pub(crate) fn hash_identity<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl Default for SharedAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(alloc) => {
                let stats = alloc.stats();
                write!(
                    f,
                    "SharedAllocator(strings: {}, nodes: {})",
                    stats.string_count, stats.node_count
                )
            }
            Err(_) => f.write_str("SharedAllocator(<borrowed>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let alloc = SharedAllocator::new();
        let clone = alloc.clone();
        assert!(alloc.same_allocator(&clone));

        let other = SharedAllocator::new();
        assert!(!alloc.same_allocator(&other));
    }

    #[test]
    fn clones_share_state() {
        let alloc = SharedAllocator::new();
        let clone = alloc.clone();
        let before = alloc.borrow().stats().node_count;

        clone
            .borrow_mut()
            .from_string("a/b/c")
            .ok();
        assert!(alloc.borrow().stats().node_count > before);
    }
}
