//! Path allocator composing the string pool, prefix tree, and lookup cache.
//!
//! All mutating operations assume exclusive access; the allocator provides
//! no internal synchronization. Every operation is synchronous and
//! CPU-bound: tree walks cost O(path depth), pool and child lookups are
//! amortized O(1).

use std::num::NonZeroUsize;

use lru::LruCache;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

use crate::{AllocError, NodeId, PrefixTree, RootKind, StringId, StringPool};

/// Default capacity of the lookup cache.
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

/// Explicit root selector for path construction.
///
/// Absoluteness is always supplied by the caller. It is never inferred from
/// token text after tokenization, because splitting on the separator
/// consumes the leading separator that carried the information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor<'a> {
    /// Build under the relative root.
    Relative,
    /// Build under the absolute root.
    Absolute,
    /// Build under the (lazily registered) root for this drive token.
    Drive(&'a str),
}

/// Diagnostic counters. Pure observation, no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Strings interned in the pool.
    pub string_count: usize,
    /// Nodes in the tree, roots included.
    pub node_count: usize,
    /// Entries currently held by the lookup cache.
    pub cache_entries: usize,
}

/// Canonical input key for the lookup cache: the node resolution starts
/// from, plus the interned ids of the components to descend through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    base: NodeId,
    parts: Box<[StringId]>,
}

/// Central allocator for path data.
///
/// Owns one [`StringPool`], one [`PrefixTree`], and a bounded LRU cache
/// mapping canonical inputs to previously resolved nodes. Cache entries are
/// pure memoization: eviction never invalidates a handle, and a cached hit
/// is observably identical to a fresh resolution.
pub struct PathAllocator {
    pool: StringPool,
    tree: PrefixTree,
    cache: LruCache<CacheKey, NodeId, FxBuildHasher>,
    separator: char,
}

impl PathAllocator {
    /// Create an allocator with separator `/` and the default cache capacity.
    pub fn new() -> Self {
        Self::with_separator('/')
    }

    /// Create an allocator with a custom separator.
    pub fn with_separator(separator: char) -> Self {
        Self::with_capacity(separator, DEFAULT_CACHE_CAPACITY)
    }

    /// Create an allocator with a custom separator and cache capacity.
    pub fn with_capacity(separator: char, cache_capacity: NonZeroUsize) -> Self {
        let mut pool = StringPool::new();
        let tree = PrefixTree::new(&mut pool);
        PathAllocator {
            pool,
            tree,
            cache: LruCache::with_hasher(cache_capacity, FxBuildHasher::default()),
            separator,
        }
    }

    /// Build (or find) the node for an anchored component sequence.
    ///
    /// Empty components are skipped without creating nodes; components that
    /// embed the separator are split. An empty sequence resolves to the
    /// anchor's root. Components shared with previously built paths reuse
    /// the existing ancestor chain.
    pub fn from_parts<I, S>(&mut self, anchor: Anchor<'_>, parts: I) -> Result<NodeId, AllocError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = self.anchor_root(anchor)?;
        let ids = self.intern_parts(parts)?;
        self.resolve(root, &ids)
    }

    /// Build (or find) the node for a path string.
    ///
    /// Whether the text is absolute is captured from its leading separator
    /// before splitting, then carried forward explicitly; the split itself
    /// consumes that separator. `""` and `"."` resolve to the relative root.
    pub fn from_string(&mut self, text: &str) -> Result<NodeId, AllocError> {
        if text.is_empty() || text == "." {
            return Ok(self.tree.relative_root());
        }
        let anchor = if text.starts_with(self.separator) {
            Anchor::Absolute
        } else {
            Anchor::Relative
        };
        self.from_parts(anchor, [text])
    }

    /// Extend `base` with additional components.
    ///
    /// Equivalent to rebuilding from `base`'s parts plus `parts`, seeded
    /// with `base`'s own root; implemented as a direct walk from `base`.
    pub fn join<I, S>(&mut self, base: NodeId, parts: I) -> Result<NodeId, AllocError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.tree.contains(base) {
            return Err(AllocError::NodeOutOfRange {
                id: base,
                len: self.tree.len(),
            });
        }
        let ids = self.intern_parts(parts)?;
        if ids.is_empty() {
            return Ok(base);
        }
        self.resolve(base, &ids)
    }

    /// Path components of `node`, root-to-leaf, root sentinel excluded.
    pub fn parts(&self, node: NodeId) -> Result<Vec<&str>, AllocError> {
        let ids = self.tree.part_ids(node)?;
        let mut parts = Vec::with_capacity(ids.len());
        for id in ids {
            parts.push(self.pool.get(id)?);
        }
        Ok(parts)
    }

    /// Parent of `node`. Roots are their own parent: walking parents never
    /// advances past a root.
    pub fn parent(&self, node: NodeId) -> Result<NodeId, AllocError> {
        Ok(self.tree.parent(node)?.unwrap_or(node))
    }

    /// Final component of `node`. For roots this is the sentinel name:
    /// `""`, `"/"`, or the drive token.
    pub fn name(&self, node: NodeId) -> Result<&str, AllocError> {
        let id = self.tree.name_id(node)?;
        self.pool.get(id)
    }

    /// Whether `node` is rooted at the absolute root or a drive root.
    pub fn is_absolute(&self, node: NodeId) -> Result<bool, AllocError> {
        Ok(matches!(
            self.tree.root_kind(node)?,
            RootKind::Absolute | RootKind::Drive(_)
        ))
    }

    /// Whether `node` is one of the tree's roots.
    pub fn is_root(&self, node: NodeId) -> Result<bool, AllocError> {
        self.tree.is_root(node)
    }

    /// Classify `node`'s terminal ancestor.
    pub fn root_kind(&self, node: NodeId) -> Result<RootKind, AllocError> {
        self.tree.root_kind(node)
    }

    /// Get or lazily register the root for a drive token.
    pub fn drive_root(&mut self, token: &str) -> Result<NodeId, AllocError> {
        self.tree.drive_root(&mut self.pool, token)
    }

    /// Resolve an interned string id.
    pub fn string(&self, id: StringId) -> Result<&str, AllocError> {
        self.pool.get(id)
    }

    /// The fixed relative root.
    pub fn relative_root(&self) -> NodeId {
        self.tree.relative_root()
    }

    /// The fixed absolute root.
    pub fn absolute_root(&self) -> NodeId {
        self.tree.absolute_root()
    }

    /// The separator this allocator splits and joins on.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Diagnostic counters.
    pub fn stats(&self) -> Stats {
        Stats {
            string_count: self.pool.len(),
            node_count: self.tree.len(),
            cache_entries: self.cache.len(),
        }
    }

    fn anchor_root(&mut self, anchor: Anchor<'_>) -> Result<NodeId, AllocError> {
        match anchor {
            Anchor::Relative => Ok(self.tree.relative_root()),
            Anchor::Absolute => Ok(self.tree.absolute_root()),
            Anchor::Drive(token) => self.tree.drive_root(&mut self.pool, token),
        }
    }

    /// Intern a component sequence, skipping empties and splitting embedded
    /// separators.
    fn intern_parts<I, S>(&mut self, parts: I) -> Result<SmallVec<[StringId; 8]>, AllocError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids: SmallVec<[StringId; 8]> = SmallVec::new();
        for part in parts {
            for token in part.as_ref().split(self.separator) {
                if token.is_empty() {
                    continue;
                }
                ids.push(self.pool.try_intern(token)?);
            }
        }
        Ok(ids)
    }

    /// Walk (and extend) child edges from `base`, consulting the cache.
    fn resolve(&mut self, base: NodeId, ids: &[StringId]) -> Result<NodeId, AllocError> {
        let key = CacheKey {
            base,
            parts: ids.into(),
        };
        if let Some(&node) = self.cache.get(&key) {
            tracing::trace!(?node, "lookup cache hit");
            return Ok(node);
        }

        let mut current = base;
        for &name in ids {
            current = match self.tree.find_child(current, name) {
                Some(child) => child,
                None => {
                    let child = self.tree.add_node(current, name)?;
                    tracing::trace!(node = ?child, parent = ?current, "allocated path node");
                    child
                }
            };
        }
        self.cache.put(key, current);
        Ok(current)
    }
}

impl Default for PathAllocator {
    fn default() -> Self {
        Self::new()
    }
}
