//! Append-only prefix tree of path components.
//!
//! Each node stores a parent link and the interned id of its own name. Paths
//! that share a prefix share the same ancestor node chain, which is the
//! deduplication property the allocator exists to provide. The arena only
//! grows; a [`NodeId`] stays valid for the tree's entire lifetime.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{AllocError, NodeId, StringId, StringPool};

/// A single tree node: parent link plus interned name.
///
/// `parent` is `None` only for root nodes. Nodes are created in topological
/// order, so a parent's index is always strictly less than its child's; the
/// tree is acyclic by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode {
    parent: Option<NodeId>,
    name: StringId,
}

impl TreeNode {
    /// Parent link; `None` for roots.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Interned name of this node.
    #[inline]
    pub fn name(&self) -> StringId {
        self.name
    }
}

/// Classification of a node's terminal ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// Rooted at the fixed relative root (empty sentinel name).
    Relative,
    /// Rooted at the fixed absolute root (sentinel name `"/"`).
    Absolute,
    /// Rooted at a lazily registered drive root; carries the drive token.
    Drive(StringId),
    /// A parentless node outside the registered root set.
    Unknown,
}

/// Append-only arena of path nodes with an O(1) child index.
///
/// The relative root and the absolute root occupy the reserved indices 0 and
/// 1 of every tree ([`NodeId::RELATIVE_ROOT`], [`NodeId::ABSOLUTE_ROOT`]).
/// Drive roots are registered lazily on first use.
#[derive(Debug, Clone)]
pub struct PrefixTree {
    nodes: Vec<TreeNode>,
    /// Child edge index keyed by `(parent, name)`, maintained alongside the
    /// arena so child lookup never scans the node array.
    children: FxHashMap<(NodeId, StringId), NodeId>,
    /// Lazily registered drive roots, keyed by the interned drive token.
    drive_roots: FxHashMap<StringId, NodeId>,
}

impl PrefixTree {
    /// Create a tree with the two fixed roots reserved.
    ///
    /// Interns the root sentinel names (`""`, `"/"`) into `pool`; the tree
    /// depends on the pool only for name ids, never for structure.
    ///
    /// # Panics
    /// Panics if `pool`'s id space is exhausted.
    pub fn new(pool: &mut StringPool) -> Self {
        let mut tree = PrefixTree {
            nodes: Vec::with_capacity(16),
            children: FxHashMap::default(),
            drive_roots: FxHashMap::default(),
        };
        let relative_name = pool.intern("");
        let absolute_name = pool.intern("/");
        // Indices 0 and 1 are reserved; the arena is empty here.
        tree.nodes.push(TreeNode {
            parent: None,
            name: relative_name,
        });
        tree.nodes.push(TreeNode {
            parent: None,
            name: absolute_name,
        });
        tree
    }

    /// The fixed relative root.
    #[inline]
    pub fn relative_root(&self) -> NodeId {
        NodeId::RELATIVE_ROOT
    }

    /// The fixed absolute root.
    #[inline]
    pub fn absolute_root(&self) -> NodeId {
        NodeId::ABSOLUTE_ROOT
    }

    /// Append a child node under `parent`.
    ///
    /// Fails with [`AllocError::NodeOutOfRange`] for an invalid parent and
    /// [`AllocError::ArenaExhausted`] if the id space is full; the tree is
    /// unchanged on failure. The first edge registered for a
    /// `(parent, name)` pair is the one [`find_child`](Self::find_child)
    /// keeps returning.
    pub fn add_node(&mut self, parent: NodeId, name: StringId) -> Result<NodeId, AllocError> {
        self.node(parent)?;
        self.push(Some(parent), name)
    }

    /// Existing child edge for `(parent, name)`, if any. Amortized O(1).
    #[inline]
    pub fn find_child(&self, parent: NodeId, name: StringId) -> Option<NodeId> {
        self.children.get(&(parent, name)).copied()
    }

    /// Get or lazily register the root for a drive token.
    ///
    /// The token is normalized to uppercase with a trailing `:`, so `"c"`,
    /// `"C"`, and `"C:"` all name the same root.
    pub fn drive_root(
        &mut self,
        pool: &mut StringPool,
        token: &str,
    ) -> Result<NodeId, AllocError> {
        if token.is_empty() {
            return Err(AllocError::InvalidComponent {
                component: String::new(),
                reason: "drive token must not be empty",
            });
        }
        let mut normalized = token.to_ascii_uppercase();
        if !normalized.ends_with(':') {
            normalized.push(':');
        }
        let name = pool.try_intern(&normalized)?;
        if let Some(&root) = self.drive_roots.get(&name) {
            return Ok(root);
        }
        let root = self.push(None, name)?;
        self.drive_roots.insert(name, root);
        tracing::debug!(token = %normalized, ?root, "registered drive root");
        Ok(root)
    }

    /// Parent of `node`; `None` for roots.
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, AllocError> {
        Ok(self.node(node)?.parent)
    }

    /// Interned name of `node`. For roots this is the sentinel name.
    pub fn name_id(&self, node: NodeId) -> Result<StringId, AllocError> {
        Ok(self.node(node)?.name)
    }

    /// Whether `node` is a root.
    pub fn is_root(&self, node: NodeId) -> Result<bool, AllocError> {
        Ok(self.node(node)?.parent.is_none())
    }

    /// Classify `node` by walking to its terminal ancestor.
    pub fn root_kind(&self, node: NodeId) -> Result<RootKind, AllocError> {
        let root = self.root_of(node)?;
        if root == NodeId::RELATIVE_ROOT {
            return Ok(RootKind::Relative);
        }
        if root == NodeId::ABSOLUTE_ROOT {
            return Ok(RootKind::Absolute);
        }
        let name = self.node(root)?.name;
        if self.drive_roots.get(&name) == Some(&root) {
            Ok(RootKind::Drive(name))
        } else {
            Ok(RootKind::Unknown)
        }
    }

    /// Name ids from root to `node`, excluding the root's sentinel name.
    pub fn part_ids(&self, node: NodeId) -> Result<SmallVec<[StringId; 8]>, AllocError> {
        let mut parts: SmallVec<[StringId; 8]> = SmallVec::new();
        let mut current = node;
        loop {
            let entry = self.node(current)?;
            match entry.parent {
                Some(parent) => {
                    parts.push(entry.name);
                    current = parent;
                }
                None => break,
            }
        }
        parts.reverse();
        Ok(parts)
    }

    /// Whether `node` was issued by this tree.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Number of nodes, roots included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty. Never true: the fixed roots always exist.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> Result<&TreeNode, AllocError> {
        self.nodes.get(id.index()).ok_or(AllocError::NodeOutOfRange {
            id,
            len: self.nodes.len(),
        })
    }

    fn root_of(&self, node: NodeId) -> Result<NodeId, AllocError> {
        let mut current = node;
        loop {
            match self.node(current)?.parent {
                Some(parent) => current = parent,
                None => return Ok(current),
            }
        }
    }

    fn push(&mut self, parent: Option<NodeId>, name: StringId) -> Result<NodeId, AllocError> {
        let raw = u32::try_from(self.nodes.len()).map_err(|_| AllocError::ArenaExhausted {
            count: self.nodes.len(),
        })?;
        let id = NodeId::new(raw);
        self.nodes.push(TreeNode { parent, name });
        if let Some(parent) = parent {
            self.children.entry((parent, name)).or_insert(id);
        }
        Ok(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixture() -> (StringPool, PrefixTree) {
        let mut pool = StringPool::new();
        let tree = PrefixTree::new(&mut pool);
        (pool, tree)
    }

    #[test]
    fn roots_occupy_reserved_indices() {
        let (pool, tree) = fixture();
        assert_eq!(tree.relative_root(), NodeId::RELATIVE_ROOT);
        assert_eq!(tree.absolute_root(), NodeId::ABSOLUTE_ROOT);
        assert_eq!(tree.parent(tree.relative_root()).unwrap(), None);
        assert_eq!(tree.parent(tree.absolute_root()).unwrap(), None);

        let relative_name = tree.name_id(tree.relative_root()).unwrap();
        let absolute_name = tree.name_id(tree.absolute_root()).unwrap();
        assert_eq!(pool.get(relative_name).unwrap(), "");
        assert_eq!(pool.get(absolute_name).unwrap(), "/");
    }

    #[test]
    fn add_node_links_parent_and_name() {
        let (mut pool, mut tree) = fixture();
        let name = pool.intern("child");
        let child = tree.add_node(tree.relative_root(), name).unwrap();

        assert!(child.raw() >= 2);
        assert_eq!(tree.parent(child).unwrap(), Some(tree.relative_root()));
        assert_eq!(tree.name_id(child).unwrap(), name);
        assert!(!tree.is_root(child).unwrap());
    }

    #[test]
    fn parent_index_is_always_less_than_child() {
        let (mut pool, mut tree) = fixture();
        let mut parent = tree.relative_root();
        for depth in 0..64 {
            let name = pool.intern(&format!("level{depth}"));
            let child = tree.add_node(parent, name).unwrap();
            assert!(parent.raw() < child.raw());
            parent = child;
        }
    }

    #[test]
    fn find_child_returns_registered_edges() {
        let (mut pool, mut tree) = fixture();
        let first = pool.intern("first");
        let second = pool.intern("second");
        let child1 = tree.add_node(tree.relative_root(), first).unwrap();
        let child2 = tree.add_node(tree.relative_root(), second).unwrap();

        assert_eq!(tree.find_child(tree.relative_root(), first), Some(child1));
        assert_eq!(tree.find_child(tree.relative_root(), second), Some(child2));
        assert_eq!(tree.find_child(child1, second), None);
    }

    #[test]
    fn first_edge_wins_for_duplicate_pairs() {
        let (mut pool, mut tree) = fixture();
        let name = pool.intern("dup");
        let first = tree.add_node(tree.relative_root(), name).unwrap();
        let second = tree.add_node(tree.relative_root(), name).unwrap();
        assert_ne!(first, second);
        assert_eq!(tree.find_child(tree.relative_root(), name), Some(first));
    }

    #[test]
    fn part_ids_exclude_root_sentinel() {
        let (mut pool, mut tree) = fixture();
        let home = pool.intern("home");
        let user = pool.intern("user");
        let docs = pool.intern("documents");
        let a = tree.add_node(tree.absolute_root(), home).unwrap();
        let b = tree.add_node(a, user).unwrap();
        let c = tree.add_node(b, docs).unwrap();

        let ids = tree.part_ids(c).unwrap();
        assert_eq!(ids.as_slice(), &[home, user, docs]);
        assert_eq!(tree.part_ids(tree.absolute_root()).unwrap().as_slice(), &[]);
    }

    #[test]
    fn root_kind_classifies_all_roots() {
        let (mut pool, mut tree) = fixture();
        let name = pool.intern("a");
        let relative_child = tree.add_node(tree.relative_root(), name).unwrap();
        let absolute_child = tree.add_node(tree.absolute_root(), name).unwrap();
        let drive = tree.drive_root(&mut pool, "C:").unwrap();
        let drive_child = tree.add_node(drive, name).unwrap();

        assert_eq!(tree.root_kind(relative_child).unwrap(), RootKind::Relative);
        assert_eq!(tree.root_kind(absolute_child).unwrap(), RootKind::Absolute);
        match tree.root_kind(drive_child).unwrap() {
            RootKind::Drive(token) => assert_eq!(pool.get(token).unwrap(), "C:"),
            other => panic!("expected drive root, got {other:?}"),
        }
    }

    #[test]
    fn drive_tokens_are_normalized() {
        let (mut pool, mut tree) = fixture();
        let lower = tree.drive_root(&mut pool, "c").unwrap();
        let upper = tree.drive_root(&mut pool, "C:").unwrap();
        assert_eq!(lower, upper);
        assert!(tree.is_root(lower).unwrap());

        let name = tree.name_id(lower).unwrap();
        assert_eq!(pool.get(name).unwrap(), "C:");
    }

    #[test]
    fn empty_drive_token_is_rejected() {
        let (mut pool, mut tree) = fixture();
        let err = tree.drive_root(&mut pool, "").unwrap_err();
        assert!(matches!(err, AllocError::InvalidComponent { .. }));
    }

    #[test]
    fn queries_reject_foreign_node_ids() {
        let (_, tree) = fixture();
        let bogus = NodeId::new(999);
        assert!(matches!(
            tree.parent(bogus),
            Err(AllocError::NodeOutOfRange { .. })
        ));
        assert!(matches!(
            tree.part_ids(bogus),
            Err(AllocError::NodeOutOfRange { .. })
        ));
        assert!(!tree.contains(bogus));
    }

    #[test]
    fn node_ids_survive_arena_growth() {
        let (mut pool, mut tree) = fixture();
        let name = pool.intern("pinned");
        let pinned = tree.add_node(tree.relative_root(), name).unwrap();

        for i in 0..10_000 {
            let filler = pool.intern(&format!("filler{i}"));
            tree.add_node(tree.relative_root(), filler).unwrap();
        }

        assert_eq!(tree.name_id(pinned).unwrap(), name);
        assert_eq!(tree.parent(pinned).unwrap(), Some(tree.relative_root()));
    }
}
