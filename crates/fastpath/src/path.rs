//! Pure path value type.
//!
//! [`FastPath`] holds an allocator handle plus a [`NodeId`] and derives every
//! operation by delegating to the allocator. It never reaches into the pool
//! or tree directly, and nothing here performs I/O.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Div;

use thiserror::Error;

use fastpath_alloc::{AllocError, Anchor, NodeId, RootKind};

use crate::SharedAllocator;

/// Error produced by path value operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The underlying allocator rejected the operation.
    #[error(transparent)]
    Alloc(#[from] AllocError),

    /// The path is a root and has no file name to replace.
    #[error("path {0:?} has no file name to replace")]
    NoFileName(String),

    /// A replacement file name that is empty or contains the separator.
    #[error("invalid file name {0:?}")]
    InvalidFileName(String),

    /// `relative_to` on a path that is not under the given base.
    #[error("{path:?} is not relative to {base:?}")]
    NotRelative { path: String, base: String },
}

/// A hierarchical path value backed by a shared allocator.
///
/// Cheap to clone: two machine words plus a reference count. Equality and
/// hashing combine allocator identity with the node handle, so paths from
/// different allocators never compare equal even when they print the same.
#[derive(Clone)]
pub struct FastPath {
    alloc: SharedAllocator,
    node: NodeId,
}

impl FastPath {
    /// Parse a path string through `alloc`.
    ///
    /// Absoluteness is taken from the leading separator; `""` and `"."`
    /// produce the empty relative path.
    pub fn parse(alloc: &SharedAllocator, text: &str) -> Result<Self, PathError> {
        let node = alloc.borrow_mut().from_string(text)?;
        Ok(FastPath {
            alloc: alloc.clone(),
            node,
        })
    }

    /// Build a path from an anchor and component sequence.
    pub fn from_parts<I, S>(
        alloc: &SharedAllocator,
        anchor: Anchor<'_>,
        parts: I,
    ) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let node = alloc.borrow_mut().from_parts(anchor, parts)?;
        Ok(FastPath {
            alloc: alloc.clone(),
            node,
        })
    }

    /// The node handle inside the owning allocator.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The owning allocator handle.
    pub fn allocator(&self) -> &SharedAllocator {
        &self.alloc
    }

    /// Path components, root-to-leaf, root sentinel excluded.
    pub fn parts(&self) -> Result<Vec<String>, PathError> {
        let alloc = self.alloc.borrow();
        Ok(alloc
            .parts(self.node)?
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    /// The final component. For roots this is the sentinel name.
    pub fn name(&self) -> Result<String, PathError> {
        Ok(self.alloc.borrow().name(self.node)?.to_owned())
    }

    /// The final component without its suffix.
    pub fn stem(&self) -> Result<String, PathError> {
        let name = self.name()?;
        let (stem, _) = split_suffix(&name);
        Ok(stem.to_owned())
    }

    /// The suffix of the final component, dot included, or `""`.
    pub fn suffix(&self) -> Result<String, PathError> {
        let name = self.name()?;
        let (_, suffix) = split_suffix(&name);
        Ok(suffix.to_owned())
    }

    /// The parent path. Roots are their own parent.
    pub fn parent(&self) -> Result<FastPath, PathError> {
        let parent = self.alloc.borrow().parent(self.node)?;
        Ok(self.wrap(parent))
    }

    /// All ancestors, nearest first, ending with the root.
    pub fn parents(&self) -> Result<Vec<FastPath>, PathError> {
        let mut ancestors = Vec::new();
        let mut current = self.clone();
        loop {
            let parent = current.parent()?;
            if parent.node == current.node {
                break;
            }
            ancestors.push(parent.clone());
            current = parent;
        }
        Ok(ancestors)
    }

    /// Whether the path is rooted at the absolute root or a drive root.
    pub fn is_absolute(&self) -> Result<bool, PathError> {
        Ok(self.alloc.borrow().is_absolute(self.node)?)
    }

    /// Append one component (or separator-joined components).
    pub fn join(&self, part: &str) -> Result<FastPath, PathError> {
        self.joinpath([part])
    }

    /// Append a sequence of components.
    pub fn joinpath<I, S>(&self, parts: I) -> Result<FastPath, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let node = self.alloc.borrow_mut().join(self.node, parts)?;
        Ok(self.wrap(node))
    }

    /// Replace the final component.
    pub fn with_name(&self, name: &str) -> Result<FastPath, PathError> {
        let separator = self.alloc.borrow().separator();
        if name.is_empty() || name.contains(separator) {
            return Err(PathError::InvalidFileName(name.to_owned()));
        }
        if self.alloc.borrow().is_root(self.node)? {
            return Err(PathError::NoFileName(self.to_path_string()?));
        }
        self.parent()?.join(name)
    }

    /// Replace the suffix of the final component.
    ///
    /// A missing leading dot is supplied; an empty suffix strips the
    /// current one.
    pub fn with_suffix(&self, suffix: &str) -> Result<FastPath, PathError> {
        let stem = self.stem()?;
        if suffix.is_empty() {
            return self.with_name(&stem);
        }
        if suffix.starts_with('.') {
            self.with_name(&format!("{stem}{suffix}"))
        } else {
            self.with_name(&format!("{stem}.{suffix}"))
        }
    }

    /// Replace the stem of the final component, keeping the suffix.
    pub fn with_stem(&self, stem: &str) -> Result<FastPath, PathError> {
        let suffix = self.suffix()?;
        self.with_name(&format!("{stem}{suffix}"))
    }

    /// Whether `base` is an ancestor of (or equal to) this path.
    ///
    /// Always false across distinct allocators: node handles are
    /// meaningless outside the allocator that produced them.
    pub fn is_relative_to(&self, base: &FastPath) -> Result<bool, PathError> {
        if !self.alloc.same_allocator(&base.alloc) {
            return Ok(false);
        }
        let alloc = self.alloc.borrow();
        let mut current = self.node;
        loop {
            if current == base.node {
                return Ok(true);
            }
            let parent = alloc.parent(current)?;
            if parent == current {
                return Ok(false);
            }
            current = parent;
        }
    }

    /// The remainder of this path below `base`, as a relative path.
    pub fn relative_to(&self, base: &FastPath) -> Result<FastPath, PathError> {
        if !self.is_relative_to(base)? {
            return Err(PathError::NotRelative {
                path: self.to_path_string()?,
                base: base.to_path_string()?,
            });
        }
        let names = {
            let alloc = self.alloc.borrow();
            let mut reversed = Vec::new();
            let mut current = self.node;
            while current != base.node {
                reversed.push(alloc.name(current)?.to_owned());
                current = alloc.parent(current)?;
            }
            reversed.reverse();
            reversed
        };
        let node = self
            .alloc
            .borrow_mut()
            .from_parts(Anchor::Relative, &names)?;
        Ok(self.wrap(node))
    }

    /// String form: parts joined with the separator, with the separator
    /// prepended for absolute roots and the drive token prefixed for drive
    /// roots. The empty relative path prints as `"."`.
    pub fn to_path_string(&self) -> Result<String, PathError> {
        let alloc = self.alloc.borrow();
        let separator = alloc.separator();
        let sep_str = separator.to_string();
        let joined = alloc.parts(self.node)?.join(&sep_str);
        match alloc.root_kind(self.node)? {
            RootKind::Absolute => Ok(format!("{separator}{joined}")),
            RootKind::Drive(token) => {
                let token = alloc.string(token)?;
                if joined.is_empty() {
                    Ok(token.to_owned())
                } else {
                    Ok(format!("{token}{separator}{joined}"))
                }
            }
            RootKind::Relative | RootKind::Unknown => {
                if joined.is_empty() {
                    Ok(".".to_owned())
                } else {
                    Ok(joined)
                }
            }
        }
    }

    fn wrap(&self, node: NodeId) -> FastPath {
        FastPath {
            alloc: self.alloc.clone(),
            node,
        }
    }
}

/// Split a file name at the last dot. A missing dot, or a dot at position
/// zero (hidden files), means the whole name is the stem.
fn split_suffix(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

impl fmt::Display for FastPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_path_string().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Debug for FastPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_path_string() {
            Ok(text) => write!(f, "FastPath({text:?})"),
            Err(_) => write!(f, "FastPath(node = {:?})", self.node),
        }
    }
}

impl PartialEq for FastPath {
    fn eq(&self, other: &Self) -> bool {
        self.alloc.same_allocator(&other.alloc) && self.node == other.node
    }
}

impl Eq for FastPath {}

impl Hash for FastPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.alloc.hash_identity(state);
        self.node.hash(state);
    }
}

impl Div<&str> for &FastPath {
    type Output = Result<FastPath, PathError>;

    fn div(self, rhs: &str) -> Self::Output {
        self.join(rhs)
    }
}
