//! String interning pool.
//!
//! Maps strings to dense 32-bit ids for integer-based comparison and shared
//! storage of repeated path components. Ids are assigned in first-seen order
//! and never reused; the pool only grows.

use rustc_hash::FxHashMap;

use crate::{AllocError, StringId};

/// Dense string interning pool.
///
/// Single-writer: the pool provides no internal synchronization. Sharing a
/// pool across threads requires an external lock or one pool per thread.
#[derive(Debug, Clone)]
pub struct StringPool {
    /// Interned contents, indexed by [`StringId`].
    strings: Vec<Box<str>>,
    /// Exact-match lookup from content to id.
    ids: FxHashMap<Box<str>, StringId>,
}

impl StringPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        StringPool {
            strings: Vec::with_capacity(64),
            ids: FxHashMap::default(),
        }
    }

    /// Try to intern a string, returning the existing id on an exact match.
    ///
    /// Fails with [`AllocError::PoolExhausted`] if the id space is full; the
    /// pool is left unchanged in that case.
    pub fn try_intern(&mut self, s: &str) -> Result<StringId, AllocError> {
        if let Some(&id) = self.ids.get(s) {
            return Ok(id);
        }
        let raw = u32::try_from(self.strings.len()).map_err(|_| AllocError::PoolExhausted {
            count: self.strings.len(),
        })?;
        let id = StringId::new(raw);
        self.strings.push(Box::from(s));
        self.ids.insert(Box::from(s), id);
        Ok(id)
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics if the id space is exhausted (over 4 billion strings). Use
    /// [`try_intern`](Self::try_intern) to handle that case gracefully.
    pub fn intern(&mut self, s: &str) -> StringId {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for an id.
    pub fn get(&self, id: StringId) -> Result<&str, AllocError> {
        match self.strings.get(id.index()) {
            Some(s) => Ok(s),
            None => Err(AllocError::StringOutOfRange {
                id,
                len: self.strings.len(),
            }),
        }
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether no strings have been interned yet.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}
