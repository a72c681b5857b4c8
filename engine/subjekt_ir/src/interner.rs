//! String interner backing [`Name`] identifiers.
//!
//! A single locked pool is enough here: one expression interns a handful of
//! identifiers and string literals. Interned strings are leaked to obtain
//! `&'static str`, which keeps lookups borrow-free; the leak is bounded by
//! the number of distinct strings ever interned.

// Arc is needed for SharedInterner - the same pool is shared by every
// ExprTree compiled for one template family.
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Interior pool state.
struct Pool {
    /// Map from string content to pool index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw()`.
    strings: Vec<&'static str>,
}

use super::Name;

/// String interner with O(1) lookup for interned strings.
///
/// # Thread Safety
/// Uses an `RwLock` for concurrent read access; wrap in [`SharedInterner`]
/// to share across trees (and threads, for batched resolution).
pub struct StringInterner {
    pool: RwLock<Pool>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        let empty: &'static str = "";
        map.insert(empty, 0);
        StringInterner {
            pool: RwLock::new(Pool {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Interning the same content twice returns the same `Name`.
    pub fn intern(&self, s: &str) -> Name {
        // Fast path: already interned
        {
            let guard = self.pool.read();
            if let Some(&idx) = guard.map.get(s) {
                return Name::from_raw(idx);
            }
        }

        let mut guard = self.pool.write();
        // Double-check after acquiring the write lock
        if let Some(&idx) = guard.map.get(s) {
            return Name::from_raw(idx);
        }

        // Leak the string to get a 'static lifetime
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = u32::try_from(guard.strings.len()).unwrap_or(u32::MAX);
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Resolve a `Name` back to its string content.
    ///
    /// A name from a different interner resolves to the empty string.
    pub fn resolve(&self, name: Name) -> &'static str {
        let guard = self.pool.read();
        guard.strings.get(name.index()).copied().unwrap_or("")
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.pool.read().strings.len()
    }

    /// Whether the pool holds only the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a [`StringInterner`].
///
/// Cloning is cheap (`Arc` clone); all clones observe the same pool.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a handle around a fresh interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }

    /// Intern a string, returning its `Name`.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.0.intern(s)
    }

    /// Resolve a `Name` back to its string content.
    #[inline]
    pub fn resolve(&self, name: Name) -> &'static str {
        self.0.resolve(name)
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedInterner")
            .field("len", &self.0.len())
            .finish()
    }
}
