//! One-shot memoization for expensive lookups.
//!
//! Collaborators that repeatedly need the same chain data (a contract's
//! storage type, a parsed script) wrap the fetch in a [`Memo`] or
//! [`MemoMap`] held in their own scope. There is no global cache;
//! every instance is created and dropped with its owner.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;

/// A keyless compute-once cell.
///
/// The first call to [`Memo::get_or_try_init`] runs the closure and
/// stores the result; later calls return the stored value without
/// re-running it. A failed initialization stores nothing, so the next
/// call retries.
#[derive(Debug, Default)]
pub struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    pub fn new() -> Memo<T> {
        Memo {
            cell: OnceCell::new(),
        }
    }

    /// Returns the cached value, computing it on first use.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(init)
    }

    /// Fallible variant; errors are not cached.
    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }
        let value = init()?;
        // A racing init is impossible here (no interior sharing), so the
        // set cannot fail after the get above returned None.
        let _ = self.cell.set(value);
        Ok(self.cell.get().unwrap())
    }

    /// Returns the value if already computed.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }
}

/// A keyed compute-once map.
///
/// Values are cloned out so the map can keep growing while results are
/// in use.
#[derive(Debug, Default)]
pub struct MemoMap<K, V> {
    entries: RefCell<HashMap<K, V>>,
}

impl<K: Eq + Hash + Clone, V: Clone> MemoMap<K, V> {
    pub fn new() -> MemoMap<K, V> {
        MemoMap {
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, computing it on first use.
    pub fn get_or_init(&self, key: &K, init: impl FnOnce() -> V) -> V {
        if let Some(value) = self.entries.borrow().get(key) {
            return value.clone();
        }
        let value = init();
        self.entries
            .borrow_mut()
            .insert(key.clone(), value.clone());
        value
    }

    /// Fallible variant; errors are not cached.
    pub fn get_or_try_init<E>(
        &self,
        key: &K,
        init: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.entries.borrow().get(key) {
            return Ok(value.clone());
        }
        let value = init()?;
        self.entries
            .borrow_mut()
            .insert(key.clone(), value.clone());
        Ok(value)
    }

    /// Returns the value for `key` if already computed.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
