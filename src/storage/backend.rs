//! Key-value store abstraction.
//!
//! The trait is deliberately string-typed: values are opaque to the store and
//! each typed store above it (favorites, preferences) owns the encoding of
//! its own key.

use crate::domain::error::Result;
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

/// String key-value persistence.
///
/// # Implementations
///
/// - [`crate::storage::JsonFileStore`]: JSON file with atomic writes (default)
/// - [`crate::storage::MemoryStore`]: Session-only fallback
pub trait KeyValueStore: Debug {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// The write is durable when this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Shared handle to the plugin's single key-value store.
///
/// The plugin is single-threaded, so a `Rc<RefCell<_>>` is enough to let the
/// favorites store and the theme preference write through the same backend.
pub type StoreHandle = Rc<RefCell<dyn KeyValueStore>>;

/// Wraps a concrete store into a [`StoreHandle`].
///
/// # Examples
///
/// ```
/// use mealdeck::storage::{shared, MemoryStore};
///
/// let handle = shared(MemoryStore::default());
/// handle.borrow_mut().set("theme", "light")?;
/// assert_eq!(handle.borrow().get("theme")?.as_deref(), Some("light"));
/// # Ok::<(), mealdeck::MealdeckError>(())
/// ```
pub fn shared<S: KeyValueStore + 'static>(store: S) -> StoreHandle {
    Rc::new(RefCell::new(store))
}
