//! Favorites store.
//!
//! An ordered, duplicate-free list of recipe ids persisted under the
//! [`FAVORITES_KEY`] key as a JSON array of strings. Every mutation writes
//! through to the key-value store before returning.
//!
//! Persistence failures never surface to the caller: a write that fails is
//! logged and the in-memory list remains the source of truth for the rest of
//! the session. Likewise, unreadable persisted data restores as an empty list.

use crate::storage::backend::StoreHandle;
use std::fmt;

/// Key under which the favorite ids are persisted.
pub const FAVORITES_KEY: &str = "favorites";

/// Parses a persisted favorites value.
///
/// Missing or malformed data yields an empty list. Duplicates keep their first
/// occurrence.
///
/// # Examples
///
/// ```
/// use mealdeck::storage::favorites::restore;
///
/// assert_eq!(restore(Some(r#"["1","2","1"]"#)), vec!["1", "2"]);
/// assert!(restore(Some("not json")).is_empty());
/// assert!(restore(None).is_empty());
/// ```
#[must_use]
pub fn restore(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) => {
            let mut unique: Vec<String> = Vec::with_capacity(ids.len());
            for id in ids {
                if !unique.contains(&id) {
                    unique.push(id);
                }
            }
            unique
        }
        Err(e) => {
            tracing::debug!(error = %e, "malformed favorites, starting empty");
            Vec::new()
        }
    }
}

/// Encodes favorite ids as a JSON array of strings.
#[must_use]
pub fn serialize(ids: &[String]) -> String {
    serde_json::to_string(ids).unwrap_or_else(|_| String::from("[]"))
}

/// The user's favorite recipe ids.
pub struct FavoritesStore {
    ids: Vec<String>,
    store: StoreHandle,
    generation: u64,
}

impl fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("ids", &self.ids)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Restores favorites from `store`. Never fails.
    pub fn initialize(store: StoreHandle) -> Self {
        let raw = match store.borrow().get(FAVORITES_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read favorites");
                None
            }
        };
        let ids = restore(raw.as_deref());
        tracing::debug!(count = ids.len(), "favorites restored");

        Self {
            ids,
            store,
            generation: 0,
        }
    }

    /// Flips membership of `id` and persists the result.
    ///
    /// Returns the new membership: `true` if `id` was added.
    pub fn toggle(&mut self, id: &str) -> bool {
        let _span = tracing::debug_span!("toggle_favorite", id = %id).entered();

        let added = if let Some(index) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(index);
            false
        } else {
            self.ids.push(id.to_string());
            true
        };
        self.generation += 1;

        let encoded = serialize(&self.ids);
        if let Err(e) = self.store.borrow_mut().set(FAVORITES_KEY, &encoded) {
            tracing::warn!(error = %e, "failed to persist favorites");
        }

        tracing::debug!(added, count = self.ids.len(), "favorite toggled");
        added
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// All favorite ids in insertion order.
    #[must_use]
    pub fn all(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Increases on every mutation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{MealdeckError, Result};
    use crate::storage::{shared, JsonFileStore, KeyValueStore, MemoryStore};
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[derive(Debug)]
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some(r#"["1"]"#.to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(MealdeckError::Storage("read-only".into()))
        }
    }

    #[test]
    fn toggle_flips_membership_and_leaves_others_alone() {
        let mut favorites = FavoritesStore::initialize(shared(MemoryStore::default()));
        favorites.toggle("a");
        favorites.toggle("b");

        for id in ["a", "c"] {
            let before_other = favorites.contains("b");
            let before = favorites.contains(id);
            let added = favorites.toggle(id);
            assert_eq!(added, !before);
            assert_eq!(favorites.contains(id), !before);
            assert_eq!(favorites.contains("b"), before_other);
        }
        assert_eq!(favorites.all(), ["b", "c"]);
    }

    #[test]
    fn membership_follows_toggle_parity_per_id() {
        let handle = shared(MemoryStore::default());
        let mut favorites = FavoritesStore::initialize(handle.clone());
        let sequence = ["a", "b", "a", "c", "b", "a", "d", "c", "a", "e", "d", "d"];

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for id in sequence {
            favorites.toggle(id);
            *counts.entry(id).or_default() += 1;

            for (other, count) in &counts {
                assert_eq!(favorites.contains(other), count % 2 == 1, "after toggling {id}");
            }
        }

        assert_eq!(favorites.all(), ["e", "d"]);

        let reopened = FavoritesStore::initialize(handle);
        assert_eq!(reopened.all(), favorites.all());
    }

    #[test]
    fn toggle_persists_end_to_end() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let handle = shared(JsonFileStore::open(path.clone()).unwrap());
        let mut favorites = FavoritesStore::initialize(handle.clone());

        assert!(favorites.toggle("52772"));
        assert_eq!(handle.borrow().get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["52772"]"#));

        assert!(!favorites.toggle("52772"));
        assert_eq!(handle.borrow().get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));

        favorites.toggle("52959");
        drop(favorites);
        drop(handle);

        let reopened = FavoritesStore::initialize(shared(JsonFileStore::open(path).unwrap()));
        assert_eq!(reopened.all(), ["52959"]);
    }

    #[test]
    fn serialize_restore_round_trip_keeps_order() {
        let ids = vec!["52959".to_string(), "52772".to_string(), "53049".to_string()];
        assert_eq!(restore(Some(&serialize(&ids))), ids);
    }

    #[test]
    fn malformed_persisted_value_restores_empty() {
        let handle = shared(MemoryStore::with_entries([(FAVORITES_KEY, "{\"oops\":")]));
        let favorites = FavoritesStore::initialize(handle);
        assert!(favorites.is_empty());
    }

    #[test]
    fn write_failure_keeps_memory_authoritative() {
        let mut favorites = FavoritesStore::initialize(shared(ReadOnlyStore));
        assert!(favorites.contains("1"));

        assert!(favorites.toggle("2"));
        assert!(favorites.contains("2"));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn generation_advances_on_every_toggle() {
        let mut favorites = FavoritesStore::initialize(shared(MemoryStore::default()));
        let start = favorites.generation();
        favorites.toggle("x");
        favorites.toggle("x");
        assert_eq!(favorites.generation(), start + 2);
    }
}
