//! Local persistence for favorites and preferences.
//!
//! Everything Mealdeck remembers between sessions goes through a small
//! string key-value store, the plugin's equivalent of browser `localStorage`.
//! Typed stores on top of it own their own key and encoding.
//!
//! # Modules
//!
//! - `backend`: Key-value store trait and the shared handle type
//! - `json`: JSON file store with atomic writes
//! - `memory`: In-memory store used when the data directory is unusable
//! - `favorites`: Ordered, duplicate-free favorite recipe ids
//! - `preferences`: Persisted theme choice

pub mod backend;
pub mod favorites;
pub mod json;
pub mod memory;
pub mod preferences;

pub use backend::{shared, KeyValueStore, StoreHandle};
pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use preferences::{load_theme, save_theme, ThemeName, THEME_KEY};
