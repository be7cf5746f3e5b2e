//! Persisted user preferences.

use crate::domain::error::Result;
use crate::storage::backend::StoreHandle;
use std::fmt;

/// Key under which the theme name is persisted.
pub const THEME_KEY: &str = "theme";

/// Built-in theme names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    Light,
    #[default]
    Dark,
}

impl ThemeName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a theme name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads the persisted theme. Unknown values and read failures yield `None`.
#[must_use]
pub fn load_theme(store: &StoreHandle) -> Option<ThemeName> {
    match store.borrow().get(THEME_KEY) {
        Ok(value) => value.as_deref().and_then(ThemeName::parse),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read theme preference");
            None
        }
    }
}

/// Persists the theme choice.
///
/// # Errors
///
/// Returns the backend error if the value cannot be written.
pub fn save_theme(store: &StoreHandle, theme: ThemeName) -> Result<()> {
    store.borrow_mut().set(THEME_KEY, theme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{shared, MemoryStore};

    #[test]
    fn saved_theme_loads_back() {
        let handle = shared(MemoryStore::default());
        assert_eq!(load_theme(&handle), None);

        save_theme(&handle, ThemeName::Light).unwrap();
        assert_eq!(load_theme(&handle), Some(ThemeName::Light));
    }

    #[test]
    fn unknown_persisted_theme_is_ignored() {
        let handle = shared(MemoryStore::with_entries([(THEME_KEY, "solarized")]));
        assert_eq!(load_theme(&handle), None);
    }
}
