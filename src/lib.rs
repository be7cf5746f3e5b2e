//! Mealdeck: A Zellij plugin for browsing recipes from TheMealDB.
//!
//! Mealdeck is a terminal multiplexer plugin that provides:
//! - Category browsing with a category picker
//! - Search by name, main ingredient or cuisine
//! - Client-side sorting by name or recency
//! - Width-dependent incremental reveal of long lists
//! - Favorites persisted across sessions, with a favorites panel
//! - Recipe details with ingredients, steps and video link

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and response routing              │
//! │  - Browse/search/sort coordination                  │
//! │  - Incremental reveal                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Remote Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (remote/)     │
//! │ - Rendering   │   │ - Key-value   │   │ - Endpoints   │
//! │ - Theming     │   │ - Favorites   │   │ - Decoding    │
//! │ - Components  │   │ - Theme pref  │   │ - Request tags│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Recipe model (domain/recipe)                     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/mealdeck.wasm" {
//!         default_category "Seafood"
//!         breakpoints "0:6,64:9,77:18,102:15,128:18"
//!         theme "light"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    open the store, restore favorites and theme, request web access
//! 2. **Permission Granted**: fetch the default category and the category list
//! 3. **Responses**: routed by request tag to the panel that asked, stale
//!    generations dropped
//! 4. **UI Rendering**: compute the view model and draw the components
//!
//! # Example
//!
//! ```rust
//! use mealdeck::storage::{shared, MemoryStore};
//! use mealdeck::{handle_event, initialize_with_store, Config, Event};
//!
//! let mut state = initialize_with_store(&Config::default(), shared(MemoryStore::default()));
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), mealdeck::MealdeckError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod remote;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Breakpoints, Event, InputMode, ViewMode};
pub use domain::{Category, MealdeckError, Recipe, Result};
pub use ui::Theme;

use app::browse::DEFAULT_CATEGORY;
use remote::DEFAULT_API_BASE;
use storage::{load_theme, shared, JsonFileStore, MemoryStore, StoreHandle, ThemeName};
use std::collections::BTreeMap;

/// File name of the key-value store inside the data directory.
pub const STORE_FILE: &str = "store.json";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/mealdeck.wasm" {
///     default_category "Dessert"
///     api_base "https://www.themealdb.com/api/json/v1/1"
///     breakpoints "0:6,64:9,77:18,102:15,128:18"
///     theme "dark"
///     theme_file "~/.config/mealdeck/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Category shown at startup. Default: `"Dessert"`
    pub default_category: String,

    /// Base URL of the recipe API, without a trailing slash.
    pub api_base: String,

    /// Page size per pane width. See [`Breakpoints::parse`] for the syntax.
    pub breakpoints: Breakpoints,

    /// Built-in theme, `light` or `dark`. A persisted toggle wins over it.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` expands to the sandbox host.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            breakpoints: Breakpoints::default(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank or invalid values fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use mealdeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("default_category".to_string(), "Seafood".to_string());
    /// map.insert("breakpoints".to_string(), "0:4,100:12".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.default_category, "Seafood");
    /// assert_eq!(config.breakpoints.page_size(120), 12);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let breakpoints = non_blank("breakpoints").map_or_else(Breakpoints::default, |raw| {
            Breakpoints::parse(&raw).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "invalid breakpoints, using defaults");
                Breakpoints::default()
            })
        });

        let api_base = non_blank("api_base").map_or_else(
            || DEFAULT_API_BASE.to_string(),
            |base| base.trim_end_matches('/').to_string(),
        );

        Self {
            default_category: non_blank("default_category")
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            api_base,
            breakpoints,
            theme_name: non_blank("theme"),
            theme_file: non_blank("theme_file"),
            trace_level: non_blank("trace_level"),
        }
    }
}

/// Opens the file-backed store in the data directory.
///
/// Falls back to a session-only store when the directory cannot be created,
/// so favorites still work for the current session.
#[must_use]
pub fn open_store() -> StoreHandle {
    let path = infrastructure::get_data_dir().join(STORE_FILE);
    match JsonFileStore::open(path) {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "store opened");
            shared(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "store unavailable, favorites will not persist");
            shared(MemoryStore::default())
        }
    }
}

/// Initializes the plugin state against the store in the data directory.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    initialize_with_store(config, open_store())
}

/// Initializes the plugin state against `store`.
///
/// Theme resolution: the persisted theme, then the configured built-in, then
/// dark. A configured theme file replaces the colors but the toggle still
/// switches between the built-ins.
#[must_use]
pub fn initialize_with_store(config: &Config, store: StoreHandle) -> AppState {
    tracing::debug!("initializing mealdeck plugin");

    let theme_name = load_theme(&store)
        .or_else(|| {
            config.theme_name.as_deref().and_then(|name| {
                let parsed = ThemeName::parse(name);
                if parsed.is_none() {
                    tracing::debug!(theme_name = %name, "unknown theme, using default");
                }
                parsed
            })
        })
        .unwrap_or_default();

    let theme = config.theme_file.as_ref().map_or_else(
        || Theme::builtin(theme_name),
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using built-in");
                Theme::builtin(theme_name)
            })
        },
    );

    AppState::new(store, theme, theme_name)
        .with_default_category(&config.default_category)
        .with_breakpoints(config.breakpoints.clone())
        .with_api_base(config.api_base.clone())
}
