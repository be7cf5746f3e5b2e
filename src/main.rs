//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Mealdeck library and
//! the Zellij plugin system. It implements `ZellijPlugin`, maps host events to
//! library events, and executes the actions the handler returns.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `WebRequestResult`, `PermissionRequestResult`
//! 3. **Permission**: Once web access is granted, the first fetches go out
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Record the pane width, then call the library render function
//!
//! # Event Mapping
//!
//! - `Key(..)` → key events, depending on the input mode
//! - `WebRequestResult` → `Event::Response { context, status, body }`
//! - `PermissionRequestResult` → `Event::PermissionsResult { granted }`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move (scroll in details)
//! - `Enter`: Open details, load more, or pick a category
//! - `/`: Edit search
//! - `Tab`: Cycle search kind
//! - `s`: Cycle sort order
//! - `m`: Load more
//! - `f`: Toggle favorite
//! - `c`: Categories
//! - `F` (shift): Favorites
//! - `t`: Toggle theme
//! - `x`: Clear search
//! - `Esc`: Back
//! - `q`: Close plugin
//!
//! While typing:
//! - Characters edit the query
//! - `Enter`: Submit
//! - `Tab`: Cycle search kind
//! - `Esc`: Stop typing

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use mealdeck::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState`. Until `load` runs it holds a
/// session-only store.
struct State {
    /// Core application state from library layer.
    app: mealdeck::AppState,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: mealdeck::initialize_with_store(
                &default_config,
                mealdeck::storage::shared(mealdeck::storage::MemoryStore::default()),
            ),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Requests `WebAccess` and subscribes to keys, web results and the
    /// permission outcome. Nothing is fetched until access is granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        mealdeck::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            default_category = %config.default_category,
            api_base = %config.api_base,
            "parsed configuration"
        );
        self.app = mealdeck::initialize(&config);
        tracing::debug!(favorites = self.app.favorites.len(), "app state initialized");

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Event::Response {
                    context,
                    status,
                    body,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI.
    ///
    /// The pane width is only known here, so a width change restarts the
    /// reveal before drawing.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport_width(cols);
        self.app.sync_reveal();
        mealdeck::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        if self.app.input_mode == InputMode::Typing {
            return Some(match key.bare_key {
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::Escape,
                BareKey::Tab => Event::CycleSearchKind,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::Activate,
            BareKey::Esc => Event::Escape,
            BareKey::Tab => Event::CycleSearchKind,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('s') => Event::CycleSort,
            BareKey::Char('m') => Event::RevealMore,
            BareKey::Char('f') => Event::ToggleFavorite,
            BareKey::Char('c') => Event::ShowCategories,
            BareKey::Char('F') => Event::ShowFavorites,
            BareKey::Char('t') => Event::ToggleTheme,
            BareKey::Char('x') => Event::ClearSearch,
            _ => return None,
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// - `CloseFocus`: Hide the plugin pane
    /// - `Fetch`: Issue a GET with the request tag as context
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(command) => {
                let url = command.request.url(&self.app.api_base);
                tracing::debug!(url = %url, fetch_target = ?command.tag.target, generation = command.tag.generation, "issuing request");
                web_request(
                    url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    command.tag.to_context(),
                );
            }
        }
    }
}
