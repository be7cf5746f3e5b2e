//! Event handling and state transition logic.
//!
//! This module implements the handler that turns key presses and host events
//! into state changes and action sequences. It is the only place that decides
//! which requests go out, and the only place responses come back in.
//!
//! # Architecture
//!
//! 1. Events arrive from the plugin runtime (keys, permissions, web results)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState`, `Browser` and panel methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Activate`
//! - **Input**: `SearchMode`, `Char`, `Backspace`, `SubmitSearch`, `Escape`
//! - **Commands**: `CycleSearchKind`, `CycleSort`, `RevealMore`,
//!   `ToggleFavorite`, `ShowCategories`, `ShowFavorites`, `ToggleTheme`
//! - **System**: `PermissionsResult`, `Response`
//!
//! # Example
//!
//! ```rust
//! use mealdeck::app::{handle_event, AppState, Event};
//! use mealdeck::storage::{shared, MemoryStore, ThemeName};
//! use mealdeck::ui::Theme;
//!
//! let mut state = AppState::new(shared(MemoryStore::default()), Theme::default(), ThemeName::Dark);
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), mealdeck::MealdeckError>(())
//! ```

use crate::app::browse::{FetchCommand, Submission};
use crate::app::modes::{InputMode, ViewMode};
use crate::app::{Action, AppState};
use crate::domain::error::{MealdeckError, Result};
use crate::remote::{decode_categories, decode_lookup, decode_meals, FetchTarget, RequestTag};
use std::collections::BTreeMap;

/// Events triggered by user input or by the Zellij host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection down (wraps), or scrolls details.
    KeyDown,
    /// Moves selection up (wraps), or scrolls details.
    KeyUp,
    /// Enter in normal mode: open details, load more, or pick a category.
    Activate,
    /// Hides the plugin pane.
    CloseFocus,
    /// Focuses the search input.
    SearchMode,
    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character of the search input.
    Backspace,
    /// Submits the search input.
    SubmitSearch,
    /// Clears the search and returns to the last category.
    ClearSearch,
    /// Closes the innermost layer: details, typing, overlay, then search.
    Escape,

    CycleSearchKind,
    CycleSort,
    /// Reveals one more page of recipes.
    RevealMore,
    /// Toggles the favorite under the cursor or in the details view.
    ToggleFavorite,
    ShowCategories,
    ShowFavorites,
    ToggleTheme,

    /// Outcome of the web access permission request.
    PermissionsResult {
        granted: bool,
    },

    /// A web request completed.
    ///
    /// Transport failures arrive as a non-success status as well.
    Response {
        /// Context map the request was issued with.
        context: BTreeMap<String, String>,
        status: u16,
        body: Vec<u8>,
    },
}

fn fetches(commands: impl IntoIterator<Item = FetchCommand>) -> Vec<Action> {
    commands.into_iter().map(Action::Fetch).collect()
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the pane should re-render.
///
/// # Errors
///
/// Returns [`MealdeckError::MissingContext`] for a web result that carries no
/// usable request tag. All fetch failures are otherwise absorbed into the
/// panel that issued the request.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Activate => Ok(activate(state)),
        Event::SearchMode => {
            state.detail = None;
            state.switch_view(ViewMode::Recipes);
            state.input_mode = InputMode::Typing;
            tracing::debug!("search input focused");
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            let mut input = state.browser.input().to_string();
            input.push(*c);
            tracing::trace!(input = %input, "search input updated");
            let refetch = state.browser.edit_input(input);
            state.sync_reveal();
            Ok((true, fetches(refetch)))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            let mut input = state.browser.input().to_string();
            input.pop();
            let refetch = state.browser.edit_input(input);
            state.sync_reveal();
            Ok((true, fetches(refetch)))
        }
        Event::SubmitSearch => {
            state.input_mode = InputMode::Normal;
            let actions = match state.browser.submit_search() {
                Submission::Unchanged => vec![],
                Submission::Cleared(refetch) => fetches(refetch),
                Submission::Fetch(command) => vec![Action::Fetch(command)],
            };
            state.sync_reveal();
            Ok((true, actions))
        }
        Event::ClearSearch => {
            if state.view_mode != ViewMode::Recipes || state.detail.is_some() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            let refetch = state.browser.clear_search();
            state.sync_reveal();
            Ok((true, fetches(refetch)))
        }
        Event::Escape => Ok(escape(state)),
        Event::CycleSearchKind => {
            let kind = state.browser.cycle_search_kind();
            tracing::debug!(kind = ?kind, "search kind changed");
            Ok((true, vec![]))
        }
        Event::CycleSort => {
            if state.view_mode != ViewMode::Recipes || state.detail.is_some() {
                return Ok((false, vec![]));
            }
            let Some(order) = state.browser.cycle_sort() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(order = ?order, "sort changed");
            state.sync_reveal();
            Ok((true, vec![]))
        }
        Event::RevealMore => {
            if state.view_mode != ViewMode::Recipes || state.detail.is_some() {
                return Ok((false, vec![]));
            }
            Ok((state.reveal_more(), vec![]))
        }
        Event::ToggleFavorite => Ok(toggle_favorite(state)),
        Event::ShowCategories => {
            state.detail = None;
            state.switch_view(ViewMode::Categories);
            if let Some(active) = state.browser.active_category() {
                if let Some(index) = state.categories.items().iter().position(|c| c.name == active) {
                    state.selected_index = index;
                }
            }
            Ok((true, fetches(state.ensure_categories())))
        }
        Event::ShowFavorites => {
            state.detail = None;
            state.switch_view(ViewMode::Favorites);
            Ok((true, fetches(state.refresh_favorites_panel())))
        }
        Event::ToggleTheme => {
            state.toggle_theme();
            Ok((true, vec![]))
        }
        Event::PermissionsResult { granted } => {
            if !granted {
                tracing::warn!("web access denied, nothing can be loaded");
                return Ok((false, vec![]));
            }
            Ok((true, fetches(state.start())))
        }
        Event::Response {
            context,
            status,
            body,
        } => handle_response(state, context, *status, body),
    }
}

/// Event name without payload, so response bodies stay out of span fields.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::Activate => "Activate",
        Event::CloseFocus => "CloseFocus",
        Event::SearchMode => "SearchMode",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::SubmitSearch => "SubmitSearch",
        Event::ClearSearch => "ClearSearch",
        Event::Escape => "Escape",
        Event::CycleSearchKind => "CycleSearchKind",
        Event::CycleSort => "CycleSort",
        Event::RevealMore => "RevealMore",
        Event::ToggleFavorite => "ToggleFavorite",
        Event::ShowCategories => "ShowCategories",
        Event::ShowFavorites => "ShowFavorites",
        Event::ToggleTheme => "ToggleTheme",
        Event::PermissionsResult { .. } => "PermissionsResult",
        Event::Response { .. } => "Response",
    }
}

fn activate(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.detail.is_some() {
        return (false, vec![]);
    }

    match state.view_mode {
        ViewMode::Recipes if state.is_load_more_selected() => (state.reveal_more(), vec![]),
        ViewMode::Recipes | ViewMode::Favorites => {
            let Some(recipe) = state.selected_recipe().cloned() else {
                tracing::debug!("no recipe selected");
                return (false, vec![]);
            };
            let command = state.open_details(&recipe);
            (true, vec![Action::Fetch(command)])
        }
        ViewMode::Categories => {
            let Some(name) = state.selected_category().map(|c| c.name.clone()) else {
                return (false, vec![]);
            };
            tracing::debug!(category = %name, "category picked");
            state.switch_view(ViewMode::Recipes);
            let refetch = state.browser.select_category(&name);
            state.sync_reveal();
            (true, fetches(refetch))
        }
    }
}

fn escape(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.detail.take().is_some() {
        return (true, vec![]);
    }
    if state.input_mode == InputMode::Typing {
        state.input_mode = InputMode::Normal;
        return (true, vec![]);
    }
    if state.view_mode.is_overlay() {
        state.switch_view(ViewMode::Recipes);
        state.clamp_selection();
        return (true, vec![]);
    }
    if state.browser.is_searching() || !state.browser.input().is_empty() {
        let refetch = state.browser.clear_search();
        state.sync_reveal();
        return (true, fetches(refetch));
    }
    (false, vec![])
}

fn toggle_favorite(state: &mut AppState) -> (bool, Vec<Action>) {
    let id = match &state.detail {
        Some(detail) => Some(detail.recipe_id.clone()),
        None => state.selected_recipe().map(|recipe| recipe.id.clone()),
    };
    let Some(id) = id else {
        return (false, vec![]);
    };

    state.favorites.toggle(&id);

    let actions = if state.view_mode == ViewMode::Favorites {
        fetches(state.refresh_favorites_panel())
    } else {
        vec![]
    };
    (true, actions)
}

/// Decodes `body` only for a success status.
fn decoded<T>(status: u16, body: &[u8], decode: fn(&[u8]) -> Result<T>) -> Result<T> {
    if (200..300).contains(&status) {
        decode(body)
    } else {
        Err(MealdeckError::Http(status))
    }
}

fn handle_response(
    state: &mut AppState,
    context: &BTreeMap<String, String>,
    status: u16,
    body: &[u8],
) -> Result<(bool, Vec<Action>)> {
    let tag = RequestTag::from_context(context)?;
    tracing::debug!(fetch_target = ?tag.target, generation = tag.generation, status, bytes = body.len(), "response received");

    match tag.target {
        FetchTarget::Categories => {
            let applied = state
                .categories
                .apply(tag.generation, decoded(status, body, decode_categories));
            if applied {
                state.clamp_selection();
            }
            Ok((applied && state.view_mode == ViewMode::Categories, vec![]))
        }
        FetchTarget::CategoryRecipes | FetchTarget::SearchResults => {
            let applied = state
                .browser
                .complete(tag.target, tag.generation, decoded(status, body, decode_meals));
            state.sync_reveal();
            Ok((applied, vec![]))
        }
        FetchTarget::Details => {
            let outcome = decoded(status, body, decode_lookup);
            let applied = state
                .detail
                .as_mut()
                .is_some_and(|detail| detail.complete(tag.generation, outcome));
            Ok((applied, vec![]))
        }
        FetchTarget::Favorite => {
            let Some(id) = tag.recipe_id else {
                return Err(MealdeckError::MissingContext);
            };
            if tag.generation != state.favorites.generation() {
                tracing::debug!(id = %id, generation = tag.generation, "favorites changed since lookup");
                return Ok((false, vec![]));
            }
            let applied = state
                .favorites_panel
                .answer(tag.generation, &id, decoded(status, body, decode_lookup));
            if applied {
                state.clamp_selection();
            }
            let settled = state.favorites_panel.pending() == 0;
            Ok((applied && settled && state.view_mode == ViewMode::Favorites, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::browse::{PanelStatus, SortOrder};
    use crate::app::panels::DetailStatus;
    use crate::remote::RemoteRequest;
    use crate::storage::{shared, KeyValueStore, MemoryStore, StoreHandle, ThemeName, FAVORITES_KEY};
    use crate::ui::Theme;

    const DESSERTS: &str = r#"{"meals":[
        {"idMeal":"52893","strMeal":"Apple & Blackberry Crumble","strMealThumb":"a.jpg"},
        {"idMeal":"52768","strMeal":"Apple Frangipan Tart","strMealThumb":"b.jpg"}
    ]}"#;

    const TERIYAKI: &str = r#"{"meals":[{
        "idMeal":"52772","strMeal":"Teriyaki Chicken Casserole","strMealThumb":"t.jpg",
        "strCategory":"Chicken","strArea":"Japanese",
        "strInstructions":"Preheat oven.\r\nBake.",
        "strIngredient1":"soy sauce","strMeasure1":"3/4 cup"
    }]}"#;

    fn store() -> StoreHandle {
        shared(MemoryStore::default())
    }

    fn fresh(store: &StoreHandle) -> AppState {
        let mut state = AppState::new(store.clone(), Theme::default(), ThemeName::Dark);
        state.set_viewport_width(80);
        state
    }

    fn fetch_commands(actions: &[Action]) -> Vec<&FetchCommand> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Fetch(command) => Some(command),
                Action::CloseFocus => None,
            })
            .collect()
    }

    fn respond(state: &mut AppState, command: &FetchCommand, status: u16, body: &str) -> bool {
        let event = Event::Response {
            context: command.tag.to_context(),
            status,
            body: body.as_bytes().to_vec(),
        };
        handle_event(state, &event).unwrap().0
    }

    fn send(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    fn started(store: &StoreHandle) -> AppState {
        let mut state = fresh(store);
        let actions = send(&mut state, Event::PermissionsResult { granted: true });
        let commands = fetch_commands(&actions);
        respond(&mut state, commands[0], 200, DESSERTS);
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        send(state, Event::SearchMode);
        for c in text.chars() {
            send(state, Event::Char(c));
        }
    }

    #[test]
    fn granted_permission_loads_default_category() {
        let store = store();
        let mut state = fresh(&store);
        let actions = send(&mut state, Event::PermissionsResult { granted: true });
        let commands = fetch_commands(&actions);

        assert_eq!(commands[0].request, RemoteRequest::ByCategory("Dessert".into()));
        assert!(respond(&mut state, commands[0], 200, DESSERTS));
        assert_eq!(state.browser.display_items().len(), 2);
        assert_eq!(state.reveal.visible(), 2);
    }

    #[test]
    fn denied_permission_issues_nothing() {
        let store = store();
        let mut state = fresh(&store);
        assert!(send(&mut state, Event::PermissionsResult { granted: false }).is_empty());
        assert_eq!(state.browser.display_status(), &PanelStatus::Idle);
    }

    #[test]
    fn repeated_search_submission_fetches_once() {
        let store = store();
        let mut state = started(&store);
        type_text(&mut state, "pasta");

        let first = send(&mut state, Event::SubmitSearch);
        let second = send(&mut state, Event::SubmitSearch);
        assert_eq!(fetch_commands(&first).len() + fetch_commands(&second).len(), 1);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn erasing_the_query_returns_to_category() {
        let store = store();
        let mut state = started(&store);
        type_text(&mut state, "ab");
        send(&mut state, Event::SubmitSearch);
        assert!(state.browser.is_searching());

        send(&mut state, Event::SearchMode);
        send(&mut state, Event::Backspace);
        let actions = send(&mut state, Event::Backspace);
        let commands = fetch_commands(&actions);
        assert_eq!(commands[0].request, RemoteRequest::ByCategory("Dessert".into()));
        assert!(!state.browser.is_searching());
    }

    #[test]
    fn http_failure_is_scoped_to_the_search_panel() {
        let store = store();
        let mut state = started(&store);
        type_text(&mut state, "pasta");
        let actions = send(&mut state, Event::SubmitSearch);
        respond(&mut state, fetch_commands(&actions)[0], 500, "");

        assert_eq!(
            state.browser.display_status(),
            &PanelStatus::Failed("HTTP error! status: 500".into())
        );
        assert_eq!(state.browser.category_panel().items().len(), 2);
    }

    #[test]
    fn stale_category_response_is_ignored() {
        let store = store();
        let mut state = fresh(&store);
        let actions = send(&mut state, Event::PermissionsResult { granted: true });
        let stale = fetch_commands(&actions)[0].clone();

        let refetch = state.browser.select_category("Beef").unwrap();
        assert!(!respond(&mut state, &stale, 200, DESSERTS));
        assert!(respond(&mut state, &refetch, 200, r#"{"meals":null}"#));
        assert_eq!(state.browser.display_status(), &PanelStatus::Empty);
    }

    #[test]
    fn untagged_response_is_an_error() {
        let store = store();
        let mut state = fresh(&store);
        let event = Event::Response {
            context: BTreeMap::new(),
            status: 200,
            body: vec![],
        };
        assert!(matches!(
            handle_event(&mut state, &event),
            Err(MealdeckError::MissingContext)
        ));
    }

    #[test]
    fn favorite_toggle_persists_immediately() {
        let store = store();
        let mut state = started(&store);
        send(&mut state, Event::ToggleFavorite);

        assert!(state.favorites.contains("52893"));
        assert_eq!(
            store.borrow().get(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["52893"]"#)
        );

        send(&mut state, Event::ToggleFavorite);
        assert_eq!(store.borrow().get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn favorites_panel_settles_after_every_lookup() {
        let store = shared(MemoryStore::with_entries([(FAVORITES_KEY, r#"["52772","1"]"#)]));
        let mut state = started(&store);

        let actions = send(&mut state, Event::ShowFavorites);
        let commands: Vec<FetchCommand> = fetch_commands(&actions).into_iter().cloned().collect();
        assert_eq!(commands.len(), 2);

        assert!(!respond(&mut state, &commands[0], 200, TERIYAKI));
        assert!(respond(&mut state, &commands[1], 200, r#"{"meals":null}"#));
        assert_eq!(state.favorites_panel.items().len(), 1);
        assert_eq!(state.favorites_panel.items()[0].name, "Teriyaki Chicken Casserole");
    }

    #[test]
    fn removing_a_favorite_refetches_the_open_panel() {
        let store = shared(MemoryStore::with_entries([(FAVORITES_KEY, r#"["52772"]"#)]));
        let mut state = started(&store);
        let actions = send(&mut state, Event::ShowFavorites);
        let old = fetch_commands(&actions)[0].clone();
        respond(&mut state, &old, 200, TERIYAKI);

        let actions = send(&mut state, Event::ToggleFavorite);
        assert!(state.favorites.is_empty());
        assert!(actions.is_empty());
        assert_eq!(state.favorites_panel.status(), &PanelStatus::Empty);
        assert!(!respond(&mut state, &old, 200, TERIYAKI));
    }

    #[test]
    fn details_open_and_close() {
        let store = store();
        let mut state = started(&store);
        let actions = send(&mut state, Event::Activate);
        let command = fetch_commands(&actions)[0].clone();
        assert_eq!(command.request, RemoteRequest::Lookup("52893".into()));

        respond(&mut state, &command, 200, TERIYAKI);
        let detail = state.detail.as_ref().unwrap();
        assert!(matches!(&detail.status, DetailStatus::Ready(recipe) if recipe.is_detailed()));

        send(&mut state, Event::Escape);
        assert!(state.detail.is_none());
    }

    #[test]
    fn escape_unwinds_layers_in_order() {
        let store = store();
        let mut state = started(&store);
        type_text(&mut state, "pie");
        send(&mut state, Event::SubmitSearch);
        send(&mut state, Event::ShowCategories);
        send(&mut state, Event::SearchMode);
        assert_eq!(state.view_mode, ViewMode::Recipes);

        send(&mut state, Event::Escape);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.browser.is_searching());

        let actions = send(&mut state, Event::Escape);
        assert!(!state.browser.is_searching());
        assert_eq!(fetch_commands(&actions).len(), 1);

        assert!(!handle_event(&mut state, &Event::Escape).unwrap().0);
    }

    #[test]
    fn picking_a_category_leaves_search() {
        let store = store();
        let mut state = started(&store);
        type_text(&mut state, "pie");
        send(&mut state, Event::SubmitSearch);

        let actions = send(&mut state, Event::ShowCategories);
        assert!(actions.is_empty());
        let categories = state.ensure_categories();
        assert!(categories.is_none());

        let list = state.categories.generation();
        let command = FetchCommand {
            request: RemoteRequest::Categories,
            tag: RequestTag::new(FetchTarget::Categories, list),
        };
        respond(
            &mut state,
            &command,
            200,
            r#"{"categories":[{"idCategory":"1","strCategory":"Beef"},{"idCategory":"2","strCategory":"Seafood"}]}"#,
        );

        send(&mut state, Event::KeyDown);
        let actions = send(&mut state, Event::Activate);
        assert_eq!(
            fetch_commands(&actions)[0].request,
            RemoteRequest::ByCategory("Seafood".into())
        );
        assert_eq!(state.view_mode, ViewMode::Recipes);
        assert!(!state.browser.is_searching());
        assert_eq!(state.browser.input(), "");
    }

    #[test]
    fn load_more_row_reveals_next_page() {
        let store = store();
        let mut state = fresh(&store);
        let actions = send(&mut state, Event::PermissionsResult { granted: true });
        let meals: Vec<String> = (0..12)
            .map(|i| format!(r#"{{"idMeal":"{}","strMeal":"Dish {i}"}}"#, 100 + i))
            .collect();
        let body = format!(r#"{{"meals":[{}]}}"#, meals.join(","));
        respond(&mut state, fetch_commands(&actions)[0], 200, &body);
        assert_eq!(state.reveal.visible(), 12);

        state.set_viewport_width(70);
        assert_eq!(state.reveal.visible(), 9);
        send(&mut state, Event::KeyUp);
        send(&mut state, Event::Activate);
        assert_eq!(state.reveal.visible(), 12);
        assert!(!state.reveal.has_more());
    }

    #[test]
    fn typing_keys_are_ignored_outside_typing_mode() {
        let store = store();
        let mut state = started(&store);
        assert!(!handle_event(&mut state, &Event::Char('x')).unwrap().0);
        assert_eq!(state.browser.input(), "");
    }

    #[test]
    fn sort_key_is_ignored_until_the_list_loads() {
        let store = store();
        let mut state = fresh(&store);
        let actions = send(&mut state, Event::PermissionsResult { granted: true });

        assert!(!handle_event(&mut state, &Event::CycleSort).unwrap().0);
        respond(&mut state, fetch_commands(&actions)[0], 200, DESSERTS);
        assert_eq!(state.browser.sort(), SortOrder::None);
        assert_eq!(state.browser.display_items()[0].id, "52893");

        assert!(handle_event(&mut state, &Event::CycleSort).unwrap().0);
        assert_eq!(state.browser.sort(), SortOrder::NameAsc);
    }
}
