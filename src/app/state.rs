//! Application state management and view model computation.
//!
//! [`AppState`] owns every piece of transient UI state plus the handles that
//! outlive a single event: the favorites store and the key-value store behind
//! the theme preference. The handler mutates it; the renderer only reads the
//! view model computed from it.
//!
//! # State Components
//!
//! - **Browser**: Category/search mode, search input, sort order, both panels
//! - **Reveal**: How many of the displayed recipes are visible
//! - **Categories**: The category list for the picker
//! - **Favorites**: The persisted id list and the panel of looked-up records
//! - **Detail**: Optional details view over the active view
//! - **Selection**: Cursor in the active list
//!
//! # Example
//!
//! ```rust
//! use mealdeck::app::AppState;
//! use mealdeck::storage::{shared, MemoryStore, ThemeName};
//! use mealdeck::ui::Theme;
//!
//! let state = AppState::new(shared(MemoryStore::default()), Theme::default(), ThemeName::Dark);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.header.title.contains("Dessert"));
//! ```

use super::browse::{BrowseMode, Browser, FetchCommand, Panel, PanelStatus, DEFAULT_CATEGORY};
use super::modes::{InputMode, ViewMode};
use super::panels::{DetailStatus, DetailView, FavoritesPanel};
use super::reveal::{Breakpoints, RevealState};
use crate::domain::{Category, Recipe};
use crate::remote::{FetchTarget, RemoteRequest, RequestTag, DEFAULT_API_BASE};
use crate::storage::{save_theme, FavoritesStore, StoreHandle, ThemeName};
use crate::ui::helpers::{truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, DetailLine, DisplayItem, EmptyState, FooterInfo, HeaderInfo, LineStyle, RowKind,
    SearchBarInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

const NAME_COLUMN_WIDTH: usize = 40;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Search/filter/sort coordinator for the recipe view.
    pub browser: Browser,

    /// Visible slice of the browser's displayed list.
    pub reveal: RevealState,

    /// Browser revision the reveal was last reset for.
    reveal_revision: u64,

    /// Persisted favorite ids.
    pub favorites: FavoritesStore,

    /// Backing store for preferences.
    store: StoreHandle,

    /// Category list for the picker, fetched once.
    pub categories: Panel<Category>,

    /// Looked-up favorite records.
    pub favorites_panel: FavoritesPanel,

    /// Details view, drawn over the active view while open.
    pub detail: Option<DetailView>,

    /// Last issued details generation.
    detail_generation: u64,

    pub input_mode: InputMode,

    pub view_mode: ViewMode,

    /// Cursor in the active list. In the recipe view the row after the last
    /// visible recipe is the "load more" row.
    pub selected_index: usize,

    /// Pane width in columns, known after the first render.
    pub viewport_width: Option<usize>,

    pub theme: Theme,

    /// Built-in theme the toggle switches from.
    pub theme_name: ThemeName,

    /// Base URL requests are issued against.
    pub api_base: String,

    /// Set once the initial fetches have been issued.
    pub started: bool,
}

impl AppState {
    /// Creates a state on the default category with default breakpoints.
    ///
    /// Favorites are restored from `store` immediately.
    #[must_use]
    pub fn new(store: StoreHandle, theme: Theme, theme_name: ThemeName) -> Self {
        Self {
            browser: Browser::new(DEFAULT_CATEGORY),
            reveal: RevealState::new(Breakpoints::default()),
            reveal_revision: 0,
            favorites: FavoritesStore::initialize(store.clone()),
            store,
            categories: Panel::default(),
            favorites_panel: FavoritesPanel::default(),
            detail: None,
            detail_generation: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Recipes,
            selected_index: 0,
            viewport_width: None,
            theme,
            theme_name,
            api_base: DEFAULT_API_BASE.to_string(),
            started: false,
        }
    }

    #[must_use]
    pub fn with_default_category(mut self, category: &str) -> Self {
        self.browser = Browser::new(category);
        self
    }

    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.reveal = RevealState::new(breakpoints);
        self
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Issues the initial category and category-list fetches, once.
    pub fn start(&mut self) -> Vec<FetchCommand> {
        if self.started {
            return Vec::new();
        }
        self.started = true;

        let recipes = self.browser.start();
        let generation = self.categories.begin();
        self.sync_reveal();

        vec![
            recipes,
            FetchCommand {
                request: RemoteRequest::Categories,
                tag: RequestTag::new(FetchTarget::Categories, generation),
            },
        ]
    }

    /// Re-issues the category list fetch when it has not succeeded.
    pub fn ensure_categories(&mut self) -> Option<FetchCommand> {
        if !self.started
            || matches!(
                self.categories.status(),
                PanelStatus::Loading | PanelStatus::Ready
            )
        {
            return None;
        }
        let generation = self.categories.begin();
        Some(FetchCommand {
            request: RemoteRequest::Categories,
            tag: RequestTag::new(FetchTarget::Categories, generation),
        })
    }

    /// Resets the reveal if the browser's displayed list changed.
    pub fn sync_reveal(&mut self) {
        let revision = self.browser.revision();
        if revision == self.reveal_revision {
            return;
        }
        self.reveal_revision = revision;
        self.reveal
            .reset(self.browser.display_items().len(), self.viewport_width);
        if self.view_mode == ViewMode::Recipes {
            self.selected_index = 0;
        }
    }

    /// Records the pane width. Returns `true` if it changed, which restarts
    /// the reveal from a fresh first page.
    pub fn set_viewport_width(&mut self, cols: usize) -> bool {
        if self.viewport_width == Some(cols) {
            return false;
        }
        tracing::debug!(cols, previous = ?self.viewport_width, "viewport width changed");
        self.viewport_width = Some(cols);
        self.reveal
            .reset(self.browser.display_items().len(), self.viewport_width);
        self.clamp_selection();
        true
    }

    /// Reveals the next page of recipes.
    pub fn reveal_more(&mut self) -> bool {
        self.reveal.more(self.viewport_width)
    }

    /// Number of selectable rows in the active view.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self.view_mode {
            ViewMode::Recipes => self.reveal.visible() + usize::from(self.reveal.has_more()),
            ViewMode::Categories => self.categories.items().len(),
            ViewMode::Favorites => self.favorites_panel.items().len(),
        }
    }

    /// Moves the cursor down, wrapping to the top. Scrolls details instead
    /// when they are open.
    pub fn move_selection_down(&mut self) {
        if let Some(detail) = &mut self.detail {
            detail.scroll = detail.scroll.saturating_add(1);
            return;
        }
        let count = self.row_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if let Some(detail) = &mut self.detail {
            detail.scroll = detail.scroll.saturating_sub(1);
            return;
        }
        let count = self.row_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let count = self.row_count();
        self.selected_index = if count == 0 {
            0
        } else {
            self.selected_index.min(count - 1)
        };
    }

    pub fn switch_view(&mut self, view: ViewMode) {
        if self.view_mode != view {
            tracing::debug!(from = ?self.view_mode, to = ?view, "switching view");
            self.view_mode = view;
            self.selected_index = 0;
        }
        self.input_mode = InputMode::Normal;
    }

    /// `true` when the cursor sits on the "load more" row.
    #[must_use]
    pub fn is_load_more_selected(&self) -> bool {
        self.view_mode == ViewMode::Recipes
            && self.reveal.has_more()
            && self.selected_index == self.reveal.visible()
    }

    /// Recipe under the cursor in the recipe or favorites view.
    #[must_use]
    pub fn selected_recipe(&self) -> Option<&Recipe> {
        match self.view_mode {
            ViewMode::Recipes if self.selected_index < self.reveal.visible() => {
                self.browser.display_items().get(self.selected_index)
            }
            ViewMode::Favorites => self.favorites_panel.items().get(self.selected_index),
            ViewMode::Recipes | ViewMode::Categories => None,
        }
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<&Category> {
        match self.view_mode {
            ViewMode::Categories => self.categories.items().get(self.selected_index),
            _ => None,
        }
    }

    /// Opens the details view for `recipe` and returns its lookup.
    pub fn open_details(&mut self, recipe: &Recipe) -> FetchCommand {
        self.detail_generation += 1;
        let detail = DetailView::loading(recipe, self.detail_generation);
        let command = detail.command();
        tracing::debug!(id = %recipe.id, generation = self.detail_generation, "opening details");
        self.detail = Some(detail);
        command
    }

    /// Starts lookups for the current favorites.
    pub fn refresh_favorites_panel(&mut self) -> Vec<FetchCommand> {
        let commands = self
            .favorites_panel
            .begin(self.favorites.all(), self.favorites.generation());
        self.clamp_selection();
        commands
    }

    /// Switches between the built-in themes and persists the choice.
    pub fn toggle_theme(&mut self) {
        self.theme_name = self.theme_name.toggled();
        self.theme = Theme::builtin(self.theme_name);
        if let Err(e) = save_theme(&self.store, self.theme_name) {
            tracing::warn!(error = %e, "failed to persist theme");
        }
        tracing::debug!(theme = %self.theme_name, "theme toggled");
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let search_bar = self.compute_search_bar();
        let available_rows = Self::calculate_available_rows(rows, search_bar.is_some());

        let body = if let Some(detail) = &self.detail {
            self.compute_details_body(detail, available_rows + 1, cols)
        } else {
            match self.view_mode {
                ViewMode::Recipes => self.compute_recipes_body(available_rows, cols),
                ViewMode::Categories => self.compute_categories_body(available_rows, cols),
                ViewMode::Favorites => self.compute_favorites_body(available_rows, cols),
            }
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar,
            body,
            footer: self.compute_footer(),
        }
    }

    fn compute_recipes_body(&self, available_rows: usize, cols: usize) -> Body {
        let items = self.browser.display_items();
        if let Some(message) = Self::status_message(
            self.browser.display_status(),
            "recipes",
            if self.browser.is_searching() {
                "Try a different search term or search type"
            } else {
                "This category has no recipes"
            },
        ) {
            return Body::Message(message);
        }

        let query = match self.browser.mode() {
            BrowseMode::Search { query, .. } => Some(query.text()),
            BrowseMode::Category { .. } => None,
        };
        let matcher = query.map(|_| SkimMatcherV2::default());

        let mut rows: Vec<DisplayItem> = items[..self.reveal.visible().min(items.len())]
            .iter()
            .enumerate()
            .map(|(index, recipe)| {
                let name = truncate(&recipe.name, NAME_COLUMN_WIDTH - 3);
                let shown = if name == recipe.name {
                    name.as_str()
                } else {
                    name.strip_suffix("...").unwrap_or(&name)
                };
                let highlight_ranges = matcher
                    .as_ref()
                    .zip(query)
                    .map_or_else(Vec::new, |(m, q)| compute_highlight_ranges(shown, q, m));
                self.recipe_row(recipe, name, index, cols, highlight_ranges)
            })
            .collect();

        if self.reveal.has_more() {
            rows.push(DisplayItem {
                name: format!("Load more ({} remaining)", self.reveal.remaining()),
                detail: String::new(),
                is_selected: self.is_load_more_selected(),
                is_favorite: false,
                kind: RowKind::LoadMore,
                highlight_ranges: vec![],
            });
        }

        Body::List {
            items: self.window(rows, available_rows),
        }
    }

    fn compute_categories_body(&self, available_rows: usize, cols: usize) -> Body {
        if let Some(message) = Self::status_message(
            self.categories.status(),
            "categories",
            "The recipe source returned no categories",
        ) {
            return Body::Message(message);
        }

        let active = self.browser.active_category();
        let detail_width = cols.saturating_sub(NAME_COLUMN_WIDTH + 2);
        let rows = self
            .categories
            .items()
            .iter()
            .enumerate()
            .map(|(index, category)| {
                let detail = if active == Some(category.name.as_str()) {
                    "(current)".to_string()
                } else {
                    category
                        .description
                        .as_deref()
                        .and_then(|text| text.lines().next())
                        .map_or_else(String::new, |line| truncate(line.trim(), detail_width))
                };
                DisplayItem {
                    name: truncate(&category.name, NAME_COLUMN_WIDTH - 3),
                    detail,
                    is_selected: index == self.selected_index,
                    is_favorite: false,
                    kind: RowKind::Category,
                    highlight_ranges: vec![],
                }
            })
            .collect();

        Body::List {
            items: self.window(rows, available_rows),
        }
    }

    fn compute_favorites_body(&self, available_rows: usize, cols: usize) -> Body {
        if let Some(message) = Self::status_message(
            self.favorites_panel.status(),
            "favorites",
            "Press f on a recipe to add it here",
        ) {
            let message = if self.favorites.is_empty() {
                EmptyState {
                    message: "No favorites yet".to_string(),
                    ..message
                }
            } else {
                message
            };
            return Body::Message(message);
        }

        let rows = self
            .favorites_panel
            .items()
            .iter()
            .enumerate()
            .map(|(index, recipe)| {
                self.recipe_row(recipe, truncate(&recipe.name, NAME_COLUMN_WIDTH - 3), index, cols, vec![])
            })
            .collect();

        Body::List {
            items: self.window(rows, available_rows),
        }
    }

    fn recipe_row(
        &self,
        recipe: &Recipe,
        name: String,
        index: usize,
        cols: usize,
        highlight_ranges: Vec<(usize, usize)>,
    ) -> DisplayItem {
        let detail = match (&recipe.category, &recipe.area) {
            (Some(category), Some(area)) => format!("{category} | {area}"),
            (Some(one), None) | (None, Some(one)) => one.clone(),
            (None, None) => format!("#{}", recipe.id),
        };

        DisplayItem {
            name,
            detail: truncate(&detail, cols.saturating_sub(NAME_COLUMN_WIDTH + 2)),
            is_selected: index == self.selected_index,
            is_favorite: self.favorites.contains(&recipe.id),
            kind: RowKind::Recipe,
            highlight_ranges,
        }
    }

    /// Keeps the selected row inside a window of `available_rows`.
    fn window(&self, rows: Vec<DisplayItem>, available_rows: usize) -> Vec<DisplayItem> {
        let total = rows.len();
        if total <= available_rows {
            return rows;
        }

        let mut start = self.selected_index.saturating_sub(available_rows / 2);
        let end = (start + available_rows).min(total);
        if end - start < available_rows {
            start = end.saturating_sub(available_rows);
        }

        rows.into_iter().skip(start).take(end - start).collect()
    }

    fn status_message(status: &PanelStatus, noun: &str, empty_hint: &str) -> Option<EmptyState> {
        let (message, subtitle, is_error) = match status {
            PanelStatus::Ready => return None,
            PanelStatus::Idle => (
                "Waiting for web access".to_string(),
                "Grant the permission request to load recipes".to_string(),
                false,
            ),
            PanelStatus::Loading => (format!("Loading {noun}..."), String::new(), false),
            PanelStatus::Empty => (format!("No {noun} found"), empty_hint.to_string(), false),
            PanelStatus::Failed(reason) => (format!("Failed to load {noun}"), reason.clone(), true),
        };
        Some(EmptyState {
            message,
            subtitle,
            is_error,
        })
    }

    fn compute_details_body(&self, detail: &DetailView, available_rows: usize, cols: usize) -> Body {
        let width = cols.saturating_sub(4).max(20);
        let mut lines = Vec::new();

        match &detail.status {
            DetailStatus::Loading => lines.push(DetailLine::new("Loading recipe...", LineStyle::Dim)),
            DetailStatus::Missing => lines.push(DetailLine::new("Recipe not found", LineStyle::Dim)),
            DetailStatus::Failed(reason) => {
                lines.push(DetailLine::new("Failed to load recipe", LineStyle::Heading));
                lines.push(DetailLine::new(reason.clone(), LineStyle::Dim));
            }
            DetailStatus::Ready(recipe) => self.recipe_lines(recipe, width, &mut lines),
        }

        let scroll = detail.scroll.min(lines.len().saturating_sub(1));
        Body::Details {
            lines: lines.into_iter().skip(scroll).take(available_rows).collect(),
        }
    }

    fn recipe_lines(&self, recipe: &Recipe, width: usize, lines: &mut Vec<DetailLine>) {
        let meta: Vec<&str> = [recipe.category.as_deref(), recipe.area.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !meta.is_empty() {
            lines.push(DetailLine::new(meta.join(" | "), LineStyle::Dim));
        }
        if !recipe.tags.is_empty() {
            lines.push(DetailLine::new(format!("Tags: {}", recipe.tags.join(", ")), LineStyle::Dim));
        }
        let favorite = if self.favorites.contains(&recipe.id) {
            "In favorites (f to remove)"
        } else {
            "Not in favorites (f to add)"
        };
        lines.push(DetailLine::new(favorite, LineStyle::Normal));

        let ingredients = recipe.ingredient_lines();
        if !ingredients.is_empty() {
            lines.push(DetailLine::new("", LineStyle::Normal));
            lines.push(DetailLine::new("Ingredients", LineStyle::Heading));
            for line in ingredients {
                for wrapped in wrap_text(&format!("- {line}"), width) {
                    lines.push(DetailLine::new(wrapped, LineStyle::Normal));
                }
            }
        }

        let steps = recipe.instruction_steps();
        if !steps.is_empty() {
            lines.push(DetailLine::new("", LineStyle::Normal));
            lines.push(DetailLine::new("Instructions", LineStyle::Heading));
            for (number, step) in steps.iter().enumerate() {
                for wrapped in wrap_text(&format!("{}. {step}", number + 1), width) {
                    lines.push(DetailLine::new(wrapped, LineStyle::Normal));
                }
            }
        }

        if let Some(video) = &recipe.video {
            lines.push(DetailLine::new("", LineStyle::Normal));
            lines.push(DetailLine::new(format!("Video: {video}"), LineStyle::Link));
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = if let Some(detail) = &self.detail {
            match &detail.status {
                DetailStatus::Ready(recipe) => format!(" {} ", recipe.name),
                _ => format!(" {} ", detail.title),
            }
        } else {
            match self.view_mode {
                ViewMode::Recipes => {
                    let count = self.browser.display_items().len();
                    match self.browser.mode() {
                        BrowseMode::Category { active } => format!(" {active} Recipes ({count}) "),
                        BrowseMode::Search { query, .. } => {
                            format!(" Search results for \"{}\" ({count}) ", query.text())
                        }
                    }
                }
                ViewMode::Categories => format!(" Categories ({}) ", self.categories.items().len()),
                ViewMode::Favorites => format!(" Favorites ({}) ", self.favorites.len()),
            }
        };

        HeaderInfo {
            title,
            status_line: format!(
                "Search: {}  Sort: {}  Favorites: {}  Theme: {}",
                self.browser.search_kind().label(),
                self.browser.sort().label(),
                self.favorites.len(),
                self.theme_name,
            ),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.detail.is_some() {
            "j/k: scroll  f: favorite  Esc: back  q: quit"
        } else {
            match (self.input_mode, self.view_mode) {
                (InputMode::Typing, _) => "Enter: search  Tab: search type  Backspace: delete  Esc: done",
                (InputMode::Normal, ViewMode::Recipes) => {
                    "j/k: move  Enter: open  /: search  Tab: type  s: sort  m: more  f: favorite  c: categories  F: favorites  t: theme  x: clear  q: quit"
                }
                (InputMode::Normal, ViewMode::Categories) => "j/k: move  Enter: select  Esc: back  q: quit",
                (InputMode::Normal, ViewMode::Favorites) => {
                    "j/k: move  Enter: open  f: remove  Esc: back  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let visible = self.detail.is_none()
            && self.view_mode == ViewMode::Recipes
            && (self.input_mode == InputMode::Typing
                || self.browser.is_searching()
                || !self.browser.input().is_empty());

        visible.then(|| {
            let kind = self.browser.search_kind();
            SearchBarInfo {
                query: self.browser.input().to_string(),
                kind_label: kind.label().to_string(),
                placeholder: kind.placeholder().to_string(),
                focused: self.input_mode == InputMode::Typing,
            }
        })
    }

    /// Rows left for the body after header, status line, borders, table
    /// header, footer and the optional 3-line search bar.
    const fn calculate_available_rows(total_rows: usize, with_search: bool) -> usize {
        if with_search {
            total_rows.saturating_sub(10)
        } else {
            total_rows.saturating_sub(7)
        }
    }
}

/// Coalesces fuzzy match indices into `(start, end)` character ranges.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::browse::Submission;
    use crate::storage::{shared, MemoryStore, THEME_KEY};

    fn state() -> AppState {
        AppState::new(shared(MemoryStore::default()), Theme::default(), ThemeName::Dark)
    }

    fn recipes(count: usize) -> Vec<Recipe> {
        (0..count)
            .map(|i| Recipe::summary(format!("{}", 100 + i), format!("Dish {i}"), ""))
            .collect()
    }

    fn loaded(count: usize, width: usize) -> AppState {
        let mut state = state();
        state.set_viewport_width(width);
        let commands = state.start();
        let tag = &commands[0].tag;
        state
            .browser
            .complete(tag.target, tag.generation, Ok(recipes(count)));
        state.sync_reveal();
        state
    }

    #[test]
    fn start_issues_category_and_list_fetches_once() {
        let mut state = state();
        let commands = state.start();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].request, RemoteRequest::ByCategory("Dessert".into()));
        assert_eq!(commands[1].request, RemoteRequest::Categories);
        assert!(state.start().is_empty());
    }

    #[test]
    fn new_results_reset_reveal_to_first_page() {
        let state = loaded(30, 70);
        assert_eq!(state.reveal.visible(), 9);
        assert_eq!(state.row_count(), 10);
    }

    #[test]
    fn width_change_restarts_reveal() {
        let mut state = loaded(30, 70);
        state.reveal_more();
        assert_eq!(state.reveal.visible(), 18);

        assert!(state.set_viewport_width(200));
        assert_eq!(state.reveal.visible(), 18);
        assert!(state.set_viewport_width(110));
        assert_eq!(state.reveal.visible(), 15);
        assert!(!state.set_viewport_width(110));
    }

    #[test]
    fn load_more_row_follows_last_visible_recipe() {
        let mut state = loaded(12, 70);
        state.move_selection_up();
        assert!(state.is_load_more_selected());
        assert!(state.selected_recipe().is_none());

        let vm = state.compute_viewmodel(40, 100);
        let Body::List { items } = vm.body else {
            panic!("expected list");
        };
        let last = items.last().unwrap();
        assert_eq!(last.kind, RowKind::LoadMore);
        assert_eq!(last.name, "Load more (3 remaining)");
        assert!(last.is_selected);
    }

    #[test]
    fn no_load_more_row_when_everything_is_visible() {
        let state = loaded(4, 70);
        assert_eq!(state.row_count(), 4);
        assert!(!state.reveal.has_more());
    }

    #[test]
    fn header_names_category_or_query() {
        let mut state = loaded(2, 70);
        assert_eq!(state.compute_viewmodel(24, 80).header.title, " Dessert Recipes (2) ");

        state.browser.edit_input("pasta");
        state.browser.submit_search();
        let title = state.compute_viewmodel(24, 80).header.title;
        assert_eq!(title, " Search results for \"pasta\" (0) ");
    }

    #[test]
    fn failed_panel_renders_inline_error() {
        let mut state = state();
        let commands = state.start();
        let tag = &commands[0].tag;
        state
            .browser
            .complete(tag.target, tag.generation, Err(crate::MealdeckError::Http(404)));

        let Body::Message(message) = state.compute_viewmodel(24, 80).body else {
            panic!("expected message");
        };
        assert!(message.is_error);
        assert_eq!(message.subtitle, "HTTP error! status: 404");
    }

    #[test]
    fn theme_toggle_persists() {
        let store = shared(MemoryStore::default());
        let mut state = AppState::new(store.clone(), Theme::default(), ThemeName::Dark);
        state.toggle_theme();

        assert_eq!(state.theme.name, "light");
        assert_eq!(store.borrow().get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn long_lists_are_windowed_around_selection() {
        let mut state = loaded(60, 200);
        for _ in 0..15 {
            state.move_selection_down();
        }
        let Body::List { items } = state.compute_viewmodel(17, 200).body else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 10);
        assert!(items.iter().any(|item| item.is_selected));
    }

    #[test]
    fn highlight_stays_inside_the_shown_name() {
        let mut state = loaded(2, 200);
        state.browser.edit_input("pasta");
        let Submission::Fetch(cmd) = state.browser.submit_search() else {
            panic!("expected fetch");
        };
        let results = vec![
            Recipe::summary("1", "Slow cooked beef and vegetable casserole with pasta", ""),
            Recipe::summary("2", "Pasta e fagioli", ""),
        ];
        state
            .browser
            .complete(cmd.tag.target, cmd.tag.generation, Ok(results));
        state.sync_reveal();

        let Body::List { items } = state.compute_viewmodel(24, 200).body else {
            panic!("expected list");
        };
        assert!(items[0].name.ends_with("..."));
        let kept = items[0].name.chars().count() - 3;
        assert!(items[0].highlight_ranges.iter().all(|&(_, end)| end <= kept));
        assert_eq!(items[1].highlight_ranges, vec![(0, 5)]);
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let matcher = SkimMatcherV2::default();
        let ranges = compute_highlight_ranges("Pasta Bake", "pas", &matcher);
        assert_eq!(ranges, vec![(0, 3)]);
        assert!(compute_highlight_ranges("Soup", "xyz", &matcher).is_empty());
    }
}
