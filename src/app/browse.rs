//! Search, filter and sort coordination for the recipe list.
//!
//! The [`Browser`] decides which list is on screen. It is either the recipes of
//! the active category or the results of the last submitted search, never both.
//! Each of the two sources has its own [`Panel`] with an independent status and
//! request generation, so a failure or a late response in one never disturbs
//! the other.
//!
//! # State Machine
//!
//! ```text
//!            submit non-empty query
//!  Category ───────────────────────────▶ Search { return_to = active }
//!     ▲  ◀─────────────────────────────   │
//!     │     clear / empty input            │ select_category(name)
//!     │     (back to return_to)            ▼
//!     └──────────────────────────────── Category { active = name }
//! ```

use crate::domain::error::Result;
use crate::domain::Recipe;
use crate::remote::{FetchTarget, RemoteRequest, RequestTag, SearchKind, SearchQuery};
use std::cmp::Ordering;

/// Category shown before the user picks one.
pub const DEFAULT_CATEGORY: &str = "Dessert";

/// Ordering applied to the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Fetch order.
    #[default]
    None,
    NameAsc,
    NameDesc,
    /// Descending numeric id.
    Newest,
}

impl SortOrder {
    /// Cycles none → A-Z → Z-A → newest → none.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::NameAsc,
            Self::NameAsc => Self::NameDesc,
            Self::NameDesc => Self::Newest,
            Self::Newest => Self::None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Sort by...",
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::Newest => "Newest First",
        }
    }
}

/// Which source drives the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseMode {
    Category {
        active: String,
    },
    Search {
        query: SearchQuery,
        /// Category restored when the search is cleared.
        return_to: String,
    },
}

/// Load status of one panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The request succeeded with zero rows.
    Empty,
    Failed(String),
}

/// Items and load status of one fetch target.
#[derive(Debug, Clone)]
pub struct Panel<T = Recipe> {
    items: Vec<T>,
    /// `items` as the server returned them.
    fetched: Vec<T>,
    status: PanelStatus,
    generation: u64,
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            fetched: Vec::new(),
            status: PanelStatus::Idle,
            generation: 0,
        }
    }
}

impl<T: Clone> Panel<T> {
    /// Starts a new request, superseding any in flight. Returns its generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.items.clear();
        self.fetched.clear();
        self.status = PanelStatus::Loading;
        self.generation
    }

    /// Returns to idle, superseding any request in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.fetched.clear();
        self.status = PanelStatus::Idle;
    }

    /// Applies a response if `generation` is the latest issued.
    pub fn apply(&mut self, generation: u64, outcome: Result<Vec<T>>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                latest = self.generation,
                "discarding stale response"
            );
            return false;
        }

        match outcome {
            Ok(items) => {
                self.status = if items.is_empty() {
                    PanelStatus::Empty
                } else {
                    PanelStatus::Ready
                };
                self.fetched.clone_from(&items);
                self.items = items;
            }
            Err(e) => {
                tracing::debug!(error = %e, network = e.is_network(), "panel fetch failed");
                self.items.clear();
                self.fetched.clear();
                self.status = PanelStatus::Failed(e.to_string());
            }
        }
        true
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub const fn status(&self) -> &PanelStatus {
        &self.status
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// A request the runtime should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    pub request: RemoteRequest,
    pub tag: RequestTag,
}

/// Result of submitting the search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Same query and kind as the previous submission; nothing to do.
    Unchanged,
    /// Empty input cleared the search; carries the category refetch, if any.
    Cleared(Option<FetchCommand>),
    Fetch(FetchCommand),
}

/// Coordinator for browse mode, search input and sort order.
#[derive(Debug, Clone)]
pub struct Browser {
    mode: BrowseMode,
    input: String,
    kind: SearchKind,
    sort: SortOrder,
    category: Panel,
    search: Panel,
    last_submission: Option<SearchQuery>,
    revision: u64,
}

impl Browser {
    /// Starts in category mode on `default_category`.
    #[must_use]
    pub fn new(default_category: impl Into<String>) -> Self {
        Self {
            mode: BrowseMode::Category {
                active: default_category.into(),
            },
            input: String::new(),
            kind: SearchKind::default(),
            sort: SortOrder::default(),
            category: Panel::default(),
            search: Panel::default(),
            last_submission: None,
            revision: 0,
        }
    }

    /// Fetches the active category for the first time.
    pub fn start(&mut self) -> FetchCommand {
        let category = self.last_active_category().to_string();
        self.fetch_category(category)
    }

    pub fn set_search_kind(&mut self, kind: SearchKind) {
        self.kind = kind;
    }

    pub fn cycle_search_kind(&mut self) -> SearchKind {
        self.kind = self.kind.next();
        self.kind
    }

    /// Replaces the search input. An input that becomes blank clears the search.
    pub fn edit_input(&mut self, text: impl Into<String>) -> Option<FetchCommand> {
        self.input = text.into();
        if self.input.trim().is_empty() {
            return self.clear_search();
        }
        None
    }

    /// Submits the current input as a search of the selected kind.
    pub fn submit_search(&mut self) -> Submission {
        let text = self.input.trim();
        if text.is_empty() {
            return Submission::Cleared(self.clear_search());
        }

        let query = SearchQuery::new(self.kind, text);
        if self.last_submission.as_ref() == Some(&query) {
            tracing::debug!(query = %query.text(), "search unchanged, skipping fetch");
            return Submission::Unchanged;
        }

        let return_to = self.last_active_category().to_string();
        tracing::debug!(query = %query.text(), kind = ?query.kind(), return_to = %return_to, "entering search");

        self.last_submission = Some(query.clone());
        self.mode = BrowseMode::Search {
            query: query.clone(),
            return_to,
        };
        self.sort = SortOrder::None;
        let generation = self.search.begin();
        self.touch();

        Submission::Fetch(FetchCommand {
            request: RemoteRequest::Search(query),
            tag: RequestTag::new(FetchTarget::SearchResults, generation),
        })
    }

    /// Clears input, results and the repeated-submission memory.
    ///
    /// In search mode this returns to the remembered category and refetches it.
    pub fn clear_search(&mut self) -> Option<FetchCommand> {
        self.input.clear();
        self.last_submission = None;
        self.search.reset();

        match &self.mode {
            BrowseMode::Search { return_to, .. } => {
                let category = return_to.clone();
                tracing::debug!(category = %category, "leaving search");
                Some(self.fetch_category(category))
            }
            BrowseMode::Category { .. } => None,
        }
    }

    /// Switches to `name`, leaving search mode if needed.
    ///
    /// Selecting the category that is already shown does nothing.
    pub fn select_category(&mut self, name: &str) -> Option<FetchCommand> {
        if matches!(&self.mode, BrowseMode::Category { active } if active == name) {
            return None;
        }

        self.input.clear();
        self.last_submission = None;
        self.search.reset();
        Some(self.fetch_category(name.to_string()))
    }

    /// Reorders the displayed list from its fetch order. Stable for equal keys.
    ///
    /// Only a `Ready` list can be sorted; otherwise nothing changes and
    /// `false` is returned.
    pub fn apply_sort(&mut self, order: SortOrder) -> bool {
        if self.display_status() != &PanelStatus::Ready {
            tracing::debug!(order = ?order, "nothing to sort");
            return false;
        }
        self.sort = order;
        self.resort();
        true
    }

    /// Advances to the next order. `None` when the list cannot be sorted.
    pub fn cycle_sort(&mut self) -> Option<SortOrder> {
        let next = self.sort.next();
        self.apply_sort(next).then_some(next)
    }

    fn resort(&mut self) {
        let panel = match self.mode {
            BrowseMode::Category { .. } => &mut self.category,
            BrowseMode::Search { .. } => &mut self.search,
        };

        panel.items.clone_from(&panel.fetched);
        match self.sort {
            SortOrder::None => {}
            SortOrder::NameAsc => panel.items.sort_by(compare_names),
            SortOrder::NameDesc => panel.items.sort_by(|a, b| compare_names(b, a)),
            SortOrder::Newest => panel.items.sort_by(compare_newest),
        }
        self.touch();
    }

    /// Applies a response for `target` if `generation` is still current.
    ///
    /// Returns `false` for stale responses and for targets this coordinator
    /// does not own.
    pub fn complete(
        &mut self,
        target: FetchTarget,
        generation: u64,
        outcome: Result<Vec<Recipe>>,
    ) -> bool {
        let searching = self.is_searching();
        let (panel, displayed) = match target {
            FetchTarget::CategoryRecipes => (&mut self.category, !searching),
            FetchTarget::SearchResults => (&mut self.search, searching),
            _ => return false,
        };

        let applied = panel.apply(generation, outcome);
        if applied && displayed {
            self.resort();
        }
        applied
    }

    fn fetch_category(&mut self, category: String) -> FetchCommand {
        self.mode = BrowseMode::Category {
            active: category.clone(),
        };
        self.sort = SortOrder::None;
        let generation = self.category.begin();
        self.touch();

        FetchCommand {
            request: RemoteRequest::ByCategory(category),
            tag: RequestTag::new(FetchTarget::CategoryRecipes, generation),
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn displayed_panel(&self) -> &Panel {
        match self.mode {
            BrowseMode::Category { .. } => &self.category,
            BrowseMode::Search { .. } => &self.search,
        }
    }

    #[must_use]
    pub fn display_items(&self) -> &[Recipe] {
        self.displayed_panel().items()
    }

    #[must_use]
    pub fn display_status(&self) -> &PanelStatus {
        self.displayed_panel().status()
    }

    #[must_use]
    pub const fn is_searching(&self) -> bool {
        matches!(self.mode, BrowseMode::Search { .. })
    }

    /// Category currently shown, or `None` while searching.
    #[must_use]
    pub fn active_category(&self) -> Option<&str> {
        match &self.mode {
            BrowseMode::Category { active } => Some(active),
            BrowseMode::Search { .. } => None,
        }
    }

    /// Category that search-clear returns to.
    #[must_use]
    pub fn last_active_category(&self) -> &str {
        match &self.mode {
            BrowseMode::Category { active } => active,
            BrowseMode::Search { return_to, .. } => return_to,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &BrowseMode {
        &self.mode
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub const fn search_kind(&self) -> SearchKind {
        self.kind
    }

    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }

    #[must_use]
    pub const fn category_panel(&self) -> &Panel {
        &self.category
    }

    /// Changes whenever the displayed list is replaced or reordered.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

fn compare_names(a: &Recipe, b: &Recipe) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

fn compare_newest(a: &Recipe, b: &Recipe) -> Ordering {
    match (a.numeric_id(), b.numeric_id()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MealdeckError;

    fn recipes(ids: &[&str]) -> Vec<Recipe> {
        ids.iter()
            .map(|id| Recipe::summary(*id, format!("Recipe {id}"), ""))
            .collect()
    }

    fn named(names: &[&str]) -> Vec<Recipe> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Recipe::summary(i.to_string(), *name, ""))
            .collect()
    }

    fn ids(browser: &Browser) -> Vec<&str> {
        browser.display_items().iter().map(|r| r.id.as_str()).collect()
    }

    fn started() -> Browser {
        let mut browser = Browser::new(DEFAULT_CATEGORY);
        let cmd = browser.start();
        browser.complete(cmd.tag.target, cmd.tag.generation, Ok(recipes(&["1", "2"])));
        browser
    }

    fn search(browser: &mut Browser, text: &str) -> Submission {
        browser.edit_input(text);
        browser.submit_search()
    }

    #[test]
    fn starts_on_default_category() {
        let mut browser = Browser::new(DEFAULT_CATEGORY);
        let cmd = browser.start();
        assert_eq!(cmd.request, RemoteRequest::ByCategory("Dessert".into()));
        assert_eq!(cmd.tag.target, FetchTarget::CategoryRecipes);
        assert_eq!(browser.display_status(), &PanelStatus::Loading);
        assert!(!browser.is_searching());
    }

    #[test]
    fn repeated_submission_fetches_once() {
        let mut browser = started();

        let first = search(&mut browser, "pasta");
        let second = search(&mut browser, "pasta");
        let fetches = [first, second]
            .iter()
            .filter(|s| matches!(s, Submission::Fetch(_)))
            .count();
        assert_eq!(fetches, 1);
    }

    #[test]
    fn same_text_with_other_kind_fetches_again() {
        let mut browser = started();
        assert!(matches!(search(&mut browser, "chicken"), Submission::Fetch(_)));

        browser.set_search_kind(SearchKind::Ingredient);
        match browser.submit_search() {
            Submission::Fetch(cmd) => assert_eq!(
                cmd.request,
                RemoteRequest::Search(SearchQuery::Ingredient("chicken".into()))
            ),
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn submission_trims_input() {
        let mut browser = started();
        let Submission::Fetch(cmd) = search(&mut browser, "  pasta ") else {
            panic!("expected fetch");
        };
        assert_eq!(cmd.request, RemoteRequest::Search(SearchQuery::Name("pasta".into())));
        assert!(matches!(search(&mut browser, "pasta"), Submission::Unchanged));
    }

    #[test]
    fn category_selection_leaves_search() {
        let mut browser = started();
        search(&mut browser, "pasta");
        assert!(browser.is_searching());

        let cmd = browser.select_category("Seafood").unwrap();
        assert_eq!(cmd.request, RemoteRequest::ByCategory("Seafood".into()));
        assert!(!browser.is_searching());
        assert_eq!(browser.input(), "");
        assert_eq!(browser.active_category(), Some("Seafood"));
    }

    #[test]
    fn clearing_returns_to_last_category() {
        let mut browser = started();
        browser.select_category("Beef");
        search(&mut browser, "stew");
        assert_eq!(browser.last_active_category(), "Beef");

        let cmd = browser.clear_search().unwrap();
        assert_eq!(cmd.request, RemoteRequest::ByCategory("Beef".into()));
        assert_eq!(browser.active_category(), Some("Beef"));

        // Dedup memory was cleared with the search.
        assert!(matches!(search(&mut browser, "stew"), Submission::Fetch(_)));
    }

    #[test]
    fn blank_input_clears_search() {
        let mut browser = started();
        search(&mut browser, "pasta");

        let cmd = browser.edit_input("   ");
        assert!(cmd.is_some());
        assert!(!browser.is_searching());
        assert!(browser.edit_input("").is_none());
    }

    #[test]
    fn reselecting_active_category_is_a_noop() {
        let mut browser = started();
        assert!(browser.select_category("Dessert").is_none());
        assert_eq!(ids(&browser), ["1", "2"]);
    }

    #[test]
    fn newest_sorts_by_descending_numeric_id() {
        let mut browser = Browser::new("Beef");
        let cmd = browser.start();
        browser.complete(cmd.tag.target, cmd.tag.generation, Ok(recipes(&["1", "3", "2"])));

        browser.apply_sort(SortOrder::Newest);
        assert_eq!(ids(&browser), ["3", "2", "1"]);

        let cmd = browser.select_category("Lamb").unwrap();
        browser.complete(cmd.tag.target, cmd.tag.generation, Ok(recipes(&["52772", "52771"])));
        browser.apply_sort(SortOrder::Newest);
        assert_eq!(ids(&browser), ["52772", "52771"]);
    }

    #[test]
    fn non_numeric_ids_sort_last() {
        let mut browser = Browser::new("Beef");
        let cmd = browser.start();
        browser.complete(cmd.tag.target, cmd.tag.generation, Ok(recipes(&["x", "5", "9"])));
        browser.apply_sort(SortOrder::Newest);
        assert_eq!(ids(&browser), ["9", "5", "x"]);
    }

    #[test]
    fn name_sorts_ignore_case() {
        let mut browser = Browser::new("Beef");
        let cmd = browser.start();
        browser.complete(
            cmd.tag.target,
            cmd.tag.generation,
            Ok(named(&["banana bread", "Apple pie", "carrot cake"])),
        );

        browser.apply_sort(SortOrder::NameAsc);
        let names: Vec<_> = browser.display_items().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Apple pie", "banana bread", "carrot cake"]);

        browser.apply_sort(SortOrder::NameDesc);
        let names: Vec<_> = browser.display_items().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["carrot cake", "banana bread", "Apple pie"]);
    }

    #[test]
    fn sort_waits_for_the_list_to_load() {
        let mut browser = Browser::new("Beef");
        let cmd = browser.start();

        assert!(!browser.apply_sort(SortOrder::Newest));
        assert_eq!(browser.cycle_sort(), None);
        assert_eq!(browser.sort(), SortOrder::None);

        browser.complete(cmd.tag.target, cmd.tag.generation, Ok(recipes(&["1", "3", "2"])));
        assert_eq!(browser.sort(), SortOrder::None);
        assert_eq!(ids(&browser), ["1", "3", "2"]);

        assert!(browser.apply_sort(SortOrder::Newest));
        assert_eq!(ids(&browser), ["3", "2", "1"]);
    }

    #[test]
    fn cycling_back_to_none_restores_fetch_order() {
        let mut browser = Browser::new("Beef");
        let cmd = browser.start();
        browser.complete(cmd.tag.target, cmd.tag.generation, Ok(recipes(&["1", "3", "2"])));

        for _ in 0..4 {
            browser.cycle_sort();
        }
        assert_eq!(browser.sort(), SortOrder::None);
        assert_eq!(ids(&browser), ["1", "3", "2"]);
    }

    #[test]
    fn refetch_resets_sort() {
        let mut browser = started();
        browser.apply_sort(SortOrder::NameDesc);
        browser.select_category("Pork");
        assert_eq!(browser.sort(), SortOrder::None);
    }

    #[test]
    fn stale_search_response_is_discarded() {
        let mut browser = started();
        let Submission::Fetch(first) = search(&mut browser, "pasta") else {
            panic!("expected fetch");
        };
        let Submission::Fetch(second) = search(&mut browser, "soup") else {
            panic!("expected fetch");
        };

        assert!(browser.complete(second.tag.target, second.tag.generation, Ok(recipes(&["20"]))));
        assert!(!browser.complete(first.tag.target, first.tag.generation, Ok(recipes(&["10"]))));
        assert_eq!(ids(&browser), ["20"]);
    }

    #[test]
    fn search_failure_leaves_category_panel_intact() {
        let mut browser = started();
        let Submission::Fetch(cmd) = search(&mut browser, "pasta") else {
            panic!("expected fetch");
        };

        browser.complete(cmd.tag.target, cmd.tag.generation, Err(MealdeckError::Http(500)));
        assert_eq!(
            browser.display_status(),
            &PanelStatus::Failed("HTTP error! status: 500".into())
        );
        assert_eq!(browser.category_panel().status(), &PanelStatus::Ready);
        assert_eq!(browser.category_panel().items().len(), 2);
    }

    #[test]
    fn zero_rows_is_empty_status() {
        let mut browser = started();
        let Submission::Fetch(cmd) = search(&mut browser, "zzzz") else {
            panic!("expected fetch");
        };
        browser.complete(cmd.tag.target, cmd.tag.generation, Ok(Vec::new()));
        assert_eq!(browser.display_status(), &PanelStatus::Empty);
    }

    #[test]
    fn late_search_response_after_clear_is_ignored() {
        let mut browser = started();
        let Submission::Fetch(cmd) = search(&mut browser, "pasta") else {
            panic!("expected fetch");
        };
        browser.clear_search();
        assert!(!browser.complete(cmd.tag.target, cmd.tag.generation, Ok(recipes(&["9"]))));
    }

    #[test]
    fn revision_tracks_displayed_list_changes() {
        let mut browser = started();
        let before = browser.revision();
        browser.apply_sort(SortOrder::NameAsc);
        assert!(browser.revision() > before);

        let before = browser.revision();
        browser.cycle_search_kind();
        assert_eq!(browser.revision(), before);
    }
}
