//! Favorites panel and recipe details state.
//!
//! Both are filled by lookups against the remote source. The favorites panel
//! fans out one lookup per favorite id and only settles once every id has
//! answered; the details view waits on a single lookup.

use crate::app::browse::{FetchCommand, PanelStatus};
use crate::domain::error::Result;
use crate::domain::Recipe;
use crate::remote::{FetchTarget, RemoteRequest, RequestTag};
use std::collections::HashMap;

/// Full records of the user's favorites, in favorite order.
#[derive(Debug, Clone, Default)]
pub struct FavoritesPanel {
    ids: Vec<String>,
    generation: u64,
    answers: HashMap<String, std::result::Result<Option<Recipe>, String>>,
    items: Vec<Recipe>,
    status: PanelStatus,
}

impl FavoritesPanel {
    /// Starts looking up `ids`, tagged with the favorites `generation`.
    ///
    /// Previous answers are dropped. An empty id list settles immediately.
    pub fn begin(&mut self, ids: &[String], generation: u64) -> Vec<FetchCommand> {
        self.ids = ids.to_vec();
        self.generation = generation;
        self.answers.clear();
        self.items.clear();

        if ids.is_empty() {
            self.status = PanelStatus::Empty;
            return Vec::new();
        }
        self.status = PanelStatus::Loading;

        tracing::debug!(count = ids.len(), generation, "looking up favorites");
        ids.iter()
            .map(|id| FetchCommand {
                request: RemoteRequest::Lookup(id.clone()),
                tag: RequestTag::new(FetchTarget::Favorite, generation).with_recipe(id.clone()),
            })
            .collect()
    }

    /// Records the lookup result for `id`.
    ///
    /// Returns `false` when the answer belongs to a superseded favorites
    /// generation or to an id that is no longer expected.
    pub fn answer(&mut self, generation: u64, id: &str, outcome: Result<Option<Recipe>>) -> bool {
        if generation != self.generation || !self.ids.iter().any(|expected| expected == id) {
            tracing::debug!(generation, latest = self.generation, id = %id, "discarding favorite lookup");
            return false;
        }

        self.answers
            .insert(id.to_string(), outcome.map_err(|e| e.to_string()));
        if self.answers.len() == self.ids.len() {
            self.settle();
        }
        true
    }

    fn settle(&mut self) {
        let mut first_error = None;
        let mut items = Vec::with_capacity(self.ids.len());

        for id in &self.ids {
            match self.answers.get(id) {
                Some(Ok(Some(recipe))) => items.push(recipe.clone()),
                Some(Err(message)) => {
                    first_error.get_or_insert_with(|| message.clone());
                }
                Some(Ok(None)) | None => {}
            }
        }

        self.status = match (items.is_empty(), first_error) {
            (false, _) => PanelStatus::Ready,
            (true, Some(message)) => PanelStatus::Failed(message),
            (true, None) => PanelStatus::Empty,
        };
        tracing::debug!(shown = items.len(), expected = self.ids.len(), "favorites settled");
        self.items = items;
    }

    #[must_use]
    pub fn items(&self) -> &[Recipe] {
        &self.items
    }

    #[must_use]
    pub const fn status(&self) -> &PanelStatus {
        &self.status
    }

    /// Number of lookups still outstanding.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.ids.len().saturating_sub(self.answers.len())
    }
}

/// Load state of the details view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    Loading,
    Ready(Box<Recipe>),
    /// The lookup succeeded but returned no record.
    Missing,
    Failed(String),
}

/// Details of one recipe, shown over the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub recipe_id: String,
    /// Name shown while the lookup is in flight.
    pub title: String,
    pub generation: u64,
    pub status: DetailStatus,
    /// First body line shown.
    pub scroll: usize,
}

impl DetailView {
    #[must_use]
    pub fn loading(recipe: &Recipe, generation: u64) -> Self {
        Self {
            recipe_id: recipe.id.clone(),
            title: recipe.name.clone(),
            generation,
            status: DetailStatus::Loading,
            scroll: 0,
        }
    }

    /// The lookup request for this view.
    #[must_use]
    pub fn command(&self) -> FetchCommand {
        FetchCommand {
            request: RemoteRequest::Lookup(self.recipe_id.clone()),
            tag: RequestTag::new(FetchTarget::Details, self.generation)
                .with_recipe(self.recipe_id.clone()),
        }
    }

    /// Applies a lookup result if it belongs to this view.
    pub fn complete(&mut self, generation: u64, outcome: Result<Option<Recipe>>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.status = match outcome {
            Ok(Some(recipe)) => DetailStatus::Ready(Box::new(recipe)),
            Ok(None) => DetailStatus::Missing,
            Err(e) => DetailStatus::Failed(e.to_string()),
        };
        true
    }
}
