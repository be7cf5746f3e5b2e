//! Request tags carried through Zellij's web request context.
//!
//! Zellij echoes the context map given to `web_request` back in the
//! `WebRequestResult` event. Each request is tagged with the panel that issued
//! it and a generation number so that superseded responses can be discarded
//! no matter in which order they complete.

use crate::domain::error::{MealdeckError, Result};
use std::collections::BTreeMap;

const TARGET_KEY: &str = "target";
const GENERATION_KEY: &str = "generation";
const RECIPE_ID_KEY: &str = "recipe_id";

/// The piece of state a response is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Categories,
    CategoryRecipes,
    SearchResults,
    Details,
    Favorite,
}

impl FetchTarget {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::CategoryRecipes => "category_recipes",
            Self::SearchResults => "search_results",
            Self::Details => "details",
            Self::Favorite => "favorite",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "categories" => Self::Categories,
            "category_recipes" => Self::CategoryRecipes,
            "search_results" => Self::SearchResults,
            "details" => Self::Details,
            "favorite" => Self::Favorite,
            _ => return None,
        })
    }
}

/// Routing information attached to one outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub target: FetchTarget,
    /// Generation of the target at submission time.
    pub generation: u64,
    /// Recipe id for lookups.
    pub recipe_id: Option<String>,
}

impl RequestTag {
    #[must_use]
    pub const fn new(target: FetchTarget, generation: u64) -> Self {
        Self {
            target,
            generation,
            recipe_id: None,
        }
    }

    #[must_use]
    pub fn with_recipe(mut self, id: impl Into<String>) -> Self {
        self.recipe_id = Some(id.into());
        self
    }

    /// Encodes the tag as a Zellij request context.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(TARGET_KEY.to_string(), self.target.as_str().to_string());
        context.insert(GENERATION_KEY.to_string(), self.generation.to_string());
        if let Some(id) = &self.recipe_id {
            context.insert(RECIPE_ID_KEY.to_string(), id.clone());
        }
        context
    }

    /// Decodes a tag from the context echoed back with a web result.
    ///
    /// # Errors
    ///
    /// Returns [`MealdeckError::MissingContext`] when the target or generation
    /// is absent or unreadable.
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Self> {
        let target = context
            .get(TARGET_KEY)
            .and_then(|value| FetchTarget::parse(value))
            .ok_or(MealdeckError::MissingContext)?;
        let generation = context
            .get(GENERATION_KEY)
            .and_then(|value| value.parse().ok())
            .ok_or(MealdeckError::MissingContext)?;

        Ok(Self {
            target,
            generation,
            recipe_id: context.get(RECIPE_ID_KEY).cloned(),
        })
    }
}
