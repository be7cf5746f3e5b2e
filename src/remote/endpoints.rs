//! Endpoint selection and URL construction.
//!
//! Every remote read is described by a [`RemoteRequest`]. Search submissions
//! are a tagged [`SearchQuery`] so that exactly one endpoint is chosen per
//! submission by a single match.

use std::fmt;

/// Base URL of the public TheMealDB v1 API.
pub const DEFAULT_API_BASE: &str = "https://www.themealdb.com/api/json/v1/1";

/// Search dimension selected in the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    Name,
    Ingredient,
    Area,
}

impl SearchKind {
    /// Cycles Name → Ingredient → Area → Name.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Ingredient,
            Self::Ingredient => Self::Area,
            Self::Area => Self::Name,
        }
    }

    /// Label shown next to the search bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Ingredient => "Ingredient",
            Self::Area => "Cuisine",
        }
    }

    /// Placeholder shown in an empty search bar.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Search all recipes...",
            Self::Ingredient => "Search by ingredient...",
            Self::Area => "Search by cuisine...",
        }
    }
}

/// A submitted search, tagged by the dimension it runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Name(String),
    Ingredient(String),
    Area(String),
}

impl SearchQuery {
    /// Builds a query of the given kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use mealdeck::remote::{SearchKind, SearchQuery};
    ///
    /// let query = SearchQuery::new(SearchKind::Area, "Italian");
    /// assert_eq!(query, SearchQuery::Area("Italian".to_string()));
    /// ```
    pub fn new(kind: SearchKind, text: impl Into<String>) -> Self {
        let text = text.into();
        match kind {
            SearchKind::Name => Self::Name(text),
            SearchKind::Ingredient => Self::Ingredient(text),
            SearchKind::Area => Self::Area(text),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> SearchKind {
        match self {
            Self::Name(_) => SearchKind::Name,
            Self::Ingredient(_) => SearchKind::Ingredient,
            Self::Area(_) => SearchKind::Area,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Name(text) | Self::Ingredient(text) | Self::Area(text) => text,
        }
    }
}

/// A read against the remote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    /// Full category listing.
    Categories,
    /// Partial recipes in one category.
    ByCategory(String),
    /// Name search (full records) or ingredient/area filter (partial records).
    Search(SearchQuery),
    /// One full recipe by id.
    Lookup(String),
}

impl RemoteRequest {
    /// Builds the request URL against `base`, percent-encoding the argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use mealdeck::remote::{RemoteRequest, SearchQuery, DEFAULT_API_BASE};
    ///
    /// let request = RemoteRequest::Search(SearchQuery::Ingredient("chicken breast".into()));
    /// assert_eq!(
    ///     request.url(DEFAULT_API_BASE),
    ///     "https://www.themealdb.com/api/json/v1/1/filter.php?i=chicken%20breast"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        let (endpoint, key, value) = match self {
            Self::Categories => return format!("{base}/categories.php"),
            Self::ByCategory(name) => ("filter.php", "c", name.as_str()),
            Self::Search(SearchQuery::Name(text)) => ("search.php", "s", text.as_str()),
            Self::Search(SearchQuery::Ingredient(text)) => ("filter.php", "i", text.as_str()),
            Self::Search(SearchQuery::Area(text)) => ("filter.php", "a", text.as_str()),
            Self::Lookup(id) => ("lookup.php", "i", id.as_str()),
        };
        format!("{base}/{endpoint}?{key}={}", urlencoding::encode(value))
    }
}

impl fmt::Display for RemoteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categories => write!(f, "categories"),
            Self::ByCategory(name) => write!(f, "category {name}"),
            Self::Search(query) => write!(f, "{} search \"{}\"", query.kind().label(), query.text()),
            Self::Lookup(id) => write!(f, "lookup {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.test/api/";

    #[test]
    fn each_search_kind_hits_its_own_endpoint() {
        let name = RemoteRequest::Search(SearchQuery::Name("pasta".into()));
        let ingredient = RemoteRequest::Search(SearchQuery::Ingredient("egg".into()));
        let area = RemoteRequest::Search(SearchQuery::Area("Thai".into()));

        assert_eq!(name.url(BASE), "https://example.test/api/search.php?s=pasta");
        assert_eq!(ingredient.url(BASE), "https://example.test/api/filter.php?i=egg");
        assert_eq!(area.url(BASE), "https://example.test/api/filter.php?a=Thai");
    }

    #[test]
    fn category_and_lookup_urls() {
        assert_eq!(
            RemoteRequest::ByCategory("Dessert".into()).url(BASE),
            "https://example.test/api/filter.php?c=Dessert"
        );
        assert_eq!(
            RemoteRequest::Lookup("52772".into()).url(BASE),
            "https://example.test/api/lookup.php?i=52772"
        );
        assert_eq!(RemoteRequest::Categories.url(BASE), "https://example.test/api/categories.php");
    }

    #[test]
    fn query_values_are_encoded() {
        let request = RemoteRequest::Search(SearchQuery::Name("mac & cheese".into()));
        assert_eq!(request.url(BASE), "https://example.test/api/search.php?s=mac%20%26%20cheese");
    }

    #[test]
    fn kind_cycles_back_to_name() {
        assert_eq!(SearchKind::Name.next().next().next(), SearchKind::Name);
    }
}
