//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState::compute_viewmodel` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! truncated names, highlight ranges, selection flags and message text.
//!
//! # Example
//!
//! ```rust
//! use mealdeck::ui::viewmodel::{Body, DisplayItem, FooterInfo, HeaderInfo, RowKind, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: " Dessert Recipes (1) ".to_string(),
//!         status_line: "Search: Name  Sort: Sort by...  Favorites: 0".to_string(),
//!     },
//!     search_bar: None,
//!     body: Body::List {
//!         items: vec![DisplayItem {
//!             name: "Apam balik".to_string(),
//!             detail: "#53049".to_string(),
//!             is_selected: true,
//!             is_favorite: false,
//!             kind: RowKind::Recipe,
//!             highlight_ranges: vec![],
//!         }],
//!     },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert!(matches!(vm.body, Body::List { .. }));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present in the recipe view while typing or showing search results.
    pub search_bar: Option<SearchBarInfo>,

    pub body: Body,

    pub footer: FooterInfo,
}

/// What fills the space between header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// A windowed list of rows.
    List { items: Vec<DisplayItem> },

    /// Loading, empty or failed panel.
    Message(EmptyState),

    /// Recipe details, already scrolled.
    Details { lines: Vec<DetailLine> },
}

/// What a list row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Recipe,
    Category,
    /// The "Load more (N remaining)" row.
    LoadMore,
}

/// One row of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Left column.
    pub name: String,

    /// Right column: area/category, id or category description.
    pub detail: String,

    pub is_selected: bool,

    /// Draws the favorite marker in front of the name.
    pub is_favorite: bool,

    pub kind: RowKind,

    /// Character ranges of `name` matching the search query, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Title bar and the status line below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Search kind, sort order and favorites count.
    pub status_line: String,
}

/// Keybinding hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown instead of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    /// Draws the message in the error color.
    pub is_error: bool,
}

/// Search input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Search kind label, e.g. "Ingredient".
    pub kind_label: String,
    /// Shown when `query` is empty.
    pub placeholder: String,
    /// The input currently receives keys.
    pub focused: bool,
}

/// Styling of one details line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Heading,
    Normal,
    Dim,
    Link,
}

/// One line of the details view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub text: String,
    pub style: LineStyle,
}

impl DetailLine {
    #[must_use]
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}
