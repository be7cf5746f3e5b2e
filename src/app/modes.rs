//! Input and view mode types.
//!
//! The input mode decides how keys are interpreted: in [`InputMode::Typing`]
//! printable keys edit the search input, otherwise they are commands. The view
//! mode decides which list fills the body of the pane. Recipe details are not a
//! view mode; they open on top of whichever view is active and close back to it.
//!
//! # Example
//!
//! ```rust
//! use mealdeck::app::modes::{InputMode, ViewMode};
//!
//! let input_mode = InputMode::Typing;
//! let view_mode = ViewMode::Favorites;
//! assert_ne!(input_mode, InputMode::Normal);
//! assert!(view_mode.is_overlay());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are commands: navigation, sort, favorites, view switches.
    #[default]
    Normal,

    /// Keys edit the search input. Enter submits, Esc returns to Normal.
    Typing,
}

/// Which list fills the body of the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Category recipes or search results, as chosen by the browser.
    #[default]
    Recipes,

    /// Category picker.
    Categories,

    /// Favorite recipes, looked up by id.
    Favorites,
}

impl ViewMode {
    /// Overlays close with Esc back to [`ViewMode::Recipes`].
    #[must_use]
    pub const fn is_overlay(self) -> bool {
        !matches!(self, Self::Recipes)
    }
}
