//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into ANSI-styled output. It owns the
//! view model types, the themes and the components that draw each region of
//! the pane.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared text utilities (highlighting, truncation, wrapping)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    Body, DetailLine, DisplayItem, EmptyState, FooterInfo, HeaderInfo, LineStyle, RowKind,
    SearchBarInfo, UIViewModel,
};
