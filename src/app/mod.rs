//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain,
//! remote and storage layers. Every key press and web result goes through
//! [`handle_event`], which mutates [`AppState`] and returns the side effects
//! the runtime should perform.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Web Requests
//!                           ↑                                          ↓
//!                           └──────────── Tagged Responses ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`browse`]: Category/search browsing, sorting and panel status
//! - [`handler`]: Event processing and response routing
//! - [`modes`]: Input and view mode types
//! - [`panels`]: Favorites panel and recipe details
//! - [`reveal`]: Width-dependent incremental reveal
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod browse;
pub mod handler;
pub mod modes;
pub mod panels;
pub mod reveal;
pub mod state;

pub use actions::Action;
pub use browse::{Browser, FetchCommand, PanelStatus, SortOrder};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ViewMode};
pub use reveal::{Breakpoints, RevealState};
pub use state::AppState;
