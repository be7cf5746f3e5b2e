//! Side effects requested by the event handler.
//!
//! The handler never talks to the Zellij host itself. It returns a list of
//! [`Action`]s which the plugin shim executes in order after each event.
//!
//! # Example
//!
//! ```rust
//! use mealdeck::app::Action;
//! use mealdeck::app::browse::FetchCommand;
//! use mealdeck::remote::{FetchTarget, RemoteRequest, RequestTag};
//!
//! let actions = vec![Action::Fetch(FetchCommand {
//!     request: RemoteRequest::Categories,
//!     tag: RequestTag::new(FetchTarget::Categories, 1),
//! })];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::app::browse::FetchCommand;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a tagged GET request against the remote source.
    ///
    /// The response comes back as a web request result carrying the tag's
    /// context map.
    Fetch(FetchCommand),
}
