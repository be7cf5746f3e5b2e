//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the frame components
//!
//! Nothing here reads state beyond the view model and the theme.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a pane of `rows` x `cols`.
///
/// Prints ANSI-styled output positioned with absolute cursor moves. Does not
/// clear the screen; Zellij hands the plugin a fresh buffer per render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_frame(&viewmodel, &state.theme, cols, rows);
}
