//! Composable UI component renderers.
//!
//! Each component draws one part of the pane at an explicit row and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar and status line
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box (border, kind label, query or placeholder)
//! - [`table`]: Recipe and category lists
//! - [`empty`]: Loading, empty and error messages
//! - [`details`]: Scrolled recipe details
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Status line]
//! [Border]
//! [Search Bar - 3 lines, optional]
//! [Body: table | message | details]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod details;
mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use details::render_details;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole frame for `vm`.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    match &vm.body {
        Body::List { items } => {
            current_row = render_table_headers(current_row, items, theme);
            render_table_rows(current_row, items, theme, cols);
        }
        Body::Message(empty) => {
            render_empty_state(current_row + 2, empty, theme, cols);
        }
        Body::Details { lines } => {
            render_details(current_row, lines, theme, cols);
        }
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
