//! Search bar component renderer.
//!
//! Renders the search input box with a bordered frame, the active search kind
//! and either the query or the kind's placeholder.

use crate::ui::helpers::{char_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the 3-line search box at `row` and returns `row + 3`.
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────┐ [margin]
/// [margin] │ Name: chicken_           │ [margin]
/// [margin] └──────────────────────────┘ [margin]
/// ```
///
/// The cursor mark `_` is drawn only while the input is focused. An empty
/// query shows the placeholder dimmed.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let label = format!(" {}: ", search.kind_label);
    let cursor = if search.focused { "_" } else { "" };
    let (text, color) = if search.query.is_empty() {
        (format!("{cursor}{}", search.placeholder), &theme.colors.text_dim)
    } else {
        (format!("{}{cursor}", search.query), &theme.colors.text_normal)
    };
    let text = truncate(&text, inner_width.saturating_sub(char_width(&label)));
    let padding = inner_width.saturating_sub(char_width(&label) + char_width(&text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.accent_fg));
    print!("{label}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
