//! Table component renderer.
//!
//! Renders recipes and categories as a two-column table. Recipe rows carry a
//! favorite marker in front of the name; the trailing "load more" row is drawn
//! in the accent color.

use crate::ui::helpers::{self, char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, RowKind};

/// Width of the name column, marker included.
const NAME_COLUMN: usize = 40;

/// Width of the favorite marker slot.
const MARKER_WIDTH: usize = 2;

/// Renders the column headers for `items` and returns the next row.
///
/// The labels follow the kind of the first row.
pub fn render_table_headers(row: usize, items: &[DisplayItem], theme: &Theme) -> usize {
    let (name, detail) = match items.first().map(|item| item.kind) {
        Some(RowKind::Category) => ("CATEGORY", "DESCRIPTION"),
        _ => ("RECIPE", "CATEGORY | AREA"),
    };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("  {:<width$}{detail}", name, width = NAME_COLUMN - MARKER_WIDTH);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row` and returns the row after the last.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = match item.kind {
            RowKind::LoadMore => render_load_more(current_row, item, theme, cols),
            RowKind::Recipe | RowKind::Category => render_table_row(current_row, item, theme, cols),
        };
    }
    current_row
}

fn apply_row_colors(item: &DisplayItem, theme: &Theme) {
    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
}

/// Renders one row, padded to the full width so the selection background
/// covers the whole line.
///
/// ```text
/// ♥ NAME (up to 37 chars) [padding] DETAIL [padding to fill line]
/// ```
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    apply_row_colors(item, theme);

    if item.is_favorite {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.favorite_fg));
        }
        print!("♥ ");
        apply_row_colors(item, theme);
    } else {
        print!("{}", " ".repeat(MARKER_WIDTH));
    }

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);

    let name_len = char_width(&item.name);
    print!("{}", " ".repeat((NAME_COLUMN - MARKER_WIDTH).saturating_sub(name_len)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", item.detail);

    let line_len = NAME_COLUMN.max(MARKER_WIDTH + name_len) + char_width(&item.detail);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

fn render_load_more(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
    }

    let text = format!("{}▼ {}", " ".repeat(MARKER_WIDTH), item.name);
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(char_width(&text))));
    print!("{}", Theme::reset());
    row + 1
}
