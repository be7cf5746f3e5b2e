//! Header component renderer.
//!
//! Draws the centered title and, below it, the dimmed status line with the
//! search kind, sort order and favorites count.

use crate::ui::helpers::{char_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar and status line. Returns the row after both.
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding]
/// [left padding] Search: Name  Sort: Sort by...  Favorites: 2 [right padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = char_width(&title);
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{title}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    let status = truncate(&header.status_line, cols);
    let status_len = char_width(&status);
    let padding = (cols.saturating_sub(status_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{status}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + status_len)));
    print!("{}", Theme::reset());

    row + 2
}
