//! Message component renderer.
//!
//! Shown in place of a list while a panel is loading, came back empty, or
//! failed. Failures use the theme's error color.

use crate::ui::helpers::{char_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message starting at `row`.
///
/// ```text
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let message = truncate(&empty.message, cols);
    let msg_len = char_width(&message);
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;
    let color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    if empty.subtitle.is_empty() {
        return;
    }

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = char_width(&subtitle);
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}
