//! Recipe details renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailLine, LineStyle};

/// Left margin of the details text.
const INDENT: usize = 2;

/// Renders pre-wrapped, pre-scrolled lines from `row` down.
pub fn render_details(row: usize, lines: &[DetailLine], theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(INDENT);
    let mut current_row = row;

    for line in lines {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(INDENT));

        match line.style {
            LineStyle::Heading => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.header_fg));
            }
            LineStyle::Normal => print!("{}", Theme::fg(&theme.colors.text_normal)),
            LineStyle::Dim => print!("{}", Theme::fg(&theme.colors.text_dim)),
            LineStyle::Link => {
                print!("{}", Theme::underline());
                print!("{}", Theme::fg(&theme.colors.accent_fg));
            }
        }

        print!("{}", truncate(&line.text, width));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}
