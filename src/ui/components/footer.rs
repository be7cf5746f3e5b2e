//! Footer component renderer.

use crate::ui::helpers::{char_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Separator between hints in the keybinding string.
const HINT_SEPARATOR: &str = "  ";

/// Renders the keybinding hints centered at `row`.
///
/// Hints look like `key: description`; the key part is drawn in the accent
/// color. When the hints do not fit the line is cut and drawn dim.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let text_len = char_width(&footer.keybindings);
    position_cursor(row, 1);

    if text_len > cols {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", truncate(&footer.keybindings, cols));
        print!("{}", Theme::reset());
        return row + 1;
    }

    let padding = (cols - text_len) / 2;
    print!("{}", " ".repeat(padding));
    for (i, hint) in footer.keybindings.split(HINT_SEPARATOR).enumerate() {
        if i > 0 {
            print!("{}", HINT_SEPARATOR);
        }
        match hint.split_once(':') {
            Some((key, description)) => {
                print!("{}{key}", Theme::fg(&theme.colors.accent_fg));
                print!("{}:{description}", Theme::fg(&theme.colors.text_dim));
            }
            None => print!("{}{hint}", Theme::fg(&theme.colors.text_dim)),
        }
    }
    print!("{}", " ".repeat(cols - padding - text_len));
    print!("{}", Theme::reset());
    row + 1
}
