//! Shared rendering utilities and helpers.
//!
//! Low-level text handling used across components: cursor positioning, match
//! highlighting with correct ANSI restoration, and character-based truncation
//! and wrapping. All widths are counted in characters, not bytes, since recipe
//! names routinely carry accented letters.
//!
//! # Example
//!
//! ```rust
//! use mealdeck::ui::helpers::{truncate, wrap_text};
//!
//! assert_eq!(truncate("Beef Wellington", 8), "Beef ...");
//! assert_eq!(wrap_text("Boil the pasta", 8), vec!["Boil the", "pasta"]);
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if char_width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut cut: String = text.chars().take(max - 3).collect();
    cut.push_str("...");
    cut
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are split. Blank input yields no lines.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        if line_width > 0 && line_width + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line_width += word.len();
        line.extend(word);
    }

    if line_width > 0 {
        lines.push(line);
    }
    lines
}

/// Renders text with highlighted character ranges.
///
/// Ranges are `(start, end)` character indices, end exclusive, and may run past
/// the end of `text` after truncation. Highlighting is skipped on the selected
/// row so the selection colors stay intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Crème brûlée", 20), "Crème brûlée");
        assert_eq!(truncate("Crème brûlée", 8), "Crème...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn wrap_breaks_on_words() {
        let lines = wrap_text("Preheat the oven to 180C and grease a tin", 16);
        assert_eq!(lines, vec!["Preheat the oven", "to 180C and", "grease a tin"]);
        assert!(lines.iter().all(|line| char_width(line) <= 16));
    }

    #[test]
    fn wrap_splits_overlong_words() {
        assert_eq!(wrap_text("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
        assert!(wrap_text("   ", 10).is_empty());
    }
}
