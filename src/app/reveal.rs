//! Incremental reveal of long recipe lists.
//!
//! Lists are shown a page at a time. The page size depends on the pane width
//! through a breakpoint table, and "load more" grows the visible count by one
//! page for the current width. The visible count restarts from a fresh first
//! page whenever the displayed list is replaced.

use crate::domain::error::{MealdeckError, Result};

/// Width-keyed page sizes: `(min_width, count)` pairs sorted by width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoints {
    entries: Vec<(usize, usize)>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new([(0, 6), (64, 9), (77, 18), (102, 15), (128, 18)])
    }
}

impl Breakpoints {
    /// Builds a table from `(min_width, count)` pairs in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mealdeck::app::reveal::Breakpoints;
    ///
    /// let bps = Breakpoints::new([(1024, 15), (0, 6), (640, 9)]);
    /// assert_eq!(bps.page_size(700), 9);
    /// ```
    pub fn new(entries: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut entries: Vec<(usize, usize)> = entries.into_iter().collect();
        entries.sort_by_key(|&(width, _)| width);
        entries.dedup_by_key(|&mut (width, _)| width);
        Self { entries }
    }

    /// Parses `"0:6,64:9,102:15"`.
    ///
    /// # Errors
    ///
    /// Returns [`MealdeckError::Config`] on a malformed pair or an empty table.
    pub fn parse(raw: &str) -> Result<Self> {
        let entries = raw
            .split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (width, count) = pair
                    .split_once(':')
                    .ok_or_else(|| MealdeckError::Config(format!("breakpoint without ':': {pair}")))?;
                let width = width
                    .trim()
                    .parse()
                    .map_err(|e| MealdeckError::Config(format!("bad breakpoint width {width}: {e}")))?;
                let count = count
                    .trim()
                    .parse()
                    .map_err(|e| MealdeckError::Config(format!("bad breakpoint count {count}: {e}")))?;
                Ok((width, count))
            })
            .collect::<Result<Vec<_>>>()?;

        if entries.is_empty() {
            return Err(MealdeckError::Config("empty breakpoint table".to_string()));
        }
        Ok(Self::new(entries))
    }

    /// Count for the largest threshold not above `width`, falling back to the
    /// smallest threshold's count.
    #[must_use]
    pub fn page_size(&self, width: usize) -> usize {
        self.entries
            .iter()
            .rev()
            .find(|&&(min_width, _)| min_width <= width)
            .or_else(|| self.entries.first())
            .map_or(0, |&(_, count)| count)
    }
}

/// First page size for a list of `total` items. Unknown width shows nothing.
#[must_use]
pub fn compute_initial_visible(total: usize, width: Option<usize>, bps: &Breakpoints) -> usize {
    width.map_or(0, |width| bps.page_size(width).min(total))
}

/// Grows `current` by one page, capped at `total`.
#[must_use]
pub fn reveal_more(current: usize, total: usize, width: Option<usize>, bps: &Breakpoints) -> usize {
    match width {
        Some(width) => current.saturating_add(bps.page_size(width)).min(total),
        None => current.min(total),
    }
}

/// Visible slice bookkeeping for the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    breakpoints: Breakpoints,
    total: usize,
    visible: usize,
}

impl RevealState {
    #[must_use]
    pub const fn new(breakpoints: Breakpoints) -> Self {
        Self {
            breakpoints,
            total: 0,
            visible: 0,
        }
    }

    /// Restarts from a fresh first page for a new list of `total` items.
    pub fn reset(&mut self, total: usize, width: Option<usize>) {
        self.total = total;
        self.visible = compute_initial_visible(total, width, &self.breakpoints);
        tracing::trace!(total, visible = self.visible, "reveal reset");
    }

    /// Reveals one more page. Returns `true` if anything new became visible.
    pub fn more(&mut self, width: Option<usize>) -> bool {
        let next = reveal_more(self.visible, self.total, width, &self.breakpoints);
        let grew = next > self.visible;
        self.visible = next;
        grew
    }

    #[must_use]
    pub const fn visible(&self) -> usize {
        self.visible
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.total - self.visible
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.visible < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_table() -> Breakpoints {
        Breakpoints::new([(0, 6), (640, 9), (1024, 15)])
    }

    #[test]
    fn largest_threshold_not_above_width_wins() {
        assert_eq!(compute_initial_visible(20, Some(700), &pixel_table()), 9);
        assert_eq!(compute_initial_visible(20, Some(1024), &pixel_table()), 15);
        assert_eq!(compute_initial_visible(20, Some(10), &pixel_table()), 6);
    }

    #[test]
    fn smallest_count_is_the_fallback_below_every_threshold() {
        let bps = Breakpoints::new([(40, 4), (80, 8)]);
        assert_eq!(bps.page_size(10), 4);
    }

    #[test]
    fn initial_visible_is_capped_and_zero_without_width() {
        assert_eq!(compute_initial_visible(3, Some(700), &pixel_table()), 3);
        assert_eq!(compute_initial_visible(20, None, &pixel_table()), 0);
        assert_eq!(compute_initial_visible(0, Some(700), &pixel_table()), 0);
    }

    #[test]
    fn reveal_more_never_exceeds_total() {
        let bps = pixel_table();
        for total in [0, 1, 5, 9, 10, 31] {
            for width in [None, Some(0), Some(700), Some(2000)] {
                let mut visible = compute_initial_visible(total, width, &bps);
                for _ in 0..6 {
                    visible = reveal_more(visible, total, width, &bps);
                    assert!(visible <= total);
                }
            }
        }
    }

    #[test]
    fn state_steps_by_one_page_until_exhausted() {
        let mut reveal = RevealState::new(pixel_table());
        reveal.reset(20, Some(700));
        assert_eq!((reveal.visible(), reveal.remaining()), (9, 11));

        assert!(reveal.more(Some(700)));
        assert_eq!(reveal.visible(), 18);
        assert!(reveal.more(Some(700)));
        assert_eq!(reveal.visible(), 20);
        assert!(!reveal.has_more());
        assert!(!reveal.more(Some(700)));
    }

    #[test]
    fn reset_discards_previous_progress() {
        let mut reveal = RevealState::new(pixel_table());
        reveal.reset(40, Some(2000));
        reveal.more(Some(2000));
        assert_eq!(reveal.visible(), 30);

        reveal.reset(40, Some(2000));
        assert_eq!(reveal.visible(), 15);
    }

    #[test]
    fn empty_list_offers_no_reveal() {
        let mut reveal = RevealState::new(pixel_table());
        reveal.reset(0, Some(700));
        assert!(!reveal.has_more());
        assert_eq!(reveal.remaining(), 0);
    }

    #[test]
    fn parse_accepts_config_syntax() {
        let bps = Breakpoints::parse("0:6, 64:9,128:18").unwrap();
        assert_eq!(bps.page_size(100), 9);
        assert!(Breakpoints::parse("64-9").is_err());
        assert!(Breakpoints::parse("").is_err());
    }

    #[test]
    fn default_table_is_column_scaled() {
        let bps = Breakpoints::default();
        assert_eq!(bps.page_size(70), 9);
        assert_eq!(bps.page_size(110), 15);
        assert_eq!(bps.page_size(200), 18);
    }
}
