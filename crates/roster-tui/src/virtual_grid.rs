//! Windowed layout for the card grid.
//!
//! The grid is a column of fixed-height rows. Only rows that intersect the
//! viewport, plus `overscan` rows on each side, are realized; the scrollable
//! height always accounts for every row. All units are terminal lines.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Cards drawn while the first page is pending.
pub const SKELETON_CARDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: usize,
    pub card_height: u16,
    pub gap: u16,
    pub overscan: usize,
    /// Distance from the bottom, in lines, that triggers the next page.
    pub load_threshold: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            card_height: 8,
            gap: 1,
            overscan: 2,
            load_threshold: 4,
        }
    }
}

/// One realized row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualRow {
    pub index: usize,
    /// Item indices shown in this row.
    pub items: Range<usize>,
    /// Offset of the row from the top of the scrollable content.
    pub top: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualGrid {
    cfg: GridConfig,
}

impl VirtualGrid {
    /// Degenerate values are clamped so the layout never divides by zero.
    pub fn new(cfg: GridConfig) -> Self {
        Self {
            cfg: GridConfig {
                columns: cfg.columns.max(1),
                card_height: cfg.card_height.max(1),
                ..cfg
            },
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.cfg
    }

    pub fn columns(&self) -> usize {
        self.cfg.columns
    }

    /// Height of a row including the gap below it.
    pub fn row_size(&self) -> usize {
        usize::from(self.cfg.card_height) + usize::from(self.cfg.gap)
    }

    pub fn row_count(&self, len: usize) -> usize {
        len.div_ceil(self.cfg.columns)
    }

    pub fn total_height(&self, len: usize) -> usize {
        self.row_count(len) * self.row_size()
    }

    pub fn row_of(&self, item: usize) -> usize {
        item / self.cfg.columns
    }

    /// Rows to realize for the given scroll position, overscan included.
    pub fn visible_rows(&self, len: usize, scroll_top: usize, viewport: usize) -> Range<usize> {
        let rows = self.row_count(len);
        if rows == 0 {
            return 0..0;
        }
        let size = self.row_size();
        let first = scroll_top / size;
        let last = (scroll_top + viewport).div_ceil(size);
        let start = first.saturating_sub(self.cfg.overscan).min(rows);
        let end = last.saturating_add(self.cfg.overscan).min(rows);
        start..end.max(start)
    }

    pub fn realize(&self, len: usize, scroll_top: usize, viewport: usize) -> Vec<VirtualRow> {
        let cols = self.cfg.columns;
        self.visible_rows(len, scroll_top, viewport)
            .map(|index| VirtualRow {
                index,
                items: index * cols..(index * cols + cols).min(len),
                top: index * self.row_size(),
            })
            .collect()
    }

    pub fn max_scroll(&self, len: usize, viewport: usize) -> usize {
        self.total_height(len).saturating_sub(viewport)
    }

    pub fn clamp_scroll(&self, len: usize, scroll_top: usize, viewport: usize) -> usize {
        scroll_top.min(self.max_scroll(len, viewport))
    }

    /// Viewport line for the "loading more" row, directly under the last card.
    ///
    /// At the end of the scroll range that line is the gap below the last row,
    /// or the bottom line of the viewport when there is no gap.
    pub fn loader_line(&self, len: usize, scroll_top: usize, viewport: usize) -> Option<usize> {
        if len == 0 || viewport == 0 {
            return None;
        }
        let cards_end = self.total_height(len) - usize::from(self.cfg.gap);
        let line = cards_end.checked_sub(scroll_top)?;
        match line.cmp(&viewport) {
            std::cmp::Ordering::Less => Some(line),
            std::cmp::Ordering::Equal => Some(viewport - 1),
            std::cmp::Ordering::Greater => None,
        }
    }

    /// Smallest scroll change that brings the row of `item` fully into view.
    pub fn scroll_to_item(
        &self,
        item: usize,
        scroll_top: usize,
        viewport: usize,
    ) -> usize {
        let top = self.row_of(item) * self.row_size();
        let bottom = top + usize::from(self.cfg.card_height);
        if top < scroll_top {
            top
        } else if bottom > scroll_top + viewport {
            bottom.saturating_sub(viewport)
        } else {
            scroll_top
        }
    }

    /// Infinite-scroll trigger, evaluated on every scroll input.
    pub fn should_load_more(
        &self,
        scroll_height: usize,
        scroll_top: usize,
        client_height: usize,
        has_more: bool,
        pending: bool,
    ) -> bool {
        if !has_more || pending {
            return false;
        }
        let remaining = scroll_height as i64 - scroll_top as i64 - client_height as i64;
        remaining < i64::from(self.cfg.load_threshold)
    }
}

impl Default for VirtualGrid {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_height_counts_every_row() {
        let grid = VirtualGrid::default();
        assert_eq!(grid.row_count(0), 0);
        assert_eq!(grid.row_count(7), 3);
        assert_eq!(grid.total_height(7), 3 * 9);
        assert_eq!(grid.total_height(300), 100 * 9);
    }

    #[test]
    fn realized_rows_cover_viewport_plus_overscan() {
        let grid = VirtualGrid::default();
        // 100 rows; viewport shows rows 10..=13 (lines 90..126).
        let rows = grid.visible_rows(300, 90, 36);
        assert_eq!(rows, 8..16);

        let realized = grid.realize(300, 90, 36);
        assert_eq!(realized.len(), 8);
        assert_eq!(realized[0].top, 8 * 9);
        assert_eq!(realized[0].items, 24..27);
    }

    #[test]
    fn overscan_is_clamped_at_the_edges() {
        let grid = VirtualGrid::default();
        assert_eq!(grid.visible_rows(30, 0, 20), 0..5);
        assert_eq!(grid.visible_rows(30, 70, 20), 5..10);
        assert_eq!(grid.visible_rows(0, 0, 20), 0..0);
    }

    #[test]
    fn last_row_may_be_partial() {
        let grid = VirtualGrid::default();
        let rows = grid.realize(7, 0, 40);
        let last = rows.last().unwrap();
        assert_eq!(last.index, 2);
        assert_eq!(last.items, 6..7);
    }

    #[test]
    fn load_trigger_respects_threshold_and_flags() {
        let grid = VirtualGrid::default();
        // 3 remaining lines < threshold 4
        assert!(grid.should_load_more(100, 57, 40, true, false));
        // 4 remaining lines is not below the threshold
        assert!(!grid.should_load_more(100, 56, 40, true, false));
        assert!(!grid.should_load_more(100, 60, 40, false, false));
        assert!(!grid.should_load_more(100, 60, 40, true, true));
        // content shorter than the viewport
        assert!(grid.should_load_more(18, 0, 40, true, false));
    }

    #[test]
    fn scroll_follows_selection() {
        let grid = VirtualGrid::default();
        // item 12 sits on row 4: lines 36..44
        assert_eq!(grid.scroll_to_item(12, 0, 20), 24);
        assert_eq!(grid.scroll_to_item(0, 24, 20), 0);
        assert_eq!(grid.scroll_to_item(9, 24, 20), 24);
    }

    #[test]
    fn loader_stays_visible_at_the_end_of_the_scroll_range() {
        let grid = VirtualGrid::default();
        // 25 items: 9 rows, 81 lines, cards end at line 80.
        let bottom = grid.clamp_scroll(25, usize::MAX, 37);
        assert_eq!(bottom, 44);
        assert_eq!(grid.loader_line(25, bottom, 37), Some(36));
        // Mid-scroll the last row is out of view.
        assert_eq!(grid.loader_line(25, 10, 37), None);
        // Short content: right below the last card.
        assert_eq!(grid.loader_line(5, 0, 37), Some(17));
        assert_eq!(grid.loader_line(0, 0, 37), None);

        let flush = VirtualGrid::new(GridConfig {
            gap: 0,
            ..GridConfig::default()
        });
        let bottom = flush.clamp_scroll(25, usize::MAX, 37);
        assert_eq!(flush.loader_line(25, bottom, 37), Some(36));
    }

    #[test]
    fn zero_columns_are_clamped() {
        let grid = VirtualGrid::new(GridConfig {
            columns: 0,
            ..GridConfig::default()
        });
        assert_eq!(grid.columns(), 1);
        assert_eq!(grid.row_count(4), 4);
    }
}
