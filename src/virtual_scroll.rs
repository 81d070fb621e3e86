//! Visible window calculation for virtual scrolling.
//!
//! The composer only needs a half-open index range. Anything that can produce
//! one implements [`VisibleRange`]: a plain `Range<usize>` measured by an
//! external virtualizer, or the built-in [`VirtualScrollState`] which assumes
//! every row has the same estimated height.

use crate::constants::{DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT};
use std::ops::Range;

/// Source of the visible index range for a list of `count` rows
pub trait VisibleRange {
    fn visible_range(&self, count: usize) -> Range<usize>;
}

impl VisibleRange for Range<usize> {
    fn visible_range(&self, count: usize) -> Range<usize> {
        let end = self.end.min(count);
        self.start.min(end)..end
    }
}

/// Fixed-row-height scroll state
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualScrollState {
    /// Current scroll offset (Y) in pixels
    pub scroll_y: f32,
    /// Visible height of the scroll container
    pub viewport_height: f32,
    /// Estimated height of every row
    pub row_height: f32,
    /// Rows rendered beyond each edge of the viewport
    pub overscan: usize,
}

impl Default for VirtualScrollState {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_ROW_HEIGHT, DEFAULT_OVERSCAN)
    }
}

impl VirtualScrollState {
    pub fn new(viewport_height: f32, row_height: f32, overscan: usize) -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height,
            row_height,
            overscan,
        }
    }

    /// Update visible height (e.g., when the container is resized)
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    /// Update scroll position, clamping to valid range
    pub fn scroll_to(&mut self, y: f32, total_rows: usize) {
        let max_scroll = (self.total_content_height(total_rows) - self.viewport_height).max(0.0);
        self.scroll_y = y.clamp(0.0, max_scroll);
    }

    /// Scroll by a delta amount
    pub fn scroll_by(&mut self, delta_y: f32, total_rows: usize) {
        self.scroll_to(self.scroll_y + delta_y, total_rows);
    }

    /// Scroll so that `row` is the first fully visible row
    pub fn scroll_to_row(&mut self, row: usize, total_rows: usize) {
        self.scroll_to(row as f32 * self.row_height, total_rows);
    }

    /// Index of the row at the top edge of the viewport
    pub fn first_visible_row(&self) -> usize {
        if self.row_height <= 0.0 {
            return 0;
        }
        (self.scroll_y / self.row_height).floor() as usize
    }

    /// Y offset of the first rendered row, for positioning the slice
    pub fn first_row_offset(&self, total_rows: usize) -> f32 {
        self.visible_range(total_rows).start as f32 * self.row_height
    }

    /// Total content height for the scrollbar
    pub fn total_content_height(&self, total_rows: usize) -> f32 {
        total_rows as f32 * self.row_height
    }

    /// Scrollbar thumb position (0.0 to 1.0)
    pub fn scrollbar_position(&self, total_rows: usize) -> f32 {
        let total_height = self.total_content_height(total_rows);
        if total_height <= self.viewport_height {
            return 0.0;
        }
        self.scroll_y / (total_height - self.viewport_height)
    }
}

impl VisibleRange for VirtualScrollState {
    fn visible_range(&self, count: usize) -> Range<usize> {
        if self.row_height <= 0.0 || count == 0 {
            return 0..0;
        }
        let first_visible = self.first_visible_row();
        let visible_count = (self.viewport_height / self.row_height).ceil() as usize + 1;

        let end = first_visible
            .saturating_add(visible_count)
            .saturating_add(self.overscan)
            .min(count);
        let start = first_visible.saturating_sub(self.overscan).min(end);
        start..end
    }
}
