//! Virtual list geometry and the visible-window computation.
//!
//! A [`ListLayout`] is an immutable, validated description of the virtual
//! list: item count, uniform item height, inter-row padding, viewport
//! height, buffer rows and column count. Everything else - row height,
//! content height, scroll range, item positions and the want-range that
//! drives loading/eviction - is derived arithmetic on those six numbers.
//!
//! Heights are uniform by construction, so every query here is O(1); no
//! prefix-sum index is needed.

use super::error::LayoutError;
use super::types::{ItemIndex, ItemPosition};
use std::ops::RangeInclusive;

/// Immutable description of a virtual list of fixed-size rows.
///
/// # Coordinate convention
///
/// Content coordinates grow downward from the top of the list. The scroll
/// offset is kept in `[-max_scroll, 0]`: 0 means the content top is at the
/// viewport top, negative offsets scroll the content up. `-offset` is the
/// distance scrolled past the top.
///
/// # Invariants (enforced by [`ListLayout::new`])
///
/// - `item_height > 0` and finite
/// - `padding >= 0` and finite
/// - `viewport_height` finite (non-positive is allowed and degenerate:
///   nothing is visible, the want range is empty)
/// - `columns >= 1`
#[derive(Debug, Clone, PartialEq)]
pub struct ListLayout {
    item_count: usize,
    item_height: f64,
    padding: f64,
    viewport_height: f64,
    buffer_rows: usize,
    columns: usize,
}

impl ListLayout {
    /// Build a validated layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] for a non-positive or non-finite item
    /// height, negative or non-finite padding, non-finite viewport height,
    /// or zero columns. Rejecting these at construction time keeps every
    /// later computation total.
    pub fn new(
        item_count: usize,
        item_height: f64,
        padding: f64,
        viewport_height: f64,
        buffer_rows: usize,
        columns: usize,
    ) -> Result<Self, LayoutError> {
        if !item_height.is_finite() {
            return Err(LayoutError::NonFiniteDimension {
                name: "item height",
                value: item_height,
            });
        }
        if item_height <= 0.0 {
            return Err(LayoutError::NonPositiveItemHeight(item_height));
        }
        if !padding.is_finite() {
            return Err(LayoutError::NonFiniteDimension {
                name: "padding",
                value: padding,
            });
        }
        if padding < 0.0 {
            return Err(LayoutError::NegativePadding(padding));
        }
        if !viewport_height.is_finite() {
            return Err(LayoutError::NonFiniteDimension {
                name: "viewport height",
                value: viewport_height,
            });
        }
        if columns == 0 {
            return Err(LayoutError::ZeroColumns);
        }
        Ok(Self {
            item_count,
            item_height,
            padding,
            viewport_height,
            buffer_rows,
            columns,
        })
    }

    /// Same layout with a different viewport height (terminal resize).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NonFiniteDimension`] if `viewport_height` is
    /// NaN or infinite.
    pub fn with_viewport_height(&self, viewport_height: f64) -> Result<Self, LayoutError> {
        Self::new(
            self.item_count,
            self.item_height,
            self.padding,
            viewport_height,
            self.buffer_rows,
            self.columns,
        )
    }

    /// Number of items in the virtual list.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Uniform item height.
    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    /// Padding between rows (and above the first row).
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Viewport height.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Rows preloaded beyond the strictly visible range, on each side.
    pub fn buffer_rows(&self) -> usize {
        self.buffer_rows
    }

    /// Items per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Height of one row: item height plus padding.
    pub fn row_height(&self) -> f64 {
        self.item_height + self.padding
    }

    /// Number of grid rows needed for all items.
    pub fn total_rows(&self) -> usize {
        self.item_count.div_ceil(self.columns)
    }

    /// Total content height: all rows plus the leading padding.
    pub fn content_height(&self) -> f64 {
        self.total_rows() as f64 * self.row_height() + self.padding
    }

    /// How far the content can scroll past the top.
    pub fn max_scroll(&self) -> f64 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    /// Clamp a raw scroll offset into `[-max_scroll, 0]`.
    ///
    /// Non-finite input clamps to 0 (content top) rather than propagating
    /// NaN into the window math.
    pub fn clamp_offset(&self, raw: f64) -> f64 {
        if !raw.is_finite() {
            return 0.0;
        }
        raw.clamp(-self.max_scroll(), 0.0)
    }

    /// Position of an item, derived from its index.
    pub fn item_position(&self, index: ItemIndex) -> ItemPosition {
        let row = index.get() / self.columns;
        let col = index.get() % self.columns;
        ItemPosition {
            row,
            col,
            y: row as f64 * self.row_height() + self.padding,
        }
    }

    /// First and last visible grid row at the given (clamped) offset,
    /// without buffer expansion. `None` when the layout is degenerate.
    pub fn visible_rows(&self, offset: f64) -> Option<(usize, usize)> {
        if self.item_count == 0 || self.viewport_height <= 0.0 {
            return None;
        }
        let scrolled = (-offset).max(0.0);
        let row_height = self.row_height();
        let last_row = self.total_rows().saturating_sub(1);
        let first = ((scrolled / row_height).floor() as usize).min(last_row);
        let last = (((scrolled + self.viewport_height) / row_height).ceil() as usize).min(last_row);
        Some((first, last))
    }

    /// The contiguous index range that should be tracked at the given
    /// offset: visible rows expanded by the buffer, mapped to item
    /// indices and clamped to `[0, item_count - 1]`.
    ///
    /// `None` when nothing should be tracked (empty list or non-positive
    /// viewport).
    pub fn want_range(&self, offset: f64) -> Option<RangeInclusive<usize>> {
        let (first_visible, last_visible) = self.visible_rows(offset)?;
        let start_row = first_visible.saturating_sub(self.buffer_rows);
        let end_row = (last_visible + self.buffer_rows).min(self.total_rows().saturating_sub(1));

        let start_index = start_row * self.columns;
        let end_index = ((end_row + 1) * self.columns - 1).min(self.item_count - 1);
        Some(start_index..=end_index)
    }
}
