//! Windowing math: scroll offset → first visible index, viewport extent →
//! pool size, and the platform scroll-range ceiling.
//!
//! Everything here is pure and target-independent so the core invariants
//! can be tested natively.

use crate::error::{Result, VscrollError};

/// Hard maximum pixel extent a browser will reliably scroll.
///
/// Datasets are truncated so `len × cell_extent` never exceeds this.
pub const MAX_SCROLL_EXTENT: f64 = 16_777_200.0;

/// Uniform-extent windowing along one axis (vertical or horizontal).
#[derive(Debug, Clone, Copy)]
pub struct Axis {
    cell_extent: f64,
}

impl Axis {
    /// Create an axis with the given per-cell pixel extent.
    ///
    /// # Errors
    /// Rejects non-positive or non-finite extents.
    pub fn new(cell_extent: f64) -> Result<Self> {
        if !cell_extent.is_finite() || cell_extent <= 0.0 {
            return Err(VscrollError::Config(format!(
                "cell extent must be a positive number, got {cell_extent}"
            )));
        }
        Ok(Axis { cell_extent })
    }

    /// Per-cell pixel extent.
    #[must_use]
    pub fn cell_extent(&self) -> f64 {
        self.cell_extent
    }

    /// First visible index for a scroll offset: `floor(offset / extent)`.
    ///
    /// Floor (not round) so a partially-scrolled-past cell is excluded and
    /// the next partially-visible one is included.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn first_index(&self, scroll_offset: f64) -> usize {
        let index = (scroll_offset / self.cell_extent).floor();
        if index.is_finite() && index > 0.0 {
            index as usize
        } else {
            0
        }
    }

    /// Pool size for a viewport extent: `ceil(extent / cell) + 1`, clamped
    /// to the dataset length.
    ///
    /// The `+ 1` absorbs sub-cell overscroll at the boundary so the window
    /// is never under-filled; the clamp keeps the pool from exceeding the
    /// addressable data.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pool_target(&self, viewport_extent: f64, data_len: usize) -> usize {
        let raw = (viewport_extent.max(0.0) / self.cell_extent).ceil();
        let count = if raw.is_finite() && raw > 0.0 {
            raw as usize + 1
        } else {
            1
        };
        count.min(data_len)
    }

    /// Ceiling on addressable cells along this axis:
    /// `floor(MAX_SCROLL_EXTENT / cell_extent)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn max_display_count(&self) -> usize {
        (MAX_SCROLL_EXTENT / self.cell_extent).floor() as usize
    }

    /// Scrollable content extent for `len` cells, lower-bounded by the
    /// viewport's own client extent so a small dataset never collapses the
    /// scroll area.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn content_extent(&self, len: usize, viewport_extent: f64) -> f64 {
        (len as f64 * self.cell_extent).max(viewport_extent.max(0.0))
    }

    /// Padding applied to the surface so recycled cells align with their
    /// logical position: `first_index × cell_extent`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn lead_offset(&self, first_index: usize) -> f64 {
        first_index as f64 * self.cell_extent
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn first_index_floors() {
        let axis = Axis::new(50.0).unwrap();
        assert_eq!(axis.first_index(0.0), 0);
        assert_eq!(axis.first_index(49.9), 0);
        assert_eq!(axis.first_index(50.0), 1);
        assert_eq!(axis.first_index(1234.0), 24);
    }

    #[test]
    fn pool_target_is_ceil_plus_one_clamped() {
        let axis = Axis::new(50.0).unwrap();
        assert_eq!(axis.pool_target(325.0, 1000), 8);
        assert_eq!(axis.pool_target(325.0, 3), 3);
        assert_eq!(axis.pool_target(0.0, 1000), 1);
        assert_eq!(axis.pool_target(325.0, 0), 0);
    }

    #[test]
    fn max_display_count_matches_platform_limit() {
        let axis = Axis::new(50.0).unwrap();
        assert_eq!(axis.max_display_count(), 335_544);
    }

    #[test]
    fn content_extent_never_collapses() {
        let axis = Axis::new(50.0).unwrap();
        assert_eq!(axis.content_extent(0, 600.0), 600.0);
        assert_eq!(axis.content_extent(100, 600.0), 5000.0);
    }

    #[test]
    fn rejects_bad_extents() {
        assert!(Axis::new(0.0).is_err());
        assert!(Axis::new(-5.0).is_err());
        assert!(Axis::new(f64::NAN).is_err());
    }
}
