//! Editor configuration: the pixel metrics the host lays the grid out with.

use crate::consts::{CELL_SIZE_PX, GRID_PADDING_PX, HANDLE_RADIUS_PX};

/// Pixel metrics shared by coordinate mapping, hit-testing, and rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Pixels per grid unit.
    pub cell_size_px: f64,
    /// Inset between the grid host's top-left corner and cell (0, 0).
    pub padding_px: f64,
    /// Half extent of a corner resize handle.
    pub handle_radius_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { cell_size_px: CELL_SIZE_PX, padding_px: GRID_PADDING_PX, handle_radius_px: HANDLE_RADIUS_PX }
    }
}

impl EditorConfig {
    /// Replace non-finite or non-positive metrics with their defaults.
    ///
    /// A zero cell size would turn every pointer sample into an infinite cell.
    #[must_use]
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        Self {
            cell_size_px: positive_or(self.cell_size_px, defaults.cell_size_px),
            padding_px: if self.padding_px.is_finite() && self.padding_px >= 0.0 {
                self.padding_px
            } else {
                defaults.padding_px
            },
            handle_radius_px: positive_or(self.handle_radius_px, defaults.handle_radius_px),
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}
