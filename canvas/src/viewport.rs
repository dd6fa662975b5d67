#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::config::EditorConfig;
use crate::doc::GridPosition;

/// A point in screen (client) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn minus(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise `self + other`.
    #[must_use]
    pub fn plus(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

/// Maps between screen pixels and grid cells.
///
/// `origin` is the on-screen top-left of the grid host element. It is `None`
/// until the host has laid the grid out; every pixel then maps to cell (0, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: Option<Point>,
    pub cell_size: f64,
    pub padding: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl Viewport {
    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        let config = config.validated();
        Self { origin: None, cell_size: config.cell_size_px, padding: config.padding_px }
    }

    /// Grid cell under a screen pixel: `floor((pixel - origin - padding) / cell)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn pixel_to_cell(&self, pixel: Point) -> GridPosition {
        let Some(origin) = self.origin else {
            return GridPosition::default();
        };
        let x = ((pixel.x - origin.x - self.padding) / self.cell_size).floor();
        let y = ((pixel.y - origin.y - self.padding) / self.cell_size).floor();
        GridPosition::new(x as i32, y as i32)
    }

    /// Top-left of `cell` relative to the grid host element.
    #[must_use]
    pub fn cell_to_local(&self, cell: GridPosition) -> Point {
        Point::new(
            self.padding + f64::from(cell.x) * self.cell_size,
            self.padding + f64::from(cell.y) * self.cell_size,
        )
    }

    /// Top-left of `cell` in screen pixels. Without an origin the host
    /// element is assumed to sit at (0, 0).
    #[must_use]
    pub fn cell_to_pixel(&self, cell: GridPosition) -> Point {
        let origin = self.origin.unwrap_or(Point::new(0.0, 0.0));
        self.cell_to_local(cell).plus(origin)
    }

    /// Screen pixel at the middle of `cell`.
    #[must_use]
    pub fn cell_center(&self, cell: GridPosition) -> Point {
        let half = self.cell_size / 2.0;
        self.cell_to_pixel(cell).plus(Point::new(half, half))
    }

    /// Convert a grid-unit length to pixels.
    #[must_use]
    pub fn units_to_px(&self, units: i32) -> f64 {
        f64::from(units) * self.cell_size
    }
}
