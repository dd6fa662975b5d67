//! Shared numeric constants for the canvas crate.

// ── Grid ────────────────────────────────────────────────────────

/// Pixels per grid unit on screen.
pub const CELL_SIZE_PX: f64 = 24.0;

/// Inset between the grid host's top-left corner and cell (0, 0), in pixels.
pub const GRID_PADDING_PX: f64 = 16.0;

/// Standard coach width in grid units (24 m at 0.2 m per unit).
pub const DEFAULT_COACH_WIDTH: i32 = 120;

/// Standard coach height in grid units (2.8 m at 0.2 m per unit).
pub const DEFAULT_COACH_HEIGHT: i32 = 14;

// ── Elements ────────────────────────────────────────────────────

/// Side length of a newly spawned palette element, in grid units.
pub const SPAWN_SIZE: i32 = 2;

/// Smallest width or height a gesture may commit.
pub const MIN_ELEMENT_SIZE: i32 = 1;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space half extent of a corner resize handle, in pixels.
pub const HANDLE_RADIUS_PX: f64 = 6.0;
