#![allow(clippy::float_cmp)]

use super::*;

fn laid_out(x: f64, y: f64) -> Viewport {
    Viewport { origin: Some(Point::new(x, y)), ..Viewport::default() }
}

// --- Point ---

#[test]
fn point_arithmetic() {
    let a = Point::new(10.0, 4.0);
    let b = Point::new(3.0, 1.0);
    assert_eq!(a.minus(b), Point::new(7.0, 3.0));
    assert_eq!(a.plus(b), Point::new(13.0, 5.0));
}

// --- defaults ---

#[test]
fn default_metrics() {
    let vp = Viewport::default();
    assert_eq!(vp.cell_size, 24.0);
    assert_eq!(vp.padding, 16.0);
    assert!(vp.origin.is_none());
}

#[test]
fn from_config_rejects_zero_cell_size() {
    let config = EditorConfig { cell_size_px: 0.0, ..EditorConfig::default() };
    assert_eq!(Viewport::from_config(&config).cell_size, 24.0);
}

#[test]
fn from_config_rejects_negative_padding() {
    let config = EditorConfig { padding_px: -4.0, ..EditorConfig::default() };
    assert_eq!(Viewport::from_config(&config).padding, 16.0);
}

// --- pixel_to_cell ---

#[test]
fn unlaid_grid_maps_to_origin_cell() {
    let vp = Viewport::default();
    assert_eq!(vp.pixel_to_cell(Point::new(500.0, 300.0)), GridPosition::new(0, 0));
}

#[test]
fn first_cell_starts_after_padding() {
    let vp = laid_out(100.0, 50.0);
    assert_eq!(vp.pixel_to_cell(Point::new(116.0, 66.0)), GridPosition::new(0, 0));
    assert_eq!(vp.pixel_to_cell(Point::new(139.999, 89.999)), GridPosition::new(0, 0));
    assert_eq!(vp.pixel_to_cell(Point::new(140.0, 90.0)), GridPosition::new(1, 1));
}

#[test]
fn pixels_inside_padding_floor_to_negative() {
    let vp = laid_out(0.0, 0.0);
    assert_eq!(vp.pixel_to_cell(Point::new(5.0, 15.9)), GridPosition::new(-1, -1));
}

#[test]
fn mapping_is_exact_over_many_cells() {
    let vp = laid_out(7.0, 3.0);
    for cx in -5..130 {
        for cy in -3..20 {
            let cell = GridPosition::new(cx, cy);
            assert_eq!(vp.pixel_to_cell(vp.cell_to_pixel(cell)), cell);
            assert_eq!(vp.pixel_to_cell(vp.cell_center(cell)), cell);
        }
    }
}

// --- cell_to_pixel ---

#[test]
fn cell_to_local_includes_padding() {
    let vp = Viewport::default();
    assert_eq!(vp.cell_to_local(GridPosition::new(2, 1)), Point::new(64.0, 40.0));
}

#[test]
fn cell_to_pixel_adds_origin() {
    let vp = laid_out(100.0, 200.0);
    assert_eq!(vp.cell_to_pixel(GridPosition::new(2, 1)), Point::new(164.0, 240.0));
}

#[test]
fn cell_center_is_half_a_cell_in() {
    let vp = laid_out(0.0, 0.0);
    assert_eq!(vp.cell_center(GridPosition::new(0, 0)), Point::new(28.0, 28.0));
}

#[test]
fn units_to_px_scales() {
    assert_eq!(Viewport::default().units_to_px(3), 72.0);
}
