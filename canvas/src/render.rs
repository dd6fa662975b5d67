//! Rendering: draws the grid, placed elements, and selection UI to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the engine and produces pixels; it does
//! not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::catalog;
use crate::doc::{GridPosition, PlacedElement};
use crate::engine::EngineCore;
use crate::hit::{self, ResizeHandle};
use crate::viewport::{Point, Viewport};

const GRID_LINE: &str = "#e5e5e5";
const DECK_BORDER: &str = "#d4d4d4";
const SELECTION: &str = "#1E90FF";
const HANDLE_STROKE: &str = "#9ca3af";
const LABEL: &str = "#ffffff";
const BORDER_DASH_PX: f64 = 6.0;

/// Opacity of an element's in-place copy while it is being dragged.
const DRAG_SOURCE_ALPHA: f64 = 0.5;
/// Opacity of the detached drag preview.
const DRAG_PREVIEW_ALPHA: f64 = 0.8;

/// Draw the full scene: grid, elements, selection UI, and drag preview.
///
/// `width` and `height` are the canvas size in pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore, width: f64, height: f64) -> Result<(), JsValue> {
    let layout = core.layout();
    let vp = &core.viewport;

    // Layer 1: clear.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, width, height);

    // Layer 2: grid.
    draw_grid(ctx, vp, layout.width, layout.height)?;

    // Layer 3: elements in document order.
    let dragged = core.drag_preview().map(|(id, _)| id);
    for el in &layout.elements {
        let alpha = element_alpha(el, dragged == Some(el.id.as_str()));
        draw_element(ctx, el, vp, vp.cell_to_local(el.position()), alpha)?;
    }

    // Layer 4: selection UI.
    if let Some(el) = core.selected_element() {
        draw_selection(ctx, el, vp, core.config.handle_radius_px);
    }

    // Layer 5: drag preview, unsnapped.
    if let Some((id, top_left)) = core.drag_preview()
        && let Some(el) = layout.element(id)
    {
        let local = top_left.minus(vp.origin.unwrap_or(Point::new(0.0, 0.0)));
        draw_element(ctx, el, vp, local, DRAG_PREVIEW_ALPHA)?;
    }

    Ok(())
}

// =============================================================
// Grid
// =============================================================

fn draw_grid(ctx: &CanvasRenderingContext2d, vp: &Viewport, cols: i32, rows: i32) -> Result<(), JsValue> {
    let origin = vp.cell_to_local(GridPosition::default());
    let w = vp.units_to_px(cols);
    let h = vp.units_to_px(rows);

    ctx.save();
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(origin.x, origin.y, w, h);

    ctx.set_stroke_style_str(GRID_LINE);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    for col in 1..cols {
        let x = origin.x + vp.units_to_px(col);
        ctx.move_to(x, origin.y);
        ctx.line_to(x, origin.y + h);
    }
    for row in 1..rows {
        let y = origin.y + vp.units_to_px(row);
        ctx.move_to(origin.x, y);
        ctx.line_to(origin.x + w, y);
    }
    ctx.stroke();

    let dash = js_sys::Array::new();
    dash.push(&BORDER_DASH_PX.into());
    dash.push(&BORDER_DASH_PX.into());
    ctx.set_line_dash(&dash)?;
    ctx.set_stroke_style_str(DECK_BORDER);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(origin.x, origin.y, w, h);
    ctx.set_line_dash(&js_sys::Array::new())?;

    ctx.restore();
    Ok(())
}

// =============================================================
// Elements
// =============================================================

fn draw_element(
    ctx: &CanvasRenderingContext2d,
    el: &PlacedElement,
    vp: &Viewport,
    top_left: Point,
    alpha: f64,
) -> Result<(), JsValue> {
    let size = el.effective_size();
    let w = vp.units_to_px(size.width);
    let h = vp.units_to_px(size.height);

    ctx.save();
    ctx.set_global_alpha(alpha);
    ctx.set_fill_style_str(element_fill(el));
    ctx.fill_rect(top_left.x, top_left.y, w, h);

    // Orientation arrow, rotated with the element's content.
    ctx.set_fill_style_str(LABEL);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{}px sans-serif", (vp.cell_size * 0.6).round()));
    ctx.save();
    ctx.translate(top_left.x + w / 2.0, top_left.y + h / 2.0)?;
    ctx.rotate(f64::from(el.orientation.content_rotation()).to_radians())?;
    ctx.fill_text(&el.orientation.arrow(), 0.0, 0.0)?;
    ctx.restore();

    if let Some(label) = seat_label(el) {
        ctx.set_text_align("right");
        ctx.set_text_baseline("top");
        ctx.set_font(&format!("bold {}px sans-serif", (vp.cell_size * 0.45).round()));
        ctx.fill_text(label, top_left.x + w - 2.0, top_left.y + 2.0)?;
    }

    ctx.restore();
    Ok(())
}

/// Explicit `color` override, else the per-code palette colour.
fn element_fill(el: &PlacedElement) -> &str {
    el.color.as_deref().filter(|c| !c.trim().is_empty()).unwrap_or_else(|| catalog::fill_color(&el.code))
}

/// Opacity override clamped to `[0, 1]`, halved for the in-place copy of a
/// dragged element.
fn element_alpha(el: &PlacedElement, dragged: bool) -> f64 {
    let base = el.opacity.filter(|o| o.is_finite()).map_or(1.0, |o| o.clamp(0.0, 1.0));
    if dragged { base * DRAG_SOURCE_ALPHA } else { base }
}

/// Seat number badge text, if any.
fn seat_label(el: &PlacedElement) -> Option<&str> {
    el.seat_number.as_deref().map(str::trim).filter(|n| !n.is_empty())
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, el: &PlacedElement, vp: &Viewport, radius: f64) {
    let fp = el.footprint();
    let top_left = vp.cell_to_local(fp.position());

    ctx.save();
    ctx.set_stroke_style_str(SELECTION);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(
        top_left.x - 1.0,
        top_left.y - 1.0,
        vp.units_to_px(fp.width) + 2.0,
        vp.units_to_px(fp.height) + 2.0,
    );

    ctx.set_fill_style_str("#fff");
    ctx.set_stroke_style_str(HANDLE_STROKE);
    ctx.set_line_width(1.0);
    let local = Viewport { origin: None, ..*vp };
    for handle in ResizeHandle::ALL {
        let c = hit::handle_center(handle, &fp, &local);
        ctx.fill_rect(c.x - radius, c.y - radius, radius * 2.0, radius * 2.0);
        ctx.stroke_rect(c.x - radius, c.y - radius, radius * 2.0, radius * 2.0);
    }
    ctx.restore();
}
