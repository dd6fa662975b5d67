//! Headless command implementations.
//!
//! Every command takes layout text and returns the text to print, so they can
//! run (and be tested) without a terminal. Gesture commands replay synthetic
//! pointer events through [`EngineCore`] rather than calling the geometry
//! functions directly, so they obey exactly the rules the browser does.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::io::{self, Read};
use std::path::Path;

use canvas::catalog;
use canvas::config::EditorConfig;
use canvas::doc::{self, ElementField, FieldError, GridPosition, LayoutDocument, PlacedElement};
use canvas::engine::{Action, EngineCore};
use canvas::geometry::{self, PlacementError, Violation};
use canvas::hit::{self, ResizeHandle};
use canvas::input::Button;
use canvas::sync::{self, SyncError};
use canvas::viewport::Point;
use serde_json::json;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("input is empty")]
    EmptyInput,
    #[error("invalid layout: {0}")]
    Sync(#[from] SyncError),
    #[error("invalid edit: {0}")]
    Field(#[from] FieldError),
    #[error("no element with id `{0}`")]
    UnknownElement(String),
    #[error("element `{0}` is fully covered by earlier elements and cannot be grabbed")]
    NotGrabbable(String),
    #[error("{count} placement problem(s) found")]
    Violations { count: usize },
    #[error("gesture rejected: {0}")]
    Rejected(#[from] PlacementError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a layout file, or stdin for `-`.
///
/// # Errors
///
/// [`CliError::Read`] when the file or stdin cannot be read.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    let label = path.display().to_string();
    let read_err = |source| CliError::Read { path: label.clone(), source };
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(read_err)?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(read_err)
}

/// Parse layout text; blank input is an error here, unlike in the editor.
///
/// # Errors
///
/// [`CliError::EmptyInput`] or [`CliError::Sync`].
pub fn parse_layout(text: &str) -> Result<LayoutDocument, CliError> {
    sync::text_to_structured(text)?.ok_or(CliError::EmptyInput)
}

/// The built-in template, stamped with `timestamp`.
#[must_use]
pub fn template(timestamp: &str) -> String {
    sync::structured_to_text(&doc::default_layout(timestamp))
}

/// Re-emit a layout in canonical form.
///
/// # Errors
///
/// See [`parse_layout`].
pub fn fmt(text: &str) -> Result<String, CliError> {
    Ok(sync::structured_to_text(&parse_layout(text)?))
}

/// Placement problems in a layout, in document order.
///
/// # Errors
///
/// See [`parse_layout`].
pub fn check(text: &str) -> Result<Vec<Violation>, CliError> {
    let layout = parse_layout(text)?;
    let violations = geometry::audit(&layout);
    debug!(elements = layout.len(), violations = violations.len(), "layout checked");
    Ok(violations)
}

/// Catalog listing, optionally filtered, as a table or JSON.
///
/// # Errors
///
/// [`CliError::Json`] if JSON encoding fails.
pub fn catalog_listing(search: Option<&str>, as_json: bool) -> Result<String, CliError> {
    let entries = match search {
        Some(term) => catalog::search(term),
        None => catalog::all().collect(),
    };

    if as_json {
        let rows: Vec<_> = entries
            .iter()
            .map(|d| {
                let size = catalog::default_size(d.code);
                json!({
                    "code": d.code,
                    "name": d.name,
                    "icon": d.icon,
                    "category": d.category,
                    "defaultSize": { "width": size.width, "height": size.height },
                    "orientations": d.orientations.iter().map(|o| o.degrees()).collect::<Vec<_>>(),
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let rows: Vec<String> = entries
        .iter()
        .map(|d| {
            let size = catalog::default_size(d.code);
            let orientations = d.orientations.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            format!(
                "{:<22} {:<26} {:<10} {}x{}  {}",
                d.code, d.name, d.category, size.width, size.height, orientations
            )
        })
        .collect();
    Ok(rows.join("\n"))
}

// =============================================================================
// GESTURE REPLAY
// =============================================================================

/// An engine with the grid host laid out at the screen origin.
fn replay_session(layout: LayoutDocument, config: EditorConfig) -> EngineCore {
    let mut core = EngineCore::with_config(layout, config);
    core.set_grid_origin(Some(Point::new(0.0, 0.0)));
    core
}

fn committed(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::LayoutChanged(_)))
}

/// First cell of the element's footprint where a press would grab it.
fn grab_cell(layout: &LayoutDocument, id: &str) -> Option<GridPosition> {
    let fp = layout.element(id)?.footprint();
    (fp.y..fp.bottom())
        .flat_map(|y| (fp.x..fp.right()).map(move |x| GridPosition::new(x, y)))
        .find(|cell| layout.element_at(*cell).is_some_and(|el| el.id == id))
}

/// Press on element `id`, release over `to`, and return the resulting text.
///
/// # Errors
///
/// [`CliError::UnknownElement`], [`CliError::NotGrabbable`], or
/// [`CliError::Rejected`] when the drop collides.
pub fn drag(text: &str, id: &str, to: GridPosition, config: EditorConfig) -> Result<String, CliError> {
    let layout = parse_layout(text)?;
    if !layout.contains(id) {
        return Err(CliError::UnknownElement(id.to_owned()));
    }
    let grab = grab_cell(&layout, id).ok_or_else(|| CliError::NotGrabbable(id.to_owned()))?;
    let before = layout.clone();

    let mut core = replay_session(layout, config);
    let press = core.viewport.cell_center(grab);
    let release = core.viewport.cell_center(to);
    core.on_pointer_down(press, Button::Primary);
    core.on_pointer_move(release);
    let actions = core.on_pointer_up(release, Button::Primary);

    if !committed(&actions) {
        return Err(match geometry::place_dragged(&before, id, to) {
            Err(reason) => reason.into(),
            Ok(_) => CliError::NotGrabbable(id.to_owned()),
        });
    }
    info!(%id, x = to.x, y = to.y, "drag replayed");
    Ok(core.text().to_owned())
}

/// Press on `handle` of element `id`, move to `to`, release, and return the
/// resulting text. A resize that clamps to no change is not an error.
///
/// # Errors
///
/// [`CliError::UnknownElement`] or [`CliError::Rejected`] when the candidate
/// collides.
pub fn resize(
    text: &str,
    id: &str,
    handle: ResizeHandle,
    to: GridPosition,
    config: EditorConfig,
) -> Result<String, CliError> {
    let layout = parse_layout(text)?;
    let start = layout
        .element(id)
        .map(PlacedElement::footprint)
        .ok_or_else(|| CliError::UnknownElement(id.to_owned()))?;
    geometry::place_resized(&layout, id, handle, start, to)?;

    let mut core = replay_session(layout, config);
    core.select_element(Some(id));
    let press = hit::handle_center(handle, &start, &core.viewport);
    let pointer = core.viewport.cell_center(to);
    core.on_pointer_down(press, Button::Primary);
    core.on_pointer_move(pointer);
    core.on_pointer_up(pointer, Button::Primary);

    info!(%id, %handle, x = to.x, y = to.y, "resize replayed");
    Ok(core.text().to_owned())
}

/// Apply one property-form edit and return the resulting text.
///
/// # Errors
///
/// [`CliError::Field`] for a bad field or value, [`CliError::UnknownElement`]
/// when `id` is absent.
pub fn set_field(text: &str, id: &str, field: &str, value: &str) -> Result<String, CliError> {
    let field = ElementField::parse(field, value)?;
    let mut core = EngineCore::new(parse_layout(text)?);
    if core.update_element_field(id, field).is_empty() {
        return Err(CliError::UnknownElement(id.to_owned()));
    }
    Ok(core.text().to_owned())
}
