use std::rc::Rc;

use tracing::{debug, warn};
use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use crate::catalog;
use crate::config::EditorConfig;
use crate::consts::SPAWN_SIZE;
use crate::doc::{self, ElementField, ElementId, GridPosition, LayoutDocument, PlacedElement};
use crate::geometry::{self, Footprint};
use crate::hit::{self, HitPart, ResizeHandle};
use crate::input::{Button, GestureState, UiState};
use crate::render;
use crate::sync::{DocumentSync, TextOutcome};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The document was replaced.
    LayoutChanged(Rc<LayoutDocument>),
    /// The text view was re-derived from the document.
    TextChanged(String),
    /// The sync error was set or cleared.
    ErrorChanged(Option<String>),
    SelectionChanged(Option<ElementId>),
    ElementCreated(ElementId),
    SetCursor(String),
    /// Route all pointer events to the grid until [`Action::ReleasePointer`].
    CapturePointer,
    ReleasePointer,
    RenderNeeded,
}

/// Cursor shown over empty grid.
const DEFAULT_CURSOR: &str = "default";
/// Cursor shown over an element body.
const MOVE_CURSOR: &str = "move";

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    sync: DocumentSync,
    pub ui: UiState,
    pub gesture: GestureState,
    pub viewport: Viewport,
    pub config: EditorConfig,
}

impl EngineCore {
    #[must_use]
    pub fn new(layout: LayoutDocument) -> Self {
        Self::with_config(layout, EditorConfig::default())
    }

    #[must_use]
    pub fn with_config(layout: LayoutDocument, config: EditorConfig) -> Self {
        let config = config.validated();
        Self {
            sync: DocumentSync::new(layout),
            ui: UiState::default(),
            gesture: GestureState::Idle,
            viewport: Viewport::from_config(&config),
            config,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn layout(&self) -> &Rc<LayoutDocument> {
        self.sync.layout()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.sync.text()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.sync.error()
    }

    /// The currently selected element id, if any. May name an element that
    /// no longer exists.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    /// The selected element, when the selection resolves.
    #[must_use]
    pub fn selected_element(&self) -> Option<&PlacedElement> {
        self.selection().and_then(|id| self.layout().element(id))
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&PlacedElement> {
        self.layout().element(id)
    }

    /// Dragged element and the unsnapped screen pixel its top-left follows.
    #[must_use]
    pub fn drag_preview(&self) -> Option<(&str, Point)> {
        match &self.gesture {
            GestureState::Dragging { id, grab_offset, pointer } => Some((id.as_str(), pointer.minus(*grab_offset))),
            _ => None,
        }
    }

    // --- Intents ---

    /// Select an element, or clear the selection with `None`.
    pub fn select_element(&mut self, id: Option<&str>) -> Vec<Action> {
        if self.selection() == id {
            return Vec::new();
        }
        self.ui.selected_id = id.map(str::to_owned);
        vec![Action::SelectionChanged(self.ui.selected_id.clone()), Action::RenderNeeded]
    }

    /// Place a new element of `code` at `at`, or at the deck centre.
    ///
    /// No placement check: the spawn spot may overlap until the user drags
    /// the element somewhere free.
    pub fn create_element_at(&mut self, code: &str, at: Option<GridPosition>) -> Vec<Action> {
        let id = format!("element-{}", Uuid::new_v4());
        let position = at.unwrap_or_else(|| self.layout().center());
        let element = PlacedElement::new(id.clone(), code, position)
            .with_orientation(catalog::default_orientation(code))
            .with_size(SPAWN_SIZE, SPAWN_SIZE);
        debug!(%id, code, x = position.x, y = position.y, "element created");
        let next = doc::add_element(self.layout(), element);
        let mut actions = self.commit(next);
        actions.push(Action::ElementCreated(id));
        actions
    }

    /// Remove an element, clearing the selection if it pointed at it.
    pub fn delete_element(&mut self, id: &str) -> Vec<Action> {
        if !self.layout().contains(id) {
            return Vec::new();
        }
        let next = doc::remove_element(self.layout(), id);
        let mut actions = self.commit(next);
        if self.gesture.target() == Some(id) {
            debug!(%id, gesture = self.gesture.label(), "gesture target deleted");
            self.gesture = GestureState::Idle;
            actions.push(Action::ReleasePointer);
        }
        if self.selection() == Some(id) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged(None));
        }
        debug!(%id, "element deleted");
        actions
    }

    /// Apply one property-form edit. Not placement-checked.
    pub fn update_element_field(&mut self, id: &str, field: ElementField) -> Vec<Action> {
        let Some(current) = self.element(id) else {
            return Vec::new();
        };
        let patch = field.into_patch(current);
        let next = doc::update_element(self.layout(), id, &patch);
        let mut actions = self.commit(next);
        if let Some(new_id) = patch.id
            && self.selection() == Some(id)
            && new_id != id
        {
            self.ui.selected_id = Some(new_id.clone());
            actions.push(Action::SelectionChanged(Some(new_id)));
        }
        actions
    }

    /// Take user-edited text; the document follows only if it parses.
    pub fn set_text(&mut self, text: &str) -> Vec<Action> {
        let had_error = self.error().is_some();
        match self.sync.set_text(text) {
            TextOutcome::Ignored => Vec::new(),
            TextOutcome::Applied => {
                let mut actions = vec![Action::LayoutChanged(Rc::clone(self.layout()))];
                if had_error {
                    actions.push(Action::ErrorChanged(None));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            TextOutcome::Rejected(e) => vec![Action::ErrorChanged(Some(e.to_string()))],
        }
    }

    /// Replace the whole document, e.g. after an import.
    pub fn load_layout(&mut self, layout: LayoutDocument) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.gesture.is_idle() {
            debug!(gesture = self.gesture.label(), "gesture aborted by layout load");
            self.gesture = GestureState::Idle;
            actions.push(Action::ReleasePointer);
        }
        actions.extend(self.commit(layout));
        actions
    }

    // --- Pointer input ---

    /// Record where the grid host sits on screen; `None` until laid out.
    pub fn set_grid_origin(&mut self, origin: Option<Point>) {
        self.viewport.origin = origin;
    }

    pub fn on_pointer_down(&mut self, pixel: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.gesture.is_idle() {
            return Vec::new();
        }
        let Some(hit) = hit::hit_test(
            pixel,
            self.layout(),
            &self.viewport,
            self.selection(),
            self.config.handle_radius_px,
        ) else {
            return Vec::new();
        };
        let Some(start) = self.element(&hit.element_id).map(PlacedElement::footprint) else {
            return Vec::new();
        };

        match hit.part {
            HitPart::ResizeHandle(handle) => {
                debug!(id = %hit.element_id, %handle, "resize start");
                self.gesture = GestureState::Resizing { id: hit.element_id, handle, start, pointer: pixel };
                let mut actions = vec![Action::CapturePointer];
                actions.extend(self.set_cursor(handle.cursor()));
                actions
            }
            HitPart::Body => {
                let grab_offset = pixel.minus(self.viewport.cell_to_pixel(start.position()));
                debug!(id = %hit.element_id, "drag start");
                let mut actions = self.select_element(Some(&hit.element_id));
                self.gesture = GestureState::Dragging { id: hit.element_id, grab_offset, pointer: pixel };
                actions.push(Action::CapturePointer);
                actions.extend(self.set_cursor(MOVE_CURSOR));
                actions
            }
        }
    }

    pub fn on_pointer_move(&mut self, pixel: Point) -> Vec<Action> {
        if self.gesture.is_idle() {
            let cursor = self.hover_cursor(pixel);
            return self.set_cursor(cursor);
        }
        let resize = match &mut self.gesture {
            GestureState::Idle => None,
            GestureState::Dragging { pointer, .. } => {
                *pointer = pixel;
                None
            }
            GestureState::Resizing { id, handle, start, pointer } => {
                *pointer = pixel;
                Some((id.clone(), *handle, *start))
            }
        };
        match resize {
            Some((id, handle, start)) => {
                let cell = self.viewport.pixel_to_cell(pixel);
                self.try_resize(&id, handle, start, cell)
            }
            None => vec![Action::RenderNeeded],
        }
    }

    pub fn on_pointer_up(&mut self, pixel: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.finish_gesture(pixel)
    }

    /// The host lost the pointer (`pointercancel`, `lostpointercapture`).
    /// Ends any gesture as a release at the last known position.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        match self.gesture.pointer() {
            Some(last) => self.finish_gesture(last),
            None => Vec::new(),
        }
    }

    // --- Internals ---

    fn finish_gesture(&mut self, pixel: Point) -> Vec<Action> {
        let gesture = std::mem::take(&mut self.gesture);
        let mut actions = match gesture {
            GestureState::Idle => return Vec::new(),
            GestureState::Dragging { id, .. } => {
                let cell = self.viewport.pixel_to_cell(pixel);
                match geometry::place_dragged(self.layout(), &id, cell) {
                    Ok(next) => {
                        debug!(%id, x = cell.x, y = cell.y, "drag committed");
                        self.commit(next)
                    }
                    Err(e) => {
                        debug!(%id, error = %e, "drag rejected");
                        vec![Action::RenderNeeded]
                    }
                }
            }
            GestureState::Resizing { id, .. } => {
                debug!(%id, "resize end");
                Vec::new()
            }
        };
        actions.push(Action::ReleasePointer);
        let cursor = self.hover_cursor(pixel);
        actions.extend(self.set_cursor(cursor));
        actions
    }

    fn try_resize(&mut self, id: &str, handle: ResizeHandle, start: Footprint, cell: GridPosition) -> Vec<Action> {
        match geometry::place_resized(self.layout(), id, handle, start, cell) {
            Ok(next) if next == **self.layout() => Vec::new(),
            Ok(next) => self.commit(next),
            Err(e) => {
                debug!(%id, error = %e, "resize rejected");
                Vec::new()
            }
        }
    }

    /// Swap in a structured edit and re-derive the text.
    fn commit(&mut self, next: LayoutDocument) -> Vec<Action> {
        let had_error = self.error().is_some();
        let layout = self.sync.commit(next);
        let mut actions = vec![Action::LayoutChanged(layout), Action::TextChanged(self.text().to_owned())];
        if had_error {
            actions.push(Action::ErrorChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn hover_cursor(&self, pixel: Point) -> &'static str {
        match hit::hit_test(pixel, self.layout(), &self.viewport, self.selection(), self.config.handle_radius_px) {
            Some(h) => match h.part {
                HitPart::ResizeHandle(handle) => handle.cursor(),
                HitPart::Body => MOVE_CURSOR,
            },
            None => DEFAULT_CURSOR,
        }
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Vec<Action> {
        if self.ui.cursor == Some(cursor) {
            return Vec::new();
        }
        self.ui.cursor = Some(cursor);
        vec![Action::SetCursor(cursor.to_owned())]
    }
}

// =============================================================================
// BROWSER HOST
// =============================================================================

/// Pointer capture held for the length of a gesture; released on drop.
struct PointerCapture {
    element: Element,
    pointer_id: i32,
}

impl PointerCapture {
    fn acquire(element: Element, pointer_id: i32) -> Option<Self> {
        match element.set_pointer_capture(pointer_id) {
            Ok(()) => Some(Self { element, pointer_id }),
            Err(e) => {
                warn!(pointer_id, error = ?e, "set_pointer_capture failed");
                None
            }
        }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        if let Err(e) = self.element.release_pointer_capture(self.pointer_id) {
            warn!(pointer_id = self.pointer_id, error = ?e, "release_pointer_capture failed");
        }
    }
}

/// The full editor engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    capture: Option<PointerCapture>,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine on `canvas`, starting from the built-in template
    /// stamped with the current time.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: EditorConfig) -> Self {
        let now = String::from(js_sys::Date::new_0().to_iso_string());
        Self::with_layout(canvas, doc::default_layout(&now), config)
    }

    #[must_use]
    pub fn with_layout(canvas: HtmlCanvasElement, layout: LayoutDocument, config: EditorConfig) -> Self {
        Self { canvas, capture: None, core: EngineCore::with_config(layout, config) }
    }

    // --- Delegated intents ---

    pub fn select_element(&mut self, id: Option<&str>) -> Vec<Action> {
        self.core.select_element(id)
    }

    pub fn create_element_at(&mut self, code: &str, at: Option<GridPosition>) -> Vec<Action> {
        self.core.create_element_at(code, at)
    }

    pub fn delete_element(&mut self, id: &str) -> Vec<Action> {
        let actions = self.core.delete_element(id);
        self.apply_capture(&actions, None);
        actions
    }

    pub fn update_element_field(&mut self, id: &str, field: ElementField) -> Vec<Action> {
        self.core.update_element_field(id, field)
    }

    pub fn set_text(&mut self, text: &str) -> Vec<Action> {
        self.core.set_text(text)
    }

    pub fn load_layout(&mut self, layout: LayoutDocument) -> Vec<Action> {
        let actions = self.core.load_layout(layout);
        self.apply_capture(&actions, None);
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pointer_id: i32, client: Point, button: Button) -> Vec<Action> {
        self.refresh_origin();
        let actions = self.core.on_pointer_down(client, button);
        self.apply_capture(&actions, Some(pointer_id));
        actions
    }

    pub fn on_pointer_move(&mut self, client: Point) -> Vec<Action> {
        self.core.on_pointer_move(client)
    }

    pub fn on_pointer_up(&mut self, client: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_up(client, button);
        self.apply_capture(&actions, None);
        actions
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_cancel();
        self.capture = None;
        actions
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        render::draw(&ctx, &self.core, width, height)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn layout(&self) -> &Rc<LayoutDocument> {
        self.core.layout()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.core.selection()
    }

    // --- Internals ---

    fn refresh_origin(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.core.set_grid_origin(Some(Point::new(rect.left(), rect.top())));
    }

    fn apply_capture(&mut self, actions: &[Action], pointer_id: Option<i32>) {
        for action in actions {
            match action {
                Action::CapturePointer => {
                    if let Some(id) = pointer_id {
                        self.capture = PointerCapture::acquire(self.canvas.clone().into(), id);
                    }
                }
                Action::ReleasePointer => self.capture = None,
                _ => {}
            }
        }
    }
}
