//! Document model: the coach layout, its placed elements, and pure mutators.
//!
//! A [`LayoutDocument`] is never edited in place. Every operation here takes a
//! document by reference and returns a new value, which the editing session
//! swaps in wholesale. Readers holding the previous value keep seeing a
//! complete, consistent layout.
//!
//! Deserialization never rejects a field: every field has a default, values
//! are coerced by the `lenient` readers, and unknown keys are kept in
//! `extra` so a parse/serialize round trip does not drop data the editor does
//! not understand.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog;
use crate::consts::{DEFAULT_COACH_HEIGHT, DEFAULT_COACH_WIDTH};
use crate::geometry::Footprint;
use crate::lenient;
use crate::orientation::Orientation;

/// Identifier of a placed element, unique within one document.
pub type ElementId = String;

/// Integer grid coordinate (top-left anchor for elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn square(side: i32) -> Self {
        Self { width: side, height: side }
    }
}

/// Bounding box of the whole coach deck in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridExtent {
    pub width: i32,
    pub height: i32,
}

/// One element placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedElement {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: ElementId,
    /// Element type code; open-ended, see [`crate::catalog`].
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: String,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default, deserialize_with = "lenient::int")]
    pub x: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub y: i32,
    /// Explicit footprint; `None` defers to [`catalog::default_size`].
    #[serde(default, deserialize_with = "lenient::opt_size", skip_serializing_if = "Option::is_none")]
    pub size: Option<GridSize>,
    /// Printed seat number; only meaningful for seat-like codes.
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<String>,
    /// Capability tags such as `"WINDOW"` or `"POWER_SOCKET"`.
    #[serde(default, deserialize_with = "lenient::opt_tags", skip_serializing_if = "Option::is_none")]
    pub place_properties: Option<Vec<String>>,
    /// CSS color override.
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Opacity override in `[0, 1]`.
    #[serde(default, deserialize_with = "lenient::opt_float", skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Keys this editor does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlacedElement {
    /// Create an element with no optional fields set.
    #[must_use]
    pub fn new(id: impl Into<ElementId>, code: impl Into<String>, position: GridPosition) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            orientation: Orientation::default(),
            x: position.x,
            y: position.y,
            size: None,
            seat_number: None,
            place_properties: None,
            color: None,
            opacity: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.size = Some(GridSize::new(width, height));
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_seat_number(mut self, number: impl Into<String>) -> Self {
        self.seat_number = Some(number.into());
        self
    }

    #[must_use]
    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.x, self.y)
    }

    /// Explicit size, or the catalog default for this code.
    #[must_use]
    pub fn effective_size(&self) -> GridSize {
        self.size.unwrap_or_else(|| catalog::default_size(&self.code))
    }

    /// Grid-space bounding box.
    #[must_use]
    pub fn footprint(&self) -> Footprint {
        let size = self.effective_size();
        Footprint::new(self.x, self.y, size.width, size.height)
    }
}

/// Schema version and timestamps carried alongside the layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetadata {
    #[serde(default, deserialize_with = "lenient::text")]
    pub version: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub updated_at: String,
}

/// A whole coach deck layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_width", deserialize_with = "lenient::deck_width")]
    pub width: i32,
    #[serde(default = "default_height", deserialize_with = "lenient::deck_height")]
    pub height: i32,
    /// Placed elements. Earlier entries win when footprints overlap at lookup time.
    #[serde(deserialize_with = "lenient::elements")]
    pub elements: Vec<PlacedElement>,
    #[serde(default, deserialize_with = "lenient::opt_metadata", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LayoutMetadata>,
    /// Keys this editor does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_width() -> i32 {
    DEFAULT_COACH_WIDTH
}

fn default_height() -> i32 {
    DEFAULT_COACH_HEIGHT
}

impl LayoutDocument {
    /// Create an empty layout of the given extent.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            width,
            height,
            elements: Vec::new(),
            metadata: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn extent(&self) -> GridExtent {
        GridExtent { width: self.width, height: self.height }
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&PlacedElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    /// The first element, in document order, whose footprint covers `cell`.
    #[must_use]
    pub fn element_at(&self, cell: GridPosition) -> Option<&PlacedElement> {
        self.elements.iter().find(|el| el.footprint().contains(cell))
    }

    /// Grid cell at the middle of the deck, where new palette elements spawn.
    #[must_use]
    pub fn center(&self) -> GridPosition {
        GridPosition::new(self.width / 2, self.height / 2)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// =============================================================================
// PATCHES
// =============================================================================

/// Sparse update for a placed element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub id: Option<ElementId>,
    pub orientation: Option<Orientation>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub size: Option<GridSize>,
    pub seat_number: Option<String>,
    pub place_properties: Option<Vec<String>>,
    pub color: Option<String>,
    pub opacity: Option<f64>,
}

impl ElementPatch {
    /// Patch that moves an element.
    #[must_use]
    pub fn position(x: i32, y: i32) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    /// Patch that moves and resizes an element.
    #[must_use]
    pub fn footprint(fp: Footprint) -> Self {
        Self {
            x: Some(fp.x),
            y: Some(fp.y),
            size: Some(GridSize::new(fp.width, fp.height)),
            ..Default::default()
        }
    }

    fn apply(&self, el: &mut PlacedElement) {
        if let Some(ref id) = self.id {
            el.id.clone_from(id);
        }
        if let Some(o) = self.orientation {
            el.orientation = o;
        }
        if let Some(x) = self.x {
            el.x = x;
        }
        if let Some(y) = self.y {
            el.y = y;
        }
        if let Some(size) = self.size {
            el.size = Some(size);
        }
        if let Some(ref number) = self.seat_number {
            el.seat_number = Some(number.clone());
        }
        if let Some(ref props) = self.place_properties {
            el.place_properties = Some(props.clone());
        }
        if let Some(ref color) = self.color {
            el.color = Some(color.clone());
        }
        if let Some(opacity) = self.opacity {
            el.opacity = Some(opacity);
        }
    }
}

/// A single property-form edit.
///
/// Field edits are trusted input: they bypass collision and bounds checks.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementField {
    Id(ElementId),
    Orientation(Orientation),
    X(i32),
    Y(i32),
    Width(i32),
    Height(i32),
    SeatNumber(String),
    PlaceProperties(Vec<String>),
    Color(String),
    Opacity(f64),
}

/// Error returned by [`ElementField::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown element field `{0}`")]
    UnknownField(String),
    #[error("invalid value `{value}` for field `{field}`")]
    InvalidValue { field: &'static str, value: String },
}

impl ElementField {
    /// Parse a form edit from its serialized field name and raw text.
    ///
    /// Orientation accepts degrees or a legacy label. Place properties are a
    /// comma-separated list.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownField`] for unrecognized names and
    /// [`FieldError::InvalidValue`] when a numeric field does not parse.
    pub fn parse(field: &str, raw: &str) -> Result<Self, FieldError> {
        let raw = raw.trim();
        match field {
            "id" => Ok(Self::Id(raw.to_owned())),
            "orientation" => Ok(Self::Orientation(match raw.parse::<i32>() {
                Ok(deg) => Orientation::new(deg),
                Err(_) => Orientation::from_legacy(raw),
            })),
            "x" => parse_int("x", raw).map(Self::X),
            "y" => parse_int("y", raw).map(Self::Y),
            "width" => parse_int("width", raw).map(Self::Width),
            "height" => parse_int("height", raw).map(Self::Height),
            "seatNumber" => Ok(Self::SeatNumber(raw.to_owned())),
            "placeProperties" => Ok(Self::PlaceProperties(
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_owned)
                    .collect(),
            )),
            "color" => Ok(Self::Color(raw.to_owned())),
            "opacity" => raw
                .parse::<f64>()
                .map(Self::Opacity)
                .map_err(|_| FieldError::InvalidValue { field: "opacity", value: raw.to_owned() }),
            other => Err(FieldError::UnknownField(other.to_owned())),
        }
    }

    /// Convert into a patch against `current`. Width and height edits keep
    /// the other dimension at its effective value; a zero entry becomes 1.
    #[must_use]
    pub fn into_patch(self, current: &PlacedElement) -> ElementPatch {
        let size = current.effective_size();
        match self {
            Self::Id(id) => ElementPatch { id: Some(id), ..Default::default() },
            Self::Orientation(o) => ElementPatch { orientation: Some(o), ..Default::default() },
            Self::X(x) => ElementPatch { x: Some(x), ..Default::default() },
            Self::Y(y) => ElementPatch { y: Some(y), ..Default::default() },
            Self::Width(w) => ElementPatch {
                size: Some(GridSize::new(non_zero(w), size.height)),
                ..Default::default()
            },
            Self::Height(h) => ElementPatch {
                size: Some(GridSize::new(size.width, non_zero(h))),
                ..Default::default()
            },
            Self::SeatNumber(n) => ElementPatch { seat_number: Some(n), ..Default::default() },
            Self::PlaceProperties(p) => ElementPatch { place_properties: Some(p), ..Default::default() },
            Self::Color(c) => ElementPatch { color: Some(c), ..Default::default() },
            Self::Opacity(o) => ElementPatch { opacity: Some(o), ..Default::default() },
        }
    }
}

fn parse_int(field: &'static str, raw: &str) -> Result<i32, FieldError> {
    raw.parse::<i32>()
        .map_err(|_| FieldError::InvalidValue { field, value: raw.to_owned() })
}

fn non_zero(value: i32) -> i32 {
    if value == 0 { 1 } else { value }
}

// =============================================================================
// MUTATORS
// =============================================================================

/// Append an element. No placement checks: the caller picks the spot.
#[must_use]
pub fn add_element(doc: &LayoutDocument, element: PlacedElement) -> LayoutDocument {
    let mut next = doc.clone();
    next.elements.push(element);
    next
}

/// Apply `patch` to the element with `id`. An absent id yields an unchanged copy.
#[must_use]
pub fn update_element(doc: &LayoutDocument, id: &str, patch: &ElementPatch) -> LayoutDocument {
    let mut next = doc.clone();
    if let Some(el) = next.elements.iter_mut().find(|el| el.id == id) {
        patch.apply(el);
    }
    next
}

/// Drop the element with `id`.
#[must_use]
pub fn remove_element(doc: &LayoutDocument, id: &str) -> LayoutDocument {
    let mut next = doc.clone();
    next.elements.retain(|el| el.id != id);
    next
}

/// Move the element with `id` to a new top-left cell.
#[must_use]
pub fn move_element(doc: &LayoutDocument, id: &str, to: GridPosition) -> LayoutDocument {
    update_element(doc, id, &ElementPatch::position(to.x, to.y))
}

/// Replace the footprint of the element with `id`.
#[must_use]
pub fn resize_element(doc: &LayoutDocument, id: &str, fp: Footprint) -> LayoutDocument {
    update_element(doc, id, &ElementPatch::footprint(fp))
}

// =============================================================================
// TEMPLATE
// =============================================================================

/// The built-in "Standard Coach" layout a session starts from.
///
/// `timestamp` is stamped into both metadata timestamps; the host supplies it
/// so this function stays deterministic.
#[must_use]
pub fn default_layout(timestamp: &str) -> LayoutDocument {
    let mut doc = LayoutDocument::new("default-coach", "Standard Coach", DEFAULT_COACH_WIDTH, DEFAULT_COACH_HEIGHT);
    doc.description = Some("A standard coach layout with basic elements".to_owned());
    doc.elements = vec![
        PlacedElement::new("seat-1", "SEAT", GridPosition::new(10, 5))
            .with_orientation(Orientation::RIGHT)
            .with_size(3, 3)
            .with_seat_number("1A"),
        PlacedElement::new("seat-2", "SEAT", GridPosition::new(10, 9))
            .with_orientation(Orientation::LEFT)
            .with_size(3, 3)
            .with_seat_number("1B"),
        PlacedElement::new("table-1", "TABLE", GridPosition::new(15, 7))
            .with_orientation(Orientation::from_legacy("top"))
            .with_size(4, 2),
        PlacedElement::new("door-1", "ENTRY_EXIT", GridPosition::new(5, 7))
            .with_orientation(Orientation::from_legacy("Right"))
            .with_size(2, 4),
        PlacedElement::new("door-2", "ENTRY_EXIT", GridPosition::new(115, 7))
            .with_orientation(Orientation::from_legacy("Left"))
            .with_size(2, 4),
    ];
    doc.metadata = Some(LayoutMetadata {
        version: "1.0.0".to_owned(),
        created_at: timestamp.to_owned(),
        updated_at: timestamp.to_owned(),
    });
    doc
}
