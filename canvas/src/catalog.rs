//! Static registry of the element types the palette can place.
//!
//! Entries are grouped into categories for display. Every query that can miss
//! (an unknown code read from an imported file) has an explicit fallback so
//! callers never need to handle absence themselves.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::consts::SPAWN_SIZE;
use crate::doc::GridSize;
use crate::orientation::Orientation;

/// Icon identifier used when a code has no catalog entry.
pub const UNKNOWN_ICON: &str = "unknown";

/// One placeable element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementTypeDescriptor {
    /// Code stored in documents, e.g. `"SEAT"`.
    pub code: &'static str,
    /// Human-readable name shown in the palette.
    pub name: &'static str,
    /// Icon identifier resolved by the presentation layer.
    pub icon: &'static str,
    /// Orientations that make sense for this code; the first is the default.
    pub orientations: &'static [Orientation],
    /// Id of the owning category.
    pub category: &'static str,
}

/// A named group of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub elements: &'static [ElementTypeDescriptor],
}

const FOUR_WAY_LR: &[Orientation] = &[Orientation::RIGHT, Orientation::LEFT, Orientation::UP, Orientation::DOWN];
const FOUR_WAY_DOOR: &[Orientation] = &[Orientation::LEFT, Orientation::UP, Orientation::RIGHT, Orientation::DOWN];
const LEFT_RIGHT: &[Orientation] = &[Orientation::LEFT, Orientation::RIGHT];
const RIGHT_LEFT: &[Orientation] = &[Orientation::RIGHT, Orientation::LEFT];
const UP_DOWN: &[Orientation] = &[Orientation::UP, Orientation::DOWN];
const DOWN_UP: &[Orientation] = &[Orientation::DOWN, Orientation::UP];
const FIXED: &[Orientation] = &[Orientation::RIGHT];

const fn entry(
    code: &'static str,
    name: &'static str,
    icon: &'static str,
    orientations: &'static [Orientation],
    category: &'static str,
) -> ElementTypeDescriptor {
    ElementTypeDescriptor { code, name, icon, orientations, category }
}

const SEATS: &[ElementTypeDescriptor] = &[
    entry("SEAT", "Seat", "Armchair", FOUR_WAY_LR, "seats"),
    entry("BERTH", "Berth", "Bed", LEFT_RIGHT, "seats"),
    entry("COUCHETTE", "Couchette", "Bed", RIGHT_LEFT, "seats"),
    entry("WHEELCHAIR_SPACE", "Wheelchair Space", "Wheelchair", FIXED, "seats"),
];

const TABLES: &[ElementTypeDescriptor] = &[
    entry("TABLE", "Table", "Table", UP_DOWN, "tables"),
    entry("BIG_TABLE", "Big Table", "Table", UP_DOWN, "tables"),
];

const WALLS: &[ElementTypeDescriptor] = &[
    entry("WALL_LEFT_2", "Small Wall Left", "Square", DOWN_UP, "walls"),
    entry("WALL_RIGHT_2", "Small Wall Right", "Square", DOWN_UP, "walls"),
    entry("WALL_COMPARTMENTS_2", "Compartment Wall", "Square", DOWN_UP, "walls"),
    entry("WALL_END_TO_END", "End-to-End Wall", "Square", &[Orientation::UP], "walls"),
];

const DOORS: &[ElementTypeDescriptor] = &[
    entry("DOOR_OPENING_LEFT", "Door Left", "DoorOpen", FOUR_WAY_DOOR, "doors"),
    entry("DOOR_OPENING_RIGHT", "Door Right", "DoorOpen", FOUR_WAY_DOOR, "doors"),
    entry("SLIDING_DOOR", "Sliding Door", "DoorOpen", FOUR_WAY_DOOR, "doors"),
    entry("ENTRY_EXIT", "Entry/Exit", "DoorOpen", FOUR_WAY_DOOR, "doors"),
];

const SERVICES: &[ElementTypeDescriptor] = &[
    entry("TOILET_AREA", "Toilet", "Wc", FIXED, "services"),
    entry("LUGGAGE_AREA", "Luggage Area", "Luggage", FIXED, "services"),
    entry("BICYCLE_AREA", "Bicycle Area", "Bike", FIXED, "services"),
    entry("FIRST_CLASS_AREA", "First Class", "Star", FIXED, "services"),
    entry("SECOND_CLASS_AREA", "Second Class", "Star", FIXED, "services"),
    entry("WIFI_AREA", "WiFi Area", "Wifi", FIXED, "services"),
];

const CATEGORIES: &[ElementCategory] = &[
    ElementCategory { id: "seats", name: "Seats & Places", elements: SEATS },
    ElementCategory { id: "tables", name: "Tables", elements: TABLES },
    ElementCategory { id: "walls", name: "Walls", elements: WALLS },
    ElementCategory { id: "doors", name: "Doors", elements: DOORS },
    ElementCategory { id: "services", name: "Service Areas", elements: SERVICES },
];

/// Explicit default footprints, consulted before the catalog-wide fallback.
const DEFAULT_SIZES: &[(&str, GridSize)] = &[
    ("SEAT", GridSize { width: 3, height: 3 }),
    ("TABLE", GridSize { width: 4, height: 2 }),
    ("ENTRY_EXIT", GridSize { width: 2, height: 4 }),
    ("TOILET_AREA", GridSize { width: 3, height: 3 }),
    ("LUGGAGE_AREA", GridSize { width: 4, height: 3 }),
    ("STAIR_UPWARDS_AREA", GridSize { width: 3, height: 4 }),
];

/// All categories in palette order.
#[must_use]
pub fn categories() -> &'static [ElementCategory] {
    CATEGORIES
}

/// Every descriptor, flattened in palette order.
pub fn all() -> impl Iterator<Item = &'static ElementTypeDescriptor> {
    CATEGORIES.iter().flat_map(|c| c.elements.iter())
}

/// Find the descriptor for `code`.
#[must_use]
pub fn lookup_by_code(code: &str) -> Option<&'static ElementTypeDescriptor> {
    all().find(|d| d.code == code)
}

/// First listed orientation for `code`, or [`Orientation::RIGHT`] for unknown codes.
#[must_use]
pub fn default_orientation(code: &str) -> Orientation {
    lookup_by_code(code)
        .and_then(|d| d.orientations.first().copied())
        .unwrap_or(Orientation::RIGHT)
}

/// Footprint used when an element carries no explicit size.
///
/// Fallback order: the per-code table, then the palette spawn size for any
/// other catalog code, then 1×1 for codes the catalog does not know.
#[must_use]
pub fn default_size(code: &str) -> GridSize {
    if let Some((_, size)) = DEFAULT_SIZES.iter().find(|(known, _)| *known == code) {
        return *size;
    }
    if lookup_by_code(code).is_some() {
        return GridSize::square(SPAWN_SIZE);
    }
    GridSize::square(1)
}

/// Icon identifier for `code`, or [`UNKNOWN_ICON`].
#[must_use]
pub fn icon(code: &str) -> &'static str {
    lookup_by_code(code).map_or(UNKNOWN_ICON, |d| d.icon)
}

/// Case-insensitive substring search on name or code, in palette order.
#[must_use]
pub fn search(term: &str) -> Vec<&'static ElementTypeDescriptor> {
    let needle = term.trim().to_lowercase();
    all()
        .filter(|d| d.name.to_lowercase().contains(&needle) || d.code.to_lowercase().contains(&needle))
        .collect()
}

/// Fill colour for elements of `code` that carry no `color` override.
#[must_use]
pub fn fill_color(code: &str) -> &'static str {
    match code {
        "SEAT" => "#3b82f6",
        "TABLE" => "#f59e0b",
        "ENTRY_EXIT" => "#bef264",
        "TOILET_AREA" => "#a855f7",
        "LUGGAGE_AREA" => "#6b7280",
        "STAIR_UPWARDS_AREA" => "#f97316",
        _ => "#9ca3af",
    }
}
