//! Grid geometry: footprints, overlap, and the placement rules gestures obey.
//!
//! Drag and resize gestures only ever commit through [`place_dragged`] and
//! [`place_resized`]. Both clamp the candidate into the deck, then reject it
//! if it overlaps any other element. Rejection leaves the document untouched.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;

use crate::consts::MIN_ELEMENT_SIZE;
use crate::doc::{self, ElementId, GridExtent, GridPosition, GridSize, LayoutDocument, PlacedElement};
use crate::hit::ResizeHandle;

/// Axis-aligned box in grid units. `x`/`y` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Footprint {
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    #[must_use]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Half-open box intersection. Touching edges do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Footprint) -> bool {
        !(other.x >= self.right() || other.right() <= self.x || other.y >= self.bottom() || other.bottom() <= self.y)
    }

    #[must_use]
    pub fn contains(&self, cell: GridPosition) -> bool {
        cell.x >= self.x && cell.x < self.right() && cell.y >= self.y && cell.y < self.bottom()
    }

    /// True when the box lies entirely inside `[0, W) x [0, H)`.
    #[must_use]
    pub fn within(&self, extent: GridExtent) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= extent.width && self.bottom() <= extent.height
    }
}

/// Why a candidate placement was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("no element with id `{0}`")]
    UnknownElement(ElementId),
    #[error("placement overlaps element `{with}`")]
    Collision { with: ElementId },
    #[error("size {width}x{height} is below the 1x1 minimum")]
    BelowMinimumSize { width: i32, height: i32 },
}

// =============================================================================
// CLAMPING
// =============================================================================

/// Clamp a drag target so an element of `size` stays inside the deck.
///
/// When the element is larger than the deck the lower bound wins and the
/// element pins to 0.
#[must_use]
pub fn clamp_drag_target(cell: GridPosition, size: GridSize, extent: GridExtent) -> GridPosition {
    GridPosition::new(
        cell.x.min(extent.width.saturating_sub(size.width)).max(0),
        cell.y.min(extent.height.saturating_sub(size.height)).max(0),
    )
}

/// Footprint a resize handle produces when dragged `(dx, dy)` cells from its
/// start position. Dimensions floor at the minimum size.
#[must_use]
pub fn resize_candidate(handle: ResizeHandle, start: Footprint, dx: i32, dy: i32) -> Footprint {
    let mut c = start;
    match handle {
        ResizeHandle::Se => {
            c.width = start.width.saturating_add(dx);
            c.height = start.height.saturating_add(dy);
        }
        ResizeHandle::Sw => {
            c.x = start.x.saturating_add(dx);
            c.width = start.width.saturating_sub(dx);
            c.height = start.height.saturating_add(dy);
        }
        ResizeHandle::Ne => {
            c.y = start.y.saturating_add(dy);
            c.width = start.width.saturating_add(dx);
            c.height = start.height.saturating_sub(dy);
        }
        ResizeHandle::Nw => {
            c.x = start.x.saturating_add(dx);
            c.y = start.y.saturating_add(dy);
            c.width = start.width.saturating_sub(dx);
            c.height = start.height.saturating_sub(dy);
        }
    }
    c.width = c.width.max(MIN_ELEMENT_SIZE);
    c.height = c.height.max(MIN_ELEMENT_SIZE);
    c
}

/// Clamp a resize candidate: position into `[0, W-1] x [0, H-1]`, then
/// dimensions so the box ends at the deck edge.
#[must_use]
pub fn clamp_resize(candidate: Footprint, extent: GridExtent) -> Footprint {
    let x = candidate.x.min(extent.width.saturating_sub(1)).max(0);
    let y = candidate.y.min(extent.height.saturating_sub(1)).max(0);
    Footprint {
        x,
        y,
        width: candidate.width.min(extent.width.saturating_sub(x)),
        height: candidate.height.min(extent.height.saturating_sub(y)),
    }
}

// =============================================================================
// COLLISION
// =============================================================================

/// First element overlapping `candidate`, skipping the element the mutators
/// treat as `id` (the first with that id). Later duplicates of `id` still
/// collide.
#[must_use]
pub fn find_collision<'a>(doc: &'a LayoutDocument, id: &str, candidate: &Footprint) -> Option<&'a PlacedElement> {
    let moving = doc.elements.iter().position(|el| el.id == id);
    doc.elements
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != moving)
        .map(|(_, el)| el)
        .find(|el| el.footprint().overlaps(candidate))
}

/// Validate a candidate footprint for element `id`.
///
/// # Errors
///
/// [`PlacementError::BelowMinimumSize`] for degenerate boxes and
/// [`PlacementError::Collision`] when another element overlaps.
pub fn check_placement(doc: &LayoutDocument, id: &str, candidate: &Footprint) -> Result<(), PlacementError> {
    if candidate.width < MIN_ELEMENT_SIZE || candidate.height < MIN_ELEMENT_SIZE {
        return Err(PlacementError::BelowMinimumSize { width: candidate.width, height: candidate.height });
    }
    match find_collision(doc, id, candidate) {
        Some(other) => Err(PlacementError::Collision { with: other.id.clone() }),
        None => Ok(()),
    }
}

// =============================================================================
// GESTURE COMMITS
// =============================================================================

/// Commit a drag of element `id` whose top-left lands on `cell`.
///
/// # Errors
///
/// [`PlacementError::UnknownElement`] if `id` is absent, otherwise whatever
/// [`check_placement`] reports for the clamped target.
pub fn place_dragged(doc: &LayoutDocument, id: &str, cell: GridPosition) -> Result<LayoutDocument, PlacementError> {
    let element = doc.element(id).ok_or_else(|| PlacementError::UnknownElement(id.to_owned()))?;
    let size = element.effective_size();
    let target = clamp_drag_target(cell, size, doc.extent());
    check_placement(doc, id, &Footprint::new(target.x, target.y, size.width, size.height))?;
    Ok(doc::move_element(doc, id, target))
}

/// Commit a resize of element `id` by `handle`, measured from the footprint
/// the gesture started with to the pointer's current `cell`.
///
/// # Errors
///
/// Same as [`place_dragged`].
pub fn place_resized(
    doc: &LayoutDocument,
    id: &str,
    handle: ResizeHandle,
    start: Footprint,
    cell: GridPosition,
) -> Result<LayoutDocument, PlacementError> {
    if !doc.contains(id) {
        return Err(PlacementError::UnknownElement(id.to_owned()));
    }
    let dx = cell.x.saturating_sub(start.x);
    let dy = cell.y.saturating_sub(start.y);
    let candidate = clamp_resize(resize_candidate(handle, start, dx, dy), doc.extent());
    check_placement(doc, id, &candidate)?;
    Ok(doc::resize_element(doc, id, candidate))
}

// =============================================================================
// AUDIT
// =============================================================================

/// A placement rule a loaded document breaks.
///
/// Text edits and field edits are not placement-checked, so a document can
/// carry these; gestures never introduce new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    OutOfBounds { id: ElementId, footprint: Footprint },
    Overlap { first: ElementId, second: ElementId },
    BelowMinimumSize { id: ElementId, size: GridSize },
    DuplicateId { id: ElementId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { id, footprint: fp } => write!(
                f,
                "`{id}` at ({}, {}) size {}x{} extends outside the deck",
                fp.x, fp.y, fp.width, fp.height
            ),
            Self::Overlap { first, second } => write!(f, "`{first}` overlaps `{second}`"),
            Self::BelowMinimumSize { id, size } => {
                write!(f, "`{id}` has size {}x{}, below the 1x1 minimum", size.width, size.height)
            }
            Self::DuplicateId { id } => write!(f, "id `{id}` is used by more than one element"),
        }
    }
}

/// List every placement rule `doc` breaks, in document order.
#[must_use]
pub fn audit(doc: &LayoutDocument) -> Vec<Violation> {
    let extent = doc.extent();
    let mut out = Vec::new();
    for (i, el) in doc.elements.iter().enumerate() {
        let fp = el.footprint();
        if doc.elements[..i].iter().any(|prev| prev.id == el.id) {
            out.push(Violation::DuplicateId { id: el.id.clone() });
        }
        if fp.width < MIN_ELEMENT_SIZE || fp.height < MIN_ELEMENT_SIZE {
            out.push(Violation::BelowMinimumSize { id: el.id.clone(), size: fp.size() });
        }
        if !fp.within(extent) {
            out.push(Violation::OutOfBounds { id: el.id.clone(), footprint: fp });
        }
        for later in &doc.elements[i + 1..] {
            if fp.overlaps(&later.footprint()) {
                out.push(Violation::Overlap { first: el.id.clone(), second: later.id.clone() });
            }
        }
    }
    out
}
