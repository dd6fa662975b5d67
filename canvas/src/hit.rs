#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::fmt;
use std::str::FromStr;

use crate::doc::{ElementId, GridPosition, LayoutDocument};
use crate::geometry::Footprint;
use crate::viewport::{Point, Viewport};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeHandle),
}

/// Corner handle a resize gesture is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl ResizeHandle {
    /// Hit-test order.
    pub const ALL: [Self; 4] = [Self::Nw, Self::Ne, Self::Sw, Self::Se];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::Ne => "ne",
            Self::Sw => "sw",
            Self::Se => "se",
        }
    }

    /// CSS cursor shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }

    /// Grid corner of `fp` this handle sits on.
    #[must_use]
    pub fn corner(self, fp: &Footprint) -> GridPosition {
        match self {
            Self::Nw => GridPosition::new(fp.x, fp.y),
            Self::Ne => GridPosition::new(fp.right(), fp.y),
            Self::Sw => GridPosition::new(fp.x, fp.bottom()),
            Self::Se => GridPosition::new(fp.right(), fp.bottom()),
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized handle name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resize handle `{0}` (expected nw, ne, sw or se)")]
pub struct UnknownHandle(pub String);

impl FromStr for ResizeHandle {
    type Err = UnknownHandle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownHandle(s.to_owned()))
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Screen pixel at which `handle` of `fp` is drawn.
#[must_use]
pub fn handle_center(handle: ResizeHandle, fp: &Footprint, viewport: &Viewport) -> Point {
    viewport.cell_to_pixel(handle.corner(fp))
}

/// Find what lies under `pixel`.
///
/// Handles of the selected element are checked first, as squares of half
/// extent `radius` around each corner. Otherwise the element covering the
/// cell under the pointer, first in document order, is a body hit. Handles
/// need a laid-out grid; bodies follow [`Viewport::pixel_to_cell`].
#[must_use]
pub fn hit_test(
    pixel: Point,
    doc: &LayoutDocument,
    viewport: &Viewport,
    selected: Option<&str>,
    radius: f64,
) -> Option<Hit> {
    if viewport.origin.is_some()
        && let Some(el) = selected.and_then(|id| doc.element(id))
    {
        let fp = el.footprint();
        for handle in ResizeHandle::ALL {
            let c = handle_center(handle, &fp, viewport);
            if (pixel.x - c.x).abs() <= radius && (pixel.y - c.y).abs() <= radius {
                return Some(Hit { element_id: el.id.clone(), part: HitPart::ResizeHandle(handle) });
            }
        }
    }

    let cell = viewport.pixel_to_cell(pixel);
    doc.element_at(cell)
        .map(|el| Hit { element_id: el.id.clone(), part: HitPart::Body })
}
