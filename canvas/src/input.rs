//! Input model: pointer buttons, selection, and the gesture state machine.
//!
//! `GestureState` is the active gesture tracked between pointer-down and
//! pointer-up. It is held in one place by the engine and carries everything
//! needed to validate moves and commit on release; leaving a gesture drops
//! the whole variant at once.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ElementId;
use crate::geometry::Footprint;
use crate::hit::ResizeHandle;
use crate::viewport::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `PointerEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Session UI state kept outside the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
    /// Last cursor style reported to the host.
    pub cursor: Option<&'static str>,
}

/// Gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving an element. The document is untouched until release.
    Dragging {
        /// Id of the element being dragged.
        id: ElementId,
        /// Pointer minus the element's rendered top-left at press time.
        grab_offset: Point,
        /// Latest pointer position.
        pointer: Point,
    },
    /// Resizing an element from one corner; every accepted move commits.
    Resizing {
        /// Id of the element being resized.
        id: ElementId,
        /// Which corner handle is being dragged.
        handle: ResizeHandle,
        /// Footprint at press time; deltas are measured from its position.
        start: Footprint,
        /// Latest pointer position.
        pointer: Point,
    },
}

impl GestureState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Id of the element the gesture acts on.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(id),
        }
    }

    /// Last pointer position seen during the gesture.
    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Dragging { pointer, .. } | Self::Resizing { pointer, .. } => Some(*pointer),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
        }
    }
}
