//! Orientation model: canonical degrees plus the legacy directional labels.
//!
//! Older layout files store orientations as strings such as `"to right"` or
//! `"Left"`. The canonical form is an integer number of degrees in `[0, 360)`.
//! Several labels alias the same degree value, so label → degrees → label is
//! lossy (`"Top"` comes back as `"up"`).

#[cfg(test)]
#[path = "orientation_test.rs"]
mod orientation_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Legacy label → degrees. Lookup is case-sensitive, matching stored files.
const LEGACY_LABELS: &[(&str, i32)] = &[
    ("to right", 0),
    ("to left", 180),
    ("up", 270),
    ("bottom", 90),
    ("top", 270),
    ("Left", 180),
    ("Top", 270),
    ("Right", 0),
    ("Bottom", 90),
    ("top-to-bottom", 270),
    ("-", 0),
];

/// Degrees → display label for the four cardinal directions.
const DISPLAY_LABELS: &[(i32, &str)] = &[(0, "to right"), (90, "bottom"), (180, "to left"), (270, "up")];

/// Normalize any integer degree value into `[0, 360)`.
#[must_use]
pub fn normalize(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Element orientation in whole degrees, always normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Orientation(i32);

impl Orientation {
    /// Facing right; the fallback for unknown or missing values.
    pub const RIGHT: Self = Self(0);
    /// Facing down.
    pub const DOWN: Self = Self(90);
    /// Facing left.
    pub const LEFT: Self = Self(180);
    /// Facing up.
    pub const UP: Self = Self(270);

    /// Build an orientation from any integer degree value.
    #[must_use]
    pub fn new(degrees: i32) -> Self {
        Self(normalize(degrees))
    }

    /// Degrees in `[0, 360)`.
    #[must_use]
    pub fn degrees(self) -> i32 {
        self.0
    }

    /// Resolve a legacy label. Unknown labels fall back to [`Orientation::RIGHT`].
    #[must_use]
    pub fn from_legacy(label: &str) -> Self {
        Self::lookup_legacy(label).unwrap_or(Self::RIGHT)
    }

    /// Resolve a legacy label, returning `None` when it is not in the table.
    #[must_use]
    pub fn lookup_legacy(label: &str) -> Option<Self> {
        LEGACY_LABELS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, deg)| Self(*deg))
    }

    /// Display label for the cardinal directions; `None` for anything else.
    #[must_use]
    pub fn legacy_label(self) -> Option<&'static str> {
        DISPLAY_LABELS
            .iter()
            .find(|(deg, _)| *deg == self.0)
            .map(|(_, label)| *label)
    }

    /// Rotation in degrees to apply to an element's icon so it reads along its facing.
    #[must_use]
    pub fn content_rotation(self) -> i32 {
        match self.0 {
            90 => 0,
            180 => 90,
            270 => 180,
            _ => -90,
        }
    }

    /// Short arrow glyph shown in the element's corner.
    #[must_use]
    pub fn arrow(self) -> String {
        match self.0 {
            0 => "→".to_owned(),
            90 => "↓".to_owned(),
            180 => "←".to_owned(),
            270 => "↑".to_owned(),
            other => format!("{other}°"),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.legacy_label() {
            Some(label) => f.write_str(label),
            None => write!(f, "{}°", self.0),
        }
    }
}

impl From<i32> for Orientation {
    fn from(degrees: i32) -> Self {
        Self::new(degrees)
    }
}

impl Serialize for Orientation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Whole(i64),
            Fractional(f64),
            Label(String),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Whole(deg) => Self::from_i64(deg),
            Raw::Fractional(deg) => Self::from_f64(deg),
            Raw::Label(label) => Self::from_legacy(&label),
            Raw::Other(_) => Self::RIGHT,
        })
    }
}

impl Orientation {
    fn from_i64(degrees: i64) -> Self {
        Self(i32::try_from(degrees.rem_euclid(360)).unwrap_or_default())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(degrees: f64) -> Self {
        if degrees.is_finite() {
            Self::from_i64(degrees.trunc() as i64)
        } else {
            Self::RIGHT
        }
    }
}
