//! Forgiving field readers for layout files.
//!
//! Edited text is committed as soon as it has a top-level `elements` array.
//! Individual fields are coerced rather than rejected: floats truncate toward
//! zero, numeric strings parse, numbers become strings where text is
//! expected, and `null` or anything unconvertible takes the field default.
//! Malformed values then surface in the audit and renderer, not as a parse
//! failure.

#[cfg(test)]
#[path = "lenient_test.rs"]
mod lenient_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::consts::{DEFAULT_COACH_HEIGHT, DEFAULT_COACH_WIDTH};
use crate::doc::{GridSize, LayoutMetadata, PlacedElement};

// =============================================================================
// COERCIONS
// =============================================================================

/// Integer view of `value`, saturating at the `i32` range.
#[must_use]
pub fn coerce_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(whole) => Some(saturate(whole)),
            None => n.as_f64().and_then(truncate),
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(whole) => Some(saturate(whole)),
                Err(_) => match s.parse::<f64>() {
                    Ok(f) => truncate(f),
                    Err(_) => None,
                },
            }
        }
        _ => None,
    }
}

/// Text view of `value`; numbers and booleans are rendered.
#[must_use]
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Float view of `value`; non-finite parses are dropped.
#[must_use]
pub fn coerce_float(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => Some(f),
            Err(_) => None,
        },
        _ => None,
    }?;
    f.is_finite().then_some(f)
}

fn saturate(whole: i64) -> i32 {
    i32::try_from(whole).unwrap_or(if whole < 0 { i32::MIN } else { i32::MAX })
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(f: f64) -> Option<i32> {
    // `as` saturates at the i32 range.
    f.is_finite().then(|| f.trunc() as i32)
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).and_then(coerce_text).unwrap_or_default()
}

// =============================================================================
// FIELD READERS
// =============================================================================

pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    Ok(coerce_int(&Value::deserialize(d)?).unwrap_or_default())
}

pub fn deck_width<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    Ok(coerce_int(&Value::deserialize(d)?).unwrap_or(DEFAULT_COACH_WIDTH))
}

pub fn deck_height<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    Ok(coerce_int(&Value::deserialize(d)?).unwrap_or(DEFAULT_COACH_HEIGHT))
}

pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(coerce_text(&Value::deserialize(d)?).unwrap_or_default())
}

pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(coerce_text(&Value::deserialize(d)?))
}

pub fn opt_float<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(coerce_float(&Value::deserialize(d)?))
}

/// Explicit size; an object missing either dimension defers to the catalog.
pub fn opt_size<'de, D: Deserializer<'de>>(d: D) -> Result<Option<GridSize>, D::Error> {
    let value = Value::deserialize(d)?;
    let Some(obj) = value.as_object() else {
        return Ok(None);
    };
    let width = obj.get("width").and_then(coerce_int);
    let height = obj.get("height").and_then(coerce_int);
    Ok(width.zip(height).map(|(w, h)| GridSize::new(w, h)))
}

/// Tag list; entries that are not text-like are skipped.
pub fn opt_tags<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => Some(items.iter().filter_map(coerce_text).collect()),
        _ => None,
    })
}

pub fn opt_metadata<'de, D: Deserializer<'de>>(d: D) -> Result<Option<LayoutMetadata>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value.as_object().map(|obj| LayoutMetadata {
        version: text_field(obj, "version"),
        created_at: text_field(obj, "createdAt"),
        updated_at: text_field(obj, "updatedAt"),
    }))
}

/// Element list. Object entries always convert; other entries are dropped.
///
/// # Errors
///
/// Fails only when `elements` is not an array at all.
pub fn elements<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<PlacedElement>, D::Error> {
    let Value::Array(items) = Value::deserialize(d)? else {
        return Err(D::Error::custom("`elements` must be an array"));
    };
    let total = items.len();
    let mut out = Vec::with_capacity(total);
    for item in items {
        if item.is_object() {
            out.push(PlacedElement::deserialize(item).map_err(D::Error::custom)?);
        }
    }
    if out.len() < total {
        debug!(dropped = total - out.len(), "non-object element entries dropped");
    }
    Ok(out)
}
