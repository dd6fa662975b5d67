//! Two-way binding between the layout document and its editable JSON text.
//!
//! The document is authoritative. The text is a derived view that the user
//! may edit freely; it flows back into the document as soon as it is JSON
//! with a top-level `elements` array. Element fields are not validated here:
//! odd values are coerced and committed, and placement problems show up in
//! the audit instead. While the text is not JSON of that shape, the text and
//! the last error are kept and the document stays at its last good value.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::doc::LayoutDocument;

/// Why edited text could not become a layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// Not valid JSON; carries the parser's message.
    #[error("{0}")]
    Parse(String),
    /// Valid JSON without an `elements` array on a top-level object.
    #[error("Invalid JSON structure: missing required fields")]
    Shape,
}

/// Serialize a layout as two-space indented JSON.
///
/// Encoding a layout does not fail in practice (non-finite floats become
/// `null`); a failure is logged and yields empty text.
#[must_use]
pub fn structured_to_text(doc: &LayoutDocument) -> String {
    match serde_json::to_string_pretty(doc) {
        Ok(text) => text,
        Err(e) => {
            warn!(id = %doc.id, error = %e, "layout could not be serialized");
            String::new()
        }
    }
}

/// Normalize line endings, drop control characters other than newline and
/// tab, and trim surrounding whitespace.
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Parse edited text into a layout.
///
/// Returns `Ok(None)` when the sanitized text is empty: the user is mid-edit
/// and nothing should change.
///
/// # Errors
///
/// [`SyncError::Parse`] for malformed JSON and [`SyncError::Shape`] when
/// there is no top-level `elements` array. Once the shape holds, conversion
/// always succeeds.
pub fn text_to_structured(text: &str) -> Result<Option<LayoutDocument>, SyncError> {
    let clean = sanitize(text);
    if clean.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(&clean).map_err(|e| SyncError::Parse(e.to_string()))?;
    let shaped = value
        .as_object()
        .and_then(|obj| obj.get("elements"))
        .is_some_and(Value::is_array);
    if !shaped {
        return Err(SyncError::Shape);
    }
    // Field readers coerce instead of failing; only a non-array `elements`
    // can error, and the shape check above rules that out.
    serde_json::from_value(value).map(Some).map_err(|e| {
        debug!(error = %e, "layout conversion failed after shape check");
        SyncError::Shape
    })
}

/// What [`DocumentSync::set_text`] did with the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOutcome {
    /// Blank text; document and error untouched.
    Ignored,
    /// Parsed; the document was replaced and the error cleared.
    Applied,
    /// Did not parse; the document was kept and the error set.
    Rejected(SyncError),
}

/// Owns the document, its text view, and the last sync error.
#[derive(Debug, Clone)]
pub struct DocumentSync {
    text: String,
    layout: Rc<LayoutDocument>,
    error: Option<String>,
}

impl DocumentSync {
    #[must_use]
    pub fn new(layout: LayoutDocument) -> Self {
        Self { text: structured_to_text(&layout), layout: Rc::new(layout), error: None }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn layout(&self) -> &Rc<LayoutDocument> {
        &self.layout
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Store user-edited text and pull it into the document if it parses.
    pub fn set_text(&mut self, text: &str) -> TextOutcome {
        text.clone_into(&mut self.text);
        match text_to_structured(text) {
            Ok(None) => TextOutcome::Ignored,
            Ok(Some(layout)) => {
                info!(id = %layout.id, elements = layout.len(), "layout replaced from text");
                self.layout = Rc::new(layout);
                self.error = None;
                TextOutcome::Applied
            }
            Err(e) => {
                debug!(error = %e, "text rejected; keeping previous layout");
                self.error = Some(e.to_string());
                TextOutcome::Rejected(e)
            }
        }
    }

    /// Replace the document after a structured edit; the text is re-derived
    /// and any pending text error is dropped.
    pub fn commit(&mut self, layout: LayoutDocument) -> Rc<LayoutDocument> {
        self.text = structured_to_text(&layout);
        self.layout = Rc::new(layout);
        self.error = None;
        Rc::clone(&self.layout)
    }
}
