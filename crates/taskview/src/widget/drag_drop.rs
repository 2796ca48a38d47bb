//! Drag payload types.
//!
//! A drag-source view exports the dragged row as a `DragPayload`: a map
//! from MIME type to raw bytes. The property tree only produces
//! `text/plain` payloads; the map form keeps the seam to the hosting
//! toolkit's drag machinery generic.

use std::collections::HashMap;

/// Well-known MIME type constants.
pub mod mime {
    /// Plain text.
    pub const TEXT_PLAIN: &str = "text/plain";
}

/// Data being dragged out of a view.
#[derive(Debug, Clone, Default)]
pub struct DragPayload {
    /// MIME type -> data mapping.
    data: HashMap<String, Vec<u8>>,
}

impl DragPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a payload with plain text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut payload = Self::new();
        payload.set_data(mime::TEXT_PLAIN, text.into().into_bytes());
        payload
    }

    /// Returns `true` if this payload contains no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns all formats present in this payload.
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(|s| s.as_str())
    }

    /// Checks if data for the given MIME type is present.
    pub fn has_format(&self, mime_type: &str) -> bool {
        self.data.contains_key(mime_type)
    }

    /// Gets raw data for a MIME type.
    pub fn get_data(&self, mime_type: &str) -> Option<&[u8]> {
        self.data.get(mime_type).map(|v| v.as_slice())
    }

    /// Sets raw data for a MIME type.
    pub fn set_data(&mut self, mime_type: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.data.insert(mime_type.into(), data.into());
    }

    /// Gets the plain text content, if any.
    pub fn text(&self) -> Option<String> {
        self.get_data(mime::TEXT_PLAIN)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let payload = DragPayload::from_text("hello");
        assert!(!payload.is_empty());
        assert!(payload.has_format(mime::TEXT_PLAIN));
        assert_eq!(payload.text(), Some("hello".into()));
    }

    #[test]
    fn test_empty_payload() {
        let payload = DragPayload::new();
        assert!(payload.is_empty());
        assert_eq!(payload.text(), None);
        assert_eq!(payload.formats().count(), 0);
    }
}
