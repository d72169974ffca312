//! Attachment data.
//!
//! Unlike the envelope fields, attachment content is fully materialized:
//! a full single-message fetch downloads the whole literal anyway, so the
//! decoded bytes are handed to the caller directly.

/// A file attached to a message.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Attachment {
    /// Filename as declared in the part headers. Absent when the sender
    /// did not name the part.
    pub filename: Option<String>,

    /// Decoded binary content.
    pub content: Vec<u8>,

    /// Declared MIME content type (e.g. `"image/jpeg"`, `"application/pdf"`).
    pub mime_type: String,
}
