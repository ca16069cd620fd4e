//! Attachment list of a defect.
//!
//! The backend stores `attachment_file` as a JSON string; the client keeps it
//! as an ordered `Vec<AttachmentFile>` and serializes only at the request
//! boundary via [`serialize_attachments`].

use serde::{Deserialize, Deserializer, Serialize};

/// One uploaded file, as returned by `POST /upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentFile {
    pub name: String,
    pub url: String,
}

impl AttachmentFile {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Serialize the list for a request body. An empty list is sent as `null`.
pub fn serialize_attachments(files: &[AttachmentFile]) -> Option<String> {
    if files.is_empty() {
        None
    } else {
        serde_json::to_string(files).ok()
    }
}

/// Parse the stored string form. Malformed input yields an empty list.
pub fn parse_attachments(raw: &str) -> Vec<AttachmentFile> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_default()
}

/// Accepts `null`, a JSON-encoded string or an inline array.
pub fn deserialize_attachments<'de, D>(deserializer: D) -> Result<Vec<AttachmentFile>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Encoded(String),
        Inline(Vec<AttachmentFile>),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Raw::Encoded(s)) => parse_attachments(&s),
        Some(Raw::Inline(files)) => files,
    })
}
