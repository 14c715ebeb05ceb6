use crate::errors::{Error, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A local file waiting to be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobPlaceholder {
    /// Path of the file on disk
    pub file: PathBuf,
    /// MIME type announced to the server
    pub mime_type: String,
}

/// Classification of a property tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `{ "type": "blob", "file": ..., "mimeType": ... }`
    Blob(BlobPlaceholder),
    /// `{ "type": "user", "role": ... }`
    User { role: String },
    /// Anything without a `type` field
    Plain,
}

/// Determines whether `node` is a placeholder.
///
/// Only objects carrying a `type` field are placeholders. A `type` other than
/// `"blob"` or `"user"` is rejected rather than passed through.
pub fn classify(node: &Value) -> Result<PlaceholderKind> {
    let Some(map) = node.as_object() else {
        return Ok(PlaceholderKind::Plain);
    };
    let Some(tag) = map.get("type") else {
        return Ok(PlaceholderKind::Plain);
    };

    match tag.as_str() {
        Some("blob") => Ok(PlaceholderKind::Blob(BlobPlaceholder {
            file: PathBuf::from(required_str(map, "blob", "file")?),
            mime_type: required_str(map, "blob", "mimeType")?.to_string(),
        })),
        Some("user") => Ok(PlaceholderKind::User {
            role: required_str(map, "user", "role")?.to_string(),
        }),
        _ => Err(Error::UnsupportedPlaceholder(tag.to_string())),
    }
}

fn required_str<'a>(map: &'a Map<String, Value>, kind: &'static str, field: &str) -> Result<&'a str> {
    map.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::InvalidPlaceholder {
            kind,
            reason: format!("missing string field '{}'", field),
        })
}
