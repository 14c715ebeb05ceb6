use serde::Serialize;

/// Renders `value` as indented JSON for log output
///
/// Falls back to a short marker when the value cannot be serialized, so logging never fails.
pub fn pretty_print<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}

/// Appends an optional suffix to a document path
pub fn apply_path_modifier(document_path: &str, modifier: Option<&str>) -> String {
    match modifier {
        Some(suffix) => format!("{}{}", document_path, suffix),
        None => document_path.to_string(),
    }
}
