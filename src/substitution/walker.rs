use super::placeholder::{classify, PlaceholderKind};
use super::resolver::Resolver;
use crate::errors::Result;
use serde_json::Value;

/// Visits `node` depth-first and lets `resolver` rewrite every placeholder in place.
///
/// Array elements are visited in index order and object values in map iteration
/// order, so two walks over an unmodified tree meet placeholders in the same order.
/// A placeholder is never descended into, whether it gets replaced or not.
pub fn walk<R: Resolver + ?Sized>(node: &mut Value, resolver: &mut R) -> Result<()> {
    match classify(node)? {
        PlaceholderKind::Plain => match node {
            Value::Array(items) => {
                for item in items.iter_mut() {
                    walk(item, resolver)?;
                }
            }
            Value::Object(map) => {
                for value in map.values_mut() {
                    walk(value, resolver)?;
                }
            }
            _ => {}
        },
        placeholder => {
            if let Some(replacement) = resolver.resolve(placeholder)? {
                *node = replacement;
            }
        }
    }
    Ok(())
}
