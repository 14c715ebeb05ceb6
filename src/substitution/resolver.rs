use super::placeholder::{BlobPlaceholder, PlaceholderKind};
use super::upload::UploadResult;
use crate::config::Credentials;
use crate::errors::{Error, Result};
use serde_json::Value;
use std::collections::VecDeque;

/// Behaviour applied to placeholder nodes during one pass over a tree
pub trait Resolver {
    /// Returns the value that replaces the placeholder, or `None` to leave it untouched
    fn resolve(&mut self, placeholder: PlaceholderKind) -> Result<Option<Value>>;
}

/// First pass: substitutes users and records blobs to upload, in encounter order
#[derive(Debug)]
pub struct CollectPass<'a> {
    credentials: &'a Credentials,
    pending: Vec<BlobPlaceholder>,
}

impl<'a> CollectPass<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Self {
            credentials,
            pending: Vec::new(),
        }
    }

    /// Blobs met during the walk, in the order the uploads must be spliced back
    pub fn into_pending(self) -> Vec<BlobPlaceholder> {
        self.pending
    }
}

impl Resolver for CollectPass<'_> {
    fn resolve(&mut self, placeholder: PlaceholderKind) -> Result<Option<Value>> {
        match placeholder {
            PlaceholderKind::Blob(blob) => {
                self.pending.push(blob);
                Ok(None)
            }
            PlaceholderKind::User { role } => {
                let credential = self
                    .credentials
                    .get(&role)
                    .ok_or(Error::MissingRole(role))?;
                Ok(Some(Value::String(credential.username.clone())))
            }
            PlaceholderKind::Plain => Ok(None),
        }
    }
}

/// Second pass: replaces each blob with the next upload result
#[derive(Debug)]
pub struct SplicePass {
    results: VecDeque<UploadResult>,
    consumed: usize,
}

impl SplicePass {
    pub fn new(results: impl IntoIterator<Item = UploadResult>) -> Self {
        Self {
            results: results.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Ensures every upload result found its placeholder
    pub fn finish(self) -> Result<()> {
        if self.results.is_empty() {
            Ok(())
        } else {
            Err(Error::ResultQueueOverflow(self.results.len()))
        }
    }
}

impl Resolver for SplicePass {
    fn resolve(&mut self, placeholder: PlaceholderKind) -> Result<Option<Value>> {
        match placeholder {
            PlaceholderKind::Blob(_) => {
                self.consumed += 1;
                let result = self
                    .results
                    .pop_front()
                    .ok_or(Error::ResultQueueUnderflow(self.consumed))?;
                Ok(Some(result.to_property()))
            }
            PlaceholderKind::User { .. } | PlaceholderKind::Plain => Ok(None),
        }
    }
}
