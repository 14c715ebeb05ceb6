//! Placeholder substitution in document properties and task variables
//!
//! A property tree may carry two kinds of markers:
//! - `{"type": "user", "role": "..."}` becomes the username of that role
//! - `{"type": "blob", "file": "...", "mimeType": "..."}` is uploaded and becomes
//!   a reference to the uploaded file
//!
//! Blobs need two walks over the same tree. The first one collects them and the
//! uploads run concurrently; the second one splices the upload results back,
//! matched to placeholders purely by encounter order.

mod placeholder;
mod resolver;
mod upload;
mod walker;

pub use placeholder::*;
pub use resolver::*;
pub use upload::*;
pub use walker::*;

use crate::config::Credentials;
use crate::errors::{Error, Result};
use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, info};

/// Resolves every placeholder in `tree`, uploading blobs through `uploader`.
///
/// On error the tree may be left partially substituted and should be discarded.
pub async fn substitute_properties<U>(
    tree: &mut Value,
    uploader: &U,
    credentials: &Credentials,
) -> Result<()>
where
    U: BatchUploader + ?Sized,
{
    let mut collect = CollectPass::new(credentials);
    walk(tree, &mut collect)?;
    let pending = collect.into_pending();
    if pending.is_empty() {
        return Ok(());
    }

    debug!("Uploading {} file(s)", pending.len());
    let results = try_join_all(pending.iter().map(|blob| upload_blob(uploader, blob))).await?;

    let mut splice = SplicePass::new(results);
    walk(tree, &mut splice)?;
    splice.finish()
}

async fn upload_blob<U>(uploader: &U, blob: &BlobPlaceholder) -> Result<UploadResult>
where
    U: BatchUploader + ?Sized,
{
    let access = |source: std::io::Error| Error::FileAccess {
        path: blob.file.clone(),
        source,
    };
    let size = tokio::fs::metadata(&blob.file).await.map_err(access)?.len();
    let file = tokio::fs::File::open(&blob.file).await.map_err(access)?;
    let file_name = blob
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    info!(
        "Uploading {} ({}, {} bytes)",
        blob.file.display(),
        blob.mime_type,
        size
    );
    let result = uploader
        .upload(file, &file_name, &blob.mime_type, size)
        .await
        .map_err(|e| match e {
            e @ Error::UploadFailed { .. } => e,
            other => Error::UploadFailed {
                file: blob.file.clone(),
                reason: other.to_string(),
            },
        })?;
    debug!(
        "Uploaded {} as batch {} file {}",
        file_name, result.upload_batch_id, result.upload_file_id
    );
    Ok(result)
}
