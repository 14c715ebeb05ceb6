use crate::errors::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Identifiers of a file stored in a server-side upload batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub upload_batch_id: String,
    pub upload_file_id: String,
}

impl UploadResult {
    pub fn new(upload_batch_id: impl Into<String>, upload_file_id: impl Into<String>) -> Self {
        Self {
            upload_batch_id: upload_batch_id.into(),
            upload_file_id: upload_file_id.into(),
        }
    }

    /// Property value referencing the uploaded file
    pub fn to_property(&self) -> Value {
        json!({
            "uploadBatchId": self.upload_batch_id,
            "uploadFileId": self.upload_file_id,
        })
    }
}

/// Transfers one file to the server's batch upload endpoint
#[async_trait]
pub trait BatchUploader: Send + Sync {
    async fn upload(
        &self,
        file: tokio::fs::File,
        file_name: &str,
        mime_type: &str,
        size: u64,
    ) -> Result<UploadResult>;
}
