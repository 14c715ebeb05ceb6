use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Document as returned by the repository endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub uid: String,
    pub path: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub properties: Value,
}

/// Body of a document creation request
#[derive(Debug, Clone, Serialize)]
pub struct NewDocument {
    #[serde(rename = "entity-type")]
    pub entity_type: &'static str,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub properties: Value,
}

impl NewDocument {
    pub fn new(name: &str, doc_type: &str, properties: Value) -> Self {
        Self {
            entity_type: "document",
            name: name.to_string(),
            doc_type: doc_type.to_string(),
            properties,
        }
    }
}

/// Running workflow instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub workflow_model_name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub initiator: Option<String>,
}

/// Open workflow task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub workflow_instance_id: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Paginated list wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Entries<T> {
    pub entries: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub batch_id: String,
}
