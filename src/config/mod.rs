mod parser;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub use parser::{load_credentials, load_scenario_config};

/// Credentials table keyed by role name
pub type Credentials = BTreeMap<String, Credential>;

/// Main configuration structure for a scenario
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    /// Server URL used when none is given on the command line
    #[serde(default)]
    pub base_url: Option<String>,
    /// Document created before the scenario runs
    pub document: DocumentConfig,
    /// Optional workflow started on the document
    #[serde(default)]
    pub workflow: Option<WorkflowConfig>,
    /// Ordered task-completion steps
    #[serde(default)]
    pub scenario: Vec<StepConfig>,
}

/// Describes the document the scenario operates on
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DocumentConfig {
    /// Document name (last path segment)
    pub name: String,
    /// Document type, e.g. "File"
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Parent path the document is created under
    pub path: String,
    /// Role creating, fetching and deleting the document
    pub creator: String,
    /// Property tree, may contain placeholders
    #[serde(default = "empty_object")]
    pub properties: Value,
}

/// Workflow started right after document creation
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowConfig {
    /// Workflow model name
    pub name: String,
    /// Role starting the workflow
    pub initiator: String,
    #[serde(default = "empty_object")]
    pub variables: Value,
}

/// Represents a single task completion in the scenario
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StepConfig {
    /// Role completing the task
    pub role: String,
    /// Task action (button id), e.g. "validate"
    pub action: String,
    /// Workflow model to pick the task from; the first running workflow otherwise
    #[serde(default)]
    pub workflow: Option<String>,
    /// Suffix appended to the document path before fetching it
    #[serde(default)]
    pub document_path_modifier: Option<String>,
    /// Task variables, may contain placeholders
    #[serde(default = "empty_object")]
    pub variables: Value,
}

/// Login of a single role
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ScenarioConfig {
    /// Checks that every role acting in the scenario has credentials
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingRole` naming the first role without credentials
    pub fn validate(&self, credentials: &Credentials) -> Result<()> {
        let actors = std::iter::once(&self.document.creator)
            .chain(self.workflow.iter().map(|w| &w.initiator))
            .chain(self.scenario.iter().map(|s| &s.role));

        for role in actors {
            if !credentials.contains_key(role) {
                return Err(Error::MissingRole(role.clone()));
            }
        }
        Ok(())
    }

    /// Picks the server URL: explicit override first, `baseUrl` otherwise
    pub fn server_url(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.base_url.clone())
            .ok_or_else(|| {
                Error::Config("no server URL given and no baseUrl in configuration".into())
            })
    }
}
