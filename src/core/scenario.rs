use crate::config::{Credentials, ScenarioConfig, WorkflowConfig};
use crate::errors::{Error, Result};
use crate::nuxeo::{Document, NewDocument, NuxeoClient, Workflow};
use crate::substitution::substitute_properties;
use crate::utils::pretty_print;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Drives a scenario: one authenticated client per role, steps run strictly in order
#[derive(Debug)]
pub struct ScenarioRunner {
    /// Scenario being executed
    pub(super) config: ScenarioConfig,
    /// Role credentials, also used to resolve `user` placeholders
    pub(super) credentials: Credentials,
    /// REST clients keyed by role
    pub(super) clients: HashMap<String, NuxeoClient>,
}

/// What a finished scenario left behind on the server
#[derive(Debug)]
pub struct ScenarioReport {
    /// Document state after the last step
    pub document: Document,
    /// Workflows still running on the document
    pub open_workflows: Vec<Workflow>,
    /// Whether the document was deleted at the end
    pub deleted: bool,
}

impl ScenarioRunner {
    /// Creates a runner and a client for every role in `credentials`
    ///
    /// # Errors
    ///
    /// Fails with `MissingRole` if an actor of the scenario has no credentials,
    /// or if `server_url` is not a valid URL.
    pub fn new(
        config: ScenarioConfig,
        credentials: Credentials,
        server_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        config.validate(&credentials)?;

        let mut clients = HashMap::new();
        for (role, credential) in &credentials {
            info!("Adding role: {} with user {}", role, credential.username);
            clients.insert(
                role.clone(),
                NuxeoClient::new(server_url, credential, timeout)?,
            );
        }

        Ok(Self {
            config,
            credentials,
            clients,
        })
    }

    /// Runs the whole scenario
    ///
    /// Creates the document, starts the configured workflow, performs every step,
    /// then deletes the document unless workflows are still running on it.
    pub async fn run(&self) -> Result<ScenarioReport> {
        let document = self.create_document().await?;

        if let Some(workflow) = &self.config.workflow {
            self.start_workflow(&document, workflow).await?;
        }

        for (index, step) in self.config.scenario.iter().enumerate() {
            self.perform_step(&document.path, index, step).await?;
        }
        info!("Scenario completed");

        let creator = self.client(&self.config.document.creator)?;
        let document = creator.fetch_document(&document.path).await?;
        info!("Document after the workflow: {}", document.path);
        debug!("{}", pretty_print(&document));

        debug!("Checking open workflows...");
        let open_workflows = creator.fetch_workflows(&document.uid).await?;
        let deleted = if open_workflows.is_empty() {
            info!("All workflows completed, deleting {}", document.path);
            creator.delete_document(&document.path).await?;
            true
        } else {
            warn!(
                "{} workflow(s) still active on the document, keeping it",
                open_workflows.len()
            );
            debug!("{}", pretty_print(&open_workflows));
            false
        };

        Ok(ScenarioReport {
            document,
            open_workflows,
            deleted,
        })
    }

    pub(super) fn client(&self, role: &str) -> Result<&NuxeoClient> {
        self.clients
            .get(role)
            .ok_or_else(|| Error::MissingRole(role.to_string()))
    }

    async fn create_document(&self) -> Result<Document> {
        let doc_config = &self.config.document;
        let client = self.client(&doc_config.creator)?;

        let mut properties = doc_config.properties.clone();
        substitute_properties(&mut properties, client, &self.credentials).await?;

        let new_document = NewDocument::new(&doc_config.name, &doc_config.doc_type, properties);
        info!("Creating document [{}] in {}", doc_config.name, doc_config.path);
        debug!("{}", pretty_print(&new_document));

        let document = client.create_document(&doc_config.path, &new_document).await?;
        info!("Created document {} ({})", document.path, document.uid);
        Ok(document)
    }

    async fn start_workflow(&self, document: &Document, workflow: &WorkflowConfig) -> Result<Workflow> {
        let client = self.client(&workflow.initiator)?;
        info!("Starting workflow: {}", workflow.name);

        let mut variables = workflow.variables.clone();
        substitute_properties(&mut variables, client, &self.credentials).await?;

        let target = client.fetch_document(&document.path).await?;
        let instance = client
            .start_workflow(&target.uid, &workflow.name, &variables)
            .await?;
        info!("Started workflow instance {}", instance.id);
        debug!("{}", pretty_print(&instance));
        Ok(instance)
    }
}
