use super::ScenarioRunner;
use crate::config::StepConfig;
use crate::errors::{Error, Result};
use crate::nuxeo::Workflow;
use crate::substitution::substitute_properties;
use crate::utils::{apply_path_modifier, pretty_print};
use tracing::{debug, info};

impl ScenarioRunner {
    /// Completes the current task of one scenario step as the step's role
    ///
    /// # Details
    ///
    /// - Fetches the document, optionally at a path derived with `documentPathModifier`
    /// - Picks the workflow named by the step, or the first running one
    /// - Takes the first open task of that workflow
    /// - Substitutes placeholders in the step variables and completes the task
    pub(super) async fn perform_step(
        &self,
        document_path: &str,
        index: usize,
        step: &StepConfig,
    ) -> Result<()> {
        let client = self.client(&step.role)?;
        let path = apply_path_modifier(document_path, step.document_path_modifier.as_deref());
        info!(
            "Step {}: role {} fetching {}",
            index + 1,
            step.role,
            path
        );

        let document = client.fetch_document(&path).await?;
        let workflows = client.fetch_workflows(&document.uid).await?;
        debug!("Current workflows: {}", pretty_print(&workflows));

        let workflow = select_workflow(&workflows, step.workflow.as_deref())
            .ok_or_else(|| Error::NoActiveWorkflow(path.clone()))?;
        info!("Using workflow {} ({})", workflow.workflow_model_name, workflow.id);

        let tasks = client.fetch_tasks(&workflow.id).await?;
        debug!("Current tasks: {}", pretty_print(&tasks));
        let task = tasks
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoOpenTask(workflow.workflow_model_name.clone()))?;

        let mut variables = step.variables.clone();
        substitute_properties(&mut variables, client, &self.credentials).await?;

        info!(
            "Completing task {} as {} with action {}",
            task.name,
            client.username(),
            step.action
        );
        debug!("Task variables: {}", pretty_print(&variables));
        client.complete_task(&task, &step.action, &variables).await?;
        Ok(())
    }
}

/// Returns the workflow whose model is `model_name`, falling back to the first one
fn select_workflow<'a>(workflows: &'a [Workflow], model_name: Option<&str>) -> Option<&'a Workflow> {
    model_name
        .and_then(|name| workflows.iter().find(|w| w.workflow_model_name == name))
        .or_else(|| workflows.first())
}
