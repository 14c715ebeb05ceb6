use super::{Credentials, ScenarioConfig};
use crate::errors::Result;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use tracing::info;

/// Loads and parses a scenario configuration file
///
/// Files ending in `.yaml` or `.yml` are read as YAML, anything else as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not match `ScenarioConfig`
pub fn load_scenario_config(file_path: &Path) -> Result<ScenarioConfig> {
    let config: ScenarioConfig = load_file(file_path)?;
    info!(
        "Loaded scenario for document {:?} with {} step(s)",
        config.document.name,
        config.scenario.len()
    );
    Ok(config)
}

/// Loads the role credentials table
pub fn load_credentials(file_path: &Path) -> Result<Credentials> {
    let credentials: Credentials = load_file(file_path)?;
    info!("Loaded credentials for {} role(s)", credentials.len());
    Ok(credentials)
}

fn load_file<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let content = fs::read_to_string(file_path)?;
    let is_yaml = matches!(
        file_path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}
