use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_CREDENTIALS_FILE, DEFAULT_HTTP_TIMEOUT, SERVER_URL_ENV};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Runs a document workflow scenario against a Nuxeo server
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// JSON or YAML file mapping each role to a username and password
    #[arg(long, default_value = DEFAULT_CREDENTIALS_FILE)]
    pub credentials: PathBuf,

    /// JSON or YAML scenario: document, optional workflow and task steps
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Server URL, overrides the scenario's `baseUrl`
    #[arg(long, env = SERVER_URL_ENV)]
    pub server_url: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to a daily rotated file under `logs/`
    #[arg(long)]
    pub log_to_file: bool,

    /// Timeout for each HTTP request (e.g. "30s", "2m")
    #[arg(long, default_value = DEFAULT_HTTP_TIMEOUT, value_parser = humantime::parse_duration)]
    pub timeout: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_default_file_names() {
        let cli = Cli::try_parse_from(["docflow"]).unwrap();
        assert_eq!(cli.credentials, PathBuf::from("credentials.json"));
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert_eq!(cli.timeout, Duration::from_secs(30));
        assert!(!cli.log_to_file);
    }

    #[test]
    fn parses_explicit_arguments() {
        let cli = Cli::try_parse_from([
            "docflow",
            "--config",
            "review.yaml",
            "--server-url",
            "http://localhost:8080/nuxeo",
            "--timeout",
            "2m",
            "--log-to-file",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("review.yaml"));
        assert_eq!(cli.server_url.as_deref(), Some("http://localhost:8080/nuxeo"));
        assert_eq!(cli.timeout, Duration::from_secs(120));
        assert!(cli.log_to_file);
    }

    #[test]
    fn rejects_bad_timeout() {
        assert!(Cli::try_parse_from(["docflow", "--timeout", "soon"]).is_err());
    }
}
