/// Credentials file read when `--credentials` is not given
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";

/// Scenario file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable consulted for the server URL before the scenario's `baseUrl`
pub const SERVER_URL_ENV: &str = "DOCFLOW_SERVER_URL";

/// Timeout applied to each HTTP request, in humantime syntax
pub const DEFAULT_HTTP_TIMEOUT: &str = "30s";

/// REST API root, relative to the server URL
pub const API_PREFIX: &str = "api/v1/";

/// Header selecting the document schemas returned by the server
pub const PROPERTIES_HEADER: &str = "properties";

pub const LOG_DIRECTORY: &str = "logs";
pub const LOG_FILE_NAME: &str = "docflow.log";
