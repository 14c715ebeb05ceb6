use std::path::PathBuf;

/// Errors raised while loading a scenario, substituting properties or talking to the server
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Server returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A `user` placeholder (or a scenario actor) names a role absent from the credentials
    #[error("No credentials for role '{0}'")]
    MissingRole(String),
    /// A `blob` placeholder points at a file that cannot be statted or opened
    #[error("Cannot access file {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Upload of {file:?} failed: {reason}")]
    UploadFailed { file: PathBuf, reason: String },
    /// The splice pass met more blob placeholders than the collection pass uploaded
    #[error("Upload result queue exhausted at blob placeholder #{0}")]
    ResultQueueUnderflow(usize),
    /// The splice pass met fewer blob placeholders than the collection pass uploaded
    #[error("{0} upload result(s) left unconsumed after splicing")]
    ResultQueueOverflow(usize),
    #[error("Unsupported placeholder type {0}")]
    UnsupportedPlaceholder(String),
    #[error("Invalid '{kind}' placeholder: {reason}")]
    InvalidPlaceholder { kind: &'static str, reason: String },

    #[error("No running workflow on document '{0}'")]
    NoActiveWorkflow(String),
    #[error("No open task in workflow '{0}'")]
    NoOpenTask(String),
}

pub type Result<T> = std::result::Result<T, Error>;
