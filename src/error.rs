use std::path::PathBuf;
use thiserror::Error;

/// Local failures only. A non-2xx answer from the service is not an error;
/// it comes back as an `ApiResponse` with that status.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("No credentials configured. Set PETFRIENDS_EMAIL and PETFRIENDS_PASSWORD or run: petfriends config path")]
    MissingCredentials,

    #[error("Could not obtain an auth key (status {0})")]
    AuthFailed(u16),

    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    #[error("Failed to read photo '{}': {source}", path.display())]
    PhotoRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read config: {0}")]
    ConfigRead(std::io::Error),

    #[error("Failed to write config: {0}")]
    ConfigWrite(std::io::Error),

    #[error("Invalid config format: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn unexpected_body(msg: impl Into<String>) -> Self {
        Self::UnexpectedBody(msg.into())
    }
}
