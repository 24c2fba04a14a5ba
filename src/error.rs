use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for ntient
#[derive(Error, Debug)]
pub enum NtientError {
    /// Missing or invalid construction arguments and configuration.
    ///
    /// Model validation messages are surfaced verbatim, e.g. `Name is required!`.
    #[error("{0}")]
    Config(String),

    #[error("Authorization failed: {0}\n\nTroubleshooting:\n- Pass a deployment token, or a client_id and client_secret pair\n- Verify the credentials on the application home page")]
    Authorization(String),

    #[error("Network error: {0}\n\nTroubleshooting:\n- Check internet connection\n- Verify NTIENT_HOST points at the API (e.g. https://api.ntient.ai/api)")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("API error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NtientError>;
