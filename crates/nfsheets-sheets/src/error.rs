use std::path::PathBuf;

use thiserror::Error;

/// Failures while authenticating against or writing to the Sheets API.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("failed to read credentials file {path}: {source}")]
    CredentialsIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("credentials file {path} is not valid service-account JSON: {source}")]
    CredentialsFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("jwt assertion signing failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the token endpoint or the Sheets API.
    #[error("sheets api rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
}
