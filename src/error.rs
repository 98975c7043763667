use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Nothing to export: no contact entries survived filtering")]
    EmptyExport,
}

impl ExportError {
    /// Builds the error for a non-success API response, calling out credential problems.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = match status {
            401 | 403 => format!("authentication rejected, check the API token ({})", body.trim()),
            _ => body.trim().to_string(),
        };
        ExportError::Api { status, message }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
