use thiserror::Error;

/// Main error type for the analyzer
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Inspection service returned HTTP {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed avinfo response: {0}")]
    MalformedResponse(String),

    #[error("Invalid inspection URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<url::ParseError> for AnalyzerError {
    fn from(err: url::ParseError) -> Self {
        AnalyzerError::InvalidUrl(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AnalyzerError>;
