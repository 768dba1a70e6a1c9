use thiserror::Error;

/// Errors that can occur while evaluating yield models or querying FIA.
#[derive(Error, Debug)]
pub enum YieldError {
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for YieldError {
    fn from(e: toml::de::Error) -> Self {
        YieldError::Config(e.to_string())
    }
}
