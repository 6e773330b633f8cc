use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    HttpRequestError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON decode error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Lookup task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Cannot convert '{value}' in column '{column}' to {target}")]
    TypeConversion {
        column: String,
        value: String,
        target: &'static str,
    },

    #[error("Invalid currency value: '{0}'")]
    CurrencyParse(String),

    #[error("Invalid date value: '{0}'")]
    DateParse(String),

    #[error("Other error: {0}")]
    Other(String),
}
