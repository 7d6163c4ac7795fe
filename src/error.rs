//! Error types and result aliases for the chemist crate.
//!
//! Every fallible operation returns [`Result<T>`]. The web layer catches these at the
//! submit boundary and renders their `Display` text to the user, so the messages are
//! written to be read by a person, not parsed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChemistError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("API key not configured. Please set GOOGLE_API_KEY in your .env file.")]
    MissingApiKey,

    #[error("No file uploaded")]
    NoFileUploaded,

    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("LLM gateway error: {0}")]
    GatewayError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChemistError>;
