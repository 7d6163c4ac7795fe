//! Process configuration.
//!
//! Everything is read once at startup, optionally after a `.env` file has been merged into
//! the environment, and then shared read-only for the lifetime of the process. A missing API
//! key is not fatal: the app still serves the form and refuses to submit until the key is set.

use crate::error::{ChemistError, Result};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_API_ENDPOINT";
pub const HOST_VAR: &str = "CHEMIST_HOST";
pub const PORT_VAR: &str = "CHEMIST_PORT";
pub const MAX_UPLOAD_VAR: &str = "CHEMIST_MAX_UPLOAD_MB";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 20;

const MISSING_KEY_WARNING: &str =
    "GOOGLE_API_KEY not found in environment variables. Please set it in a .env file.";

/// Secret credential for the model API. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Removes any leading and trailing `"` or `'` characters, so `.env` files that quote
/// their values still work.
pub fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

/// Merge a `.env` file into the process environment.
///
/// With no path, the file is searched for from the current directory upwards. Variables
/// already set in the environment win. A missing file is expected and only logged at debug.
pub fn load_dotenv(path: Option<&Path>) {
    let result = match path {
        Some(path) => dotenv::from_path(path).map(|_| path.to_path_buf()),
        None => dotenv::dotenv(),
    };

    match result {
        Ok(loaded) => debug!("Loaded environment from {}", loaded.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<ApiKey>,
    pub model: String,
    pub base_url: String,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| strip_quotes(&raw).to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();

        let port = match read(PORT_VAR) {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                ChemistError::ConfigError(format!("{} must be a port number, got {:?}", PORT_VAR, raw))
            })?,
            None => defaults.port,
        };

        let max_upload_bytes = match read(MAX_UPLOAD_VAR) {
            Some(raw) => {
                let megabytes = raw.parse::<usize>().map_err(|_| {
                    ChemistError::ConfigError(format!(
                        "{} must be a whole number of megabytes, got {:?}",
                        MAX_UPLOAD_VAR, raw
                    ))
                })?;
                megabytes.checked_mul(1024 * 1024).ok_or_else(|| {
                    ChemistError::ConfigError(format!(
                        "{} is too large: {} megabytes",
                        MAX_UPLOAD_VAR, megabytes
                    ))
                })?
            }
            None => defaults.max_upload_bytes,
        };

        Ok(Self {
            api_key: read(API_KEY_VAR).map(ApiKey::new),
            model: read(MODEL_VAR).unwrap_or(defaults.model),
            base_url: read(BASE_URL_VAR).unwrap_or(defaults.base_url),
            host: read(HOST_VAR).unwrap_or(defaults.host),
            port,
            max_upload_bytes,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The banner shown while the API key is missing.
    pub fn missing_key_warning(&self) -> Option<&'static str> {
        if self.has_api_key() {
            None
        } else {
            Some(MISSING_KEY_WARNING)
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
