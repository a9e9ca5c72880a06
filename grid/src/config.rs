//! Configuration for the grid runtime.

use std::env;
use std::time::Duration;

/// How long a highlight stays active unless re-marked.
pub const DEFAULT_HIGHLIGHT_TTL: Duration = Duration::from_secs(10);

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Grid configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Base URL of the order API
    pub api_base: String,
    /// Highlight time-to-live
    pub highlight_ttl: Duration,
}

impl GridConfig {
    /// Load configuration from environment variables.
    ///
    /// `ORDERLY_API_BASE` defaults to `http://127.0.0.1:8000`;
    /// `ORDERLY_HIGHLIGHT_TTL_MS` defaults to 10000. A `.env` file is
    /// honored if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_base =
            env::var("ORDERLY_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let highlight_ttl = match env::var("ORDERLY_HIGHLIGHT_TTL_MS") {
            Ok(ms) => Duration::from_millis(
                ms.parse().map_err(|_| ConfigError::InvalidHighlightTtl(ms))?,
            ),
            Err(_) => DEFAULT_HIGHLIGHT_TTL,
        };

        Ok(Self {
            api_base,
            highlight_ttl,
        })
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            highlight_ttl: DEFAULT_HIGHLIGHT_TTL,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ORDERLY_HIGHLIGHT_TTL_MS value: {0}")]
    InvalidHighlightTtl(String),
}
