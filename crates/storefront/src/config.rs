//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STALL_STORAGE_DIR` - Root directory of the file store (default: .stall)
//! - `STALL_ORIGIN` - Origin the stored records are scoped to (default: <http://localhost>)
//! - `STALL_CAROUSEL_INTERVAL_MS` - Carousel autoplay period in milliseconds (default: 5000)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_STORAGE_DIR: &str = ".stall";
const DEFAULT_ORIGIN: &str = "http://localhost";
const DEFAULT_CAROUSEL_INTERVAL_MS: &str = "5000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Root directory of the file store
    pub storage_dir: PathBuf,
    /// Origin the stored records are scoped to
    pub origin: String,
    /// Carousel autoplay period
    pub carousel_interval: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            origin: DEFAULT_ORIGIN.to_string(),
            carousel_interval: Duration::from_millis(5000),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_dir = PathBuf::from(get_env_or_default("STALL_STORAGE_DIR", DEFAULT_STORAGE_DIR));
        let origin = get_env_or_default("STALL_ORIGIN", DEFAULT_ORIGIN);
        let carousel_interval = parse_interval(
            "STALL_CAROUSEL_INTERVAL_MS",
            &get_env_or_default("STALL_CAROUSEL_INTERVAL_MS", DEFAULT_CAROUSEL_INTERVAL_MS),
        )?;

        Ok(Self {
            storage_dir,
            origin,
            carousel_interval,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a positive millisecond count.
fn parse_interval(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let millis = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if millis == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_millis(millis))
}
