//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TIFFIN_DATA_DIR` - Directory for persisted cart state (default: .tiffin)
//! - `TIFFIN_CURRENCY` - ISO 4217 currency for cart totals (default: INR)

use std::path::PathBuf;

use thiserror::Error;
use tiffin_core::CurrencyCode;

const DEFAULT_DATA_DIR: &str = ".tiffin";
const DEFAULT_CURRENCY: &str = "INR";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory the file store keeps its key files in
    pub data_dir: PathBuf,
    /// Currency used when reporting the cart subtotal
    pub currency: CurrencyCode,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            currency: CurrencyCode::default(),
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(get_or_default(&lookup, "TIFFIN_DATA_DIR", DEFAULT_DATA_DIR));
        let currency = get_or_default(&lookup, "TIFFIN_CURRENCY", DEFAULT_CURRENCY)
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("TIFFIN_CURRENCY".to_string(), e.to_string()))?;

        Ok(Self { data_dir, currency })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable, treating unset and blank the same.
fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
