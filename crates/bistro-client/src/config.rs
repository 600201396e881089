//! # Storefront Configuration
//!
//! Where the order API lives.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BISTRO_API_URL=http://localhost:3000                               │
//! │     BISTRO_MEALS_PATH=/meals                                           │
//! │     BISTRO_ORDERS_PATH=/orders                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bistro-storefront/storefront.toml (Linux)                │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//! meals_path = "/meals"
//! orders_path = "/orders"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Settings
// =============================================================================

/// Location of the backend order API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the backend (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path serving the menu (`GET`).
    #[serde(default = "default_meals_path")]
    pub meals_path: String,

    /// Path accepting orders (`POST`).
    #[serde(default = "default_orders_path")]
    pub orders_path: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_meals_path() -> String {
    "/meals".to_string()
}

fn default_orders_path() -> String {
    "/orders".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            meals_path: default_meals_path(),
            orders_path: default_orders_path(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

impl StorefrontConfig {
    /// Creates a config pointing at `base_url` with default paths.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        StorefrontConfig {
            api: ApiSettings {
                base_url: base_url.into(),
                ..ApiSettings::default()
            },
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let base = Url::parse(&self.api.base_url)?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        for (name, path) in [
            ("meals_path", &self.api.meals_path),
            ("orders_path", &self.api.orders_path),
        ] {
            if path.trim().is_empty() {
                return Err(ClientError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }

        Ok(())
    }

    /// Applies overrides from `lookup` (the process environment in `load`).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BISTRO_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(path) = lookup("BISTRO_MEALS_PATH") {
            self.api.meals_path = path;
        }

        if let Some(path) = lookup("BISTRO_ORDERS_PATH") {
            self.api.orders_path = path;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bistro", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Endpoints
    // =========================================================================

    /// Full URL of the menu endpoint.
    pub fn meals_url(&self) -> String {
        self.endpoint(&self.api.meals_path)
    }

    /// Full URL of the order endpoint.
    pub fn orders_url(&self) -> String {
        self.endpoint(&self.api.orders_path)
    }

    /// Resolves a path (such as a meal's `image`) against the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
