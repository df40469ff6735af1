use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::display::StalePolicy;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "SPOONACULAR_API_KEY";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// API key for Spoonacular (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for the recipe API (for proxies and tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of candidates requested from the search endpoint
    #[serde(default = "default_number")]
    pub number: u32,
    /// Request timeout in whole seconds; must be at least 1
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Maximum detail requests in flight; 1 keeps them sequential
    #[serde(default = "default_detail_concurrency")]
    pub detail_concurrency: usize,
    /// What to do with writes from a superseded render cycle
    #[serde(default)]
    pub stale_policy: StalePolicy,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            number: default_number(),
            timeout: default_timeout(),
            detail_concurrency: default_detail_concurrency(),
            stale_policy: StalePolicy::default(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_number() -> u32 {
    5
}

fn default_timeout() -> u64 {
    30
}

fn default_detail_concurrency() -> usize {
    1
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// The configured API key, falling back to the SPOONACULAR_API_KEY variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_FINDER__DETAIL_CONCURRENCY
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
