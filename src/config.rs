use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Remote recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Search result pagination
    #[serde(default)]
    pub search: SearchConfig,
    /// Startup preload of a sample across categories
    #[serde(default)]
    pub preload: PreloadConfig,
    /// Local dataset used when the remote API is unavailable
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Configuration for the remote recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the recipes endpoint (recipe ids are appended as a path segment)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as the `key` query parameter
    pub key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: None,
            timeout: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Number of results on one page
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            results_per_page: default_results_per_page(),
        }
    }
}

/// Configuration for the startup preload
#[derive(Debug, Deserialize, Clone)]
pub struct PreloadConfig {
    /// Search terms queried one after another
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// Maximum results kept from each category
    #[serde(default = "default_per_category")]
    pub per_category: usize,
    /// Query used to check whether the API answers at all
    #[serde(default = "default_availability_query")]
    pub availability_query: String,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            per_category: default_per_category(),
            availability_query: default_availability_query(),
        }
    }
}

/// Configuration for the local dataset and the values it falls back to
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    /// JSON file to read instead of the bundled dataset
    pub dataset_path: Option<PathBuf>,
    /// Image shown when a recipe has none
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    #[serde(default = "default_servings")]
    pub default_servings: u32,
    /// Minutes
    #[serde(default = "default_cooking_time")]
    pub default_cooking_time: u32,
    /// Ids that only exist in the local dataset
    #[serde(default = "default_sample_ids")]
    pub sample_ids: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            placeholder_image: default_placeholder_image(),
            default_servings: default_servings(),
            default_cooking_time: default_cooking_time(),
            sample_ids: default_sample_ids(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://forkify-api.herokuapp.com/api/v2/recipes".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_results_per_page() -> usize {
    10
}

fn default_categories() -> Vec<String> {
    vec![
        "pizza".to_string(),
        "pasta".to_string(),
        "chicken".to_string(),
        "salad".to_string(),
        "cake".to_string(),
    ]
}

fn default_per_category() -> usize {
    5
}

fn default_availability_query() -> String {
    "pizza".to_string()
}

fn default_placeholder_image() -> String {
    "./img/logo.png".to_string()
}

fn default_servings() -> u32 {
    4
}

fn default_cooking_time() -> u32 {
    30
}

fn default_sample_ids() -> Vec<String> {
    vec!["12345".to_string(), "23456".to_string()]
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FORKIFY__ prefix
    /// 2. forkify.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FORKIFY__API__KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("forkify").required(false))
        // Use double underscore for nested: FORKIFY__SEARCH__RESULTS_PER_PAGE
        .add_source(
            Environment::with_prefix("FORKIFY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
