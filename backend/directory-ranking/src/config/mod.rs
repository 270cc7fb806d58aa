use crate::services::ranking::DEFAULT_TOP_PINNED_COUNT;
use serde::Deserialize;

/// Process configuration, read from environment variables.
///
/// Only the binary reads this; the ranking engine receives its parameters
/// through `RankingConfig`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Used when the catalog has no admin `top_pinned_count` setting
    #[serde(default = "default_top_pinned_count")]
    pub default_top_pinned_count: i64,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub catalog_fixture_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_service_name() -> String {
    "directory-ranking".to_string()
}

fn default_top_pinned_count() -> i64 {
    DEFAULT_TOP_PINNED_COUNT
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
