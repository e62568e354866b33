//! Runtime configuration: `.env`, environment, then command-line override.

use jobboard_core::DEFAULT_BASE_URL;

/// Environment variable naming the API base URL.
pub const API_URL_VAR: &str = "JOBBOARD_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    /// `cli_override` wins over `env_value`, which wins over the default.
    pub fn resolve(cli_override: Option<String>, env_value: Option<String>) -> Self {
        let api_url = cli_override
            .or(env_value)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { api_url }
    }

    pub fn load(cli_override: Option<String>) -> Self {
        Self::resolve(cli_override, std::env::var(API_URL_VAR).ok())
    }
}
