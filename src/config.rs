//! Backend endpoint configuration.
//!
//! One setting: the recognition service base URL, read from `API_URL` with
//! a local development default. Env files are loaded by [`crate::init`].

use std::env;

/// Default base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
}

impl Config {
    /// Read configuration from the environment. Unset or empty values fall
    /// back to [`DEFAULT_API_URL`].
    pub fn from_env() -> Self {
        let api_base_url = env::var("API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { api_base_url }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}
