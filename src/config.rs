//! Settings read from the environment (after `.env` is loaded).

use crate::services::carto::DEFAULT_BASE_URL;

pub const DEFAULT_LOG_FILE: &str = "logs/civic_data.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub carto_base_url: String,
    pub carto_api_key: Option<String>,
    pub log_file_path: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            carto_base_url: get("CARTO_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            carto_api_key: get("CARTO_API_KEY"),
            log_file_path: get("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        }
    }
}
