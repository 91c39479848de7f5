use std::path::{Path, PathBuf};

use guidelines_common::store::{DEFAULT_STORE_PATH, GuidelineStore};

use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON guideline store. Relative paths resolve against the working directory.
    pub store_path: PathBuf,
    /// When set, serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `DISASTER_GUIDELINES_PATH` (default: "gov_guidelines.json")
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let store_path = match var("DISASTER_GUIDELINES_PATH") {
            Some(path) if path.trim().is_empty() => {
                return Err(AppError::Config(
                    "DISASTER_GUIDELINES_PATH must not be empty".to_string(),
                ));
            }
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_STORE_PATH),
        };

        let tcp_listen_addr = var("MCP_TCP_LISTEN_ADDR").filter(|addr| !addr.trim().is_empty());

        Ok(Self {
            store_path,
            tcp_listen_addr,
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn store(&self) -> GuidelineStore {
        GuidelineStore::new(&self.store_path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).expect("config");
        assert_eq!(config.store_path(), Path::new("gov_guidelines.json"));
        assert!(config.tcp_listen_addr.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DISASTER_GUIDELINES_PATH", "/srv/data/guidelines.json"),
            ("MCP_TCP_LISTEN_ADDR", "127.0.0.1:7400"),
        ])
        .expect("config");
        assert_eq!(config.store().path(), Path::new("/srv/data/guidelines.json"));
        assert_eq!(config.tcp_listen_addr.as_deref(), Some("127.0.0.1:7400"));
    }

    #[test]
    fn rejects_empty_store_path() {
        let err = config_from(&[("DISASTER_GUIDELINES_PATH", "  ")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn blank_listen_addr_means_stdio() {
        let config = config_from(&[("MCP_TCP_LISTEN_ADDR", "")]).expect("config");
        assert!(config.tcp_listen_addr.is_none());
    }
}
