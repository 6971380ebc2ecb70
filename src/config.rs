//! Service configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file named by
//! `ROSTER_CONFIG`, then individual environment variables.
//!
//! | Variable | Field |
//! |---|---|
//! | `HOST` | `host` |
//! | `PORT` | `port` |
//! | `ROSTER_DUPLICATE_POLICY` | `duplicate_policy` (`name` / `name_and_occupation`) |
//! | `ROSTER_SEED` | `seed` |
//! | `ROSTER_CHANGE_DELAY_MS` | `change_delay_ms` |

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::employees::{DuplicatePolicy, EmployeeStore};

/// Environment variable naming the YAML config file.
pub const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Duplicate rule applied on create.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    /// Load the startup roster.
    #[serde(default = "default_seed")]
    pub seed: bool,
    /// Pause before a change batch is summarized.
    #[serde(default)]
    pub change_delay_ms: u64,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_seed() -> bool { true }

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            duplicate_policy: DuplicatePolicy::default(),
            seed: default_seed(),
            change_delay_ms: 0,
        }
    }
}

impl ServiceConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Load from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = match vars.get(CONFIG_PATH_ENV) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(vars)?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> Result<(), ConfigError> {
        if let Some(host) = vars.get("HOST") {
            self.host = host.clone();
        }
        if let Some(port) = vars.get("PORT") {
            self.port = parse_var("PORT", port)?;
        }
        if let Some(policy) = vars.get("ROSTER_DUPLICATE_POLICY") {
            self.duplicate_policy = match policy.as_str() {
                "name" => DuplicatePolicy::Name,
                "name_and_occupation" => DuplicatePolicy::NameAndOccupation,
                other => return Err(invalid("ROSTER_DUPLICATE_POLICY", other)),
            };
        }
        if let Some(seed) = vars.get("ROSTER_SEED") {
            self.seed = parse_var("ROSTER_SEED", seed)?;
        }
        if let Some(delay) = vars.get("ROSTER_CHANGE_DELAY_MS") {
            self.change_delay_ms = parse_var("ROSTER_CHANGE_DELAY_MS", delay)?;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn change_delay(&self) -> Duration {
        Duration::from_millis(self.change_delay_ms)
    }

    /// Build the store this configuration describes.
    pub fn build_store(&self) -> EmployeeStore {
        let store = if self.seed {
            EmployeeStore::seeded()
        } else {
            EmployeeStore::new()
        };
        store.with_policy(self.duplicate_policy)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.build_store().len(), 11);
    }

    #[test]
    fn test_env_overrides() {
        let config = ServiceConfig::from_vars(&vars(&[
            ("PORT", "9090"),
            ("ROSTER_DUPLICATE_POLICY", "name_and_occupation"),
            ("ROSTER_SEED", "false"),
            ("ROSTER_CHANGE_DELAY_MS", "2000"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::NameAndOccupation);
        assert_eq!(config.change_delay(), Duration::from_secs(2));

        let store = config.build_store();
        assert!(store.is_empty());
        assert_eq!(store.policy(), DuplicatePolicy::NameAndOccupation);
    }

    #[test]
    fn test_invalid_env_value() {
        let err = ServiceConfig::from_vars(&vars(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "PORT"));

        let err = ServiceConfig::from_vars(&vars(&[("ROSTER_DUPLICATE_POLICY", "email")]));
        assert!(err.is_err());
    }

    #[test]
    fn test_yaml_file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: 7000\nseed: false\nduplicate_policy: name_and_occupation").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = ServiceConfig::from_vars(&vars(&[
            (CONFIG_PATH_ENV, path.as_str()),
            ("PORT", "7001"),
        ]))
        .unwrap();
        assert_eq!(config.port, 7001);
        assert!(!config.seed);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::NameAndOccupation);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_missing_yaml_file() {
        let err = ServiceConfig::from_vars(&vars(&[(CONFIG_PATH_ENV, "/nonexistent/roster.yaml")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
