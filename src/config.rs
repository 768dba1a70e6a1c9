//! Optional TOML configuration for the FIA endpoint and model defaults.
//!
//! Every key is optional; a missing file section falls back to the
//! published defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::YieldError;
use crate::fia::DEFAULT_BASE_URL;
use crate::models::{TreeMeasurement, DEFAULT_MERCH_TOP, DEFAULT_STAND_AGE};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fia: FiaConfig,
    pub defaults: ModelDefaults,
}

/// FIA EVALIDator connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiaConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for FiaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl FiaConfig {
    /// Base URL with a guaranteed trailing slash, so endpoint names can be
    /// appended directly.
    pub fn normalized_base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }
}

/// Defaults applied when a measurement omits a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDefaults {
    pub merch_top: f64,
    pub age: u32,
    pub thinned: bool,
}

impl Default for ModelDefaults {
    fn default() -> Self {
        Self {
            merch_top: DEFAULT_MERCH_TOP,
            age: DEFAULT_STAND_AGE,
            thinned: true,
        }
    }
}

impl ModelDefaults {
    /// Build a measurement, taking any unset option from these defaults.
    pub fn measurement(
        &self,
        dbh: f64,
        total_height: f64,
        merch_top: Option<f64>,
        age: Option<u32>,
        thinned: Option<bool>,
    ) -> TreeMeasurement {
        TreeMeasurement {
            dbh,
            total_height,
            merch_top: merch_top.unwrap_or(self.merch_top),
            age: age.unwrap_or(self.age),
            thinned: thinned.unwrap_or(self.thinned),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, YieldError> {
        let config: Config = toml::from_str(content)?;
        if config.fia.base_url.trim().is_empty() {
            return Err(YieldError::Config("fia.base_url must not be empty".to_string()));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, YieldError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fia.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.fia.timeout_secs, 30);
        assert_eq!(config.defaults.merch_top, 3.0);
        assert_eq!(config.defaults.age, 15);
        assert!(config.defaults.thinned);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            [defaults]
            merch_top = 6.0
            thinned = false
            "#,
        )
        .unwrap();
        assert_eq!(config.defaults.merch_top, 6.0);
        assert_eq!(config.defaults.age, 15);
        assert!(!config.defaults.thinned);
        assert_eq!(config.fia, FiaConfig::default());
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let err = Config::from_toml_str("[fia]\nbase_url = \"  \"").unwrap_err();
        assert!(matches!(err, YieldError::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::from_toml_str("[defaults\nage = ").unwrap_err();
        assert!(err.to_string().starts_with("Config error"));
    }

    #[test]
    fn test_normalized_base_url() {
        let mut fia = FiaConfig::default();
        assert!(fia.normalized_base_url().ends_with("Evalidator/"));
        fia.base_url = "http://localhost:8080/api".to_string();
        assert_eq!(fia.normalized_base_url(), "http://localhost:8080/api/");
    }

    #[test]
    fn test_measurement_from_defaults() {
        let defaults = ModelDefaults {
            merch_top: 4.0,
            age: 25,
            thinned: false,
        };
        let tree = defaults.measurement(10.0, 60.0, None, Some(30), None);
        assert_eq!(tree.merch_top, 4.0);
        assert_eq!(tree.age, 30);
        assert!(!tree.thinned);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fia]\ntimeout_secs = 5").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.fia.timeout_secs, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/loblolly.toml").unwrap_err();
        assert!(matches!(err, YieldError::Io(_)));
    }
}
