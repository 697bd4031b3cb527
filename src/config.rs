//! YAML configuration file support.
//!
//! One file configures the normalizer, the match ranking and, optionally, a
//! small license registry for deployments that do not bring their own.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "license scanner"
//!
//! canonical:
//!   version: 1
//!   max_fixpoint_iterations: 32
//!   html_extensions: ["html", "htm", "xhtml"]
//!   wrap_width: 80
//!
//! matcher:
//!   threshold: 95.0
//!   max_results: 3
//!
//! licenses:
//!   - key: "mit"
//!     title: "MIT License"
//!   - key: "gpl-3.0"
//!     title: "GNU General Public License v3.0"
//!     name_without_version: "GNU General Public License"
//!   - key: "other"
//!     title: "Other"
//!     pseudo: true
//! ```

use std::fs;
use std::path::Path;

use canonical::{CanonicalizeConfig, LicenseEntry, StaticRegistry};
use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct LicfpConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalizeConfig,

    #[serde(default)]
    pub matcher: MatchConfig,

    /// Licenses whose titles the normalizer strips. Empty means the caller
    /// supplies its own registry.
    #[serde(default)]
    pub licenses: Vec<LicenseYamlEntry>,
}

impl LicfpConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: LicfpConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("canonical: {err}")))?;
        self.matcher
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))?;

        for (idx, entry) in self.licenses.iter().enumerate() {
            entry.validate(idx)?;
        }
        Ok(())
    }

    /// Builds an in-memory registry from the `licenses` section.
    pub fn registry(&self) -> StaticRegistry {
        StaticRegistry::new(self.licenses.iter().map(LicenseYamlEntry::to_entry).collect())
    }
}

impl Default for LicfpConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: CanonicalizeConfig::default(),
            matcher: MatchConfig::default(),
            licenses: Vec::new(),
        }
    }
}

/// One license in the `licenses` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LicenseYamlEntry {
    pub key: String,

    pub title: String,

    /// Defaults to the title.
    #[serde(default)]
    pub name_without_version: Option<String>,

    /// Regex source; derived from the title when absent.
    #[serde(default)]
    pub title_pattern: Option<String>,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub pseudo: bool,
}

impl LicenseYamlEntry {
    fn validate(&self, idx: usize) -> Result<(), ConfigLoadError> {
        if self.key.trim().is_empty() {
            return Err(ConfigLoadError::Validation(format!(
                "licenses[{idx}].key must not be empty"
            )));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigLoadError::Validation(format!(
                "licenses[{idx}].title must not be empty"
            )));
        }
        Ok(())
    }

    fn to_entry(&self) -> LicenseEntry {
        let name = self
            .name_without_version
            .clone()
            .unwrap_or_else(|| self.title.clone());
        let mut entry = LicenseEntry::new(self.key.clone(), self.title.clone(), name);
        if let Some(pattern) = &self.title_pattern {
            entry.title_pattern = pattern.clone();
        }
        entry.hidden = self.hidden;
        entry.pseudo = self.pseudo;
        entry
    }
}
