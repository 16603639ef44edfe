//! Configuration schema
//!
//! Type-safe configuration structs deserialized from TOML.

use secrecy::SecretString;
use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

use crate::domain::{AspexError, Result};

/// Default client timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Default number of export workers
const DEFAULT_WORKERS: usize = 8;

/// Top-level Aspex configuration
#[derive(Debug, Deserialize)]
pub struct AspexConfig {
    /// Named ArchivesSpace environments (dev, prod, ...)
    pub environments: BTreeMap<String, EnvironmentConfig>,

    /// Export defaults, overridable from the CLI
    #[serde(default)]
    pub export: ExportDefaults,
}

impl AspexConfig {
    /// Look up an environment by key
    pub fn environment(&self, key: &str) -> Result<&EnvironmentConfig> {
        self.environments.get(key).ok_or_else(|| {
            AspexError::Configuration(format!(
                "environment `{key}` is not defined in the configuration file"
            ))
        })
    }

    /// Validate the configuration
    ///
    /// Checks that at least one environment is defined, that every
    /// environment has a parseable base URL and credentials, and that the
    /// export defaults are usable.
    pub fn validate(&self) -> Result<()> {
        if self.environments.is_empty() {
            return Err(AspexError::Configuration(
                "no environments defined, add an [environments.<name>] section".to_string(),
            ));
        }

        for (key, env) in &self.environments {
            env.validate(key)?;
        }

        self.export.validate()
    }
}

/// Connection settings for one ArchivesSpace backend
#[derive(Debug, Deserialize)]
pub struct EnvironmentConfig {
    /// API base URL, e.g. `https://aspace.library.edu/api`
    pub base_url: String,

    /// API username
    pub username: String,

    /// API password, substituted from the environment via `${VAR}`
    pub password: SecretString,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl EnvironmentConfig {
    fn validate(&self, key: &str) -> Result<()> {
        Url::parse(&self.base_url).map_err(|e| {
            AspexError::Configuration(format!(
                "environment `{key}` has an invalid base_url `{}`: {e}",
                self.base_url
            ))
        })?;

        if self.username.is_empty() {
            return Err(AspexError::Configuration(format!(
                "environment `{key}` has an empty username"
            )));
        }

        if self.timeout_secs == 0 {
            return Err(AspexError::Configuration(format!(
                "environment `{key}` has timeout_secs = 0"
            )));
        }

        Ok(())
    }
}

/// Export defaults from the `[export]` section
///
/// Every field can be overridden by a CLI flag; the file only provides the
/// baseline for a site's usual runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    /// Export format, `ead` or `marc`
    pub format: String,

    /// Number of parallel export workers
    pub workers: usize,

    /// Validate exported records against their schema
    pub validate: bool,

    /// Include unpublished notes in exported records
    pub unpublished_notes: bool,

    /// Export unpublished resources into an `unpublished` subdirectory
    pub unpublished_resources: bool,

    /// Pretty-print EAD files after writing
    pub reformat: bool,

    /// Policy for records that fail validation, `warn` or `reject`
    pub on_invalid: String,

    /// Directory the export tree is written under
    pub export_location: String,
}

impl ExportDefaults {
    fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(AspexError::Configuration(
                "export.workers must be at least 1".to_string(),
            ));
        }

        if self.format != "ead" && self.format != "marc" {
            return Err(AspexError::Configuration(format!(
                "export.format must be `ead` or `marc`, got `{}`",
                self.format
            )));
        }

        if self.on_invalid != "warn" && self.on_invalid != "reject" {
            return Err(AspexError::Configuration(format!(
                "export.on_invalid must be `warn` or `reject`, got `{}`",
                self.on_invalid
            )));
        }

        if self.export_location.is_empty() {
            return Err(AspexError::Configuration(
                "export.export_location must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            format: "ead".to_string(),
            workers: DEFAULT_WORKERS,
            validate: false,
            unpublished_notes: false,
            unpublished_resources: false,
            reformat: false,
            on_invalid: "warn".to_string(),
            export_location: "aspace-exports".to_string(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
