//! Configuration management for Aspex.
//!
//! Aspex reads a TOML configuration file holding one or more named
//! ArchivesSpace environments plus export defaults. The loader performs
//! environment variable substitution (`${VAR_NAME}`) so credentials never
//! live in the file itself.
//!
//! # Example Configuration
//!
//! ```toml
//! [environments.dev]
//! base_url = "https://aspace-dev.library.edu/api"
//! username = "exporter"
//! password = "${ASPEX_DEV_PASSWORD}"
//! timeout_secs = 20
//!
//! [environments.prod]
//! base_url = "https://aspace.library.edu/api"
//! username = "exporter"
//! password = "${ASPEX_PROD_PASSWORD}"
//!
//! [export]
//! format = "ead"
//! workers = 8
//! validate = false
//! export_location = "aspace-exports"
//! ```
//!
//! CLI flags override the `[export]` defaults; the environment is selected
//! with `--environment <name>`.

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{AspexConfig, EnvironmentConfig, ExportDefaults};
