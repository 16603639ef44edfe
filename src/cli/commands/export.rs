//! Export command implementation
//!
//! Flag cross-checks and configuration merging happen here, before any
//! network access; the coordinator owns everything after that. Exit codes:
//! 0 for a completed run (per-item failures live in the report), 2 for
//! configuration errors, 4 for connection/worklist failures, 5 otherwise.

use crate::adapters::archives::ArchivesClient;
use crate::adapters::reformat::XmllintReformatter;
use crate::config::load_config;
use crate::config::schema::ExportDefaults;
use crate::core::export::{ExportCoordinator, ExportOptions};
use crate::core::layout::ExportLayout;
use crate::domain::{AspexError, Result};
use crate::logging::{init_logging, LOG_FILE_NAME};
use clap::Args;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Environment key from the configuration file
    #[arg(short, long)]
    pub environment: String,

    /// Export format, `ead` or `marc` (defaults to the configured format)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Repository id to export, 0 exports all repositories
    #[arg(short, long, default_value_t = 0)]
    pub repository: u32,

    /// Resource id to export, 0 exports every resource in scope
    #[arg(long, default_value_t = 0)]
    pub resource: u32,

    /// Number of parallel export workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Validate exported records against their schema
    #[arg(long)]
    pub validate: bool,

    /// Include unpublished notes in exported records
    #[arg(long)]
    pub unpublished_notes: bool,

    /// Export unpublished resources instead of skipping them
    #[arg(long)]
    pub unpublished_resources: bool,

    /// Pretty-print EAD files after export
    #[arg(long)]
    pub reformat: bool,

    /// Policy for records failing validation, `warn` or `reject`
    #[arg(long)]
    pub on_invalid: Option<String>,

    /// Directory to write the export tree into
    #[arg(long)]
    pub export_location: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str, log_level: &str) -> anyhow::Result<i32> {
        // a single resource only makes sense within a known repository;
        // reject the combination before touching configuration or network
        if self.resource != 0 && self.repository == 0 {
            eprintln!(
                "a single resource cannot be exported without a repository, set --repository"
            );
            return Ok(2);
        }

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let environment = match config.environment(&self.environment) {
            Ok(environment) => environment,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let options = match self.merge_options(&config.export) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let work_dir = self
            .export_location
            .clone()
            .unwrap_or_else(|| config.export.export_location.clone());
        let layout = ExportLayout::new(work_dir);
        if let Err(e) = layout.ensure_work_dir() {
            eprintln!("{e}");
            return Ok(2);
        }

        let _logging_guard = match init_logging(log_level, Some(layout.work_dir())) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Failed to initialize logging: {e}");
                return Ok(5);
            }
        };

        println!(
            "Running aspex {} export, logging to {}",
            options.format,
            layout.work_dir().join(LOG_FILE_NAME).display()
        );
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            format = %options.format,
            "starting aspex export"
        );

        let client = match ArchivesClient::connect(environment).await {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "could not establish an ArchivesSpace session");
                eprintln!("Failed to connect to ArchivesSpace: {e}");
                return Ok(4);
            }
        };

        let coordinator = ExportCoordinator::new(
            Arc::new(client),
            Arc::new(XmllintReformatter),
            options,
            layout,
        );

        let report = match coordinator.execute(self.repository, self.resource).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "export run failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!();
        print!("{}", report.render());

        Ok(0)
    }

    fn merge_options(&self, defaults: &ExportDefaults) -> Result<ExportOptions> {
        let format = match &self.format {
            Some(format) => format.parse()?,
            None => defaults.format.parse()?,
        };

        let on_invalid = match &self.on_invalid {
            Some(policy) => policy.parse()?,
            None => defaults.on_invalid.parse()?,
        };

        let workers = self.workers.unwrap_or(defaults.workers);
        if workers == 0 {
            return Err(AspexError::Configuration(
                "--workers must be at least 1".to_string(),
            ));
        }

        Ok(ExportOptions {
            format,
            workers,
            validate: self.validate || defaults.validate,
            unpublished_notes: self.unpublished_notes || defaults.unpublished_notes,
            unpublished_resources: self.unpublished_resources || defaults.unpublished_resources,
            reformat: self.reformat || defaults.reformat,
            on_invalid,
        })
    }
}

/// Map a fatal run error to its exit code class
fn exit_code_for(error: &AspexError) -> i32 {
    match error {
        AspexError::Configuration(_) => 2,
        AspexError::Worklist(_) | AspexError::Archives(_) => 4,
        _ => 5,
    }
}
