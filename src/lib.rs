// Aspex - ArchivesSpace Bulk Export Tool
// Copyright (c) 2025 Aspex Contributors
// Licensed under the MIT License

//! # Aspex - ArchivesSpace Bulk Export
//!
//! Aspex is a command-line tool that bulk-exports archival description
//! records from an ArchivesSpace backend: finding aids as EAD-XML or
//! bibliographic records as MARC21, across any number of repositories,
//! with parallel workers, optional schema validation, and a classified
//! run report.
//!
//! ## Architecture
//!
//! Aspex follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The export engine (worklist, workers, coordinator, report)
//! - [`adapters`] - External integrations (ArchivesSpace API, xmllint)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aspex::adapters::archives::ArchivesClient;
//! use aspex::adapters::reformat::XmllintReformatter;
//! use aspex::config::load_config;
//! use aspex::core::export::{ExportCoordinator, ExportOptions, ExportFormat, InvalidPolicy};
//! use aspex::core::layout::ExportLayout;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("aspex.toml")?;
//!     let client = ArchivesClient::connect(config.environment("dev")?).await?;
//!
//!     let options = ExportOptions {
//!         format: ExportFormat::Ead,
//!         workers: 8,
//!         validate: true,
//!         unpublished_notes: false,
//!         unpublished_resources: false,
//!         reformat: false,
//!         on_invalid: InvalidPolicy::Warn,
//!     };
//!     let layout = ExportLayout::new("aspace-exports");
//!     layout.ensure_work_dir()?;
//!
//!     let coordinator = ExportCoordinator::new(
//!         Arc::new(client),
//!         Arc::new(XmllintReformatter),
//!         options,
//!         layout,
//!     );
//!     let report = coordinator.execute(0, 0).await?;
//!
//!     println!("{}", report.render());
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! The worklist is split into contiguous near-equal shards, one per worker.
//! Each worker runs as an independent task with no shared mutable state and
//! returns its outcome list over a completion channel; the coordinator
//! blocks until every shard has reported before classifying results. Two
//! workers never process the same work item, so export writes cannot
//! collide.
//!
//! ## Error Handling
//!
//! Aspex uses the [`domain::AspexError`] type for all errors. Configuration
//! and worklist failures abort the run with a distinct exit code; per-item
//! retrieval, validation, and write failures are recorded as outcomes in
//! the run report and never abort a shard.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
