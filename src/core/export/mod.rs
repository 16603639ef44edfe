//! The concurrent batch-export engine
//!
//! A run flows through four stages: the worklist builder resolves every
//! (repository, resource) pair in scope, the partitioner splits the list
//! into near-equal contiguous shards, one worker per shard drives each item
//! through the export pipeline, and the coordinator joins the per-shard
//! outcome lists into a [`RunReport`].

pub mod coordinator;
pub mod report;
pub mod worker;
pub mod worklist;

pub use coordinator::ExportCoordinator;
pub use report::{RunReport, REPORT_FILE_NAME};
pub use worker::ExportWorker;
pub use worklist::{build_worklist, partition};

use crate::domain::AspexError;
use std::fmt;
use std::str::FromStr;

/// Export format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// EAD2002 finding aids
    Ead,

    /// MARC21 bibliographic records
    Marc,
}

impl ExportFormat {
    /// Format name as used in flags and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Ead => "ead",
            ExportFormat::Marc => "marc",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = AspexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ead" => Ok(ExportFormat::Ead),
            "marc" => Ok(ExportFormat::Marc),
            other => Err(AspexError::Configuration(format!(
                "unsupported format `{other}`, supported formats are `ead` or `marc`"
            ))),
        }
    }
}

/// What to do with a record that fails schema validation
///
/// `Warn` is the primary convention: the record is still written, diverted
/// to the `invalid` directory, and counted as a warning. `Reject` treats the
/// record as unexportable: nothing is written and the item counts as an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidPolicy {
    /// Write to `invalid/`, classify as WARNING
    #[default]
    Warn,

    /// Do not write, classify as ERROR
    Reject,
}

impl FromStr for InvalidPolicy {
    type Err = AspexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warn" => Ok(InvalidPolicy::Warn),
            "reject" => Ok(InvalidPolicy::Reject),
            other => Err(AspexError::Configuration(format!(
                "unsupported on-invalid policy `{other}`, supported policies are `warn` or `reject`"
            ))),
        }
    }
}

/// Immutable options for one export run
///
/// Built once from configuration and CLI flags, then passed by value into
/// every worker. Workers never share mutable run state.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Record format to export
    pub format: ExportFormat,

    /// Number of parallel workers
    pub workers: usize,

    /// Validate exported records against their schema
    pub validate: bool,

    /// Include unpublished notes in exported records
    pub unpublished_notes: bool,

    /// Export unpublished resources instead of skipping them
    pub unpublished_resources: bool,

    /// Pretty-print EAD files after writing
    pub reformat: bool,

    /// Policy for records that fail validation
    pub on_invalid: InvalidPolicy,
}
