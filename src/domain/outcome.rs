//! Per-item export outcomes
//!
//! Every work item that enters a worker's pipeline produces exactly one
//! [`ExportOutcome`]. The status set is closed: classification code matches
//! exhaustively, so adding a status is a compile-time-checked change.

use std::fmt;

/// Result classification for one processed work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeStatus {
    /// Record exported cleanly
    Success,

    /// Record exported but needs human review (e.g. failed validation)
    Warning,

    /// Record filtered out before export (not a failure)
    Skipped,

    /// Record could not be exported
    Error,
}

impl OutcomeStatus {
    /// Status tag as it appears in reports and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "SUCCESS",
            OutcomeStatus::Warning => "WARNING",
            OutcomeStatus::Skipped => "SKIPPED",
            OutcomeStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of processing one work item
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Status classification
    pub status: OutcomeStatus,

    /// Canonical URI of the record, empty if it was never retrieved
    pub uri: String,

    /// Failure or validation detail, empty for clean exports
    pub detail: String,
}

impl ExportOutcome {
    /// A clean export
    pub fn success(uri: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Success,
            uri: uri.into(),
            detail: String::new(),
        }
    }

    /// An export that completed with a validation warning
    pub fn warning(uri: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Warning,
            uri: uri.into(),
            detail: detail.into(),
        }
    }

    /// A record filtered out by the publish filter
    pub fn skipped(uri: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Skipped,
            uri: uri.into(),
            detail: String::new(),
        }
    }

    /// A record that failed to export
    pub fn error(uri: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Error,
            uri: uri.into(),
            detail: detail.into(),
        }
    }

    /// Detail with newlines flattened to spaces, for single-line report rows
    pub fn detail_flattened(&self) -> String {
        self.detail.replace(['\r', '\n'], " ")
    }
}
