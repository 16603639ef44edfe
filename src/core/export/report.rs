//! Outcome classification and run reporting
//!
//! The report is built once from the full outcome multiset, after every
//! worker has reported. Classification matches the closed status set
//! exhaustively, so the four bucket counts always sum to the total.

use crate::domain::{AspexError, ExportOutcome, OutcomeStatus, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the plain-text report file written into the work directory
pub const REPORT_FILE_NAME: &str = "aspex-export-report.txt";

/// Aggregate view over all outcomes of one run
#[derive(Debug)]
pub struct RunReport {
    elapsed: Duration,
    successes: Vec<ExportOutcome>,
    skipped: Vec<ExportOutcome>,
    warnings: Vec<ExportOutcome>,
    errors: Vec<ExportOutcome>,
}

impl RunReport {
    /// Classify the run's outcomes into status buckets
    pub fn from_outcomes(outcomes: Vec<ExportOutcome>, elapsed: Duration) -> Self {
        let mut report = Self {
            elapsed,
            successes: Vec::new(),
            skipped: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        };

        for outcome in outcomes {
            match outcome.status {
                OutcomeStatus::Success => report.successes.push(outcome),
                OutcomeStatus::Skipped => report.skipped.push(outcome),
                OutcomeStatus::Warning => report.warnings.push(outcome),
                OutcomeStatus::Error => report.errors.push(outcome),
            }
        }

        report
    }

    /// Wall-clock duration from run start to report construction
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total number of processed work items
    pub fn total(&self) -> usize {
        self.successes.len() + self.skipped.len() + self.warnings.len() + self.errors.len()
    }

    /// Number of clean exports
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of resources filtered out by the publish filter
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Number of exports that completed with warnings
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Number of items that failed to export
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Outcomes that completed with warnings
    pub fn warnings(&self) -> &[ExportOutcome] {
        &self.warnings
    }

    /// Outcomes that failed
    pub fn errors(&self) -> &[ExportOutcome] {
        &self.errors
    }

    /// Render the report as plain text
    ///
    /// Every WARNING and ERROR outcome gets its own detail line with message
    /// newlines flattened to spaces.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("ASPEX EXPORT REPORT\n");
        out.push_str("===================\n");
        out.push_str(&format!("Execution time: {:.2?}\n", self.elapsed));
        out.push_str(&format!("{} resources processed:\n", self.total()));
        out.push_str(&format!("  {} successful exports\n", self.success_count()));
        out.push_str(&format!("  {} skipped resources\n", self.skipped_count()));
        out.push_str(&format!("  {} exports with warnings\n", self.warning_count()));
        for warning in &self.warnings {
            out.push_str(&format!(
                "    WARNING {} {}\n",
                warning.uri,
                warning.detail_flattened()
            ));
        }
        out.push_str(&format!("  {} errors encountered\n", self.error_count()));
        for error in &self.errors {
            out.push_str(&format!(
                "    ERROR {} {}\n",
                error.uri,
                error.detail_flattened()
            ));
        }

        out
    }

    /// Persist the rendered report into `dir`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(REPORT_FILE_NAME);
        std::fs::write(&path, self.render()).map_err(|e| {
            AspexError::Report(format!("could not write report to {}: {e}", path.display()))
        })?;
        Ok(path)
    }

    /// Log the run totals
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total(),
            successes = self.success_count(),
            skipped = self.skipped_count(),
            warnings = self.warning_count(),
            errors = self.error_count(),
            elapsed_secs = self.elapsed.as_secs_f64(),
            "export run complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_outcomes() -> Vec<ExportOutcome> {
        vec![
            ExportOutcome::success("/repositories/2/resources/1"),
            ExportOutcome::skipped("/repositories/2/resources/2"),
            ExportOutcome::warning("/repositories/2/resources/3", "failed EAD2002 validation"),
            ExportOutcome::error("", "connection refused"),
            ExportOutcome::success("/repositories/2/resources/5"),
        ]
    }

    #[test]
    fn test_classification_counts_sum_to_total() {
        let report = RunReport::from_outcomes(sample_outcomes(), Duration::from_secs(3));

        assert_eq!(report.total(), 5);
        assert_eq!(
            report.success_count()
                + report.skipped_count()
                + report.warning_count()
                + report.error_count(),
            report.total()
        );
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_classification_is_commutative() {
        // shard outcome lists may arrive in any order
        let forward = RunReport::from_outcomes(sample_outcomes(), Duration::from_secs(1));

        let mut reversed_outcomes = sample_outcomes();
        reversed_outcomes.reverse();
        let reversed = RunReport::from_outcomes(reversed_outcomes, Duration::from_secs(1));

        assert_eq!(forward.success_count(), reversed.success_count());
        assert_eq!(forward.skipped_count(), reversed.skipped_count());
        assert_eq!(forward.warning_count(), reversed.warning_count());
        assert_eq!(forward.error_count(), reversed.error_count());
    }

    #[test]
    fn test_render_lists_warning_and_error_details() {
        let report = RunReport::from_outcomes(sample_outcomes(), Duration::from_secs(3));
        let rendered = report.render();

        assert!(rendered.starts_with("ASPEX EXPORT REPORT\n===================\n"));
        assert!(rendered.contains("5 resources processed:"));
        assert!(rendered.contains("2 successful exports"));
        assert!(rendered.contains("1 skipped resources"));
        assert!(rendered
            .contains("WARNING /repositories/2/resources/3 failed EAD2002 validation"));
        assert!(rendered.contains("ERROR  connection refused"));
    }

    #[test]
    fn test_render_flattens_multiline_detail() {
        let outcomes = vec![ExportOutcome::error(
            "/repositories/2/resources/9",
            "line 1\nline 2",
        )];
        let report = RunReport::from_outcomes(outcomes, Duration::from_secs(1));

        assert!(report.render().contains("line 1 line 2"));
    }

    #[test]
    fn test_write_to_persists_report() {
        let temp = tempfile::TempDir::new().unwrap();
        let report = RunReport::from_outcomes(sample_outcomes(), Duration::from_secs(3));

        let path = report.write_to(temp.path()).unwrap();
        assert_eq!(path, temp.path().join(REPORT_FILE_NAME));

        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, report.render());
    }

    #[test]
    fn test_empty_run_renders_zero_counts() {
        let report = RunReport::from_outcomes(Vec::new(), Duration::from_secs(0));
        let rendered = report.render();

        assert!(rendered.contains("0 resources processed:"));
        assert!(rendered.contains("0 errors encountered"));
    }
}
