//! Export coordinator - fan-out/fan-in orchestration
//!
//! The coordinator resolves the worklist, prepares the directory tree,
//! spawns one task per shard, and blocks on the completion channel until
//! every shard has reported. Workers return their outcome lists over the
//! channel instead of touching shared counters, so the fan-in loop is the
//! only cross-task synchronization point in a run.

use super::report::RunReport;
use super::worker::ExportWorker;
use super::worklist::{build_worklist, partition};
use super::ExportOptions;
use crate::adapters::archives::ArchivesApi;
use crate::adapters::reformat::Reformatter;
use crate::core::layout::ExportLayout;
use crate::domain::{AspexError, ExportOutcome, Result};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Orchestrates one export run
pub struct ExportCoordinator {
    api: Arc<dyn ArchivesApi>,
    reformatter: Arc<dyn Reformatter>,
    options: ExportOptions,
    layout: ExportLayout,
}

impl ExportCoordinator {
    /// Create a coordinator over the given collaborators
    pub fn new(
        api: Arc<dyn ArchivesApi>,
        reformatter: Arc<dyn Reformatter>,
        options: ExportOptions,
        layout: ExportLayout,
    ) -> Self {
        Self {
            api,
            reformatter,
            options,
            layout,
        }
    }

    /// Execute the export
    ///
    /// `repository_id` 0 exports every repository; `resource_id` 0 exports
    /// every resource in scope. Returns the classified run report; per-item
    /// failures are recorded in the report, never propagated as errors.
    pub async fn execute(&self, repository_id: u32, resource_id: u32) -> Result<RunReport> {
        let start = Instant::now();

        tracing::info!(
            repository = repository_id,
            resource = resource_id,
            format = %self.options.format,
            "building worklist"
        );
        let items = build_worklist(self.api.as_ref(), repository_id, resource_id).await?;

        if items.is_empty() {
            tracing::warn!("worklist is empty, nothing to export");
            let report = RunReport::from_outcomes(Vec::new(), start.elapsed());
            report.write_to(self.layout.work_dir())?;
            return Ok(report);
        }

        let slugs: BTreeSet<&str> = items
            .iter()
            .map(|item| item.repository_slug.as_str())
            .collect();
        self.layout
            .ensure_repository_dirs(slugs, self.options.unpublished_resources)?;

        // never spawn more workers than there are items
        let worker_count = self.options.workers.min(items.len());
        let shards = partition(&items, worker_count);
        let shard_count = shards.len();

        tracing::info!(
            items = items.len(),
            workers = worker_count,
            shards = shard_count,
            "partitioned worklist"
        );

        let date_stamp = chrono::Local::now().format("%Y%m%d").to_string();
        let worker = Arc::new(ExportWorker::new(
            Arc::clone(&self.api),
            Arc::clone(&self.reformatter),
            self.options.clone(),
            self.layout.clone(),
            date_stamp,
        ));

        let (tx, mut rx) = mpsc::channel::<Vec<ExportOutcome>>(shard_count);
        for (index, shard) in shards.into_iter().enumerate() {
            let worker = Arc::clone(&worker);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcomes = worker.run(&shard, index + 1).await;
                // the receiver stays alive until every shard has reported
                let _ = tx.send(outcomes).await;
            });
        }
        drop(tx);

        // fan-in barrier: exactly one receive per shard, arrival order is
        // irrelevant, and reporting waits for the last shard
        let mut outcomes = Vec::with_capacity(items.len());
        for _ in 0..shard_count {
            match rx.recv().await {
                Some(shard_outcomes) => {
                    tracing::info!(
                        results = shard_outcomes.len(),
                        "adding worker results to run totals"
                    );
                    outcomes.extend(shard_outcomes);
                }
                None => {
                    return Err(AspexError::Report(
                        "a worker terminated without reporting its outcomes".to_string(),
                    ));
                }
            }
        }

        let report = RunReport::from_outcomes(outcomes, start.elapsed());
        report.log_summary();

        let report_path = report.write_to(self.layout.work_dir())?;
        tracing::info!(path = %report_path.display(), "wrote run report");

        self.layout.remove_empty_dirs()?;

        Ok(report)
    }
}
