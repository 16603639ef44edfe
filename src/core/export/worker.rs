//! The per-shard export pipeline
//!
//! Each worker owns one shard and processes it sequentially: fetch resource
//! metadata, apply the publish filter, fetch and validate the record, write
//! it into the layout, and emit exactly one outcome per item. Workers share
//! nothing mutable; their only output is the returned outcome list.

use super::{ExportFormat, ExportOptions, InvalidPolicy};
use crate::adapters::archives::ArchivesApi;
use crate::adapters::reformat::Reformatter;
use crate::core::layout::{ExportLayout, OutputCategory};
use crate::domain::{ExportOutcome, Resource, WorkItem};
use std::sync::Arc;

/// Emit a progress log line every this many processed items
const PROGRESS_INTERVAL: usize = 50;

/// One export worker, constructed per run and shared across shard tasks
pub struct ExportWorker {
    api: Arc<dyn ArchivesApi>,
    reformatter: Arc<dyn Reformatter>,
    options: ExportOptions,
    layout: ExportLayout,
    date_stamp: String,
}

impl ExportWorker {
    /// Create a worker over the given collaborators
    ///
    /// `date_stamp` is the run-scoped date used in MARC filenames, fixed at
    /// run start so every worker computes identical names.
    pub fn new(
        api: Arc<dyn ArchivesApi>,
        reformatter: Arc<dyn Reformatter>,
        options: ExportOptions,
        layout: ExportLayout,
        date_stamp: impl Into<String>,
    ) -> Self {
        Self {
            api,
            reformatter,
            options,
            layout,
            date_stamp: date_stamp.into(),
        }
    }

    /// Process one shard, yielding exactly one outcome per work item
    pub async fn run(&self, shard: &[WorkItem], worker_id: usize) -> Vec<ExportOutcome> {
        tracing::info!(
            worker = worker_id,
            resources = shard.len(),
            "starting worker"
        );

        let mut outcomes = Vec::with_capacity(shard.len());
        for (index, item) in shard.iter().enumerate() {
            if index > 0 && index % PROGRESS_INTERVAL == 0 {
                tracing::info!(worker = worker_id, completed = index, "worker progress");
            }
            outcomes.push(self.process_item(item, worker_id).await);
        }

        tracing::info!(
            worker = worker_id,
            processed = outcomes.len(),
            "worker finished"
        );
        outcomes
    }

    async fn process_item(&self, item: &WorkItem, worker_id: usize) -> ExportOutcome {
        let resource = match self
            .api
            .get_resource(item.repository_id, item.resource_id)
            .await
        {
            Ok(resource) => resource,
            Err(e) => {
                tracing::error!(
                    worker = worker_id,
                    repository = item.repository_id,
                    resource = item.resource_id,
                    error = %e,
                    "could not retrieve resource metadata"
                );
                return ExportOutcome::error("", e.to_string());
            }
        };

        if !self.options.unpublished_resources && !resource.publish {
            tracing::debug!(
                worker = worker_id,
                uri = %resource.uri,
                "resource not set to publish, skipping"
            );
            return ExportOutcome::skipped(resource.uri.clone());
        }

        match self.options.format {
            ExportFormat::Marc => self.export_marc(item, &resource, worker_id).await,
            ExportFormat::Ead => self.export_ead(item, &resource, worker_id).await,
        }
    }

    async fn export_marc(
        &self,
        item: &WorkItem,
        resource: &Resource,
        worker_id: usize,
    ) -> ExportOutcome {
        let record = match self
            .api
            .get_marc(
                item.repository_id,
                item.resource_id,
                self.options.unpublished_notes,
            )
            .await
        {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(
                    worker = worker_id,
                    uri = %resource.uri,
                    error = %e,
                    "could not retrieve MARC record"
                );
                return ExportOutcome::error(resource.uri.clone(), e.to_string());
            }
        };

        let filename =
            format!("{}_{}.xml", resource.merged_identifiers(), self.date_stamp).to_lowercase();

        // MARC exports of unpublished resources land in their own directory
        let category = if self.options.unpublished_resources && !resource.publish {
            OutputCategory::Unpublished
        } else {
            OutputCategory::Exports
        };

        let validation_failure = self
            .validation_failure(&record, ExportFormat::Marc)
            .map(|detail| format!("failed MARC21 validation: {detail}"));

        self.persist(item, resource, &record, filename, category, validation_failure, false, worker_id)
            .await
    }

    async fn export_ead(
        &self,
        item: &WorkItem,
        resource: &Resource,
        worker_id: usize,
    ) -> ExportOutcome {
        let record = match self
            .api
            .get_ead(
                item.repository_id,
                item.resource_id,
                self.options.unpublished_notes,
            )
            .await
        {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(
                    worker = worker_id,
                    uri = %resource.uri,
                    error = %e,
                    "could not retrieve EAD record"
                );
                return ExportOutcome::error(resource.uri.clone(), e.to_string());
            }
        };

        // EAD filenames carry no date stamp; exports are not date-partitioned
        let filename = format!("{}.xml", resource.merged_identifiers()).to_lowercase();

        let validation_failure = self
            .validation_failure(&record, ExportFormat::Ead)
            .map(|detail| format!("failed EAD2002 validation: {detail}"));

        self.persist(
            item,
            resource,
            &record,
            filename,
            OutputCategory::Exports,
            validation_failure,
            self.options.reformat,
            worker_id,
        )
        .await
    }

    fn validation_failure(&self, record: &[u8], format: ExportFormat) -> Option<String> {
        if !self.options.validate {
            return None;
        }

        let result = match format {
            ExportFormat::Ead => self.api.validate_ead(record),
            ExportFormat::Marc => self.api.validate_marc(record),
        };
        result.err()
    }

    /// Write the record and classify the item.
    ///
    /// A validation failure either diverts the file to `invalid/` and
    /// downgrades the outcome to WARNING, or rejects the item outright,
    /// depending on the configured policy. Reformatting runs after a
    /// successful write and never changes the outcome.
    #[allow(clippy::too_many_arguments)]
    async fn persist(
        &self,
        item: &WorkItem,
        resource: &Resource,
        record: &[u8],
        filename: String,
        mut category: OutputCategory,
        validation_failure: Option<String>,
        reformat: bool,
        worker_id: usize,
    ) -> ExportOutcome {
        if let Some(detail) = &validation_failure {
            match self.options.on_invalid {
                InvalidPolicy::Warn => {
                    tracing::warn!(
                        worker = worker_id,
                        uri = %resource.uri,
                        ead_id = resource.ead_id_or_default(),
                        detail = %detail,
                        "validation failed, writing to invalid directory"
                    );
                    category = OutputCategory::Invalid;
                }
                InvalidPolicy::Reject => {
                    tracing::error!(
                        worker = worker_id,
                        uri = %resource.uri,
                        detail = %detail,
                        "validation failed, record rejected"
                    );
                    return ExportOutcome::error(resource.uri.clone(), detail.clone());
                }
            }
        }

        let path = self
            .layout
            .resource_path(&item.repository_slug, category, &filename);

        if let Err(e) = tokio::fs::write(&path, record).await {
            tracing::error!(
                worker = worker_id,
                uri = %resource.uri,
                path = %path.display(),
                error = %e,
                "could not write record"
            );
            return ExportOutcome::error("", e.to_string());
        }

        if reformat {
            if let Err(e) = self.reformatter.reformat_in_place(&path).await {
                tracing::warn!(
                    worker = worker_id,
                    path = %path.display(),
                    error = %e,
                    "could not reformat exported file"
                );
            }
        }

        match validation_failure {
            Some(detail) => {
                tracing::warn!(
                    worker = worker_id,
                    uri = %resource.uri,
                    file = %filename,
                    "exported resource with warning"
                );
                ExportOutcome::warning(resource.uri.clone(), detail)
            }
            None => {
                tracing::debug!(
                    worker = worker_id,
                    uri = %resource.uri,
                    file = %filename,
                    "exported resource"
                );
                ExportOutcome::success(resource.uri.clone())
            }
        }
    }
}
