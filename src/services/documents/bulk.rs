//! Bulk call-site helpers
//!
//! Thin adapters over the chunked-wave executor: they supply the concrete
//! remote operation, let the retry wrapper treat application-level rejections
//! like transport failures, and post-process the outcome sequence into a
//! report. No concurrency logic lives here.

use tracing::info;

use crate::core::batch::{BatchConfig, BatchHooks, ItemOutcome, WaveExecutor};
use crate::utils::error::Result;

use super::{
    DocumentBackend, DocumentRef, DocumentService, FileUpload, ProcessResponse, UploadResponse,
};

/// Aggregate report for a bulk processing run
///
/// The outcome list remains the source of truth; `errors` is a preformatted
/// view for display, one line per failed document.
#[derive(Debug)]
pub struct BulkProcessReport {
    /// Total documents submitted
    pub total: usize,
    /// Documents the service accepted
    pub succeeded: usize,
    /// Documents that failed after retries
    pub failed: usize,
    /// One outcome per input document, in input order
    pub outcomes: Vec<ItemOutcome<DocumentRef, ProcessResponse>>,
    /// Formatted error lines, keyed by document identity
    pub errors: Vec<String>,
}

/// Aggregate report for a bulk upload run
#[derive(Debug)]
pub struct BulkUploadReport {
    /// Total files submitted
    pub total: usize,
    /// Files stored by the service
    pub succeeded: usize,
    /// Files that failed after retries
    pub failed: usize,
    /// One outcome per input file, in input order
    pub outcomes: Vec<ItemOutcome<FileUpload, UploadResponse>>,
}

/// Process many documents through any backend, bounded by the wave executor
pub async fn bulk_process<B>(
    backend: &B,
    docs: Vec<DocumentRef>,
    config: BatchConfig,
    hooks: BatchHooks<DocumentRef, ProcessResponse>,
) -> Result<BulkProcessReport>
where
    B: DocumentBackend + Clone,
{
    let executor = WaveExecutor::new(config)?;

    let op = {
        let backend = backend.clone();
        move |doc: DocumentRef, _index: usize| {
            let backend = backend.clone();
            async move { backend.process_document(&doc).await }
        }
    };

    let outcomes = executor.run_with_hooks(docs, op, hooks).await;

    let errors: Vec<String> = outcomes
        .iter()
        .filter_map(|outcome| {
            outcome
                .error_message()
                .map(|message| format!("{}: {}", outcome.item.display_name(), message))
        })
        .collect();

    let total = outcomes.len();
    let failed = errors.len();
    let report = BulkProcessReport {
        total,
        succeeded: total - failed,
        failed,
        outcomes,
        errors,
    };

    info!(
        total = report.total,
        succeeded = report.succeeded,
        failed = report.failed,
        "bulk process finished"
    );

    Ok(report)
}

/// Upload many files through any backend, bounded by the wave executor
pub async fn bulk_upload<B>(
    backend: &B,
    uploads: Vec<FileUpload>,
    config: BatchConfig,
    hooks: BatchHooks<FileUpload, UploadResponse>,
) -> Result<BulkUploadReport>
where
    B: DocumentBackend + Clone,
{
    let executor = WaveExecutor::new(config)?;

    let op = {
        let backend = backend.clone();
        move |upload: FileUpload, _index: usize| {
            let backend = backend.clone();
            async move { backend.upload_document(&upload).await }
        }
    };

    let outcomes = executor.run_with_hooks(uploads, op, hooks).await;

    let total = outcomes.len();
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    let report = BulkUploadReport {
        total,
        succeeded,
        failed: total - succeeded,
        outcomes,
    };

    info!(
        total = report.total,
        succeeded = report.succeeded,
        failed = report.failed,
        "bulk upload finished"
    );

    Ok(report)
}

impl DocumentService {
    /// Process many documents with this client
    pub async fn bulk_process(
        &self,
        docs: Vec<DocumentRef>,
        config: BatchConfig,
        hooks: BatchHooks<DocumentRef, ProcessResponse>,
    ) -> Result<BulkProcessReport> {
        bulk_process(self, docs, config, hooks).await
    }

    /// Upload many files with this client
    pub async fn bulk_upload(
        &self,
        uploads: Vec<FileUpload>,
        config: BatchConfig,
        hooks: BatchHooks<FileUpload, UploadResponse>,
    ) -> Result<BulkUploadReport> {
        bulk_upload(self, uploads, config, hooks).await
    }
}
