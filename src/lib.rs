//! # docflow-rs
//!
//! A bounded-concurrency batch execution engine for document workflows:
//! apply an asynchronous operation to a list of independent work items while
//! capping how many execute simultaneously, with per-item retry, progress
//! reporting, and a complete, order-preserving result set that never raises
//! on a per-item failure.
//!
//! ## Features
//!
//! - **Chunked-Wave Execution**: fixed-size chunks run fully in parallel with a
//!   synchronization barrier between chunks, capping burst load predictably
//! - **Sliding-Window Execution**: a rolling in-flight set of at most N
//!   operations, launching a new one as soon as any slot frees
//! - **Per-Item Retry**: transient failures retried with a fixed delay, with
//!   callbacks fired exactly once per item on the final settled outcome
//! - **Order Preservation**: output always matches input ordering, regardless
//!   of completion order
//! - **Progress Reporting**: `(completed, total)` after every settled item
//! - **Bulk Service Helpers**: batteries-included `bulk_process` and
//!   `bulk_upload` against a document management service over HTTP
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docflow_rs::{BatchConfig, BatchHooks, WaveExecutor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = WaveExecutor::new(
//!         BatchConfig::new()
//!             .with_chunk_size(5)
//!             .with_max_retries(3),
//!     )?;
//!
//!     let items = vec!["a.pdf", "b.pdf", "c.pdf"];
//!     let hooks = BatchHooks::new()
//!         .with_progress(|done, total| println!("{done}/{total}"));
//!
//!     let outcomes = executor
//!         .run_with_hooks(items, |name, _index| async move {
//!             // any async operation returning Result<R, E>
//!             Ok::<_, docflow_rs::EngineError>(name.len())
//!         }, hooks)
//!         .await;
//!
//!     assert_eq!(outcomes.len(), 3);
//!     Ok(())
//! }
//! ```
//!
//! ## Bulk Service Mode
//!
//! ```rust,no_run
//! use docflow_rs::{BatchConfig, BatchHooks, DocumentRef, DocumentService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = DocumentService::new("https://docs.example.com/", None)?;
//!     let docs = vec![DocumentRef::new("41"), DocumentRef::new("42")];
//!     let report = service
//!         .bulk_process(docs, BatchConfig::default(), BatchHooks::new())
//!         .await?;
//!     println!("{} succeeded, {} failed", report.succeeded, report.failed);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod config;
pub mod core;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::{BatchProfile, HttpProfile, PerformanceProfile};
pub use utils::error::{EngineError, Result};

// Export the execution engine
pub use core::batch::{
    BatchConfig, BatchHooks, BatchSummary, CancellationFlag, ItemFailure, ItemOutcome,
    SlidingWindowExecutor, WaveExecutor,
};

// Export the document service surface
pub use services::documents::{
    BulkProcessReport, BulkUploadReport, DocumentBackend, DocumentRef, DocumentService,
    FileUpload, ProcessResponse, UploadResponse,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
