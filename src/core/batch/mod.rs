//! Batch execution engine
//!
//! This module applies an asynchronous operation to a list of independent
//! work items under a concurrency cap. Two orchestration strategies are
//! provided: the chunked-wave executor (fixed-size chunks with a barrier
//! between them) and the sliding-window executor (a rolling in-flight set
//! with no barrier). Both produce one order-preserving outcome per item and
//! never raise for an individual item's failure.

mod config;
mod outcome;
mod retry;
mod wave;
mod window;

// Re-export all public types
pub use config::{BatchConfig, BatchHooks, CancellationFlag, ItemCallback, ProgressCallback};
pub use outcome::{BatchSummary, ItemFailure, ItemOutcome};
pub use wave::WaveExecutor;
pub use window::SlidingWindowExecutor;
