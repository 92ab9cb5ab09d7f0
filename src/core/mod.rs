//! Core functionality for the engine
//!
//! This module contains the execution engine and its data structures.

pub mod batch;

// Re-export commonly used types
pub use batch::{
    BatchConfig, BatchHooks, BatchSummary, CancellationFlag, ItemFailure, ItemOutcome,
    SlidingWindowExecutor, WaveExecutor,
};
