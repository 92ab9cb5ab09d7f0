//! Chunked-wave executor
//!
//! Splits the input into consecutive fixed-size chunks and runs each chunk
//! fully in parallel. A chunk boundary is a synchronization barrier: the next
//! chunk cannot start until every item in the current chunk, including its
//! retries, has resolved. Burst load is therefore capped at `chunk_size` at
//! all times, trading some throughput for a predictable resource ceiling.

use std::future::Future;
use std::sync::atomic::AtomicUsize;
use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, info};

use crate::utils::error::Result;

use super::config::{BatchConfig, BatchHooks};
use super::outcome::{BatchSummary, ItemOutcome};
use super::retry::run_item;

/// Executor that processes items in sequential waves of bounded size
#[derive(Debug, Clone)]
pub struct WaveExecutor {
    config: BatchConfig,
}

impl WaveExecutor {
    /// Create an executor, rejecting invalid configuration before any item
    /// can be dispatched
    pub fn new(config: BatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The resolved configuration for this executor
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run the operation across all items without observer hooks
    ///
    /// Always resolves with exactly one outcome per input item, in input
    /// order; a per-item failure never propagates as an error.
    pub async fn run<T, R, F, Fut, E>(&self, items: Vec<T>, op: F) -> Vec<ItemOutcome<T, R>>
    where
        T: Clone,
        F: Fn(T, usize) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: std::fmt::Display,
    {
        self.run_with_hooks(items, op, BatchHooks::new()).await
    }

    /// Run the operation across all items, firing the configured hooks as
    /// each item settles
    pub async fn run_with_hooks<T, R, F, Fut, E>(
        &self,
        items: Vec<T>,
        op: F,
        hooks: BatchHooks<T, R>,
    ) -> Vec<ItemOutcome<T, R>>
    where
        T: Clone,
        F: Fn(T, usize) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: std::fmt::Display,
    {
        let total = items.len();
        if total == 0 {
            return Vec::new();
        }

        info!(
            total,
            chunk_size = self.config.chunk_size,
            "starting chunked-wave run"
        );

        let completed = AtomicUsize::new(0);
        let mut outcomes = Vec::with_capacity(total);
        let mut next_index = 0usize;
        let mut remaining = items.into_iter();

        loop {
            let chunk: Vec<T> = remaining.by_ref().take(self.config.chunk_size).collect();
            if chunk.is_empty() {
                break;
            }

            debug!(
                wave_size = chunk.len(),
                first_index = next_index,
                "dispatching wave"
            );

            let wave = join_all(chunk.into_iter().map(|item| {
                let index = next_index;
                next_index += 1;
                run_item(item, index, &op, &self.config, &hooks, &completed, total)
            }))
            .await;

            outcomes.extend(wave);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            total,
            succeeded,
            failed = total - succeeded,
            "chunked-wave run finished"
        );

        outcomes
    }

    /// Run with hooks and also return aggregate statistics
    pub async fn run_with_summary<T, R, F, Fut, E>(
        &self,
        items: Vec<T>,
        op: F,
        hooks: BatchHooks<T, R>,
    ) -> (Vec<ItemOutcome<T, R>>, BatchSummary)
    where
        T: Clone,
        F: Fn(T, usize) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: std::fmt::Display,
    {
        let start = Instant::now();
        let outcomes = self.run_with_hooks(items, op, hooks).await;
        let summary = BatchSummary::from_outcomes(&outcomes, start.elapsed());
        (outcomes, summary)
    }
}
