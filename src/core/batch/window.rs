//! Sliding-window executor
//!
//! Keeps a rolling set of at most `max_concurrent` in-flight operations,
//! launching a new one as soon as any slot frees, with no chunk boundaries.
//! Each operation writes an index-tagged outcome into a pre-assigned slot,
//! so output ordering exactly matches input ordering regardless of
//! completion order. Throughput is maximal at the cost of unbounded-size
//! synchronization points: a slow item can share the window with many fast
//! successors.

use std::future::Future;
use std::sync::atomic::AtomicUsize;
use std::time::Instant;

use futures::FutureExt;
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info};

use crate::utils::error::{EngineError, Result};

use super::config::{BatchConfig, BatchHooks};
use super::outcome::{BatchSummary, ItemOutcome};
use super::retry::run_item;

/// Executor that keeps at most `max_concurrent` operations in flight
///
/// No retry option: each item gets a single attempt, and retries are the
/// caller's responsibility if desired.
#[derive(Debug, Clone)]
pub struct SlidingWindowExecutor {
    max_concurrent: usize,
}

impl SlidingWindowExecutor {
    /// Create an executor, rejecting a zero concurrency limit before any
    /// item can be dispatched
    pub fn new(max_concurrent: usize) -> Result<Self> {
        if max_concurrent == 0 {
            return Err(EngineError::config("max_concurrent must be at least 1"));
        }
        Ok(Self { max_concurrent })
    }

    /// The configured concurrency limit
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Run the operation across all items without observer hooks
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
            max_concurrent = self.max_concurrent,
            "starting sliding-window run"
        );

        let completed = AtomicUsize::new(0);
        let single_attempt = BatchConfig::default().with_retry_failed(false);

        // One slot per index; each operation settles into its own.
        let mut slots: Vec<Option<ItemOutcome<T, R>>> = Vec::with_capacity(total);
        slots.resize_with(total, || None);

        let mut in_flight = FuturesUnordered::new();

        for (index, item) in items.into_iter().enumerate() {
            while in_flight.len() >= self.max_concurrent {
                if let Some(outcome) = in_flight.next().await {
                    store(&mut slots, outcome);
                }
                // Reap every operation that settled during the same
                // suspension, not just the one the await returned.
                while let Some(Some(outcome)) = in_flight.next().now_or_never() {
                    store(&mut slots, outcome);
                }
            }

            debug!(index, in_flight = in_flight.len(), "dispatching item");
            in_flight.push(run_item(
                item,
                index,
                &op,
                &single_attempt,
                &hooks,
                &completed,
                total,
            ));
        }

        // Input fully dispatched; drain the remaining window.
        while let Some(outcome) = in_flight.next().await {
            store(&mut slots, outcome);
        }
        drop(in_flight);

        let outcomes: Vec<ItemOutcome<T, R>> = slots.into_iter().flatten().collect();
        debug_assert_eq!(outcomes.len(), total);

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            total,
            succeeded,
            failed = total - succeeded,
            "sliding-window run finished"
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

fn store<T, R>(slots: &mut [Option<ItemOutcome<T, R>>], outcome: ItemOutcome<T, R>) {
    let index = outcome.index;
    slots[index] = Some(outcome);
}
