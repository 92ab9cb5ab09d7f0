//! Per-item retry wrapper
//!
//! Runs one item to a settled outcome. Progress and completion callbacks
//! fire exactly once per item, only for the final settled outcome, and the
//! shared completed counter increments exactly once per item.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::sleep;
use tracing::{debug, error, warn};

use super::config::{BatchConfig, BatchHooks};
use super::outcome::{ItemFailure, ItemOutcome};

/// Run one item to completion, honoring the cancellation flag and the
/// configured retry policy.
pub(crate) async fn run_item<T, R, F, Fut, E>(
    item: T,
    index: usize,
    op: &F,
    config: &BatchConfig,
    hooks: &BatchHooks<T, R>,
    completed: &AtomicUsize,
    total: usize,
) -> ItemOutcome<T, R>
where
    T: Clone,
    F: Fn(T, usize) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
    E: std::fmt::Display,
{
    if hooks.is_cancelled() {
        warn!(index, "item cancelled before dispatch");
        let outcome = ItemOutcome {
            index,
            item,
            attempts: 0,
            result: Err(ItemFailure::new("cancelled before dispatch")),
        };
        settle(&outcome, hooks, completed, total);
        return outcome;
    }

    let outcome = attempt_item(item, index, op, config).await;
    settle(&outcome, hooks, completed, total);
    outcome
}

/// The attempt loop: invoke the operation, retrying failed attempts with a
/// fixed delay while attempts remain under the cap.
async fn attempt_item<T, R, F, Fut, E>(
    item: T,
    index: usize,
    op: &F,
    config: &BatchConfig,
) -> ItemOutcome<T, R>
where
    T: Clone,
    F: Fn(T, usize) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
    E: std::fmt::Display,
{
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        // The operation consumes its own copy; the outcome keeps the original.
        match op(item.clone(), index).await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(index, attempts, "item succeeded after retry");
                }
                return ItemOutcome {
                    index,
                    item,
                    attempts,
                    result: Ok(value),
                };
            }
            Err(e) => {
                if config.retry_failed && attempts <= config.max_retries {
                    warn!(
                        index,
                        attempt = attempts,
                        max_retries = config.max_retries,
                        error = %e,
                        "item attempt failed, retrying after {:?}",
                        config.retry_delay
                    );
                    sleep(config.retry_delay).await;
                } else {
                    error!(index, attempts, error = %e, "item failed permanently");
                    return ItemOutcome {
                        index,
                        item,
                        attempts,
                        result: Err(ItemFailure::from_error(&e)),
                    };
                }
            }
        }
    }
}

/// Fire the settlement bookkeeping for a final outcome: counter first, then
/// progress, then the per-item callback.
fn settle<T, R>(
    outcome: &ItemOutcome<T, R>,
    hooks: &BatchHooks<T, R>,
    completed: &AtomicUsize,
    total: usize,
) {
    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;

    if let Some(on_progress) = &hooks.on_progress {
        on_progress(done, total);
    }
    if let Some(on_item) = &hooks.on_item {
        on_item(outcome);
    }
}
