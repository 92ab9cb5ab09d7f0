//! Per-run configuration, observer hooks, and cooperative cancellation

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::BatchProfile;
use crate::utils::error::{EngineError, Result};

use super::outcome::ItemOutcome;

/// Progress callback: `(completed, total)` after every settled item
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Per-item completion callback, invoked once with the final outcome
pub type ItemCallback<T, R> = Arc<dyn Fn(&ItemOutcome<T, R>) + Send + Sync>;

/// Configuration for one batch run
///
/// Resolved once at the call boundary and immutable for the duration of the
/// run. Defaults come from [`BatchProfile`](crate::config::BatchProfile).
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum concurrent operations (sliding-window executor)
    pub max_concurrent: usize,
    /// Chunk size (chunked-wave executor)
    pub chunk_size: usize,
    /// Whether failed items are retried
    pub retry_failed: bool,
    /// Maximum retry attempts per item, beyond the first attempt
    pub max_retries: u32,
    /// Fixed delay between retries
    pub retry_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::from_profile(&BatchProfile::default())
    }
}

impl BatchConfig {
    /// Create a config with the built-in batch defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a config from a tuning profile section
    pub fn from_profile(profile: &BatchProfile) -> Self {
        Self {
            max_concurrent: profile.max_concurrent,
            chunk_size: profile.chunk_size,
            retry_failed: profile.retry_failed,
            max_retries: profile.max_retries,
            retry_delay: Duration::from_millis(profile.retry_delay_ms),
        }
    }

    /// Set the concurrency limit
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// Set the chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Enable or disable retrying of failed items
    pub fn with_retry_failed(mut self, retry_failed: bool) -> Self {
        self.retry_failed = retry_failed;
        self
    }

    /// Set the retry cap
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the fixed delay between retries
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Reject values the executors cannot honor
    ///
    /// Called by the executor constructors, before any item is dispatched.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent == 0 {
            return Err(EngineError::config("max_concurrent must be at least 1"));
        }
        if self.chunk_size == 0 {
            return Err(EngineError::config("chunk_size must be at least 1"));
        }
        Ok(())
    }
}

/// Cooperative cancellation flag shared between a run and its caller
///
/// Consulted before dispatching each new item; in-flight operations are
/// never aborted. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    inner: Arc<AtomicBool>,
}

impl CancellationFlag {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that no further items be dispatched
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

/// Observer callbacks for one batch run
///
/// All hooks are optional. The progress and item callbacks fire exactly once
/// per item, after its outcome settles (post-retry).
pub struct BatchHooks<T, R> {
    pub on_progress: Option<ProgressCallback>,
    pub on_item: Option<ItemCallback<T, R>>,
    pub cancellation: Option<CancellationFlag>,
}

impl<T, R> Clone for BatchHooks<T, R> {
    fn clone(&self) -> Self {
        Self {
            on_progress: self.on_progress.clone(),
            on_item: self.on_item.clone(),
            cancellation: self.cancellation.clone(),
        }
    }
}

impl<T, R> Default for BatchHooks<T, R> {
    fn default() -> Self {
        Self {
            on_progress: None,
            on_item: None,
            cancellation: None,
        }
    }
}

impl<T, R> BatchHooks<T, R> {
    /// Create empty hooks
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress callback
    pub fn with_progress(mut self, f: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(f));
        self
    }

    /// Set the per-item completion callback
    pub fn with_item_callback(
        mut self,
        f: impl Fn(&ItemOutcome<T, R>) + Send + Sync + 'static,
    ) -> Self {
        self.on_item = Some(Arc::new(f));
        self
    }

    /// Attach a cancellation flag
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationFlag::is_cancelled)
    }
}

impl<T, R> std::fmt::Debug for BatchHooks<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchHooks")
            .field("on_progress", &self.on_progress.is_some())
            .field("on_item", &self.on_item.is_some())
            .field("cancellation", &self.cancellation.is_some())
            .finish()
    }
}
