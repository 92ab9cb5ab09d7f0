//! Per-item and per-run result types

use std::time::Duration;

/// Fallback used when an error's display form is blank
const UNKNOWN_ERROR: &str = "unknown error";

/// Result of an individual work item in a batch
///
/// Exactly one outcome exists per input item; `index` is the item's position
/// in the original input sequence.
#[derive(Debug, Clone)]
pub struct ItemOutcome<T, R> {
    /// Index of the item in the original input
    pub index: usize,
    /// The original item
    pub item: T,
    /// Number of attempts made (0 if the item was cancelled before dispatch)
    pub attempts: u32,
    /// The settled result
    pub result: std::result::Result<R, ItemFailure>,
}

impl<T, R> ItemOutcome<T, R> {
    /// Whether the item settled successfully
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The failure message, if the item failed
    pub fn error_message(&self) -> Option<&str> {
        self.result.as_ref().err().map(|f| f.message.as_str())
    }
}

/// Failure information for one item
///
/// The message is always non-empty; a blank error display is replaced by a
/// generic fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Human-readable error message
    pub message: String,
}

impl ItemFailure {
    /// Create a failure, substituting a fallback for a blank message
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        };
        Self { message }
    }

    /// Normalize any displayable error into a failure
    pub fn from_error(error: &impl std::fmt::Display) -> Self {
        Self::new(error.to_string())
    }
}

impl std::fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ItemFailure {}

/// Summary of one batch run
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Total items processed
    pub total: usize,
    /// Successful items
    pub succeeded: usize,
    /// Failed items
    pub failed: usize,
    /// Wall-clock time for the run
    pub duration: Duration,
}

impl BatchSummary {
    /// Tally a settled outcome sequence
    pub fn from_outcomes<T, R>(outcomes: &[ItemOutcome<T, R>], duration: Duration) -> Self {
        let total = outcomes.len();
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total,
            succeeded,
            failed: total - succeeded,
            duration,
        }
    }
}
