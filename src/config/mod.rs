//! Configuration management for the engine
//!
//! This module handles loading, validation, and per-call resolution of the
//! performance-tuning profile. The profile is an explicit value threaded into
//! each run; nothing reads ambient state during execution.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::utils::error::{EngineError, Result};

/// Performance-tuning profile supplying defaults for batch operations
///
/// Batch processing and uploads are tuned independently; the `http` section
/// configures the shared remote client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceProfile {
    /// Defaults for bulk processing runs
    #[serde(default)]
    pub batch: BatchProfile,
    /// Defaults for bulk upload runs
    #[serde(default = "BatchProfile::upload_defaults")]
    pub upload: BatchProfile,
    /// Remote client settings
    #[serde(default)]
    pub http: HttpProfile,
}

impl Default for PerformanceProfile {
    fn default() -> Self {
        Self {
            batch: BatchProfile::default(),
            upload: BatchProfile::upload_defaults(),
            http: HttpProfile::default(),
        }
    }
}

/// Tuning knobs for one family of bulk runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProfile {
    /// Maximum concurrent operations (sliding-window executor)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Chunk size (chunked-wave executor)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Whether failed items are retried
    #[serde(default = "default_retry_failed")]
    pub retry_failed: bool,
    /// Maximum retry attempts per item
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Fixed delay between retries, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for BatchProfile {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            chunk_size: default_chunk_size(),
            retry_failed: default_retry_failed(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl BatchProfile {
    /// Upload runs move large bodies, so they default to a narrower window
    /// and a longer back-off than document processing.
    pub fn upload_defaults() -> Self {
        Self {
            max_concurrent: 4,
            chunk_size: 3,
            retry_failed: true,
            max_retries: 2,
            retry_delay_ms: 2000,
        }
    }

    fn validate(&self, section: &str) -> Result<()> {
        if self.max_concurrent == 0 {
            return Err(EngineError::config(format!(
                "{section}.max_concurrent must be at least 1"
            )));
        }
        if self.chunk_size == 0 {
            return Err(EngineError::config(format!(
                "{section}.chunk_size must be at least 1"
            )));
        }
        Ok(())
    }
}

/// Remote client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpProfile {
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for HttpProfile {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_max_concurrent() -> usize {
    10
}

fn default_chunk_size() -> usize {
    5
}

fn default_retry_failed() -> bool {
    true
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl PerformanceProfile {
    /// Load a profile from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading performance profile from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| EngineError::config(format!("Failed to read profile file: {}", e)))?;

        let profile: Self = serde_yaml::from_str(&content)
            .map_err(|e| EngineError::config(format!("Failed to parse profile: {}", e)))?;

        profile.validate()?;

        debug!("Performance profile loaded successfully");
        Ok(profile)
    }

    /// Build a profile from `DOCFLOW_`-prefixed environment variables,
    /// falling back to the built-in defaults for anything unset
    pub fn from_env() -> Result<Self> {
        let mut profile = Self::default();

        read_env("DOCFLOW_BATCH_MAX_CONCURRENT", &mut profile.batch.max_concurrent)?;
        read_env("DOCFLOW_BATCH_CHUNK_SIZE", &mut profile.batch.chunk_size)?;
        read_env("DOCFLOW_BATCH_RETRY_FAILED", &mut profile.batch.retry_failed)?;
        read_env("DOCFLOW_BATCH_MAX_RETRIES", &mut profile.batch.max_retries)?;
        read_env("DOCFLOW_BATCH_RETRY_DELAY_MS", &mut profile.batch.retry_delay_ms)?;

        read_env("DOCFLOW_UPLOAD_MAX_CONCURRENT", &mut profile.upload.max_concurrent)?;
        read_env("DOCFLOW_UPLOAD_CHUNK_SIZE", &mut profile.upload.chunk_size)?;
        read_env("DOCFLOW_UPLOAD_RETRY_FAILED", &mut profile.upload.retry_failed)?;
        read_env("DOCFLOW_UPLOAD_MAX_RETRIES", &mut profile.upload.max_retries)?;
        read_env("DOCFLOW_UPLOAD_RETRY_DELAY_MS", &mut profile.upload.retry_delay_ms)?;

        read_env("DOCFLOW_HTTP_CONNECT_TIMEOUT_SECS", &mut profile.http.connect_timeout_secs)?;
        read_env("DOCFLOW_HTTP_REQUEST_TIMEOUT_SECS", &mut profile.http.request_timeout_secs)?;

        profile.validate()?;
        Ok(profile)
    }

    /// Validate the profile, rejecting values the executors would refuse
    pub fn validate(&self) -> Result<()> {
        self.batch.validate("batch")?;
        self.upload.validate("upload")?;

        if self.http.request_timeout_secs == 0 {
            return Err(EngineError::config(
                "http.request_timeout_secs must be at least 1",
            ));
        }

        Ok(())
    }
}

fn read_env<T>(key: &str, slot: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(raw) = std::env::var(key) {
        *slot = raw
            .parse()
            .map_err(|e| EngineError::config(format!("Invalid value for {key}: {e}")))?;
    }
    Ok(())
}
