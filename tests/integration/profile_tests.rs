//! Performance profile loading tests

use docflow_rs::{BatchConfig, PerformanceProfile};
use std::io::Write;
use std::time::Duration;

#[tokio::test]
async fn profile_round_trips_through_a_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
batch:
  max_concurrent: 16
  chunk_size: 10
  max_retries: 5
upload:
  max_concurrent: 2
http:
  request_timeout_secs: 30
"#
    )
    .unwrap();

    let profile = PerformanceProfile::from_file(file.path()).await.unwrap();

    assert_eq!(profile.batch.max_concurrent, 16);
    assert_eq!(profile.batch.chunk_size, 10);
    assert_eq!(profile.batch.max_retries, 5);
    // unspecified fields keep their defaults
    assert!(profile.batch.retry_failed);
    assert_eq!(profile.upload.max_concurrent, 2);
    assert_eq!(profile.http.request_timeout_secs, 30);
    assert_eq!(profile.http.connect_timeout_secs, 10);
}

#[tokio::test]
async fn invalid_profile_file_is_a_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "batch: [not, a, mapping]").unwrap();

    let err = PerformanceProfile::from_file(file.path()).await.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn missing_profile_file_is_a_config_error() {
    let err = tokio_test::block_on(PerformanceProfile::from_file("/nonexistent/profile.yaml"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read profile file"));
}

#[test]
fn batch_config_resolves_from_profile_sections() {
    let profile = PerformanceProfile::default();

    let batch = BatchConfig::from_profile(&profile.batch);
    assert_eq!(batch.chunk_size, 5);
    assert_eq!(batch.retry_delay, Duration::from_millis(1000));

    let upload = BatchConfig::from_profile(&profile.upload);
    assert_eq!(upload.max_concurrent, 4);
    assert_eq!(upload.max_retries, 2);
    assert_eq!(upload.retry_delay, Duration::from_millis(2000));
}

#[test]
fn env_overrides_are_applied_and_validated() {
    // SAFETY: no other test in this binary reads or writes these variables.
    unsafe {
        std::env::set_var("DOCFLOW_BATCH_CHUNK_SIZE", "12");
        std::env::set_var("DOCFLOW_UPLOAD_MAX_RETRIES", "7");
    }

    let profile = PerformanceProfile::from_env().unwrap();
    assert_eq!(profile.batch.chunk_size, 12);
    assert_eq!(profile.upload.max_retries, 7);

    unsafe {
        std::env::set_var("DOCFLOW_BATCH_CHUNK_SIZE", "zero");
    }
    assert!(PerformanceProfile::from_env().is_err());

    unsafe {
        std::env::remove_var("DOCFLOW_BATCH_CHUNK_SIZE");
        std::env::remove_var("DOCFLOW_UPLOAD_MAX_RETRIES");
    }
}
