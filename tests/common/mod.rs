//! Common test utilities for docflow-rs
//!
//! Fixtures and mock-service helpers shared by the integration tests.

use docflow_rs::{DocumentRef, FileUpload};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Build `count` document references with sequential IDs starting at 1
pub fn document_refs(count: usize) -> Vec<DocumentRef> {
    (1..=count).map(|i| DocumentRef::new(i.to_string())).collect()
}

/// Build `count` small in-memory PDF uploads
pub fn file_uploads(count: usize) -> Vec<FileUpload> {
    (1..=count)
        .map(|i| {
            FileUpload::new(
                format!("doc-{i}.pdf"),
                "application/pdf",
                format!("%PDF-1.4 test payload {i}").into_bytes(),
            )
        })
        .collect()
}

/// Mount a process endpoint that accepts every document
pub async fn mount_process_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/api/documents/\d+/process/$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "task_id": "task-1",
        })))
        .mount(server)
        .await;
}

/// Mount an upload endpoint that stores every file
pub async fn mount_upload_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/api/documents/upload/$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "document_id": "99",
        })))
        .mount(server)
        .await;
}
