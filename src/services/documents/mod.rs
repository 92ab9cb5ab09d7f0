//! Document service client
//!
//! HTTP client for the document/task management service consumed by the bulk
//! helpers: a JSON "process document" endpoint and a multipart file upload
//! endpoint. Both return a body with a success flag and an optional message;
//! a non-success body is surfaced as an error so callers (and the retry
//! wrapper) treat application-level failures the same as transport failures.

mod bulk;

pub use bulk::{BulkProcessReport, BulkUploadReport, bulk_process, bulk_upload};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::HttpProfile;
use crate::utils::error::{EngineError, Result};

/// Reference to a document known to the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Service-side document ID
    pub id: String,
    /// Optional human-readable title, used in error reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DocumentRef {
    /// Create a reference from an ID
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
        }
    }

    /// Attach a display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The identity used in reports: the title when present, the ID otherwise
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// A file staged for upload
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// File name sent in the multipart form
    pub file_name: String,
    /// MIME type of the payload
    pub content_type: String,
    /// Raw file contents
    pub bytes: Bytes,
    /// Optional title for the created document
    pub title: Option<String>,
    /// Tags applied to the created document
    pub tags: Vec<String>,
}

impl FileUpload {
    /// Stage an in-memory payload
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
            title: None,
            tags: Vec::new(),
        }
    }

    /// Stage a file from disk, guessing the MIME type from the extension
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| EngineError::config(format!("not a file path: {}", path.display())))?;
        let content_type = guess_content_type(&file_name).to_string();

        Ok(Self::new(file_name, content_type, bytes))
    }

    /// Attach a document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    match file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
    {
        Some(ext) => match ext.as_str() {
            "pdf" => "application/pdf",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "tif" | "tiff" => "image/tiff",
            "txt" => "text/plain",
            _ => "application/octet-stream",
        },
        None => "application/octet-stream",
    }
}

/// Response body of the process endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Whether the service accepted the document for processing
    pub success: bool,
    /// Optional status or error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// ID of the processing task created by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// Response body of the upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Whether the service stored the file
    pub success: bool,
    /// Optional status or error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// ID of the created document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

/// The remote operations the bulk helpers are built on
///
/// `DocumentService` is the production implementation; tests substitute
/// their own.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Ask the service to (re)process one document
    async fn process_document(&self, doc: &DocumentRef) -> Result<ProcessResponse>;

    /// Upload one file as a new document
    async fn upload_document(&self, upload: &FileUpload) -> Result<UploadResponse>;
}

/// HTTP client for the document management service
#[derive(Debug, Clone)]
pub struct DocumentService {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
}

impl DocumentService {
    /// Create a client with the default HTTP profile
    pub fn new(base_url: &str, api_token: Option<String>) -> Result<Self> {
        Self::with_profile(base_url, api_token, &HttpProfile::default())
    }

    /// Create a client with explicit timeouts
    pub fn with_profile(
        base_url: &str,
        api_token: Option<String>,
        http: &HttpProfile,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| EngineError::config(format!("invalid base URL: {e}")))?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
            .timeout(Duration::from_secs(http.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| EngineError::config(format!("invalid endpoint path {path}: {e}")))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.header("Authorization", format!("Token {token}")),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, context: &str) -> Result<Bytes> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout(format!("{context} timed out"))
            } else {
                EngineError::from(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::remote(format!(
                "{context} returned HTTP {status}"
            )));
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl DocumentBackend for DocumentService {
    async fn process_document(&self, doc: &DocumentRef) -> Result<ProcessResponse> {
        let url = self.endpoint(&format!("api/documents/{}/process/", doc.id))?;
        debug!(document = %doc.id, "requesting document processing");

        let request = self
            .authorize(self.client.post(url))
            .json(&serde_json::json!({ "id": doc.id }));

        let context = format!("process request for document {}", doc.id);
        let body = self.send(request, &context).await?;
        let parsed: ProcessResponse = serde_json::from_slice(&body)?;

        if !parsed.success {
            let message = parsed
                .message
                .clone()
                .unwrap_or_else(|| format!("processing rejected for document {}", doc.id));
            return Err(EngineError::remote(message));
        }

        Ok(parsed)
    }

    async fn upload_document(&self, upload: &FileUpload) -> Result<UploadResponse> {
        let url = self.endpoint("api/documents/upload/")?;
        debug!(file = %upload.file_name, size = upload.bytes.len(), "uploading document");

        let mut form = multipart::Form::new();

        let file_part = multipart::Part::bytes(upload.bytes.to_vec())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| EngineError::config(format!("invalid MIME type: {e}")))?;
        form = form.part("document", file_part);

        if let Some(title) = &upload.title {
            form = form.text("title", title.clone());
        }
        for tag in &upload.tags {
            form = form.text("tags", tag.clone());
        }

        let request = self.authorize(self.client.post(url)).multipart(form);

        let context = format!("upload request for {}", upload.file_name);
        let body = self.send(request, &context).await?;
        let parsed: UploadResponse = serde_json::from_slice(&body)?;

        if !parsed.success {
            let message = parsed
                .message
                .clone()
                .unwrap_or_else(|| format!("upload rejected for {}", upload.file_name));
            return Err(EngineError::remote(message));
        }

        Ok(parsed)
    }
}
