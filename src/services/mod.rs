//! Services module
//!
//! This module contains business logic and service implementations

pub mod documents;

pub use documents::{
    BulkProcessReport, BulkUploadReport, DocumentBackend, DocumentRef, DocumentService,
    FileUpload, ProcessResponse, UploadResponse, bulk_process, bulk_upload,
};
