pub mod client;
pub mod error;
pub mod study;

use crate::models::{Document, DocumentSummary};
use async_trait::async_trait;
use std::path::Path;

pub use client::{ChatExchange, HttpBackend, StudyMaterials, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use study::{list_documents, open_document, upload_document};

/// The remote StudyGenie service: document processing, generation and chat
/// all happen behind these calls.
#[async_trait]
pub trait StudyBackend: Send + Sync {
    async fn health(&self) -> Result<String, ApiError>;
    async fn upload(&self, path: &Path) -> Result<Document, ApiError>;
    async fn chat(&self, document_id: &str, message: &str) -> Result<String, ApiError>;
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, ApiError>;
    async fn study_materials(&self, document_id: &str) -> Result<StudyMaterials, ApiError>;
    async fn chat_history(&self, document_id: &str) -> Result<Vec<ChatExchange>, ApiError>;
}
