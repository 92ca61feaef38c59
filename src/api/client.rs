use crate::api::error::ApiError;
use crate::api::StudyBackend;
use crate::models::{Document, DocumentSummary, Flashcard, Mcq};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    document_id: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    message: String,
}

/// Study material stored for a previously uploaded document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudyMaterials {
    pub document_id: String,
    #[serde(default)]
    pub mcqs: Vec<Mcq>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

/// One stored question/answer exchange from the chat history endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatExchange {
    pub user_message: String,
    pub ai_response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// HTTP client for the StudyGenie backend. All endpoints live under `{base_url}/api`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Option<String>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            client,
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// A missing base URL only surfaces here, at request time.
    pub fn endpoint(&self, path: &str) -> Result<String, ApiError> {
        let base = self.base_url.as_deref().ok_or(ApiError::MissingBaseUrl)?;
        Ok(format!("{}/api{}", base.trim_end_matches('/'), path))
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("{}\nRaw: {}", e, body)))
    }
}

#[async_trait]
impl StudyBackend for HttpBackend {
    async fn health(&self) -> Result<String, ApiError> {
        let response = self.client.get(self.endpoint("/")?).send().await?;
        let health: HealthResponse = Self::read_json(response).await?;
        Ok(health.message)
    }

    async fn upload(&self, path: &Path) -> Result<Document, ApiError> {
        let url = self.endpoint("/upload")?;
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "document.pdf".to_string());
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self.client.post(url).multipart(form).send().await?;
        Self::read_json(response).await
    }

    async fn chat(&self, document_id: &str, message: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/chat")?)
            .json(&ChatRequest {
                document_id,
                message,
            })
            .send()
            .await?;
        let reply: ChatResponse = Self::read_json(response).await?;
        Ok(reply.response)
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, ApiError> {
        let response = self.client.get(self.endpoint("/documents")?).send().await?;
        Self::read_json(response).await
    }

    async fn study_materials(&self, document_id: &str) -> Result<StudyMaterials, ApiError> {
        let url = self.endpoint(&format!("/study-materials/{}", document_id))?;
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn chat_history(&self, document_id: &str) -> Result<Vec<ChatExchange>, ApiError> {
        let url = self.endpoint(&format!("/chat-history/{}", document_id))?;
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }
}
