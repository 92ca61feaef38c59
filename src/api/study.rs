use crate::api::{ApiError, StudyBackend};
use crate::logger;
use crate::models::{ChatTurn, Document, DocumentSummary};
use std::path::Path;

fn check_document(document: Document) -> Result<Document, ApiError> {
    if let Some(index) = document.first_invalid_mcq() {
        let mcq = &document.mcqs[index];
        return Err(ApiError::InvalidResponse(format!(
            "question {} has correct_answer {} but only {} options",
            index + 1,
            mcq.correct_answer,
            mcq.options.len()
        )));
    }
    Ok(document)
}

/// Upload a PDF and return the generated study material.
pub async fn upload_document(
    backend: &dyn StudyBackend,
    path: &Path,
) -> Result<Document, ApiError> {
    logger::log(&format!("Uploading {}", path.display()));
    let document = check_document(backend.upload(path).await?)?;
    logger::log(&format!(
        "Upload complete: document {} ({} questions, {} flashcards)",
        document.document_id,
        document.mcqs.len(),
        document.flashcards.len()
    ));
    Ok(document)
}

/// Documents known to the backend, newest first.
pub async fn list_documents(
    backend: &dyn StudyBackend,
) -> Result<Vec<DocumentSummary>, ApiError> {
    let mut documents = backend.list_documents().await?;
    // ISO-8601 timestamps order lexicographically.
    documents.sort_by(|a, b| b.upload_time.cmp(&a.upload_time));
    Ok(documents)
}

/// Reload a stored document together with its chat transcript.
pub async fn open_document(
    backend: &dyn StudyBackend,
    summary: &DocumentSummary,
) -> Result<(Document, Vec<ChatTurn>), ApiError> {
    logger::log(&format!("Opening stored document {}", summary.id));
    let materials = backend.study_materials(&summary.id).await?;
    let history = backend.chat_history(&summary.id).await?;

    let document = check_document(Document {
        document_id: summary.id.clone(),
        filename: summary.filename.clone(),
        mcqs: materials.mcqs,
        flashcards: materials.flashcards,
        text_preview: None,
    })?;

    let mut transcript = Vec::with_capacity(history.len() * 2);
    for exchange in history {
        transcript.push(ChatTurn::user(exchange.user_message));
        transcript.push(ChatTurn::ai(exchange.ai_response));
    }

    Ok((document, transcript))
}
