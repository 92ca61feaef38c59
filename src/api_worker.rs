use crate::api::{list_documents, open_document, upload_document, StudyBackend};
use crate::logger;
use crate::models::{ApiRequest, ApiResponse};
use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::sync::Arc;
use std::thread;

/// Run backend calls on a dedicated thread so the UI loop never blocks.
/// Requests are served one at a time, in the order they were sent.
pub fn spawn_api_worker(
    backend: Arc<dyn StudyBackend>,
    response_tx: Sender<ApiResponse>,
    request_rx: Receiver<ApiRequest>,
) -> io::Result<thread::JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("studygenie::api_worker".to_string())
        .spawn(move || {
            while let Ok(request) = request_rx.recv() {
                logger::log(&format!("Worker received {}", describe(&request)));
                let response = runtime.block_on(handle_request(backend.as_ref(), request));
                if response_tx.send(response).is_err() {
                    break;
                }
            }
            logger::log("Worker channel disconnected, exiting");
        })
}

fn describe(request: &ApiRequest) -> String {
    match request {
        ApiRequest::Health => "health check".to_string(),
        ApiRequest::Upload { path } => format!("upload of {}", path.display()),
        ApiRequest::Chat { document_id, .. } => format!("chat for document {}", document_id),
        ApiRequest::ListDocuments => "document listing".to_string(),
        ApiRequest::OpenDocument { summary } => format!("open of document {}", summary.id),
    }
}

/// Execute one request against the backend. Errors are flattened to their
/// display form here; the UI only distinguishes success from failure.
pub async fn handle_request(backend: &dyn StudyBackend, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::Health => {
            let online = match backend.health().await {
                Ok(message) => {
                    logger::log(&format!("Backend online: {}", message));
                    true
                }
                Err(e) => {
                    logger::log(&format!("Backend health check failed: {}", e));
                    false
                }
            };
            ApiResponse::Health { online }
        }
        ApiRequest::Upload { path } => ApiResponse::Uploaded(
            upload_document(backend, &path)
                .await
                .map_err(|e| log_error("Upload", e.to_string())),
        ),
        ApiRequest::Chat {
            document_id,
            message,
        } => {
            let result = backend
                .chat(&document_id, &message)
                .await
                .map_err(|e| log_error("Chat", e.to_string()));
            ApiResponse::ChatReply {
                document_id,
                result,
            }
        }
        ApiRequest::ListDocuments => ApiResponse::Documents(
            list_documents(backend)
                .await
                .map_err(|e| log_error("Document listing", e.to_string())),
        ),
        ApiRequest::OpenDocument { summary } => ApiResponse::Opened(
            open_document(backend, &summary)
                .await
                .map_err(|e| log_error("Open document", e.to_string())),
        ),
    }
}

fn log_error(context: &str, error: String) -> String {
    logger::log(&format!("{} failed: {}", context, error));
    error
}
