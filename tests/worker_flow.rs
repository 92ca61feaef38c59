use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use studygenie_tui::api::{ChatExchange, StudyMaterials};
use studygenie_tui::chat::FALLBACK_REPLY;
use studygenie_tui::models::{ChatTurn, DocumentSummary};
use studygenie_tui::quiz::QuizPhase;
use studygenie_tui::{
    spawn_api_worker, ApiError, ApiRequest, ApiResponse, AppState, Config, Document, Flashcard,
    Mcq, StudyBackend, StudySession, Tab,
};

const WAIT: Duration = Duration::from_secs(5);

/// Backend that serves one fixed document and refuses to chat.
struct ScriptedBackend {
    document: Document,
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        body: "tutor offline".to_string(),
    }
}

#[async_trait]
impl StudyBackend for ScriptedBackend {
    async fn health(&self) -> Result<String, ApiError> {
        Ok("StudyGenie API is running!".to_string())
    }

    async fn upload(&self, _path: &Path) -> Result<Document, ApiError> {
        Ok(self.document.clone())
    }

    async fn chat(&self, _document_id: &str, _message: &str) -> Result<String, ApiError> {
        Err(unavailable())
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, ApiError> {
        Ok(vec![DocumentSummary {
            id: self.document.document_id.clone(),
            filename: self.document.filename.clone(),
            upload_time: Some("2024-03-01T12:00:00".to_string()),
        }])
    }

    async fn study_materials(&self, document_id: &str) -> Result<StudyMaterials, ApiError> {
        Ok(StudyMaterials {
            document_id: document_id.to_string(),
            mcqs: self.document.mcqs.clone(),
            flashcards: self.document.flashcards.clone(),
        })
    }

    async fn chat_history(&self, _document_id: &str) -> Result<Vec<ChatExchange>, ApiError> {
        Ok(vec![ChatExchange {
            user_message: "What is a cell?".to_string(),
            ai_response: "The basic unit of life.".to_string(),
            timestamp: None,
        }])
    }
}

fn scenario_document() -> Document {
    Document {
        document_id: "d1".to_string(),
        filename: "notes.pdf".to_string(),
        mcqs: vec![Mcq {
            question: "Q1".to_string(),
            options: vec!["A", "B", "C", "D"].into_iter().map(String::from).collect(),
            correct_answer: 1,
            explanation: "because B".to_string(),
        }],
        flashcards: vec![Flashcard {
            front: "F1".to_string(),
            back: "B1".to_string(),
        }],
        text_preview: None,
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

struct Harness {
    session: StudySession,
    responses: Receiver<ApiResponse>,
    _requests: Sender<ApiRequest>,
}

impl Harness {
    fn new() -> Self {
        let backend = Arc::new(ScriptedBackend {
            document: scenario_document(),
        });
        let (request_tx, request_rx) = crossbeam_channel::unbounded();
        let (response_tx, response_rx) = crossbeam_channel::unbounded();
        spawn_api_worker(backend, response_tx, request_rx).unwrap();

        let config = Config {
            backend_url: Some("http://localhost:8001".to_string()),
            pdf_dir: PathBuf::from("/no/such/dir"),
            reveal_delay: Duration::from_millis(50),
            ..Config::default()
        };
        Self {
            session: StudySession::new(&config, Some(request_tx.clone())),
            responses: response_rx,
            _requests: request_tx,
        }
    }

    /// Feed exactly one worker response back into the session.
    fn pump(&mut self) {
        let response = self.responses.recv_timeout(WAIT).unwrap();
        self.session.process_api_response(response);
    }
}

#[test]
fn health_check_marks_backend_online() {
    let mut harness = Harness::new();
    harness.session.check_backend();
    harness.pump();
    assert_eq!(harness.session.backend_online, Some(true));
}

#[test]
fn upload_then_quiz_scores_one_of_one() {
    let mut harness = Harness::new();
    harness.session.upload.selected_file = Some(PathBuf::from("notes.pdf"));
    harness.session.handle_key(key(KeyCode::Char('u')), Instant::now());
    assert!(harness.session.upload.is_uploading);
    harness.pump();

    let session = &mut harness.session;
    assert_eq!(session.app_state, AppState::Study);
    assert_eq!(session.quiz.total(), 1);
    assert_eq!(session.flashcards.len(), 1);

    let now = Instant::now();
    session.handle_key(key(KeyCode::Enter), now);
    session.handle_key(key(KeyCode::Down), now);
    session.handle_key(key(KeyCode::Down), now);
    assert_eq!(session.quiz.selected_answer, Some(1));
    session.handle_key(key(KeyCode::Enter), now);
    assert_eq!(session.quiz.phase, QuizPhase::Revealed);

    session.tick(now + Duration::from_millis(60));
    let alert = session.alert.clone().unwrap();
    assert_eq!(alert.lines[0], "Quiz completed! Your score: 1/1");
}

#[test]
fn failed_chat_appends_fallback_reply() {
    let mut harness = Harness::new();
    harness
        .session
        .load_document(scenario_document(), Vec::new());
    let now = Instant::now();
    harness.session.set_tab(Tab::Chat, now);
    for c in "hello".chars() {
        harness.session.handle_key(key(KeyCode::Char(c)), now);
    }
    harness.session.handle_key(key(KeyCode::Enter), now);
    assert!(harness.session.chat.is_loading);
    harness.pump();

    assert_eq!(
        harness.session.chat.transcript,
        vec![ChatTurn::user("hello"), ChatTurn::ai(FALLBACK_REPLY)]
    );
    assert!(!harness.session.chat.is_loading);
}

#[test]
fn library_reopens_document_with_history() {
    let mut harness = Harness::new();
    let now = Instant::now();
    harness.session.handle_key(key(KeyCode::Char('l')), now);
    harness.pump();
    assert_eq!(harness.session.library.documents.len(), 1);

    harness.session.handle_key(key(KeyCode::Enter), now);
    harness.pump();

    let session = &harness.session;
    assert_eq!(session.app_state, AppState::Study);
    assert_eq!(
        session.document.as_ref().map(|d| d.filename.as_str()),
        Some("notes.pdf")
    );
    assert_eq!(
        session.chat.transcript,
        vec![
            ChatTurn::user("What is a cell?"),
            ChatTurn::ai("The basic unit of life."),
        ]
    );
}
