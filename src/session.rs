use crate::chat::ChatSession;
use crate::config::Config;
use crate::flashcards::FlashcardNavigator;
use crate::library::Library;
use crate::logger;
use crate::models::{ApiRequest, ApiResponse, AppState, ChatTurn, Document, Tab};
use crate::quiz::{QuizEngine, QuizOutcome, QuizPhase};
use crate::upload::{UploadController, UPLOAD_ERROR_MESSAGE};
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

const PAGE: u16 = 10;

/// Blocking notification; all input except dismissal is ignored while shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub lines: Vec<String>,
}

/// Everything the client knows for one run of the app: the loaded document
/// and the run state of each study panel.
#[derive(Debug)]
pub struct StudySession {
    pub app_state: AppState,
    pub active_tab: Tab,
    pub upload: UploadController,
    pub library: Library,
    pub document: Option<Document>,
    pub quiz: QuizEngine,
    pub flashcards: FlashcardNavigator,
    pub chat: ChatSession,
    pub alert: Option<Alert>,
    pub backend_url: Option<String>,
    pub backend_online: Option<bool>,
    pub should_quit: bool,
    reveal_delay: Duration,
    api_tx: Option<Sender<ApiRequest>>,
}

impl StudySession {
    pub fn new(config: &Config, api_tx: Option<Sender<ApiRequest>>) -> Self {
        Self {
            app_state: AppState::Upload,
            active_tab: Tab::Quiz,
            upload: UploadController::new(config.pdf_dir.clone(), config.initial_file.clone()),
            library: Library::default(),
            document: None,
            quiz: QuizEngine::new(Vec::new(), config.reveal_delay),
            flashcards: FlashcardNavigator::default(),
            chat: ChatSession::new(),
            alert: None,
            backend_url: config.backend_url.clone(),
            backend_online: None,
            should_quit: false,
            reveal_delay: config.reveal_delay,
            api_tx,
        }
    }

    /// Hand a request to the API worker. If the worker is gone the request
    /// fails immediately through the normal failure path.
    pub fn dispatch(&mut self, request: ApiRequest) {
        let failed = match &self.api_tx {
            Some(tx) => tx.send(request.clone()).is_err(),
            None => true,
        };
        if failed {
            logger::log("API worker unavailable, failing request");
            self.process_api_response(failure_for(request, "API worker is not running"));
        }
    }

    pub fn check_backend(&mut self) {
        self.dispatch(ApiRequest::Health);
    }

    pub fn process_api_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Health { online } => {
                self.backend_online = Some(online);
            }
            ApiResponse::Uploaded(result) => {
                self.upload.finish();
                match result {
                    Ok(document) => self.load_document(document, Vec::new()),
                    Err(error) => self.show_alert("Upload Failed", UPLOAD_ERROR_MESSAGE, &error),
                }
            }
            ApiResponse::ChatReply {
                document_id,
                result,
            } => {
                let current = self.document.as_ref().map(|d| d.document_id.as_str());
                if self.chat.is_loading && current == Some(document_id.as_str()) {
                    self.chat.complete(result);
                } else {
                    logger::log(&format!(
                        "Ignoring chat reply for document {} (no longer active)",
                        document_id
                    ));
                }
            }
            ApiResponse::Documents(result) => match result {
                Ok(documents) => self.library.finish_refresh(documents),
                Err(error) => {
                    self.library.finish_refresh(Vec::new());
                    self.show_alert(
                        "Library Unavailable",
                        "Could not load your documents. Please try again.",
                        &error,
                    );
                }
            },
            ApiResponse::Opened(result) => {
                if !self.library.is_opening {
                    return;
                }
                self.library.is_opening = false;
                match result {
                    Ok((document, transcript)) => self.load_document(document, transcript),
                    Err(error) => self.show_alert(
                        "Open Failed",
                        "Could not open this document. Please try again.",
                        &error,
                    ),
                }
            }
        }
    }

    /// Replace all document state. Run state of every panel starts fresh.
    pub fn load_document(&mut self, document: Document, transcript: Vec<ChatTurn>) {
        logger::log(&format!(
            "Loaded document {} ({})",
            document.document_id, document.filename
        ));
        self.quiz.cancel_pending_advance();
        self.quiz = QuizEngine::new(document.mcqs.clone(), self.reveal_delay);
        self.flashcards = FlashcardNavigator::new(document.flashcards.clone());
        self.chat = ChatSession::with_transcript(transcript);
        self.document = Some(document);
        self.active_tab = Tab::Quiz;
        self.app_state = AppState::Study;
    }

    /// Discard the document and every run state, back to the upload screen.
    pub fn reset(&mut self) {
        logger::log("Session reset");
        self.quiz.cancel_pending_advance();
        self.document = None;
        self.quiz = QuizEngine::new(Vec::new(), self.reveal_delay);
        self.flashcards = FlashcardNavigator::default();
        self.chat = ChatSession::new();
        self.upload.selected_file = None;
        self.upload.refresh();
        self.active_tab = Tab::Quiz;
        self.app_state = AppState::Upload;
    }

    /// Drive the quiz timer.
    pub fn tick(&mut self, now: Instant) {
        if let Some(outcome) = self.quiz.tick(now) {
            self.show_quiz_completion(&outcome);
        }
    }

    pub fn set_tab(&mut self, tab: Tab, now: Instant) {
        if tab == self.active_tab {
            return;
        }
        if self.active_tab == Tab::Quiz {
            self.quiz.cancel_pending_advance();
        }
        if tab == Tab::Quiz {
            self.quiz.resume(now);
        }
        self.active_tab = tab;
    }

    fn show_alert(&mut self, title: &str, message: &str, detail: &str) {
        let mut lines = vec![message.to_string()];
        if !detail.is_empty() {
            lines.push(String::new());
            lines.push(detail.to_string());
        }
        self.alert = Some(Alert {
            title: title.to_string(),
            lines,
        });
    }

    fn show_quiz_completion(&mut self, outcome: &QuizOutcome) {
        self.show_alert("Quiz Completed", &outcome.message(), "");
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
            }
            return;
        }

        match self.app_state {
            AppState::Upload => self.handle_upload_input(key),
            AppState::Library => self.handle_library_input(key),
            AppState::Study => self.handle_study_input(key, now),
            AppState::ResetConfirm => self.handle_reset_confirm_input(key, now),
        }
    }

    fn handle_upload_input(&mut self, key: KeyEvent) {
        if self.upload.is_uploading {
            return;
        }
        match key.code {
            KeyCode::Up => self.upload.move_up(),
            KeyCode::Down => self.upload.move_down(),
            KeyCode::Enter => self.upload.select_highlighted(),
            KeyCode::Char('u') => {
                if let Some(request) = self.upload.upload() {
                    self.dispatch(request);
                }
            }
            KeyCode::Char('r') => {
                self.upload.refresh();
                self.check_backend();
            }
            KeyCode::Char('l') => {
                self.app_state = AppState::Library;
                if let Some(request) = self.library.refresh() {
                    self.dispatch(request);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_library_input(&mut self, key: KeyEvent) {
        if self.library.is_opening {
            return;
        }
        match key.code {
            KeyCode::Up => self.library.move_up(),
            KeyCode::Down => self.library.move_down(),
            KeyCode::Enter => {
                if let Some(request) = self.library.open_selected() {
                    self.dispatch(request);
                }
            }
            KeyCode::Char('r') => {
                if let Some(request) = self.library.refresh() {
                    self.dispatch(request);
                }
            }
            KeyCode::Esc => self.app_state = AppState::Upload,
            _ => {}
        }
    }

    fn handle_reset_confirm_input(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.reset(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.app_state = AppState::Study;
                if self.active_tab == Tab::Quiz {
                    self.quiz.resume(now);
                }
            }
            _ => {}
        }
    }

    fn handle_study_input(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Tab => return self.set_tab(self.active_tab.next(), now),
            KeyCode::BackTab => return self.set_tab(self.active_tab.previous(), now),
            KeyCode::F(n @ 1..=3) => return self.set_tab(Tab::ALL[n as usize - 1], now),
            KeyCode::Esc => return self.confirm_reset(),
            KeyCode::Char('n') if ctrl => return self.confirm_reset(),
            _ => {}
        }

        match self.active_tab {
            Tab::Quiz => self.handle_quiz_input(key, now),
            Tab::Flashcards => self.handle_flashcard_input(key),
            Tab::Chat => self.handle_chat_input(key),
        }
    }

    fn confirm_reset(&mut self) {
        self.quiz.cancel_pending_advance();
        self.app_state = AppState::ResetConfirm;
    }

    fn handle_quiz_input(&mut self, key: KeyEvent, now: Instant) {
        match self.quiz.phase {
            QuizPhase::NotStarted => match key.code {
                KeyCode::Enter | KeyCode::Char('s') => self.quiz.start(),
                KeyCode::Up => self.quiz.scroll_review_up(1),
                KeyCode::Down => self.quiz.scroll_review_down(1),
                KeyCode::PageUp => self.quiz.scroll_review_up(PAGE),
                KeyCode::PageDown => self.quiz.scroll_review_down(PAGE),
                _ => {}
            },
            QuizPhase::Answering => match key.code {
                KeyCode::Up => self.quiz.select_previous_option(),
                KeyCode::Down => self.quiz.select_next_option(),
                KeyCode::Char(c @ '1'..='9') => {
                    self.quiz.select_answer(c as usize - '1' as usize);
                }
                KeyCode::Enter => {
                    if let Some(outcome) = self.quiz.submit(now) {
                        self.show_quiz_completion(&outcome);
                    }
                }
                _ => {}
            },
            QuizPhase::Revealed => {
                if key.code == KeyCode::Enter
                    && let Some(outcome) = self.quiz.advance_now()
                {
                    self.show_quiz_completion(&outcome);
                }
            }
        }
    }

    fn handle_flashcard_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.flashcards.previous(),
            KeyCode::Right => self.flashcards.next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.flashcards.flip(),
            _ => {}
        }
    }

    fn handle_chat_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let document_id = self.document.as_ref().map(|d| d.document_id.clone());
                if let Some(request) = self.chat.send(document_id.as_deref()) {
                    self.dispatch(request);
                }
            }
            KeyCode::Up => self.chat.scroll_up(1),
            KeyCode::Down => self.chat.scroll_down(1),
            KeyCode::PageUp => self.chat.scroll_up(PAGE),
            KeyCode::PageDown => self.chat.scroll_down(PAGE),
            // The compose line stays editable while a reply is pending; only
            // sending is blocked.
            KeyCode::Left => self.chat.move_left(),
            KeyCode::Right => self.chat.move_right(),
            KeyCode::Home => self.chat.move_home(),
            KeyCode::End => self.chat.move_end(),
            KeyCode::Backspace => self.chat.backspace(),
            KeyCode::Delete => self.chat.delete(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.chat.insert_char(c)
            }
            _ => {}
        }
    }
}

fn failure_for(request: ApiRequest, error: &str) -> ApiResponse {
    let error = error.to_string();
    match request {
        ApiRequest::Health => ApiResponse::Health { online: false },
        ApiRequest::Upload { .. } => ApiResponse::Uploaded(Err(error)),
        ApiRequest::Chat { document_id, .. } => ApiResponse::ChatReply {
            document_id,
            result: Err(error),
        },
        ApiRequest::ListDocuments => ApiResponse::Documents(Err(error)),
        ApiRequest::OpenDocument { .. } => ApiResponse::Opened(Err(error)),
    }
}
