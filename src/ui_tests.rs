#[cfg(test)]
mod ui_render_tests {
    use crate::config::Config;
    use crate::models::{ApiRequest, ApiResponse, AppState, Document, DocumentSummary, Flashcard, Mcq, Tab};
    use crate::quiz::DEFAULT_REVEAL_DELAY;
    use crate::session::StudySession;
    use crossbeam_channel::Receiver;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;
    use std::time::Instant;

    const WIDTH: u16 = 100;
    const HEIGHT: u16 = 40;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
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
            text_preview: Some("Cell biology\nchapter one".to_string()),
        }
    }

    /// The receiver must outlive the session or every request fails at once.
    fn create_test_session(pdf_dir: PathBuf) -> (StudySession, Receiver<ApiRequest>) {
        let config = Config {
            pdf_dir,
            ..Config::default()
        };
        let (tx, rx) = crossbeam_channel::unbounded();
        (StudySession::new(&config, Some(tx)), rx)
    }

    fn loaded_session() -> (StudySession, Receiver<ApiRequest>) {
        let (mut session, rx) = create_test_session(PathBuf::from("/no/such/dir"));
        session.process_api_response(ApiResponse::Uploaded(Ok(scenario_document())));
        (session, rx)
    }

    /// Render one frame and return the screen as text rows.
    fn render(session: &mut StudySession) -> String {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal.draw(|f| crate::ui::draw(f, session)).unwrap();
        let mut screen = String::new();
        for row in terminal.backend().buffer().content().chunks(WIDTH as usize) {
            for cell in row {
                screen.push_str(cell.symbol());
            }
            screen.push('\n');
        }
        screen
    }

    #[test]
    fn test_upload_screen_without_files_or_backend() {
        let (mut session, _rx) = create_test_session(PathBuf::from("/no/such/dir"));
        let screen = render(&mut session);
        assert!(screen.contains("StudyGenie v"));
        assert!(screen.contains("No PDF files found"));
        assert!(screen.contains("Backend: not configured"));
        assert!(screen.contains("No file selected"));
    }

    #[test]
    fn test_upload_screen_lists_and_selects_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("biology.pdf"), b"%PDF-1.4").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"skip").unwrap();
        let (mut session, _rx) = create_test_session(dir.path().to_path_buf());

        session.handle_key(key(KeyCode::Enter), Instant::now());
        let screen = render(&mut session);
        assert!(screen.contains("biology.pdf"));
        assert!(!screen.contains("notes.txt"));
        assert!(screen.contains("Selected: biology.pdf"));
        assert!(screen.contains("Press u to Upload"));
    }

    #[test]
    fn test_processing_indicator_while_uploading() {
        let (mut session, _rx) = create_test_session(PathBuf::from("/no/such/dir"));
        session.upload.selected_file = Some(PathBuf::from("/tmp/notes.pdf"));
        session.handle_key(key(KeyCode::Char('u')), Instant::now());
        assert!(session.upload.is_uploading);
        assert!(render(&mut session).contains("Processing..."));
    }

    #[test]
    fn test_study_header_and_tabs() {
        let (mut session, _rx) = loaded_session();
        let screen = render(&mut session);
        assert!(screen.contains("notes.pdf"));
        assert!(screen.contains("Cell biology chapter one"));
        assert!(screen.contains("Quiz"));
        assert!(screen.contains("Flashcards"));
        assert!(screen.contains("AI Tutor"));
        assert!(screen.contains("This quiz has 1 questions"));
    }

    #[test]
    fn test_quiz_reveal_and_completion_alert() {
        let (mut session, _rx) = loaded_session();
        let now = Instant::now();
        session.handle_key(key(KeyCode::Enter), now);
        let screen = render(&mut session);
        assert!(screen.contains("Question 1 of 1"));
        assert!(screen.contains("Score: 0/1"));

        session.handle_key(key(KeyCode::Char('2')), now);
        session.handle_key(key(KeyCode::Enter), now);
        let screen = render(&mut session);
        assert!(screen.contains("Score: 1/1"));
        assert!(screen.contains("Correct!"));
        assert!(screen.contains("because B"));

        session.tick(now + DEFAULT_REVEAL_DELAY);
        let screen = render(&mut session);
        assert!(screen.contains("Quiz completed! Your score: 1/1"));
        // Review of the finished run sits behind the alert on the intro panel.
        session.handle_key(key(KeyCode::Enter), now);
        let screen = render(&mut session);
        assert!(screen.contains("Last score: 1/1"));
        assert!(screen.contains("Press Enter to Retake Quiz"));
    }

    #[test]
    fn test_empty_quiz_message() {
        let (mut session, _rx) = create_test_session(PathBuf::from("/no/such/dir"));
        let mut document = scenario_document();
        document.mcqs.clear();
        session.load_document(document, Vec::new());
        session.handle_key(key(KeyCode::Enter), Instant::now());
        assert!(render(&mut session).contains("No questions were generated"));
    }

    #[test]
    fn test_flashcard_panel() {
        let (mut session, _rx) = loaded_session();
        session.set_tab(Tab::Flashcards, Instant::now());
        let screen = render(&mut session);
        assert!(screen.contains("Card 1 of 1"));
        assert!(screen.contains("F1"));
        assert!(screen.contains("Press Space to reveal answer"));

        session.handle_key(key(KeyCode::Char(' ')), Instant::now());
        let screen = render(&mut session);
        assert!(screen.contains("B1"));
        assert!(screen.contains("Press Space to show question"));
    }

    #[test]
    fn test_flashcard_panel_without_cards() {
        let (mut session, _rx) = create_test_session(PathBuf::from("/no/such/dir"));
        let mut document = scenario_document();
        document.flashcards.clear();
        session.load_document(document, Vec::new());
        session.set_tab(Tab::Flashcards, Instant::now());
        assert!(render(&mut session).contains("No flashcards available"));
    }

    #[test]
    fn test_chat_panel_states() {
        let (mut session, _rx) = loaded_session();
        session.set_tab(Tab::Chat, Instant::now());
        let screen = render(&mut session);
        assert!(screen.contains("Start a conversation! Ask me anything about your document."));

        for c in "hello".chars() {
            session.handle_key(key(KeyCode::Char(c)), Instant::now());
        }
        session.handle_key(key(KeyCode::Enter), Instant::now());
        let screen = render(&mut session);
        assert!(screen.contains("hello"));
        assert!(screen.contains("AI is thinking..."));

        session.process_api_response(ApiResponse::ChatReply {
            document_id: "d1".to_string(),
            result: Err("connection refused".to_string()),
        });
        let screen = render(&mut session);
        assert!(screen.contains("Sorry, I encountered an error. Please try again."));
        assert!(!screen.contains("AI is thinking..."));
        assert_eq!(session.chat.cached_message_count, 2);
    }

    #[test]
    fn test_chat_follows_tail() {
        let (mut session, _rx) = loaded_session();
        session.set_tab(Tab::Chat, Instant::now());
        for i in 0..30 {
            session
                .chat
                .transcript
                .push(crate::models::ChatTurn::ai(format!("reply number {}", i)));
        }
        let screen = render(&mut session);
        assert!(session.chat.max_scroll > 0);
        assert_eq!(session.chat.scroll_y, session.chat.max_scroll);
        assert!(screen.contains("reply number 29"));
        assert!(!screen.contains("reply number 0 "));
    }

    #[test]
    fn test_reset_confirmation_overlay() {
        let (mut session, _rx) = loaded_session();
        session.handle_key(key(KeyCode::Esc), Instant::now());
        assert_eq!(session.app_state, AppState::ResetConfirm);
        let screen = render(&mut session);
        assert!(screen.contains("Upload New Document"));
        assert!(screen.contains("Keep Studying"));
    }

    #[test]
    fn test_library_screen() {
        let (mut session, _rx) = create_test_session(PathBuf::from("/no/such/dir"));
        session.handle_key(key(KeyCode::Char('l')), Instant::now());
        assert!(render(&mut session).contains("Loading documents..."));

        session.process_api_response(ApiResponse::Documents(Ok(vec![DocumentSummary {
            id: "d1".to_string(),
            filename: "genetics.pdf".to_string(),
            upload_time: Some("2024-03-01T12:00:00".to_string()),
        }])));
        let screen = render(&mut session);
        assert!(screen.contains("genetics.pdf"));
        assert!(screen.contains("2024-03-01"));
    }

    #[test]
    fn test_library_keeps_selection_visible() {
        let (mut session, _rx) = create_test_session(PathBuf::from("/no/such/dir"));
        session.handle_key(key(KeyCode::Char('l')), Instant::now());
        let documents = (0..60)
            .map(|i| DocumentSummary {
                id: format!("id{}", i),
                filename: format!("doc{}.pdf", i),
                upload_time: None,
            })
            .collect();
        session.process_api_response(ApiResponse::Documents(Ok(documents)));
        assert!(render(&mut session).contains("doc0.pdf"));

        for _ in 0..50 {
            session.handle_key(key(KeyCode::Down), Instant::now());
        }
        let screen = render(&mut session);
        assert!(screen.contains("doc50.pdf"));
        assert!(!screen.contains("doc0.pdf"));
    }

    #[test]
    fn test_upload_list_keeps_highlight_visible() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..40 {
            std::fs::write(dir.path().join(format!("paper{:02}.pdf", i)), b"%PDF-1.4").unwrap();
        }
        let (mut session, _rx) = create_test_session(dir.path().to_path_buf());
        for _ in 0..39 {
            session.handle_key(key(KeyCode::Down), Instant::now());
        }
        let screen = render(&mut session);
        assert!(screen.contains("paper39.pdf"));
        assert!(!screen.contains("paper00.pdf"));
    }

    #[test]
    fn test_long_quiz_review_scrolls() {
        let (mut session, _rx) = create_test_session(PathBuf::from("/no/such/dir"));
        let mut document = scenario_document();
        document.mcqs = (1..=10)
            .map(|i| Mcq {
                question: format!("Question number {}", i),
                options: vec!["A", "B", "C", "D"].into_iter().map(String::from).collect(),
                correct_answer: 1,
                explanation: format!("explanation for {}", i),
            })
            .collect();
        session.load_document(document, Vec::new());

        let now = Instant::now();
        session.handle_key(key(KeyCode::Enter), now);
        for _ in 0..10 {
            // Always picks option A, so every answer is wrong.
            session.handle_key(key(KeyCode::Char('1')), now);
            session.handle_key(key(KeyCode::Enter), now);
            session.handle_key(key(KeyCode::Enter), now);
        }
        assert!(render(&mut session).contains("Quiz completed! Your score: 0/10"));
        session.handle_key(key(KeyCode::Enter), now);

        let screen = render(&mut session);
        assert!(screen.contains("Last score: 0/10"));
        assert!(!screen.contains("Question number 10"));
        assert!(session.quiz.review_max_scroll > 0);

        for _ in 0..6 {
            session.handle_key(key(KeyCode::PageDown), now);
        }
        let screen = render(&mut session);
        assert_eq!(session.quiz.review_scroll, session.quiz.review_max_scroll);
        assert!(screen.contains("Question number 10"));
        assert!(screen.contains("explanation for 10"));

        session.handle_key(key(KeyCode::Up), now);
        render(&mut session);
        assert_eq!(session.quiz.review_scroll, session.quiz.review_max_scroll - 1);
    }

    #[test]
    fn test_long_chat_input_keeps_cursor_line_visible() {
        let (mut session, _rx) = loaded_session();
        session.set_tab(Tab::Chat, Instant::now());
        let message = format!("{}END", "a".repeat(500));
        for c in message.chars() {
            session.handle_key(key(KeyCode::Char(c)), Instant::now());
        }
        assert!(render(&mut session).contains("END"));
    }
}
