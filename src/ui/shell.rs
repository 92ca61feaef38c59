use crate::models::Tab;
use crate::quiz::QuizPhase;
use crate::session::StudySession;
use crate::ui::chat::draw_chat;
use crate::ui::flashcards::draw_flashcards;
use crate::ui::layout::{calculate_study_chunks, help_line};
use crate::ui::quiz::draw_quiz;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

const PREVIEW_CHARS: usize = 120;

pub fn draw_study(f: &mut Frame, session: &mut StudySession) {
    let layout = calculate_study_chunks(f.area());

    let (filename, preview) = match &session.document {
        Some(doc) => (
            doc.filename.clone(),
            doc.text_preview
                .as_deref()
                .map(|p| truncate_string(&p.replace('\n', " "), PREVIEW_CHARS)),
        ),
        None => (String::new(), None),
    };
    let mut header_lines = vec![Line::from(vec![
        Span::styled(
            "StudyGenie  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(filename),
    ])];
    if let Some(preview) = preview {
        header_lines.push(Line::from(Span::styled(
            preview,
            Style::default().fg(Color::DarkGray),
        )));
    }
    let header = Paragraph::new(header_lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .select(session.active_tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, layout.tabs_area);

    match session.active_tab {
        Tab::Quiz => draw_quiz(f, &mut session.quiz, layout.content_area),
        Tab::Flashcards => draw_flashcards(f, &session.flashcards, layout.content_area),
        Tab::Chat => draw_chat(f, &mut session.chat, layout.content_area),
    }

    let mut hints: Vec<(&str, &str)> = match session.active_tab {
        Tab::Quiz => match session.quiz.phase {
            QuizPhase::NotStarted if session.quiz.last_outcome.is_some() => {
                vec![("Enter", "Retake Quiz"), ("↑/↓", "Scroll Review")]
            }
            QuizPhase::NotStarted => vec![("Enter", "Start Quiz")],
            QuizPhase::Answering => vec![("↑/↓", "Select"), ("1-9", "Choose"), ("Enter", "Submit")],
            QuizPhase::Revealed => vec![("Enter", "Next")],
        },
        Tab::Flashcards => vec![("←/→", "Previous/Next"), ("Space", "Flip")],
        Tab::Chat => vec![("Enter", "Send"), ("↑/↓", "Scroll")],
    };
    hints.extend([("Tab", "Switch"), ("Esc", "New Document"), ("Ctrl+C", "Quit")]);
    let help = Paragraph::new(help_line(&hints))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
