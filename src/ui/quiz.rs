use crate::quiz::{QuizEngine, QuizPhase};
use crate::ui::summary::draw_quiz_review;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, quiz: &mut QuizEngine, area: Rect) {
    match quiz.phase {
        QuizPhase::NotStarted => draw_quiz_intro(f, quiz, area),
        QuizPhase::Answering | QuizPhase::Revealed => draw_question(f, quiz, area),
    }
}

fn draw_quiz_intro(f: &mut Frame, quiz: &mut QuizEngine, area: Rect) {
    let intro_height = if quiz.last_outcome.is_some() { 5 } else { area.height };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(intro_height), Constraint::Min(0)])
        .split(area);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Test Your Knowledge",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(format!(
        "This quiz has {} questions",
        quiz.total()
    )));
    let start_hint = if quiz.last_outcome.is_some() {
        "Press Enter to Retake Quiz"
    } else {
        "Press Enter to Start Quiz"
    };
    text.push_line(Line::from(Span::styled(
        start_hint,
        Style::default().fg(Color::Yellow),
    )));

    let intro = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Quiz"));
    f.render_widget(intro, chunks[0]);

    if quiz.last_outcome.is_some() {
        draw_quiz_review(f, quiz, chunks[1]);
    }
}

fn draw_question(f: &mut Frame, quiz: &QuizEngine, area: Rect) {
    let Some(mcq) = quiz.current() else {
        let empty = Paragraph::new(vec![
            Line::from("No questions were generated for this document."),
            Line::from("Press Enter to finish."),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("Quiz"));
        f.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(if quiz.show_result() { 5 } else { 0 }),
        ])
        .split(area);

    let progress = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Question {} of {}", quiz.current_question + 1, quiz.total()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from("    "),
        Span::from(format!("Score: {}/{}", quiz.score, quiz.total())),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(progress, chunks[0]);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        mcq.question.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    for (i, option) in mcq.options.iter().enumerate() {
        let selected = quiz.selected_answer == Some(i);
        let style = if quiz.show_result() && i == mcq.correct_answer {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if quiz.show_result() && selected {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let marker = if selected { ">" } else { " " };
        text.push_line(Line::from(Span::styled(
            format!("{} {}. {}", marker, i + 1, option),
            style,
        )));
    }

    let question = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, chunks[1]);

    if quiz.show_result() {
        let correct = quiz.selected_answer == Some(mcq.correct_answer);
        let (verdict, color) = if correct {
            ("Correct!", Color::Green)
        } else {
            ("Incorrect", Color::Red)
        };
        let mut result = Text::default();
        result.push_line(Line::from(Span::styled(
            verdict,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        if !mcq.explanation.is_empty() {
            result.push_line(Line::from(mcq.explanation.clone()));
        }
        let explanation = Paragraph::new(result)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Explanation"));
        f.render_widget(explanation, chunks[2]);
    }
}
