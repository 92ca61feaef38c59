use crate::flashcards::FlashcardNavigator;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_flashcards(f: &mut Frame, cards: &FlashcardNavigator, area: Rect) {
    let Some(text) = cards.visible_text() else {
        let empty = Paragraph::new("No flashcards available")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Flashcards"));
        f.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let counter = Paragraph::new(format!(
        "Card {} of {}",
        cards.current_index + 1,
        cards.len()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(counter, chunks[0]);

    let (side, color) = if cards.show_answer {
        ("Answer", Color::Green)
    } else {
        ("Question", Color::Yellow)
    };
    let mut body = Text::default();
    // Vertically centre short cards.
    let padding = chunks[1].height.saturating_sub(3) / 2;
    for _ in 0..padding {
        body.push_line(Line::from(""));
    }
    body.push_line(Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let card = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(side)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(card, chunks[1]);

    let hint = if cards.show_answer {
        "Press Space to show question"
    } else {
        "Press Space to reveal answer"
    };
    let flip = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(flip, chunks[2]);
}
