use crate::session::Alert;
use crate::ui::layout::{centered_rect, help_line};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw_alert(f: &mut Frame, alert: &Alert) {
    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);

    let mut text = Text::default();
    text.push_line(Line::from(""));
    for line in &alert.lines {
        text.push_line(Line::from(line.clone()));
    }
    text.push_line(Line::from(""));
    text.push_line(help_line(&[("Enter", "OK")]));

    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", alert.title))
                .border_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        );
    f.render_widget(popup, area);
}

pub fn draw_reset_confirmation(f: &mut Frame) {
    let area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, area);

    let text = Text::from(vec![
        Line::from(""),
        Line::from("Discard this document and all study progress?"),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Yes (Upload New Document)"),
        ]),
        Line::from(vec![
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::from(" No (Keep Studying)"),
        ]),
    ]);

    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Upload New Document ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(popup, area);
}
