use crate::chat::ChatSession;
use crate::models::ChatRole;
use crate::utils::{
    calculate_max_scroll, calculate_wrapped_cursor_position, estimate_text_height,
    render_markdown,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const MAX_INPUT_HEIGHT: u16 = 6;

/// Rebuild the rendered transcript. Markdown parsing is the expensive part,
/// so this only runs when the number of turns changes.
pub fn rebuild_chat_cache(chat: &mut ChatSession) {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for turn in &chat.transcript {
        match turn.role {
            ChatRole::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
                for line in turn.message.lines() {
                    lines.push(Line::from(format!("  {}", line)));
                }
            }
            ChatRole::Ai => {
                lines.push(Line::from(Span::styled(
                    "AI Tutor:",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
                for line in render_markdown(&turn.message) {
                    let mut spans: Vec<Span<'static>> = vec![Span::from("  ")];
                    spans.extend(line.spans);
                    lines.push(Line::from(spans));
                }
            }
        }
        lines.push(Line::from(""));
    }

    chat.rendered_lines_cache = lines;
    chat.cached_message_count = chat.transcript.len();
}

pub fn draw_chat(f: &mut Frame, chat: &mut ChatSession, area: Rect) {
    let input_width = area.width.saturating_sub(2) as usize;
    let (last_row, _) = calculate_wrapped_cursor_position(
        &chat.input_buffer,
        chat.input_buffer.len(),
        input_width,
    );
    let input_height = (last_row as u16 + 3).min(MAX_INPUT_HEIGHT);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(input_height)])
        .split(area);

    if chat.cached_message_count != chat.transcript.len() {
        rebuild_chat_cache(chat);
    }

    let mut message_lines = chat.rendered_lines_cache.clone();
    if chat.is_loading {
        message_lines.push(Line::from(Span::styled(
            "AI is thinking...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    if message_lines.is_empty() {
        message_lines.push(Line::from(Span::styled(
            "Start a conversation! Ask me anything about your document.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let visible_height = chunks[0].height.saturating_sub(2) as usize;
    let text_width = chunks[0].width.saturating_sub(2) as usize;
    let content = Text::from(message_lines);
    let content_height = estimate_text_height(&content, text_width);
    chat.max_scroll = calculate_max_scroll(content_height, visible_height);
    chat.scroll_y = if chat.follow_tail {
        chat.max_scroll
    } else {
        chat.scroll_y.min(chat.max_scroll)
    };

    let messages = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((chat.scroll_y, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" AI Tutor ")
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(messages, chunks[0]);

    let input_text = if chat.input_buffer.is_empty() {
        Text::from(Span::styled(
            "Ask a question about your document...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(chat.input_buffer.as_str())
    };
    // Keep the cursor row inside the box once the input outgrows it.
    let (cursor_row, cursor_col) = calculate_wrapped_cursor_position(
        &chat.input_buffer,
        chat.cursor_position,
        input_width,
    );
    let inner_height = chunks[1].height.saturating_sub(2);
    let input_scroll = (cursor_row as u16).saturating_sub(inner_height.saturating_sub(1));
    let input = Paragraph::new(input_text)
        .wrap(Wrap { trim: false })
        .scroll((input_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Message ")
                .border_style(if chat.is_loading {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::Yellow)
                }),
        );
    f.render_widget(input, chunks[1]);

    let cursor_x = chunks[1].x + 1 + cursor_col as u16;
    let cursor_y = chunks[1].y + 1 + (cursor_row as u16).saturating_sub(input_scroll);
    f.set_cursor_position((cursor_x, cursor_y));
}
