use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub struct StudyLayout {
    pub header_area: Rect,
    pub tabs_area: Rect,
    pub content_area: Rect,
    pub help_area: Rect,
}

pub struct UploadLayout {
    pub title_area: Rect,
    pub files_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_study_chunks(area: Rect) -> StudyLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);

    StudyLayout {
        header_area: chunks[0],
        tabs_area: chunks[1],
        content_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_upload_chunks(area: Rect) -> UploadLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(area);

    UploadLayout {
        title_area: chunks[0],
        files_area: chunks[1],
        status_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Footer line of `key label` pairs, keys highlighted.
pub fn help_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, label)) in hints.iter().enumerate() {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        let separator = if i + 1 < hints.len() { "  " } else { "" };
        spans.push(Span::from(format!(" {}{}", label, separator)));
    }
    Line::from(spans)
}
