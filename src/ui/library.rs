use crate::library::Library;
use crate::ui::layout::help_line;
use crate::utils::truncate_string;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d";

/// Upload times come back either as RFC 3339 or as a naive ISO timestamp
/// in UTC.
pub fn parse_upload_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn format_relative(datetime: DateTime<Local>, today: NaiveDate) -> String {
    let date = datetime.date_naive();
    if date == today {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if date == today - chrono::Duration::days(1) {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}

fn format_upload_time(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "unknown date".to_string();
    };
    match parse_upload_time(raw) {
        Some(datetime) => {
            format_relative(datetime.with_timezone(&Local), Local::now().date_naive())
        }
        None => truncate_string(raw, 16),
    }
}

pub fn draw_library(f: &mut Frame, library: &Library) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Your Documents")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let placeholder = if library.is_loading {
        Some("Loading documents...")
    } else if library.documents.is_empty() {
        Some("No documents uploaded yet")
    } else {
        None
    };

    let items: Vec<ListItem> = match placeholder {
        Some(text) => vec![ListItem::new(text).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )],
        None => library
            .documents
            .iter()
            .map(|doc| {
                ListItem::new(format!(
                    "{:<16} {}",
                    format_upload_time(doc.upload_time.as_deref()),
                    truncate_string(&doc.filename, 60)
                ))
            })
            .collect(),
    };
    // The state keeps the selected row scrolled into view.
    let mut state = ListState::default()
        .with_selected(placeholder.is_none().then_some(library.selected));

    let list_title = if library.is_opening {
        " Opening document... "
    } else {
        " Documents "
    };
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(list_title)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_stateful_widget(list, chunks[1], &mut state);

    let help = Paragraph::new(help_line(&[
        ("↑/↓", "Navigate"),
        ("Enter", "Open"),
        ("r", "Refresh"),
        ("Esc", "Back"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
