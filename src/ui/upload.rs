use crate::session::StudySession;
use crate::ui::layout::{calculate_upload_chunks, help_line};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw_upload(f: &mut Frame, session: &StudySession) {
    let layout = calculate_upload_chunks(f.area());
    let upload = &session.upload;

    let title = Paragraph::new(format!("StudyGenie v{}", env!("CARGO_PKG_VERSION")))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.title_area);

    let items: Vec<ListItem> = if upload.pdf_files.is_empty() {
        vec![ListItem::new("No PDF files found").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        upload
            .pdf_files
            .iter()
            .map(|path| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                let marker = if upload.selected_file.as_ref() == Some(path) {
                    "● "
                } else {
                    "  "
                };
                ListItem::new(format!("{}{}", marker, name))
            })
            .collect()
    };
    let mut state = ListState::default()
        .with_selected((!upload.pdf_files.is_empty()).then_some(upload.highlighted));

    let files = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" PDF files in {} ", upload.pdf_dir.display()))
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_stateful_widget(files, layout.files_area, &mut state);

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout.status_area);

    let (backend_lines, backend_color) = match (&session.backend_url, session.backend_online) {
        (None, _) => (
            vec![
                Line::from("Backend: not configured"),
                Line::from("Set STUDYGENIE_BACKEND_URL"),
            ],
            Color::Yellow,
        ),
        (Some(url), online) => {
            let (status, color) = match online {
                Some(true) => ("online", Color::Green),
                Some(false) => ("offline", Color::Red),
                None => ("checking...", Color::Yellow),
            };
            (
                vec![
                    Line::from(format!("Backend: {}", status)),
                    Line::from(url.clone()),
                ],
                color,
            )
        }
    };
    let backend = Paragraph::new(backend_lines)
        .style(
            Style::default()
                .fg(backend_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title("Backend"));
    f.render_widget(backend, status_chunks[0]);

    let selection_lines = match upload.selected_name() {
        Some(name) => vec![
            Line::from(format!("Selected: {}", name)),
            if upload.is_uploading {
                Line::from("Processing...")
            } else {
                Line::from("Press u to Upload & Generate Study Materials")
            },
        ],
        None => vec![
            Line::from("No file selected"),
            Line::from("Choose a PDF with Enter"),
        ],
    };
    let selection = Paragraph::new(selection_lines)
        .style(if upload.is_uploading {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        })
        .block(Block::default().borders(Borders::ALL).title("Get Started"));
    f.render_widget(selection, status_chunks[1]);

    let help = Paragraph::new(help_line(&[
        ("↑/↓", "Navigate"),
        ("Enter", "Select"),
        ("u", "Upload"),
        ("l", "Library"),
        ("r", "Refresh"),
        ("q", "Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
