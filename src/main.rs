use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use studygenie_tui::{
    config::{Config, BACKEND_URL_ENV},
    logger,
    models::{ApiRequest, ApiResponse},
    spawn_api_worker, HttpBackend, StudySession,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "studygenie", version, about = "Study PDFs with generated quizzes, flashcards and an AI tutor")]
struct Cli {
    #[arg(short, long, env = BACKEND_URL_ENV, help = "Base URL of the StudyGenie backend")]
    backend_url: Option<String>,

    #[arg(short, long, help = "Directory to list PDF files from")]
    pdf_dir: Option<PathBuf>,

    #[arg(short, long, help = "PDF to preselect for upload")]
    file: Option<PathBuf>,

    #[arg(long, help = "Debug log path")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Delay before the quiz moves on after an answer, in milliseconds")]
    reveal_delay_ms: Option<u64>,

    #[arg(long, help = "Backend request timeout in seconds")]
    timeout_secs: Option<u64>,
}

impl Cli {
    fn apply(self, config: Config) -> Config {
        Config {
            backend_url: self
                .backend_url
                .filter(|url| !url.trim().is_empty())
                .or(config.backend_url),
            pdf_dir: self.pdf_dir.unwrap_or(config.pdf_dir),
            initial_file: self.file.or(config.initial_file),
            log_file: self.log_file.unwrap_or(config.log_file),
            reveal_delay: self
                .reveal_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(config.reveal_delay),
            request_timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(config.request_timeout),
        }
    }
}

fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    let config = Cli::parse().apply(Config::from_env());

    logger::init(&config.log_file);
    logger::log(&format!(
        "Starting StudyGenie, backend {}",
        config.backend_url.as_deref().unwrap_or("<not configured>")
    ));

    let backend = Arc::new(HttpBackend::new(
        config.backend_url.clone(),
        config.request_timeout,
    ));
    let (request_tx, request_rx) = crossbeam_channel::unbounded::<ApiRequest>();
    let (response_tx, response_rx) = crossbeam_channel::unbounded::<ApiResponse>();
    let _worker = spawn_api_worker(backend, response_tx, request_rx)?;

    let mut session = StudySession::new(&config, Some(request_tx));
    session.check_backend();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut session, &response_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        logger::log(&format!("Exited with error: {}", err));
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut StudySession,
    responses: &crossbeam_channel::Receiver<ApiResponse>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| studygenie_tui::draw(f, session))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            session.handle_key(key, Instant::now());
        }

        while let Ok(response) = responses.try_recv() {
            session.process_api_response(response);
        }
        session.tick(Instant::now());

        if session.should_quit {
            logger::log("Quit requested");
            return Ok(());
        }
    }
}
