pub mod api;
pub mod api_worker;
pub mod chat;
pub mod config;
pub mod flashcards;
pub mod library;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod session;
pub mod ui;
pub mod upload;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use api::{ApiError, HttpBackend, StudyBackend};
pub use api_worker::spawn_api_worker;
pub use config::Config;
pub use models::{ApiRequest, ApiResponse, AppState, ChatTurn, Document, Flashcard, Mcq, Tab};
pub use session::StudySession;
pub use ui::draw;
pub use utils::calculate_wrapped_cursor_position;
