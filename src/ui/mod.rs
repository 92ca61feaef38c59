pub mod alert;
pub mod chat;
pub mod flashcards;
pub mod layout;
pub mod library;
pub mod quiz;
pub mod shell;
pub mod summary;
pub mod upload;

use crate::models::AppState;
use crate::session::StudySession;
use ratatui::Frame;

pub fn draw(f: &mut Frame, session: &mut StudySession) {
    match session.app_state {
        AppState::Upload => upload::draw_upload(f, session),
        AppState::Library => library::draw_library(f, &session.library),
        AppState::Study => shell::draw_study(f, session),
        AppState::ResetConfirm => {
            shell::draw_study(f, session);
            alert::draw_reset_confirmation(f);
        }
    }

    if let Some(alert) = &session.alert {
        alert::draw_alert(f, alert);
    }
}
