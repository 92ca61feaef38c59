use crate::logger;
use crate::models::{ApiRequest, ChatTurn};
use ratatui::text::Line;

pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Chat transcript with the document tutor plus the compose line.
///
/// Only one request may be outstanding: `send` refuses while `is_loading`,
/// so replies are appended in the same order the questions were sent.
#[derive(Debug, Default)]
pub struct ChatSession {
    pub transcript: Vec<ChatTurn>,
    pub input_buffer: String,
    /// Byte offset into `input_buffer`, always on a char boundary.
    pub cursor_position: usize,
    pub is_loading: bool,
    pub scroll_y: u16,
    pub max_scroll: u16,
    pub follow_tail: bool,
    pub rendered_lines_cache: Vec<Line<'static>>,
    pub cached_message_count: usize,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            follow_tail: true,
            ..Default::default()
        }
    }

    pub fn with_transcript(transcript: Vec<ChatTurn>) -> Self {
        Self {
            transcript,
            ..Self::new()
        }
    }

    /// Queue the compose buffer as a question about `document_id`.
    ///
    /// Blank input, a missing document and an outstanding request all leave
    /// the transcript untouched and return `None`.
    pub fn send(&mut self, document_id: Option<&str>) -> Option<ApiRequest> {
        if self.input_buffer.trim().is_empty() || self.is_loading {
            return None;
        }
        let document_id = document_id?;

        let message = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        self.transcript.push(ChatTurn::user(message.clone()));
        self.is_loading = true;
        self.follow_tail = true;

        Some(ApiRequest::Chat {
            document_id: document_id.to_string(),
            message,
        })
    }

    /// Record the outcome of the outstanding request. Failures become the
    /// fixed apology so the exchange is never dropped.
    pub fn complete(&mut self, result: Result<String, String>) {
        let reply = match result {
            Ok(response) => response,
            Err(error) => {
                logger::log(&format!("Chat request failed: {}", error));
                FALLBACK_REPLY.to_string()
            }
        };
        self.transcript.push(ChatTurn::ai(reply));
        self.is_loading = false;
        self.follow_tail = true;
    }

    pub fn insert_char(&mut self, c: char) {
        self.input_buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(previous) = self.previous_boundary() {
            self.input_buffer.drain(previous..self.cursor_position);
            self.cursor_position = previous;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.input_buffer.drain(self.cursor_position..next);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(previous) = self.previous_boundary() {
            self.cursor_position = previous;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor_position = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_position = self.input_buffer.len();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow_tail = false;
        self.scroll_y = self.scroll_y.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_y = self.scroll_y.saturating_add(lines).min(self.max_scroll);
        if self.scroll_y >= self.max_scroll {
            self.follow_tail = true;
        }
    }

    fn previous_boundary(&self) -> Option<usize> {
        self.input_buffer[..self.cursor_position.min(self.input_buffer.len())]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        let rest = self.input_buffer.get(self.cursor_position..)?;
        rest.chars().next().map(|c| self.cursor_position + c.len_utf8())
    }
}
