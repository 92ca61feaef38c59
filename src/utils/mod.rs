pub mod markdown;

pub use markdown::render_markdown;

use ratatui::text::Text;
use unicode_width::UnicodeWidthChar;

/// Shorten `s` to at most `max_chars` characters, ending in "..." when cut.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Break `text` into visual rows of at most `max_width` columns.
/// Each row is `(start_byte, end_byte, width)`; explicit newlines always
/// start a new row.
fn wrap_rows(text: &str, max_width: usize) -> Vec<(usize, usize, usize)> {
    let max_width = max_width.max(1);
    let mut rows = Vec::new();
    let mut start = 0;
    let mut width = 0;

    for (i, ch) in text.char_indices() {
        if ch == '\n' {
            rows.push((start, i, width));
            start = i + 1;
            width = 0;
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if width + w > max_width && width > 0 {
            rows.push((start, i, width));
            start = i;
            width = 0;
        }
        width += w;
    }
    rows.push((start, text.len(), width));
    rows
}

/// Row and column of the cursor at byte offset `cursor` once `text` is
/// wrapped to `max_width` columns.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor: usize,
    max_width: usize,
) -> (usize, usize) {
    let cursor = cursor.min(text.len());
    let rows = wrap_rows(text, max_width);

    for (row, (start, end, _)) in rows.iter().enumerate() {
        let is_last = row + 1 == rows.len();
        // A cursor sitting exactly on a soft wrap point belongs to the
        // following row, except at the very end of the text.
        let at_row_end = cursor == *end && (is_last || text[*end..].starts_with('\n'));
        if cursor >= *start && (cursor < *end || at_row_end) {
            let col: usize = text[*start..cursor]
                .chars()
                .map(|c| c.width().unwrap_or(0))
                .sum();
            return (row, col);
        }
    }

    let last = rows.len() - 1;
    (last, rows[last].2)
}

/// Rows needed to show `text` in an area `width` columns wide.
pub fn estimate_text_height(text: &Text, width: usize) -> usize {
    let width = width.max(1);
    text.lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

pub fn calculate_max_scroll(content_height: usize, visible_height: usize) -> u16 {
    content_height
        .saturating_sub(visible_height)
        .min(u16::MAX as usize) as u16
}
