use crate::models::Mcq;
use crate::quiz::{QuizEngine, QuizOutcome};
use crate::utils::{calculate_max_scroll, estimate_text_height, truncate_string};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Per-question breakdown of the last finished run, scrolled by
/// `quiz.review_scroll`.
pub fn draw_quiz_review(f: &mut Frame, quiz: &mut QuizEngine, area: Rect) {
    let Some(outcome) = &quiz.last_outcome else {
        return;
    };
    let text = review_text(quiz.questions(), outcome);

    let visible_height = area.height.saturating_sub(2) as usize;
    let text_width = area.width.saturating_sub(2) as usize;
    quiz.review_max_scroll =
        calculate_max_scroll(estimate_text_height(&text, text_width), visible_height);
    quiz.review_scroll = quiz.review_scroll.min(quiz.review_max_scroll);

    let review = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((quiz.review_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Review"));
    f.render_widget(review, area);
}

fn review_text(questions: &[Mcq], outcome: &QuizOutcome) -> Text<'static> {
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        format!("Last score: {}", outcome.summary()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));

    for (i, (mcq, &chosen)) in questions.iter().zip(&outcome.answers).enumerate() {
        let correct = chosen == mcq.correct_answer;
        let (mark, color) = if correct {
            ("[✓]", Color::Green)
        } else {
            ("[✗]", Color::Red)
        };
        text.push_line(Line::from(vec![
            Span::styled(mark, Style::default().fg(color)),
            Span::from(format!(" {}. {}", i + 1, truncate_string(&mcq.question, 70))),
        ]));
        let option = |index: usize| {
            mcq.options
                .get(index)
                .map(|o| truncate_string(o, 56))
                .unwrap_or_default()
        };
        text.push_line(Line::from(format!("   Your Answer: {}", option(chosen))));
        if !correct {
            text.push_line(Line::from(Span::styled(
                format!("   Correct Answer: {}", option(mcq.correct_answer)),
                Style::default().fg(Color::Green),
            )));
        }
        if !mcq.explanation.is_empty() {
            text.push_line(Line::from(Span::styled(
                format!("   {}", mcq.explanation),
                Style::default().fg(Color::DarkGray),
            )));
        }
        text.push_line(Line::from(""));
    }

    text
}
