use crate::logger;
use crate::models::Mcq;
use std::time::{Duration, Instant};

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    Answering,
    Revealed,
}

/// Result of a finished quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
    /// Selected option per question, in question order.
    pub answers: Vec<usize>,
}

impl QuizOutcome {
    pub fn summary(&self) -> String {
        format!("{}/{}", self.score, self.total)
    }

    pub fn message(&self) -> String {
        format!("Quiz completed! Your score: {}", self.summary())
    }
}

#[derive(Debug)]
pub struct QuizEngine {
    questions: Vec<Mcq>,
    pub phase: QuizPhase,
    pub current_question: usize,
    pub selected_answer: Option<usize>,
    pub score: usize,
    answers: Vec<usize>,
    advance_at: Option<Instant>,
    reveal_delay: Duration,
    pub last_outcome: Option<QuizOutcome>,
    /// Scroll position of the review shown after a finished run.
    pub review_scroll: u16,
    /// Set by the review panel on every draw.
    pub review_max_scroll: u16,
}

impl QuizEngine {
    pub fn new(questions: Vec<Mcq>, reveal_delay: Duration) -> Self {
        Self {
            questions,
            phase: QuizPhase::NotStarted,
            current_question: 0,
            selected_answer: None,
            score: 0,
            answers: Vec::new(),
            advance_at: None,
            reveal_delay,
            last_outcome: None,
            review_scroll: 0,
            review_max_scroll: 0,
        }
    }

    pub fn questions(&self) -> &[Mcq] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current(&self) -> Option<&Mcq> {
        self.questions.get(self.current_question)
    }

    pub fn show_result(&self) -> bool {
        self.phase == QuizPhase::Revealed
    }

    pub fn has_pending_advance(&self) -> bool {
        self.advance_at.is_some()
    }

    pub fn start(&mut self) {
        self.phase = QuizPhase::Answering;
        self.current_question = 0;
        self.selected_answer = None;
        self.score = 0;
        self.answers.clear();
        self.advance_at = None;
    }

    pub fn select_answer(&mut self, option: usize) {
        if self.phase != QuizPhase::Answering {
            return;
        }
        let in_range = self
            .current()
            .map(|mcq| option < mcq.options.len())
            .unwrap_or(false);
        if in_range {
            self.selected_answer = Some(option);
        }
    }

    pub fn select_next_option(&mut self) {
        let next = self.selected_answer.map(|i| i + 1).unwrap_or(0);
        self.select_answer(next);
    }

    pub fn select_previous_option(&mut self) {
        let previous = self.selected_answer.map(|i| i.saturating_sub(1)).unwrap_or(0);
        self.select_answer(previous);
    }

    /// Check the selected option and reveal the result. The move to the next
    /// question happens in [`tick`](Self::tick) once the reveal delay elapsed.
    /// An empty quiz completes immediately.
    pub fn submit(&mut self, now: Instant) -> Option<QuizOutcome> {
        if self.phase != QuizPhase::Answering {
            return None;
        }
        if self.questions.is_empty() {
            return Some(self.finish());
        }
        let selected = self.selected_answer?;
        let correct = self.questions[self.current_question].correct_answer;

        if selected == correct {
            self.score += 1;
        }
        self.answers.push(selected);
        self.phase = QuizPhase::Revealed;
        self.advance_at = Some(now + self.reveal_delay);
        None
    }

    /// Run the scheduled advance if it is due.
    pub fn tick(&mut self, now: Instant) -> Option<QuizOutcome> {
        match self.advance_at {
            Some(deadline) if now >= deadline => self.advance(),
            _ => None,
        }
    }

    /// Skip the remaining reveal delay.
    pub fn advance_now(&mut self) -> Option<QuizOutcome> {
        if self.phase == QuizPhase::Revealed {
            self.advance()
        } else {
            None
        }
    }

    pub fn scroll_review_up(&mut self, lines: u16) {
        self.review_scroll = self.review_scroll.saturating_sub(lines);
    }

    pub fn scroll_review_down(&mut self, lines: u16) {
        self.review_scroll = self
            .review_scroll
            .saturating_add(lines)
            .min(self.review_max_scroll);
    }

    /// Drop the scheduled advance, leaving the current result on screen.
    pub fn cancel_pending_advance(&mut self) {
        self.advance_at = None;
    }

    /// Re-arm the advance for a result that is still showing.
    pub fn resume(&mut self, now: Instant) {
        if self.phase == QuizPhase::Revealed && self.advance_at.is_none() {
            self.advance_at = Some(now + self.reveal_delay);
        }
    }

    fn advance(&mut self) -> Option<QuizOutcome> {
        self.advance_at = None;
        if self.current_question + 1 < self.questions.len() {
            self.current_question += 1;
            self.selected_answer = None;
            self.phase = QuizPhase::Answering;
            None
        } else {
            Some(self.finish())
        }
    }

    /// Count matches over the whole answer history.
    fn final_score(&self) -> usize {
        self.answers
            .iter()
            .zip(&self.questions)
            .filter(|(answer, mcq)| **answer == mcq.correct_answer)
            .count()
    }

    fn finish(&mut self) -> QuizOutcome {
        let outcome = QuizOutcome {
            score: self.final_score(),
            total: self.questions.len(),
            answers: self.answers.clone(),
        };
        logger::log(&format!("Quiz completed with score {}", outcome.summary()));
        self.phase = QuizPhase::NotStarted;
        self.selected_answer = None;
        self.advance_at = None;
        self.last_outcome = Some(outcome.clone());
        self.review_scroll = 0;
        outcome
    }
}
