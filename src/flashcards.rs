use crate::models::Flashcard;

/// Circular navigation over a flashcard deck. Every operation is a no-op on
/// an empty deck.
#[derive(Debug, Default)]
pub struct FlashcardNavigator {
    cards: Vec<Flashcard>,
    pub current_index: usize,
    pub show_answer: bool,
}

impl FlashcardNavigator {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            current_index: 0,
            show_answer: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.current_index)
    }

    /// Text for the visible side of the current card.
    pub fn visible_text(&self) -> Option<&str> {
        self.current().map(|card| {
            if self.show_answer {
                card.back.as_str()
            } else {
                card.front.as_str()
            }
        })
    }

    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.len();
        self.show_answer = false;
    }

    pub fn previous(&mut self) {
        if self.is_empty() {
            return;
        }
        self.current_index = (self.current_index + self.len() - 1) % self.len();
        self.show_answer = false;
    }

    pub fn flip(&mut self) {
        if self.is_empty() {
            return;
        }
        self.show_answer = !self.show_answer;
    }
}
