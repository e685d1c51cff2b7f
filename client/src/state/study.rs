//! Flashcard deck and mind-map page state.

#[cfg(test)]
#[path = "study_test.rs"]
mod study_test;

use crate::net::types::{Flashcard, MindMapNode};

/// Delay between un-flipping a card and showing its neighbour, so the back
/// face never flashes the next answer.
pub const CARD_SWAP_MS: f64 = 150.0;

/// Guards a generation call: one at a time, never for a blank topic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudyRequest {
    pub generating: bool,
}

impl StudyRequest {
    /// Returns the trimmed topic to request, or `None` if the request is
    /// rejected.
    pub fn begin(&mut self, topic: &str) -> Option<String> {
        let topic = topic.trim();
        if topic.is_empty() || self.generating {
            return None;
        }
        self.generating = true;
        Some(topic.to_owned())
    }

    pub fn finish(&mut self) {
        self.generating = false;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Flashcard>,
    pub index: usize,
    pub flipped: bool,
}

impl Deck {
    /// Replace the deck and show the first card, question side up.
    pub fn load(&mut self, cards: Vec<Flashcard>) {
        self.cards = cards;
        self.index = 0;
        self.flipped = false;
    }

    pub fn clear(&mut self) {
        self.load(Vec::new());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.index)
    }

    pub fn flip(&mut self) {
        if !self.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    pub fn next_card(&mut self) {
        if self.is_empty() {
            return;
        }
        self.flipped = false;
        self.index = (self.index + 1) % self.cards.len();
    }

    pub fn prev_card(&mut self) {
        if self.is_empty() {
            return;
        }
        self.flipped = false;
        self.index = (self.index + self.cards.len() - 1) % self.cards.len();
    }

    /// `"Card 2 of 5"`, or `None` for an empty deck.
    #[must_use]
    pub fn position_label(&self) -> Option<String> {
        (!self.is_empty()).then(|| format!("Card {} of {}", self.index + 1, self.cards.len()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlashcardsState {
    pub topic: String,
    pub request: StudyRequest,
    pub deck: Deck,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MindMapState {
    pub topic: String,
    pub request: StudyRequest,
    pub map: Option<MindMapNode>,
}

impl MindMapState {
    pub fn reset(&mut self) {
        self.map = None;
    }
}
