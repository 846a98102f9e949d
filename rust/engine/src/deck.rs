use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{board_cards, draw_deck, Card};
use crate::errors::GameError;

/// Draw pile plus discard pile, driven by a seeded RNG so that two peers
/// seeded alike observe the same layout and the same draw order.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Top of the pile is the end of the vector
    draw_pile: Vec<Card>,
    /// Top of the pile is the front
    discard_pile: VecDeque<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut draw_pile = draw_deck();
        draw_pile.shuffle(&mut rng);
        Self {
            draw_pile,
            discard_pile: VecDeque::new(),
            rng,
        }
    }

    /// Builds a deck from explicit piles. The discard pile is given top first.
    pub fn with_piles(seed: u64, draw_pile: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        Self {
            draw_pile,
            discard_pile: discard_pile.into(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Shuffles the 100 board cards with this deck's RNG.
    pub fn build_board_layout(&mut self) -> Vec<Card> {
        let mut cells = board_cards();
        cells.shuffle(&mut self.rng);
        cells
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return Err(GameError::DeckExhausted);
            }
            self.reshuffle();
        }
        self.draw_pile.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push_front(card);
    }

    pub fn top_of_discard(&self) -> Option<Card> {
        self.discard_pile.front().copied()
    }

    /// Moves the whole discard pile back under the draw pile and shuffles.
    pub fn reshuffle(&mut self) {
        let moved = self.discard_pile.len();
        self.draw_pile.extend(self.discard_pile.drain(..).rev());
        self.draw_pile.shuffle(&mut self.rng);
        tracing::debug!(moved, "reshuffled discard pile into draw pile");
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> impl Iterator<Item = &Card> {
        self.discard_pile.iter()
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn remaining(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }
}
