use crate::cards::Card;
use crate::errors::GameError;
use serde::{Deserialize, Serialize};

/// Chip color shown for a player's placed chips.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    /// Local player's chips
    Red,
    /// Remote player's chips
    Blue,
}

/// A participant in the match: identity, hand, and sequence tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Matchmaking identifier (summed with the opponent's to seed the deck)
    id: u64,
    /// Display name
    name: String,
    /// Cards in hand, addressed by position
    hand: Vec<Card>,
    /// Color of this player's chips
    chip_color: ChipColor,
    /// Sequences credited so far in this match
    sequences: u32,
    winner: bool,
}

impl Player {
    pub fn new(chip_color: ChipColor) -> Self {
        Self {
            id: 0,
            name: String::new(),
            hand: Vec::new(),
            chip_color,
            sequences: 0,
            winner: false,
        }
    }

    pub fn initialize(&mut self, id: u64, name: &str) {
        self.id = id;
        self.name = name.to_string();
    }

    pub fn reset(&mut self) {
        self.id = 0;
        self.name.clear();
        self.hand.clear();
        self.sequences = 0;
        self.winner = false;
    }

    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn chip_color(&self) -> ChipColor {
        self.chip_color
    }
    pub fn sequences(&self) -> u32 {
        self.sequences
    }
    pub fn is_winner(&self) -> bool {
        self.winner
    }

    pub fn draw_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub fn play_card(&mut self, index: usize) -> Result<Card, GameError> {
        if index >= self.hand.len() {
            return Err(GameError::HandIndexOutOfRange {
                index,
                hand_size: self.hand.len(),
            });
        }
        Ok(self.hand.remove(index))
    }

    pub fn credit_sequences(&mut self, n: u32) {
        self.sequences = self.sequences.saturating_add(n);
    }

    pub fn mark_winner(&mut self) {
        self.winner = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn play_removes_by_position() {
        let mut p = Player::new(ChipColor::Red);
        let a = Card::new(Rank::Two, Suit::Clubs);
        let b = Card::new(Rank::Nine, Suit::Hearts);
        let c = Card::new(Rank::Queen, Suit::Spades);
        p.draw_card(a);
        p.draw_card(b);
        p.draw_card(c);
        assert_eq!(p.play_card(1), Ok(b));
        assert_eq!(p.hand(), &[a, c]);
    }

    #[test]
    fn play_out_of_range_leaves_hand_intact() {
        let mut p = Player::new(ChipColor::Blue);
        p.draw_card(Card::new(Rank::Ace, Suit::Diamonds));
        let err = p.play_card(3).unwrap_err();
        assert_eq!(
            err,
            GameError::HandIndexOutOfRange {
                index: 3,
                hand_size: 1
            }
        );
        assert_eq!(p.hand().len(), 1);
    }

    #[test]
    fn sequences_accumulate_and_reset_clears_everything() {
        let mut p = Player::new(ChipColor::Red);
        p.initialize(17, "Ana");
        p.credit_sequences(2);
        p.credit_sequences(1);
        p.mark_winner();
        assert_eq!(p.sequences(), 3);
        assert!(p.is_winner());
        p.reset();
        assert_eq!(p.sequences(), 0);
        assert!(!p.is_winner());
        assert_eq!(p.name(), "");
        assert_eq!(p.chip_color(), ChipColor::Red);
    }
}
