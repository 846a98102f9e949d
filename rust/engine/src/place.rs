use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Which of the two players a chip, hand, or turn belongs to, as seen by
/// one board instance.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    /// The player at this terminal
    Local,
    /// The peer
    Remote,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::Local => Seat::Remote,
            Seat::Remote => Seat::Local,
        }
    }
}

/// One cell of the 10×10 board. Pure data; legality is decided by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPlace {
    card: Card,
    occupant: Option<Seat>,
    locked: bool,
}

impl BoardPlace {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            occupant: None,
            locked: false,
        }
    }

    pub fn card(&self) -> Card {
        self.card
    }

    pub fn occupant(&self) -> Option<Seat> {
        self.occupant
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Joker cells count for every player and never hold a chip.
    pub fn is_wild(&self) -> bool {
        self.card.is_wild()
    }

    pub fn is_controlled_by(&self, seat: Seat) -> bool {
        self.is_wild() || self.occupant == Some(seat)
    }

    pub fn place_chip(&mut self, seat: Seat) {
        self.occupant = Some(seat);
    }

    pub fn remove_chip(&mut self) {
        self.occupant = None;
    }

    /// Locking is one-way for the lifetime of a match.
    pub fn lock_into_sequence(&mut self) {
        self.locked = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn chip_lifecycle() {
        let mut p = BoardPlace::new(Card::new(Rank::Seven, Suit::Diamonds));
        assert!(p.is_empty());
        p.place_chip(Seat::Local);
        assert_eq!(p.occupant(), Some(Seat::Local));
        assert!(p.is_controlled_by(Seat::Local));
        assert!(!p.is_controlled_by(Seat::Remote));
        p.remove_chip();
        assert!(p.is_empty());
    }

    #[test]
    fn joker_is_controlled_by_both_seats() {
        let p = BoardPlace::new(Card::joker());
        assert!(p.is_wild());
        assert!(p.is_empty());
        assert!(p.is_controlled_by(Seat::Local));
        assert!(p.is_controlled_by(Seat::Remote));
    }

    #[test]
    fn lock_is_sticky() {
        let mut p = BoardPlace::new(Card::new(Rank::Ace, Suit::Clubs));
        p.place_chip(Seat::Remote);
        p.lock_into_sequence();
        p.lock_into_sequence();
        assert!(p.is_locked());
    }
}
