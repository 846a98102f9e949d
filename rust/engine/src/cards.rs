use serde::{Deserialize, Serialize};

/// Represents one of the four standard suits, plus the joker pseudo-suit
/// printed on the wild cells of the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
    /// Joker (wild board cell, never held in a hand)
    Joker,
}

/// Represents the rank of a card. Jokers carry rank 0, the standard ranks
/// run from Ace (1) through King (13).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Joker (0)
    Joker = 0,
    /// Ace (1)
    Ace,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
}

impl Rank {
    pub fn from_u8(v: u8) -> Rank {
        match v {
            1 => Rank::Ace,
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            _ => Rank::Joker,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

/// A single card, either in a hand, in the deck, or printed on a board cell.
/// Equality is structural over `(rank, suit)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card (Joker, or Ace through King)
    pub rank: Rank,
    /// The suit of the card
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn joker() -> Self {
        Self {
            rank: Rank::Joker,
            suit: Suit::Joker,
        }
    }

    /// Jack of Diamonds or Jack of Clubs: places a chip on any empty, non-wild cell.
    pub fn is_two_eyed_jack(&self) -> bool {
        self.rank == Rank::Jack && matches!(self.suit, Suit::Diamonds | Suit::Clubs)
    }

    /// Jack of Hearts or Jack of Spades: removes an opponent chip.
    pub fn is_one_eyed_jack(&self) -> bool {
        self.rank == Rank::Jack && matches!(self.suit, Suit::Hearts | Suit::Spades)
    }

    pub fn is_wild(&self) -> bool {
        self.suit == Suit::Joker
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &r in &all_ranks() {
        for &s in &all_suits() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}

/// Number of jokers printed on the board.
pub const BOARD_JOKERS: usize = 4;

/// The cards players draw from: two standard decks, jacks included.
pub fn draw_deck() -> Vec<Card> {
    let mut v = full_deck();
    v.extend(full_deck());
    v
}

/// The 100 cards printed on the board, unshuffled: every non-jack card
/// twice, plus the wild jokers.
pub fn board_cards() -> Vec<Card> {
    let mut v: Vec<Card> = draw_deck()
        .into_iter()
        .filter(|c| c.rank != Rank::Jack)
        .collect();
    v.extend(std::iter::repeat_n(Card::joker(), BOARD_JOKERS));
    v
}
