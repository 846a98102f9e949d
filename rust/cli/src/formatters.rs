//! Card, hand, board, and event formatters for terminal display.
//!
//! Suits use Unicode symbols (♥ ♦ ♣ ♠) where the terminal supports them
//! and single letters otherwise. Jokers print as `**`.
//!
//! ```rust
//! use sequence_engine::cards::{Card, Rank, Suit};
//! use sequence_cli::formatters::format_card;
//!
//! let ten = Card::new(Rank::Ten, Suit::Diamonds);
//! assert!(format_card(&ten) == "T♦" || format_card(&ten) == "Td");
//! assert_eq!(format_card(&Card::joker()), "**");
//! ```

use sequence_engine::board::{Board, TurnEvent};
use sequence_engine::cards::{Card, Rank, Suit};
use sequence_engine::grid::BOARD_SIDE;
use sequence_engine::place::{BoardPlace, Seat};
use sequence_engine::player::ChipColor;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM), or VS Code (VSCODE_INJECTION). Elsewhere assumes yes.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
            Suit::Joker => "*",
        }
        .to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
            Suit::Joker => "*",
        }
        .to_string()
    }
}

/// Single character: 2-9, T, J, Q, K, A, or `*` for the joker.
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Joker => "*",
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
    }
    .to_string()
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Hand with positions, e.g. `0:A♠ 1:T♦ 2:J♣`.
pub fn format_hand(cards: &[Card]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}:{}", i, format_card(c)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn chip_marker(color: ChipColor, locked: bool) -> char {
    match (color, locked) {
        (ChipColor::Red, false) => 'r',
        (ChipColor::Red, true) => 'R',
        (ChipColor::Blue, false) => 'b',
        (ChipColor::Blue, true) => 'B',
    }
}

/// Printed card plus chip marker: lowercase for a chip, uppercase once
/// locked into a sequence, `.` when empty.
pub fn format_place(board: &Board, place: &BoardPlace) -> String {
    let marker = match place.occupant() {
        Some(seat) => chip_marker(board.player(seat).chip_color(), place.is_locked()),
        None => '.',
    };
    format!("{}{}", format_card(&place.card()), marker)
}

/// The 10×10 board. Row labels are the index of the row's first place, so
/// a place's index is its row label plus its column.
pub fn format_grid(board: &Board) -> String {
    let mut lines = Vec::with_capacity(BOARD_SIDE + 1);
    let header: Vec<String> = (0..BOARD_SIDE).map(|c| format!("{:<4}", c)).collect();
    lines.push(format!("    {}", header.join("").trim_end()));
    for (row, cells) in board.places().chunks(BOARD_SIDE).enumerate() {
        let cells: Vec<String> = cells
            .iter()
            .map(|p| format!("{:<4}", format_place(board, p)))
            .collect();
        lines.push(format!("{:>2}  {}", row * BOARD_SIDE, cells.join("").trim_end()));
    }
    lines.join("\n")
}

/// One-line description of an engine event from `board`'s point of view.
pub fn format_event(board: &Board, event: &TurnEvent) -> String {
    let name = |seat: Seat| board.player(seat).name().to_string();
    match event {
        TurnEvent::MatchStarted { first } => format!("{} moves first", name(*first)),
        TurnEvent::CardPlayed { seat, card } => {
            format!("{} plays {}", name(*seat), format_card(card))
        }
        TurnEvent::DeadCard { seat, card } => {
            format!("{} discards dead card {}", name(*seat), format_card(card))
        }
        TurnEvent::ChipPlaced {
            seat,
            index,
            sequences,
        } => match sequences.len() {
            0 => format!("{} places a chip on {}", name(*seat), index),
            1 => format!(
                "{} places a chip on {} and completes a sequence",
                name(*seat),
                index
            ),
            n => format!(
                "{} places a chip on {} and completes {} sequences",
                name(*seat),
                index,
                n
            ),
        },
        TurnEvent::ChipRemoved { seat, index } => {
            format!("{} removes the chip on {}", name(*seat), index)
        }
        TurnEvent::InvalidPlace { index } => {
            format!("Place {} does not accept that card", index)
        }
        TurnEvent::Withdrawn => "Match abandoned".to_string(),
    }
}
