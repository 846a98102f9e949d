use sequence_engine::board::{Board, MatchStatus};
use sequence_engine::cards::Card;
use sequence_engine::deck::Deck;
use sequence_engine::protocol::{MatchStart, RosterEntry};

fn roster(local_id: u64) -> MatchStart {
    MatchStart::new(
        vec![
            RosterEntry::new("Ana", 100, 2),
            RosterEntry::new("Bruno", 250, 1),
        ],
        local_id,
    )
}

#[test]
fn both_peers_build_the_same_board() {
    let mut a = Board::new();
    let mut b = Board::new();
    a.start_match(&roster(100)).unwrap();
    b.start_match(&roster(250)).unwrap();

    let cards_a: Vec<Card> = a.places().iter().map(|p| p.card()).collect();
    let cards_b: Vec<Card> = b.places().iter().map(|p| p.card()).collect();
    assert_eq!(cards_a, cards_b);
    assert_eq!(a.local_player().hand(), b.remote_player().hand());
    assert_eq!(a.remote_player().hand(), b.local_player().hand());
    assert_eq!(a.status(), MatchStatus::OpponentTurn);
    assert_eq!(b.status(), MatchStatus::YourTurnCard);
}

#[test]
fn layout_follows_the_summed_seed() {
    let mut board = Board::new();
    board.start_match(&roster(100)).unwrap();
    let mut deck = Deck::new_with_seed(350);
    let expected = deck.build_board_layout();
    let actual: Vec<Card> = board.places().iter().map(|p| p.card()).collect();
    assert_eq!(actual, expected);
    assert!(board.places().iter().all(|p| p.is_empty() && !p.is_locked()));
}

#[test]
fn first_player_is_dealt_first() {
    let mut board = Board::new();
    board.start_match(&roster(100)).unwrap();
    let mut deck = Deck::new_with_seed(350);
    let _ = deck.build_board_layout();
    let dealt: Vec<Card> = (0..14).map(|_| deck.draw().unwrap()).collect();
    let first: Vec<Card> = dealt.iter().step_by(2).copied().collect();
    let second: Vec<Card> = dealt.iter().skip(1).step_by(2).copied().collect();
    // Bruno (remote here) moves first
    assert_eq!(board.remote_player().hand(), first.as_slice());
    assert_eq!(board.local_player().hand(), second.as_slice());
}
