use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use sequence_engine::board::{MatchRules, MatchStatus};
use sequence_engine::cards::{draw_deck, Card};
use sequence_engine::protocol::{MatchStart, RosterEntry};
use sequence_engine::relay::LocalRelay;

fn roster(a: u64, b: u64) -> MatchStart {
    MatchStart::new(
        vec![RosterEntry::new("Ana", a, 1), RosterEntry::new("Bruno", b, 2)],
        a,
    )
}

fn all_cards(relay: &LocalRelay, peer: usize) -> Vec<Card> {
    let board = relay.peer(peer);
    let deck = board.deck().expect("match started");
    let mut cards: Vec<Card> = deck.draw_pile().to_vec();
    cards.extend(deck.discard_pile().copied());
    cards.extend_from_slice(board.local_player().hand());
    cards.extend_from_slice(board.remote_player().hand());
    cards.sort();
    cards
}

/// Plays random legal moves until the match ends or `max_steps` is reached,
/// checking both peers after every step.
fn play_random(relay: &mut LocalRelay, seed: u64, max_steps: usize) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut full = draw_deck();
    full.sort();

    for _ in 0..max_steps {
        let Some(active) = relay.active_peer() else {
            break;
        };
        let board = relay.peer(active);
        match board.status() {
            MatchStatus::YourTurnCard => {
                let n = board.local_player().hand().len();
                relay.pick_card(rng.random_range(0..n)).unwrap();
            }
            MatchStatus::YourTurnBoard => {
                let legal = board.legal_places();
                assert!(!legal.is_empty(), "a live card always has a place");
                let target = legal[rng.random_range(0..legal.len())];
                relay.select_board_place(target).unwrap();
                if !relay.is_over() {
                    assert_eq!(relay.active_peer(), Some(1 - active));
                }
            }
            other => panic!("active peer in state {:?}", other),
        }
        assert!(relay.is_consistent());
        assert_eq!(relay.peer(0).card_count(), 104);
        assert_eq!(all_cards(relay, 0), full);
    }
}

#[test]
fn random_match_stays_consistent() {
    let mut relay = LocalRelay::new(MatchRules::default());
    relay.start(&roster(3, 4)).unwrap();
    play_random(&mut relay, 1, 1500);
}

#[test]
fn short_target_match_finishes_with_a_winner() {
    let rules = MatchRules {
        sequences_to_win: 1,
        ..MatchRules::default()
    };
    let mut relay = LocalRelay::new(rules);
    relay.start(&roster(8, 13)).unwrap();
    play_random(&mut relay, 99, 5000);
    let winner = relay
        .winner()
        .expect("a one-sequence match should finish within 5000 steps");
    let board = relay.peer(winner);
    assert!(board.local_player().is_winner());
    assert!(board.local_player().sequences() >= 1);
    assert_eq!(
        relay.peer(1 - winner).status(),
        MatchStatus::Finished {
            winner: sequence_engine::place::Seat::Remote
        }
    );
    assert!(relay.pick_card(0).is_err());
}

#[test]
fn hands_stay_at_hand_size_between_turns() {
    let mut relay = LocalRelay::new(MatchRules::default());
    relay.start(&roster(21, 34)).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    for _ in 0..200 {
        let Some(active) = relay.active_peer() else {
            break;
        };
        let board = relay.peer(active);
        if board.status() == MatchStatus::YourTurnCard {
            assert_eq!(board.local_player().hand().len(), 7);
            assert_eq!(board.remote_player().hand().len(), 7);
            let n = board.local_player().hand().len();
            relay.pick_card(rng.random_range(0..n)).unwrap();
        } else {
            let legal = board.legal_places();
            relay.select_board_place(legal[0]).unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn peers_never_diverge(a in 1u64..10_000, b in 10_000u64..20_000, seed in any::<u64>()) {
        let mut relay = LocalRelay::new(MatchRules::default());
        relay.start(&roster(a, b)).unwrap();
        play_random(&mut relay, seed, 300);
        prop_assert!(relay.is_consistent());
    }
}
