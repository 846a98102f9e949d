use crate::board::{Board, MatchRules, MatchStatus, TurnOutcome};
use crate::errors::GameError;
use crate::place::{BoardPlace, Seat};
use crate::player::Player;
use crate::protocol::{MatchStart, Move};

/// Two peer boards wired back to back, standing in for the transport.
///
/// Peer `i` is the terminal of `players[i]` in the roster. Every move a
/// peer emits is delivered to the other one immediately, so both boards
/// should describe the same match at every step (see
/// [`LocalRelay::is_consistent`]).
#[derive(Debug, Clone)]
pub struct LocalRelay {
    peers: [Board; 2],
}

impl LocalRelay {
    pub fn new(rules: MatchRules) -> Self {
        Self {
            peers: [Board::with_rules(rules), Board::with_rules(rules)],
        }
    }

    /// Starts the match on both peers from one roster.
    pub fn start(&mut self, start: &MatchStart) -> Result<(), GameError> {
        start.validate()?;
        for (peer, entry) in start.players.iter().enumerate() {
            let view = MatchStart::new(start.players.clone(), entry.id);
            self.peers[peer].start_match(&view)?;
        }
        Ok(())
    }

    pub fn peer(&self, index: usize) -> &Board {
        &self.peers[index]
    }

    /// The peer whose local player must act, if any.
    pub fn active_peer(&self) -> Option<usize> {
        self.peers.iter().position(|b| {
            matches!(
                b.status(),
                MatchStatus::YourTurnCard | MatchStatus::YourTurnBoard
            )
        })
    }

    /// Roster index of the winner, once a match has finished.
    pub fn winner(&self) -> Option<usize> {
        match self.peers[0].status() {
            MatchStatus::Finished { winner: Seat::Local } => Some(0),
            MatchStatus::Finished {
                winner: Seat::Remote,
            } => Some(1),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.peers[0].status().is_over()
    }

    pub fn pick_card(&mut self, hand_index: usize) -> Result<TurnOutcome, GameError> {
        let active = self.require_active()?;
        let outcome = self.peers[active].pick_card(hand_index)?;
        self.forward(active, &outcome)?;
        Ok(outcome)
    }

    pub fn select_board_place(&mut self, board_index: usize) -> Result<TurnOutcome, GameError> {
        let active = self.require_active()?;
        let outcome = self.peers[active].select_board_place(board_index)?;
        self.forward(active, &outcome)?;
        Ok(outcome)
    }

    /// Replays a recorded move made by `peer`. Recorded board moves must be
    /// legal, so an invalid place is an error here.
    pub fn apply(&mut self, peer: usize, mv: &Move) -> Result<TurnOutcome, GameError> {
        if peer > 1 {
            return Err(GameError::MalformedMove(format!("unknown peer {}", peer)));
        }
        let active = self.require_active()?;
        if active != peer {
            return Err(GameError::OutOfTurn {
                status: self.peers[peer].status(),
            });
        }
        let outcome = match *mv {
            Move::Hand { hand_index, .. } => self.pick_card(hand_index)?,
            Move::Board { board_index, .. } => {
                let outcome = self.select_board_place(board_index)?;
                if outcome.outgoing.is_none() {
                    return Err(GameError::InvalidPlacement { index: board_index });
                }
                outcome
            }
        };
        if let Some(sent) = &outcome.outgoing {
            if sent.status() != mv.status() {
                tracing::warn!(recorded = ?mv.status(), replayed = ?sent.status(), "move status differs from record");
            }
        }
        Ok(outcome)
    }

    /// `peer` leaves the match; both boards end in `Withdraw`.
    pub fn withdraw(&mut self, peer: usize) {
        self.peers[1 - peer].receive_withdrawal();
        self.peers[peer].receive_withdrawal();
    }

    fn require_active(&self) -> Result<usize, GameError> {
        if self.is_over() {
            return Err(GameError::MatchOver);
        }
        self.active_peer().ok_or(GameError::NoMatch)
    }

    fn forward(&mut self, from: usize, outcome: &TurnOutcome) -> Result<(), GameError> {
        if let Some(mv) = &outcome.outgoing {
            self.peers[1 - from].receive_move(mv.clone())?;
        }
        Ok(())
    }

    /// True when both peers hold mirror images of the same match.
    pub fn is_consistent(&self) -> bool {
        let [a, b] = &self.peers;
        mirrored_places(a.places(), b.places())
            && same_player(a.local_player(), b.remote_player())
            && same_player(a.remote_player(), b.local_player())
            && a.card_in_play() == b.card_in_play()
            && mirrored_status(a.status(), b.status())
            && match (a.deck(), b.deck()) {
                (Some(x), Some(y)) => {
                    x.draw_pile() == y.draw_pile() && x.discard_pile().eq(y.discard_pile())
                }
                (None, None) => true,
                _ => false,
            }
    }
}

fn mirrored_places(a: &[BoardPlace], b: &[BoardPlace]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.card() == y.card()
                && x.is_locked() == y.is_locked()
                && x.occupant() == y.occupant().map(Seat::other)
        })
}

fn same_player(a: &Player, b: &Player) -> bool {
    a.id() == b.id()
        && a.hand() == b.hand()
        && a.sequences() == b.sequences()
        && a.is_winner() == b.is_winner()
}

fn mirrored_status(a: MatchStatus, b: MatchStatus) -> bool {
    use MatchStatus::*;
    match (a, b) {
        (YourTurnCard | YourTurnBoard, OpponentTurn) | (OpponentTurn, YourTurnCard | YourTurnBoard) => {
            true
        }
        (Finished { winner: x }, Finished { winner: y }) => x == y.other(),
        (Starting, Starting) | (Withdraw, Withdraw) => true,
        _ => false,
    }
}
