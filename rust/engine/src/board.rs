use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::grid::Coord;
use crate::place::{BoardPlace, Seat};
use crate::player::{ChipColor, Player};
use crate::protocol::{MatchStart, Move, MoveStatus};
use crate::rules::{is_dead_card, validate_placement, ValidatedPlacement};
use crate::sequence::{scan_from, CreditedSequence};

/// Match state as seen from this terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// No match running
    Starting,
    /// Local player must pick a card from hand
    YourTurnCard,
    /// Local player must pick a board place for the card just played
    YourTurnBoard,
    /// Waiting for the peer's moves
    OpponentTurn,
    /// A player reached the sequence target
    Finished { winner: Seat },
    /// The peer left the match
    Withdraw,
}

impl MatchStatus {
    pub fn is_over(self) -> bool {
        matches!(self, MatchStatus::Finished { .. } | MatchStatus::Withdraw)
    }

    pub fn is_in_play(self) -> bool {
        matches!(
            self,
            MatchStatus::YourTurnCard | MatchStatus::YourTurnBoard | MatchStatus::OpponentTurn
        )
    }
}

/// Match parameters. Both peers must use the same values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Cards dealt to each player at match start
    pub hand_size: usize,
    /// Cumulative sequences needed to win
    pub sequences_to_win: u32,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            hand_size: 7,
            sequences_to_win: 5,
        }
    }
}

impl MatchRules {
    /// Largest hand for which both opening hands fit in the 104-card draw pile.
    pub const MAX_HAND_SIZE: usize = 52;

    pub fn validate(&self) -> Result<(), GameError> {
        if self.hand_size == 0 || self.hand_size > Self::MAX_HAND_SIZE {
            return Err(GameError::InvalidRules(format!(
                "hand_size {} outside 1..={}",
                self.hand_size,
                Self::MAX_HAND_SIZE
            )));
        }
        if self.sequences_to_win == 0 {
            return Err(GameError::InvalidRules(
                "sequences_to_win must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// What a single operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    MatchStarted { first: Seat },
    /// A live card left the hand; a board move is owed
    CardPlayed { seat: Seat, card: Card },
    /// The card had no legal place and was replaced from the deck
    DeadCard { seat: Seat, card: Card },
    ChipPlaced {
        seat: Seat,
        index: usize,
        sequences: Vec<CreditedSequence>,
    },
    ChipRemoved { seat: Seat, index: usize },
    /// Rejected local placement; nothing changed
    InvalidPlace { index: usize },
    Withdrawn,
}

/// Result of an operation: the new status, what happened, and the move
/// descriptor to forward to the peer (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub status: MatchStatus,
    pub event: TurnEvent,
    pub outgoing: Option<Move>,
    /// Short prompt for the presentation layer
    pub info: String,
}

/// The 10×10 board, both players, the deck, and the turn state machine.
///
/// Each peer owns one `Board`. The two instances stay in step because they
/// are seeded identically at match start and apply the same moves: local
/// moves through [`Board::pick_card`] / [`Board::select_board_place`], the
/// peer's moves through [`Board::receive_move`].
///
/// # Examples
///
/// ```
/// use sequence_engine::board::{Board, MatchStatus};
/// use sequence_engine::protocol::{MatchStart, RosterEntry};
///
/// let start = MatchStart::new(
///     vec![RosterEntry::new("Ana", 1, 1), RosterEntry::new("Bruno", 2, 2)],
///     1,
/// );
/// let mut board = Board::new();
/// board.start_match(&start).unwrap();
///
/// assert_eq!(board.status(), MatchStatus::YourTurnCard);
/// assert_eq!(board.places().len(), 100);
/// assert_eq!(board.local_player().hand().len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    rules: MatchRules,
    places: Vec<BoardPlace>,
    local: Player,
    remote: Player,
    turn: Seat,
    deck: Option<Deck>,
    status: MatchStatus,
    /// The turn player has played a live card and owes a board move
    card_in_play: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self::with_rules(MatchRules::default())
    }

    pub fn with_rules(rules: MatchRules) -> Self {
        Self {
            rules,
            places: Vec::new(),
            local: Player::new(ChipColor::Red),
            remote: Player::new(ChipColor::Blue),
            turn: Seat::Local,
            deck: None,
            status: MatchStatus::Starting,
            card_in_play: false,
        }
    }

    pub fn rules(&self) -> MatchRules {
        self.rules
    }
    pub fn status(&self) -> MatchStatus {
        self.status
    }
    pub fn places(&self) -> &[BoardPlace] {
        &self.places
    }
    pub fn place(&self, index: usize) -> Option<&BoardPlace> {
        self.places.get(index)
    }
    pub fn local_player(&self) -> &Player {
        &self.local
    }
    pub fn remote_player(&self) -> &Player {
        &self.remote
    }
    pub fn turn_seat(&self) -> Seat {
        self.turn
    }
    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn player(&self, seat: Seat) -> &Player {
        match seat {
            Seat::Local => &self.local,
            Seat::Remote => &self.remote,
        }
    }

    fn player_mut(&mut self, seat: Seat) -> &mut Player {
        match seat {
            Seat::Local => &mut self.local,
            Seat::Remote => &mut self.remote,
        }
    }

    fn deck_mut(&mut self) -> Result<&mut Deck, GameError> {
        self.deck.as_mut().ok_or(GameError::NoMatch)
    }

    /// The card awaiting a board move, if the turn player has played one.
    pub fn card_in_play(&self) -> Option<Card> {
        if self.card_in_play {
            self.deck.as_ref().and_then(Deck::top_of_discard)
        } else {
            None
        }
    }

    /// Places that accept the card in play for the turn player.
    pub fn legal_places(&self) -> Vec<usize> {
        let Some(card) = self.card_in_play() else {
            return Vec::new();
        };
        (0..self.places.len())
            .filter(|&i| validate_placement(card, &self.places[i], self.turn, i).is_ok())
            .collect()
    }

    /// Cards across draw pile, discard pile, and both hands. Constant for a match.
    pub fn card_count(&self) -> usize {
        let piles = self.deck.as_ref().map_or(0, Deck::remaining);
        piles + self.local.hand().len() + self.remote.hand().len()
    }

    pub fn start_match(&mut self, start: &MatchStart) -> Result<TurnOutcome, GameError> {
        if self.status.is_in_play() {
            return Err(GameError::MatchInProgress);
        }
        let (local_entry, remote_entry) = start.split()?;
        let first = if local_entry.moves_first() {
            Seat::Local
        } else {
            Seat::Remote
        };

        self.rules.validate()?;

        // nothing is committed until the whole deal has succeeded
        let mut local = Player::new(self.local.chip_color());
        let mut remote = Player::new(self.remote.chip_color());
        local.initialize(local_entry.id, &local_entry.name);
        remote.initialize(remote_entry.id, &remote_entry.name);

        let seed = start.seed();
        let mut deck = Deck::new_with_seed(seed);
        let places: Vec<BoardPlace> = deck
            .build_board_layout()
            .into_iter()
            .map(BoardPlace::new)
            .collect();
        for _ in 0..self.rules.hand_size {
            for seat in [first, first.other()] {
                let card = deck.draw()?;
                match seat {
                    Seat::Local => local.draw_card(card),
                    Seat::Remote => remote.draw_card(card),
                }
            }
        }

        self.local = local;
        self.remote = remote;
        self.places = places;
        self.deck = Some(deck);
        self.turn = first;
        self.card_in_play = false;
        self.status = match first {
            Seat::Local => MatchStatus::YourTurnCard,
            Seat::Remote => MatchStatus::OpponentTurn,
        };
        tracing::info!(seed, ?first, local = %self.local.name(), remote = %self.remote.name(), "match started");

        Ok(self.outcome(TurnEvent::MatchStarted { first }, None))
    }

    pub fn reset_game(&mut self) {
        self.local.reset();
        self.remote.reset();
        self.deck = None;
        self.places.clear();
        self.turn = Seat::Local;
        self.card_in_play = false;
        self.status = MatchStatus::Starting;
    }

    /// The peer left; accepted in every state.
    pub fn receive_withdrawal(&mut self) -> TurnOutcome {
        tracing::info!(previous = ?self.status, "opponent withdrew");
        self.status = MatchStatus::Withdraw;
        self.card_in_play = false;
        self.outcome(TurnEvent::Withdrawn, None)
    }

    /// Local player plays the card at `hand_index`.
    pub fn pick_card(&mut self, hand_index: usize) -> Result<TurnOutcome, GameError> {
        self.ensure_active()?;
        if self.status != MatchStatus::YourTurnCard {
            return Err(GameError::OutOfTurn {
                status: self.status,
            });
        }
        self.play_from_hand(Seat::Local, hand_index)
    }

    /// Local player puts the card in play on `board_index`. An illegal
    /// place is reported in the outcome and leaves the board untouched.
    pub fn select_board_place(&mut self, board_index: usize) -> Result<TurnOutcome, GameError> {
        self.ensure_active()?;
        if self.status != MatchStatus::YourTurnBoard {
            return Err(GameError::OutOfTurn {
                status: self.status,
            });
        }
        match self.play_on_board(Seat::Local, board_index) {
            Err(GameError::InvalidPlacement { index }) => {
                Ok(self.outcome(TurnEvent::InvalidPlace { index }, None))
            }
            other => other,
        }
    }

    /// Applies a move descriptor sent by the peer.
    pub fn receive_move(&mut self, mv: Move) -> Result<TurnOutcome, GameError> {
        self.ensure_active()?;
        mv.validate()?;
        if self.status != MatchStatus::OpponentTurn {
            return Err(GameError::OutOfTurn {
                status: self.status,
            });
        }
        let result = match mv {
            Move::Hand { hand_index, .. } => {
                if self.card_in_play {
                    return Err(GameError::MalformedMove(
                        "hand move while a card is already in play".to_string(),
                    ));
                }
                self.play_from_hand(Seat::Remote, hand_index)
            }
            Move::Board {
                board_index,
                match_status,
            } => self
                .play_on_board(Seat::Remote, board_index)
                .inspect(|outcome| {
                    let finished = matches!(outcome.status, MatchStatus::Finished { .. });
                    if finished != (match_status == MoveStatus::Finished) {
                        tracing::warn!(
                            board_index,
                            ?match_status,
                            status = ?outcome.status,
                            "peer disagrees on match result"
                        );
                    }
                }),
        };
        if let Err(e) = &result {
            tracing::warn!(error = %e, "rejected move from peer");
        }
        result
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        match self.status {
            MatchStatus::Starting => Err(GameError::NoMatch),
            s if s.is_over() => Err(GameError::MatchOver),
            _ => Ok(()),
        }
    }

    fn play_from_hand(&mut self, seat: Seat, hand_index: usize) -> Result<TurnOutcome, GameError> {
        let card = self.player_mut(seat).play_card(hand_index)?;
        self.deck_mut()?.discard(card);
        let outgoing = match seat {
            Seat::Local => Some(Move::Hand {
                hand_index,
                match_status: MoveStatus::Progress,
            }),
            Seat::Remote => None,
        };

        if is_dead_card(card, &self.places, seat) {
            let replacement = self.deck_mut()?.draw()?;
            self.player_mut(seat).draw_card(replacement);
            tracing::debug!(?seat, ?card, "dead card replaced");
            return Ok(self.outcome(TurnEvent::DeadCard { seat, card }, outgoing));
        }

        self.card_in_play = true;
        if seat == Seat::Local {
            self.status = MatchStatus::YourTurnBoard;
        }
        tracing::debug!(?seat, ?card, hand_index, "card played");
        Ok(self.outcome(TurnEvent::CardPlayed { seat, card }, outgoing))
    }

    fn play_on_board(&mut self, seat: Seat, board_index: usize) -> Result<TurnOutcome, GameError> {
        let coord = Coord::from_index(board_index)
            .filter(|_| board_index < self.places.len())
            .ok_or(GameError::BoardIndexOutOfRange {
                index: board_index,
                cells: self.places.len(),
            })?;
        let card = self.card_in_play().ok_or(GameError::NoCardInPlay)?;
        let placement = validate_placement(card, &self.places[board_index], seat, board_index)?;
        let replacement = self.deck_mut()?.draw()?;

        let event = match placement {
            ValidatedPlacement::Remove => {
                self.places[board_index].remove_chip();
                tracing::debug!(?seat, board_index, "chip removed");
                TurnEvent::ChipRemoved {
                    seat,
                    index: board_index,
                }
            }
            ValidatedPlacement::Claim => {
                self.places[board_index].place_chip(seat);
                let sequences = scan_from(&mut self.places, coord, seat);
                let player = self.player_mut(seat);
                player.credit_sequences(sequences.len() as u32);
                if !sequences.is_empty() {
                    tracing::info!(
                        ?seat,
                        new = sequences.len(),
                        total = player.sequences(),
                        "sequence credited"
                    );
                }
                TurnEvent::ChipPlaced {
                    seat,
                    index: board_index,
                    sequences,
                }
            }
        };
        self.card_in_play = false;

        let won = placement == ValidatedPlacement::Claim
            && self.player(seat).sequences() >= self.rules.sequences_to_win;
        self.player_mut(seat).draw_card(replacement);

        if won {
            self.player_mut(seat).mark_winner();
            self.status = MatchStatus::Finished { winner: seat };
            tracing::info!(?seat, winner = %self.player(seat).name(), "match finished");
        } else {
            self.turn = seat.other();
            self.status = match self.turn {
                Seat::Local => MatchStatus::YourTurnCard,
                Seat::Remote => MatchStatus::OpponentTurn,
            };
        }

        let outgoing = match seat {
            Seat::Local => Some(Move::Board {
                board_index,
                match_status: if won {
                    MoveStatus::Finished
                } else {
                    MoveStatus::Next
                },
            }),
            Seat::Remote => None,
        };
        Ok(self.outcome(event, outgoing))
    }

    fn outcome(&self, event: TurnEvent, outgoing: Option<Move>) -> TurnOutcome {
        let info = match (&event, self.status) {
            (TurnEvent::InvalidPlace { .. }, _) => "Invalid place, try again".to_string(),
            (TurnEvent::DeadCard { seat: Seat::Local, .. }, _) => {
                "Dead card, pick another".to_string()
            }
            (TurnEvent::Withdrawn, _) => "Opponent withdrew".to_string(),
            (_, MatchStatus::Finished { winner }) => {
                format!("{} wins", self.player(winner).name())
            }
            (_, MatchStatus::YourTurnCard) => "Your turn".to_string(),
            (_, MatchStatus::YourTurnBoard) => "Choose a board place".to_string(),
            (_, MatchStatus::OpponentTurn) => "Opponent's turn".to_string(),
            (_, MatchStatus::Starting) => "Waiting for a match".to_string(),
            (_, MatchStatus::Withdraw) => "Match abandoned".to_string(),
        };
        TurnOutcome {
            status: self.status,
            event,
            outgoing,
            info,
        }
    }
}
