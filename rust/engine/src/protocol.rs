//! Messages exchanged with the peer and with matchmaking.
//!
//! Move descriptors serialize to the flat JSON objects the transport relays:
//!
//! ```
//! use sequence_engine::protocol::{Move, MoveStatus};
//!
//! let mv = Move::Hand { hand_index: 3, match_status: MoveStatus::Progress };
//! assert_eq!(
//!     serde_json::to_string(&mv).unwrap(),
//!     r#"{"hand_index":3,"match_status":"progress"}"#
//! );
//!
//! let parsed: Move = serde_json::from_str(r#"{"board_index":42,"match_status":"next"}"#).unwrap();
//! assert_eq!(parsed, Move::Board { board_index: 42, match_status: MoveStatus::Next });
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStatus {
    /// A card was played from hand; the board move follows
    Progress,
    /// A board move ended the turn
    Next,
    /// A board move won the match
    Finished,
}

/// A move descriptor for the peer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Move {
    Hand {
        hand_index: usize,
        match_status: MoveStatus,
    },
    Board {
        board_index: usize,
        match_status: MoveStatus,
    },
}

impl Move {
    pub fn status(&self) -> MoveStatus {
        match self {
            Move::Hand { match_status, .. } | Move::Board { match_status, .. } => *match_status,
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        match self {
            Move::Hand { match_status, .. } if *match_status != MoveStatus::Progress => Err(
                GameError::MalformedMove(format!("hand move with status {:?}", match_status)),
            ),
            Move::Board {
                match_status: MoveStatus::Progress,
                ..
            } => Err(GameError::MalformedMove(
                "board move with status Progress".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// One player as announced by matchmaking.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub id: u64,
    /// 1 for the player who moves first
    pub turn_order: u8,
}

impl RosterEntry {
    pub fn new(name: &str, id: u64, turn_order: u8) -> Self {
        Self {
            name: name.to_string(),
            id,
            turn_order,
        }
    }

    pub fn moves_first(&self) -> bool {
        self.turn_order == 1
    }
}

/// Match-start payload: both players plus which one is at this terminal.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchStart {
    pub players: Vec<RosterEntry>,
    pub local_id: u64,
}

impl MatchStart {
    pub fn new(players: Vec<RosterEntry>, local_id: u64) -> Self {
        Self { players, local_id }
    }

    /// The same payload as received by the other peer.
    pub fn mirrored(&self) -> Result<MatchStart, GameError> {
        let (_, remote) = self.split()?;
        Ok(MatchStart {
            players: self.players.clone(),
            local_id: remote.id,
        })
    }

    /// Shared shuffle seed; identical on both peers.
    pub fn seed(&self) -> u64 {
        self.players
            .iter()
            .fold(0u64, |acc, p| acc.wrapping_add(p.id))
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.players.len() != 2 {
            return Err(GameError::InvalidRoster(format!(
                "expected 2 players, got {}",
                self.players.len()
            )));
        }
        if self.players[0].id == self.players[1].id {
            return Err(GameError::InvalidRoster("duplicate player id".to_string()));
        }
        if !self.players.iter().any(|p| p.id == self.local_id) {
            return Err(GameError::InvalidRoster(format!(
                "local id {} not in roster",
                self.local_id
            )));
        }
        if self.players.iter().filter(|p| p.moves_first()).count() != 1 {
            return Err(GameError::InvalidRoster(
                "exactly one player must move first".to_string(),
            ));
        }
        Ok(())
    }

    /// (local, remote) entries after validation.
    pub fn split(&self) -> Result<(&RosterEntry, &RosterEntry), GameError> {
        self.validate()?;
        let (a, b) = (&self.players[0], &self.players[1]);
        Ok(if a.id == self.local_id { (a, b) } else { (b, a) })
    }
}
