//! Command handler modules.
//!
//! Each subcommand lives in its own file and exposes
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`. Output
//! streams are passed in as `&mut dyn Write` so tests can capture them.

pub mod cfg;
pub mod deal;
pub mod play;
pub mod replay;
pub mod sim;
pub mod verify;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::handle_play_command;
pub use replay::handle_replay_command;
pub use sim::handle_sim_command;
pub use verify::handle_verify_command;

use sequence_engine::board::MatchRules;
use sequence_engine::logger::MatchRecord;
use sequence_engine::protocol::{MatchStart, RosterEntry};
use sequence_engine::relay::LocalRelay;

use crate::error::CliError;

/// A roster whose ids sum to `seed`; the first player moves first and is
/// the local player.
pub(crate) fn roster_for_seed(seed: u64, first: &str, second: &str) -> MatchStart {
    let second_id = if seed == 2 { 2 } else { 1 };
    let first_id = seed.wrapping_sub(second_id);
    MatchStart::new(
        vec![
            RosterEntry::new(first, first_id, 1),
            RosterEntry::new(second, second_id, 2),
        ],
        first_id,
    )
}

/// Starts a relay for a recorded match, seen from the first roster entry.
pub(crate) fn relay_for_record(record: &MatchRecord) -> Result<LocalRelay, CliError> {
    let local_id = record
        .players
        .first()
        .map(|p| p.id)
        .ok_or_else(|| CliError::InvalidInput("record has no players".to_string()))?;
    let mut relay = LocalRelay::new(record.rules);
    relay.start(&MatchStart::new(record.players.clone(), local_id))?;
    Ok(relay)
}

pub(crate) fn rules_with_target(rules: MatchRules, sequences: Option<u32>) -> MatchRules {
    MatchRules {
        sequences_to_win: sequences.unwrap_or(rules.sequences_to_win),
        ..rules
    }
}
