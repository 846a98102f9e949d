//! Deal command: shows the board and opening hands a match start produces.
//!
//! Both peers derive everything from the sum of the two player ids, so
//! `--seed N` and any pair of ids summing to N print the same layout.

use crate::commands::roster_for_seed;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_grid, format_hand};
use sequence_engine::board::Board;
use sequence_engine::protocol::{MatchStart, RosterEntry};
use std::io::Write;

pub fn handle_deal_command(
    seed: Option<u64>,
    ids: Option<(u64, u64)>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let start = match ids {
        Some((local_id, remote_id)) => MatchStart::new(
            vec![
                RosterEntry::new(&cfg.local_name, local_id, 1),
                RosterEntry::new(&cfg.remote_name, remote_id, 2),
            ],
            local_id,
        ),
        None => {
            let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
            roster_for_seed(seed, &cfg.local_name, &cfg.remote_name)
        }
    };
    start
        .validate()
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let mut board = Board::with_rules(cfg.rules());
    board.start_match(&start)?;

    writeln!(out, "Seed: {}", start.seed())?;
    writeln!(out, "{}", format_grid(&board))?;
    for player in [board.local_player(), board.remote_player()] {
        writeln!(
            out,
            "Hand {} ({}): {}",
            player.name(),
            player.id(),
            format_hand(player.hand())
        )?;
    }
    writeln!(out, "First: {}", board.local_player().name())?;
    Ok(())
}
