//! Simulation command: random legal self-play.
//!
//! Each match gets its own seed (`base + index`), used both as the deck
//! seed and to drive the random move choices, so a run is reproducible
//! from the base seed alone. Transcripts are written as `MatchRecord`
//! JSONL; a `.zst` output path is compressed.
//!
//! # Environment Variables
//!
//! - `SEQUENCE_SIM_BREAK_AFTER`: stop after N matches and exit as interrupted

use crate::commands::roster_for_seed;
use crate::config;
use crate::error::CliError;
use crate::io_utils::{ensure_parent_dir, write_text_auto};
use crate::ui;
use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sequence_engine::board::{MatchRules, MatchStatus};
use sequence_engine::logger::{MatchLogger, MatchRecord, MoveRecord};
use sequence_engine::protocol::Move;
use sequence_engine::relay::LocalRelay;
use std::io::Write;
use std::path::PathBuf;

pub fn handle_sim_command(
    matches: u64,
    output: Option<String>,
    seed: Option<u64>,
    max_turns: u32,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if matches == 0 {
        ui::write_error(err, "matches must be >= 1")?;
        return Err(CliError::InvalidInput("matches must be >= 1".to_string()));
    }
    let cfg = config::load()?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let rules = cfg.rules();
    let break_after = std::env::var("SEQUENCE_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    let path = output.map(PathBuf::from);
    let compressed = path
        .as_ref()
        .is_some_and(|p| p.to_string_lossy().ends_with(".zst"));
    let mut sink = match &path {
        Some(_) if compressed => Transcript::Buffer(MatchLogger::from_writer(
            Vec::new(),
            &Utc::now().format("%Y%m%d").to_string(),
        )),
        Some(p) => {
            ensure_parent_dir(p)?;
            Transcript::File(MatchLogger::create(p)?)
        }
        None => Transcript::None,
    };

    let mut wins = [0u64; 2];
    let mut unfinished = 0u64;
    let mut total_turns = 0u64;
    let mut played = 0u64;

    for i in 0..matches {
        if break_after.is_some_and(|n| played >= n) {
            break;
        }
        let match_seed = base_seed.wrapping_add(i);
        let start = roster_for_seed(match_seed, &cfg.local_name, &cfg.remote_name);
        let mut relay = LocalRelay::new(rules);
        relay.start(&start)?;

        let mut rng = ChaCha20Rng::seed_from_u64(match_seed);
        let (moves, turns) = play_random_match(&mut relay, &mut rng, max_turns)?;
        played += 1;
        total_turns += u64::from(turns);

        let winner = relay.winner();
        let result = match winner {
            Some(w) => {
                wins[w] += 1;
                format!("{} wins", start.players[w].name)
            }
            None => {
                unfinished += 1;
                "unfinished".to_string()
            }
        };
        tracing::debug!(match_seed, turns, %result, "simulated match");

        let record = MatchRecord {
            match_id: String::new(),
            seed: match_seed,
            players: start.players.clone(),
            rules,
            moves,
            result: Some(result),
            winner,
            ts: None,
            meta: Some(serde_json::json!({ "turns": turns })),
        };
        sink.write(&record)?;
    }

    if let (Some(p), Transcript::Buffer(logger)) = (path.as_ref(), sink) {
        let bytes = logger.into_inner().unwrap_or_default();
        let content = String::from_utf8(bytes).map_err(std::io::Error::other)?;
        write_text_auto(p, &content)?;
    }

    writeln!(out, "Matches: {}", played)?;
    writeln!(out, "Wins {}: {}", cfg.local_name, wins[0])?;
    writeln!(out, "Wins {}: {}", cfg.remote_name, wins[1])?;
    writeln!(out, "Unfinished: {}", unfinished)?;
    let avg = total_turns as f64 / played.max(1) as f64;
    writeln!(out, "Average turns: {:.1}", avg)?;

    if played < matches {
        return Err(CliError::Interrupted(format!(
            "stopped after {} of {} matches",
            played, matches
        )));
    }
    Ok(())
}

/// Where simulated matches go: a JSONL file, an in-memory buffer that is
/// compressed once the run ends, or nowhere.
enum Transcript {
    None,
    File(MatchLogger),
    Buffer(MatchLogger<Vec<u8>>),
}

impl Transcript {
    fn write(&mut self, record: &MatchRecord) -> std::io::Result<()> {
        match self {
            Transcript::None => Ok(()),
            Transcript::File(logger) => logger.write(record).map(drop),
            Transcript::Buffer(logger) => logger.write(record).map(drop),
        }
    }
}

/// Plays uniformly random legal moves until the match ends or `max_turns`
/// board moves have been made. Returns the recorded moves and the number of
/// board moves.
fn play_random_match(
    relay: &mut LocalRelay,
    rng: &mut ChaCha20Rng,
    max_turns: u32,
) -> Result<(Vec<MoveRecord>, u32), CliError> {
    let mut moves = Vec::new();
    let mut turns = 0u32;
    // dead-card redraws do not end a turn
    let mut steps_left = max_turns.saturating_mul(16);

    while turns < max_turns && steps_left > 0 {
        steps_left -= 1;
        let Some(active) = relay.active_peer() else {
            break;
        };
        let board = relay.peer(active);
        let outcome = match board.status() {
            MatchStatus::YourTurnBoard => {
                let legal = board.legal_places();
                if legal.is_empty() {
                    return Err(CliError::Engine("card in play has no legal place".into()));
                }
                let target = legal[rng.random_range(0..legal.len())];
                relay.select_board_place(target)?
            }
            _ => {
                let n = board.local_player().hand().len();
                relay.pick_card(rng.random_range(0..n))?
            }
        };
        if let Some(mv) = outcome.outgoing {
            if matches!(mv, Move::Board { .. }) {
                turns += 1;
            }
            moves.push(MoveRecord { peer: active, mv });
        }
    }
    Ok((moves, turns))
}
