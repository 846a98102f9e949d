//! # Play Command
//!
//! Hot-seat Sequence match: both players share one terminal and take turns
//! at the same prompt. The two peers run as mirrored boards inside a
//! [`LocalRelay`], so every move goes through the same descriptor exchange
//! a networked match would use.
//!
//! Prompt commands: `card N`, `place N`, `board`, `q`.

use crate::commands::{roster_for_seed, rules_with_target};
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_card, format_event, format_grid, format_hand};
use crate::io_utils::{ensure_parent_dir, read_stdin_line};
use crate::ui;
use crate::validation::{ParseResult, PlayCommand, parse_play_command};
use sequence_engine::board::MatchStatus;
use sequence_engine::logger::{MatchLogger, MatchRecord, MoveRecord};
use sequence_engine::relay::LocalRelay;
use std::io::{BufRead, Write};

/// Handle the play command.
///
/// # Arguments
///
/// * `seed` - Deck seed (default: configuration, then random)
/// * `sequences` - Sequences needed to win (default: configuration)
/// * `output` - Optional JSONL path for the match transcript
/// * `out` - Output stream for the board and prompts
/// * `err` - Error stream for rejected input
/// * `stdin` - Input stream for player commands
///
/// # Returns
///
/// `Ok(())` when the match ends, by a win or by `q`/EOF.
pub fn handle_play_command(
    seed: Option<u64>,
    sequences: Option<u32>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let rules = rules_with_target(cfg.rules(), sequences);
    let start = roster_for_seed(seed, &cfg.local_name, &cfg.remote_name);

    let mut relay = LocalRelay::new(rules);
    relay.start(&start)?;
    writeln!(
        out,
        "play: seed={} hand_size={} sequences_to_win={}",
        seed, rules.hand_size, rules.sequences_to_win
    )?;

    let mut moves: Vec<MoveRecord> = Vec::new();
    let mut quit = false;
    let mut show_board = true;

    while let Some(active) = relay.active_peer() {
        let board = relay.peer(active);
        let name = board.local_player().name().to_string();
        if show_board {
            writeln!(out, "{}", format_grid(board))?;
            show_board = false;
        }
        let prompt = match board.status() {
            MatchStatus::YourTurnBoard => {
                let card = board.card_in_play().map(|c| format_card(&c)).unwrap_or_default();
                writeln!(out, "{} holds {}; legal places: {:?}", name, card, board.legal_places())?;
                "place N / board / q"
            }
            _ => {
                writeln!(
                    out,
                    "{} ({} sequences) hand: {}",
                    name,
                    board.local_player().sequences(),
                    format_hand(board.local_player().hand())
                )?;
                "card N / board / q"
            }
        };
        ui::prompt(out, &format!("{} [{}]", name, prompt))?;

        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            quit = true;
            break;
        };
        let result = match parse_play_command(&line) {
            ParseResult::Quit => {
                quit = true;
                break;
            }
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
            ParseResult::Command(PlayCommand::Board) => {
                show_board = true;
                continue;
            }
            ParseResult::Command(PlayCommand::Card(i)) => relay.pick_card(i),
            ParseResult::Command(PlayCommand::Place(i)) => relay.select_board_place(i),
        };

        match result {
            Ok(outcome) => {
                let board = relay.peer(active);
                writeln!(out, "{}", format_event(board, &outcome.event))?;
                if let Some(mv) = outcome.outgoing {
                    if matches!(mv, sequence_engine::protocol::Move::Board { .. }) {
                        show_board = true;
                    }
                    moves.push(MoveRecord { peer: active, mv });
                }
                writeln!(out, "{}", outcome.info)?;
            }
            Err(e) => ui::write_error(err, &e.to_string())?,
        }
    }

    let result = if quit {
        relay.withdraw(relay.active_peer().unwrap_or(0));
        writeln!(out, "Match abandoned after {} moves", moves.len())?;
        "withdraw".to_string()
    } else {
        writeln!(out, "{}", format_grid(relay.peer(0)))?;
        match relay.winner() {
            Some(w) => {
                let name = &start.players[w].name;
                writeln!(out, "{} wins", name)?;
                format!("{} wins", name)
            }
            None => "unfinished".to_string(),
        }
    };

    if let Some(path) = output {
        let path = std::path::PathBuf::from(path);
        ensure_parent_dir(&path)?;
        let mut logger = MatchLogger::create(&path)?;
        let record = MatchRecord {
            match_id: logger.next_id(),
            seed,
            players: start.players.clone(),
            rules,
            moves,
            result: Some(result),
            winner: relay.winner(),
            ts: None,
            meta: None,
        };
        logger.write(&record)?;
        writeln!(out, "Transcript written to {}", path.display())?;
    }
    Ok(())
}
