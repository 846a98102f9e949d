//! Replay command handler.
//!
//! Re-applies every move of each recorded match to a fresh pair of
//! mirrored boards and prints what happened, ending with the final board.
//! Reads plain or `.zst` JSONL transcripts.

use crate::commands::relay_for_record;
use crate::error::CliError;
use crate::formatters::{format_event, format_grid};
use crate::io_utils::read_text_auto;
use crate::parse_json_or_continue;
use crate::ui;
use sequence_engine::logger::MatchRecord;
use std::io::Write;

pub fn handle_replay_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text_auto(&input).map_err(|e| {
        let msg = format!("Failed to read {}: {}", input, e);
        let _ = ui::write_error(err, &msg);
        CliError::InvalidInput(msg)
    })?;

    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        writeln!(out, "No matches found in file.")?;
        return Ok(());
    }

    let mut failed = 0usize;
    for (n, line) in lines.iter().enumerate() {
        let record: MatchRecord = parse_json_or_continue!(line, err, format!("match {}", n + 1));
        if let Err(e) = replay_match(&record, out) {
            ui::write_error(err, &format!("Match {}: {}", record.match_id, e))?;
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(CliError::InvalidInput(format!(
            "{} match(es) could not be replayed",
            failed
        )));
    }
    Ok(())
}

fn replay_match(record: &MatchRecord, out: &mut dyn Write) -> Result<(), CliError> {
    let names: Vec<&str> = record.players.iter().map(|p| p.name.as_str()).collect();
    writeln!(
        out,
        "Match {}: {} (seed {})",
        record.match_id,
        names.join(" vs "),
        record.seed
    )?;

    let mut relay = relay_for_record(record)?;
    for (i, m) in record.moves.iter().enumerate() {
        let outcome = relay
            .apply(m.peer, &m.mv)
            .map_err(|e| CliError::InvalidInput(format!("move {}: {}", i + 1, e)))?;
        writeln!(
            out,
            "{:>4}  {}",
            i + 1,
            format_event(relay.peer(m.peer), &outcome.event)
        )?;
    }

    let observer = relay.peer(0);
    writeln!(out, "{}", format_grid(observer))?;
    let result = match relay.winner() {
        Some(w) => format!("{} wins", names.get(w).copied().unwrap_or("?")),
        None if relay.is_over() => "withdraw".to_string(),
        None => "unfinished".to_string(),
    };
    writeln!(out, "Result: {}", result)?;
    Ok(())
}
