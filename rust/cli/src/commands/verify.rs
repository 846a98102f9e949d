//! Verify command handler.
//!
//! Checks every match in a JSONL transcript:
//!
//! - match id format and a well-formed roster
//! - seed equals the sum of the player ids
//! - every move is legal when replayed on a fresh pair of boards
//! - recorded move statuses agree with the replay
//! - both boards stay mirror images after each move
//! - no cards are created or lost
//! - the recorded winner is the replayed winner
//!
//! All problems are collected with `BatchValidationError` and reported
//! together.

use crate::commands::relay_for_record;
use crate::error::{BatchValidationError, CliError};
use crate::io_utils::read_text_auto;
use crate::ui;
use crate::validation::validate_record_header;
use sequence_engine::logger::MatchRecord;
use std::io::Write;

/// The `usize` context is the 1-based record number.
type VerifyError = BatchValidationError<usize>;

pub fn handle_verify_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text_auto(&input).map_err(|e| {
        let msg = format!("Failed to read {}: {}", input, e);
        let _ = ui::write_error(err, &msg);
        CliError::InvalidInput(msg)
    })?;

    let mut errors: Vec<VerifyError> = Vec::new();
    let mut checked = 0usize;
    for (n, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record_no = n + 1;
        checked += 1;
        match serde_json::from_str::<MatchRecord>(line) {
            Ok(record) => errors.extend(
                verify_record(&record)
                    .into_iter()
                    .map(|message| VerifyError {
                        item_context: record_no,
                        message,
                    }),
            ),
            Err(e) => errors.push(VerifyError {
                item_context: record_no,
                message: format!("Invalid record: {}", e),
            }),
        }
    }

    if errors.is_empty() {
        writeln!(out, "Verify: OK ({} matches)", checked)?;
        return Ok(());
    }
    writeln!(out, "Verify: FAILED ({} matches)", checked)?;
    for e in &errors {
        ui::write_error(err, &format!("match {}", e))?;
    }
    Err(CliError::InvalidInput(format!("{} error(s)", errors.len())))
}

/// Returns every problem found in one record.
fn verify_record(record: &MatchRecord) -> Vec<String> {
    let mut problems = validate_record_header(record);
    if !problems.is_empty() {
        return problems;
    }

    let mut relay = match relay_for_record(record) {
        Ok(relay) => relay,
        Err(e) => {
            problems.push(e.to_string());
            return problems;
        }
    };
    let cards = relay.peer(0).card_count();

    for (i, m) in record.moves.iter().enumerate() {
        let k = i + 1;
        if relay.is_over() {
            problems.push(format!("move {}: recorded after the match ended", k));
            break;
        }
        let outcome = match relay.apply(m.peer, &m.mv) {
            Ok(outcome) => outcome,
            Err(e) => {
                problems.push(format!("move {}: {}", k, e));
                break;
            }
        };
        if let Some(sent) = &outcome.outgoing {
            if sent.status() != m.mv.status() {
                problems.push(format!(
                    "move {}: recorded status {:?}, replay gives {:?}",
                    k,
                    m.mv.status(),
                    sent.status()
                ));
            }
        }
        if !relay.is_consistent() {
            problems.push(format!("move {}: boards diverged", k));
            break;
        }
        for p in 0..2 {
            let count = relay.peer(p).card_count();
            if count != cards {
                problems.push(format!(
                    "move {}: peer {} holds {} cards, expected {}",
                    k, p, count, cards
                ));
            }
        }
    }

    let replayed = relay.winner();
    if record.winner != replayed {
        problems.push(format!(
            "recorded winner {:?} but replay gives {:?}",
            record.winner, replayed
        ));
    }
    problems
}
