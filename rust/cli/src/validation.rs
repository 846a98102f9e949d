//! Input parsing for `play` and structural checks for match transcripts.

use sequence_engine::logger::MatchRecord;
use sequence_engine::protocol::MatchStart;

/// A command typed at the `play` prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum PlayCommand {
    /// Play the card at this hand position
    Card(usize),
    /// Put the card in play on this board place
    Place(usize),
    /// Show the board
    Board,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    Command(PlayCommand),
    /// User entered q or quit
    Quit,
    Invalid(String),
}

/// Parses a `play` prompt line (case-insensitive).
///
/// - `card N` / `c N`: play hand position N
/// - `place N` / `p N`: claim or clear board place N
/// - `board` / `b`: redraw the board
/// - `q` / `quit`: leave the match
///
/// ```rust
/// # use sequence_cli::validation::{parse_play_command, ParseResult, PlayCommand};
/// assert_eq!(parse_play_command("card 2"), ParseResult::Command(PlayCommand::Card(2)));
/// assert_eq!(parse_play_command("P 57"), ParseResult::Command(PlayCommand::Place(57)));
/// assert_eq!(parse_play_command("q"), ParseResult::Quit);
/// assert!(matches!(parse_play_command("fold"), ParseResult::Invalid(_)));
/// ```
pub fn parse_play_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };
    match head {
        "q" | "quit" => ParseResult::Quit,
        "b" | "board" => ParseResult::Command(PlayCommand::Board),
        "c" | "card" => match parse_index(&parts, "card") {
            Ok(i) => ParseResult::Command(PlayCommand::Card(i)),
            Err(msg) => ParseResult::Invalid(msg),
        },
        "p" | "place" => match parse_index(&parts, "place") {
            Ok(i) => ParseResult::Command(PlayCommand::Place(i)),
            Err(msg) => ParseResult::Invalid(msg),
        },
        other => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Use card N, place N, board, or q",
            other
        )),
    }
}

fn parse_index(parts: &[&str], verb: &str) -> Result<usize, String> {
    match parts {
        [_, n] => n
            .parse::<usize>()
            .map_err(|_| format!("Invalid index '{}'", n)),
        _ => Err(format!("{} requires one index (e.g., '{} 3')", verb, verb)),
    }
}

/// `YYYYMMDD-NNNNNN`
pub fn is_valid_match_id(id: &str) -> bool {
    id.len() == 15
        && id.is_ascii()
        && id[0..8].chars().all(|c| c.is_ascii_digit())
        && &id[8..9] == "-"
        && id[9..].chars().all(|c| c.is_ascii_digit())
}

/// Checks a transcript's header before any move is replayed.
pub fn validate_record_header(record: &MatchRecord) -> Vec<String> {
    let mut problems = Vec::new();
    if !is_valid_match_id(&record.match_id) {
        problems.push(format!("Invalid match_id '{}'", record.match_id));
    }
    let roster = record.players.first().map(|p| p.id).unwrap_or_default();
    let start = MatchStart::new(record.players.clone(), roster);
    if let Err(e) = start.validate() {
        problems.push(e.to_string());
    } else if start.seed() != record.seed {
        problems.push(format!(
            "Seed {} does not match the player ids (expected {})",
            record.seed,
            start.seed()
        ));
    }
    if let Some(m) = record.moves.iter().position(|m| m.peer > 1) {
        problems.push(format!("Move {} names unknown peer {}", m + 1, record.moves[m].peer));
    }
    if record.winner.is_some_and(|w| w > 1) {
        problems.push("Winner is not a roster index".to_string());
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequence_engine::board::MatchRules;
    use sequence_engine::protocol::RosterEntry;

    fn record() -> MatchRecord {
        MatchRecord {
            match_id: "20250101-000001".to_string(),
            seed: 30,
            players: vec![
                RosterEntry::new("Red", 10, 1),
                RosterEntry::new("Blue", 20, 2),
            ],
            rules: MatchRules::default(),
            moves: vec![],
            result: None,
            winner: None,
            ts: None,
            meta: None,
        }
    }

    #[test]
    fn parse_accepts_short_forms_and_case() {
        assert_eq!(
            parse_play_command("C 0"),
            ParseResult::Command(PlayCommand::Card(0))
        );
        assert_eq!(
            parse_play_command("  board "),
            ParseResult::Command(PlayCommand::Board)
        );
        assert_eq!(parse_play_command("QUIT"), ParseResult::Quit);
    }

    #[test]
    fn parse_rejects_missing_or_bad_index() {
        assert!(matches!(parse_play_command("card"), ParseResult::Invalid(_)));
        assert!(matches!(parse_play_command("place x"), ParseResult::Invalid(_)));
        assert!(matches!(parse_play_command("place -1"), ParseResult::Invalid(_)));
        assert!(matches!(parse_play_command("card 1 2"), ParseResult::Invalid(_)));
        assert!(matches!(parse_play_command(""), ParseResult::Invalid(_)));
    }

    #[test]
    fn match_id_format() {
        assert!(is_valid_match_id("20250101-000001"));
        assert!(!is_valid_match_id("2025-01-01-1"));
        assert!(!is_valid_match_id("20250101_000001"));
    }

    #[test]
    fn header_checks() {
        assert!(validate_record_header(&record()).is_empty());

        let mut bad = record();
        bad.seed = 31;
        assert_eq!(validate_record_header(&bad).len(), 1);

        let mut bad = record();
        bad.players[1].turn_order = 1;
        assert_eq!(validate_record_header(&bad).len(), 1);

        let mut bad = record();
        bad.match_id = "x".to_string();
        bad.winner = Some(2);
        assert_eq!(validate_record_header(&bad).len(), 2);
    }
}
