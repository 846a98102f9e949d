use serde::{Deserialize, Serialize};

use crate::board::MatchRules;
use crate::protocol::{Move, RosterEntry};

/// One move in a match history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Roster index (0 or 1) of the player who made the move
    pub peer: usize,
    /// The descriptor as sent to the other peer
    #[serde(rename = "move")]
    pub mv: Move,
}

/// Complete record of a match: roster, rules, and every move in order.
/// Serialized as one JSONL line per match; replaying the moves against a
/// fresh board reproduces the match exactly.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier (format: YYYYMMDD-NNNNNN)
    pub match_id: String,
    /// Deck seed; always the sum of the player ids
    pub seed: u64,
    pub players: Vec<RosterEntry>,
    #[serde(default)]
    pub rules: MatchRules,
    pub moves: Vec<MoveRecord>,
    /// Result summary ("Ana wins", "withdraw", ...)
    pub result: Option<String>,
    /// Roster index of the winner
    #[serde(default)]
    pub winner: Option<usize>,
    /// Timestamp when the match was recorded (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

pub fn format_match_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Appends match records as JSONL to a file or any other writer.
///
/// Records without a `match_id` get the next `YYYYMMDD-NNNNNN` id for the
/// logger's date; records without `ts` get the current time. A record whose
/// seed is not the sum of its player ids could never be replayed, so it is
/// rejected with [`io::ErrorKind::InvalidData`] and nothing is written.
pub struct MatchLogger<W: Write = BufWriter<File>> {
    out: Option<W>,
    date: String,
    seq: u32,
    written: usize,
}

impl MatchLogger {
    /// Creates (or truncates) `path`, creating missing parent directories.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(file), &today()))
    }

    /// A logger that only hands out ids.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            out: None,
            date: date.to_string(),
            seq: 0,
            written: 0,
        }
    }
}

impl<W: Write> MatchLogger<W> {
    pub fn from_writer(out: W, date: &str) -> Self {
        Self {
            out: Some(out),
            date: date.to_string(),
            seq: 0,
            written: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_match_id(&self.date, self.seq)
    }

    /// Writes one record and returns the id it was stored under.
    pub fn write(&mut self, record: &MatchRecord) -> io::Result<String> {
        let roster_seed = record
            .players
            .iter()
            .fold(0u64, |acc, p| acc.wrapping_add(p.id));
        if record.seed != roster_seed {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "seed {} is not the sum of the player ids ({})",
                    record.seed, roster_seed
                ),
            ));
        }

        let mut rec = record.clone();
        if rec.match_id.is_empty() {
            rec.match_id = self.next_id();
        }
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(io::Error::other)?;
        if let Some(w) = &mut self.out {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        self.written += 1;
        Ok(rec.match_id)
    }

    /// Records accepted so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns the underlying writer, if the logger has one.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

fn today() -> String {
    Utc::now().format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RosterEntry;

    fn record(match_id: &str, seed: u64) -> MatchRecord {
        MatchRecord {
            match_id: match_id.to_string(),
            seed,
            players: vec![RosterEntry::new("Ana", 4, 1), RosterEntry::new("Bruno", 5, 2)],
            rules: MatchRules::default(),
            moves: vec![],
            result: Some("withdraw".to_string()),
            winner: None,
            ts: None,
            meta: None,
        }
    }

    #[test]
    fn missing_ids_are_assigned_in_order() {
        let mut logger = MatchLogger::from_writer(Vec::new(), "20260102");
        assert_eq!(logger.write(&record("", 9)).unwrap(), "20260102-000001");
        assert_eq!(logger.write(&record("keep-me", 9)).unwrap(), "keep-me");
        assert_eq!(logger.write(&record("", 9)).unwrap(), "20260102-000002");
        assert_eq!(logger.written(), 3);

        let bytes = logger.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let ids: Vec<String> = text
            .lines()
            .map(|l| serde_json::from_str::<MatchRecord>(l).unwrap().match_id)
            .collect();
        assert_eq!(ids, ["20260102-000001", "keep-me", "20260102-000002"]);
    }

    #[test]
    fn record_with_foreign_seed_is_refused() {
        let mut logger = MatchLogger::from_writer(Vec::new(), "20260102");
        let err = logger.write(&record("", 10)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(logger.written(), 0);
        assert!(logger.into_inner().unwrap().is_empty());
    }

    #[test]
    fn id_only_logger_writes_nothing() {
        let mut logger = MatchLogger::with_seq_for_test("20260102");
        logger.write(&record("", 9)).unwrap();
        assert_eq!(logger.written(), 1);
        assert!(logger.into_inner().is_none());
    }
}
