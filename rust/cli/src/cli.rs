//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "sequence",
    version,
    about = "Sequence board game: deal, play, simulate, and verify matches"
)]
pub struct SequenceCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show resolved configuration and where each value came from
    Cfg,
    /// Print the board layout and opening hands for a match start
    Deal {
        /// Deck seed (the sum of both player ids)
        #[arg(long, conflicts_with_all = ["local_id", "remote_id"])]
        seed: Option<u64>,
        #[arg(long, requires = "remote_id")]
        local_id: Option<u64>,
        #[arg(long, requires = "local_id")]
        remote_id: Option<u64>,
    },
    /// Hot-seat match for two players at one terminal
    Play {
        #[arg(long)]
        seed: Option<u64>,
        /// Sequences needed to win (overrides configuration)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        sequences: Option<u32>,
        /// Write the match transcript to this JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// Random self-play; writes match transcripts as JSONL
    Sim {
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        matches: u64,
        /// Output path (.jsonl or .jsonl.zst)
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Board moves after which a match is abandoned as unfinished
        #[arg(long, default_value_t = 1000)]
        max_turns: u32,
    },
    /// Re-apply recorded matches and print every move
    Replay {
        #[arg(long)]
        input: String,
    },
    /// Re-apply recorded matches and report any inconsistency
    Verify {
        #[arg(long)]
        input: Option<String>,
    },
}
