//! # Sequence CLI Library
//!
//! Command-line front end for the Sequence rules engine. It deals and
//! prints match starts, runs hot-seat matches, simulates random self-play,
//! and replays or verifies recorded transcripts.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ```
//! use std::io;
//! let args = vec!["sequence", "deal", "--seed", "42"];
//! let code = sequence_cli::run(args, &mut io::sink(), &mut io::sink());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `cfg`: Display resolved configuration and value sources
//! - `deal`: Print the board layout and opening hands for a seed
//! - `play`: Hot-seat match for two players at one terminal
//! - `sim`: Random self-play, writing JSONL transcripts
//! - `replay`: Re-apply recorded matches and print every move
//! - `verify`: Check recorded matches for illegal or inconsistent moves
//!
//! ## Environment Variables
//!
//! - `SEQUENCE_CONFIG`: TOML configuration file
//! - `SEQUENCE_SEED`, `SEQUENCE_HAND_SIZE`, `SEQUENCE_SEQUENCES_TO_WIN`,
//!   `SEQUENCE_LOCAL_NAME`, `SEQUENCE_REMOTE_NAME`: configuration overrides
//! - `SEQUENCE_TEST_INPUT`: scripted input for `play` instead of stdin
//! - `SEQUENCE_SIM_BREAK_AFTER`: stop `sim` early (exit code 130)
//! - `RUST_LOG`: log filter for stderr diagnostics

use clap::Parser;
use std::io::{BufRead, Cursor, Write};

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
#[macro_use]
mod macros;
pub mod ui;
pub mod validation;

use cli::{Commands, SequenceCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_replay_command,
    handle_sim_command, handle_verify_command,
};

pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &["cfg", "deal", "play", "sim", "replay", "verify"];

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let code = sequence_cli::run(["sequence", "frobnicate"], &mut io::sink(), &mut io::sink());
/// assert_eq!(code, 2);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match SequenceCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Sequence CLI");
            write_or_exit!(err, "Usage: sequence <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: sequence --help");
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Deal {
            seed,
            local_id,
            remote_id,
        } => handle_deal_command(seed, local_id.zip(remote_id), out),
        Commands::Play {
            seed,
            sequences,
            output,
        } => {
            let mut input = play_input();
            handle_play_command(seed, sequences, output, out, err, input.as_mut())
        }
        Commands::Sim {
            matches,
            output,
            seed,
            max_turns,
        } => handle_sim_command(matches, output, seed, max_turns, out, err),
        Commands::Replay { input } => handle_replay_command(input, out, err),
        Commands::Verify { input } => {
            let Some(path) = input else {
                let _ = ui::write_error(err, "input required");
                return exit_code::ERROR;
            };
            handle_verify_command(path, out, err)
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            let _ = ui::display_warning(err, &msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

/// Scripted input from `SEQUENCE_TEST_INPUT`, otherwise stdin.
fn play_input() -> Box<dyn BufRead> {
    match std::env::var("SEQUENCE_TEST_INPUT") {
        Ok(script) => Box::new(Cursor::new(script.into_bytes())),
        Err(_) => Box::new(std::io::stdin().lock()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, _) = run_args(&["sequence", "--help"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("Usage"));
    }

    #[test]
    fn unknown_command_lists_commands() {
        let (code, _, err) = run_args(&["sequence", "shuffle"]);
        assert_eq!(code, exit_code::ERROR);
        for c in COMMANDS {
            assert!(err.contains(&format!("  {}", c)));
        }
    }

    #[test]
    fn verify_without_input_is_an_error() {
        let (code, _, err) = run_args(&["sequence", "verify"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(err.contains("input required"));
    }

    #[test]
    fn deal_rejects_seed_with_ids() {
        let (code, _, _) = run_args(&[
            "sequence",
            "deal",
            "--seed",
            "3",
            "--local-id",
            "1",
            "--remote-id",
            "2",
        ]);
        assert_eq!(code, exit_code::ERROR);
    }

    #[test]
    fn sim_requires_at_least_one_match() {
        let (code, _, _) = run_args(&["sequence", "sim", "--matches", "0"]);
        assert_eq!(code, exit_code::ERROR);
    }

    #[test]
    fn commands_list_matches_subcommands() {
        use clap::CommandFactory;
        let cmd = SequenceCli::command();
        let mut names: Vec<&str> = cmd
            .get_subcommands()
            .map(|c| c.get_name())
            .filter(|n| *n != "help")
            .collect();
        names.sort_unstable();
        let mut listed = COMMANDS.to_vec();
        listed.sort_unstable();
        assert_eq!(names, listed);
    }
}
