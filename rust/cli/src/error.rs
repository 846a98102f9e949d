//! Error types for the CLI application.
//!
//! ## Batch Validation Errors
//!
//! The `BatchValidationError<T>` type collects per-item failures with
//! context. `verify` uses it to report every problem in a transcript
//! instead of stopping at the first one.

use sequence_engine::errors::GameError;
use std::fmt;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
///
/// This enum encompasses all error types that can occur during CLI execution,
/// allowing for proper error propagation using the `?` operator.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input, command-line arguments, or transcript contents
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Rules engine rejected an operation
    Engine(String),

    /// Operation was interrupted before completion
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

// String errors come from io_utils helpers
impl From<String> for CliError {
    fn from(error: String) -> Self {
        CliError::InvalidInput(error)
    }
}

/// Generic error type for batch validation operations.
///
/// Each error tracks the item that failed and a descriptive message.
///
/// # Examples
///
/// ```rust
/// use sequence_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "move 12: card cannot be placed".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: move 12: card cannot be placed");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_validation_error_with_usize() {
        let error = BatchValidationError {
            item_context: 42,
            message: "Test error".to_string(),
        };
        assert_eq!(error.to_string(), "42: Test error");
    }

    #[test]
    fn test_game_error_converts_to_engine_error() {
        let e: CliError = GameError::DeckExhausted.into();
        assert!(matches!(e, CliError::Engine(_)));
        assert_eq!(
            e.to_string(),
            "Engine error: Draw and discard piles are both empty"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let e: CliError = ConfigError::Invalid("bad".into()).into();
        assert_eq!(e.to_string(), "Configuration error: bad");
    }
}
