//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value paired with the
//! place it came from (`default`, `file`, or `env`):
//!
//! ```json
//! {
//!   "hand_size": {
//!     "value": 7,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "hand_size": {
            "value": config.hand_size,
            "source": sources.hand_size,
        },
        "sequences_to_win": {
            "value": config.sequences_to_win,
            "source": sources.sequences_to_win,
        },
        "local_name": {
            "value": config.local_name,
            "source": sources.local_name,
        },
        "remote_name": {
            "value": config.remote_name,
            "source": sources.remote_name,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
