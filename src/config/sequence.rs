//! Command sequence configuration from TOML.

use heapless::{String, Vec};
use serde::Deserialize;

use crate::sequence::{Command, MAX_COMMANDS};

/// A named list of commands for one axis.
///
/// ```toml
/// [sequences.sweep]
/// axis = "pan"
/// dwell_ms = 250
/// commands = [
///     { move_to = { position = 90.0 } },
///     { move_within = { position = -90.0, seconds = 4.0 } },
///     { move_to = { position = 0.0 } },
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SequenceConfig {
    /// Target axis name (must match an axis in config).
    pub axis: String<32>,

    /// Ordered commands (max 32).
    pub commands: Vec<Command, MAX_COMMANDS>,

    /// Dwell time after each arrival (milliseconds).
    #[serde(default)]
    pub dwell_ms: u32,
}
