//! Command sequencing on top of a motion profile.
//!
//! Commands are queued in a [`Sequencer`] and handed to the profile one at a
//! time; [`SequenceRegistry`] resolves named sequences from configuration.

mod command;
mod registry;
mod sequencer;

pub use command::Command;
pub use registry::{SequenceRegistry, MAX_SEQUENCES};
pub use sequencer::Sequencer;

/// Maximum number of commands in one sequence.
pub const MAX_COMMANDS: usize = 32;
