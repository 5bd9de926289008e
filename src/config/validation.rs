//! Configuration validation.

use crate::error::{ConfigError, Error, Result, SequenceError};
use crate::sequence::Command;

use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Axis limits are positive and finite, thresholds non-negative
/// - Output scales are finite
/// - Sequences reference existing axes and are not empty
/// - Timed moves carry a positive, finite deadline
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, axis) in config.axes.iter() {
        validate_axis(axis)?;
    }

    for (name, seq) in config.sequences.iter() {
        validate_sequence(name.as_str(), seq, config)?;
    }

    Ok(())
}

fn validate_axis(config: &super::AxisConfig) -> Result<()> {
    config.limits().validate()?;

    if !config.scale.is_finite() {
        return Err(Error::Config(ConfigError::InvalidScale(config.scale)));
    }

    Ok(())
}

fn validate_sequence(
    name: &str,
    seq: &super::SequenceConfig,
    config: &SystemConfig,
) -> Result<()> {
    // Axis must exist
    if config.axis(seq.axis.as_str()).is_none() {
        return Err(Error::Sequence(SequenceError::AxisNotFound {
            sequence: heapless::String::try_from(name).unwrap_or_default(),
            axis: seq.axis.clone(),
        }));
    }

    if seq.commands.is_empty() {
        return Err(Error::Sequence(SequenceError::Empty));
    }

    for command in seq.commands.iter() {
        if let Command::MoveWithin { seconds, .. } = command {
            if !seconds.is_finite() || *seconds <= 0.0 {
                return Err(Error::Sequence(SequenceError::InvalidDeadline(*seconds)));
            }
        }
    }

    Ok(())
}
