//! Error types for servo-trajectory.
//!
//! Provides unified error handling across configuration, profile control and
//! command sequencing.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all servo-trajectory operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Profile execution error
    Motion(MotionError),
    /// Command sequence error
    Sequence(SequenceError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid max velocity (must be finite and > 0)
    InvalidMaxVelocity(f32),
    /// Invalid acceleration (must be finite and > 0)
    InvalidAcceleration(f32),
    /// Invalid deceleration (must be finite and > 0)
    InvalidDeceleration(f32),
    /// Invalid position threshold (must be finite and >= 0)
    InvalidThreshold(f32),
    /// Invalid output scale (must be finite)
    InvalidScale(f32),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Sequence name not found in configuration
    SequenceNotFound(heapless::String<32>),
    /// Required builder field was never set
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Profile execution errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// The profile did not settle within the allowed number of ticks
    Timeout {
        /// Ticks executed before giving up
        ticks: u32,
        /// Position error remaining when the run was abandoned
        remaining: f32,
    },
    /// Tick period is zero
    InvalidTickPeriod,
}

/// Command sequencing errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Sequence references an axis that does not exist
    AxisNotFound {
        /// Sequence name
        sequence: heapless::String<32>,
        /// Referenced axis name
        axis: heapless::String<32>,
    },
    /// Sequence contains no commands
    Empty,
    /// Command queue is full
    QueueFull,
    /// Timed move has a non-positive or non-finite deadline
    InvalidDeadline(f32),
    /// Invalid sequence name or registry operation
    InvalidName(heapless::String<64>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Sequence(e) => write!(f, "Sequence error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMaxVelocity(v) => write!(f, "Invalid max velocity: {}. Must be > 0", v),
            ConfigError::InvalidAcceleration(v) => write!(f, "Invalid acceleration: {}. Must be > 0", v),
            ConfigError::InvalidDeceleration(v) => write!(f, "Invalid deceleration: {}. Must be > 0", v),
            ConfigError::InvalidThreshold(v) => write!(f, "Invalid position threshold: {}. Must be >= 0", v),
            ConfigError::InvalidScale(v) => write!(f, "Invalid output scale: {}. Must be finite", v),
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::SequenceNotFound(name) => write!(f, "Sequence '{}' not found", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::Timeout { ticks, remaining } => {
                write!(f, "Profile not settled after {} ticks, {} units remaining", ticks, remaining)
            }
            MotionError::InvalidTickPeriod => write!(f, "Tick period must be greater than zero"),
        }
    }
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::AxisNotFound { sequence, axis } => {
                write!(f, "Sequence '{}' references unknown axis '{}'", sequence, axis)
            }
            SequenceError::Empty => write!(f, "Sequence is empty (no commands)"),
            SequenceError::QueueFull => write!(f, "Command queue is full"),
            SequenceError::InvalidDeadline(t) => {
                write!(f, "Invalid deadline: {} s. Must be finite and > 0", t)
            }
            SequenceError::InvalidName(name) => write!(f, "Invalid sequence name or configuration: {}", name),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<SequenceError> for Error {
    fn from(e: SequenceError) -> Self {
        Error::Sequence(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
