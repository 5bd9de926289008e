//! Configuration module for servo-trajectory.
//!
//! Provides types for loading and validating axis limits and command
//! sequences from TOML files (with `std` feature) or pre-parsed data.

mod axis;
mod limits;
mod sequence;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::AxisConfig;
pub use limits::{ProfileLimits, DEFAULT_POSITION_THRESHOLD};
pub use sequence::SequenceConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Seconds, Units, UnitsPerSec, UnitsPerSecSquared};
