//! # servo-trajectory
//!
//! Real-time trapezoidal motion profiles for a single servo or motor axis.
//!
//! ## Features
//!
//! - **Position mode**: trapezoidal (or triangular) velocity curves with
//!   parabolic position blends, stopping inside a deadzone around the target
//! - **Velocity mode**: ramp to a commanded speed and integrate indefinitely
//! - **Asymmetric profiles**: independent acceleration and deceleration rates
//! - **Timed moves**: pick the cruise velocity that arrives on a deadline
//! - **Continuous re-targeting**: no velocity jumps when the target changes
//! - **Configuration-driven**: define axes and command sequences in TOML
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust
//! use servo_trajectory::{MotionProfile, ProfileLimits};
//!
//! let limits = ProfileLimits::new(90.0, 180.0).with_threshold(0.05);
//! let mut profile = MotionProfile::new(limits)?;
//!
//! profile.set_target_position(45.0);
//! while !profile.ready() {
//!     let setpoint = profile.update(0.01);
//!     // Hand `setpoint` to the position loop
//!     # let _ = setpoint;
//! }
//! assert_eq!(profile.position(), 45.0);
//! # Ok::<(), servo_trajectory::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and the `Instant` clock
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod feedback;
pub mod motion;
pub mod sequence;

// Re-exports for ergonomic API
pub use config::{validate_config, AxisConfig, ProfileLimits, SequenceConfig, SystemConfig};
pub use error::{Error, Result};
pub use feedback::{Corrector, Setpoint};
pub use motion::{
    run_to_ready, ManualClock, MonotonicClock, MotionPhase, MotionProfile, ProfileBuilder, Target,
};
pub use sequence::{Command, SequenceRegistry, Sequencer};

#[cfg(feature = "std")]
pub use motion::StdClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Seconds, UnitExt, Units, UnitsPerSec, UnitsPerSecSquared};
