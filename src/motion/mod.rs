//! Motion module for servo-trajectory.
//!
//! Provides the profile generator, its builder, time sources and a blocking
//! fixed-rate runner.

mod builder;
mod clock;
pub mod kinematics;
mod profile;
mod runner;

pub use builder::ProfileBuilder;
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::{ManualClock, MonotonicClock};
pub use profile::{MotionPhase, MotionProfile, Target};
pub use runner::run_to_ready;
