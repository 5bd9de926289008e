//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::limits::{ProfileLimits, DEFAULT_POSITION_THRESHOLD};
use super::units::{Units, UnitsPerSec, UnitsPerSecSquared};

/// Complete axis configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Maximum velocity in units per second.
    #[serde(rename = "max_velocity_per_sec")]
    pub max_velocity: UnitsPerSec,

    /// Acceleration in units per second squared.
    #[serde(rename = "acceleration_per_sec2")]
    pub acceleration: UnitsPerSecSquared,

    /// Deceleration in units per second squared.
    /// If not set, uses the acceleration value (symmetric profile).
    #[serde(default, rename = "deceleration_per_sec2")]
    pub deceleration: Option<UnitsPerSecSquared>,

    /// Arrival deadzone around the target.
    #[serde(default = "default_threshold")]
    pub position_threshold: Units,

    /// Position the axis starts at.
    #[serde(default)]
    pub initial_position: Units,

    /// Multiplier applied to every returned setpoint.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_threshold() -> Units {
    Units(DEFAULT_POSITION_THRESHOLD)
}

fn default_scale() -> f32 {
    1.0
}

impl AxisConfig {
    /// Resolve the kinematic limits for this axis.
    pub fn limits(&self) -> ProfileLimits {
        ProfileLimits {
            max_velocity: self.max_velocity.0,
            acceleration: self.acceleration.0,
            deceleration: self.deceleration.unwrap_or(self.acceleration).0,
            position_threshold: self.position_threshold.0,
        }
    }

    /// Check if this axis brakes at a different rate than it accelerates.
    pub fn is_asymmetric(&self) -> bool {
        self.deceleration
            .map(|d| d != self.acceleration)
            .unwrap_or(false)
    }
}
