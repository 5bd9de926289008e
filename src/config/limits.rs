//! Kinematic limits for a motion profile.

use crate::error::ConfigError;

/// Default deadzone around the target, in position units.
pub const DEFAULT_POSITION_THRESHOLD: f32 = 0.1;

/// Velocity and acceleration limits plus arrival deadzone.
///
/// A profile only ever holds limits that passed [`ProfileLimits::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileLimits {
    /// Maximum velocity magnitude in units/sec.
    pub max_velocity: f32,

    /// Acceleration rate in units/sec², used when speeding up.
    pub acceleration: f32,

    /// Deceleration rate in units/sec², used when braking.
    pub deceleration: f32,

    /// Position error below which the axis is considered arrived. Also used
    /// as the velocity deadzone in velocity mode.
    pub position_threshold: f32,
}

impl ProfileLimits {
    /// Create symmetric limits (deceleration equals acceleration) with the
    /// default threshold.
    pub fn new(max_velocity: f32, acceleration: f32) -> Self {
        Self {
            max_velocity,
            acceleration,
            deceleration: acceleration,
            position_threshold: DEFAULT_POSITION_THRESHOLD,
        }
    }

    /// Set an independent deceleration rate.
    pub fn with_deceleration(mut self, deceleration: f32) -> Self {
        self.deceleration = deceleration;
        self
    }

    /// Set the arrival deadzone.
    pub fn with_threshold(mut self, position_threshold: f32) -> Self {
        self.position_threshold = position_threshold;
        self
    }

    /// Check whether acceleration and deceleration differ.
    pub fn is_asymmetric(&self) -> bool {
        self.acceleration != self.deceleration
    }

    /// Validate the limits.
    ///
    /// # Errors
    ///
    /// Rates must be finite and strictly positive, the threshold finite and
    /// non-negative. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.max_velocity) {
            return Err(ConfigError::InvalidMaxVelocity(self.max_velocity));
        }
        if !is_positive(self.acceleration) {
            return Err(ConfigError::InvalidAcceleration(self.acceleration));
        }
        if !is_positive(self.deceleration) {
            return Err(ConfigError::InvalidDeceleration(self.deceleration));
        }
        if !self.position_threshold.is_finite() || self.position_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.position_threshold));
        }
        Ok(())
    }
}

#[inline]
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
