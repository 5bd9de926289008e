//! Builder pattern for MotionProfile.

use crate::config::units::{Units, UnitsPerSec, UnitsPerSecSquared};
use crate::config::{AxisConfig, ProfileLimits, SystemConfig, DEFAULT_POSITION_THRESHOLD};
use crate::error::{ConfigError, Error, Result};

use super::profile::MotionProfile;

/// Builder for creating MotionProfile instances.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    max_velocity: Option<UnitsPerSec>,
    acceleration: Option<UnitsPerSecSquared>,
    deceleration: Option<UnitsPerSecSquared>,
    position_threshold: Units,
    initial_position: Units,
    scale: f32,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            max_velocity: None,
            acceleration: None,
            deceleration: None,
            position_threshold: Units(DEFAULT_POSITION_THRESHOLD),
            initial_position: Units(0.0),
            scale: 1.0,
        }
    }

    /// Set maximum velocity in units per second.
    pub fn max_velocity(mut self, velocity: UnitsPerSec) -> Self {
        self.max_velocity = Some(velocity);
        self
    }

    /// Set acceleration in units per second squared.
    pub fn acceleration(mut self, acceleration: UnitsPerSecSquared) -> Self {
        self.acceleration = Some(acceleration);
        self
    }

    /// Set deceleration in units per second squared.
    ///
    /// Defaults to the acceleration when not set.
    pub fn deceleration(mut self, deceleration: UnitsPerSecSquared) -> Self {
        self.deceleration = Some(deceleration);
        self
    }

    /// Set the arrival deadzone.
    pub fn position_threshold(mut self, threshold: Units) -> Self {
        self.position_threshold = threshold;
        self
    }

    /// Set the starting position.
    pub fn initial_position(mut self, position: Units) -> Self {
        self.initial_position = position;
        self
    }

    /// Set the output scale.
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Configure from an AxisConfig.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.max_velocity = Some(config.max_velocity);
        self.acceleration = Some(config.acceleration);
        self.deceleration = config.deceleration;
        self.position_threshold = config.position_threshold;
        self.initial_position = config.initial_position;
        self.scale = config.scale;
        self
    }

    /// Configure from SystemConfig by axis name.
    pub fn from_config(self, config: &SystemConfig, axis_name: &str) -> Result<Self> {
        let axis_config = config.axis(axis_name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                heapless::String::try_from(axis_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_axis_config(axis_config))
    }

    /// Build the MotionProfile, settled at the initial position.
    ///
    /// # Errors
    ///
    /// Returns an error if a required rate is missing or any value fails
    /// validation.
    pub fn build(self) -> Result<MotionProfile> {
        let max_velocity = self
            .max_velocity
            .ok_or(Error::Config(ConfigError::MissingField("max_velocity")))?;

        let acceleration = self
            .acceleration
            .ok_or(Error::Config(ConfigError::MissingField("acceleration")))?;

        let limits = ProfileLimits {
            max_velocity: max_velocity.0,
            acceleration: acceleration.0,
            deceleration: self.deceleration.unwrap_or(acceleration).0,
            position_threshold: self.position_threshold.0,
        };

        let mut profile = MotionProfile::new(limits)?;
        profile.set_scale(self.scale)?;
        profile.reset(self.initial_position.0);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::UnitExt;

    #[test]
    fn test_build_symmetric() {
        let profile = ProfileBuilder::new()
            .max_velocity(90.0_f32.units_per_sec())
            .acceleration(45.0_f32.units_per_sec_squared())
            .initial_position(10.0_f32.units())
            .build()
            .unwrap();

        assert_eq!(profile.max_velocity(), 90.0);
        assert_eq!(profile.deceleration(), 45.0);
        assert_eq!(profile.position_threshold(), DEFAULT_POSITION_THRESHOLD);
        assert_eq!(profile.position(), 10.0);
        assert!(profile.ready());
    }

    #[test]
    fn test_build_asymmetric_scaled() {
        let profile = ProfileBuilder::new()
            .max_velocity(100.0_f32.units_per_sec())
            .acceleration(40.0_f32.units_per_sec_squared())
            .deceleration(80.0_f32.units_per_sec_squared())
            .scale(2.0)
            .initial_position(1.5_f32.units())
            .build()
            .unwrap();

        assert!(profile.limits().is_asymmetric());
        assert_eq!(profile.output(), 3.0);
    }

    #[test]
    fn test_missing_fields() {
        let err = ProfileBuilder::new()
            .acceleration(10.0_f32.units_per_sec_squared())
            .build()
            .unwrap_err();
        assert_eq!(err, Error::Config(ConfigError::MissingField("max_velocity")));

        let err = ProfileBuilder::new()
            .max_velocity(10.0_f32.units_per_sec())
            .build()
            .unwrap_err();
        assert_eq!(err, Error::Config(ConfigError::MissingField("acceleration")));
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let result = ProfileBuilder::new()
            .max_velocity(10.0_f32.units_per_sec())
            .acceleration(10.0_f32.units_per_sec_squared())
            .scale(f32::NAN)
            .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidScale(_)))
        ));
    }

    #[test]
    fn test_unknown_axis() {
        let config = SystemConfig::default();
        let result = ProfileBuilder::new().from_config(&config, "tilt");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::AxisNotFound(_)))
        ));
    }
}
