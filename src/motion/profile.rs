//! Motion profile state and update step.
//!
//! A [`MotionProfile`] follows either a position target, producing a
//! trapezoidal (or triangular) velocity curve with parabolic position blends,
//! or a velocity target, ramping to the commanded speed and integrating
//! position indefinitely.
//!
//! The profile never stores its phase. Every update re-derives whether it is
//! speeding up or braking from the stopping-distance test, so limits changed
//! mid-motion take effect on the next tick.

use libm::fabsf;

use crate::config::units::Seconds;
use crate::config::ProfileLimits;
use crate::error::{ConfigError, Result};
use crate::feedback::Setpoint;

use super::clock::MonotonicClock;
use super::kinematics::{
    clamp_magnitude, cruise_velocity_for, deadzone_time, direction, minimum_duration, must_brake,
    select_acceleration,
};

/// What the profile is steering toward.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// Come to rest at this position.
    Position(f32),
    /// Hold this velocity (units/sec) indefinitely.
    Velocity(f32),
}

impl Target {
    /// Raw target value, position or velocity depending on the mode.
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            Target::Position(p) => p,
            Target::Velocity(v) => v,
        }
    }
}

/// Phase of motion as derived from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Speeding up toward the velocity ceiling.
    Accelerating,
    /// Moving at the velocity ceiling.
    Cruising,
    /// Slowing down, either to stop at the target or to reverse toward it.
    Braking,
    /// Following a velocity target.
    Tracking,
    /// No outstanding motion task.
    Settled,
}

/// Single-axis motion profile generator.
#[derive(Debug, Clone)]
pub struct MotionProfile {
    limits: ProfileLimits,
    target: Target,
    position: f32,
    velocity: f32,
    /// Cruise velocity required by a timed move, if any.
    deadline_velocity: Option<f32>,
    scale: f32,
    settled: bool,
    /// Last position that came out of an update finite.
    last_finite: f32,
    last_update_us: Option<u64>,
}

impl MotionProfile {
    /// Create a settled profile at position 0.
    ///
    /// No clocked-update baseline is recorded here, so the first
    /// [`update_from`](Self::update_from) advances by zero unless
    /// [`sync_clock`](Self::sync_clock) is called first.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `limits` fail validation.
    pub fn new(limits: ProfileLimits) -> Result<Self> {
        limits.validate()?;

        Ok(Self {
            limits,
            target: Target::Position(0.0),
            position: 0.0,
            velocity: 0.0,
            deadline_velocity: None,
            scale: 1.0,
            settled: true,
            last_finite: 0.0,
            last_update_us: None,
        })
    }

    // ---------------------------------------------------------------------
    // Targets
    // ---------------------------------------------------------------------

    /// Move to `target` at up to the full velocity limit.
    ///
    /// Current position and velocity carry over, so re-targeting mid-motion
    /// never introduces a velocity jump.
    pub fn set_target_position(&mut self, target: f32) {
        trace!("target position {}", target);
        self.target = Target::Position(target);
        self.deadline_velocity = None;
        self.settled = false;
    }

    /// Move to `target` and set the output scale in one call.
    ///
    /// # Errors
    ///
    /// Rejects a non-finite scale without changing the target.
    pub fn set_target_position_scaled(&mut self, target: f32, scale: f32) -> Result<()> {
        self.set_scale(scale)?;
        self.set_target_position(target);
        Ok(())
    }

    /// Move to `target`, arriving `seconds` from now if the limits allow.
    ///
    /// Picks the lowest cruise velocity that still covers the distance in
    /// time, allowing for the settling time through the deadzone. Returns
    /// `true` when that velocity is below the velocity limit. Otherwise the
    /// move runs at full speed and arrives late; `false` is advisory only.
    pub fn set_target_position_with_deadline(&mut self, target: f32, seconds: f32) -> bool {
        self.set_target_position(target);

        let l = self.limits;
        let budget = seconds + deadzone_time(l.position_threshold, l.deceleration);
        let distance = target - self.position;

        match cruise_velocity_for(distance, budget, l.acceleration, l.deceleration) {
            Some(v) => {
                let v = v.clamp(0.0, l.max_velocity);
                self.deadline_velocity = Some(v);
                v < l.max_velocity
            }
            None => {
                debug!(
                    "deadline {} s infeasible, needs at least {} s",
                    seconds,
                    minimum_duration(distance, l.max_velocity, l.acceleration, l.deceleration)
                );
                false
            }
        }
    }

    /// Follow a velocity target, clamped to the velocity limit.
    ///
    /// A velocity task never settles on its own; only a new position target
    /// or [`reset`](Self::reset) makes the profile ready again.
    pub fn set_target_velocity(&mut self, target: f32) {
        let target = clamp_magnitude(target, self.limits.max_velocity);
        trace!("target velocity {}", target);
        self.target = Target::Velocity(target);
        self.deadline_velocity = None;
        self.settled = false;
    }

    // ---------------------------------------------------------------------
    // Update step
    // ---------------------------------------------------------------------

    /// Advance the profile by `dt` seconds and return the scaled position.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn update(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        match self.target {
            Target::Position(target) => self.step_position(target, dt),
            Target::Velocity(target) => self.step_velocity(target, dt),
        }

        if self.position.is_finite() && self.velocity.is_finite() && self.target.value().is_finite() {
            self.last_finite = self.position;
        } else {
            self.recover();
        }

        self.output()
    }

    /// Advance the profile by `dt_ms` milliseconds.
    pub fn update_millis(&mut self, dt_ms: f32) -> f32 {
        self.update(Seconds::from_millis(dt_ms).value())
    }

    /// Advance the profile by the time elapsed on `clock` since the last
    /// clocked update.
    ///
    /// The first call after construction or [`reset`](Self::reset) only
    /// records the baseline and advances by zero, unless
    /// [`sync_clock`](Self::sync_clock) set one.
    pub fn update_from<C: MonotonicClock>(&mut self, clock: &C) -> f32 {
        let now = clock.now_micros();
        let elapsed = self
            .last_update_us
            .map(|last| now.saturating_sub(last))
            .unwrap_or(0);
        self.last_update_us = Some(now);
        self.update(Seconds::from_micros(elapsed).value())
    }

    /// Record the current time on `clock` as the clocked-update baseline.
    pub fn sync_clock<C: MonotonicClock>(&mut self, clock: &C) {
        self.last_update_us = Some(clock.now_micros());
    }

    fn step_position(&mut self, target: f32, dt: f32) {
        if self.settled {
            return;
        }

        let l = self.limits;
        let error = target - self.position;

        if fabsf(error) <= l.position_threshold {
            self.velocity = 0.0;
            self.position = target;
            self.settled = true;
            debug!("arrived at {}", target);
            return;
        }

        // Beyond the plain stopping-distance rule: moving away brakes at the
        // deceleration rate, braking never flips sign within one tick, and
        // the snap only fires toward the target.
        let dir = direction(error);
        let approaching = self.velocity * error >= 0.0;
        let braking = approaching && must_brake(self.velocity, error, l.deceleration);

        let accel = if !approaching {
            // Heading away from the target: brake through zero first
            l.deceleration
        } else if braking {
            -l.deceleration
        } else {
            l.acceleration
        };

        let mut velocity = self.velocity + dir * accel * dt;
        if braking && velocity * dir < 0.0 {
            // A long tick must not turn a stop into a reversal
            velocity = 0.0;
        }
        self.velocity = clamp_magnitude(velocity, self.velocity_ceiling());

        let step = self.velocity * dt;
        if step * error > 0.0 && fabsf(step) >= fabsf(error) {
            self.position = target;
        } else {
            self.position += step;
        }
    }

    fn step_velocity(&mut self, target: f32, dt: f32) {
        let l = self.limits;
        let error = target - self.velocity;

        if fabsf(error) <= l.position_threshold {
            self.velocity = target;
        } else {
            let dv = select_acceleration(self.velocity, target, l.acceleration, l.deceleration) * dt;
            if fabsf(dv) < fabsf(error) {
                self.velocity += dv;
            } else {
                self.velocity = target;
            }
        }

        self.velocity = clamp_magnitude(self.velocity, l.max_velocity);
        self.position += self.velocity * dt;
    }

    /// Restore a usable state after the update produced a non-finite value.
    fn recover(&mut self) {
        let fallback = match self.target {
            Target::Position(t) if t.is_finite() => t,
            _ => self.last_finite,
        };
        warn!("non-finite profile state, holding at {}", fallback);

        self.position = fallback;
        self.velocity = 0.0;

        if !self.target.value().is_finite() {
            self.target = Target::Position(fallback);
            self.deadline_velocity = None;
            self.settled = true;
        }
    }

    // ---------------------------------------------------------------------
    // Reset / direct set
    // ---------------------------------------------------------------------

    /// Stop dead at `position` with no outstanding task.
    ///
    /// Limits and scale are kept. The clocked-update baseline restarts.
    pub fn reset(&mut self, position: f32) {
        self.position = position;
        self.velocity = 0.0;
        self.target = Target::Position(position);
        self.deadline_velocity = None;
        self.settled = true;
        self.last_finite = position;
        self.last_update_us = None;
    }

    /// Overwrite the current position only.
    ///
    /// Velocity, target and readiness are untouched, so an in-flight move
    /// continues from the corrected position.
    pub fn set_position(&mut self, position: f32) {
        self.position = position;
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Check if there is no outstanding motion task.
    #[inline]
    pub fn ready(&self) -> bool {
        self.settled
    }

    /// Current (unscaled) position.
    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Current velocity in units/sec.
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Active target.
    #[inline]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Current position multiplied by the output scale.
    #[inline]
    pub fn output(&self) -> f32 {
        self.position * self.scale
    }

    /// Scaled position and velocity for a downstream consumer.
    pub fn setpoint(&self) -> Setpoint {
        Setpoint {
            position: self.position * self.scale,
            velocity: self.velocity * self.scale,
        }
    }

    /// Velocity cap in effect for the current position move.
    #[inline]
    pub fn velocity_ceiling(&self) -> f32 {
        let max = self.limits.max_velocity;
        self.deadline_velocity.map_or(max, |v| v.min(max))
    }

    /// Phase of motion derived from the current state.
    pub fn phase(&self) -> MotionPhase {
        if self.settled {
            return MotionPhase::Settled;
        }

        match self.target {
            Target::Velocity(_) => MotionPhase::Tracking,
            Target::Position(target) => {
                let error = target - self.position;
                let approaching = self.velocity * error >= 0.0;
                if !approaching || must_brake(self.velocity, error, self.limits.deceleration) {
                    MotionPhase::Braking
                } else if fabsf(self.velocity) >= self.velocity_ceiling() {
                    MotionPhase::Cruising
                } else {
                    MotionPhase::Accelerating
                }
            }
        }
    }

    /// Minimum rest-to-rest time to cover `distance` at the full limits.
    pub fn minimum_duration(&self, distance: f32) -> f32 {
        let l = self.limits;
        minimum_duration(distance, l.max_velocity, l.acceleration, l.deceleration)
    }

    /// Output scale.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    // ---------------------------------------------------------------------
    // Limits
    // ---------------------------------------------------------------------

    /// Current limits.
    #[inline]
    pub fn limits(&self) -> &ProfileLimits {
        &self.limits
    }

    /// Maximum velocity in units/sec.
    #[inline]
    pub fn max_velocity(&self) -> f32 {
        self.limits.max_velocity
    }

    /// Acceleration in units/sec².
    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.limits.acceleration
    }

    /// Deceleration in units/sec².
    #[inline]
    pub fn deceleration(&self) -> f32 {
        self.limits.deceleration
    }

    /// Arrival deadzone.
    #[inline]
    pub fn position_threshold(&self) -> f32 {
        self.limits.position_threshold
    }

    /// Replace all limits at once.
    ///
    /// A velocity target above the new velocity limit is clamped to it.
    ///
    /// # Errors
    ///
    /// Returns a configuration error and keeps the old limits if `limits`
    /// fail validation.
    pub fn set_limits(&mut self, limits: ProfileLimits) -> Result<()> {
        limits.validate()?;
        self.limits = limits;

        if let Target::Velocity(v) = self.target {
            self.target = Target::Velocity(clamp_magnitude(v, limits.max_velocity));
        }
        Ok(())
    }

    /// Set the velocity limit.
    pub fn set_max_velocity(&mut self, max_velocity: f32) -> Result<()> {
        self.set_limits(ProfileLimits {
            max_velocity,
            ..self.limits
        })
    }

    /// Set the acceleration rate. Deceleration is left as is.
    pub fn set_acceleration(&mut self, acceleration: f32) -> Result<()> {
        self.set_limits(ProfileLimits {
            acceleration,
            ..self.limits
        })
    }

    /// Set the deceleration rate.
    pub fn set_deceleration(&mut self, deceleration: f32) -> Result<()> {
        self.set_limits(ProfileLimits {
            deceleration,
            ..self.limits
        })
    }

    /// Set the arrival deadzone.
    pub fn set_position_threshold(&mut self, position_threshold: f32) -> Result<()> {
        self.set_limits(ProfileLimits {
            position_threshold,
            ..self.limits
        })
    }

    /// Set the output scale.
    ///
    /// # Errors
    ///
    /// Rejects a non-finite scale.
    pub fn set_scale(&mut self, scale: f32) -> Result<()> {
        if !scale.is_finite() {
            return Err(ConfigError::InvalidScale(scale).into());
        }
        self.scale = scale;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn profile(max_velocity: f32, accel: f32, decel: f32, threshold: f32) -> MotionProfile {
        let limits = ProfileLimits::new(max_velocity, accel)
            .with_deceleration(decel)
            .with_threshold(threshold);
        MotionProfile::new(limits).unwrap()
    }

    #[test]
    fn test_new_profile_is_settled_at_origin() {
        let p = profile(50.0, 50.0, 50.0, 0.5);

        assert!(p.ready());
        assert_eq!(p.position(), 0.0);
        assert_eq!(p.velocity(), 0.0);
        assert_eq!(p.phase(), MotionPhase::Settled);
    }

    #[test]
    fn test_new_rejects_invalid_limits() {
        let result = MotionProfile::new(ProfileLimits::new(50.0, 0.0));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidAcceleration(_)))
        ));
    }

    #[test]
    fn test_first_tick_accelerates() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);
        p.set_target_position(100.0);
        assert!(!p.ready());

        p.update(0.01);
        assert!((p.velocity() - 0.5).abs() < 1e-6);
        assert!((p.position() - 0.005).abs() < 1e-6);
        assert_eq!(p.phase(), MotionPhase::Accelerating);
    }

    #[test]
    fn test_negative_move_uses_acceleration_rate() {
        let mut p = profile(50.0, 20.0, 80.0, 0.5);
        p.set_target_position(-100.0);

        p.update(0.01);
        assert!((p.velocity() + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_arrival_snaps_and_settles() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);
        p.set_target_position(0.3);

        p.update(0.01);
        assert!(p.ready());
        assert_eq!(p.position(), 0.3);
        assert_eq!(p.velocity(), 0.0);
    }

    #[test]
    fn test_large_tick_snaps_to_target() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);
        p.set_target_position(10.0);

        // One 500 ms tick: v = 25, step = 12.5 > 10
        let out = p.update(0.5);
        assert_eq!(out, 10.0);
        assert_eq!(p.position(), 10.0);

        p.update(0.5);
        assert!(p.ready());
    }

    #[test]
    fn test_reversal_brakes_through_zero() {
        let mut p = profile(50.0, 10.0, 40.0, 0.1);
        p.set_target_velocity(20.0);
        for _ in 0..200 {
            p.update(0.01);
        }
        assert!((p.velocity() - 20.0).abs() < 1e-3);

        // Target behind the axis: slow down at the deceleration rate
        let position = p.position();
        p.set_target_position(position - 50.0);
        assert_eq!(p.phase(), MotionPhase::Braking);

        let before = p.velocity();
        p.update(0.01);
        assert!((before - p.velocity() - 0.4).abs() < 1e-3);

        for _ in 0..2_000 {
            p.update(0.01);
            assert!(p.velocity().abs() <= 50.0);
        }
        assert!(p.ready());
        assert!((p.position() - (position - 50.0)).abs() < 1e-3);
    }

    fn spinning_at(velocity: f32) -> MotionProfile {
        let mut p = profile(50.0, 50.0, 50.0, 0.05);
        p.set_target_velocity(velocity);
        for _ in 0..100 {
            p.update(0.01);
        }
        assert_eq!(p.velocity(), velocity);
        p
    }

    #[test]
    fn test_target_just_behind_brakes_without_snap() {
        let mut p = spinning_at(-20.0);
        let start = p.position();
        let target = start + 0.1;
        p.set_target_position(target);

        p.update(0.01);

        // Slows at the deceleration rate and keeps coasting away
        assert!((p.velocity() + 19.5).abs() < 1e-4);
        assert!((p.position() - (start - 0.195)).abs() < 1e-3);
        assert!(!p.ready());
        assert_eq!(p.phase(), MotionPhase::Braking);
    }

    #[test]
    fn test_long_braking_tick_stops_at_zero() {
        let mut p = spinning_at(20.0);
        let start = p.position();
        // Inside the stopping distance of 4
        p.set_target_position(start + 3.0);

        p.update(0.5);

        assert_eq!(p.velocity(), 0.0);
        assert_eq!(p.position(), start);
        assert!(!p.ready());
    }

    #[test]
    fn test_deadline_lowers_ceiling() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);

        assert!(p.set_target_position_with_deadline(100.0, 10.0));
        assert!(p.velocity_ceiling() < 50.0);
        assert!(p.velocity_ceiling() > 0.0);

        // A plain target restores the full ceiling
        p.set_target_position(100.0);
        assert_eq!(p.velocity_ceiling(), 50.0);
    }

    #[test]
    fn test_deadline_infeasible_keeps_full_speed() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);

        assert!(!p.set_target_position_with_deadline(100.0, 1.0));
        assert_eq!(p.velocity_ceiling(), 50.0);
        assert!(!p.ready());
    }

    #[test]
    fn test_velocity_target_is_clamped() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);

        p.set_target_velocity(80.0);
        assert_eq!(p.target(), Target::Velocity(50.0));

        p.set_target_velocity(-80.0);
        assert_eq!(p.target(), Target::Velocity(-50.0));
    }

    #[test]
    fn test_velocity_mode_never_settles() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);
        p.set_target_velocity(0.0);

        for _ in 0..100 {
            p.update(0.01);
        }
        assert!(!p.ready());
        assert_eq!(p.phase(), MotionPhase::Tracking);

        p.reset(3.0);
        assert!(p.ready());
        assert_eq!(p.target(), Target::Position(3.0));
    }

    #[test]
    fn test_scale_applies_to_output_only() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);
        p.set_target_position_scaled(10.0, 2.0).unwrap();

        for _ in 0..1_000 {
            p.update(0.01);
        }
        assert!(p.ready());
        assert_eq!(p.position(), 10.0);
        assert_eq!(p.output(), 20.0);
        assert_eq!(p.setpoint().position, 20.0);
    }

    #[test]
    fn test_rejects_non_finite_scale() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);

        assert!(p.set_target_position_scaled(10.0, f32::NAN).is_err());
        assert_eq!(p.scale(), 1.0);
        assert!(p.ready());
    }

    #[test]
    fn test_set_position_keeps_task() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);
        p.set_target_position(100.0);
        for _ in 0..50 {
            p.update(0.01);
        }
        let velocity = p.velocity();

        p.set_position(40.0);
        assert_eq!(p.position(), 40.0);
        assert_eq!(p.velocity(), velocity);
        assert!(!p.ready());
    }

    #[test]
    fn test_non_finite_dt_is_ignored() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);
        p.set_target_position(100.0);

        p.update(f32::NAN);
        p.update(-1.0);
        p.update(f32::INFINITY);
        assert_eq!(p.position(), 0.0);
        assert_eq!(p.velocity(), 0.0);
    }

    #[test]
    fn test_non_finite_target_recovers() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);
        p.set_target_position(10.0);
        p.update(0.1);
        let good = p.position();

        p.set_target_position(f32::NAN);
        let out = p.update(0.1);

        assert!(out.is_finite());
        assert_eq!(p.velocity(), 0.0);
        assert!(p.ready());
        assert_eq!(p.target(), Target::Position(p.position()));
        assert!((p.position() - good).abs() < 1.0);
    }

    #[test]
    fn test_non_finite_position_recovers_to_target() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);
        p.set_target_position(10.0);
        p.set_position(f32::NAN);

        let out = p.update(0.01);
        assert_eq!(out, 10.0);
        assert_eq!(p.velocity(), 0.0);
    }

    #[test]
    fn test_limit_setters_validate() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);

        assert!(p.set_max_velocity(-1.0).is_err());
        assert!(p.set_acceleration(0.0).is_err());
        assert!(p.set_deceleration(f32::NAN).is_err());
        assert!(p.set_position_threshold(-0.1).is_err());
        assert_eq!(*p.limits(), ProfileLimits::new(50.0, 50.0).with_threshold(0.5));

        p.set_acceleration(20.0).unwrap();
        assert_eq!(p.acceleration(), 20.0);
        assert_eq!(p.deceleration(), 50.0);
    }

    #[test]
    fn test_lower_max_velocity_clamps_velocity_target() {
        let mut p = profile(50.0, 50.0, 50.0, 0.5);
        p.set_target_velocity(40.0);

        p.set_max_velocity(30.0).unwrap();
        assert_eq!(p.target(), Target::Velocity(30.0));
    }
}
