//! Pure kinematic helpers shared by both profile modes.
//!
//! Everything here is a function of its arguments only, so the update step
//! can re-derive its phase on every tick.

use libm::{fabsf, sqrtf};

/// Distance needed to brake from `velocity` to rest at `deceleration`.
#[inline]
pub fn stopping_distance(velocity: f32, deceleration: f32) -> f32 {
    velocity * velocity / (2.0 * deceleration)
}

/// Stopping-distance test: must braking begin now to stop within
/// `remaining`?
#[inline]
pub fn must_brake(velocity: f32, remaining: f32, deceleration: f32) -> bool {
    stopping_distance(velocity, deceleration) >= fabsf(remaining)
}

/// Signed acceleration that moves `current` velocity toward `target`.
///
/// Moving toward zero speed uses the deceleration limit, moving away from
/// zero uses the acceleration limit, independent of travel direction.
pub fn select_acceleration(current: f32, target: f32, acceleration: f32, deceleration: f32) -> f32 {
    if target < current {
        if current >= 0.0 {
            -deceleration
        } else {
            -acceleration
        }
    } else if current < 0.0 {
        deceleration
    } else {
        acceleration
    }
}

/// Sign of `value` as `1.0` or `-1.0`; zero counts as positive.
#[inline]
pub fn direction(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Clamp `value` to `[-limit, limit]`.
#[inline]
pub fn clamp_magnitude(value: f32, limit: f32) -> f32 {
    if value > limit {
        limit
    } else if value < -limit {
        -limit
    } else {
        value
    }
}

/// Time to settle through the arrival deadzone from its edge.
#[inline]
pub fn deadzone_time(threshold: f32, deceleration: f32) -> f32 {
    sqrtf(2.0 * threshold / deceleration)
}

/// Lowest cruise velocity that covers `distance` from rest to rest within
/// `time` using a trapezoidal profile.
///
/// Solves `time = distance / v + v / (2a) + v / (2d)` for `v`. Returns `None`
/// when no real solution exists, i.e. the move cannot finish in time at any
/// velocity.
pub fn cruise_velocity_for(distance: f32, time: f32, acceleration: f32, deceleration: f32) -> Option<f32> {
    if time.is_nan() || time <= 0.0 {
        return None;
    }

    let k = 1.0 / acceleration + 1.0 / deceleration;
    let discriminant = time * time - 2.0 * fabsf(distance) * k;
    if discriminant < 0.0 {
        return None;
    }

    Some((time - sqrtf(discriminant)) / k)
}

/// Minimum rest-to-rest time for `distance` under the given limits.
///
/// Triangular when `max_velocity` is never reached, trapezoidal otherwise.
pub fn minimum_duration(distance: f32, max_velocity: f32, acceleration: f32, deceleration: f32) -> f32 {
    let distance = fabsf(distance);
    let ramp_distance =
        stopping_distance(max_velocity, acceleration) + stopping_distance(max_velocity, deceleration);

    if ramp_distance >= distance {
        // Peak velocity v satisfies v²/2a + v²/2d = distance
        let peak = sqrtf(2.0 * distance * acceleration * deceleration / (acceleration + deceleration));
        peak / acceleration + peak / deceleration
    } else {
        max_velocity / acceleration
            + max_velocity / deceleration
            + (distance - ramp_distance) / max_velocity
    }
}
