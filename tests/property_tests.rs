//! Property-based tests for motion profiles.
//!
//! Random limits, targets and tick lengths must never break the velocity
//! bound, overshoot a position target or leave a move unfinished.

use proptest::prelude::*;
use servo_trajectory::{MotionProfile, ProfileLimits};

const MAX_TICKS: u32 = 200_000;

fn limits() -> impl Strategy<Value = ProfileLimits> {
    (5.0f32..100.0, 5.0f32..200.0, 5.0f32..200.0, 0.01f32..1.0).prop_map(
        |(max_velocity, acceleration, deceleration, threshold)| {
            ProfileLimits::new(max_velocity, acceleration)
                .with_deceleration(deceleration)
                .with_threshold(threshold)
        },
    )
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(128))]

    /// A move from rest stays between start and target and finishes on it.
    #[test]
    fn prop_position_move_never_overshoots(
        limits in limits(),
        target in -200.0f32..200.0,
        dt in 0.002f32..0.2,
    ) {
        let mut p = MotionProfile::new(limits).unwrap();
        p.set_target_position(target);

        let (low, high) = if target < 0.0 { (target, 0.0) } else { (0.0, target) };
        let mut ticks = 0;
        while !p.ready() && ticks < MAX_TICKS {
            let out = p.update(dt);
            prop_assert!(out >= low && out <= high, "left [{}, {}] at {}", low, high, out);
            prop_assert!(p.velocity().abs() <= limits.max_velocity);
            ticks += 1;
        }

        prop_assert!(p.ready(), "not settled after {} ticks", ticks);
        prop_assert_eq!(p.position(), target);
        prop_assert_eq!(p.velocity(), 0.0);
    }

    /// Re-targeting at arbitrary points keeps velocity bounded and the
    /// per-tick change within the larger rate limit.
    #[test]
    fn prop_retarget_respects_limits(
        limits in limits(),
        targets in proptest::collection::vec(-200.0f32..200.0, 1..6),
        hold in 1u32..200,
        dt in 0.002f32..0.05,
    ) {
        let mut p = MotionProfile::new(limits).unwrap();
        let max_step = limits.acceleration.max(limits.deceleration) * dt + 1e-3;

        for target in targets {
            p.set_target_position(target);
            let mut previous = p.velocity();
            for _ in 0..hold {
                p.update(dt);
                if p.ready() {
                    break;
                }
                prop_assert!(p.velocity().abs() <= limits.max_velocity);
                prop_assert!((p.velocity() - previous).abs() <= max_step);
                previous = p.velocity();
            }
        }
    }

    /// Velocity targets are clamped and the velocity never exceeds the limit.
    #[test]
    fn prop_velocity_mode_bounded(
        limits in limits(),
        targets in proptest::collection::vec(-500.0f32..500.0, 1..6),
        dt in 0.002f32..0.5,
    ) {
        let mut p = MotionProfile::new(limits).unwrap();

        for target in targets {
            p.set_target_velocity(target);
            for _ in 0..50 {
                p.update(dt);
                prop_assert!(p.velocity().abs() <= limits.max_velocity);
                prop_assert!(p.position().is_finite());
            }
            prop_assert!(!p.ready());
        }
    }

    /// Deadline feasibility agrees with the resulting velocity ceiling.
    #[test]
    fn prop_deadline_result_matches_ceiling(
        limits in limits(),
        target in -200.0f32..200.0,
        seconds in 0.01f32..60.0,
    ) {
        let mut p = MotionProfile::new(limits).unwrap();
        let feasible = p.set_target_position_with_deadline(target, seconds);

        prop_assert!(p.velocity_ceiling() <= limits.max_velocity);
        if feasible {
            prop_assert!(p.velocity_ceiling() < limits.max_velocity);
        } else {
            prop_assert_eq!(p.velocity_ceiling(), limits.max_velocity);
        }
    }
}
