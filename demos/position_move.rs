//! Example: Position and velocity moves on one axis.
//!
//! This example demonstrates how to:
//! - Build a profile with asymmetric acceleration and deceleration
//! - Tick it at a fixed rate and print the setpoint stream
//! - Request a timed move and check its feasibility
//! - Feed setpoints to a closed-loop corrector
//!
//! Run with: `cargo run --example position_move`

use servo_trajectory::{
    error::Result, MotionPhase, ProfileBuilder, Setpoint, UnitExt,
};

const TICK_MS: f32 = 10.0;

fn main() -> Result<()> {
    println!("=== Position Move Example ===\n");

    let mut profile = ProfileBuilder::new()
        .max_velocity(90.0_f32.units_per_sec())
        .acceleration(180.0_f32.units_per_sec_squared())
        .deceleration(360.0_f32.units_per_sec_squared())
        .position_threshold(0.05_f32.units())
        .build()?;

    println!(
        "Limits: vmax {} u/s, accel {} u/s², decel {} u/s²",
        profile.max_velocity(),
        profile.acceleration(),
        profile.deceleration()
    );
    println!(
        "Shortest possible 90-unit move: {:.3} s\n",
        profile.minimum_duration(90.0)
    );

    // Plain move, printing every 10th tick
    profile.set_target_position(90.0);
    let mut tick = 0u32;
    let mut last_phase = MotionPhase::Settled;
    while !profile.ready() {
        profile.update_millis(TICK_MS);
        let phase = profile.phase();
        if tick % 10 == 0 || phase != last_phase {
            let Setpoint { position, velocity } = profile.setpoint();
            println!(
                "  t={:>5.2}s  pos={:>8.3}  vel={:>7.2}  {:?}",
                tick as f32 * TICK_MS / 1000.0,
                position,
                velocity,
                phase
            );
        }
        last_phase = phase;
        tick += 1;
    }
    println!("Arrived at {} after {} ticks\n", profile.position(), tick);

    // Timed moves
    for seconds in [3.0, 1.0] {
        profile.reset(90.0);
        let feasible = profile.set_target_position_with_deadline(0.0, seconds);
        println!(
            "Move to 0 within {} s: {} (ceiling {:.2} u/s)",
            seconds,
            if feasible { "feasible" } else { "runs late" },
            profile.velocity_ceiling()
        );
    }
    println!();

    // Closed loop: a proportional corrector chasing the setpoint
    profile.reset(0.0);
    profile.set_target_position(30.0);
    let mut measured = 0.0_f32;
    let mut corrector = |commanded: f32, measured: f32, _dt: f32| 20.0 * (commanded - measured);
    while !profile.ready() {
        profile.update_millis(TICK_MS);
        let command = profile.setpoint().drive(&mut corrector, measured, TICK_MS / 1000.0);
        measured += command * TICK_MS / 1000.0;
    }
    println!(
        "Closed loop: commanded {:.3}, measured {:.3}",
        profile.output(),
        measured
    );

    // Velocity mode never settles on its own
    profile.set_target_velocity(-45.0);
    for _ in 0..100 {
        profile.update_millis(TICK_MS);
    }
    println!(
        "Spinning at {:.1} u/s, position {:.2}, ready = {}",
        profile.velocity(),
        profile.position(),
        profile.ready()
    );

    Ok(())
}
