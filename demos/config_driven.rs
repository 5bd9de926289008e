//! Example: Configuration-driven command sequences.
//!
//! This example demonstrates how to:
//! - Load axis limits and command sequences from TOML
//! - Build profiles from named axes
//! - Run a named sequence through the SequenceRegistry
//! - Drive a profile with the blocking runner
//!
//! Run with: `cargo run --example config_driven --features std`

use servo_trajectory::{
    error::Result, parse_config, run_to_ready, ProfileBuilder, SequenceRegistry,
};

/// Delay that returns immediately, standing in for a hardware timer.
struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // In real code, this would actually delay
    }
}

const TOML_CONTENT: &str = r#"
[axes.pan]
name = "pan"
max_velocity_per_sec = 180.0
acceleration_per_sec2 = 360.0
deceleration_per_sec2 = 720.0
position_threshold = 0.05

[axes.tilt]
name = "tilt"
max_velocity_per_sec = 60.0
acceleration_per_sec2 = 120.0
initial_position = 15.0
# Output in encoder counts rather than degrees
scale = 11.377

[sequences.scan]
axis = "pan"
dwell_ms = 250
commands = [
    { move_to = { position = 90.0 } },
    { move_within = { position = -90.0, seconds = 2.5 } },
    { move_within = { position = 0.0, seconds = 0.2 } },
]

[sequences.nod]
axis = "tilt"
commands = [
    { move_to = { position = -15.0 } },
    { move_to = { position = 15.0 } },
]
"#;

const DT: f32 = 0.01;

fn main() -> Result<()> {
    println!("=== Configuration-Driven Sequence Example ===\n");

    let config = parse_config(TOML_CONTENT)?;

    println!("Axes:");
    for name in config.axis_names() {
        if let Some(axis) = config.axis(name) {
            let limits = axis.limits();
            println!(
                "  - {}: vmax {} u/s, accel {} u/s², decel {} u/s² [{}]",
                name,
                limits.max_velocity,
                limits.acceleration,
                limits.deceleration,
                if axis.is_asymmetric() { "asymmetric" } else { "symmetric" }
            );
        }
    }
    println!();

    let registry = SequenceRegistry::from_config(&config);

    for name in registry.names() {
        let Some(sequence) = registry.get(name) else {
            continue;
        };
        let mut profile = ProfileBuilder::new()
            .from_config(&config, sequence.axis.as_str())?
            .build()?;
        let mut sequencer = registry.sequencer(name)?;

        println!("Sequence '{}' on '{}' ({} commands)", name, sequence.axis, sequencer.len());

        let mut elapsed = 0.0;
        let mut last_active = None;
        while !sequencer.is_idle(&profile) {
            let out = sequencer.tick(&mut profile, DT);
            elapsed += DT;
            if sequencer.active() != last_active.as_ref() {
                last_active = sequencer.active().copied();
                if let Some(command) = last_active {
                    println!("  t={:>5.2}s  out={:>9.3}  -> {:?}", elapsed, out, command);
                }
            }
        }
        println!(
            "  done at t={:.2}s, output {:.3}, late moves: {}\n",
            elapsed,
            profile.output(),
            sequencer.missed_deadlines()
        );
    }

    // Blocking runner for a single move
    let mut tilt = ProfileBuilder::new().from_config(&config, "tilt")?.build()?;
    tilt.set_target_position(45.0);
    let mut peak_velocity: f32 = 0.0;
    let ticks = run_to_ready(&mut tilt, &mut NoDelay, 10, 1_000, |setpoint| {
        peak_velocity = peak_velocity.max(setpoint.velocity.abs());
    })?;
    println!(
        "Runner: tilt reached {:.3} counts in {} ticks (peak {:.1} counts/s)",
        tilt.output(),
        ticks,
        peak_velocity
    );

    Ok(())
}
