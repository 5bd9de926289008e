//! Blocking fixed-rate driver for a profile.

use embedded_hal::delay::DelayNs;
use libm::fabsf;

use crate::error::{MotionError, Result};
use crate::feedback::Setpoint;

use super::profile::{MotionProfile, Target};

/// Tick `profile` every `tick_ms` milliseconds until it is ready.
///
/// Each tick waits on `delay`, advances the profile by one period and hands
/// the new setpoint to `sink`. Returns the number of ticks executed.
///
/// # Errors
///
/// Returns `MotionError::InvalidTickPeriod` for a zero period and
/// `MotionError::Timeout` if the profile is still busy after `max_ticks`.
/// A velocity target never settles, so it always times out.
pub fn run_to_ready<D, F>(
    profile: &mut MotionProfile,
    delay: &mut D,
    tick_ms: u32,
    max_ticks: u32,
    mut sink: F,
) -> Result<u32>
where
    D: DelayNs,
    F: FnMut(Setpoint),
{
    if tick_ms == 0 {
        return Err(MotionError::InvalidTickPeriod.into());
    }

    let dt_ms = tick_ms as f32;
    let mut ticks = 0;

    while !profile.ready() {
        if ticks >= max_ticks {
            let remaining = match profile.target() {
                Target::Position(t) => fabsf(t - profile.position()),
                Target::Velocity(_) => f32::INFINITY,
            };
            warn!("profile busy after {} ticks", ticks);
            return Err(MotionError::Timeout { ticks, remaining }.into());
        }

        delay.delay_ms(tick_ms);
        profile.update_millis(dt_ms);
        sink(profile.setpoint());
        ticks += 1;
    }

    Ok(ticks)
}
