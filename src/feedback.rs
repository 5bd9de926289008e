//! Hand-off points to closed-loop collaborators.
//!
//! The profile is open-loop: it only says where the axis should be. A
//! [`Corrector`] (PID or similar) owned by the host compares that with a
//! measured position and produces the actuator command.

/// Commanded state for one tick, in output (scaled) units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Setpoint {
    /// Commanded position.
    pub position: f32,
    /// Commanded velocity, usable as a feed-forward term.
    pub velocity: f32,
}

impl Setpoint {
    /// Position error against a measurement.
    #[inline]
    pub fn error(&self, measured: f32) -> f32 {
        self.position - measured
    }

    /// Run one tick of `corrector` toward this setpoint.
    pub fn drive<C: Corrector + ?Sized>(&self, corrector: &mut C, measured: f32, dt: f32) -> f32 {
        corrector.correct(self.position, measured, dt)
    }
}

/// Closed-loop controller that tracks a commanded position.
pub trait Corrector {
    /// Compute the actuator output for one tick.
    fn correct(&mut self, commanded: f32, measured: f32, dt: f32) -> f32;
}

impl<F> Corrector for F
where
    F: FnMut(f32, f32, f32) -> f32,
{
    fn correct(&mut self, commanded: f32, measured: f32, dt: f32) -> f32 {
        self(commanded, measured, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Proportional-only loop, enough to exercise the trait.
    struct Proportional {
        gain: f32,
    }

    impl Corrector for Proportional {
        fn correct(&mut self, commanded: f32, measured: f32, _dt: f32) -> f32 {
            self.gain * (commanded - measured)
        }
    }

    #[test]
    fn test_drive_proportional() {
        let setpoint = Setpoint {
            position: 10.0,
            velocity: 2.0,
        };
        let mut p = Proportional { gain: 0.5 };

        assert_eq!(setpoint.error(4.0), 6.0);
        assert_eq!(setpoint.drive(&mut p, 4.0, 0.01), 3.0);
    }

    #[test]
    fn test_closure_corrector() {
        let setpoint = Setpoint {
            position: 1.0,
            velocity: 0.0,
        };
        let mut calls = 0;
        let mut loop_fn = |c: f32, m: f32, _dt: f32| {
            calls += 1;
            c - m
        };

        assert_eq!(setpoint.drive(&mut loop_fn, 0.25, 0.01), 0.75);
        assert_eq!(calls, 1);
    }
}
