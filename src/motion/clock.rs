//! Monotonic time sources for the clocked update form.

use core::cell::Cell;

/// A monotonic microsecond clock.
///
/// Implementations must never go backwards; the profile still clamps a
/// negative delta to zero.
pub trait MonotonicClock {
    /// Microseconds since an arbitrary, fixed epoch.
    fn now_micros(&self) -> u64;
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }
}

/// Clock whose time only moves when told to.
///
/// Useful for simulations and tests that must not wait on wall-clock time.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `us` microseconds.
    pub fn advance_micros(&self, us: u64) {
        self.now.set(self.now.get().saturating_add(us));
    }

    /// Advance the clock by `ms` milliseconds.
    pub fn advance_millis(&self, ms: u64) {
        self.advance_micros(ms.saturating_mul(1_000));
    }

    /// Jump to an absolute time.
    pub fn set_micros(&self, us: u64) {
        self.now.set(us);
    }
}

impl MonotonicClock for ManualClock {
    fn now_micros(&self) -> u64 {
        self.now.get()
    }
}

/// Wall clock backed by `std::time::Instant`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Create a clock whose epoch is now.
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl MonotonicClock for StdClock {
    fn now_micros(&self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }
}
