//! Unit types for physical quantities.
//!
//! Profiles are unit-agnostic: a `Units` value may be degrees, millimetres or
//! encoder counts, as long as one axis uses the same unit throughout. The
//! newtypes keep positions, rates and durations from being mixed up in
//! configuration.

use core::ops::{Add, Mul, Sub};

use serde::Deserialize;

/// Position in caller-defined units.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Units(pub f32);

impl Units {
    /// Create a new Units value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Add for Units {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Units {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Velocity in units per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct UnitsPerSec(pub f32);

impl UnitsPerSec {
    /// Create a new UnitsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Mul<f32> for UnitsPerSec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Mul<Seconds> for UnitsPerSec {
    type Output = Units;

    fn mul(self, rhs: Seconds) -> Self::Output {
        Units(self.0 * rhs.0)
    }
}

/// Acceleration in units per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct UnitsPerSecSquared(pub f32);

impl UnitsPerSecSquared {
    /// Create a new UnitsPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Mul<f32> for UnitsPerSecSquared {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Mul<Seconds> for UnitsPerSecSquared {
    type Output = UnitsPerSec;

    fn mul(self, rhs: Seconds) -> Self::Output {
        UnitsPerSec(self.0 * rhs.0)
    }
}

/// Elapsed time in seconds.
///
/// Profiles integrate in seconds. Hosts that measure milliseconds or
/// microseconds convert here rather than at every call site.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Seconds(pub f32);

impl Seconds {
    /// Create a new Seconds value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Create from milliseconds.
    #[inline]
    pub fn from_millis(ms: f32) -> Self {
        Self(ms / 1_000.0)
    }

    /// Create from whole microseconds.
    #[inline]
    pub fn from_micros(us: u64) -> Self {
        Self(us as f32 / 1_000_000.0)
    }

    /// Convert to milliseconds.
    #[inline]
    pub fn as_millis(self) -> f32 {
        self.0 * 1_000.0
    }
}

impl Add for Seconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Units.
    fn units(self) -> Units;
    /// Convert to UnitsPerSec.
    fn units_per_sec(self) -> UnitsPerSec;
    /// Convert to UnitsPerSecSquared.
    fn units_per_sec_squared(self) -> UnitsPerSecSquared;
    /// Convert to Seconds.
    fn secs(self) -> Seconds;
}

impl UnitExt for f32 {
    #[inline]
    fn units(self) -> Units {
        Units(self)
    }

    #[inline]
    fn units_per_sec(self) -> UnitsPerSec {
        UnitsPerSec(self)
    }

    #[inline]
    fn units_per_sec_squared(self) -> UnitsPerSecSquared {
        UnitsPerSecSquared(self)
    }

    #[inline]
    fn secs(self) -> Seconds {
        Seconds(self)
    }
}
