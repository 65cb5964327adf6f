//! Time units with type safety.
//!
//! Sample intervals are carried as [`Seconds`] so waveform timing can't be
//! confused with sample counts.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Time duration in seconds.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Seconds(pub f64);

impl Seconds {
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub fn from_us(us: f64) -> Self {
        Self(us * 1e-6)
    }

    #[inline]
    pub fn from_ms(ms: f64) -> Self {
        Self(ms * 1e-3)
    }

    #[inline]
    pub fn as_ms(&self) -> f64 {
        self.0 * 1e3
    }

    /// Sample interval for a sampling frequency in hertz.
    #[inline]
    pub fn from_sample_rate(hz: f64) -> Self {
        Self(1.0 / hz)
    }
}

impl Add for Seconds {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<f64> for Seconds {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}
