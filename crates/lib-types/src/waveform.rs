//! Uniformly-sampled level waveforms.
//!
//! Sample `i` sits at `t_start + i * dt`. [`Waveform::duration`] is `N * dt`,
//! one interval past the last sample, so a signal of `N` samples played back
//! at `dt` lasts exactly `duration()`.

use crate::units::Seconds;
use serde::{Deserialize, Serialize};

/// A uniformly-sampled time-domain waveform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    /// Sample values (excitation levels).
    pub samples: Vec<f64>,

    /// Time step between consecutive samples.
    pub dt: Seconds,

    /// Time of the first sample.
    pub t_start: Seconds,
}

impl Waveform {
    /// Create a new waveform from samples.
    pub fn new(samples: Vec<f64>, dt: Seconds, t_start: Seconds) -> Self {
        Self { samples, dt, t_start }
    }

    /// Map binary samples onto two levels, starting at t = 0.
    pub fn from_bits(bits: &[u8], dt: Seconds, v_high: f64, v_low: f64) -> Self {
        let samples = bits
            .iter()
            .map(|&b| if b != 0 { v_high } else { v_low })
            .collect();

        Self {
            samples,
            dt,
            t_start: Seconds::ZERO,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total duration of the waveform.
    #[inline]
    pub fn duration(&self) -> Seconds {
        Seconds(self.samples.len() as f64 * self.dt.0)
    }

    /// Time of sample `index`.
    #[inline]
    pub fn time_at(&self, index: usize) -> Seconds {
        Seconds(self.t_start.0 + index as f64 * self.dt.0)
    }

    /// Sample rate (reciprocal of dt).
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        1.0 / self.dt.0
    }

    /// Arithmetic mean (DC level).
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Peak-to-peak amplitude.
    pub fn peak_to_peak(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let (min, max) = self.samples.iter().fold((f64::MAX, f64::MIN), |(min, max), &v| {
            (min.min(v), max.max(v))
        });
        max - min
    }
}
