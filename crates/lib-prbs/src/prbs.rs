//! Pseudo-Random Binary Signal (PRBS) generation with bounded run lengths.
//!
//! A signal is built by running a maximal-length LFSR of width
//! `n = t_max / t_min` through one period and holding each output bit for
//! `t_min` samples. Every run in one period of a maximal sequence is between
//! 1 and `n` bits long, so the expanded signal's runs are between `t_min` and
//! `t_max` samples, and both extremes occur.

use crate::error::{PrbsError, PrbsResult};
use crate::lfsr::Lfsr;
use crate::runlength::{run_length_bounds, run_length_stats, RunLengthStats};
use crate::taps::RegisterSpec;
use lib_types::{InitState, Seconds, Waveform};
use rand::Rng;

/// Widths at or above this produce multi-megasample buffers.
const LARGE_WIDTH: u8 = 24;

/// Validated PRBS parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrbsParams {
    t_max: usize,
    t_min: usize,
    init_state: InitState,
}

impl PrbsParams {
    /// Validate run-length bounds.
    ///
    /// Requires `t_max >= 2`, `t_min >= 1` and `t_min < t_max`.
    pub fn new(t_max: i64, t_min: i64, init_state: InitState) -> PrbsResult<Self> {
        if t_max < 2 {
            return Err(PrbsError::out_of_range("t_max", t_max, ">= 2"));
        }
        if t_min < 1 {
            return Err(PrbsError::out_of_range("t_min", t_min, ">= 1"));
        }
        if t_min >= t_max {
            return Err(PrbsError::out_of_range(
                "t_min",
                t_min,
                format!("< t_max ({t_max})"),
            ));
        }

        let t_max_samples = usize::try_from(t_max)
            .map_err(|_| PrbsError::out_of_range("t_max", t_max, "addressable length"))?;
        let t_min_samples = usize::try_from(t_min)
            .map_err(|_| PrbsError::out_of_range("t_min", t_min, "addressable length"))?;

        Ok(Self {
            t_max: t_max_samples,
            t_min: t_min_samples,
            init_state,
        })
    }

    pub fn t_max(&self) -> usize {
        self.t_max
    }

    pub fn t_min(&self) -> usize {
        self.t_min
    }

    pub fn init_state(&self) -> InitState {
        self.init_state
    }

    /// Same bounds with a different seeding mode.
    pub fn with_init_state(self, init_state: InitState) -> Self {
        Self { init_state, ..self }
    }
}

/// PRBS generator for one set of parameters.
#[derive(Clone, Debug)]
pub struct PrbsGenerator {
    params: PrbsParams,
    register: RegisterSpec,
    signal_len: usize,
}

impl PrbsGenerator {
    /// Select the register for `params` and size the output.
    pub fn new(params: PrbsParams) -> PrbsResult<Self> {
        let register = RegisterSpec::for_run_lengths(params.t_max, params.t_min)?;
        let period = register.period();

        let signal_len = usize::try_from(period)
            .ok()
            .and_then(|p| p.checked_mul(params.t_min))
            .ok_or(PrbsError::SignalTooLong {
                period,
                t_min: params.t_min,
            })?;

        if register.width >= LARGE_WIDTH {
            tracing::warn!(
                width = register.width,
                samples = signal_len,
                "Large PRBS requested, output buffer holds {} samples",
                signal_len
            );
        }

        Ok(Self {
            params,
            register,
            signal_len,
        })
    }

    pub fn params(&self) -> &PrbsParams {
        &self.params
    }

    /// Register width in bits.
    pub fn width(&self) -> u8 {
        self.register.width
    }

    /// Tap polynomial of the register.
    pub fn taps(&self) -> &'static [u8] {
        self.register.taps
    }

    /// Raw sequence length (2^width - 1).
    pub fn period(&self) -> u64 {
        self.register.period()
    }

    /// Number of samples in the generated signal.
    pub fn signal_len(&self) -> usize {
        self.signal_len
    }

    /// Generate the signal, seeding from the thread-local RNG when random.
    pub fn generate(&self) -> PrbsResult<PrbsSignal> {
        self.generate_with_rng(&mut rand::rng())
    }

    /// Generate the signal, drawing a random seed from `rng` when needed.
    ///
    /// # Panics
    ///
    /// Panics if the generated signal violates its length or run-length
    /// bounds. That can only happen if the tap table or register stepping is
    /// broken.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> PrbsResult<PrbsSignal> {
        let PrbsParams {
            t_max,
            t_min,
            init_state,
        } = self.params;

        let mut lfsr = Lfsr::with_init_state(self.register.width, init_state, rng)?;
        tracing::debug!(
            t_max,
            t_min,
            width = self.register.width,
            period = self.period(),
            seed = lfsr.seed(),
            "Generating PRBS"
        );

        let raw = lfsr.run_period();
        debug_assert_eq!(lfsr.state(), lfsr.seed(), "register did not complete its period");

        let samples = expand(&raw, t_min);
        drop(raw);

        assert_eq!(
            samples.len(),
            self.signal_len,
            "PRBS length {} != period {} x t_min {}",
            samples.len(),
            self.period(),
            t_min
        );
        let bounds = run_length_bounds(&samples);
        assert_eq!(
            bounds.map(|b| b.max),
            Some(t_max),
            "PRBS longest run does not match t_max (width {}, taps {:?})",
            self.register.width,
            self.register.taps
        );
        assert_eq!(
            bounds.map(|b| b.min),
            Some(t_min),
            "PRBS shortest run does not match t_min (width {}, taps {:?})",
            self.register.width,
            self.register.taps
        );

        tracing::debug!(samples = samples.len(), "PRBS generated");

        Ok(PrbsSignal {
            samples,
            params: self.params,
            register: self.register,
            seed: lfsr.seed(),
        })
    }
}

/// Hold each bit for `t_min` samples.
fn expand(raw: &[u8], t_min: usize) -> Vec<u8> {
    let mut samples = Vec::with_capacity(raw.len() * t_min);
    for &bit in raw {
        samples.extend(std::iter::repeat(bit).take(t_min));
    }
    samples
}

/// A generated PRBS with the register that produced it.
#[derive(Clone, Debug)]
pub struct PrbsSignal {
    samples: Vec<u8>,
    params: PrbsParams,
    register: RegisterSpec,
    seed: u32,
}

impl PrbsSignal {
    /// Samples in {0, 1}, in generation order.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn params(&self) -> &PrbsParams {
        &self.params
    }

    pub fn width(&self) -> u8 {
        self.register.width
    }

    pub fn taps(&self) -> &'static [u8] {
        self.register.taps
    }

    pub fn period(&self) -> u64 {
        self.register.period()
    }

    /// Register state the sequence started from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Per-value run-length statistics.
    pub fn run_lengths(&self) -> RunLengthStats {
        run_length_stats(&self.samples)
    }

    /// Map samples onto two levels.
    ///
    /// # Arguments
    ///
    /// * `dt` - Sample interval
    /// * `v_high` - Level for bit 1
    /// * `v_low` - Level for bit 0
    pub fn to_waveform(&self, dt: Seconds, v_high: f64, v_low: f64) -> Waveform {
        Waveform::from_bits(&self.samples, dt, v_high, v_low)
    }

    /// Bipolar NRZ waveform (+1/-1).
    pub fn to_nrz(&self, dt: Seconds) -> Waveform {
        self.to_waveform(dt, 1.0, -1.0)
    }
}

/// Generate a PRBS whose runs last between `t_min` and `t_max` samples.
pub fn prbs(t_max: i64, t_min: i64, init_state: InitState) -> PrbsResult<Vec<u8>> {
    let params = PrbsParams::new(t_max, t_min, init_state)?;
    let signal = PrbsGenerator::new(params)?.generate()?;
    Ok(signal.into_samples())
}
