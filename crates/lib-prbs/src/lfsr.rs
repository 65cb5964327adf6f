//! Fibonacci linear feedback shift register.
//!
//! The register is a `u32` bit vector: bit `i` holds position `i + 1`,
//! counted from the input end, so position `width` (the output end) is bit
//! `width - 1`. On every step the tapped bits are XORed into a feedback bit,
//! the register shifts one place toward the output end, the feedback enters
//! at the input end, and the bit pushed out is the step's output.

use crate::error::{PrbsError, PrbsResult};
use crate::taps::RegisterSpec;
use lib_types::InitState;
use rand::Rng;

/// Linear feedback shift register driven by a primitive tap polynomial.
#[derive(Clone, Debug)]
pub struct Lfsr {
    /// Current register state.
    state: u32,

    /// State the register was seeded with.
    seed: u32,

    /// Feedback taps (XOR mask).
    tap_mask: u32,

    /// Register width in bits.
    width: u8,

    /// Steps taken since seeding.
    count: u64,
}

impl Lfsr {
    /// Create a register of `width` bits seeded with `seed`.
    pub fn new(width: u8, seed: u32) -> PrbsResult<Self> {
        let spec = RegisterSpec::for_width(width)?;

        if seed == 0 {
            return Err(PrbsError::ZeroSeed);
        }
        if seed & !state_mask(width) != 0 {
            return Err(PrbsError::SeedOutOfRange { seed, width });
        }

        Ok(Self {
            state: seed,
            seed,
            tap_mask: spec.tap_mask(),
            width,
            count: 0,
        })
    }

    /// Create a register with every bit set.
    pub fn ones(width: u8) -> PrbsResult<Self> {
        RegisterSpec::for_width(width)?;
        Self::new(width, state_mask(width))
    }

    /// Create a register with a uniformly random seed.
    ///
    /// Draws are rejected when they are all-zero, or when they are one of the
    /// `width - 1` states that follow the all-ones state. From those seeds the
    /// single run of `width` ones would straddle the end of the period and be
    /// split in two, so one period of output would not reach its longest run.
    pub fn random<R: Rng + ?Sized>(width: u8, rng: &mut R) -> PrbsResult<Self> {
        let spec = RegisterSpec::for_width(width)?;
        let mask = state_mask(width);
        let tap_mask = spec.tap_mask();

        let split_run: Vec<u32> = std::iter::successors(Some(mask), |&s| {
            Some(advance(s, tap_mask, width).0)
        })
        .skip(1)
        .take(width as usize - 1)
        .collect();

        loop {
            let candidate = rng.random::<u32>() & mask;
            if candidate != 0 && !split_run.contains(&candidate) {
                return Self::new(width, candidate);
            }
            tracing::trace!(candidate, width, "Rejected LFSR seed");
        }
    }

    /// Create a register seeded according to `init_state`.
    pub fn with_init_state<R: Rng + ?Sized>(
        width: u8,
        init_state: InitState,
        rng: &mut R,
    ) -> PrbsResult<Self> {
        match init_state {
            InitState::Ones => Self::ones(width),
            InitState::Random => Self::random(width, rng),
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sequence length (2^width - 1).
    pub fn period(&self) -> u64 {
        crate::taps::period(self.width)
    }

    /// Steps taken since seeding or the last reset.
    pub fn bit_count(&self) -> u64 {
        self.count
    }

    /// Advance one step and return the bit shifted out.
    pub fn step(&mut self) -> u8 {
        let (next, out) = advance(self.state, self.tap_mask, self.width);
        self.state = next;
        self.count += 1;
        out
    }

    /// Step through exactly one period, collecting every output bit.
    ///
    /// For a primitive polynomial the register ends back at the state it
    /// held before the call.
    pub fn run_period(&mut self) -> Vec<u8> {
        let period = self.period() as usize;
        let mut bits = Vec::with_capacity(period);
        for _ in 0..period {
            bits.push(self.step());
        }
        bits
    }

    /// Return to the seed state.
    pub fn reset(&mut self) {
        self.state = self.seed;
        self.count = 0;
    }
}

impl Iterator for Lfsr {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.step())
    }
}

/// One register step: returns the next state and the output bit.
#[inline]
pub fn advance(state: u32, tap_mask: u32, width: u8) -> (u32, u8) {
    let feedback = (state & tap_mask).count_ones() & 1;
    let out = (state >> (width - 1)) & 1;
    let next = ((state << 1) | feedback) & state_mask(width);
    (next, out as u8)
}

#[inline]
fn state_mask(width: u8) -> u32 {
    (1u32 << width) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taps::{MAX_WIDTH, MIN_WIDTH};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_width3_sequence() {
        let mut lfsr = Lfsr::ones(3).unwrap();
        let bits = lfsr.run_period();
        assert_eq!(bits, vec![1, 1, 1, 0, 1, 0, 0]);
        assert_eq!(lfsr.state(), 0b111);
        assert_eq!(lfsr.bit_count(), 7);
    }

    #[test]
    fn test_width2_sequence() {
        let mut lfsr = Lfsr::ones(2).unwrap();
        assert_eq!(lfsr.run_period(), vec![1, 1, 0]);
    }

    #[test]
    fn test_every_table_entry_is_maximal() {
        // Exhaustive period check, bounded to keep test time reasonable.
        for width in MIN_WIDTH..=20 {
            let mut lfsr = Lfsr::ones(width).unwrap();
            let seed = lfsr.state();
            let period = lfsr.period();

            let mut steps = 0u64;
            loop {
                lfsr.step();
                steps += 1;
                if lfsr.state() == seed {
                    break;
                }
                assert!(steps < period, "width {width} repeated early");
            }
            assert_eq!(steps, period, "width {width} period");
        }
    }

    #[test]
    fn test_ones_output_starts_with_longest_run() {
        for width in MIN_WIDTH..=MAX_WIDTH {
            let lfsr = Lfsr::ones(width).unwrap();
            let head: Vec<u8> = lfsr.take(width as usize + 1).collect();
            assert!(head[..width as usize].iter().all(|&b| b == 1));
            assert_eq!(head[width as usize], 0, "width {width} run too long");
        }
    }

    #[test]
    fn test_seed_validation() {
        assert!(matches!(Lfsr::new(5, 0), Err(PrbsError::ZeroSeed)));
        assert!(matches!(
            Lfsr::new(3, 0b1000),
            Err(PrbsError::SeedOutOfRange { seed: 8, width: 3 })
        ));
        assert!(matches!(
            Lfsr::new(32, 1),
            Err(PrbsError::RegisterWidthOutOfRange { width: 32 })
        ));
        assert!(Lfsr::ones(1).is_err());
    }

    #[test]
    fn test_random_seed_never_splits_run() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            let lfsr = Lfsr::random(3, &mut rng).unwrap();
            assert_ne!(lfsr.seed(), 0);
            // 0b110 and 0b101 follow the all-ones state for width 3.
            assert!(![0b110, 0b101].contains(&lfsr.seed()));
            seen.insert(lfsr.seed());
        }

        assert_eq!(seen.len(), 5, "all valid seeds should be reachable");
    }

    #[test]
    fn test_reset() {
        let mut lfsr = Lfsr::new(4, 0b0101).unwrap();
        let first: Vec<u8> = lfsr.by_ref().take(6).collect();
        lfsr.reset();
        assert_eq!(lfsr.state(), 0b0101);
        assert_eq!(lfsr.bit_count(), 0);
        let again: Vec<u8> = lfsr.take(6).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_init_state_dispatch() {
        let mut rng = StdRng::seed_from_u64(7);
        let ones = Lfsr::with_init_state(6, InitState::Ones, &mut rng).unwrap();
        assert_eq!(ones.seed(), 0b11_1111);

        let random = Lfsr::with_init_state(6, InitState::Random, &mut rng).unwrap();
        assert_ne!(random.seed(), 0);
    }
}
