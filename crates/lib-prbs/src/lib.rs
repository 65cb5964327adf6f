//! # lib-prbs
//!
//! Pseudo-Random Binary Signal generation for system identification.
//!
//! A PRBS here is one full period of a maximal-length linear feedback shift
//! register, with every bit held for `t_min` samples, so that the signal's
//! runs of identical samples last at least `t_min` and at most `t_max`.
//!
//! - **Tap table**: primitive feedback polynomials for 2-31 bit registers
//! - **LFSR**: Fibonacci shift register with all-ones or random seeding
//! - **Run-length analysis**: bounds and per-value statistics
//! - **Configuration**: JSON/TOML parameter records with type checking
//!
//! ```
//! use lib_prbs::{prbs, InitState};
//!
//! let signal = prbs(3, 1, InitState::Ones).unwrap();
//! assert_eq!(signal, vec![1, 1, 1, 0, 1, 0, 0]);
//! ```

pub mod config;
pub mod error;
pub mod lfsr;
pub mod prbs;
pub mod runlength;
pub mod taps;

pub use config::{ParamValue, PrbsConfig};
pub use error::{ErrorKind, PrbsError, PrbsResult};
pub use lfsr::Lfsr;
pub use prbs::{prbs, PrbsGenerator, PrbsParams, PrbsSignal};
pub use runlength::{run_length_bounds, run_length_stats, RunLengthStats};
pub use taps::RegisterSpec;

pub use lib_types::InitState;
