//! # lib-types
//!
//! Core value types shared by the PRBS excitation workspace:
//! - Time units for sample intervals
//! - Level waveforms built from binary sequences
//! - Register seeding modes

pub mod init_state;
pub mod units;
pub mod waveform;

pub use init_state::{InitState, ParseInitStateError};
pub use units::Seconds;
pub use waveform::Waveform;
