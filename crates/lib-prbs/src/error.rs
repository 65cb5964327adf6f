//! Error types for PRBS generation.

use lib_types::ParseInitStateError;
use thiserror::Error;

/// Errors that can occur while configuring or building a PRBS.
///
/// Run-length post-condition failures are not represented here: they indicate
/// a broken tap table or engine and panic instead.
#[derive(Debug, Error)]
pub enum PrbsError {
    /// A parameter that must be an integer was something else.
    #[error("`{param}` must be an integer, got {found}")]
    TypeMismatch { param: &'static str, found: String },

    /// A parameter violates its bounds.
    #[error("`{param}` out of range: got {value}, expected {constraint}")]
    OutOfRange {
        param: &'static str,
        value: i64,
        constraint: String,
    },

    /// Unknown init-state name.
    #[error(transparent)]
    UnsupportedInitState(#[from] ParseInitStateError),

    /// Derived register width has no tap polynomial.
    #[error(
        "Cannot generate signal with a {width}-bit register (supported 2-31), \
         split into two sequences"
    )]
    RegisterWidthOutOfRange { width: usize },

    /// The longest run of a maximal sequence is `width * t_min` samples, which
    /// only equals `t_max` when `t_min` divides it.
    #[error("`t_max` ({t_max}) must be a multiple of `t_min` ({t_min})")]
    UnrealizableRatio { t_max: usize, t_min: usize },

    /// Sample count does not fit in memory addressing.
    #[error("Signal of {period} bits x {t_min} samples exceeds addressable length")]
    SignalTooLong { period: u64, t_min: usize },

    /// All-zero seed is a fixed point of the feedback function.
    #[error("LFSR seed must be non-zero")]
    ZeroSeed,

    /// Seed has bits set above the register width.
    #[error("Seed {seed:#x} does not fit a {width}-bit register")]
    SeedOutOfRange { seed: u32, width: u8 },

    /// Malformed JSON configuration.
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML configuration.
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Coarse classification of [`PrbsError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,
    OutOfRange,
    UnsupportedOption,
    /// The requested (t_max, t_min) pair can't be realized by the table.
    Configuration,
    InvalidSeed,
    Syntax,
}

impl PrbsError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrbsError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            PrbsError::OutOfRange { .. } => ErrorKind::OutOfRange,
            PrbsError::UnsupportedInitState(_) => ErrorKind::UnsupportedOption,
            PrbsError::RegisterWidthOutOfRange { .. }
            | PrbsError::UnrealizableRatio { .. }
            | PrbsError::SignalTooLong { .. } => ErrorKind::Configuration,
            PrbsError::ZeroSeed | PrbsError::SeedOutOfRange { .. } => ErrorKind::InvalidSeed,
            PrbsError::Json(_) | PrbsError::Toml(_) => ErrorKind::Syntax,
        }
    }

    /// Create an out-of-range error.
    pub fn out_of_range(param: &'static str, value: i64, constraint: impl Into<String>) -> Self {
        Self::OutOfRange {
            param,
            value,
            constraint: constraint.into(),
        }
    }
}

/// Result type for PRBS operations.
pub type PrbsResult<T> = Result<T, PrbsError>;
